//! Booking list controller
//!
//! Client-side state for the booking-management view: the server's bookings
//! partitioned into `active` and `canceled`, plus the cancel command.
//!
//! Cancellation is split in two so that an event loop can run the request in
//! a background task:
//!
//! ```text
//! request_cancel / begin_cancel ──► (PATCH /bookings/{id}) ──► finish_cancel
//! ```
//!
//! [`BookingList::cancel`] chains both halves for callers that can simply await.
//! Loads follow the same shape: [`BookingList::begin_load`] hands out a
//! generation and only the latest one is applied.

use std::collections::HashSet;

use shared::models::{Booking, BookingStatus};

use crate::api::BookingApi;
use crate::error::{BookingError, ClientResult};
use crate::filter::filter_bookings;
use crate::notify::{ConfirmPrompt, Notification, Notifier};

pub const LOAD_FAILED: &str = "Failed to load bookings";
pub const CANCEL_FAILED: &str = "Failed to cancel booking";

/// Confirmation text shown before cancelling `name`'s booking
pub fn confirm_message(name: &str) -> String {
    format!("Are you sure you want to cancel {}'s booking?", name)
}

/// Success text after cancelling `name`'s booking
pub fn canceled_message(name: &str) -> String {
    format!("Booking for {} has been canceled successfully", name)
}

#[derive(Debug, Default)]
pub struct BookingList {
    active: Vec<Booking>,
    canceled: Vec<Booking>,
    loading: bool,
    /// Generation of the most recent load request
    generation: u64,
    /// Ids with a status update in flight
    in_flight: HashSet<String>,
}

impl BookingList {
    /// Fresh list in the loading state
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn active(&self) -> &[Booking] {
        &self.active
    }

    pub fn canceled(&self) -> &[Booking] {
        &self.canceled
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.in_flight.contains(id)
    }

    /// Active bookings matching the search query
    pub fn search(&self, query: &str) -> Vec<&Booking> {
        filter_bookings(&self.active, query)
    }

    // ========== Load ==========

    /// Fetch all bookings and partition them
    pub async fn load(
        &mut self,
        api: &dyn BookingApi,
        notifier: &dyn Notifier,
    ) -> Result<(), BookingError> {
        let generation = self.begin_load();
        let result = api.list_bookings().await;
        self.apply_loaded(generation, result, notifier)
    }

    /// Enter the loading state and return the generation of this load
    ///
    /// Bookings already shown and pending cancels are kept until the
    /// response is applied.
    pub fn begin_load(&mut self) -> u64 {
        self.loading = true;
        self.generation += 1;
        self.generation
    }

    /// Apply the outcome of the list request started as `generation`
    ///
    /// Responses from an older generation are dropped. On failure both
    /// sequences are left empty; there is no retry.
    pub fn apply_loaded(
        &mut self,
        generation: u64,
        result: ClientResult<Vec<Booking>>,
        notifier: &dyn Notifier,
    ) -> Result<(), BookingError> {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "Stale booking list dropped");
            return Ok(());
        }
        self.loading = false;
        match result {
            Ok(bookings) => {
                let (canceled, active): (Vec<_>, Vec<_>) =
                    bookings.into_iter().partition(Booking::is_canceled);
                self.active = active;
                self.canceled = canceled;
                tracing::debug!(
                    active = self.active.len(),
                    canceled = self.canceled.len(),
                    "Bookings loaded"
                );
                Ok(())
            }
            Err(e) => {
                self.active.clear();
                self.canceled.clear();
                tracing::warn!(error = %e, "Failed to load bookings");
                notifier.notify(Notification::error(LOAD_FAILED));
                Err(BookingError::Fetch(e))
            }
        }
    }

    // ========== Cancel ==========

    /// Ask for confirmation, then mark the booking pending
    ///
    /// Returns the local record to send off. `None` means nothing is sent:
    /// the booking is not active or already pending (no prompt is shown), or
    /// the user declined.
    pub fn request_cancel(
        &mut self,
        id: &str,
        name: &str,
        prompt: &dyn ConfirmPrompt,
    ) -> Option<Booking> {
        if !self.can_cancel(id) {
            tracing::debug!(booking_id = %id, "Cancel request ignored");
            return None;
        }
        if !prompt.confirm(&confirm_message(name)) {
            return None;
        }
        self.begin_cancel(id)
    }

    /// True when `id` is an active booking with no cancel in flight
    pub fn can_cancel(&self, id: &str) -> bool {
        !self.is_pending(id) && self.active.iter().any(|b| b.id == id)
    }

    /// Mark the booking pending without prompting (caller already confirmed)
    pub fn begin_cancel(&mut self, id: &str) -> Option<Booking> {
        if self.is_pending(id) {
            return None;
        }
        let booking = self.active.iter().find(|b| b.id == id)?.clone();
        self.in_flight.insert(id.to_string());
        Some(booking)
    }

    /// Apply the outcome of the status update for `booking`
    ///
    /// On success the local record moves from `active` to `canceled` without
    /// refetching, and the notification names `name`. On failure nothing
    /// changes.
    pub fn finish_cancel(
        &mut self,
        booking: &Booking,
        name: &str,
        outcome: ClientResult<Option<Booking>>,
        notifier: &dyn Notifier,
    ) -> Result<(), BookingError> {
        self.in_flight.remove(&booking.id);

        match outcome {
            Ok(_) => {
                self.active.retain(|b| b.id != booking.id);
                if !self.canceled.iter().any(|b| b.id == booking.id) {
                    self.canceled
                        .push(booking.with_status(BookingStatus::Canceled));
                }
                tracing::info!(booking_id = %booking.id, "Booking canceled");
                notifier.notify(Notification::success(canceled_message(name)));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(booking_id = %booking.id, error = %e, "Failed to cancel booking");
                notifier.notify(Notification::error(CANCEL_FAILED));
                Err(BookingError::Update(e))
            }
        }
    }

    /// Confirm, update on the server, then patch local state
    ///
    /// `Ok(false)` means nothing was sent (declined, not active or already
    /// pending).
    pub async fn cancel(
        &mut self,
        api: &dyn BookingApi,
        id: &str,
        name: &str,
        prompt: &dyn ConfirmPrompt,
        notifier: &dyn Notifier,
    ) -> Result<bool, BookingError> {
        let Some(booking) = self.request_cancel(id, name, prompt) else {
            return Ok(false);
        };
        let outcome = api
            .update_booking_status(&booking.id, BookingStatus::Canceled)
            .await;
        self.finish_cancel(&booking, name, outcome, notifier)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Notification>>);

    impl Notifier for Recorder {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn booking(id: &str, name: &str, status: BookingStatus) -> Booking {
        Booking {
            id: id.to_string(),
            user_name: name.to_string(),
            user_age: None,
            user_number: "5551234".to_string(),
            destination: "Goa".to_string(),
            travel_date: "2025-01-10".to_string(),
            return_date: "2025-01-15".to_string(),
            ticket_quantity: 1,
            total_price: 100.0,
            status,
            created_at: None,
        }
    }

    #[test]
    fn test_new_list_is_loading() {
        let list = BookingList::new();
        assert!(list.is_loading());
        assert!(list.active().is_empty());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            confirm_message("Asha"),
            "Are you sure you want to cancel Asha's booking?"
        );
        assert_eq!(
            canceled_message("Asha"),
            "Booking for Asha has been canceled successfully"
        );
    }

    #[test]
    fn test_begin_cancel_guards_double_click() {
        let notifier = Recorder::default();
        let mut list = BookingList::new();
        let generation = list.begin_load();
        list.apply_loaded(
            generation,
            Ok(vec![booking("1", "Asha", BookingStatus::Active)]),
            &notifier,
        )
        .unwrap();

        assert!(list.begin_cancel("1").is_some());
        assert!(list.is_pending("1"));
        assert!(list.begin_cancel("1").is_none());
    }

    #[test]
    fn test_begin_cancel_unknown_id() {
        let mut list = BookingList::new();
        assert!(list.begin_cancel("missing").is_none());
        assert!(!list.is_pending("missing"));
    }

    #[test]
    fn test_failed_cancel_clears_pending() {
        let notifier = Recorder::default();
        let mut list = BookingList::new();
        let generation = list.begin_load();
        list.apply_loaded(
            generation,
            Ok(vec![booking("1", "Asha", BookingStatus::Active)]),
            &notifier,
        )
        .unwrap();

        let snapshot = list.begin_cancel("1").unwrap();
        let err = list
            .finish_cancel(
                &snapshot,
                "Asha",
                Err(ClientError::NotFound("Booking 1 not found".into())),
                &notifier,
            )
            .unwrap_err();

        assert!(matches!(err, BookingError::Update(ClientError::NotFound(_))));
        assert!(!list.is_pending("1"));
        assert_eq!(list.active().len(), 1);
        assert!(list.canceled().is_empty());
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let notifier = Recorder::default();
        let mut list = BookingList::new();

        let older = list.begin_load();
        let newer = list.begin_load();
        list.apply_loaded(
            newer,
            Ok(vec![booking("2", "Ravi", BookingStatus::Active)]),
            &notifier,
        )
        .unwrap();
        list.apply_loaded(
            older,
            Err(ClientError::NotFound("gone".into())),
            &notifier,
        )
        .unwrap();

        assert!(!list.is_loading());
        assert_eq!(list.active().len(), 1);
        assert_eq!(list.active()[0].id, "2");
        assert!(notifier.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reload_keeps_pending_cancel() {
        let notifier = Recorder::default();
        let mut list = BookingList::new();
        let first = list.begin_load();
        list.apply_loaded(
            first,
            Ok(vec![booking("1", "Asha", BookingStatus::Active)]),
            &notifier,
        )
        .unwrap();
        assert!(list.begin_cancel("1").is_some());

        let second = list.begin_load();
        assert!(list.is_loading());
        assert_eq!(list.active().len(), 1);
        list.apply_loaded(
            second,
            Ok(vec![booking("1", "Asha", BookingStatus::Active)]),
            &notifier,
        )
        .unwrap();

        assert!(list.is_pending("1"));
        assert!(list.begin_cancel("1").is_none());
    }
}
