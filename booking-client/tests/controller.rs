use std::sync::Mutex;

use async_trait::async_trait;
use booking_client::{
    Booking, BookingApi, BookingError, BookingList, BookingStatus, ClientError, ClientResult,
    ConfirmPrompt, Notification, NotificationKind, Notifier,
};

// ========== Test doubles ==========

enum UpdateReply {
    Echo,
    Empty,
    Fail,
}

struct MockApi {
    bookings: Vec<Booking>,
    list_fails: bool,
    update_reply: UpdateReply,
    updates: Mutex<Vec<(String, BookingStatus)>>,
}

impl MockApi {
    fn with(bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            list_fails: false,
            update_reply: UpdateReply::Echo,
            updates: Mutex::new(Vec::new()),
        }
    }

    fn update_calls(&self) -> Vec<(String, BookingStatus)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingApi for MockApi {
    async fn list_bookings(&self) -> ClientResult<Vec<Booking>> {
        if self.list_fails {
            return Err(ClientError::Status {
                status: 500,
                code: Some(9002),
                message: "Database error".into(),
            });
        }
        Ok(self.bookings.clone())
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> ClientResult<Option<Booking>> {
        self.updates.lock().unwrap().push((id.to_string(), status));
        match self.update_reply {
            UpdateReply::Echo => Ok(self
                .bookings
                .iter()
                .find(|b| b.id == id)
                .map(|b| b.with_status(status))),
            UpdateReply::Empty => Ok(None),
            UpdateReply::Fail => Err(ClientError::InvalidResponse("connection reset".into())),
        }
    }
}

struct Answer(bool);

impl ConfirmPrompt for Answer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

#[derive(Default)]
struct RecordingPrompt(Mutex<Vec<String>>);

impl ConfirmPrompt for RecordingPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.0.lock().unwrap().push(message.to_string());
        true
    }
}

#[derive(Default)]
struct Recorder(Mutex<Vec<Notification>>);

impl Recorder {
    fn all(&self) -> Vec<Notification> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

fn booking(id: &str, name: &str, destination: &str, status: BookingStatus) -> Booking {
    Booking {
        id: id.to_string(),
        user_name: name.to_string(),
        user_age: Some(30),
        user_number: format!("555{}", id),
        destination: destination.to_string(),
        travel_date: "2025-01-10".to_string(),
        return_date: "2025-01-15".to_string(),
        ticket_quantity: 2,
        total_price: 4200.0,
        status,
        created_at: None,
    }
}

fn ids(bookings: &[Booking]) -> Vec<&str> {
    bookings.iter().map(|b| b.id.as_str()).collect()
}

async fn loaded(api: &MockApi) -> BookingList {
    let mut list = BookingList::new();
    list.load(api, &Recorder::default()).await.unwrap();
    list
}

// ========== Load ==========

#[tokio::test]
async fn test_load_partitions_preserving_order() {
    let api = MockApi::with(vec![
        booking("1", "Asha", "Goa", BookingStatus::Active),
        booking("2", "Ravi", "Pune", BookingStatus::Canceled),
        booking("3", "Meera", "Delhi", BookingStatus::Active),
        booking("4", "Kiran", "Agra", BookingStatus::Canceled),
    ]);
    let list = loaded(&api).await;

    assert!(!list.is_loading());
    assert_eq!(ids(list.active()), vec!["1", "3"]);
    assert_eq!(ids(list.canceled()), vec!["2", "4"]);

    let mut all: Vec<&str> = ids(list.active());
    all.extend(ids(list.canceled()));
    all.sort_unstable();
    assert_eq!(all, vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_load_failure_notifies_and_empties() {
    let mut api = MockApi::with(vec![booking("1", "Asha", "Goa", BookingStatus::Active)]);
    api.list_fails = true;
    let notifier = Recorder::default();

    let mut list = BookingList::new();
    let err = list.load(&api, &notifier).await.unwrap_err();

    assert!(matches!(err, BookingError::Fetch(ClientError::Status { status: 500, .. })));
    assert!(!list.is_loading());
    assert!(list.active().is_empty());
    assert!(list.canceled().is_empty());
    assert_eq!(notifier.all(), vec![Notification::error("Failed to load bookings")]);
}

// ========== Cancel ==========

#[tokio::test]
async fn test_cancel_moves_booking_once() {
    let api = MockApi::with(vec![
        booking("1", "Asha", "Goa", BookingStatus::Active),
        booking("2", "Ravi", "Pune", BookingStatus::Active),
    ]);
    let mut list = loaded(&api).await;
    let notifier = Recorder::default();

    let sent = list
        .cancel(&api, "1", "Asha", &Answer(true), &notifier)
        .await
        .unwrap();

    assert!(sent);
    assert_eq!(ids(list.active()), vec!["2"]);
    assert_eq!(ids(list.canceled()), vec!["1"]);
    assert_eq!(list.canceled()[0].status, BookingStatus::Canceled);
    assert_eq!(api.update_calls(), vec![("1".to_string(), BookingStatus::Canceled)]);
    assert_eq!(
        notifier.all(),
        vec![Notification::success("Booking for Asha has been canceled successfully")]
    );
}

#[tokio::test]
async fn test_cancel_with_empty_body_counts_as_success() {
    let mut api = MockApi::with(vec![booking("1", "Asha", "Goa", BookingStatus::Active)]);
    api.update_reply = UpdateReply::Empty;
    let mut list = loaded(&api).await;

    list.cancel(&api, "1", "Asha", &Answer(true), &Recorder::default())
        .await
        .unwrap();

    assert!(list.active().is_empty());
    assert_eq!(ids(list.canceled()), vec!["1"]);
}

#[tokio::test]
async fn test_cancel_keeps_local_record_fields() {
    let api = MockApi::with(vec![booking("1", "Asha", "Goa", BookingStatus::Active)]);
    let mut list = loaded(&api).await;
    let before = list.active()[0].clone();

    list.cancel(&api, "1", "Asha", &Answer(true), &Recorder::default())
        .await
        .unwrap();

    assert_eq!(list.canceled()[0], before.with_status(BookingStatus::Canceled));
}

#[tokio::test]
async fn test_failed_cancel_changes_nothing() {
    let mut api = MockApi::with(vec![
        booking("1", "Asha", "Goa", BookingStatus::Active),
        booking("2", "Ravi", "Pune", BookingStatus::Canceled),
    ]);
    api.update_reply = UpdateReply::Fail;
    let mut list = loaded(&api).await;
    let active_before = list.active().to_vec();
    let canceled_before = list.canceled().to_vec();
    let notifier = Recorder::default();

    let err = list
        .cancel(&api, "1", "Asha", &Answer(true), &notifier)
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Update(_)));
    assert_eq!(list.active(), active_before.as_slice());
    assert_eq!(list.canceled(), canceled_before.as_slice());
    assert!(!list.is_pending("1"));
    assert_eq!(notifier.all(), vec![Notification::error("Failed to cancel booking")]);
}

#[tokio::test]
async fn test_declined_confirmation_sends_nothing() {
    let api = MockApi::with(vec![booking("1", "Asha", "Goa", BookingStatus::Active)]);
    let mut list = loaded(&api).await;
    let notifier = Recorder::default();

    let sent = list
        .cancel(&api, "1", "Asha", &Answer(false), &notifier)
        .await
        .unwrap();

    assert!(!sent);
    assert!(api.update_calls().is_empty());
    assert_eq!(ids(list.active()), vec!["1"]);
    assert!(list.canceled().is_empty());
    assert!(notifier.all().is_empty());
}

#[tokio::test]
async fn test_confirmation_names_the_traveller() {
    let api = MockApi::with(vec![booking("1", "Asha", "Goa", BookingStatus::Active)]);
    let mut list = loaded(&api).await;
    let prompt = RecordingPrompt::default();

    list.cancel(&api, "1", "Asha", &prompt, &Recorder::default())
        .await
        .unwrap();

    assert_eq!(
        *prompt.0.lock().unwrap(),
        vec!["Are you sure you want to cancel Asha's booking?".to_string()]
    );
}

#[tokio::test]
async fn test_success_message_uses_display_name() {
    let api = MockApi::with(vec![booking("1", "asha k", "Goa", BookingStatus::Active)]);
    let mut list = loaded(&api).await;
    let prompt = RecordingPrompt::default();
    let notifier = Recorder::default();

    list.cancel(&api, "1", "Asha Kumar", &prompt, &notifier)
        .await
        .unwrap();

    assert_eq!(
        *prompt.0.lock().unwrap(),
        vec!["Are you sure you want to cancel Asha Kumar's booking?".to_string()]
    );
    assert_eq!(
        notifier.all(),
        vec![Notification::success(
            "Booking for Asha Kumar has been canceled successfully"
        )]
    );
}

#[tokio::test]
async fn test_cancel_of_inactive_booking_skips_prompt() {
    let api = MockApi::with(vec![
        booking("1", "Asha", "Goa", BookingStatus::Active),
        booking("2", "Ravi", "Pune", BookingStatus::Canceled),
    ]);
    let mut list = loaded(&api).await;
    let prompt = RecordingPrompt::default();
    let notifier = Recorder::default();

    for id in ["2", "missing"] {
        let sent = list
            .cancel(&api, id, "Ravi", &prompt, &notifier)
            .await
            .unwrap();
        assert!(!sent);
    }

    assert!(prompt.0.lock().unwrap().is_empty());
    assert!(api.update_calls().is_empty());
    assert!(notifier.all().is_empty());
    assert_eq!(ids(list.active()), vec!["1"]);
    assert_eq!(ids(list.canceled()), vec!["2"]);
}

#[tokio::test]
async fn test_pending_cancel_ignores_second_request() {
    let api = MockApi::with(vec![
        booking("1", "Asha", "Goa", BookingStatus::Active),
        booking("2", "Ravi", "Pune", BookingStatus::Active),
    ]);
    let mut list = loaded(&api).await;
    let notifier = Recorder::default();

    let first = list.request_cancel("1", "Asha", &Answer(true)).unwrap();
    assert!(list.request_cancel("1", "Asha", &Answer(true)).is_none());

    // a different booking may be canceled concurrently
    let second = list.request_cancel("2", "Ravi", &Answer(true)).unwrap();

    list.finish_cancel(&second, "Ravi", Ok(None), &notifier).unwrap();
    list.finish_cancel(&first, "Asha", Ok(None), &notifier).unwrap();

    assert!(list.active().is_empty());
    assert_eq!(ids(list.canceled()), vec!["2", "1"]);
    assert!(notifier.all().iter().all(|n| n.kind == NotificationKind::Success));
}

#[tokio::test]
async fn test_repeated_success_never_duplicates() {
    let api = MockApi::with(vec![booking("1", "Asha", "Goa", BookingStatus::Active)]);
    let mut list = loaded(&api).await;
    let notifier = Recorder::default();

    let snapshot = list.begin_cancel("1").unwrap();
    list.finish_cancel(&snapshot, "Asha", Ok(None), &notifier).unwrap();
    list.finish_cancel(&snapshot, "Asha", Ok(None), &notifier).unwrap();

    assert!(list.active().is_empty());
    assert_eq!(ids(list.canceled()), vec!["1"]);
}

// ========== Scenario ==========

#[tokio::test]
async fn test_load_search_cancel_flow() {
    let api = MockApi::with(vec![
        booking("1", "Asha", "Goa", BookingStatus::Active),
        booking("2", "Ravi", "Pune", BookingStatus::Canceled),
    ]);
    let mut list = loaded(&api).await;

    assert_eq!(ids(list.active()), vec!["1"]);
    assert_eq!(ids(list.canceled()), vec!["2"]);

    let found: Vec<&str> = list.search("goa").iter().map(|b| b.id.as_str()).collect();
    assert_eq!(found, vec!["1"]);

    list.cancel(&api, "1", "Asha", &Answer(true), &Recorder::default())
        .await
        .unwrap();

    assert!(list.active().is_empty());
    assert_eq!(ids(list.canceled()), vec!["2", "1"]);
    assert_eq!(list.canceled()[1].status, BookingStatus::Canceled);
}
