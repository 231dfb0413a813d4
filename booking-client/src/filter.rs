//! Search filter over the active bookings

use shared::models::Booking;

/// Whether `booking` matches `query`
///
/// Name and destination match case-insensitively; the phone number matches
/// the query literally.
pub fn matches(booking: &Booking, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    booking.user_name.to_lowercase().contains(&needle)
        || booking.destination.to_lowercase().contains(&needle)
        || booking.user_number.contains(query)
}

/// Subsequence of `bookings` matching `query`, in the original order
pub fn filter_bookings<'a>(bookings: &'a [Booking], query: &str) -> Vec<&'a Booking> {
    bookings.iter().filter(|b| matches(b, query)).collect()
}
