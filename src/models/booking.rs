//! Booking model and the interval/transition rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Rejected => "rejected",
        }
    }

    /// Whether the booking still occupies its time slot.
    ///
    /// Only `pending` and `confirmed` bookings participate in the
    /// conflict set; cancelled, rejected and completed ones do not.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Permitted status transitions:
    /// `pending -> {confirmed, rejected, cancelled}`,
    /// `confirmed -> {cancelled, completed}`.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Rejected) | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open interval intersection: `[s, e)` overlaps `[bs, be)` iff
/// `s < be && e > bs`. Back-to-back intervals (`e == bs` or `be == s`)
/// do not overlap.
pub fn intervals_overlap(
    s: DateTime<Utc>,
    e: DateTime<Utc>,
    bs: DateTime<Utc>,
    be: DateTime<Utc>,
) -> bool {
    s < be && e > bs
}

/// Booking record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: Option<String>,
    pub status: BookingStatus,
    pub admin_notes: Option<String>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking's interval intersects `[start, end)`.
    pub fn overlaps_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        intervals_overlap(start, end, self.start_time, self.end_time)
    }
}

/// New booking row to insert after precondition checks
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub equipment_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: Option<String>,
    pub status: BookingStatus,
}

/// Status change to apply to an existing booking
#[derive(Debug, Clone, PartialEq)]
pub struct BookingStatusChange {
    pub status: BookingStatus,
    pub admin_notes: Option<String>,
    /// When set, stamps `approved_by`/`approved_at` (confirm/reject paths)
    pub approved_by: Option<Uuid>,
    /// When set, stamps `cancelled_at`
    pub stamp_cancelled: bool,
    pub cancellation_reason: Option<String>,
}

/// Booking joined with equipment and user names for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingDetails {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: Option<String>,
    pub status: BookingStatus,
    pub admin_notes: Option<String>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub equipment_name: String,
    pub equipment_location: Option<String>,
    pub user_name: String,
    pub user_email: String,
    pub approved_by_name: Option<String>,
}

/// Create booking request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub equipment_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: Option<String>,
}

/// Update booking request (reschedule / edit purpose)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateBooking {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub purpose: Option<String>,
}

/// Admin status change request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
    pub admin_notes: Option<String>,
}

/// Cancel booking request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CancelBooking {
    pub reason: Option<String>,
}

/// Booking list query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    /// Filter by equipment id
    pub equipment_id: Option<Uuid>,
    /// Filter by requesting user id
    pub user_id: Option<Uuid>,
    /// Filter by status
    pub status: Option<BookingStatus>,
    /// Only bookings ending after this instant
    pub start_date: Option<DateTime<Utc>>,
    /// Only bookings starting before this instant
    pub end_date: Option<DateTime<Utc>>,
}

/// Availability query parameters (both bounds required)
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn overlapping_intervals_conflict() {
        // [10, 11) vs [10:30, 11:30)
        let half = Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap();
        let half_past_11 = Utc.with_ymd_and_hms(2025, 6, 1, 11, 30, 0).unwrap();
        assert!(intervals_overlap(half, half_past_11, at(10), at(11)));
    }

    #[test]
    fn containment_conflicts_both_directions() {
        assert!(intervals_overlap(at(10), at(14), at(11), at(12)));
        assert!(intervals_overlap(at(11), at(12), at(10), at(14)));
    }

    #[test]
    fn identical_intervals_conflict() {
        assert!(intervals_overlap(at(10), at(11), at(10), at(11)));
    }

    #[test]
    fn adjacent_intervals_do_not_conflict() {
        // [10, 11) then [11, 12): back-to-back is permitted
        assert!(!intervals_overlap(at(11), at(12), at(10), at(11)));
        assert!(!intervals_overlap(at(10), at(11), at(11), at(12)));
    }

    #[test]
    fn disjoint_intervals_do_not_conflict() {
        assert!(!intervals_overlap(at(8), at(9), at(10), at(11)));
    }

    #[test]
    fn zero_width_interval_never_conflicts() {
        assert!(!intervals_overlap(at(10), at(10), at(9), at(12)));
    }

    #[test]
    fn booking_overlap_helper_uses_half_open_rule() {
        let now = Utc::now();
        let booking = Booking {
            id: uuid::Uuid::new_v4(),
            equipment_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            start_time: at(10),
            end_time: at(11),
            purpose: None,
            status: BookingStatus::Confirmed,
            admin_notes: None,
            approved_by: None,
            approved_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        };
        assert!(booking.overlaps_range(at(10), at(12)));
        assert!(!booking.overlaps_range(at(11), at(12)));
    }

    #[test]
    fn active_statuses() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
        assert!(!BookingStatus::Completed.is_active());
        assert!(!BookingStatus::Rejected.is_active());
    }

    #[test]
    fn pending_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn confirmed_transitions() {
        use BookingStatus::*;
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Rejected));
        assert!(!Confirmed.can_transition_to(Pending));
    }

    #[test]
    fn terminal_statuses_have_no_transitions() {
        use BookingStatus::*;
        for terminal in [Cancelled, Completed, Rejected] {
            for next in [Pending, Confirmed, Cancelled, Completed, Rejected] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }
}
