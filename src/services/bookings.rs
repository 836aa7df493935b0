//! Booking management service
//!
//! Holds the booking rules: precondition ordering on creation, the
//! approval state machine and owner/admin authorization. The actual
//! overlap check runs in the injected [`BookingStore`] so two concurrent
//! requests are serialized per equipment.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{
            Booking, BookingDetails, BookingQuery, BookingStatus, BookingStatusChange,
            CancelBooking, CreateBooking, NewBooking, UpdateBooking, UpdateBookingStatus,
        },
        equipment::EquipmentStatus,
        user::UserClaims,
    },
    repository::bookings::BookingStore,
};

#[derive(Clone)]
pub struct BookingsService {
    store: Arc<dyn BookingStore>,
}

impl BookingsService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// List bookings; non-admin callers only see their own
    pub async fn list(
        &self,
        claims: &UserClaims,
        mut query: BookingQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        if !claims.is_admin() {
            query.user_id = Some(claims.user_id);
        }
        self.store.list_bookings(&query).await
    }

    /// Get a booking with equipment and requester details
    pub async fn get(&self, id: Uuid) -> AppResult<BookingDetails> {
        self.store
            .booking_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// Create a booking for the calling user.
    ///
    /// Preconditions, first failure wins: equipment exists, is bookable,
    /// is active, the interval is non-empty, and the slot is free. The
    /// returned flag tells the caller whether admin approval is pending.
    pub async fn create(
        &self,
        claims: &UserClaims,
        request: CreateBooking,
    ) -> AppResult<(Booking, bool)> {
        let flags = self
            .store
            .equipment_flags(request.equipment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipment not found".to_string()))?;

        if !flags.is_bookable {
            return Err(AppError::NotBookable("Equipment is not bookable".to_string()));
        }
        if flags.status != EquipmentStatus::Active {
            return Err(AppError::Unavailable("Equipment is not available".to_string()));
        }
        if request.start_time >= request.end_time {
            return Err(AppError::Validation(
                "End time must be after start time".to_string(),
            ));
        }

        let status = if flags.requires_approval {
            BookingStatus::Pending
        } else {
            BookingStatus::Confirmed
        };

        let booking = self
            .store
            .insert_checked(&NewBooking {
                equipment_id: request.equipment_id,
                user_id: claims.user_id,
                start_time: request.start_time,
                end_time: request.end_time,
                purpose: request.purpose,
                status,
            })
            .await?;

        Ok((booking, flags.requires_approval))
    }

    /// Reschedule a confirmed future booking (owner or admin)
    pub async fn update(
        &self,
        claims: &UserClaims,
        id: Uuid,
        request: UpdateBooking,
    ) -> AppResult<Booking> {
        let booking = self
            .store
            .find_booking(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        if booking.user_id != claims.user_id && !claims.is_admin() {
            return Err(AppError::Authorization(
                "Not authorized to update this booking".to_string(),
            ));
        }
        if booking.status != BookingStatus::Confirmed {
            return Err(AppError::InvalidState(
                "Only confirmed bookings can be updated".to_string(),
            ));
        }
        if booking.start_time < Utc::now() {
            return Err(AppError::InvalidState(
                "Cannot update past bookings".to_string(),
            ));
        }

        let start = request.start_time.unwrap_or(booking.start_time);
        let end = request.end_time.unwrap_or(booking.end_time);
        if start >= end {
            return Err(AppError::Validation(
                "End time must be after start time".to_string(),
            ));
        }

        let purpose = request.purpose.or(booking.purpose);
        self.store.reschedule_checked(id, start, end, purpose).await
    }

    /// Admin status transition (confirm, reject, complete, cancel)
    pub async fn update_status(
        &self,
        claims: &UserClaims,
        id: Uuid,
        request: UpdateBookingStatus,
    ) -> AppResult<Booking> {
        claims.require_admin()?;

        let booking = self
            .store
            .find_booking(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        if !booking.status.can_transition_to(request.status) {
            return Err(AppError::InvalidState(format!(
                "Cannot move booking from {} to {}",
                booking.status, request.status
            )));
        }

        let stamps_approval = matches!(
            request.status,
            BookingStatus::Confirmed | BookingStatus::Rejected
        );
        let change = BookingStatusChange {
            status: request.status,
            admin_notes: request.admin_notes,
            approved_by: stamps_approval.then_some(claims.user_id),
            stamp_cancelled: request.status == BookingStatus::Cancelled,
            cancellation_reason: None,
        };

        self.store.apply_status(id, &change).await
    }

    /// Soft-cancel a booking (owner or admin)
    pub async fn cancel(
        &self,
        claims: &UserClaims,
        id: Uuid,
        request: CancelBooking,
    ) -> AppResult<Booking> {
        let booking = self
            .store
            .find_booking(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        if booking.user_id != claims.user_id && !claims.is_admin() {
            return Err(AppError::Authorization(
                "Not authorized to cancel this booking".to_string(),
            ));
        }
        if !booking.status.can_transition_to(BookingStatus::Cancelled) {
            return Err(AppError::InvalidState(
                "Booking cannot be cancelled".to_string(),
            ));
        }

        let change = BookingStatusChange {
            status: BookingStatus::Cancelled,
            admin_notes: None,
            approved_by: None,
            stamp_cancelled: true,
            cancellation_reason: request.reason,
        };

        self.store.apply_status(id, &change).await
    }

    /// Hard-delete a future booking (owner or admin)
    pub async fn delete(&self, claims: &UserClaims, id: Uuid) -> AppResult<()> {
        let booking = self
            .store
            .find_booking(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        if booking.user_id != claims.user_id && !claims.is_admin() {
            return Err(AppError::Authorization(
                "Not authorized to delete this booking".to_string(),
            ));
        }
        if booking.start_time < Utc::now() {
            return Err(AppError::InvalidState(
                "Cannot delete past bookings".to_string(),
            ));
        }

        self.store.delete_booking(id).await
    }

    /// Confirmed bookings for the equipment intersecting the given range
    pub async fn availability(
        &self,
        equipment_id: Uuid,
        start: chrono::DateTime<Utc>,
        end: chrono::DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        self.store
            .equipment_flags(equipment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipment not found".to_string()))?;

        if start >= end {
            return Err(AppError::Validation(
                "end_date must be after start_date".to_string(),
            ));
        }

        self.store.confirmed_in_range(equipment_id, start, end).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{equipment::BookingFlags, user::Role},
        repository::bookings::MockBookingStore,
    };
    use chrono::{DateTime, Duration, TimeZone};
    use mockall::predicate::eq;

    fn claims(role: Role) -> UserClaims {
        UserClaims {
            sub: "user@lab.test".to_string(),
            user_id: Uuid::new_v4(),
            role,
            exp: 0,
            iat: 0,
        }
    }

    fn flags(is_bookable: bool, status: EquipmentStatus, requires_approval: bool) -> BookingFlags {
        BookingFlags {
            is_bookable,
            status,
            requires_approval,
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, 10, hour, 0, 0).unwrap()
    }

    fn booking_row(user_id: Uuid, status: BookingStatus) -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            equipment_id: Uuid::new_v4(),
            user_id,
            start_time: at(10),
            end_time: at(11),
            purpose: None,
            status,
            admin_notes: None,
            approved_by: None,
            approved_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request(equipment_id: Uuid) -> CreateBooking {
        CreateBooking {
            equipment_id,
            start_time: at(10),
            end_time: at(11),
            purpose: Some("calibration run".to_string()),
        }
    }

    #[tokio::test]
    async fn create_confirms_immediately_without_approval() {
        let user = claims(Role::User);
        let equipment_id = Uuid::new_v4();
        let mut store = MockBookingStore::new();
        store
            .expect_equipment_flags()
            .with(eq(equipment_id))
            .returning(|_| Ok(Some(flags(true, EquipmentStatus::Active, false))));
        store
            .expect_insert_checked()
            .withf(|b| b.status == BookingStatus::Confirmed)
            .returning(|b| {
                let mut row = booking_row(b.user_id, b.status);
                row.equipment_id = b.equipment_id;
                Ok(row)
            });

        let service = BookingsService::new(Arc::new(store));
        let (booking, requires_approval) =
            service.create(&user, create_request(equipment_id)).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert!(!requires_approval);
    }

    #[tokio::test]
    async fn create_goes_pending_when_approval_required() {
        let user = claims(Role::User);
        let equipment_id = Uuid::new_v4();
        let mut store = MockBookingStore::new();
        store
            .expect_equipment_flags()
            .returning(|_| Ok(Some(flags(true, EquipmentStatus::Active, true))));
        store
            .expect_insert_checked()
            .withf(|b| b.status == BookingStatus::Pending)
            .returning(|b| Ok(booking_row(b.user_id, b.status)));

        let service = BookingsService::new(Arc::new(store));
        let (booking, requires_approval) =
            service.create(&user, create_request(equipment_id)).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(requires_approval);
    }

    #[tokio::test]
    async fn create_rejects_unknown_equipment() {
        let user = claims(Role::User);
        let mut store = MockBookingStore::new();
        store.expect_equipment_flags().returning(|_| Ok(None));

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .create(&user, create_request(Uuid::new_v4()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_rejects_non_bookable_equipment() {
        let user = claims(Role::User);
        let mut store = MockBookingStore::new();
        store
            .expect_equipment_flags()
            .returning(|_| Ok(Some(flags(false, EquipmentStatus::Active, false))));

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .create(&user, create_request(Uuid::new_v4()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotBookable(_)));
    }

    #[tokio::test]
    async fn create_rejects_inactive_equipment() {
        let user = claims(Role::User);
        let mut store = MockBookingStore::new();
        store
            .expect_equipment_flags()
            .returning(|_| Ok(Some(flags(true, EquipmentStatus::UnderMaintenance, false))));

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .create(&user, create_request(Uuid::new_v4()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unavailable(_)));
    }

    #[tokio::test]
    async fn create_rejects_empty_interval() {
        let user = claims(Role::User);
        let mut store = MockBookingStore::new();
        store
            .expect_equipment_flags()
            .returning(|_| Ok(Some(flags(true, EquipmentStatus::Active, false))));

        let service = BookingsService::new(Arc::new(store));
        let mut request = create_request(Uuid::new_v4());
        request.end_time = request.start_time;
        let err = service.create(&user, request).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_propagates_slot_conflict() {
        let user = claims(Role::User);
        let mut store = MockBookingStore::new();
        store
            .expect_equipment_flags()
            .returning(|_| Ok(Some(flags(true, EquipmentStatus::Active, false))));
        store
            .expect_insert_checked()
            .returning(|_| Err(AppError::Conflict("Time slot conflicts with existing booking".to_string())));

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .create(&user, create_request(Uuid::new_v4()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn confirm_stamps_acting_admin() {
        let admin = claims(Role::Admin);
        let admin_id = admin.user_id;
        let target = booking_row(Uuid::new_v4(), BookingStatus::Pending);
        let target_id = target.id;

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .with(eq(target_id))
            .returning(move |_| Ok(Some(target.clone())));
        store
            .expect_apply_status()
            .withf(move |_, change| {
                change.status == BookingStatus::Confirmed && change.approved_by == Some(admin_id)
            })
            .returning(|_, change| Ok(booking_row(Uuid::new_v4(), change.status)));

        let service = BookingsService::new(Arc::new(store));
        let updated = service
            .update_status(
                &admin,
                target_id,
                UpdateBookingStatus {
                    status: BookingStatus::Confirmed,
                    admin_notes: Some("approved for run".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn non_admin_cannot_confirm() {
        let user = claims(Role::User);
        let store = MockBookingStore::new();

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .update_status(
                &user,
                Uuid::new_v4(),
                UpdateBookingStatus {
                    status: BookingStatus::Confirmed,
                    admin_notes: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[tokio::test]
    async fn completed_booking_cannot_be_cancelled_by_admin() {
        let admin = claims(Role::Admin);
        let target = booking_row(Uuid::new_v4(), BookingStatus::Completed);
        let target_id = target.id;

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .returning(move |_| Ok(Some(target.clone())));

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .update_status(
                &admin,
                target_id,
                UpdateBookingStatus {
                    status: BookingStatus::Cancelled,
                    admin_notes: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn owner_can_cancel_pending_booking() {
        let user = claims(Role::User);
        let target = booking_row(user.user_id, BookingStatus::Pending);
        let target_id = target.id;

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .returning(move |_| Ok(Some(target.clone())));
        store
            .expect_apply_status()
            .withf(|_, change| {
                change.status == BookingStatus::Cancelled
                    && change.stamp_cancelled
                    && change.approved_by.is_none()
            })
            .returning(|_, change| Ok(booking_row(Uuid::new_v4(), change.status)));

        let service = BookingsService::new(Arc::new(store));
        let cancelled = service
            .cancel(&user, target_id, CancelBooking { reason: Some("no longer needed".to_string()) })
            .await
            .unwrap();

        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn stranger_cannot_cancel_someone_elses_booking() {
        let stranger = claims(Role::User);
        let target = booking_row(Uuid::new_v4(), BookingStatus::Confirmed);
        let target_id = target.id;

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .returning(move |_| Ok(Some(target.clone())));

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .cancel(&stranger, target_id, CancelBooking::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[tokio::test]
    async fn admin_can_cancel_any_booking() {
        let admin = claims(Role::Admin);
        let target = booking_row(Uuid::new_v4(), BookingStatus::Confirmed);
        let target_id = target.id;

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .returning(move |_| Ok(Some(target.clone())));
        store
            .expect_apply_status()
            .returning(|_, change| Ok(booking_row(Uuid::new_v4(), change.status)));

        let service = BookingsService::new(Arc::new(store));
        let cancelled = service
            .cancel(&admin, target_id, CancelBooking::default())
            .await
            .unwrap();

        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancelling_twice_is_invalid() {
        let user = claims(Role::User);
        let target = booking_row(user.user_id, BookingStatus::Cancelled);
        let target_id = target.id;

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .returning(move |_| Ok(Some(target.clone())));

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .cancel(&user, target_id, CancelBooking::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn update_requires_confirmed_status() {
        let user = claims(Role::User);
        let target = booking_row(user.user_id, BookingStatus::Pending);
        let target_id = target.id;

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .returning(move |_| Ok(Some(target.clone())));

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .update(&user, target_id, UpdateBooking { start_time: None, end_time: None, purpose: None })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn update_rejects_past_bookings() {
        let user = claims(Role::User);
        let mut target = booking_row(user.user_id, BookingStatus::Confirmed);
        target.start_time = Utc::now() - Duration::hours(2);
        target.end_time = Utc::now() - Duration::hours(1);
        let target_id = target.id;

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .returning(move |_| Ok(Some(target.clone())));

        let service = BookingsService::new(Arc::new(store));
        let err = service
            .update(&user, target_id, UpdateBooking { start_time: None, end_time: None, purpose: None })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn update_reschedules_with_merged_interval() {
        let user = claims(Role::User);
        let target = booking_row(user.user_id, BookingStatus::Confirmed);
        let target_id = target.id;
        let new_end = at(13);

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .returning(move |_| Ok(Some(target.clone())));
        store
            .expect_reschedule_checked()
            .withf(move |_, start, end, _| *start == at(10) && *end == new_end)
            .returning(|id, start, end, purpose| {
                let mut row = booking_row(Uuid::new_v4(), BookingStatus::Confirmed);
                row.id = id;
                row.start_time = start;
                row.end_time = end;
                row.purpose = purpose;
                Ok(row)
            });

        let service = BookingsService::new(Arc::new(store));
        let updated = service
            .update(
                &user,
                target_id,
                UpdateBooking { start_time: None, end_time: Some(new_end), purpose: None },
            )
            .await
            .unwrap();

        assert_eq!(updated.end_time, new_end);
    }

    #[tokio::test]
    async fn list_scopes_non_admin_to_own_bookings() {
        let user = claims(Role::User);
        let user_id = user.user_id;

        let mut store = MockBookingStore::new();
        store
            .expect_list_bookings()
            .withf(move |query| query.user_id == Some(user_id))
            .returning(|_| Ok(Vec::new()));

        let service = BookingsService::new(Arc::new(store));
        let bookings = service.list(&user, BookingQuery::default()).await.unwrap();

        assert!(bookings.is_empty());
    }

    #[tokio::test]
    async fn delete_rejects_past_bookings() {
        let user = claims(Role::User);
        let mut target = booking_row(user.user_id, BookingStatus::Confirmed);
        target.start_time = Utc::now() - Duration::hours(2);
        let target_id = target.id;

        let mut store = MockBookingStore::new();
        store
            .expect_find_booking()
            .returning(move |_| Ok(Some(target.clone())));

        let service = BookingsService::new(Arc::new(store));
        let err = service.delete(&user, target_id).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidState(_)));
    }
}
