//! Dashboard statistics service

use crate::{
    error::AppResult,
    models::equipment::EquipmentStatus,
    repository::Repository,
};

/// Aggregated counts for the dashboard
#[derive(Debug, Clone, Default)]
pub struct DashboardCounts {
    pub equipment_total: i64,
    pub equipment_active: i64,
    pub equipment_under_maintenance: i64,
    pub equipment_decommissioned: i64,
    pub equipment_reserved: i64,
    pub bookings_pending_approval: i64,
    pub bookings_upcoming_confirmed: i64,
    pub remarks_unresolved: i64,
    pub users_pending_approval: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Gather all dashboard counts
    pub async fn dashboard(&self) -> AppResult<DashboardCounts> {
        let mut counts = DashboardCounts::default();

        for (status, count) in self.repository.equipment.count_by_status().await? {
            counts.equipment_total += count;
            match status {
                EquipmentStatus::Active => counts.equipment_active = count,
                EquipmentStatus::UnderMaintenance => counts.equipment_under_maintenance = count,
                EquipmentStatus::Decommissioned => counts.equipment_decommissioned = count,
                EquipmentStatus::Reserved => counts.equipment_reserved = count,
            }
        }

        counts.bookings_pending_approval = self.repository.bookings.count_pending().await?;
        counts.bookings_upcoming_confirmed =
            self.repository.bookings.count_upcoming_confirmed().await?;
        counts.remarks_unresolved = self.repository.remarks.count_unresolved().await?;
        counts.users_pending_approval = self.repository.users.count_pending().await?;

        Ok(counts)
    }
}
