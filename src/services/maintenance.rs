//! Maintenance history service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::maintenance::{
        CreateMaintenance, MaintenanceDetails, MaintenanceQuery, MaintenanceRecord,
        UpdateMaintenance,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
}

impl MaintenanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &MaintenanceQuery) -> AppResult<Vec<MaintenanceDetails>> {
        self.repository.maintenance.list(query).await
    }

    /// Record maintenance performed on a piece of equipment
    pub async fn create(
        &self,
        data: &CreateMaintenance,
        performed_by: Uuid,
    ) -> AppResult<MaintenanceRecord> {
        self.repository.equipment.get_by_id(data.equipment_id).await?;
        self.repository.maintenance.create(data, performed_by).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateMaintenance) -> AppResult<MaintenanceRecord> {
        self.repository.maintenance.update(id, data).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.maintenance.delete(id).await
    }
}
