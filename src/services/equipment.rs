//! Equipment registry service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        equipment::{
            CreateEquipment, Equipment, EquipmentDetails, EquipmentQuery, UpdateEquipment,
        },
        maintenance::MaintenanceDetails,
        remark::RemarkDetails,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List equipment with filters
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentDetails>> {
        self.repository.equipment.list(query).await
    }

    /// Get equipment with category and creator names
    pub async fn get(&self, id: Uuid) -> AppResult<EquipmentDetails> {
        self.repository.equipment.get_details(id).await
    }

    /// Create equipment (admin only, enforced at the route)
    pub async fn create(&self, data: &CreateEquipment, created_by: Uuid) -> AppResult<Equipment> {
        self.repository.equipment.create(data, created_by).await
    }

    /// Update equipment
    pub async fn update(&self, id: Uuid, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }

    /// Delete equipment
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }

    /// Maintenance history for one piece of equipment
    pub async fn maintenance_history(&self, id: Uuid) -> AppResult<Vec<MaintenanceDetails>> {
        self.repository.equipment.get_by_id(id).await?;
        self.repository.maintenance.for_equipment(id).await
    }

    /// Remarks reported against one piece of equipment
    pub async fn remarks(&self, id: Uuid) -> AppResult<Vec<RemarkDetails>> {
        self.repository.equipment.get_by_id(id).await?;
        self.repository.remarks.for_equipment(id).await
    }
}
