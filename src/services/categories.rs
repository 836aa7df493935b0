//! Equipment categories service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::category::{CreateCategory, EquipmentCategory, UpdateCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentCategory>> {
        self.repository.categories.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<EquipmentCategory> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateCategory) -> AppResult<EquipmentCategory> {
        self.repository.categories.create(data).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<EquipmentCategory> {
        self.repository.categories.update(id, data).await
    }

    /// Delete a category; refused while equipment still references it
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let in_use = self.repository.equipment.count_in_category(id).await?;
        if in_use > 0 {
            return Err(AppError::BusinessRule(
                "Cannot delete category with associated equipment".to_string(),
            ));
        }
        self.repository.categories.delete(id).await
    }
}
