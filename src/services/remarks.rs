//! Equipment remarks (issue log) service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::remark::{CreateRemark, Remark, RemarkDetails, RemarkQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct RemarksService {
    repository: Repository,
}

impl RemarksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &RemarkQuery) -> AppResult<Vec<RemarkDetails>> {
        self.repository.remarks.list(query).await
    }

    /// Report an issue against a piece of equipment
    pub async fn create(&self, data: &CreateRemark, reported_by: Uuid) -> AppResult<Remark> {
        self.repository.equipment.get_by_id(data.equipment_id).await?;
        self.repository.remarks.create(data, reported_by).await
    }

    /// Mark a remark as resolved, stamping the acting admin
    pub async fn resolve(&self, id: Uuid, resolved_by: Uuid) -> AppResult<Remark> {
        self.repository.remarks.resolve(id, resolved_by).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.remarks.delete(id).await
    }
}
