//! Site settings service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::setting::SiteSetting,
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<SiteSetting>> {
        self.repository.settings.list().await
    }

    pub async fn get(&self, key: &str) -> AppResult<SiteSetting> {
        self.repository.settings.get(key).await
    }

    pub async fn update(
        &self,
        key: &str,
        value: Option<&str>,
        updated_by: Uuid,
    ) -> AppResult<SiteSetting> {
        self.repository.settings.update(key, value, updated_by).await
    }
}
