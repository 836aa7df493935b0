//! Business logic services

pub mod auth;
pub mod bookings;
pub mod categories;
pub mod equipment;
pub mod maintenance;
pub mod remarks;
pub mod settings;
pub mod stats;
pub mod users;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub equipment: equipment::EquipmentService,
    pub categories: categories::CategoriesService,
    pub bookings: bookings::BookingsService,
    pub maintenance: maintenance::MaintenanceService,
    pub remarks: remarks::RemarksService,
    pub settings: settings::SettingsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            users: users::UsersService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            categories: categories::CategoriesService::new(repository.clone()),
            bookings: bookings::BookingsService::new(Arc::new(repository.bookings.clone())),
            maintenance: maintenance::MaintenanceService::new(repository.clone()),
            remarks: remarks::RemarksService::new(repository.clone()),
            settings: settings::SettingsService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
