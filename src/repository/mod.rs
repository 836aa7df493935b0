//! Repository layer for database operations

pub mod bookings;
pub mod categories;
pub mod equipment;
pub mod maintenance;
pub mod remarks;
pub mod settings;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub equipment: equipment::EquipmentRepository,
    pub categories: categories::CategoriesRepository,
    pub bookings: bookings::BookingsRepository,
    pub maintenance: maintenance::MaintenanceRepository,
    pub remarks: remarks::RemarksRepository,
    pub settings: settings::SettingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            remarks: remarks::RemarksRepository::new(pool.clone()),
            settings: settings::SettingsRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Map a unique-constraint violation to a Duplicate error with a domain message
pub(crate) fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Duplicate(message.to_string())
        }
        _ => AppError::from(err),
    }
}
