//! User approval workflow and account administration

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{ApprovalStatus, Role, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// List users awaiting approval
    pub async fn list_pending(&self) -> AppResult<Vec<User>> {
        self.repository.users.list_pending().await
    }

    /// Approve a pending registration
    pub async fn approve(&self, user_id: Uuid, admin_id: Uuid) -> AppResult<User> {
        let status = self.repository.users.approval_status_of(user_id).await?;
        if status == ApprovalStatus::Approved {
            return Err(AppError::InvalidState("User is already approved".to_string()));
        }
        self.repository.users.approve(user_id, admin_id).await
    }

    /// Reject a registration
    pub async fn reject(&self, user_id: Uuid) -> AppResult<User> {
        let status = self.repository.users.approval_status_of(user_id).await?;
        if status == ApprovalStatus::Rejected {
            return Err(AppError::InvalidState("User is already rejected".to_string()));
        }
        self.repository.users.reject(user_id).await
    }

    /// Promote an approved user to administrator
    pub async fn promote(&self, user_id: Uuid) -> AppResult<User> {
        let user = self.repository.users.get_by_id(user_id).await?;
        if user.approval_status != ApprovalStatus::Approved {
            return Err(AppError::InvalidState(
                "User must be approved before being promoted to admin".to_string(),
            ));
        }
        if user.role == Role::Admin {
            return Err(AppError::InvalidState("User is already an admin".to_string()));
        }
        self.repository.users.set_role(user_id, Role::Admin).await
    }

    /// Demote an administrator back to a regular user
    pub async fn demote(&self, user_id: Uuid, acting_admin: Uuid) -> AppResult<User> {
        if user_id == acting_admin {
            return Err(AppError::BadRequest("You cannot demote yourself".to_string()));
        }
        let user = self.repository.users.get_by_id(user_id).await?;
        if user.role == Role::User {
            return Err(AppError::InvalidState(
                "User is already a regular user".to_string(),
            ));
        }
        self.repository.users.set_role(user_id, Role::User).await
    }

    /// Deactivate an account
    pub async fn deactivate(&self, user_id: Uuid, acting_admin: Uuid) -> AppResult<User> {
        if user_id == acting_admin {
            return Err(AppError::BadRequest(
                "You cannot deactivate yourself".to_string(),
            ));
        }
        self.repository.users.set_active(user_id, false).await
    }

    /// Reactivate an account
    pub async fn activate(&self, user_id: Uuid) -> AppResult<User> {
        self.repository.users.set_active(user_id, true).await
    }
}
