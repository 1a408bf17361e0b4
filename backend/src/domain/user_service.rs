use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    commands::users::UserCommand,
    errors::{DomainError, DomainResult},
    models::user::{NewUser, User},
};
use crate::storage::{Connection, UserStorage};

/// Service for managing bank customers
#[derive(Clone)]
pub struct UserService<C: Connection> {
    user_repository: C::UserRepository,
}

impl<C: Connection> UserService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
        }
    }

    pub async fn create_user(&self, command: UserCommand) -> DomainResult<User> {
        info!("Creating user: {} {}", command.first_name, command.last_name);
        validate_user(&command)?;

        let user = self
            .user_repository
            .create_user(&NewUser {
                first_name: command.first_name.trim().to_string(),
                last_name: command.last_name.trim().to_string(),
                email: command.email.trim().to_string(),
                phone_number: command.phone_number,
                address: command.address,
                date_of_birth: command.date_of_birth,
            })
            .await?;

        info!("Created user with ID: {}", user.id);
        Ok(user)
    }

    pub async fn get_user(&self, user_id: i64) -> DomainResult<User> {
        self.user_repository
            .get_user(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))
    }

    pub async fn update_user(&self, user_id: i64, command: UserCommand) -> DomainResult<User> {
        info!("Updating user with id {}", user_id);
        validate_user(&command)?;

        let Some(mut user) = self.user_repository.get_user(user_id).await? else {
            warn!("User not found with id: {}", user_id);
            return Err(DomainError::UserNotFound(user_id));
        };

        user.first_name = command.first_name.trim().to_string();
        user.last_name = command.last_name.trim().to_string();
        user.email = command.email.trim().to_string();
        user.phone_number = command.phone_number;
        user.address = command.address;
        user.date_of_birth = command.date_of_birth;

        let updated = self.user_repository.save_user(&user).await?;
        info!("Updated user: {}", updated.id);
        Ok(updated)
    }
}

fn validate_user(command: &UserCommand) -> DomainResult<()> {
    if command.first_name.trim().is_empty() || command.last_name.trim().is_empty() {
        return Err(DomainError::Validation("First and last name are required".to_string()));
    }
    let email = command.email.trim();
    let well_formed = email
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'))
        .unwrap_or(false);
    if !well_formed {
        return Err(DomainError::Validation(format!("Invalid email address: '{}'", email)));
    }
    Ok(())
}
