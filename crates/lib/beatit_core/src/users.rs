//! User management: registration, profile reads, updates, soft delete.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::password;
use crate::error::{CoreError, CoreResult};
use crate::models::{User, UserProfile};
use crate::store::UserStore;

const NAME_MIN: usize = 4;
const NAME_MAX: usize = 256;
const PASSWORD_MIN: usize = 8;

pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Create a user with a freshly salted password hash.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> CoreResult<UserProfile> {
        validate_name(name)?;
        validate_email(email)?;
        validate_password(password)?;

        if self.users.get_by_email(email).await?.is_some() {
            return Err(CoreError::Conflict("email already registered".into()));
        }

        let salt = password::generate_salt();
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password::hash_password(password, &salt)?,
            salt: password::encode_salt(&salt),
            active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(&user).await?;
        info!(user_id = %user.id, "user registered");
        Ok(UserProfile::from(&user))
    }

    pub async fn get(&self, id: Uuid) -> CoreResult<UserProfile> {
        match self.users.get_by_id(id).await? {
            Some(user) => Ok(UserProfile::from(&user)),
            None => Err(CoreError::NotFound("user".into())),
        }
    }

    pub async fn list(&self) -> CoreResult<Vec<UserProfile>> {
        let users = self.users.list().await?;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    /// Update profile fields. Only provided fields change; `updated_at` is
    /// bumped either way.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> CoreResult<UserProfile> {
        let Some(mut user) = self.users.get_by_id(id).await? else {
            return Err(CoreError::NotFound("user".into()));
        };

        if let Some(name) = name {
            validate_name(name)?;
            user.name = name.to_string();
        }
        if let Some(email) = email {
            validate_email(email)?;
            if email != user.email && self.users.get_by_email(email).await?.is_some() {
                return Err(CoreError::Conflict("email already registered".into()));
            }
            user.email = email.to_string();
        }
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        Ok(UserProfile::from(&user))
    }

    /// Deactivate a user. The record stays; the request gate rejects
    /// inactive accounts.
    pub async fn soft_delete(&self, id: Uuid) -> CoreResult<()> {
        let Some(mut user) = self.users.get_by_id(id).await? else {
            return Err(CoreError::NotFound("user".into()));
        };
        user.active = false;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        info!(user_id = %id, "user deactivated");
        Ok(())
    }
}

fn validate_name(name: &str) -> CoreResult<()> {
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Name must be between {NAME_MIN} and {NAME_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> CoreResult<()> {
    // Shape check only; deliverability is the mail system's problem.
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(CoreError::Validation("Email is not valid".into()));
    }
    Ok(())
}

fn validate_password(password: &str) -> CoreResult<()> {
    if password.len() < PASSWORD_MIN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {PASSWORD_MIN} characters"
        )));
    }
    Ok(())
}
