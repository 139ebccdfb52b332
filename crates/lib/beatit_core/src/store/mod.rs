//! User repository interface.
//!
//! The auth core only ever sees this trait; the relational schema behind it
//! belongs to the persistence layer.

mod memory;
mod pg;

pub use memory::MemoryUserStore;
pub use pg::PgUserStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::User;

/// Storage for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), CoreError>;

    /// `None` when no user has this email.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    /// `None` when the id is unknown.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, CoreError>;

    /// Persist all mutable fields of an existing user.
    async fn update(&self, user: &User) -> Result<(), CoreError>;

    async fn list(&self) -> Result<Vec<User>, CoreError>;
}
