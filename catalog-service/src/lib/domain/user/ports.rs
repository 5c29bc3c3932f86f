use async_trait::async_trait;

use crate::domain::common::Page;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserQuery;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with validated credentials.
    ///
    /// The password is hashed before anything is stored; the new user is
    /// active.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Store` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or the id is malformed
    /// * `Store` - Database operation failed
    async fn get_user(&self, id: &str) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `Store` - Database operation failed
    async fn get_user_by_username(&self, username: &str) -> Result<User, UserError>;

    /// List users in store order.
    async fn list_users(&self, page: Page, query: UserQuery) -> Result<Vec<User>, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username belongs to another user
    /// * `EmailAlreadyExists` - New email belongs to another user
    /// * `Store` - Database operation failed
    async fn update_user(&self, id: &str, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Store` - Database operation failed
    async fn delete_user(&self, id: &str) -> Result<(), UserError>;

    /// Check credentials.
    ///
    /// Unknown username, wrong password and inactive account all yield
    /// `None`; callers must not be able to tell them apart.
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<Option<User>, UserError>;

    /// Create the initial account when no users exist yet.
    ///
    /// Returns `None` when the collection already has users.
    async fn bootstrap_user(&self, command: CreateUserCommand)
        -> Result<Option<User>, UserError>;
}
