use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::User;

mod create_user;
mod delete_user;
mod get_profile;
mod get_user;
mod list_users;
mod update_user;

pub use create_user::create_user;
pub use create_user::CreateUserRequest;
pub use delete_user::delete_user;
pub use get_profile::get_profile;
pub use get_user::get_user;
pub use list_users::list_users;
pub use update_user::update_user;
pub use update_user::UpdateUserRequest;

/// Public view of a user; the password hash is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}
