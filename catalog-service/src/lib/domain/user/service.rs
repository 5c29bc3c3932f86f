use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::common::Page;
use crate::domain::record::is_taken;
use crate::domain::record::Changes;
use crate::domain::record::Filter;
use crate::domain::record::Repository;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserQuery;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Uniqueness is checked with `exists` before writing; the store's unique
/// indexes catch the remaining check-then-insert race and surface it as the
/// same duplicate error.
pub struct UserService<UR>
where
    UR: Repository<User>,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: Repository<User>,
{
    /// Create a new user service over a user repository.
    ///
    /// Passwords are hashed and verified through the shared `authenticator`.
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn ensure_unique(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        exclude: Option<&str>,
    ) -> Result<(), UserError> {
        if let Some(username) = username {
            if is_taken::<User, _>(self.repository.as_ref(), "username", username, exclude).await?
            {
                return Err(UserError::UsernameAlreadyExists(username.to_string()));
            }
        }

        if let Some(email) = email {
            if is_taken::<User, _>(self.repository.as_ref(), "email", email, exclude).await? {
                return Err(UserError::EmailAlreadyExists(email.to_string()));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: Repository<User>,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.ensure_unique(
            Some(command.username.as_str()),
            Some(command.email.as_str()),
            None,
        )
        .await?;

        let hashed_password = self.authenticator.hash_password(command.password.expose())?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                hashed_password,
                is_active: true,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");

        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<User, UserError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, UserError> {
        self.repository
            .find_one(Filter::eq("username", username))
            .await?
            .ok_or_else(|| UserError::NotFoundByUsername(username.to_string()))
    }

    async fn list_users(&self, page: Page, query: UserQuery) -> Result<Vec<User>, UserError> {
        let filter = if query.active_only {
            Filter::eq("is_active", true)
        } else {
            Filter::All
        };

        Ok(self
            .repository
            .list(page.skip(), page.limit(), filter)
            .await?)
    }

    async fn update_user(
        &self,
        id: &str,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let user = self.get_user(id).await?;

        self.ensure_unique(
            command.username.as_ref().map(|u| u.as_str()),
            command.email.as_ref().map(|e| e.as_str()),
            Some(&user.id),
        )
        .await?;

        let hashed_password = command
            .password
            .as_ref()
            .map(|password| self.authenticator.hash_password(password.expose()))
            .transpose()?;

        let changes = Changes::new()
            .set_if_some("username", command.username.map(String::from))
            .set_if_some("email", command.email.map(String::from))
            .set_if_some("hashed_password", hashed_password)
            .set_if_some("is_active", command.is_active);

        let updated = self
            .repository
            .update(&user.id, changes)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        tracing::info!(user_id = %updated.id, "User updated");

        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> Result<(), UserError> {
        let user = self.get_user(id).await?;

        if !self.repository.delete(&user.id).await? {
            return Err(UserError::NotFound(id.to_string()));
        }

        tracing::info!(user_id = %user.id, "User deleted");

        Ok(())
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        let Some(user) = self
            .repository
            .find_one(Filter::eq("username", username))
            .await?
        else {
            // Same Argon2 cost as a wrong password for an existing account.
            self.authenticator.reject_unknown(password);
            return Ok(None);
        };

        if !self.authenticator.verify_password(password, &user.hashed_password) || !user.is_active {
            return Ok(None);
        }

        Ok(Some(user))
    }

    async fn bootstrap_user(
        &self,
        command: CreateUserCommand,
    ) -> Result<Option<User>, UserError> {
        if self.repository.count(Filter::All).await? > 0 {
            return Ok(None);
        }

        self.create_user(command).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use mockall::mock;

    use super::*;
    use crate::domain::record::StoreError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::Username;
    use crate::outbound::repositories::MemoryRepository;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl Repository<User> for TestUserRepository {
            async fn create(&self, draft: NewUser) -> Result<User, StoreError>;
            async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
            async fn find_one(&self, filter: Filter) -> Result<Option<User>, StoreError>;
            async fn list(&self, skip: u64, limit: u64, filter: Filter) -> Result<Vec<User>, StoreError>;
            async fn update(&self, id: &str, changes: Changes) -> Result<Option<User>, StoreError>;
            async fn delete(&self, id: &str) -> Result<bool, StoreError>;
            async fn count(&self, filter: Filter) -> Result<u64, StoreError>;
            async fn exists(&self, filter: Filter) -> Result<bool, StoreError>;
        }
    }

    fn command(username: &str, email: &str, password: &str) -> CreateUserCommand {
        CreateUserCommand::new(
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            chrono::Duration::minutes(30),
        ))
    }

    fn memory_service() -> UserService<MemoryRepository<User>> {
        UserService::new(Arc::new(MemoryRepository::new()), authenticator())
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let service = memory_service();

        let user = service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        assert_eq!(user.username.as_str(), "alice");
        assert!(user.is_active);
        assert!(user.hashed_password.starts_with("$argon2"));
        assert_ne!(user.hashed_password, "secret123");
        assert!(user.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let service = memory_service();
        service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        let result = service
            .create_user(command("alice", "other@x.com", "secret123"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let service = memory_service();
        service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        let result = service
            .create_user(command("bob", "a@x.com", "secret123"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_create_user_store_conflict_maps_to_duplicate() {
        let mut repository = MockTestUserRepository::new();

        // The pre-check passes, then the unique index rejects the insert.
        repository.expect_exists().times(2).returning(|_| Ok(false));
        repository.expect_create().times(1).returning(|_| {
            Err(StoreError::Duplicate {
                field: "email".to_string(),
            })
        });

        let service = UserService::new(Arc::new(repository), authenticator());
        let result = service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_malformed_and_absent_ids() {
        let service = memory_service();

        let malformed = service.get_user("invalid_id").await;
        let absent = service.get_user("507f1f77bcf86cd799439999").await;

        assert!(matches!(malformed.unwrap_err(), UserError::NotFound(_)));
        assert!(matches!(absent.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_user_store_failure() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_get_by_id()
            .times(1)
            .returning(|_| Err(StoreError::Database("connection refused".to_string())));

        let service = UserService::new(Arc::new(repository), authenticator());
        let result = service.get_user("507f1f77bcf86cd799439011").await;

        assert!(matches!(result.unwrap_err(), UserError::Store(_)));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let service = memory_service();
        service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        let user = service.authenticate("alice", "secret123").await.unwrap();

        assert_eq!(user.unwrap().username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_authenticate_failures_collapse_to_none() {
        let service = memory_service();
        let alice = service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();
        service
            .create_user(command("bob", "b@x.com", "secret123"))
            .await
            .unwrap();
        service
            .update_user(
                &alice.id,
                UpdateUserCommand {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // unknown user, wrong password, inactive account
        assert!(service.authenticate("carol", "secret123").await.unwrap().is_none());
        assert!(service.authenticate("bob", "secret123x").await.unwrap().is_none());
        assert!(service.authenticate("alice", "secret123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user_costs_a_verification() {
        let service = memory_service();
        service
            .create_user(command("bob", "b@x.com", "secret123"))
            .await
            .unwrap();

        let started = Instant::now();
        assert!(service.authenticate("bob", "secret123x").await.unwrap().is_none());
        let wrong_password = started.elapsed();

        let started = Instant::now();
        assert!(service.authenticate("carol", "secret123").await.unwrap().is_none());
        let unknown_user = started.elapsed();

        assert!(
            unknown_user * 4 >= wrong_password,
            "unknown user took {unknown_user:?}, wrong password took {wrong_password:?}"
        );
    }

    #[tokio::test]
    async fn test_update_user_rejects_username_of_other_user() {
        let service = memory_service();
        service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();
        let bob = service
            .create_user(command("bob", "b@x.com", "secret123"))
            .await
            .unwrap();

        let result = service
            .update_user(
                &bob.id,
                UpdateUserCommand {
                    username: Some(Username::new("alice".to_string()).unwrap()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_update_user_keeps_own_username() {
        let service = memory_service();
        let alice = service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        let updated = service
            .update_user(
                &alice.id,
                UpdateUserCommand {
                    username: Some(Username::new("alice".to_string()).unwrap()),
                    email: Some(EmailAddress::new("alice@x.com".to_string()).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username.as_str(), "alice");
        assert_eq!(updated.email.as_str(), "alice@x.com");
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_user_password_is_rehashed() {
        let service = memory_service();
        let alice = service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        service
            .update_user(
                &alice.id,
                UpdateUserCommand {
                    password: Some(Password::new("n3w-secret".to_string()).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(service.authenticate("alice", "secret123").await.unwrap().is_none());
        assert!(service.authenticate("alice", "n3w-secret").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let service = memory_service();

        let result = service
            .update_user("507f1f77bcf86cd799439999", UpdateUserCommand::default())
            .await;

        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = memory_service();
        let alice = service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();

        service.delete_user(&alice.id).await.unwrap();

        assert!(matches!(
            service.get_user(&alice.id).await.unwrap_err(),
            UserError::NotFound(_)
        ));
        assert!(matches!(
            service.delete_user(&alice.id).await.unwrap_err(),
            UserError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_users_active_only() {
        let service = memory_service();
        let alice = service
            .create_user(command("alice", "a@x.com", "secret123"))
            .await
            .unwrap();
        service
            .create_user(command("bob", "b@x.com", "secret123"))
            .await
            .unwrap();
        service
            .update_user(
                &alice.id,
                UpdateUserCommand {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let all = service
            .list_users(Page::default(), UserQuery::default())
            .await
            .unwrap();
        let active = service
            .list_users(Page::default(), UserQuery { active_only: true })
            .await
            .unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].username.as_str(), "bob");
    }

    #[tokio::test]
    async fn test_bootstrap_user_only_when_empty() {
        let service = memory_service();

        let first = service
            .bootstrap_user(command("admin", "admin@x.com", "admin123"))
            .await
            .unwrap();
        let second = service
            .bootstrap_user(command("admin2", "admin2@x.com", "admin123"))
            .await
            .unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
    }
}
