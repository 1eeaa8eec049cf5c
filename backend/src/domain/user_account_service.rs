//! Account use-cases: sign-up, profile page and profile edits.

use std::sync::Arc;

use tracing::info;

use super::access::{Intent, authorize};
use super::ports::{PasswordHasher, TaskRepository, UserRepository, hash_password};
use super::validation::{ValidationEngine, ValidationMode};
use super::{Error, ProfileChanges, Task, User, UserDraft, UserId};

/// A user's own page: the account and the tasks they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user: User,
    pub tasks: Vec<Task>,
}

#[derive(Clone)]
pub struct UserAccountService {
    users: Arc<dyn UserRepository>,
    tasks: Arc<dyn TaskRepository>,
    hasher: Arc<dyn PasswordHasher>,
    validation: ValidationEngine,
}

impl UserAccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
        hasher: Arc<dyn PasswordHasher>,
        validation: ValidationEngine,
    ) -> Self {
        Self {
            users,
            tasks,
            hasher,
            validation,
        }
    }

    /// Register a new account. Open to anyone.
    pub async fn sign_up(&self, draft: UserDraft) -> Result<User, Error> {
        let validated = self
            .validation
            .validate_user(&draft, ValidationMode::Create)
            .await?;
        let password = validated
            .password
            .ok_or_else(|| Error::internal("validated sign-up is missing its password"))?;
        let digest = hash_password(&self.hasher, password).await?;

        let user = User::new(UserId::random(), validated.email, digest);
        self.users.insert(&user).await?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    /// The owner's profile page.
    pub async fn profile(&self, actor: Option<&UserId>, user_id: &UserId) -> Result<Profile, Error> {
        authorize(actor, Intent::ViewProfile { user: user_id })?;
        let user = self.load(user_id).await?;
        let tasks = self.tasks.list_by_owner(user_id).await?;
        Ok(Profile { user, tasks })
    }

    /// Gate for the profile edit form; returns the account to prefill it.
    pub async fn edit_profile(&self, actor: Option<&UserId>, user_id: &UserId) -> Result<User, Error> {
        authorize(actor, Intent::EditProfile { user: user_id })?;
        self.load(user_id).await
    }

    /// Apply profile edits. Blank password fields keep the stored password.
    pub async fn update_profile(
        &self,
        actor: Option<&UserId>,
        user_id: &UserId,
        changes: ProfileChanges,
    ) -> Result<User, Error> {
        authorize(actor, Intent::EditProfile { user: user_id })?;
        let current = self.load(user_id).await?;

        let draft = changes.apply_to(&current);
        let validated = self
            .validation
            .validate_user(&draft, ValidationMode::Update(*user_id))
            .await?;

        let mut updated = current.with_email(validated.email);
        if let Some(password) = validated.password {
            let digest = hash_password(&self.hasher, password).await?;
            updated = updated.with_password_hash(digest);
        }
        self.users.update(&updated).await?;
        info!(user_id = %user_id, "user updated");
        Ok(updated)
    }

    async fn load(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
