//! Account service: registration, login, profile, and cascading delete.

use std::sync::Arc;

use tracing::info;

use estately_auth::jwt::encoder::{IssuedToken, TokenEncoder};
use estately_auth::password::PasswordHasher;
use estately_core::error::AppError;
use estately_core::result::AppResult;
use estately_core::traits::ImageStore;
use estately_database::repositories::{ListingStore, UserStore};
use estately_entity::user::model::CreateUser;
use estately_entity::user::{User, UserRole};
use estately_storage::resource_id_from_url;

use crate::context::RequestContext;

/// Validated input for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub phone_number: Option<String>,
}

/// Handles account lifecycle operations.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Listing store, for the account-delete cascade.
    listings: Arc<dyn ListingStore>,
    /// Image store, for the account-delete cascade.
    store: Arc<dyn ImageStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session token signer.
    encoder: Arc<TokenEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        listings: Arc<dyn ListingStore>,
        store: Arc<dyn ImageStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<TokenEncoder>,
    ) -> Self {
        Self {
            users,
            listings,
            store,
            hasher,
            encoder,
        }
    }

    /// Register a new account and open a session for it.
    ///
    /// Emails are stored lowercase; a duplicate surfaces as a conflict.
    pub async fn register(&self, account: NewAccount) -> AppResult<(User, IssuedToken)> {
        let password_hash = self.hasher.hash_password(&account.password)?;

        let user = self
            .users
            .create(&CreateUser {
                name: account.name.trim().to_string(),
                email: account.email.trim().to_lowercase(),
                password_hash,
                role: account.role,
                phone_number: account.phone_number,
            })
            .await?;

        let token = self.encoder.issue(user.id, user.role)?;

        info!(user_id = %user.id, role = %user.role, "Account registered");
        Ok((user, token))
    }

    /// Authenticate by email and password and open a session.
    ///
    /// An unknown email and a wrong password produce the same error, so
    /// the response never reveals whether an account exists.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, IssuedToken)> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::unauthenticated("Invalid credentials"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthenticated("Invalid credentials"));
        }

        let token = self.encoder.issue(user.id, user.role)?;

        info!(user_id = %user.id, "Login succeeded");
        Ok((user, token))
    }

    /// Fetch the caller's own profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Delete the caller's account with everything it owns.
    ///
    /// Order matters: stored images go first, then the listings, then the
    /// user row. A storage fault aborts the cascade with nothing deleted
    /// from the database.
    pub async fn delete_account(&self, ctx: &RequestContext) -> AppResult<()> {
        let listings = self.listings.find_by_seller(ctx.user_id).await?;

        let resource_ids: Vec<String> = listings
            .iter()
            .flat_map(|l| l.images.iter())
            .filter_map(|url| resource_id_from_url(url))
            .collect();
        self.store.delete_many(&resource_ids).await?;

        let removed = self.listings.delete_by_seller(ctx.user_id).await?;

        if !self.users.delete(ctx.user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(
            user_id = %ctx.user_id,
            listings = removed,
            images = resource_ids.len(),
            "Account deleted"
        );
        Ok(())
    }
}
