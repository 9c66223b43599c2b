/**
 * User Accounts
 *
 * Registration, login and self-service profile operations. Passwords are
 * bcrypt-hashed at `AppConfig::bcrypt_cost`; the hash never leaves the
 * server.
 */

use bcrypt::{hash, verify};
use chrono::Utc;
use uuid::Uuid;

use crate::backend::auth::sessions::create_token;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::store::EntityStore;
use crate::backend::tree::nodes::resolve_children;
use crate::shared::error::{non_blank, require};
use crate::shared::requests::{AuthResponse, LoginRequest, RegisterRequest, UpdateUserRequest};
use crate::shared::{AppConfig, ResolvedChild, SharedError, User, UserProfile};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

fn validate_email(email: String) -> Result<String, SharedError> {
    if !email.contains('@') {
        return Err(SharedError::validation("email", "Invalid email format"));
    }
    Ok(email)
}

fn validate_password(password: String) -> Result<String, SharedError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(password)
}

fn hash_password(password: &str, config: &AppConfig) -> BackendResult<String> {
    hash(password, config.bcrypt_cost).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("Failed to hash password")
    })
}

/// Create an account with an empty root list
pub async fn register_user(
    store: &dyn EntityStore,
    config: &AppConfig,
    request: RegisterRequest,
) -> BackendResult<User> {
    let name = require("name", request.name)?;
    let email = validate_email(require("email", request.email)?)?;
    let mobile = require("mobile", request.mobile)?;
    // Passwords are taken verbatim, never trimmed
    let password = request
        .password
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| SharedError::validation("password", "password is required"))?;
    let password = validate_password(password)?;

    // Cheap pre-check; the unique constraint still decides under a race
    if store.find_user_by_email(&email).await?.is_some() {
        tracing::warn!("Registration with existing email: {}", email);
        return Err(BackendError::duplicate_email(&email));
    }

    let password_hash = hash_password(&password, config)?;
    let user = User::new(name, email, mobile, request.image, password_hash);
    store.insert_user(&user).await?;

    tracing::info!("User registered: {} ({})", user.email, user.id);
    Ok(user)
}

/// Check credentials and issue a bearer token
///
/// Unknown email and wrong password fail identically.
pub async fn login(
    store: &dyn EntityStore,
    config: &AppConfig,
    request: LoginRequest,
) -> BackendResult<AuthResponse> {
    let Some(user) = store.find_user_by_email(request.email.trim()).await? else {
        tracing::warn!("Login attempt for unknown email: {}", request.email);
        return Err(BackendError::bad_credentials());
    };

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        BackendError::internal("Failed to verify password")
    })?;
    if !valid {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::bad_credentials());
    }

    let token = create_token(user.id, &user.email, config).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Failed to create token")
    })?;

    tracing::info!("User logged in: {}", user.id);
    Ok(AuthResponse { token, user })
}

pub async fn list_users(store: &dyn EntityStore) -> BackendResult<Vec<User>> {
    Ok(store.list_users().await?)
}

async fn load_user(store: &dyn EntityStore, id: Uuid) -> BackendResult<User> {
    store
        .get_user(id)
        .await?
        .ok_or_else(|| BackendError::user_not_found(id))
}

/// A user with their root list resolved to full records
pub async fn get_user_profile(store: &dyn EntityStore, id: Uuid) -> BackendResult<UserProfile> {
    let user = load_user(store, id).await?;
    let roots = resolve_children(store, &user.main_collection).await;
    Ok(UserProfile::from_parts(user, roots))
}

/// The resolved root list alone
pub async fn get_user_roots(store: &dyn EntityStore, id: Uuid) -> BackendResult<Vec<ResolvedChild>> {
    let user = load_user(store, id).await?;
    Ok(resolve_children(store, &user.main_collection).await)
}

fn ensure_self(actor: Uuid, id: Uuid, action: &str) -> BackendResult<()> {
    if actor != id {
        tracing::warn!("User {} may not {} user {}", actor, action, id);
        return Err(BackendError::forbidden(format!("You may only {} your own account", action)));
    }
    Ok(())
}

/// Change account attributes; the root list is never touched
pub async fn update_user(
    store: &dyn EntityStore,
    config: &AppConfig,
    actor: Uuid,
    id: Uuid,
    request: UpdateUserRequest,
) -> BackendResult<User> {
    ensure_self(actor, id, "update")?;
    let mut user = load_user(store, id).await?;

    if let Some(name) = non_blank("name", request.name)? {
        user.name = name;
    }
    if let Some(email) = non_blank("email", request.email)? {
        user.email = validate_email(email)?;
    }
    if let Some(mobile) = non_blank("mobile", request.mobile)? {
        user.mobile = mobile;
    }
    if let Some(image) = request.image {
        user.image = Some(image);
    }
    if let Some(password) = request.password {
        let password = validate_password(password)?;
        user.password_hash = hash_password(&password, config)?;
    }
    user.modified_at = Utc::now();

    let stored = store
        .update_user(&user)
        .await?
        .ok_or_else(|| BackendError::user_not_found(id))?;

    tracing::info!("User updated: {}", id);
    Ok(stored)
}

/// Remove the account document; owned nodes are left in place
pub async fn delete_user(store: &dyn EntityStore, actor: Uuid, id: Uuid) -> BackendResult<()> {
    ensure_self(actor, id, "delete")?;
    if !store.delete_user(id).await? {
        return Err(BackendError::user_not_found(id));
    }
    tracing::info!("User deleted: {}", id);
    Ok(())
}
