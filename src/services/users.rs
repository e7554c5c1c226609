use crate::{
    db::UsersStore,
    error::{AppError, AppResult},
    models::{Registration, User},
};

/// Creates an account with a bcrypt-hashed password.
///
/// Emails are trimmed and lowercased before storage, so addresses differing only in
/// case collide.
pub async fn register(
    store: &dyn UsersStore,
    registration: &Registration,
    bcrypt_cost: u32,
) -> AppResult<User> {
    let name = registration.name.trim();
    let email = registration.email.trim().to_lowercase();

    if name.is_empty() {
        return Err(AppError::InvalidInput("Name cannot be empty".to_string()));
    }
    if !is_plausible_email(&email) {
        return Err(AppError::InvalidInput("Invalid email address".to_string()));
    }
    if registration.password.chars().count() < Registration::MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {} characters",
            Registration::MIN_PASSWORD_LEN
        )));
    }

    let password = registration.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt_cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let user = store
        .create(name, &email, &password_hash)
        .await?
        .ok_or_else(|| AppError::Conflict("Email is already registered".to_string()))?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
