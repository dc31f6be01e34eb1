//! Login against the report console.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::browser::Page;
use crate::selector::{resolve_first, Locator};

/// Authentication failures, named per stage so callers and logs can tell
/// which part of the login form went missing.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login field not found")]
    LoginFieldNotFound,
    #[error("password field not found")]
    PasswordFieldNotFound,
    #[error("submit control not found")]
    SubmitNotFound,
    #[error(transparent)]
    Browser(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Locator fallback chains for the login form. The exact ids come first;
/// the rest absorb markup drift across console versions.
fn username_candidates() -> Vec<Locator> {
    vec![
        Locator::id("loginInput"),
        Locator::name("username"),
        Locator::css("input[type='text']"),
        Locator::placeholder_contains("user"),
    ]
}

fn password_candidates() -> Vec<Locator> {
    vec![
        Locator::id("passwordInput"),
        Locator::name("password"),
        Locator::css("input[type='password']"),
        Locator::placeholder_contains("pass"),
    ]
}

fn submit_candidates() -> Vec<Locator> {
    vec![
        Locator::id("submitBtn"),
        Locator::css("button[type='submit']"),
        Locator::button_text_contains("Login"),
        Locator::button_text_contains("Sign"),
    ]
}

/// Drive the login form and submit it.
///
/// Waits a fixed settle period after submitting rather than watching for a
/// post-login marker; the console redraws its whole shell on login and has
/// no stable element to anchor on. Retrying a failed login is the caller's
/// business, not ours.
pub async fn authenticate(
    page: &dyn Page,
    login_url: &str,
    credentials: &Credentials,
    element_wait: Duration,
    settle: Duration,
) -> Result<(), AuthError> {
    page.goto(login_url).await?;

    let username_field = resolve_first(page, &username_candidates(), element_wait)
        .await?
        .ok_or(AuthError::LoginFieldNotFound)?;
    username_field.type_text(&credentials.username).await?;

    let password_field = resolve_first(page, &password_candidates(), element_wait)
        .await?
        .ok_or(AuthError::PasswordFieldNotFound)?;
    password_field
        .type_text(credentials.password.expose_secret())
        .await?;

    let submit = resolve_first(page, &submit_candidates(), element_wait)
        .await?
        .ok_or(AuthError::SubmitNotFound)?;
    submit.click().await?;

    tokio::time::sleep(settle).await;
    tracing::info!(url = %login_url, "Login submitted");

    Ok(())
}
