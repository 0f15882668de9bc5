use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;
use crate::model::{LoginRequest, RegisterRequest};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub const MIN_PASSWORD_LEN: usize = 6;

fn invalid() -> AppError {
    AppError::validation("Invalid fields")
}

/// Trims the request and checks name, email shape and password length.
///
/// # Errors
///
/// Will return `Err(AppError::Validation)` if any field is unusable.
pub fn check_register(req: RegisterRequest) -> Result<RegisterRequest, AppError> {
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_ascii_lowercase();
    if name.is_empty() || !EMAIL.is_match(&email) || req.password.chars().count() < MIN_PASSWORD_LEN
    {
        return Err(invalid());
    }
    Ok(RegisterRequest {
        name,
        email,
        password: req.password,
    })
}

/// # Errors
///
/// Will return `Err(AppError::Validation)` for an empty email or password.
pub fn check_login(req: LoginRequest) -> Result<LoginRequest, AppError> {
    let email = req.email.trim().to_ascii_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(invalid());
    }
    Ok(LoginRequest {
        email,
        password: req.password,
    })
}
