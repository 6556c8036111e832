use actix_session::Session;

use crate::errors::AppError;

const TOKEN_KEY: &str = "api_token";
const FLASH_KEY: &str = "flash";

/// Bearer token the staff member signed in with.
pub fn get_token(session: &Session) -> Option<String> {
    session
        .get::<String>(TOKEN_KEY)
        .unwrap_or(None)
        .filter(|t| !t.is_empty())
}

pub fn require_token(session: &Session) -> Result<String, AppError> {
    get_token(session).ok_or_else(|| AppError::Session("No API token in session".to_string()))
}

pub fn set_token(session: &Session, token: &str) -> Result<(), AppError> {
    session
        .insert(TOKEN_KEY, token)
        .map_err(|e| AppError::Session(format!("Failed to store token: {e}")))
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
