//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest display name accepted through the API.
pub const MAX_PLAYER_NAME_LEN: usize = 64;

/// Validates that a player name is present and reasonably short.
///
/// # Examples
///
/// ```ignore
/// validate_player_name("Chris") // Ok
/// validate_player_name("   ")   // Err - blank
/// ```
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("player_name_blank");
        err.message = Some("Player name must not be empty".into());
        return Err(err);
    }

    let len = name.chars().count();
    if len > MAX_PLAYER_NAME_LEN {
        let mut err = ValidationError::new("player_name_length");
        err.message = Some(
            format!("Player name must be at most {MAX_PLAYER_NAME_LEN} characters (got {len})")
                .into(),
        );
        return Err(err);
    }

    Ok(())
}
