use std::time::Duration;

use crate::error::AppError;

/// Parse a token lifetime such as `15m`, `7d` or `900`.
///
/// Accepted units: `s`, `m`, `h`, `d`, `w`. A bare integer is seconds.
pub fn parse_expiry(raw: &str) -> Result<Duration, AppError> {
    let trimmed = raw.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);

    let amount: u64 = digits.parse().map_err(|_| invalid(raw))?;
    if amount == 0 {
        return Err(AppError::config(format!(
            "Token expiry '{raw}' must be greater than zero"
        )));
    }

    let unit_secs = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        "w" => 7 * 24 * 60 * 60,
        _ => return Err(invalid(raw)),
    };

    amount
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
        .ok_or_else(|| invalid(raw))
}

fn invalid(raw: &str) -> AppError {
    AppError::config(format!(
        "Invalid token expiry '{raw}' (expected e.g. 900, 15m, 1h, 7d)"
    ))
}
