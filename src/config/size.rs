//! Human size strings for --max-size.

use crate::errors::GitMigError;

const KIB: f64 = 1024.0;

/// Parse "10M", "500k", "1.5G" or a plain byte count into bytes.
///
/// Suffixes are binary multiples and case-insensitive. A fractional value is
/// accepted only together with a suffix and is truncated to whole bytes.
pub fn parse_size(input: &str) -> Result<u64, GitMigError> {
    let invalid = || GitMigError::InvalidSize(input.to_string());
    let s = input.trim().to_ascii_uppercase();

    let (number, multiplier) = match s.chars().last() {
        Some('G') => (&s[..s.len() - 1], KIB * KIB * KIB),
        Some('M') => (&s[..s.len() - 1], KIB * KIB),
        Some('K') => (&s[..s.len() - 1], KIB),
        Some(_) => return s.parse::<u64>().map_err(|_| invalid()),
        None => return Err(invalid()),
    };

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    let bytes = value * multiplier;
    if bytes > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(bytes as u64)
}
