use thiserror::Error;

use crate::models::Coordinates;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("expected 'latitude,longitude', got {0} comma-separated part(s)")]
    PartCount(usize),
    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// Parse a free-text `"<lat>,<lon>"` string.
///
/// Exactly two comma-separated parts are required; each is trimmed and parsed
/// as `f64`. Values are not range-checked.
pub fn parse_location(input: &str) -> Result<Coordinates, LocationError> {
    let parts: Vec<&str> = input.split(',').collect();
    let [lat, lon] = parts.as_slice() else {
        return Err(LocationError::PartCount(parts.len()));
    };
    Ok(Coordinates::new(parse_part(lat)?, parse_part(lon)?))
}

fn parse_part(part: &str) -> Result<f64, LocationError> {
    let part = part.trim();
    part.parse()
        .map_err(|_| LocationError::NotANumber(part.to_string()))
}

/// The only check applied when saving: the location must not be blank.
pub fn is_blank(location: &str) -> bool {
    location.trim().is_empty()
}
