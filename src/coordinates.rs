//! Parsing of "lat,lon" text into coordinates.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Coordinates;

/// `<signed decimal>,<signed decimal>`. A leading `+` is accepted as well as `-`.
static COORDINATES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?[0-9]+(?:\.[0-9]+)?),([+-]?[0-9]+(?:\.[0-9]+)?)$")
        .unwrap_or_else(|err| panic!("invalid COORDINATES_RE regex: {err}"))
});

/// Parse text of the form `<signed decimal>,<signed decimal>`.
///
/// Surrounding whitespace is trimmed; any whitespace inside is rejected.
/// Latitude and longitude ranges are not checked.
pub fn parse_coordinates(text: &str) -> Option<Coordinates> {
    let captures = COORDINATES_RE.captures(text.trim())?;
    Some(Coordinates {
        latitude: captures[1].parse().ok()?,
        longitude: captures[2].parse().ok()?,
    })
}
