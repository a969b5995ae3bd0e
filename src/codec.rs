//! Coordinate string codec.
//!
//! Parses user input in decimal (`48.8566, 2.3522`) or degrees-minutes-seconds
//! (`48°51'23.76"N 2°21'7.92"E`) notation and renders coordinates back to DMS.

use crate::error::{AppError, Result};
use crate::models::Coordinates;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Hundredths of an arc-second, the resolution DMS values are rendered at
const CENTISECONDS_PER_MINUTE: u64 = 60 * 100;
const CENTISECONDS_PER_DEGREE: u64 = 60 * CENTISECONDS_PER_MINUTE;

static DMS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\d+)°(\d+)'(\d+(?:\.\d*)?)"?([NSEW])$"#).expect("DMS pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    N,
    S,
    E,
    W,
}

impl Hemisphere {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Hemisphere::N),
            'S' => Some(Hemisphere::S),
            'E' => Some(Hemisphere::E),
            'W' => Some(Hemisphere::W),
            _ => None,
        }
    }

    /// South and west are negative
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::N | Hemisphere::E => 1.0,
            Hemisphere::S | Hemisphere::W => -1.0,
        }
    }

    pub fn is_latitude(self) -> bool {
        matches!(self, Hemisphere::N | Hemisphere::S)
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Hemisphere::N => 'N',
            Hemisphere::S => 'S',
            Hemisphere::E => 'E',
            Hemisphere::W => 'W',
        };
        write!(f, "{}", c)
    }
}

/// One axis of a coordinate in degrees-minutes-seconds form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl Dms {
    /// Split a signed decimal value into DMS, picking `positive` for values >= 0
    ///
    /// The value is rounded once to hundredths of an arc-second, so a
    /// carry lands in minutes or degrees and seconds never print as `60.00`.
    fn from_decimal(value: f64, positive: Hemisphere, negative: Hemisphere) -> Self {
        let hemisphere = if value >= 0.0 { positive } else { negative };
        let total = (value.abs() * CENTISECONDS_PER_DEGREE as f64).round() as u64;

        let degrees = total / CENTISECONDS_PER_DEGREE;
        let rest = total % CENTISECONDS_PER_DEGREE;
        let minutes = rest / CENTISECONDS_PER_MINUTE;
        let centiseconds = rest % CENTISECONDS_PER_MINUTE;

        Dms {
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds: centiseconds as f64 / 100.0,
            hemisphere,
        }
    }

    pub fn to_decimal(&self) -> f64 {
        let magnitude =
            self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        magnitude * self.hemisphere.sign()
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°{}'{:.2}\"{}",
            self.degrees, self.minutes, self.seconds, self.hemisphere
        )
    }
}

impl std::str::FromStr for Dms {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AppError::InvalidCoordinates(format!("Invalid DMS format: {}", s));

        let caps = DMS_PATTERN.captures(s.trim()).ok_or_else(invalid)?;
        let degrees: u32 = caps[1].parse().map_err(|_| invalid())?;
        let minutes: u32 = caps[2].parse().map_err(|_| invalid())?;
        let seconds: f64 = caps[3].parse().map_err(|_| invalid())?;
        let hemisphere = caps[4]
            .chars()
            .next()
            .and_then(Hemisphere::from_char)
            .ok_or_else(invalid)?;

        if minutes >= 60 || seconds >= 60.0 {
            return Err(AppError::InvalidCoordinates(format!(
                "Minutes and seconds must be below 60: {}",
                s
            )));
        }

        Ok(Dms {
            degrees,
            minutes,
            seconds,
            hemisphere,
        })
    }
}

/// Convert a single DMS token such as `48°51'23.76"N` to signed decimal degrees
pub fn dms_to_decimal(s: &str) -> Result<f64> {
    Ok(s.parse::<Dms>()?.to_decimal())
}

/// Render a decimal coordinate pair as (latitude, longitude) DMS values
pub fn decimal_to_dms(lat: f64, lng: f64) -> (Dms, Dms) {
    (
        Dms::from_decimal(lat, Hemisphere::N, Hemisphere::S),
        Dms::from_decimal(lng, Hemisphere::E, Hemisphere::W),
    )
}

/// Parse a user-supplied start location in decimal or DMS notation
pub fn parse_location_input(input: &str) -> Result<Coordinates> {
    let input = input.trim();

    let (lat, lng) = if input.contains(',') && !input.contains('°') {
        parse_decimal_pair(input)?
    } else if input.contains('°') {
        parse_dms_pair(input)?
    } else {
        return Err(AppError::InvalidCoordinates(format!(
            "Unknown coordinate format: {}",
            input
        )));
    };

    Coordinates::new(lat, lng).map_err(AppError::InvalidCoordinates)
}

fn parse_decimal_pair(input: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(AppError::InvalidCoordinates(format!(
            "Expected 'lat,lng' but got {} values: {}",
            parts.len(),
            input
        )));
    }

    let parse = |part: &str| {
        part.parse::<f64>().map_err(|_| {
            AppError::InvalidCoordinates(format!("Not a decimal number: '{}'", part))
        })
    };

    Ok((parse(parts[0])?, parse(parts[1])?))
}

fn parse_dms_pair(input: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 2 {
        return Err(AppError::InvalidCoordinates(
            "Must provide both latitude and longitude!".to_string(),
        ));
    }

    let lat: Dms = parts[0].parse()?;
    let lng: Dms = parts[1].parse()?;

    if !lat.hemisphere.is_latitude() {
        return Err(AppError::InvalidCoordinates(format!(
            "Latitude must end with N or S: {}",
            parts[0]
        )));
    }
    if lng.hemisphere.is_latitude() {
        return Err(AppError::InvalidCoordinates(format!(
            "Longitude must end with E or W: {}",
            parts[1]
        )));
    }

    Ok((lat.to_decimal(), lng.to_decimal()))
}
