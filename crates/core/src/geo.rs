//! Coordinate parsing for map-provider location strings.

use crate::error::CoreError;

/// A WGS-84-ish coordinate pair as reported by the POI source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Parse a `"lon,lat"` location field.
///
/// The map provider puts longitude first, so `"116.4,39.9"` is
/// latitude 39.9, longitude 116.4.
pub fn parse_lon_lat(field: &str) -> Result<Coordinates, CoreError> {
    let mut parts = field.split(',');
    let (Some(lon), Some(lat)) = (parts.next(), parts.next()) else {
        return Err(CoreError::Validation(format!(
            "Location '{field}' is not a 'lon,lat' pair"
        )));
    };

    let parse = |raw: &str, axis: &str| -> Result<f64, CoreError> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                CoreError::Validation(format!("Invalid {axis} '{raw}' in location '{field}'"))
            })
    };

    Ok(Coordinates {
        longitude: parse(lon, "longitude")?,
        latitude: parse(lat, "latitude")?,
    })
}
