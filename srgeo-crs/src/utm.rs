//! Selection of the UTM zone that contains a geographic coordinate.

use crate::error::{CrsError, Result};
use crate::srid::{Hemisphere, Srid};

/// Width of a UTM zone in degrees of longitude.
pub const ZONE_WIDTH: f64 = 6.0;

/// Checks that `lat`/`lon` are finite degrees within `[-90, 90]` and `[-180, 180]`.
pub fn validate_lat_lon(lat: f64, lon: f64) -> Result<()> {
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(CrsError::InvalidCoordinate { lat, lon })
    }
}

/// Zone number (1..=60) and hemisphere of the UTM zone containing the coordinate.
///
/// Longitude 180 wraps around to zone 1 and the equator belongs to the northern hemisphere. Polar
/// latitudes are accepted as is, even though UTM is not meant to be used beyond 84°N / 80°S.
pub fn utm_zone(lat: f64, lon: f64) -> Result<(u8, Hemisphere)> {
    validate_lat_lon(lat, lon)?;

    let zone = ((lon + 180.0) / ZONE_WIDTH).floor() as i64 % 60 + 1;
    let hemisphere = if lat >= 0.0 {
        Hemisphere::North
    } else {
        Hemisphere::South
    };

    Ok((zone as u8, hemisphere))
}

/// Identifier of the WGS84 / UTM CRS whose zone contains the coordinate.
pub fn utm_srid(lat: f64, lon: f64) -> Result<Srid> {
    let (zone, hemisphere) = utm_zone(lat, lon)?;
    Srid::utm(zone, hemisphere).ok_or(CrsError::InvalidCoordinate { lat, lon })
}

/// Longitude of the central meridian of a zone, in degrees.
pub fn central_meridian(zone: u8) -> f64 {
    (zone as f64 - 1.0) * ZONE_WIDTH - 180.0 + ZONE_WIDTH / 2.0
}
