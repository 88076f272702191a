use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a coordinate reference system, e.g. an EPSG code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Srid(u32);

/// Side of the equator a UTM zone belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Hemisphere {
    /// Latitudes `>= 0`.
    North,
    /// Latitudes `< 0`.
    South,
}

const UTM_NORTH_BASE: u32 = 32600;
const UTM_SOUTH_BASE: u32 = 32700;

impl Srid {
    /// WGS84 latitude/longitude in degrees.
    pub const WGS84: Srid = Srid(4326);

    /// Web Mercator on the WGS84 ellipsoid, in meters.
    pub const WEB_MERCATOR: Srid = Srid(3857);

    /// Creates an identifier from a numeric code.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Numeric code of the identifier.
    pub const fn code(&self) -> u32 {
        self.0
    }

    /// WGS84 / UTM code for the given zone (1..=60) and hemisphere, e.g. `32615` for zone 15 north.
    ///
    /// Returns `None` if `zone` is out of range.
    pub fn utm(zone: u8, hemisphere: Hemisphere) -> Option<Self> {
        if !(1..=60).contains(&zone) {
            return None;
        }

        let base = match hemisphere {
            Hemisphere::North => UTM_NORTH_BASE,
            Hemisphere::South => UTM_SOUTH_BASE,
        };

        Some(Self(base + zone as u32))
    }

    /// Zone and hemisphere if this is one of the WGS84 / UTM codes.
    pub fn utm_zone(&self) -> Option<(u8, Hemisphere)> {
        match self.0 {
            c if (UTM_NORTH_BASE + 1..=UTM_NORTH_BASE + 60).contains(&c) => {
                Some(((c - UTM_NORTH_BASE) as u8, Hemisphere::North))
            }
            c if (UTM_SOUTH_BASE + 1..=UTM_SOUTH_BASE + 60).contains(&c) => {
                Some(((c - UTM_SOUTH_BASE) as u8, Hemisphere::South))
            }
            _ => None,
        }
    }
}

impl From<u32> for Srid {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Srid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}
