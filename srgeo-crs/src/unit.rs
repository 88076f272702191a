//! Units of measure used for buffer radii and measurement results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CrsError, Result};

/// Unit of a coordinate axis or of a measured quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// SI meter.
    Meters,
    /// 1000 meters.
    Kilometers,
    /// International foot, 0.3048 meters.
    Feet,
    /// International mile, 1609.344 meters.
    Miles,
    /// Angular degrees. Only ever native to geographic CRSs.
    Degrees,
}

/// Power a linear unit is raised to in a measured quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    /// Lengths and distances.
    #[default]
    Length,
    /// Areas (square units).
    Area,
    /// Volumes (cubic units).
    Volume,
}

impl Dimension {
    fn exponent(self) -> i32 {
        match self {
            Dimension::Length => 1,
            Dimension::Area => 2,
            Dimension::Volume => 3,
        }
    }
}

impl Unit {
    /// Length of one unit in meters, `None` for angular units.
    pub fn meters_per_unit(self) -> Option<f64> {
        match self {
            Unit::Meters => Some(1.0),
            Unit::Kilometers => Some(1000.0),
            Unit::Feet => Some(0.3048),
            Unit::Miles => Some(1609.344),
            Unit::Degrees => None,
        }
    }

    /// Whether the unit measures distance along the ground rather than an angle.
    pub fn is_linear(self) -> bool {
        self.meters_per_unit().is_some()
    }

    /// Converts a linear distance `n` expressed in this unit to meters.
    pub fn to_meters(self, n: f64) -> Result<f64> {
        self.convert(n, Unit::Meters, Dimension::Length)
    }

    /// Converts quantity `n` of the given dimension from this unit to `to`.
    ///
    /// ```
    /// use srgeo_crs::{Dimension, Unit};
    ///
    /// let sq_m = Unit::Kilometers.convert(1.5, Unit::Meters, Dimension::Area).unwrap();
    /// assert_eq!(sq_m, 1_500_000.0);
    /// ```
    pub fn convert(self, n: f64, to: Unit, dimension: Dimension) -> Result<f64> {
        if self == to {
            return Ok(n);
        }

        let from_factor = self.linear_factor()?;
        let to_factor = to.linear_factor()?;

        Ok(n * (from_factor / to_factor).powi(dimension.exponent()))
    }

    fn linear_factor(self) -> Result<f64> {
        self.meters_per_unit()
            .ok_or_else(|| CrsError::UnsupportedUnit(self.to_string()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Meters => "meters",
            Unit::Kilometers => "kilometers",
            Unit::Feet => "feet",
            Unit::Miles => "miles",
            Unit::Degrees => "degrees",
        };
        f.write_str(name)
    }
}

impl FromStr for Unit {
    type Err = CrsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meters" | "meter" | "metres" | "metre" | "m" => Ok(Unit::Meters),
            "kilometers" | "kilometer" | "kilometres" | "kilometre" | "km" => Ok(Unit::Kilometers),
            "feet" | "foot" | "ft" => Ok(Unit::Feet),
            "miles" | "mile" | "mi" => Ok(Unit::Miles),
            "degrees" | "degree" | "deg" => Ok(Unit::Degrees),
            _ => Err(CrsError::UnsupportedUnit(s.to_string())),
        }
    }
}
