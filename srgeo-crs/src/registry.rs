//! Resolution of CRS identifiers and transformation of coordinates between them.
//!
//! Every projected CRS is described by a [`geodesy`] operator pipeline that takes geographic
//! coordinates (in radians) to the CRS coordinates. A transformation between two CRSs therefore
//! goes through geographic coordinates: inverse pipeline of the source, forward pipeline of the
//! target. Both CRSs are expected to share the WGS84 datum.

use std::cell::RefCell;
use std::collections::HashMap;

use geodesy::prelude::*;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{CrsError, Result};
use crate::srid::{Hemisphere, Srid};
use crate::unit::Unit;
use crate::utm::{central_meridian, validate_lat_lon};

/// Maximum angular distance from the central meridian a UTM zone accepts.
pub const UTM_DOMAIN_HALF_WIDTH: f64 = 90.0;

/// Latitude at which Web Mercator becomes a square map.
pub const WEB_MERCATOR_LAT_LIMIT: f64 = 85.051_128_779_806_6;

/// Description of a coordinate reference system.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CrsDefinition {
    pipeline: Option<String>,
    unit: Unit,
    lon_domain: Option<LonDomain>,
    lat_limit: Option<f64>,
}

/// Range of longitudes a projection can be applied to.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct LonDomain {
    /// Central meridian in degrees.
    pub central_meridian: f64,
    /// Maximum distance from the central meridian in degrees.
    pub half_width: f64,
}

impl LonDomain {
    fn contains(&self, lon: f64) -> bool {
        let mut delta = (lon - self.central_meridian) % 360.0;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta < -180.0 {
            delta += 360.0;
        }

        delta.abs() < self.half_width
    }
}

impl CrsDefinition {
    /// Geographic CRS with latitude and longitude in degrees.
    pub fn geographic() -> Self {
        Self {
            pipeline: None,
            unit: Unit::Degrees,
            lon_domain: None,
            lat_limit: None,
        }
    }

    /// Projected CRS described by a `geodesy` pipeline (e.g. `"laea lon_0=10 lat_0=52"`).
    pub fn projected(pipeline: impl Into<String>, unit: Unit) -> Self {
        Self {
            pipeline: Some(pipeline.into()),
            unit,
            lon_domain: None,
            lat_limit: None,
        }
    }

    /// WGS84 / UTM zone definition.
    pub fn utm(zone: u8, hemisphere: Hemisphere) -> Self {
        let south = match hemisphere {
            Hemisphere::North => "",
            Hemisphere::South => " south",
        };

        Self::projected(format!("utm zone={zone}{south} ellps=WGS84"), Unit::Meters)
            .with_lon_domain(central_meridian(zone), UTM_DOMAIN_HALF_WIDTH)
    }

    /// Restricts the longitudes (degrees) this CRS can be projected from.
    pub fn with_lon_domain(mut self, central_meridian: f64, half_width: f64) -> Self {
        self.lon_domain = Some(LonDomain {
            central_meridian,
            half_width,
        });
        self
    }

    /// Restricts the absolute latitude (degrees) this CRS can be projected from.
    pub fn with_lat_limit(mut self, lat_limit: f64) -> Self {
        self.lat_limit = Some(lat_limit);
        self
    }

    /// Operator pipeline, `None` for geographic CRSs.
    pub fn pipeline(&self) -> Option<&str> {
        self.pipeline.as_deref()
    }

    /// Unit of the coordinate axes.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Longitude domain of the projection, if restricted.
    pub fn lon_domain(&self) -> Option<LonDomain> {
        self.lon_domain
    }

    /// Maximum absolute latitude of the projection, if restricted.
    pub fn lat_limit(&self) -> Option<f64> {
        self.lat_limit
    }

    /// True if coordinates are longitude and latitude in degrees.
    pub fn is_geographic(&self) -> bool {
        self.pipeline.is_none()
    }
}

/// Compiled `geodesy` operators, memoized by pipeline text.
struct Engine {
    context: Minimal,
    ops: HashMap<String, OpHandle>,
}

impl Engine {
    fn new() -> Self {
        Self {
            context: Minimal::new(),
            ops: HashMap::new(),
        }
    }

    fn handle(&mut self, pipeline: &str) -> Result<OpHandle> {
        if let Some(op) = self.ops.get(pipeline) {
            return Ok(*op);
        }

        let op = self.context.op(pipeline).map_err(|err| {
            log::debug!("Failed to compile operator '{pipeline}': {err}");
            CrsError::InvalidDefinition(pipeline.to_string())
        })?;

        log::debug!("Compiled operator '{pipeline}'");
        self.ops.insert(pipeline.to_string(), op);

        Ok(op)
    }

    fn apply(
        &self,
        op: OpHandle,
        direction: Direction,
        coord: Coor2D,
    ) -> std::result::Result<Coor2D, String> {
        let mut data = [coord];
        self.context
            .apply(op, direction, &mut data)
            .map_err(|err| err.to_string())?;

        if !data[0].0[0].is_finite() || !data[0].0[1].is_finite() {
            return Err("result is not finite".to_string());
        }

        Ok(data[0])
    }
}

thread_local! {
    static ENGINE: RefCell<Engine> = RefCell::new(Engine::new());
}

lazy_static! {
    static ref SHARED: CrsRegistry = CrsRegistry::new();
}

/// Registry of CRS definitions.
///
/// Knows WGS84, Web Mercator and all WGS84 / UTM zones out of the box; other CRSs can be added
/// with [`CrsRegistry::register`]. The registry is `Send + Sync`; compiled operators are cached per
/// thread, so compiling a pipeline is paid once per thread and the transformation itself takes no
/// locks.
#[derive(Debug)]
pub struct CrsRegistry {
    definitions: RwLock<HashMap<Srid, CrsDefinition>>,
}

impl Default for CrsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CrsRegistry {
    /// Creates a registry with the built-in definitions.
    pub fn new() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(Srid::WGS84, CrsDefinition::geographic());
        definitions.insert(
            Srid::WEB_MERCATOR,
            CrsDefinition::projected("webmerc", Unit::Meters)
                .with_lat_limit(WEB_MERCATOR_LAT_LIMIT),
        );

        Self {
            definitions: RwLock::new(definitions),
        }
    }

    /// Registry shared by the whole process.
    pub fn shared() -> &'static CrsRegistry {
        &SHARED
    }

    /// Adds a definition, replacing the previous one for the same identifier.
    ///
    /// The pipeline is compiled right away so that a broken definition is reported here rather
    /// than on first use.
    pub fn register(&self, srid: Srid, definition: CrsDefinition) -> Result<()> {
        if let Some(pipeline) = definition.pipeline() {
            ENGINE.with(|engine| engine.borrow_mut().handle(pipeline))?;
        }

        log::debug!("Registered {srid}: {definition:?}");
        self.definitions.write().insert(srid, definition);
        Ok(())
    }

    /// Definition of the CRS.
    pub fn resolve(&self, srid: Srid) -> Result<CrsDefinition> {
        if let Some(definition) = self.definitions.read().get(&srid) {
            return Ok(definition.clone());
        }

        match srid.utm_zone() {
            Some((zone, hemisphere)) => Ok(CrsDefinition::utm(zone, hemisphere)),
            None => Err(CrsError::UnresolvableCrs(srid)),
        }
    }

    /// Native unit of the CRS axes.
    pub fn unit(&self, srid: Srid) -> Result<Unit> {
        Ok(self.resolve(srid)?.unit())
    }

    /// Prepares a transformation between two CRSs.
    pub fn transformation(&self, from: Srid, to: Srid) -> Result<CrsTransform> {
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;

        ENGINE.with(|engine| {
            let mut engine = engine.borrow_mut();
            for pipeline in [source.pipeline(), target.pipeline()].into_iter().flatten() {
                engine.handle(pipeline)?;
            }
            Ok::<_, CrsError>(())
        })?;

        Ok(CrsTransform {
            from,
            to,
            source,
            target,
        })
    }

    /// Transforms a single `(x, y)` coordinate. Geographic coordinates are `(lon, lat)` in degrees.
    pub fn transform(&self, from: Srid, to: Srid, coord: (f64, f64)) -> Result<(f64, f64)> {
        self.transformation(from, to)?.apply(coord)
    }

    /// Transforms a batch of coordinates, failing on the first one that cannot be transformed.
    pub fn transform_all(
        &self,
        from: Srid,
        to: Srid,
        coords: &[(f64, f64)],
    ) -> Result<Vec<(f64, f64)>> {
        let transformation = self.transformation(from, to)?;
        log::trace!("Transforming {} coordinates from {from} to {to}", coords.len());
        coords.iter().map(|c| transformation.apply(*c)).collect()
    }
}

/// Resolved transformation from one CRS to another.
#[derive(Debug, Clone)]
pub struct CrsTransform {
    from: Srid,
    to: Srid,
    source: CrsDefinition,
    target: CrsDefinition,
}

impl CrsTransform {
    /// Source CRS.
    pub fn from(&self) -> Srid {
        self.from
    }

    /// Target CRS.
    pub fn to(&self) -> Srid {
        self.to
    }

    /// True if source and target are the same CRS and coordinates pass through unchanged.
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }

    /// Transforms a single `(x, y)` coordinate.
    pub fn apply(&self, (x, y): (f64, f64)) -> Result<(f64, f64)> {
        if self.is_identity() {
            return Ok((x, y));
        }

        let error = |reason: String| CrsError::Transformation {
            from: self.from,
            to: self.to,
            x,
            y,
            reason,
        };

        let geo = match self.source.pipeline() {
            None => {
                validate_lat_lon(y, x).map_err(|err| error(err.to_string()))?;
                Coor2D::geo(y, x)
            }
            Some(pipeline) => {
                let geo = with_engine(pipeline, Inv, Coor2D([x, y])).map_err(&error)?;
                let (lon, lat) = (geo.0[0].to_degrees(), geo.0[1].to_degrees());
                validate_lat_lon(lat, lon).map_err(|err| error(err.to_string()))?;
                geo
            }
        };

        let (lon, lat) = (geo.0[0].to_degrees(), geo.0[1].to_degrees());
        if let Some(domain) = self.target.lon_domain() {
            if !domain.contains(lon) {
                return Err(error(format!(
                    "longitude {lon} is outside of the domain of {}",
                    self.to
                )));
            }
        }
        if let Some(limit) = self.target.lat_limit() {
            if lat.abs() > limit {
                return Err(error(format!(
                    "latitude {lat} is outside of the domain of {}",
                    self.to
                )));
            }
        }

        match self.target.pipeline() {
            None => Ok((lon, lat)),
            Some(pipeline) => {
                let projected = with_engine(pipeline, Fwd, geo).map_err(error)?;
                Ok((projected.0[0], projected.0[1]))
            }
        }
    }
}

fn with_engine(
    pipeline: &str,
    direction: Direction,
    coord: Coor2D,
) -> std::result::Result<Coor2D, String> {
    ENGINE.with(|engine| {
        let mut engine = engine.borrow_mut();
        let op = engine.handle(pipeline).map_err(|err| err.to_string())?;
        engine.apply(op, direction, coord)
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn resolves_builtin_definitions() {
        let registry = CrsRegistry::new();

        assert!(registry.resolve(Srid::WGS84).unwrap().is_geographic());
        assert_eq!(registry.unit(Srid::WGS84), Ok(Unit::Degrees));
        assert_eq!(registry.unit(Srid::WEB_MERCATOR), Ok(Unit::Meters));

        let utm = registry.resolve(Srid::new(32715)).unwrap();
        assert_eq!(utm.pipeline(), Some("utm zone=15 south ellps=WGS84"));
        assert_eq!(utm.unit(), Unit::Meters);
        assert_eq!(utm.lon_domain().unwrap().central_meridian, -93.0);
    }

    #[test]
    fn unknown_identifier_is_unresolvable() {
        let registry = CrsRegistry::new();
        assert_matches!(
            registry.resolve(Srid::new(999_999_999)),
            Err(CrsError::UnresolvableCrs(srid)) if srid == Srid::new(999_999_999)
        );
        assert_matches!(
            registry.transform(Srid::WGS84, Srid::new(32661), (0.0, 0.0)),
            Err(CrsError::UnresolvableCrs(_))
        );
    }

    #[test]
    fn wgs84_to_utm() {
        let registry = CrsRegistry::new();
        let (x, y) = registry
            .transform(Srid::WGS84, Srid::new(32615), (-94.142430, 45.553670))
            .unwrap();

        assert_abs_diff_eq!(x, 410830.541, epsilon = 1e-3);
        assert_abs_diff_eq!(y, 5045093.805, epsilon = 1e-3);
    }

    #[test]
    fn utm_round_trip() {
        let registry = CrsRegistry::new();
        let coords = [(-94.14243, 45.55367), (-95.5, 44.0), (-90.1, 46.9)];

        let projected = registry
            .transform_all(Srid::WGS84, Srid::new(32615), &coords)
            .unwrap();
        let back = registry
            .transform_all(Srid::new(32615), Srid::WGS84, &projected)
            .unwrap();

        for (original, restored) in coords.iter().zip(&back) {
            assert_abs_diff_eq!(original.0, restored.0, epsilon = 1e-8);
            assert_abs_diff_eq!(original.1, restored.1, epsilon = 1e-8);
        }
    }

    #[test]
    fn utm_to_utm_goes_through_geographic() {
        let registry = CrsRegistry::new();
        let in_15 = registry
            .transform(Srid::WGS84, Srid::new(32615), (-90.5, 40.0))
            .unwrap();
        let in_16 = registry
            .transform(Srid::new(32615), Srid::new(32616), in_15)
            .unwrap();
        let direct = registry
            .transform(Srid::WGS84, Srid::new(32616), (-90.5, 40.0))
            .unwrap();

        assert_abs_diff_eq!(in_16.0, direct.0, epsilon = 1e-6);
        assert_abs_diff_eq!(in_16.1, direct.1, epsilon = 1e-6);
    }

    #[test]
    fn web_mercator() {
        let registry = CrsRegistry::new();
        let (x, y) = registry
            .transform(Srid::WGS84, Srid::WEB_MERCATOR, (180.0, 0.0))
            .unwrap();

        assert_abs_diff_eq!(x, 20037508.342789244, epsilon = 1e-6);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn out_of_domain_coordinates() {
        let registry = CrsRegistry::new();

        assert_matches!(
            registry.transform(Srid::WGS84, Srid::new(32615), (100.0, 10.0)),
            Err(CrsError::Transformation { .. })
        );
        assert_matches!(
            registry.transform(Srid::WGS84, Srid::new(32615), (-94.0, 95.0)),
            Err(CrsError::Transformation { .. })
        );
        assert_matches!(
            registry.transform(Srid::WGS84, Srid::WEB_MERCATOR, (0.0, 90.0)),
            Err(CrsError::Transformation { .. })
        );
    }

    #[test]
    fn identity_transformation() {
        let registry = CrsRegistry::new();
        let transformation = registry.transformation(Srid::new(32615), Srid::new(32615)).unwrap();

        assert!(transformation.is_identity());
        assert_eq!(transformation.apply((1.5, -2.5)), Ok((1.5, -2.5)));
    }

    #[test]
    fn custom_definitions() {
        let registry = CrsRegistry::new();
        let etrs89_utm32 = Srid::new(25832);
        assert_matches!(registry.resolve(etrs89_utm32), Err(CrsError::UnresolvableCrs(_)));

        registry
            .register(
                etrs89_utm32,
                CrsDefinition::projected("utm zone=32 ellps=GRS80", Unit::Meters),
            )
            .unwrap();

        let (x, y) = registry
            .transform(Srid::WGS84, etrs89_utm32, (9.0, 0.0))
            .unwrap();
        assert_abs_diff_eq!(x, 500000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-6);

        assert_matches!(
            registry.register(
                Srid::new(1),
                CrsDefinition::projected("no_such_operator", Unit::Meters)
            ),
            Err(CrsError::InvalidDefinition(_))
        );
        assert_matches!(registry.resolve(Srid::new(1)), Err(CrsError::UnresolvableCrs(_)));
    }

    #[test]
    fn shared_registry_is_usable_from_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    CrsRegistry::shared()
                        .transform(Srid::WGS84, Srid::new(32631), (3.0 + i as f64 * 0.1, 45.0))
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            let (x, _) = handle.join().unwrap();
            assert!(x > 400_000.0 && x < 600_000.0);
        }
    }
}
