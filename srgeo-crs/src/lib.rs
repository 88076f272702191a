//! Coordinate reference systems for `srgeo`: identifiers ([`Srid`]), units ([`Unit`]), the
//! [`CrsRegistry`] that resolves identifiers and transforms coordinates between them, and UTM
//! zone selection ([`utm`]).
//!
//! ```
//! use srgeo_crs::{utm, CrsRegistry, Srid};
//!
//! let zone = utm::utm_srid(45.553670, -94.142430).unwrap();
//! assert_eq!(zone, Srid::new(32615));
//!
//! let (x, y) = CrsRegistry::shared()
//!     .transform(Srid::WGS84, zone, (-94.142430, 45.553670))
//!     .unwrap();
//! assert!((x - 410830.541).abs() < 1e-3);
//! assert!((y - 5045093.805).abs() < 1e-3);
//! ```

pub mod error;
pub mod registry;
mod srid;
pub mod unit;
pub mod utm;

pub use error::{CrsError, Result};
pub use registry::{CrsDefinition, CrsRegistry, CrsTransform, LonDomain};
pub use srid::{Hemisphere, Srid};
pub use unit::{Dimension, Unit};
