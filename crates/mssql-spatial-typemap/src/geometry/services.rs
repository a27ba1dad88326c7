//! Geometry services shared by every spatial type mapping.

use std::fmt;
use std::str::FromStr;

use geo_types::Geometry;
use tracing::debug;
use wkt::ToWkt;

use crate::config::GeometryConfig;
use crate::error::{MappingError, Result};

use super::factory::{GeometryFactory, PrecisionModel, SpatialValue};

/// Highest SRID SQL Server accepts.
pub const MAX_SRID: i32 = 999_999;

/// Default SRID for `geography` columns (WGS 84).
pub const DEFAULT_GEOGRAPHY_SRID: i32 = 4326;

/// Default SRID for `geometry` columns (planar, unspecified).
pub const DEFAULT_GEOMETRY_SRID: i32 = 0;

/// Geometry construction and parsing facilities.
///
/// A single instance is shared (via `Arc`) by the type-mapping plugin and
/// every mapping it produces, so implementations must be thread-safe.
pub trait GeometryServices: fmt::Debug + Send + Sync {
    /// Precision model applied to constructed geometries.
    fn precision_model(&self) -> PrecisionModel;

    /// SRID used for columns that do not declare one.
    fn default_srid(&self, is_geography: bool) -> i32;

    /// Create a factory for the given SRID.
    fn create_factory(&self, srid: i32, is_geography: bool) -> Result<GeometryFactory> {
        validate_srid(srid, is_geography)?;
        Ok(GeometryFactory::new(srid, self.precision_model()))
    }

    /// Parse well-known text into a value with the given SRID.
    ///
    /// Values are two-dimensional: Z and M ordinates are dropped.
    fn parse_wkt(&self, text: &str, srid: i32) -> Result<SpatialValue> {
        let geometry = parse_wkt(text)?;
        let factory = GeometryFactory::new(srid, self.precision_model());
        Ok(factory.create_geometry(geometry))
    }

    /// Render a value as well-known text.
    fn write_wkt(&self, value: &SpatialValue) -> String {
        value.geometry.wkt_string()
    }
}

/// Check that an SRID is usable for a column kind.
pub fn validate_srid(srid: i32, is_geography: bool) -> Result<()> {
    let store_type = if is_geography { "geography" } else { "geometry" };
    if !(0..=MAX_SRID).contains(&srid) {
        return Err(MappingError::invalid_srid(
            srid,
            store_type,
            format!("SRID must be between 0 and {}", MAX_SRID),
        ));
    }
    if is_geography && srid == 0 {
        return Err(MappingError::invalid_srid(
            srid,
            store_type,
            "geography requires a geodetic spatial reference system",
        ));
    }
    Ok(())
}

/// Parse well-known text into a geometry.
///
/// `POINT EMPTY` is rejected, alone or inside a collection, since a point
/// value always carries a coordinate. Z and M ordinates are dropped.
pub fn parse_wkt(text: &str) -> Result<Geometry<f64>> {
    let parsed =
        wkt::Wkt::<f64>::from_str(text.trim()).map_err(|e| MappingError::WktParse(e.to_string()))?;
    if has_empty_point(&parsed) {
        return Err(MappingError::WktParse("empty point is not supported".into()));
    }
    parsed
        .try_into()
        .map_err(|e: wkt::conversion::Error| MappingError::WktParse(format!("{:?}", e)))
}

fn has_empty_point(wkt: &wkt::Wkt<f64>) -> bool {
    match wkt {
        wkt::Wkt::Point(point) => point.0.is_none(),
        wkt::Wkt::GeometryCollection(collection) => collection.0.iter().any(has_empty_point),
        _ => false,
    }
}

/// Default geometry services: configurable SRIDs and precision model.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultGeometryServices {
    precision: PrecisionModel,
    geography_srid: i32,
    geometry_srid: i32,
}

impl Default for DefaultGeometryServices {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultGeometryServices {
    /// Double precision, SRID 4326 for geography and 0 for geometry.
    pub fn new() -> Self {
        Self {
            precision: PrecisionModel::floating(),
            geography_srid: DEFAULT_GEOGRAPHY_SRID,
            geometry_srid: DEFAULT_GEOMETRY_SRID,
        }
    }

    /// Build services from the `geometry` configuration section.
    pub fn from_config(config: &GeometryConfig) -> Result<Self> {
        let services = Self {
            precision: config.precision_model()?,
            geography_srid: config.geography_srid,
            geometry_srid: config.geometry_srid,
        };
        debug!(
            "Geometry services: precision={:?}, geography SRID={}, geometry SRID={}",
            services.precision.kind(),
            services.geography_srid,
            services.geometry_srid
        );
        Ok(services)
    }

    pub fn with_precision(mut self, precision: PrecisionModel) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_geography_srid(mut self, srid: i32) -> Self {
        self.geography_srid = srid;
        self
    }

    pub fn with_geometry_srid(mut self, srid: i32) -> Self {
        self.geometry_srid = srid;
        self
    }
}

impl GeometryServices for DefaultGeometryServices {
    fn precision_model(&self) -> PrecisionModel {
        self.precision
    }

    fn default_srid(&self, is_geography: bool) -> i32 {
        if is_geography {
            self.geography_srid
        } else {
            self.geometry_srid
        }
    }
}
