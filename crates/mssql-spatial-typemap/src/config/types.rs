//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};
use crate::geometry::{
    DefaultGeometryServices, PrecisionKind, PrecisionModel, DEFAULT_GEOGRAPHY_SRID,
    DEFAULT_GEOMETRY_SRID,
};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Geometry services configuration.
    #[serde(default)]
    pub geometry: GeometryConfig,
}

impl Config {
    /// Build the geometry services described by this configuration.
    pub fn geometry_services(&self) -> Result<DefaultGeometryServices> {
        DefaultGeometryServices::from_config(&self.geometry)
    }
}

/// Geometry services configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// SRID for `geography` columns (default: 4326).
    #[serde(default = "default_geography_srid")]
    pub geography_srid: i32,

    /// SRID for `geometry` columns (default: 0).
    #[serde(default = "default_geometry_srid")]
    pub geometry_srid: i32,

    /// Coordinate precision model (default: floating).
    #[serde(default)]
    pub precision: PrecisionKind,

    /// Grid scale for fixed precision (required when `precision: fixed`).
    #[serde(default)]
    pub scale: Option<f64>,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            geography_srid: default_geography_srid(),
            geometry_srid: default_geometry_srid(),
            precision: PrecisionKind::default(),
            scale: None,
        }
    }
}

impl GeometryConfig {
    /// Precision model described by `precision` and `scale`.
    pub fn precision_model(&self) -> Result<PrecisionModel> {
        match self.precision {
            PrecisionKind::Floating => Ok(PrecisionModel::floating()),
            PrecisionKind::FloatingSingle => Ok(PrecisionModel::floating_single()),
            PrecisionKind::Fixed => {
                let scale = self.scale.ok_or_else(|| {
                    MappingError::Config("geometry.scale is required for fixed precision".into())
                })?;
                PrecisionModel::fixed(scale)
            }
        }
    }
}

fn default_geography_srid() -> i32 {
    DEFAULT_GEOGRAPHY_SRID
}

fn default_geometry_srid() -> i32 {
    DEFAULT_GEOMETRY_SRID
}
