//! Configuration validation.

use tracing::warn;

use super::Config;
use crate::error::{MappingError, Result};
use crate::geometry::{validate_srid, PrecisionKind, MAX_FIXED_SCALE};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let geometry = &config.geometry;

    validate_srid(geometry.geography_srid, true)
        .map_err(|e| MappingError::Config(format!("geometry.geography_srid: {}", e)))?;
    validate_srid(geometry.geometry_srid, false)
        .map_err(|e| MappingError::Config(format!("geometry.geometry_srid: {}", e)))?;

    match (geometry.precision, geometry.scale) {
        (PrecisionKind::Fixed, None) => {
            return Err(MappingError::Config(
                "geometry.scale is required when geometry.precision is 'fixed'".into(),
            ));
        }
        (PrecisionKind::Fixed, Some(scale)) if !(scale.is_finite() && scale > 0.0) => {
            return Err(MappingError::Config(format!(
                "geometry.scale must be a positive number, got {}",
                scale
            )));
        }
        (PrecisionKind::Fixed, Some(scale)) if scale > MAX_FIXED_SCALE => {
            return Err(MappingError::Config(format!(
                "geometry.scale must not exceed {:e}, got {}",
                MAX_FIXED_SCALE, scale
            )));
        }
        (PrecisionKind::Floating | PrecisionKind::FloatingSingle, Some(scale)) => {
            warn!(
                "geometry.scale ({}) is ignored unless geometry.precision is 'fixed'",
                scale
            );
        }
        _ => {}
    }

    Ok(())
}
