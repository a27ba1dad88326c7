//! Type mapping descriptor for SQL Server spatial columns.

use std::any::Any;
use std::sync::Arc;

use crate::core::clr_type::{ClrType, SpatialType};
use crate::core::traits::RelationalTypeMapping;
use crate::error::{MappingError, Result};
use crate::geometry::{GeometryFactory, GeometryServices, SpatialValue};

use super::GEOGRAPHY;

/// Maps an application geometry type to a `geometry` or `geography` column.
///
/// The host's value conversion layer reads the factory and services from
/// here; the descriptor itself only records what was resolved.
#[derive(Debug, Clone)]
pub struct SqlServerGeometryTypeMapping {
    clr_type: ClrType,
    store_type: String,
    is_geography: bool,
    factory: GeometryFactory,
    services: Arc<dyn GeometryServices>,
}

impl SqlServerGeometryTypeMapping {
    /// Build a mapping for `clr_type` stored as `store_type`.
    ///
    /// Fails when the services cannot create a factory for the column's
    /// default SRID.
    pub fn new(
        services: Arc<dyn GeometryServices>,
        clr_type: ClrType,
        store_type: impl Into<String>,
    ) -> Result<Self> {
        let store_type = store_type.into();
        let is_geography = store_type.eq_ignore_ascii_case(GEOGRAPHY);
        let factory = services.create_factory(services.default_srid(is_geography), is_geography)?;

        Ok(Self {
            clr_type,
            store_type,
            is_geography,
            factory,
            services,
        })
    }

    /// Build a mapping for a statically known geometry type.
    pub fn for_type<G: SpatialType>(
        services: Arc<dyn GeometryServices>,
        store_type: impl Into<String>,
    ) -> Result<Self> {
        Self::new(services, ClrType::of::<G>(), store_type)
    }

    pub fn clr_type(&self) -> &ClrType {
        &self.clr_type
    }

    pub fn store_type(&self) -> &str {
        &self.store_type
    }

    /// True for `geography` (ellipsoidal) columns, false for `geometry` (planar).
    pub fn is_geography(&self) -> bool {
        self.is_geography
    }

    pub fn factory(&self) -> &GeometryFactory {
        &self.factory
    }

    pub fn geometry_services(&self) -> &Arc<dyn GeometryServices> {
        &self.services
    }

    /// Parse well-known text with the column's default SRID.
    ///
    /// The parsed value must fit the mapped application type: a mapping for
    /// `Point` rejects a `POLYGON`. Non-spatial application types accept any
    /// geometry.
    pub fn parse_wkt(&self, text: &str) -> Result<SpatialValue> {
        let value = self.services.parse_wkt(text, self.factory.srid())?;

        if let Some(expected) = self.clr_type.geometry_kind() {
            let actual = value.kind();
            if !expected.accepts(actual) {
                return Err(MappingError::GeometryKindMismatch {
                    expected: expected.name().to_string(),
                    actual: actual.name().to_string(),
                });
            }
        }

        Ok(value)
    }

    /// Render a value as well-known text.
    pub fn write_wkt(&self, value: &SpatialValue) -> String {
        self.services.write_wkt(value)
    }
}

impl RelationalTypeMapping for SqlServerGeometryTypeMapping {
    fn clr_type(&self) -> &ClrType {
        &self.clr_type
    }

    fn store_type(&self) -> &str {
        &self.store_type
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
