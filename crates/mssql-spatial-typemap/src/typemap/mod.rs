//! SQL Server spatial type mapping.
//!
//! [`SqlServerSpatialTypeMappingPlugin`] recognizes `geometry` and
//! `geography` columns and geometry application types, and produces a
//! [`SqlServerGeometryTypeMapping`] for them. Any other request is declined
//! so the next plugin in the pipeline can handle it.

mod mapping;

pub use mapping::SqlServerGeometryTypeMapping;

use std::sync::Arc;

use crate::core::clr_type::ClrType;
use crate::core::traits::{MappingInfo, RelationalTypeMapping, TypeMappingSourcePlugin};
use crate::error::{MappingError, Result};
use crate::geometry::GeometryServices;

/// Planar spatial column type.
pub const GEOMETRY: &str = "geometry";

/// Ellipsoidal spatial column type; the default when no store type is given.
pub const GEOGRAPHY: &str = "geography";

/// Store type names recognized as spatial (compared case-insensitively).
pub const SPATIAL_STORE_TYPES: [&str; 2] = [GEOMETRY, GEOGRAPHY];

/// Check whether a store type name denotes a spatial column.
pub fn is_spatial_store_type(store_type_name: &str) -> bool {
    SPATIAL_STORE_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(store_type_name))
}

/// Type-mapping plugin for SQL Server spatial columns.
///
/// Meant to be created once and shared: it holds only the geometry services
/// handle, and every call to [`resolve`](Self::resolve) is independent.
#[derive(Debug, Clone)]
pub struct SqlServerSpatialTypeMappingPlugin {
    geometry_services: Arc<dyn GeometryServices>,
}

impl SqlServerSpatialTypeMappingPlugin {
    /// Create the plugin around a shared geometry services instance.
    pub fn new(geometry_services: Arc<dyn GeometryServices>) -> Self {
        Self { geometry_services }
    }

    /// Create the plugin from a possibly absent services instance.
    ///
    /// Fails with [`MappingError::InvalidArgument`] when none is supplied.
    pub fn try_new(geometry_services: Option<Arc<dyn GeometryServices>>) -> Result<Self> {
        geometry_services
            .map(Self::new)
            .ok_or_else(|| MappingError::missing_argument("geometry_services"))
    }

    pub fn geometry_services(&self) -> &Arc<dyn GeometryServices> {
        &self.geometry_services
    }

    /// Resolve a spatial mapping.
    ///
    /// A request is spatial when the application type is a geometry type or
    /// when the store type name is `geometry`/`geography` in any case. An
    /// absent type carries no signal on its own. Spatial requests get a
    /// mapping for the requested type (or the geometry capability marker)
    /// and the requested store type name unchanged (or `geography`). Others
    /// return `Ok(None)`. Errors from building the mapping are returned as-is.
    pub fn resolve(
        &self,
        requested_type: Option<&ClrType>,
        requested_store_type_name: Option<&str>,
    ) -> Result<Option<SqlServerGeometryTypeMapping>> {
        let is_spatial = requested_type.is_some_and(ClrType::is_geometry)
            || requested_store_type_name.is_some_and(is_spatial_store_type);
        if !is_spatial {
            return Ok(None);
        }

        let clr_type = requested_type.cloned().unwrap_or_else(ClrType::geometry);
        let store_type = requested_store_type_name.unwrap_or(GEOGRAPHY);
        let mapping = SqlServerGeometryTypeMapping::new(
            Arc::clone(&self.geometry_services),
            clr_type,
            store_type,
        )?;

        Ok(Some(mapping))
    }

    /// Resolve a [`MappingInfo`] request.
    pub fn resolve_info(&self, info: &MappingInfo) -> Result<Option<SqlServerGeometryTypeMapping>> {
        self.resolve(info.clr_type.as_ref(), info.store_type_name.as_deref())
    }
}

impl TypeMappingSourcePlugin for SqlServerSpatialTypeMappingPlugin {
    fn name(&self) -> &str {
        "sqlserver-spatial"
    }

    fn find_mapping(&self, info: &MappingInfo) -> Result<Option<Box<dyn RelationalTypeMapping>>> {
        Ok(self
            .resolve_info(info)?
            .map(|m| Box::new(m) as Box<dyn RelationalTypeMapping>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clr_type::GeometryKind;
    use crate::geometry::DefaultGeometryServices;

    fn plugin() -> SqlServerSpatialTypeMappingPlugin {
        SqlServerSpatialTypeMappingPlugin::new(Arc::new(DefaultGeometryServices::new()))
    }

    fn point() -> ClrType {
        ClrType::Geometry(GeometryKind::Point)
    }

    fn string() -> ClrType {
        ClrType::named("String")
    }

    #[test]
    fn test_try_new_requires_services() {
        let err = SqlServerSpatialTypeMappingPlugin::try_new(None).unwrap_err();
        assert!(matches!(
            err,
            MappingError::InvalidArgument { ref name, .. } if name == "geometry_services"
        ));

        let services: Arc<dyn GeometryServices> = Arc::new(DefaultGeometryServices::new());
        assert!(SqlServerSpatialTypeMappingPlugin::try_new(Some(services)).is_ok());
    }

    #[test]
    fn test_no_signal_is_declined() {
        assert!(plugin().resolve(None, None).unwrap().is_none());
        assert!(plugin().resolve(None, Some("int")).unwrap().is_none());
    }

    #[test]
    fn test_absent_type_defaults_to_geometry_capability() {
        let mapping = plugin().resolve(None, Some("geography")).unwrap().unwrap();
        assert_eq!(mapping.clr_type(), &ClrType::geometry());
        assert_eq!(mapping.store_type(), "geography");
    }

    #[test]
    fn test_geometry_type_without_store_type() {
        let mapping = plugin().resolve(Some(&point()), None).unwrap().unwrap();
        assert_eq!(mapping.clr_type(), &point());
        assert_eq!(mapping.store_type(), "geography");
        assert!(mapping.is_geography());
    }

    #[test]
    fn test_store_type_overrides_non_spatial_type() {
        let mapping = plugin()
            .resolve(Some(&string()), Some("geometry"))
            .unwrap()
            .unwrap();
        assert_eq!(mapping.clr_type(), &string());
        assert_eq!(mapping.store_type(), "geometry");
        assert!(!mapping.is_geography());
    }

    #[test]
    fn test_non_spatial_request_is_declined() {
        assert!(plugin()
            .resolve(Some(&string()), Some("varchar"))
            .unwrap()
            .is_none());
        assert!(plugin().resolve(Some(&string()), None).unwrap().is_none());
    }

    #[test]
    fn test_geometry_type_with_any_store_type() {
        let mapping = plugin()
            .resolve(Some(&point()), Some("varbinary(max)"))
            .unwrap()
            .unwrap();
        assert_eq!(mapping.store_type(), "varbinary(max)");
    }

    #[test]
    fn test_store_type_is_case_insensitive_and_preserved() {
        for name in ["GEOGRAPHY", "Geometry", "geoGRAPHY"] {
            let mapping = plugin()
                .resolve(Some(&string()), Some(name))
                .unwrap()
                .unwrap_or_else(|| panic!("{} should resolve", name));
            assert_eq!(mapping.store_type(), name);
        }
    }

    #[test]
    fn test_every_geometry_kind_resolves() {
        let kinds = [
            GeometryKind::Any,
            GeometryKind::Point,
            GeometryKind::LineString,
            GeometryKind::Polygon,
            GeometryKind::MultiPoint,
            GeometryKind::MultiLineString,
            GeometryKind::MultiPolygon,
            GeometryKind::GeometryCollection,
        ];
        for kind in kinds {
            let clr_type = ClrType::Geometry(kind);
            let mapping = plugin().resolve(Some(&clr_type), None).unwrap().unwrap();
            assert_eq!(mapping.clr_type(), &clr_type);
        }
    }

    #[test]
    fn test_construction_failure_propagates() {
        let services = Arc::new(DefaultGeometryServices::new().with_geography_srid(-5));
        let plugin = SqlServerSpatialTypeMappingPlugin::new(services);

        let err = plugin.resolve(Some(&point()), None).unwrap_err();
        assert!(matches!(err, MappingError::InvalidSrid { srid: -5, .. }));

        // Declined requests never reach construction.
        assert!(plugin.resolve(Some(&string()), None).unwrap().is_none());
    }

    #[test]
    fn test_mappings_share_services() {
        let plugin = plugin();
        let a = plugin.resolve(Some(&point()), None).unwrap().unwrap();
        let b = plugin.resolve(None, Some("geometry")).unwrap().unwrap();
        assert!(Arc::ptr_eq(a.geometry_services(), plugin.geometry_services()));
        assert!(Arc::ptr_eq(b.geometry_services(), plugin.geometry_services()));
    }

    #[test]
    fn test_find_mapping_via_plugin_trait() {
        let plugin = plugin();
        let info = MappingInfo::for_store_type("GEOMETRY");
        let mapping = plugin.find_mapping(&info).unwrap().unwrap();
        assert_eq!(mapping.store_type(), "GEOMETRY");
        assert_eq!(mapping.clr_type(), &ClrType::geometry());

        let info = MappingInfo::new(Some(string()), Some("nvarchar".into()));
        assert!(plugin.find_mapping(&info).unwrap().is_none());
    }

    #[test]
    fn test_concurrent_resolution() {
        let plugin = plugin();
        std::thread::scope(|s| {
            for i in 0..8 {
                let plugin = &plugin;
                s.spawn(move || {
                    for _ in 0..100 {
                        let store = if i % 2 == 0 { "geometry" } else { "GEOGRAPHY" };
                        let mapping = plugin
                            .resolve(Some(&ClrType::named("String")), Some(store))
                            .unwrap()
                            .unwrap();
                        assert_eq!(mapping.store_type(), store);
                    }
                });
            }
        });
    }
}
