//! Type-mapping catalog for explicit plugin registration.
//!
//! The [`TypeMappingCatalog`] holds the type-mapping plugins of a process.
//! It is explicitly constructed and shared, never a global, so tests can
//! build catalogs with exactly the plugins they need.
//!
//! # Resolution Order
//!
//! Plugins are tried in registration order. The first one that returns a
//! mapping wins; a plugin that declines passes the request on. Errors stop
//! the search and are returned unchanged.

use std::sync::Arc;

use tracing::debug;

use crate::error::{MappingError, Result};
use crate::geometry::GeometryServices;
use crate::typemap::SqlServerSpatialTypeMappingPlugin;

use super::traits::{MappingInfo, RelationalTypeMapping, TypeMappingSourcePlugin};

/// Ordered registry of type-mapping plugins.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use mssql_spatial_typemap::{DefaultGeometryServices, MappingInfo, TypeMappingCatalog};
///
/// let catalog = TypeMappingCatalog::with_spatial(Arc::new(DefaultGeometryServices::new()));
/// let mapping = catalog
///     .find_mapping(&MappingInfo::for_store_type("geography"))
///     .unwrap()
///     .unwrap();
/// assert_eq!(mapping.store_type(), "geography");
/// ```
#[derive(Default, Clone)]
pub struct TypeMappingCatalog {
    plugins: Vec<Arc<dyn TypeMappingSourcePlugin>>,
}

impl TypeMappingCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the SQL Server spatial plugin registered.
    pub fn with_spatial(geometry_services: Arc<dyn GeometryServices>) -> Self {
        let mut catalog = Self::new();
        catalog.use_spatial(geometry_services);
        catalog
    }

    /// Register the SQL Server spatial plugin around the given services.
    pub fn use_spatial(&mut self, geometry_services: Arc<dyn GeometryServices>) -> &mut Self {
        self.register_plugin(Arc::new(SqlServerSpatialTypeMappingPlugin::new(
            geometry_services,
        )))
    }

    /// Register a plugin. Later registrations are tried after earlier ones.
    pub fn register_plugin(&mut self, plugin: Arc<dyn TypeMappingSourcePlugin>) -> &mut Self {
        debug!(
            "Registered type-mapping plugin '{}' at position {}",
            plugin.name(),
            self.plugins.len()
        );
        self.plugins.push(plugin);
        self
    }

    /// Check if a plugin with this name is registered.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    /// Names of all registered plugins, in resolution order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Ask each plugin in turn; return the first mapping found.
    pub fn find_mapping(&self, info: &MappingInfo) -> Result<Option<Box<dyn RelationalTypeMapping>>> {
        for plugin in &self.plugins {
            if let Some(mapping) = plugin.find_mapping(info)? {
                return Ok(Some(mapping));
            }
        }
        Ok(None)
    }

    /// Like [`find_mapping`](Self::find_mapping), but an unmapped request is an error.
    pub fn require_mapping(&self, info: &MappingInfo) -> Result<Box<dyn RelationalTypeMapping>> {
        self.find_mapping(info)?.ok_or_else(|| {
            MappingError::Config(format!("No type mapping found for {}", info))
        })
    }
}

impl std::fmt::Debug for TypeMappingCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeMappingCatalog")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}
