//! # mssql-spatial-typemap
//!
//! SQL Server spatial type mapping for relational type-mapping pipelines.
//!
//! This library recognizes `geometry` and `geography` columns and geometry
//! application types, and maps them to a descriptor bound to a shared
//! geometry services instance:
//!
//! - **Spatial plugin** deciding whether a request denotes a spatial column
//! - **Plugin catalog** trying registered plugins in order
//! - **Geometry services** for SRID handling, precision and WKT parsing
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mssql_spatial_typemap::{ClrType, DefaultGeometryServices, SqlServerSpatialTypeMappingPlugin};
//!
//! let plugin = SqlServerSpatialTypeMappingPlugin::new(Arc::new(DefaultGeometryServices::new()));
//!
//! let point = ClrType::of::<geo_types::Point<f64>>();
//! let mapping = plugin.resolve(Some(&point), None)?.expect("points are spatial");
//! assert_eq!(mapping.store_type(), "geography");
//!
//! let string = ClrType::named("String");
//! assert!(plugin.resolve(Some(&string), Some("varchar"))?.is_none());
//! # Ok::<(), mssql_spatial_typemap::MappingError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod typemap;

// Re-exports for convenient access
pub use crate::core::{
    ClrType, GeometryKind, MappingInfo, RelationalTypeMapping, SpatialType, TypeMappingCatalog,
    TypeMappingSourcePlugin,
};
pub use config::{Config, GeometryConfig};
pub use error::{MappingError, Result};
pub use geometry::{
    DefaultGeometryServices, GeometryFactory, GeometryServices, PrecisionKind, PrecisionModel,
    SpatialValue,
};
pub use typemap::{SqlServerGeometryTypeMapping, SqlServerSpatialTypeMappingPlugin};
