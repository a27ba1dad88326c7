//! Core abstractions for the type-mapping pipeline.
//!
//! - [`clr_type`]: application type identifiers and the geometry capability
//! - [`traits`]: mapping requests, descriptors and the plugin contract
//! - [`catalog`]: ordered plugin registry
//!
//! # Design Patterns
//!
//! - **Chain of Responsibility**: `TypeMappingCatalog` tries plugins in order
//! - **Strategy**: each `TypeMappingSourcePlugin` supplies its own rules

pub mod catalog;
pub mod clr_type;
pub mod traits;

pub use catalog::TypeMappingCatalog;
pub use clr_type::{ClrType, GeometryKind, SpatialType};
pub use traits::{MappingInfo, RelationalTypeMapping, TypeMappingSourcePlugin};
