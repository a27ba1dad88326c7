//! Geometry services collaborator.
//!
//! Spatial type mappings never build or parse geometry values themselves;
//! they hold a shared [`GeometryServices`] handle and delegate to it.
//! [`DefaultGeometryServices`] is the stock implementation, backed by
//! `geo-types` values and `wkt` parsing.

mod factory;
mod services;

pub use factory::{
    GeometryFactory, PrecisionKind, PrecisionModel, SpatialValue, MAX_FIXED_SCALE,
};
pub use services::{
    parse_wkt, validate_srid, DefaultGeometryServices, GeometryServices,
    DEFAULT_GEOGRAPHY_SRID, DEFAULT_GEOMETRY_SRID, MAX_SRID,
};
