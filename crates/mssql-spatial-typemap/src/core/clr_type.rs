//! Application-side type identifiers.
//!
//! A [`ClrType`] names the application type a column is read into. Spatial
//! types form a closed set ([`GeometryKind`]); everything else is carried by
//! name only and never inspected.

use std::fmt;
use std::str::FromStr;

use geo_types::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};

/// Closed set of geometry variants.
///
/// `Any` is the abstract geometry capability itself: every other variant is
/// a more specific form of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Any,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    /// Display name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Any => "Geometry",
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }

    /// Look up a variant by name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "geometry" | "igeometry" => Some(GeometryKind::Any),
            "point" => Some(GeometryKind::Point),
            "linestring" => Some(GeometryKind::LineString),
            "polygon" => Some(GeometryKind::Polygon),
            "multipoint" => Some(GeometryKind::MultiPoint),
            "multilinestring" => Some(GeometryKind::MultiLineString),
            "multipolygon" => Some(GeometryKind::MultiPolygon),
            "geometrycollection" => Some(GeometryKind::GeometryCollection),
            _ => None,
        }
    }

    /// Classify a parsed geometry value.
    pub fn of_geometry(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Line(_) | Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
                GeometryKind::Polygon
            }
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
            #[allow(unreachable_patterns)]
            _ => GeometryKind::Any,
        }
    }

    /// Whether a value of kind `actual` can be stored through this kind.
    pub fn accepts(&self, actual: GeometryKind) -> bool {
        *self == GeometryKind::Any || *self == actual
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of an application type requested from the type-mapping pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClrType {
    /// A geometry type, possibly the abstract capability (`GeometryKind::Any`).
    Geometry(GeometryKind),
    /// Any other application type, identified by name.
    Named(String),
}

impl ClrType {
    /// The abstract geometry capability marker.
    pub fn geometry() -> Self {
        ClrType::Geometry(GeometryKind::Any)
    }

    /// A non-spatial type identified by name.
    pub fn named(name: impl Into<String>) -> Self {
        ClrType::Named(name.into())
    }

    /// Identifier for a concrete spatial Rust type.
    pub fn of<T: SpatialType>() -> Self {
        ClrType::Geometry(T::KIND)
    }

    /// True when this type is, or is a more specific form of, the geometry capability.
    pub fn is_geometry(&self) -> bool {
        matches!(self, ClrType::Geometry(_))
    }

    /// Geometry variant, if this is a spatial type.
    pub fn geometry_kind(&self) -> Option<GeometryKind> {
        match self {
            ClrType::Geometry(kind) => Some(*kind),
            ClrType::Named(_) => None,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            ClrType::Geometry(kind) => kind.name(),
            ClrType::Named(name) => name,
        }
    }
}

impl Default for ClrType {
    fn default() -> Self {
        ClrType::geometry()
    }
}

impl fmt::Display for ClrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClrType {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(MappingError::InvalidArgument {
                name: "clr_type".to_string(),
                message: "type name cannot be empty".to_string(),
            });
        }

        Ok(match GeometryKind::parse(name) {
            Some(kind) => ClrType::Geometry(kind),
            None => ClrType::Named(name.to_string()),
        })
    }
}

/// The geometry capability.
///
/// Implemented by every Rust type a spatial column can be read into. The
/// associated [`KIND`](SpatialType::KIND) ties the static type to its tag so
/// mappings can be built without runtime type construction.
pub trait SpatialType: Sized + Send + Sync + 'static {
    /// Tag of this type in the closed geometry set.
    const KIND: GeometryKind;

    /// Narrow a parsed geometry to this type, if it has the right shape.
    fn from_geometry(geometry: Geometry<f64>) -> Option<Self>;
}

impl SpatialType for Geometry<f64> {
    const KIND: GeometryKind = GeometryKind::Any;

    fn from_geometry(geometry: Geometry<f64>) -> Option<Self> {
        Some(geometry)
    }
}

macro_rules! impl_spatial_type {
    ($($ty:ident => $kind:ident),* $(,)?) => {
        $(
            impl SpatialType for $ty<f64> {
                const KIND: GeometryKind = GeometryKind::$kind;

                fn from_geometry(geometry: Geometry<f64>) -> Option<Self> {
                    $ty::try_from(geometry).ok()
                }
            }
        )*
    };
}

impl_spatial_type! {
    Point => Point,
    LineString => LineString,
    Polygon => Polygon,
    MultiPoint => MultiPoint,
    MultiLineString => MultiLineString,
    MultiPolygon => MultiPolygon,
}

impl SpatialType for GeometryCollection<f64> {
    const KIND: GeometryKind = GeometryKind::GeometryCollection;

    fn from_geometry(geometry: Geometry<f64>) -> Option<Self> {
        match geometry {
            Geometry::GeometryCollection(collection) => Some(collection),
            _ => None,
        }
    }
}
