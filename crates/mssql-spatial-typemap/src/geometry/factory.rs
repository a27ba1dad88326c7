//! Geometry construction: precision models, factories and parsed values.

use geo_types::{Coord, Geometry, LineString, Point, Polygon, Rect, Triangle};
use serde::{Deserialize, Serialize};

use crate::core::clr_type::{GeometryKind, SpatialType};
use crate::error::{MappingError, Result};

/// Largest fixed-precision scale; finer grids lose coordinates to overflow.
pub const MAX_FIXED_SCALE: f64 = 1e15;

/// How coordinates are rounded when geometries are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionKind {
    /// Full double precision.
    #[default]
    Floating,
    /// Single precision (coordinates round-trip through `f32`).
    FloatingSingle,
    /// Fixed grid of `1 / scale` units.
    Fixed,
}

/// Coordinate precision model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PrecisionModel {
    kind: PrecisionKind,
    scale: f64,
}

impl PrecisionModel {
    /// Full double precision.
    pub fn floating() -> Self {
        Self {
            kind: PrecisionKind::Floating,
            scale: 0.0,
        }
    }

    /// Single precision.
    pub fn floating_single() -> Self {
        Self {
            kind: PrecisionKind::FloatingSingle,
            scale: 0.0,
        }
    }

    /// Fixed precision with `scale` grid cells per unit.
    ///
    /// `scale` must be positive and no larger than [`MAX_FIXED_SCALE`].
    pub fn fixed(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MappingError::Config(format!(
                "fixed precision scale must be a positive number, got {}",
                scale
            )));
        }
        if scale > MAX_FIXED_SCALE {
            return Err(MappingError::Config(format!(
                "fixed precision scale must not exceed {:e}, got {}",
                MAX_FIXED_SCALE, scale
            )));
        }
        Ok(Self {
            kind: PrecisionKind::Fixed,
            scale,
        })
    }

    pub fn kind(&self) -> PrecisionKind {
        self.kind
    }

    /// Grid scale (only meaningful for fixed precision).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Round a single ordinate to this model.
    ///
    /// Ordinates too large to place on the fixed grid are returned unchanged.
    pub fn make_precise(&self, value: f64) -> f64 {
        match self.kind {
            PrecisionKind::Floating => value,
            PrecisionKind::FloatingSingle => value as f32 as f64,
            PrecisionKind::Fixed => {
                let scaled = value * self.scale;
                if scaled.is_finite() {
                    scaled.round() / self.scale
                } else {
                    value
                }
            }
        }
    }

    /// Round every coordinate of a geometry in place.
    pub fn apply(&self, geometry: &mut Geometry<f64>) {
        if self.kind == PrecisionKind::Floating {
            return;
        }
        round_geometry(geometry, &|v| self.make_precise(v));
    }
}

fn round_coord(coord: &mut Coord<f64>, f: &impl Fn(f64) -> f64) {
    coord.x = f(coord.x);
    coord.y = f(coord.y);
}

fn round_line_string(line: &mut LineString<f64>, f: &impl Fn(f64) -> f64) {
    for coord in line.0.iter_mut() {
        round_coord(coord, f);
    }
}

fn round_polygon(polygon: &mut Polygon<f64>, f: &impl Fn(f64) -> f64) {
    polygon.exterior_mut(|exterior| round_line_string(exterior, f));
    polygon.interiors_mut(|interiors| {
        for interior in interiors.iter_mut() {
            round_line_string(interior, f);
        }
    });
}

fn round_geometry(geometry: &mut Geometry<f64>, f: &impl Fn(f64) -> f64) {
    match geometry {
        Geometry::Point(point) => round_coord(&mut point.0, f),
        Geometry::Line(line) => {
            round_coord(&mut line.start, f);
            round_coord(&mut line.end, f);
        }
        Geometry::LineString(line) => round_line_string(line, f),
        Geometry::Polygon(polygon) => round_polygon(polygon, f),
        Geometry::MultiPoint(points) => {
            for point in points.0.iter_mut() {
                round_coord(&mut point.0, f);
            }
        }
        Geometry::MultiLineString(lines) => {
            for line in lines.0.iter_mut() {
                round_line_string(line, f);
            }
        }
        Geometry::MultiPolygon(polygons) => {
            for polygon in polygons.0.iter_mut() {
                round_polygon(polygon, f);
            }
        }
        Geometry::GeometryCollection(collection) => {
            for member in collection.0.iter_mut() {
                round_geometry(member, f);
            }
        }
        Geometry::Rect(rect) => {
            let (mut min, mut max) = (rect.min(), rect.max());
            round_coord(&mut min, f);
            round_coord(&mut max, f);
            *rect = Rect::new(min, max);
        }
        Geometry::Triangle(triangle) => {
            let (mut v1, mut v2, mut v3) = (triangle.v1(), triangle.v2(), triangle.v3());
            round_coord(&mut v1, f);
            round_coord(&mut v2, f);
            round_coord(&mut v3, f);
            *triangle = Triangle::new(v1, v2, v3);
        }
        #[allow(unreachable_patterns)]
        _ => {}
    }
}

/// Builds geometries for one spatial reference system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryFactory {
    srid: i32,
    precision: PrecisionModel,
}

impl GeometryFactory {
    pub(crate) fn new(srid: i32, precision: PrecisionModel) -> Self {
        Self { srid, precision }
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn precision_model(&self) -> PrecisionModel {
        self.precision
    }

    /// Create a point with this factory's SRID and precision.
    pub fn create_point(&self, x: f64, y: f64) -> SpatialValue {
        let point = Point::new(
            self.precision.make_precise(x),
            self.precision.make_precise(y),
        );
        SpatialValue::new(Geometry::Point(point), self.srid)
    }

    /// Wrap an existing geometry, applying this factory's precision model.
    pub fn create_geometry(&self, mut geometry: Geometry<f64>) -> SpatialValue {
        self.precision.apply(&mut geometry);
        SpatialValue::new(geometry, self.srid)
    }
}

/// A geometry value tagged with its spatial reference identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialValue {
    pub geometry: Geometry<f64>,
    pub srid: i32,
}

impl SpatialValue {
    pub fn new(geometry: Geometry<f64>, srid: i32) -> Self {
        Self { geometry, srid }
    }

    pub fn kind(&self) -> GeometryKind {
        GeometryKind::of_geometry(&self.geometry)
    }

    /// Narrow the value to a concrete geometry type.
    pub fn into_typed<G: SpatialType>(self) -> Result<G> {
        let actual = self.kind();
        G::from_geometry(self.geometry).ok_or_else(|| MappingError::GeometryKindMismatch {
            expected: G::KIND.name().to_string(),
            actual: actual.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, polygon};

    #[test]
    fn test_fixed_precision_rounds_to_grid() {
        let model = PrecisionModel::fixed(100.0).unwrap();
        assert_eq!(model.make_precise(1.23456), 1.23);
        assert_eq!(model.make_precise(-0.005), -0.01);
    }

    #[test]
    fn test_fixed_precision_rejects_bad_scale() {
        assert!(PrecisionModel::fixed(0.0).is_err());
        assert!(PrecisionModel::fixed(-10.0).is_err());
        assert!(PrecisionModel::fixed(f64::NAN).is_err());
        assert!(PrecisionModel::fixed(1.0e308).is_err());
        assert!(PrecisionModel::fixed(MAX_FIXED_SCALE).is_ok());
    }

    #[test]
    fn test_fixed_precision_keeps_ordinates_off_the_grid() {
        let model = PrecisionModel::fixed(MAX_FIXED_SCALE).unwrap();
        assert_eq!(model.make_precise(f64::MAX), f64::MAX);
        assert_eq!(model.make_precise(-f64::MAX), -f64::MAX);
        assert_eq!(model.make_precise(12.5), 12.5);
    }

    #[test]
    fn test_apply_rounds_triangle_vertices() {
        let model = PrecisionModel::fixed(1.0).unwrap();
        let mut geom = Geometry::Triangle(Triangle::new(
            Coord { x: 0.2, y: 0.0 },
            Coord { x: 2.7, y: 0.4 },
            Coord { x: 1.0, y: 1.6 },
        ));
        model.apply(&mut geom);

        let Geometry::Triangle(triangle) = geom else {
            panic!("expected triangle");
        };
        assert_eq!(triangle.v1(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(triangle.v2(), Coord { x: 3.0, y: 0.0 });
        assert_eq!(triangle.v3(), Coord { x: 1.0, y: 2.0 });
    }

    #[test]
    fn test_floating_single_precision() {
        let model = PrecisionModel::floating_single();
        assert_eq!(model.make_precise(0.1), 0.1f32 as f64);
        assert_eq!(PrecisionModel::floating().make_precise(0.1), 0.1);
    }

    #[test]
    fn test_apply_rounds_polygon_rings() {
        let model = PrecisionModel::fixed(10.0).unwrap();
        let mut geom = Geometry::Polygon(polygon![
            (x: 0.04, y: 0.0),
            (x: 1.06, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.04, y: 0.0),
        ]);
        model.apply(&mut geom);

        let Geometry::Polygon(poly) = geom else {
            panic!("expected polygon");
        };
        assert_eq!(poly.exterior().0[0].x, 0.0);
        assert_eq!(poly.exterior().0[1].x, 1.1);
    }

    #[test]
    fn test_factory_create_point() {
        let factory = GeometryFactory::new(4326, PrecisionModel::fixed(1000.0).unwrap());
        let value = factory.create_point(12.34567, -1.0001);
        assert_eq!(value.srid, 4326);
        assert_eq!(value.kind(), GeometryKind::Point);

        let point: Point<f64> = value.into_typed().unwrap();
        assert_eq!(point.x(), 12.346);
        assert_eq!(point.y(), -1.0);
    }

    #[test]
    fn test_into_typed_mismatch() {
        let factory = GeometryFactory::new(0, PrecisionModel::floating());
        let value = factory.create_geometry(Geometry::LineString(line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ]));

        let err = value.into_typed::<Point<f64>>().unwrap_err();
        assert!(matches!(
            err,
            MappingError::GeometryKindMismatch { ref expected, ref actual }
                if expected == "Point" && actual == "LineString"
        ));
    }
}
