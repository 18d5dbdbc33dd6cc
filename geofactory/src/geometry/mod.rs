//! Geometry values created by a [`Factory`].
//!
//! All geometry types keep a reference to the factory that created them (see [`Geometry::factory`]). The factory
//! reference never changes after construction. Two geometries compare equal if their factories are
//! [`equivalent`](Factory::equivalent) and their coordinates are the same.

use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;
use crate::factory::Factory;
use crate::ConstructResult;

mod collection;
mod line_string;
mod point;
mod polygon;

pub use collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
pub use line_string::{Line, LineString, LinearRing};
pub use point::Point;
pub use polygon::Polygon;

/// Coordinate of a point. For geographic factories `x` is longitude and `y` is latitude, both in degrees.
pub type Point2d = nalgebra::Point2<f64>;

/// Kind of a geometry value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    /// See [`Point`].
    Point,
    /// See [`LineString`].
    LineString,
    /// See [`Line`].
    Line,
    /// See [`LinearRing`].
    LinearRing,
    /// See [`Polygon`].
    Polygon,
    /// See [`GeometryCollection`].
    GeometryCollection,
    /// See [`MultiPoint`].
    MultiPoint,
    /// See [`MultiLineString`].
    MultiLineString,
    /// See [`MultiPolygon`].
    MultiPolygon,
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Line => "Line",
            GeometryType::LinearRing => "LinearRing",
            GeometryType::Polygon => "Polygon",
            GeometryType::GeometryCollection => "GeometryCollection",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
        };
        f.write_str(name)
    }
}

/// Geometry value of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Point.
    Point(Point),
    /// Line string.
    LineString(LineString),
    /// Line.
    Line(Line),
    /// Linear ring.
    LinearRing(LinearRing),
    /// Polygon.
    Polygon(Polygon),
    /// Geometry collection.
    GeometryCollection(GeometryCollection),
    /// Multi point.
    MultiPoint(MultiPoint),
    /// Multi line string.
    MultiLineString(MultiLineString),
    /// Multi polygon.
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    /// Factory that created this geometry.
    pub fn factory(&self) -> &Arc<Factory> {
        match self {
            Geometry::Point(v) => v.factory(),
            Geometry::LineString(v) => v.factory(),
            Geometry::Line(v) => v.factory(),
            Geometry::LinearRing(v) => v.factory(),
            Geometry::Polygon(v) => v.factory(),
            Geometry::GeometryCollection(v) => v.factory(),
            Geometry::MultiPoint(v) => v.factory(),
            Geometry::MultiLineString(v) => v.factory(),
            Geometry::MultiPolygon(v) => v.factory(),
        }
    }

    /// Kind of the geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Line(_) => GeometryType::Line,
            Geometry::LinearRing(_) => GeometryType::LinearRing,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
        }
    }

    /// Whether the geometry contains no points.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(v) => v.is_empty(),
            Geometry::Line(_) => false,
            Geometry::LinearRing(v) => v.is_empty(),
            Geometry::Polygon(v) => v.is_empty(),
            Geometry::GeometryCollection(v) => v.iter().all(Geometry::is_empty),
            Geometry::MultiPoint(v) => v.is_empty(),
            Geometry::MultiLineString(v) => v.iter().all(LineString::is_empty),
            Geometry::MultiPolygon(v) => v.iter().all(Polygon::is_empty),
        }
    }

    /// Returns the point if the geometry is a [`Point`].
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Geometry::Point(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the polygon if the geometry is a [`Polygon`].
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Geometry::Polygon(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn rehomed(self, factory: &Arc<Factory>) -> ConstructResult<Self> {
        Ok(match self {
            Geometry::Point(v) => Geometry::Point(v.rehomed(factory)?),
            Geometry::LineString(v) => Geometry::LineString(v.rehomed(factory)?),
            Geometry::Line(v) => Geometry::Line(v.rehomed(factory)?),
            Geometry::LinearRing(v) => Geometry::LinearRing(v.rehomed(factory)?),
            Geometry::Polygon(v) => Geometry::Polygon(v.rehomed(factory)?),
            Geometry::GeometryCollection(v) => Geometry::GeometryCollection(v.rehomed(factory)?),
            Geometry::MultiPoint(v) => Geometry::MultiPoint(v.rehomed(factory)?),
            Geometry::MultiLineString(v) => Geometry::MultiLineString(v.rehomed(factory)?),
            Geometry::MultiPolygon(v) => Geometry::MultiPolygon(v.rehomed(factory)?),
        })
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    Point,
    LineString,
    Line,
    LinearRing,
    Polygon,
    GeometryCollection,
    MultiPoint,
    MultiLineString,
    MultiPolygon
);

/// Back-reference from a geometry to its factory.
///
/// Comparison uses factory equivalence, so geometries from two equally configured factories can be equal.
#[derive(Clone)]
pub(crate) struct FactoryRef(Arc<Factory>);

impl FactoryRef {
    pub(crate) fn new(factory: &Arc<Factory>) -> Self {
        Self(factory.clone())
    }

    pub(crate) fn get(&self) -> &Arc<Factory> {
        &self.0
    }

    /// Checks that a child geometry can be owned by `factory` and returns the reference to
    /// `factory`.
    pub(crate) fn adopt(
        &self,
        factory: &Arc<Factory>,
        variant: GeometryType,
    ) -> ConstructResult<Self> {
        if Arc::ptr_eq(&self.0, factory) || self.0.equivalent(factory) {
            Ok(Self::new(factory))
        } else {
            Err(ConstructionError::ForeignFactory { variant })
        }
    }
}

impl PartialEq for FactoryRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.equivalent(&other.0)
    }
}

impl Debug for FactoryRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}
