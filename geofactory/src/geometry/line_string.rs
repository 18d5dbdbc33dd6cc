use std::sync::Arc;

use super::{FactoryRef, GeometryType, Point, Point2d};
use crate::error::ConstructionError;
use crate::factory::Factory;
use crate::ConstructResult;

/// Sequence of points connected by straight segments.
///
/// A line string is either empty or has at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    factory: FactoryRef,
    points: Vec<Point2d>,
}

impl LineString {
    /// Factory that created the line string.
    pub fn factory(&self) -> &Arc<Factory> {
        self.factory.get()
    }

    /// Coordinates of the points.
    pub fn coords(&self) -> &[Point2d] {
        &self.points
    }

    /// Number of points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Point with the given index.
    pub fn point_n(&self, index: usize) -> Option<Point> {
        self.points
            .get(index)
            .map(|coord| Point::from_coord(self.factory(), *coord))
    }

    /// Iterates over the points.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .iter()
            .map(|coord| Point::from_coord(self.factory(), *coord))
    }

    /// Whether the line string has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the first and the last points are the same.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }

    pub(crate) fn rehomed(self, factory: &Arc<Factory>) -> ConstructResult<Self> {
        Ok(Self {
            factory: self.factory.adopt(factory, GeometryType::LineString)?,
            points: self.points,
        })
    }

    pub(crate) fn build(factory: &Arc<Factory>, points: &[Point]) -> ConstructResult<Self> {
        let points = collect_coords(factory, points)?;
        if points.len() == 1 {
            return Err(ConstructionError::InvalidShape {
                variant: GeometryType::LineString,
                reason: "a non-empty line string must have at least two points",
            });
        }

        Ok(Self {
            factory: FactoryRef::new(factory),
            points,
        })
    }
}

/// Line string with exactly two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    line_string: LineString,
}

impl Line {
    /// Factory that created the line.
    pub fn factory(&self) -> &Arc<Factory> {
        self.line_string.factory()
    }

    /// Start point.
    pub fn start(&self) -> Point {
        Point::from_coord(self.factory(), self.line_string.points[0])
    }

    /// End point.
    pub fn end(&self) -> Point {
        Point::from_coord(self.factory(), self.line_string.points[1])
    }

    /// The line as a general line string.
    pub fn as_line_string(&self) -> &LineString {
        &self.line_string
    }

    pub(crate) fn rehomed(self, factory: &Arc<Factory>) -> ConstructResult<Self> {
        Ok(Self {
            line_string: LineString {
                factory: self.line_string.factory.adopt(factory, GeometryType::Line)?,
                points: self.line_string.points,
            },
        })
    }

    pub(crate) fn build(
        factory: &Arc<Factory>,
        start: &Point,
        end: &Point,
    ) -> ConstructResult<Self> {
        let points = collect_coords(factory, &[start.clone(), end.clone()])?;
        Ok(Self {
            line_string: LineString {
                factory: FactoryRef::new(factory),
                points,
            },
        })
    }
}

impl From<Line> for LineString {
    fn from(value: Line) -> Self {
        value.line_string
    }
}

/// Closed line string used as a polygon boundary.
///
/// A linear ring is either empty or has at least four points, the last one being the same as the
/// first. Not counting the closing point, at least three of them are distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    line_string: LineString,
}

impl LinearRing {
    /// Factory that created the ring.
    pub fn factory(&self) -> &Arc<Factory> {
        self.line_string.factory()
    }

    /// Coordinates of the ring, including the closing point.
    pub fn coords(&self) -> &[Point2d] {
        self.line_string.coords()
    }

    /// Number of points, including the closing point.
    pub fn num_points(&self) -> usize {
        self.line_string.num_points()
    }

    /// Iterates over the points, including the closing point.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.line_string.points()
    }

    /// Whether the ring has no points.
    pub fn is_empty(&self) -> bool {
        self.line_string.is_empty()
    }

    /// The ring as a general line string.
    pub fn as_line_string(&self) -> &LineString {
        &self.line_string
    }

    pub(crate) fn rehomed(self, factory: &Arc<Factory>) -> ConstructResult<Self> {
        Ok(Self {
            line_string: LineString {
                factory: self
                    .line_string
                    .factory
                    .adopt(factory, GeometryType::LinearRing)?,
                points: self.line_string.points,
            },
        })
    }

    /// Ring constructor. If the factory uses lenient assertions, an open ring is closed by repeating
    /// its first point.
    pub(crate) fn build(factory: &Arc<Factory>, points: &[Point]) -> ConstructResult<Self> {
        let mut points = collect_coords(factory, points)?;

        if !points.is_empty() {
            let is_closed = points.first() == points.last();
            if !is_closed {
                if !factory.options().lenient_assertions {
                    return Err(ConstructionError::InvalidShape {
                        variant: GeometryType::LinearRing,
                        reason: "the first and the last points of a ring must be the same",
                    });
                }

                points.push(points[0]);
            }

            if points.len() < 4 || distinct_count(&points[..points.len() - 1]) < 3 {
                return Err(ConstructionError::InvalidShape {
                    variant: GeometryType::LinearRing,
                    reason: "a ring must have at least three distinct points",
                });
            }
        }

        Ok(Self {
            line_string: LineString {
                factory: FactoryRef::new(factory),
                points,
            },
        })
    }
}

impl From<LinearRing> for LineString {
    fn from(value: LinearRing) -> Self {
        value.line_string
    }
}

fn distinct_count(coords: &[Point2d]) -> usize {
    let mut distinct: Vec<&Point2d> = Vec::with_capacity(coords.len());
    for coord in coords {
        if !distinct.contains(&coord) {
            distinct.push(coord);
        }
    }
    distinct.len()
}

fn collect_coords(factory: &Arc<Factory>, points: &[Point]) -> ConstructResult<Vec<Point2d>> {
    points
        .iter()
        .map(|p| {
            if Arc::ptr_eq(p.factory(), factory) || p.factory().equivalent(factory) {
                Ok(p.coord())
            } else {
                Err(ConstructionError::ForeignFactory {
                    variant: GeometryType::Point,
                })
            }
        })
        .collect()
}
