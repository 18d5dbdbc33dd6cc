use std::sync::Arc;

use geozero::error::{GeozeroError, Result as GeozeroResult};
use geozero::GeomProcessor;

use crate::error::{ConstructionError, ParseError};
use crate::factory::Factory;
use crate::geometry::{Geometry, LineString, LinearRing, Point, Point2d, Polygon};
use crate::ConstructResult;

/// Partially read geometry.
enum Frame {
    Point(Option<Point2d>),
    LineString { tagged: bool, coords: Vec<Point2d> },
    Polygon { tagged: bool, rings: Vec<LinearRing> },
    MultiPoint(Vec<Point>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
    Collection(Vec<Geometry>),
}

/// Geozero processor that assembles the stream of geometry events into geometry values of one factory.
pub(crate) struct GeometryBuilder<'a> {
    factory: &'a Arc<Factory>,
    stack: Vec<Frame>,
    result: Option<Geometry>,
    error: Option<ConstructionError>,
}

impl<'a> GeometryBuilder<'a> {
    pub(crate) fn new(factory: &'a Arc<Factory>) -> Self {
        Self {
            factory,
            stack: vec![],
            result: None,
            error: None,
        }
    }

    /// Converts the outcome of the geozero reader into the parsed geometry.
    pub(crate) fn finish(self, outcome: GeozeroResult<()>) -> Result<Geometry, ParseError> {
        if let Some(error) = self.error {
            return Err(error.into());
        }

        outcome?;
        self.result.ok_or(ParseError::Empty)
    }

    fn check<T>(&mut self, result: ConstructResult<T>) -> GeozeroResult<T> {
        result.map_err(|err| {
            let message = err.to_string();
            self.error = Some(err);
            GeozeroError::Geometry(message)
        })
    }

    fn unsupported<T>(&mut self, what: &str) -> GeozeroResult<T> {
        self.check(Err(ConstructionError::Unsupported(what.to_string())))
    }

    fn pop(&mut self) -> GeozeroResult<Frame> {
        match self.stack.pop() {
            Some(frame) => Ok(frame),
            None => Err(GeozeroError::Geometry(
                "geometry end without a matching begin".to_string(),
            )),
        }
    }

    fn points(&mut self, coords: &[Point2d]) -> GeozeroResult<Vec<Point>> {
        let points = coords
            .iter()
            .map(|c| self.factory.point(c.x, c.y))
            .collect();
        self.check(points)
    }

    /// Hands a finished geometry to the enclosing collection, or stores it as the result.
    fn deliver(&mut self, geometry: Geometry) -> GeozeroResult<()> {
        let Some(frame) = self.stack.last_mut() else {
            self.result = Some(geometry);
            return Ok(());
        };

        let rejected = match (frame, geometry) {
            (Frame::Collection(members), geometry) => {
                members.push(geometry);
                return Ok(());
            }
            (Frame::MultiPoint(points), Geometry::Point(point)) => {
                points.push(point);
                return Ok(());
            }
            (Frame::MultiLineString(lines), Geometry::LineString(line)) => {
                lines.push(line);
                return Ok(());
            }
            (Frame::MultiPolygon(polygons), Geometry::Polygon(polygon)) => {
                polygons.push(polygon);
                return Ok(());
            }
            (_, geometry) => geometry,
        };

        let what = format!("{} inside of a non-collection geometry", rejected.geometry_type());
        self.unsupported(&what)
    }
}

impl GeomProcessor for GeometryBuilder<'_> {
    fn xy(&mut self, x: f64, y: f64, _idx: usize) -> GeozeroResult<()> {
        match self.stack.last_mut() {
            Some(Frame::Point(coord)) => {
                *coord = Some(Point2d::new(x, y));
                Ok(())
            }
            Some(Frame::LineString { coords, .. }) => {
                coords.push(Point2d::new(x, y));
                Ok(())
            }
            Some(Frame::MultiPoint(_)) => {
                let point = self.factory.point(x, y);
                let point = self.check(point)?;
                if let Some(Frame::MultiPoint(points)) = self.stack.last_mut() {
                    points.push(point);
                }
                Ok(())
            }
            _ => self.unsupported("coordinate outside of a point or a curve"),
        }
    }

    fn empty_point(&mut self, _idx: usize) -> GeozeroResult<()> {
        self.unsupported("empty point")
    }

    fn point_begin(&mut self, _idx: usize) -> GeozeroResult<()> {
        self.stack.push(Frame::Point(None));
        Ok(())
    }

    fn point_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let Frame::Point(coord) = self.pop()? else {
            return Err(GeozeroError::Geometry("unexpected point end".to_string()));
        };
        let Some(coord) = coord else {
            return self.unsupported("empty point");
        };

        let point = self.factory.point(coord.x, coord.y);
        let point = self.check(point)?;
        self.deliver(point.into())
    }

    fn multipoint_begin(&mut self, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.stack.push(Frame::MultiPoint(Vec::with_capacity(size)));
        Ok(())
    }

    fn multipoint_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let Frame::MultiPoint(points) = self.pop()? else {
            return Err(GeozeroError::Geometry("unexpected multipoint end".to_string()));
        };

        let multi_point = self.factory.multi_point(points);
        let multi_point = self.check(multi_point)?;
        self.deliver(multi_point.into())
    }

    fn linestring_begin(&mut self, tagged: bool, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.stack.push(Frame::LineString {
            tagged,
            coords: Vec::with_capacity(size),
        });
        Ok(())
    }

    fn linestring_end(&mut self, _tagged: bool, _idx: usize) -> GeozeroResult<()> {
        let Frame::LineString { tagged, coords } = self.pop()? else {
            return Err(GeozeroError::Geometry("unexpected linestring end".to_string()));
        };
        let points = self.points(&coords)?;

        if tagged {
            let line_string = self.factory.line_string(&points);
            let line_string = self.check(line_string)?;
            return self.deliver(line_string.into());
        }

        match self.stack.last() {
            Some(Frame::Polygon { .. }) => {
                let ring = self.factory.linear_ring(&points);
                let ring = self.check(ring)?;
                if let Some(Frame::Polygon { rings, .. }) = self.stack.last_mut() {
                    rings.push(ring);
                }
                Ok(())
            }
            Some(Frame::MultiLineString(_)) => {
                let line_string = self.factory.line_string(&points);
                let line_string = self.check(line_string)?;
                self.deliver(line_string.into())
            }
            _ => self.unsupported("curve outside of a polygon or a multi line string"),
        }
    }

    fn multilinestring_begin(&mut self, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.stack
            .push(Frame::MultiLineString(Vec::with_capacity(size)));
        Ok(())
    }

    fn multilinestring_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let Frame::MultiLineString(lines) = self.pop()? else {
            return Err(GeozeroError::Geometry(
                "unexpected multilinestring end".to_string(),
            ));
        };

        let multi_line_string = self.factory.multi_line_string(lines);
        let multi_line_string = self.check(multi_line_string)?;
        self.deliver(multi_line_string.into())
    }

    fn polygon_begin(&mut self, tagged: bool, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.stack.push(Frame::Polygon {
            tagged,
            rings: Vec::with_capacity(size),
        });
        Ok(())
    }

    fn polygon_end(&mut self, _tagged: bool, _idx: usize) -> GeozeroResult<()> {
        let Frame::Polygon { tagged, rings } = self.pop()? else {
            return Err(GeozeroError::Geometry("unexpected polygon end".to_string()));
        };

        let mut rings = rings.into_iter();
        let exterior = match rings.next() {
            Some(ring) => ring,
            None => {
                let ring = self.factory.linear_ring(&[]);
                self.check(ring)?
            }
        };
        let polygon = self.factory.polygon(exterior, rings.collect());
        let polygon = self.check(polygon)?;

        if !tagged && !matches!(self.stack.last(), Some(Frame::MultiPolygon(_))) {
            return self.unsupported("surface outside of a multi polygon");
        }

        self.deliver(polygon.into())
    }

    fn multipolygon_begin(&mut self, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.stack.push(Frame::MultiPolygon(Vec::with_capacity(size)));
        Ok(())
    }

    fn multipolygon_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let Frame::MultiPolygon(polygons) = self.pop()? else {
            return Err(GeozeroError::Geometry(
                "unexpected multipolygon end".to_string(),
            ));
        };

        let multi_polygon = self.factory.multi_polygon(polygons);
        let multi_polygon = self.check(multi_polygon)?;
        self.deliver(multi_polygon.into())
    }

    fn geometrycollection_begin(&mut self, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.stack.push(Frame::Collection(Vec::with_capacity(size)));
        Ok(())
    }

    fn geometrycollection_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let Frame::Collection(members) = self.pop()? else {
            return Err(GeozeroError::Geometry(
                "unexpected geometry collection end".to_string(),
            ));
        };

        let collection = self.factory.collection(members);
        let collection = self.check(collection)?;
        self.deliver(collection.into())
    }
}
