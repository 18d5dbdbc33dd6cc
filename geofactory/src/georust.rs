//! Conversions between geometries of a factory and [`geo_types`] geometries.

use std::sync::Arc;

use geo_types::coord;

use crate::factory::Factory;
use crate::geometry::{
    Geometry, GeometryCollection, Line, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Point2d, Polygon,
};
use crate::ConstructResult;

fn to_coord(point: &Point2d) -> geo_types::Coord<f64> {
    coord!(x: point.x, y: point.y)
}

fn to_line_string(coords: &[Point2d]) -> geo_types::LineString<f64> {
    geo_types::LineString::new(coords.iter().map(to_coord).collect())
}

impl From<&Point> for geo_types::Point<f64> {
    fn from(value: &Point) -> Self {
        geo_types::Point(to_coord(&value.coord()))
    }
}

impl From<&LineString> for geo_types::LineString<f64> {
    fn from(value: &LineString) -> Self {
        to_line_string(value.coords())
    }
}

impl From<&Line> for geo_types::Line<f64> {
    fn from(value: &Line) -> Self {
        geo_types::Line::new(to_coord(&value.start().coord()), to_coord(&value.end().coord()))
    }
}

impl From<&LinearRing> for geo_types::LineString<f64> {
    fn from(value: &LinearRing) -> Self {
        to_line_string(value.coords())
    }
}

impl From<&Polygon> for geo_types::Polygon<f64> {
    fn from(value: &Polygon) -> Self {
        geo_types::Polygon::new(
            value.exterior_ring().into(),
            value.interior_rings().iter().map(Into::into).collect(),
        )
    }
}

impl From<&MultiPoint> for geo_types::MultiPoint<f64> {
    fn from(value: &MultiPoint) -> Self {
        geo_types::MultiPoint(value.iter().map(Into::into).collect())
    }
}

impl From<&MultiLineString> for geo_types::MultiLineString<f64> {
    fn from(value: &MultiLineString) -> Self {
        geo_types::MultiLineString(value.iter().map(Into::into).collect())
    }
}

impl From<&MultiPolygon> for geo_types::MultiPolygon<f64> {
    fn from(value: &MultiPolygon) -> Self {
        geo_types::MultiPolygon(value.iter().map(Into::into).collect())
    }
}

impl From<&GeometryCollection> for geo_types::GeometryCollection<f64> {
    fn from(value: &GeometryCollection) -> Self {
        geo_types::GeometryCollection(value.iter().map(Into::into).collect())
    }
}

impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(value: &Geometry) -> Self {
        match value {
            Geometry::Point(v) => geo_types::Geometry::Point(v.into()),
            Geometry::LineString(v) => geo_types::Geometry::LineString(v.into()),
            Geometry::Line(v) => geo_types::Geometry::Line(v.into()),
            Geometry::LinearRing(v) => geo_types::Geometry::LineString(v.into()),
            Geometry::Polygon(v) => geo_types::Geometry::Polygon(v.into()),
            Geometry::GeometryCollection(v) => geo_types::Geometry::GeometryCollection(v.into()),
            Geometry::MultiPoint(v) => geo_types::Geometry::MultiPoint(v.into()),
            Geometry::MultiLineString(v) => geo_types::Geometry::MultiLineString(v.into()),
            Geometry::MultiPolygon(v) => geo_types::Geometry::MultiPolygon(v.into()),
        }
    }
}

impl Factory {
    /// Constructs a geometry of this factory from a [`geo_types`] geometry.
    ///
    /// `Rect` and `Triangle` are converted into polygons.
    pub fn from_geo_types(
        self: &Arc<Self>,
        geometry: &geo_types::Geometry<f64>,
    ) -> ConstructResult<Geometry> {
        Ok(match geometry {
            geo_types::Geometry::Point(v) => self.point(v.x(), v.y())?.into(),
            geo_types::Geometry::Line(v) => self
                .line(
                    &self.point(v.start.x, v.start.y)?,
                    &self.point(v.end.x, v.end.y)?,
                )?
                .into(),
            geo_types::Geometry::LineString(v) => self.line_string(&self.points(v)?)?.into(),
            geo_types::Geometry::Polygon(v) => self.polygon_from_geo_types(v)?.into(),
            geo_types::Geometry::MultiPoint(v) => self
                .multi_point(
                    v.iter()
                        .map(|p| self.point(p.x(), p.y()))
                        .collect::<ConstructResult<_>>()?,
                )?
                .into(),
            geo_types::Geometry::MultiLineString(v) => self
                .multi_line_string(
                    v.iter()
                        .map(|line| self.line_string(&self.points(line)?))
                        .collect::<ConstructResult<_>>()?,
                )?
                .into(),
            geo_types::Geometry::MultiPolygon(v) => self
                .multi_polygon(
                    v.iter()
                        .map(|polygon| self.polygon_from_geo_types(polygon))
                        .collect::<ConstructResult<_>>()?,
                )?
                .into(),
            geo_types::Geometry::GeometryCollection(v) => self
                .collection(
                    v.iter()
                        .map(|member| self.from_geo_types(member))
                        .collect::<ConstructResult<_>>()?,
                )?
                .into(),
            geo_types::Geometry::Rect(v) => self.polygon_from_geo_types(&v.to_polygon())?.into(),
            geo_types::Geometry::Triangle(v) => {
                self.polygon_from_geo_types(&v.to_polygon())?.into()
            }
        })
    }

    fn points(self: &Arc<Self>, line: &geo_types::LineString<f64>) -> ConstructResult<Vec<Point>> {
        line.coords().map(|c| self.point(c.x, c.y)).collect()
    }

    fn polygon_from_geo_types(
        self: &Arc<Self>,
        polygon: &geo_types::Polygon<f64>,
    ) -> ConstructResult<Polygon> {
        let exterior = self.linear_ring(&self.points(polygon.exterior())?)?;
        let interiors = polygon
            .interiors()
            .iter()
            .map(|ring| self.linear_ring(&self.points(ring)?))
            .collect::<ConstructResult<_>>()?;

        self.polygon(exterior, interiors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstructionError;
    use crate::factory::{FactoryBuilder, Namespace};
    use assert_matches::assert_matches;
    use geo_types::{line_string, point, polygon, Rect};

    fn factory() -> Arc<Factory> {
        FactoryBuilder::new(Namespace::Cartesian)
            .build()
            .expect("valid configuration")
    }

    #[test]
    fn point_to_geo_types() {
        let factory = factory();
        let point = Geometry::from(factory.point(1.0, 2.0).expect("point"));

        assert_eq!(
            geo_types::Geometry::from(&point),
            geo_types::Geometry::Point(point!(x: 1.0, y: 2.0))
        );
    }

    #[test]
    fn polygon_from_geo_types() {
        let factory = factory();
        let source = geo_types::Geometry::Polygon(polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
            interiors: [[(x: 2.0, y: 2.0), (x: 3.0, y: 2.0), (x: 3.0, y: 3.0)]],
        ));

        let geometry = factory.from_geo_types(&source).expect("valid polygon");
        let polygon = geometry.as_polygon().expect("polygon");
        assert!(Arc::ptr_eq(polygon.factory(), &factory));
        assert_eq!(polygon.exterior_ring().num_points(), 5);
        assert_eq!(polygon.interior_rings()[0].num_points(), 4);

        assert_eq!(geo_types::Geometry::from(&geometry), source);
    }

    #[test]
    fn rect_becomes_polygon() {
        let factory = factory();
        let rect = geo_types::Geometry::Rect(Rect::new((0.0, 0.0), (2.0, 1.0)));

        let geometry = factory.from_geo_types(&rect).expect("valid rect");
        assert_eq!(
            geometry
                .as_polygon()
                .expect("polygon")
                .exterior_ring()
                .num_points(),
            5
        );
    }

    #[test]
    fn invalid_geo_types_geometry() {
        let factory = factory();
        let single_point = geo_types::Geometry::LineString(line_string![(x: 1.0, y: 1.0)]);

        assert_matches!(
            factory.from_geo_types(&single_point),
            Err(ConstructionError::InvalidShape { .. })
        );
    }

    #[test]
    fn collection_round_trip() {
        let factory = factory();
        let source = geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection(vec![
            geo_types::Geometry::Point(point!(x: 5.0, y: 5.0)),
            geo_types::Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]),
        ]));

        let geometry = factory.from_geo_types(&source).expect("valid collection");
        assert_eq!(geo_types::Geometry::from(&geometry), source);
    }
}
