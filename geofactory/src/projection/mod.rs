//! Projections between the geographic space of a factory and its planar projection space.

use std::sync::Arc;

use crate::error::GeoFactoryError;
use crate::factory::Factory;
use crate::geometry::{Geometry, LineString, LinearRing, Point, Point2d, Polygon};
use crate::rect::Rect;

#[cfg(feature = "geodesy")]
mod geodesy;
mod mercator;

#[cfg(feature = "geodesy")]
pub use geodesy::GeodesyProjector;
pub use mercator::MercatorProjector;

/// Coordinate mapping between the space of a factory and the space of its projection factory.
///
/// Projectors work on single coordinates. The factory takes care of rebuilding whole geometries.
pub trait Projector: Send + Sync {
    /// Factory of the projected space. All projected geometries are owned by it.
    fn projection_factory(&self) -> &Arc<Factory>;
    /// Projects a `(lon, lat)` coordinate. Returns `None` if the coordinate cannot be projected.
    fn project_coord(&self, coord: Point2d) -> Option<Point2d>;
    /// Inverse of [`Projector::project_coord`].
    fn unproject_coord(&self, coord: Point2d) -> Option<Point2d>;
    /// Whether the X axis of the projected space wraps around.
    fn wraps(&self) -> bool;
    /// Domain of the projection in the projected space.
    fn limits_window(&self) -> Option<ProjectedWindow>;
}

/// Rectangular domain of a projection, in the coordinates of the projection factory.
#[derive(Debug, Clone)]
pub struct ProjectedWindow {
    factory: Arc<Factory>,
    rect: Rect,
}

impl ProjectedWindow {
    /// Creates a window in the space of `factory`.
    pub fn new(factory: &Arc<Factory>, rect: Rect) -> Self {
        Self {
            factory: factory.clone(),
            rect,
        }
    }

    /// Factory of the projected space.
    pub fn factory(&self) -> &Arc<Factory> {
        &self.factory
    }

    /// Bounds of the window.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Minimum X value.
    pub fn x_min(&self) -> f64 {
        self.rect.x_min()
    }

    /// Maximum X value.
    pub fn x_max(&self) -> f64 {
        self.rect.x_max()
    }

    /// Minimum Y value.
    pub fn y_min(&self) -> f64 {
        self.rect.y_min()
    }

    /// Maximum Y value.
    pub fn y_max(&self) -> f64 {
        self.rect.y_max()
    }

    /// Width of the window.
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Height of the window.
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Center point of the window, owned by the projection factory.
    pub fn center(&self) -> Point {
        Point::from_coord(&self.factory, self.rect.center())
    }

    /// Whether the point belongs to the projection factory and lies inside the window.
    pub fn contains_point(&self, point: &Point) -> bool {
        Arc::ptr_eq(point.factory(), &self.factory) && self.rect.contains(&point.coord())
    }
}

impl PartialEq for ProjectedWindow {
    fn eq(&self, other: &Self) -> bool {
        self.factory.equivalent(&other.factory) && self.rect == other.rect
    }
}

type CoordMap<'a> = &'a dyn Fn(Point2d) -> Option<Point2d>;

/// Rebuilds `geometry` in the space of `target`, mapping every coordinate with `map`.
///
/// The structure of the geometry (nesting, ring order and point order) is preserved.
pub(crate) fn reproject(
    geometry: &Geometry,
    target: &Arc<Factory>,
    map: CoordMap,
) -> Result<Geometry, GeoFactoryError> {
    Ok(match geometry {
        Geometry::Point(v) => map_point(v.coord(), target, map)?.into(),
        Geometry::LineString(v) => target
            .line_string(&map_points(v.coords(), target, map)?)?
            .into(),
        Geometry::Line(v) => target
            .line(
                &map_point(v.start().coord(), target, map)?,
                &map_point(v.end().coord(), target, map)?,
            )?
            .into(),
        Geometry::LinearRing(v) => map_ring(v, target, map)?.into(),
        Geometry::Polygon(v) => reproject_polygon(v, target, map)?.into(),
        Geometry::GeometryCollection(v) => target
            .collection(
                v.iter()
                    .map(|member| reproject(member, target, map))
                    .collect::<Result<_, _>>()?,
            )?
            .into(),
        Geometry::MultiPoint(v) => target
            .multi_point(
                v.coords()
                    .map(|coord| map_point(coord, target, map))
                    .collect::<Result<_, _>>()?,
            )?
            .into(),
        Geometry::MultiLineString(v) => target
            .multi_line_string(
                v.iter()
                    .map(|line| -> Result<LineString, GeoFactoryError> {
                        Ok(target.line_string(&map_points(line.coords(), target, map)?)?)
                    })
                    .collect::<Result<_, _>>()?,
            )?
            .into(),
        Geometry::MultiPolygon(v) => target
            .multi_polygon(
                v.iter()
                    .map(|polygon| reproject_polygon(polygon, target, map))
                    .collect::<Result<_, _>>()?,
            )?
            .into(),
    })
}

fn reproject_polygon(
    polygon: &Polygon,
    target: &Arc<Factory>,
    map: CoordMap,
) -> Result<Polygon, GeoFactoryError> {
    let exterior = map_ring(polygon.exterior_ring(), target, map)?;
    let interiors = polygon
        .interior_rings()
        .iter()
        .map(|ring| map_ring(ring, target, map))
        .collect::<Result<_, _>>()?;
    Ok(target.polygon(exterior, interiors)?)
}

fn map_ring(
    ring: &LinearRing,
    target: &Arc<Factory>,
    map: CoordMap,
) -> Result<LinearRing, GeoFactoryError> {
    Ok(target.linear_ring(&map_points(ring.coords(), target, map)?)?)
}

fn map_point(
    coord: Point2d,
    target: &Arc<Factory>,
    map: CoordMap,
) -> Result<Point, GeoFactoryError> {
    let mapped = map(coord).ok_or(GeoFactoryError::Projection {
        x: coord.x,
        y: coord.y,
    })?;
    Ok(target.point(mapped.x, mapped.y)?)
}

fn map_points(
    coords: &[Point2d],
    target: &Arc<Factory>,
    map: CoordMap,
) -> Result<Vec<Point>, GeoFactoryError> {
    coords.iter().map(|coord| map_point(*coord, target, map)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{FactoryBuilder, Namespace};
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn cartesian() -> Arc<Factory> {
        FactoryBuilder::new(Namespace::Cartesian)
            .build()
            .expect("valid configuration")
    }

    #[test]
    fn window_contains_only_own_points() {
        let factory = cartesian();
        let window = ProjectedWindow::new(&factory, Rect::new(-10.0, -5.0, 10.0, 5.0));

        assert_eq!(window.width(), 20.0);
        assert_eq!(window.height(), 10.0);
        assert_eq!(window.center().coord(), Point2d::new(0.0, 0.0));
        assert!(window.contains_point(&factory.point(3.0, 4.0).expect("point")));
        assert!(!window.contains_point(&factory.point(3.0, 6.0).expect("point")));
        assert!(!window.contains_point(&cartesian().point(3.0, 4.0).expect("point")));
    }

    #[test]
    fn windows_of_equivalent_factories_are_equal() {
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            ProjectedWindow::new(&cartesian(), rect),
            ProjectedWindow::new(&cartesian(), rect)
        );
        assert_ne!(
            ProjectedWindow::new(&cartesian(), rect),
            ProjectedWindow::new(&cartesian(), Rect::new(0.0, 0.0, 2.0, 1.0))
        );
    }

    #[test]
    fn reproject_keeps_structure() {
        let source = cartesian();
        let target = cartesian();
        let ring = source
            .linear_ring(
                &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)]
                    .iter()
                    .map(|(x, y)| source.point(*x, *y).expect("point"))
                    .collect::<Vec<_>>(),
            )
            .expect("ring");
        let polygon = source.polygon(ring, vec![]).expect("polygon");
        let multi = Geometry::from(source.multi_polygon(vec![polygon]).expect("multi polygon"));

        let shifted = reproject(&multi, &target, &|c| Some(Point2d::new(c.x + 1.0, c.y * 2.0)))
            .expect("reprojected");
        assert!(Arc::ptr_eq(shifted.factory(), &target));

        let Geometry::MultiPolygon(shifted) = shifted else {
            panic!("expected a multi polygon");
        };
        let coords = shifted.get(0).expect("polygon").exterior_ring().coords().to_vec();
        assert_abs_diff_eq!(coords[2], Point2d::new(5.0, 8.0));
        assert_eq!(coords.first(), coords.last());
    }

    #[test]
    fn reproject_reports_unmappable_coordinate() {
        let source = cartesian();
        let point = Geometry::from(source.point(1.0, 2.0).expect("point"));

        assert_matches!(
            reproject(&point, &cartesian(), &|_| None),
            Err(GeoFactoryError::Projection { x, y }) if x == 1.0 && y == 2.0
        );
    }

    #[test]
    fn reproject_reports_construction_failure() {
        let source = cartesian();
        let geographic = FactoryBuilder::new(Namespace::Spherical)
            .build()
            .expect("valid configuration");
        let point = Geometry::from(source.point(0.0, 1000.0).expect("point"));

        assert_matches!(
            reproject(&point, &geographic, &Some),
            Err(GeoFactoryError::Construction(_))
        );
    }
}
