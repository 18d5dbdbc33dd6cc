use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::sync::Arc;

use super::{ProjectedWindow, Projector};
use crate::factory::{Factory, FactoryOptions, Namespace};
use crate::geometry::Point2d;
use crate::rect::Rect;

/// Latitude at which the spherical Mercator projection becomes a square.
pub(crate) const MAX_LATITUDE: f64 = 85.05112877980659;

/// Spherical (web) Mercator projection, EPSG:3857.
///
/// Latitudes beyond [`MAX_LATITUDE`] are clamped.
pub struct MercatorProjector {
    projection_factory: Arc<Factory>,
}

impl MercatorProjector {
    /// Spatial reference id of the projected space.
    pub const SRID: u32 = 3857;
    /// Radius of the sphere in meters, the WGS84 semimajor axis.
    pub const RADIUS: f64 = 6_378_137.0;

    /// Creates a projector for a factory with the given options.
    ///
    /// The projection factory is a cartesian factory that shares the ring closing behaviour of the
    /// options.
    pub fn new(options: &FactoryOptions) -> Self {
        let projection_options = FactoryOptions {
            srid: Some(Self::SRID),
            lenient_assertions: options.lenient_assertions,
            proj_definition: None,
        };

        Self {
            projection_factory: Factory::new(Namespace::Cartesian, projection_options),
        }
    }
}

impl Projector for MercatorProjector {
    fn projection_factory(&self) -> &Arc<Factory> {
        &self.projection_factory
    }

    fn project_coord(&self, coord: Point2d) -> Option<Point2d> {
        let lat = coord.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = Self::RADIUS * coord.x.to_radians();
        let y = Self::RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();

        if x.is_finite() && y.is_finite() {
            Some(Point2d::new(x, y))
        } else {
            None
        }
    }

    fn unproject_coord(&self, coord: Point2d) -> Option<Point2d> {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return None;
        }

        let lat = FRAC_PI_2 - 2.0 * (-coord.y / Self::RADIUS).exp().atan();
        let lon = coord.x / Self::RADIUS;

        Some(Point2d::new(lon.to_degrees(), lat.to_degrees()))
    }

    fn wraps(&self) -> bool {
        true
    }

    fn limits_window(&self) -> Option<ProjectedWindow> {
        let half = PI * Self::RADIUS;
        Some(ProjectedWindow::new(
            &self.projection_factory,
            Rect::new(-half, -half, half, half),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn projector() -> MercatorProjector {
        MercatorProjector::new(&FactoryOptions::default())
    }

    #[test]
    fn project_known_points() {
        let projector = projector();

        assert_abs_diff_eq!(
            projector
                .project_coord(Point2d::new(0.0, 0.0))
                .expect("projected"),
            Point2d::new(0.0, 0.0),
            epsilon = 1e-6
        );

        let chicago = projector
            .project_coord(Point2d::new(-87.65, 41.85))
            .expect("projected");
        assert_abs_diff_eq!(chicago.x, -9757153.368, epsilon = 0.01);
        assert_abs_diff_eq!(chicago.y, 5138536.587, epsilon = 0.01);

        let corner = projector
            .project_coord(Point2d::new(180.0, MAX_LATITUDE))
            .expect("projected");
        assert_abs_diff_eq!(corner.x, 20037508.342789244, epsilon = 1e-6);
        assert_abs_diff_eq!(corner.y, 20037508.342789244, epsilon = 1e-3);
    }

    #[test]
    fn pole_is_clamped() {
        let projector = projector();
        let pole = projector
            .project_coord(Point2d::new(10.0, 90.0))
            .expect("clamped");
        let edge = projector
            .project_coord(Point2d::new(10.0, MAX_LATITUDE))
            .expect("projected");

        assert_eq!(pole, edge);
    }

    #[test]
    fn unproject_inverts_project() {
        let projector = projector();
        for (lon, lat) in [(0.0, 0.0), (-87.65, 41.85), (179.9, -85.0), (37.6, 55.75)] {
            let source = Point2d::new(lon, lat);
            let projected = projector.project_coord(source).expect("projected");
            let unprojected = projector.unproject_coord(projected).expect("unprojected");

            assert_abs_diff_eq!(unprojected, source, epsilon = 1e-9);
        }
    }

    #[test]
    fn unproject_rejects_non_finite() {
        assert!(projector()
            .unproject_coord(Point2d::new(f64::NAN, 0.0))
            .is_none());
    }

    #[test]
    fn projection_factory_is_cartesian() {
        let projector = MercatorProjector::new(&FactoryOptions {
            srid: Some(4326),
            lenient_assertions: true,
            proj_definition: None,
        });
        let factory = projector.projection_factory();

        assert_eq!(factory.namespace(), Namespace::Cartesian);
        assert_eq!(factory.srid(), Some(MercatorProjector::SRID));
        assert!(factory.options().lenient_assertions);
        assert!(projector.wraps());
    }

    #[test]
    fn limits_window_is_square() {
        let projector = projector();
        let window = projector.limits_window().expect("mercator window");

        assert!(Arc::ptr_eq(window.factory(), projector.projection_factory()));
        assert_abs_diff_eq!(window.width(), window.height());
        assert_abs_diff_eq!(window.x_min(), -20037508.342789244, epsilon = 1e-6);
        assert_abs_diff_eq!(window.y_max(), 20037508.342789244, epsilon = 1e-6);
    }
}
