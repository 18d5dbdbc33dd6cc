use std::sync::Arc;

use approx::AbsDiffEq;

use super::{FactoryRef, GeometryType, Point2d};
use crate::error::ConstructionError;
use crate::factory::Factory;
use crate::ConstructResult;

/// Single position in the factory coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    factory: FactoryRef,
    coord: Point2d,
}

impl Point {
    /// Factory that created the point.
    pub fn factory(&self) -> &Arc<Factory> {
        self.factory.get()
    }

    /// X coordinate (longitude for geographic factories).
    pub fn x(&self) -> f64 {
        self.coord.x
    }

    /// Y coordinate (latitude for geographic factories).
    pub fn y(&self) -> f64 {
        self.coord.y
    }

    /// Coordinate of the point.
    pub fn coord(&self) -> Point2d {
        self.coord
    }

    pub(crate) fn from_coord(factory: &Arc<Factory>, coord: Point2d) -> Self {
        Self {
            factory: FactoryRef::new(factory),
            coord,
        }
    }

    pub(crate) fn rehomed(self, factory: &Arc<Factory>) -> ConstructResult<Self> {
        Ok(Self {
            factory: self.factory.adopt(factory, GeometryType::Point)?,
            coord: self.coord,
        })
    }

    /// Point constructor for planar coordinate spaces.
    pub(crate) fn cartesian(factory: &Arc<Factory>, x: f64, y: f64) -> ConstructResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ConstructionError::InvalidCoordinate { x, y });
        }

        Ok(Self::from_coord(factory, Point2d::new(x, y)))
    }

    /// Point constructor for longitude/latitude coordinate spaces.
    ///
    /// Latitude must be in `[-90, 90]`, longitude is wrapped into `[-180, 180)`.
    pub(crate) fn geographic(factory: &Arc<Factory>, lon: f64, lat: f64) -> ConstructResult<Self> {
        if !lon.is_finite() || !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ConstructionError::InvalidCoordinate { x: lon, y: lat });
        }

        Ok(Self::from_coord(factory, Point2d::new(wrap_longitude(lon), lat)))
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        lon
    } else {
        let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
        // rem_euclid rounds to 360 for inputs just below -180
        if wrapped >= 180.0 {
            -180.0
        } else {
            wrapped
        }
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.factory == other.factory && self.coord.abs_diff_eq(&other.coord, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{FactoryBuilder, Namespace};
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn point_is_owned_by_factory() {
        let factory = FactoryBuilder::new(Namespace::Spherical)
            .build()
            .expect("valid configuration");
        let point = factory.point(1.0, 2.0).expect("valid point");

        assert!(Arc::ptr_eq(point.factory(), &factory));
        assert_eq!(point.x(), 1.0);
        assert_eq!(point.y(), 2.0);
    }

    #[test]
    fn geographic_point_wraps_longitude() {
        let factory = FactoryBuilder::new(Namespace::Spherical)
            .build()
            .expect("valid configuration");

        assert_abs_diff_eq!(factory.point(190.0, 0.0).expect("point").x(), -170.0);
        assert_abs_diff_eq!(factory.point(-190.0, 0.0).expect("point").x(), 170.0);
        assert_abs_diff_eq!(factory.point(180.0, 0.0).expect("point").x(), -180.0);
        assert_abs_diff_eq!(factory.point(-180.0, 0.0).expect("point").x(), -180.0);
        assert_abs_diff_eq!(factory.point(540.0, 10.0).expect("point").x(), -180.0);
    }

    #[test]
    fn longitude_just_below_antimeridian_stays_in_range() {
        let factory = FactoryBuilder::new(Namespace::Spherical)
            .build()
            .expect("valid configuration");
        let below = f64::from_bits((-180f64).to_bits() + 1);
        assert!(below < -180.0);

        let x = factory.point(below, 0.0).expect("point").x();
        assert!((-180.0..180.0).contains(&x), "longitude {x} out of range");

        let x = factory.point(-540.0 - 1e-13, 0.0).expect("point").x();
        assert!((-180.0..180.0).contains(&x), "longitude {x} out of range");
    }

    #[test]
    fn geographic_point_rejects_latitude_out_of_range() {
        let factory = FactoryBuilder::new(Namespace::Spherical)
            .build()
            .expect("valid configuration");

        assert!(factory.point(0.0, 90.0).is_ok());
        assert!(factory.point(0.0, -90.0).is_ok());
        assert_matches!(
            factory.point(0.0, 90.5),
            Err(ConstructionError::InvalidCoordinate { .. })
        );
        assert_matches!(
            factory.point(f64::NAN, 0.0),
            Err(ConstructionError::InvalidCoordinate { .. })
        );
    }

    #[test]
    fn cartesian_point_accepts_any_finite_value() {
        let factory = FactoryBuilder::new(Namespace::Cartesian)
            .build()
            .expect("valid configuration");

        let point = factory.point(1e7, -2e7).expect("valid point");
        assert_eq!(point.coord(), Point2d::new(1e7, -2e7));
        assert_matches!(
            factory.point(f64::INFINITY, 0.0),
            Err(ConstructionError::InvalidCoordinate { .. })
        );
    }

    #[test]
    fn approx_comparison() {
        let factory = FactoryBuilder::new(Namespace::Cartesian)
            .build()
            .expect("valid configuration");
        let a = factory.point(1.0, 1.0).expect("point");
        let b = factory.point(1.0 + 1e-12, 1.0).expect("point");

        assert_ne!(a, b);
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
}
