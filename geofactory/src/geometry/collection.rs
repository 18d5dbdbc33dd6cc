use std::sync::Arc;

use super::{FactoryRef, Geometry, GeometryType, LineString, Point, Point2d, Polygon};
use crate::factory::Factory;
use crate::ConstructResult;

macro_rules! collection_type {
    ($(#[$meta:meta])* $name:ident, $member:ty, $field:ident, $variant:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            factory: FactoryRef,
            $field: Vec<$member>,
        }

        impl $name {
            /// Factory that created the collection.
            pub fn factory(&self) -> &Arc<Factory> {
                self.factory.get()
            }

            /// Number of members.
            pub fn len(&self) -> usize {
                self.$field.len()
            }

            /// Whether the collection has no members.
            pub fn is_empty(&self) -> bool {
                self.$field.is_empty()
            }

            /// Member with the given index.
            pub fn get(&self, index: usize) -> Option<&$member> {
                self.$field.get(index)
            }

            /// Iterates over the members.
            pub fn iter(&self) -> impl Iterator<Item = &$member> {
                self.$field.iter()
            }

            pub(crate) fn rehomed(self, factory: &Arc<Factory>) -> ConstructResult<Self> {
                Ok(Self {
                    factory: self.factory.adopt(factory, $variant)?,
                    $field: self
                        .$field
                        .into_iter()
                        .map(|member| member.rehomed(factory))
                        .collect::<ConstructResult<_>>()?,
                })
            }

            pub(crate) fn build(
                factory: &Arc<Factory>,
                members: Vec<$member>,
            ) -> ConstructResult<Self> {
                Ok(Self {
                    factory: FactoryRef::new(factory),
                    $field: members
                        .into_iter()
                        .map(|member| member.rehomed(factory))
                        .collect::<ConstructResult<_>>()?,
                })
            }
        }
    };
}

collection_type!(
    /// Heterogeneous collection of geometries.
    GeometryCollection,
    Geometry,
    members,
    GeometryType::GeometryCollection
);

collection_type!(
    /// Collection of points.
    MultiPoint,
    Point,
    points,
    GeometryType::MultiPoint
);

collection_type!(
    /// Collection of line strings.
    MultiLineString,
    LineString,
    line_strings,
    GeometryType::MultiLineString
);

collection_type!(
    /// Collection of polygons.
    MultiPolygon,
    Polygon,
    polygons,
    GeometryType::MultiPolygon
);

impl MultiPoint {
    /// Coordinates of the points.
    pub fn coords(&self) -> impl Iterator<Item = Point2d> + '_ {
        self.points.iter().map(Point::coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstructionError;
    use crate::factory::{FactoryBuilder, Namespace};
    use assert_matches::assert_matches;

    fn factory() -> Arc<Factory> {
        FactoryBuilder::new(Namespace::Spherical)
            .build()
            .expect("valid configuration")
    }

    #[test]
    fn multi_point_members_are_owned_by_factory() {
        let factory = factory();
        let twin = self::factory();
        let points = vec![
            twin.point(1.0, 1.0).expect("point"),
            factory.point(2.0, 2.0).expect("point"),
        ];

        let multi_point = factory.multi_point(points).expect("valid multi point");
        assert_eq!(multi_point.len(), 2);
        assert!(multi_point
            .iter()
            .all(|p| Arc::ptr_eq(p.factory(), &factory)));
        assert_eq!(
            multi_point.coords().collect::<Vec<_>>(),
            vec![Point2d::new(1.0, 1.0), Point2d::new(2.0, 2.0)]
        );
    }

    #[test]
    fn empty_collections() {
        let factory = factory();
        assert!(factory.multi_point(vec![]).expect("empty").is_empty());
        assert!(factory.multi_line_string(vec![]).expect("empty").is_empty());
        assert!(factory.multi_polygon(vec![]).expect("empty").is_empty());
        assert!(factory.collection(vec![]).expect("empty").is_empty());
    }

    #[test]
    fn nested_collection_is_rehomed() {
        let factory = factory();
        let twin = self::factory();

        let inner = twin
            .collection(vec![twin.point(0.0, 0.0).expect("point").into()])
            .expect("collection");
        let outer = factory
            .collection(vec![inner.into()])
            .expect("nested collection");

        let Some(Geometry::GeometryCollection(inner)) = outer.get(0) else {
            panic!("expected a nested collection");
        };
        assert!(Arc::ptr_eq(inner.factory(), &factory));
        assert!(Arc::ptr_eq(
            inner.get(0).expect("member").factory(),
            &factory
        ));
    }

    #[test]
    fn multi_line_string_accepts_lines_and_rings() {
        let factory = factory();
        let a = factory.point(0.0, 0.0).expect("point");
        let b = factory.point(1.0, 0.0).expect("point");
        let c = factory.point(1.0, 1.0).expect("point");

        let line = factory.line(&a, &b).expect("line");
        let ring = factory
            .linear_ring(&[a.clone(), b, c, a])
            .expect("ring");

        let multi = factory
            .multi_line_string(vec![line.into(), ring.into()])
            .expect("valid multi line string");
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.get(1).expect("ring").num_points(), 4);
    }

    #[test]
    fn foreign_member_is_rejected() {
        let factory = factory();
        let cartesian = FactoryBuilder::new(Namespace::Cartesian)
            .build()
            .expect("valid configuration");

        assert_matches!(
            factory.collection(vec![cartesian.point(5.0, 5.0).expect("point").into()]),
            Err(ConstructionError::ForeignFactory {
                variant: GeometryType::Point
            })
        );
    }
}
