//! Static registry of geometry constructors.

use std::sync::Arc;

use super::Factory;
use crate::geometry::{
    Geometry, GeometryCollection, Line, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::ConstructResult;

/// Constructor functions for all geometry variants, selected once per factory by its namespace.
///
/// The geographic and cartesian sets share every constructor except `point`: coordinate validation
/// is the only difference between the two spaces. Every variant is supported by both sets, so none
/// of these constructors returns [`ConstructionError::Unsupported`]. That error is only produced
/// when reading WKT or WKB input that has no geometry counterpart, e.g. `POINT EMPTY`.
///
/// [`ConstructionError::Unsupported`]: crate::error::ConstructionError::Unsupported
pub(crate) struct VariantSet {
    pub(crate) name: &'static str,
    pub(crate) point: fn(&Arc<Factory>, f64, f64) -> ConstructResult<Point>,
    pub(crate) line_string: fn(&Arc<Factory>, &[Point]) -> ConstructResult<LineString>,
    pub(crate) line: fn(&Arc<Factory>, &Point, &Point) -> ConstructResult<Line>,
    pub(crate) linear_ring: fn(&Arc<Factory>, &[Point]) -> ConstructResult<LinearRing>,
    pub(crate) polygon:
        fn(&Arc<Factory>, LinearRing, Vec<LinearRing>) -> ConstructResult<Polygon>,
    pub(crate) collection: fn(&Arc<Factory>, Vec<Geometry>) -> ConstructResult<GeometryCollection>,
    pub(crate) multi_point: fn(&Arc<Factory>, Vec<Point>) -> ConstructResult<MultiPoint>,
    pub(crate) multi_line_string:
        fn(&Arc<Factory>, Vec<LineString>) -> ConstructResult<MultiLineString>,
    pub(crate) multi_polygon: fn(&Arc<Factory>, Vec<Polygon>) -> ConstructResult<MultiPolygon>,
}

/// Variants with longitude/latitude coordinates.
pub(crate) static GEOGRAPHIC: VariantSet = VariantSet {
    name: "geographic",
    point: Point::geographic,
    line_string: LineString::build,
    line: Line::build,
    linear_ring: LinearRing::build,
    polygon: Polygon::build,
    collection: GeometryCollection::build,
    multi_point: MultiPoint::build,
    multi_line_string: MultiLineString::build,
    multi_polygon: MultiPolygon::build,
};

/// Variants with planar coordinates.
pub(crate) static CARTESIAN: VariantSet = VariantSet {
    name: "cartesian",
    point: Point::cartesian,
    line_string: LineString::build,
    line: Line::build,
    linear_ring: LinearRing::build,
    polygon: Polygon::build,
    collection: GeometryCollection::build,
    multi_point: MultiPoint::build,
    multi_line_string: MultiLineString::build,
    multi_polygon: MultiPolygon::build,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstructionError;
    use crate::factory::{FactoryBuilder, Namespace};
    use assert_matches::assert_matches;

    fn factory(namespace: Namespace) -> Arc<Factory> {
        FactoryBuilder::new(namespace)
            .build()
            .expect("valid configuration")
    }

    #[test]
    fn sets_differ_only_in_point_validation() {
        let geographic = factory(Namespace::Spherical);
        let cartesian = factory(Namespace::Cartesian);

        assert_matches!(
            (GEOGRAPHIC.point)(&geographic, 0.0, 100.0),
            Err(ConstructionError::InvalidCoordinate { .. })
        );
        assert!((CARTESIAN.point)(&cartesian, 0.0, 100.0).is_ok());

        for (variants, factory) in [(&GEOGRAPHIC, &geographic), (&CARTESIAN, &cartesian)] {
            let points: Vec<Point> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]
                .iter()
                .map(|(x, y)| (variants.point)(factory, *x, *y).expect("point"))
                .collect();

            let ring = (variants.linear_ring)(factory, &points).expect("ring");
            let polygon = (variants.polygon)(factory, ring, vec![]).expect("polygon");
            let line = (variants.line)(factory, &points[0], &points[1]).expect("line");
            let line_string = (variants.line_string)(factory, &points).expect("line string");
            (variants.multi_point)(factory, points.clone()).expect("multi point");
            (variants.multi_line_string)(factory, vec![line_string]).expect("multi line string");
            (variants.multi_polygon)(factory, vec![polygon]).expect("multi polygon");
            (variants.collection)(factory, vec![line.into()]).expect("collection");
        }
    }
}
