use geozero::error::{GeozeroError, Result as GeozeroResult};
use geozero::{CoordDimensions, GeomProcessor, GeozeroGeometry, ToWkb, ToWkt};

use crate::geometry::{
    Geometry, GeometryCollection, Line, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Point2d, Polygon,
};

impl Geometry {
    /// Well known text representation of the geometry.
    ///
    /// Lines and linear rings are written as `LINESTRING`.
    pub fn as_text(&self) -> Result<String, GeozeroError> {
        self.to_wkt()
    }

    /// Well known binary (XY, little endian) representation of the geometry.
    pub fn as_binary(&self) -> Result<Vec<u8>, GeozeroError> {
        self.to_wkb(CoordDimensions::xy())
    }
}

fn process_geometry<P: GeomProcessor>(
    geometry: &Geometry,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    match geometry {
        Geometry::Point(v) => process_point(v, idx, processor),
        Geometry::LineString(v) => process_curve(v.coords(), true, idx, processor),
        Geometry::Line(v) => process_curve(v.as_line_string().coords(), true, idx, processor),
        Geometry::LinearRing(v) => process_curve(v.coords(), true, idx, processor),
        Geometry::Polygon(v) => process_polygon(v, true, idx, processor),
        Geometry::GeometryCollection(v) => process_collection(v, idx, processor),
        Geometry::MultiPoint(v) => process_multi_point(v, idx, processor),
        Geometry::MultiLineString(v) => process_multi_line_string(v, idx, processor),
        Geometry::MultiPolygon(v) => process_multi_polygon(v, idx, processor),
    }
}

fn process_point<P: GeomProcessor>(
    point: &Point,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.point_begin(idx)?;
    processor.xy(point.x(), point.y(), 0)?;
    processor.point_end(idx)
}

fn process_curve<P: GeomProcessor>(
    coords: &[Point2d],
    tagged: bool,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.linestring_begin(tagged, coords.len(), idx)?;
    for (i, coord) in coords.iter().enumerate() {
        processor.xy(coord.x, coord.y, i)?;
    }
    processor.linestring_end(tagged, idx)
}

fn process_polygon<P: GeomProcessor>(
    polygon: &Polygon,
    tagged: bool,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    if polygon.is_empty() {
        processor.polygon_begin(tagged, 0, idx)?;
        return processor.polygon_end(tagged, idx);
    }

    processor.polygon_begin(tagged, polygon.interior_rings().len() + 1, idx)?;
    for (i, ring) in polygon.rings().enumerate() {
        process_curve(ring.coords(), false, i, processor)?;
    }
    processor.polygon_end(tagged, idx)
}

fn process_collection<P: GeomProcessor>(
    collection: &GeometryCollection,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.geometrycollection_begin(collection.len(), idx)?;
    for (i, member) in collection.iter().enumerate() {
        process_geometry(member, i, processor)?;
    }
    processor.geometrycollection_end(idx)
}

fn process_multi_point<P: GeomProcessor>(
    multi_point: &MultiPoint,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.multipoint_begin(multi_point.len(), idx)?;
    for (i, coord) in multi_point.coords().enumerate() {
        processor.xy(coord.x, coord.y, i)?;
    }
    processor.multipoint_end(idx)
}

fn process_multi_line_string<P: GeomProcessor>(
    multi_line_string: &MultiLineString,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.multilinestring_begin(multi_line_string.len(), idx)?;
    for (i, line) in multi_line_string.iter().enumerate() {
        process_curve(line.coords(), false, i, processor)?;
    }
    processor.multilinestring_end(idx)
}

fn process_multi_polygon<P: GeomProcessor>(
    multi_polygon: &MultiPolygon,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.multipolygon_begin(multi_polygon.len(), idx)?;
    for (i, polygon) in multi_polygon.iter().enumerate() {
        process_polygon(polygon, false, i, processor)?;
    }
    processor.multipolygon_end(idx)
}

impl GeozeroGeometry for Geometry {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
        process_geometry(self, 0, processor)
    }
}

macro_rules! impl_geozero_geometry {
    ($($variant:ident => |$v:ident, $p:ident| $body:expr),* $(,)?) => {
        $(
            impl GeozeroGeometry for $variant {
                fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
                    let ($v, $p) = (self, processor);
                    $body
                }
            }
        )*
    };
}

impl_geozero_geometry!(
    Point => |v, p| process_point(v, 0, p),
    LineString => |v, p| process_curve(v.coords(), true, 0, p),
    Line => |v, p| process_curve(v.as_line_string().coords(), true, 0, p),
    LinearRing => |v, p| process_curve(v.coords(), true, 0, p),
    Polygon => |v, p| process_polygon(v, true, 0, p),
    GeometryCollection => |v, p| process_collection(v, 0, p),
    MultiPoint => |v, p| process_multi_point(v, 0, p),
    MultiLineString => |v, p| process_multi_line_string(v, 0, p),
    MultiPolygon => |v, p| process_multi_polygon(v, 0, p),
);
