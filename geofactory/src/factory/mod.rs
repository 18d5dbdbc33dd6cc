//! [`Factory`] is the construction authority for geometry values of one coordinate space.

use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

use crate::error::{GeoFactoryError, ParseError};
use crate::geometry::{
    Geometry, GeometryCollection, Line, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::projection::{reproject, ProjectedWindow, Projector};
use crate::{serialization, ConstructResult};

mod builder;
mod namespace;
pub(crate) mod variants;

pub use builder::{FactoryBuilder, FactoryConfig, FactoryOptions};
pub use namespace::Namespace;
use variants::VariantSet;

/// Creates and owns geometry values of one coordinate space, and moves them to and from the projected space of the
/// factory, if there is one.
///
/// Factories are created with [`FactoryBuilder`] and are always used through an `Arc`. Every geometry keeps a
/// reference to its factory.
pub struct Factory {
    namespace: Namespace,
    options: FactoryOptions,
    variants: &'static VariantSet,
    projector: Option<Box<dyn Projector>>,
    limits_window: OnceLock<Option<ProjectedWindow>>,
}

impl Factory {
    pub(crate) fn new(namespace: Namespace, options: FactoryOptions) -> Arc<Self> {
        let projector = namespace.create_projector(&options);
        let variants = namespace.variants();

        log::debug!(
            "Created {namespace} factory with {} variants (projection: {}, options: {options:?})",
            variants.name,
            projector.is_some(),
        );

        Arc::new(Self {
            namespace,
            options,
            variants,
            projector,
            limits_window: OnceLock::new(),
        })
    }

    /// Configuration tag of the factory.
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Options record of the factory.
    pub fn options(&self) -> &FactoryOptions {
        &self.options
    }

    /// Spatial reference id of the factory coordinate space.
    pub fn srid(&self) -> Option<u32> {
        self.options.srid
    }

    /// Whether two factories denote the same coordinate space configuration.
    ///
    /// This compares the namespace and the options by value. It does not check if `self` and `other` are the same
    /// instance. For that, compare the `Arc`s with [`Arc::ptr_eq`].
    pub fn equivalent(&self, other: &Factory) -> bool {
        self.namespace == other.namespace && self.options == other.options
    }

    /// Whether the factory supports a projection.
    pub fn has_projection(&self) -> bool {
        self.projector.is_some()
    }

    /// Factory of the projected coordinate space, or `None` if the factory does not support a projection.
    pub fn projection_factory(&self) -> Option<&Arc<Factory>> {
        self.projector.as_ref().map(|p| p.projection_factory())
    }

    /// Projects a geometry of this factory into the projected coordinate space.
    ///
    /// Returns [`GeoFactoryError::InvalidGeometry`] if the geometry was not created by this very factory instance,
    /// and `Ok(None)` if the factory does not support a projection.
    pub fn project(
        self: &Arc<Self>,
        geometry: &Geometry,
    ) -> Result<Option<Geometry>, GeoFactoryError> {
        if !Arc::ptr_eq(geometry.factory(), self) {
            return Err(GeoFactoryError::InvalidGeometry(
                "only geometries of this factory can be projected",
            ));
        }

        let Some(projector) = &self.projector else {
            return Ok(None);
        };

        reproject(geometry, projector.projection_factory(), &|coord| {
            projector.project_coord(coord)
        })
        .map(Some)
    }

    /// Projects a geometry from the projected coordinate space back into the coordinate space of this factory.
    ///
    /// Returns [`GeoFactoryError::InvalidGeometry`] if the factory does not support a projection or the geometry
    /// does not belong to the [projection factory](Self::projection_factory).
    pub fn unproject(self: &Arc<Self>, geometry: &Geometry) -> Result<Geometry, GeoFactoryError> {
        let Some(projector) = &self.projector else {
            return Err(GeoFactoryError::InvalidGeometry(
                "the factory does not support a projection",
            ));
        };

        if !Arc::ptr_eq(geometry.factory(), projector.projection_factory()) {
            return Err(GeoFactoryError::InvalidGeometry(
                "only geometries in the projected coordinate space can be unprojected",
            ));
        }

        reproject(geometry, self, &|coord| projector.unproject_coord(coord))
    }

    /// Whether the X axis of the projected space wraps around (as in Mercator). Returns `None` if the factory does
    /// not support a projection.
    pub fn projection_wraps(&self) -> Option<bool> {
        self.projector.as_ref().map(|p| p.wraps())
    }

    /// Domain of the projection in the projected coordinate space.
    ///
    /// The window is computed on the first call and cached for the lifetime of the factory. Returns `None` if the
    /// factory does not support a projection or the projector cannot compute its limits.
    pub fn projection_limits_window(&self) -> Option<&ProjectedWindow> {
        let projector = self.projector.as_ref()?;
        self.limits_window
            .get_or_init(|| {
                let window = projector.limits_window();
                log::debug!(
                    "Computed projection limits for {} factory: {window:?}",
                    self.namespace
                );
                window
            })
            .as_ref()
    }

    /// Parses a WKT string into a geometry of this factory.
    pub fn parse_wkt(self: &Arc<Self>, text: &str) -> Result<Geometry, ParseError> {
        serialization::parse_wkt(self, text)
    }

    /// Parses binary (or hex encoded) WKB into a geometry of this factory.
    pub fn parse_wkb(self: &Arc<Self>, bytes: &[u8]) -> Result<Geometry, ParseError> {
        serialization::parse_wkb(self, bytes)
    }

    /// Creates a point.
    pub fn point(self: &Arc<Self>, x: f64, y: f64) -> ConstructResult<Point> {
        (self.variants.point)(self, x, y)
    }

    /// Creates a line string from a sequence of points.
    pub fn line_string(self: &Arc<Self>, points: &[Point]) -> ConstructResult<LineString> {
        (self.variants.line_string)(self, points)
    }

    /// Creates a line between two points.
    pub fn line(self: &Arc<Self>, start: &Point, end: &Point) -> ConstructResult<Line> {
        (self.variants.line)(self, start, end)
    }

    /// Creates a linear ring from a sequence of points.
    pub fn linear_ring(self: &Arc<Self>, points: &[Point]) -> ConstructResult<LinearRing> {
        (self.variants.linear_ring)(self, points)
    }

    /// Creates a polygon from an exterior ring and a set of interior rings.
    pub fn polygon(
        self: &Arc<Self>,
        outer_ring: LinearRing,
        inner_rings: Vec<LinearRing>,
    ) -> ConstructResult<Polygon> {
        (self.variants.polygon)(self, outer_ring, inner_rings)
    }

    /// Creates a collection of arbitrary geometries.
    pub fn collection(
        self: &Arc<Self>,
        elements: Vec<Geometry>,
    ) -> ConstructResult<GeometryCollection> {
        (self.variants.collection)(self, elements)
    }

    /// Creates a multi point.
    pub fn multi_point(self: &Arc<Self>, elements: Vec<Point>) -> ConstructResult<MultiPoint> {
        (self.variants.multi_point)(self, elements)
    }

    /// Creates a multi line string.
    pub fn multi_line_string(
        self: &Arc<Self>,
        elements: Vec<LineString>,
    ) -> ConstructResult<MultiLineString> {
        (self.variants.multi_line_string)(self, elements)
    }

    /// Creates a multi polygon.
    pub fn multi_polygon(
        self: &Arc<Self>,
        elements: Vec<Polygon>,
    ) -> ConstructResult<MultiPolygon> {
        (self.variants.multi_polygon)(self, elements)
    }
}

impl Debug for Factory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("namespace", &self.namespace)
            .field("options", &self.options)
            .field("has_projection", &self.has_projection())
            .finish()
    }
}
