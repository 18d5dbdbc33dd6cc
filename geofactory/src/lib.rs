//! Geofactory is the construction authority for geometry values in geographic (longitude/latitude) and projected
//! (planar) coordinate spaces.
//!
//! # Factories
//!
//! Every geometry value is created by a [`Factory`] and keeps a reference to it for its whole life. A factory is
//! configured once with a [`Namespace`] (which coordinate space and projection it uses) and a [`FactoryOptions`]
//! record:
//!
//! ```
//! use geofactory::{FactoryBuilder, Namespace};
//!
//! let factory = FactoryBuilder::new(Namespace::SimpleMercator)
//!     .with_srid(4326)
//!     .build()?;
//!
//! let chicago = factory.point(-87.65, 41.85)?;
//! assert!(std::sync::Arc::ptr_eq(chicago.factory(), &factory));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Constructors return a [`ConstructionError`] instead of a value when the arguments do not form a valid geometry
//! for the factory. This is an ordinary outcome that callers are expected to check.
//!
//! # Projections
//!
//! Some namespaces come with a [`Projector`](projection::Projector) that moves geometries between the geographic
//! space of the factory and a planar space represented by a separate
//! [`projection factory`](Factory::projection_factory):
//!
//! ```
//! use geofactory::{Geometry, FactoryBuilder, Namespace};
//!
//! let factory = FactoryBuilder::new(Namespace::SimpleMercator).build()?;
//! let point = Geometry::from(factory.point(-87.65, 41.85)?);
//!
//! let projected = factory.project(&point)?.expect("mercator factory has a projection");
//! assert!(std::sync::Arc::ptr_eq(projected.factory(), factory.projection_factory().unwrap()));
//!
//! let unprojected = factory.unproject(&projected)?;
//! assert!(std::sync::Arc::ptr_eq(unprojected.factory(), &factory));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Geometries can only be projected by the factory that owns them, and unprojected by the factory whose projection
//! factory owns them. Mixing them up gives [`GeoFactoryError::InvalidGeometry`].

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod error;
pub mod factory;
pub mod geometry;
pub mod projection;
pub mod rect;
mod serialization;

#[cfg(feature = "geo-types")]
mod georust;

pub use error::{ConstructionError, GeoFactoryError, ParseError};
pub use factory::{Factory, FactoryBuilder, FactoryConfig, FactoryOptions, Namespace};
pub use geometry::{
    Geometry, GeometryCollection, GeometryType, Line, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Point2d, Polygon,
};
pub use projection::ProjectedWindow;
pub use rect::Rect;

/// Result of a geometry constructor.
pub type ConstructResult<T> = Result<T, ConstructionError>;
