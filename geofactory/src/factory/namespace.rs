use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::variants::{VariantSet, CARTESIAN, GEOGRAPHIC};
use super::FactoryOptions;
use crate::error::GeoFactoryError;
use crate::projection::{MercatorProjector, Projector};

/// Configuration tag of a factory. It selects the coordinate space, the geometry constructors and the projector
/// of the factory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Longitude/latitude coordinates without a projection.
    Spherical,
    /// Longitude/latitude coordinates with the spherical Mercator projection (EPSG:3857).
    SimpleMercator,
    /// Planar coordinates without a projection. Factories of this kind are used as projection factories.
    Cartesian,
    /// Longitude/latitude coordinates with a projection given by a `geodesy` operator definition
    /// (see [`FactoryOptions::proj_definition`]).
    #[cfg(feature = "geodesy")]
    Geodesy,
}

impl Namespace {
    /// String tag of the namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Spherical => "spherical",
            Namespace::SimpleMercator => "simple_mercator",
            Namespace::Cartesian => "cartesian",
            #[cfg(feature = "geodesy")]
            Namespace::Geodesy => "geodesy",
        }
    }

    /// Whether the factories of this namespace use longitude/latitude coordinates.
    pub fn is_geographic(&self) -> bool {
        !matches!(self, Namespace::Cartesian)
    }

    /// Whether the namespace reads [`FactoryOptions::proj_definition`].
    pub(crate) fn uses_proj_definition(&self) -> bool {
        match self {
            #[cfg(feature = "geodesy")]
            Namespace::Geodesy => true,
            _ => false,
        }
    }

    pub(crate) fn variants(&self) -> &'static VariantSet {
        if self.is_geographic() {
            &GEOGRAPHIC
        } else {
            &CARTESIAN
        }
    }

    /// Creates the projector for a factory of this namespace. Returns `None` if the namespace has no projection or
    /// the projector cannot be created with the given options.
    pub(crate) fn create_projector(&self, options: &FactoryOptions) -> Option<Box<dyn Projector>> {
        match self {
            Namespace::Spherical | Namespace::Cartesian => None,
            Namespace::SimpleMercator => Some(Box::new(MercatorProjector::new(options))),
            #[cfg(feature = "geodesy")]
            Namespace::Geodesy => {
                let Some(definition) = options.proj_definition.as_deref() else {
                    log::warn!("Geodesy factory is created without a projection definition");
                    return None;
                };

                match crate::projection::GeodesyProjector::new(definition, options) {
                    Some(projector) => Some(Box::new(projector)),
                    None => {
                        log::warn!("Failed to create geodesy projection from '{definition}'");
                        None
                    }
                }
            }
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = GeoFactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spherical" => Ok(Namespace::Spherical),
            "simple_mercator" => Ok(Namespace::SimpleMercator),
            "cartesian" => Ok(Namespace::Cartesian),
            #[cfg(feature = "geodesy")]
            "geodesy" => Ok(Namespace::Geodesy),
            other => Err(GeoFactoryError::UnknownNamespace(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_tags() {
        for namespace in [
            Namespace::Spherical,
            Namespace::SimpleMercator,
            Namespace::Cartesian,
        ] {
            assert_eq!(namespace.as_str().parse::<Namespace>().ok(), Some(namespace));
        }
    }

    #[test]
    fn unknown_tag_fails() {
        assert_matches!(
            "lambert".parse::<Namespace>(),
            Err(GeoFactoryError::UnknownNamespace(tag)) if tag == "lambert"
        );
    }

    #[test]
    fn registry_selection() {
        assert_eq!(Namespace::Spherical.variants().name, "geographic");
        assert_eq!(Namespace::SimpleMercator.variants().name, "geographic");
        assert_eq!(Namespace::Cartesian.variants().name, "cartesian");
    }

    #[test]
    fn projector_by_namespace() {
        let options = FactoryOptions::default();
        assert!(Namespace::Spherical.create_projector(&options).is_none());
        assert!(Namespace::Cartesian.create_projector(&options).is_none());
        assert!(Namespace::SimpleMercator
            .create_projector(&options)
            .is_some());
    }
}
