use std::sync::Arc;

use super::{FactoryRef, GeometryType, LinearRing};
use crate::error::ConstructionError;
use crate::factory::Factory;
use crate::ConstructResult;

/// Area bounded by an exterior ring, with optional holes given by interior rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    factory: FactoryRef,
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

impl Polygon {
    /// Factory that created the polygon.
    pub fn factory(&self) -> &Arc<Factory> {
        self.factory.get()
    }

    /// Exterior ring.
    pub fn exterior_ring(&self) -> &LinearRing {
        &self.exterior
    }

    /// Interior rings.
    pub fn interior_rings(&self) -> &[LinearRing] {
        &self.interiors
    }

    /// Iterates over the exterior ring followed by the interior rings.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Whether the polygon has an empty exterior ring.
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    pub(crate) fn rehomed(self, factory: &Arc<Factory>) -> ConstructResult<Self> {
        Ok(Self {
            factory: self.factory.adopt(factory, GeometryType::Polygon)?,
            exterior: self.exterior.rehomed(factory)?,
            interiors: self
                .interiors
                .into_iter()
                .map(|ring| ring.rehomed(factory))
                .collect::<ConstructResult<_>>()?,
        })
    }

    pub(crate) fn build(
        factory: &Arc<Factory>,
        exterior: LinearRing,
        interiors: Vec<LinearRing>,
    ) -> ConstructResult<Self> {
        if interiors.iter().any(LinearRing::is_empty) {
            return Err(ConstructionError::InvalidShape {
                variant: GeometryType::Polygon,
                reason: "interior rings must not be empty",
            });
        }

        if exterior.is_empty() && !interiors.is_empty() {
            return Err(ConstructionError::InvalidShape {
                variant: GeometryType::Polygon,
                reason: "an empty polygon cannot have interior rings",
            });
        }

        Ok(Self {
            factory: FactoryRef::new(factory),
            exterior: exterior.rehomed(factory)?,
            interiors: interiors
                .into_iter()
                .map(|ring| ring.rehomed(factory))
                .collect::<ConstructResult<_>>()?,
        })
    }
}
