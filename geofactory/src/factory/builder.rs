use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Factory, Namespace};
use crate::error::GeoFactoryError;

/// Options record of a factory. Two factories with the same namespace and equal options are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryOptions {
    /// Spatial reference id of the coordinate space. Informational only.
    pub srid: Option<u32>,
    /// If set, linear rings whose first and last points differ are closed automatically instead of being rejected.
    pub lenient_assertions: bool,
    /// Operator definition for the `geodesy` namespace, e.g. `"laea lon_0=10 lat_0=52"`.
    pub proj_definition: Option<String>,
}

/// Constructor for a [`Factory`].
///
/// ```
/// use geofactory::{FactoryBuilder, Namespace};
///
/// let factory = FactoryBuilder::new(Namespace::SimpleMercator)
///     .with_srid(4326)
///     .with_lenient_assertions(true)
///     .build()?;
///
/// assert!(factory.has_projection());
/// # Ok::<(), geofactory::GeoFactoryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FactoryBuilder {
    namespace: Namespace,
    options: FactoryOptions,
}

impl FactoryBuilder {
    /// Initializes a builder for a factory of the given namespace with default options.
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            options: FactoryOptions::default(),
        }
    }

    /// Initializes a builder from a string namespace tag.
    ///
    /// Returns [`GeoFactoryError::UnknownNamespace`] if the tag is not known.
    pub fn from_tag(tag: &str) -> Result<Self, GeoFactoryError> {
        Ok(Self::new(tag.parse()?))
    }

    /// Replaces all the options.
    pub fn with_options(mut self, options: FactoryOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the spatial reference id.
    pub fn with_srid(mut self, srid: u32) -> Self {
        self.options.srid = Some(srid);
        self
    }

    /// Sets whether open linear rings are closed automatically.
    pub fn with_lenient_assertions(mut self, lenient: bool) -> Self {
        self.options.lenient_assertions = lenient;
        self
    }

    /// Sets the projection definition used by the `geodesy` namespace.
    ///
    /// Building a factory of any other namespace with a projection definition returns an error.
    pub fn with_proj_definition(mut self, definition: impl Into<String>) -> Self {
        self.options.proj_definition = Some(definition.into());
        self
    }

    /// Creates the factory.
    ///
    /// If the projector of the namespace cannot be created from the options, the factory is still created, but
    /// without projection support.
    pub fn build(self) -> Result<Arc<Factory>, GeoFactoryError> {
        let Self { namespace, options } = self;

        if options.proj_definition.is_some() && !namespace.uses_proj_definition() {
            return Err(GeoFactoryError::Configuration(format!(
                "namespace '{namespace}' does not use a projection definition"
            )));
        }

        if namespace.uses_proj_definition() && options.proj_definition.is_none() {
            return Err(GeoFactoryError::Configuration(format!(
                "namespace '{namespace}' requires a projection definition"
            )));
        }

        Ok(Factory::new(namespace, options))
    }
}

/// Serializable factory configuration.
///
/// ```
/// use geofactory::FactoryConfig;
///
/// let config: FactoryConfig = serde_json::from_str(
///     r#"{ "namespace": "simple_mercator", "srid": 4326 }"#,
/// ).unwrap();
/// let factory = config.build()?;
///
/// assert_eq!(factory.options().srid, Some(4326));
/// # Ok::<(), geofactory::GeoFactoryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Namespace tag, see [`Namespace`].
    pub namespace: String,
    /// Options of the factory.
    #[serde(flatten)]
    pub options: FactoryOptions,
}

impl FactoryConfig {
    /// Creates a builder for the configured factory.
    pub fn builder(&self) -> Result<FactoryBuilder, GeoFactoryError> {
        Ok(FactoryBuilder::from_tag(&self.namespace)?.with_options(self.options.clone()))
    }

    /// Creates the configured factory.
    pub fn build(&self) -> Result<Arc<Factory>, GeoFactoryError> {
        self.builder()?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use insta::assert_compact_debug_snapshot;

    #[test]
    fn builder_sets_options() {
        let factory = FactoryBuilder::new(Namespace::Spherical)
            .with_srid(4326)
            .with_lenient_assertions(true)
            .build()
            .expect("valid configuration");

        assert_eq!(factory.namespace(), Namespace::Spherical);
        assert_eq!(
            factory.options(),
            &FactoryOptions {
                srid: Some(4326),
                lenient_assertions: true,
                proj_definition: None,
            }
        );
    }

    #[test]
    fn proj_definition_is_rejected_for_mercator() {
        let result = FactoryBuilder::new(Namespace::SimpleMercator)
            .with_proj_definition("merc")
            .build();

        assert!(result.is_err());
        assert_compact_debug_snapshot!(result.map(|_| ()), @r#"Err(Configuration("namespace 'simple_mercator' does not use a projection definition"))"#);
    }

    #[test]
    fn unknown_tag() {
        let result = FactoryBuilder::from_tag("lambert").map(|_| ());
        assert_compact_debug_snapshot!(result, @r#"Err(UnknownNamespace("lambert"))"#);
    }

    #[test]
    fn config_from_json() {
        let config: FactoryConfig = serde_json::from_str(
            r#"{ "namespace": "cartesian", "srid": 3857, "lenient_assertions": true }"#,
        )
        .expect("valid json");

        assert_eq!(config.namespace, "cartesian");
        let factory = config.build().expect("valid configuration");
        assert_eq!(factory.namespace(), Namespace::Cartesian);
        assert_eq!(factory.options().srid, Some(3857));
        assert!(factory.options().lenient_assertions);
    }

    #[test]
    fn config_defaults_options() {
        let config: FactoryConfig =
            serde_json::from_str(r#"{ "namespace": "spherical" }"#).expect("valid json");
        assert_eq!(config.options, FactoryOptions::default());
    }

    #[test]
    fn config_with_unknown_namespace_fails_fast() {
        let config: FactoryConfig =
            serde_json::from_str(r#"{ "namespace": "azimuthal" }"#).expect("valid json");

        assert_matches!(config.build(), Err(GeoFactoryError::UnknownNamespace(_)));
    }

    #[test]
    fn namespace_serializes_as_tag() {
        assert_eq!(
            serde_json::to_string(&Namespace::SimpleMercator).expect("serializable"),
            r#""simple_mercator""#
        );
        let options: FactoryOptions =
            serde_json::from_str(r#"{ "srid": 4326 }"#).expect("valid json");
        assert_eq!(options.srid, Some(4326));
        assert!(!options.lenient_assertions);
    }
}
