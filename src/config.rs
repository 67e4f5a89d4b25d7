// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Network configuration read from the `config-network` `ConfigMap`
//! ([`NETWORK_CONFIG_NAME`]).
//!
//! # Keys
//!
//! | Key              | Meaning                                   | Default                                 |
//! |------------------|-------------------------------------------|-----------------------------------------|
//! | `ingress-class`  | Ingress class for mappings without one    | `istio.ingress.networking.knative.dev`  |
//! | `http-protocol`  | Default HTTP option (`Enabled`/`Redirected`) | `Enabled`                            |
//! | `cluster-domain` | DNS suffix of in-cluster service hostnames | `cluster.local`                        |
//!
//! `ingress.class` is accepted as an alias of `ingress-class`; the dashed key wins
//! when both are present. Unknown keys are ignored.
//!
//! # Example
//!
//! ```rust
//! use domainmapper::config::NetworkConfig;
//! use domainmapper::crd::HttpOption;
//! use std::collections::BTreeMap;
//!
//! let data = BTreeMap::from([("http-protocol".to_string(), "Redirected".to_string())]);
//! let config = NetworkConfig::from_data(&data).unwrap();
//! assert_eq!(config.http_protocol, HttpOption::Redirected);
//! ```

use crate::constants::{DEFAULT_CLUSTER_DOMAIN, DEFAULT_INGRESS_CLASS, NETWORK_CONFIG_NAME};
use crate::crd::HttpOption;
use crate::errors::MappingError;
use k8s_openapi::api::core::v1::ConfigMap;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Config key naming the default ingress class
pub const INGRESS_CLASS_KEY: &str = "ingress-class";

/// Legacy spelling of [`INGRESS_CLASS_KEY`]
pub const INGRESS_CLASS_LEGACY_KEY: &str = "ingress.class";

/// Config key naming the default HTTP option
pub const HTTP_PROTOCOL_KEY: &str = "http-protocol";

/// Config key naming the cluster DNS suffix
pub const CLUSTER_DOMAIN_KEY: &str = "cluster-domain";

/// Settings that apply to every `DomainMapping` unless overridden per mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Ingress class used when a mapping carries no ingress-class annotation
    pub default_ingress_class: String,

    /// HTTP option used when a mapping carries no http-option annotation
    pub http_protocol: HttpOption,

    /// DNS suffix appended to `<service>.<namespace>.svc.`
    pub cluster_domain: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            default_ingress_class: DEFAULT_INGRESS_CLASS.to_string(),
            http_protocol: HttpOption::default(),
            cluster_domain: DEFAULT_CLUSTER_DOMAIN.to_string(),
        }
    }
}

impl NetworkConfig {
    /// Parses configuration from `ConfigMap` data, falling back to defaults for
    /// missing keys.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidHttpOption`] for an unknown `http-protocol`
    /// value and [`MappingError::InvalidConfigValue`] for a blank ingress class or
    /// cluster domain.
    pub fn from_data(data: &BTreeMap<String, String>) -> Result<Self, MappingError> {
        let mut config = Self::default();

        if let Some((key, class)) = data
            .get_key_value(INGRESS_CLASS_KEY)
            .or_else(|| data.get_key_value(INGRESS_CLASS_LEGACY_KEY))
        {
            config.default_ingress_class = non_blank(key, class)?;
        }

        if let Some(value) = data.get(HTTP_PROTOCOL_KEY) {
            config.http_protocol = value.parse().map_err(|_| MappingError::InvalidHttpOption {
                source_key: HTTP_PROTOCOL_KEY.to_string(),
                value: value.clone(),
            })?;
        }

        if let Some(domain) = data.get(CLUSTER_DOMAIN_KEY) {
            config.cluster_domain =
                non_blank(CLUSTER_DOMAIN_KEY, domain.trim().trim_end_matches('.'))?;
        }

        debug!(
            ingress_class = %config.default_ingress_class,
            http_protocol = %config.http_protocol,
            cluster_domain = %config.cluster_domain,
            "Loaded network configuration"
        );

        Ok(config)
    }

    /// Parses configuration from a `ConfigMap`. A `ConfigMap` without data
    /// yields the defaults.
    ///
    /// A `ConfigMap` named something other than [`NETWORK_CONFIG_NAME`] is still
    /// read, with a warning, since manifests passed on the command line are often
    /// renamed copies.
    ///
    /// # Errors
    ///
    /// See [`NetworkConfig::from_data`].
    pub fn from_configmap(cm: &ConfigMap) -> Result<Self, MappingError> {
        if !is_network_config(cm) {
            warn!(
                name = cm.metadata.name.as_deref().unwrap_or_default(),
                expected = NETWORK_CONFIG_NAME,
                "ConfigMap is not the network configuration, reading its data anyway"
            );
        }
        match &cm.data {
            Some(data) => Self::from_data(data),
            None => Ok(Self::default()),
        }
    }
}

/// Whether `cm` is the `ConfigMap` Knative reads network settings from.
#[must_use]
pub fn is_network_config(cm: &ConfigMap) -> bool {
    cm.metadata.name.as_deref() == Some(NETWORK_CONFIG_NAME)
}

fn non_blank(key: &str, value: &str) -> Result<String, MappingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MappingError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "value must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
