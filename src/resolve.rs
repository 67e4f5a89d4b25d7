// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resolution of `Ingress` build inputs from a `DomainMapping`.
//!
//! A reconciler calls these before [`crate::ingress::make_ingress`]: the builder
//! trusts its inputs, so validation of the mapping happens here.
//!
//! # Example
//!
//! ```rust
//! use domainmapper::config::NetworkConfig;
//! use domainmapper::crd::{DomainMapping, DomainMappingSpec, KReference};
//! use domainmapper::resolve::backend_for;
//!
//! let mut dm = DomainMapping::new("a.example.com", DomainMappingSpec {
//!     reference: KReference { name: "hello".into(), ..Default::default() },
//!     tls: None,
//! });
//! dm.metadata.namespace = Some("default".into());
//!
//! let backend = backend_for(&dm, &NetworkConfig::default()).unwrap();
//! assert_eq!(backend.target_host, "hello.default.svc.cluster.local");
//! ```

use crate::config::NetworkConfig;
use crate::crd::{DomainMapping, HttpOption, IngressTls};
use crate::errors::MappingError;
use crate::labels::{HTTP_OPTION_ANNOTATION, INGRESS_CLASS_ANNOTATION};
use kube::ResourceExt;
use tracing::debug;

/// Service that receives a mapping's traffic and the host requests are rewritten to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backend {
    /// Name of the service in the mapping's namespace
    pub service_name: String,
    /// Fully qualified in-cluster hostname of the service
    pub target_host: String,
}

/// Returns the ingress class for `dm`.
///
/// A non-empty ingress-class annotation on the mapping wins over the configured default.
#[must_use]
pub fn ingress_class_for(dm: &DomainMapping, config: &NetworkConfig) -> String {
    dm.annotations()
        .get(INGRESS_CLASS_ANNOTATION)
        .map(|class| class.trim())
        .filter(|class| !class.is_empty())
        .map_or_else(|| config.default_ingress_class.clone(), str::to_string)
}

/// Returns the HTTP option for `dm`.
///
/// The http-option annotation on the mapping overrides the configured default.
///
/// # Errors
///
/// Returns [`MappingError::InvalidHttpOption`] if the annotation holds an unknown value.
pub fn http_option_for(
    dm: &DomainMapping,
    config: &NetworkConfig,
) -> Result<HttpOption, MappingError> {
    match dm.annotations().get(HTTP_OPTION_ANNOTATION) {
        Some(value) => value.parse().map_err(|_| MappingError::InvalidHttpOption {
            source_key: HTTP_OPTION_ANNOTATION.to_string(),
            value: value.clone(),
        }),
        None => Ok(config.http_protocol),
    }
}

/// Builds the in-cluster hostname of a service.
#[must_use]
pub fn service_hostname(name: &str, namespace: &str, cluster_domain: &str) -> String {
    format!("{name}.{namespace}.svc.{cluster_domain}")
}

/// Resolves the backend service a mapping points at.
///
/// # Errors
///
/// Returns [`MappingError::MissingField`] if the mapping has no namespace or its
/// reference has no name, and [`MappingError::CrossNamespaceRef`] if the reference
/// names a different namespace.
pub fn backend_for(dm: &DomainMapping, config: &NetworkConfig) -> Result<Backend, MappingError> {
    let namespace = dm
        .namespace()
        .filter(|ns| !ns.is_empty())
        .ok_or_else(|| MappingError::MissingField {
            field: "metadata.namespace".to_string(),
        })?;

    let reference = &dm.spec.reference;
    if reference.name.is_empty() {
        return Err(MappingError::MissingField {
            field: "spec.ref.name".to_string(),
        });
    }

    if let Some(ref_namespace) = reference.namespace.as_deref() {
        if !ref_namespace.is_empty() && ref_namespace != namespace {
            return Err(MappingError::CrossNamespaceRef {
                namespace,
                ref_namespace: ref_namespace.to_string(),
            });
        }
    }

    let backend = Backend {
        service_name: reference.name.clone(),
        target_host: service_hostname(&reference.name, &namespace, &config.cluster_domain),
    };

    debug!(
        domain_mapping = %dm.name_any(),
        namespace = %namespace,
        kind = %reference.kind,
        service = %backend.service_name,
        target_host = %backend.target_host,
        "Resolved DomainMapping backend"
    );

    Ok(backend)
}

/// Builds the TLS settings for a mapping.
///
/// A mapping with `spec.tls` gets one entry covering its hostname with the named
/// secret from its own namespace. Without it the list is empty.
#[must_use]
pub fn tls_for(dm: &DomainMapping) -> Vec<IngressTls> {
    dm.spec
        .tls
        .iter()
        .map(|tls| IngressTls {
            hosts: vec![dm.name_any()],
            secret_name: tls.secret_name.clone(),
            secret_namespace: dm.namespace().unwrap_or_default(),
        })
        .collect()
}
