// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Label and annotation keys stamped onto, or stripped from, generated resources.
//!
//! Labels written by the system identify the owning `DomainMapping` and are used
//! for selection, so they always override user input. Annotations are mostly
//! informational and are inherited from the mapping, except for the reserved
//! keys in [`EXCLUDED_ANNOTATIONS`].

// ============================================================================
// System Labels
// ============================================================================

/// Label carrying the UID of the `DomainMapping` that owns a resource
pub const DOMAIN_MAPPING_UID_LABEL: &str = "serving.knative.dev/domainMappingUID";

/// Label carrying the namespace of the `DomainMapping` that owns a resource
pub const DOMAIN_MAPPING_NAMESPACE_LABEL: &str = "serving.knative.dev/domainMappingNamespace";

// ============================================================================
// Networking Annotations
// ============================================================================

/// Annotation selecting the ingress implementation that programs an `Ingress`
pub const INGRESS_CLASS_ANNOTATION: &str = "networking.knative.dev/ingress.class";

/// Annotation overriding the HTTP exposure policy of a single mapping
pub const HTTP_OPTION_ANNOTATION: &str = "networking.knative.dev/http-option";

/// Annotation selecting the certificate provider for a mapping
pub const CERTIFICATE_CLASS_ANNOTATION: &str = "networking.knative.dev/certificate.class";

/// Annotation opting a mapping out of automatic TLS
pub const DISABLE_AUTO_TLS_ANNOTATION: &str = "networking.knative.dev/disableAutoTLS";

/// Annotation written by `kubectl apply` holding the last applied manifest
pub const LAST_APPLIED_CONFIG_ANNOTATION: &str = "kubectl.kubernetes.io/last-applied-configuration";

// ============================================================================
// Annotation Filtering
// ============================================================================

/// Annotations managed by the control plane that must never be copied from a
/// `DomainMapping` onto its `Ingress`.
pub const EXCLUDED_ANNOTATIONS: &[&str] = &[
    LAST_APPLIED_CONFIG_ANNOTATION,
    CERTIFICATE_CLASS_ANNOTATION,
    DISABLE_AUTO_TLS_ANNOTATION,
    HTTP_OPTION_ANNOTATION,
];

/// Returns `true` when `key` is one of the [`EXCLUDED_ANNOTATIONS`].
#[must_use]
pub fn is_excluded_annotation(key: &str) -> bool {
    EXCLUDED_ANNOTATIONS.contains(&key)
}
