// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions consumed and produced by domainmapper.
//!
//! # Resource Types
//!
//! ## Input
//!
//! - [`DomainMapping`] - A request that an external hostname routes to a backend service
//!
//! ## Output
//!
//! - [`Ingress`] - Desired-state routing resource read by the ingress control plane
//!
//! ## Supporting Types
//!
//! - [`Http01Challenge`] - A pending ACME HTTP-01 challenge that must stay routable
//!   until the certificate is issued
//!
//! # Example: Describing a Domain Mapping
//!
//! ```rust
//! use domainmapper::crd::{DomainMapping, DomainMappingSpec, KReference};
//!
//! let dm = DomainMapping::new(
//!     "a.example.com",
//!     DomainMappingSpec {
//!         reference: KReference {
//!             api_version: "serving.knative.dev/v1".to_string(),
//!             kind: "Service".to_string(),
//!             name: "hello".to_string(),
//!             namespace: None,
//!         },
//!         tls: None,
//!     },
//! );
//! assert_eq!(dm.spec.reference.name, "hello");
//! ```

use crate::errors::MappingError;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use url::Url;

// ============================================================================
// DomainMapping
// ============================================================================

/// `DomainMapping` maps an external hostname onto an addressable backend.
///
/// The resource name is the hostname being mapped.
///
/// # Example
///
/// ```yaml
/// apiVersion: serving.knative.dev/v1beta1
/// kind: DomainMapping
/// metadata:
///   name: a.example.com
///   namespace: default
/// spec:
///   ref:
///     apiVersion: serving.knative.dev/v1
///     kind: Service
///     name: hello
///   tls:
///     secretName: a-example-com-tls
/// ```
#[derive(CustomResource, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "serving.knative.dev",
    version = "v1beta1",
    kind = "DomainMapping",
    namespaced,
    derive = "PartialEq",
    doc = "DomainMapping routes an external hostname to a backend service in the same namespace."
)]
#[serde(rename_all = "camelCase")]
pub struct DomainMappingSpec {
    /// Addressable object that requests for the mapped hostname are sent to.
    ///
    /// Must live in the same namespace as the `DomainMapping`.
    #[serde(rename = "ref")]
    pub reference: KReference,

    /// Secret holding the certificate for the mapped hostname.
    ///
    /// When unset, TLS is left to automatic certificate provisioning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<SecretTls>,
}

/// Reference to an object by kind, name and API version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KReference {
    /// API version of the referent (e.g., `serving.knative.dev/v1`).
    pub api_version: String,

    /// Kind of the referent (e.g., `Service`).
    pub kind: String,

    /// Name of the referent.
    pub name: String,

    /// Namespace of the referent. Defaults to the namespace of the referring object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// TLS secret used to terminate traffic for a mapped hostname.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretTls {
    /// Name of a `kubernetes.io/tls` secret in the mapping's namespace.
    pub secret_name: String,
}

// ============================================================================
// Ingress
// ============================================================================

/// `Ingress` is the desired routing state handed to the ingress control plane.
///
/// domainmapper only produces these objects; programming the actual proxy is the
/// job of whichever implementation matches the ingress-class annotation.
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "networking.internal.knative.dev",
    version = "v1alpha1",
    kind = "Ingress",
    namespaced,
    derive = "PartialEq",
    doc = "Ingress describes the host and path routing a networking layer must program."
)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    /// TLS termination settings, one entry per certificate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tls: Vec<IngressTls>,

    /// Host and path routing rules.
    #[serde(default)]
    pub rules: Vec<IngressRule>,

    /// Whether plain HTTP is served or redirected to HTTPS.
    #[serde(default)]
    pub http_option: HttpOption,
}

/// TLS termination settings for a set of hosts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngressTls {
    /// Hosts covered by the certificate.
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Name of the secret holding the certificate and key.
    pub secret_name: String,

    /// Namespace of the secret.
    pub secret_namespace: String,
}

/// A routing rule matching a set of hosts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    /// Hosts this rule applies to. Order is significant.
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Whether the hosts are reachable from outside the cluster.
    #[serde(default)]
    pub visibility: IngressVisibility,

    /// HTTP routing for the hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpIngressRuleValue>,
}

/// Network reachability of an ingress rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum IngressVisibility {
    /// Reachable from outside the cluster
    #[default]
    #[serde(rename = "ExternalIP")]
    ExternalIp,

    /// Reachable only from inside the cluster
    ClusterLocal,
}

/// Ordered list of HTTP paths. The first matching path wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressRuleValue {
    /// Paths evaluated in order.
    pub paths: Vec<HttpIngressPath>,
}

/// A path matcher and the backends it splits traffic across.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressPath {
    /// Path prefix to match. Empty matches every path.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,

    /// Host header to rewrite matching requests to before forwarding.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rewrite_host: String,

    /// Header matchers that must all hold for the path to match.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, HeaderMatch>,

    /// Backends receiving the matched traffic.
    #[serde(default)]
    pub splits: Vec<IngressBackendSplit>,

    /// Headers added to every request matching this path.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub append_headers: BTreeMap<String, String>,
}

/// Exact-value header matcher.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HeaderMatch {
    /// Value the header must equal.
    pub exact: String,
}

/// A share of traffic directed at a single backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngressBackendSplit {
    /// Backend receiving this share.
    #[serde(flatten)]
    pub backend: IngressBackend,

    /// Share of traffic, 0-100.
    pub percent: i32,

    /// Headers added to requests sent to this backend.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub append_headers: BTreeMap<String, String>,
}

/// A Kubernetes service endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngressBackend {
    /// Namespace of the service.
    pub service_namespace: String,

    /// Name of the service.
    pub service_name: String,

    /// Port on the service, by number or name.
    pub service_port: IntOrString,
}

// ============================================================================
// HTTP Option
// ============================================================================

/// HTTP exposure policy of an ingress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum HttpOption {
    /// Serve plain HTTP alongside HTTPS
    #[default]
    Enabled,

    /// Redirect plain HTTP requests to HTTPS
    Redirected,
}

impl fmt::Display for HttpOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpOption::Enabled => f.write_str("Enabled"),
            HttpOption::Redirected => f.write_str("Redirected"),
        }
    }
}

impl FromStr for HttpOption {
    type Err = MappingError;

    /// Parses an HTTP option, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enabled" => Ok(HttpOption::Enabled),
            "redirected" => Ok(HttpOption::Redirected),
            _ => Err(MappingError::InvalidHttpOption {
                source_key: "httpOption".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// ACME Challenges
// ============================================================================

/// A pending ACME HTTP-01 challenge.
///
/// The certificate provider serves the challenge token from the given service;
/// the URL host and path must be routed there until the certificate is issued.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Http01Challenge {
    /// URL the ACME server will fetch (e.g., `http://a.example.com/.well-known/acme-challenge/token`).
    pub url: Url,

    /// Name of the service answering the challenge.
    pub service_name: String,

    /// Namespace of the service answering the challenge.
    pub service_namespace: String,

    /// Port of the service answering the challenge.
    pub service_port: IntOrString,
}
