// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `Ingress` builder for `DomainMapping` resources.
//!
//! Turns one `DomainMapping` into the `Ingress` that routes its hostname to the
//! backend service. All functions are pure: nothing here talks to the API server,
//! and identical inputs always produce equal output.
//!
//! # Routing Layout
//!
//! The produced `Ingress` always has exactly one rule:
//!
//! - **hosts**: hosts of pending ACME challenges, then the mapped hostname (always last)
//! - **paths**: one path per pending ACME challenge, then the catch-all path that
//!   rewrites the host and forwards everything to the backend on port 80
//!
//! Challenge paths must come first. The catch-all path has no path prefix, so any
//! challenge path placed after it would never match and certificate issuance would
//! stall.

use crate::acme::{AcmePathGenerator, Http01Paths};
use crate::constants::{BACKEND_SERVICE_PORT, FULL_TRAFFIC_PERCENT, ORIGINAL_HOST_HEADER};
use crate::crd::{
    DomainMapping, Http01Challenge, HttpIngressPath, HttpIngressRuleValue, HttpOption, Ingress,
    IngressBackend, IngressBackendSplit, IngressRule, IngressSpec, IngressTls, IngressVisibility,
};
use crate::labels::{
    is_excluded_annotation, DOMAIN_MAPPING_NAMESPACE_LABEL, DOMAIN_MAPPING_UID_LABEL,
    INGRESS_CLASS_ANNOTATION,
};
use crate::meta::{child_name, controller_ref, filter_map, union_maps, MergePolicy};
use k8s_openapi::apimachinery::pkg::{apis::meta::v1::ObjectMeta, util::intstr::IntOrString};
use kube::ResourceExt;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Builds the `Ingress` for a `DomainMapping`.
///
/// The `Ingress` lives in the mapping's namespace, is named after the mapping,
/// and is controlled by it so that deleting the mapping garbage-collects it.
///
/// # Arguments
///
/// * `dm` - The `DomainMapping` being realized
/// * `backend_service_name` - Service in the mapping's namespace that receives traffic
/// * `target_host` - Host header requests are rewritten to
/// * `ingress_class` - Value of the ingress-class annotation
/// * `http_option` - HTTP exposure policy, copied into the spec
/// * `tls` - TLS settings, copied into the spec
/// * `challenges` - Pending ACME HTTP-01 challenges, possibly empty
///
/// # Example
///
/// ```rust
/// use domainmapper::crd::{DomainMapping, DomainMappingSpec, HttpOption, KReference};
/// use domainmapper::ingress::make_ingress;
///
/// let mut dm = DomainMapping::new("a.example.com", DomainMappingSpec {
///     reference: KReference { name: "svc".into(), ..Default::default() },
///     tls: None,
/// });
/// dm.metadata.namespace = Some("ns".into());
///
/// let ingress = make_ingress(
///     &dm,
///     "svc",
///     "svc.ns.svc.cluster.local",
///     "net-certmanager",
///     HttpOption::Enabled,
///     vec![],
///     &[],
/// );
/// assert_eq!(ingress.spec.rules[0].hosts, vec!["a.example.com".to_string()]);
/// ```
#[must_use]
pub fn make_ingress(
    dm: &DomainMapping,
    backend_service_name: &str,
    target_host: &str,
    ingress_class: &str,
    http_option: HttpOption,
    tls: Vec<IngressTls>,
    challenges: &[Http01Challenge],
) -> Ingress {
    make_ingress_with(
        &Http01Paths,
        dm,
        backend_service_name,
        target_host,
        ingress_class,
        http_option,
        tls,
        challenges,
    )
}

/// Same as [`make_ingress`], rendering challenge paths with `acme_paths`.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn make_ingress_with<G>(
    acme_paths: &G,
    dm: &DomainMapping,
    backend_service_name: &str,
    target_host: &str,
    ingress_class: &str,
    http_option: HttpOption,
    tls: Vec<IngressTls>,
    challenges: &[Http01Challenge],
) -> Ingress
where
    G: AcmePathGenerator + ?Sized,
{
    let host = dm.name_any();
    let namespace = dm.namespace().unwrap_or_default();

    debug!(
        domain_mapping = %host,
        namespace = %namespace,
        backend = %backend_service_name,
        target_host = %target_host,
        challenges = challenges.len(),
        "Building Ingress for DomainMapping"
    );

    let (mut paths, mut hosts) = acme_paths.generate(challenges, &BTreeSet::from([host.clone()]));
    hosts.push(host.clone());
    paths.push(build_default_path(
        &host,
        &namespace,
        backend_service_name,
        target_host,
    ));

    Ingress {
        metadata: ObjectMeta {
            name: Some(child_name(&host, "")),
            namespace: Some(namespace),
            annotations: Some(build_ingress_annotations(dm, ingress_class)),
            labels: Some(build_ingress_labels(dm)),
            owner_references: Some(vec![controller_ref(dm)]),
            ..Default::default()
        },
        spec: IngressSpec {
            http_option,
            tls,
            rules: vec![IngressRule {
                hosts,
                visibility: IngressVisibility::ExternalIp,
                http: Some(HttpIngressRuleValue { paths }),
            }],
        },
    }
}

/// Builds the annotations of a mapping's `Ingress`.
///
/// Starts from the ingress-class annotation and layers the mapping's own
/// annotations on top, so a mapping that sets the ingress-class key itself keeps
/// its value. Keys the control plane manages are then dropped.
#[must_use]
pub fn build_ingress_annotations(dm: &DomainMapping, ingress_class: &str) -> BTreeMap<String, String> {
    let system = BTreeMap::from([(INGRESS_CLASS_ANNOTATION.to_string(), ingress_class.to_string())]);
    let merged = union_maps(
        Some(&system),
        dm.metadata.annotations.as_ref(),
        MergePolicy::SecondWins,
    );
    filter_map(merged, is_excluded_annotation)
}

/// Builds the labels of a mapping's `Ingress`.
///
/// The owning UID and namespace labels override any user label with the same
/// key. Unlike annotations, labels drive selection and ownership lookups and
/// must not be spoofable from the mapping's metadata.
#[must_use]
pub fn build_ingress_labels(dm: &DomainMapping) -> BTreeMap<String, String> {
    let system = BTreeMap::from([
        (
            DOMAIN_MAPPING_UID_LABEL.to_string(),
            dm.metadata.uid.clone().unwrap_or_default(),
        ),
        (
            DOMAIN_MAPPING_NAMESPACE_LABEL.to_string(),
            dm.namespace().unwrap_or_default(),
        ),
    ]);
    union_maps(
        dm.metadata.labels.as_ref(),
        Some(&system),
        MergePolicy::SecondWins,
    )
}

/// Builds the catch-all path sending all traffic for `host` to the backend.
///
/// The path rewrites the host header to `target_host` and records the original
/// host in the `K-Original-Host` request header.
#[must_use]
pub fn build_default_path(
    host: &str,
    namespace: &str,
    backend_service_name: &str,
    target_host: &str,
) -> HttpIngressPath {
    HttpIngressPath {
        rewrite_host: target_host.to_string(),
        splits: vec![IngressBackendSplit {
            backend: IngressBackend {
                service_namespace: namespace.to_string(),
                service_name: backend_service_name.to_string(),
                service_port: IntOrString::Int(BACKEND_SERVICE_PORT),
            },
            percent: FULL_TRAFFIC_PERCENT,
            append_headers: BTreeMap::from([(
                ORIGINAL_HOST_HEADER.to_string(),
                host.to_string(),
            )]),
        }],
        ..Default::default()
    }
}
