// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Ingress paths for pending ACME HTTP-01 challenges.
//!
//! While a certificate is being issued, the ACME server fetches a token from
//! `http://<host>/.well-known/acme-challenge/<token>`. Those requests have to reach
//! the solver service instead of the mapped backend, so every challenge becomes
//! its own path entry that callers place ahead of the catch-all route.
//!
//! The host of a challenge is its URL authority without userinfo, so a non-default
//! port stays part of it (`b.example.com:8080`). A URL with no path yields `/`,
//! which `url` normalizes for HTTP schemes and which matches every request just
//! like an empty path would.

use crate::constants::FULL_TRAFFIC_PERCENT;
use crate::crd::{Http01Challenge, HttpIngressPath, IngressBackend, IngressBackendSplit};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use url::Position;

/// Turns pending challenges into ingress paths and the extra hosts they need.
pub trait AcmePathGenerator {
    /// Returns one path per challenge, in challenge order, and the challenge hosts
    /// not already present in `excluded_hosts`, also in challenge order.
    fn generate(
        &self,
        challenges: &[Http01Challenge],
        excluded_hosts: &BTreeSet<String>,
    ) -> (Vec<HttpIngressPath>, Vec<String>);
}

/// Routes each challenge URL path to its solver service with all traffic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Http01Paths;

impl AcmePathGenerator for Http01Paths {
    fn generate(
        &self,
        challenges: &[Http01Challenge],
        excluded_hosts: &BTreeSet<String>,
    ) -> (Vec<HttpIngressPath>, Vec<String>) {
        let mut paths = Vec::with_capacity(challenges.len());
        let mut hosts = Vec::new();

        for challenge in challenges {
            let host = &challenge.url[Position::BeforeHost..Position::AfterPort];
            if !excluded_hosts.contains(host) {
                hosts.push(host.to_string());
            }

            debug!(
                host = %host,
                path = %challenge.url.path(),
                service = %challenge.service_name,
                "Adding ACME challenge path"
            );

            paths.push(HttpIngressPath {
                path: challenge.url.path().to_string(),
                splits: vec![IngressBackendSplit {
                    backend: IngressBackend {
                        service_namespace: challenge.service_namespace.clone(),
                        service_name: challenge.service_name.clone(),
                        service_port: challenge.service_port.clone(),
                    },
                    percent: FULL_TRAFFIC_PERCENT,
                    append_headers: BTreeMap::new(),
                }],
                ..Default::default()
            });
        }

        (paths, hosts)
    }
}
