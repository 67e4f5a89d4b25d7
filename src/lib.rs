// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # domainmapper - Ingress generation for Knative `DomainMapping` resources
//!
//! A `DomainMapping` asks for an external hostname to be routed to a service in
//! the same namespace. domainmapper turns that request into the networking
//! `Ingress` an ingress implementation programs into its proxy.
//!
//! ## Modules
//!
//! - [`crd`] - `DomainMapping`, `Ingress` and ACME challenge types
//! - [`ingress`] - The `Ingress` builder
//! - [`acme`] - Paths for pending ACME HTTP-01 challenges
//! - [`meta`] - Map merging, child naming and owner references
//! - [`resolve`] - Backend, ingress class, HTTP option and TLS resolution
//! - [`config`] - `config-network` settings
//! - [`apply`] - Writing a generated `Ingress` to the cluster
//! - [`manifest`] - Reading and rendering YAML manifests
//!
//! ## Example
//!
//! ```rust
//! use domainmapper::config::NetworkConfig;
//! use domainmapper::crd::{DomainMapping, DomainMappingSpec, KReference};
//! use domainmapper::ingress::make_ingress;
//! use domainmapper::resolve::{backend_for, http_option_for, ingress_class_for, tls_for};
//!
//! let mut dm = DomainMapping::new("a.example.com", DomainMappingSpec {
//!     reference: KReference { name: "hello".into(), ..Default::default() },
//!     tls: None,
//! });
//! dm.metadata.namespace = Some("default".into());
//!
//! let config = NetworkConfig::default();
//! let backend = backend_for(&dm, &config).unwrap();
//! let ingress = make_ingress(
//!     &dm,
//!     &backend.service_name,
//!     &backend.target_host,
//!     &ingress_class_for(&dm, &config),
//!     http_option_for(&dm, &config).unwrap(),
//!     tls_for(&dm),
//!     &[],
//! );
//! assert_eq!(ingress.metadata.namespace.as_deref(), Some("default"));
//! ```

pub mod acme;
pub mod apply;
pub mod config;
pub mod constants;
pub mod crd;
pub mod errors;
pub mod ingress;
pub mod labels;
pub mod manifest;
pub mod meta;
pub mod resolve;

#[cfg(test)]
mod errors_tests;
#[cfg(test)]
mod manifest_tests;
#[cfg(test)]
mod meta_tests;
