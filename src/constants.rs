// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for domainmapper.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

// The `#[kube(...)]` attributes in `crd` only take literals and repeat these.

/// API group of the `DomainMapping` resource
pub const SERVING_API_GROUP: &str = "serving.knative.dev";

/// API version of the `DomainMapping` resource
pub const SERVING_API_VERSION: &str = "v1beta1";

/// API group of the networking `Ingress` resource
pub const NETWORKING_API_GROUP: &str = "networking.internal.knative.dev";

/// API version of the networking `Ingress` resource
pub const NETWORKING_API_VERSION: &str = "v1alpha1";

/// Kind name for `DomainMapping` resource
pub const KIND_DOMAIN_MAPPING: &str = "DomainMapping";

/// Kind name for the networking `Ingress` resource
pub const KIND_INGRESS: &str = "Ingress";

// ============================================================================
// Routing Constants
// ============================================================================

/// Port on the backend service that receives mapped traffic
pub const BACKEND_SERVICE_PORT: i32 = 80;

/// Traffic percentage sent to the single backend split
pub const FULL_TRAFFIC_PERCENT: i32 = 100;

/// Request header carrying the host the client originally asked for
pub const ORIGINAL_HOST_HEADER: &str = "K-Original-Host";

// ============================================================================
// Naming Constants
// ============================================================================

/// Longest name a Kubernetes object may carry (DNS-1123 label)
pub const MAX_NAME_LEN: usize = 63;

/// Number of hex characters of the digest appended to truncated names
pub const NAME_HASH_LEN: usize = 32;

// ============================================================================
// Network Configuration Defaults
// ============================================================================

/// Name of the `ConfigMap` holding network configuration
pub const NETWORK_CONFIG_NAME: &str = "config-network";

/// Ingress class used when neither the mapping nor the config names one
pub const DEFAULT_INGRESS_CLASS: &str = "istio.ingress.networking.knative.dev";

/// Cluster DNS suffix used to build service hostnames
pub const DEFAULT_CLUSTER_DOMAIN: &str = "cluster.local";

// ============================================================================
// CLI Constants
// ============================================================================

/// Field manager name used for server-side apply
pub const DEFAULT_FIELD_MANAGER: &str = "domainmapper";

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 2;
