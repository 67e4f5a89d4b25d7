// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for resolving `Ingress` inputs.
//!
//! Building the `Ingress` itself cannot fail. These errors come from the layers
//! around it: parsing network configuration, reading per-mapping annotation
//! overrides and resolving the backend a `DomainMapping` points at.

use thiserror::Error;

/// Errors raised while computing the inputs of an `Ingress` build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// An HTTP option value is neither `Enabled` nor `Redirected`
    ///
    /// Returned for both the `http-protocol` config entry and the
    /// per-mapping `http-option` annotation.
    #[error("Invalid HTTP option '{value}' in '{source_key}': expected Enabled or Redirected")]
    InvalidHttpOption {
        /// Config key or annotation the value was read from
        source_key: String,
        /// The rejected value
        value: String,
    },

    /// A network configuration entry is malformed
    #[error("Invalid value '{value}' for config key '{key}': {reason}")]
    InvalidConfigValue {
        /// The config key
        key: String,
        /// The rejected value
        value: String,
        /// Explanation of what is invalid
        reason: String,
    },

    /// The mapping references a backend outside its own namespace
    ///
    /// The ingress backend must live next to the `DomainMapping`, so cross-namespace
    /// references are never routable.
    #[error("DomainMapping in namespace '{namespace}' references a backend in namespace '{ref_namespace}'")]
    CrossNamespaceRef {
        /// Namespace of the `DomainMapping`
        namespace: String,
        /// Namespace named by `spec.ref`
        ref_namespace: String,
    },

    /// A metadata field required for resolution is absent
    #[error("DomainMapping is missing required field '{field}'")]
    MissingField {
        /// Path of the missing field (e.g., `metadata.namespace`)
        field: String,
    },
}

impl MappingError {
    /// Short CamelCase reason suitable for a status condition.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            MappingError::InvalidHttpOption { .. } => "InvalidHttpOption",
            MappingError::InvalidConfigValue { .. } => "InvalidConfiguration",
            MappingError::CrossNamespaceRef { .. } => "CrossNamespaceRef",
            MappingError::MissingField { .. } => "MissingField",
        }
    }
}
