// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reading input manifests from disk and rendering output manifests.

use crate::config::NetworkConfig;
use crate::constants::{KIND_DOMAIN_MAPPING, SERVING_API_GROUP};
use crate::crd::{DomainMapping, Http01Challenge};
use anyhow::{bail, Context, Result};
use k8s_openapi::api::core::v1::ConfigMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads a YAML (or JSON) document from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not deserialize into `T`.
pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!(path = %path.display(), "Reading manifest");
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Reads a `DomainMapping` manifest.
///
/// The document must declare `kind: DomainMapping` in the `serving.knative.dev`
/// group. Any version of that group is accepted.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or holds another kind.
pub fn read_domain_mapping(path: &Path) -> Result<DomainMapping> {
    let doc: serde_yaml::Value = read_yaml(path)?;

    let kind = doc.get("kind").and_then(serde_yaml::Value::as_str).unwrap_or_default();
    let api_version = doc
        .get("apiVersion")
        .and_then(serde_yaml::Value::as_str)
        .unwrap_or_default();
    let group = api_version.split_once('/').map_or("", |(group, _)| group);
    if kind != KIND_DOMAIN_MAPPING || group != SERVING_API_GROUP {
        bail!(
            "{} holds {api_version:?} {kind:?}, expected a {KIND_DOMAIN_MAPPING} in {SERVING_API_GROUP}",
            path.display()
        );
    }

    serde_yaml::from_value(doc).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Reads a YAML list of pending HTTP-01 challenges.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_challenges(path: &Path) -> Result<Vec<Http01Challenge>> {
    read_yaml(path)
}

/// Reads a `config-network` `ConfigMap` manifest into a [`NetworkConfig`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or holds invalid settings.
pub fn read_network_config(path: &Path) -> Result<NetworkConfig> {
    let cm: ConfigMap = read_yaml(path)?;
    NetworkConfig::from_configmap(&cm)
        .with_context(|| format!("Invalid network configuration in {}", path.display()))
}

/// Renders a resource as a YAML document.
///
/// # Errors
///
/// Returns an error if the resource cannot be serialized.
pub fn to_yaml<T: Serialize>(resource: &T) -> Result<String> {
    serde_yaml::to_string(resource).context("Failed to render YAML")
}
