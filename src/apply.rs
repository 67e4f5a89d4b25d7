// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Pushing a generated `Ingress` to the cluster.
//!
//! [`make_ingress`](crate::ingress::make_ingress) only describes what the
//! `Ingress` for a `DomainMapping` should look like. [`apply_ingress`] hands that
//! object to the API server under a named field manager. The first run creates the
//! object. Later runs send a server-side apply patch, so fields this crate stops
//! emitting are released by its manager and fields owned by other writers are left
//! alone.
//!
//! # Example
//!
//! ```rust,no_run
//! use domainmapper::apply::apply_ingress;
//! use domainmapper::crd::Ingress;
//! use kube::Client;
//! use anyhow::Result;
//!
//! async fn example(client: &Client, ingress: &Ingress) -> Result<()> {
//!     apply_ingress(client, ingress, "domainmapper").await
//! }
//! ```

use crate::crd::Ingress;
use anyhow::{Context, Result};
use kube::api::{Patch, PatchParams, PostParams};
use kube::{Api, Client, ResourceExt};
use tracing::{debug, info};

/// Writes `ingress` to the namespace named in its metadata.
///
/// The object is created when the API server has no `Ingress` of that name yet,
/// otherwise it is patched with server-side apply as `field_manager`.
///
/// # Errors
///
/// Fails when the `Ingress` carries no name or namespace, or when the API server
/// rejects the read, create or patch.
pub async fn apply_ingress(client: &Client, ingress: &Ingress, field_manager: &str) -> Result<()> {
    let name = ingress
        .metadata
        .name
        .as_deref()
        .context("generated Ingress has no name")?;
    let namespace = ingress
        .metadata
        .namespace
        .as_deref()
        .context("generated Ingress has no namespace")?;

    let ingresses: Api<Ingress> = Api::namespaced(client.clone(), namespace);
    let existing = ingresses
        .get_opt(name)
        .await
        .with_context(|| format!("reading Ingress {namespace}/{name}"))?;

    debug!(
        namespace = %namespace,
        ingress = %name,
        field_manager = %field_manager,
        exists = existing.is_some(),
        "Writing Ingress for DomainMapping"
    );

    match existing {
        Some(current) => {
            ingresses
                .patch(
                    name,
                    &PatchParams::apply(field_manager),
                    &Patch::Apply(ingress),
                )
                .await
                .with_context(|| format!("patching Ingress {namespace}/{name}"))?;
            info!(
                namespace = %namespace,
                ingress = %name,
                previous_version = %current.resource_version().unwrap_or_default(),
                "Patched Ingress"
            );
        }
        None => {
            ingresses
                .create(&PostParams::default(), ingress)
                .await
                .with_context(|| format!("creating Ingress {namespace}/{name}"))?;
            info!(namespace = %namespace, ingress = %name, "Created Ingress");
        }
    }

    Ok(())
}
