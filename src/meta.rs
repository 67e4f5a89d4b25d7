// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Object metadata helpers shared by resource builders.
//!
//! All functions are pure: map merging with an explicit collision policy, key
//! filtering, deterministic child naming and controller owner references.

use crate::constants::{MAX_NAME_LEN, NAME_HASH_LEN};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{Resource, ResourceExt};
use md5::{Digest, Md5};
use std::collections::BTreeMap;

/// Which side of a [`union_maps`] call keeps its value when both maps hold a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergePolicy {
    /// Values from the first map are kept
    FirstWins,
    /// Values from the second map overwrite the first
    SecondWins,
}

/// Merges two optional string maps into a new map.
///
/// Missing maps are treated as empty. On key collision the value is taken from
/// the side named by `policy`.
///
/// # Example
///
/// ```rust
/// use domainmapper::meta::{union_maps, MergePolicy};
/// use std::collections::BTreeMap;
///
/// let first = BTreeMap::from([("a".to_string(), "1".to_string())]);
/// let second = BTreeMap::from([("a".to_string(), "2".to_string())]);
///
/// let merged = union_maps(Some(&first), Some(&second), MergePolicy::FirstWins);
/// assert_eq!(merged["a"], "1");
/// ```
#[must_use]
pub fn union_maps(
    first: Option<&BTreeMap<String, String>>,
    second: Option<&BTreeMap<String, String>>,
    policy: MergePolicy,
) -> BTreeMap<String, String> {
    let mut merged = first.cloned().unwrap_or_default();
    for (key, value) in second.into_iter().flatten() {
        match policy {
            MergePolicy::SecondWins => {
                merged.insert(key.clone(), value.clone());
            }
            MergePolicy::FirstWins => {
                merged
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
    }
    merged
}

/// Returns `map` without the keys for which `reject` returns `true`.
#[must_use]
pub fn filter_map<F>(map: BTreeMap<String, String>, reject: F) -> BTreeMap<String, String>
where
    F: Fn(&str) -> bool,
{
    map.into_iter().filter(|(key, _)| !reject(key)).collect()
}

/// Derives the name of a child object from its parent's name.
///
/// The result is `parent + suffix` whenever that fits in a Kubernetes object
/// name. Longer names are shortened by truncating the parent and inserting a
/// digest of it, so distinct parents keep distinct children and the same parent
/// always yields the same child.
///
/// # Example
///
/// ```rust
/// use domainmapper::meta::child_name;
///
/// assert_eq!(child_name("a.example.com", ""), "a.example.com");
/// assert_eq!(child_name("hello", "-tls"), "hello-tls");
///
/// let long = "x".repeat(80);
/// assert_eq!(child_name(&long, "").len(), 63);
/// ```
#[must_use]
pub fn child_name(parent: &str, suffix: &str) -> String {
    if parent.len() + suffix.len() <= MAX_NAME_LEN {
        return format!("{parent}{suffix}");
    }

    let head = MAX_NAME_LEN - NAME_HASH_LEN;
    if suffix.len() >= head {
        // The suffix alone leaves no room for a parent prefix; hash both and
        // pad with the start of the suffix.
        let digest = name_digest(&format!("{parent}{suffix}"));
        let mut name = format!("{}{digest}", truncate(parent, head));
        let remaining = MAX_NAME_LEN.saturating_sub(name.len());
        name.push_str(truncate(suffix, remaining));
        return name.trim_end_matches('-').to_string();
    }

    format!(
        "{}{}{suffix}",
        truncate(parent, head - suffix.len()),
        name_digest(parent)
    )
}

/// Builds the controller owner reference pointing at `owner`.
///
/// Deleting the owner lets the garbage collector remove the dependent, and
/// `blockOwnerDeletion` keeps foreground deletion of the owner waiting for it.
/// A missing UID becomes an empty string.
#[must_use]
pub fn controller_ref<K>(owner: &K) -> OwnerReference
where
    K: Resource<DynamicType = ()>,
{
    OwnerReference {
        api_version: K::api_version(&()).to_string(),
        kind: K::kind(&()).to_string(),
        name: owner.name_any(),
        uid: owner.meta().uid.clone().unwrap_or_default(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }
}

/// Lowercase hex MD5 of `input`, [`NAME_HASH_LEN`] characters long.
///
/// MD5 keeps generated names identical to the ones Knative itself derives, so
/// existing `Ingress` objects are adopted rather than duplicated.
fn name_digest(input: &str) -> String {
    format!("{:x}", Md5::digest(input.as_bytes()))
}

/// Longest prefix of `s` no longer than `max` bytes that ends on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
