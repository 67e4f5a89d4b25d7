// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `meta`

#[cfg(test)]
mod tests {
    use crate::constants::{KIND_DOMAIN_MAPPING, SERVING_API_GROUP, SERVING_API_VERSION};
    use crate::crd::{DomainMapping, DomainMappingSpec, KReference};
    use crate::meta::{child_name, controller_ref, filter_map, union_maps, MergePolicy};
    use std::collections::BTreeMap;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_union_maps_second_wins() {
        let first = map(&[("a", "1"), ("b", "1")]);
        let second = map(&[("b", "2"), ("c", "2")]);

        let merged = union_maps(Some(&first), Some(&second), MergePolicy::SecondWins);
        assert_eq!(merged, map(&[("a", "1"), ("b", "2"), ("c", "2")]));
    }

    #[test]
    fn test_union_maps_first_wins() {
        let first = map(&[("a", "1"), ("b", "1")]);
        let second = map(&[("b", "2"), ("c", "2")]);

        let merged = union_maps(Some(&first), Some(&second), MergePolicy::FirstWins);
        assert_eq!(merged, map(&[("a", "1"), ("b", "1"), ("c", "2")]));
    }

    #[test]
    fn test_union_maps_missing_inputs() {
        let only = map(&[("a", "1")]);

        assert!(union_maps(None, None, MergePolicy::SecondWins).is_empty());
        assert_eq!(union_maps(Some(&only), None, MergePolicy::SecondWins), only);
        assert_eq!(union_maps(None, Some(&only), MergePolicy::FirstWins), only);
    }

    #[test]
    fn test_filter_map() {
        let input = map(&[("keep", "1"), ("drop", "2")]);
        let filtered = filter_map(input, |key| key == "drop");
        assert_eq!(filtered, map(&[("keep", "1")]));
    }

    #[test]
    fn test_child_name_short() {
        assert_eq!(child_name("a.example.com", ""), "a.example.com");
        assert_eq!(child_name("route", "-ingress"), "route-ingress");
    }

    #[test]
    fn test_child_name_exactly_max_length() {
        let parent = "p".repeat(60);
        assert_eq!(child_name(&parent, "-ab"), format!("{parent}-ab"));
    }

    #[test]
    fn test_child_name_long_parent() {
        let parent = "p".repeat(70);
        let name = child_name(&parent, "-x");

        assert_eq!(name.len(), 63);
        assert!(name.starts_with(&"p".repeat(29)));
        assert!(name.ends_with("-x"));
        assert_eq!(name, child_name(&parent, "-x"));
    }

    #[test]
    fn test_child_name_distinct_parents_stay_distinct() {
        let a = format!("{}a", "p".repeat(70));
        let b = format!("{}b", "p".repeat(70));
        assert_ne!(child_name(&a, ""), child_name(&b, ""));
    }

    #[test]
    fn test_child_name_long_suffix() {
        let parent = "p".repeat(30);
        let suffix = format!("-{}", "s".repeat(39));
        let name = child_name(&parent, &suffix);

        assert!(name.len() <= 63);
        assert!(name.starts_with(&parent));
        assert!(!name.ends_with('-'));
    }

    #[test]
    fn test_child_name_multibyte_parent() {
        let parent = "é".repeat(40);
        let name = child_name(&parent, "");
        assert!(name.len() <= 63);
        assert!(name.starts_with('é'));
    }

    #[test]
    fn test_controller_ref() {
        let mut dm = DomainMapping::new(
            "a.example.com",
            DomainMappingSpec {
                reference: KReference::default(),
                tls: None,
            },
        );
        dm.metadata.uid = Some("uid-1".into());

        let owner = controller_ref(&dm);
        assert_eq!(
            owner.api_version,
            format!("{SERVING_API_GROUP}/{SERVING_API_VERSION}")
        );
        assert_eq!(owner.kind, KIND_DOMAIN_MAPPING);
        assert_eq!(owner.name, "a.example.com");
        assert_eq!(owner.uid, "uid-1");
        assert_eq!(owner.controller, Some(true));
        assert_eq!(owner.block_owner_deletion, Some(true));
    }

    #[test]
    fn test_child_name_digest_matches_knative() {
        // md5("x" * 64) = c1bb4f81d892b2d57947682aeb252456
        let parent = "x".repeat(64);
        let expected = format!("{}c1bb4f81d892b2d57947682aeb252456", "x".repeat(31));
        assert_eq!(child_name(&parent, ""), expected);
        assert_eq!(expected.len(), 63);
    }
}
