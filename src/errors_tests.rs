// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `errors`

#[cfg(test)]
mod tests {
    use crate::errors::MappingError;

    #[test]
    fn test_invalid_http_option_display() {
        let err = MappingError::InvalidHttpOption {
            source_key: "http-protocol".into(),
            value: "sometimes".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid HTTP option 'sometimes' in 'http-protocol': expected Enabled or Redirected"
        );
        assert_eq!(err.status_reason(), "InvalidHttpOption");
    }

    #[test]
    fn test_cross_namespace_ref_display() {
        let err = MappingError::CrossNamespaceRef {
            namespace: "apps".into(),
            ref_namespace: "other".into(),
        };
        assert!(err.to_string().contains("'apps'"));
        assert!(err.to_string().contains("'other'"));
        assert_eq!(err.status_reason(), "CrossNamespaceRef");
    }

    #[test]
    fn test_status_reasons() {
        let config = MappingError::InvalidConfigValue {
            key: "cluster-domain".into(),
            value: String::new(),
            reason: "value must not be empty".into(),
        };
        assert_eq!(config.status_reason(), "InvalidConfiguration");

        let missing = MappingError::MissingField {
            field: "spec.ref.name".into(),
        };
        assert_eq!(missing.status_reason(), "MissingField");
        assert_eq!(
            missing.to_string(),
            "DomainMapping is missing required field 'spec.ref.name'"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = MappingError::MissingField {
            field: "metadata.namespace".into(),
        }
        .into();
        assert!(err.downcast_ref::<MappingError>().is_some());
    }
}
