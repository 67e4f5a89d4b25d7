// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `manifest`

#[cfg(test)]
mod tests {
    use crate::crd::HttpOption;
    use crate::manifest::{read_challenges, read_domain_mapping, read_network_config, to_yaml};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_domain_mapping() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "dm.yaml",
            r"
apiVersion: serving.knative.dev/v1beta1
kind: DomainMapping
metadata:
  name: a.example.com
  namespace: ns
spec:
  ref:
    apiVersion: serving.knative.dev/v1
    kind: Service
    name: hello
",
        );

        let dm = read_domain_mapping(&path).unwrap();
        assert_eq!(dm.metadata.name.as_deref(), Some("a.example.com"));
        assert_eq!(dm.spec.reference.name, "hello");
    }

    #[test]
    fn test_read_domain_mapping_accepts_json() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "dm.json",
            r#"{"apiVersion":"serving.knative.dev/v1beta1","kind":"DomainMapping",
                "metadata":{"name":"a.example.com","namespace":"ns"},
                "spec":{"ref":{"apiVersion":"v1","kind":"Service","name":"hello"}}}"#,
        );

        let dm = read_domain_mapping(&path).unwrap();
        assert_eq!(dm.metadata.namespace.as_deref(), Some("ns"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_domain_mapping(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_read_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "dm.yaml", "spec: [unterminated");
        let err = read_domain_mapping(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_read_domain_mapping_rejects_other_kind() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "ingress.yaml",
            r"
apiVersion: networking.internal.knative.dev/v1alpha1
kind: Ingress
metadata:
  name: a.example.com
  namespace: ns
spec: {}
",
        );

        let err = read_domain_mapping(&path).unwrap_err();
        assert!(err.to_string().contains("expected a DomainMapping"), "{err:#}");
    }

    #[test]
    fn test_read_domain_mapping_rejects_other_group() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "dm.yaml",
            r"
apiVersion: example.com/v1
kind: DomainMapping
metadata:
  name: a.example.com
spec:
  ref:
    apiVersion: v1
    kind: Service
    name: hello
",
        );

        let err = read_domain_mapping(&path).unwrap_err();
        assert!(err.to_string().contains("serving.knative.dev"), "{err:#}");
    }

    #[test]
    fn test_read_domain_mapping_accepts_older_version() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "dm.yaml",
            r"
apiVersion: serving.knative.dev/v1alpha1
kind: DomainMapping
metadata:
  name: a.example.com
  namespace: ns
spec:
  ref:
    apiVersion: serving.knative.dev/v1
    kind: Service
    name: hello
",
        );

        assert!(read_domain_mapping(&path).is_ok());
    }

    #[test]
    fn test_read_challenges() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "challenges.yaml",
            r"
- url: http://b.example.com/.well-known/acme-challenge/one
  serviceName: solver
  serviceNamespace: ns
  servicePort: 8089
- url: http://c.example.com/.well-known/acme-challenge/two
  serviceName: solver
  serviceNamespace: ns
  servicePort: http
",
        );

        let challenges = read_challenges(&path).unwrap();
        assert_eq!(challenges.len(), 2);
        assert_eq!(challenges[1].url.host_str(), Some("c.example.com"));
    }

    #[test]
    fn test_read_network_config() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config-network.yaml",
            r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: config-network
  namespace: knative-serving
data:
  ingress-class: "kourier.ingress.networking.knative.dev"
  http-protocol: "Redirected"
"#,
        );

        let config = read_network_config(&path).unwrap();
        assert_eq!(
            config.default_ingress_class,
            "kourier.ingress.networking.knative.dev"
        );
        assert_eq!(config.http_protocol, HttpOption::Redirected);
    }

    #[test]
    fn test_read_invalid_network_config() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config-network.yaml",
            r"
apiVersion: v1
kind: ConfigMap
metadata:
  name: config-network
data:
  http-protocol: sometimes
",
        );

        let err = read_network_config(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid network configuration"));
    }

    #[test]
    fn test_to_yaml() {
        let yaml = to_yaml(&HttpOption::Redirected).unwrap();
        assert_eq!(yaml.trim(), "Redirected");
    }
}
