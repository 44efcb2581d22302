//! Rendering Secrets for the terminal

use std::collections::BTreeMap;

use clap::ValueEnum;
use k8s_openapi::api::core::v1::Secret;

use crate::error::{CliError, Result};

/// Output format for `get`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary with key names and sizes
    #[default]
    Text,
    /// Full object as YAML
    Yaml,
    /// Full object as JSON
    Json,
}

/// Render a Secret in the requested format
pub fn render(secret: &Secret, format: OutputFormat, decode: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(secret, decode)),
        OutputFormat::Yaml => serde_yaml::to_string(secret)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| CliError::Other {
                message: format!("failed to render YAML: {e}"),
            }),
        OutputFormat::Json => serde_json::to_string_pretty(secret).map_err(|e| CliError::Other {
            message: format!("failed to render JSON: {e}"),
        }),
    }
}

/// Keys and raw values, `stringData` taking precedence over `data`
pub fn data_entries(secret: &Secret) -> BTreeMap<&str, &[u8]> {
    let mut entries = BTreeMap::new();
    for (key, value) in secret.data.iter().flatten() {
        entries.insert(key.as_str(), value.0.as_slice());
    }
    for (key, value) in secret.string_data.iter().flatten() {
        entries.insert(key.as_str(), value.as_bytes());
    }
    entries
}

fn render_text(secret: &Secret, decode: bool) -> String {
    let meta = &secret.metadata;
    let mut lines = vec![
        format!("Name:       {}", meta.name.as_deref().unwrap_or("<none>")),
        format!("Namespace:  {}", meta.namespace.as_deref().unwrap_or("<none>")),
        format!("Type:       {}", secret.type_.as_deref().unwrap_or("Opaque")),
        format!(
            "Version:    {}",
            meta.resource_version.as_deref().unwrap_or("<none>")
        ),
    ];
    if secret.immutable == Some(true) {
        lines.push("Immutable:  true".to_string());
    }

    lines.push(String::new());
    let entries = data_entries(secret);
    if entries.is_empty() {
        lines.push("Data:       <none>".to_string());
        return lines.join("\n");
    }

    lines.push("Data:".to_string());
    let width = entries.keys().map(|k| k.len()).max().unwrap_or(0);
    for (key, value) in entries {
        let shown = if decode {
            String::from_utf8_lossy(value).into_owned()
        } else {
            format!("{} bytes", value.len())
        };
        lines.push(format!("  {key:<width$}  {shown}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ByteString;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn sample() -> Secret {
        Secret {
            metadata: ObjectMeta {
                name: Some("s1".to_string()),
                namespace: Some("ns1".to_string()),
                resource_version: Some("42".to_string()),
                ..Default::default()
            },
            type_: Some("Opaque".to_string()),
            data: Some(BTreeMap::from([
                ("password".to_string(), ByteString(b"hunter2".to_vec())),
                ("username".to_string(), ByteString(b"admin".to_vec())),
            ])),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_text() {
        insta::assert_snapshot!(render_text(&sample(), false), @r"
        Name:       s1
        Namespace:  ns1
        Type:       Opaque
        Version:    42

        Data:
          password  7 bytes
          username  5 bytes
        ");
    }

    #[test]
    fn test_render_text_decoded() {
        let mut secret = sample();
        secret.immutable = Some(true);
        secret.string_data = Some(BTreeMap::from([(
            "api-token".to_string(),
            "t0k3n".to_string(),
        )]));

        insta::assert_snapshot!(render_text(&secret, true), @r"
        Name:       s1
        Namespace:  ns1
        Type:       Opaque
        Version:    42
        Immutable:  true

        Data:
          api-token  t0k3n
          password   hunter2
          username   admin
        ");
    }

    #[test]
    fn test_render_text_empty() {
        let secret = Secret::default();
        let text = render_text(&secret, false);
        assert!(text.contains("Name:       <none>"));
        assert!(text.ends_with("Data:       <none>"));
    }

    #[test]
    fn test_string_data_overrides_data() {
        let mut secret = sample();
        secret.string_data = Some(BTreeMap::from([(
            "password".to_string(),
            "changed".to_string(),
        )]));
        let entries = data_entries(&secret);
        assert_eq!(entries["password"], b"changed");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_render_json_is_valid() {
        let json = render(&sample(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "Secret");
        assert_eq!(value["apiVersion"], "v1");
        assert_eq!(value["metadata"]["name"], "s1");
        assert_eq!(value["data"]["password"], "aHVudGVyMg==");
    }

    #[test]
    fn test_render_yaml_roundtrip() {
        let yaml = render(&sample(), OutputFormat::Yaml, false).unwrap();
        let parsed: Secret = secretctl_kube::parse_manifest(&yaml).unwrap();
        assert_eq!(parsed, sample());
    }
}
