//! Integration tests for CLI commands
//!
//! Everything here fails before a cluster connection is attempted, so the
//! tests run without a Kubernetes API server.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Workspace with an empty config file so the user's own config is ignored
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "").unwrap();
        Self { dir }
    }

    fn write(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_str().unwrap().to_string()
    }

    fn secretctl(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_secretctl"))
            .args(args)
            .env("SECRETCTL_CONFIG", self.path("config.yaml"))
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute secretctl")
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

mod help {
    use super::*;

    #[test]
    fn test_help_lists_commands() {
        let output = Workspace::new().secretctl(&["--help"]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        for command in ["get", "create", "update", "delete"] {
            assert!(stdout.contains(command), "missing {command} in:\n{stdout}");
        }
    }

    #[test]
    fn test_version() {
        let output = Workspace::new().secretctl(&["--version"]);

        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("secretctl"));
    }
}

mod arguments {
    use super::*;

    #[test]
    fn test_create_without_source_is_usage_error() {
        let output = Workspace::new().secretctl(&["create"]);

        assert_eq!(output.status.code(), Some(64));
        assert!(stderr(&output).contains("nothing to create"));
    }

    #[test]
    fn test_bad_literal_is_usage_error() {
        let output = Workspace::new().secretctl(&["create", "api", "--from-literal", "novalue"]);

        assert_eq!(output.status.code(), Some(64));
        assert!(stderr(&output).contains("novalue"));
    }

    #[test]
    fn test_bad_timeout_is_rejected_by_parser() {
        let output = Workspace::new().secretctl(&["--timeout", "soon", "get", "s1"]);

        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_filename_conflicts_with_literals() {
        let ws = Workspace::new();
        let output = ws.secretctl(&[
            "create",
            "-f",
            &ws.path("secret.yaml"),
            "--from-literal",
            "a=b",
        ]);

        assert_eq!(output.status.code(), Some(2));
    }
}

mod manifests {
    use super::*;

    #[test]
    fn test_missing_manifest_is_io_error() {
        let ws = Workspace::new();
        let output = ws.secretctl(&["update", "-f", &ws.path("missing.yaml")]);

        assert_eq!(output.status.code(), Some(74));
        assert!(stderr(&output).contains("missing.yaml"));
    }

    #[test]
    fn test_wrong_kind_is_data_error() {
        let ws = Workspace::new();
        let file = ws.write(
            "cm.yaml",
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: c\n",
        );

        let output = ws.secretctl(&["create", "-f", &file]);

        assert_eq!(output.status.code(), Some(65));
        assert!(stderr(&output).contains("ConfigMap"));
    }

    #[test]
    fn test_namespace_mismatch_is_usage_error() {
        let ws = Workspace::new();
        let file = ws.write(
            "secret.yaml",
            "apiVersion: v1\nkind: Secret\nmetadata:\n  name: s1\n  namespace: prod\n",
        );

        let output = ws.secretctl(&["update", "-f", &file, "-n", "staging"]);

        assert_eq!(output.status.code(), Some(64));
        assert!(stderr(&output).contains("staging"));
    }
}

mod config {
    use super::*;

    #[test]
    fn test_missing_config_file_is_config_error() {
        let ws = Workspace::new();
        let output = ws.secretctl(&["--config", &ws.path("nope.yaml"), "get", "s1"]);

        assert_eq!(output.status.code(), Some(78));
        assert!(stderr(&output).contains("config file not found"));
    }

    #[test]
    fn test_malformed_config_file_is_config_error() {
        let ws = Workspace::new();
        let file = ws.write("bad.yaml", "requestTimeout: [1, 2]\n");

        let output = ws.secretctl(&["--config", &file, "get", "s1"]);

        assert_eq!(output.status.code(), Some(78));
    }
}
