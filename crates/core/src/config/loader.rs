//! Project loader for the `.agent-deps/` directory structure.
//!
//! This module provides functionality to load and parse every file the
//! resolver reads from the `.agent-deps/` directory, including:
//! - `config.toml`: resolver settings
//! - `agents/*.yaml`, `agents/*.yml`, `agents/*.json`: agent manifests

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::ProjectConfig;
use ar_protocol::config_models::ResolverConfig;
use ar_protocol::manifest_models::AgentManifest;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the project directory under the root.
pub const PROJECT_DIR: &str = ".agent-deps";

/// Loads the resolver settings and all manifests of a project.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.agent-deps/` folder
///
/// # Returns
///
/// A `ProjectConfig` with the settings and every manifest. If directories or
/// files are missing (but the root exists), returns default settings and an
/// empty manifest set rather than an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (TOML, YAML or JSON)
/// - A manifest has no usable name
///
/// # Example
///
/// ```rust,no_run
/// use ar_core::config::loader::load_project;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let project = load_project(Path::new(".")).await?;
/// println!("Loaded {} manifests", project.manifests.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_project(root: &Path) -> ConfigResult<ProjectConfig> {
    let project_dir = root.join(PROJECT_DIR);

    if !project_dir.exists() {
        tracing::debug!(path = %project_dir.display(), "no project directory, using defaults");
        return Ok(ProjectConfig::default());
    }

    let config = load_resolver_config(&project_dir)?;
    let manifests = load_manifests(&project_dir)?;
    tracing::debug!(count = manifests.len(), "loaded agent manifests");

    Ok(ProjectConfig { config, manifests })
}

/// Loads resolver settings from `config.toml`.
fn load_resolver_config(project_dir: &Path) -> ConfigResult<ResolverConfig> {
    let config_path = project_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(ResolverConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: ResolverConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    Ok(config)
}

/// Loads all manifests from `agents/`, in file name order.
fn load_manifests(project_dir: &Path) -> ConfigResult<Vec<AgentManifest>> {
    let agents_dir = project_dir.join("agents");

    if !agents_dir.exists() {
        return Ok(Vec::new());
    }

    let mut manifests = Vec::new();

    for entry in WalkDir::new(&agents_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: agents_dir.clone(),
            source,
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !is_manifest_file(path) {
            continue;
        }

        manifests.push(load_manifest_file(path)?);
    }

    Ok(manifests)
}

fn is_manifest_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml" | "yml" | "json")
    )
}

/// Loads a single manifest file.
///
/// `.json` files are parsed as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if the
/// manifest's `metadata.name` is empty.
pub fn load_manifest_file(path: &Path) -> ConfigResult<AgentManifest> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: AgentManifest = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        serde_json::from_str(&content).map_err(|source| ConfigError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source,
        })?
    };

    if manifest.name().trim().is_empty() {
        return Err(ConfigError::InvalidManifest {
            path: path.to_path_buf(),
            reason: "metadata.name must not be empty".to_string(),
        });
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const WORKER_YAML: &str = r#"apiVersion: ossa/v0.3.3
kind: Agent
metadata:
  name: worker
  version: 1.2.0
spec:
  dependencies:
    agents:
      - name: store
        version: ^2.0.0
  messaging:
    publishes:
      - channel: task.completed
        schema:
          type: object
          required: [id]
"#;

    #[tokio::test]
    async fn test_load_project_acceptance() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let project_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(project_dir.join("agents")).expect("Failed to create agents dir");
        fs::write(
            project_dir.join("config.toml"),
            "check-all-subscriptions = true\nvalidate-examples = false\n",
        )
        .expect("Failed to write config.toml");
        fs::write(project_dir.join("agents/worker.yaml"), WORKER_YAML)
            .expect("Failed to write manifest");
        fs::write(
            project_dir.join("agents/store.json"),
            r#"{"metadata": {"name": "store", "version": "2.3.1"}}"#,
        )
        .expect("Failed to write manifest");

        let project = load_project(root).await.expect("Failed to load project");

        assert!(project.config.check_all_subscriptions);
        assert!(!project.config.validate_examples);
        assert!(project.config.check_installed_versions, "Unset keys keep defaults");

        assert_eq!(project.manifests.len(), 2);
        // Sorted by file name: store.json before worker.yaml.
        assert_eq!(project.manifests[0].name(), "store");
        assert_eq!(project.manifests[0].version(), "2.3.1");
        let worker = &project.manifests[1];
        assert_eq!(worker.name(), "worker");
        assert_eq!(worker.dependencies().len(), 1);
        assert_eq!(worker.dependencies()[0].version, "^2.0.0");
        assert!(worker.dependencies()[0].required);
    }

    #[tokio::test]
    async fn test_load_project_empty_directory() {
        let dir = tempdir().expect("Failed to create temp dir");

        let project = load_project(dir.path())
            .await
            .expect("Should handle missing .agent-deps");

        assert_eq!(project.config, ResolverConfig::default());
        assert!(project.manifests.is_empty());
    }

    #[tokio::test]
    async fn test_load_project_partial() {
        let dir = tempdir().expect("Failed to create temp dir");
        let project_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(&project_dir).expect("Failed to create .agent-deps");
        fs::write(project_dir.join("config.toml"), "check-installed-versions = false")
            .expect("Failed to write config.toml");

        let project = load_project(dir.path())
            .await
            .expect("Should handle partial project");

        assert!(!project.config.check_installed_versions);
        assert!(project.manifests.is_empty());
    }

    #[tokio::test]
    async fn test_load_project_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let project_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(&project_dir).expect("Failed to create .agent-deps");
        fs::write(project_dir.join("config.toml"), "validate-examples = [unclosed")
            .expect("Failed to write config.toml");

        let result = load_project(dir.path()).await;
        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }

    #[tokio::test]
    async fn test_load_project_invalid_yaml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let project_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(project_dir.join("agents")).expect("Failed to create agents dir");
        fs::write(project_dir.join("agents/broken.yaml"), "metadata: [not, a, map")
            .expect("Failed to write manifest");

        match load_project(dir.path()).await {
            Err(ConfigError::YamlParse { path, .. }) => assert!(path.ends_with("broken.yaml")),
            other => panic!("Expected YamlParse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_project_invalid_json() {
        let dir = tempdir().expect("Failed to create temp dir");
        let project_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(project_dir.join("agents")).expect("Failed to create agents dir");
        fs::write(project_dir.join("agents/broken.json"), "{\"metadata\":")
            .expect("Failed to write manifest");

        let result = load_project(dir.path()).await;
        assert!(matches!(result, Err(ConfigError::JsonParse { .. })));
    }

    #[tokio::test]
    async fn test_load_project_rejects_empty_name() {
        let dir = tempdir().expect("Failed to create temp dir");
        let project_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(project_dir.join("agents")).expect("Failed to create agents dir");
        fs::write(project_dir.join("agents/nameless.yml"), "metadata:\n  name: \"\"\n")
            .expect("Failed to write manifest");

        match load_project(dir.path()).await {
            Err(ConfigError::InvalidManifest { path, reason }) => {
                assert!(path.ends_with("nameless.yml"));
                assert!(reason.contains("metadata.name"));
            }
            other => panic!("Expected InvalidManifest error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_project_ignores_non_matching_files() {
        let dir = tempdir().expect("Failed to create temp dir");
        let project_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(project_dir.join("agents/nested")).expect("Failed to create dirs");
        fs::write(project_dir.join("agents/readme.md"), "# Not a manifest")
            .expect("Failed to write md file");
        fs::write(project_dir.join("agents/nested/deep.yaml"), WORKER_YAML)
            .expect("Failed to write nested manifest");
        fs::write(project_dir.join("agents/worker.yml"), WORKER_YAML)
            .expect("Failed to write manifest");

        let project = load_project(dir.path())
            .await
            .expect("Should ignore non-matching files");

        assert_eq!(project.manifests.len(), 1, "Only top-level manifest files are loaded");
        assert_eq!(project.manifests[0].name(), "worker");
    }

    #[test]
    fn test_load_manifest_file_directly() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("worker-v1.yaml");
        fs::write(&path, WORKER_YAML).expect("Failed to write manifest");

        let manifest = load_manifest_file(&path).expect("Should load a single manifest");
        assert_eq!(manifest.name(), "worker");
        assert_eq!(manifest.api_version, "ossa/v0.3.3");
    }

    #[test]
    fn test_load_manifest_file_missing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let result = load_manifest_file(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}
