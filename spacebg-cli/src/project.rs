use std::path::{Path, PathBuf};

use anyhow::Context;
use spacebg_core::SceneConfig;

/// File name of the scene config.
pub const CONFIG_FILE: &str = "spacebg.toml";

/// The spacebg workspace the CLI operates in.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    /// Directory holding the workspace Cargo.toml
    pub root: PathBuf,
    /// The crate wasm-pack builds
    pub web_crate: PathBuf,
}

impl WorkspaceContext {
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }
}

/// Detect the workspace from the current directory, walking up.
pub fn detect_workspace() -> anyhow::Result<WorkspaceContext> {
    detect_workspace_from(&std::env::current_dir()?)
}

/// Detect the workspace starting from a specific directory, walking up.
pub fn detect_workspace_from(start: &Path) -> anyhow::Result<WorkspaceContext> {
    let mut dir = start.to_path_buf();
    loop {
        let web_crate = dir.join("spacebg-web");
        if dir.join("Cargo.toml").exists() && web_crate.join("Cargo.toml").exists() {
            return Ok(WorkspaceContext {
                root: dir,
                web_crate,
            });
        }
        if !dir.pop() {
            anyhow::bail!(
                "Could not find the spacebg workspace.\n\
                 Run `spacebg` from within the repository (the directory holding spacebg-web/)."
            );
        }
    }
}

/// Nearest spacebg.toml at or above `start`.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|path| path.is_file())
}

/// Read and validate a TOML scene config. Missing fields take their defaults.
pub fn load_config(path: &Path) -> anyhow::Result<SceneConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: SceneConfig =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

/// Config named by `--config`, else the nearest spacebg.toml, else defaults.
pub fn resolve_config(explicit: Option<&Path>, start: &Path) -> anyhow::Result<SceneConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config_from(start) {
            Some(path) => path,
            None => {
                log::info!("No {CONFIG_FILE} found, using defaults");
                return Ok(SceneConfig::default());
            }
        },
    };
    log::info!("Using config {}", path.display());
    load_config(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_workspace(root: &Path) {
        std::fs::write(root.join("Cargo.toml"), "[workspace]").unwrap();
        let web = root.join("spacebg-web");
        std::fs::create_dir(&web).unwrap();
        std::fs::write(web.join("Cargo.toml"), "[package]").unwrap();
    }

    // ── Workspace detection ──

    #[test]
    fn test_detect_workspace_root() {
        let dir = tempfile::tempdir().unwrap();
        fake_workspace(dir.path());

        let ctx = detect_workspace_from(dir.path()).unwrap();
        assert_eq!(ctx.root, dir.path());
        assert_eq!(ctx.web_crate, dir.path().join("spacebg-web"));
        assert_eq!(ctx.config_path(), dir.path().join("spacebg.toml"));
    }

    #[test]
    fn test_detect_workspace_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        fake_workspace(dir.path());
        let nested = dir.path().join("spacebg-web/src");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = detect_workspace_from(&nested).unwrap();
        assert_eq!(ctx.root, dir.path());
    }

    #[test]
    fn test_detect_no_workspace() {
        let dir = tempfile::tempdir().unwrap();
        // Nested so pop() walks through the tempdir before reaching the filesystem root
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        let result = detect_workspace_from(&nested);
        assert!(result.is_err());
    }

    // ── Config files ──

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "").unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config_from(&nested), Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "seed = 42\n\n[starfield]\ncount = 1000\n\n[speed]\nboost = 0.3\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.starfield.count, 1000);
        assert_eq!(config.starfield.opacity, 0.8);
        assert_eq!(config.speed.base, 0.005);
        assert_eq!(config.speed.boost, 0.3);
        assert_eq!(config.asteroids, SceneConfig::default().asteroids);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[camera]\nnear = 5.0\nfar = 1.0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("clip planes"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[starfield\ncount = ").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(resolve_config(Some(&missing), dir.path()).is_err());
    }
}
