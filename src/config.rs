use std::path::{Path, PathBuf};

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "npm-use.toml";

/// Programs and locations the pipeline talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseConfig {
    /// Installer program.
    pub npm: String,
    /// Program the default loader imports modules with.
    pub node: String,
    /// Protocol in `<alias>@<protocol>:<name>@<version>`.
    pub registry_protocol: String,
    /// Fixed global root; when unset `npm root -g` is asked on each call.
    pub global_root: Option<PathBuf>,
}

impl Default for UseConfig {
    fn default() -> Self {
        Self {
            npm: "npm".to_string(),
            node: "node".to_string(),
            registry_protocol: "npm".to_string(),
            global_root: None,
        }
    }
}

impl UseConfig {
    /// Defaults, then `npm-use.toml` found from the current directory
    /// upward, then `NPM_USE_*` environment variables.
    pub fn discover() -> Result<UseConfig, String> {
        let mut config = UseConfig::default();
        if let Ok(cwd) = std::env::current_dir() {
            if let Some(path) = UseConfig::find(&cwd) {
                config.apply_file(&path)?;
            }
        }
        config.apply_env();
        Ok(config)
    }

    /// Defaults, then the given file, then the environment.
    pub fn load(path: &Path) -> Result<UseConfig, String> {
        let mut config = UseConfig::default();
        config.apply_file(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Try to find an `npm-use.toml` in the given directory or its ancestors.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "loading config");
        self.apply_str(&content);
        Ok(())
    }

    /// Flat `key = "value"` pairs; section headers and comments are skipped.
    fn apply_str(&mut self, content: &str) {
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.is_empty() || trimmed.starts_with('[') {
                continue;
            }
            if let Some((key, value)) = trimmed.split_once('=') {
                let key = key.trim().trim_matches('"');
                let value = value.trim().trim_matches('"');
                self.set(key, value);
            }
        }
    }

    fn apply_env(&mut self) {
        for (key, var) in [
            ("npm", "NPM_USE_NPM"),
            ("node", "NPM_USE_NODE"),
            ("registry_protocol", "NPM_USE_REGISTRY_PROTOCOL"),
            ("global_root", "NPM_USE_GLOBAL_ROOT"),
        ] {
            if let Ok(value) = std::env::var(var) {
                self.set(key, &value);
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        match key {
            "npm" => self.npm = value.to_string(),
            "node" => self.node = value.to_string(),
            "registry_protocol" => self.registry_protocol = value.to_string(),
            "global_root" => self.global_root = Some(PathBuf::from(value)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = UseConfig::default();
        assert_eq!(config.npm, "npm");
        assert_eq!(config.node, "node");
        assert_eq!(config.registry_protocol, "npm");
        assert_eq!(config.global_root, None);
    }

    #[test]
    fn test_apply_str() {
        let mut config = UseConfig::default();
        config.apply_str(
            r#"# local overrides
[npm-use]
npm = "/opt/node/bin/npm"
global_root = "/opt/node/lib/node_modules"
unknown = "ignored"
node = ""
"#,
        );
        assert_eq!(config.npm, "/opt/node/bin/npm");
        assert_eq!(
            config.global_root,
            Some(PathBuf::from("/opt/node/lib/node_modules"))
        );
        assert_eq!(config.node, "node");
    }

    #[test]
    fn test_find_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "node = \"nodejs\"\n").unwrap();

        let found = UseConfig::find(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE));
    }

    #[test]
    fn test_load_missing_file() {
        let err = UseConfig::load(Path::new("/nonexistent/npm-use.toml")).unwrap_err();
        assert!(err.contains("cannot read"), "got: {}", err);
    }
}
