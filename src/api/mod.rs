use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::config::UseConfig;
use crate::error::UseError;
use crate::install::{needs_install, Installer};
use crate::loader::{ModuleLoader, NodeLoader};
use crate::resolve::probe;
use crate::runner::{CommandRunner, SystemRunner};
use crate::specifier::PackageSpec;


/// A package that is installed and has a loadable entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub spec: PackageSpec,
    pub alias: String,
    /// `<global root>/<alias>`.
    pub package_dir: PathBuf,
    /// Canonical path of the entry point.
    pub entry: PathBuf,
    /// Whether the installer ran during this call.
    pub installed: bool,
}

/// Installs packages on demand and loads them.
///
/// Holds no state between calls beyond its collaborators; the global
/// install directory is the only cache.
#[derive(Clone)]
pub struct Importer {
    installer: Installer,
    loader: Arc<dyn ModuleLoader>,
}

impl Importer {
    /// Real `npm` and `node` processes.
    pub fn new(config: &UseConfig) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner);
        let loader = Arc::new(NodeLoader::new(runner.clone(), &config.node));
        Self::with_collaborators(config, runner, loader)
    }

    pub fn with_collaborators(
        config: &UseConfig,
        runner: Arc<dyn CommandRunner>,
        loader: Arc<dyn ModuleLoader>,
    ) -> Self {
        Self {
            installer: Installer::new(config, runner),
            loader,
        }
    }

    /// Parse `identifier`, install it when needed, and return its entry.
    pub async fn resolve(&self, identifier: &str) -> Result<ResolvedPackage, UseError> {
        let spec = PackageSpec::parse(identifier)?;
        let alias = spec.alias();
        tracing::debug!(spec = %spec, alias = %alias, "parsed");

        let root = self.installer.global_root().await?;
        let package_dir = root.join(&alias);

        // A latest install is refreshed regardless, so probing first is moot.
        let mut entry = if spec.is_latest() {
            None
        } else {
            probe(&package_dir, &spec.sub_path)?
        };

        let installed = needs_install(&spec, entry.as_deref());
        if installed {
            self.installer.install(&spec, &alias).await?;
            entry = probe(&package_dir, &spec.sub_path)?;
        } else {
            tracing::debug!(package = %spec.package(), "already installed");
        }

        let entry = entry.ok_or_else(|| {
            let relative = spec.sub_path.trim_start_matches('/');
            UseError::Resolution {
                package: spec.to_string(),
                path: if relative.is_empty() {
                    package_dir.clone()
                } else {
                    package_dir.join(relative)
                },
            }
        })?;

        Ok(ResolvedPackage {
            spec,
            alias,
            package_dir,
            entry,
            installed,
        })
    }

    /// Probe only: the entry of an already installed package, if any.
    pub async fn locate(&self, identifier: &str) -> Result<Option<PathBuf>, UseError> {
        let spec = PackageSpec::parse(identifier)?;
        let root = self.installer.global_root().await?;
        probe(&root.join(spec.alias()), &spec.sub_path)
    }

    /// Resolve (installing if needed), import, and normalize the exports.
    pub async fn use_package(&self, identifier: &str) -> Result<Value, UseError> {
        let resolved = self.resolve(identifier).await?;

        let exports = self
            .loader
            .load(&resolved.entry)
            .await
            .map_err(|source| UseError::Load {
                package: resolved.spec.package(),
                path: resolved.package_dir.clone(),
                resolved: resolved.entry.clone(),
                source,
            })?;

        Ok(exports.normalize())
    }
}

/// Install `identifier` if needed and load it with the discovered
/// configuration and real `npm`/`node` processes.
pub async fn use_package(identifier: &str) -> Result<Value, UseError> {
    // Reject bad input before any configuration or process work.
    PackageSpec::parse(identifier)?;
    let config = UseConfig::discover().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        UseConfig::default()
    });
    Importer::new(&config).use_package(identifier).await
}
