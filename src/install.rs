//! Install policy and the npm side of it.
//!
//! A pinned version that already resolves is never reinstalled; `latest`
//! is reinstalled on every call because a cached `latest` may be stale.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::UseConfig;
use crate::error::UseError;
use crate::runner::{CommandLine, CommandRunner};
use crate::specifier::PackageSpec;

/// Whether the installer must run before the package can be loaded.
pub fn needs_install(spec: &PackageSpec, resolved: Option<&Path>) -> bool {
    spec.is_latest() || resolved.is_none()
}

/// Drives the global npm installation.
#[derive(Clone)]
pub struct Installer {
    runner: Arc<dyn CommandRunner>,
    npm: String,
    registry_protocol: String,
    global_root: Option<PathBuf>,
}

impl Installer {
    pub fn new(config: &UseConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            npm: config.npm.clone(),
            registry_protocol: config.registry_protocol.clone(),
            global_root: config.global_root.clone(),
        }
    }

    /// The `npm install -g <alias>@npm:<name>@<version>` invocation.
    pub fn install_command(&self, spec: &PackageSpec, alias: &str) -> CommandLine {
        CommandLine::new(&self.npm)
            .arg("install")
            .arg("-g")
            .arg(format!(
                "{}@{}:{}@{}",
                alias, self.registry_protocol, spec.name, spec.version
            ))
            .quiet()
    }

    /// Directory global packages are installed into, asked fresh each time
    /// unless fixed by configuration.
    pub async fn global_root(&self) -> Result<PathBuf, UseError> {
        if let Some(root) = &self.global_root {
            return Ok(root.clone());
        }

        let cmd = CommandLine::new(&self.npm).arg("root").arg("-g");
        let output = self
            .runner
            .run(&cmd)
            .await
            .and_then(|out| out.check(&self.npm))
            .map_err(|source| UseError::GlobalRoot { source })?;

        let root = PathBuf::from(output.stdout.trim());
        tracing::debug!(root = %root.display(), "global root");
        Ok(root)
    }

    /// Install `spec` under `alias`. Failure carries the installer's cause.
    pub async fn install(&self, spec: &PackageSpec, alias: &str) -> Result<(), UseError> {
        let cmd = self.install_command(spec, alias);
        tracing::info!(package = %spec.package(), alias = %alias, "installing");

        self.runner
            .run(&cmd)
            .await
            .and_then(|out| out.check(&self.npm))
            .map_err(|source| UseError::Install {
                package: spec.package(),
                source,
            })?;
        Ok(())
    }
}
