//! Stub collaborators shared by the unit tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CommandError, LoadFailure};
use crate::loader::{ModuleExports, ModuleLoader, EXPORTS_MARKER};
use crate::runner::{CommandLine, CommandOutput, CommandRunner};

type InstallHook = Box<dyn Fn(&CommandLine) + Send + Sync>;

/// Answers `npm root -g`, `npm install -g` and `node` without spawning.
pub(crate) struct StubRunner {
    root: String,
    root_fails: bool,
    install_stderr: Option<String>,
    node_stdout: String,
    node_fails: bool,
    on_install: Option<InstallHook>,
    calls: Mutex<Vec<CommandLine>>,
}

impl StubRunner {
    pub(crate) fn new() -> Self {
        Self {
            root: String::new(),
            root_fails: false,
            install_stderr: None,
            node_stdout: format!("\n{}\n{{}}\n", EXPORTS_MARKER),
            node_fails: false,
            on_install: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_root(mut self, stdout: &str) -> Self {
        self.root = stdout.to_string();
        self
    }

    pub(crate) fn failing_root(mut self) -> Self {
        self.root_fails = true;
        self
    }

    pub(crate) fn failing_install(mut self, stderr: &str) -> Self {
        self.install_stderr = Some(stderr.to_string());
        self
    }

    pub(crate) fn with_node_output(mut self, stdout: &str) -> Self {
        self.node_stdout = stdout.to_string();
        self
    }

    pub(crate) fn failing_node(mut self) -> Self {
        self.node_fails = true;
        self
    }

    /// Run `hook` for every successful install, e.g. to lay out files.
    pub(crate) fn on_install(mut self, hook: impl Fn(&CommandLine) + Send + Sync + 'static) -> Self {
        self.on_install = Some(Box::new(hook));
        self
    }

    pub(crate) fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn installs(&self) -> usize {
        self.calls().iter().filter(|c| is_install(c)).count()
    }

    pub(crate) fn root_queries(&self) -> usize {
        self.calls().iter().filter(|c| is_root_query(c)).count()
    }
}

fn is_install(cmd: &CommandLine) -> bool {
    cmd.args.first().is_some_and(|a| a == "install")
}

fn is_root_query(cmd: &CommandLine) -> bool {
    cmd.args == ["root", "-g"]
}

fn exited(code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        code: Some(code),
    }
}

#[async_trait]
impl CommandRunner for StubRunner {
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput, CommandError> {
        self.calls.lock().unwrap().push(command.clone());

        if is_root_query(command) {
            return Ok(if self.root_fails {
                exited(1, "", "npm ERR! cannot determine prefix")
            } else {
                exited(0, &self.root, "")
            });
        }

        if is_install(command) {
            if let Some(stderr) = &self.install_stderr {
                return Ok(exited(1, "", stderr));
            }
            if let Some(hook) = &self.on_install {
                hook(command);
            }
            return Ok(exited(0, "", ""));
        }

        Ok(if self.node_fails {
            exited(1, "", "SyntaxError: Unexpected token")
        } else {
            exited(0, &self.node_stdout, "")
        })
    }
}

/// Returns a fixed export map and records what it was asked to load.
pub(crate) struct StubLoader {
    exports: serde_json::Value,
    fails: bool,
    loaded: Mutex<Vec<PathBuf>>,
}

impl StubLoader {
    pub(crate) fn new(exports: serde_json::Value) -> Self {
        Self {
            exports,
            fails: false,
            loaded: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            exports: serde_json::Value::Null,
            fails: true,
            loaded: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn loaded(&self) -> Vec<PathBuf> {
        self.loaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModuleLoader for StubLoader {
    async fn load(&self, entry: &Path) -> Result<ModuleExports, LoadFailure> {
        self.loaded.lock().unwrap().push(entry.to_path_buf());
        if self.fails {
            return Err(LoadFailure::Command(CommandError::Status {
                program: "node".to_string(),
                code: Some(1),
                stderr: "Error: boom".to_string(),
            }));
        }
        match &self.exports {
            serde_json::Value::Object(map) => Ok(ModuleExports(map.clone())),
            _ => Err(LoadFailure::NotAnExportMap),
        }
    }
}

/// Lay out a minimal installed package: `package.json` plus `main`.
pub(crate) fn write_package(dir: &Path, main: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join("package.json"),
        format!(r#"{{"name": "stub", "main": "{}"}}"#, main),
    )
    .unwrap();
    let entry = dir.join(main);
    if let Some(parent) = entry.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(entry, "export default 42;\n").unwrap();
}
