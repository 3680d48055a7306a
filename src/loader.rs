//! Importing a resolved entry point and normalizing its exports.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::LoadFailure;
use crate::runner::{CommandLine, CommandRunner};

/// Export name to value, as reported by a [`ModuleLoader`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleExports(pub Map<String, Value>);

impl ModuleExports {
    /// Unwrap a module whose only export is `default`.
    ///
    /// A `null` default keeps the module object, so callers never get a
    /// bare `null` for a module that did load.
    pub fn normalize(self) -> Value {
        let ModuleExports(mut map) = self;
        if map.len() == 1 && map.contains_key("default") {
            match map.remove("default") {
                Some(value) if !value.is_null() => return value,
                Some(value) => {
                    map.insert("default".to_string(), value);
                }
                None => {}
            }
        }
        Value::Object(map)
    }
}

/// Imports an entry point and reports its exports.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, entry: &Path) -> Result<ModuleExports, LoadFailure>;
}

/// Imports the entry inside a `node` child process.
///
/// Values JSON cannot hold are described instead: functions and classes as
/// `"[Function: name]"` / `"[class: name]"`, `undefined` as `null`, bigints
/// and symbols as strings, references back to an enclosing object as
/// `"[Circular]"`.
pub struct NodeLoader {
    runner: Arc<dyn CommandRunner>,
    node: String,
}

/// Line printed right before the export map. The imported module shares
/// stdout, so only the line after the last marker is parsed.
pub(crate) const EXPORTS_MARKER: &str = "@@npm-use:exports@@";

const IMPORT_SCRIPT: &str = r#"
import { pathToFileURL } from 'node:url';

const [marker, entry] = process.argv.slice(1);
const module = await import(pathToFileURL(entry).href);

// `ancestors` holds the objects on the current path only, so a value
// exported twice is serialized twice and only true cycles are cut.
const describe = (value, ancestors) => {
  switch (typeof value) {
    case 'undefined':
      return null;
    case 'bigint':
    case 'symbol':
      return value.toString();
    case 'function': {
      const kind = /^class[\s{]/.test(Function.prototype.toString.call(value)) ? 'class' : 'Function';
      return `[${kind}: ${value.name || 'anonymous'}]`;
    }
    case 'object': {
      if (value === null) return null;
      if (ancestors.includes(value)) return '[Circular]';
      ancestors.push(value);
      try {
        if (typeof value.toJSON === 'function') {
          const json = value.toJSON();
          if (json !== value) return describe(json, ancestors);
        }
        if (Array.isArray(value)) return value.map((item) => describe(item, ancestors));
        return Object.fromEntries(
          Object.keys(value).map((key) => [key, describe(value[key], ancestors)]),
        );
      } finally {
        ancestors.pop();
      }
    }
    default:
      return value;
  }
};

const exports = Object.fromEntries(
  Object.keys(module).map((key) => [key, describe(module[key], [])]),
);
process.stdout.write(`\n${marker}\n${JSON.stringify(exports)}\n`);
"#;

impl NodeLoader {
    pub fn new(runner: Arc<dyn CommandRunner>, node: &str) -> Self {
        Self {
            runner,
            node: node.to_string(),
        }
    }

    pub fn command(&self, entry: &Path) -> CommandLine {
        CommandLine::new(&self.node)
            .arg("--input-type=module")
            .arg("-e")
            .arg(IMPORT_SCRIPT)
            .arg(EXPORTS_MARKER)
            .arg(entry.to_string_lossy())
    }
}

/// The export map line following the last marker in `stdout`.
fn exports_line(stdout: &str) -> Option<&str> {
    let at = stdout.rfind(EXPORTS_MARKER)?;
    stdout[at + EXPORTS_MARKER.len()..]
        .trim_start_matches(['\r', '\n'])
        .lines()
        .next()
}

#[async_trait]
impl ModuleLoader for NodeLoader {
    async fn load(&self, entry: &Path) -> Result<ModuleExports, LoadFailure> {
        let output = self
            .runner
            .run(&self.command(entry))
            .await?
            .check(&self.node)?;

        let line = exports_line(&output.stdout).ok_or(LoadFailure::MissingExports)?;
        match serde_json::from_str::<Value>(line)? {
            Value::Object(map) => Ok(ModuleExports(map)),
            _ => Err(LoadFailure::NotAnExportMap),
        }
    }
}
