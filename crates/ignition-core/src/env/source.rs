use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::env::error::{EnvError, Result};

/// A provider of environment variables.
///
/// Sources that resolve variables without suspending only implement
/// `load_sync`; the asynchronous `load` defaults to it. Sources backed by
/// suspending I/O override `load`.
#[async_trait]
pub trait EnvironmentSource: Send + Sync + fmt::Debug {
    /// Name of the source, used in diagnostics
    fn name(&self) -> &str;

    /// Resolve the source's variables without suspending
    fn load_sync(&self) -> Result<HashMap<String, String>>;

    /// Resolve the source's variables
    async fn load(&self) -> Result<HashMap<String, String>> {
        self.load_sync()
    }
}

/// Source reading the process environment, optionally filtered by a key
/// prefix.
#[derive(Debug, Default)]
pub struct ProcessEnv {
    prefix: Option<String>,
}

impl ProcessEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only expose variables whose key starts with `prefix`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl EnvironmentSource for ProcessEnv {
    fn name(&self) -> &str {
        "process"
    }

    fn load_sync(&self) -> Result<HashMap<String, String>> {
        Ok(std::env::vars()
            .filter(|(key, _)| match &self.prefix {
                Some(prefix) => key.starts_with(prefix),
                None => true,
            })
            .collect())
    }
}

/// Fixed in-memory source, used for scoped overrides and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    values: HashMap<String, String>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

#[async_trait]
impl EnvironmentSource for StaticEnv {
    fn name(&self) -> &str {
        "static"
    }

    fn load_sync(&self) -> Result<HashMap<String, String>> {
        Ok(self.values.clone())
    }
}

/// `KEY=value` file source. Blank lines and lines starting with `#` are
/// skipped; values may be wrapped in single or double quotes.
#[derive(Debug)]
pub struct FileEnv {
    path: PathBuf,
    required: bool,
}

impl FileEnv {
    /// A source whose file must exist
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required: true,
        }
    }

    /// A source that resolves to no variables when the file is missing
    pub fn optional(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required: false,
        }
    }

    fn parse(&self, data: &str) -> Result<HashMap<String, String>> {
        let mut values = HashMap::new();
        for (index, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or(EnvError::Malformed {
                path: self.path.clone(),
                line: index + 1,
            })?;
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            values.insert(key.trim().to_string(), value.to_string());
        }
        Ok(values)
    }
}

#[async_trait]
impl EnvironmentSource for FileEnv {
    fn name(&self) -> &str {
        "file"
    }

    fn load_sync(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => self.parse(&data),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound && !self.required => {
                Ok(HashMap::new())
            }
            Err(source) => Err(EnvError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
