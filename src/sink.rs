//! Where generated files go.

use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GenerateError;

/// Receives generated files by relative path.
pub trait OutputSink {
    fn persist(&mut self, path: &str, contents: &str) -> Result<(), GenerateError>;
}

/// Keeps files in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: IndexMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl OutputSink for MemorySink {
    fn persist(&mut self, path: &str, contents: &str) -> Result<(), GenerateError> {
        self.files.insert(path.to_string(), contents.to_string());
        Ok(())
    }
}

/// Writes files below a root directory, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirectorySink {
    fn persist(&mut self, path: &str, contents: &str) -> Result<(), GenerateError> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|source| GenerateError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&full, contents).map_err(|source| GenerateError::Io {
            path: full.clone(),
            source,
        })?;
        debug!("event=file_written path={}", full.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_write_order() {
        let mut sink = MemorySink::new();
        sink.persist("b.jsx", "b").unwrap();
        sink.persist("a.jsx", "a").unwrap();
        assert_eq!(sink.paths().collect::<Vec<_>>(), ["b.jsx", "a.jsx"]);
        assert_eq!(sink.get("a.jsx"), Some("a"));
    }

    #[test]
    fn test_directory_sink_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        sink.persist("src/components/atoms/Logo.jsx", "x").unwrap();
        let written = fs::read_to_string(dir.path().join("src/components/atoms/Logo.jsx")).unwrap();
        assert_eq!(written, "x");
    }
}
