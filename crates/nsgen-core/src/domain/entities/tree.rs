use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::{entities::common::TreePath, error::DomainError};

/// In-memory, path-keyed view of a workspace.
///
/// This is both the input and the output of the transform. It only ever
/// gains or rewrites entries: there is no removal operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualTree {
    files: BTreeMap<TreePath, String>,
}

impl VirtualTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `(path, content)` pairs. Later duplicates win.
    pub fn from_files<I, P, C>(files: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut tree = Self::new();
        for (path, content) in files {
            tree.files.insert(TreePath::new(path)?, content.into());
        }
        Ok(tree)
    }

    /// Builder-style [`create`](Self::create).
    pub fn with_file(
        mut self,
        path: impl AsRef<str>,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        self.create(path, content)?;
        Ok(self)
    }

    /// Add a new file. Fails if the path is already taken.
    pub fn create(
        &mut self,
        path: impl AsRef<str>,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        let path = TreePath::new(path)?;
        if self.files.contains_key(&path) {
            return Err(DomainError::FileAlreadyExists {
                path: path.to_string(),
            });
        }
        self.files.insert(path, content.into());
        Ok(())
    }

    /// Replace the content of an existing file.
    pub fn overwrite(
        &mut self,
        path: impl AsRef<str>,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        let path = TreePath::new(path)?;
        match self.files.get_mut(&path) {
            Some(existing) => {
                *existing = content.into();
                Ok(())
            }
            None => Err(DomainError::FileNotFound {
                path: path.to_string(),
            }),
        }
    }

    pub fn create_or_overwrite(
        &mut self,
        path: impl AsRef<str>,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        let path = TreePath::new(path)?;
        self.files.insert(path, content.into());
        Ok(())
    }

    /// Read a file. Invalid paths read as absent.
    pub fn read(&self, path: impl AsRef<str>) -> Option<&str> {
        let path = TreePath::new(path).ok()?;
        self.files.get(&path).map(String::as_str)
    }

    pub fn read_required(&self, path: impl AsRef<str>) -> Result<&str, DomainError> {
        let path = TreePath::new(path)?;
        self.files
            .get(&path)
            .map(String::as_str)
            .ok_or_else(|| DomainError::FileNotFound {
                path: path.to_string(),
            })
    }

    pub fn exists(&self, path: impl AsRef<str>) -> bool {
        self.read(path).is_some()
    }

    /// All file paths, sorted.
    pub fn files(&self) -> impl Iterator<Item = &TreePath> {
        self.files.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TreePath, &str)> {
        self.files.iter().map(|(p, c)| (p, c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Parse a file as JSON.
    pub fn read_json(&self, path: impl AsRef<str>) -> Result<Value, DomainError> {
        let path = TreePath::new(path)?;
        let raw = self.read_required(&path)?;
        serde_json::from_str(raw).map_err(|e| DomainError::MalformedJson {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Write pretty-printed JSON (two-space indent, trailing newline),
    /// creating or overwriting the file.
    pub fn write_json(&mut self, path: impl AsRef<str>, value: &Value) -> Result<(), DomainError> {
        let path = TreePath::new(path)?;
        let mut raw = serde_json::to_string_pretty(value).map_err(|e| {
            DomainError::MalformedJson {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;
        raw.push('\n');
        self.files.insert(path, raw);
        Ok(())
    }

    /// What changed between `self` (before) and `after`.
    pub fn diff(&self, after: &VirtualTree) -> TreeDiff {
        let mut diff = TreeDiff::default();
        for (path, content) in &after.files {
            match self.files.get(path) {
                None => diff.created.push(path.clone()),
                Some(old) if old != content => diff.updated.push(path.clone()),
                Some(_) => {}
            }
        }
        diff
    }
}

/// Paths added or rewritten by a transform, in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDiff {
    pub created: Vec<TreePath>,
    pub updated: Vec<TreePath>,
}

impl TreeDiff {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty()
    }

    pub fn len(&self) -> usize {
        self.created.len() + self.updated.len()
    }

    /// Every touched path, created first.
    pub fn paths(&self) -> impl Iterator<Item = &TreePath> {
        self.created.iter().chain(self.updated.iter())
    }
}
