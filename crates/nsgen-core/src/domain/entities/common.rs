use super::DomainError;
use std::fmt;

/// A normalised path inside a [`VirtualTree`](super::tree::VirtualTree).
///
/// Invariant: always starts with `/`, uses `/` separators, has no empty,
/// `.` or `..` segments and no trailing slash. The tree root itself is not
/// a valid file path. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreePath(String);

impl TreePath {
    /// Normalise and validate a path.
    ///
    /// Relative inputs are anchored at the tree root, so `src/main.ts` and
    /// `/src/main.ts` name the same file. Backslashes are treated as
    /// separators.
    pub fn new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = path.as_ref();
        let mut segments = Vec::new();

        for segment in raw.split(['/', '\\']) {
            match segment {
                "" | "." => continue,
                ".." => {
                    return Err(DomainError::InvalidPath {
                        path: raw.to_string(),
                        reason: "parent segments ('..') are not allowed".into(),
                    });
                }
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            return Err(DomainError::InvalidPath {
                path: raw.to_string(),
                reason: "path does not name a file".into(),
            });
        }

        Ok(Self(format!("/{}", segments.join("/"))))
    }

    /// Join a relative segment onto this path.
    pub fn join(&self, segment: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::new(format!("{}/{}", self.0, segment.as_ref()))
    }

    /// The parent directory, or `None` for top-level files.
    pub fn parent(&self) -> Option<TreePath> {
        let idx = self.0.rfind('/')?;
        if idx == 0 {
            None
        } else {
            Some(Self(self.0[..idx].to_string()))
        }
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// The path without its leading `/`, suitable for joining onto a
    /// directory on disk.
    pub fn relative(&self) -> &str {
        &self.0[1..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this path lies inside the directory `dir` (given as a tree path).
    pub fn starts_with(&self, dir: &TreePath) -> bool {
        self.0 == dir.0 || self.0.starts_with(&format!("{}/", dir.0))
    }
}

impl AsRef<str> for TreePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for TreePath {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
