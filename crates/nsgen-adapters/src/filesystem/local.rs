//! Local filesystem adapter using std::fs and walkdir.

use std::io;
use std::path::Path;

use nsgen_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::registry::IGNORED_DIRECTORIES,
    error::{NsError, NsResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_file(&self, path: &Path) -> NsResult<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(ApplicationError::NotText {
                path: path.to_path_buf(),
            }
            .into()),
            Err(e) => Err(map_io_error(path, e, "read file")),
        }
    }

    fn write_file(&self, path: &Path, content: &str) -> NsResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> NsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, root: &Path) -> NsResult<Vec<String>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !IGNORED_DIRECTORIES.contains(&entry.file_name().to_string_lossy().as_ref())
            });

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                NsError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk directory: {}", e),
                })
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| map_io_error(entry.path(), io::Error::other(e), "relativize path"))?;
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(parts.join("/"));
        }

        files.sort();
        Ok(files)
    }

    fn remove_file(&self, path: &Path) -> NsResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir(&self, path: &Path) -> NsResult<()> {
        std::fs::remove_dir(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> NsError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_files_relative_and_skips_ignored_dirs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src/app")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::write(root.join("angular.json"), "{}").unwrap();
        std::fs::write(root.join("src/app/app.module.ts"), "").unwrap();
        std::fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();

        let files = LocalFilesystem::new().list_files(root).unwrap();
        assert_eq!(files, vec!["angular.json", "src/app/app.module.ts"]);
    }

    #[test]
    fn binary_files_are_not_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("icon.png");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        assert!(matches!(
            LocalFilesystem::new().read_file(&path),
            Err(NsError::Application(ApplicationError::NotText { .. }))
        ));
    }

    #[test]
    fn write_read_remove() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = dir.path().join("a/b.txt");

        fs.create_dir_all(path.parent().unwrap()).unwrap();
        fs.write_file(&path, "hello").unwrap();
        assert_eq!(fs.read_file(&path).unwrap(), "hello");
        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));
    }
}
