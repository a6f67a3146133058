//! Avatar catalog - scans a directory for image files players can pick.

use derive_getters::Getters;
use derive_more::{Display, Error};
use std::path::{Path, PathBuf};
use tictactoe_session::AvatarRef;
use tracing::{debug, info, instrument, warn};

/// Why an avatar directory or choice could not be used.
#[derive(Debug, Display, Error)]
pub enum AvatarError {
    /// The avatar directory does not exist.
    #[display("Avatar directory not found: {}", path.display())]
    DirNotFound {
        /// Directory that was requested.
        path: PathBuf,
    },
    /// The avatar path exists but is a file.
    #[display("Avatar path is not a directory: {}", path.display())]
    NotADirectory {
        /// Path that was requested.
        path: PathBuf,
    },
    /// Listing the directory failed.
    #[display("Failed to read avatar directory {}: {source}", path.display())]
    Unreadable {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// A numbered choice outside the catalog.
    #[display("Avatar number {number} is not in 1-{count}")]
    NumberOutOfRange {
        /// Number the player typed.
        number: usize,
        /// Avatars in the catalog.
        count: usize,
    },
    /// A file name that is not in the catalog.
    #[display("Unknown avatar: {choice}")]
    UnknownName {
        /// Name the player typed.
        choice: String,
    },
}

/// Avatar files found in one directory, sorted by file name.
#[derive(Debug, Clone, Getters)]
pub struct AvatarCatalog {
    /// Directory that was scanned.
    dir: PathBuf,
    /// File names of the avatars.
    entries: Vec<String>,
}

impl AvatarCatalog {
    /// Scans `dir_path` for files whose extension is in `extensions`.
    ///
    /// Extensions match case-insensitively. Subdirectories and other files
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError`] if the path does not exist, is not a directory
    /// or cannot be read.
    #[instrument(skip(dir_path, extensions), fields(path = %dir_path.as_ref().display()))]
    pub fn scan(dir_path: impl AsRef<Path>, extensions: &[String]) -> Result<Self, AvatarError> {
        let path = dir_path.as_ref();
        info!(path = %path.display(), "Scanning directory for avatars");

        if !path.exists() {
            warn!("Avatar directory missing");
            return Err(AvatarError::DirNotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_dir() {
            return Err(AvatarError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let unreadable = |source| AvatarError::Unreadable {
            path: path.to_path_buf(),
            source,
        };
        let dir_entries = std::fs::read_dir(path).map_err(unreadable)?;

        let mut entries = Vec::new();
        for entry_result in dir_entries {
            let entry = entry_result.map_err(unreadable)?;
            let file_path = entry.path();

            if !file_path.is_file() || !has_extension(&file_path, extensions) {
                debug!(file = %file_path.display(), "Skipping non-avatar file");
                continue;
            }

            match file_path.file_name().and_then(|n| n.to_str()) {
                Some(name) => entries.push(name.to_string()),
                None => warn!(file = %file_path.display(), "Skipping avatar with non-UTF-8 name"),
            }
        }
        entries.sort();

        info!(count = entries.len(), "Avatar scan complete");
        Ok(Self {
            dir: path.to_path_buf(),
            entries,
        })
    }

    /// Resolves a choice: an exact file name, or a 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError`] if the choice matches nothing in the catalog.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn resolve(&self, choice: &str) -> Result<AvatarRef, AvatarError> {
        let choice = choice.trim();

        if let Ok(number) = choice.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|i| self.entries.get(i))
                .map(|name| AvatarRef::new(name.as_str()))
                .ok_or(AvatarError::NumberOutOfRange {
                    number,
                    count: self.entries.len(),
                });
        }

        self.entries
            .iter()
            .find(|name| name.as_str() == choice)
            .map(|name| AvatarRef::new(name.as_str()))
            .ok_or_else(|| AvatarError::UnknownName {
                choice: choice.to_string(),
            })
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extensions() -> Vec<String> {
        ["png", "jpg", "jpeg"].map(String::from).to_vec()
    }

    fn catalog_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["owl.PNG", "fox.png", "cat.jpeg", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        dir
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = catalog_dir();
        let catalog = AvatarCatalog::scan(dir.path(), &extensions()).unwrap();
        assert_eq!(catalog.entries(), &["cat.jpeg", "fox.png", "owl.PNG"]);
    }

    #[test]
    fn test_scan_missing_dir() {
        let err = AvatarCatalog::scan("/nonexistent/avatars", &extensions()).unwrap_err();
        assert!(matches!(err, AvatarError::DirNotFound { .. }));
        assert_eq!(err.to_string(), "Avatar directory not found: /nonexistent/avatars");
    }

    #[test]
    fn test_scan_file_is_not_a_directory() {
        let dir = catalog_dir();
        let file = dir.path().join("fox.png");
        let err = AvatarCatalog::scan(&file, &extensions()).unwrap_err();
        assert!(matches!(err, AvatarError::NotADirectory { path } if path == file));
    }

    #[test]
    fn test_resolve_by_name_and_number() {
        let dir = catalog_dir();
        let catalog = AvatarCatalog::scan(dir.path(), &extensions()).unwrap();

        assert_eq!(catalog.resolve("fox.png").unwrap().as_str(), "fox.png");
        assert_eq!(catalog.resolve("1").unwrap().as_str(), "cat.jpeg");
        assert_eq!(catalog.resolve(" 3 ").unwrap().as_str(), "owl.PNG");
        assert_eq!(catalog.dir(), dir.path());
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        let dir = catalog_dir();
        let catalog = AvatarCatalog::scan(dir.path(), &extensions()).unwrap();

        assert!(matches!(
            catalog.resolve("0"),
            Err(AvatarError::NumberOutOfRange { number: 0, count: 3 })
        ));
        assert!(matches!(
            catalog.resolve("4"),
            Err(AvatarError::NumberOutOfRange { number: 4, count: 3 })
        ));
        assert!(matches!(
            catalog.resolve("notes.txt"),
            Err(AvatarError::UnknownName { choice }) if choice == "notes.txt"
        ));
    }
}
