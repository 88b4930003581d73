//! Reading and writing documents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions opened as Markdown documents without a warning.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Extension added by Save As when the name has none.
pub const DEFAULT_EXTENSION: &str = "md";

/// File I/O failures surfaced to the user.
#[derive(Debug, Error)]
pub enum FileError {
    /// Nothing exists at the path
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The OS refused access
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The path names a directory
    #[error("{} is a directory", .0.display())]
    IsDirectory(PathBuf),

    /// The file isn't UTF-8 text
    #[error("{} is not UTF-8 text", .0.display())]
    Encoding(PathBuf),

    /// Any other I/O failure
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::IsADirectory => Self::IsDirectory(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Read a whole document as UTF-8 text.
pub fn read_document(path: &Path) -> Result<String, FileError> {
    if path.is_dir() {
        return Err(FileError::IsDirectory(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|err| FileError::from_io(path, err))?;
    let text = String::from_utf8(bytes).map_err(|_| FileError::Encoding(path.to_path_buf()))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read document");
    Ok(text)
}

/// Write the whole document, replacing the file.
pub fn write_document(path: &Path, text: &str) -> Result<(), FileError> {
    if path.is_dir() {
        return Err(FileError::IsDirectory(path.to_path_buf()));
    }
    fs::write(path, text).map_err(|err| FileError::from_io(path, err))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote document");
    Ok(())
}

/// Returns true for `.md`, `.markdown` and `.txt` files (any case).
pub fn is_supported_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Add `.md` when the path has no extension.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Turn prompt input into an absolute path.
///
/// `~` expands to the home directory; relative paths resolve against
/// `base` (the last used folder) when one is known, else the working
/// directory.
pub fn resolve_path(input: &str, base: Option<&Path>) -> PathBuf {
    let input = input.trim();
    let expanded = expand_home(input);
    if expanded.is_absolute() {
        return absolute_path(expanded);
    }
    absolute_path(base.map_or_else(|| expanded.clone(), |base| base.join(&expanded)))
}

/// The path made absolute against the working directory, so two spellings
/// of the same file compare equal. Symlinks and `..` are left as written.
pub fn absolute_path(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

fn expand_home(input: &str) -> PathBuf {
    let home = || std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    if input == "~" {
        if let Some(home) = home() {
            return PathBuf::from(home);
        }
    } else if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = home() {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(input)
}

/// File name for tab titles and status messages.
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.md");
        write_document(&path, "# Notes\n").unwrap();
        assert_eq!(read_document(&path).unwrap(), "# Notes\n");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = read_document(&dir.path().join("absent.md")).unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
        assert!(err.to_string().contains("absent.md"));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_document(dir.path()),
            Err(FileError::IsDirectory(_))
        ));
        assert!(matches!(
            write_document(dir.path(), "x"),
            Err(FileError::IsDirectory(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(read_document(&path), Err(FileError::Encoding(_))));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.md");
        assert!(matches!(
            write_document(&path, "x"),
            Err(FileError::NotFound(_))
        ));
    }

    #[test]
    fn test_supported_documents() {
        assert!(is_supported_document(Path::new("a.md")));
        assert!(is_supported_document(Path::new("a.MARKDOWN")));
        assert!(is_supported_document(Path::new("notes.txt")));
        assert!(!is_supported_document(Path::new("image.png")));
        assert!(!is_supported_document(Path::new("Makefile")));
    }

    #[test]
    fn test_default_extension() {
        assert_eq!(
            with_default_extension(PathBuf::from("draft")),
            PathBuf::from("draft.md")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("draft.txt")),
            PathBuf::from("draft.txt")
        );
    }

    #[test]
    fn test_resolve_relative_against_base() {
        assert_eq!(
            resolve_path("  notes.md ", Some(Path::new("/docs"))),
            PathBuf::from("/docs/notes.md")
        );
        assert_eq!(
            resolve_path("notes.md", None),
            std::env::current_dir().unwrap().join("notes.md")
        );
        assert_eq!(
            resolve_path("/abs/x.md", Some(Path::new("/docs"))),
            PathBuf::from("/abs/x.md")
        );
    }

    #[test]
    fn test_absolute_path_matches_across_spellings() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute_path(PathBuf::from("a.md")), cwd.join("a.md"));
        assert_eq!(absolute_path(PathBuf::from("./a.md")), cwd.join("a.md"));
        assert_eq!(
            absolute_path(PathBuf::from("/abs/x.md")),
            PathBuf::from("/abs/x.md")
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/a/b/readme.md")), "readme.md");
    }
}
