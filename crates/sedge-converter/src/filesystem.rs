//! Filesystem predicates used to validate tool, input and output paths.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Stateless path checks against the real filesystem.
pub struct FsProbe;

impl FsProbe {
    /// Whether `path` names an existing regular file.
    pub fn file_exists(path: &Path) -> bool {
        path.is_file()
    }

    /// Whether the directory containing `path` exists.
    ///
    /// A path that is itself a directory is checked directly.
    pub fn dir_exists(path: &Path) -> bool {
        Self::containing_dir(path).is_dir()
    }

    /// Whether the current process may read `path`.
    pub fn is_readable(path: &Path) -> bool {
        Self::check_access(path, AccessMode::Read)
    }

    /// Whether the current process may write `path`.
    pub fn is_writable(path: &Path) -> bool {
        Self::check_access(path, AccessMode::Write)
    }

    /// File extension without the leading dot, or `None` if there is none.
    pub fn extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_string())
    }

    /// Whether some ancestor directory of `path` below the root is writable.
    ///
    /// The walk starts at the containing directory and moves upward. The
    /// filesystem root (or the current directory, for relative paths) is
    /// never tested, so a path whose nearest existing ancestor is the root
    /// is reported as not writable.
    pub fn is_writable_any_dir(path: &Path) -> bool {
        let mut current = Some(Self::containing_dir(path));

        while let Some(dir) = current {
            if Self::is_walk_root(&dir) {
                break;
            }
            if Self::is_writable(&dir) {
                debug!(path = %path.display(), dir = %dir.display(), "Found writable ancestor");
                return true;
            }
            current = dir.parent().map(Path::to_path_buf);
        }

        debug!(path = %path.display(), "No writable ancestor below root");
        false
    }

    fn containing_dir(path: &Path) -> PathBuf {
        if path.is_dir() {
            return path.to_path_buf();
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn is_walk_root(dir: &Path) -> bool {
        dir.as_os_str().is_empty() || dir == Path::new(".") || dir.parent().is_none()
    }

    #[cfg(unix)]
    fn check_access(path: &Path, mode: AccessMode) -> bool {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
            return false;
        };
        let flag = match mode {
            AccessMode::Read => libc::R_OK,
            AccessMode::Write => libc::W_OK,
        };
        unsafe { libc::access(c_path.as_ptr(), flag) == 0 }
    }

    #[cfg(not(unix))]
    fn check_access(path: &Path, mode: AccessMode) -> bool {
        let Ok(metadata) = std::fs::metadata(path) else {
            return false;
        };
        match mode {
            AccessMode::Read if metadata.is_dir() => std::fs::read_dir(path).is_ok(),
            AccessMode::Read => std::fs::File::open(path).is_ok(),
            AccessMode::Write => !metadata.permissions().readonly(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum AccessMode {
    Read,
    Write,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_exists() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("sample.txt");
        std::fs::write(&file, "sample").expect("write");

        assert!(FsProbe::file_exists(&file));
        assert!(!FsProbe::file_exists(temp.path()));
        assert!(!FsProbe::file_exists(Path::new("any/non/existent/file.txt")));
    }

    #[test]
    fn test_dir_exists() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("sample.txt");
        std::fs::write(&file, "sample").expect("write");

        assert!(FsProbe::dir_exists(&file));
        assert!(FsProbe::dir_exists(temp.path()));
        assert!(FsProbe::dir_exists(&temp.path().join("not-yet-created.pdf")));
        assert!(!FsProbe::dir_exists(Path::new(
            "any/non/existent/directory/file.txt"
        )));
    }

    #[test]
    fn test_readable_and_writable() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("sample.txt");
        std::fs::write(&file, "sample").expect("write");

        assert!(FsProbe::is_readable(&file));
        assert!(FsProbe::is_writable(&file));
        assert!(!FsProbe::is_readable(&temp.path().join("missing.txt")));
        assert!(!FsProbe::is_writable(&temp.path().join("missing.txt")));
    }

    #[test]
    fn test_extension() {
        assert_eq!(
            FsProbe::extension(Path::new("/drafts/bracket.dft")).as_deref(),
            Some("dft")
        );
        assert_eq!(
            FsProbe::extension(Path::new("archive.tar.gz")).as_deref(),
            Some("gz")
        );
        assert_eq!(FsProbe::extension(Path::new("/drafts/README")), None);
        assert_eq!(FsProbe::extension(Path::new("/home/user/.bashrc")), None);
        assert_eq!(FsProbe::extension(Path::new("")), None);
    }

    #[test]
    fn test_writable_any_dir_nested_tree() {
        let temp = tempfile::tempdir().expect("tempdir");
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).expect("mkdir");

        assert!(FsProbe::is_writable_any_dir(&nested.join("out.pdf")));
        assert!(FsProbe::is_writable_any_dir(
            &nested.join("not").join("created").join("yet").join("out.jpg")
        ));
        assert!(FsProbe::is_writable_any_dir(&nested));
    }

    #[test]
    fn test_writable_any_dir_stops_at_root() {
        assert!(!FsProbe::is_writable_any_dir(Path::new(
            "/any/non/existent/file.txt"
        )));
        assert!(!FsProbe::is_writable_any_dir(Path::new(
            "any/non/existent/directory/file.txt"
        )));
        assert!(!FsProbe::is_writable_any_dir(Path::new("")));
        assert!(!FsProbe::is_writable_any_dir(Path::new("/")));
    }
}
