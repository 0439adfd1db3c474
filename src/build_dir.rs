//! Build directory lifecycle
//!
//! Removal clears write protection before deleting so read-only build
//! artifacts do not block a clean. Success is judged by checking the
//! directory is gone afterwards, not by the removal calls themselves.

use crate::error::{BootstrapError, BootstrapResult};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Remove the build directory and everything under it
///
/// Returns true when the directory no longer exists afterwards. A missing
/// directory counts as removed.
pub fn remove_build_dir(path: &Path) -> bool {
    if path.is_dir() {
        if let Ok(metadata) = fs::symlink_metadata(path) {
            make_writable(path, &metadata);
        }
        if let Err(e) = remove_tree(path) {
            debug!("Removing {} stopped early: {}", path.display(), e);
        }
    }
    !path.is_dir()
}

fn remove_tree(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let metadata = fs::symlink_metadata(&path)?;
        let file_type = metadata.file_type();

        if file_type.is_symlink() {
            // Never follow links out of the build tree
            fs::remove_file(&path).or_else(|_| fs::remove_dir(&path))?;
        } else if file_type.is_dir() {
            make_writable(&path, &metadata);
            remove_tree(&path)?;
        } else {
            make_writable(&path, &metadata);
            fs::remove_file(&path)?;
        }
    }
    fs::remove_dir(dir)
}

fn make_writable(path: &Path, metadata: &fs::Metadata) {
    let mut permissions = metadata.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o700);
    }
    #[cfg(not(unix))]
    {
        permissions.set_readonly(false);
    }

    if let Err(e) = fs::set_permissions(path, permissions) {
        debug!("Could not clear write protection on {}: {}", path.display(), e);
    }
}

/// Create the build directory and any missing parents
///
/// Returns true when the directory had to be created.
pub fn ensure_build_dir(path: &Path) -> BootstrapResult<bool> {
    if path.is_dir() {
        return Ok(false);
    }

    let created = fs::create_dir_all(path);
    if !path.is_dir() {
        return Err(BootstrapError::BuildDirCreate {
            path: path.to_path_buf(),
            source: created.err(),
        });
    }

    debug!("Created build directory {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populate(root: &Path) {
        fs::create_dir_all(root.join("CMakeFiles").join("3.28")).unwrap();
        fs::write(root.join("CMakeCache.txt"), "CMAKE_BUILD_TYPE=Debug").unwrap();
        fs::write(root.join("CMakeFiles").join("3.28").join("rules.ninja"), "").unwrap();
    }

    #[test]
    fn removes_nested_tree() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        populate(&build);

        assert!(remove_build_dir(&build));
        assert!(!build.exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn removes_read_only_files() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        populate(&build);

        let artifact = build.join("libheph.a");
        fs::write(&artifact, b"!<arch>").unwrap();
        let mut permissions = fs::metadata(&artifact).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&artifact, permissions).unwrap();

        assert!(remove_build_dir(&build));
        assert!(!build.exists());
    }

    #[cfg(unix)]
    #[test]
    fn removes_write_protected_root() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        populate(&build);
        fs::set_permissions(&build, fs::Permissions::from_mode(0o500)).unwrap();

        assert!(remove_build_dir(&build));
        assert!(!build.exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_removed_not_followed() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("keep.txt"), "keep").unwrap();

        let build = temp.path().join("build");
        fs::create_dir(&build).unwrap();
        std::os::unix::fs::symlink(&outside, build.join("link")).unwrap();

        assert!(remove_build_dir(&build));
        assert!(outside.join("keep.txt").exists());
    }

    #[test]
    fn missing_dir_counts_as_removed() {
        let temp = TempDir::new().unwrap();
        assert!(remove_build_dir(&temp.path().join("nope")));
    }

    #[test]
    fn ensure_creates_parents() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("out").join("x64").join("debug");

        assert!(ensure_build_dir(&build).unwrap());
        assert!(build.is_dir());
        assert!(!ensure_build_dir(&build).unwrap());
    }

    #[test]
    fn ensure_fails_when_a_file_is_in_the_way() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        fs::write(&build, "not a directory").unwrap();

        let err = ensure_build_dir(&build).unwrap_err();
        assert!(matches!(err, BootstrapError::BuildDirCreate { .. }));
    }
}
