//! Finding a platform build of the adapter inside a package directory

use std::path::{Path, PathBuf};

use crate::errors::{self, Result};

/// Base file name of the adapter executable
pub const ADAPTER_NAME: &str = "git-adapter";

/// Directory, relative to a package root, holding one folder per platform
pub const ADAPTER_DIR: &str = "Runtime/GitAdapter";

/// Platform folder name for an `std::env::consts::OS` value
pub fn platform_folder(os: &str) -> Option<&'static str> {
    match os {
        "macos" => Some("macOS"),
        "windows" => Some("Windows"),
        "linux" => Some("Linux"),
        _ => None,
    }
}

/// Locate the adapter built for the current platform under `package_root`.
///
/// # Errors
///
/// `InvalidInput` on an unsupported platform, `NotFound` when no build
/// exists at the expected location.
pub fn locate_adapter(package_root: &Path) -> Result<PathBuf> {
    locate_adapter_for(package_root, std::env::consts::OS)
}

/// [`locate_adapter`] for an explicit operating system.
///
/// # Errors
///
/// See [`locate_adapter`].
pub fn locate_adapter_for(package_root: &Path, os: &str) -> Result<PathBuf> {
    let folder = platform_folder(os).ok_or_else(|| errors::unsupported_platform(os))?;
    let dir = package_root.join(ADAPTER_DIR).join(folder);

    let file_name = if os == "windows" {
        format!("{}.exe", ADAPTER_NAME)
    } else {
        ADAPTER_NAME.to_string()
    };
    let candidate = dir.join(file_name);
    if candidate.is_file() {
        tracing::debug!(path = %candidate.display(), "found adapter");
        return Ok(candidate);
    }
    Err(errors::adapter_missing(&candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenediff_core::errors::ExErrorKind;

    #[test]
    fn test_finds_platform_build() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(ADAPTER_DIR).join("Linux");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(ADAPTER_NAME), b"").unwrap();

        let found = locate_adapter_for(root.path(), "linux").unwrap();
        assert_eq!(found, dir.join(ADAPTER_NAME));
    }

    #[test]
    fn test_windows_build_has_exe_suffix() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(ADAPTER_DIR).join("Windows");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("git-adapter.exe"), b"").unwrap();

        assert!(locate_adapter_for(root.path(), "windows").is_ok());
        assert_eq!(
            locate_adapter_for(root.path(), "macos").unwrap_err().kind(),
            ExErrorKind::NotFound
        );
    }

    #[test]
    fn test_unsupported_platform() {
        let root = tempfile::tempdir().unwrap();
        let err = locate_adapter_for(root.path(), "haiku").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }
}
