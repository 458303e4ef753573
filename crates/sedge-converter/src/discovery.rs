//! Solid Edge Translation Services discovery.
//!
//! Locates `SolidEdgeTranslationServices.exe` by checking:
//! 1. An explicitly configured path (the executable or an install directory)
//! 2. The `Program` folder of every `Solid Edge <version>` directory under
//!    `Siemens` in the Program Files folders, newest version first
//! 3. The system PATH

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use sedge_core::error::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// File name of the translation tool.
const TOOL_EXECUTABLE: &str = "SolidEdgeTranslationServices.exe";

/// Prefix of the per-version Solid Edge installation directories.
const INSTALL_DIR_PREFIX: &str = "Solid Edge";

/// Errors from tool discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The executable was not found anywhere.
    #[error("{executable} not found. Searched: configured path, Solid Edge install folders, and PATH")]
    NotFound {
        /// The executable that was searched for.
        executable: String,
    },

    /// An explicitly configured path does not lead to the executable.
    #[error("{executable} not found at configured path {}", .path.display())]
    NotAtPath {
        /// The configured path.
        path: PathBuf,
        /// The executable that was searched for.
        executable: String,
    },
}

impl From<DiscoveryError> for AppError {
    fn from(err: DiscoveryError) -> Self {
        AppError::not_found(err.to_string())
    }
}

/// How a tool installation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscoveryMethod {
    /// Explicit configuration.
    ExplicitConfig,
    /// A Solid Edge installation folder.
    InstallFolder,
    /// The system PATH.
    SystemPath,
}

/// A located translation tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInstallation {
    /// Full path to the executable.
    pub executable: PathBuf,
    /// How it was found.
    pub discovery_method: DiscoveryMethod,
}

/// Translation tool discovery.
pub struct ToolDiscovery;

impl ToolDiscovery {
    /// Search install folders, then PATH.
    pub fn discover() -> Result<ToolInstallation, DiscoveryError> {
        info!("Searching for {TOOL_EXECUTABLE}...");

        for root in Self::siemens_roots() {
            if let Some(executable) = Self::find_in_siemens_root(&root) {
                info!(path = %executable.display(), "Found translation tool in install folder");
                return Ok(ToolInstallation {
                    executable,
                    discovery_method: DiscoveryMethod::InstallFolder,
                });
            }
        }
        debug!("Install folder discovery failed, trying PATH");

        if let Some(path_var) = std::env::var_os("PATH") {
            if let Some(executable) = Self::find_in_path_var(&path_var) {
                info!(path = %executable.display(), "Found translation tool in system PATH");
                return Ok(ToolInstallation {
                    executable,
                    discovery_method: DiscoveryMethod::SystemPath,
                });
            }
        }
        debug!("PATH discovery failed");

        Err(DiscoveryError::NotFound {
            executable: TOOL_EXECUTABLE.to_string(),
        })
    }

    /// Resolve a configured path: the executable itself, an install
    /// directory, or that directory's `Program` folder.
    pub fn from_explicit_path(path: &Path) -> Result<ToolInstallation, DiscoveryError> {
        let candidates = if path.is_dir() {
            vec![path.join(TOOL_EXECUTABLE), path.join("Program").join(TOOL_EXECUTABLE)]
        } else {
            vec![path.to_path_buf()]
        };

        candidates
            .into_iter()
            .find(|candidate| candidate.is_file())
            .map(|executable| ToolInstallation {
                executable,
                discovery_method: DiscoveryMethod::ExplicitConfig,
            })
            .ok_or_else(|| DiscoveryError::NotAtPath {
                path: path.to_path_buf(),
                executable: TOOL_EXECUTABLE.to_string(),
            })
    }

    /// Use `configured` when set, otherwise discover.
    pub fn resolve(configured: &Path) -> Result<ToolInstallation, DiscoveryError> {
        if configured.as_os_str().is_empty() {
            Self::discover()
        } else {
            Self::from_explicit_path(configured)
        }
    }

    /// File name of the translation tool.
    pub fn executable_name() -> &'static str {
        TOOL_EXECUTABLE
    }

    /// Look for `Solid Edge */Program/<tool>` under `root`, newest first.
    pub fn find_in_siemens_root(root: &Path) -> Option<PathBuf> {
        let entries = std::fs::read_dir(root).ok()?;

        let mut installs: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(INSTALL_DIR_PREFIX))
            })
            .collect();
        installs.sort();
        installs.reverse();

        installs
            .into_iter()
            .map(|dir| dir.join("Program").join(TOOL_EXECUTABLE))
            .find(|candidate| candidate.is_file())
    }

    /// Look for the tool in each directory of a PATH-style variable.
    pub fn find_in_path_var(path_var: &OsStr) -> Option<PathBuf> {
        std::env::split_paths(path_var)
            .map(|dir| dir.join(TOOL_EXECUTABLE))
            .find(|candidate| candidate.is_file())
    }

    fn siemens_roots() -> Vec<PathBuf> {
        let mut roots = Vec::new();

        for var in ["ProgramFiles", "ProgramW6432", "ProgramFiles(x86)"] {
            if let Some(dir) = std::env::var_os(var) {
                let root = PathBuf::from(dir).join("Siemens");
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
        }

        let fallback = PathBuf::from("C:/Program Files/Siemens");
        if !roots.contains(&fallback) {
            roots.push(fallback);
        }

        roots
    }
}
