//! Location of the bundled reference data.

use std::path::PathBuf;

/// Environment variable for overriding the reference data directory.
pub const REFERENCE_ENV_VAR: &str = "IPC_REFERENCE_DIR";

/// Get the default reference data root directory.
///
/// Checks the `IPC_REFERENCE_DIR` environment variable first, then falls
/// back to the `reference/` directory bundled with the crate.
pub fn default_reference_root() -> PathBuf {
    if let Ok(root) = std::env::var(REFERENCE_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("reference")
}
