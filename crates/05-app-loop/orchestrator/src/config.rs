use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the dump directory.
pub const DUMP_DIR_ENV: &str = "CASTLE_DEBUG_DUMP_DIR";

const DEFAULT_DUMP_DIR: &str = "debug-dump";

/// Where failure dumps live and therefore what `on_reset` removes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Directory holding dumps written by earlier failures.
    pub dump_dir: PathBuf,
}

impl DiagnosticsConfig {
    /// Configuration rooted at `dump_dir`.
    pub fn new(dump_dir: impl Into<PathBuf>) -> Self {
        Self {
            dump_dir: dump_dir.into(),
        }
    }

    /// Reads [`DUMP_DIR_ENV`], falling back to the default directory when unset or empty.
    pub fn from_env() -> Self {
        match env::var_os(DUMP_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    /// Dump directory path.
    pub fn dump_dir(&self) -> &Path {
        &self.dump_dir
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DUMP_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_debug_dump() {
        assert_eq!(
            DiagnosticsConfig::default().dump_dir(),
            Path::new("debug-dump")
        );
    }

    #[test]
    fn env_override_and_empty_fallback() {
        let cases = vec![
            ("set", Some("/tmp/castle-dumps"), "/tmp/castle-dumps"),
            ("empty", Some(""), "debug-dump"),
            ("unset", None, "debug-dump"),
        ];

        // No other test in this crate reads this variable.
        for (name, value, expected) in cases {
            match value {
                Some(value) => env::set_var(DUMP_DIR_ENV, value),
                None => env::remove_var(DUMP_DIR_ENV),
            }
            assert_eq!(
                DiagnosticsConfig::from_env().dump_dir(),
                Path::new(expected),
                "{name}"
            );
        }
        env::remove_var(DUMP_DIR_ENV);
    }
}
