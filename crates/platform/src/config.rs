//! Application configuration and constants
//!
//! Central identity values used in log banners and self-test output.

/// The application name
pub const APP_NAME: &str = "Traffic Voice";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_tracks_manifest() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
        assert!(!APP_NAME.is_empty());
    }
}
