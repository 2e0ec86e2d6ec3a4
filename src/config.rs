//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Runtime-relevant values are bundled into [`EditorConfig`] so tests can
//! swap in zero delays or a different device origin.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "weditor";

// =============================================================================
// Device Endpoints
// =============================================================================

/// Remote endpoint paths served by the device.
pub mod endpoints {
    pub const DIR: &str = "/dir";
    pub const NEW_DIR: &str = "/newdir";
    pub const NEW_FILE: &str = "/newfile";
    pub const FILE: &str = "/file";
    pub const SAVE_FILE: &str = "/savefileb";
    pub const DELETE_FILE: &str = "/deletefile";
    pub const RENAME_FILE: &str = "/renamefile";
    pub const RUN: &str = "/run";
    pub const RESET: &str = "/reset";
    pub const INFO: &str = "/info";
}

/// Header carrying the target path of a `/savefileb` upload.
pub const FILE_PATH_HEADER: &str = "File-Path";

/// Device origin. Empty means same-origin relative URLs.
pub const DEVICE_BASE_URL: &str = "";

// =============================================================================
// Filesystem Configuration
// =============================================================================

/// Root directory of the device filesystem.
pub const ROOT_DIR: &str = "/";

/// Files hidden from the listing unless "show all" is enabled.
pub const DEFAULT_BLACKLIST: &[&str] = &["boot.py", "config.ini", "webrepl_cfg.py", "*.json"];

/// Extension of files the device can run as modules.
pub const SCRIPT_EXTENSION: &str = ".py";

// =============================================================================
// Image Configuration
// =============================================================================

/// Directory painted images are written to.
pub const IMAGE_DIR: &str = "/images/";

/// Extension appended to painted image names.
pub const IMAGE_EXTENSION: &str = ".bin";

/// Name suggested when saving a painted image.
pub const DEFAULT_IMAGE_NAME: &str = "my_image";

/// Colour selected when the painter opens.
pub const DEFAULT_PAINT_COLOR: &str = "#00ff00";

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Device reset recovery timing.
pub mod reconnect {
    /// Wait before the first probe so the device can restart.
    pub const INITIAL_DELAY_MS: u32 = 5000;
    /// Wait between probes.
    pub const INTERVAL_MS: u32 = 3000;
    /// Probes before giving up (about one minute).
    pub const MAX_ATTEMPTS: u32 = 20;
}

// =============================================================================
// Notification Configuration
// =============================================================================

/// Auto-hide durations for notifications, in seconds.
pub mod notify_secs {
    pub const SUCCESS: u32 = 1;
    pub const WARNING: u32 = 2;
    pub const ERROR: u32 = 4;
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Timing of the polling loop that follows a device reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub initial_delay_ms: u32,
    pub interval_ms: u32,
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: reconnect::INITIAL_DELAY_MS,
            interval_ms: reconnect::INTERVAL_MS,
            max_attempts: reconnect::MAX_ATTEMPTS,
        }
    }
}

/// Settings fixed for the lifetime of an editor session.
#[derive(Clone, Debug)]
pub struct EditorConfig {
    /// Prefix for every endpoint URL.
    pub base_url: String,
    /// Blacklist patterns (literal names or `*` wildcards).
    pub blacklist: Vec<String>,
    /// Extension a file must carry to be runnable.
    pub script_extension: String,
    pub reconnect: ReconnectPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_url: DEVICE_BASE_URL.to_string(),
            blacklist: DEFAULT_BLACKLIST.iter().map(|p| p.to_string()).collect(),
            script_extension: SCRIPT_EXTENSION.to_string(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}
