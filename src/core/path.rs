//! Active directory and active file tracking.
//!
//! # Path Convention
//!
//! - Paths are absolute and use `/` separators
//! - The browsed directory always ends with `/`; root is `"/"`
//! - No normalization of `..` or repeated slashes is performed

use crate::config::ROOT_DIR;
use crate::core::error::PreconditionError;

/// Directory being browsed and file open in the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathState {
    active_dir: String,
    active_file: Option<String>,
}

impl PathState {
    /// Start at the root directory with no file open.
    pub fn new() -> Self {
        Self {
            active_dir: ROOT_DIR.to_string(),
            active_file: None,
        }
    }

    pub fn active_dir(&self) -> &str {
        &self.active_dir
    }

    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.active_dir == ROOT_DIR
    }

    /// Replace the browsed directory.
    ///
    /// The path must start and end with `/`.
    pub fn set_directory(&mut self, path: &str) -> Result<(), PreconditionError> {
        if !path.starts_with('/') || !path.ends_with('/') {
            return Err(PreconditionError::InvalidDirectory(path.to_string()));
        }
        self.active_dir = path.to_string();
        Ok(())
    }

    /// Enter a child directory of the browsed one.
    pub fn descend(&mut self, child: &str) {
        self.active_dir.push_str(child);
        self.active_dir.push('/');
    }

    /// Leave the browsed directory for its parent.
    ///
    /// Returns `false` without changing state when already at root.
    pub fn ascend(&mut self) -> bool {
        let mut components: Vec<&str> = self.active_dir.split('/').collect();
        if components.len() <= 2 {
            return false;
        }
        components.remove(components.len() - 2);
        self.active_dir = components.join("/");
        true
    }

    /// Absolute path of an entry inside the browsed directory.
    pub fn child_path(&self, name: &str) -> String {
        format!("{}{}", self.active_dir, name)
    }

    pub fn set_active_file(&mut self, path: impl Into<String>) {
        self.active_file = Some(path.into());
    }

    pub fn clear_active_file(&mut self) {
        self.active_file = None;
    }
}

impl Default for PathState {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory part of a file path, including the trailing `/`.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "",
    }
}

/// Whether a file carries the scripting extension.
pub fn is_runnable(path: &str, extension: &str) -> bool {
    path.ends_with(extension)
}

/// Dotted module name for running a file on the device.
///
/// Splits on `/`, drops empty segments, joins with `.` and strips the
/// scripting extension. Returns `None` when the extension is absent.
pub fn run_module_name(path: &str, extension: &str) -> Option<String> {
    let dotted = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".");
    dotted.strip_suffix(extension).map(str::to_string)
}
