//! Contract between the editor controller and the UI.

use crate::core::listing::ListingView;
use crate::models::Notification;

/// Everything the controller needs from the user interface.
///
/// Dialogs are synchronous, matching the browser's `confirm`/`prompt`.
pub trait Frontend {
    /// Show a notice, replacing the current one.
    fn notify(&self, notification: Notification);

    /// Render a directory listing in the file panel.
    fn show_listing(&self, view: ListingView);

    /// Load file content into the editor.
    fn show_file(&self, path: &str, content: &str);

    /// Ask a yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Ask for a line of text. `None` when cancelled.
    fn prompt(&self, message: &str, default: &str) -> Option<String>;

    /// Reload the whole client after the device came back.
    fn reload(&self);
}
