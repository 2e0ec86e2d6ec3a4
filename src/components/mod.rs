//! UI components built with Leptos.
//!
//! - [`Toolbar`] - Device label, active file and actions
//! - [`FilePanel`] - Directory listing
//! - [`Editor`] - Text buffer of the active file
//! - [`NotificationBar`] - Current notice
//! - [`Painter`] - Pixel image painter

pub mod editor;
pub mod file_panel;
pub mod notification;
pub mod painter;
pub mod toolbar;

pub use editor::Editor;
pub use file_panel::FilePanel;
pub use notification::NotificationBar;
pub use painter::Painter;
pub use toolbar::Toolbar;
