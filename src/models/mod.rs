//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`DirectoryListing`], [`StatusReply`], [`DeviceInfo`] - Device wire payloads
//! - [`Notification`] - User-facing notices

mod notification;
mod remote;

pub use notification::{Notification, NotificationKind};
pub use remote::{DeviceInfo, DirectoryListing, StatusReply};
