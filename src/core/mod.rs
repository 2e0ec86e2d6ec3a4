//! Core logic of the device editor.
//!
//! This module provides:
//! - [`PathState`] and [`ListingFilter`] for what the file panel shows
//! - [`RemoteFileSession`] for the device's file endpoints
//! - [`encode`] for the RGB565 image format
//! - [`ReconnectSession`] for recovery after a device reset
//! - [`EditorController`] tying them together behind UI intents

pub mod controller;
pub mod error;
pub mod frontend;
pub mod image;
pub mod listing;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod painter;
pub mod path;
pub mod reconnect;
pub mod session;
pub mod transport;

pub use controller::EditorController;
pub use error::{FetchError, PreconditionError, SessionError};
pub use frontend::Frontend;
pub use image::{EncodedImage, ImageBuffer, ImageSize, Rgb, encode};
pub use listing::{BlacklistPattern, ListingFilter, ListingView};
pub use painter::{PixelCanvas, image_path};
pub use path::PathState;
pub use reconnect::{ReconnectOutcome, ReconnectSession, ReconnectState, Sleep};
pub use session::RemoteFileSession;
pub use transport::{HttpResponse, RequestBody, Transport};
