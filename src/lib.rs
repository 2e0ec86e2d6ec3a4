//! Browser editor for files on a MicroPython device.
//!
//! - [`core`] - Device session, path/listing state, image codec, reconnect
//! - [`app`], [`components`] - Leptos UI
//! - [`utils`] - Browser bindings (fetch, timers, dialogs, console)

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
