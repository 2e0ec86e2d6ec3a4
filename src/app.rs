//! Root application module.
//!
//! Contains the main App component, AppContext definition, the signal-backed
//! [`Frontend`] and application-level setup logic following Leptos conventions.

use std::future::Future;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::{Editor, FilePanel, NotificationBar, Painter, Toolbar};
use crate::config::EditorConfig;
use crate::core::{EditorController, Frontend, ListingView, path};
use crate::models::{DeviceInfo, Notification};
use crate::utils::{FetchTransport, TimerSleep, dom, log};

stylance::import_crate_style!(css, "src/app.module.css");

/// Controller wired to the browser.
pub type Controller = EditorController<FetchTransport, SignalFrontend, TimerSleep>;

// ============================================================================
// EditorState
// ============================================================================

/// Everything the UI renders, held in Leptos signals.
///
/// This struct is `Copy` because all fields are Leptos signals.
#[derive(Clone, Copy)]
pub struct EditorState {
    /// Notice currently shown, if any.
    pub notification: RwSignal<Option<Notification>>,
    /// File panel contents.
    pub listing: RwSignal<ListingView>,
    /// File loaded in the editor.
    pub active_file: RwSignal<Option<String>>,
    /// Editor buffer.
    pub content: RwSignal<String>,
    /// Device identity from `/info`.
    pub device: RwSignal<Option<DeviceInfo>>,
    /// Whether the pixel painter is open.
    pub painter_open: RwSignal<bool>,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            notification: RwSignal::new(None),
            listing: RwSignal::new(ListingView::default()),
            active_file: RwSignal::new(None),
            content: RwSignal::new(String::new()),
            device: RwSignal::new(None),
            painter_open: RwSignal::new(false),
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SignalFrontend
// ============================================================================

/// [`Frontend`] that writes into [`EditorState`] and uses browser dialogs.
#[derive(Clone, Copy)]
pub struct SignalFrontend {
    state: EditorState,
}

impl SignalFrontend {
    pub fn new(state: EditorState) -> Self {
        Self { state }
    }
}

impl Frontend for SignalFrontend {
    fn notify(&self, notification: Notification) {
        let id = notification.id;
        let duration = notification.duration_secs;
        self.state.notification.set(Some(notification));

        // Only hide if the same notice is still showing
        if let Some(secs) = duration {
            let slot = self.state.notification;
            spawn_local(async move {
                TimeoutFuture::new(secs * 1000).await;
                if slot.with_untracked(|n| n.as_ref().is_some_and(|n| n.id == id)) {
                    slot.set(None);
                }
            });
        }
    }

    fn show_listing(&self, view: ListingView) {
        self.state.listing.set(view);
    }

    fn show_file(&self, path: &str, content: &str) {
        self.state.content.set(content.to_string());
        self.state.active_file.set(Some(path.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        dom::confirm(message)
    }

    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        dom::prompt(message, default)
    }

    fn reload(&self) {
        log::debug("Device is back online");
        dom::reload();
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide context.
///
/// Provided at the root of the component tree and accessed from any child
/// with `use_context::<AppContext>()`.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub state: EditorState,
    controller: StoredValue<Controller, LocalStorage>,
}

impl AppContext {
    pub fn new(config: EditorConfig) -> Self {
        let state = EditorState::new();
        let controller = EditorController::new(
            config,
            FetchTransport::default(),
            SignalFrontend::new(state),
            TimerSleep,
        );
        Self {
            state,
            controller: StoredValue::new_local(controller),
        }
    }

    pub fn controller(&self) -> Controller {
        self.controller.get_value()
    }

    /// Run an intent in the background. Failures are already surfaced as
    /// notifications by the controller.
    pub fn spawn<F, Fut>(&self, intent: F)
    where
        F: FnOnce(Controller) -> Fut,
        Fut: Future + 'static,
    {
        let fut = intent(self.controller());
        spawn_local(async move {
            let _ = fut.await;
        });
    }

    /// Reactive: whether run/stop apply to the open file.
    pub fn is_runnable(&self) -> bool {
        let extension = self
            .controller
            .with_value(|c| c.config().script_extension.clone());
        self.state
            .active_file
            .get()
            .is_some_and(|p| path::is_runnable(&p, &extension))
    }
}

/// Root application component.
///
/// Creates and provides the [`AppContext`], loads the root listing and the
/// device label, then renders the editor layout.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(EditorConfig::default());
    provide_context(ctx);

    ctx.spawn(|c| async move { c.start().await });
    ctx.spawn(move |c| async move {
        if let Ok(info) = c.device_info().await {
            ctx.state.device.set(Some(info));
        }
    });

    view! {
        <Toolbar />
        <div class=css::layout>
            <FilePanel />
            <Editor />
        </div>
        <NotificationBar />
        <Show when=move || ctx.state.painter_open.get()>
            <Painter />
        </Show>
    }
}
