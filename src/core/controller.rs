//! Editor intents: the glue between UI events, the device session and the
//! path/listing state.
//!
//! Every intent notifies the frontend about progress and outcome, then
//! returns the result so callers (and tests) can observe it. Overlapping
//! intents are not serialized; whichever response lands last wins.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{DEFAULT_IMAGE_NAME, EditorConfig, ROOT_DIR};
use crate::core::error::{PreconditionError, SessionError};
use crate::core::frontend::Frontend;
use crate::core::listing::ListingFilter;
use crate::core::painter::{PixelCanvas, image_path};
use crate::core::path::{self, PathState};
use crate::core::reconnect::{ReconnectOutcome, ReconnectSession, Sleep};
use crate::core::session::RemoteFileSession;
use crate::core::transport::{RequestBody, Transport};
use crate::models::{DeviceInfo, DirectoryListing, Notification};
use crate::utils::log;

/// Mutable state of one editor session.
#[derive(Debug)]
struct SessionContext {
    paths: PathState,
    filter: ListingFilter,
    /// Last listing received, re-rendered when the filter toggles
    listing: Option<(String, DirectoryListing)>,
}

struct Inner<T, F, S> {
    session: RemoteFileSession<T>,
    frontend: F,
    sleeper: S,
    config: EditorConfig,
    context: RefCell<SessionContext>,
}

/// Cheaply cloneable handle to an editor session.
pub struct EditorController<T, F, S> {
    inner: Rc<Inner<T, F, S>>,
}

impl<T, F, S> Clone for EditorController<T, F, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, F, S> EditorController<T, F, S>
where
    T: Transport,
    F: Frontend,
    S: Sleep,
{
    pub fn new(config: EditorConfig, transport: T, frontend: F, sleeper: S) -> Self {
        let context = SessionContext {
            paths: PathState::new(),
            filter: ListingFilter::new(config.blacklist.as_slice()),
            listing: None,
        };
        Self {
            inner: Rc::new(Inner {
                session: RemoteFileSession::new(transport, config.base_url.clone()),
                frontend,
                sleeper,
                config,
                context: RefCell::new(context),
            }),
        }
    }

    pub fn session(&self) -> &RemoteFileSession<T> {
        &self.inner.session
    }

    pub fn frontend(&self) -> &F {
        &self.inner.frontend
    }

    pub fn sleeper(&self) -> &S {
        &self.inner.sleeper
    }

    pub fn config(&self) -> &EditorConfig {
        &self.inner.config
    }

    pub fn active_dir(&self) -> String {
        self.inner.context.borrow().paths.active_dir().to_string()
    }

    pub fn active_file(&self) -> Option<String> {
        self.inner
            .context
            .borrow()
            .paths
            .active_file()
            .map(str::to_string)
    }

    pub fn show_all(&self) -> bool {
        self.inner.context.borrow().filter.show_all()
    }

    /// Whether run/stop apply to the active file.
    pub fn is_active_runnable(&self) -> bool {
        self.active_file()
            .is_some_and(|p| path::is_runnable(&p, &self.inner.config.script_extension))
    }

    fn with_context<R>(&self, f: impl FnOnce(&mut SessionContext) -> R) -> R {
        f(&mut self.inner.context.borrow_mut())
    }

    fn notify(&self, notification: Notification) {
        self.inner.frontend.notify(notification);
    }

    fn require_active_file(&self) -> Result<String, SessionError> {
        self.active_file()
            .ok_or_else(|| PreconditionError::NoActiveFile.into())
    }

    /// Surface a failed intent: local violations as a warning with their own
    /// message, everything else as an error prefixed with the action.
    fn report<R>(&self, action: &str, result: Result<R, SessionError>) -> Result<R, SessionError> {
        if let Err(err) = &result {
            if err.is_local() {
                log::warn(&err.to_string());
                self.notify(Notification::warning(err.to_string()));
            } else {
                let message = format!("Error {}: {}", action, err);
                log::error(&message);
                self.notify(Notification::error(message));
            }
        }
        result
    }

    // =========================================================================
    // Directory navigation
    // =========================================================================

    /// Load the root listing.
    pub async fn start(&self) -> Result<(), SessionError> {
        self.load_directory(ROOT_DIR).await
    }

    /// Make `path` the browsed directory and list it.
    pub async fn load_directory(&self, path: &str) -> Result<(), SessionError> {
        let result: Result<(), SessionError> = async {
            self.with_context(|ctx| ctx.paths.set_directory(path))?;
            self.fetch_listing(path).await
        }
        .await;
        self.report("loading directory", result)
    }

    async fn fetch_listing(&self, path: &str) -> Result<(), SessionError> {
        self.notify(Notification::progress(format!("Loading directory: {}", path)));
        let listing = self.inner.session.list_directory(path).await?;
        let view = self.with_context(|ctx| {
            let view = ctx.filter.render(&listing, path);
            ctx.listing = Some((path.to_string(), listing));
            view
        });
        self.inner.frontend.show_listing(view);
        self.notify(Notification::success(format!("Loaded directory: {}", path)));
        Ok(())
    }

    /// Re-list the browsed directory.
    pub async fn refresh(&self) -> Result<(), SessionError> {
        let dir = self.active_dir();
        self.report("loading directory", self.fetch_listing(&dir).await)
    }

    pub async fn enter_directory(&self, name: &str) -> Result<(), SessionError> {
        self.with_context(|ctx| ctx.paths.descend(name));
        self.refresh().await
    }

    /// Go up one level. Does nothing at root.
    pub async fn parent_directory(&self) -> Result<(), SessionError> {
        if !self.with_context(|ctx| ctx.paths.ascend()) {
            return Ok(());
        }
        self.refresh().await
    }

    /// Flip the "show all files" flag and re-render the last listing.
    pub fn toggle_show_all(&self) -> bool {
        let (show_all, view) = self.with_context(|ctx| {
            let show_all = ctx.filter.toggle();
            let view = ctx
                .listing
                .as_ref()
                .map(|(dir, listing)| ctx.filter.render(listing, dir));
            (show_all, view)
        });
        if let Some(view) = view {
            self.inner.frontend.show_listing(view);
        }
        show_all
    }

    fn prompt_name(&self, message: &str, default: &str) -> Option<String> {
        self.inner
            .frontend
            .prompt(message, default)
            .filter(|name| !name.is_empty())
    }

    pub async fn create_directory(&self) -> Result<(), SessionError> {
        let dir = self.active_dir();
        let Some(name) = self.prompt_name(&format!("New directory name (in: {})", dir), "") else {
            return Ok(());
        };
        let result: Result<(), SessionError> = async {
            let path = format!("{}{}", dir, name);
            self.notify(Notification::progress(format!("Creating directory: {}", path)));
            self.inner.session.create_directory(&path).await?;
            Ok(())
        }
        .await;
        self.report("creating directory", result)?;
        self.refresh().await
    }

    // =========================================================================
    // Files
    // =========================================================================

    fn loaded_file(&self, path: &str, content: &str) {
        self.with_context(|ctx| ctx.paths.set_active_file(path));
        self.inner.frontend.show_file(path, content);
        self.notify(Notification::success(format!("Loaded: {}", path)));
    }

    pub async fn create_file(&self) -> Result<(), SessionError> {
        let dir = self.active_dir();
        let Some(name) = self.prompt_name(&format!("New file name (in: {})", dir), "") else {
            return Ok(());
        };
        let path = format!("{}{}", dir, name);
        let result: Result<String, SessionError> = async {
            self.notify(Notification::progress(format!("Creating file: {}", path)));
            self.inner.session.create_file(&path).await
        }
        .await;
        let content = self.report("creating file", result)?;
        self.loaded_file(&path, &content);
        self.refresh().await
    }

    /// Open a file of the browsed directory in the editor.
    pub async fn open_file(&self, name: &str) -> Result<(), SessionError> {
        let path = self.with_context(|ctx| ctx.paths.child_path(name));
        self.notify(Notification::progress(format!("Loading file: {}", path)));
        let content = self.report("loading file", self.inner.session.read_file(&path).await)?;
        self.loaded_file(&path, &content);
        Ok(())
    }

    async fn write_active(&self, path: &str, content: &str) -> Result<(), SessionError> {
        self.notify(Notification::progress(format!("Saving file: {}", path)));
        self.inner
            .session
            .write_file(path, RequestBody::Text(content))
            .await?;
        self.notify(Notification::success("Saved"));
        Ok(())
    }

    /// Write the full editor buffer to the active file.
    pub async fn save(&self, content: &str) -> Result<(), SessionError> {
        let result: Result<(), SessionError> = async {
            let path = self.require_active_file()?;
            self.write_active(&path, content).await
        }
        .await;
        self.report("saving file", result)
    }

    /// Save, then run the active file as a module.
    pub async fn save_and_run(&self, content: &str) -> Result<(), SessionError> {
        let result: Result<(), SessionError> = async {
            let path = self.require_active_file()?;
            let module = path::run_module_name(&path, &self.inner.config.script_extension)
                .ok_or_else(|| PreconditionError::NotRunnable(path.clone()))?;
            self.write_active(&path, content).await?;
            self.inner.session.trigger_run(&module).await?;
            self.notify(Notification::success(format!("Running file {}", module)));
            Ok(())
        }
        .await;
        self.report("running file", result)
    }

    pub async fn stop(&self) -> Result<(), SessionError> {
        self.notify(Notification::brief_progress("Stopping active 'process'"));
        self.report("stopping", self.inner.session.trigger_stop().await)?;
        self.notify(Notification::success("Stopped"));
        Ok(())
    }

    /// Delete the active file after confirmation, then browse root.
    ///
    /// The active file pointer is kept; only the directory resets.
    pub async fn delete_file(&self) -> Result<(), SessionError> {
        let path = self.report("deleting file", self.require_active_file())?;
        if !self
            .inner
            .frontend
            .confirm(&format!("Are you sure you want to delete {}?", path))
        {
            return Ok(());
        }
        self.notify(Notification::progress(format!("Deleting file: {}", path)));
        self.report("deleting file", self.inner.session.delete_file(&path).await)?;
        self.notify(Notification::success("File deleted"));
        self.load_directory(ROOT_DIR).await
    }

    /// Rename the active file within its directory and reopen it.
    pub async fn rename_file(&self) -> Result<(), SessionError> {
        let old_path = self.report("renaming file", self.require_active_file())?;
        let Some(name) = self.prompt_name(&format!("New name for {}:", old_path), "") else {
            return Ok(());
        };
        let new_path = format!("{}{}", path::parent_dir(&old_path), name);
        self.notify(Notification::progress(format!("Renaming file to: {}", new_path)));
        self.report(
            "renaming file",
            self.inner.session.move_file(&old_path, &new_path).await,
        )?;
        self.notify(Notification::success("File renamed"));
        // The file is already renamed; the pointer moves only once it reads back
        let content = self.report("renaming file", self.inner.session.read_file(&new_path).await)?;
        self.loaded_file(&new_path, &content);
        self.refresh().await
    }

    // =========================================================================
    // Device
    // =========================================================================

    /// Reset the device after confirmation and wait for it to come back.
    ///
    /// Returns `None` when the user declined. On reconnect the frontend is
    /// reloaded; on give-up a persistent notice is shown.
    pub async fn reset_device(&self) -> Result<Option<ReconnectOutcome>, SessionError> {
        if !self
            .inner
            .frontend
            .confirm("Are you sure you want to reset the device?")
        {
            return Ok(None);
        }
        self.notify(Notification::progress("Resetting device..."));
        self.report("resetting device", self.inner.session.reset_device().await)?;
        self.notify(Notification::timed_progress(
            "Device is resetting, waiting for reconnect...",
        ));

        let mut reconnect = ReconnectSession::new(self.inner.config.reconnect);
        let outcome = reconnect
            .run(&self.inner.session, &self.inner.sleeper)
            .await;
        match outcome {
            ReconnectOutcome::Reconnected => self.inner.frontend.reload(),
            ReconnectOutcome::GaveUp => self.notify(Notification::persistent_error(
                "Could not reconnect to device. Please reload manually.",
            )),
        }
        Ok(Some(outcome))
    }

    pub async fn device_info(&self) -> Result<DeviceInfo, SessionError> {
        self.report("loading device info", self.inner.session.device_info().await)
    }

    /// Prompt for a name, encode the canvas and upload it under `/images/`.
    pub async fn save_image(&self, canvas: &PixelCanvas) -> Result<Option<String>, SessionError> {
        let Some(name) = self.prompt_name(
            "Enter a name (use only letters, numbers and underscores):",
            DEFAULT_IMAGE_NAME,
        ) else {
            return Ok(None);
        };
        let result: Result<String, SessionError> = async {
            let path = image_path(&name)?;
            let encoded = canvas.encode();
            self.inner
                .session
                .write_file(&path, RequestBody::Binary(encoded.as_bytes()))
                .await?;
            Ok(path)
        }
        .await;
        let path = self.report("saving image", result)?;
        self.notify(Notification::success(format!("Image saved as {}", path)));
        self.refresh().await?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReconnectPolicy;
    use crate::core::error::FetchError;
    use crate::core::mock::{InstantSleep, MockFrontend, MockTransport};
    use crate::core::transport::HttpResponse;
    use crate::models::NotificationKind;

    type TestController = EditorController<MockTransport, MockFrontend, InstantSleep>;

    fn controller() -> TestController {
        let config = EditorConfig {
            reconnect: ReconnectPolicy {
                initial_delay_ms: 0,
                interval_ms: 0,
                max_attempts: 3,
            },
            ..Default::default()
        };
        EditorController::new(config, MockTransport::new(), MockFrontend::new(), InstantSleep::new())
    }

    fn transport(c: &TestController) -> &MockTransport {
        c.session().transport()
    }

    const ROOT_LISTING: &str = r#"{"files": ["main.py", "boot.py", "a.json"], "dirs": ["lib"]}"#;

    async fn open(c: &TestController, name: &str, content: &str) {
        transport(c).respond("/file", HttpResponse::ok(content));
        c.open_file(name).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_lists_root() {
        let c = controller();
        transport(&c).respond("/dir", HttpResponse::ok(ROOT_LISTING));

        c.start().await.unwrap();

        let view = c.frontend().last_listing().unwrap();
        assert_eq!(view.directory, "/");
        assert_eq!(view.visible_files, vec!["main.py"]);
        assert!(view.dirs.is_empty());
        assert_eq!(
            c.frontend().messages(),
            vec!["Loading directory: /", "Loaded directory: /"]
        );
    }

    #[tokio::test]
    async fn test_navigation() {
        let c = controller();
        transport(&c).respond("/dir", HttpResponse::ok("{}"));

        c.enter_directory("lib").await.unwrap();
        assert_eq!(c.active_dir(), "/lib/");
        c.enter_directory("util").await.unwrap();
        assert_eq!(c.active_dir(), "/lib/util/");
        c.parent_directory().await.unwrap();
        assert_eq!(c.active_dir(), "/lib/");
        c.parent_directory().await.unwrap();
        assert_eq!(c.active_dir(), "/");

        let before = transport(&c).count("/dir");
        c.parent_directory().await.unwrap();
        assert_eq!(c.active_dir(), "/");
        assert_eq!(transport(&c).count("/dir"), before);
        assert_eq!(
            transport(&c).urls(),
            vec![
                "/dir?path=/lib/",
                "/dir?path=/lib/util/",
                "/dir?path=/lib/",
                "/dir?path=/"
            ]
        );
    }

    #[tokio::test]
    async fn test_listing_failure_keeps_previous_view() {
        let c = controller();
        transport(&c).respond("/dir", HttpResponse::ok(ROOT_LISTING));
        transport(&c).respond("/dir", HttpResponse::new(500, ""));
        c.start().await.unwrap();

        let err = c.refresh().await.unwrap_err();
        assert_eq!(err, SessionError::Transport(FetchError::HttpError(500)));
        assert_eq!(c.frontend().listings.borrow().len(), 1);
        let last = c.frontend().last_notification().unwrap();
        assert_eq!(last.kind, NotificationKind::Error);
        assert_eq!(last.message, "Error loading directory: HTTP error: 500");
    }

    #[tokio::test]
    async fn test_toggle_rerenders_without_request() {
        let c = controller();
        transport(&c).respond("/dir", HttpResponse::ok(ROOT_LISTING));
        c.start().await.unwrap();

        assert!(c.toggle_show_all());
        let view = c.frontend().last_listing().unwrap();
        assert!(view.show_all);
        assert!(!view.show_parent);
        assert_eq!(view.dirs, vec!["lib"]);
        assert_eq!(view.hidden_files, vec!["boot.py", "a.json"]);
        assert_eq!(transport(&c).count("/dir"), 1);

        assert!(!c.toggle_show_all());
        assert!(c.frontend().last_listing().unwrap().hidden_files.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_before_any_listing() {
        let c = controller();
        assert!(c.toggle_show_all());
        assert!(c.frontend().listings.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_open_file_sets_active_file() {
        let c = controller();
        c.enter_directory("lib").await.ok();
        open(&c, "net.py", "import socket").await;

        assert_eq!(c.active_file().as_deref(), Some("/lib/net.py"));
        assert_eq!(
            c.frontend().last_file(),
            Some(("/lib/net.py".to_string(), "import socket".to_string()))
        );
        assert!(c.is_active_runnable());
        // Browsed directory is unaffected
        assert_eq!(c.active_dir(), "/lib/");
    }

    #[tokio::test]
    async fn test_failed_read_keeps_active_file() {
        let c = controller();
        open(&c, "main.py", "").await;
        transport(&c).respond("/file", HttpResponse::new(404, ""));

        assert!(c.open_file("missing.py").await.is_err());
        assert_eq!(c.active_file().as_deref(), Some("/main.py"));
    }

    #[tokio::test]
    async fn test_save_sends_buffer() {
        let c = controller();
        open(&c, "main.py", "").await;
        transport(&c).respond("/savefileb", HttpResponse::ok(r#"{"saved": true}"#));

        c.save("print('hi')").await.unwrap();

        let request = transport(&c).last_request().unwrap();
        assert_eq!(request.header("File-Path"), Some("/main.py"));
        assert_eq!(request.header("Content-Type"), Some("text/plain"));
        assert_eq!(request.body, b"print('hi')".to_vec());
        assert_eq!(c.frontend().last_notification().unwrap().message, "Saved");
    }

    #[tokio::test]
    async fn test_save_without_file_is_warning() {
        let c = controller();
        let err = c.save("x").await.unwrap_err();
        assert_eq!(err, SessionError::Precondition(PreconditionError::NoActiveFile));
        assert!(transport(&c).requests().is_empty());

        let last = c.frontend().last_notification().unwrap();
        assert_eq!(last.kind, NotificationKind::Warning);
        assert_eq!(last.message, "No file selected");
    }

    #[tokio::test]
    async fn test_save_and_run() {
        let c = controller();
        c.enter_directory("lib").await.ok();
        open(&c, "net.py", "").await;
        transport(&c).respond("/savefileb", HttpResponse::ok("{}"));
        transport(&c).respond("/run", HttpResponse::ok("{}"));

        c.save_and_run("x = 1").await.unwrap();

        let urls = transport(&c).urls();
        assert_eq!(&urls[urls.len() - 2..], &["/savefileb", "/run?name=lib.net"]);
        assert_eq!(
            c.frontend().last_notification().unwrap().message,
            "Running file lib.net"
        );
    }

    #[tokio::test]
    async fn test_run_refuses_non_script() {
        let c = controller();
        open(&c, "app.txt", "").await;
        let sent = transport(&c).requests().len();

        let err = c.save_and_run("text").await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(transport(&c).requests().len(), sent);
        assert_eq!(
            c.frontend().last_notification().unwrap().message,
            "Can only run python files"
        );
    }

    #[tokio::test]
    async fn test_run_skipped_when_save_fails() {
        let c = controller();
        open(&c, "main.py", "").await;
        transport(&c).respond("/savefileb", HttpResponse::ok(r#"{"error": "disk full"}"#));

        let err = c.save_and_run("").await.unwrap_err();
        assert_eq!(err, SessionError::Remote("disk full".to_string()));
        assert_eq!(transport(&c).count("/run"), 0);
        assert_eq!(
            c.frontend().last_notification().unwrap().message,
            "Error running file: disk full"
        );
    }

    #[tokio::test]
    async fn test_stop() {
        let c = controller();
        transport(&c).respond("/run", HttpResponse::ok("{}"));
        c.stop().await.unwrap();
        assert_eq!(transport(&c).urls(), vec!["/run?stop=1"]);
        assert_eq!(
            c.frontend().messages(),
            vec!["Stopping active 'process'", "Stopped"]
        );
        let first = c.frontend().notifications.borrow()[0].clone();
        assert_eq!(first.kind, NotificationKind::Progress);
        assert_eq!(first.duration_secs, Some(1));
    }

    #[tokio::test]
    async fn test_delete_resets_directory_to_root() {
        let c = controller();
        transport(&c).respond("/dir", HttpResponse::ok("{}"));
        c.enter_directory("lib").await.unwrap();
        open(&c, "net.py", "").await;
        transport(&c).respond("/deletefile", HttpResponse::ok("{}"));
        c.frontend().answer_confirm(true);

        c.delete_file().await.unwrap();

        assert_eq!(c.active_dir(), "/");
        assert!(transport(&c).urls().contains(&"/deletefile?path=/lib/net.py".to_string()));
        assert_eq!(transport(&c).urls().last().unwrap(), "/dir?path=/");
        assert_eq!(c.active_file().as_deref(), Some("/lib/net.py"));
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let c = controller();
        open(&c, "main.py", "").await;
        c.frontend().answer_confirm(false);

        c.delete_file().await.unwrap();
        assert_eq!(transport(&c).count("/deletefile"), 0);
    }

    #[tokio::test]
    async fn test_delete_error_keeps_state() {
        let c = controller();
        transport(&c).respond("/dir", HttpResponse::ok("{}"));
        c.enter_directory("lib").await.unwrap();
        open(&c, "net.py", "").await;
        transport(&c).respond("/deletefile", HttpResponse::ok(r#"{"error": "busy"}"#));
        c.frontend().answer_confirm(true);

        assert!(c.delete_file().await.is_err());
        assert_eq!(c.active_dir(), "/lib/");
        assert_eq!(
            c.frontend().last_notification().unwrap().message,
            "Error deleting file: busy"
        );
    }

    #[tokio::test]
    async fn test_rename_updates_active_file() {
        let c = controller();
        transport(&c).respond("/dir", HttpResponse::ok("{}"));
        c.enter_directory("lib").await.unwrap();
        open(&c, "a.py", "x").await;
        c.frontend().answer_prompt(Some("b.py"));
        transport(&c).respond("/renamefile", HttpResponse::ok("{}"));

        c.rename_file().await.unwrap();

        assert_eq!(c.active_file().as_deref(), Some("/lib/b.py"));
        assert!(
            transport(&c)
                .urls()
                .contains(&"/renamefile?old_path=/lib/a.py&new_path=/lib/b.py".to_string())
        );
        assert_eq!(c.frontend().last_file().unwrap().0, "/lib/b.py");
    }

    #[tokio::test]
    async fn test_rename_read_failure_keeps_active_file() {
        let c = controller();
        open(&c, "a.py", "x").await;
        c.frontend().answer_prompt(Some("b.py"));
        transport(&c).respond("/renamefile", HttpResponse::ok("{}"));
        transport(&c).respond("/file", HttpResponse::new(500, ""));

        assert!(c.rename_file().await.is_err());
        assert_eq!(c.active_file().as_deref(), Some("/a.py"));
        // The rename itself went through
        let messages = c.frontend().messages();
        assert!(messages.contains(&"File renamed".to_string()));
        assert_eq!(messages.last().unwrap(), "Error renaming file: HTTP error: 500");
    }

    #[tokio::test]
    async fn test_rename_error_skips_read() {
        let c = controller();
        open(&c, "a.py", "x").await;
        c.frontend().answer_prompt(Some("b.py"));
        transport(&c).respond("/renamefile", HttpResponse::ok(r#"{"error": "exists"}"#));

        assert!(c.rename_file().await.is_err());
        assert_eq!(c.active_file().as_deref(), Some("/a.py"));
        assert_eq!(transport(&c).count("/file"), 1);
        assert_eq!(transport(&c).count("/dir"), 0);
        let messages = c.frontend().messages();
        assert!(!messages.contains(&"File renamed".to_string()));
        assert_eq!(messages.last().unwrap(), "Error renaming file: exists");
    }

    #[tokio::test]
    async fn test_rename_cancelled() {
        let c = controller();
        open(&c, "a.py", "x").await;
        c.frontend().answer_prompt(None);

        c.rename_file().await.unwrap();
        assert_eq!(transport(&c).count("/renamefile"), 0);
    }

    #[tokio::test]
    async fn test_create_file_loads_and_refreshes() {
        let c = controller();
        c.frontend().answer_prompt(Some("new.py"));
        transport(&c).respond("/newfile", HttpResponse::ok("{}"));
        transport(&c).respond("/file", HttpResponse::ok(""));
        transport(&c).respond("/dir", HttpResponse::ok(r#"{"files": ["new.py"]}"#));

        c.create_file().await.unwrap();

        assert_eq!(c.active_file().as_deref(), Some("/new.py"));
        assert_eq!(
            transport(&c).urls(),
            vec!["/newfile?path=/new.py", "/file?path=/new.py", "/dir?path=/"]
        );
    }

    #[tokio::test]
    async fn test_create_file_error_aborts_chain() {
        let c = controller();
        c.frontend().answer_prompt(Some("new.py"));
        transport(&c).respond("/newfile", HttpResponse::ok(r#"{"error": "exists"}"#));

        assert!(c.create_file().await.is_err());
        assert_eq!(transport(&c).urls(), vec!["/newfile?path=/new.py"]);
        assert_eq!(c.active_file(), None);
        assert_eq!(
            c.frontend().last_notification().unwrap().message,
            "Error creating file: exists"
        );
    }

    #[tokio::test]
    async fn test_create_file_read_failure_aborts_chain() {
        let c = controller();
        c.frontend().answer_prompt(Some("n.py"));
        transport(&c).respond("/newfile", HttpResponse::ok("{}"));
        transport(&c).respond("/file", HttpResponse::new(500, ""));

        assert!(c.create_file().await.is_err());
        assert_eq!(c.active_file(), None);
        assert!(c.frontend().last_file().is_none());
        assert_eq!(
            transport(&c).urls(),
            vec!["/newfile?path=/n.py", "/file?path=/n.py"]
        );
    }

    #[tokio::test]
    async fn test_create_directory_error_skips_refresh() {
        let c = controller();
        c.frontend().answer_prompt(Some("data"));
        transport(&c).respond("/newdir", HttpResponse::ok(r#"{"error": "exists"}"#));

        let err = c.create_directory().await.unwrap_err();
        assert_eq!(err, SessionError::Remote("exists".to_string()));
        assert_eq!(transport(&c).urls(), vec!["/newdir?path=/data"]);
        let last = c.frontend().last_notification().unwrap();
        assert_eq!(last.kind, NotificationKind::Error);
        assert_eq!(last.message, "Error creating directory: exists");
    }

    #[tokio::test]
    async fn test_create_directory() {
        let c = controller();
        c.frontend().answer_prompt(Some("data"));
        transport(&c).respond("/newdir", HttpResponse::ok("{}"));
        transport(&c).respond("/dir", HttpResponse::ok("{}"));

        c.create_directory().await.unwrap();
        assert_eq!(
            transport(&c).urls(),
            vec!["/newdir?path=/data", "/dir?path=/"]
        );
        assert!(c.frontend().messages().contains(&"Creating directory: /data".to_string()));
    }

    #[tokio::test]
    async fn test_empty_prompt_is_cancel() {
        let c = controller();
        c.frontend().answer_prompt(Some(""));
        c.create_directory().await.unwrap();
        assert!(transport(&c).requests().is_empty());
    }

    #[tokio::test]
    async fn test_reset_reconnects_and_reloads() {
        let c = controller();
        c.frontend().answer_confirm(true);
        transport(&c).respond("/reset", HttpResponse::ok("{}"));
        transport(&c).respond("/info", HttpResponse::new(503, ""));
        transport(&c).respond("/info", HttpResponse::ok("{}"));

        let outcome = c.reset_device().await.unwrap();
        assert_eq!(outcome, Some(ReconnectOutcome::Reconnected));
        assert_eq!(*c.frontend().reloads.borrow(), 1);
        assert_eq!(transport(&c).count("/info"), 2);
    }

    #[tokio::test]
    async fn test_reset_gives_up() {
        let c = controller();
        c.frontend().answer_confirm(true);
        transport(&c).respond("/reset", HttpResponse::ok("{}"));
        transport(&c).fail("/info", FetchError::NetworkError("offline".to_string()));

        let outcome = c.reset_device().await.unwrap();
        assert_eq!(outcome, Some(ReconnectOutcome::GaveUp));
        assert_eq!(*c.frontend().reloads.borrow(), 0);

        let last = c.frontend().last_notification().unwrap();
        assert_eq!(
            last.message,
            "Could not reconnect to device. Please reload manually."
        );
        assert_eq!(last.duration_secs, None);
    }

    #[tokio::test]
    async fn test_reset_error_skips_reconnect() {
        let c = controller();
        c.frontend().answer_confirm(true);
        transport(&c).respond("/reset", HttpResponse::ok(r#"{"error": "nope"}"#));

        assert!(c.reset_device().await.is_err());
        assert_eq!(transport(&c).count("/info"), 0);
        assert!(c.sleeper().delays().is_empty());
    }

    #[tokio::test]
    async fn test_reset_declined() {
        let c = controller();
        assert_eq!(c.reset_device().await.unwrap(), None);
        assert!(transport(&c).requests().is_empty());
    }

    #[tokio::test]
    async fn test_save_image_uploads_binary() {
        let c = controller();
        let mut canvas = PixelCanvas::default();
        canvas.paint(0, 0);
        c.frontend().answer_prompt(Some("logo"));
        transport(&c).respond("/savefileb", HttpResponse::ok("{}"));
        transport(&c).respond("/dir", HttpResponse::ok("{}"));

        let path = c.save_image(&canvas).await.unwrap();
        assert_eq!(path.as_deref(), Some("/images/logo.bin"));

        let request = transport(&c)
            .requests()
            .into_iter()
            .find(|r| r.url == "/savefileb")
            .unwrap();
        assert_eq!(request.header("File-Path"), Some("/images/logo.bin"));
        assert_eq!(request.header("Content-Type"), Some("application/octet-stream"));
        assert_eq!(request.body.len(), 4 + 2 * 16 * 16);
        assert_eq!(&request.body[..6], &[0, 16, 0, 16, 0x07, 0xE0]);
        assert!(c.frontend().messages().contains(&"Image saved as /images/logo.bin".to_string()));
    }

    #[tokio::test]
    async fn test_save_image_rejects_bad_name() {
        let c = controller();
        c.frontend().answer_prompt(Some("../boot"));

        let err = c.save_image(&PixelCanvas::default()).await.unwrap_err();
        assert!(err.is_local());
        assert!(transport(&c).requests().is_empty());
    }

    #[tokio::test]
    async fn test_device_info() {
        let c = controller();
        transport(&c).respond(
            "/info",
            HttpResponse::ok(r#"{"name": "badge", "ip": "10.0.0.2", "hostname": "badge.local"}"#),
        );
        let info = c.device_info().await.unwrap();
        assert_eq!(info.name, "badge");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let c = controller();
        let other = c.clone();
        open(&c, "main.py", "").await;
        assert_eq!(other.active_file().as_deref(), Some("/main.py"));
    }
}
