//! Request/response contracts against the device's file resource.
//!
//! Each method maps to one remote action. Multi-step actions (create then
//! read, rename then read) run sequentially and stop at the first failure;
//! earlier steps are not rolled back.

use serde::de::DeserializeOwned;

use crate::config::{FILE_PATH_HEADER, endpoints};
use crate::core::error::{FetchError, SessionError};
use crate::core::transport::{HttpResponse, RequestBody, Transport};
use crate::models::{DeviceInfo, DirectoryListing, StatusReply};
use crate::utils::{endpoint_url, log};

/// Client for the device's file endpoints.
pub struct RemoteFileSession<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> RemoteFileSession<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        endpoint_url(&self.base_url, endpoint, params)
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        log::debug(&format!("GET {}", url));
        self.transport.get(url).await
    }

    /// GET returning the raw body of a 2xx response.
    async fn get_text(&self, url: &str) -> Result<String, SessionError> {
        let resp = self.get(url).await?;
        if !resp.is_success() {
            return Err(FetchError::HttpError(resp.status).into());
        }
        Ok(resp.body)
    }

    /// GET decoding a JSON body of a 2xx response.
    async fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D, SessionError> {
        let text = self.get_text(url).await?;
        serde_json::from_str(&text)
            .map_err(|e| FetchError::JsonParseError(e.to_string()).into())
    }

    /// GET expecting a status object.
    async fn get_status(&self, url: &str) -> Result<StatusReply, SessionError> {
        let resp = self.get(url).await?;
        into_status(resp)
    }

    /// `GET /dir`
    pub async fn list_directory(&self, path: &str) -> Result<DirectoryListing, SessionError> {
        self.get_json(&self.url(endpoints::DIR, &[("path", path)]))
            .await
    }

    /// `GET /newdir`
    pub async fn create_directory(&self, path: &str) -> Result<StatusReply, SessionError> {
        self.get_status(&self.url(endpoints::NEW_DIR, &[("path", path)]))
            .await
    }

    /// `GET /newfile`, then read the created file back.
    pub async fn create_file(&self, path: &str) -> Result<String, SessionError> {
        self.get_status(&self.url(endpoints::NEW_FILE, &[("path", path)]))
            .await?;
        self.read_file(path).await
    }

    /// `GET /file`
    pub async fn read_file(&self, path: &str) -> Result<String, SessionError> {
        self.get_text(&self.url(endpoints::FILE, &[("path", path)]))
            .await
    }

    /// `POST /savefileb` with the target path in the `File-Path` header.
    pub async fn write_file(
        &self,
        path: &str,
        body: RequestBody<'_>,
    ) -> Result<StatusReply, SessionError> {
        let url = self.url(endpoints::SAVE_FILE, &[]);
        log::debug(&format!("POST {} ({} bytes to {})", url, body.len(), path));
        let headers = [
            ("Content-Type", body.content_type()),
            (FILE_PATH_HEADER, path),
        ];
        let resp = self.transport.post(&url, &headers, body).await?;
        into_status(resp)
    }

    /// `GET /deletefile`
    pub async fn delete_file(&self, path: &str) -> Result<StatusReply, SessionError> {
        self.get_status(&self.url(endpoints::DELETE_FILE, &[("path", path)]))
            .await
    }

    /// `GET /renamefile`, then read the file at its new path.
    pub async fn rename_file(&self, old_path: &str, new_path: &str) -> Result<String, SessionError> {
        self.move_file(old_path, new_path).await?;
        self.read_file(new_path).await
    }

    /// `GET /renamefile` without the follow-up read.
    pub async fn move_file(&self, old_path: &str, new_path: &str) -> Result<StatusReply, SessionError> {
        self.get_status(&self.url(
            endpoints::RENAME_FILE,
            &[("old_path", old_path), ("new_path", new_path)],
        ))
        .await
    }

    /// `GET /run?name=`
    pub async fn trigger_run(&self, module: &str) -> Result<StatusReply, SessionError> {
        self.get_status(&self.url(endpoints::RUN, &[("name", module)]))
            .await
    }

    /// `GET /run?stop=1`
    pub async fn trigger_stop(&self) -> Result<StatusReply, SessionError> {
        self.get_status(&self.url(endpoints::RUN, &[("stop", "1")]))
            .await
    }

    /// `GET /reset`
    pub async fn reset_device(&self) -> Result<StatusReply, SessionError> {
        self.get_status(&self.url(endpoints::RESET, &[])).await
    }

    /// `GET /info`
    pub async fn device_info(&self) -> Result<DeviceInfo, SessionError> {
        self.get_json(&self.url(endpoints::INFO, &[])).await
    }

    /// Reconnect probe: succeeds on any 2xx from `/info`.
    pub async fn probe(&self) -> Result<(), SessionError> {
        self.get_text(&self.url(endpoints::INFO, &[])).await.map(|_| ())
    }
}

/// Interpret a status-object response.
///
/// A device error message wins over the HTTP status so the user sees the
/// reason; a non-2xx response without one is a transport failure.
fn into_status(resp: HttpResponse) -> Result<StatusReply, SessionError> {
    let parsed = serde_json::from_str::<StatusReply>(&resp.body);
    if let Ok(reply) = &parsed
        && let Some(message) = reply.error_message()
    {
        return Err(SessionError::Remote(message));
    }
    if !resp.is_success() {
        return Err(FetchError::HttpError(resp.status).into());
    }
    parsed.map_err(|e| FetchError::JsonParseError(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::MockTransport;

    fn session() -> RemoteFileSession<MockTransport> {
        RemoteFileSession::new(MockTransport::new(), "")
    }

    #[tokio::test]
    async fn test_list_directory() {
        let session = session();
        session.transport().respond(
            "/dir",
            HttpResponse::ok(r#"{"files": ["main.py", "boot.py"], "dirs": ["lib"]}"#),
        );

        let listing = session.list_directory("/").await.unwrap();
        assert_eq!(listing.files, vec!["main.py", "boot.py"]);
        assert_eq!(listing.dirs, vec!["lib"]);
        assert_eq!(session.transport().urls(), vec!["/dir?path=/"]);
    }

    #[tokio::test]
    async fn test_list_directory_http_error() {
        let session = session();
        session.transport().respond("/dir", HttpResponse::new(500, "oops"));

        let err = session.list_directory("/").await.unwrap_err();
        assert_eq!(err, SessionError::Transport(FetchError::HttpError(500)));
    }

    #[tokio::test]
    async fn test_read_file_returns_raw_text() {
        let session = session();
        session
            .transport()
            .respond("/file", HttpResponse::ok("{\"not\": \"parsed\"}"));

        let text = session.read_file("/config.json").await.unwrap();
        assert_eq!(text, "{\"not\": \"parsed\"}");
    }

    #[tokio::test]
    async fn test_create_file_reads_back() {
        let session = session();
        session.transport().respond("/newfile", HttpResponse::ok("{}"));
        session.transport().respond("/file", HttpResponse::ok(""));

        let content = session.create_file("/new.py").await.unwrap();
        assert_eq!(content, "");
        assert_eq!(
            session.transport().urls(),
            vec!["/newfile?path=/new.py", "/file?path=/new.py"]
        );
    }

    #[tokio::test]
    async fn test_create_file_error_stops_chain() {
        let session = session();
        session
            .transport()
            .respond("/newfile", HttpResponse::ok(r#"{"error": "exists"}"#));

        let err = session.create_file("/new.py").await.unwrap_err();
        assert_eq!(err, SessionError::Remote("exists".to_string()));
        assert_eq!(session.transport().urls().len(), 1);
    }

    #[tokio::test]
    async fn test_write_file_sends_path_header() {
        let session = session();
        session
            .transport()
            .respond("/savefileb", HttpResponse::ok(r#"{"saved": true, "bytes": 5}"#));

        let reply = session
            .write_file("/main.py", RequestBody::Text("print"))
            .await
            .unwrap();
        assert_eq!(reply.bytes, Some(5));

        let request = session.transport().last_request().unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "/savefileb");
        assert_eq!(request.header("File-Path"), Some("/main.py"));
        assert_eq!(request.header("Content-Type"), Some("text/plain"));
        assert_eq!(request.body, b"print".to_vec());
    }

    #[tokio::test]
    async fn test_error_payload_on_server_error() {
        let session = session();
        session.transport().respond(
            "/savefileb",
            HttpResponse::new(500, r#"{"error": "ENOSPC"}"#),
        );

        let err = session
            .write_file("/main.py", RequestBody::Text(""))
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::Remote("ENOSPC".to_string()));
    }

    #[tokio::test]
    async fn test_rename_reads_new_path() {
        let session = session();
        session.transport().respond("/renamefile", HttpResponse::ok("{}"));
        session.transport().respond("/file", HttpResponse::ok("x = 1"));

        let content = session.rename_file("/a.py", "/b.py").await.unwrap();
        assert_eq!(content, "x = 1");
        assert_eq!(
            session.transport().urls(),
            vec![
                "/renamefile?old_path=/a.py&new_path=/b.py",
                "/file?path=/b.py"
            ]
        );
    }

    #[tokio::test]
    async fn test_run_and_stop_urls() {
        let session = session();
        session.transport().respond("/run", HttpResponse::ok("{}"));

        session.trigger_run("lib.util.net").await.unwrap();
        session.trigger_stop().await.unwrap();
        assert_eq!(
            session.transport().urls(),
            vec!["/run?name=lib.util.net", "/run?stop=1"]
        );
    }

    #[tokio::test]
    async fn test_probe_requires_success_status() {
        let session = session();
        session.transport().respond("/info", HttpResponse::new(503, ""));
        session.transport().respond("/info", HttpResponse::ok("not json"));

        assert!(session.probe().await.is_err());
        assert!(session.probe().await.is_ok());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let session = session();
        session
            .transport()
            .fail("/reset", FetchError::NetworkError("offline".to_string()));

        let err = session.reset_device().await.unwrap_err();
        assert_eq!(
            err,
            SessionError::Transport(FetchError::NetworkError("offline".to_string()))
        );
    }
}
