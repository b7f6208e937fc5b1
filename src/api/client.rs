use reqwest::{Client, StatusCode};

use crate::{api::types::*, config};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    bearer: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            bearer: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            bearer: None,
        }
    }

    /// Overrides the credential read from durable storage. Host tests have
    /// no localStorage, so they inject the token here.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn credential(&self) -> Option<String> {
        if let Some(token) = &self.bearer {
            return Some(token.clone());
        }
        Self::stored_credential()
    }

    #[cfg(target_arch = "wasm32")]
    fn stored_credential() -> Option<String> {
        crate::utils::storage::local_storage()
            .ok()?
            .get_item("token")
            .ok()
            .flatten()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn stored_credential() -> Option<String> {
        None
    }

    fn get_auth_headers(&self) -> Result<reqwest::header::HeaderMap, ApiError> {
        let token = self
            .credential()
            .ok_or_else(|| ApiError::unauthorized("Not authenticated."))?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::unknown("Invalid token format"))?,
        );
        Ok(headers)
    }

    /// A 401 means the credential is no longer honored server-side; the
    /// stored triple is discarded and the routing layer tears the feed down.
    fn handle_unauthorized_status(status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::clear_auth_session();
            Self::redirect_to_login_if_needed();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn clear_auth_session() {
        if let Ok(storage) = crate::utils::storage::local_storage() {
            let _ = storage.remove_item("token");
            let _ = storage.remove_item("user_id");
            let _ = storage.remove_item("expiry_date");
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn redirect_to_login_if_needed() {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(pathname) = location.pathname() {
                if pathname == "/login" {
                    return;
                }
            }
            let _ = location.set_href("/login");
        }
    }

    async fn error_from(status: StatusCode, response: reqwest::Response) -> ApiError {
        if let Ok(error) = response.json::<ApiError>().await {
            return error;
        }
        match status.as_u16() {
            401 => ApiError::unauthorized("Not authenticated."),
            422 => ApiError::validation("Validation failed. Make sure your input is valid."),
            _ => ApiError::unknown(format!("Request failed with status {}", status.as_u16())),
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/auth/login", base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .put(format!("{}/auth/signup", base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    /// Always hits the server; no page is ever served from a local cache.
    pub async fn list_posts(&self, page: u32) -> Result<PostListResponse, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/posts", base_url))
            .query(&[("page", page.to_string())])
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    pub async fn get_post(&self, post_id: &str) -> Result<PostResponse, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/posts/{}", base_url, post_id))
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    pub async fn create_post(&self, payload: &PostPayload) -> Result<PostResponse, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/posts", base_url))
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    pub async fn update_post(
        &self,
        post_id: &str,
        payload: &PostPayload,
    ) -> Result<PostResponse, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .put(format!("{}/posts/{}", base_url, post_id))
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<(), ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .delete(format!("{}/posts/{}", base_url, post_id))
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    pub async fn get_status(&self) -> Result<StatusResponse, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/status", base_url))
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    pub async fn update_status(&self, status_text: &str) -> Result<(), ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .put(format!("{}/status", base_url))
            .headers(headers)
            .json(&UpdateStatusRequest {
                status: status_text.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    /// Opaque image transfer. Returns the content locator of the stored
    /// file; a failure here aborts the enclosing post mutation before any
    /// mutation call is issued.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        old_path: Option<&str>,
    ) -> Result<String, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;

        let mut form = reqwest::multipart::Form::new().part(
            "image",
            reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string()),
        );
        if let Some(old_path) = old_path {
            form = form.text("old_path", old_path.to_string());
        }

        let response = self
            .client
            .put(format!("{}/post-image", base_url))
            .headers(headers)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            let upload: UploadResponse = response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))?;
            // The file server reports backslash paths on some platforms.
            Ok(upload.file_path.replace('\\', "/"))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
