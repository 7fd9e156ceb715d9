//! The typed fetch client.
//!
//! Single choke point for outbound calls. Every failure mode — transport
//! errors, timeouts, undecodable bodies, error envelopes — funnels into
//! [`ApiError`] here; callers above this layer never see raw transport
//! exceptions or malformed JSON.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use cfomatch_core::{ApiError, Envelope, ErrorCode, ErrorEnvelope, SuccessEnvelope};

use crate::config::ClientConfig;
use crate::hooks::{LoggingHooks, RequestHooks};
use crate::request::{Method, QueryParams, RequestBody, RequestConfig};
use crate::session::SessionHandle;
use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};

// ============================================================================
// Api Client
// ============================================================================

/// Typed HTTP client for the cfomatch backend.
///
/// Contract: HTTP non-2xx or a `success: false` body always yields an
/// `Err(ApiError)`. Callers branch on envelope shape only to extract
/// success-path data. There is no automatic retry; failures surface once.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    config: ClientConfig,
    session: SessionHandle,
    hooks: Arc<dyn RequestHooks>,
}

impl ApiClient {
    /// Creates a client over the reqwest transport with logging hooks and
    /// no session.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        Self::builder().config(config).build()
    }

    /// Creates a builder for customizing the client.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Returns the session handle this client reads credentials from.
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    // ========================================================================
    // Public Operations
    // ========================================================================

    /// Issues a GET request and decodes the success envelope.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&QueryParams>,
        config: Option<RequestConfig>,
    ) -> Result<SuccessEnvelope<T>, ApiError> {
        self.request(Method::Get, path, query, RequestBody::Empty, config)
            .await
    }

    /// Issues a POST request and decodes the success envelope.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: RequestBody,
        config: Option<RequestConfig>,
    ) -> Result<SuccessEnvelope<T>, ApiError> {
        self.request(Method::Post, path, None, body, config).await
    }

    /// Issues a PUT request and decodes the success envelope.
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: RequestBody,
        config: Option<RequestConfig>,
    ) -> Result<SuccessEnvelope<T>, ApiError> {
        self.request(Method::Put, path, None, body, config).await
    }

    /// Issues a PATCH request and decodes the success envelope.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: RequestBody,
        config: Option<RequestConfig>,
    ) -> Result<SuccessEnvelope<T>, ApiError> {
        self.request(Method::Patch, path, None, body, config).await
    }

    /// Issues a DELETE request and decodes the success envelope.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&QueryParams>,
        config: Option<RequestConfig>,
    ) -> Result<SuccessEnvelope<T>, ApiError> {
        self.request(Method::Delete, path, query, RequestBody::Empty, config)
            .await
    }

    /// Issues a GET request and returns the raw body text on success.
    ///
    /// For the rare endpoint that answers with a non-JSON body; non-2xx
    /// responses are normalized exactly like the typed calls.
    pub async fn get_text(
        &self,
        path: &str,
        query: Option<&QueryParams>,
        config: Option<RequestConfig>,
    ) -> Result<String, ApiError> {
        let config = config.unwrap_or_default();
        let url = self.build_url(path, query)?;
        self.hooks.on_request_start(Method::Get, &url);

        let result = match self
            .dispatch(Method::Get, url.clone(), RequestBody::Empty, &config)
            .await
        {
            Ok(response) if response.is_ok() => Ok((response.status, response.body)),
            Ok(response) => Err(decode_failure(&response)),
            Err(error) => Err(error),
        };

        match &result {
            Ok((status, _)) => self.hooks.on_request_end(Method::Get, &url, *status),
            Err(error) => self.hooks.on_error(Method::Get, &url, error),
        }
        result.map(|(_, body)| body)
    }

    // ========================================================================
    // Request Pipeline
    // ========================================================================

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: RequestBody,
        config: Option<RequestConfig>,
    ) -> Result<SuccessEnvelope<T>, ApiError> {
        let config = config.unwrap_or_default();
        let url = self.build_url(path, query)?;
        self.hooks.on_request_start(method, &url);

        let result = match self.dispatch(method, url.clone(), body, &config).await {
            Ok(response) => decode_envelope::<T>(&response),
            Err(error) => Err(error),
        };

        match &result {
            Ok(envelope) => self.hooks.on_request_end(method, &url, envelope.status),
            Err(error) => self.hooks.on_error(method, &url, error),
        }
        result
    }

    /// Executes the transport round trip, bounded by the effective timeout.
    ///
    /// Timeouts cancel only the local wait; the server-side request may
    /// still complete.
    async fn dispatch(
        &self,
        method: Method,
        url: Url,
        body: RequestBody,
        config: &RequestConfig,
    ) -> Result<TransportResponse, ApiError> {
        let headers = self.build_headers(&body, config);
        let timeout = config.timeout.unwrap_or(self.config.timeout);
        let request = TransportRequest {
            method,
            url,
            headers,
            body,
        };

        match tokio::time::timeout(timeout, self.transport.execute(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(error)) => Err(ApiError::network(error.to_string())),
            Err(_) => Err(ApiError::network(format!(
                "request timed out after {}ms",
                timeout.as_millis()
            ))),
        }
    }

    fn build_url(&self, path: &str, query: Option<&QueryParams>) -> Result<Url, ApiError> {
        let absolute = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&absolute)
            .map_err(|e| ApiError::network(format!("invalid request URL {absolute}: {e}")))?;

        if let Some(query) = query {
            if !query.is_empty() {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in query.iter() {
                    pairs.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }

    fn build_headers(&self, body: &RequestBody, config: &RequestConfig) -> Vec<(String, String)> {
        let mut headers = self.config.default_headers.clone();

        for (name, value) in &config.headers {
            match headers
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(entry) => entry.1 = value.clone(),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        if body.is_multipart() {
            // The transport supplies the Content-Type with the boundary.
            headers.retain(|(name, _)| !name.eq_ignore_ascii_case("content-type"));
        }

        if config.auth {
            if let Some(session) = self.session.current() {
                headers.push((
                    "Authorization".to_string(),
                    format!("Bearer {}", session.access_token),
                ));
            }
        }
        headers
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Response Decoding
// ============================================================================

fn decode_envelope<T: DeserializeOwned>(
    response: &TransportResponse,
) -> Result<SuccessEnvelope<T>, ApiError> {
    if !response.is_ok() {
        return Err(decode_failure(response));
    }

    if !response.is_json() {
        return Err(ApiError {
            status: response.status,
            code: ErrorCode::ParseError,
            message: "expected a JSON envelope".to_string(),
            details: Some(Value::String(response.body.clone())),
            server_message: false,
        });
    }

    match serde_json::from_str::<Envelope<T>>(&response.body) {
        Ok(Envelope::Success(mut envelope)) => {
            envelope.status = response.status;
            Ok(envelope)
        }
        Ok(Envelope::Error(envelope)) => {
            Err(ApiError::from_error_envelope(response.status, &envelope))
        }
        Err(error) => Err(ApiError::parse(
            response.status,
            format!("failed to decode response body: {error}"),
        )),
    }
}

/// Maps a non-2xx response: a well-formed error envelope propagates the
/// server's message/code/details; anything else becomes `HTTP_ERROR` with
/// whatever body was recovered.
fn decode_failure(response: &TransportResponse) -> ApiError {
    if response.is_json() {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&response.body) {
            return ApiError::from_error_envelope(response.status, &envelope);
        }
    }
    let details = (!response.body.is_empty()).then(|| Value::String(response.body.clone()));
    ApiError::http(
        response.status,
        format!("HTTP {} {}", response.status, response.status_text),
        details,
    )
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for constructing an [`ApiClient`].
///
/// Private instances with distinct base URL, headers, timeout, transport,
/// or hooks can be built for tests or for talking to a different host.
pub struct ApiClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    session: Option<SessionHandle>,
    hooks: Option<Arc<dyn RequestHooks>>,
}

impl ApiClientBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            transport: None,
            session: None,
            hooks: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Sets the default timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Adds a default header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((name.into(), value.into()));
        self
    }

    /// Sets the transport implementation.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the session handle credentials are read from.
    pub fn session(mut self, session: SessionHandle) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the lifecycle hooks.
    pub fn hooks(mut self, hooks: Arc<dyn RequestHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::new().map_err(|e| ApiError::network(e.to_string()))?,
            ),
        };
        Ok(ApiClient {
            transport,
            config: self.config,
            session: self.session.unwrap_or_else(SessionHandle::detached),
            hooks: self.hooks.unwrap_or_else(|| Arc::new(LoggingHooks)),
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MultipartForm;
    use crate::session::SessionBridge;
    use crate::transport::TransportError;
    use cfomatch_core::Session;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct MockTransport {
        requests: Mutex<Vec<TransportRequest>>,
        responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
        delay: Option<Duration>,
    }

    impl MockTransport {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(VecDeque::new()),
                delay: None,
            })
        }

        fn with_delay(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(VecDeque::new()),
                delay: Some(delay),
            })
        }

        fn push(&self, response: Result<TransportResponse, TransportError>) {
            self.responses.lock().unwrap().push_back(response);
        }

        fn last_request(&self) -> TransportRequest {
            self.requests.lock().unwrap().last().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl HttpTransport for MockTransport {
        async fn execute(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(json_response(200, r#"{"success":true,"data":null}"#)))
        }
    }

    fn json_response(status: u16, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            status_text: String::new(),
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        }
    }

    fn client_over(transport: Arc<MockTransport>) -> ApiClient {
        ApiClient::builder()
            .base_url("http://test.local")
            .transport(transport)
            .build()
            .unwrap()
    }

    fn header<'a>(request: &'a TransportRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn test_query_params_filtered_and_ordered() {
        let transport = MockTransport::new();
        let client = client_over(Arc::clone(&transport));

        let params = QueryParams::new()
            .set("a", 1)
            .set_opt("b", None::<i64>)
            .set_opt("c", None::<String>)
            .set("d", true);
        client
            .get::<Value>("/x", Some(&params), None)
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().url.as_str(),
            "http://test.local/x?a=1&d=true"
        );
    }

    #[tokio::test]
    async fn test_auth_header_from_session() {
        let transport = MockTransport::new();
        let bridge = SessionBridge::new();
        bridge.on_session_change(Some(Session::new("u1", "tok-123")));
        let client = ApiClient::builder()
            .base_url("http://test.local")
            .transport(transport.clone())
            .session(bridge.subscribe())
            .build()
            .unwrap();

        client.get::<Value>("/api/interests", None, None).await.unwrap();
        assert_eq!(
            header(&transport.last_request(), "authorization"),
            Some("Bearer tok-123")
        );

        // auth=false suppresses the header even with a session present.
        client
            .get::<Value>("/api/public", None, Some(RequestConfig::new().without_auth()))
            .await
            .unwrap();
        assert_eq!(header(&transport.last_request(), "authorization"), None);
    }

    #[tokio::test]
    async fn test_no_session_means_no_auth_header() {
        let transport = MockTransport::new();
        let client = client_over(Arc::clone(&transport));

        client.get::<Value>("/api/interests", None, None).await.unwrap();
        assert_eq!(header(&transport.last_request(), "authorization"), None);
    }

    #[tokio::test]
    async fn test_per_call_headers_override_defaults_by_key() {
        let transport = MockTransport::new();
        let client = client_over(Arc::clone(&transport));

        let config = RequestConfig::new().with_header("content-type", "application/xml");
        client.get::<Value>("/x", None, Some(config)).await.unwrap();

        let request = transport.last_request();
        assert_eq!(header(&request, "content-type"), Some("application/xml"));
        let count = request
            .headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
            .count();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_multipart_strips_content_type() {
        let transport = MockTransport::new();
        let client = client_over(Arc::clone(&transport));

        let form = MultipartForm::new().file("file", "a.png", "image/png", vec![1, 2]);
        client
            .post::<Value>("/upload", RequestBody::Multipart(form), None)
            .await
            .unwrap();

        assert_eq!(header(&transport.last_request(), "content-type"), None);
    }

    #[tokio::test]
    async fn test_transport_failure_normalizes_to_network_error() {
        let transport = MockTransport::new();
        transport.push(Err(TransportError::Connect("connection refused".into())));
        let client = client_over(transport);

        let error = client.get::<Value>("/x", None, None).await.unwrap_err();
        assert_eq!(error.status, 0);
        assert_eq!(error.code, ErrorCode::NetworkError);
    }

    #[tokio::test]
    async fn test_timeout_normalizes_to_network_error() {
        let transport = MockTransport::with_delay(Duration::from_millis(100));
        let client = client_over(transport);

        let config = RequestConfig::new().with_timeout(Duration::from_millis(5));
        let error = client.get::<Value>("/x", None, Some(config)).await.unwrap_err();
        assert_eq!(error.status, 0);
        assert_eq!(error.code, ErrorCode::NetworkError);
    }

    #[tokio::test]
    async fn test_error_envelope_propagates_server_fields() {
        let transport = MockTransport::new();
        transport.push(Ok(json_response(
            404,
            r#"{"success":false,"error":{"message":"not found","code":"NOT_FOUND"}}"#,
        )));
        let client = client_over(transport);

        let error = client.get::<Value>("/x", None, None).await.unwrap_err();
        assert_eq!(error.status, 404);
        assert_eq!(error.code, ErrorCode::NotFound);
        assert_eq!(error.message, "not found");
    }

    #[tokio::test]
    async fn test_non_envelope_failure_is_http_error() {
        let transport = MockTransport::new();
        transport.push(Ok(TransportResponse {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            content_type: Some("text/html".to_string()),
            body: "<h1>boom</h1>".to_string(),
        }));
        let client = client_over(transport);

        let error = client.get::<Value>("/x", None, None).await.unwrap_err();
        assert_eq!(error.status, 500);
        assert_eq!(error.code, ErrorCode::HttpError);
        assert_eq!(error.details, Some(Value::String("<h1>boom</h1>".into())));
    }

    #[tokio::test]
    async fn test_undecodable_ok_body_is_parse_error() {
        let transport = MockTransport::new();
        transport.push(Ok(json_response(200, "definitely not json")));
        let client = client_over(transport);

        let error = client.get::<Value>("/x", None, None).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ParseError);
    }

    #[tokio::test]
    async fn test_success_false_body_raises_even_on_2xx() {
        let transport = MockTransport::new();
        transport.push(Ok(json_response(
            200,
            r#"{"success":false,"error":{"message":"soft failure","code":"VALIDATION_ERROR"}}"#,
        )));
        let client = client_over(transport);

        let error = client.get::<Value>("/x", None, None).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ValidationError);
        assert_eq!(error.message, "soft failure");
    }

    #[tokio::test]
    async fn test_success_data_extraction() {
        let transport = MockTransport::new();
        transport.push(Ok(json_response(
            200,
            r#"{"success":true,"data":{"hello":"world"},"message":"ok"}"#,
        )));
        let client = client_over(transport);

        let envelope = client.get::<Value>("/x", None, None).await.unwrap();
        assert_eq!(envelope.data["hello"], "world");
        assert_eq!(envelope.message.as_deref(), Some("ok"));
        assert_eq!(envelope.status, 200);
    }

    #[tokio::test]
    async fn test_get_text_returns_raw_body() {
        let transport = MockTransport::new();
        transport.push(Ok(TransportResponse {
            status: 200,
            status_text: "OK".to_string(),
            content_type: Some("text/plain".to_string()),
            body: "pong".to_string(),
        }));
        let client = client_over(transport);

        assert_eq!(client.get_text("/ping", None, None).await.unwrap(), "pong");
    }

    #[tokio::test]
    async fn test_get_text_reports_actual_status_to_hooks() {
        struct RecordingHooks {
            ended: Mutex<Vec<u16>>,
        }

        impl RequestHooks for RecordingHooks {
            fn on_request_end(&self, _method: Method, _url: &Url, status: u16) {
                self.ended.lock().unwrap().push(status);
            }
        }

        let transport = MockTransport::new();
        transport.push(Ok(TransportResponse {
            status: 204,
            status_text: "No Content".to_string(),
            content_type: Some("text/plain".to_string()),
            body: String::new(),
        }));
        let hooks = Arc::new(RecordingHooks {
            ended: Mutex::new(Vec::new()),
        });
        let client = ApiClient::builder()
            .base_url("http://test.local")
            .transport(transport)
            .hooks(Arc::clone(&hooks) as Arc<dyn RequestHooks>)
            .build()
            .unwrap();

        client.get_text("/ping", None, None).await.unwrap();
        assert_eq!(*hooks.ended.lock().unwrap(), vec![204]);
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_trimmed() {
        let transport = MockTransport::new();
        let client = ApiClient::builder()
            .base_url("http://test.local/")
            .transport(transport.clone())
            .build()
            .unwrap();

        client.get::<Value>("/x", None, None).await.unwrap();
        assert_eq!(transport.last_request().url.as_str(), "http://test.local/x");
    }
}
