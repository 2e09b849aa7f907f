//! REST client.
//!
//! [`RestClient`] is bound to one resource type and exposes one method per
//! HTTP verb. Every call runs the same pipeline: assemble the URL, layer the
//! headers, encode the body, dispatch through the transport, decode.
//!
//! Reads and writes treat an undecodable response differently. `get` and
//! `get_all` fail with [`RestError::DecodeFailure`]; `post`, `put`, `patch`
//! and `delete` return `Ok(None)` because the write already happened.
//! The `*_discard` variants never look at the response body.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

use crate::codec::{Codec, JsonCodec};
use crate::config::{timeout_from_env, RestConfig, RestConfigBuilder, DEFAULT_TIMEOUT};
use crate::errors::{RestError, RestResult};
use crate::observability::{ConsoleLogger, Diagnostics, LogConfig, Logger, RequestTimer};
use crate::request::{build_request, build_url, RequestOptions};
use crate::transport::{HttpMethod, HttpResponse, HttpTransport, HttpTransportImpl};
use crate::types::RequestBody;

/// A REST client for resources of type `R`.
///
/// # Example
///
/// ```rust,no_run
/// use rest_resource_client::{RequestBody, RequestOptions, RestClient};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let users = RestClient::<User>::builder()
///         .base_url("https://api.example.com")
///         .base_path("v1/users")
///         .build()?;
///
///     let all = users.get_all(RequestOptions::new().query("page", "1")).await?;
///     let one = users.get("42", RequestOptions::new()).await?;
///     let created = users
///         .post(RequestBody::Resource(&one), RequestOptions::new())
///         .await?;
///     println!("{} users, created {:?}", all.len(), created);
///     Ok(())
/// }
/// ```
pub struct RestClient<R, C = JsonCodec> {
    config: Arc<RestConfig>,
    transport: Arc<dyn HttpTransport>,
    codec: C,
    diagnostics: Diagnostics,
    _resource: PhantomData<fn() -> R>,
}

impl<R> RestClient<R, JsonCodec> {
    /// Creates a new client builder.
    pub fn builder() -> RestClientBuilder<R> {
        RestClientBuilder::new()
    }

    /// Creates a client with the given configuration and transport.
    pub fn new(config: RestConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_components(
            config,
            transport,
            JsonCodec,
            Arc::new(ConsoleLogger::default()),
        )
    }

    /// Creates a client from environment variables.
    ///
    /// See [`RestConfig::from_env`]; `REST_CLIENT_TIMEOUT` (seconds) sets the
    /// timeout of the built-in transport.
    pub fn from_env() -> RestResult<Self> {
        let mut builder = RestClientBuilder::from_config(RestConfig::from_env());
        if let Some(timeout) = timeout_from_env() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

impl<R, C> RestClient<R, C> {
    /// Creates a client from explicit collaborators.
    pub fn with_components(
        config: RestConfig,
        transport: Arc<dyn HttpTransport>,
        codec: C,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            codec,
            diagnostics: Diagnostics::new(logger),
            _resource: PhantomData,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Returns the codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Returns the diagnostic sink.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        self.diagnostics.logger()
    }
}

impl<R, C> RestClient<R, C>
where
    R: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Fetches the collection, decoding a JSON array of `R`.
    pub async fn get_all(&self, options: RequestOptions) -> RestResult<Vec<R>> {
        let response = self
            .dispatch(HttpMethod::Get, RequestBody::Empty, &options)
            .await?;
        self.codec.decode(&response.body).map_err(RestError::decode)
    }

    /// Fetches a single resource.
    pub async fn get(
        &self,
        resource_id: impl Into<String>,
        options: RequestOptions,
    ) -> RestResult<R> {
        let options = options.resource_id(resource_id);
        let response = self
            .dispatch(HttpMethod::Get, RequestBody::Empty, &options)
            .await?;
        self.codec.decode(&response.body).map_err(RestError::decode)
    }

    /// Sends a POST and returns the echoed resource, if one could be decoded.
    pub async fn post(
        &self,
        body: RequestBody<'_, R>,
        options: RequestOptions,
    ) -> RestResult<Option<R>> {
        self.write(HttpMethod::Post, body, options).await
    }

    /// Sends a PUT and returns the echoed resource, if one could be decoded.
    pub async fn put(
        &self,
        body: RequestBody<'_, R>,
        options: RequestOptions,
    ) -> RestResult<Option<R>> {
        self.write(HttpMethod::Put, body, options).await
    }

    /// Sends a PATCH and returns the echoed resource, if one could be decoded.
    pub async fn patch(
        &self,
        body: RequestBody<'_, R>,
        options: RequestOptions,
    ) -> RestResult<Option<R>> {
        self.write(HttpMethod::Patch, body, options).await
    }

    /// Sends a DELETE and returns the echoed resource, if one could be decoded.
    pub async fn delete(
        &self,
        body: RequestBody<'_, R>,
        options: RequestOptions,
    ) -> RestResult<Option<R>> {
        self.write(HttpMethod::Delete, body, options).await
    }

    /// Sends a POST without reading the response body.
    pub async fn post_discard(
        &self,
        body: RequestBody<'_, R>,
        options: RequestOptions,
    ) -> RestResult<()> {
        self.dispatch(HttpMethod::Post, body, &options).await?;
        Ok(())
    }

    /// Sends a PUT without reading the response body.
    pub async fn put_discard(
        &self,
        body: RequestBody<'_, R>,
        options: RequestOptions,
    ) -> RestResult<()> {
        self.dispatch(HttpMethod::Put, body, &options).await?;
        Ok(())
    }

    /// Sends a PATCH without reading the response body.
    pub async fn patch_discard(
        &self,
        body: RequestBody<'_, R>,
        options: RequestOptions,
    ) -> RestResult<()> {
        self.dispatch(HttpMethod::Patch, body, &options).await?;
        Ok(())
    }

    /// Sends a DELETE without reading the response body.
    pub async fn delete_discard(
        &self,
        body: RequestBody<'_, R>,
        options: RequestOptions,
    ) -> RestResult<()> {
        self.dispatch(HttpMethod::Delete, body, &options).await?;
        Ok(())
    }

    async fn write(
        &self,
        method: HttpMethod,
        body: RequestBody<'_, R>,
        options: RequestOptions,
    ) -> RestResult<Option<R>> {
        let response = self.dispatch(method, body, &options).await?;
        Ok(self.decode_echo(method, &response))
    }

    /// Decodes a write response, treating any failure as "no resource".
    fn decode_echo(&self, method: HttpMethod, response: &HttpResponse) -> Option<R> {
        if response.body.is_empty() {
            return None;
        }
        match self.codec.decode(&response.body) {
            Ok(resource) => Some(resource),
            Err(e) => {
                tracing::debug!(
                    %method,
                    error = %e,
                    "Response body not decodable, returning no resource"
                );
                None
            }
        }
    }

    fn encode_body(&self, body: RequestBody<'_, R>) -> RestResult<Option<Vec<u8>>> {
        match body {
            RequestBody::Resource(resource) => self
                .codec
                .encode(resource)
                .map(Some)
                .map_err(RestError::encode),
            RequestBody::Payload(payload) => self
                .codec
                .encode(&payload)
                .map(Some)
                .map_err(RestError::encode),
            RequestBody::Empty => Ok(None),
        }
    }

    /// Builds the request and hands it to the transport.
    ///
    /// The transport call is the only await point; dropping the future there
    /// abandons the call before any decoding.
    #[instrument(
        skip_all,
        fields(method = %method, url = tracing::field::Empty, request_id = tracing::field::Empty)
    )]
    async fn dispatch(
        &self,
        method: HttpMethod,
        body: RequestBody<'_, R>,
        options: &RequestOptions,
    ) -> RestResult<HttpResponse> {
        let url = build_url(&self.config, options)?;
        let mut request = build_request(&self.config, method, url, &options.headers);
        request.body = self.encode_body(body)?;

        let request_id = Uuid::new_v4().to_string();
        let span = tracing::Span::current();
        span.record("url", tracing::field::display(&request.url));
        span.record("request_id", request_id.as_str());

        let debug = options.debug.unwrap_or(self.config.debug);
        if debug {
            self.diagnostics.request(&request_id, &request);
        }

        let timer = RequestTimer::new(format!("{} {}", request.method, request.url));
        tracing::debug!("Dispatching request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::debug!(error = %e, "Transport failed");
            RestError::from(e)
        })?;

        tracing::debug!(
            status = response.status,
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "Response received"
        );

        if debug {
            self.diagnostics
                .response(&request_id, timer.operation(), &response, timer.elapsed());
        }

        Ok(response)
    }
}

impl<R, C: Clone> Clone for RestClient<R, C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            codec: self.codec.clone(),
            diagnostics: self.diagnostics.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R, C> std::fmt::Debug for RestClient<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("resource", &std::any::type_name::<R>())
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the REST client.
pub struct RestClientBuilder<R, C = JsonCodec> {
    config_builder: RestConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    codec: C,
    logger: Option<Arc<dyn Logger>>,
    log_config: LogConfig,
    timeout: Duration,
    _resource: PhantomData<fn() -> R>,
}

impl<R> RestClientBuilder<R, JsonCodec> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: RestConfigBuilder::new(),
            transport: None,
            codec: JsonCodec,
            logger: None,
            log_config: LogConfig::default(),
            timeout: DEFAULT_TIMEOUT,
            _resource: PhantomData,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: RestConfig) -> Self {
        let mut builder = Self::new();
        builder.config_builder = RestConfigBuilder::new()
            .base_url(config.base_url)
            .base_path(config.base_path)
            .headers(config.default_headers)
            .debug(config.debug);
        builder
    }
}

impl<R, C> RestClientBuilder<R, C> {
    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the base path.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_path(base_path);
        self
    }

    /// Adds or replaces a default header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Enables or disables diagnostics for every call.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.debug(enabled);
        self
    }

    /// Sets the timeout of the built-in transport.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom diagnostic sink.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets the configuration of the default console sink.
    pub fn log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    /// Replaces the codec.
    pub fn codec<C2: Codec>(self, codec: C2) -> RestClientBuilder<R, C2> {
        RestClientBuilder {
            config_builder: self.config_builder,
            transport: self.transport,
            codec,
            logger: self.logger,
            log_config: self.log_config,
            timeout: self.timeout,
            _resource: PhantomData,
        }
    }

    /// Builds the client.
    pub fn build(self) -> RestResult<RestClient<R, C>> {
        let config = self.config_builder.build();

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransportImpl::new(self.timeout)?),
        };

        let logger: Arc<dyn Logger> = self
            .logger
            .unwrap_or_else(|| Arc::new(ConsoleLogger::new(self.log_config)));

        Ok(RestClient::with_components(
            config,
            transport,
            self.codec,
            logger,
        ))
    }
}

impl<R> Default for RestClientBuilder<R, JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}
