//! Request plumbing for the GitHub v3 API.
//!
//! [`GithubClient`] builds [`Request`]s against a base URL, executes them through an injected
//! [`reqwest::Client`] and hands back a [`Response`] envelope with the parsed pagination and rate
//! limit headers. Non-2xx responses become an [`Error`].
//!
//! ```no_run
//! # async fn run() -> github_core_client::Result<()> {
//! use github_core_client::{GithubClientBuilder, Method};
//! use github_types::User;
//!
//! let client = GithubClientBuilder::default().build()?;
//! let request = client.new_request(Method::GET, "users/octocat")?;
//! let (user, response): (User, _) = client.send_json(request).await?;
//! println!("{} (next page: {:?})", user, response.pages.next);
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod error;
mod limiter;
mod options;
mod payload;
mod response;

pub use builder::{GithubClientBuilder, DEFAULT_GITHUB_URL, DEFAULT_UPLOAD_URL, DEFAULT_USER_AGENT};
pub use error::{Error, ErrorCode, ErrorResponse, FieldError, Result};
pub use limiter::RateCache;
pub use options::{add_options, ListOptions, QueryOptions, UploadOptions};
pub use reqwest::{Method, Request};
pub use response::{Pages, Response};

use github_types::{Rate, RateLimits};
use log::{debug, info};
use payload::RateLimitBody;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use reqwest::Body;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use url::Url;

const MEDIA_TYPE_V3: &str = "application/vnd.github.v3+json";

/// Where the body of a successful response goes.
pub enum Sink<'a, T> {
    /// Decode the body as JSON into the slot.
    Json(&'a mut Option<T>),
    /// Copy the body bytes verbatim.
    Raw(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// Ignore the body.
    Discard,
}

/// Shared GitHub API client. Clones share the connection pool and the rate cache.
#[derive(Clone, Debug)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: Url,
    upload_url: Url,
    user_agent: HeaderValue,
    rate: RateCache,
}

impl GithubClient {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    /// Last rate limit seen on any response, or from [`rate_limits`](Self::rate_limits).
    pub fn rate(&self) -> Option<Rate> {
        self.rate.get()
    }

    /// Builds a bodiless request. `path` is relative to the base URL and must not start with `/`;
    /// absolute URLs are used as they are.
    pub fn new_request(&self, method: Method, path: &str) -> Result<Request> {
        let url = resolve(&self.base_url, path)?;
        let mut request = Request::new(method, url);
        self.default_headers(request.headers_mut());
        Ok(request)
    }

    /// Like [`new_request`](Self::new_request), with `body` encoded as JSON.
    pub fn new_request_with_body<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<Request> {
        let body = serde_json::to_vec(body)?;
        let mut request = self.new_request(method, path)?;
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(Body::from(body));
        Ok(request)
    }

    /// Builds a request against the upload URL streaming `size` bytes from `reader`.
    pub fn new_upload_request<R>(&self, path: &str, reader: R, size: u64, media_type: &str) -> Result<Request>
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        let url = resolve(&self.upload_url, path)?;
        let mut request = Request::new(Method::POST, url);
        let headers = request.headers_mut();
        self.default_headers(headers);
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(media_type)?);
        headers.insert(CONTENT_LENGTH, HeaderValue::from(size));
        *request.body_mut() = Some(Body::wrap_stream(ReaderStream::new(reader)));
        Ok(request)
    }

    /// Executes `request` and sends a successful body to `sink`.
    ///
    /// The rate cache is updated from every response carrying rate headers, failed ones included.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request, sink: Sink<'_, T>) -> Result<Response> {
        let (response, raw) = self.dispatch(request).await?;
        match sink {
            Sink::Json(slot) => *slot = Some(decode(&response, raw).await?),
            Sink::Raw(writer) => {
                let mut raw = raw;
                while let Some(chunk) = raw.chunk().await? {
                    writer.write_all(&chunk).await.map_err(Error::Sink)?;
                }
                writer.flush().await.map_err(Error::Sink)?;
            }
            Sink::Discard => {}
        }
        Ok(response)
    }

    /// Executes `request` and decodes the body. An empty body is a decoding error.
    pub async fn send_json<T: DeserializeOwned>(&self, request: Request) -> Result<(T, Response)> {
        let (response, raw) = self.dispatch(request).await?;
        let value = decode(&response, raw).await?;
        Ok((value, response))
    }

    pub async fn send_raw<W>(&self, request: Request, writer: &mut W) -> Result<Response>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.execute::<()>(request, Sink::Raw(writer)).await
    }

    pub async fn send_empty(&self, request: Request) -> Result<Response> {
        self.execute::<()>(request, Sink::Discard).await
    }

    /// Fetches the current limits and refreshes the rate cache with the core limit.
    pub async fn rate_limits(&self) -> Result<(RateLimits, Response)> {
        let request = self.new_request(Method::GET, "rate_limit")?;
        let (body, response) = self.send_json::<RateLimitBody>(request).await?;
        if let Some(core) = body.resources.core {
            self.rate.store(core);
        }
        info!("Rate limits: {}", body.resources);
        Ok((body.resources, response))
    }

    /// Core limit only. `None` when the API did not report one.
    pub async fn rate_limit(&self) -> Result<(Option<Rate>, Response)> {
        let (limits, response) = self.rate_limits().await?;
        Ok((limits.core, response))
    }

    fn default_headers(&self, headers: &mut HeaderMap) {
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_V3));
        headers.insert(USER_AGENT, self.user_agent.clone());
    }

    async fn dispatch(&self, request: Request) -> Result<(Response, reqwest::Response)> {
        let method = request.method().clone();
        debug!("{} {}", method, request.url());
        let raw = self.http.execute(request).await?;
        let response = Response::from_parts(method, raw.url().clone(), raw.status(), raw.headers().clone());
        debug!("{} {}: {}", response.method, response.url, response.status);
        if let Some(rate) = response.rate {
            self.rate.store(rate);
        }
        let raw = error::check_response(&response, raw).await?;
        Ok((response, raw))
    }
}

async fn decode<T: DeserializeOwned>(response: &Response, raw: reqwest::Response) -> Result<T> {
    let body = raw.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| Error::Decoding {
        source,
        response: Box::new(response.clone()),
    })
}

fn resolve(base: &Url, path: &str) -> Result<Url> {
    debug_assert!(!path.starts_with('/'), "path {:?} must be relative to the base URL", path);
    Ok(base.join(path)?)
}
