//! Errors returned by the client and the classification of failed responses.

use crate::Response;
use log::debug;
use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use strum_macros::{Display, EnumString};
use thiserror::Error;
use url::Url;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// No response was obtained, or its body could not be read.
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Cannot encode request body: {0}")]
    Encoding(#[from] serde_json::Error),
    /// The API answered with a structured error body.
    #[error(transparent)]
    Api(#[from] ErrorResponse),
    /// The API answered with a non-2xx status and a body that is not a structured error.
    #[error("{} {}: {}", .0.method, .0.url, .0.status)]
    Status(Box<Response>),
    #[error("Cannot decode {} {} response: {source}", .response.method, .response.url)]
    Decoding {
        source: serde_json::Error,
        response: Box<Response>,
    },
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Base URL {0} must end with a slash")]
    BaseUrl(Url),
    #[error("Invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
    #[error("Cannot write response body: {0}")]
    Sink(#[source] io::Error),
}

impl Error {
    /// Envelope of the response that caused the error, if one was received.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Api(error) => Some(&*error.response),
            Error::Status(response) => Some(&**response),
            Error::Decoding { response, .. } => Some(&**response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Transport(error) => error.status(),
            _ => self.response().map(|response| response.status),
        }
    }
}

/// A structured API error: `{"message": ..., "errors": [...]}`.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    pub response: Box<Response>,
    pub message: String,
    /// Empty when the body carried no details.
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.response.method,
            self.response.url,
            self.response.status.as_u16(),
            self.message
        )?;
        if !self.errors.is_empty() {
            f.write_str(" [")?;
            for (i, error) in self.errors.iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                write!(f, "{}", error)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorResponse {}

/// One entry of the `errors` array, pointing at the offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub field: String,
    /// Usually one of [`ErrorCode`], passed through verbatim either way.
    #[serde(default)]
    pub code: String,
}

impl FieldError {
    pub fn kind(&self) -> Option<ErrorCode> {
        self.code.parse().ok()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error caused by {} field on {} resource",
            self.code, self.field, self.resource
        )
    }
}

/// Documented values of [`FieldError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    /// The resource does not exist.
    Missing,
    /// A required field was not set.
    MissingField,
    /// The field is formatted wrong.
    Invalid,
    /// Another resource has the same unique value.
    AlreadyExists,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: Option<Vec<FieldError>>,
}

/// Turns a non-2xx response into an error. Never fails: bodies that are not a structured error
/// produce [`Error::Status`].
pub fn classify(response: Response, body: &[u8]) -> Error {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(body) => Error::Api(ErrorResponse {
            response: Box::new(response),
            message: body.message,
            errors: body.errors.unwrap_or_default(),
        }),
        Err(err) => {
            debug!("Unstructured {} error body: {}", response.status, err);
            Error::Status(Box::new(response))
        }
    }
}

/// Passes 2xx responses through. Anything else has its body read and classified.
pub(crate) async fn check_response(response: &Response, raw: reqwest::Response) -> Result<reqwest::Response> {
    if response.status.is_success() {
        return Ok(raw);
    }
    let body = raw.bytes().await.unwrap_or_default();
    Err(classify(response.clone(), &body))
}
