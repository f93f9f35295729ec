//! Error types for the SOAP client facade.

use thiserror::Error;

/// Errors surfaced by [`SoapClient`](crate::SoapClient).
///
/// Every failure is wrapped exactly once at the facade boundary with a
/// stage-specific message carrying the underlying cause as text. Nothing is
/// logged-and-swallowed internally.
#[derive(Error, Debug)]
pub enum Error {
    /// WSDL fetch/parse or transport setup failed.
    ///
    /// Fatal: the client was never constructed, so no further calls are
    /// possible.
    #[error("failed to initialize SOAP client: {0}")]
    Initialization(String),

    /// Introspection of an operation's input shape failed.
    ///
    /// Recoverable: other operations are unaffected.
    #[error("could not get input shape for operation {operation}: {reason}")]
    Lookup {
        /// Operation whose input shape was requested
        operation: String,
        /// Which lookup stage failed
        reason: String,
    },

    /// A named operation call failed (unknown operation, transport error,
    /// remote fault, or unparseable response).
    ///
    /// Recoverable: the caller may retry or call a different operation.
    #[error("failed to call operation {operation}: {reason}")]
    Invocation {
        /// Operation that was invoked
        operation: String,
        /// Underlying cause
        reason: String,
    },
}

impl Error {
    pub(crate) fn lookup(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Lookup {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invocation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invocation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from the blocking HTTP transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be sent or no response was received.
    #[error("HTTP request to {url} failed: {reason}")]
    Http {
        /// Request URL
        url: String,
        /// Underlying cause
        reason: String,
    },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {reason}")]
    Body {
        /// Request URL
        url: String,
        /// Underlying cause
        reason: String,
    },
}

/// Errors from WSDL document parsing.
#[derive(Error, Debug)]
pub enum WsdlError {
    #[error("XML parse error: {0}")]
    XmlParse(String),

    #[error("not a WSDL document: {0}")]
    NotWsdl(String),

    /// DOCTYPE or entity declarations are rejected outright.
    #[error("external entity constructs are not allowed: {0}")]
    ExternalEntity(String),
}

/// Errors from SOAP response envelope parsing.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("XML parse error: {0}")]
    XmlParse(String),

    #[error("response is not a SOAP envelope: {0}")]
    NotEnvelope(String),

    #[error("SOAP body is empty")]
    EmptyBody,
}
