//! Dynamic SOAP/WSDL client facade.
//!
//! Connects to a SOAP service described by a WSDL document and exposes
//! three entry points: enumerate the service's operations, introspect an
//! operation's expected input shape, and invoke an operation by name with
//! keyword parameters. Optional HTTP basic authentication and a request
//! timeout are configured at construction.
//!
//! # Features
//!
//! - WSDL fetch and parse at construction, building an explicit
//!   operation registry (no runtime reflection)
//! - SOAP 1.1 and 1.2 bindings, detected from the WSDL
//! - Input-shape introspection with a structured walk and a
//!   type-reference fallback
//! - Fault-aware response parsing (both fault shapes)
//! - Synchronous, blocking transport with a fixed timeout
//!
//! # Example
//!
//! ```no_run
//! use soap_facade::{ClientConfig, SoapClient};
//!
//! # fn main() -> Result<(), soap_facade::Error> {
//! let config = ClientConfig::new(
//!     "https://www.dataaccess.com/webservicesserver/NumberConversion.wso?WSDL",
//! )
//! .with_timeout_secs(10);
//!
//! let client = SoapClient::connect(config)?;
//! for name in client.operations() {
//!     println!("{name}");
//! }
//!
//! let shape = client.operation_input_shape("NumberToWords")?;
//! println!("{shape:?}");
//!
//! let response = client.call("NumberToWords", &[("ubiNum", "42")])?;
//! println!("{:?}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod transport;
pub mod wsdl;

pub use client::{Operation, SoapClient, SoapResponse};
pub use config::{ClientConfig, Credentials};
pub use envelope::{SoapFault, SoapValue};
pub use error::Error;
pub use wsdl::SoapVersion;
