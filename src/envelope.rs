//! SOAP envelope construction and response parsing.
//!
//! Requests are built as document/literal envelopes with the operation
//! element qualified by the service's target namespace. Responses are
//! parsed into a lightweight [`SoapValue`] tree; SOAP 1.1 and 1.2 faults
//! are both recognized and surfaced as [`SoapFault`].

use crate::error::EnvelopeError;
use crate::wsdl::SoapVersion;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;

/// SOAP envelope namespace URIs.
pub const SOAP_11_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SOAP_12_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

/// Content-Type for requests of the given SOAP version.
pub fn content_type(version: SoapVersion) -> &'static str {
    match version {
        SoapVersion::Soap11 => "text/xml; charset=utf-8",
        SoapVersion::Soap12 => "application/soap+xml; charset=utf-8",
    }
}

/// Build a request envelope for an operation.
///
/// Parameters are rendered in the order given, as child elements of the
/// operation element, with their values escaped. No validation against the
/// operation's declared input shape happens here.
pub fn build_request(
    version: SoapVersion,
    target_namespace: &str,
    operation_element: &str,
    params: &[(&str, &str)],
) -> String {
    let envelope_ns = match version {
        SoapVersion::Soap11 => SOAP_11_NS,
        SoapVersion::Soap12 => SOAP_12_NS,
    };

    let params_xml = params
        .iter()
        .map(|(name, value)| format!("      <{}>{}</{}>", name, xml_escape(value), name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="{envelope_ns}">
  <soap:Body>
    <{operation_element} xmlns="{target_namespace}">
{params_xml}
    </{operation_element}>
  </soap:Body>
</soap:Envelope>"#
    )
}

/// A node of a parsed response body.
///
/// Names are local names; namespace prefixes are dropped. Shape is
/// whatever the service returned, not fixed by this crate.
#[derive(Debug, Clone, Default)]
pub struct SoapValue {
    /// Element local name
    pub name: String,
    /// Text content, if any
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<SoapValue>,
}

impl SoapValue {
    fn new(name: String) -> Self {
        Self {
            name,
            text: None,
            children: Vec::new(),
        }
    }

    /// Direct child by local name.
    pub fn child(&self, name: &str) -> Option<&SoapValue> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First descendant with the given local name, depth first.
    pub fn find(&self, name: &str) -> Option<&SoapValue> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Own text content, or the first text found among descendants.
    pub fn first_text(&self) -> Option<&str> {
        if let Some(text) = self.text.as_deref() {
            return Some(text);
        }
        self.children.iter().find_map(|c| c.first_text())
    }
}

/// A parsed SOAP fault (either version).
#[derive(Debug, Clone)]
pub struct SoapFault {
    /// Fault code (1.1 faultcode or 1.2 Code/Value), if present
    pub code: Option<String>,
    /// Human-readable fault reason
    pub reason: String,
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}: {}", code, self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

/// Body of a parsed response envelope.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// The first element of the body, as returned by the service
    Value(SoapValue),
    /// A SOAP fault
    Fault(SoapFault),
}

/// Parse a response envelope.
///
/// Accepts both SOAP 1.1 and 1.2 envelopes regardless of which version the
/// request was sent with.
pub fn parse_response(xml: &str) -> Result<ResponseBody, EnvelopeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_envelope = false;
    let mut in_header = false;
    let mut in_body = false;

    let mut stack: Vec<SoapValue> = Vec::new();
    let mut root: Option<SoapValue> = None;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local = local_name_str(e);

                if !in_envelope {
                    if local != "Envelope" {
                        return Err(EnvelopeError::NotEnvelope(format!(
                            "unexpected root element {}",
                            local
                        )));
                    }
                    in_envelope = true;
                } else if in_body {
                    stack.push(SoapValue::new(local));
                } else if in_header {
                    // header contents are not modeled
                } else if local == "Header" {
                    in_header = true;
                } else if local == "Body" {
                    in_body = true;
                }
            }

            Ok(Event::Empty(ref e)) => {
                if in_body {
                    let node = SoapValue::new(local_name_str(e));
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => {
                            if root.is_none() {
                                root = Some(node);
                            }
                        }
                    }
                }
            }

            Ok(Event::Text(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| EnvelopeError::XmlParse(format!("{}", err)))?;
                    top.text = Some(text.into_owned());
                }
            }

            Ok(Event::CData(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    if let Ok(text) = std::str::from_utf8(e) {
                        top.text = Some(text.to_string());
                    }
                }
            }

            Ok(Event::End(ref e)) => {
                let local_bytes = e.local_name();
                let local = std::str::from_utf8(local_bytes.as_ref()).unwrap_or("");

                if in_header && local == "Header" && stack.is_empty() {
                    in_header = false;
                } else if in_body {
                    match stack.pop() {
                        Some(node) => match stack.last_mut() {
                            Some(parent) => parent.children.push(node),
                            None => {
                                if root.is_none() {
                                    root = Some(node);
                                }
                            }
                        },
                        // closing Body itself
                        None => in_body = false,
                    }
                }
            }

            Ok(Event::Eof) => break,

            Err(e) => return Err(EnvelopeError::XmlParse(format!("{}", e))),

            _ => {}
        }

        buf.clear();
    }

    if !in_envelope {
        return Err(EnvelopeError::NotEnvelope(
            "no Envelope element found".to_string(),
        ));
    }

    match root {
        Some(value) if value.name == "Fault" => Ok(ResponseBody::Fault(fault_from_value(&value))),
        Some(value) => Ok(ResponseBody::Value(value)),
        None => Err(EnvelopeError::EmptyBody),
    }
}

/// Extract code and reason from a Fault element, trying the 1.1 shape
/// first and the 1.2 shape second.
fn fault_from_value(fault: &SoapValue) -> SoapFault {
    let code = fault
        .child("faultcode")
        .and_then(|c| c.text.as_deref())
        .or_else(|| {
            fault
                .child("Code")
                .and_then(|c| c.child("Value"))
                .and_then(|v| v.text.as_deref())
        })
        .map(String::from);

    let reason = fault
        .child("faultstring")
        .and_then(|c| c.text.as_deref())
        .or_else(|| {
            fault
                .child("Reason")
                .and_then(|r| r.child("Text"))
                .and_then(|t| t.text.as_deref())
        })
        .unwrap_or("unknown fault")
        .to_string();

    SoapFault { code, reason }
}

/// Extract local name from element.
fn local_name_str(e: &BytesStart) -> String {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref()).unwrap_or("").to_string()
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
