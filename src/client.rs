//! The SOAP client facade.
//!
//! Construct with [`SoapClient::connect`], then list operations,
//! introspect an operation's input shape, or invoke an operation by name
//! with keyword parameters. All methods are synchronous and blocking; the
//! client holds no mutable state after construction.

use crate::config::ClientConfig;
use crate::envelope::{self, ResponseBody, SoapValue};
use crate::error::Error;
use crate::transport::Transport;
use crate::wsdl::{self, parse_wsdl, SoapVersion, WsdlDocument};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// An entry of the operation registry, resolved once at construction.
#[derive(Debug, Clone)]
pub struct Operation {
    /// Operation name
    pub name: String,
    /// soapAction URI from the binding, if declared
    pub soap_action: Option<String>,
}

/// Response from a successful operation call.
#[derive(Debug, Clone)]
pub struct SoapResponse {
    /// Parsed body of the response envelope
    pub value: SoapValue,
    /// Raw response XML
    pub raw_xml: String,
}

impl SoapResponse {
    /// First text content of the response value, if any. Convenient for
    /// services returning a single scalar result.
    pub fn text(&self) -> Option<&str> {
        self.value.first_text()
    }
}

/// Dynamic SOAP client bound to one service.
///
/// The first service in the WSDL and its first SOAP port determine the
/// endpoint, SOAP version, and operation registry. Methods take `&self`;
/// the client can be shared across threads to the extent the underlying
/// agent allows concurrent use.
pub struct SoapClient {
    config: ClientConfig,
    transport: Transport,
    document: WsdlDocument,
    version: SoapVersion,
    endpoint: url::Url,
    operations: Vec<Operation>,
}

impl SoapClient {
    /// Fetch and parse the WSDL document and build the operation registry.
    ///
    /// Fails with [`Error::Initialization`] when the URL is invalid, the
    /// document cannot be fetched or parsed, or the service declares no
    /// usable SOAP port.
    pub fn connect(config: ClientConfig) -> Result<Self, Error> {
        let wsdl_url = url::Url::parse(&config.wsdl_url).map_err(|e| {
            Error::Initialization(format!("invalid WSDL URL {}: {}", config.wsdl_url, e))
        })?;

        let transport = Transport::new(
            Duration::from_secs(config.timeout_secs),
            config.credentials.as_ref(),
        );

        let body = transport
            .get(wsdl_url.as_str())
            .map_err(|e| Error::Initialization(e.to_string()))?;

        let document = parse_wsdl(&body).map_err(|e| Error::Initialization(e.to_string()))?;

        let service = document
            .services
            .first()
            .ok_or_else(|| Error::Initialization("no services found in WSDL document".to_string()))?;

        // first port with a resolvable SOAP binding; skips HTTP GET/POST
        // ports that many WSDLs also declare
        let (port, binding) = service
            .ports
            .iter()
            .find_map(|port| {
                document
                    .binding(&port.binding)
                    .filter(|binding| binding.version.is_some())
                    .map(|binding| (port, binding))
            })
            .ok_or_else(|| {
                Error::Initialization(format!(
                    "no SOAP port found in service {}",
                    service.name
                ))
            })?;

        let version = binding.version.unwrap_or(SoapVersion::Soap11);

        let location = port.location.as_deref().ok_or_else(|| {
            Error::Initialization(format!("port {} has no endpoint address", port.name))
        })?;
        let endpoint = wsdl_url.join(location).map_err(|e| {
            Error::Initialization(format!("invalid endpoint address {}: {}", location, e))
        })?;

        let operations: Vec<Operation> = binding
            .operations
            .iter()
            .map(|op| Operation {
                name: op.name.clone(),
                soap_action: op.soap_action.clone(),
            })
            .collect();

        info!(
            service = %service.name,
            port = %port.name,
            version = ?version,
            operations = operations.len(),
            "SOAP client initialized"
        );

        Ok(Self {
            config,
            transport,
            document,
            version,
            endpoint,
            operations,
        })
    }

    /// URL of the WSDL document this client was built from.
    pub fn wsdl_url(&self) -> &str {
        &self.config.wsdl_url
    }

    /// Endpoint the client dispatches operation calls to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// SOAP version of the bound port.
    pub fn version(&self) -> SoapVersion {
        self.version
    }

    /// Names of all operations in the service binding, in WSDL declaration
    /// order.
    pub fn operations(&self) -> Vec<String> {
        self.operations.iter().map(|op| op.name.clone()).collect()
    }

    /// Expected input parameters of an operation: parameter name mapped to
    /// a string rendering of its declared type.
    ///
    /// Walks first service, first port, binding operation, input message,
    /// and the referenced schema element's field list. When the element
    /// carries a bare type reference instead of fields, a single entry
    /// keyed by the type's name is returned.
    pub fn operation_input_shape(
        &self,
        operation: &str,
    ) -> Result<BTreeMap<String, String>, Error> {
        debug!(operation, "introspecting input shape");
        self.input_shape_inner(operation)
            .map_err(|reason| Error::lookup(operation, reason))
    }

    fn input_shape_inner(&self, operation: &str) -> Result<BTreeMap<String, String>, String> {
        let message = self.input_message(operation)?;
        let part = message
            .parts
            .first()
            .ok_or_else(|| format!("message {} has no parts", message.name))?;

        if let Some(element_name) = &part.element {
            let element = self
                .document
                .element(element_name)
                .ok_or_else(|| format!("element {} not found in schema", element_name))?;

            if !element.fields.is_empty() {
                return Ok(element
                    .fields
                    .iter()
                    .map(|field| (field.name.clone(), field.type_name.clone()))
                    .collect());
            }

            // element with a bare type reference: single entry keyed by
            // the type's name
            return match &element.type_name {
                Some(type_name) => Ok(BTreeMap::from([(
                    wsdl::local_part(type_name).to_string(),
                    type_name.clone(),
                )])),
                None => Ok(BTreeMap::from([(
                    element.name.clone(),
                    element.name.clone(),
                )])),
            };
        }

        // RPC style: every typed message part is a parameter
        let shape: BTreeMap<String, String> = message
            .parts
            .iter()
            .filter_map(|p| p.type_name.as_ref().map(|t| (p.name.clone(), t.clone())))
            .collect();
        if !shape.is_empty() {
            return Ok(shape);
        }

        Err(format!(
            "input type information not available for operation {}",
            operation
        ))
    }

    /// Invoke an operation with the given named parameters, forwarded
    /// exactly as supplied.
    ///
    /// Returns the parsed response body. Unknown operations, transport
    /// failures, remote faults, and unparseable responses all fail with
    /// [`Error::Invocation`].
    pub fn call(&self, operation: &str, params: &[(&str, &str)]) -> Result<SoapResponse, Error> {
        let handle = self
            .operations
            .iter()
            .find(|op| op.name == operation)
            .ok_or_else(|| Error::invocation(operation, "operation not found in binding"))?;

        let element_name = self
            .input_element_name(operation)
            .map_err(|reason| Error::invocation(operation, reason))?;

        let request = envelope::build_request(
            self.version,
            &self.document.target_namespace,
            &element_name,
            params,
        );

        let soap_action = handle.soap_action.as_deref().unwrap_or("");
        let (content_type, action_header) = match self.version {
            // SOAP 1.1 carries the action in a quoted SOAPAction header
            SoapVersion::Soap11 => (
                envelope::content_type(self.version).to_string(),
                Some(format!("\"{}\"", soap_action)),
            ),
            // SOAP 1.2 carries it in the Content-Type action parameter
            SoapVersion::Soap12 => {
                let mut ct = envelope::content_type(self.version).to_string();
                if !soap_action.is_empty() {
                    ct.push_str(&format!("; action=\"{}\"", soap_action));
                }
                (ct, None)
            }
        };

        debug!(operation, endpoint = %self.endpoint, "dispatching SOAP request");

        let response = self
            .transport
            .post(
                self.endpoint.as_str(),
                &content_type,
                action_header.as_deref(),
                &request,
            )
            .map_err(|e| Error::invocation(operation, e.to_string()))?;

        match envelope::parse_response(&response.body) {
            Ok(ResponseBody::Fault(fault)) => {
                warn!(operation, fault = %fault, "remote returned SOAP fault");
                Err(Error::invocation(
                    operation,
                    format!("remote fault: {}", fault),
                ))
            }
            Ok(ResponseBody::Value(_)) if response.status >= 400 => Err(Error::invocation(
                operation,
                format!("HTTP status {}", response.status),
            )),
            Ok(ResponseBody::Value(value)) => Ok(SoapResponse {
                value,
                raw_xml: response.body,
            }),
            Err(e) if response.status >= 400 => Err(Error::invocation(
                operation,
                format!("HTTP status {}: {}", response.status, e),
            )),
            Err(e) => Err(Error::invocation(operation, e.to_string())),
        }
    }

    /// Resolve the request element local name for an operation: the input
    /// message part's element for document style, the operation name for
    /// RPC style.
    fn input_element_name(&self, operation: &str) -> Result<String, String> {
        let message = self.input_message(operation)?;
        match message.parts.first().and_then(|p| p.element.clone()) {
            Some(element) => Ok(element),
            None => Ok(operation.to_string()),
        }
    }

    /// Walk first service -> first port -> binding -> port type -> input
    /// message, with a stage-specific message at each step.
    fn input_message(&self, operation: &str) -> Result<&wsdl::Message, String> {
        let service = self
            .document
            .services
            .first()
            .ok_or("no services found in WSDL document")?;

        let port = service
            .ports
            .first()
            .ok_or_else(|| format!("no ports found in service {}", service.name))?;

        let binding = self
            .document
            .binding(&port.binding)
            .ok_or_else(|| format!("binding {} not found", port.binding))?;

        if !binding.operations.iter().any(|op| op.name == operation) {
            return Err(format!(
                "operation {} not found in binding {}",
                operation, binding.name
            ));
        }

        let port_type = self
            .document
            .port_type(&binding.port_type)
            .ok_or_else(|| format!("port type {} not found", binding.port_type))?;

        let port_type_op = port_type
            .operations
            .iter()
            .find(|op| op.name == operation)
            .ok_or_else(|| {
                format!(
                    "operation {} not found in port type {}",
                    operation, port_type.name
                )
            })?;

        let input_message = port_type_op
            .input_message
            .as_deref()
            .ok_or_else(|| format!("operation {} declares no input message", operation))?;

        self.document
            .message(input_message)
            .ok_or_else(|| format!("message {} not found", input_message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED_STYLE_WSDL: &str = r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
             xmlns:xs="http://www.w3.org/2001/XMLSchema"
             xmlns:tns="urn:mixed"
             targetNamespace="urn:mixed">
  <types>
    <xs:schema targetNamespace="urn:mixed">
      <xs:element name="Ping" type="xs:string"/>
    </xs:schema>
  </types>
  <message name="PingRequest">
    <part name="parameters" element="tns:Ping"/>
  </message>
  <message name="AddRequest">
    <part name="a" type="xs:int"/>
    <part name="b" type="xs:int"/>
  </message>
  <portType name="MixedPortType">
    <operation name="Ping">
      <input message="tns:PingRequest"/>
    </operation>
    <operation name="Add">
      <input message="tns:AddRequest"/>
    </operation>
  </portType>
  <binding name="MixedBinding" type="tns:MixedPortType">
    <soap:binding transport="http://schemas.xmlsoap.org/soap/http"/>
    <operation name="Ping">
      <soap:operation soapAction="urn:mixed#Ping"/>
    </operation>
    <operation name="Add">
      <soap:operation soapAction="urn:mixed#Add"/>
    </operation>
  </binding>
  <service name="Mixed">
    <port name="MixedPort" binding="tns:MixedBinding">
      <soap:address location="http://example.org/mixed"/>
    </port>
  </service>
</definitions>"#;

    fn offline_client() -> SoapClient {
        let document = parse_wsdl(MIXED_STYLE_WSDL).unwrap();
        let operations = document.bindings[0]
            .operations
            .iter()
            .map(|op| Operation {
                name: op.name.clone(),
                soap_action: op.soap_action.clone(),
            })
            .collect();
        SoapClient {
            config: ClientConfig::new("http://example.org/mixed?wsdl"),
            transport: Transport::new(Duration::from_secs(1), None),
            document,
            version: SoapVersion::Soap11,
            endpoint: url::Url::parse("http://example.org/mixed").unwrap(),
            operations,
        }
    }

    #[test]
    fn test_input_shape_type_reference_fallback() {
        let client = offline_client();
        // element Ping has no field list; single entry keyed by its type's name
        let shape = client.operation_input_shape("Ping").unwrap();
        assert_eq!(shape.len(), 1);
        assert_eq!(shape.get("string").map(String::as_str), Some("xs:string"));
    }

    #[test]
    fn test_input_shape_rpc_parts() {
        let client = offline_client();
        let shape = client.operation_input_shape("Add").unwrap();
        assert_eq!(shape.len(), 2);
        assert_eq!(shape.get("a").map(String::as_str), Some("xs:int"));
        assert_eq!(shape.get("b").map(String::as_str), Some("xs:int"));
    }

    #[test]
    fn test_input_element_name_by_style() {
        let client = offline_client();
        // document style uses the part's element, RPC style the operation name
        assert_eq!(client.input_element_name("Ping").unwrap(), "Ping");
        assert_eq!(client.input_element_name("Add").unwrap(), "Add");
    }

    #[test]
    fn test_operation_registry_carries_soap_actions() {
        let client = offline_client();
        assert_eq!(client.operations(), vec!["Ping".to_string(), "Add".to_string()]);
        assert_eq!(
            client.operations[0].soap_action.as_deref(),
            Some("urn:mixed#Ping")
        );
    }
}
