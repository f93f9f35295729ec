//! WSDL document parsing.
//!
//! Single-pass pull parser over a WSDL 1.1 document, producing a minimal
//! model of what the client facade needs: services and their ports, SOAP
//! bindings and their operations, port types, messages, and top-level
//! schema elements with their declared fields. Type references are kept as
//! strings; no cross-document imports and no full XML Schema resolution.
//!
//! Uses quick-xml which is safe against XXE by default (doesn't expand
//! entities); DOCTYPE and entity declarations are rejected outright.

use crate::error::WsdlError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// WSDL and schema namespace URIs.
pub const WSDL_NS: &str = "http://schemas.xmlsoap.org/wsdl/";
pub const SOAP_BINDING_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
pub const SOAP12_BINDING_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// SOAP versions, detected from the binding namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoapVersion {
    /// SOAP 1.1 (envelope namespace: http://schemas.xmlsoap.org/soap/envelope/)
    #[serde(rename = "1.1")]
    Soap11,
    /// SOAP 1.2 (envelope namespace: http://www.w3.org/2003/05/soap-envelope)
    #[serde(rename = "1.2")]
    Soap12,
}

/// Parsed WSDL document.
#[derive(Debug, Clone, Default)]
pub struct WsdlDocument {
    /// Target namespace of the definitions element
    pub target_namespace: String,
    /// Services in declaration order
    pub services: Vec<Service>,
    /// Bindings in declaration order
    pub bindings: Vec<Binding>,
    /// Port types in declaration order
    pub port_types: Vec<PortType>,
    /// Messages in declaration order
    pub messages: Vec<Message>,
    /// Top-level schema elements in declaration order
    pub elements: Vec<SchemaElement>,
}

/// A wsdl:service element.
#[derive(Debug, Clone)]
pub struct Service {
    /// Service name
    pub name: String,
    /// Ports in declaration order
    pub ports: Vec<Port>,
}

/// A wsdl:port element.
#[derive(Debug, Clone)]
pub struct Port {
    /// Port name
    pub name: String,
    /// Referenced binding (local part of the QName)
    pub binding: String,
    /// Endpoint address from soap:address, if present
    pub location: Option<String>,
}

/// A wsdl:binding element.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Binding name
    pub name: String,
    /// Referenced port type (local part of the QName)
    pub port_type: String,
    /// SOAP version, or None for non-SOAP (e.g. HTTP GET/POST) bindings
    pub version: Option<SoapVersion>,
    /// Operations in declaration order
    pub operations: Vec<BindingOperation>,
}

/// An operation inside a wsdl:binding.
#[derive(Debug, Clone)]
pub struct BindingOperation {
    /// Operation name
    pub name: String,
    /// soapAction URI from soap:operation, if declared
    pub soap_action: Option<String>,
}

/// A wsdl:portType element.
#[derive(Debug, Clone)]
pub struct PortType {
    /// Port type name
    pub name: String,
    /// Operations in declaration order
    pub operations: Vec<PortTypeOperation>,
}

/// An abstract operation inside a wsdl:portType.
#[derive(Debug, Clone)]
pub struct PortTypeOperation {
    /// Operation name
    pub name: String,
    /// Input message reference (local part), if declared
    pub input_message: Option<String>,
    /// Output message reference (local part), if declared
    pub output_message: Option<String>,
}

/// A wsdl:message element.
#[derive(Debug, Clone)]
pub struct Message {
    /// Message name
    pub name: String,
    /// Parts in declaration order
    pub parts: Vec<MessagePart>,
}

/// A wsdl:part element.
///
/// Document-style parts reference a schema element; RPC-style parts carry
/// a type directly.
#[derive(Debug, Clone)]
pub struct MessagePart {
    /// Part name
    pub name: String,
    /// Referenced schema element (local part of the QName), if any
    pub element: Option<String>,
    /// Declared type (verbatim QName string), if any
    pub type_name: Option<String>,
}

/// A top-level xsd:element declaration.
#[derive(Debug, Clone)]
pub struct SchemaElement {
    /// Element name
    pub name: String,
    /// Declared type (verbatim QName string) when the element references a
    /// type instead of declaring fields inline
    pub type_name: Option<String>,
    /// Fields of the inline complex type sequence, in declaration order
    pub fields: Vec<ElementField>,
}

/// A field inside a schema element's inline complex type.
#[derive(Debug, Clone)]
pub struct ElementField {
    /// Field name
    pub name: String,
    /// Declared type (verbatim QName string)
    pub type_name: String,
}

impl WsdlDocument {
    /// Look up a binding by local name.
    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// Look up a port type by local name.
    pub fn port_type(&self, name: &str) -> Option<&PortType> {
        self.port_types.iter().find(|p| p.name == name)
    }

    /// Look up a message by local name.
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    /// Look up a top-level schema element by name.
    pub fn element(&self, name: &str) -> Option<&SchemaElement> {
        self.elements.iter().find(|e| e.name == name)
    }
}

/// Parse a WSDL document.
pub fn parse_wsdl(xml: &str) -> Result<WsdlDocument, WsdlError> {
    check_entity_patterns(xml)?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = WsdlDocument::default();
    let mut seen_definitions = false;

    // Prefix -> namespace URI map. WSDL documents declare their prefixes on
    // the definitions element in practice, so a document-global map is
    // sufficient for resolving binding and address namespaces.
    let mut namespaces: HashMap<String, String> = HashMap::new();

    let mut depth = 0u32;
    let mut in_schema = false;
    let mut complex_type_depth = 0u32;

    let mut current_service: Option<Service> = None;
    let mut current_port: Option<Port> = None;
    let mut current_binding: Option<Binding> = None;
    let mut current_port_type: Option<PortType> = None;
    let mut current_message: Option<Message> = None;
    let mut current_element: Option<SchemaElement> = None;
    let mut element_depth = 0u32;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                collect_namespaces(e, &mut namespaces);
                let local = local_name_str(e);
                let ns = resolved_ns(e, &namespaces);

                if !seen_definitions {
                    if local != "definitions" {
                        return Err(WsdlError::NotWsdl(format!(
                            "root element is {}, expected definitions",
                            local
                        )));
                    }
                    seen_definitions = true;
                    doc.target_namespace = attr_str(e, "targetNamespace").unwrap_or_default();
                    buf.clear();
                    continue;
                }

                if local == "schema" && ns.as_deref() == Some(XSD_NS) {
                    in_schema = true;
                } else if in_schema {
                    handle_schema_open(
                        e,
                        &local,
                        false,
                        depth,
                        &mut complex_type_depth,
                        &mut current_element,
                        &mut element_depth,
                        &mut doc,
                    );
                } else {
                    handle_wsdl_open(
                        e,
                        &local,
                        ns.as_deref(),
                        &mut current_service,
                        &mut current_port,
                        &mut current_binding,
                        &mut current_port_type,
                        &mut current_message,
                    );
                }
            }

            Ok(Event::Empty(ref e)) => {
                collect_namespaces(e, &mut namespaces);
                let local = local_name_str(e);
                let ns = resolved_ns(e, &namespaces);

                if in_schema {
                    handle_schema_open(
                        e,
                        &local,
                        true,
                        depth,
                        &mut complex_type_depth,
                        &mut current_element,
                        &mut element_depth,
                        &mut doc,
                    );
                } else if seen_definitions {
                    handle_wsdl_open(
                        e,
                        &local,
                        ns.as_deref(),
                        &mut current_service,
                        &mut current_port,
                        &mut current_binding,
                        &mut current_port_type,
                        &mut current_message,
                    );
                    // self-closing ports carry no soap:address
                    if local == "port" {
                        if let (Some(port), Some(service)) =
                            (current_port.take(), current_service.as_mut())
                        {
                            service.ports.push(port);
                        }
                    }
                }
            }

            Ok(Event::End(ref e)) => {
                let local_bytes = e.local_name();
                let local = std::str::from_utf8(local_bytes.as_ref()).unwrap_or("");
                let full_bytes = e.name();
                let full = std::str::from_utf8(full_bytes.as_ref()).unwrap_or("");
                let ns = namespaces.get(qname_prefix(full)).map(String::as_str);

                match local {
                    "schema" => in_schema = false,
                    "complexType" => complex_type_depth = complex_type_depth.saturating_sub(1),
                    "element" => {
                        if depth == element_depth {
                            if let Some(element) = current_element.take() {
                                doc.elements.push(element);
                            }
                        }
                    }
                    "service" => {
                        if let Some(service) = current_service.take() {
                            doc.services.push(service);
                        }
                    }
                    "port" => {
                        if let (Some(port), Some(service)) =
                            (current_port.take(), current_service.as_mut())
                        {
                            service.ports.push(port);
                        }
                    }
                    // wsdl:binding closes here; soap:binding is handled on open
                    "binding" if ns != Some(SOAP_BINDING_NS) && ns != Some(SOAP12_BINDING_NS) => {
                        if let Some(binding) = current_binding.take() {
                            doc.bindings.push(binding);
                        }
                    }
                    "portType" => {
                        if let Some(port_type) = current_port_type.take() {
                            doc.port_types.push(port_type);
                        }
                    }
                    "message" if !in_schema => {
                        if let Some(message) = current_message.take() {
                            doc.messages.push(message);
                        }
                    }
                    _ => {}
                }

                depth = depth.saturating_sub(1);
            }

            Ok(Event::Eof) => break,

            Err(e) => return Err(WsdlError::XmlParse(format!("{}", e))),

            _ => {}
        }

        buf.clear();
    }

    if !seen_definitions {
        return Err(WsdlError::NotWsdl("no definitions element found".to_string()));
    }

    Ok(doc)
}

#[allow(clippy::too_many_arguments)]
fn handle_schema_open(
    e: &BytesStart,
    local: &str,
    is_empty: bool,
    depth: u32,
    complex_type_depth: &mut u32,
    current_element: &mut Option<SchemaElement>,
    element_depth: &mut u32,
    doc: &mut WsdlDocument,
) {
    match local {
        "complexType" => {
            if !is_empty {
                *complex_type_depth += 1;
            }
        }
        "element" => {
            if let Some(element) = current_element.as_mut() {
                // field of the open top-level element's inline type
                if let Some(name) = attr_str(e, "name") {
                    let type_name =
                        attr_str(e, "type").unwrap_or_else(|| "xs:anyType".to_string());
                    element.fields.push(ElementField { name, type_name });
                }
            } else if *complex_type_depth == 0 {
                // top-level element declaration
                if let Some(name) = attr_str(e, "name") {
                    let element = SchemaElement {
                        name,
                        type_name: attr_str(e, "type"),
                        fields: Vec::new(),
                    };
                    if is_empty {
                        doc.elements.push(element);
                    } else {
                        *current_element = Some(element);
                        *element_depth = depth;
                    }
                }
            }
        }
        _ => {}
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_wsdl_open(
    e: &BytesStart,
    local: &str,
    ns: Option<&str>,
    current_service: &mut Option<Service>,
    current_port: &mut Option<Port>,
    current_binding: &mut Option<Binding>,
    current_port_type: &mut Option<PortType>,
    current_message: &mut Option<Message>,
) {
    let is_soap_ns = ns == Some(SOAP_BINDING_NS) || ns == Some(SOAP12_BINDING_NS);

    match local {
        "service" => {
            if let Some(name) = attr_str(e, "name") {
                *current_service = Some(Service {
                    name,
                    ports: Vec::new(),
                });
            }
        }
        "port" => {
            if current_service.is_some() {
                if let (Some(name), Some(binding)) = (attr_str(e, "name"), attr_str(e, "binding")) {
                    *current_port = Some(Port {
                        name,
                        binding: local_part(&binding).to_string(),
                        location: None,
                    });
                }
            }
        }
        "address" if is_soap_ns => {
            if let Some(port) = current_port.as_mut() {
                port.location = attr_str(e, "location");
            }
        }
        "binding" if is_soap_ns => {
            if let Some(binding) = current_binding.as_mut() {
                binding.version = Some(if ns == Some(SOAP12_BINDING_NS) {
                    SoapVersion::Soap12
                } else {
                    SoapVersion::Soap11
                });
            }
        }
        "binding" => {
            if let (Some(name), Some(port_type)) = (attr_str(e, "name"), attr_str(e, "type")) {
                *current_binding = Some(Binding {
                    name,
                    port_type: local_part(&port_type).to_string(),
                    version: None,
                    operations: Vec::new(),
                });
            }
        }
        "operation" if is_soap_ns => {
            if let Some(operation) = current_binding
                .as_mut()
                .and_then(|b| b.operations.last_mut())
            {
                operation.soap_action = attr_str(e, "soapAction");
            }
        }
        "operation" => {
            if let Some(port_type) = current_port_type.as_mut() {
                if let Some(name) = attr_str(e, "name") {
                    port_type.operations.push(PortTypeOperation {
                        name,
                        input_message: None,
                        output_message: None,
                    });
                }
            } else if let Some(binding) = current_binding.as_mut() {
                if let Some(name) = attr_str(e, "name") {
                    binding.operations.push(BindingOperation {
                        name,
                        soap_action: None,
                    });
                }
            }
        }
        "input" | "output" => {
            // only portType input/output carries a message reference;
            // binding input/output (soap:body) has none and is skipped
            if let Some(message) = attr_str(e, "message") {
                if let Some(operation) = current_port_type
                    .as_mut()
                    .and_then(|p| p.operations.last_mut())
                {
                    let message = local_part(&message).to_string();
                    if local == "input" {
                        operation.input_message = Some(message);
                    } else {
                        operation.output_message = Some(message);
                    }
                }
            }
        }
        "portType" => {
            if let Some(name) = attr_str(e, "name") {
                *current_port_type = Some(PortType {
                    name,
                    operations: Vec::new(),
                });
            }
        }
        "message" => {
            if let Some(name) = attr_str(e, "name") {
                *current_message = Some(Message {
                    name,
                    parts: Vec::new(),
                });
            }
        }
        "part" => {
            if let Some(message) = current_message.as_mut() {
                if let Some(name) = attr_str(e, "name") {
                    message.parts.push(MessagePart {
                        name,
                        element: attr_str(e, "element").map(|v| local_part(&v).to_string()),
                        type_name: attr_str(e, "type"),
                    });
                }
            }
        }
        _ => {}
    }
}

/// Reject DOCTYPE and entity declarations before parsing.
fn check_entity_patterns(xml: &str) -> Result<(), WsdlError> {
    if xml.contains("<!DOCTYPE") || xml.contains("<!doctype") {
        return Err(WsdlError::ExternalEntity(
            "DOCTYPE declarations are not allowed".to_string(),
        ));
    }
    if xml.contains("<!ENTITY") || xml.contains("<!entity") {
        return Err(WsdlError::ExternalEntity(
            "entity declarations are not allowed".to_string(),
        ));
    }
    Ok(())
}

/// Extract local name from element.
fn local_name_str(e: &BytesStart) -> String {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref()).unwrap_or("").to_string()
}

/// Read an attribute value as a string.
fn attr_str(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return std::str::from_utf8(&attr.value).ok().map(String::from);
        }
    }
    None
}

/// Register xmlns declarations from an element into the prefix map.
fn collect_namespaces(e: &BytesStart, namespaces: &mut HashMap<String, String>) {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
        let value = match std::str::from_utf8(&attr.value) {
            Ok(v) => v.to_string(),
            Err(_) => continue,
        };
        if key == "xmlns" {
            namespaces.insert(String::new(), value);
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.insert(prefix.to_string(), value);
        }
    }
}

/// Resolve the namespace URI of an element via the prefix map.
fn resolved_ns(e: &BytesStart, namespaces: &HashMap<String, String>) -> Option<String> {
    let name_bytes = e.name();
    let name = std::str::from_utf8(name_bytes.as_ref()).unwrap_or("");
    namespaces.get(qname_prefix(name)).cloned()
}

/// Prefix of a QName, or "" when unprefixed.
fn qname_prefix(name: &str) -> &str {
    match name.split_once(':') {
        Some((prefix, _)) => prefix,
        None => "",
    }
}

/// Local part of a QName.
pub(crate) fn local_part(name: &str) -> &str {
    match name.split_once(':') {
        Some((_, local)) => local,
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBER_WSDL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                  xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
                  xmlns:soap12="http://schemas.xmlsoap.org/wsdl/soap12/"
                  xmlns:xs="http://www.w3.org/2001/XMLSchema"
                  xmlns:tns="http://www.dataaccess.com/webservicesserver/"
                  targetNamespace="http://www.dataaccess.com/webservicesserver/">
  <wsdl:types>
    <xs:schema elementFormDefault="qualified"
               targetNamespace="http://www.dataaccess.com/webservicesserver/">
      <xs:element name="NumberToWords">
        <xs:complexType>
          <xs:sequence>
            <xs:element name="ubiNum" type="xs:unsignedLong"/>
          </xs:sequence>
        </xs:complexType>
      </xs:element>
      <xs:element name="NumberToWordsResponse">
        <xs:complexType>
          <xs:sequence>
            <xs:element name="NumberToWordsResult" type="xs:string"/>
          </xs:sequence>
        </xs:complexType>
      </xs:element>
      <xs:element name="NumberToDollars">
        <xs:complexType>
          <xs:sequence>
            <xs:element name="dNum" type="xs:decimal"/>
          </xs:sequence>
        </xs:complexType>
      </xs:element>
      <xs:element name="NumberToDollarsResponse">
        <xs:complexType>
          <xs:sequence>
            <xs:element name="NumberToDollarsResult" type="xs:string"/>
          </xs:sequence>
        </xs:complexType>
      </xs:element>
    </xs:schema>
  </wsdl:types>
  <wsdl:message name="NumberToWordsSoapRequest">
    <wsdl:part name="parameters" element="tns:NumberToWords"/>
  </wsdl:message>
  <wsdl:message name="NumberToWordsSoapResponse">
    <wsdl:part name="parameters" element="tns:NumberToWordsResponse"/>
  </wsdl:message>
  <wsdl:message name="NumberToDollarsSoapRequest">
    <wsdl:part name="parameters" element="tns:NumberToDollars"/>
  </wsdl:message>
  <wsdl:message name="NumberToDollarsSoapResponse">
    <wsdl:part name="parameters" element="tns:NumberToDollarsResponse"/>
  </wsdl:message>
  <wsdl:portType name="NumberConversionSoapType">
    <wsdl:operation name="NumberToWords">
      <wsdl:input message="tns:NumberToWordsSoapRequest"/>
      <wsdl:output message="tns:NumberToWordsSoapResponse"/>
    </wsdl:operation>
    <wsdl:operation name="NumberToDollars">
      <wsdl:input message="tns:NumberToDollarsSoapRequest"/>
      <wsdl:output message="tns:NumberToDollarsSoapResponse"/>
    </wsdl:operation>
  </wsdl:portType>
  <wsdl:binding name="NumberConversionSoapBinding" type="tns:NumberConversionSoapType">
    <soap:binding transport="http://schemas.xmlsoap.org/soap/http"/>
    <wsdl:operation name="NumberToWords">
      <soap:operation soapAction=""/>
      <wsdl:input><soap:body use="literal"/></wsdl:input>
      <wsdl:output><soap:body use="literal"/></wsdl:output>
    </wsdl:operation>
    <wsdl:operation name="NumberToDollars">
      <soap:operation soapAction=""/>
      <wsdl:input><soap:body use="literal"/></wsdl:input>
      <wsdl:output><soap:body use="literal"/></wsdl:output>
    </wsdl:operation>
  </wsdl:binding>
  <wsdl:binding name="NumberConversionSoapBinding12" type="tns:NumberConversionSoapType">
    <soap12:binding transport="http://schemas.xmlsoap.org/soap/http"/>
    <wsdl:operation name="NumberToWords">
      <soap12:operation soapAction=""/>
      <wsdl:input><soap12:body use="literal"/></wsdl:input>
      <wsdl:output><soap12:body use="literal"/></wsdl:output>
    </wsdl:operation>
    <wsdl:operation name="NumberToDollars">
      <soap12:operation soapAction=""/>
      <wsdl:input><soap12:body use="literal"/></wsdl:input>
      <wsdl:output><soap12:body use="literal"/></wsdl:output>
    </wsdl:operation>
  </wsdl:binding>
  <wsdl:service name="NumberConversion">
    <wsdl:port name="NumberConversionSoap" binding="tns:NumberConversionSoapBinding">
      <soap:address location="http://www.dataaccess.com/webservicesserver/NumberConversion.wso"/>
    </wsdl:port>
    <wsdl:port name="NumberConversionSoap12" binding="tns:NumberConversionSoapBinding12">
      <soap12:address location="http://www.dataaccess.com/webservicesserver/NumberConversion.wso"/>
    </wsdl:port>
  </wsdl:service>
</wsdl:definitions>"#;

    #[test]
    fn test_parse_services_and_ports() {
        let doc = parse_wsdl(NUMBER_WSDL).unwrap();
        assert_eq!(doc.target_namespace, "http://www.dataaccess.com/webservicesserver/");
        assert_eq!(doc.services.len(), 1);

        let service = &doc.services[0];
        assert_eq!(service.name, "NumberConversion");
        assert_eq!(service.ports.len(), 2);
        assert_eq!(service.ports[0].name, "NumberConversionSoap");
        assert_eq!(service.ports[0].binding, "NumberConversionSoapBinding");
        assert_eq!(
            service.ports[0].location.as_deref(),
            Some("http://www.dataaccess.com/webservicesserver/NumberConversion.wso")
        );
    }

    #[test]
    fn test_parse_bindings_and_versions() {
        let doc = parse_wsdl(NUMBER_WSDL).unwrap();
        assert_eq!(doc.bindings.len(), 2);

        let soap11 = doc.binding("NumberConversionSoapBinding").unwrap();
        assert_eq!(soap11.version, Some(SoapVersion::Soap11));
        assert_eq!(soap11.port_type, "NumberConversionSoapType");
        let names: Vec<_> = soap11.operations.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["NumberToWords", "NumberToDollars"]);
        assert_eq!(soap11.operations[0].soap_action.as_deref(), Some(""));

        let soap12 = doc.binding("NumberConversionSoapBinding12").unwrap();
        assert_eq!(soap12.version, Some(SoapVersion::Soap12));
    }

    #[test]
    fn test_parse_port_types_and_messages() {
        let doc = parse_wsdl(NUMBER_WSDL).unwrap();

        let port_type = doc.port_type("NumberConversionSoapType").unwrap();
        assert_eq!(port_type.operations.len(), 2);
        assert_eq!(
            port_type.operations[0].input_message.as_deref(),
            Some("NumberToWordsSoapRequest")
        );
        assert_eq!(
            port_type.operations[0].output_message.as_deref(),
            Some("NumberToWordsSoapResponse")
        );

        let message = doc.message("NumberToWordsSoapRequest").unwrap();
        assert_eq!(message.parts.len(), 1);
        assert_eq!(message.parts[0].element.as_deref(), Some("NumberToWords"));
    }

    #[test]
    fn test_parse_schema_elements() {
        let doc = parse_wsdl(NUMBER_WSDL).unwrap();
        assert_eq!(doc.elements.len(), 4);

        let element = doc.element("NumberToWords").unwrap();
        assert_eq!(element.fields.len(), 1);
        assert_eq!(element.fields[0].name, "ubiNum");
        assert_eq!(element.fields[0].type_name, "xs:unsignedLong");

        let element = doc.element("NumberToDollars").unwrap();
        assert_eq!(element.fields[0].name, "dNum");
        assert_eq!(element.fields[0].type_name, "xs:decimal");
    }

    #[test]
    fn test_rpc_style_part_with_type() {
        let xml = r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:xsd="http://www.w3.org/2001/XMLSchema"
             targetNamespace="urn:calc">
  <message name="AddRequest">
    <part name="a" type="xsd:int"/>
    <part name="b" type="xsd:int"/>
  </message>
</definitions>"#;
        let doc = parse_wsdl(xml).unwrap();
        let message = doc.message("AddRequest").unwrap();
        assert_eq!(message.parts.len(), 2);
        assert_eq!(message.parts[0].name, "a");
        assert!(message.parts[0].element.is_none());
        assert_eq!(message.parts[0].type_name.as_deref(), Some("xsd:int"));
    }

    #[test]
    fn test_type_reference_element() {
        let xml = r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:xs="http://www.w3.org/2001/XMLSchema"
             targetNamespace="urn:t">
  <types>
    <xs:schema targetNamespace="urn:t">
      <xs:element name="Ping" type="xs:string"/>
    </xs:schema>
  </types>
</definitions>"#;
        let doc = parse_wsdl(xml).unwrap();
        let element = doc.element("Ping").unwrap();
        assert!(element.fields.is_empty());
        assert_eq!(element.type_name.as_deref(), Some("xs:string"));
    }

    #[test]
    fn test_reject_non_wsdl_document() {
        let result = parse_wsdl("<html><body>not a wsdl</body></html>");
        assert!(matches!(result, Err(WsdlError::NotWsdl(_))));
    }

    #[test]
    fn test_reject_doctype() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE foo [<!ENTITY xxe SYSTEM "file:///etc/passwd">]>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/" targetNamespace="urn:x"/>"#;
        let result = parse_wsdl(xml);
        assert!(matches!(result, Err(WsdlError::ExternalEntity(_))));
    }

    #[test]
    fn test_reject_malformed_xml() {
        let result = parse_wsdl("<definitions xmlns=\"http://schemas.xmlsoap.org/wsdl/\"><unclosed");
        assert!(result.is_err());
    }
}
