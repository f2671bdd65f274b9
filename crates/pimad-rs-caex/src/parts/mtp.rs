// crates/pimad-rs-caex/src/parts/mtp.rs

//! Extraction of the `CommunicationSet` sub-tree into endpoint descriptors
//! and data assemblies.

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;
use pimad_rs::{
    CommunicationInterfaceData, DataAssembly, DataItem, NodeAccess, NodeId, OpcUaNode, OpcUaServer,
};

use crate::error::ImportError;
use crate::model::{ExternalInterface, InternalElement};

/// Path suffixes of the two mandatory CommunicationSet children.
const INSTANCE_LIST: &str = "CommunicationSet/InstanceList";
const SOURCE_LIST: &str = "CommunicationSet/SourceList";
/// The one source profile this importer recognizes.
const OPC_UA_SERVER: &str = "ServerAssembly/OPCUAServer";

/// What [`MtpPart::extract`] gathered from the CommunicationSet.
#[derive(Debug, Default)]
pub(crate) struct MtpExtraction {
    /// OPC UA server endpoints from the SourceList.
    pub endpoints: Vec<CommunicationInterfaceData>,
    /// Data assemblies from the InstanceList, keyed later by identifier.
    pub data_assemblies: Vec<Arc<DataAssembly>>,
}

/// Extracts the `CommunicationSet` sub-tree.
pub(crate) struct MtpPart;

impl MtpPart {
    /// Extracts endpoints and data assemblies from the given
    /// `CommunicationSet` element.
    ///
    /// # Errors
    /// Fails hard if the InstanceList or the SourceList child is missing
    /// (the file is unusable without both), or if extraction produced
    /// nothing at all. Individual malformed entries are dropped with a
    /// warning instead.
    pub(crate) fn extract(communication_set: &InternalElement) -> Result<MtpExtraction, ImportError> {
        let instance_list = find_list(communication_set, INSTANCE_LIST)
            .ok_or(ImportError::CommunicationSet { list: "InstanceList" })?;
        let source_list = find_list(communication_set, SOURCE_LIST)
            .ok_or(ImportError::CommunicationSet { list: "SourceList" })?;

        // Phase A: server endpoints, plus a flat side table of their
        // ExternalInterface node bindings keyed by element ID.
        let mut extraction = MtpExtraction::default();
        let mut interfaces: HashMap<&str, &ExternalInterface> = HashMap::new();

        for source in &source_list.internal_element {
            if !source.ref_base_system_unit_path.ends_with(OPC_UA_SERVER) {
                warn!(
                    "skipping unrecognized source profile '{}' ({})",
                    source.name, source.ref_base_system_unit_path
                );
                continue;
            }

            extraction
                .endpoints
                .push(CommunicationInterfaceData::Server(OpcUaServer {
                    name: source.name.clone(),
                    endpoint_url: source
                        .attribute_value("Endpoint")
                        .unwrap_or_default()
                        .to_string(),
                }));

            for interface in &source.external_interface {
                interfaces.insert(interface.id.as_str(), interface);
            }
        }

        // Phase B: data assemblies from the instance list.
        for element in &instance_list.internal_element {
            match Self::extract_assembly(element, &interfaces) {
                Ok(assembly) => extraction.data_assemblies.push(Arc::new(assembly)),
                // Inconsistent or incomplete source data; not fatal to the
                // extraction as a whole.
                Err(e) => warn!("dropping data assembly '{}': {}", element.name, e),
            }
        }

        if extraction.endpoints.is_empty() && extraction.data_assemblies.is_empty() {
            return Err(ImportError::EmptyCommunicationSet);
        }
        Ok(extraction)
    }

    /// Builds one data assembly from an InstanceList element.
    ///
    /// `xs:IDREF` attributes resolve through the side table into data
    /// items; the `RefID`/`xs:ID` attribute supplies the assembly's own
    /// identifier; everything else is ignored at this level.
    fn extract_assembly(
        element: &InternalElement,
        interfaces: &HashMap<&str, &ExternalInterface>,
    ) -> Result<DataAssembly, pimad_rs::ModelError> {
        let mut identifier = String::new();
        let mut data_items = Vec::new();

        for attribute in &element.attribute {
            if attribute.data_type == "xs:IDREF" {
                let Some(target) = attribute.value.as_deref() else {
                    continue;
                };
                let Some(interface) = interfaces.get(target) else {
                    warn!(
                        "attribute '{}' of '{}' references unknown interface '{}'",
                        attribute.name, element.name, target
                    );
                    continue;
                };
                data_items.push(DataItem {
                    name: attribute.name.clone(),
                    endpoint: CommunicationInterfaceData::Node(node_from_interface(interface)),
                });
            } else if attribute.name == "RefID" && attribute.data_type == "xs:ID" {
                identifier = attribute.value.clone().unwrap_or_default();
            }
        }

        DataAssembly::new(
            identifier,
            element.name.clone(),
            element.ref_base_system_unit_path.clone(),
            element.attribute_value("Description").unwrap_or_default(),
            data_items,
        )
    }
}

/// Finds the CommunicationSet child list with the given path suffix.
fn find_list<'a>(communication_set: &'a InternalElement, suffix: &str) -> Option<&'a InternalElement> {
    communication_set
        .internal_element
        .iter()
        .find(|e| e.ref_base_system_unit_path.ends_with(suffix))
}

/// Builds an OPC UA node descriptor from an ExternalInterface binding.
fn node_from_interface(interface: &ExternalInterface) -> OpcUaNode {
    OpcUaNode {
        node: NodeId {
            namespace: interface
                .attribute_value("Namespace")
                .unwrap_or_default()
                .to_string(),
            identifier: interface
                .attribute_value("Identifier")
                .unwrap_or_default()
                .to_string(),
        },
        access: NodeAccess::parse(interface.attribute_value("Access").unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMUNICATION_SET: &str = r#"
        <InternalElement Name="CommunicationSet" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet">
          <InternalElement Name="SourceList" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet/SourceList">
            <InternalElement Name="PlantServer" RefBaseSystemUnitPath="MTPCommunicationSUCLib/ServerAssembly/OPCUAServer">
              <Attribute Name="Endpoint" AttributeDataType="xs:string"><Value>opc.tcp://plant:4840</Value></Attribute>
              <ExternalInterface Name="level" ID="if-1" RefBaseClassPath="MTPCommunicationICLib/DataItem/OPCUAItem">
                <Attribute Name="Identifier" AttributeDataType="xs:string"><Value>ns=3;s=Level</Value></Attribute>
                <Attribute Name="Namespace" AttributeDataType="xs:string"><Value>3</Value></Attribute>
                <Attribute Name="Access" AttributeDataType="xs:string"><Value>ReadOnly</Value></Attribute>
              </ExternalInterface>
            </InternalElement>
            <InternalElement Name="Legacy" RefBaseSystemUnitPath="MTPCommunicationSUCLib/ServerAssembly/ModbusServer"/>
          </InternalElement>
          <InternalElement Name="InstanceList" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet/InstanceList">
            <InternalElement Name="TIC001" RefBaseSystemUnitPath="MTPDataObjectSUCLib/DataAssembly/IndicatorElement/AnaView">
              <Attribute Name="RefID" AttributeDataType="xs:ID"><Value>A1</Value></Attribute>
              <Attribute Name="V" AttributeDataType="xs:IDREF"><Value>if-1</Value></Attribute>
              <Attribute Name="Description" AttributeDataType="xs:string"><Value>tank level</Value></Attribute>
            </InternalElement>
            <InternalElement Name="Broken" RefBaseSystemUnitPath="MTPDataObjectSUCLib/DataAssembly/IndicatorElement/AnaView">
              <Attribute Name="V" AttributeDataType="xs:IDREF"><Value>if-1</Value></Attribute>
            </InternalElement>
          </InternalElement>
        </InternalElement>"#;

    fn parse(xml: &str) -> InternalElement {
        quick_xml::de::from_str(xml).unwrap()
    }

    #[test]
    fn test_extracts_endpoints_and_assemblies() {
        let set = parse(COMMUNICATION_SET);
        let extraction = MtpPart::extract(&set).unwrap();

        // The Modbus source profile is skipped; one server survives.
        assert_eq!(extraction.endpoints.len(), 1);
        let CommunicationInterfaceData::Server(server) = &extraction.endpoints[0] else {
            panic!("expected a server endpoint");
        };
        assert_eq!(server.name, "PlantServer");
        assert_eq!(server.endpoint_url, "opc.tcp://plant:4840");

        // "Broken" has no RefID and is dropped; "TIC001" survives.
        assert_eq!(extraction.data_assemblies.len(), 1);
        let assembly = &extraction.data_assemblies[0];
        assert_eq!(assembly.identifier(), "A1");
        assert_eq!(assembly.tag_name(), "TIC001");
        assert_eq!(assembly.description(), "tank level");
        assert_eq!(assembly.data_items().len(), 1);

        let item = &assembly.data_items()[0];
        assert_eq!(item.name, "V");
        let CommunicationInterfaceData::Node(node) = &item.endpoint else {
            panic!("expected a node endpoint");
        };
        assert_eq!(node.node.identifier, "ns=3;s=Level");
        assert_eq!(node.node.namespace, "3");
        assert_eq!(node.access, NodeAccess::ReadOnly);
    }

    #[test]
    fn test_missing_instance_list_is_fatal() {
        let xml = r#"
            <InternalElement Name="CommunicationSet" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet">
              <InternalElement Name="SourceList" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet/SourceList"/>
            </InternalElement>"#;
        let result = MtpPart::extract(&parse(xml));
        assert!(matches!(
            result,
            Err(ImportError::CommunicationSet { list: "InstanceList" })
        ));
    }

    #[test]
    fn test_missing_source_list_is_fatal() {
        let xml = r#"
            <InternalElement Name="CommunicationSet" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet">
              <InternalElement Name="InstanceList" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet/InstanceList"/>
            </InternalElement>"#;
        let result = MtpPart::extract(&parse(xml));
        assert!(matches!(
            result,
            Err(ImportError::CommunicationSet { list: "SourceList" })
        ));
    }

    #[test]
    fn test_both_lists_empty_is_an_error() {
        let xml = r#"
            <InternalElement Name="CommunicationSet" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet">
              <InternalElement Name="InstanceList" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet/InstanceList"/>
              <InternalElement Name="SourceList" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet/SourceList"/>
            </InternalElement>"#;
        let result = MtpPart::extract(&parse(xml));
        assert!(matches!(result, Err(ImportError::EmptyCommunicationSet)));
    }

    #[test]
    fn test_unresolvable_idref_is_skipped_not_fatal() {
        let xml = r#"
            <InternalElement Name="CommunicationSet" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet">
              <InternalElement Name="SourceList" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet/SourceList">
                <InternalElement Name="PlantServer" RefBaseSystemUnitPath="MTPCommunicationSUCLib/ServerAssembly/OPCUAServer">
                  <Attribute Name="Endpoint"><Value>opc.tcp://plant:4840</Value></Attribute>
                </InternalElement>
              </InternalElement>
              <InternalElement Name="InstanceList" RefBaseSystemUnitPath="MTPSUCLib/CommunicationSet/InstanceList">
                <InternalElement Name="TIC002" RefBaseSystemUnitPath="MTPDataObjectSUCLib/DataAssembly/IndicatorElement/AnaView">
                  <Attribute Name="RefID" AttributeDataType="xs:ID"><Value>A2</Value></Attribute>
                  <Attribute Name="V" AttributeDataType="xs:IDREF"><Value>nonexistent</Value></Attribute>
                </InternalElement>
              </InternalElement>
            </InternalElement>"#;
        let extraction = MtpPart::extract(&parse(xml)).unwrap();
        assert_eq!(extraction.data_assemblies.len(), 1);
        // The assembly survives without the unresolvable data item.
        assert!(extraction.data_assemblies[0].data_items().is_empty());
    }
}
