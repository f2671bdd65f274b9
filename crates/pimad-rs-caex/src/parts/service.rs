// crates/pimad-rs-caex/src/parts/service.rs

//! Extraction of the `Services` instance hierarchy into quasi-services.

use log::debug;

use crate::model::InternalElement;
use crate::quasi::{QuasiProcedure, QuasiService, RawAttribute};

/// Path suffix of a service-to-service link entry; not a service itself.
const SERVICE_RELATION: &str = "ServiceRelation";
/// Path suffixes classifying the children of services and procedures.
const SERVICE_PROCEDURE: &str = "ServiceProcedure";
const CONFIGURATION_PARAMETER: &str = "ConfigurationParameter";
const PROCEDURE_PARAMETER: &str = "ProcedureParameter";
const REPORT_VALUE: &str = "ReportValue";
const PROCESS_VALUE_IN: &str = "ProcessValueIn";
const PROCESS_VALUE_OUT: &str = "ProcessValueOut";

/// Extracts quasi-services from the `Services` hierarchy.
pub(crate) struct ServicePart;

impl ServicePart {
    /// Walks the service elements and builds the intermediate list.
    ///
    /// Extraction never fails: entries it cannot classify are logged and
    /// skipped, and the result may legitimately be empty.
    pub(crate) fn extract(services: &[InternalElement]) -> Vec<QuasiService> {
        let mut result = Vec::new();

        for element in services {
            if element.ref_base_system_unit_path.contains(SERVICE_RELATION) {
                debug!("skipping service relation entry '{}'", element.name);
                continue;
            }

            let mut service = QuasiService {
                identifier: element.id.clone(),
                name: element.name.clone(),
                meta_model_ref: element.ref_base_system_unit_path.clone(),
                data_assembly: element.ref_id().map(str::to_string),
                attributes: extract_attributes(element),
                ..QuasiService::default()
            };

            for child in &element.internal_element {
                let path = child.ref_base_system_unit_path.as_str();
                if path.ends_with(SERVICE_PROCEDURE) {
                    service.procedures.push(Self::extract_procedure(child));
                } else if path.ends_with(CONFIGURATION_PARAMETER) {
                    if let Some(ref_id) = child.ref_id() {
                        service.configuration_parameters.push(ref_id.to_string());
                    }
                } else {
                    debug!(
                        "ignoring child '{}' of service '{}' ({})",
                        child.name, element.name, path
                    );
                }
            }

            result.push(service);
        }

        result
    }

    /// Builds a quasi-procedure, classifying its children into the four
    /// parameter reference buckets by path suffix.
    fn extract_procedure(element: &InternalElement) -> QuasiProcedure {
        let mut procedure = QuasiProcedure {
            identifier: element.id.clone(),
            name: element.name.clone(),
            meta_model_ref: element.ref_base_system_unit_path.clone(),
            data_assembly: element.ref_id().map(str::to_string),
            attributes: extract_attributes(element),
            ..QuasiProcedure::default()
        };

        for child in &element.internal_element {
            let path = child.ref_base_system_unit_path.as_str();
            let Some(ref_id) = child.ref_id() else {
                debug!("child '{}' of procedure '{}' has no RefID", child.name, element.name);
                continue;
            };
            let ref_id = ref_id.to_string();

            if path.ends_with(PROCEDURE_PARAMETER) {
                procedure.parameters.push(ref_id);
            } else if path.ends_with(REPORT_VALUE) {
                procedure.report_values.push(ref_id);
            } else if path.ends_with(PROCESS_VALUE_IN) {
                procedure.process_values_in.push(ref_id);
            } else if path.ends_with(PROCESS_VALUE_OUT) {
                procedure.process_values_out.push(ref_id);
            } else {
                debug!(
                    "ignoring child '{}' of procedure '{}' ({})",
                    child.name, element.name, path
                );
            }
        }

        procedure
    }
}

/// Takes over every attribute verbatim, in order, excluding `RefID`.
fn extract_attributes(element: &InternalElement) -> Vec<RawAttribute> {
    element
        .attribute
        .iter()
        .filter(|a| a.name != "RefID")
        .map(|a| RawAttribute {
            name: a.name.clone(),
            data_type: a.data_type.clone(),
            value: a.value.clone().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICES_FRAGMENT: &str = r#"
        <InstanceHierarchy Name="Services">
          <InternalElement Name="Dose" ID="svc-1" RefBaseSystemUnitPath="MTPServiceSUCLib/Service">
            <Attribute Name="RefID" AttributeDataType="xs:string"><Value>A1</Value></Attribute>
            <Attribute Name="Position" AttributeDataType="xs:string"><Value>1</Value></Attribute>
            <InternalElement Name="Continuous" ID="proc-1" RefBaseSystemUnitPath="MTPServiceSUCLib/ServiceProcedure">
              <Attribute Name="RefID" AttributeDataType="xs:string"><Value>A1</Value></Attribute>
              <InternalElement Name="Amount" ID="pp-1" RefBaseSystemUnitPath="MTPServiceSUCLib/ServiceParameter/ProcedureParameter">
                <Attribute Name="RefID" AttributeDataType="xs:string"><Value>P1</Value></Attribute>
              </InternalElement>
              <InternalElement Name="Totalized" ID="rv-1" RefBaseSystemUnitPath="MTPServiceSUCLib/ReportValue">
                <Attribute Name="RefID" AttributeDataType="xs:string"><Value>R1</Value></Attribute>
              </InternalElement>
              <InternalElement Name="FlowIn" ID="pvi-1" RefBaseSystemUnitPath="MTPServiceSUCLib/ProcessValueIn">
                <Attribute Name="RefID" AttributeDataType="xs:string"><Value>I1</Value></Attribute>
              </InternalElement>
              <InternalElement Name="FlowOut" ID="pvo-1" RefBaseSystemUnitPath="MTPServiceSUCLib/ProcessValueOut">
                <Attribute Name="RefID" AttributeDataType="xs:string"><Value>O1</Value></Attribute>
              </InternalElement>
            </InternalElement>
            <InternalElement Name="MaxVolume" ID="cp-1" RefBaseSystemUnitPath="MTPServiceSUCLib/ServiceParameter/ConfigurationParameter">
              <Attribute Name="RefID" AttributeDataType="xs:string"><Value>C1</Value></Attribute>
            </InternalElement>
          </InternalElement>
          <InternalElement Name="Link" ID="rel-1" RefBaseSystemUnitPath="MTPServiceSUCLib/ServiceRelation"/>
        </InstanceHierarchy>"#;

    fn extract_fragment(xml: &str) -> Vec<QuasiService> {
        let hierarchy: crate::model::InstanceHierarchy = quick_xml::de::from_str(xml).unwrap();
        ServicePart::extract(&hierarchy.internal_element)
    }

    #[test]
    fn test_extracts_service_with_procedure_buckets() {
        let services = extract_fragment(SERVICES_FRAGMENT);
        // The ServiceRelation entry is skipped.
        assert_eq!(services.len(), 1);

        let service = &services[0];
        assert_eq!(service.name, "Dose");
        assert_eq!(service.identifier, "svc-1");
        assert_eq!(service.data_assembly.as_deref(), Some("A1"));
        assert_eq!(service.configuration_parameters, vec!["C1".to_string()]);
        // RefID is excluded from the verbatim attribute list.
        assert_eq!(service.attributes.len(), 1);
        assert_eq!(service.attributes[0].name, "Position");
        assert_eq!(service.attributes[0].value, "1");

        assert_eq!(service.procedures.len(), 1);
        let procedure = &service.procedures[0];
        assert_eq!(procedure.name, "Continuous");
        assert_eq!(procedure.data_assembly.as_deref(), Some("A1"));
        assert_eq!(procedure.parameters, vec!["P1".to_string()]);
        assert_eq!(procedure.report_values, vec!["R1".to_string()]);
        assert_eq!(procedure.process_values_in, vec!["I1".to_string()]);
        assert_eq!(procedure.process_values_out, vec!["O1".to_string()]);
    }

    #[test]
    fn test_service_without_ref_id_is_kept_unresolved() {
        let xml = r#"
            <InstanceHierarchy Name="Services">
              <InternalElement Name="Bare" ID="svc-2" RefBaseSystemUnitPath="MTPServiceSUCLib/Service"/>
            </InstanceHierarchy>"#;
        let services = extract_fragment(xml);
        assert_eq!(services.len(), 1);
        // Extraction does not resolve or drop; the merge stage decides.
        assert_eq!(services[0].data_assembly, None);
    }

    #[test]
    fn test_singleton_procedure_equals_one_element_list() {
        // A service with exactly one procedure child: CAEX would serialize
        // this without any list wrapper, and extraction must behave as if
        // it had been a one-element list.
        let xml = r#"
            <InstanceHierarchy Name="Services">
              <InternalElement Name="S" ID="svc-3" RefBaseSystemUnitPath="MTPServiceSUCLib/Service">
                <Attribute Name="RefID"><Value>A1</Value></Attribute>
                <InternalElement Name="Only" ID="proc-2" RefBaseSystemUnitPath="MTPServiceSUCLib/ServiceProcedure">
                  <Attribute Name="RefID"><Value>A1</Value></Attribute>
                </InternalElement>
              </InternalElement>
            </InstanceHierarchy>"#;
        let services = extract_fragment(xml);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].procedures.len(), 1);
        assert_eq!(services[0].procedures[0].name, "Only");
    }

    #[test]
    fn test_extraction_of_empty_hierarchy_succeeds() {
        assert!(ServicePart::extract(&[]).is_empty());
    }
}
