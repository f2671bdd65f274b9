// crates/pimad-rs-caex/src/importer.rs

//! The MTP "freeze 2020-01" importer: gate selection, extraction and the
//! reference merge that assembles the final PEA.
//!
//! The merge is the pipeline's core algorithm: services and procedures
//! carry raw `RefID` strings into the CommunicationSet, and each one is
//! resolved against the data assembly list by identifier equality. An
//! unresolvable service or procedure is dropped with a warning; the
//! conversion as a whole still succeeds.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use pimad_rs::{
    Attribute, DataAssembly, Parameter, Pea, Procedure, SemanticVersion, Service,
};

use crate::chain::{ImportInstructions, Importer};
use crate::error::ImportError;
use crate::gate::select_gate;
use crate::model::{CaexFile, InternalElement};
use crate::parts::{MtpExtraction, MtpPart, ServicePart};
use crate::quasi::{QuasiProcedure, QuasiService, RawAttribute};

/// `InstanceHierarchy` names this importer dispatches on.
const MODULE_TYPE_PACKAGE: &str = "ModuleTypePackage";
const SERVICES: &str = "Services";
/// Path suffix locating the CommunicationSet below the ModuleTypePackage.
const COMMUNICATION_SET: &str = "CommunicationSet";

/// Meta-model references of assemblies that must not appear in the final
/// data assembly list: they describe service/procedure control structures,
/// not process variables to subscribe to.
const FILTERED_META_MODEL_REFS: [&str; 2] = ["HealthStateView", "ServiceControl"];

/// Imports MTP files conforming to the 2020-01 specification freeze.
#[derive(Debug, Default)]
pub struct MtpFreeze202001Importer {
    initialized: bool,
}

impl MtpFreeze202001Importer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Importer for MtpFreeze202001Importer {
    fn initialize(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        true
    }

    fn convert_from(&self, instructions: &ImportInstructions) -> Result<Pea, ImportError> {
        if !self.initialized {
            return Err(ImportError::NotInitialized);
        }
        if instructions.source.is_empty() {
            return Err(ImportError::NotResponsible);
        }

        let gate = select_gate(&instructions.source)?;
        let payload = gate.receive(&instructions.source)?;
        // A document without a single InstanceHierarchy is either an empty
        // archive or an XML file whose root is not CAEXFile.
        let caex = payload
            .into_first()
            .filter(|c| !c.instance_hierarchy.is_empty())
            .ok_or(ImportError::NotValidCaex)?;

        convert(&caex, &instructions.identifier, self.meta_model_version())
    }

    fn meta_model_version(&self) -> SemanticVersion {
        // The 2020-01 freeze of the MTP specification is its 1.0 release.
        SemanticVersion::new(1, 0, 0)
    }
}

/// Drives extraction over the top-level hierarchies and merges the results
/// into a PEA.
fn convert(
    caex: &CaexFile,
    fallback_name: &str,
    version: SemanticVersion,
) -> Result<Pea, ImportError> {
    let mut mtp: Option<MtpExtraction> = None;
    let mut pea_name = String::new();
    let mut meta_model_ref = String::new();
    let mut quasi_services = Vec::new();

    for hierarchy in &caex.instance_hierarchy {
        match hierarchy.name.as_str() {
            MODULE_TYPE_PACKAGE => {
                for module in &hierarchy.internal_element {
                    pea_name = module.name.clone();
                    meta_model_ref = module.ref_base_system_unit_path.clone();
                    match find_communication_set(module) {
                        Some(set) => mtp = Some(MtpPart::extract(set)?),
                        None => warn!("ModuleTypePackage '{}' has no CommunicationSet", module.name),
                    }
                }
            }
            SERVICES => {
                quasi_services.extend(ServicePart::extract(&hierarchy.internal_element));
            }
            other => debug!("ignoring InstanceHierarchy '{}'", other),
        }
    }

    // Completeness gate: without both extractions the file is unusable.
    let mtp = mtp.ok_or(ImportError::Incomplete)?;
    if quasi_services.is_empty() {
        return Err(ImportError::Incomplete);
    }

    let services = resolve_services(quasi_services, &mtp.data_assemblies);
    let data_assemblies = filter_control_assemblies(mtp.data_assemblies);

    let name = if pea_name.is_empty() {
        fallback_name.to_string()
    } else {
        pea_name
    };
    Ok(Pea::new(
        name,
        meta_model_ref,
        version,
        data_assemblies,
        services,
        mtp.endpoints,
    )?)
}

/// Locates the nested CommunicationSet element of a ModuleTypePackage.
fn find_communication_set(module: &InternalElement) -> Option<&InternalElement> {
    module
        .internal_element
        .iter()
        .find(|e| e.ref_base_system_unit_path.ends_with(COMMUNICATION_SET))
}

/// Resolves every quasi-service against the data assembly list.
///
/// The index is built once per conversion; matching is identifier
/// equality. A service whose reference cannot be resolved is dropped; an
/// unresolvable procedure is dropped alone and its service survives.
fn resolve_services(
    quasi_services: Vec<QuasiService>,
    data_assemblies: &[Arc<DataAssembly>],
) -> Vec<Service> {
    let index: HashMap<&str, &Arc<DataAssembly>> = data_assemblies
        .iter()
        .map(|da| (da.identifier(), da))
        .collect();

    let mut services = Vec::new();
    for quasi in quasi_services {
        let Some(assembly) = lookup(&index, quasi.data_assembly.as_deref()) else {
            warn!(
                "dropping service '{}': no data assembly matches RefID {:?}",
                quasi.name, quasi.data_assembly
            );
            continue;
        };

        let mut procedures = Vec::new();
        for procedure in quasi.procedures {
            let Some(procedure_assembly) = lookup(&index, procedure.data_assembly.as_deref()) else {
                warn!(
                    "dropping procedure '{}' of service '{}': no data assembly matches RefID {:?}",
                    procedure.name, quasi.name, procedure.data_assembly
                );
                continue;
            };
            procedures.push(resolve_procedure(procedure, procedure_assembly));
        }

        services.push(Service {
            name: quasi.name,
            identifier: quasi.identifier,
            meta_model_ref: quasi.meta_model_ref,
            attributes: convert_attributes(quasi.attributes),
            data_assembly: assembly,
            configuration_parameters: convert_parameters(quasi.configuration_parameters),
            procedures,
        });
    }
    services
}

fn resolve_procedure(quasi: QuasiProcedure, assembly: Arc<DataAssembly>) -> Procedure {
    Procedure {
        name: quasi.name,
        identifier: quasi.identifier,
        meta_model_ref: quasi.meta_model_ref,
        attributes: convert_attributes(quasi.attributes),
        data_assembly: assembly,
        parameters: convert_parameters(quasi.parameters),
        report_values: convert_parameters(quasi.report_values),
        process_values_in: convert_parameters(quasi.process_values_in),
        process_values_out: convert_parameters(quasi.process_values_out),
    }
}

/// Resolves a raw `RefID` to a shared data assembly.
fn lookup(
    index: &HashMap<&str, &Arc<DataAssembly>>,
    ref_id: Option<&str>,
) -> Option<Arc<DataAssembly>> {
    ref_id.and_then(|id| index.get(id)).map(|da| Arc::clone(da))
}

/// Factory turning raw attribute triples into typed attributes.
fn convert_attributes(raw: Vec<RawAttribute>) -> Vec<Attribute> {
    raw.into_iter()
        .map(|a| Attribute::new(a.name, a.data_type, a.value))
        .collect()
}

/// Factory turning reference lists into typed parameters.
fn convert_parameters(ref_ids: Vec<String>) -> Vec<Parameter> {
    ref_ids.into_iter().map(Parameter::new).collect()
}

/// Post-merge cleanup: drops assemblies that represent service/procedure
/// control structures from the generic "subscribe to all variables" list.
///
/// Must run after resolution: services and procedures may still reference
/// the filtered assemblies.
fn filter_control_assemblies(data_assemblies: Vec<Arc<DataAssembly>>) -> Vec<Arc<DataAssembly>> {
    data_assemblies
        .into_iter()
        .filter(|da| {
            let filtered = FILTERED_META_MODEL_REFS
                .iter()
                .any(|marker| da.meta_model_ref().contains(marker));
            if filtered {
                debug!(
                    "removing control assembly '{}' ({})",
                    da.tag_name(),
                    da.meta_model_ref()
                );
            }
            !filtered
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembly(identifier: &str, meta_model_ref: &str) -> Arc<DataAssembly> {
        Arc::new(
            DataAssembly::new(identifier, format!("tag-{identifier}"), meta_model_ref, "", Vec::new())
                .unwrap(),
        )
    }

    #[test]
    fn test_cleanup_filter_keeps_only_process_assemblies() {
        let input = vec![
            assembly("A1", "MTPDataObjectSUCLib/DataAssembly/ServiceControl/Dose"),
            assembly("A2", "MTPDataObjectSUCLib/DataAssembly/IndicatorElement/AnaView"),
            assembly("A3", "MTPDataObjectSUCLib/DataAssembly/DiagnosticElement/HealthStateView"),
            assembly("A4", "MTPDataObjectSUCLib/DataAssembly/OperationElement/AnaMan"),
        ];
        let kept = filter_control_assemblies(input);
        let identifiers: Vec<&str> = kept.iter().map(|da| da.identifier()).collect();
        assert_eq!(identifiers, vec!["A2", "A4"]);
    }

    #[test]
    fn test_cleanup_filter_is_order_independent() {
        let input = vec![
            assembly("A2", "MTPDataObjectSUCLib/DataAssembly/IndicatorElement/AnaView"),
            assembly("A3", "MTPDataObjectSUCLib/DataAssembly/DiagnosticElement/HealthStateView"),
            assembly("A4", "MTPDataObjectSUCLib/DataAssembly/OperationElement/AnaMan"),
            assembly("A1", "MTPDataObjectSUCLib/DataAssembly/ServiceControl/Dose"),
        ];
        let kept = filter_control_assemblies(input);
        let identifiers: Vec<&str> = kept.iter().map(|da| da.identifier()).collect();
        assert_eq!(identifiers, vec!["A2", "A4"]);
    }

    #[test]
    fn test_resolution_matches_by_identifier_and_shares_the_object() {
        let assemblies = vec![
            assembly("A1", "MTPDataObjectSUCLib/DataAssembly/IndicatorElement/AnaView"),
        ];
        let quasi = QuasiService {
            name: "Dose".into(),
            data_assembly: Some("A1".into()),
            ..QuasiService::default()
        };

        let services = resolve_services(vec![quasi], &assemblies);
        assert_eq!(services.len(), 1);
        // Resolution is by identity, not by copy.
        assert!(Arc::ptr_eq(&services[0].data_assembly, &assemblies[0]));
    }

    #[test]
    fn test_unresolvable_service_is_dropped_silently() {
        let assemblies = vec![
            assembly("A1", "MTPDataObjectSUCLib/DataAssembly/IndicatorElement/AnaView"),
        ];
        let matching = QuasiService {
            name: "Good".into(),
            data_assembly: Some("A1".into()),
            ..QuasiService::default()
        };
        let dangling = QuasiService {
            name: "Bad".into(),
            data_assembly: Some("B9".into()),
            ..QuasiService::default()
        };

        // Length decreases by exactly one; no error is raised.
        let services = resolve_services(vec![matching, dangling], &assemblies);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "Good");
    }

    #[test]
    fn test_unresolvable_procedure_keeps_its_service() {
        let assemblies = vec![
            assembly("A1", "MTPDataObjectSUCLib/DataAssembly/IndicatorElement/AnaView"),
        ];
        let quasi = QuasiService {
            name: "Dose".into(),
            data_assembly: Some("A1".into()),
            procedures: vec![
                QuasiProcedure {
                    name: "Resolved".into(),
                    data_assembly: Some("A1".into()),
                    ..QuasiProcedure::default()
                },
                QuasiProcedure {
                    name: "Dangling".into(),
                    data_assembly: Some("B9".into()),
                    ..QuasiProcedure::default()
                },
            ],
            ..QuasiService::default()
        };

        let services = resolve_services(vec![quasi], &assemblies);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].procedures.len(), 1);
        assert_eq!(services[0].procedures[0].name, "Resolved");
    }
}
