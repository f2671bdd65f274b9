// crates/pimad-rs/src/service.rs

//! Services and procedures of a PEA, with their data assembly references
//! already resolved to the actual objects.

use std::sync::Arc;

use crate::data_assembly::DataAssembly;

/// A typed CAEX attribute (name/type/value triple) of a service or
/// procedure element, with `RefID` already stripped out by extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// The raw `AttributeDataType`, e.g. `xs:string`.
    pub data_type: String,
    pub value: String,
}

impl Attribute {
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            value: value.into(),
        }
    }
}

/// A reference to a configuration, report or process value data assembly.
///
/// The reference is kept as the raw `RefID` value; parameters are not
/// resolved to objects the way the service/procedure assembly itself is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    ref_id: String,
}

impl Parameter {
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
        }
    }

    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }
}

/// A procedure of a service, resolved against the data assembly list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    pub name: String,
    /// The CAEX element `ID`.
    pub identifier: String,
    pub meta_model_ref: String,
    pub attributes: Vec<Attribute>,
    /// The procedure's own data assembly, shared with the PEA list.
    pub data_assembly: Arc<DataAssembly>,
    pub parameters: Vec<Parameter>,
    pub report_values: Vec<Parameter>,
    pub process_values_in: Vec<Parameter>,
    pub process_values_out: Vec<Parameter>,
}

/// A service of a PEA, owning its procedures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    /// The CAEX element `ID`.
    pub identifier: String,
    pub meta_model_ref: String,
    pub attributes: Vec<Attribute>,
    /// The service's own data assembly, shared with the PEA list.
    pub data_assembly: Arc<DataAssembly>,
    pub configuration_parameters: Vec<Parameter>,
    pub procedures: Vec<Procedure>,
}
