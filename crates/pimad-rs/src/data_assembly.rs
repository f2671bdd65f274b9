// crates/pimad-rs/src/data_assembly.rs

//! Data assemblies: the functional units (sensors, actuators, service
//! interfaces) of a PEA, each binding a tag name to communication endpoints.

use crate::comm::CommunicationInterfaceData;
use crate::error::ModelError;

/// Binds one attribute name of a data assembly to a communication endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataItem {
    /// The attribute name inside the data assembly (e.g. `V`, `VSclMax`).
    pub name: String,
    /// The OPC UA endpoint the value is read from or written to.
    pub endpoint: CommunicationInterfaceData,
}

/// A functional unit of a PEA.
///
/// Created once during extraction and immutable afterwards. The
/// `identifier` is the value of the assembly's own `RefID` attribute and
/// is the join key services and procedures reference it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAssembly {
    identifier: String,
    tag_name: String,
    meta_model_ref: String,
    description: String,
    data_items: Vec<DataItem>,
}

impl DataAssembly {
    /// Builds a data assembly, validating that the source element carried
    /// the fields nothing downstream can work without.
    ///
    /// # Errors
    /// Fails on an empty tag name or an empty identifier. Callers treat
    /// this as "inconsistent source data" and drop the assembly.
    pub fn new(
        identifier: impl Into<String>,
        tag_name: impl Into<String>,
        meta_model_ref: impl Into<String>,
        description: impl Into<String>,
        data_items: Vec<DataItem>,
    ) -> Result<Self, ModelError> {
        let identifier = identifier.into();
        let tag_name = tag_name.into();
        if tag_name.is_empty() {
            return Err(ModelError::MissingTagName);
        }
        if identifier.is_empty() {
            return Err(ModelError::MissingIdentifier { tag_name });
        }
        Ok(Self {
            identifier,
            tag_name,
            meta_model_ref: meta_model_ref.into(),
            description: description.into(),
            data_items,
        })
    }

    /// The stable identifier from the assembly's own `RefID` attribute.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The `RefBaseSystemUnitPath` of the source element, naming the
    /// assembly's type in the MTP data object library.
    pub fn meta_model_ref(&self) -> &str {
        &self.meta_model_ref
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The ordered interface bindings of this assembly.
    pub fn data_items(&self) -> &[DataItem] {
        &self.data_items
    }
}
