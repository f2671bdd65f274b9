// crates/pimad-rs/src/pea.rs

//! The Process Equipment Assembly: the finished aggregate an import produces.

use std::sync::Arc;

use semver::Version;
use uuid::Uuid;

use crate::comm::CommunicationInterfaceData;
use crate::data_assembly::DataAssembly;
use crate::error::ModelError;
use crate::service::Service;

/// A Process Equipment Assembly.
///
/// Owns the cleaned data assembly list, the resolved services (each owning
/// its procedures) and the endpoint descriptors of the communication set.
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Pea {
    name: String,
    pimad_identifier: Uuid,
    data_model_ref: String,
    version: Version,
    data_assemblies: Vec<Arc<DataAssembly>>,
    services: Vec<Service>,
    endpoints: Vec<CommunicationInterfaceData>,
}

impl Pea {
    /// Builds the immutable aggregate.
    ///
    /// A fresh PiMAd identifier is generated here; identifiers found in
    /// the source file are never carried over.
    ///
    /// # Errors
    /// Fails if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        data_model_ref: impl Into<String>,
        version: Version,
        data_assemblies: Vec<Arc<DataAssembly>>,
        services: Vec<Service>,
        endpoints: Vec<CommunicationInterfaceData>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::MissingPeaName);
        }
        Ok(Self {
            name,
            pimad_identifier: Uuid::new_v4(),
            data_model_ref: data_model_ref.into(),
            version,
            data_assemblies,
            services,
            endpoints,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The freshly generated PiMAd identifier of this PEA.
    pub fn pimad_identifier(&self) -> Uuid {
        self.pimad_identifier
    }

    /// The `RefBaseSystemUnitPath` of the ModuleTypePackage element.
    pub fn data_model_ref(&self) -> &str {
        &self.data_model_ref
    }

    /// The meta-model version of the importer that produced this PEA.
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn data_assemblies(&self) -> &[Arc<DataAssembly>] {
        &self.data_assemblies
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn endpoints(&self) -> &[CommunicationInterfaceData] {
        &self.endpoints
    }
}
