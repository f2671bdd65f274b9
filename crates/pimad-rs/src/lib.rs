// src/lib.rs

#![doc = "Core information model for Module Type Package (MTP) data."]
#![doc = ""]
#![doc = "This crate holds the assembled object graph an MTP import produces:"]
#![doc = "a [`Pea`] owning data assemblies, services with their procedures, and"]
#![doc = "the OPC UA endpoint descriptors of the communication set."]
#![doc = ""]
#![doc = "The types here are plain, immutable data holders. All parsing and"]
#![doc = "cross-reference resolution lives in the `pimad-rs-caex` crate."]

// --- Crate Modules ---

pub mod comm;
pub mod data_assembly;
pub mod error;
pub mod pea;
pub mod service;

// --- Top-level Exports ---

pub use comm::{CommunicationInterfaceData, NodeAccess, NodeId, OpcUaNode, OpcUaServer};
pub use data_assembly::{DataAssembly, DataItem};
pub use error::ModelError;
pub use pea::Pea;
pub use service::{Attribute, Parameter, Procedure, Service};

/// Semantic version value type used for meta-model versions.
pub use semver::Version as SemanticVersion;
pub use uuid::Uuid;
