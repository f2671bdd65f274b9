// src/lib.rs

#![doc = "Imports Module Type Package (MTP) CAEX files into the PiMAd core"]
#![doc = "information model."]
#![doc = ""]
#![doc = "The pipeline is a chain of format-specific importers. The one"]
#![doc = "concrete implementation, [`MtpFreeze202001Importer`], selects a gate"]
#![doc = "by file extension, deserializes the raw CAEX tree, extracts the"]
#![doc = "CommunicationSet and Services sub-trees and merges them by resolving"]
#![doc = "`RefID` cross-references into a finished [`pimad_rs::Pea`]."]
#![doc = ""]
#![doc = "Typical use:"]
#![doc = "```no_run"]
#![doc = "use pimad_rs_caex::{ImportInstructions, ImporterChain};"]
#![doc = ""]
#![doc = "let chain = ImporterChain::default();"]
#![doc = "let pea = chain.convert_from(&ImportInstructions {"]
#![doc = "    source: \"plant.mtp\".into(),"]
#![doc = "    identifier: \"plant\".into(),"]
#![doc = "})?;"]
#![doc = "# Ok::<(), pimad_rs_caex::ImportError>(())"]
#![doc = "```"]

// --- Crate Modules ---

mod chain;
mod error;
mod gate;
mod importer;
pub mod model;
mod parts;
mod quasi;

// --- Public API Re-exports ---

pub use chain::{ImportInstructions, Importer, ImporterChain};
pub use error::ImportError;
pub use gate::{AmlGate, Gate, GatePayload, MtpGate, SelectedGate, XmlGate, ZipGate, select_gate};
pub use importer::MtpFreeze202001Importer;
