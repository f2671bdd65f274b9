// crates/pimad-rs/src/error.rs

use thiserror::Error;

/// Errors raised by the constructors of the core model types.
///
/// The model is immutable after construction, so these are the only
/// failure points it has. Incomplete source data surfaces here when the
/// importer tries to build an object from it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The data assembly carried no `RefID` identifier of its own.
    /// Without it the assembly can never be a cross-reference target.
    #[error("data assembly '{tag_name}' has no RefID identifier")]
    MissingIdentifier { tag_name: String },

    /// The data assembly element had no tag name.
    #[error("data assembly has no tag name")]
    MissingTagName,

    /// A PEA must carry a name, either from the ModuleTypePackage element
    /// or from the import instructions.
    #[error("PEA has no name")]
    MissingPeaName,
}
