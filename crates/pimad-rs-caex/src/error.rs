// crates/pimad-rs-caex/src/error.rs

use quick_xml::errors::serialize::DeError;
use thiserror::Error;

/// Errors that can occur while importing an MTP/CAEX source.
///
/// Every failure of the pipeline is reported through this enum; the
/// importer never panics on malformed input. Partial reference-resolution
/// failures are deliberately *not* represented here: an unresolvable
/// service or procedure is dropped with a warning and the conversion
/// proceeds.
#[derive(Debug, Error)]
pub enum ImportError {
    /// `convert_from` was called before the single-use `initialize`.
    #[error("the importer is not initialized")]
    NotInitialized,

    /// The importer does not understand the instructions. The chain
    /// reacts by trying the next importer; callers outside a chain treat
    /// it like any other error.
    #[error("the importer is not responsible for these instructions")]
    NotResponsible,

    /// The source address has no recognized file extension.
    #[error("unknown source type '{0}'")]
    UnknownSourceType(String),

    /// Every importer in the chain passed on the instructions.
    #[error("no importer in the chain could convert the instructions")]
    NoResponsibleImporter,

    /// An I/O error from a gate (file or archive access).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The source archive could not be read as a zip file.
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    /// An error from the underlying `quick-xml` deserializer.
    #[error("XML parsing error: {0}")]
    XmlParsing(#[from] DeError),

    /// The gate payload contained no CAEXFile document.
    #[error("the source does not contain a valid CAEXFile document")]
    NotValidCaex,

    /// The CommunicationSet is missing one of its two mandatory lists.
    /// The file is unusable without both.
    #[error("could not parse the CommunicationSet: missing {list}")]
    CommunicationSet { list: &'static str },

    /// Extraction produced neither communication interfaces nor data
    /// assemblies.
    #[error("nothing could be extracted from the CommunicationSet")]
    EmptyCommunicationSet,

    /// The file lacks a usable ModuleTypePackage or Services subtree.
    #[error("could not extract the CommunicationSet and/or the ServiceSet")]
    Incomplete,

    /// PEA construction rejected the merged result.
    #[error(transparent)]
    Model(#[from] pimad_rs::ModelError),
}
