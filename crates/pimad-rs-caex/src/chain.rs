// crates/pimad-rs-caex/src/chain.rs

//! The importer chain: an ordered list of format-specific importers tried
//! in sequence.
//!
//! Each importer either converts the instructions it understands or
//! signals [`ImportError::NotResponsible`], upon which the driver loop
//! moves on to the next link. An exhausted chain is the sentinel case and
//! yields [`ImportError::NoResponsibleImporter`].

use log::warn;
use pimad_rs::{Pea, SemanticVersion};

use crate::error::ImportError;
use crate::importer::MtpFreeze202001Importer;

/// What to import: a source address plus a caller-supplied identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportInstructions {
    /// Path of the source file; the extension selects the gate.
    pub source: String,
    /// Caller-supplied identifier; used as the PEA name when the source
    /// file does not carry one.
    pub identifier: String,
}

/// A format-specific converter from source instructions to a PEA.
pub trait Importer {
    /// Single-use setup. Returns `true` exactly once; every later call is
    /// a no-op returning `false` and leaves prior state unchanged.
    fn initialize(&mut self) -> bool;

    /// Converts the instructions, or signals
    /// [`ImportError::NotResponsible`] to let the next importer try.
    ///
    /// # Errors
    /// [`ImportError::NotInitialized`] when called before `initialize`;
    /// otherwise the dispatch, gate and conversion errors of the concrete
    /// importer.
    fn convert_from(&self, instructions: &ImportInstructions) -> Result<Pea, ImportError>;

    /// The meta-model version this importer understands.
    fn meta_model_version(&self) -> SemanticVersion;
}

/// Ordered importer chain with a driver loop.
pub struct ImporterChain {
    importers: Vec<Box<dyn Importer>>,
}

impl ImporterChain {
    /// An empty chain. Useful for tests; [`ImporterChain::default`] builds
    /// the chain with the known importers registered.
    pub fn new() -> Self {
        Self {
            importers: Vec::new(),
        }
    }

    /// Appends an importer, initializing it on the way in.
    ///
    /// Re-initializing an importer that was already set up is a
    /// recoverable usage problem, not an error: it is logged and the
    /// importer keeps its prior state.
    pub fn push(&mut self, mut importer: Box<dyn Importer>) {
        if !importer.initialize() {
            warn!("importer was already initialized; keeping its prior state");
        }
        self.importers.push(importer);
    }

    pub fn len(&self) -> usize {
        self.importers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.importers.is_empty()
    }

    /// Tries the importers in order until one handles the instructions.
    ///
    /// # Errors
    /// The first non-pass result is returned as-is. When every link
    /// passes, or the chain is empty, the sentinel
    /// [`ImportError::NoResponsibleImporter`] is returned.
    pub fn convert_from(&self, instructions: &ImportInstructions) -> Result<Pea, ImportError> {
        for importer in &self.importers {
            match importer.convert_from(instructions) {
                Err(ImportError::NotResponsible) => continue,
                other => return other,
            }
        }
        Err(ImportError::NoResponsibleImporter)
    }
}

impl Default for ImporterChain {
    /// The chain with every known meta-model importer registered; only
    /// the 2020-01 freeze is implemented today.
    fn default() -> Self {
        let mut chain = Self::new();
        chain.push(Box::new(MtpFreeze202001Importer::new()));
        chain
    }
}
