// crates/pimad-rs-caex/src/gate.rs

//! Gates: the I/O layer that fetches a source address and turns it into
//! parsed CAEX documents.
//!
//! Plain `.xml`/`.aml` sources hold a single CAEX document; `.mtp` and
//! `.zip` sources are archives that may aggregate several. The importer
//! normalizes both payload shapes (see [`GatePayload::into_first`]).

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use log::warn;
use zip::ZipArchive;

use crate::error::ImportError;
use crate::model::CaexFile;

/// What a gate hands back to the importer.
#[derive(Debug, Clone, PartialEq)]
pub enum GatePayload {
    /// One CAEX document, from a plain XML source.
    Single(CaexFile),
    /// Every CAEX document found in an archive, in entry order.
    Many(Vec<CaexFile>),
}

impl GatePayload {
    /// Normalizes the payload to the one document the conversion works on.
    /// Archive payloads contribute their first document.
    pub fn into_first(self) -> Option<CaexFile> {
        match self {
            GatePayload::Single(caex) => Some(caex),
            GatePayload::Many(documents) => documents.into_iter().next(),
        }
    }
}

/// Fetches and parses raw source content for the importer.
pub trait Gate {
    /// Reads the source at `address` and returns its CAEX content.
    ///
    /// # Errors
    /// I/O failures and unparseable single-document sources are reported
    /// as errors; the importer propagates them unchanged.
    fn receive(&self, address: &str) -> Result<GatePayload, ImportError>;
}

/// Reads a single plain CAEX/XML file.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlGate;

/// Reads a single AutomationML file (XML with the CAEX root element).
#[derive(Debug, Default, Clone, Copy)]
pub struct AmlGate;

/// Reads an `.mtp` container: a zip archive holding the CAEX manifest.
#[derive(Debug, Default, Clone, Copy)]
pub struct MtpGate;

/// Reads a plain zip archive of CAEX files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipGate;

impl Gate for XmlGate {
    fn receive(&self, address: &str) -> Result<GatePayload, ImportError> {
        read_document(address)
    }
}

impl Gate for AmlGate {
    fn receive(&self, address: &str) -> Result<GatePayload, ImportError> {
        read_document(address)
    }
}

impl Gate for MtpGate {
    fn receive(&self, address: &str) -> Result<GatePayload, ImportError> {
        read_archive(address)
    }
}

impl Gate for ZipGate {
    fn receive(&self, address: &str) -> Result<GatePayload, ImportError> {
        read_archive(address)
    }
}

/// Parses a whole file as one CAEX document.
fn read_document(address: &str) -> Result<GatePayload, ImportError> {
    let content = fs::read_to_string(address)?;
    let caex: CaexFile = quick_xml::de::from_str(&content)?;
    Ok(GatePayload::Single(caex))
}

/// Extracts every `.xml`/`.aml` entry of a zip archive and parses each as
/// a CAEX document. Entries that fail to parse are skipped with a warning;
/// an archive without a single parseable document yields an empty payload,
/// which the importer turns into a "not valid CAEX" error.
fn read_archive(address: &str) -> Result<GatePayload, ImportError> {
    let file = File::open(address)?;
    let mut archive = ZipArchive::new(file)?;

    let mut documents = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let entry_name = entry.name().to_string();

        let lowered = entry_name.to_ascii_lowercase();
        if !(lowered.ends_with(".xml") || lowered.ends_with(".aml")) {
            continue;
        }

        let mut content = String::new();
        entry.read_to_string(&mut content)?;
        match quick_xml::de::from_str::<CaexFile>(&content) {
            // A non-CAEX root deserializes into an empty document; such
            // entries carry nothing usable and are skipped like parse
            // failures.
            Ok(caex) if !caex.instance_hierarchy.is_empty() => documents.push(caex),
            Ok(_) => warn!("skipping archive entry '{}': no CAEX content", entry_name),
            Err(e) => warn!("skipping archive entry '{}': {}", entry_name, e),
        }
    }

    Ok(GatePayload::Many(documents))
}

/// The gate a source address dispatches to, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedGate {
    Xml,
    Aml,
    Mtp,
    Zip,
}

impl SelectedGate {
    /// Runs the selected gate against the address.
    pub fn receive(self, address: &str) -> Result<GatePayload, ImportError> {
        match self {
            SelectedGate::Xml => XmlGate.receive(address),
            SelectedGate::Aml => AmlGate.receive(address),
            SelectedGate::Mtp => MtpGate.receive(address),
            SelectedGate::Zip => ZipGate.receive(address),
        }
    }
}

/// Dispatches on the lowercase file-extension suffix of `source`.
///
/// # Errors
/// An unrecognized or missing extension is an immediate
/// [`ImportError::UnknownSourceType`]; no I/O is attempted.
pub fn select_gate(source: &str) -> Result<SelectedGate, ImportError> {
    let extension = Path::new(source)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("aml") => Ok(SelectedGate::Aml),
        Some("mtp") => Ok(SelectedGate::Mtp),
        Some("xml") => Ok(SelectedGate::Xml),
        Some("zip") => Ok(SelectedGate::Zip),
        _ => Err(ImportError::UnknownSourceType(source.to_string())),
    }
}
