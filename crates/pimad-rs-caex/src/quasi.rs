// crates/pimad-rs-caex/src/quasi.rs

//! Intermediate, partially resolved extraction output.
//!
//! A quasi-service still carries its data assembly reference as the raw
//! `RefID` string; the merge stage resolves it against the
//! CommunicationSet output. These types exist only for the duration of a
//! single `convert_from` invocation and never leave the crate.

/// A raw CAEX attribute triple, taken over verbatim (minus `RefID`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawAttribute {
    pub name: String,
    pub data_type: String,
    pub value: String,
}

/// A service procedure before reference resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QuasiProcedure {
    /// The CAEX element `ID`.
    pub identifier: String,
    pub name: String,
    pub meta_model_ref: String,
    /// The raw `RefID` pointing at the procedure's data assembly.
    pub data_assembly: Option<String>,
    pub attributes: Vec<RawAttribute>,
    /// `RefID`s of ProcedureParameter children.
    pub parameters: Vec<String>,
    /// `RefID`s of ReportValue children.
    pub report_values: Vec<String>,
    /// `RefID`s of ProcessValueIn children.
    pub process_values_in: Vec<String>,
    /// `RefID`s of ProcessValueOut children.
    pub process_values_out: Vec<String>,
}

/// A service before reference resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QuasiService {
    /// The CAEX element `ID`.
    pub identifier: String,
    pub name: String,
    pub meta_model_ref: String,
    /// The raw `RefID` pointing at the service's data assembly. Absence
    /// of a match during resolution drops the service, it is not an error.
    pub data_assembly: Option<String>,
    pub attributes: Vec<RawAttribute>,
    /// `RefID`s of service-level ConfigurationParameter children.
    pub configuration_parameters: Vec<String>,
    pub procedures: Vec<QuasiProcedure>,
}
