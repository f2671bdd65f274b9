// crates/pimad-rs-caex/src/parts/mod.rs

//! Extraction stages that pull the loosely linked CAEX sub-trees apart.
//!
//! [`ServicePart`] reads the `Services` hierarchy into quasi-services;
//! [`MtpPart`] reads the `CommunicationSet` into endpoint descriptors and
//! data assemblies. Neither resolves cross-references; that is the merge
//! stage's job.

mod mtp;
mod service;

pub(crate) use mtp::{MtpExtraction, MtpPart};
pub(crate) use service::ServicePart;
