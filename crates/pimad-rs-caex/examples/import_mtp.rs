//! Converts an MTP/CAEX source given on the command line and prints a
//! summary of the assembled PEA.
//!
//! Usage: `cargo run --example import_mtp -- path/to/plant.mtp`

use std::process;

use pimad_rs_caex::{ImportInstructions, ImporterChain};

fn main() {
    env_logger::init();

    let Some(source) = std::env::args().nth(1) else {
        eprintln!("usage: import_mtp <file.(xml|aml|mtp|zip)>");
        process::exit(2);
    };

    let chain = ImporterChain::default();
    let instructions = ImportInstructions {
        identifier: source.clone(),
        source,
    };

    match chain.convert_from(&instructions) {
        Ok(pea) => {
            println!("PEA '{}' ({})", pea.name(), pea.pimad_identifier());
            println!("  data model: {} v{}", pea.data_model_ref(), pea.version());
            println!("  endpoints:  {}", pea.endpoints().len());
            println!("  assemblies: {}", pea.data_assemblies().len());
            for service in pea.services() {
                println!(
                    "  service '{}' on '{}' with {} procedure(s)",
                    service.name,
                    service.data_assembly.tag_name(),
                    service.procedures.len()
                );
            }
        }
        Err(e) => {
            eprintln!("import failed: {e}");
            process::exit(1);
        }
    }
}
