//! Example: Extracting a color table from a CxF document
//!
//! This example demonstrates how to:
//! 1. Parse a CxF file and inspect the extraction statistics
//! 2. Resolve every sample to CIE Lab and sRGB
//! 3. Print a tab-separated table suitable for spreadsheets
//! 4. Optionally save the table to a text file
//!
//! This is useful for turning spectrophotometer exports into palette files
//! for design and prepress tools.

use libcxf::Document;
use std::env;
use std::fs;
use std::process;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <cxf-file> [output-table.txt]", args[0]);
        eprintln!();
        eprintln!("Extracts named colors from a CxF file as a Lab/sRGB table.");
        eprintln!("With a second argument, the table is also written to that file.");
        process::exit(1);
    }

    let filename = &args[1];

    println!("=== CxF Color Extraction ===");
    println!("File: {}", filename);
    println!();

    let doc = Document::from_file(filename)?;

    println!("Document Information:");
    if let Some(ref ns) = doc.namespace {
        println!("  Namespace: {}", ns);
    }
    match doc.mode {
        Some(mode) => println!("  Acquisition mode: {}", mode),
        None => println!("  Acquisition mode: none established"),
    }
    println!("  Samples: {}", doc.sample_count());
    println!("  Reflectance records: {}", doc.stats.reflectance_records);
    println!("  Lab records: {}", doc.stats.lab_records);
    println!(
        "  Unrecognized specifications: {}",
        doc.stats.unrecognized_specifications
    );
    println!(
        "  Malformed Lab records: {}",
        doc.stats.malformed_lab_records
    );
    println!();

    let samples = doc.resolve()?;

    if samples.is_empty() {
        println!("No resolvable samples found.");
        return Ok(());
    }

    println!("─────────────────────────────────────");
    println!("Name\tL\ta\tb\tsRGB");
    for sample in &samples {
        println!("{}", sample);
    }
    println!("─────────────────────────────────────");
    println!("{} samples resolved", samples.len());

    if let Some(output) = args.get(2) {
        let table: String = samples.iter().map(|s| format!("{}\n", s)).collect();
        fs::write(output, table)?;
        println!();
        println!("Table written to {}", output);
    }

    Ok(())
}
