//! CSV import command.

use ifinv_core::seed;
use std::path::Path;
use tracing::info;

/// Reads a switch CSV export, assigns ids and writes a JSON seed.
///
/// Returns the number of records written.
pub fn run(input: &Path, output: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    info!("Importing {:?}", input);

    let records = seed::assign_ids(seed::read_csv(input)?);
    seed::write_json(output, &records)?;

    println!("✓ Imported {} interfaces", records.len());
    println!("  Path: {:?}", output);
    Ok(records.len())
}
