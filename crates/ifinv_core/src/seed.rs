//! Seed dataset import and export.
//!
//! The JSON seed is an array of full records (ids included) and is what the
//! server loads at startup. The CSV form is an export from the switches
//! themselves and carries no ids:
//!
//! ```text
//! switchName,interface,vlanId,speedMbps,status,description
//! sw-core-01,Gi1/0/1,10,1000,connected,uplink to dist
//! ```

use crate::error::{CoreError, CoreResult};
use crate::record::{InterfaceFields, InterfaceRecord};
use std::fs;
use std::path::Path;
use tracing::info;

/// Reads a JSON seed file.
pub fn read_json(path: &Path) -> CoreResult<Vec<InterfaceRecord>> {
    let contents = fs::read_to_string(path)?;
    let records: Vec<InterfaceRecord> = serde_json::from_str(&contents)?;
    info!(path = %path.display(), count = records.len(), "loaded JSON seed");
    Ok(records)
}

/// Writes records as a JSON seed file.
pub fn write_json(path: &Path, records: &[InterfaceRecord]) -> CoreResult<()> {
    let json = serde_json::to_string(records)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reads a CSV export.
pub fn read_csv(path: &Path) -> CoreResult<Vec<InterfaceFields>> {
    let contents = fs::read_to_string(path)?;
    let rows = parse_csv(&contents)?;
    info!(path = %path.display(), count = rows.len(), "parsed CSV export");
    Ok(rows)
}

/// Parses CSV text. The first line is a header and is skipped, as are blank
/// lines. Missing trailing columns default to an empty string or zero.
pub fn parse_csv(contents: &str) -> CoreResult<Vec<InterfaceFields>> {
    let mut rows = Vec::new();

    for (index, raw) in contents.lines().enumerate().skip(1) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = index + 1;
        let cols: Vec<&str> = line.split(',').collect();
        let col = |i: usize| cols.get(i).copied().unwrap_or("");

        rows.push(InterfaceFields {
            switch_name: col(0).to_string(),
            interface_name: col(1).to_string(),
            vlan_id: parse_number(col(2), "vlanId", line_no)?,
            speed_mbps: parse_number(col(3), "speedMbps", line_no)?,
            status: col(4).to_string(),
            description: col(5).to_string(),
        });
    }

    Ok(rows)
}

fn parse_number(value: &str, column: &str, line: usize) -> CoreResult<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| CoreError::InvalidCsv {
        line,
        message: format!("{column} is not a non-negative integer: {value:?}"),
    })
}

/// Gives every row a fresh record id.
pub fn assign_ids(rows: Vec<InterfaceFields>) -> Vec<InterfaceRecord> {
    rows.into_iter().map(InterfaceRecord::create).collect()
}
