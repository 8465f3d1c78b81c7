//! Workbook serialization.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::collector_core::{Cell, Table};

/// Write one worksheet per named table, in the given order.
///
/// Each sheet gets a header row (blank index-header cell, then the column
/// names) and a leading 0-based row index column. Sheet names are used
/// verbatim; names the xlsx format rejects fail the run. `Workbook::save`
/// owns the file handle for the whole write, so it is closed on every exit
/// path; a failure partway through can still leave a partial or absent file.
pub fn write_workbook(path: &Path, sheets: &[(&str, Table)]) -> Result<()> {
    info!(path = %path.display(), "writing workbook");
    let mut workbook = Workbook::new();

    for (name, table) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(*name)
            .with_context(|| format!("invalid sheet name {name:?}"))?;

        for (col, header) in table.columns().iter().enumerate() {
            worksheet.write_string(0, (col + 1) as u16, *header)?;
        }

        for (row, record) in table.rows().iter().enumerate() {
            let r = (row + 1) as u32;
            worksheet.write_number(r, 0, row as f64)?;
            for (col, cell) in record.iter().enumerate() {
                let c = (col + 1) as u16;
                match cell {
                    Cell::Empty => {}
                    Cell::Text(value) => {
                        worksheet.write_string(r, c, value.as_str())?;
                    }
                    Cell::Int(value) => {
                        worksheet.write_number(r, c, *value as f64)?;
                    }
                }
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("workbook saved");
    Ok(())
}
