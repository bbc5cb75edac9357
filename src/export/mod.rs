//! Excel export functionality

use crate::error::{Error, Result};
use crate::types::BatchResults;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Export estimation results to an Excel file
pub fn export_to_excel(results: &BatchResults, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    // Add summary sheet
    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, results)?;

    // Add line-item sheet
    let details_sheet = workbook.add_worksheet();
    write_details_sheet(details_sheet, results)?;

    // Save workbook
    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, results: &BatchResults) -> Result<()> {
    sheet
        .set_name("Summary")
        .map_err(|e| Error::Excel(e.to_string()))?;

    // Header format
    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Damage Cost Estimate Report", &header_format)
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(2, 0, "Run started:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(2, 1, &results.started_at.to_rfc3339())
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(3, 0, "Files processed:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(3, 1, results.total_processed as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(4, 0, "Successful:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(4, 1, results.successful as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(5, 0, "Failed:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(5, 1, results.failed as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let grand_total: f64 = results
        .entries
        .iter()
        .map(|e| e.estimate.total_price)
        .sum();
    sheet
        .write_string(6, 0, "Grand total:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(6, 1, grand_total)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_details_sheet(sheet: &mut Worksheet, results: &BatchResults) -> Result<()> {
    sheet
        .set_name("Details")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    let headers = ["Source", "Brand", "Part", "Confidence", "Price"];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    let mut row: u32 = 1;
    for entry in &results.entries {
        for detail in &entry.estimate.details {
            sheet
                .write_string(row, 0, &entry.source)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_string(row, 1, entry.brand.as_deref().unwrap_or(""))
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_string(row, 2, &detail.part)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_number(row, 3, detail.confidence)
                .map_err(|e| Error::Excel(e.to_string()))?;
            sheet
                .write_number(row, 4, detail.price)
                .map_err(|e| Error::Excel(e.to_string()))?;
            row += 1;
        }
    }

    Ok(())
}
