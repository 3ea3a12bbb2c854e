use chrono::NaiveDateTime;

use super::filename::batch_filename;
use super::table::{Table, to_xlsx};
use super::{ExportError, ExportFile, ExportFormat};
use crate::generator::{BatchMetadata, CredentialRecord};

pub const BATCH_SHEET: &str = "Generated Users";
pub const METADATA_SHEET: &str = "Export Info";
pub const BATCH_HEADERS: [&str; 4] = ["Name", "Password", "IP Address", "Comment"];

#[must_use]
pub fn batch_table(records: &[CredentialRecord]) -> Table {
    let mut table = Table::new(BATCH_SHEET, &BATCH_HEADERS);
    for record in records {
        table.push_row(vec![
            record.username.as_str().into(),
            record.password.as_str().into(),
            record.ip_address.as_str().into(),
            record.comment.as_str().into(),
        ]);
    }
    table
}

#[must_use]
pub fn metadata_table(metadata: &BatchMetadata) -> Table {
    let mut table = Table::new(METADATA_SHEET, &["Field", "Value"]);
    table.push_row(vec!["Generated By".into(), metadata.generated_by.as_str().into()]);
    table.push_row(vec![
        "Generated At".into(),
        metadata
            .generated_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .into(),
    ]);
    table.push_row(vec!["Base Name".into(), metadata.base_name.as_str().into()]);
    table.push_row(vec!["Comment".into(), metadata.comment.as_str().into()]);
    table.push_row(vec!["Users".into(), metadata.users_generated.into()]);
    table
}

/// Renders a parked batch. XLSX carries a metadata sheet; CSV is rows only.
pub fn export_batch(
    records: &[CredentialRecord],
    metadata: &BatchMetadata,
    format: ExportFormat,
    exported_at: NaiveDateTime,
) -> Result<ExportFile, ExportError> {
    let table = batch_table(records);
    let bytes = match format {
        ExportFormat::Csv => table.to_csv()?,
        ExportFormat::Xlsx => to_xlsx(&[&table, &metadata_table(metadata)])?,
    };

    Ok(ExportFile {
        filename: batch_filename(metadata, format, exported_at),
        content_type: format.content_type(),
        bytes,
    })
}
