use chrono::NaiveDateTime;

use super::ExportFormat;
use crate::generator::BatchMetadata;

/// Keeps alphanumerics, `-` and `_`; everything else is dropped.
#[must_use]
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// `{base}_{comment}_{n}users_{by}_{DD-MM-YYYY}_{HH-MM-SS}.{ext}`
#[must_use]
pub fn batch_filename(
    metadata: &BatchMetadata,
    format: ExportFormat,
    exported_at: NaiveDateTime,
) -> String {
    format!(
        "{}_{}_{}users_{}_{}.{}",
        sanitize(&metadata.base_name),
        sanitize(&metadata.comment),
        metadata.users_generated,
        sanitize(&metadata.generated_by),
        exported_at.format("%d-%m-%Y_%H-%M-%S"),
        format.extension()
    )
}

/// `activity_log_{YYYYMMDD}_{HHMMSS}.{ext}`
#[must_use]
pub fn activity_filename(format: ExportFormat, exported_at: NaiveDateTime) -> String {
    format!(
        "activity_log_{}.{}",
        exported_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
