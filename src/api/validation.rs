use super::ApiError;
use crate::domain::BatchHandle;
use crate::export::ExportFormat;

pub fn validate_page(page: Option<u64>) -> Result<u64, ApiError> {
    match page {
        None => Ok(1),
        Some(0) => Err(ApiError::validation(
            "Invalid page: 0. Page numbers start at 1",
        )),
        Some(page) => Ok(page),
    }
}

pub fn validate_user_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid user ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn parse_batch_handle(raw: &str) -> Result<BatchHandle, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("Invalid batch handle: {raw}")))
}

/// Missing format falls back to `default`; unknown values are rejected.
pub fn parse_export_format(
    raw: Option<&str>,
    default: ExportFormat,
) -> Result<ExportFormat, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(ApiError::validation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_page() {
        assert_eq!(validate_page(None).unwrap(), 1);
        assert_eq!(validate_page(Some(3)).unwrap(), 3);
        assert!(validate_page(Some(0)).is_err());
    }

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id(1).is_ok());
        assert!(validate_user_id(0).is_err());
        assert!(validate_user_id(-4).is_err());
    }

    #[test]
    fn test_parse_export_format() {
        assert_eq!(
            parse_export_format(None, ExportFormat::Xlsx).unwrap(),
            ExportFormat::Xlsx
        );
        assert_eq!(
            parse_export_format(Some("CSV"), ExportFormat::Xlsx).unwrap(),
            ExportFormat::Csv
        );
        assert!(parse_export_format(Some("pdf"), ExportFormat::Csv).is_err());
    }

    #[test]
    fn test_parse_batch_handle() {
        let handle = BatchHandle::new();
        assert_eq!(parse_batch_handle(&handle.to_string()).unwrap(), handle);
        assert!(parse_batch_handle("not-a-uuid").is_err());
    }
}
