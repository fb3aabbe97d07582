use crate::utils::error::{AppError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 驗證 URL，只接受 `allowed_schemes` 裡的協定
pub fn validate_url(field_name: &str, url_str: &str, allowed_schemes: &[&str]) -> Result<()> {
    if url_str.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) if allowed_schemes.contains(&url.scheme()) => Ok(()),
        Ok(url) => Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!(
                "Unsupported URL scheme: {}. Allowed schemes: {}",
                url.scheme(),
                allowed_schemes.join(", ")
            ),
        }),
        Err(e) => Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

/// 還留著 `${VAR}` 代表環境變數沒設定
pub fn validate_resolved(field_name: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(AppError::MissingConfigError {
            field: format!("{} ({})", field_name, value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB_SCHEMES: &[&str] = &["http", "https", "libsql"];

    #[test]
    fn test_validate_url() {
        assert!(validate_url("database.url", "https://db.example.com", DB_SCHEMES).is_ok());
        assert!(validate_url("database.url", "libsql://family-db.turso.io", DB_SCHEMES).is_ok());
        assert!(validate_url("database.url", "", DB_SCHEMES).is_err());
        assert!(validate_url("database.url", "invalid-url", DB_SCHEMES).is_err());
        assert!(validate_url("database.url", "ftp://example.com", DB_SCHEMES).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("seed.quotes_file", "data/quotes.json", &["json"]).is_ok());
        assert!(validate_file_extension("seed.quotes_file", "data/quotes.txt", &["json"]).is_err());
        assert!(validate_file_extension("seed.quotes_file", "data/quotes", &["json"]).is_err());
    }

    #[test]
    fn test_validate_resolved() {
        assert!(validate_resolved("database.url", "https://db.example.com").is_ok());
        let err = validate_resolved("database.url", "${DATABASE_URL}").unwrap_err();
        assert!(matches!(err, AppError::MissingConfigError { .. }));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("database.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("database.timeout_seconds", 0u64, 1, 300).is_err());
    }
}
