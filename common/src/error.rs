//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate property_id: {0}")]
    DuplicatePropertyId(String),

    #[error("Invalid coordinate for property {id}: ({lat}, {lng})")]
    InvalidCoordinate { id: String, lat: f64, lng: f64 },

    #[error("Unknown property: {0}")]
    UnknownProperty(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_duplicate() {
        let error = Error::DuplicatePropertyId("210451".to_string());
        assert_eq!(format!("{}", error), "Duplicate property_id: 210451");
    }

    #[test]
    fn test_error_display_invalid_coordinate() {
        let error = Error::InvalidCoordinate { id: "9".to_string(), lat: 91.0, lng: 0.0 };
        let display = format!("{}", error);
        assert!(display.contains("property 9"));
        assert!(display.contains("91"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
