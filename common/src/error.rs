//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("row index {index} out of range (rows: {len})")]
    RowOutOfRange { index: usize, len: usize },

    #[error("column index {index} out of range (columns: {len})")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("tag index {index} out of range for row {row} (tags: {len})")]
    TagOutOfRange { row: usize, index: usize, len: usize },

    #[error("another operation is still in progress")]
    Busy,

    #[error("grid shape error: {0}")]
    Shape(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_row_out_of_range() {
        let error = Error::RowOutOfRange { index: 5, len: 3 };
        assert_eq!(format!("{}", error), "row index 5 out of range (rows: 3)");
    }

    #[test]
    fn test_error_display_tag_out_of_range() {
        let error = Error::TagOutOfRange { row: 1, index: 2, len: 0 };
        let display = format!("{}", error);
        assert!(display.contains("row 1"));
        assert!(display.contains("tags: 0"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Shape("行数が一致しません".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Shape"));
        assert!(debug.contains("行数が一致しません"));
    }
}
