use thiserror::Error;

/// Main error type for the schedule normalizer.
/// Aggregates errors from the standard library, spreadsheet I/O dependencies,
/// and the pipeline's own validation.
#[derive(Error, Debug)]
pub enum ScheduleError {
    // Standard library and dependency errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid xlsx file format: {0}")]
    XlsxError(#[from] calamine::XlsxError),

    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    // Ingestion errors
    #[error("Sheet '{name}' not found in workbook")]
    SheetNotFound { name: String },

    #[error("Sheet '{name}' is empty or contains no data")]
    EmptySheet { name: String },

    #[error("Sheet '{name}' has no second header row to take column names from")]
    MissingHeaderRow { name: String },

    // Pipeline errors
    #[error("Missing expected column '{name}'")]
    MissingColumn { name: String },

    /// The raw header and the working table must agree on column count before
    /// the positional rename in the export realignment.
    #[error("Original header has {expected} columns but the working table has {found}")]
    HeaderMismatch { expected: usize, found: usize },
}
