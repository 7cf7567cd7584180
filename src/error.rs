use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum ExamError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error("failed to read question bank {path}: {source}")]
    /// The question bank could not be read from disk
    BankUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("question bank {path} is not valid JSON: {source}")]
    /// The question bank was read but could not be parsed
    BankMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    /// Question bank text that did not come from a file failed to parse
    Json(#[from] serde_json::Error),

    #[error("invalid layout configuration: {0}")]
    /// [toml] failed to parse the layout configuration
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("font has no glyph for {ch:?} and no replacement glyph")]
    /// Text could not be measured or drawn with the loaded font
    MissingGlyph { ch: char },

    #[error("question {index} has no text")]
    /// A question's statement is empty or whitespace only
    EmptyQuestion { index: usize },

    #[error("question {index} has {count} options but only {available} option labels are configured")]
    /// A question has more options than there are labels to print for them
    TooManyOptions {
        index: usize,
        count: usize,
        available: usize,
    },

    #[error("drawing attempted after the document was saved")]
    /// The canvas has already been saved and can no longer be drawn on
    CanvasClosed,
}
