use thiserror::Error;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("could not parse date '{value}': expected \"Mon YYYY\"")]
    DateParse { value: String },

    #[error("could not parse date range '{value}': expected \"Mon YYYY - Mon YYYY\"")]
    DateRangeParse { value: String },

    #[error("missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    #[error("malformed state line '{line}'")]
    StateParse { line: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IpcError {
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IpcError>;
