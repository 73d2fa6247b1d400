use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum BomViewError {
    #[error("Metadata unavailable: {object}")]
    MetadataUnavailable { object: String },

    #[error("Unclassified record: {record_id}")]
    UnclassifiedRecord { record_id: String },

    #[error("Malformed extended information on {record_id}: {message}")]
    MalformedExtendedInformation { record_id: String, message: String },

    #[error("Link resolution failed for {record_id}: {message}")]
    LinkResolution { record_id: String, message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl BomViewError {
    pub fn metadata_unavailable(object: impl Into<String>) -> Self {
        Self::MetadataUnavailable {
            object: object.into(),
        }
    }

    pub fn unclassified_record(record_id: impl Into<String>) -> Self {
        Self::UnclassifiedRecord {
            record_id: record_id.into(),
        }
    }

    pub fn malformed_extended_information(
        record_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedExtendedInformation {
            record_id: record_id.into(),
            message: message.into(),
        }
    }

    pub fn link_resolution(record_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LinkResolution {
            record_id: record_id.into(),
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MetadataUnavailable { .. } => "METADATA_UNAVAILABLE",
            Self::UnclassifiedRecord { .. } => "UNCLASSIFIED_RECORD",
            Self::MalformedExtendedInformation { .. } => "MALFORMED_EXTENDED_INFORMATION",
            Self::LinkResolution { .. } => "LINK_RESOLUTION_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MetadataUnavailable { .. } => 424,
            Self::UnclassifiedRecord { .. } => 422,
            Self::MalformedExtendedInformation { .. } => 422,
            Self::LinkResolution { .. } => 502,
            Self::Validation { .. } => 400,
            Self::Configuration { .. } => 500,
        }
    }
}

pub type BomViewResult<T> = Result<T, BomViewError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<BomViewError> for ErrorResponse {
    fn from(error: BomViewError) -> Self {
        let details = match &error {
            BomViewError::UnclassifiedRecord { record_id }
            | BomViewError::MalformedExtendedInformation { record_id, .. }
            | BomViewError::LinkResolution { record_id, .. } => {
                Some(serde_json::json!({ "recordId": record_id }))
            }
            _ => None,
        };
        Self {
            error: error.error_code().to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl From<serde_json::Error> for BomViewError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}

impl From<config::ConfigError> for BomViewError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
