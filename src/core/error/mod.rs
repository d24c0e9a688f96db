use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,
    ValidationInvalidJson,

    CatalogCategoryNotFound,
    CatalogSubcommandNotFound,
    CatalogInvalid,

    RenderCatalogLookupFailed,

    SessionNoSelection,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::ValidationInvalidJson => "validation.invalid_json",

            ErrorCode::CatalogCategoryNotFound => "catalog.category_not_found",
            ErrorCode::CatalogSubcommandNotFound => "catalog.subcommand_not_found",
            ErrorCode::CatalogInvalid => "catalog.invalid",

            ErrorCode::RenderCatalogLookupFailed => "render.catalog_lookup_failed",

            ErrorCode::SessionNoSelection => "session.no_selection",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNotFoundDetails {
    pub category: String,
    pub available: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcommandNotFoundDetails {
    pub category: String,
    pub subcommand: String,
    pub available: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLookupFailedDetails {
    pub category: String,
    pub subcommand: String,
    pub cause: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogInvalidDetails {
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    /// True for category/subcommand lookups that missed, whether raised by
    /// the catalog directly or wrapped by the renderer.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::CatalogCategoryNotFound
                | ErrorCode::CatalogSubcommandNotFound
                | ErrorCode::RenderCatalogLookupFailed
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn validation_invalid_json(
        err: serde_json::Error,
        context: Option<String>,
        input: Option<String>,
    ) -> Self {
        let details = serde_json::json!({
            "error": err.to_string(),
            "context": context,
            "input": input,
        });

        Self::new(ErrorCode::ValidationInvalidJson, "Invalid JSON", details)
    }

    pub fn category_not_found(category: impl Into<String>, available: Vec<String>) -> Self {
        let category = category.into();
        let details = to_details(CategoryNotFoundDetails {
            category: category.clone(),
            available,
        });

        Self::new(
            ErrorCode::CatalogCategoryNotFound,
            format!("Category '{}' not found", category),
            details,
        )
        .with_hint("Run 'cmdforge catalog list' to see available categories")
    }

    pub fn subcommand_not_found(
        category: impl Into<String>,
        subcommand: impl Into<String>,
        available: Vec<String>,
    ) -> Self {
        let category = category.into();
        let subcommand = subcommand.into();
        let hint = format!(
            "Run 'cmdforge catalog show {}' to see its subcommands",
            category
        );
        let details = to_details(SubcommandNotFoundDetails {
            category: category.clone(),
            subcommand: subcommand.clone(),
            available,
        });

        Self::new(
            ErrorCode::CatalogSubcommandNotFound,
            format!("Subcommand '{}' not found in '{}'", subcommand, category),
            details,
        )
        .with_hint(hint)
    }

    /// Wraps a catalog miss raised while rendering a selection. Hints from
    /// the underlying lookup are carried over.
    pub fn catalog_lookup_failure(
        category: impl Into<String>,
        subcommand: impl Into<String>,
        cause: Error,
    ) -> Self {
        let details = to_details(CatalogLookupFailedDetails {
            category: category.into(),
            subcommand: subcommand.into(),
            cause: cause.code.as_str().to_string(),
        });

        let mut err = Self::new(
            ErrorCode::RenderCatalogLookupFailed,
            format!("Cannot render command: {}", cause.message),
            details,
        );
        err.hints = cause.hints;
        err
    }

    pub fn catalog_invalid(problem: impl Into<String>, source: Option<String>) -> Self {
        let details = to_details(CatalogInvalidDetails {
            problem: problem.into(),
            source,
        });

        Self::new(ErrorCode::CatalogInvalid, "Invalid command catalog", details)
    }

    pub fn session_no_selection() -> Self {
        Self::new(
            ErrorCode::SessionNoSelection,
            "No command selected",
            Value::Object(serde_json::Map::new()),
        )
        .with_hint("Select a category and subcommand before generating")
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
