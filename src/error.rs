use juniper::{graphql_value, FieldError, IntoFieldError, ScalarValue};

/// Failures a resolver can report back to the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("No message exists with id {id}")]
    NotFound { id: String },

    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(id: impl Into<String>) -> Self {
        Error::NotFound { id: id.into() }
    }
}

impl<S: ScalarValue> IntoFieldError<S> for Error {
    fn into_field_error(self) -> FieldError<S> {
        let message = self.to_string();
        match self {
            Error::NotFound { .. } => {
                FieldError::new(message, graphql_value!({ "code": "NOT_FOUND" }))
            }
            Error::Validation(_) => {
                FieldError::new(message, graphql_value!({ "code": "BAD_USER_INPUT" }))
            }
            Error::Internal(_) => FieldError::new(message, graphql_value!({ "code": "INTERNAL" })),
        }
    }
}
