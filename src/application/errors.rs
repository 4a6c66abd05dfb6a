use crate::domain::order::OrderError;
use crate::domain::voucher::VoucherError;

// ============================================================================
// Application Errors - Result Values Returned by Handlers
// ============================================================================
//
// Business-rule failures travel as explicit values carrying the full error
// list; unexpected collaborator failures are kept apart so the boundary can
// map them to a generic server error.
//
// ============================================================================

/// A single field-level validation failure, collected from the request shape
/// before the handler body runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Any business or validation failure a handler can report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Voucher(#[from] VoucherError),

    #[error(transparent)]
    Validation(#[from] FieldError),
}

/// Why a command or query produced no result.
#[derive(Debug, thiserror::Error)]
pub enum CommandFailure {
    /// The request violated business rules or request-shape validation.
    /// Carries every violated condition, not just the first.
    #[error("request rejected ({} error(s))", .0.len())]
    Rejected(Vec<AppError>),

    /// A collaborator failed unexpectedly. Logged and surfaced as a generic
    /// server failure; never retried here.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl CommandFailure {
    pub fn rejected(error: impl Into<AppError>) -> Self {
        Self::Rejected(vec![error.into()])
    }
}

pub type CommandResult<T> = Result<T, CommandFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_wraps_domain_errors() {
        let failure = CommandFailure::rejected(OrderError::NotFound);

        match failure {
            CommandFailure::Rejected(errors) => {
                assert_eq!(errors, vec![AppError::Order(OrderError::NotFound)]);
            }
            CommandFailure::Storage(_) => panic!("expected a rejection"),
        }
    }

    #[test]
    fn test_field_error_display_names_the_field() {
        let error = FieldError {
            field: "customer_id",
            message: "invalid customer id",
        };

        assert_eq!(error.to_string(), "customer_id: invalid customer id");
    }

    #[test]
    fn test_storage_failure_from_anyhow() {
        let failure: CommandFailure = anyhow::anyhow!("connection reset").into();
        assert!(matches!(failure, CommandFailure::Storage(_)));
    }
}
