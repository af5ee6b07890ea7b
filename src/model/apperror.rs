use std::fmt;

/**
 * Represents the type of error that can occur within the application.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    /**
     * Failure while bootstrapping the process, e.g. TLS or configuration problems.
     */
    Initialization,
    /**
     * Request input failed semantic validation.
     */
    Validation,
    /**
     * The requested entity does not exist.
     */
    NotFound,
    /**
     * The data layer is not reachable. Distinct from "no rows" so that callers
     * can tell an outage apart from a city that genuinely has no data.
     */
    Unavailable,
    /**
     * A database query failed.
     */
    DatabaseError,
    /**
     * Any other application failure.
     */
    Application,
}

/**
 * Represents an error that occurs within the application.
 */
#[derive(Debug, Clone)]
pub struct ApplicationError {
    /**
     * Error type.
     */
    pub error_type: ErrorType,
    /**
     * Error message describing problem.
     */
    pub message: String,
}

impl ApplicationError {
    /**
     * Creates a new `ApplicationError`.
     *
     * # Arguments
     * `error_type`: The type of error.
     * `message`: A description of the error.
     */
    pub fn new(error_type: ErrorType, message: String) -> Self {
        ApplicationError { error_type, message }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
