use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    /// Caller supplied an argument that cannot be used. Raised before any store call.
    Validation,
    /// A lookup, update or delete matched zero documents.
    NotFound,
    /// Any failure of the underlying store, including decode failures.
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Invalid argument"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
