pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error("unbound identifier '{0}'")]
    UnboundIdentifier(String),
    #[error("type mismatch in {context}: expected {expected}, got {found}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        found: String,
    },
    #[error("'{callee}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        callee: String,
        expected: String,
        found: usize,
    },
    #[error("malformed '{form}': {reason}")]
    MalformedForm { form: &'static str, reason: String },
    #[error("'{0}' of an empty sequence")]
    EmptySequence(&'static str),
    #[error("integer overflow in '{0}'")]
    Overflow(&'static str),
    #[error("i/o error in '{callee}': {reason}")]
    Io { callee: &'static str, reason: String },
}

impl RuntimeError {
    pub(crate) fn malformed(form: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedForm {
            form,
            reason: reason.into(),
        }
    }
}
