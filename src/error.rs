use thiserror::Error;

/// Everything that can go wrong while declaring or calling a generated
/// method.
///
/// The first four variants are configuration-time errors and are raised
/// synchronously at the point of the invalid declaration. The rest surface
/// only when a materialized method is invoked, exactly mirroring ordinary
/// method-call failures. No operation is ever retried; every failure is
/// terminal to the call that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter kind token outside the enumerated set.
    #[error("invalid parameter kind '{0}'")]
    InvalidParameterKind(String),

    /// A method or parameter name that is not a bare identifier.
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// A visibility token outside the enumerated set.
    #[error("invalid visibility '{0}'")]
    InvalidVisibility(String),

    /// A positional parameter declared after a keyword parameter. The
    /// resulting signature could never be satisfied, so the declaration is
    /// rejected eagerly.
    #[error("positional parameter '{param}' declared after a keyword parameter of '{method}'")]
    InvalidParameterOrder { method: String, param: String },

    /// Wrong number of positional arguments, or a missing/unknown named
    /// argument, at call time.
    #[error("{0}")]
    Arity(String),

    /// A private method invoked from outside its defining class.
    #[error("private method '{0}' called from outside its defining class")]
    PrivateCall(String),

    /// A protected method invoked from an unrelated call site.
    #[error("protected method '{0}' called from an unrelated class")]
    ProtectedCall(String),

    /// No method of that name anywhere on the class or its ancestors.
    #[error("no such method '{0}'")]
    NoSuchMethod(String),
}

impl Error {
    /// True for errors raised while declaring methods, before any class is
    /// materialized.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameterKind(_)
                | Error::InvalidIdentifier(_)
                | Error::InvalidVisibility(_)
                | Error::InvalidParameterOrder { .. }
        )
    }

    /// True for the visibility-violation errors produced by generated
    /// methods.
    pub fn is_access(&self) -> bool {
        matches!(self, Error::PrivateCall(_) | Error::ProtectedCall(_))
    }
}
