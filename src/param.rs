use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::ident::Ident;
use crate::value::Value;

/// The four shapes a formal parameter can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Required,
    Optional,
    KeywordRequired,
    Keyword,
}

impl ParamKind {
    /// Keyword parameters live in the named-argument space; the other two
    /// kinds are positional.
    pub fn is_keyword(&self) -> bool {
        matches!(self, ParamKind::KeywordRequired | ParamKind::Keyword)
    }

    /// Only optional and keyword parameters apply default semantics.
    pub fn takes_default(&self) -> bool {
        matches!(self, ParamKind::Optional | ParamKind::Keyword)
    }
}

impl FromStr for ParamKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(ParamKind::Required),
            "optional" => Ok(ParamKind::Optional),
            "keyword_required" => Ok(ParamKind::KeywordRequired),
            "keyword" => Ok(ParamKind::Keyword),
            other => Err(Error::InvalidParameterKind(other.to_string())),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ParamKind::Required => "required",
            ParamKind::Optional => "optional",
            ParamKind::KeywordRequired => "keyword_required",
            ParamKind::Keyword => "keyword",
        };
        f.write_str(token)
    }
}

/// Immutable description of one formal parameter.
///
/// Owned by the `MethodConfig` that declared it; the stored order of a
/// config's params is exactly the call-signature order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    kind: ParamKind,
    name: Ident,
    default: Option<Value>,
}

impl Param {
    /// Build a parameter, validating the name. A default passed for a
    /// required or keyword-required parameter is dropped: those kinds never
    /// apply default semantics.
    pub fn new(kind: ParamKind, name: &str, default: Option<Value>) -> Result<Param, Error> {
        Ok(Param::from_ident(kind, Ident::new(name)?, default))
    }

    pub(crate) fn from_ident(kind: ParamKind, name: Ident, default: Option<Value>) -> Param {
        let default = if kind.takes_default() { default } else { None };
        Param {
            kind,
            name,
            default,
        }
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The declared default, or `Nil` where the declaration omitted one.
    pub(crate) fn default_or_nil(&self) -> Value {
        self.default.clone().unwrap_or(Value::Nil)
    }

    /// Render the call-signature fragment for this parameter.
    pub fn render(&self) -> String {
        match self.kind {
            ParamKind::Required => self.name.to_string(),
            ParamKind::Optional => {
                format!("{} = {}", self.name, self.default_or_nil().literal())
            }
            ParamKind::KeywordRequired => format!("{}:", self.name),
            ParamKind::Keyword => {
                format!("{}: {}", self.name, self.default_or_nil().literal())
            }
        }
    }
}
