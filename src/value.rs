use std::fmt;

use crate::symbol::Symbol;

/// Sentinel naming a primitive kind, used with [`crate::MethodConfig::generate`]
/// to request a freshly generated random value instead of a fixed literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeMarker {
    Int,
    Str,
    Sym,
}

impl TypeMarker {
    pub fn name(&self) -> &'static str {
        match self {
            TypeMarker::Int => "Integer",
            TypeMarker::Str => "String",
            TypeMarker::Sym => "Symbol",
        }
    }
}

/// The scalar value model shared by parameter defaults, named arguments and
/// return values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Sym(Symbol),
    Bool(bool),
    Nil,
    /// A type marker configured via `returns`; resolved to a random value at
    /// call time only when random generation is enabled.
    Marker(TypeMarker),
}

impl Value {
    /// Render the value as a stable literal suitable for a call-signature
    /// fragment. The output is display-only — it is never re-parsed.
    pub fn literal(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Str(s) => format!("\"{}\"", escape_str(s)),
            Value::Sym(sym) => format!(":{}", sym),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => "false".to_string(),
            Value::Nil => "nil".to_string(),
            Value::Marker(marker) => marker.name().to_string(),
        }
    }
}

fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Sym(sym) => write!(f, "{}", sym),
            other => f.write_str(&other.literal()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Sym(sym)
    }
}

impl From<TypeMarker> for Value {
    fn from(marker: TypeMarker) -> Self {
        Value::Marker(marker)
    }
}
