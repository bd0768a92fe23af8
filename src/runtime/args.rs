use std::collections::HashMap;

use crate::error::Error;
use crate::param::{Param, ParamKind};
use crate::value::Value;

/// The argument capture handed to a generated method: positional values in
/// call order plus named arguments keyed by keyword-parameter name.
#[derive(Debug, Clone, Default)]
pub struct Args {
    positional: Vec<Value>,
    named: HashMap<String, Value>,
}

impl Args {
    pub fn new() -> Args {
        Args::default()
    }

    /// Append a positional argument.
    pub fn pos(mut self, value: impl Into<Value>) -> Args {
        self.positional.push(value.into());
        self
    }

    /// Set a named argument. A repeated name keeps the last value, like a
    /// repeated keyword at an ordinary call site.
    pub fn named(mut self, name: &str, value: impl Into<Value>) -> Args {
        self.named.insert(name.to_string(), value.into());
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named_args(&self) -> &HashMap<String, Value> {
        &self.named
    }
}

/// Bind an argument capture against a declared parameter list, enforcing
/// arity and keyword requirements exactly as a hand-written method would.
///
/// Returns the bound environment (declaration order lost; keyed by name) with
/// optionals and keywords falling back to their declared defaults. The caller
/// uses this purely for validation — generated methods never consult their
/// arguments when computing a return value.
pub(crate) fn bind(params: &[Param], args: &Args) -> Result<HashMap<String, Value>, Error> {
    let positional: Vec<&Param> = params.iter().filter(|p| !p.kind().is_keyword()).collect();
    let required = positional
        .iter()
        .filter(|p| p.kind() == ParamKind::Required)
        .count();
    let max = positional.len();
    let got = args.positional().len();
    if got < required {
        return Err(Error::Arity(format!(
            "Too few positionals passed; expected {} arguments but got {}",
            expected_phrase(required, max),
            got
        )));
    }
    if got > max {
        return Err(Error::Arity(format!(
            "Too many positionals passed; expected {} arguments but got {}",
            expected_phrase(required, max),
            got
        )));
    }

    let mut env = HashMap::new();
    for (idx, param) in positional.iter().enumerate() {
        let value = match args.positional().get(idx) {
            Some(v) => v.clone(),
            None => param.default_or_nil(),
        };
        env.insert(param.name().to_string(), value);
    }

    for param in params.iter().filter(|p| p.kind().is_keyword()) {
        match args.named_args().get(param.name().as_str()) {
            Some(value) => {
                env.insert(param.name().to_string(), value.clone());
            }
            None if param.kind() == ParamKind::KeywordRequired => {
                return Err(Error::Arity(format!(
                    "Required named argument '{}' not passed",
                    param.name()
                )));
            }
            None => {
                env.insert(param.name().to_string(), param.default_or_nil());
            }
        }
    }

    // Reject stray named arguments. Sorted so the reported name is stable
    // when several are unknown.
    let mut stray: Vec<&String> = args
        .named_args()
        .keys()
        .filter(|key| {
            !params
                .iter()
                .any(|p| p.kind().is_keyword() && p.name().as_str() == key.as_str())
        })
        .collect();
    stray.sort();
    if let Some(key) = stray.first() {
        return Err(Error::Arity(format!(
            "Unexpected named argument '{}' passed",
            key
        )));
    }

    Ok(env)
}

fn expected_phrase(required: usize, max: usize) -> String {
    if required == max {
        required.to_string()
    } else {
        format!("{} to {}", required, max)
    }
}
