use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::ident::Ident;
use crate::param::{Param, ParamKind};
use crate::value::Value;

/// Where a generated member is callable from, and whether it binds at the
/// instance or class level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    PublicClass,
    PrivateClass,
}

impl Visibility {
    pub fn is_class_level(&self) -> bool {
        matches!(self, Visibility::PublicClass | Visibility::PrivateClass)
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "protected" => Ok(Visibility::Protected),
            "public_class" => Ok(Visibility::PublicClass),
            "private_class" => Ok(Visibility::PrivateClass),
            other => Err(Error::InvalidVisibility(other.to_string())),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::PublicClass => "public_class",
            Visibility::PrivateClass => "private_class",
        };
        f.write_str(token)
    }
}

/// Builder collecting one method declaration: visibility, ordered parameter
/// list, and return-value policy.
///
/// Populated inside the closure passed to one of the `Generator` declaration
/// verbs, then read-only once handed over for materialization.
#[derive(Debug, Clone)]
pub struct MethodConfig {
    name: Ident,
    visibility: Visibility,
    params: Vec<Param>,
    return_value: Option<Value>,
    generate_random: bool,
}

impl MethodConfig {
    pub fn new(name: &str, visibility: Visibility) -> Result<MethodConfig, Error> {
        Ok(MethodConfig {
            name: Ident::new(name)?,
            visibility,
            params: Vec::new(),
            return_value: None,
            generate_random: false,
        })
    }

    /// Append a required positional parameter.
    pub fn required(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.push_param(ParamKind::Required, name, None)
    }

    /// Append an optional positional parameter with a default. Pass
    /// `Value::Nil` for a bare optional.
    pub fn optional(&mut self, name: &str, default: impl Into<Value>) -> Result<&mut Self, Error> {
        self.push_param(ParamKind::Optional, name, Some(default.into()))
    }

    /// Append a keyword parameter that callers must supply.
    pub fn keyword_required(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.push_param(ParamKind::KeywordRequired, name, None)
    }

    /// Append a keyword parameter with a default. Pass `Value::Nil` for a
    /// bare keyword.
    pub fn keyword(&mut self, name: &str, default: impl Into<Value>) -> Result<&mut Self, Error> {
        self.push_param(ParamKind::Keyword, name, Some(default.into()))
    }

    /// Set the return policy: a literal value, or a [`crate::TypeMarker`]
    /// requesting random generation when paired with [`generate`](Self::generate).
    pub fn returns(&mut self, value: impl Into<Value>) -> &mut Self {
        self.return_value = Some(value.into());
        self
    }

    /// Toggle random-generation mode for the configured return marker.
    pub fn generate(&mut self, enabled: bool) -> &mut Self {
        self.generate_random = enabled;
        self
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }

    pub fn generate_random(&self) -> bool {
        self.generate_random
    }

    /// Render the full parameter list as a signature string.
    pub fn signature(&self) -> String {
        let parts: Vec<String> = self.params.iter().map(Param::render).collect();
        format!("{}({})", self.name, parts.join(", "))
    }

    fn push_param(
        &mut self,
        kind: ParamKind,
        name: &str,
        default: Option<Value>,
    ) -> Result<&mut Self, Error> {
        let ident = Ident::new(name)?;
        // A positional after a keyword could never bind; reject it at
        // declaration time rather than emit an unsatisfiable signature.
        if !kind.is_keyword() && self.params.iter().any(|p| p.kind().is_keyword()) {
            return Err(Error::InvalidParameterOrder {
                method: self.name.to_string(),
                param: ident.to_string(),
            });
        }
        self.params.push(Param::from_ident(kind, ident, default));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TypeMarker;

    #[test]
    fn params_keep_declaration_order() {
        let mut cfg = MethodConfig::new("greet", Visibility::Public).unwrap();
        cfg.required("name")
            .unwrap()
            .optional("greeting", "Hello")
            .unwrap()
            .keyword_required("format")
            .unwrap()
            .keyword("timeout", 30)
            .unwrap();
        let names: Vec<&str> = cfg.params().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, ["name", "greeting", "format", "timeout"]);
        assert_eq!(
            cfg.signature(),
            "greet(name, greeting = \"Hello\", format:, timeout: 30)"
        );
    }

    #[test]
    fn positional_after_keyword_is_rejected() {
        let mut cfg = MethodConfig::new("bad", Visibility::Public).unwrap();
        cfg.keyword("timeout", 30).unwrap();
        assert_eq!(
            cfg.required("name").unwrap_err(),
            Error::InvalidParameterOrder {
                method: "bad".to_string(),
                param: "name".to_string(),
            }
        );
        let mut cfg = MethodConfig::new("bad2", Visibility::Public).unwrap();
        cfg.keyword_required("fmt").unwrap();
        assert!(matches!(
            cfg.optional("x", 1),
            Err(Error::InvalidParameterOrder { .. })
        ));
    }

    #[test]
    fn keyword_after_keyword_is_fine() {
        let mut cfg = MethodConfig::new("ok", Visibility::Public).unwrap();
        cfg.keyword_required("fmt").unwrap().keyword("t", 1).unwrap();
        assert_eq!(cfg.params().len(), 2);
    }

    #[test]
    fn bad_method_name_is_rejected() {
        assert!(matches!(
            MethodConfig::new("not a method", Visibility::Public),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(matches!(
            MethodConfig::new("", Visibility::Private),
            Err(Error::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn bad_param_name_is_rejected_eagerly() {
        let mut cfg = MethodConfig::new("m", Visibility::Public).unwrap();
        assert!(matches!(
            cfg.required("with space"),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(cfg.params().is_empty());
    }

    #[test]
    fn returns_and_generate_record_policy() {
        let mut cfg = MethodConfig::new("m", Visibility::Public).unwrap();
        assert_eq!(cfg.return_value(), None);
        assert!(!cfg.generate_random());
        cfg.returns(TypeMarker::Int).generate(true);
        assert_eq!(cfg.return_value(), Some(&Value::Marker(TypeMarker::Int)));
        assert!(cfg.generate_random());
        cfg.generate(false);
        assert!(!cfg.generate_random());
    }

    #[test]
    fn visibility_tokens_parse() {
        assert_eq!("public".parse::<Visibility>(), Ok(Visibility::Public));
        assert_eq!("private".parse::<Visibility>(), Ok(Visibility::Private));
        assert_eq!("protected".parse::<Visibility>(), Ok(Visibility::Protected));
        assert_eq!(
            "public_class".parse::<Visibility>(),
            Ok(Visibility::PublicClass)
        );
        assert_eq!(
            "private_class".parse::<Visibility>(),
            Ok(Visibility::PrivateClass)
        );
        assert_eq!(
            "module".parse::<Visibility>(),
            Err(Error::InvalidVisibility("module".to_string()))
        );
    }

    #[test]
    fn class_level_classification() {
        assert!(Visibility::PublicClass.is_class_level());
        assert!(Visibility::PrivateClass.is_class_level());
        assert!(!Visibility::Protected.is_class_level());
    }
}
