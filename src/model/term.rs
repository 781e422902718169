//! RDF terms that appear in compiled graph patterns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vocab::rdf;

/// Absolute IRI. Renders as `<iri>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_rdf_type(&self) -> bool {
        self.0 == rdf::TYPE
    }
}

impl From<&str> for Iri {
    fn from(v: &str) -> Self { Iri::new(v) }
}

impl From<String> for Iri {
    fn from(v: String) -> Self { Iri(v) }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// Query variable. Stored without the leading `?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// Literal with an optional datatype or language tag (never both).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Iri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Literal {
    /// Simple literal without datatype: `"lex"`.
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self { lexical: lexical.into(), datatype: None, language: None }
    }

    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Self { lexical: lexical.into(), datatype: Some(datatype), language: None }
    }

    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self { lexical: lexical.into(), datatype: None, language: Some(language.into()) }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.lexical.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                '\t' => write!(f, "\\t")?,
                c => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^{dt}")
        } else {
            Ok(())
        }
    }
}

/// Any term that can stand in a filter operand position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Term {
    Iri(Iri),
    Variable(Variable),
    Literal(Literal),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "{iri}"),
            Term::Variable(v) => write!(f, "{v}"),
            Term::Literal(l) => write!(f, "{l}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::xsd;

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::plain("Hop").to_string(), "\"Hop\"");
        assert_eq!(
            Literal::typed("5", Iri::new(xsd::INTEGER)).to_string(),
            "\"5\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
        assert_eq!(Literal::lang("bier", "nl").to_string(), "\"bier\"@nl");
    }

    #[test]
    fn test_literal_escaping() {
        assert_eq!(Literal::plain("say \"hi\"\n").to_string(), "\"say \\\"hi\\\"\\n\"");
    }

    #[test]
    fn test_variable_and_iri_display() {
        assert_eq!(Variable::new("x0").to_string(), "?x0");
        assert_eq!(Iri::new("https://example.org/Beer").to_string(), "<https://example.org/Beer>");
        assert!(Iri::new(crate::vocab::rdf::TYPE).is_rdf_type());
    }
}
