//! Filter operand values and their typing against declared datatypes.

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{Iri, Literal, Term};
use crate::vocab::xsd;
use crate::{Error, Result};

/// Untyped operand as it arrives from a request.
///
/// Covers what request parsers hand over:
/// - Scalars: Bool, Int, Float, String
/// - Temporal: Date, DateTime
/// - Resources: Iri
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Iri(Iri),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::Date(_) => "DATE",
            Value::DateTime(_) => "DATETIME",
            Value::Iri(_) => "IRI",
        }
    }

    pub fn is_numeric(&self) -> bool { matches!(self, Value::Int(_) | Value::Float(_)) }
    pub fn is_string(&self) -> bool { matches!(self, Value::String(_)) }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Lexical form used when the value ends up inside a literal.
    pub fn lexical_form(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(v) => double_lexical(*v),
            Value::String(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::Iri(iri) => iri.as_str().to_owned(),
        }
    }
}

// ============================================================================
// Typing
// ============================================================================

impl Value {
    /// Convert into a term typed per a property's declared datatype.
    ///
    /// `resource` is set for IRI-valued properties (object-valued or
    /// `sh:nodeKind sh:IRI`); strings are then taken as IRIs.
    pub fn to_term(&self, datatype: Option<&Iri>, resource: bool) -> Result<Term> {
        if let Value::Iri(iri) = self {
            return Ok(Term::Iri(iri.clone()));
        }
        if resource {
            return match self {
                Value::String(s) => Ok(Term::Iri(Iri::new(s.as_str()))),
                other => Err(invalid("IRI", format!("{} is not a resource", other.type_name()))),
            };
        }
        let Some(datatype) = datatype else {
            return Ok(Term::Literal(self.natural_literal()));
        };

        let dt = datatype.as_str();
        let lexical = if xsd::is_integer(dt) {
            match self {
                Value::Int(i) => i.to_string(),
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| invalid(dt, format!("'{s}': {e}")))?
                    .to_string(),
                other => return Err(mismatch(dt, other)),
            }
        } else if xsd::is_decimal(dt) {
            match self {
                Value::Int(i) => i.to_string(),
                Value::Float(v) => floating_lexical(dt, *v)?,
                Value::String(s) => {
                    let v = s.trim().parse::<f64>().map_err(|e| invalid(dt, format!("'{s}': {e}")))?;
                    floating_lexical(dt, v)?
                }
                other => return Err(mismatch(dt, other)),
            }
        } else if dt == xsd::BOOLEAN {
            match self {
                Value::Bool(b) => b.to_string(),
                Value::String(s) if s == "true" || s == "false" => s.clone(),
                other => return Err(mismatch(dt, other)),
            }
        } else if dt == xsd::DATE {
            match self {
                Value::Date(d) => d.format("%Y-%m-%d").to_string(),
                Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|e| invalid(dt, format!("'{s}': {e}")))?
                    .format("%Y-%m-%d")
                    .to_string(),
                other => return Err(mismatch(dt, other)),
            }
        } else if dt == xsd::DATE_TIME {
            match self {
                Value::DateTime(d) => d.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                Value::String(s) => DateTime::parse_from_rfc3339(s)
                    .map_err(|e| invalid(dt, format!("'{s}': {e}")))?
                    .with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                other => return Err(mismatch(dt, other)),
            }
        } else {
            self.lexical_form()
        };

        Ok(Term::Literal(Literal::typed(lexical, datatype.clone())))
    }

    /// Literal carrying the value's own datatype. Strings stay plain.
    fn natural_literal(&self) -> Literal {
        let lexical = self.lexical_form();
        match self {
            Value::String(_) | Value::Iri(_) => Literal::plain(lexical),
            Value::Bool(_) => Literal::typed(lexical, Iri::new(xsd::BOOLEAN)),
            Value::Int(_) => Literal::typed(lexical, Iri::new(xsd::INTEGER)),
            Value::Float(_) => Literal::typed(lexical, Iri::new(xsd::DOUBLE)),
            Value::Date(_) => Literal::typed(lexical, Iri::new(xsd::DATE)),
            Value::DateTime(_) => Literal::typed(lexical, Iri::new(xsd::DATE_TIME)),
        }
    }
}

/// `xsd:decimal` has no infinities or NaN; `xsd:double`/`xsd:float` spell them `INF`, `-INF`, `NaN`.
fn floating_lexical(datatype: &str, v: f64) -> Result<String> {
    if !v.is_finite() && datatype == xsd::DECIMAL {
        return Err(invalid(datatype, format!("{} is not a decimal", double_lexical(v))));
    }
    Ok(double_lexical(v))
}

fn double_lexical(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "INF".into()
    } else if v == f64::NEG_INFINITY {
        "-INF".into()
    } else {
        v.to_string()
    }
}

fn invalid(datatype: &str, message: String) -> Error {
    Error::InvalidOperand { datatype: datatype.to_owned(), message }
}

fn mismatch(datatype: &str, value: &Value) -> Error {
    invalid(datatype, format!("cannot type {} value {value}", value.type_name()))
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<NaiveDate> for Value { fn from(v: NaiveDate) -> Self { Value::Date(v) } }
impl From<DateTime<Utc>> for Value { fn from(v: DateTime<Utc>) -> Self { Value::DateTime(v) } }
impl From<Iri> for Value { fn from(v: Iri) -> Self { Value::Iri(v) } }

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Iri(iri) => write!(f, "{iri}"),
            other => write!(f, "{}", other.lexical_form()),
        }
    }
}
