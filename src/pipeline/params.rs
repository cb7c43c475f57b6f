//! Typed parameter codec.
//!
//! The pipeline protocol is statically typed per value: every parameter and
//! every result cell travels as a tagged object (`null`/`integer`/`float`/`text`).
//! This module converts between [`RowValues`] and that representation, with
//! exhaustive matching at both boundaries.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::RowValues;

/// A tagged scalar on the wire.
///
/// The protocol transmits integer values as decimal strings to avoid JSON
/// number-precision loss; serialization follows that, and deserialization
/// accepts either a string or a bare number.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireRepr {
    Null,
    Integer {
        #[serde(with = "int_as_string")]
        value: i64,
    },
    Float {
        value: f64,
    },
    Text {
        value: String,
    },
}

mod int_as_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntRepr {
        Num(i64),
        Str(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match IntRepr::deserialize(deserializer)? {
            IntRepr::Num(n) => Ok(n),
            IntRepr::Str(s) => s.parse().map_err(D::Error::custom),
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            TypedValue::Null => WireRepr::Null,
            TypedValue::Integer(i) => WireRepr::Integer { value: *i },
            TypedValue::Float(f) => WireRepr::Float { value: *f },
            TypedValue::Text(s) => WireRepr::Text { value: s.clone() },
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireRepr::deserialize(deserializer)? {
            WireRepr::Null => TypedValue::Null,
            WireRepr::Integer { value } => TypedValue::Integer(value),
            WireRepr::Float { value } => TypedValue::Float(value),
            WireRepr::Text { value } => TypedValue::Text(value),
        })
    }
}

/// Container for a converted positional parameter list.
pub struct Params(pub Vec<TypedValue>);

impl Params {
    /// Convert middleware values into wire values.
    ///
    /// Booleans map to integer `0`/`1` (the SQLite-compatible convention shared
    /// with the other integer-boolean call sites in this crate); lists render to
    /// text since the protocol has no array type.
    #[must_use]
    pub fn convert(params: &[RowValues]) -> Params {
        Params(params.iter().map(encode_value).collect())
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<TypedValue> {
        self.0
    }
}

fn encode_value(value: &RowValues) -> TypedValue {
    match value {
        RowValues::Null => TypedValue::Null,
        RowValues::Int(i) => TypedValue::Integer(*i),
        RowValues::Float(f) => TypedValue::Float(*f),
        RowValues::Bool(b) => TypedValue::Integer(i64::from(*b)),
        RowValues::Text(s) => TypedValue::Text(s.clone()),
        RowValues::List(items) => TypedValue::Text(
            items
                .iter()
                .map(render_list_element)
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

fn render_list_element(value: &RowValues) -> String {
    match value {
        RowValues::Null => "NULL".to_string(),
        RowValues::Int(i) => i.to_string(),
        RowValues::Float(f) => f.to_string(),
        RowValues::Bool(b) => i64::from(*b).to_string(),
        RowValues::Text(s) => s.clone(),
        RowValues::List(items) => items
            .iter()
            .map(render_list_element)
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Unwrap a wire value to its bare scalar.
#[must_use]
pub fn decode_value(value: TypedValue) -> RowValues {
    match value {
        TypedValue::Null => RowValues::Null,
        TypedValue::Integer(i) => RowValues::Int(i),
        TypedValue::Float(f) => RowValues::Float(f),
        TypedValue::Text(s) => RowValues::Text(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact() {
        let originals = vec![
            RowValues::Null,
            RowValues::Int(42),
            RowValues::Int(-7),
            RowValues::Float(2.5),
            RowValues::Float(-0.125),
            RowValues::Text("hello".into()),
        ];
        let encoded = Params::convert(&originals).into_vec();
        let decoded: Vec<RowValues> = encoded.into_iter().map(decode_value).collect();
        assert_eq!(decoded, originals);
    }

    #[test]
    fn integers_serialize_as_decimal_strings() {
        let json = serde_json::to_value(TypedValue::Integer(-12)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "integer", "value": "-12"}));
    }

    #[test]
    fn integer_decode_accepts_string_or_number() {
        let from_str: TypedValue =
            serde_json::from_value(serde_json::json!({"type": "integer", "value": "99"})).unwrap();
        assert_eq!(from_str, TypedValue::Integer(99));

        let from_num: TypedValue =
            serde_json::from_value(serde_json::json!({"type": "integer", "value": 99})).unwrap();
        assert_eq!(from_num, TypedValue::Integer(99));
    }

    #[test]
    fn null_carries_no_value_field() {
        let json = serde_json::to_value(TypedValue::Null).unwrap();
        assert_eq!(json, serde_json::json!({"type": "null"}));

        let back: TypedValue = serde_json::from_value(serde_json::json!({"type": "null"})).unwrap();
        assert_eq!(back, TypedValue::Null);
    }

    #[test]
    fn bool_encodes_as_integer() {
        assert_eq!(
            Params::convert(&[RowValues::Bool(true), RowValues::Bool(false)]).into_vec(),
            vec![TypedValue::Integer(1), TypedValue::Integer(0)]
        );
    }
}
