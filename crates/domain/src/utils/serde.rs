//! Serialization utilities for C4C payloads
//!
//! C4C OData v2 serializes `Edm.Decimal` values as JSON strings while other
//! numeric fields arrive as numbers. The helpers here accept both shapes.

/// Lenient `Option<f64>` (de)serialization
///
/// Accepts a JSON number, a numeric string (`"7.50"`), `null`, or a missing
/// field. Strings that do not parse as a number decode as `None` rather than
/// failing the whole record.
///
/// # Usage
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Example {
///     #[serde(default, with = "riskview_domain::utils::serde::lenient_f64")]
///     score: Option<f64>,
/// }
///
/// let parsed: Example = serde_json::from_str(r#"{"score":"7.50"}"#).unwrap();
/// assert_eq!(parsed.score, Some(7.5));
/// ```
pub mod lenient_f64 {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    /// Serialize as a plain JSON number (or `null`).
    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(number) => serializer.serialize_some(number),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from a number, a numeric string or `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<NumberOrText>::deserialize(deserializer)?;
        Ok(match raw {
            Some(NumberOrText::Number(number)) => Some(number),
            Some(NumberOrText::Text(text)) => text.trim().parse::<f64>().ok(),
            None => None,
        })
    }
}

/// Deserialize `null` as the type's default value.
///
/// C4C sends `null` for unset fields; a missing field is covered by
/// `#[serde(default)]`, this covers the explicit `null`.
///
/// # Usage
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "riskview_domain::utils::serde::null_as_default")]
///     id: String,
/// }
///
/// let parsed: Example = serde_json::from_str(r#"{"id":null}"#).unwrap();
/// assert_eq!(parsed.id, "");
/// ```
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    let value = <Option<T> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Scored {
        #[serde(default, with = "super::lenient_f64")]
        score: Option<f64>,
    }

    #[derive(Deserialize, Debug)]
    struct Keyed {
        #[serde(default, deserialize_with = "super::null_as_default")]
        id: String,
    }

    #[test]
    fn null_and_missing_strings_decode_as_empty() {
        for json in [r#"{}"#, r#"{"id":null}"#] {
            let parsed: Keyed = serde_json::from_str(json).unwrap();
            assert_eq!(parsed.id, "", "input: {json}");
        }

        let parsed: Keyed = serde_json::from_str(r#"{"id":"SR-1"}"#).unwrap();
        assert_eq!(parsed.id, "SR-1");
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let from_number: Scored = serde_json::from_str(r#"{"score":8}"#).unwrap();
        let from_text: Scored = serde_json::from_str(r#"{"score":" 6.25 "}"#).unwrap();

        assert_eq!(from_number.score, Some(8.0));
        assert_eq!(from_text.score, Some(6.25));
    }

    #[test]
    fn missing_null_and_garbage_decode_as_none() {
        for json in [r#"{}"#, r#"{"score":null}"#, r#"{"score":"n/a"}"#] {
            let parsed: Scored = serde_json::from_str(json).unwrap();
            assert_eq!(parsed.score, None, "input: {json}");
        }
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&Scored { score: Some(4.5) }).unwrap();
        assert_eq!(json, r#"{"score":4.5}"#);
    }
}
