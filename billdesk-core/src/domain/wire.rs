//! Lenient deserializers for backend JSON fields
//!
//! The backend serializes money as JSON doubles and sometimes as strings,
//! and a few endpoints return either a bare value or a wrapping object.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

fn decimal_from_value<E: serde::de::Error>(value: JsonValue) -> Result<Option<Decimal>, E> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => {
            let s = n.to_string();
            // Exponent notation (1e3) is not accepted by Decimal::from_str
            s.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(&s))
                .map(Some)
                .map_err(|e| E::custom(format!("invalid decimal: {}", e)))
        }
        JsonValue::String(s) if s.trim().is_empty() => Ok(None),
        JsonValue::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| E::custom(format!("invalid decimal: {}", e))),
        _ => Err(E::custom("expected number or string for amount")),
    }
}

/// Deserialize amount that can be number or string
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    Ok(decimal_from_value::<D::Error>(value)?.unwrap_or_default())
}

/// Deserialize optional amount that can be number, string or null
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(v) => decimal_from_value::<D::Error>(v),
        None => Ok(None),
    }
}

/// Deserialize an integer id that can be number or string
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom("id out of range")),
        JsonValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid id: {}", s))),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Amounts {
        #[serde(deserialize_with = "deserialize_amount")]
        required: Decimal,
        #[serde(default, deserialize_with = "deserialize_optional_amount")]
        optional: Option<Decimal>,
        #[serde(deserialize_with = "deserialize_id")]
        id: i64,
    }

    #[test]
    fn test_amount_from_number_and_string() {
        let a: Amounts =
            serde_json::from_str(r#"{"required": 295.0, "optional": "45.50", "id": 7}"#).unwrap();
        assert_eq!(a.required, Decimal::new(295, 0));
        assert_eq!(a.optional, Some(Decimal::new(4550, 2)));
        assert_eq!(a.id, 7);
    }

    #[test]
    fn test_optional_amount_null_or_missing() {
        let a: Amounts = serde_json::from_str(r#"{"required": null, "optional": null, "id": "12"}"#).unwrap();
        assert_eq!(a.required, Decimal::ZERO);
        assert_eq!(a.optional, None);
        assert_eq!(a.id, 12);

        let a: Amounts = serde_json::from_str(r#"{"required": 1, "id": 1}"#).unwrap();
        assert_eq!(a.optional, None);
    }

    #[test]
    fn test_reject_bad_amount() {
        let result = serde_json::from_str::<Amounts>(r#"{"required": "abc", "id": 1}"#);
        assert!(result.is_err());
    }
}
