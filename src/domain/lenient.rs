//! Field deserializers for provider payloads that drop bad values instead
//! of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Numbers, numeric strings and `null`; anything else reads as `None`.
pub(crate) fn optional_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64().filter(|v| v.is_finite())),
        Some(serde_json::Value::String(s)) => Ok(s.trim().parse::<f64>().ok().filter(|v| v.is_finite())),
        _ => Ok(None),
    }
}

/// Non-negative integer score; `null` or garbage reads as zero.
pub(crate) fn score_or_zero<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = optional_number(deserializer)?;
    Ok(value
        .filter(|v| *v >= 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32)
        .unwrap_or(0))
}

/// A list where elements that fail to decode are skipped; `null` is empty.
pub(crate) fn skip_malformed<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}
