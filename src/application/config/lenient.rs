//! 저장소에서 온 설정 값을 관대하게 해석하는 serde 헬퍼.
//!
//! 예전 설정 레코드는 `"yes"`/`"no"`, `"0.3"`, `"400"`처럼 문자열로 저장되어 있으므로
//! 타입이 맞지 않는 값은 오류 대신 `None`(기본값)으로 취급한다.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_flag))
}

pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_number))
}

pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(parse_number)
        .filter(|n| n.is_finite())
        .map(|n| n.trunc() as i64))
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "on" | "1" => Some(true),
            "no" | "n" | "false" | "off" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::flag")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "super::number")]
        number: Option<f64>,
        #[serde(default, deserialize_with = "super::integer")]
        integer: Option<i64>,
        #[serde(default, deserialize_with = "super::text")]
        text: Option<String>,
    }

    #[test]
    fn accepts_legacy_string_encodings() {
        let probe: Probe = serde_json::from_str(
            r#"{"flag":"yes","number":"0.7","integer":"400","text":5}"#,
        )
        .unwrap();
        assert_eq!(probe.flag, Some(true));
        assert_eq!(probe.number, Some(0.7));
        assert_eq!(probe.integer, Some(400));
        assert_eq!(probe.text.as_deref(), Some("5"));
    }

    #[test]
    fn garbage_values_become_none() {
        let probe: Probe = serde_json::from_str(
            r#"{"flag":"maybe","number":"abc","integer":[1],"text":null}"#,
        )
        .unwrap();
        assert_eq!(probe.flag, None);
        assert_eq!(probe.number, None);
        assert_eq!(probe.integer, None);
        assert_eq!(probe.text, None);
    }

    #[test]
    fn missing_fields_stay_none() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert!(probe.flag.is_none() && probe.number.is_none());
    }
}
