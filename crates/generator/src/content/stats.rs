use brand_site_core::{Error, FALLBACK_LINK, Result, SiteConfig, SocialStat};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::assemble::{Assembled, Rejected, partition, sort_by_order};
use crate::normalize::{non_blank, order_from_json};
use crate::reader::read_json_file;

pub const CONTENT_FILE: &str = "stats.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStat {
    platform: Option<String>,
    #[serde(alias = "count", alias = "followers")]
    value: Option<Value>,
    label: Option<String>,
    suffix: Option<String>,
    url: Option<String>,
    order: Option<Value>,
}

/// Counts like `12500`, `"12,500"`, `"12.500"` or `"12.5k"`.
///
/// Without a `k`/`m` suffix every separator is a thousands separator; with
/// one, `,` and `.` are decimal marks.
pub fn parse_count(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_count_str(s),
        _ => None,
    };
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_count_str(raw: &str) -> Option<f64> {
    let lowered = raw.trim().to_lowercase();
    let (number, multiplier) = if let Some(n) = lowered.strip_suffix('k') {
        (n.trim().replace(',', "."), 1_000.0)
    } else if let Some(n) = lowered.strip_suffix('m') {
        (n.trim().replace(',', "."), 1_000_000.0)
    } else {
        let digits: String = lowered
            .chars()
            .filter(|c| !matches!(c, ',' | '.' | '_' | ' ' | '\u{a0}'))
            .collect();
        (digits, 1.0)
    };

    number.parse::<f64>().ok().map(|n| n * multiplier)
}

fn normalize(raw: &Value, source: &Path) -> std::result::Result<SocialStat, Rejected> {
    let stat = RawStat::deserialize(raw).map_err(|err| Rejected::new(source, err.to_string()))?;

    let platform =
        non_blank(stat.platform).ok_or_else(|| Rejected::missing_field(source, "platform"))?;
    let value = match stat.value.as_ref() {
        None => return Err(Rejected::missing_field(source, "value")),
        Some(v) => parse_count(v)
            .ok_or_else(|| Rejected::new(source, format!("value {} is not a count", v)))?,
    };

    Ok(SocialStat {
        label: non_blank(stat.label).unwrap_or_else(|| platform.clone()),
        platform,
        value,
        suffix: stat.suffix.unwrap_or_default(),
        url: non_blank(stat.url).unwrap_or_else(|| FALLBACK_LINK.to_string()),
        order: order_from_json(stat.order.as_ref()),
    })
}

/// Stats from either a top-level array or `{ "stats": [...] }`
pub fn collect(config: &SiteConfig) -> Result<Assembled<SocialStat>> {
    let path = config.content_dir().join(CONTENT_FILE);
    let document = read_json_file(&path)?;

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("stats") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(Error::InvalidData(format!(
                    "{}: expected an array or an object with a 'stats' array",
                    path.display()
                )));
            }
        },
        _ => {
            return Err(Error::InvalidData(format!(
                "{}: expected an array or an object with a 'stats' array",
                path.display()
            )));
        }
    };

    let results = entries.iter().enumerate().map(|(index, raw)| {
        let source = PathBuf::from(format!("{}[{}]", path.display(), index));
        normalize(raw, &source)
    });

    let mut assembled = partition(results, "stats");
    sort_by_order(&mut assembled.items, |s| s.order);
    Ok(assembled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_count_variants() {
        assert_eq!(parse_count(&json!(12500)), Some(12500.0));
        assert_eq!(parse_count(&json!("12,500")), Some(12500.0));
        assert_eq!(parse_count(&json!("12.500")), Some(12500.0));
        assert_eq!(parse_count(&json!("1 200 000")), Some(1_200_000.0));
        assert_eq!(parse_count(&json!("12.5k")), Some(12500.0));
        assert_eq!(parse_count(&json!("1,2M")), Some(1_200_000.0));
        assert_eq!(parse_count(&json!("lots")), None);
        assert_eq!(parse_count(&json!(-5)), None);
        assert_eq!(parse_count(&json!(null)), None);
    }

    #[test]
    fn test_normalize_defaults() {
        let stat = normalize(&json!({"platform": "YouTube", "value": "3k"}), Path::new("s[0]"))
            .unwrap();
        assert_eq!(stat.label, "YouTube");
        assert_eq!(stat.value, 3000.0);
        assert_eq!(stat.suffix, "");
        assert_eq!(stat.url, "#");
        assert_eq!(stat.order, 100.0);
    }

    #[test]
    fn test_normalize_rejects_missing_or_bad_value() {
        let err = normalize(&json!({"platform": "X"}), Path::new("s[0]")).unwrap_err();
        assert!(err.reason.contains("value"));

        let err = normalize(&json!({"platform": "X", "value": "many"}), Path::new("s[1]"))
            .unwrap_err();
        assert!(err.reason.contains("not a count"));

        let err = normalize(&json!({"value": 3}), Path::new("s[2]")).unwrap_err();
        assert!(err.reason.contains("platform"));
    }
}
