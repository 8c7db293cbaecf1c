use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{Category, SatelliteRecord};

/// One entry of a satellite group feed. Every field is optional upstream.
#[derive(Debug, Deserialize)]
struct GroupFeedRecord {
    #[serde(rename = "OBJECT_ID", default, deserialize_with = "string_or_number")]
    object_id: Option<String>,
    #[serde(rename = "OBJECT_NAME", default)]
    object_name: Option<String>,
    #[serde(rename = "EPOCH", default)]
    epoch: Option<String>,
    #[serde(rename = "TLE_LINE1", default)]
    tle_line1: Option<String>,
    #[serde(rename = "TLE_LINE2", default)]
    tle_line2: Option<String>,
}

/// Parse a group feed body and tag every satellite with `category`.
///
/// A body that is not a JSON array yields no satellites. Entries that are
/// not objects or carry no `OBJECT_ID` are skipped.
pub fn parse_group_feed(body: &str, category: Category) -> Vec<SatelliteRecord> {
    let entries = match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            log::warn!("{} feed is not an array, ignoring", category);
            return Vec::new();
        }
        Err(e) => {
            log::warn!("{} feed is not valid JSON: {}", category, e);
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<GroupFeedRecord>(entry).ok())
        .filter_map(|entry| {
            let object_id = entry.object_id.filter(|id| !id.trim().is_empty())?;
            let name = entry.object_name.unwrap_or_else(|| object_id.clone());
            let mut record = SatelliteRecord::new(object_id, name, category);
            record.epoch = entry.epoch;
            record.tle_line1 = entry.tle_line1;
            record.tle_line2 = entry.tle_line2;
            Some(record)
        })
        .collect()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
