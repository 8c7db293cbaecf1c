use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::propagate::GeodeticFix;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[serde(rename = "ISS")]
    #[strum(to_string = "ISS")]
    Iss,
    Starlink,
    OneWeb,
    Iridium,
    #[serde(rename = "Iridium-NEXT")]
    #[strum(to_string = "Iridium-NEXT", serialize = "Iridium NEXT")]
    IridiumNext,
    Weather,
    EarthObs,
    Unknown,
}

impl Category {
    /// Grouping key, the upper-cased label.
    pub fn group_key(&self) -> String {
        self.to_string().to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SatelliteRecord {
    pub object_id: String,
    pub name: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tle_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tle_line2: Option<String>,
    /// Set only from a successful, in-range propagation.
    pub position: Option<GeodeticFix>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub epoch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_motion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eccentricity: Option<String>,
}

impl SatelliteRecord {
    pub fn new(object_id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            object_id: object_id.into(),
            name: name.into(),
            category,
            tle_line1: None,
            tle_line2: None,
            position: None,
            description: None,
            icon: None,
            epoch: None,
            mean_motion: None,
            inclination: None,
            eccentricity: None,
        }
    }

    /// Both TLE lines, when present and non-blank.
    pub fn tle(&self) -> Option<(&str, &str)> {
        match (self.tle_line1.as_deref(), self.tle_line2.as_deref()) {
            (Some(l1), Some(l2)) if !l1.trim().is_empty() && !l2.trim().is_empty() => {
                Some((l1, l2))
            }
            _ => None,
        }
    }
}

/// The merged satellite list produced by one load cycle.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Fleet {
    pub loaded_at: DateTime<Utc>,
    pub satellites: Vec<SatelliteRecord>,
}

impl Fleet {
    pub fn find(&self, object_id: &str) -> Option<&SatelliteRecord> {
        self.satellites.iter().find(|s| s.object_id == object_id)
    }
}
