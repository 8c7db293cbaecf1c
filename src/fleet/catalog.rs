use super::types::{Category, SatelliteRecord};

/// A sidebar category and the network group feeding it, if any.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub icon: &'static str,
    pub group: Option<&'static str>,
}

pub const CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        category: Category::Iss,
        icon: "🧭",
        group: None,
    },
    CategorySpec {
        category: Category::Starlink,
        icon: "🛰️",
        group: Some("starlink"),
    },
    CategorySpec {
        category: Category::OneWeb,
        icon: "🛰️",
        group: Some("oneweb"),
    },
    CategorySpec {
        category: Category::Iridium,
        icon: "📱",
        group: Some("iridium"),
    },
    CategorySpec {
        category: Category::IridiumNext,
        icon: "📱",
        group: Some("iridium-NEXT"),
    },
];

/// Curated entry that is always present in the fleet. The orbital summary
/// fields are published approximations, not recomputed.
#[derive(Debug, Clone, Copy)]
pub struct FeaturedSatellite {
    pub name: &'static str,
    pub norad_id: u32,
    pub category: Category,
    pub description: &'static str,
    pub icon: &'static str,
    pub mean_motion: &'static str,
    pub inclination: &'static str,
    pub eccentricity: &'static str,
}

pub const FEATURED: &[FeaturedSatellite] = &[
    FeaturedSatellite {
        name: "International Space Station",
        norad_id: 25544,
        category: Category::Iss,
        description: "Habitable artificial satellite in low Earth orbit.",
        icon: "🧭",
        mean_motion: "15.49",
        inclination: "51.64",
        eccentricity: "0.0006703",
    },
    FeaturedSatellite {
        name: "Hubble Space Telescope",
        norad_id: 20580,
        category: Category::EarthObs,
        description: "NASA's famous deep space telescope.",
        icon: "🔭",
        mean_motion: "15.09",
        inclination: "28.47",
        eccentricity: "0.0002855",
    },
    FeaturedSatellite {
        name: "James Webb Telescope",
        norad_id: 50463,
        category: Category::EarthObs,
        description: "Flagship infrared telescope at L2.",
        icon: "🛰️",
        mean_motion: "1.0027",
        inclination: "28.06",
        eccentricity: "0.0003842",
    },
    FeaturedSatellite {
        name: "GOES-16",
        norad_id: 41866,
        category: Category::Weather,
        description: "NOAA geostationary weather sat (East).",
        icon: "🌦️",
        mean_motion: "1.0027",
        inclination: "0.04",
        eccentricity: "0.0001528",
    },
    FeaturedSatellite {
        name: "Aqua",
        norad_id: 27424,
        category: Category::EarthObs,
        description: "Water-cycle observatory.",
        icon: "🌊",
        mean_motion: "14.57",
        inclination: "98.21",
        eccentricity: "0.0001273",
    },
    FeaturedSatellite {
        name: "NOAA-20",
        norad_id: 43013,
        category: Category::Weather,
        description: "Polar-orbiting weather sat.",
        icon: "🛰️",
        mean_motion: "14.19",
        inclination: "98.74",
        eccentricity: "0.0001461",
    },
];

impl FeaturedSatellite {
    pub fn object_id(&self) -> String {
        self.norad_id.to_string()
    }

    pub fn to_record(&self) -> SatelliteRecord {
        let mut record = SatelliteRecord::new(self.object_id(), self.name, self.category);
        record.description = Some(self.description.to_string());
        record.icon = Some(self.icon.to_string());
        record.epoch = Some("Live".to_string());
        record.mean_motion = Some(self.mean_motion.to_string());
        record.inclination = Some(self.inclination.to_string());
        record.eccentricity = Some(self.eccentricity.to_string());
        record
    }
}

/// The featured set as records, in table order.
pub fn featured_records() -> Vec<SatelliteRecord> {
    FEATURED.iter().map(FeaturedSatellite::to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn featured_ids_are_unique_and_live() {
        let records = featured_records();
        assert_eq!(records.len(), 6);
        let ids: HashSet<_> = records.iter().map(|r| r.object_id.clone()).collect();
        assert_eq!(ids.len(), records.len());
        assert!(records.iter().all(|r| r.epoch.as_deref() == Some("Live")));
        assert!(records.iter().all(|r| r.position.is_none()));
        assert_eq!(records[0].object_id, "25544");
    }

    #[test]
    fn only_iss_has_no_group() {
        let without_group: Vec<_> = CATEGORIES.iter().filter(|c| c.group.is_none()).collect();
        assert_eq!(without_group.len(), 1);
        assert_eq!(without_group[0].category, Category::Iss);
    }
}
