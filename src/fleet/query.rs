//! Read-only views over a loaded fleet: category filter, grouping,
//! statistics and map markers.

use serde::Serialize;
use std::str::FromStr;
use utoipa::ToSchema;

use super::catalog::CategorySpec;
use super::types::{Category, SatelliteRecord};

/// Upper bound on markers handed to a map view.
pub const MAX_MAP_MARKERS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        Category::from_str(s).map(CategoryFilter::Only)
    }
}

impl CategoryFilter {
    pub fn matches(&self, record: &SatelliteRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => record.category == *category,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryGroup {
    pub key: String,
    pub category: Category,
    pub satellites: Vec<SatelliteRecord>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryCount {
    pub category: Category,
    pub icon: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FleetStats {
    pub online: usize,
    pub with_position: usize,
    pub categories: Vec<CategoryCount>,
}

pub fn filter<'a>(
    satellites: &'a [SatelliteRecord],
    filter: CategoryFilter,
) -> impl Iterator<Item = &'a SatelliteRecord> {
    satellites.iter().filter(move |s| filter.matches(s))
}

/// Group by category, groups ordered by first appearance.
pub fn group_by_category<'a>(
    satellites: impl IntoIterator<Item = &'a SatelliteRecord>,
) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for sat in satellites {
        match groups.iter_mut().find(|g| g.category == sat.category) {
            Some(group) => group.satellites.push(sat.clone()),
            None => groups.push(CategoryGroup {
                key: sat.category.group_key(),
                category: sat.category,
                satellites: vec![sat.clone()],
            }),
        }
    }
    groups
}

pub fn stats(satellites: &[SatelliteRecord], categories: &[CategorySpec]) -> FleetStats {
    FleetStats {
        online: satellites.len(),
        with_position: satellites.iter().filter(|s| s.position.is_some()).count(),
        categories: categories
            .iter()
            .map(|spec| CategoryCount {
                category: spec.category,
                icon: spec.icon.to_string(),
                count: satellites
                    .iter()
                    .filter(|s| s.category == spec.category)
                    .count(),
            })
            .collect(),
    }
}

/// Satellites that can be placed on a map, capped at [`MAX_MAP_MARKERS`].
pub fn markers(satellites: &[SatelliteRecord]) -> Vec<&SatelliteRecord> {
    satellites
        .iter()
        .filter(|s| s.position.is_some())
        .take(MAX_MAP_MARKERS)
        .collect()
}
