use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::collections::HashSet;

use super::catalog::{featured_records, CategorySpec};
use super::feed::parse_group_feed;
use super::types::{Fleet, SatelliteRecord};
use crate::config::FeedsConfig;
use crate::fetch::{FetchOptions, ResilientFetcher};
use crate::propagate::propagate;

pub struct FleetLoader {
    fetcher: ResilientFetcher,
    feeds: FeedsConfig,
}

impl FleetLoader {
    pub fn new(fetcher: ResilientFetcher, feeds: FeedsConfig) -> Self {
        Self { fetcher, feeds }
    }

    pub async fn load(&self, categories: &[CategorySpec]) -> Fleet {
        self.load_at(categories, Utc::now()).await
    }

    /// Fetch every category feed concurrently, propagate at `at` and merge
    /// behind the featured set. Never fails: a broken feed contributes
    /// nothing.
    pub async fn load_at(&self, categories: &[CategorySpec], at: DateTime<Utc>) -> Fleet {
        let fetches = categories
            .iter()
            .filter(|spec| spec.group.is_some())
            .map(|spec| self.fetch_category(spec));
        let network: Vec<SatelliteRecord> = join_all(fetches).await.into_iter().flatten().collect();

        let featured = featured_records();
        let mut seen: HashSet<String> = featured.iter().map(|s| s.object_id.clone()).collect();

        let mut satellites = featured;
        let mut computed = 0;
        for mut record in network {
            if !seen.insert(record.object_id.clone()) {
                continue;
            }
            attach_position(&mut record, at);
            if record.position.is_some() {
                computed += 1;
            }
            satellites.push(record);
        }

        log::info!(
            "Fleet loaded: {} satellites, {} with computed positions",
            satellites.len(),
            computed
        );

        Fleet {
            loaded_at: at,
            satellites,
        }
    }

    async fn fetch_category(&self, spec: &CategorySpec) -> Vec<SatelliteRecord> {
        let Some(group) = spec.group else {
            return Vec::new();
        };
        let url = self.feeds.group_feed_url(group);
        let options = FetchOptions::default().with_header("Accept", "application/json");

        match self.fetcher.fetch(&url, &options).await {
            Ok(response) => {
                let records = parse_group_feed(&response.body, spec.category);
                log::debug!("{} feed: {} satellites", spec.category, records.len());
                records
            }
            Err(e) => {
                log::warn!("{} feed unavailable: {}", spec.category, e);
                Vec::new()
            }
        }
    }
}

fn attach_position(record: &mut SatelliteRecord, at: DateTime<Utc>) {
    let Some((line1, line2)) = record.tle() else {
        return;
    };
    match propagate(line1, line2, at) {
        Ok(fix) => record.position = Some(fix),
        Err(e) => log::debug!("No position for {}: {}", record.name, e),
    }
}
