use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fleet::{Fleet, FleetLoader, CATEGORIES};
use crate::resolver::PositionResolver;
use crate::weather::SpaceWeatherClient;

#[derive(Clone)]
pub struct AppState {
    /// Written once by the loader; `None` until the first load completes.
    pub fleet: Arc<RwLock<Option<Fleet>>>,
    pub resolver: PositionResolver,
    pub weather: Arc<SpaceWeatherClient>,
}

impl AppState {
    /// Run the single fleet load cycle and publish its result.
    pub async fn load_fleet(&self, loader: &FleetLoader) {
        let fleet = loader.load(CATEGORIES).await;
        *self.fleet.write().await = Some(fleet);
    }
}
