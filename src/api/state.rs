use std::sync::Arc;

use crate::upstream::StatsProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn StatsProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn StatsProvider>) -> Self {
        Self { provider }
    }
}
