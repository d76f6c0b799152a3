pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use std::sync::Arc;

use domain::store::TimelineStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TimelineStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TimelineStore>) -> Self {
        Self { store }
    }
}
