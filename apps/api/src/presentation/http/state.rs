use crate::{
    config::Config, domain::simulation::simulator::Simulator,
    infrastructure::monitoring::MetricsService,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<MetricsService>,
    pub simulator: Arc<dyn Simulator>,
    pub config: Config,
}
