// Application state for HTTP handlers
use crate::application::broadcaster::StatsBroadcaster;
use crate::application::stats_service::StatsService;

#[derive(Clone)]
pub struct AppState {
    pub stats_service: StatsService,
    pub broadcaster: StatsBroadcaster,
}
