// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::proxy::ProxyClient;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub proxy: ProxyClient,
}
