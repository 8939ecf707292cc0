use api_shared::TokenService;
use cardioscan_core::{Classifier, ReportService, UserService};
use std::sync::Arc;

/// Application state shared across REST API handlers.
///
/// Services are constructed once at startup from the resolved `CoreConfig`
/// and injected here; handlers never read the environment themselves.
#[derive(Clone)]
pub struct AppState {
    pub reports: ReportService,
    pub users: UserService,
    pub tokens: TokenService,
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(
        reports: ReportService,
        users: UserService,
        tokens: TokenService,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            reports,
            users,
            tokens,
            classifier,
        }
    }
}
