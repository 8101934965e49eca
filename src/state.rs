use std::sync::Arc;

use crate::config::Config;
use crate::email::ReportMailer;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub mailer: Option<Arc<ReportMailer>>,
}
