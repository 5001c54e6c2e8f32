use crate::actions::Action;
use crate::middleware::Middleware;
use crate::state::AppState;

/// LoggingMiddleware - logs every action passing through
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState) -> bool {
        log::debug!("Action: {}", action.type_name());
        log::trace!("Action payload: {:?}", action);

        true // Always pass action through
    }
}
