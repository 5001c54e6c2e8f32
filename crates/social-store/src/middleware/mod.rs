use crate::actions::Action;
use crate::state::AppState;

pub mod logging;

pub use logging::LoggingMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Runs under the store lock, so it must not block or dispatch.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: State before the action is reduced
    ///
    /// Returns `true` to continue the chain, `false` to swallow the action
    fn handle(&mut self, action: &Action, state: &AppState) -> bool;
}
