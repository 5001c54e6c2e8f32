//! Auth Reducer

use crate::actions::AuthAction;
use crate::state::AuthState;

pub fn reduce_auth(mut state: AuthState, action: &AuthAction) -> AuthState {
    match action {
        AuthAction::SetUser(user) => {
            state.user = Some(user.clone());
            state.is_authenticated = true;
        }
        AuthAction::ClearUser => {
            state = AuthState::default();
        }
        AuthAction::SetSession(session) => {
            state.session = session.clone();
        }
        AuthAction::SetLoading(loading) => {
            state.loading = *loading;
        }
        AuthAction::SetError(error) => {
            state.error = error.clone();
        }
        AuthAction::ClearError => {
            state.error = None;
        }
        AuthAction::SetAsyncState { loading, error } => {
            state.loading = *loading;
            state.error = error.clone();
        }
    }
    state
}
