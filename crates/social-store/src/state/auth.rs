//! Auth State

use crate::domain_models::{AuthSession, User};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub session: Option<AuthSession>,
}
