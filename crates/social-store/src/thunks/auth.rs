//! Auth thunks
//!
//! Token persistence is left to the caller: `login` resolves to the
//! session so the binary can write it with `social_config::Session`.

use super::{boxed, decode_field, BoxFuture, SharedApi, ThunkResult};
use crate::actions::{Action, AuthAction, GlobalAction};
use crate::domain_models::{AuthSession, Profile, User};
use crate::error::ThunkError;
use crate::realtime::RealtimeReconciler;
use crate::store::Store;
use crate::validation::{self, SignupForm};
use serde_json::json;
use social_api::Method;
use social_config::Session;

fn record_error(store: &Store, err: ThunkError) -> ThunkError {
    log::warn!("Auth: {}", err);
    store.dispatch(Action::Auth(AuthAction::SetAsyncState {
        loading: false,
        error: Some(err.user_message()),
    }));
    err
}

/// Sign in with email and password
pub fn login(
    api: SharedApi,
    email: String,
    password: String,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<AuthSession>> {
    boxed(move |store: Store| async move {
        validation::validate_login(&email, &password).map_err(|e| record_error(&store, e.into()))?;

        store.dispatch(Action::Auth(AuthAction::SetAsyncState {
            loading: true,
            error: None,
        }));

        let session = async {
            let value = api
                .request(
                    Method::Post,
                    "/auth/signin",
                    Some(json!({ "email": email.trim(), "password": password })),
                )
                .await?;
            decode_field::<AuthSession>(value, "session")
        }
        .await
        .map_err(|e| record_error(&store, e))?;

        if let Some(ref user) = session.user {
            log::info!("Signed in as {}", user.id);
            store.dispatch(Action::Auth(AuthAction::SetUser(user.clone())));
        }
        store.dispatch(Action::Auth(AuthAction::SetSession(Some(session.clone()))));
        store.dispatch(Action::Auth(AuthAction::SetAsyncState {
            loading: false,
            error: None,
        }));
        Ok(session)
    })
}

/// Create an account; the user still has to sign in afterwards
pub fn signup(
    api: SharedApi,
    form: SignupForm,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<User>> {
    boxed(move |store: Store| async move {
        validation::validate_signup(&form).map_err(|e| record_error(&store, e.into()))?;

        store.dispatch(Action::Auth(AuthAction::SetLoading(true)));

        let user = async {
            let value = api
                .request(
                    Method::Post,
                    "/auth/signup",
                    Some(json!({
                        "email": form.email.trim(),
                        "password": form.password,
                        "username": form.username,
                        "display_name": form.display_name.trim(),
                    })),
                )
                .await?;
            decode_field::<User>(value, "user")
        }
        .await
        .map_err(|e| record_error(&store, e))?;

        store.dispatch(Action::Auth(AuthAction::SetAsyncState {
            loading: false,
            error: None,
        }));
        Ok(user)
    })
}

/// End the session: stop realtime, best-effort sign-out, reset every slice
pub fn logout(
    api: SharedApi,
    realtime: Option<RealtimeReconciler>,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<()>> {
    boxed(move |store: Store| async move {
        if let Some(realtime) = realtime {
            realtime.stop().await;
        }

        if let Err(err) = api.request(Method::Post, "/auth/signout", None).await {
            log::warn!("Sign-out request failed, resetting anyway: {}", err);
        }

        store.dispatch(Action::Global(GlobalAction::ResetSession));
        Ok(())
    })
}

/// Restore the signed-in user from a persisted session
///
/// Resolves to `None` (and a cleared auth slice) when there is no usable
/// session or the profile cannot be loaded.
pub fn load_current_user(
    api: SharedApi,
    session: Session,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Option<User>>> {
    boxed(move |store: Store| async move {
        let (Some(user_id), Some(token)) = (session.user_id(), session.access_token()) else {
            log::debug!("No persisted session");
            store.dispatch(Action::Auth(AuthAction::ClearUser));
            return Ok(None);
        };
        let profile_id = session.profile_id().unwrap_or(user_id).to_string();

        let profile = async {
            let value = api
                .request(Method::Get, &format!("/profile/{}", profile_id), None)
                .await?;
            decode_field::<Profile>(value, "profile")
        }
        .await;

        match profile {
            Ok(profile) => {
                let user = User {
                    id: user_id.to_string(),
                    email: None,
                    profile: Some(profile),
                };
                store.dispatch(Action::Auth(AuthAction::SetUser(user.clone())));
                store.dispatch(Action::Auth(AuthAction::SetSession(Some(AuthSession {
                    access_token: token.to_string(),
                    refresh_token: session.session.refresh_token.clone(),
                    expires_at: session.session.expires_at,
                    user: None,
                }))));
                Ok(Some(user))
            }
            Err(err) => {
                log::warn!("Failed to restore user {}: {}", user_id, err);
                store.dispatch(Action::Auth(AuthAction::ClearUser));
                Ok(None)
            }
        }
    })
}
