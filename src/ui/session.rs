//! Session handle for components
//!
//! `use_session()` pairs the tab's [`AuthContext`] with the router's navigate
//! function. Login, logout and sign-in move the user to the page the
//! transition asks for, so callers only deal with errors.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use serde::Serialize;

use crate::core::auth::{CallbackOutcome, CredentialOp, ExchangeError};
use crate::core::session::{DecodeError, Identity, SessionState, Transition};
use crate::ui::auth::{AuthContext, follow, use_auth_context};

/// Session state and navigating actions
#[derive(Clone)]
pub struct SessionContext<N> {
    auth: AuthContext,
    navigate: N,
}

impl<N> SessionContext<N>
where
    N: Fn(&str, NavigateOptions) + Clone + 'static,
{
    pub fn new(auth: AuthContext, navigate: N) -> Self {
        Self { auth, navigate }
    }

    pub fn auth(&self) -> AuthContext {
        self.auth
    }

    pub fn state(&self) -> RwSignal<SessionState> {
        self.auth.state
    }

    pub fn identity(&self) -> Option<Identity> {
        self.auth.identity()
    }

    pub fn is_loading(&self) -> bool {
        self.auth.is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn bearer_header(&self) -> Option<String> {
        self.auth.bearer_header()
    }

    /// Accept a token and go to the diary
    pub fn login(&self, token: &str) -> Result<(), DecodeError> {
        self.settle(self.auth.login(token))
    }

    /// End the session and go to the login page
    pub fn logout(&self) {
        let transition = self.auth.logout();
        follow(&self.navigate, transition.navigate);
    }

    /// Email/password login or registration
    pub async fn sign_in(
        &self,
        op: CredentialOp,
        request: &impl Serialize,
    ) -> Result<(), ExchangeError> {
        self.settle(self.auth.exchange_credentials(op, request).await)
    }

    /// Credential from the in-page Google button
    pub fn sign_in_with_credential(&self, credential: Option<&str>) -> CallbackOutcome {
        let outcome = self.auth.accept_credential(credential);
        if let CallbackOutcome::LoggedIn(ref transition) = outcome {
            follow(&self.navigate, transition.navigate);
        }
        outcome
    }

    fn settle<E>(&self, result: Result<Transition, E>) -> Result<(), E> {
        let transition = result?;
        follow(&self.navigate, transition.navigate);
        Ok(())
    }
}

/// Get the session handle; call from a component under the router
pub fn use_session() -> SessionContext<impl Fn(&str, NavigateOptions) + Clone + 'static> {
    SessionContext::new(use_auth_context(), use_navigate())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use leptos::reactive::owner::Owner;
    use serde_json::json;

    use super::*;
    use crate::core::session::identity::testutil::mint;
    use crate::ui::auth::{OAUTH_FAILED_MESSAGE, provide_auth_context};

    type Visits = Arc<Mutex<Vec<String>>>;

    fn fixture() -> (
        Owner,
        SessionContext<impl Fn(&str, NavigateOptions) + Clone + 'static>,
        Visits,
    ) {
        let owner = Owner::new();
        let auth = owner.with(provide_auth_context);
        let visits = Visits::default();
        let sink = visits.clone();
        let navigate = move |path: &str, _: NavigateOptions| {
            sink.lock().unwrap().push(path.to_string());
        };
        (owner, SessionContext::new(auth, navigate), visits)
    }

    // ========================================================================
    // Navigating actions
    // ========================================================================

    #[test]
    fn test_login_navigates_home() {
        let (_owner, session, visits) = fixture();
        let token = mint(json!({"sub": "u1", "email": "a@b.com"}));

        session.login(&token).unwrap();

        assert!(session.is_authenticated());
        assert_eq!(*visits.lock().unwrap(), vec!["/".to_string()]);
    }

    #[test]
    fn test_malformed_login_stays_put() {
        let (_owner, session, visits) = fixture();
        let err = session.login("nope").unwrap_err();

        assert!(matches!(err, DecodeError::Malformed(_)));
        assert!(visits.lock().unwrap().is_empty());
        assert!(session.is_loading());
    }

    #[test]
    fn test_logout_navigates_to_login() {
        let (_owner, session, visits) = fixture();
        let token = mint(json!({"sub": "u1"}));
        session.login(&token).unwrap();

        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(session.bearer_header(), None);
        assert_eq!(visits.lock().unwrap().last().map(String::as_str), Some("/login"));
    }

    #[test]
    fn test_credential_sign_in_navigates_only_on_success() {
        let (_owner, session, visits) = fixture();
        let outcome = session.sign_in_with_credential(Some("garbage"));
        assert!(matches!(outcome, CallbackOutcome::Rejected(_)));
        assert!(visits.lock().unwrap().is_empty());
        assert_eq!(
            session.auth().error.get_untracked().as_deref(),
            Some(OAUTH_FAILED_MESSAGE)
        );

        let credential = mint(json!({"sub": "g-1", "name": "Hanako"}));
        session.sign_in_with_credential(Some(credential.as_str()));

        assert_eq!(*visits.lock().unwrap(), vec!["/".to_string()]);
        assert_eq!(session.identity().map(|i| i.label().to_string()).as_deref(), Some("Hanako"));
        assert_eq!(session.auth().error.get_untracked(), None);
    }
}
