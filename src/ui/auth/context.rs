//! Auth context for managing the tab's session
//!
//! This module provides the reactive session context that:
//! - Owns the one `Session` for this tab, created by the application root
//! - Restores the session from localStorage once after hydration
//! - Publishes every transition through a `RwSignal<SessionState>`
//! - Exposes login/logout and the credential exchange to components
//!
//! Components navigate themselves after a transition; the context only
//! reports where to go.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use serde::Serialize;

use crate::core::auth::{
    AuthClient, AuthTransport, CallbackOutcome, CredentialOp, ExchangeError, GlooTransport,
    handle_callback, handle_credential,
};
use crate::core::config::ClientConfig;
use crate::core::session::{
    DecodeError, Identity, Navigation, RouteDecision, Session, SessionState, Transition,
    bearer_header, guard,
};

#[cfg(feature = "hydrate")]
type AppTokenStore = crate::core::session::LocalStorageTokenStore;
#[cfg(not(feature = "hydrate"))]
type AppTokenStore = crate::core::session::MemoryTokenStore;

/// Shown on the login page when a Google sign-in fails
pub const OAUTH_FAILED_MESSAGE: &str = "ログインに失敗しました。もう一度お試しください。";

/// Auth context providing session state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Latest session state; every transition writes it
    pub state: RwSignal<SessionState>,
    /// Error to show on the login page (e.g. a failed OAuth callback)
    pub error: RwSignal<Option<String>>,
    session: StoredValue<Session<AppTokenStore>>,
    config: StoredValue<ClientConfig>,
}

impl AuthContext {
    pub fn identity(&self) -> Option<Identity> {
        self.state.with(|s| s.identity.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.is_loading)
    }

    /// How a protected view should render right now
    pub fn decision(&self) -> RouteDecision {
        self.state.with(guard)
    }

    /// `Authorization` header value for diary API requests
    /// Uses untracked access since this is called from request code
    pub fn bearer_header(&self) -> Option<String> {
        self.session
            .try_with_value(|s| bearer_header(s.store()))
            .flatten()
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Accept a token from any acquisition path
    pub fn login(&self, token: &str) -> Result<Transition, DecodeError> {
        let now = now();
        self.session
            .try_update_value(|s| s.login(token, now))
            .unwrap_or_else(|| Err(DecodeError::Malformed("session disposed".to_string())))
    }

    pub fn logout(&self) -> Transition {
        self.session
            .try_update_value(|s| s.logout())
            .unwrap_or(Transition {
                state: SessionState::unauthenticated(),
                navigate: Some(Navigation::Login),
            })
    }

    /// Complete the OAuth redirect flow from the raw query string
    pub fn complete_callback(&self, query: &str) -> CallbackOutcome {
        let now = now();
        let outcome = self
            .session
            .try_update_value(|s| handle_callback(s, Some(query), now))
            .unwrap_or(CallbackOutcome::MissingToken);

        if let CallbackOutcome::Rejected(ref e) = outcome {
            leptos::logging::warn!("OAuth callback rejected: {}", e);
            self.error.set(Some(OAUTH_FAILED_MESSAGE.to_string()));
        }
        outcome
    }

    /// Accept the credential from the in-page Google button
    ///
    /// Any failure, including a missing credential, shows the OAuth failure
    /// message.
    pub fn accept_credential(&self, credential: Option<&str>) -> CallbackOutcome {
        let now = now();
        let outcome = self
            .session
            .try_update_value(|s| handle_credential(s, credential, now))
            .unwrap_or(CallbackOutcome::MissingToken);

        match outcome {
            CallbackOutcome::LoggedIn(_) => self.clear_error(),
            CallbackOutcome::MissingToken | CallbackOutcome::Rejected(_) => {
                leptos::logging::warn!("Google sign-in failed: {:?}", outcome);
                self.error.set(Some(OAUTH_FAILED_MESSAGE.to_string()));
            }
        }
        outcome
    }

    /// Log in or register with email and password against the backend
    pub async fn exchange_credentials(
        &self,
        op: CredentialOp,
        request: &impl Serialize,
    ) -> Result<Transition, ExchangeError> {
        self.exchange_credentials_with(&self.auth_client(), op, request)
            .await
    }

    /// Same as [`Self::exchange_credentials`] over an explicit client
    pub async fn exchange_credentials_with<T: AuthTransport>(
        &self,
        client: &AuthClient<T>,
        op: CredentialOp,
        request: &impl Serialize,
    ) -> Result<Transition, ExchangeError> {
        self.clear_error();
        client.sign_in(op, request, |token| self.login(token)).await
    }

    /// Client for the credential endpoints
    pub fn auth_client(&self) -> AuthClient<GlooTransport> {
        AuthClient::new(self.config.get_value(), GlooTransport)
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Apply a transition's navigation intent with the router's navigate function
pub fn follow(navigate: &impl Fn(&str, NavigateOptions), target: Option<Navigation>) {
    if let Some(target) = target {
        navigate(target.path(), NavigateOptions::default());
    }
}

/// Provide auth context to the component tree
///
/// Called once by the application root, which owns the session for the
/// lifetime of the tab.
pub fn provide_auth_context() -> AuthContext {
    let config = ClientConfig::compiled();

    #[cfg(feature = "hydrate")]
    let store = AppTokenStore::new(config.storage_key.clone());
    #[cfg(not(feature = "hydrate"))]
    let store = AppTokenStore::new();

    let state = RwSignal::new(SessionState::bootstrapping());
    let mut session = Session::new(store);
    session.subscribe(move |next| state.set(next.clone()));

    let ctx = AuthContext {
        state,
        error: RwSignal::new(None),
        session: StoredValue::new(session),
        config: StoredValue::new(config),
    };

    // Both server and client render the bootstrapping state, so hydration
    // matches; the stored token is only read in the browser.
    #[cfg(feature = "hydrate")]
    {
        Effect::new(move |_| {
            let now = now();
            ctx.session.update_value(|s| {
                s.bootstrap(now);
            });
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
