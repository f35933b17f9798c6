//! Session state machine
//!
//! `Bootstrapping -> {Authenticated(Identity), Unauthenticated}`, with explicit
//! `login`/`logout` moving between the two settled states. Expiry is evaluated
//! only when a token is loaded or set; nothing here runs on a timer.
//!
//! The machine never navigates. Operations return a [`Transition`] carrying the
//! new state and a navigation intent that the UI layer applies.

use serde::{Deserialize, Serialize};

use super::identity::{DecodeError, Identity, decode_at};
use super::store::TokenStore;

/// Observable session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// True only until the stored token has been read once
    pub is_loading: bool,
}

impl SessionState {
    pub fn bootstrapping() -> Self {
        Self {
            identity: None,
            is_loading: true,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            identity: None,
            is_loading: false,
        }
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.identity, self.is_loading) {
            (_, true) => SessionPhase::Bootstrapping,
            (Some(identity), false) => SessionPhase::Authenticated(identity.clone()),
            (None, false) => SessionPhase::Unauthenticated,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::bootstrapping()
    }
}

/// Session state as a tagged phase, for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Bootstrapping,
    Authenticated(Identity),
    Unauthenticated,
}

/// Events that move the session between phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Startup read of the token store finished
    Restored(Option<Identity>),
    LoggedIn(Identity),
    LoggedOut,
}

/// Pure transition function. A new identity always replaces the old one.
pub fn reduce(_state: &SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::Restored(Some(identity)) | SessionEvent::LoggedIn(identity) => {
            SessionState::authenticated(identity)
        }
        SessionEvent::Restored(None) | SessionEvent::LoggedOut => SessionState::unauthenticated(),
    }
}

/// Where the UI should go after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Protected root view
    Home,
    Login,
}

impl Navigation {
    pub fn path(self) -> &'static str {
        match self {
            Navigation::Home => "/",
            Navigation::Login => "/login",
        }
    }
}

/// Result of a session operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub navigate: Option<Navigation>,
}

/// Handle returned by [`Session::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&SessionState) + Send + Sync>;

/// The per-tab session: owns the token store and the derived identity
///
/// This is the only writer of the store. Operations apply in call order, so
/// when two logins race the one that completes last wins.
pub struct Session<S: TokenStore> {
    store: S,
    state: SessionState,
    bootstrapped: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::bootstrapping(),
            bootstrapped: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a listener called with the new state after every transition
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&SessionState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    /// Restore the session from the token store. Runs once; later calls
    /// return the current state untouched.
    pub fn bootstrap(&mut self, now: i64) -> &SessionState {
        if self.bootstrapped {
            return &self.state;
        }
        self.bootstrapped = true;

        let identity = match self.store.get() {
            None => None,
            Some(token) => match decode_at(&token, now) {
                Ok(decoded) => Some(decoded.identity),
                Err(e) => {
                    leptos::logging::warn!("Discarding stored token: {}", e);
                    self.store.clear();
                    None
                }
            },
        };

        tracing::debug!(authenticated = identity.is_some(), "session restored");
        self.apply(SessionEvent::Restored(identity));
        &self.state
    }

    /// Accept a freshly issued token
    ///
    /// A malformed token leaves the existing session and stored token alone.
    /// An expired token is reported as an error and also ends the session,
    /// so the store is empty afterwards.
    pub fn login(&mut self, token: &str, now: i64) -> Result<Transition, DecodeError> {
        match decode_at(token, now) {
            Ok(decoded) => {
                // A settled login also settles bootstrap; a late restore must not override it.
                self.bootstrapped = true;
                self.store.set(token);
                tracing::debug!(subject = %decoded.identity.subject_id, "session authenticated");
                self.apply(SessionEvent::LoggedIn(decoded.identity));
                Ok(Transition {
                    state: self.state.clone(),
                    navigate: Some(Navigation::Home),
                })
            }
            Err(e @ DecodeError::Expired { .. }) => {
                leptos::logging::warn!("Rejected login: {}", e);
                self.bootstrapped = true;
                self.store.clear();
                self.apply(SessionEvent::LoggedOut);
                Err(e)
            }
            Err(e) => {
                leptos::logging::warn!("Rejected login: {}", e);
                Err(e)
            }
        }
    }

    /// End the session unconditionally
    pub fn logout(&mut self) -> Transition {
        self.bootstrapped = true;
        self.store.clear();
        tracing::debug!("session ended");
        self.apply(SessionEvent::LoggedOut);
        Transition {
            state: self.state.clone(),
            navigate: Some(Navigation::Login),
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        self.state = reduce(&self.state, event);
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }
}
