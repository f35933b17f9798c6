//! Provider sign-in handling
//!
//! Two provider flows hand over a token:
//! - the redirect flow sends the browser to `/auth-callback?token=<bearer>`;
//!   a direct visit without the parameter just goes back to the login view
//! - the in-page Google button passes its ID token credential directly

use crate::core::session::{DecodeError, Navigation, Session, TokenStore, Transition};

/// Query parameter carrying the bearer token
pub const TOKEN_PARAM: &str = "token";

/// Extract a non-empty `token` parameter from a raw query string
///
/// Accepts the string with or without its leading `?`. Values are
/// percent-decoded; undecodable values are used as-is.
pub fn callback_token(query: Option<&str>) -> Option<String> {
    let query = query?.trim_start_matches('?');

    query
        .split('&')
        .filter_map(|pair| {
            let mut it = pair.splitn(2, '=');
            let key = it.next()?.trim();
            let value = it.next().unwrap_or_default();
            (key == TOKEN_PARAM).then_some(value)
        })
        .map(|value| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value)
                .map(|v| v.into_owned())
                .unwrap_or(value)
        })
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// What the callback page should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    LoggedIn(Transition),
    /// No token in the URL; the session was not touched
    MissingToken,
    /// The provider's token could not be used
    Rejected(DecodeError),
}

impl CallbackOutcome {
    pub fn navigate(&self) -> Navigation {
        match self {
            CallbackOutcome::LoggedIn(transition) => {
                transition.navigate.unwrap_or(Navigation::Home)
            }
            CallbackOutcome::MissingToken | CallbackOutcome::Rejected(_) => Navigation::Login,
        }
    }
}

/// Complete the redirect flow from the callback URL's query string
pub fn handle_callback<S: TokenStore>(
    session: &mut Session<S>,
    query: Option<&str>,
    now: i64,
) -> CallbackOutcome {
    let token = callback_token(query);
    if token.is_none() {
        tracing::debug!("auth callback without token");
    }
    handle_credential(session, token.as_deref(), now)
}

/// Accept a credential handed over by an in-page provider button
///
/// A blank credential counts as missing and leaves the session alone.
pub fn handle_credential<S: TokenStore>(
    session: &mut Session<S>,
    credential: Option<&str>,
    now: i64,
) -> CallbackOutcome {
    let Some(token) = credential.map(str::trim).filter(|t| !t.is_empty()) else {
        return CallbackOutcome::MissingToken;
    };

    match session.login(token, now) {
        Ok(transition) => CallbackOutcome::LoggedIn(transition),
        Err(e) => CallbackOutcome::Rejected(e),
    }
}
