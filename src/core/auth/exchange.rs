//! Credential exchange against the backend auth endpoints
//!
//! Posts email/password (and optionally a display name) to
//! `{api_base}/auth/login` or `{api_base}/auth/register` and turns the reply
//! into a bearer token. A successful exchange is handed to the session; a
//! failed one is returned to the form and never touches the session.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::core::config::ClientConfig;
use crate::core::session::{DecodeError, Transition};

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>, name: &str) -> Self {
        let name = name.trim();
        Self {
            email: email.into(),
            password: password.into(),
            name: (!name.is_empty()).then(|| name.to_string()),
        }
    }
}

/// Successful exchange response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Error response body. FastAPI sends a string for handled errors and a list
/// of `{loc, msg, type}` objects for validation failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorDetail {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("\n"))
            }
            _ => None,
        }
    }
}

/// Which credential operation is being performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialOp {
    Login,
    Register,
}

impl CredentialOp {
    pub fn url(self, config: &ClientConfig) -> String {
        match self {
            CredentialOp::Login => config.login_url(),
            CredentialOp::Register => config.register_url(),
        }
    }

    /// Shown when the server rejects the request without a message
    pub fn rejected_message(self) -> &'static str {
        match self {
            CredentialOp::Login => "ログインに失敗しました。",
            CredentialOp::Register => "アカウント登録に失敗しました。",
        }
    }

    /// Shown when the request never produced a usable response
    pub fn network_message(self) -> &'static str {
        match self {
            CredentialOp::Login => "ログイン中にエラーが発生しました。",
            CredentialOp::Register => "登録中にエラーが発生しました。",
        }
    }
}

/// Credential exchange errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Credentials rejected ({status}): {message}")]
    CredentialRejected { status: u16, message: String },

    #[error("Response did not contain an access token")]
    MissingToken,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ExchangeError {
    /// Text to display inline in the form
    pub fn user_message(&self, op: CredentialOp) -> String {
        match self {
            ExchangeError::CredentialRejected { message, .. } => message.clone(),
            ExchangeError::Network(_) => op.network_message().to_string(),
            ExchangeError::MissingToken | ExchangeError::Decode(_) => {
                op.rejected_message().to_string()
            }
        }
    }
}

/// Raw HTTP reply as seen by the exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends JSON POST requests to the auth backend
pub trait AuthTransport {
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpReply, ExchangeError>>;
}

/// Browser `fetch` transport
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl AuthTransport for GlooTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpReply, ExchangeError> {
        let response = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(|e| ExchangeError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ExchangeError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::Network(e.to_string()))?;

        Ok(HttpReply { status, body })
    }
}

/// Turn an auth endpoint reply into a token or a displayable error
pub fn interpret_response(reply: &HttpReply, op: CredentialOp) -> Result<String, ExchangeError> {
    if reply.is_success() {
        return serde_json::from_str::<TokenResponse>(&reply.body)
            .ok()
            .and_then(|r| r.access_token)
            .filter(|token| !token.is_empty())
            .ok_or(ExchangeError::MissingToken);
    }

    let message = serde_json::from_str::<ErrorDetail>(&reply.body)
        .ok()
        .and_then(|e| e.message())
        .unwrap_or_else(|| op.rejected_message().to_string());

    Err(ExchangeError::CredentialRejected {
        status: reply.status,
        message,
    })
}

/// Client for the credential login/registration endpoints
#[derive(Debug, Clone)]
pub struct AuthClient<T: AuthTransport> {
    config: ClientConfig,
    transport: T,
}

impl<T: AuthTransport> AuthClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST credentials and return the issued token without touching any session
    pub async fn request_token(
        &self,
        op: CredentialOp,
        body: serde_json::Value,
    ) -> Result<String, ExchangeError> {
        let url = op.url(&self.config);
        tracing::debug!(%url, "exchanging credentials");

        let reply = self.transport.post_json(&url, &body).await?;
        let result = interpret_response(&reply, op);
        if let Err(ref e) = result {
            leptos::logging::warn!("Credential exchange failed: {}", e);
        }
        result
    }

    /// Exchange credentials and hand the issued token to `accept`
    ///
    /// `accept` is where the token enters the session. It only runs after a
    /// successful reply, so a rejected or failed exchange never touches the
    /// session.
    pub async fn sign_in<F>(
        &self,
        op: CredentialOp,
        request: &impl Serialize,
        accept: F,
    ) -> Result<Transition, ExchangeError>
    where
        F: FnOnce(&str) -> Result<Transition, DecodeError>,
    {
        let token = self.request_token(op, to_body(request)?).await?;
        Ok(accept(&token)?)
    }
}

fn to_body(request: &impl Serialize) -> Result<serde_json::Value, ExchangeError> {
    serde_json::to_value(request).map_err(|e| ExchangeError::Network(e.to_string()))
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testutil::ScriptedTransport;
    use super::*;
    use crate::core::session::identity::testutil::mint;
    use crate::core::session::{MemoryTokenStore, Navigation, Session, SessionState, TokenStore};

    const NOW: i64 = 1_700_000_000;

    fn client(reply: Result<HttpReply, ExchangeError>) -> AuthClient<ScriptedTransport> {
        AuthClient::new(ClientConfig::default(), ScriptedTransport::replying(reply))
    }

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "a@b.com".to_string(),
            password: "hunter22".to_string(),
        }
    }

    fn token_body(token: &str) -> String {
        json!({"access_token": token, "token_type": "bearer"}).to_string()
    }

    // ========================================================================
    // Response interpretation
    // ========================================================================

    #[test]
    fn test_interpret_success() {
        let reply = HttpReply::new(200, token_body("T"));
        assert_eq!(interpret_response(&reply, CredentialOp::Login), Ok("T".to_string()));
    }

    #[test]
    fn test_interpret_success_without_token() {
        for body in ["{}", r#"{"access_token":""}"#, "not json"] {
            let reply = HttpReply::new(200, body);
            assert_eq!(
                interpret_response(&reply, CredentialOp::Login),
                Err(ExchangeError::MissingToken)
            );
        }
    }

    #[test]
    fn test_interpret_rejection_with_detail() {
        let reply = HttpReply::new(409, r#"{"detail":"email taken"}"#);

        let err = interpret_response(&reply, CredentialOp::Register).unwrap_err();

        assert_eq!(
            err,
            ExchangeError::CredentialRejected {
                status: 409,
                message: "email taken".to_string()
            }
        );
        assert_eq!(err.user_message(CredentialOp::Register), "email taken");
    }

    #[test]
    fn test_interpret_rejection_without_detail() {
        for body in ["{}", "", "<html>Bad Gateway</html>", r#"{"detail":42}"#] {
            let reply = HttpReply::new(502, body);
            let err = interpret_response(&reply, CredentialOp::Login).unwrap_err();
            assert_eq!(err.user_message(CredentialOp::Login), "ログインに失敗しました。");
        }
    }

    #[test]
    fn test_interpret_validation_errors() {
        let body = json!({
            "detail": [
                {"loc": ["body", "email"], "msg": "field required", "type": "value_error"},
                {"loc": ["body", "password"], "msg": "too short", "type": "value_error"}
            ]
        });
        let reply = HttpReply::new(422, body.to_string());

        let err = interpret_response(&reply, CredentialOp::Register).unwrap_err();

        assert_eq!(
            err.user_message(CredentialOp::Register),
            "field required\ntoo short"
        );
    }

    #[test]
    fn test_user_messages() {
        let network = ExchangeError::Network("connection refused".to_string());
        assert_eq!(
            network.user_message(CredentialOp::Login),
            "ログイン中にエラーが発生しました。"
        );
        assert_eq!(
            network.user_message(CredentialOp::Register),
            "登録中にエラーが発生しました。"
        );
        assert_eq!(
            ExchangeError::MissingToken.user_message(CredentialOp::Register),
            "アカウント登録に失敗しました。"
        );
    }

    // ========================================================================
    // Request bodies
    // ========================================================================

    #[test]
    fn test_register_request_omits_blank_name() {
        let request = RegisterRequest::new("a@b.com", "pw", "  ");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"email": "a@b.com", "password": "pw"})
        );

        let request = RegisterRequest::new("a@b.com", "pw", " Hanako ");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"email": "a@b.com", "password": "pw", "name": "Hanako"})
        );
    }

    // ========================================================================
    // End-to-end with a session
    // ========================================================================

    #[tokio::test]
    async fn test_sign_in_matches_direct_login() {
        let token = mint(json!({"sub": "u1", "email": "a@b.com"}));
        let client = client(Ok(HttpReply::new(200, token_body(&token))));
        let store = MemoryTokenStore::new();
        let mut via_exchange = Session::new(store.clone());
        let mut direct = Session::new(MemoryTokenStore::new());

        let exchanged = client
            .sign_in(CredentialOp::Login, &login_request(), |t| {
                via_exchange.login(t, NOW)
            })
            .await
            .unwrap();
        let expected = direct.login(&token, NOW).unwrap();

        assert_eq!(exchanged, expected);
        assert_eq!(exchanged.navigate, Some(Navigation::Home));
        assert_eq!(store.get(), direct.store().get());

        let requests = client.transport.requests.borrow();
        assert_eq!(requests[0].0, "http://localhost:8000/auth/login");
        assert_eq!(
            requests[0].1,
            json!({"email": "a@b.com", "password": "hunter22"})
        );
    }

    #[tokio::test]
    async fn test_rejected_register_leaves_session_unchanged() {
        let existing = mint(json!({"sub": "u1", "email": "a@b.com"}));
        let store = MemoryTokenStore::new();
        let mut session = Session::new(store.clone());
        session.login(&existing, NOW).unwrap();
        let before = session.state().clone();
        let client = client(Ok(HttpReply::new(409, r#"{"detail":"email taken"}"#)));
        let mut accepted = false;

        let err = client
            .sign_in(
                CredentialOp::Register,
                &RegisterRequest::new("a@b.com", "pw", "Hanako"),
                |t| {
                    accepted = true;
                    session.login(t, NOW)
                },
            )
            .await
            .unwrap_err();

        assert!(!accepted);
        assert_eq!(err.user_message(CredentialOp::Register), "email taken");
        assert_eq!(*session.state(), before);
        assert_eq!(store.get(), Some(existing));
        assert_eq!(
            client.transport.requests.borrow()[0].0,
            "http://localhost:8000/auth/register"
        );
    }

    #[tokio::test]
    async fn test_network_failure_leaves_session_unchanged() {
        let mut session = Session::new(MemoryTokenStore::new());
        session.bootstrap(NOW);
        let client = client(Err(ExchangeError::Network("offline".to_string())));

        let err = client
            .sign_in(CredentialOp::Login, &login_request(), |t| session.login(t, NOW))
            .await
            .unwrap_err();

        assert!(matches!(err, ExchangeError::Network(_)));
        assert_eq!(*session.state(), SessionState::unauthenticated());
    }

    #[tokio::test]
    async fn test_undecodable_token_surfaces_decode_error() {
        let mut session = Session::new(MemoryTokenStore::new());
        session.bootstrap(NOW);
        let client = client(Ok(HttpReply::new(200, token_body("opaque"))));

        let err = client
            .sign_in(CredentialOp::Login, &login_request(), |t| session.login(t, NOW))
            .await
            .unwrap_err();

        assert!(matches!(err, ExchangeError::Decode(DecodeError::Malformed(_))));
        assert_eq!(err.user_message(CredentialOp::Login), "ログインに失敗しました。");
        assert_eq!(session.store().get(), None);
    }
}
