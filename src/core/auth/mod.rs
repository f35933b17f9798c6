//! Token acquisition
//!
//! Two paths end in `Session::login`:
//! - Provider sign-in: the OAuth redirect callback carrying `?token=` or an
//!   in-page credential (`callback`)
//! - Email/password login and registration against the backend (`exchange`)

pub mod callback;
pub mod exchange;

pub use callback::{CallbackOutcome, callback_token, handle_callback, handle_credential};
pub use exchange::{
    AuthClient, AuthTransport, CredentialOp, ErrorDetail, ExchangeError, GlooTransport, HttpReply,
    LoginRequest, RegisterRequest, TokenResponse, interpret_response,
};
