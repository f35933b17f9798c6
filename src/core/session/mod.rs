//! Client session core
//!
//! This module derives the signed-in identity from a stored bearer token and
//! gates protected views on it:
//! - Token persistence (`store`)
//! - Payload decoding without signature verification (`identity`)
//! - The session state machine (`machine`)
//! - Route protection decisions (`guard`)

pub mod guard;
pub mod identity;
pub mod machine;
pub mod store;

#[cfg(feature = "hydrate")]
pub use store::LocalStorageTokenStore;
pub use guard::{RouteDecision, guard};
pub use identity::{DecodeError, DecodedToken, Identity, decode, decode_at};
pub use machine::{
    Navigation, Session, SessionEvent, SessionPhase, SessionState, SubscriptionId, Transition,
    reduce,
};
pub use store::{DEFAULT_STORAGE_KEY, MemoryTokenStore, TokenStore, bearer_header};
