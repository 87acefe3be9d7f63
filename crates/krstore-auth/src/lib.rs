//! Authentication module for KR Store.
//!
//! Sign-in and sign-up are mock flows: the form is validated, a [`User`]
//! is derived from it and remembered in the local store. No credential is
//! ever verified or kept.

mod error;
mod session;
mod user;

pub use error::AuthError;
pub use session::{AuthSession, USER_KEY};
pub use user::{sign_in, sign_up, User};
