//! The remembered user.

use crate::user::User;
use crate::AuthError;
use krstore_cache::{Cache, CacheError};

/// Storage key holding the signed-in user.
pub const USER_KEY: &str = "user";

/// Signed-in state persisted across runs.
#[derive(Debug, Clone)]
pub struct AuthSession {
    cache: Cache,
}

impl AuthSession {
    /// Create a session over `cache`.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// The signed-in user, if any.
    ///
    /// An unreadable stored value counts as signed out.
    pub fn current(&self) -> Result<Option<User>, AuthError> {
        match self.cache.get::<User>(USER_KEY) {
            Ok(user) => Ok(user),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(error = %e, "ignoring unreadable stored user");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remember `user` as signed in.
    pub fn login(&self, user: &User) -> Result<(), AuthError> {
        self.cache.set(USER_KEY, user)?;
        tracing::debug!(email = %user.email, "signed in");
        Ok(())
    }

    /// Forget the signed-in user. Returns whether one was signed in.
    pub fn logout(&self) -> Result<bool, AuthError> {
        let existed = self.cache.exists(USER_KEY)?;
        if existed {
            self.cache.delete(USER_KEY)?;
            tracing::debug!("signed out");
        }
        Ok(existed)
    }

    /// Whether someone is signed in.
    pub fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.current()?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let session = AuthSession::new(Cache::in_memory());
        assert!(session.current().unwrap().is_none());

        let user = User::new("sokha", "sokha@example.com");
        session.login(&user).unwrap();
        assert_eq!(session.current().unwrap(), Some(user));
        assert!(session.is_authenticated().unwrap());

        assert!(session.logout().unwrap());
        assert!(!session.logout().unwrap());
        assert!(session.current().unwrap().is_none());
    }

    #[test]
    fn test_stored_shape() {
        let cache = Cache::in_memory();
        AuthSession::new(cache.clone())
            .login(&User::new("a", "a@b.c"))
            .unwrap();
        let raw = cache.get_raw(USER_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"name":"a","email":"a@b.c"}"#);
    }

    #[test]
    fn test_corrupt_user_is_signed_out() {
        let cache = Cache::in_memory();
        cache.set_raw(USER_KEY, "{not json").unwrap();
        let session = AuthSession::new(cache);
        assert!(session.current().unwrap().is_none());
    }

    #[test]
    fn test_shared_with_other_keys() {
        let cache = Cache::in_memory();
        cache.set_raw("cart", "[]").unwrap();
        let session = AuthSession::new(cache.clone());
        session.login(&User::new("a", "a@b.c")).unwrap();
        session.logout().unwrap();
        assert_eq!(cache.get_raw("cart").unwrap().as_deref(), Some("[]"));
    }
}
