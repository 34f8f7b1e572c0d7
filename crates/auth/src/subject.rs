use staticperm_core::{AuthorizationError, Permission};

/// The authorization oracle: answers whether the current caller holds a
/// permission string.
///
/// Implementations must be safe to call from several threads at once.
pub trait Subject: Send + Sync {
    fn is_permitted(&self, permission: &Permission) -> bool;

    /// Fail-fast form of [`is_permitted`](Self::is_permitted).
    fn require_permission(&self, permission: &Permission) -> Result<(), AuthorizationError> {
        if self.is_permitted(permission) {
            Ok(())
        } else {
            Err(AuthorizationError::forbidden(permission.as_str()))
        }
    }
}
