//! Domain-item contract: anything that can be the target of an item-scoped check.

use std::borrow::Cow;

/// A domain item with a stable identifier.
///
/// An absent identifier is rendered as the empty string when permission
/// strings are built (see [`PermissionObject::permission_id`]).
pub trait PermissionObject {
    /// Returns the item identifier, if the item has one.
    fn id(&self) -> Option<Cow<'_, str>>;

    /// Identifier normalized for use in permission strings.
    fn permission_id(&self) -> Cow<'_, str> {
        self.id().unwrap_or(Cow::Borrowed(""))
    }
}

impl<T: PermissionObject + ?Sized> PermissionObject for &T {
    fn id(&self) -> Option<Cow<'_, str>> {
        (**self).id()
    }
}
