/// Declares a typed permission accessor for a domain type.
///
/// ```ignore
/// static_permissions! {
///     pub struct RepositoryPermissions for Repository {
///         type_id: "repositories",
///         item_actions: [read, modify, delete],
///         global_actions: [create],
///         allow_custom_item: true,
///         allow_custom_global: true,
///     }
/// }
///
/// let permissions = RepositoryPermissions::new([
///     GuardBinding::for_action("delete", Guard::new(LockedGuard)),
/// ])?;
/// permissions.delete(&subject).is_permitted("1234");
/// permissions.create(&subject).check()?;
/// ```
///
/// Every item action becomes a method returning a
/// [`PermissionActionCheck`](crate::PermissionActionCheck), every global
/// action one returning a [`PermissionCheck`](crate::PermissionCheck).
/// `custom` and `custom_item` are always generated and fail with
/// [`SchemaError::CustomActionsDisabled`](crate::SchemaError) unless the
/// corresponding flag is set.
#[macro_export]
macro_rules! static_permissions {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident for $object:ty {
            type_id: $type_id:literal,
            item_actions: [$($item_action:ident),* $(,)?],
            global_actions: [$($global_action:ident),* $(,)?],
            allow_custom_item: $custom_item:literal,
            allow_custom_global: $custom_global:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            surface: $crate::PermissionSurface<$object>,
        }

        impl $name {
            pub const TYPE_ID: &'static str = $type_id;

            /// The declared catalog, without guards.
            pub fn declaration() -> $crate::ModelBuilder<$crate::Guard<$object>> {
                $crate::ModelBuilder::<$crate::Guard<$object>>::new(Self::TYPE_ID)
                    $(.item_action(stringify!($item_action)))*
                    $(.global_action(stringify!($global_action)))*
                    .allow_custom_item($custom_item)
                    .allow_custom_global($custom_global)
            }

            /// Builds the accessor with the given guard bindings, in
            /// registration order.
            pub fn new<I>(guards: I) -> ::core::result::Result<Self, $crate::SchemaError>
            where
                I: ::core::iter::IntoIterator<Item = $crate::GuardBinding<$crate::Guard<$object>>>,
            {
                let builder = guards
                    .into_iter()
                    .fold(Self::declaration(), |builder, binding| builder.bind(binding));
                ::core::result::Result::Ok(Self {
                    surface: $crate::PermissionSurface::new(builder.build()?),
                })
            }

            pub fn surface(&self) -> &$crate::PermissionSurface<$object> {
                &self.surface
            }

            $(
                pub fn $item_action<'a>(
                    &self,
                    subject: &'a dyn $crate::Subject,
                ) -> $crate::PermissionActionCheck<'a, $object> {
                    self.surface.declared_item(subject, stringify!($item_action))
                }
            )*

            $(
                pub fn $global_action<'a>(
                    &self,
                    subject: &'a dyn $crate::Subject,
                ) -> $crate::PermissionCheck<'a, $object> {
                    self.surface.declared_global(subject, stringify!($global_action))
                }
            )*

            pub fn custom<'a>(
                &self,
                subject: &'a dyn $crate::Subject,
                action: &str,
            ) -> ::core::result::Result<$crate::PermissionCheck<'a, $object>, $crate::SchemaError> {
                self.surface.custom(subject, action)
            }

            pub fn custom_item<'a>(
                &self,
                subject: &'a dyn $crate::Subject,
                action: &str,
            ) -> ::core::result::Result<$crate::PermissionActionCheck<'a, $object>, $crate::SchemaError> {
                self.surface.custom_item(subject, action)
            }
        }
    };
}
