/// Looks up how a Rust field of a validated type appears on the wire.
pub type FieldResolver = fn(field: &str) -> Option<WireField>;

/// Wire name of one field, plus the resolver of the type it nests, if any.
#[derive(Debug, Clone, Copy)]
pub struct WireField {
    pub name: &'static str,
    pub nested: Option<FieldResolver>,
}

/// Maps Rust field names to the names clients send and receive.
///
/// `validator` keys its errors by Rust identifier, so every type the
/// wrappers decode implements this to keep those identifiers out of
/// messages. Fields without an entry keep their Rust name, so a type with
/// no renames needs only an empty impl. Usually written with
/// [`wire_names!`](crate::wire_names).
pub trait WireNames {
    fn wire_field(_field: &str) -> Option<WireField> {
        None
    }
}

/// Implement [`WireNames`] for a type.
///
/// ```ignore
/// wire_names!(Customer {
///     display_name => "displayName",
///     address => "address" nested Address,
/// });
/// ```
#[macro_export]
macro_rules! wire_names {
    (@nested) => {
        ::core::option::Option::None
    };
    (@nested $nested:ty) => {
        ::core::option::Option::Some(
            <$nested as $crate::utils::WireNames>::wire_field as $crate::utils::FieldResolver,
        )
    };
    ($ty:ty { $($field:ident => $wire:literal $(nested $nested:ty)?),* $(,)? }) => {
        impl $crate::utils::WireNames for $ty {
            fn wire_field(field: &str) -> ::core::option::Option<$crate::utils::WireField> {
                $(
                    if field == stringify!($field) {
                        return ::core::option::Option::Some($crate::utils::WireField {
                            name: $wire,
                            nested: $crate::wire_names!(@nested $($nested)?),
                        });
                    }
                )*
                let _ = field;
                ::core::option::Option::None
            }
        }
    };
}
