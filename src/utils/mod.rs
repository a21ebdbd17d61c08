pub mod validation;
pub mod wire_names;

pub use validation::{TranslateFn, Translator, Validator};
pub use wire_names::{FieldResolver, WireField, WireNames};
