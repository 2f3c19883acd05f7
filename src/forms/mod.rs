pub mod layout;
pub mod render;
pub mod session;
pub mod values;

pub use render::{render, RenderRequest};
pub use session::{ControlKind, FieldContext, MappingFormSession};
pub use values::{
    capture, coerce, encode_date, extract, parse_date, validate, CapturedField, RawValue,
    TypedValue, ValidationFailure,
};
