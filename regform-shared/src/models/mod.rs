//! Data model of the registration form.

pub mod feedback;
pub mod field;

pub use feedback::{Verdict, VisualState};
pub use field::FieldId;
