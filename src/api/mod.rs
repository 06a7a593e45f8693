pub mod nullable;
pub mod validation;

pub use nullable::nullable;
pub use validation::{field_errors, ValidatedJson};
