//! Rendering a spec back to its text form.

pub mod text;

pub use text::{to_spec_string, write_spec};
