//! Terminal presentation of connector forms.

pub mod forms;

pub use forms::{DisplayError, render_forms, render_forms_metadata, render_framework_metadata};
