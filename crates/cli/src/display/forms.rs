//! Console rendering of connector forms.
//!
//! Three views over the same model: the bulk framework-metadata listing, the
//! per-form metadata dump, and the current-value view. All of them write
//! line-oriented text to an injected sink and resolve every label and help
//! key through the connector's string bundle; a missing key aborts the render
//! with the lookup error.
//!
//! Indentation encodes nesting: two spaces for framework-level lines and form
//! labels, four for form headers and value lines, six for form fields and
//! map entries, eight for input metadata fields.

use std::io::{self, Write};
use std::ops::ControlFlow;

use hauler_types::{ConnectorMetadata, FormSpec, InputValue};
use hauler_util::{BundleError, StringBundle};
use thiserror::Error;

/// Error raised while rendering forms.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// A label or help key was absent from the string bundle.
    #[error(transparent)]
    Bundle(#[from] BundleError),
    /// The output sink rejected a write.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Prints a connector's supported job types, then the metadata of its
/// connection forms, then the metadata of every job type's forms, in catalog
/// order.
pub fn render_framework_metadata(out: &mut impl Write, metadata: &ConnectorMetadata, bundle: &StringBundle) -> Result<(), DisplayError> {
    let job_types: Vec<&str> = metadata.supported_job_types().map(|job_type| job_type.name()).collect();
    writeln!(out, "  Supported job types: [{}]", job_types.join(", "))?;

    render_forms_metadata(out, &metadata.connection_forms, "Connection", bundle)?;

    for (job_type, forms) in &metadata.job_forms {
        writeln!(out, "  Forms for job type {job_type}:")?;
        render_forms_metadata(out, forms, "Job", bundle)?;
    }

    Ok(())
}

/// Dumps form and input metadata, 1-indexed, without any current values.
///
/// String inputs additionally report their mask flag and maximum length;
/// enum inputs report their legal values. Values themselves never appear
/// here, masked or not.
pub fn render_forms_metadata(out: &mut impl Write, forms: &[FormSpec], section_label: &str, bundle: &StringBundle) -> Result<(), DisplayError> {
    for (form_index, form) in forms.iter().enumerate() {
        writeln!(out, "    {section_label} form {}:", form_index + 1)?;
        writeln!(out, "      Name: {}", form.name)?;
        writeln!(out, "      Label: {}", bundle.lookup(&form.label_key)?)?;
        writeln!(out, "      Help: {}", bundle.lookup(&form.help_key)?)?;

        for (input_index, input) in form.inputs.iter().enumerate() {
            writeln!(out, "      Input {}:", input_index + 1)?;
            writeln!(out, "        Name: {}", input.name)?;
            writeln!(out, "        Label: {}", bundle.lookup(&input.label_key)?)?;
            writeln!(out, "        Help: {}", bundle.lookup(&input.help_key)?)?;
            writeln!(out, "        Type: {}", input.type_tag())?;
            match &input.value {
                InputValue::String { masked, max_length, .. } => {
                    writeln!(out, "        Mask: {masked}")?;
                    writeln!(out, "        Size: {max_length}")?;
                }
                InputValue::Enum { options, .. } => {
                    writeln!(out, "        Possible values: {}", options.join(","))?;
                }
                InputValue::Integer { .. } | InputValue::Map { .. } | InputValue::Unsupported { .. } => {}
            }
        }
    }

    Ok(())
}

/// Renders each form's current values, one labeled line per input. Empty
/// inputs end their line right after the label.
///
/// Hitting an input type this client does not understand prints the
/// documented fallback line and terminates the whole render: nothing further
/// is written for the current form or any later form, and the call still
/// returns `Ok`.
pub fn render_forms(out: &mut impl Write, forms: &[FormSpec], bundle: &StringBundle) -> Result<(), DisplayError> {
    for form in forms {
        if render_form(out, form, bundle)?.is_break() {
            break;
        }
    }
    Ok(())
}

fn render_form(out: &mut impl Write, form: &FormSpec, bundle: &StringBundle) -> Result<ControlFlow<()>, DisplayError> {
    writeln!(out, "  {}", bundle.lookup(&form.label_key)?)?;

    for input in &form.inputs {
        write!(out, "    {}: ", bundle.lookup(&input.label_key)?)?;
        if !input.is_empty() {
            match &input.value {
                InputValue::String { masked, value, .. } => {
                    if *masked {
                        write!(out, "(This input is sensitive)")?;
                    } else if let Some(value) = value {
                        write!(out, "{value}")?;
                    }
                }
                InputValue::Integer { value } => {
                    if let Some(value) = value {
                        write!(out, "{value}")?;
                    }
                }
                InputValue::Map { entries } => {
                    if let Some(entries) = entries {
                        for (key, value) in entries {
                            write!(out, "\n      {key} = {value}")?;
                        }
                    }
                }
                InputValue::Enum { value, .. } => {
                    if let Some(value) = value {
                        write!(out, "{value}")?;
                    }
                }
                InputValue::Unsupported { tag } => {
                    writeln!(out, "Unsupported data type {tag}")?;
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        writeln!(out)?;
    }

    Ok(ControlFlow::Continue(()))
}
