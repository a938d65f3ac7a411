use std::{error::Error, fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback maximum length applied to string inputs whose catalog entry does
/// not declare one.
pub const DEFAULT_STRING_MAX_LENGTH: usize = 255;

/// Kind of transfer job a connector can run.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobType {
    /// Pull data from an external store into the warehouse.
    Import,
    /// Push data from the warehouse into an external store.
    Export,
}

impl JobType {
    /// Canonical wire/display name of the job type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Import => "IMPORT",
            Self::Export => "EXPORT",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JobType {
    type Err = ParseJobTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IMPORT" => Ok(Self::Import),
            "EXPORT" => Ok(Self::Export),
            _ => Err(ParseJobTypeError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseJobTypeError;

impl fmt::Display for ParseJobTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid job type; expected 'import' or 'export'")
    }
}

impl Error for ParseJobTypeError {}

/// Typed payload of a configuration input.
///
/// The catalog wire format tags every input with a `type` string; recognized
/// tags map onto a variant here, and anything else lands in `Unsupported` so
/// one exotic input cannot fail an entire catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// Free-form text. Masked inputs hold credentials and must never be echoed.
    String {
        masked: bool,
        max_length: usize,
        value: Option<String>,
    },
    /// Signed integer value.
    Integer { value: Option<i64> },
    /// Ordered string-to-string properties (e.g. driver options).
    Map {
        entries: Option<IndexMap<String, String>>,
    },
    /// One value out of a fixed set of legal options.
    Enum {
        options: Vec<String>,
        value: Option<String>,
    },
    /// An input type this client does not understand; keeps the raw tag.
    Unsupported { tag: String },
}

/// One typed configuration field within a form.
///
/// Label and help text are not stored inline; `label_key`/`help_key` are
/// resolved against the connector's string bundle at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawInput", into = "RawInput")]
pub struct InputSpec {
    /// Fully qualified field name (e.g. "connection.jdbcUrl").
    pub name: String,
    /// Bundle key for the display label.
    pub label_key: String,
    /// Bundle key for the help text.
    pub help_key: String,
    /// Typed payload and current value.
    pub value: InputValue,
}

impl InputSpec {
    /// Returns true when the input carries no current value.
    pub fn is_empty(&self) -> bool {
        match &self.value {
            InputValue::String { value, .. } => value.is_none(),
            InputValue::Integer { value } => value.is_none(),
            InputValue::Map { entries } => entries.as_ref().is_none_or(IndexMap::is_empty),
            InputValue::Enum { value, .. } => value.is_none(),
            // An unrecognized input still has to reach the display fallback.
            InputValue::Unsupported { .. } => false,
        }
    }

    /// Wire tag of the input type: `STRING`, `INTEGER`, `MAP`, `ENUM`, or the
    /// preserved tag of an unrecognized catalog entry.
    pub fn type_tag(&self) -> &str {
        match &self.value {
            InputValue::String { .. } => "STRING",
            InputValue::Integer { .. } => "INTEGER",
            InputValue::Map { .. } => "MAP",
            InputValue::Enum { .. } => "ENUM",
            InputValue::Unsupported { tag } => tag,
        }
    }
}

/// Wire representation of an input. The `type` tag selects the typed payload;
/// unknown tags degrade to [`InputValue::Unsupported`] instead of erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawInput {
    name: String,
    label_key: String,
    help_key: String,
    r#type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    masked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
}

impl From<RawInput> for InputSpec {
    fn from(raw: RawInput) -> Self {
        let value = match raw.r#type.to_ascii_uppercase().as_str() {
            "STRING" => InputValue::String {
                masked: raw.masked,
                max_length: raw.max_length.unwrap_or(DEFAULT_STRING_MAX_LENGTH),
                value: raw.value.and_then(value_as_string),
            },
            "INTEGER" => InputValue::Integer {
                value: raw.value.as_ref().and_then(Value::as_i64),
            },
            "MAP" => InputValue::Map {
                entries: raw.value.and_then(value_as_entries),
            },
            "ENUM" => InputValue::Enum {
                options: raw.options,
                value: raw.value.and_then(value_as_string),
            },
            _ => InputValue::Unsupported { tag: raw.r#type },
        };

        InputSpec {
            name: raw.name,
            label_key: raw.label_key,
            help_key: raw.help_key,
            value,
        }
    }
}

impl From<InputSpec> for RawInput {
    fn from(input: InputSpec) -> Self {
        let (r#type, masked, max_length, options, value) = match input.value {
            InputValue::String {
                masked,
                max_length,
                value,
            } => (
                "STRING".to_string(),
                masked,
                Some(max_length),
                Vec::new(),
                value.map(Value::String),
            ),
            InputValue::Integer { value } => ("INTEGER".to_string(), false, None, Vec::new(), value.map(Value::from)),
            InputValue::Map { entries } => (
                "MAP".to_string(),
                false,
                None,
                Vec::new(),
                entries.map(|entries| Value::Object(entries.into_iter().map(|(k, v)| (k, Value::String(v))).collect())),
            ),
            InputValue::Enum { options, value } => ("ENUM".to_string(), false, None, options, value.map(Value::String)),
            InputValue::Unsupported { tag } => (tag, false, None, Vec::new(), None),
        };

        RawInput {
            name: input.name,
            label_key: input.label_key,
            help_key: input.help_key,
            r#type,
            masked,
            max_length,
            options,
            value,
        }
    }
}

fn value_as_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn value_as_entries(value: Value) -> Option<IndexMap<String, String>> {
    let object = match value {
        Value::Object(object) => object,
        _ => return None,
    };
    Some(
        object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect(),
    )
}

/// A named, ordered group of configuration inputs representing one
/// configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    /// Raw form name (e.g. "connection").
    pub name: String,
    /// Bundle key for the display label.
    pub label_key: String,
    /// Bundle key for the help text.
    pub help_key: String,
    /// Ordered input fields belonging to this form.
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
}

/// Aggregate form metadata for one connector: the connection form list plus
/// the per-job-type form lists, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorMetadata {
    /// Unique connector name (e.g. "jdbc").
    pub name: String,
    /// Connector version string as published in the catalog.
    #[serde(default)]
    pub version: String,
    /// Forms describing how to reach the external store.
    #[serde(default)]
    pub connection_forms: Vec<FormSpec>,
    /// Form lists keyed by supported job type; iteration order is the order
    /// the catalog declared them in.
    #[serde(default)]
    pub job_forms: IndexMap<JobType, Vec<FormSpec>>,
}

impl ConnectorMetadata {
    /// Job types this connector supports, in catalog order.
    pub fn supported_job_types(&self) -> impl Iterator<Item = JobType> + '_ {
        self.job_forms.keys().copied()
    }

    /// Form list for a job type, when the connector supports it.
    pub fn forms_for(&self, job_type: JobType) -> Option<&[FormSpec]> {
        self.job_forms.get(&job_type).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_input_defaults() {
        let json = r#"{
            "name": "connection.host",
            "label_key": "connection.host.label",
            "help_key": "connection.host.help",
            "type": "STRING"
        }"#;

        let input: InputSpec = serde_json::from_str(json).expect("deserialize InputSpec");
        assert_eq!(input.name, "connection.host");
        assert!(input.is_empty());
        assert_eq!(input.type_tag(), "STRING");
        match &input.value {
            InputValue::String {
                masked,
                max_length,
                value,
            } => {
                assert!(!masked);
                assert_eq!(*max_length, DEFAULT_STRING_MAX_LENGTH);
                assert!(value.is_none());
            }
            other => panic!("expected string payload, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_tag_degrades_to_unsupported() {
        let json = r#"{
            "name": "connection.flag",
            "label_key": "connection.flag.label",
            "help_key": "connection.flag.help",
            "type": "BOOLEAN",
            "value": true
        }"#;

        let input: InputSpec = serde_json::from_str(json).expect("deserialize InputSpec");
        assert_eq!(input.value, InputValue::Unsupported { tag: "BOOLEAN".to_string() });
        assert_eq!(input.type_tag(), "BOOLEAN");
        assert!(!input.is_empty(), "unsupported inputs must reach the display fallback");
    }

    #[test]
    fn input_round_trip_preserves_wire_shape() {
        let json = r#"{
            "name": "connection.jdbcProperties",
            "label_key": "connection.jdbcProperties.label",
            "help_key": "connection.jdbcProperties.help",
            "type": "MAP",
            "value": {"a": "1", "b": "2"}
        }"#;

        let input: InputSpec = serde_json::from_str(json).expect("deserialize InputSpec");
        match &input.value {
            InputValue::Map { entries: Some(entries) } => {
                let pairs: Vec<_> = entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                assert_eq!(pairs, vec![("a", "1"), ("b", "2")], "catalog order preserved");
            }
            other => panic!("expected map payload, got {other:?}"),
        }

        let back = serde_json::to_string(&input).expect("serialize InputSpec");
        let again: InputSpec = serde_json::from_str(&back).expect("round-trip deserialize");
        assert_eq!(again, input);
    }

    #[test]
    fn empty_map_counts_as_empty() {
        let input = InputSpec {
            name: "job.options".to_string(),
            label_key: "job.options.label".to_string(),
            help_key: "job.options.help".to_string(),
            value: InputValue::Map {
                entries: Some(IndexMap::new()),
            },
        };
        assert!(input.is_empty());
    }

    #[test]
    fn job_type_names_and_parsing() {
        assert_eq!(JobType::Import.to_string(), "IMPORT");
        assert_eq!(JobType::Export.to_string(), "EXPORT");
        assert_eq!("import".parse::<JobType>(), Ok(JobType::Import));
        assert_eq!("EXPORT".parse::<JobType>(), Ok(JobType::Export));
        assert_eq!("sync".parse::<JobType>(), Err(ParseJobTypeError));
    }

    #[test]
    fn connector_metadata_keeps_job_type_order() {
        let json = r#"{
            "name": "jdbc",
            "version": "1.0.0",
            "connection_forms": [{
                "name": "connection",
                "label_key": "connection.label",
                "help_key": "connection.help"
            }],
            "job_forms": {
                "IMPORT": [],
                "EXPORT": []
            }
        }"#;

        let metadata: ConnectorMetadata = serde_json::from_str(json).expect("deserialize ConnectorMetadata");
        assert_eq!(metadata.name, "jdbc");
        assert_eq!(metadata.connection_forms.len(), 1);
        let job_types: Vec<_> = metadata.supported_job_types().collect();
        assert_eq!(job_types, vec![JobType::Import, JobType::Export]);
        assert!(metadata.forms_for(JobType::Import).is_some());
    }
}
