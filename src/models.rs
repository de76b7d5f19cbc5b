// src/models.rs

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::core::config_loader::scalar_to_string;

/// Accepts any YAML scalar (`42`, `true`, `"text"`) where text is expected.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => scalar_to_string(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom("expected a scalar value")),
    }
}

// --- `config.yaml` MODELS (What is read from the configuration file) ---

/// The `globals` region of the configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalsConfig {
    /// Author name exposed to templates as `full_name`.
    #[serde(default, alias = "fullname")]
    pub full_name: Option<String>,
    /// Informational; not exposed to templates.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Informational; not exposed to templates.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Default permission bits for rendered files (e.g. `"0644"`).
    #[serde(default)]
    pub permissions: Option<Permissions>,
}

/// A template registered under `commands.templates.create`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TemplateSpec {
    /// Source file. May contain `$VAR`, `${VAR}` or `%VAR%`.
    pub filepath: String,
    /// Where and under which name the file is created.
    pub target: TargetSpec,
    /// Extra values for the template.
    #[serde(default)]
    pub namespace: Option<NamespaceSpec>,
}

/// The `target` section of a template.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSpec {
    /// Target directory. Same expansion rules as `TemplateSpec::filepath`.
    pub path: String,
    /// Template text placed before the basename.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Template text placed after the basename.
    #[serde(default)]
    pub suffix: Option<String>,
    /// Mode for the rendered file. Overrides `globals.permissions`.
    #[serde(default)]
    pub permissions: Option<Permissions>,
}

/// The optional, composable namespace sources of a template.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct NamespaceSpec {
    /// Fixed values.
    #[serde(default)]
    pub predefined: Option<serde_yaml::Mapping>,
    /// Values selected from a data set by key.
    #[serde(default)]
    pub keyed_set: Option<KeyedSetSpec>,
    /// Values asked from the user, in order.
    #[serde(default)]
    pub prompt_for: Vec<PromptSpec>,
}

/// A data set of mappings, one of which is merged into the namespace.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct KeyedSetSpec {
    /// The entries, inline or at a remote address.
    pub set_data: SetData,
    /// Key used when the caller does not supply one.
    #[serde(default, deserialize_with = "scalar_text")]
    pub key: Option<String>,
    /// Question asked when no key is given or configured.
    #[serde(default, deserialize_with = "scalar_text")]
    pub key_prompt: Option<String>,
}

/// A keyed data set is either inline or fetched from an address.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SetData {
    Remote(String),
    Inline(serde_yaml::Mapping),
}

/// One `prompt_for` question.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptSpec {
    /// Namespace key the answer is stored under. Entries without one are skipped.
    #[serde(default, deserialize_with = "scalar_text")]
    pub var_name: Option<String>,
    /// Question text. Defaults to `Value for <var_name>`.
    #[serde(default, deserialize_with = "scalar_text")]
    pub prompt: Option<String>,
    /// Answer used when the user enters nothing.
    #[serde(default, deserialize_with = "scalar_text")]
    pub default: Option<String>,
}

/// Permission bits written in octal, either as `"0755"` or as a bare `755`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Permissions {
    Text(String),
    Digits(u32),
}

impl Permissions {
    /// Interprets the configured digits as an octal mode.
    pub fn mode(&self) -> Option<u32> {
        let digits = match self {
            Self::Text(s) => s.trim().trim_start_matches("0o").to_string(),
            Self::Digits(n) => n.to_string(),
        };
        u32::from_str_radix(&digits, 8).ok().filter(|m| *m <= 0o7777)
    }
}
