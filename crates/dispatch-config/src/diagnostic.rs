// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config error diagnostics.
//!
//! Turns figment deserialization failures into miette reports: which key
//! went wrong, in which of the three config layers, with a "did you
//! mean" suggestion drawn from the keys the section accepts.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
/// 0.75 catches `kewords` -> `keywords` and `cost_per_mtock` ->
/// `cost_per_mtok` while filtering unrelated names.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key outside the dispatch config schema.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(code(dispatch::config::unknown_key), help("{help}"))]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggestion plus the keys the section accepts.
        help: String,
        /// Where the key appears in the config file, when found.
        #[label("not a dispatch setting")]
        span: Option<SourceSpan>,
        /// The config file the key was found in.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong TOML type for its key.
    #[error("invalid value for `{key}`: {detail}")]
    #[diagnostic(code(dispatch::config::invalid_value), help("expected {expected}"))]
    InvalidValue {
        /// Dotted path of the key.
        key: String,
        /// What was found.
        detail: String,
        /// What the schema expects there.
        expected: String,
    },

    /// A required key is absent.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(dispatch::config::missing_key),
        help("add `{key} = <value>` to your dispatch.toml")
    )]
    MissingKey {
        /// The missing key name.
        key: String,
    },

    /// A semantic constraint violated by otherwise well-formed config.
    #[error("validation error: {message}")]
    #[diagnostic(code(dispatch::config::validation))]
    Validation {
        /// Description of the violated constraint.
        message: String,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(dispatch::config::other))]
    Other(String),
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// `toml_sources` are the `(path, content)` pairs of the config layers
/// that were merged, ordered highest precedence first; unknown keys are
/// located by scanning them directly.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|e| {
            let key_path: Vec<String> = e.path.iter().map(ToString::to_string).collect();
            match &e.kind {
                Kind::UnknownField(field, accepted) => {
                    unknown_key_error(field, accepted, &key_path, toml_sources)
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: field.clone().into_owned(),
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidValue {
                    key: key_path.join("."),
                    detail: format!("found {actual}"),
                    expected: expected.to_string(),
                },
                _ => ConfigError::Other(e.to_string()),
            }
        })
        .collect()
}

/// Build the `UnknownKey` diagnostic for one rejected field.
///
/// The merged layers are scanned in precedence order, so the span points
/// into the file whose value would actually have won: the one the user
/// most likely just edited.
fn unknown_key_error(
    field: &str,
    accepted: &[&str],
    key_path: &[String],
    sources: &[(String, String)],
) -> ConfigError {
    let accepted_list = accepted.join(", ");
    let help = match suggest_key(field, accepted) {
        Some(s) => format!("did you mean `{s}`? this section accepts: {accepted_list}"),
        None => format!("this section accepts: {accepted_list}"),
    };

    for (name, content) in sources {
        if let Some(offset) = key_offset(content, key_path, field) {
            return ConfigError::UnknownKey {
                key: field.to_string(),
                help,
                span: Some(SourceSpan::new(offset.into(), field.len())),
                src: Some(NamedSource::new(name, content.clone())),
            };
        }
    }

    ConfigError::UnknownKey {
        key: field.to_string(),
        help,
        span: None,
        src: None,
    }
}

/// Byte offset of `field` inside the table named by `key_path`.
///
/// The dispatch schema has exactly two table shapes: plain sections
/// (`[router]`, `[stats]`) and arrays of tables (`[[agents]]`,
/// `[[keywords]]`, `[[rules]]`) whose path carries the element index.
fn key_offset(content: &str, key_path: &[String], field: &str) -> Option<usize> {
    let start = match key_path {
        [] => 0,
        [section] => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
        [section, index, ..] => {
            let header = format!("[[{section}]]");
            let nth: usize = index.parse().ok()?;
            let mut pos = 0;
            for _ in 0..=nth {
                pos += content[pos..].find(&header)? + header.len();
            }
            pos
        }
    };

    let mut offset = start;
    for line in content[start..].lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(field)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len() + 1;
    }
    None
}

/// Suggest the closest accepted key by Jaro-Winkler similarity, or
/// `None` when nothing clears the threshold.
pub fn suggest_key(unknown: &str, accepted: &[&str]) -> Option<String> {
    accepted
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}
