use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use serde::{Deserialize, Serialize};

use super::decode::TagDecoder;
use super::error::DecoderError;
use super::scheme::LabelScheme;
use crate::BuiltinScheme;

/// Represents a per-category canonicalization rule
///
/// When a decoded value for `category` contains `pattern` as a
/// case-insensitive substring anywhere, the whole value is replaced by
/// `replacement`. A category carrying a rule becomes required: decoding fails
/// with [`DecoderError::MissingRequiredCategory`] when no token was assigned
/// to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalRule {
    /// The category the rule applies to
    pub category: String,
    /// Substring matched case-insensitively against the decoded value
    pub pattern: String,
    /// Literal that replaces the whole value on a match
    pub replacement: String,
}

impl CanonicalRule {
    /// Creates a new canonicalization rule
    ///
    /// # Example
    /// ```
    /// use wernicke::CanonicalRule;
    ///
    /// let rule = CanonicalRule::new("PLOT_TYPE", "scatter", "scatter");
    /// ```
    pub fn new(
        category: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// A builder for constructing a TagDecoder with a fluent interface.
#[derive(Debug)]
pub struct DecoderBuilder {
    scheme: Option<LabelScheme>,
    continuation_marker: String,
    bracket_chars: Vec<char>,
    rules: HashMap<String, CanonicalRule>,
}

impl Default for DecoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderBuilder {
    /// Creates a new DecoderBuilder with the conventional defaults:
    /// continuation marker `##` and bracket set `(){}[]<>`
    pub fn new() -> Self {
        Self {
            scheme: None,
            continuation_marker: "##".to_string(),
            bracket_chars: "(){}[]<>".chars().collect(),
            rules: HashMap::new(),
        }
    }

    /// Sets the label scheme to one bundled with the library
    pub fn with_scheme(mut self, scheme: BuiltinScheme) -> Result<Self, DecoderError> {
        if self.scheme.is_some() {
            return Err(DecoderError::BuildError("Label scheme already set".to_string()));
        }
        self.scheme = Some(LabelScheme::from_labels(scheme.labels())?);
        Ok(self)
    }

    /// Sets a custom label scheme
    pub fn with_custom_scheme(mut self, scheme: LabelScheme) -> Result<Self, DecoderError> {
        if self.scheme.is_some() {
            return Err(DecoderError::BuildError("Label scheme already set".to_string()));
        }
        self.scheme = Some(scheme);
        Ok(self)
    }

    /// Loads the label scheme from a JSON file holding an array of BIO
    /// notation labels in tag-index order, e.g. `["O", "B-PLOT_TYPE", ...]`
    pub fn with_scheme_from_file(mut self, path: impl AsRef<Path>) -> Result<Self, DecoderError> {
        if self.scheme.is_some() {
            return Err(DecoderError::BuildError("Label scheme already set".to_string()));
        }
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read scheme file {}: {}", path.display(), e);
            DecoderError::BuildError(format!("Failed to read scheme file {}: {}", path.display(), e))
        })?;
        let labels: Vec<String> = serde_json::from_str(&contents).map_err(|e| {
            error!("Failed to parse scheme file {}: {}", path.display(), e);
            DecoderError::BuildError(format!("Failed to parse scheme file {}: {}", path.display(), e))
        })?;

        self.scheme = Some(LabelScheme::from_labels(&labels)?);
        info!("Label scheme loaded successfully from {}", path.display());
        Ok(self)
    }

    /// Sets the prefix that marks a token as a continuation of the previous
    /// surface word. Validated at build time: must not be empty.
    pub fn with_continuation_marker(mut self, marker: impl Into<String>) -> Self {
        self.continuation_marker = marker.into();
        self
    }

    /// Sets the characters removed from every decoded value
    pub fn with_bracket_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.bracket_chars = chars.into_iter().collect();
        self
    }

    /// Validates rule data according to the following rules:
    /// - Category must not be empty
    /// - Pattern must not be empty
    /// - Replacement must not be empty
    ///
    /// # Arguments
    /// * `rule` - The canonicalization rule to validate
    ///
    /// # Returns
    /// * `Ok(())` if validation passes
    /// * `Err(DecoderError::BuildError)` with a descriptive message if validation fails
    fn validate_rule(rule: &CanonicalRule) -> Result<(), DecoderError> {
        if rule.category.is_empty() {
            return Err(DecoderError::BuildError("Rule category cannot be empty".into()));
        }
        if rule.pattern.is_empty() {
            return Err(DecoderError::BuildError(
                format!("Rule for '{}' must have a non-empty pattern", rule.category)
            ));
        }
        if rule.replacement.is_empty() {
            return Err(DecoderError::BuildError(
                format!("Rule for '{}' must have a non-empty replacement", rule.category)
            ));
        }
        Ok(())
    }

    /// Adds a canonicalization rule
    ///
    /// # Arguments
    /// * `rule` - The rule containing category, pattern, and replacement
    ///
    /// # Returns
    /// * `Ok(Self)` if the rule was added successfully
    /// * `Err(DecoderError::BuildError)` if validation fails or the category
    ///   already carries a rule
    ///
    /// # Example
    /// ```
    /// # use wernicke::{TagDecoder, BuiltinScheme, CanonicalRule};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let decoder = TagDecoder::builder()
    ///     .with_scheme(BuiltinScheme::ChartQueries)?
    ///     .add_rule(CanonicalRule::new("PLOT_TYPE", "scatter", "scatter"))?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_rule(mut self, rule: CanonicalRule) -> Result<Self, DecoderError> {
        if self.rules.contains_key(&rule.category) {
            return Err(DecoderError::BuildError(
                format!("Category '{}' already has a rule", rule.category)
            ));
        }

        Self::validate_rule(&rule)?;

        self.rules.insert(rule.category.clone(), rule);
        Ok(self)
    }

    /// Builds the decoder, consuming the builder
    pub fn build(self) -> Result<TagDecoder, DecoderError> {
        let scheme = self
            .scheme
            .ok_or_else(|| DecoderError::BuildError("Label scheme must be set".to_string()))?;

        if self.continuation_marker.is_empty() {
            return Err(DecoderError::BuildError(
                "Continuation marker cannot be empty".to_string(),
            ));
        }

        for category in self.rules.keys() {
            if !scheme.contains_category(category) {
                return Err(DecoderError::BuildError(
                    format!("Rule references category '{}' not defined in the label scheme", category)
                ));
            }
        }

        info!(
            "Decoder built with {} labels and {} rules",
            scheme.len(),
            self.rules.len()
        );

        Ok(TagDecoder {
            scheme: Arc::new(scheme),
            rules: Arc::new(self.rules),
            continuation_marker: self.continuation_marker,
            bracket_chars: self.bracket_chars,
        })
    }
}
