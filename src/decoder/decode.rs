use std::collections::HashMap;
use std::sync::Arc;

use super::builder::CanonicalRule;
use super::error::DecoderError;
use super::normalize::{contains_ignore_case, strip_chars};
use super::scheme::{LabelScheme, Tag};

/// A thread-safe decoder turning per-token BIO tag predictions into a mapping
/// from entity category to a normalized text value.
///
/// # Thread Safety
///
/// This type is automatically `Send + Sync` because all of its fields are
/// thread-safe:
/// - `String` and `Vec<char>` are `Send + Sync`
/// - `Arc<T>` provides thread-safe shared ownership
/// - `LabelScheme` and the rule table are wrapped in `Arc` and never mutated
///   after construction
///
/// Single-thread usage:
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use wernicke::{TagDecoder, BuiltinScheme};
///
/// let decoder = TagDecoder::builder()
///     .with_scheme(BuiltinScheme::ChartQueries)?
///     .build()?;
///
/// decoder.decode(&["Price"], &[3])?;
/// # Ok(())
/// # }
/// ```
///
/// Multi-thread usage:
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use wernicke::{TagDecoder, BuiltinScheme};
/// use std::sync::Arc;
/// use std::thread;
///
/// let decoder = Arc::new(TagDecoder::builder()
///     .with_scheme(BuiltinScheme::ChartQueries)?
///     .build()?);
///
/// let decoder_clone = Arc::clone(&decoder);
/// thread::spawn(move || {
///     decoder_clone.decode(&["Price"], &[3]).unwrap();
/// });
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TagDecoder {
    pub scheme: Arc<LabelScheme>,
    pub rules: Arc<HashMap<String, CanonicalRule>>,
    pub continuation_marker: String,
    pub bracket_chars: Vec<char>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<TagDecoder>();
    }
};

impl TagDecoder {
    /// Creates a new DecoderBuilder for fluent construction
    pub fn builder() -> super::builder::DecoderBuilder {
        super::builder::DecoderBuilder::new()
    }

    /// Returns information about the decoder's current configuration
    pub fn info(&self) -> super::DecoderInfo {
        let mut required_categories: Vec<String> = self.rules.keys().cloned().collect();
        required_categories.sort();
        super::DecoderInfo {
            num_labels: self.scheme.len(),
            categories: self.scheme.categories().to_vec(),
            continuation_marker: self.continuation_marker.clone(),
            bracket_chars: self.bracket_chars.clone(),
            required_categories,
        }
    }

    /// Decodes an aligned (token, tag index) sequence into entity values.
    ///
    /// # Arguments
    /// * `tokens` - Subword tokens, in sentence order
    /// * `tag_indices` - The model's predicted tag index for each token
    ///
    /// # Returns
    /// A map from entity category to its normalized value. Categories with no
    /// assigned tokens are absent, unless required by a rule, in which case
    /// decoding fails with [`DecoderError::MissingRequiredCategory`].
    ///
    /// # Example
    /// ```rust
    /// # use wernicke::{TagDecoder, BuiltinScheme, CanonicalRule};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let decoder = TagDecoder::builder()
    /// #     .with_scheme(BuiltinScheme::ChartQueries)?
    /// #     .add_rule(CanonicalRule::new("PLOT_TYPE", "scatter", "scatter"))?
    /// #     .build()?;
    /// let entities = decoder.decode(
    ///     &["Show", "a", "bar", "chart", "of", "Sales"],
    ///     &[0, 0, 1, 2, 0, 3],
    /// )?;
    /// assert_eq!(entities["PLOT_TYPE"], "barchart");
    /// assert_eq!(entities["X_AXIS_LABEL"], "Sales");
    /// # Ok(())
    /// # }
    /// ```
    pub fn decode(
        &self,
        tokens: &[impl AsRef<str>],
        tag_indices: &[usize],
    ) -> Result<HashMap<String, String>, DecoderError> {
        if tokens.len() != tag_indices.len() {
            return Err(DecoderError::MalformedInput {
                tokens: tokens.len(),
                tags: tag_indices.len(),
            });
        }

        // Outside tokens are dropped before merging, so they never break
        // fragment adjacency for the surviving tokens around them.
        let mut fragments: HashMap<&str, Vec<String>> = HashMap::new();
        for (token, &index) in tokens.iter().zip(tag_indices) {
            let category = match self.scheme.resolve(index)? {
                Tag::Outside => continue,
                // Begin and Inside fragments of one category fuse into a
                // single value with no separator between surface words.
                Tag::Span { category, .. } => category.as_str(),
            };
            let token = token.as_ref();
            let fragment = token
                .strip_prefix(self.continuation_marker.as_str())
                .unwrap_or(token);
            fragments.entry(category).or_default().push(fragment.to_string());
        }

        let mut entities: HashMap<String, String> = fragments
            .into_iter()
            .map(|(category, parts)| (category.to_string(), parts.concat()))
            .collect();

        // A rule's category must be present, whether or not the value matches.
        for rule in self.rules.values() {
            let value = entities
                .get_mut(&rule.category)
                .ok_or_else(|| DecoderError::MissingRequiredCategory(rule.category.clone()))?;
            if contains_ignore_case(value, &rule.pattern) {
                *value = rule.replacement.clone();
            }
        }

        for value in entities.values_mut() {
            *value = strip_chars(value, &self.bracket_chars);
        }

        Ok(entities)
    }
}
