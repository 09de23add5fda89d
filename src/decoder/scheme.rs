use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DecoderError;

/// Position of a token within a labeled span, per the BIO convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    /// First token of a span
    Begin,
    /// Token continuing a span
    Inside,
}

/// A single entry in a label scheme
///
/// Either the sentinel outside tag or a (position, category) pair. The
/// conventional BIO notation (`"O"`, `"B-PLOT_TYPE"`, `"I-PLOT_TYPE"`, ...)
/// round-trips through [`fmt::Display`] and [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// The token carries no entity
    Outside,
    /// The token belongs to an entity span of the given category
    Span {
        position: Position,
        category: String,
    },
}

impl Tag {
    /// Creates a span tag beginning a new entity mention
    pub fn begin(category: impl Into<String>) -> Self {
        Tag::Span {
            position: Position::Begin,
            category: category.into(),
        }
    }

    /// Creates a span tag continuing an entity mention
    pub fn inside(category: impl Into<String>) -> Self {
        Tag::Span {
            position: Position::Inside,
            category: category.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Outside => write!(f, "O"),
            Tag::Span { position: Position::Begin, category } => write!(f, "B-{}", category),
            Tag::Span { position: Position::Inside, category } => write!(f, "I-{}", category),
        }
    }
}

impl FromStr for Tag {
    type Err = DecoderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "O" {
            return Ok(Tag::Outside);
        }
        let (position, category) = if let Some(rest) = s.strip_prefix("B-") {
            (Position::Begin, rest)
        } else if let Some(rest) = s.strip_prefix("I-") {
            (Position::Inside, rest)
        } else {
            return Err(DecoderError::BuildError(format!(
                "Invalid label '{}': expected 'O', 'B-<category>' or 'I-<category>'",
                s
            )));
        };
        if category.is_empty() {
            return Err(DecoderError::BuildError(format!(
                "Invalid label '{}': category name cannot be empty",
                s
            )));
        }
        Ok(Tag::Span {
            position,
            category: category.to_string(),
        })
    }
}

/// An ordered, validated table of tags
///
/// The integer tag index predicted by the model is the position of the tag in
/// the table, so the scheme is a total mapping from the dense index range
/// `[0, len)` to tag values. Constructed once at startup and treated as
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelScheme {
    tags: Vec<Tag>,
    categories: Vec<String>,
}

impl LabelScheme {
    /// Builds a scheme from an ordered tag table
    ///
    /// # Returns
    /// * `Ok(LabelScheme)` if the table defines at least one span tag and no
    ///   span tag has an empty category name
    /// * `Err(DecoderError::BuildError)` otherwise
    pub fn from_tags(tags: Vec<Tag>) -> Result<Self, DecoderError> {
        let mut categories: Vec<String> = Vec::new();
        for tag in &tags {
            if let Tag::Span { category, .. } = tag {
                if category.is_empty() {
                    return Err(DecoderError::BuildError(
                        "Label scheme contains a span tag with an empty category".into(),
                    ));
                }
                if !categories.iter().any(|c| c == category) {
                    categories.push(category.clone());
                }
            }
        }
        if categories.is_empty() {
            return Err(DecoderError::BuildError(
                "Label scheme must define at least one entity category".into(),
            ));
        }
        Ok(Self { tags, categories })
    }

    /// Builds a scheme from BIO notation labels, in tag-index order
    ///
    /// # Example
    /// ```
    /// use wernicke::LabelScheme;
    ///
    /// let scheme = LabelScheme::from_labels(&["O", "B-PLOT_TYPE", "I-PLOT_TYPE"]).unwrap();
    /// assert_eq!(scheme.len(), 3);
    /// ```
    pub fn from_labels(labels: &[impl AsRef<str>]) -> Result<Self, DecoderError> {
        let tags = labels
            .iter()
            .map(|label| label.as_ref().parse())
            .collect::<Result<Vec<Tag>, _>>()?;
        Self::from_tags(tags)
    }

    /// Resolves a predicted tag index to its tag value
    pub fn resolve(&self, index: usize) -> Result<&Tag, DecoderError> {
        self.tags.get(index).ok_or(DecoderError::UnknownLabelIndex {
            index,
            domain: self.tags.len(),
        })
    }

    /// Number of tag indices in the scheme's domain
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Entity categories in first-appearance order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}
