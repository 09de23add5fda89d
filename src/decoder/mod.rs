mod error;
mod scheme;
mod normalize;
mod decode;
pub mod builder;

pub use error::DecoderError;
pub use scheme::{LabelScheme, Tag, Position};
pub use decode::TagDecoder;
pub use builder::{DecoderBuilder, CanonicalRule};

/// Information about the current configuration of a decoder
#[derive(Debug, Clone, serde::Serialize)]
pub struct DecoderInfo {
    /// Number of tag indices in the label scheme's domain
    pub num_labels: usize,
    /// Entity categories the decoder can extract
    pub categories: Vec<String>,
    /// Prefix marking a token as a continuation of the previous word
    pub continuation_marker: String,
    /// Characters removed from every decoded value
    pub bracket_chars: Vec<char>,
    /// Categories that must be present in every decoded result
    pub required_categories: Vec<String>,
}
