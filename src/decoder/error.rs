/// Represents the different types of errors that can occur while decoding tags.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// Token and tag sequences are not positionally aligned
    #[error("Malformed input: {tokens} tokens but {tags} tag indices")]
    MalformedInput { tokens: usize, tags: usize },
    /// A predicted tag index lies outside the label scheme's domain
    #[error("Unknown label index {index}, scheme defines indices 0..{domain}")]
    UnknownLabelIndex { index: usize, domain: usize },
    /// A canonicalization rule references a category with no assigned tokens
    #[error("Missing required category: {0}")]
    MissingRequiredCategory(String),
}
