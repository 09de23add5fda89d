//! A thread-safe BIO tag decoder that turns token-classification output into
//! structured chart-query fields.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use wernicke::{TagDecoder, BuiltinScheme, CanonicalRule};
//!
//! let decoder = TagDecoder::builder()
//!     .with_scheme(BuiltinScheme::ChartQueries)?
//!     .add_rule(CanonicalRule::new("PLOT_TYPE", "scatter", "scatter"))?
//!     .build()?;
//!
//! let tokens = ["Show", "me", "a", "##scatter", "##plot", "of", "Price", "vs", "Time"];
//! let tags = [0, 0, 0, 1, 2, 0, 3, 0, 5];
//!
//! let entities = decoder.decode(&tokens, &tags)?;
//! assert_eq!(entities["PLOT_TYPE"], "scatter");
//! assert_eq!(entities["X_AXIS_LABEL"], "Price");
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The decoder is thread-safe and can be shared across threads using `Arc`:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use wernicke::{TagDecoder, BuiltinScheme};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let decoder = Arc::new(TagDecoder::builder()
//!     .with_scheme(BuiltinScheme::ChartQueries)?
//!     .build()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let decoder = Arc::clone(&decoder);
//!     handles.push(thread::spawn(move || {
//!         decoder.decode(&["Price"], &[3]).unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod decoder;

pub use decoder::{TagDecoder, DecoderBuilder, DecoderError, DecoderInfo, CanonicalRule};
pub use decoder::{LabelScheme, Tag, Position};

/// Represents the label schemes bundled with the library
#[derive(Debug, Clone, Copy)]
pub enum BuiltinScheme {
    /// BIO labels for natural-language chart requests
    ///
    /// Categories:
    /// - PLOT_TYPE: the kind of chart being asked for
    /// - X_AXIS_LABEL: the quantity on the horizontal axis
    /// - Y_AXIS_LABEL: the quantity on the vertical axis
    ChartQueries,
}

impl BuiltinScheme {
    /// Get the ordered BIO label table of the scheme
    ///
    /// The position of a label in the table is its integer tag index.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::ChartQueries => &[
                "O",
                "B-PLOT_TYPE",
                "I-PLOT_TYPE",
                "B-X_AXIS_LABEL",
                "I-X_AXIS_LABEL",
                "B-Y_AXIS_LABEL",
                "I-Y_AXIS_LABEL",
            ],
        }
    }
}

pub fn init_logger() {
    env_logger::init();
}
