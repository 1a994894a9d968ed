//! Lossy FASTQ shrinking ahead of a general-purpose compressor.
//!
//! - Identifier lines are replaced by `@` and `+`.
//! - Quality strings are quantized to 1..=40 levels.
//! - Sequences are copied verbatim.
//! - Plain and `.gz` input/output (auto-detect), streamed record by record.
//! - Strict error policy by default; lenient mode tolerates truncated input.
//!
//! Identifiers and true qualities are lost. Do not use where either matters.

pub mod error;
pub mod pipeline;
pub mod policy;
pub mod quantize;
pub mod reader;
pub mod record;
mod util;
pub mod writer;

pub use crate::error::{ConfigError, FormatError, IoContext, QuantizeError, RecordLine};
pub use crate::pipeline::{Config, Summary, run, transduce};
pub use crate::policy::{ErrorPolicy, ReaderOptions};
pub use crate::quantize::{
    PHRED33_OFFSET, PHRED64_OFFSET, QualityLevels, Quantizer, quantize, quantize_byte,
};
pub use crate::reader::QuantizingReader;
pub use crate::record::{FastqRecord, ID_PLACEHOLDER, ID2_PLACEHOLDER};
pub use crate::writer::FastqWriter;
