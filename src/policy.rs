use crate::quantize::{PHRED33_OFFSET, QualityLevels};

/// How the transducer reacts to malformed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fill missing lines with empty strings, quantize quality characters
    /// unchecked and carry length mismatches through. Each defect is logged.
    Lenient,
    /// Return the first malformed record as an error and stop.
    #[default]
    Strict,
}

#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub levels: QualityLevels,
    /// Quality encoding offset (33 for Phred+33, 64 for Phred+64).
    pub offset: u8,
    pub error_policy: ErrorPolicy,
}

impl ReaderOptions {
    pub fn new(levels: QualityLevels) -> Self {
        Self {
            levels,
            offset: PHRED33_OFFSET,
            error_policy: ErrorPolicy::default(),
        }
    }

    pub fn with_offset(mut self, offset: u8) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}
