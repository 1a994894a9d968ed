//! Quality-string quantization.
//!
//! Quality values are assumed to span `0..=40`. With `n` levels the range is
//! cut into bins of width `40 / n`; every value is replaced by the lower edge
//! of its bin. The bin index is computed with the full-precision width while
//! the representative value uses the truncated width, so e.g. with 29 levels
//! Q40 becomes Q28. Existing quantized files depend on this exact mapping.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Phred+33 (Sanger / Illumina 1.8+) offset.
pub const PHRED33_OFFSET: u8 = 33;
/// Legacy Phred+64 offset.
pub const PHRED64_OFFSET: u8 = 64;

/// Highest quality value the binning assumes.
pub const MAX_QUALITY: u8 = 40;
/// Quality value emitted for every base when quantizing to a single level.
pub const SINGLE_LEVEL_QUALITY: u8 = 41;

/// Number of quantization levels, always within `1..=40`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualityLevels(u8);

impl QualityLevels {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = MAX_QUALITY;

    pub fn new(levels: i64) -> Result<Self, ConfigError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&levels) {
            Ok(Self(levels as u8))
        } else {
            Err(ConfigError::LevelsOutOfRange(levels))
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for QualityLevels {
    type Error = ConfigError;

    fn try_from(levels: i64) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl FromStr for QualityLevels {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let levels = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::NotAnInteger(s.to_string()))?;
        Self::new(levels)
    }
}

impl fmt::Display for QualityLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Quantize a single encoded quality character.
///
/// Characters below `offset` are not rejected here; they map to a code
/// between their own value and `offset`. Callers that care validate first.
#[inline]
pub fn quantize_byte(q: u8, levels: QualityLevels, offset: u8) -> u8 {
    if levels.get() == 1 {
        return SINGLE_LEVEL_QUALITY.wrapping_add(offset);
    }
    let divisor = f64::from(MAX_QUALITY) / f64::from(levels.get());
    let value = i32::from(q) - i32::from(offset);
    // `as i32` truncates toward zero, which keeps the result in 0..=255
    let bin = (f64::from(value) / divisor) as i32;
    let quantized = (divisor as i32) * bin + i32::from(offset);
    quantized as u8
}

/// Quantize a whole quality string. The output has the same length as `qual`.
pub fn quantize(qual: &[u8], levels: QualityLevels, offset: u8) -> Vec<u8> {
    qual.iter()
        .map(|&q| quantize_byte(q, levels, offset))
        .collect()
}

/// Precomputed mapping for one `(levels, offset)` pair.
///
/// Produces exactly what [`quantize`] produces, one table lookup per base.
#[derive(Debug, Clone)]
pub struct Quantizer {
    table: [u8; 256],
}

impl Quantizer {
    pub fn new(levels: QualityLevels, offset: u8) -> Self {
        let mut table = [0u8; 256];
        for (code, slot) in table.iter_mut().enumerate() {
            *slot = quantize_byte(code as u8, levels, offset);
        }
        Self { table }
    }

    /// Quantize `qual` in place.
    #[inline]
    pub fn apply(&self, qual: &mut [u8]) {
        for q in qual.iter_mut() {
            *q = self.table[*q as usize];
        }
    }

    pub fn quantize(&self, qual: &[u8]) -> Vec<u8> {
        qual.iter().map(|&q| self.table[q as usize]).collect()
    }
}
