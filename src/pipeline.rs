//! The full input → output pass.

use crate::error::{IoContext, QuantizeError};
use crate::policy::ReaderOptions;
use crate::reader::QuantizingReader;
use crate::writer::FastqWriter;

use std::path::PathBuf;

/// One invocation: a single input file quantized into a single output file.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: ReaderOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub records: u64,
    pub bases: u64,
}

/// Open `config.input`, quantize every record into `config.output`.
///
/// The input is opened before the output is created, so an unreadable input
/// leaves no output file behind. Both streams are closed on every return path.
pub fn run(config: &Config) -> Result<Summary, QuantizeError> {
    let mut reader = QuantizingReader::from_path(&config.input, config.options.clone())?;
    let mut writer = FastqWriter::create(&config.output)?;

    let summary = transduce(&mut reader, &mut writer)?;
    writer.finish().map_err(|source| QuantizeError::Finish {
        path: config.output.clone(),
        source,
    })?;

    log::info!(
        "quantized {} records ({} bases) to {} levels",
        summary.records,
        summary.bases,
        config.options.levels
    );
    Ok(summary)
}

/// Drain `reader` into `writer`. Stops at the first error.
pub fn transduce(
    reader: &mut QuantizingReader,
    writer: &mut FastqWriter,
) -> Result<Summary, QuantizeError> {
    let mut summary = Summary::default();
    for rec in reader.by_ref() {
        let rec = rec?;
        writer.write_record(&rec).map_err(|e| {
            QuantizeError::io_err(
                e,
                IoContext {
                    record: summary.records + 1,
                    ..IoContext::default()
                },
            )
        })?;
        summary.records += 1;
        summary.bases += rec.len() as u64;
    }
    Ok(summary)
}
