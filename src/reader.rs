use crate::error::{FormatError, IoContext, QuantizeError, RecordLine};
use crate::policy::{ErrorPolicy, ReaderOptions};
use crate::quantize::Quantizer;
use crate::record::FastqRecord;
use crate::util::{has_gzip_extension, looks_like_gzip, open_file};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
#[cfg(feature = "mmap")]
use std::io::Cursor;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Highest character accepted in a quality line by the strict policy.
const MAX_QUAL_CHAR: u8 = b'~';

/// Streaming FASTQ transducer (plain/.gz).
///
/// Reads four lines per record, drops both identifier lines and quantizes the
/// quality line. Records are produced one at a time; memory use does not grow
/// with the input.
pub struct QuantizingReader {
    rdr: Box<dyn BufRead + Send>,
    opts: ReaderOptions,
    quantizer: Quantizer,
    line_num: u64,
    byte_pos: u64,
    records: u64,
    header: Vec<u8>,
    done: bool,
}

impl QuantizingReader {
    /// Open from a file path. Auto-detect gzip by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: ReaderOptions) -> Result<Self, QuantizeError> {
        let path = path.as_ref();
        let f = open_file(path).map_err(|e| QuantizeError::open_err(e, path))?;

        let is_gz = has_gzip_extension(path) || looks_like_gzip(&f).unwrap_or(false);

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            #[cfg(feature = "gzip")]
            {
                log::info!("reading {} as gzip", path.display());
                let dec = MultiGzDecoder::new(f);
                Box::new(BufReader::with_capacity(256 * 1024, dec))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(QuantizeError::fmt_err(
                    FormatError::GzipDisabled,
                    IoContext::default(),
                ));
            }
        } else {
            #[cfg(feature = "mmap")]
            {
                use memmap2::Mmap;
                // Own the Mmap inside Cursor to avoid self-ref problems
                let mmap =
                    unsafe { Mmap::map(&f) }.map_err(|e| QuantizeError::open_err(e, path))?;
                Box::new(BufReader::with_capacity(512 * 1024, Cursor::new(mmap)))
            }
            #[cfg(not(feature = "mmap"))]
            {
                Box::new(BufReader::with_capacity(256 * 1024, f))
            }
        };

        Ok(Self::build(rdr, opts))
    }

    /// Wrap an arbitrary `BufRead` (stdin, an in-memory buffer, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, opts: ReaderOptions) -> Self {
        Self::build(Box::new(reader), opts)
    }

    fn build(rdr: Box<dyn BufRead + Send>, opts: ReaderOptions) -> Self {
        let quantizer = Quantizer::new(opts.levels, opts.offset);
        Self {
            rdr,
            opts,
            quantizer,
            line_num: 0,
            byte_pos: 0,
            records: 0,
            header: Vec::with_capacity(128),
            done: false,
        }
    }

    /// Number of records started so far, including one that failed to parse.
    pub fn records_read(&self) -> u64 {
        self.records
    }

    /// Iterator-style `next` record. Fused after the end of input or an error.
    pub fn next(&mut self) -> Option<Result<FastqRecord, QuantizeError>> {
        if self.done {
            return None;
        }
        match self.read_one() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    /// Read one line into `buf` with surrounding ASCII whitespace removed.
    /// Returns the raw number of bytes consumed (0 at EOF).
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        buf.clear();
        let n = self.rdr.read_until(b'\n', buf)?;
        if n > 0 {
            self.line_num += 1;
            self.byte_pos += n as u64;
            trim_in_place(buf);
        }
        Ok(n)
    }

    fn read_one(&mut self) -> Result<Option<FastqRecord>, QuantizeError> {
        let mut header = std::mem::take(&mut self.header);
        let read = self.read_line(&mut header);
        let blank = header.is_empty();
        self.header = header;
        let n = read.map_err(|e| QuantizeError::io_err(e, self.ctx()))?;

        // An empty identifier line ends the input, blank or EOF alike.
        if blank {
            if n > 0 {
                log::debug!(
                    "blank identifier line at line {}; treating as end of input",
                    self.line_num
                );
            }
            return Ok(None);
        }
        self.records += 1;

        let seq = self.read_required(RecordLine::Sequence)?;
        self.read_required(RecordLine::SecondaryIdentifier)?;
        let mut qual = self.read_required(RecordLine::Quality)?;

        self.check_quality(&seq, &qual)?;
        self.quantizer.apply(&mut qual);

        Ok(Some(FastqRecord::anonymous(seq, qual)))
    }

    fn read_required(&mut self, line: RecordLine) -> Result<Vec<u8>, QuantizeError> {
        let mut buf = Vec::with_capacity(256);
        let n = self
            .read_line(&mut buf)
            .map_err(|e| QuantizeError::io_err(e, self.ctx()))?;
        if n == 0 {
            match self.opts.error_policy {
                ErrorPolicy::Strict => {
                    return Err(QuantizeError::fmt_err(
                        FormatError::Truncated { missing: line },
                        self.ctx(),
                    ));
                }
                ErrorPolicy::Lenient => {
                    log::warn!(
                        "record {}: input ends before the {line} line; using an empty line",
                        self.records
                    );
                }
            }
        }
        Ok(buf)
    }

    fn check_quality(&self, seq: &[u8], qual: &[u8]) -> Result<(), QuantizeError> {
        let min = self.opts.offset;
        let bad = qual
            .iter()
            .position(|&q| !(min..=MAX_QUAL_CHAR).contains(&q));

        match self.opts.error_policy {
            ErrorPolicy::Strict => {
                if let Some(position) = bad {
                    return Err(QuantizeError::fmt_err(
                        FormatError::QualityOutOfRange {
                            byte: qual[position],
                            position,
                        },
                        self.ctx(),
                    ));
                }
                if qual.len() != seq.len() {
                    return Err(QuantizeError::fmt_err(
                        FormatError::LengthMismatch {
                            seq: seq.len(),
                            qual: qual.len(),
                        },
                        self.ctx(),
                    ));
                }
            }
            ErrorPolicy::Lenient => {
                if let Some(position) = bad {
                    log::warn!(
                        "record {}: quality character {:#04x} at position {position} is outside the encoded range",
                        self.records,
                        qual[position]
                    );
                }
                if qual.len() != seq.len() {
                    log::warn!(
                        "record {}: quality length ({}) does not match sequence length ({})",
                        self.records,
                        qual.len(),
                        seq.len()
                    );
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
            record: self.records,
        }
    }
}

impl Iterator for QuantizingReader {
    type Item = Result<FastqRecord, QuantizeError>;
    fn next(&mut self) -> Option<Self::Item> {
        QuantizingReader::next(self)
    }
}

fn trim_in_place(buf: &mut Vec<u8>) {
    let end = buf
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    buf.truncate(end);
    let start = buf
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(buf.len());
    buf.drain(..start);
}
