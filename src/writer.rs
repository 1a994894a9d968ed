#[cfg(not(feature = "gzip"))]
use crate::error::{FormatError, IoContext};
use crate::error::QuantizeError;
use crate::record::FastqRecord;
use crate::util::has_gzip_extension;

#[cfg(feature = "gzip")]
use flate2::{Compression, write::GzEncoder};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Output stream: plain buffered file, gzip, or an in-memory/any other sink.
pub enum WriterMaybeGzip {
    #[cfg(feature = "gzip")]
    Gzip(GzEncoder<BufWriter<File>>),
    Plain(BufWriter<File>),
    Other(Box<dyn Write + Send>),
}

impl Write for WriterMaybeGzip {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            #[cfg(feature = "gzip")]
            WriterMaybeGzip::Gzip(w) => w.write(buf),
            WriterMaybeGzip::Plain(w) => w.write(buf),
            WriterMaybeGzip::Other(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            #[cfg(feature = "gzip")]
            WriterMaybeGzip::Gzip(w) => w.flush(),
            WriterMaybeGzip::Plain(w) => w.flush(),
            WriterMaybeGzip::Other(w) => w.flush(),
        }
    }
}

/// FASTQ writer. Gzip is selected by a `.gz`/`.gzip` suffix on the path.
pub struct FastqWriter {
    inner: WriterMaybeGzip,
}

impl FastqWriter {
    /// Create (or truncate) `path`.
    ///
    /// A gzip suffix without the `gzip` feature is an error and leaves the
    /// filesystem untouched.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, QuantizeError> {
        let path = path.as_ref();
        let gzip = has_gzip_extension(path);
        #[cfg(not(feature = "gzip"))]
        if gzip {
            return Err(QuantizeError::fmt_err(
                FormatError::GzipDisabled,
                IoContext::default(),
            ));
        }

        let file = File::create(path).map_err(|e| QuantizeError::open_err(e, path))?;
        let file = BufWriter::with_capacity(256 * 1024, file);

        #[cfg(feature = "gzip")]
        if gzip {
            log::info!("writing {} as gzip", path.display());
            let enc = GzEncoder::new(file, Compression::default());
            return Ok(Self {
                inner: WriterMaybeGzip::Gzip(enc),
            });
        }

        Ok(Self {
            inner: WriterMaybeGzip::Plain(file),
        })
    }

    pub fn from_write<W: Write + Send + 'static>(w: W) -> Self {
        Self {
            inner: WriterMaybeGzip::Other(Box::new(w)),
        }
    }

    pub fn write_record(&mut self, rec: &FastqRecord) -> io::Result<()> {
        rec.write_to(&mut self.inner)
    }

    /// Flush everything and, for gzip, write the trailer.
    pub fn finish(self) -> io::Result<()> {
        match self.inner {
            #[cfg(feature = "gzip")]
            WriterMaybeGzip::Gzip(enc) => {
                let mut file = enc.finish()?;
                file.flush()
            }
            WriterMaybeGzip::Plain(mut w) => w.flush(),
            WriterMaybeGzip::Other(mut w) => w.flush(),
        }
    }
}
