use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Position in the input stream when an error was raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
    /// 1-based number of the record being parsed; 0 before the first one.
    pub record: u64,
}

impl fmt::Display for IoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} (line {}, byte {})",
            self.record, self.line_num, self.byte_pos
        )
    }
}

/// The line of a four-line group that was expected but never arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLine {
    Sequence,
    SecondaryIdentifier,
    Quality,
}

impl fmt::Display for RecordLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordLine::Sequence => "sequence",
            RecordLine::SecondaryIdentifier => "'+' line",
            RecordLine::Quality => "quality",
        })
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unexpected EOF inside record: missing {missing} line")]
    Truncated { missing: RecordLine },
    #[error("quality character {byte:#04x} at position {position} is outside the encoded range")]
    QualityOutOfRange { byte: u8, position: usize },
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
    #[error("gzip input/output requested but the `gzip` feature is disabled")]
    GzipDisabled,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("num_qual_levels must be an integer between 1 and 40 inclusively, got {0}")]
    LevelsOutOfRange(i64),
    #[error("num_qual_levels must be an integer, got '{0}'")]
    NotAnInteger(String),
}

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot finish writing {}: {source}", .path.display())]
    Finish {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error at {ctx}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("format error at {ctx}: {source}")]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl QuantizeError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn open_err(source: io::Error, path: &std::path::Path) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }
}
