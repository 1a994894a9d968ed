use std::fmt;
use std::io::{self, Write};

/// Placeholder written in place of every identifier line.
pub const ID_PLACEHOLDER: &str = "@";
/// Placeholder written in place of every secondary identifier line.
pub const ID2_PLACEHOLDER: &str = "+";

/// Characters of sequence/quality shown by the `Display` preview.
const PREVIEW_LEN: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    pub id: String,
    pub seq: Vec<u8>,
    pub id2: String,
    pub qual: Vec<u8>,
}

impl FastqRecord {
    pub fn new(id: impl Into<String>, seq: Vec<u8>, id2: impl Into<String>, qual: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            seq,
            id2: id2.into(),
            qual,
        }
    }

    /// Record with both identifier lines replaced by their placeholders.
    pub fn anonymous(seq: Vec<u8>, qual: Vec<u8>) -> Self {
        Self::new(ID_PLACEHOLDER, seq, ID2_PLACEHOLDER, qual)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Identifier with its last `separator`-delimited field removed.
    ///
    /// `None` or an empty separator returns the full identifier. If the
    /// separator does not occur the identifier has a single field and the
    /// result is empty.
    pub fn short_name(&self, separator: Option<&str>) -> &str {
        match separator {
            Some(sep) if !sep.is_empty() => match self.id.rsplit_once(sep) {
                Some((head, _)) => head,
                None => "",
            },
            _ => &self.id,
        }
    }

    /// Append the four record lines to `w`.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.id.as_bytes())?;
        w.write_all(b"\n")?;
        w.write_all(&self.seq)?;
        w.write_all(b"\n")?;
        w.write_all(self.id2.as_bytes())?;
        w.write_all(b"\n")?;
        w.write_all(&self.qual)?;
        w.write_all(b"\n")
    }
}

impl fmt::Display for FastqRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seq = &self.seq[..self.seq.len().min(PREVIEW_LEN)];
        let qual = &self.qual[..self.qual.len().min(PREVIEW_LEN)];
        write!(
            f,
            "{} {} {}",
            self.id,
            String::from_utf8_lossy(seq),
            String::from_utf8_lossy(qual)
        )
    }
}
