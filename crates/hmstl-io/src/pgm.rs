//! PGM (portable graymap) decoding.
//!
//! ```text
//! P5                  # magic: P5 binary, P2 ASCII
//! <width> <height>
//! <maxval>            # 1..=255
//! <payload>           # P5: width*height bytes after one whitespace byte
//!                     # P2: width*height decimal tokens
//! ```
//!
//! `#` starts a comment that runs to the end of the line; comments may sit
//! between any two header tokens. Samples are kept raw, never rescaled by
//! `maxval`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use hmstl_grid::{GridError, SampleGrid};
use thiserror::Error;

/// Largest supported `maxval` (8-bit samples).
pub const MAX_DEPTH: u32 = u8::MAX as u32;

#[derive(Debug, Error)]
pub enum PgmError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("not a PGM file: bad magic {0:?}")]
    InvalidMagic(String),

    #[error("invalid PGM header: {0}")]
    InvalidHeader(String),

    #[error("unsupported PGM depth: maxval {0} (only 1..=255 supported)")]
    UnsupportedDepth(u32),

    #[error("truncated PGM payload: expected {expected} samples, got {got}")]
    Truncated { expected: usize, got: usize },

    #[error("PGM sample {value} exceeds maxval {maxval}")]
    SampleOutOfRange { value: u32, maxval: u32 },

    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PgmFormat {
    /// `P2`
    Ascii,
    /// `P5`
    Binary,
}

impl PgmFormat {
    pub fn magic(self) -> &'static str {
        match self {
            PgmFormat::Ascii => "P2",
            PgmFormat::Binary => "P5",
        }
    }
}

/// Header fields of a graymap.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PgmHeader {
    pub format: PgmFormat,
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
}

/// Opens and decodes a PGM file.
pub fn load_pgm<P: AsRef<Path>>(path: P) -> Result<SampleGrid, PgmError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PgmError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PgmError::Io(e)
        }
    })?;
    read_pgm(BufReader::new(file))
}

/// Decodes a PGM stream into a sample grid.
pub fn read_pgm<R: BufRead>(mut reader: R) -> Result<SampleGrid, PgmError> {
    let header = read_header(&mut reader)?;
    log::debug!(
        "pgm header: {} {}x{} maxval={}",
        header.format.magic(),
        header.width,
        header.height,
        header.maxval
    );
    let expected = (header.width as usize)
        .checked_mul(header.height as usize)
        .ok_or_else(|| PgmError::InvalidHeader("image dimensions overflow".into()))?;
    let samples = match header.format {
        PgmFormat::Binary => read_binary_payload(&mut reader, expected)?,
        PgmFormat::Ascii => read_ascii_payload(&mut reader, expected, header.maxval)?,
    };
    Ok(SampleGrid::new(header.width, header.height, samples)?)
}

/// Reads the magic and the three header numbers, leaving the reader at the
/// first payload byte.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<PgmHeader, PgmError> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            PgmError::InvalidMagic(String::from_utf8_lossy(&magic).into_owned())
        } else {
            PgmError::Io(e)
        }
    })?;
    let format = match &magic {
        b"P5" => PgmFormat::Binary,
        b"P2" => PgmFormat::Ascii,
        _ => {
            return Err(PgmError::InvalidMagic(
                String::from_utf8_lossy(&magic).into_owned(),
            ));
        }
    };
    // The magic must be followed by whitespace or a comment.
    match peek_byte(reader)? {
        Some(b) if b.is_ascii_whitespace() || b == b'#' => {}
        _ => {
            return Err(PgmError::InvalidMagic(
                String::from_utf8_lossy(&magic).into_owned(),
            ));
        }
    }
    let width = header_field(reader, "width")?;
    let height = header_field(reader, "height")?;
    let maxval = header_field(reader, "maxval")?;
    if width == 0 || height == 0 {
        return Err(PgmError::InvalidHeader(format!(
            "zero-sized image {width}x{height}"
        )));
    }
    if maxval == 0 {
        return Err(PgmError::InvalidHeader("maxval must be at least 1".into()));
    }
    if maxval > MAX_DEPTH {
        return Err(PgmError::UnsupportedDepth(maxval));
    }
    Ok(PgmHeader {
        format,
        width,
        height,
        maxval,
    })
}

fn header_field<R: BufRead>(reader: &mut R, field: &str) -> Result<u32, PgmError> {
    read_uint(reader, field)?
        .ok_or_else(|| PgmError::InvalidHeader(format!("missing {field}")))
}

/// Cap on up-front allocation before any payload bytes are seen.
const PREALLOC_LIMIT: usize = 1 << 16;

fn read_binary_payload<R: Read>(reader: &mut R, expected: usize) -> Result<Vec<u8>, PgmError> {
    let mut samples = Vec::with_capacity(expected.min(PREALLOC_LIMIT));
    reader.take(expected as u64).read_to_end(&mut samples)?;
    if samples.len() < expected {
        return Err(PgmError::Truncated {
            expected,
            got: samples.len(),
        });
    }
    Ok(samples)
}

fn read_ascii_payload<R: BufRead>(
    reader: &mut R,
    expected: usize,
    maxval: u32,
) -> Result<Vec<u8>, PgmError> {
    let mut samples = Vec::with_capacity(expected.min(PREALLOC_LIMIT));
    while samples.len() < expected {
        let Some(value) = read_uint(reader, "sample")? else {
            return Err(PgmError::Truncated {
                expected,
                got: samples.len(),
            });
        };
        if value > maxval {
            return Err(PgmError::SampleOutOfRange { value, maxval });
        }
        // maxval <= 255, so value fits.
        samples.push(value as u8);
    }
    Ok(samples)
}

#[inline]
fn peek_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

#[inline]
fn next_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    let b = peek_byte(reader)?;
    if b.is_some() {
        reader.consume(1);
    }
    Ok(b)
}

fn skip_comment<R: BufRead>(reader: &mut R) -> io::Result<()> {
    while let Some(b) = next_byte(reader)? {
        if b == b'\n' || b == b'\r' {
            break;
        }
    }
    Ok(())
}

/// Reads one unsigned decimal token, skipping leading whitespace and comments.
///
/// Consumes exactly one terminating byte (whitespace or the start of a
/// comment). Returns `None` at end of input before any digit.
fn read_uint<R: BufRead>(reader: &mut R, field: &str) -> Result<Option<u32>, PgmError> {
    let mut b = loop {
        match next_byte(reader)? {
            None => return Ok(None),
            Some(b'#') => skip_comment(reader)?,
            Some(b) if b.is_ascii_whitespace() => {}
            Some(b) => break b,
        }
    };
    let mut value: u32 = 0;
    loop {
        if !b.is_ascii_digit() {
            return Err(PgmError::InvalidHeader(format!(
                "unexpected byte {b:#04x} in {field}"
            )));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .ok_or_else(|| PgmError::InvalidHeader(format!("{field} out of range")))?;
        match next_byte(reader)? {
            None => return Ok(Some(value)),
            Some(b'#') => {
                skip_comment(reader)?;
                return Ok(Some(value));
            }
            Some(t) if t.is_ascii_whitespace() => return Ok(Some(value)),
            Some(d) => b = d,
        }
    }
}

/// Encodes `grid` as a PGM stream with `maxval` 255.
pub fn write_pgm<W: Write>(grid: &SampleGrid, mut out: W, format: PgmFormat) -> io::Result<()> {
    writeln!(out, "{}", format.magic())?;
    writeln!(out, "{} {}", grid.width(), grid.height())?;
    writeln!(out, "{MAX_DEPTH}")?;
    match format {
        PgmFormat::Binary => out.write_all(grid.samples())?,
        PgmFormat::Ascii => {
            for row in grid.samples().chunks(grid.width().max(1) as usize) {
                let line: Vec<String> = row.iter().map(u8::to_string).collect();
                writeln!(out, "{}", line.join(" "))?;
            }
        }
    }
    out.flush()
}
