//! Error types returned by [`crate::read`] and [`crate::write`].

use std::io;

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while parsing or serializing an SWF file.
///
/// Parsing is single-shot: on error, the partially built structure is
/// discarded rather than returned, so callers always get either a complete
/// [`crate::Swf`] or an `Error`, never a half-filled one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte or bit source ran out of data before a field could be read
    /// in full.
    #[error("unexpected end of input")]
    Truncated,

    /// The 3-byte SWF signature was not `FWS`, `CWS`, or `ZWS`.
    #[error("invalid SWF signature: {0:?}")]
    InvalidSignature([u8; 3]),

    /// A `FillStyle` type byte did not match any of the recognized variants.
    #[error("invalid fill style type: {0:#x}")]
    InvalidFillStyleType(u8),

    /// A tag's length framing (short/extended) did not line up with the
    /// bytes actually available.
    #[error("invalid tag framing for tag code {0}")]
    InvalidTagFraming(u16),

    /// The decompressed SWF body length did not match `file_size - 8`.
    #[error("decompressed body length {actual} does not match declared length {expected}")]
    BodyLengthMismatch { expected: u32, actual: u32 },

    /// A recognized-but-unimplemented feature, e.g. LZMA compression when
    /// the `lzma` feature is disabled.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// A value fell outside the range the format documents for it, e.g. a
    /// `Rectangle` with `bits_per_field == 0`.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// An I/O error from the underlying byte source that isn't better
    /// described by one of the variants above.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A field-path prefix wrapped around another error, so failures
    /// pinpoint which nested field they came from, e.g.
    /// `"DefineShape.ShapeStyles.FillStyles[2]: invalid fill style type"`.
    #[error("{field}: {source}")]
    Context {
        field: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(e) => e,
            Error::Truncated => io::Error::new(io::ErrorKind::UnexpectedEof, error.to_string()),
            e => io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
        }
    }
}

/// Wraps `Result<T, Error>` with a field-path prefix, matching the source
/// library's "chain of contextual prefixes" propagation policy
/// (`"failed to read Gradient.Records[3]: ..."`).
pub(crate) trait ErrorContext<T> {
    fn context(self, field: &'static str) -> Result<T>;
}

impl<T> ErrorContext<T> for Result<T> {
    fn context(self, field: &'static str) -> Result<T> {
        self.map_err(|source| Error::Context {
            field,
            source: Box::new(source),
        })
    }
}
