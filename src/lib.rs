//! Reads and writes the Adobe Flash SWF (Small Web Format) file format.
//!
//! ```no_run
//! # fn main() -> Result<(), swf::Error> {
//! let file = std::fs::File::open("movie.swf").unwrap();
//! let movie = swf::parse(file)?;
//! let bytes = swf::serialize(&movie)?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```

mod error;
mod extensions;
mod read;
mod tag_code;
mod types;
mod write;

pub use error::{Error, Result};
pub use read::{decompress_swf, parse, parse_swf};
pub use tag_code::TagCode;
pub use types::*;
pub use write::{round_trip_bytes, serialize};
