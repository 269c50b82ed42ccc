//! Front-end codecs: PGM heightmap input and ASCII STL output.
#![forbid(unsafe_code)]

pub mod pgm;
pub mod stl;

pub use pgm::{PgmError, PgmFormat, PgmHeader, load_pgm, read_pgm, write_pgm};
pub use stl::{StlWriter, write_stl};
