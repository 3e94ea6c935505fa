//! # cmip5-path
//!
//! Parser and generator for CMIP5 file names, CMOR paths and datanode paths.
//!
//! A [`Cmip5File`] is built from exactly one source (a CMOR path, a datanode
//! path, a bare file name, or explicit field values), can be updated field by
//! field, and renders its derived names on demand.
//!
//! ```rust
//! use cmip5_path::Cmip5File;
//!
//! let mut file = Cmip5File::from_cmor_fname(
//!     "tas_Amon_HADCM3_decadal1990_r3i2p1_19710201-19710214-avg.nc",
//! ).unwrap();
//!
//! file.update([("t_end", "19810214")]).unwrap();
//! assert_eq!(
//!     file.cmor_fname().unwrap(),
//!     "tas_Amon_HADCM3_decadal1990_r3i2p1_19710201-19810214-avg.nc",
//! );
//! ```
//!
//! ## Features
//!
//! - `serde` (default): serialize [`Cmip5File`] as a map of its fields.

#![warn(missing_docs)]

mod file;
pub mod parser;
mod render;
mod repr;
mod types;

pub use file::{Cmip5File, Cmip5FileBuilder, Source, CMOR_FNAME_KEY};
pub use parser::{parse_cmor_fname, parse_path};
pub use render::{render_cmor_fname, render_path};
pub use types::{Cmip5Error, Cmip5Result, ErrorKind, ParseConfig};

// Re-export cmip5-types for convenience
pub use cmip5_types;
pub use cmip5_types::{Cmip5Field, Cmip5Meta, PathLayout};
