//! Storage layer for the Minarca client
//!
//! Provides whole-file atomic replacement and the flat properties codec used
//! by the settings and status files.

pub mod file_io;
pub mod properties;

pub use file_io::{read_latin1, read_utf8, write_atomic};
pub use properties::{read_properties, write_properties, Properties};
