//! Yeast dose model for the dough calculator.
//!
//! The model answers one question: how much yeast (as a baker's percentage)
//! does a dough need to finish fermenting after a given number of hours at a
//! given temperature?
//!
//! # Reference Table
//!
//! The answer comes from a reference table of temperature rows. Each row
//! lists the hours to full fermentation for a fixed set of yeast doses, so
//! hours fall as the dose rises. Rows are tagged `room` or `fridge`. The
//! table is written for one reference yeast form; the other forms are
//! derived with fixed conversion factors (see [`conversion_factor`]).
//!
//! The built-in table ships inside the binary and is parsed once into
//! process-wide read-only state by [`YeastModel::builtin`]. Alternative
//! tables can be loaded with [`YeastModel::from_path`].
//!
//! # Lookup
//!
//! [`YeastModel::percent_for`] interpolates linearly between the bracketing
//! rows (by temperature) and the bracketing doses (by hours). Requests
//! outside the table clamp to the nearest boundary and are reported in
//! [`YeastLookup::clamped`] rather than rejected.

pub mod error;
pub mod model;
pub mod table;

pub use error::{Result, YeastError};
pub use model::{conversion_factor, Clamp, YeastLookup, YeastModel};
pub use table::{TableRow, YeastTable, YeastTableEntry};
