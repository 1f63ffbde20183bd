//! Segment ("tramo") assembly.
//!
//! Turns rows of raw form input into rendered segments. Each row carries a
//! start and end station, a bearing, an optional distance and an optional
//! adjacency note. Rows that cannot be rendered produce a row-indexed error
//! instead of a segment; processing always continues with the next row.

mod assembler;
mod segment;

pub use assembler::{
    BearingFields, RowError, SegmentColumns, SegmentInput, SegmentReport, assemble,
};
pub use segment::{Segment, adjacency_clause};

pub(crate) use assembler::narrative_lines;

#[cfg(test)]
mod assembly_tests;
