//! Reading and writing event files: one delimited [`Event`] per line.

use crate::{
    collection::{EventCollection, IterationMode},
    error::StoreError,
    event::Event,
};
use std::io::{BufRead, Write};
use tracing::{debug, trace};

/// Reads events line by line from `reader` and inserts them into `collection`. Blank lines are
/// skipped. Returns the number of events inserted.
///
/// # Errors
///
/// - [`StoreError::Io`] if reading fails.
/// - [`StoreError::Event`] if a line is not a valid delimited event.
/// - [`StoreError::Collection`] if the collection fills up.
///
/// Events read before the failing line stay in the collection.
pub fn load<R: BufRead>(reader: R, collection: &mut EventCollection) -> Result<usize, StoreError> {
    let mut loaded = 0;
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            debug!(line = line_number, "skipping blank line");
            continue;
        }
        let event: Event = line.parse().map_err(|source| StoreError::Event {
            line: line_number,
            source,
        })?;
        trace!(line = line_number, %event, "loaded event");
        collection
            .insert(event)
            .map_err(|source| StoreError::Collection {
                line: line_number,
                source,
            })?;
        loaded += 1;
    }
    Ok(loaded)
}

/// Writes every event in `collection` to `writer`, one per line, in the given order. Returns the
/// number of events written.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if writing fails.
pub fn save<W: Write>(
    collection: &EventCollection,
    mode: IterationMode,
    mut writer: W,
) -> Result<usize, StoreError> {
    let mut saved = 0;
    for event in collection.ordered(mode) {
        writeln!(writer, "{event}")?;
        saved += 1;
    }
    writer.flush()?;
    Ok(saved)
}
