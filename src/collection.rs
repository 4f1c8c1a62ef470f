use crate::{error::CollectionError, event::Event};
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    slice,
    str::FromStr,
};
use tracing::debug;

/// The order in which an [`EventCollection`] hands out its events.
///
/// Each mode picks the next event by scanning every event not yet returned in the current pass.
/// The modes break ties differently:
///
/// - [`Date`](IterationMode::Date): among events on the same date, the earliest inserted comes
///   first.
/// - [`Principal`](IterationMode::Principal) and [`Description`](IterationMode::Description):
///   among events with the same text, the *latest* inserted comes first. Text is compared by
///   UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IterationMode {
    /// The order the events were inserted in.
    #[default]
    Insertion,
    /// Chronological order.
    Date,
    /// Lexicographic order of principal.
    Principal,
    /// Lexicographic order of description.
    Description,
}

impl IterationMode {
    /// All modes, in order of their numeric codes (1 to 4).
    pub const ALL: [IterationMode; 4] = [
        IterationMode::Insertion,
        IterationMode::Date,
        IterationMode::Principal,
        IterationMode::Description,
    ];

    /// Name of the mode, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            IterationMode::Insertion => "insertion",
            IterationMode::Date => "date",
            IterationMode::Principal => "principal",
            IterationMode::Description => "description",
        }
    }

    /// Numeric code of the mode, from 1 (insertion) to 4 (description).
    pub fn code(&self) -> u8 {
        match self {
            IterationMode::Insertion => 1,
            IterationMode::Date => 2,
            IterationMode::Principal => 3,
            IterationMode::Description => 4,
        }
    }

    /// Index of the unvisited event this mode returns next, or `None` if every event is visited.
    fn select(self, events: &[Event], visited: &[bool]) -> Option<usize> {
        match self {
            IterationMode::Insertion => first_unvisited(visited),
            // strict: a later-inserted event on the same date never replaces the best
            IterationMode::Date => scan(events, visited, |best, candidate| {
                best.date().is_later_than(candidate.date())
            }),
            // non-strict: a later-inserted event with the same text always replaces the best
            IterationMode::Principal => scan(events, visited, |best, candidate| {
                utf16_le(candidate.principal(), best.principal())
            }),
            IterationMode::Description => scan(events, visited, |best, candidate| {
                utf16_le(candidate.description(), best.description())
            }),
        }
    }
}

/// `a <= b` comparing UTF-16 code units. Differs from `str` ordering only when a character above
/// U+FFFF meets one in U+E000..=U+FFFF.
fn utf16_le(a: &str, b: &str) -> bool {
    a.encode_utf16().cmp(b.encode_utf16()) != Ordering::Greater
}

fn first_unvisited(visited: &[bool]) -> Option<usize> {
    visited.iter().position(|&seen| !seen)
}

/// Selection scan: starting from the first unvisited event, walk the remaining unvisited events
/// in insertion order, moving to a candidate whenever `replaces(best, candidate)` holds.
fn scan(
    events: &[Event],
    visited: &[bool],
    replaces: impl Fn(&Event, &Event) -> bool,
) -> Option<usize> {
    let first = first_unvisited(visited)?;
    let best = (first + 1..events.len())
        .filter(|&index| !visited[index])
        .fold(first, |best, index| {
            if replaces(&events[best], &events[index]) {
                index
            } else {
                best
            }
        });
    Some(best)
}

impl Display for IterationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for IterationMode {
    type Error = CollectionError;

    /// Converts a numeric code (1 to 4) to a mode. Any other value, including 0, is rejected.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        IterationMode::ALL
            .into_iter()
            .find(|mode| mode.code() == code)
            .ok_or_else(|| CollectionError::InvalidIterationMode {
                mode: code.to_string(),
            })
    }
}

impl FromStr for IterationMode {
    type Err = CollectionError;

    /// Parses a mode from its name (ignoring ASCII case) or its numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let by_name = IterationMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s));
        match by_name {
            Some(mode) => Ok(mode),
            None => s
                .parse::<u8>()
                .map_err(|_| CollectionError::InvalidIterationMode { mode: s.to_owned() })
                .and_then(IterationMode::try_from),
        }
    }
}

/// Progress through one pass over the events.
#[derive(Debug, Clone)]
struct Selection {
    mode: IterationMode,
    /// `visited[k]` is true iff event `k` has been returned during this pass.
    visited: Vec<bool>,
    visited_count: usize,
}

impl Selection {
    fn new(mode: IterationMode, len: usize) -> Self {
        Self {
            mode,
            visited: vec![false; len],
            visited_count: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.visited.len() - self.visited_count
    }

    /// Picks, marks and returns the index of the next event.
    fn advance(&mut self, events: &[Event]) -> Option<usize> {
        let index = self.mode.select(events, &self.visited)?;
        self.visited[index] = true;
        self.visited_count += 1;
        Some(index)
    }
}

/// A fixed-capacity, insertion-ordered collection of [`Event`]s that can be walked in any of four
/// [`IterationMode`]s.
///
/// Iteration follows a reset-then-pull protocol: call [`reset`](EventCollection::reset) with a
/// mode, then call [`next_event`](EventCollection::next_event) while
/// [`has_next`](EventCollection::has_next) is true. Inserting an event ends any iteration in
/// progress, and a new pass must be started with `reset`.
///
/// [`ordered`](EventCollection::ordered) offers the same orders as an ordinary [`Iterator`] that
/// leaves the collection's own iteration state alone.
///
/// # Examples
///
/// ```
/// use datebook::prelude::*;
///
/// let mut events = EventCollection::with_capacity(4);
/// events.insert("1967-1-15,Green Bay Packers,Superbowl I".parse().unwrap()).unwrap();
/// events.insert("6/23/1912,Alan Turing,Birth".parse().unwrap()).unwrap();
///
/// events.reset(IterationMode::Date);
/// let mut principals = Vec::new();
/// while events.has_next() {
///     principals.push(events.next_event().unwrap().principal().to_owned());
/// }
/// assert_eq!(vec!["Alan Turing", "Green Bay Packers"], principals);
/// ```
#[derive(Debug, Clone)]
pub struct EventCollection {
    capacity: usize,
    events: Vec<Event>,
    /// `None` while no iteration is in progress.
    selection: Option<Selection>,
}

impl EventCollection {
    /// Capacity of a collection made with [`EventCollection::new`].
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Returns an empty collection with room for [`Self::DEFAULT_CAPACITY`] events.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Returns an empty collection with room for `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            // capacity is only a limit; storage grows on insert
            events: Vec::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            selection: None,
        }
    }

    /// The number of events in the collection.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the collection holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The most events this collection can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The mode of the iteration in progress, or `None` if there is none.
    pub fn iteration_mode(&self) -> Option<IterationMode> {
        self.selection.as_ref().map(|selection| selection.mode)
    }

    /// Appends `event`, ending any iteration in progress.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CollectionFull`] if the collection is already at capacity. The
    /// collection, including any iteration in progress, is left untouched in that case.
    pub fn insert(&mut self, event: Event) -> Result<(), CollectionError> {
        if self.events.len() >= self.capacity {
            return Err(CollectionError::CollectionFull {
                capacity: self.capacity,
            });
        }
        if let Some(selection) = self.selection.take() {
            debug!(mode = %selection.mode, "insert ended iteration in progress");
        }
        self.events.push(event);
        Ok(())
    }

    /// Starts a new pass over all events in the given mode, forgetting any pass in progress.
    pub fn reset(&mut self, mode: IterationMode) {
        self.selection = Some(Selection::new(mode, self.events.len()));
    }

    /// Returns true if an iteration is in progress and has events left to return.
    pub fn has_next(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.remaining() > 0)
    }

    /// Returns the next event of the iteration in progress.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::IterationInactive`] if [`reset`](Self::reset) has not been called
    ///   since the collection was made or last inserted into.
    /// - [`CollectionError::IteratorExhausted`] if every event has already been returned.
    pub fn next_event(&mut self) -> Result<&Event, CollectionError> {
        let selection = self
            .selection
            .as_mut()
            .ok_or(CollectionError::IterationInactive)?;
        let index = selection
            .advance(&self.events)
            .ok_or(CollectionError::IteratorExhausted)?;
        Ok(&self.events[index])
    }

    /// Returns an iterator over the events in the given mode. Unlike
    /// [`reset`](Self::reset)/[`next_event`](Self::next_event), this borrows the collection and
    /// does not affect any iteration in progress.
    pub fn ordered(&self, mode: IterationMode) -> Ordered<'_> {
        Ordered {
            events: &self.events,
            selection: Selection::new(mode, self.events.len()),
        }
    }

    /// Returns an iterator over the events in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Event> {
        self.events.iter()
    }
}

impl Default for EventCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a EventCollection {
    type Item = &'a Event;
    type IntoIter = slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the events of an [`EventCollection`] in one [`IterationMode`]. Created by
/// [`EventCollection::ordered`].
#[derive(Debug, Clone)]
pub struct Ordered<'a> {
    events: &'a [Event],
    selection: Selection,
}

impl<'a> Iterator for Ordered<'a> {
    type Item = &'a Event;

    fn next(&mut self) -> Option<Self::Item> {
        let events = self.events;
        self.selection.advance(events).map(|index| &events[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.selection.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ordered<'_> {}
