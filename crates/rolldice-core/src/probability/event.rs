use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use tracing::{Level, event};

use super::error::EventError;
use super::source::RandomSource;
use super::table::FrequencyTable;

type Draw<'a> = Result<&'a str, EventError>;

/// A batch of independent draws from a fixed outcome alphabet.
///
/// Built fresh for every request and consumed by [`evaluate`](Self::evaluate)
/// or [`draw_one`](Self::draw_one).
pub struct ProbabilisticEvent<'a, T, S> {
    event_count: usize,
    outcomes: &'a [T],
    source: S,
}

impl<'a, T, S> ProbabilisticEvent<'a, T, S>
where
    T: AsRef<str> + Sync,
    S: RandomSource + Send,
{
    pub fn new(event_count: usize, outcomes: &'a [T], source: S) -> Result<Self, EventError> {
        if outcomes.is_empty() {
            return Err(EventError::InvalidPossibilities);
        }
        Ok(Self {
            event_count,
            outcomes,
            source,
        })
    }

    /// A single-draw event, used when one coin or die is shown on its own.
    pub fn single(outcomes: &'a [T], source: S) -> Result<Self, EventError> {
        Self::new(1, outcomes, source)
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn outcomes(&self) -> &'a [T] {
        self.outcomes
    }

    /// Runs every draw and aggregates the labels into a table.
    ///
    /// Draws are produced on a scoped worker thread and handed to the calling
    /// thread over a rendezvous channel, so at most one event is in flight.
    /// The channel closes after exactly `event_count` draws (or the first
    /// failing one) and the table is returned once the producer has joined.
    pub fn evaluate(self) -> Result<FrequencyTable, EventError> {
        let event_count = self.event_count;
        event!(
            target: "rolldice::engine",
            Level::DEBUG,
            event_count = event_count as u64,
            outcomes = self.outcomes.len() as u64,
            "evaluating probabilistic event"
        );

        let (sender, receiver) = mpsc::sync_channel::<Draw<'a>>(0);
        let table = thread::scope(|scope| {
            scope.spawn(move || self.produce(sender));
            consume(receiver)
        })?;

        debug_assert_eq!(table.total(), event_count as u64);
        Ok(table)
    }

    /// Draws one label without building a table.
    pub fn draw_one(self) -> Result<&'a str, EventError> {
        let outcomes = self.outcomes;
        let index = self.draw_index()?;
        Ok(outcomes[index].as_ref())
    }

    /// Draws one index into the outcome alphabet.
    pub fn draw_index(mut self) -> Result<usize, EventError> {
        self.next_index()
    }

    fn next_index(&mut self) -> Result<usize, EventError> {
        let outcomes = self.outcomes.len();
        let index = self.source.next_index(outcomes);
        if index >= outcomes {
            return Err(EventError::SourceOutOfRange { index, outcomes });
        }
        Ok(index)
    }

    fn next_label(&mut self) -> Draw<'a> {
        let outcomes: &'a [T] = self.outcomes;
        let index = self.next_index()?;
        Ok(outcomes[index].as_ref())
    }

    fn produce(mut self, sender: SyncSender<Draw<'a>>) {
        for _ in 0..self.event_count {
            let draw = self.next_label();
            let failed = draw.is_err();
            if sender.send(draw).is_err() || failed {
                return;
            }
        }
    }
}

fn consume(receiver: Receiver<Draw<'_>>) -> Result<FrequencyTable, EventError> {
    let mut table = FrequencyTable::new();
    for draw in receiver {
        table.record(draw?);
    }
    Ok(table)
}

/// Generates `event_count` outcomes and returns how often each label occurred.
///
/// Zero events yield an empty table; a negative count or an empty alphabet is
/// rejected.
pub fn generate<T, S>(
    event_count: i64,
    outcomes: &[T],
    source: S,
) -> Result<FrequencyTable, EventError>
where
    T: AsRef<str> + Sync,
    S: RandomSource + Send,
{
    let count = usize::try_from(event_count)
        .map_err(|_| EventError::InvalidEventCount { count: event_count })?;
    ProbabilisticEvent::new(count, outcomes, source)?.evaluate()
}
