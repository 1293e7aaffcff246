use core::fmt;
use serde::Serialize;

use super::error::EventError;
use super::event::generate;
use super::source::RandomSource;
use super::table::FrequencyTable;

/// A user-facing batch of probabilistic events (coin flips, dice rolls).
///
/// Implementors fix the outcome alphabet, may add their own validation on top
/// of the shared event-count check, and decide how a result table is shown.
pub trait EventAction {
    fn event_count(&self) -> i64;

    fn validate(&self) -> Result<(), EventError> {
        Ok(())
    }

    fn outcomes(&self) -> &'static [&'static str];

    fn render(&self, table: &FrequencyTable) -> String;
}

/// Result of a validated and executed [`EventAction`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventReport {
    pub event_count: u64,
    pub outcomes: FrequencyTable,
    #[serde(skip)]
    rendered: String,
}

impl EventReport {
    pub fn table(&self) -> &FrequencyTable {
        &self.outcomes
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for EventReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// Checks the event count, then the action's own rules, and only when both
/// pass draws, aggregates and renders the events.
pub fn validate_and_execute<A, S>(action: &A, source: S) -> Result<EventReport, EventError>
where
    A: EventAction + ?Sized,
    S: RandomSource + Send,
{
    let event_count = positive_event_count(action.event_count())?;
    action.validate()?;

    let table = generate(action.event_count(), action.outcomes(), source)?;
    let rendered = action.render(&table);
    Ok(EventReport {
        event_count,
        outcomes: table,
        rendered,
    })
}

pub(crate) fn positive_event_count(count: i64) -> Result<u64, EventError> {
    if count < 1 {
        return Err(EventError::InvalidEventCount { count });
    }
    Ok(count as u64)
}
