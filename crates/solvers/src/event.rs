use log::debug;
use optiviz_core::{IterationRecord, Observer};

use crate::Method;

/// Emitted by every method after it appends an iteration record.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// The method that is running.
    pub method: Method,

    /// The record that was just appended to the trace.
    pub record: &'a IterationRecord,
}

/// Actions an observer can take while a method runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and return the best point found so far.
    StopEarly,
}

/// Appends `record` to the records of a running method and shows it to the
/// observer. The records become the result's read-only [`Trace`](optiviz_core::Trace).
pub(crate) fn record_and_observe<Obs>(
    method: Method,
    records: &mut Vec<IterationRecord>,
    record: IterationRecord,
    observer: &mut Obs,
) -> Option<Action>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    records.push(record);
    let record = &records[records.len() - 1];
    debug!(
        "{} iter {}: best x = {:.10}, f = {:.10}, error = {:.3e}",
        method.id(),
        record.iter,
        record.best.x,
        record.best.value,
        record.error,
    );
    observer.observe(&Event { method, record })
}
