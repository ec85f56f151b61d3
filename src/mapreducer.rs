//! The Reducer trait and associated types.

use crate::error::ReduceError;

/// Infallible reduce() function type. Takes a key and all of its values, in the order they
/// were collected, and returns the reduced value.
pub type ReducerF = fn(&str, &[String]) -> String;

pub trait Reducer {
    /// Takes one key and one or more values and returns exactly one value.
    ///
    /// Called exactly once per distinct key of a reduce task, in ascending key order. An
    /// implementation is expected to be a pure function of its arguments; an `Err` aborts the
    /// whole reduce task.
    fn reduce(&self, key: &str, values: &[String]) -> Result<String, ReduceError>;
}

/// Any closure `|key, values| -> Result<String, E>` is a Reducer.
impl<F, E> Reducer for F
where
    F: Fn(&str, &[String]) -> Result<String, E>,
    E: Into<ReduceError>,
{
    fn reduce(&self, key: &str, values: &[String]) -> Result<String, ReduceError> {
        self(key, values).map_err(Into::into)
    }
}
