//! A Reducer that uses a supplied plain reduce() function.

use crate::error::ReduceError;
use crate::mapreducer::{Reducer, ReducerF};

/// This type implements the Reducer trait for functions that cannot fail. If your reduce
/// function can fail, pass a closure returning `Result` instead; if you need more flexibility,
/// implement Reducer on your own type.
#[derive(Clone, Copy)]
pub struct ClosureReducer {
    reducer: ReducerF,
}

impl ClosureReducer {
    /// Create a new Reducer from the supplied function.
    pub fn new(reducer: ReducerF) -> ClosureReducer {
        ClosureReducer { reducer }
    }
}

impl Reducer for ClosureReducer {
    fn reduce(&self, key: &str, values: &[String]) -> Result<String, ReduceError> {
        Ok((self.reducer)(key, values))
    }
}
