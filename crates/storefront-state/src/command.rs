//! Search commands and generation tokens.

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use storefront_commerce::search::{FilterSelection, SearchRequest};

/// Monotonically increasing marker for issued searches.
///
/// Generation 0 is the store's initial state; the first command is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything the gateway needs for one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    pub query: String,
    pub selection: FilterSelection,
    pub page: u32,
    pub page_size: u32,
}

impl SearchParams {
    /// The search body these parameters translate to.
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest::for_selection(self.query.clone(), &self.selection, self.page, self.page_size)
    }
}

/// "Dispatch this search as generation G."
///
/// Returned by every store mutation. Dropping a command is allowed: the state
/// already reflects the mutation, only the refresh is skipped. A search still
/// in flight from before is then discarded when it resolves, and clears the
/// loading flag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a search command does nothing until it is executed"]
pub struct SearchCommand {
    pub generation: Generation,
    pub request: SearchParams,
}

/// A command that passed the staleness check and is now in flight.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub generation: Generation,
    pub request: SearchParams,
    pub(crate) started: Instant,
}

/// What happened to an executed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response became the visible state.
    Applied,
    /// A newer command was issued first; the response was dropped.
    Superseded,
    /// The search failed and the state now shows the error.
    Failed,
}

impl SearchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_ordering() {
        let first = Generation::default().next();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.value(), 2);
        assert_eq!(second.to_string(), "#2");
    }

    #[test]
    fn test_params_to_request() {
        let params = SearchParams {
            query: "boot".to_string(),
            selection: FilterSelection::default(),
            page: 2,
            page_size: 20,
        };
        let request = params.to_request();
        assert_eq!(request.q, "boot");
        assert_eq!(request.offset, 20);
        assert_eq!(request.limit, 20);
    }
}
