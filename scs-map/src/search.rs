//! Address search and autocomplete over a [`GeocodeClient`].
//!
//! Suggestion lookups are cancelled by supersession: every lookup takes a
//! ticket, and a response whose ticket is no longer the latest comes back
//! as [`Lookup::Stale`] instead of overwriting newer results. A plain
//! per-keystroke fetch would let a slow response for "12" land after the
//! answer for "123 Main".

use scs_data::{Coordinate, GeocodeClient, MapError, Result, Suggestion};
use std::cell::Cell;
use std::rc::Rc;

/// Queries must be longer than this (after trimming) to hit the network.
pub const MIN_QUERY_CHARS: usize = 2;

/// Outcome of a suggestion lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Results for the most recent query; replace the visible list wholesale.
    Fresh(Vec<Suggestion>),
    /// A newer lookup was issued while this one was in flight; discard.
    Stale,
}

/// Forward search and suggestions. Cheaply cloneable; clones share the
/// client and the supersession counter.
pub struct GeocodeSearch<G> {
    client: Rc<G>,
    latest: Rc<Cell<u64>>,
}

impl<G> Clone for GeocodeSearch<G> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            latest: Rc::clone(&self.latest),
        }
    }
}

impl<G: GeocodeClient> GeocodeSearch<G> {
    pub fn new(client: G) -> Self {
        Self {
            client: Rc::new(client),
            latest: Rc::new(Cell::new(0)),
        }
    }

    fn next_ticket(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }

    /// Invalidate any lookup still in flight.
    pub fn cancel_pending(&self) {
        self.next_ticket();
    }

    /// Suggestions for the text currently in the search box.
    ///
    /// Short queries resolve to an empty list without a network call. A
    /// failure is only reported if the lookup is still current.
    pub async fn suggest(&self, query: &str) -> Result<Lookup> {
        let ticket = self.next_ticket();
        let query = query.trim();
        if query.chars().count() <= MIN_QUERY_CHARS {
            return Ok(Lookup::Fresh(Vec::new()));
        }

        let result = self.client.forward(query).await;
        if !self.is_current(ticket) {
            log::debug!("Discarding superseded suggestions for {:?}", query);
            return Ok(Lookup::Stale);
        }
        match result {
            Ok(suggestions) => Ok(Lookup::Fresh(suggestions)),
            Err(err) => {
                log::warn!("Error fetching suggestions: {}", err);
                Err(err)
            }
        }
    }

    /// Resolve the top match for `query`.
    ///
    /// Blank input is a no-op (`Ok(None)`); an empty result set is
    /// `MapError::AddressNotFound`. Pending suggestion lookups are
    /// cancelled so they cannot repopulate the list afterwards. A search
    /// overtaken by a newer search, lookup or selection also yields
    /// `Ok(None)`, so it never moves the camera back.
    pub async fn search(&self, query: &str) -> Result<Option<Coordinate>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let ticket = self.next_ticket();

        let result = self.client.forward(query).await;
        if !self.is_current(ticket) {
            log::debug!("Discarding superseded search for {:?}", query);
            return Ok(None);
        }
        let suggestions = result?;
        let first = suggestions
            .first()
            .ok_or_else(|| MapError::AddressNotFound(query.to_string()))?;
        log::info!("Search {:?} resolved to {}", query, first.label);
        Ok(Some(first.coordinate()))
    }

    /// Coordinate of a picked suggestion. No network call; pending lookups
    /// are cancelled.
    pub fn select_suggestion(&self, suggestion: &Suggestion) -> Coordinate {
        self.cancel_pending();
        suggestion.coordinate()
    }
}
