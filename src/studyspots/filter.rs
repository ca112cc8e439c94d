//! # Filter Engine
//!
//! [`apply_filters`] reduces a collection to the records matching a
//! [`FilterState`]. It is pure and order-preserving: matching records keep
//! their relative input order, nothing is re-sorted.
//!
//! ## Inclusion Rules
//!
//! A record is included when no constraint rejects it:
//!
//! - **Categorical fields**: each [`Choice::Only`] value must equal the record's
//!   field exactly (case-sensitive, no normalization). A record lacking the
//!   field fails the constraint. Fields that are not part of a record's shape
//!   (a mall has no noise level) are not checked for that shape.
//! - **Search**: when the query is non-empty after trimming, the lower-cased
//!   query must be a substring of the lower-cased name or description.
//!
//! Nothing here returns an error. Bad input degrades to "no constraint" (an
//! unparseable control value) or "no match" (a record missing a field).

use crate::model::{ChargingPorts, Listing, Mall, NoiseLevel, Spot, Wifi};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Sentinel used by UI controls to mean "no constraint".
pub const ANY: &str = "any";

/// A single field constraint: either unconstrained or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Any,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::Any
    }
}

impl<T: FromStr> Choice<T> {
    /// Parses a UI control value.
    ///
    /// `"any"`, empty and unparseable values all yield [`Choice::Any`].
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() || raw == ANY {
            return Choice::Any;
        }
        match raw.parse() {
            Ok(value) => Choice::Only(value),
            Err(_) => {
                tracing::debug!(value = raw, "ignoring unknown filter value");
                Choice::Any
            }
        }
    }
}

impl<T> Choice<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Choice::Any)
    }

    /// Whether a record's field value satisfies this constraint.
    pub fn admits<U>(&self, value: Option<&U>) -> bool
    where
        T: Borrow<U>,
        U: PartialEq + ?Sized,
    {
        match self {
            Choice::Any => true,
            Choice::Only(wanted) => value.is_some_and(|v| wanted.borrow() == v),
        }
    }
}

/// The complete set of constraints for one render cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Choice<String>,
    pub area: Choice<String>,
    pub noise: Choice<NoiseLevel>,
    pub charging: Choice<ChargingPorts>,
    pub wifi: Choice<Wifi>,
    pub search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, raw: &str) -> Self {
        self.category = Choice::parse(raw);
        self
    }

    pub fn area(mut self, raw: &str) -> Self {
        self.area = Choice::parse(raw);
        self
    }

    pub fn noise(mut self, raw: &str) -> Self {
        self.noise = Choice::parse(raw);
        self
    }

    pub fn charging(mut self, raw: &str) -> Self {
        self.charging = Choice::parse(raw);
        self
    }

    pub fn wifi(mut self, raw: &str) -> Self {
        self.wifi = Choice::parse(raw);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    /// True when the state imposes no constraint at all.
    pub fn is_unconstrained(&self) -> bool {
        self.category.is_any()
            && self.area.is_any()
            && self.noise.is_any()
            && self.charging.is_any()
            && self.wifi.is_any()
            && self.search.trim().is_empty()
    }
}

/// A record shape that knows which constraints apply to it.
pub trait Filterable {
    fn matches(&self, state: &FilterState) -> bool;
}

fn matches_search<L: Listing>(item: &L, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    item.name().to_lowercase().contains(&query)
        || item.description().to_lowercase().contains(&query)
}

impl Filterable for Spot {
    fn matches(&self, state: &FilterState) -> bool {
        state.category.admits(self.category.as_deref())
            && state.area.admits(Some(self.area.as_str()))
            && state.noise.admits(self.noise_level.as_ref())
            && state.charging.admits(self.charging_ports.as_ref())
            && state.wifi.admits(self.wifi.as_ref())
            && matches_search(self, &state.search)
    }
}

impl Filterable for Mall {
    fn matches(&self, state: &FilterState) -> bool {
        state.area.admits(Some(self.area.as_str())) && matches_search(self, &state.search)
    }
}

/// Returns the records matching `state`, in input order.
pub fn apply_filters<T>(items: &[T], state: &FilterState) -> Vec<T>
where
    T: Filterable + Clone,
{
    items
        .iter()
        .filter(|item| item.matches(state))
        .cloned()
        .collect()
}

/// Sorted, de-duplicated area names, used to populate the area filter options.
pub fn distinct_areas<L: Listing>(items: &[L]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.area().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
