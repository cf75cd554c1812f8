// Match engine: collector → pairwise scorer → ranker/explainer.
// Scoring and ranking are pure; only the collector touches storage.

pub mod collector;
pub mod engine;
pub mod handlers;
pub mod ranker;
pub mod scorer;
pub mod similarity;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{MatchError, Matcher};
