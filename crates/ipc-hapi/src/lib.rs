pub mod classify;
pub mod dedupe;
pub mod matcher;
pub mod record;
pub mod resolve;

pub use classify::{Classification, MatchTarget, classify};
pub use dedupe::resolve_duplicates;
pub use matcher::{MatchResult, PcodeMatcher};
pub use record::{HapiRecord, Observation, PhaseValue};
pub use resolve::HapiResolver;
