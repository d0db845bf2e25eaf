//! The fixed IPC phase vocabulary and its feed field naming.
//!
//! The feed spreads per-phase values over flat fields whose names combine a
//! phase prefix with a projection suffix, e.g. `phase3_population_projected`
//! or `p3plus_percentage`. The `estimated` prefix covers the whole analyzed
//! population ("all").

use std::fmt;

/// One severity phase of a classification, including the "all analyzed"
/// pseudo-phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    All,
    ThreePlus,
    One,
    Two,
    Three,
    Four,
    Five,
}

/// Fixed emission order: all, 3+, then phases 1 through 5.
pub const PHASES: [Phase; 7] = [
    Phase::All,
    Phase::ThreePlus,
    Phase::One,
    Phase::Two,
    Phase::Three,
    Phase::Four,
    Phase::Five,
];

impl Phase {
    /// Label used in long rows and wide column names.
    pub fn label(self) -> &'static str {
        match self {
            Phase::All => "all",
            Phase::ThreePlus => "3+",
            Phase::One => "1",
            Phase::Two => "2",
            Phase::Three => "3",
            Phase::Four => "4",
            Phase::Five => "5",
        }
    }

    /// Feed field prefix for this phase.
    pub fn prefix(self) -> &'static str {
        match self {
            Phase::All => "estimated",
            Phase::ThreePlus => "p3plus",
            Phase::One => "phase1",
            Phase::Two => "phase2",
            Phase::Three => "phase3",
            Phase::Four => "phase4",
            Phase::Five => "phase5",
        }
    }

    /// Feed field holding the population count for this phase under the
    /// given projection suffix. The `3+` aggregate uses a bare `p3plus`
    /// field rather than the `{prefix}_population` pattern.
    pub fn population_field(self, suffix: &str) -> String {
        match self {
            Phase::ThreePlus => format!("p3plus{suffix}"),
            _ => format!("{}_population{suffix}", self.prefix()),
        }
    }

    /// Feed field holding the percentage for this phase under the given
    /// projection suffix.
    pub fn percentage_field(self, suffix: &str) -> String {
        format!("{}_percentage{suffix}", self.prefix())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
