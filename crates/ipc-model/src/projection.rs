//! The three projection windows a classification can carry.

use std::fmt;

/// A validity window of an analysis: the current period or one of up to two
/// forward projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    Current,
    Projected,
    SecondProjected,
}

/// Fixed emission order.
pub const PROJECTIONS: [Projection; 3] = [
    Projection::Current,
    Projection::Projected,
    Projection::SecondProjected,
];

impl Projection {
    /// Human-readable label used in wide column names.
    pub fn label(self) -> &'static str {
        match self {
            Projection::Current => "Current",
            Projection::Projected => "First projection",
            Projection::SecondProjected => "Second projection",
        }
    }

    /// Lowercased label, used as the long-row validity period value and in
    /// wide phase column names.
    pub fn label_lower(self) -> &'static str {
        match self {
            Projection::Current => "current",
            Projection::Projected => "first projection",
            Projection::SecondProjected => "second projection",
        }
    }

    /// Feed key fragment for this projection.
    pub fn key(self) -> &'static str {
        match self {
            Projection::Current => "current",
            Projection::Projected => "projected",
            Projection::SecondProjected => "second_projected",
        }
    }

    /// Suffix appended to per-phase field names for this projection.
    pub fn suffix(self) -> &'static str {
        match self {
            Projection::Current => "",
            Projection::Projected => "_projected",
            Projection::SecondProjected => "_second_projected",
        }
    }

    /// Feed field holding this projection's validity period string.
    pub fn period_field(self) -> String {
        format!("{}_period_dates", self.key())
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_fields() {
        assert_eq!(Projection::Current.period_field(), "current_period_dates");
        assert_eq!(
            Projection::Projected.period_field(),
            "projected_period_dates"
        );
        assert_eq!(
            Projection::SecondProjected.period_field(),
            "second_projected_period_dates"
        );
    }
}
