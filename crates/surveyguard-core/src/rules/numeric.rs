use num_traits::ToPrimitive;

use crate::{
    results::RuleKind,
    rules::{Cell, CellRule, Violation},
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    Min(f64),
    Max(f64),
}

/// One side of a numeric range. Only typed numbers are checked.
#[derive(Debug, Clone)]
pub struct RangeCheck {
    bound: Bound,
}

impl RangeCheck {
    pub fn min(min: f64) -> Self {
        Self {
            bound: Bound::Min(min),
        }
    }

    pub fn max(max: f64) -> Self {
        Self {
            bound: Bound::Max(max),
        }
    }

    pub fn threshold(&self) -> f64 {
        match self.bound {
            Bound::Min(v) | Bound::Max(v) => v,
        }
    }
}

impl CellRule for RangeCheck {
    fn name(&self) -> &'static str {
        "Range"
    }

    fn kind(&self) -> RuleKind {
        match self.bound {
            Bound::Min(_) => RuleKind::Min,
            Bound::Max(_) => RuleKind::Max,
        }
    }

    fn validate(&self, cell: &Cell<'_>) -> Option<Violation> {
        let v = cell.value.as_f64()?;
        let message = match self.bound {
            Bound::Min(min) if v < min => format!("Value {} < min {}.", cell.value, min),
            Bound::Max(max) if v > max => format!("Value {} > max {}.", cell.value, max),
            _ => return None,
        };
        Some(Violation::new(cell.value.clone(), message))
    }
}

/// Bounds a rule set declares for a column, as f64.
pub(crate) fn numeric_bound<N: ToPrimitive>(value: N) -> Option<f64> {
    value.to_f64().filter(|v| !v.is_nan())
}
