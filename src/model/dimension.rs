// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Unit-of-measure signatures attached to variables.
//!
//! A `Dimension` is the exponent vector of a quantity over the mechanical
//! base units (mass, length, time). It exists to gate which variables may be
//! declared equal or substituted; no unit arithmetic is performed here.

use serde::Deserialize;
use std::fmt;

/// The dimensional signature of a variable: M^mass L^length T^time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Dimension {
    pub mass: i8,
    pub length: i8,
    pub time: i8,
}

impl Dimension {
    pub const fn new(mass: i8, length: i8, time: i8) -> Self {
        Self { mass, length, time }
    }

    /// A pure number (all exponents zero)
    pub const fn dimensionless() -> Self {
        Self::new(0, 0, 0)
    }

    /// Whether two signatures describe the same kind of quantity.
    ///
    /// Plain equality; kept as a named operation because it is the contract
    /// the drag layer depends on.
    pub fn equal_units(&self, other: &Dimension) -> bool {
        self == other
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Dimension::dimensionless() {
            return write!(f, "1");
        }
        let mut first = true;
        for (label, exp) in [("M", self.mass), ("L", self.length), ("T", self.time)] {
            if exp == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "{label}")?;
            } else {
                write!(f, "{label}^{exp}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_units_matches_equality() {
        let energy = Dimension::new(1, 2, -2);
        let work = Dimension::new(1, 2, -2);
        let speed = Dimension::new(0, 1, -1);

        assert!(energy.equal_units(&work));
        assert!(!energy.equal_units(&speed));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Dimension::dimensionless().to_string(), "1");
        assert_eq!(Dimension::new(1, 0, 0).to_string(), "M");
        assert_eq!(Dimension::new(1, 2, -2).to_string(), "M L^2 T^-2");
    }
}
