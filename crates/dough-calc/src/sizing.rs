//! Alternative ways of entering the dough size.
//!
//! Recipes are always computed from a total dough weight. These helpers
//! convert the other two common entries into one.

use crate::error::{CalcError, Result};

/// Total dough weight for `count` balls of `ball_weight_grams` each.
pub fn dough_weight_for_balls(count: u32, ball_weight_grams: f64) -> Result<f64> {
    if count == 0 {
        return Err(CalcError::InvalidInput {
            field: "number of balls",
            reason: "must be at least one".into(),
        });
    }
    if !ball_weight_grams.is_finite() || ball_weight_grams <= 0.0 {
        return Err(CalcError::InvalidInput {
            field: "ball weight",
            reason: format!("{ball_weight_grams} g (must be greater than zero)"),
        });
    }
    Ok(f64::from(count) * ball_weight_grams)
}

/// Total dough weight that yields `flour_grams` of flour at the given
/// baker's percentages.
pub fn dough_weight_for_flour(
    flour_grams: f64,
    hydration_percent: f64,
    salt_percent: f64,
    oil_percent: f64,
) -> Result<f64> {
    if !flour_grams.is_finite() || flour_grams <= 0.0 {
        return Err(CalcError::InvalidInput {
            field: "flour weight",
            reason: format!("{flour_grams} g (must be greater than zero)"),
        });
    }
    Ok(flour_grams * (1.0 + (hydration_percent + salt_percent + oil_percent) / 100.0))
}
