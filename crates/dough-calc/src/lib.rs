//! Recipe calculator for the dough workspace.
//!
//! Turns [`RecipeInputs`](dough_types::RecipeInputs) into
//! [`RecipeOutputs`](dough_types::RecipeOutputs) using baker's percentages:
//! the target dough weight is split across flour, water, salt and oil by
//! their percentage-of-flour definitions, and the yeast dose comes from the
//! [`YeastModel`](dough_yeast::YeastModel).
//!
//! The calculation is a pure function of the inputs and the (immutable)
//! reference table. Nothing is cached between calls.
//!
//! # Modules
//!
//! - [`calculator`]: [`Calculator`], [`compute`], [`compute_detailed`]
//! - [`sizing`]: alternative ways of entering the dough size
//! - [`card`]: the plain-text recipe card
//! - [`error`]: [`CalcError`]

pub mod calculator;
pub mod card;
pub mod error;
pub mod sizing;

pub use calculator::{compute, compute_detailed, Calculation, Calculator};
pub use card::recipe_card;
pub use error::{CalcError, Result};
pub use sizing::{dough_weight_for_balls, dough_weight_for_flour};
