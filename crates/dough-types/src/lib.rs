//! Shared data model for the dough calculator.
//!
//! Every other dough crate depends on `dough-types`. The types here carry no
//! behaviour beyond parsing, display and cheap structural checks; the
//! arithmetic lives in `dough-calc` and the fermentation lookup in
//! `dough-yeast`.
//!
//! # Key Types
//!
//! - [`RecipeInputs`]: what the user enters: size, baker's percentages, proof
//! - [`ProofStage`]: one fermentation stage (temperature and hours)
//! - [`RecipeOutputs`]: ingredient weights derived from the inputs
//! - [`SavedRecipe`]: a named, timestamped record of inputs and outputs
//! - [`FermentationMethod`] / [`YeastType`]: the two enumerated choices

pub mod error;
pub mod fermentation;
pub mod recipe;

pub use error::TypeError;
pub use fermentation::{FermentationMethod, ProofStage, YeastType};
pub use recipe::{RecipeInputs, RecipeOutputs, SavedRecipe};
