//! Interactive recipe session for the dough calculator.
//!
//! A [`Session`] is the thin adapter between a user interface and the pure
//! calculator: it holds the inputs currently being edited, applies one
//! [`Edit`] at a time, recomputes after every edit, and forwards save, load
//! and export requests to a [`RecipeStore`](dough_store::RecipeStore).
//!
//! The session never caches outputs across edits. The latest calculation,
//! successful or not, is always the result of the current inputs.

pub mod edit;
pub mod error;
pub mod notice;
pub mod session;

pub use edit::{Edit, Field};
pub use error::{Result, SessionError};
pub use notice::describe_clamp;
pub use session::Session;

pub use dough_calc::{CalcError, Calculation};
pub use dough_store::{ExportFormat, StoreError};
pub use dough_types::{FermentationMethod, ProofStage, RecipeInputs, RecipeOutputs, SavedRecipe, YeastType};
