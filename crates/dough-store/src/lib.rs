//! Saved recipe storage for the dough calculator.
//!
//! Recipes are stored by name. A name maps to exactly one [`SavedRecipe`]
//! holding the inputs, the outputs computed from them, and the time of the
//! save.
//!
//! # Overwrite Policy
//!
//! - [`RecipeStore::save`] replaces an existing recipe of the same name.
//! - [`RecipeStore::create`] refuses to, failing with
//!   [`StoreError::DuplicateName`].
//!
//! # Backends
//!
//! - [`InMemoryRecipeStore`]: `BTreeMap` behind a `RwLock`, for tests and
//!   throwaway sessions
//! - [`FsRecipeStore`]: a directory of `<name>.toml` files written
//!   atomically (temp file + rename)
//!
//! # Modules
//!
//! - [`error`]: [`StoreError`]
//! - [`names`]: recipe name validation
//! - [`format`]: TOML/JSON/text encodings, [`ExportFormat`] and
//!   [`read_recipe_file`]
//! - [`traits`]: the [`RecipeStore`] trait
//! - [`atomic`]: crash-safe file writes

pub mod atomic;
pub mod error;
pub mod format;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;

pub use dough_types::SavedRecipe;
pub use error::{Result, StoreError};
pub use format::{read_recipe_file, ExportFormat};
pub use fs::FsRecipeStore;
pub use memory::InMemoryRecipeStore;
pub use names::validate_recipe_name;
pub use traits::RecipeStore;
