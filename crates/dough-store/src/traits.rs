//! The [`RecipeStore`] trait defining the recipe storage interface.

use std::path::Path;

use tracing::debug;

use dough_types::{RecipeInputs, RecipeOutputs, SavedRecipe};

use crate::atomic::atomic_write;
use crate::error::Result;
use crate::format::ExportFormat;

/// Storage backend for named recipes.
///
/// Implementations must be thread-safe (`Send + Sync`). Every name passed in
/// is validated with [`validate_recipe_name`](crate::validate_recipe_name)
/// before it touches storage.
pub trait RecipeStore: Send + Sync {
    /// Store a recipe under `name`, replacing any recipe already there.
    fn save(&self, name: &str, inputs: &RecipeInputs, outputs: &RecipeOutputs)
        -> Result<SavedRecipe>;

    /// Store a recipe under `name` only if the name is free.
    ///
    /// Fails with [`StoreError::DuplicateName`](crate::StoreError::DuplicateName)
    /// otherwise.
    fn create(
        &self,
        name: &str,
        inputs: &RecipeInputs,
        outputs: &RecipeOutputs,
    ) -> Result<SavedRecipe>;

    /// Read the recipe stored under `name`.
    ///
    /// Fails with `NotFound` for unknown names and `CorruptData` when the
    /// stored record cannot be decoded.
    fn load(&self, name: &str) -> Result<SavedRecipe>;

    /// Names of all stored recipes, sorted.
    ///
    /// Listing never decodes records, so a corrupt recipe still appears.
    fn list(&self) -> Result<Vec<String>>;

    /// Delete a recipe. Returns `Ok(true)` if it existed.
    fn delete(&self, name: &str) -> Result<bool>;

    /// Write the recipe stored under `name` to `destination`.
    ///
    /// The destination is replaced atomically if it exists. The store itself
    /// is not modified.
    fn export(&self, name: &str, destination: &Path, format: ExportFormat) -> Result<()> {
        let recipe = self.load(name)?;
        let rendered = format.render(&recipe)?;
        atomic_write(destination, rendered.as_bytes())?;
        debug!(name, %format, destination = %destination.display(), "exported recipe");
        Ok(())
    }

    /// Returns `true` if a recipe is stored under `name`.
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|n| n == name))
    }
}
