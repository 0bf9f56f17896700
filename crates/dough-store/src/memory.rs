//! In-memory recipe store for testing and ephemeral use.
//!
//! [`InMemoryRecipeStore`] keeps every recipe in a `BTreeMap` protected by a
//! `RwLock`. Data is lost when the store is dropped.

use std::collections::BTreeMap;
use std::sync::RwLock;

use dough_types::{RecipeInputs, RecipeOutputs, SavedRecipe};

use crate::error::{Result, StoreError};
use crate::names::validate_recipe_name;
use crate::traits::RecipeStore;

/// An in-memory implementation of [`RecipeStore`].
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    recipes: RwLock<BTreeMap<String, SavedRecipe>>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, recipe: SavedRecipe, overwrite: bool) -> Result<SavedRecipe> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        if !overwrite && recipes.contains_key(&recipe.name) {
            return Err(StoreError::DuplicateName { name: recipe.name });
        }
        recipes.insert(recipe.name.clone(), recipe.clone());
        Ok(recipe)
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn save(
        &self,
        name: &str,
        inputs: &RecipeInputs,
        outputs: &RecipeOutputs,
    ) -> Result<SavedRecipe> {
        validate_recipe_name(name)?;
        self.insert(SavedRecipe::new(name, inputs.clone(), *outputs), true)
    }

    fn create(
        &self,
        name: &str,
        inputs: &RecipeInputs,
        outputs: &RecipeOutputs,
    ) -> Result<SavedRecipe> {
        validate_recipe_name(name)?;
        self.insert(SavedRecipe::new(name, inputs.clone(), *outputs), false)
    }

    fn load(&self, name: &str) -> Result<SavedRecipe> {
        validate_recipe_name(name)?;
        let recipes = self.recipes.read().map_err(poisoned)?;
        recipes.get(name).cloned().ok_or_else(|| StoreError::NotFound {
            name: name.to_string(),
        })
    }

    fn list(&self) -> Result<Vec<String>> {
        let recipes = self.recipes.read().map_err(poisoned)?;
        Ok(recipes.keys().cloned().collect())
    }

    fn delete(&self, name: &str) -> Result<bool> {
        validate_recipe_name(name)?;
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        Ok(recipes.remove(name).is_some())
    }

    fn contains(&self, name: &str) -> Result<bool> {
        let recipes = self.recipes.read().map_err(poisoned)?;
        Ok(recipes.contains_key(name))
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Serialization(format!("lock poisoned: {e}"))
}
