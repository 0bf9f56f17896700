//! File-backed recipe store.
//!
//! [`FsRecipeStore`] keeps one `<name>.toml` file per recipe in a single
//! directory. Files are written atomically, so an interrupted save leaves
//! either the previous recipe or the new one on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use dough_types::{RecipeInputs, RecipeOutputs, SavedRecipe};

use crate::atomic::{atomic_write, atomic_write_new};
use crate::error::{Result, StoreError};
use crate::format::{decode_toml, encode_toml};
use crate::names::validate_recipe_name;
use crate::traits::RecipeStore;

const EXTENSION: &str = "toml";

/// A [`RecipeStore`] backed by a directory of TOML files.
#[derive(Debug, Clone)]
pub struct FsRecipeStore {
    root: PathBuf,
}

impl FsRecipeStore {
    /// Open the store at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "opened recipe store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the recipe called `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{EXTENSION}"))
    }

    fn write(&self, recipe: &SavedRecipe, overwrite: bool) -> Result<()> {
        let path = self.path_for(&recipe.name);
        let text = encode_toml(recipe)?;
        let written = if overwrite {
            atomic_write(&path, text.as_bytes())
        } else {
            atomic_write_new(&path, text.as_bytes())
        };
        match written {
            Ok(()) => {
                debug!(name = %recipe.name, path = %path.display(), "saved recipe");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(StoreError::DuplicateName {
                name: recipe.name.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

impl RecipeStore for FsRecipeStore {
    fn save(
        &self,
        name: &str,
        inputs: &RecipeInputs,
        outputs: &RecipeOutputs,
    ) -> Result<SavedRecipe> {
        validate_recipe_name(name)?;
        let recipe = SavedRecipe::new(name, inputs.clone(), *outputs);
        self.write(&recipe, true)?;
        Ok(recipe)
    }

    fn create(
        &self,
        name: &str,
        inputs: &RecipeInputs,
        outputs: &RecipeOutputs,
    ) -> Result<SavedRecipe> {
        validate_recipe_name(name)?;
        let recipe = SavedRecipe::new(name, inputs.clone(), *outputs);
        self.write(&recipe, false)?;
        Ok(recipe)
    }

    fn load(&self, name: &str) -> Result<SavedRecipe> {
        validate_recipe_name(name)?;
        let path = self.path_for(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    name: name.to_string(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(StoreError::CorruptData {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let mut recipe = decode_toml(name, &text).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to decode recipe");
        })?;
        // The file name is the key; a record edited by hand keeps loading.
        if recipe.name != name {
            debug!(stored = %recipe.name, name, "recipe name differs from file name");
            recipe.name = name.to_string();
        }
        debug!(name, path = %path.display(), "loaded recipe");
        Ok(recipe)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) || !path.is_file() {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_recipe_name(name).is_ok() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> Result<bool> {
        validate_recipe_name(name)?;
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => {
                debug!(name, "deleted recipe");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, name: &str) -> Result<bool> {
        validate_recipe_name(name)?;
        Ok(self.path_for(name).is_file())
    }
}
