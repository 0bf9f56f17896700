//! Recipe encodings.
//!
//! TOML is the store's own format. TOML and JSON files can be read back with
//! [`read_recipe_file`]; the plain-text recipe card is export-only.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use dough_calc::recipe_card;
use dough_types::SavedRecipe;

use crate::error::{Result, StoreError};

/// Target format of [`RecipeStore::export`](crate::RecipeStore::export).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// The store format, loadable again.
    #[default]
    Toml,
    Json,
    /// The human-readable recipe card.
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }

    pub fn render(&self, recipe: &SavedRecipe) -> Result<String> {
        match self {
            Self::Toml => encode_toml(recipe),
            Self::Json => serde_json::to_string_pretty(recipe)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            Self::Text => Ok(format!(
                "{}\nSaved {}\n\n{}\n",
                recipe.name,
                recipe.created_at.format("%Y-%m-%d %H:%M UTC"),
                recipe_card(&recipe.inputs, &recipe.outputs)
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!("unknown export format '{other}', expected toml, json, text")),
        }
    }
}

/// Encode a recipe in the store format.
pub fn encode_toml(recipe: &SavedRecipe) -> Result<String> {
    toml::to_string_pretty(recipe).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decode a recipe stored under `name`.
pub fn decode_toml(name: &str, text: &str) -> Result<SavedRecipe> {
    toml::from_str(text).map_err(|e| StoreError::CorruptData {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Read a recipe from a TOML or JSON file, e.g. one written by
/// [`RecipeStore::export`](crate::RecipeStore::export).
///
/// Files ending in `.json` are decoded as JSON, everything else as TOML.
/// Decoding failures are reported as `CorruptData` naming the file.
pub fn read_recipe_file(path: &Path) -> Result<SavedRecipe> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&text).map_err(|e| StoreError::CorruptData {
            name: path.display().to_string(),
            reason: e.to_string(),
        })
    } else {
        decode_toml(&path.display().to_string(), &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dough_calc::compute;
    use dough_types::RecipeInputs;

    fn sample() -> SavedRecipe {
        let inputs = RecipeInputs::default();
        let outputs = compute(&inputs).unwrap();
        SavedRecipe::new("sample", inputs, outputs)
    }

    #[test]
    fn toml_round_trips_exactly() {
        let recipe = sample();
        let text = encode_toml(&recipe).unwrap();
        assert_eq!(decode_toml("sample", &text).unwrap(), recipe);
    }

    #[test]
    fn toml_is_human_readable() {
        let text = encode_toml(&sample()).unwrap();
        assert!(text.contains("name = \"sample\""));
        assert!(text.contains("[inputs]"));
        assert!(text.contains("fermentation_method = \"both\""));
        assert!(text.contains("[outputs]"));
    }

    #[test]
    fn garbage_is_corrupt() {
        let err = decode_toml("junk", "flour = [").unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { ref name, .. } if name == "junk"));
    }

    #[test]
    fn missing_outputs_is_corrupt() {
        let text = encode_toml(&sample()).unwrap();
        let truncated = text.split("[outputs]").next().unwrap();
        assert!(matches!(
            decode_toml("sample", truncated),
            Err(StoreError::CorruptData { .. })
        ));
    }

    #[test]
    fn json_export_is_readable_back() {
        let recipe = sample();
        let json = ExportFormat::Json.render(&recipe).unwrap();
        let back: SavedRecipe = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, recipe.name);
        assert_eq!(back.created_at, recipe.created_at);
        assert_eq!(back.inputs, recipe.inputs);
        assert!((back.outputs.flour_grams - recipe.outputs.flour_grams).abs() < 1e-9);
    }

    #[test]
    fn text_contains_card() {
        let text = ExportFormat::Text.render(&sample()).unwrap();
        assert!(text.starts_with("sample\nSaved "));
        assert!(text.contains("Cold Proof: 48 hours at 4.0°C"));
    }

    #[test]
    fn exported_files_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let recipe = sample();
        for format in [ExportFormat::Toml, ExportFormat::Json] {
            let path = dir.path().join(format!("sample.{}", format.extension()));
            std::fs::write(&path, format.render(&recipe).unwrap()).unwrap();
            let back = read_recipe_file(&path).unwrap();
            assert_eq!(back.name, "sample");
            assert_eq!(back.inputs, recipe.inputs);
        }
    }

    #[test]
    fn text_card_does_not_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, ExportFormat::Text.render(&sample()).unwrap()).unwrap();
        assert!(matches!(
            read_recipe_file(&path),
            Err(StoreError::CorruptData { .. })
        ));
        assert!(matches!(
            read_recipe_file(&dir.path().join("missing.toml")),
            Err(StoreError::Io(_))
        ));
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("TXT".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("yaml".parse::<ExportFormat>().is_err());
    }
}
