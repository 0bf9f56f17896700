use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use dough_session::{FermentationMethod, ProofStage, RecipeInputs, YeastType};

const CONFIG_FILE: &str = "dough.toml";

/// Settings read from `dough.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding saved recipes.
    pub store_dir: Option<PathBuf>,
    /// Alternative yeast reference table.
    pub yeast_table: Option<PathBuf>,
    /// Recipe every session and command starts from.
    pub default_recipe: DefaultRecipe,
}

/// The starting recipe. Sized by ball count unless `dough_weight_grams` is
/// set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultRecipe {
    pub balls: u32,
    pub ball_weight_grams: f64,
    pub dough_weight_grams: Option<f64>,
    pub hydration_percent: f64,
    pub salt_percent: f64,
    pub oil_percent: f64,
    pub yeast_type: YeastType,
    pub fermentation_method: FermentationMethod,
    pub room_temperature_celsius: f64,
    pub room_hours: f64,
    pub cold_temperature_celsius: f64,
    pub cold_hours: f64,
}

impl Default for DefaultRecipe {
    fn default() -> Self {
        Self {
            balls: 4,
            ball_weight_grams: 250.0,
            dough_weight_grams: None,
            hydration_percent: 65.0,
            salt_percent: 2.5,
            oil_percent: 0.0,
            yeast_type: YeastType::Instant,
            fermentation_method: FermentationMethod::Both,
            room_temperature_celsius: 21.0,
            room_hours: 2.0,
            cold_temperature_celsius: 4.0,
            cold_hours: 48.0,
        }
    }
}

impl DefaultRecipe {
    pub fn dough_weight_grams(&self) -> f64 {
        self.dough_weight_grams
            .unwrap_or(f64::from(self.balls) * self.ball_weight_grams)
    }

    /// Recipe inputs for this default. A room-only default still carries its
    /// cold stage so switching method later restores it.
    pub fn to_inputs(&self) -> RecipeInputs {
        let room = ProofStage::new(self.room_temperature_celsius, self.room_hours);
        let cold = ProofStage::new(self.cold_temperature_celsius, self.cold_hours);
        let primary = match self.fermentation_method {
            FermentationMethod::Fridge => cold,
            FermentationMethod::Room | FermentationMethod::Both => room,
        };
        let mut inputs = RecipeInputs::new(
            self.dough_weight_grams(),
            self.hydration_percent,
            self.fermentation_method,
            primary,
            self.yeast_type,
        )
        .with_salt(self.salt_percent)
        .with_oil(self.oil_percent);
        if self.fermentation_method != FermentationMethod::Fridge {
            inputs.cold_proof = Some(cold);
        }
        inputs
    }
}

impl AppConfig {
    /// Load from `explicit`, else from the default location.
    ///
    /// A missing or unreadable file falls back to defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> Self {
        let Some(path) = explicit.map(Path::to_path_buf).or_else(Self::path) else {
            return Self::default();
        };
        if !path.exists() {
            if explicit.is_some() {
                tracing::warn!("Config file {:?} does not exist, using defaults", path);
            }
            return Self::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Self::default();
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Default config location: `<config dir>/dough/dough.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dough").join(CONFIG_FILE))
    }

    /// Recipe store directory: `override_dir`, then `store_dir`, then
    /// `<data dir>/dough/recipes`, then `./recipes`.
    pub fn store_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.store_dir.clone())
            .or_else(|| dirs::data_dir().map(|dir| dir.join("dough").join("recipes")))
            .unwrap_or_else(|| PathBuf::from("recipes"))
    }
}
