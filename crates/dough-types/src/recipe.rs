use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fermentation::{FermentationMethod, ProofStage, YeastType};

/// Everything the user enters for one recipe.
///
/// Hydration, salt and oil are baker's percentages (relative to flour
/// weight). `temperature_celsius` and `duration_hours` describe the only
/// stage for [`FermentationMethod::Room`] and [`FermentationMethod::Fridge`];
/// for [`FermentationMethod::Both`] they describe the room stage and
/// `cold_proof` holds the refrigerated stage that follows it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeInputs {
    pub dough_weight_grams: f64,
    pub hydration_percent: f64,
    #[serde(default)]
    pub salt_percent: f64,
    #[serde(default)]
    pub oil_percent: f64,
    pub fermentation_method: FermentationMethod,
    pub temperature_celsius: f64,
    pub duration_hours: f64,
    pub yeast_type: YeastType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cold_proof: Option<ProofStage>,
}

impl RecipeInputs {
    /// A single-stage recipe with no salt or oil.
    pub fn new(
        dough_weight_grams: f64,
        hydration_percent: f64,
        fermentation_method: FermentationMethod,
        stage: ProofStage,
        yeast_type: YeastType,
    ) -> Self {
        Self {
            dough_weight_grams,
            hydration_percent,
            salt_percent: 0.0,
            oil_percent: 0.0,
            fermentation_method,
            temperature_celsius: stage.temperature_celsius,
            duration_hours: stage.duration_hours,
            yeast_type,
            cold_proof: None,
        }
    }

    pub fn with_salt(mut self, salt_percent: f64) -> Self {
        self.salt_percent = salt_percent;
        self
    }

    pub fn with_oil(mut self, oil_percent: f64) -> Self {
        self.oil_percent = oil_percent;
        self
    }

    /// Switch to a two-stage proof: the current stage becomes the room stage
    /// and `cold` follows it.
    pub fn with_cold_proof(mut self, cold: ProofStage) -> Self {
        self.fermentation_method = FermentationMethod::Both;
        self.cold_proof = Some(cold);
        self
    }

    /// The stage stored in `temperature_celsius` / `duration_hours`.
    pub fn primary_stage(&self) -> ProofStage {
        ProofStage::new(self.temperature_celsius, self.duration_hours)
    }

    /// The room-temperature stage, if the method has one.
    pub fn room_stage(&self) -> Option<ProofStage> {
        match self.fermentation_method {
            FermentationMethod::Room | FermentationMethod::Both => Some(self.primary_stage()),
            FermentationMethod::Fridge => None,
        }
    }

    /// The refrigerated stage, if the method has one.
    pub fn cold_stage(&self) -> Option<ProofStage> {
        match self.fermentation_method {
            FermentationMethod::Room => None,
            FermentationMethod::Fridge => Some(self.primary_stage()),
            FermentationMethod::Both => self.cold_proof,
        }
    }

    /// Total proof time across all stages.
    pub fn total_hours(&self) -> f64 {
        self.room_stage().map_or(0.0, |s| s.duration_hours)
            + self.cold_stage().map_or(0.0, |s| s.duration_hours)
    }

    /// Sum of all baker's percentages, flour included (as 1.0).
    pub fn total_ratio(&self) -> f64 {
        1.0 + (self.hydration_percent + self.salt_percent + self.oil_percent) / 100.0
    }
}

impl Default for RecipeInputs {
    /// Four 250 g Neapolitan balls: 65% hydration, 2.5% salt, a short room
    /// proof followed by two days in the fridge.
    fn default() -> Self {
        RecipeInputs::new(
            1000.0,
            65.0,
            FermentationMethod::Room,
            ProofStage::new(21.0, 2.0),
            YeastType::Instant,
        )
        .with_salt(2.5)
        .with_cold_proof(ProofStage::new(4.0, 48.0))
    }
}

/// Ingredient weights derived from [`RecipeInputs`], in grams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeOutputs {
    pub flour_grams: f64,
    pub water_grams: f64,
    pub salt_grams: f64,
    pub oil_grams: f64,
    pub yeast_grams: f64,
}

impl RecipeOutputs {
    /// Flour, water, salt and oil. Yeast is excluded: it is dosed on top of
    /// the target dough weight.
    pub fn dough_total(&self) -> f64 {
        self.flour_grams + self.water_grams + self.salt_grams + self.oil_grams
    }
}

/// A recipe as persisted by a recipe store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub inputs: RecipeInputs,
    pub outputs: RecipeOutputs,
}

impl SavedRecipe {
    pub fn new(name: impl Into<String>, inputs: RecipeInputs, outputs: RecipeOutputs) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            inputs,
            outputs,
        }
    }
}
