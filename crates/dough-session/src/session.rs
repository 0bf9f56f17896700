use std::path::Path;

use tracing::debug;

use dough_calc::{
    dough_weight_for_balls, dough_weight_for_flour, recipe_card, CalcError, Calculation,
    Calculator,
};
use dough_store::{read_recipe_file, ExportFormat, RecipeStore};
use dough_types::{FermentationMethod, ProofStage, RecipeInputs, RecipeOutputs, SavedRecipe};

use crate::edit::Edit;
use crate::error::{Result, SessionError};
use crate::notice::describe_clamp;

/// A recipe being edited, bound to a calculator and a recipe store.
///
/// Both proof stages are kept at all times. Only the stages the current
/// method uses reach the calculator; the other one waits until the method
/// is switched back.
pub struct Session<'m, S> {
    calculator: Calculator<'m>,
    store: S,
    inputs: RecipeInputs,
    room: ProofStage,
    cold: ProofStage,
    latest: std::result::Result<Calculation, CalcError>,
    current_name: Option<String>,
}

impl<'m, S: RecipeStore> Session<'m, S> {
    /// Start a session on `inputs` and compute it straight away.
    pub fn new(calculator: Calculator<'m>, store: S, mut inputs: RecipeInputs) -> Self {
        let (room, cold) = stages_of(&inputs, None);
        place_stages(&mut inputs, room, cold);
        let latest = calculator.compute_detailed(&inputs);
        Self {
            calculator,
            store,
            inputs,
            room,
            cold,
            latest,
            current_name: None,
        }
    }

    // ---- Editing ----

    /// Apply one edit and recompute.
    ///
    /// The edited inputs are kept even when the recompute fails, so the
    /// user can correct the field. Sizing edits (balls, flour) that cannot
    /// be turned into a dough weight leave the inputs untouched.
    pub fn apply(&mut self, edit: Edit) -> std::result::Result<&Calculation, CalcError> {
        debug!(?edit, "applying edit");
        match edit {
            Edit::DoughWeight(grams) => self.inputs.dough_weight_grams = grams,
            Edit::Balls {
                count,
                ball_weight_grams,
            } => {
                self.inputs.dough_weight_grams = dough_weight_for_balls(count, ball_weight_grams)?;
            }
            Edit::FlourWeight(grams) => {
                self.inputs.dough_weight_grams = dough_weight_for_flour(
                    grams,
                    self.inputs.hydration_percent,
                    self.inputs.salt_percent,
                    self.inputs.oil_percent,
                )?;
            }
            Edit::Hydration(percent) => self.inputs.hydration_percent = percent,
            Edit::Salt(percent) => self.inputs.salt_percent = percent,
            Edit::Oil(percent) => self.inputs.oil_percent = percent,
            Edit::Yeast(yeast) => self.inputs.yeast_type = yeast,
            Edit::Method(method) => self.inputs.fermentation_method = method,
            Edit::RoomTemperature(t) => self.room.temperature_celsius = t,
            Edit::RoomHours(h) => self.room.duration_hours = h,
            Edit::ColdTemperature(t) => self.cold.temperature_celsius = t,
            Edit::ColdHours(h) => self.cold.duration_hours = h,
        }
        self.sync_stages();
        self.recompute();
        self.latest.as_ref().map_err(Clone::clone)
    }

    /// Replace every input at once, e.g. from command-line flags.
    pub fn replace_inputs(
        &mut self,
        inputs: RecipeInputs,
    ) -> std::result::Result<&Calculation, CalcError> {
        let (room, cold) = stages_of(&inputs, Some((self.room, self.cold)));
        self.inputs = inputs;
        self.room = room;
        self.cold = cold;
        self.sync_stages();
        self.recompute();
        self.latest.as_ref().map_err(Clone::clone)
    }

    fn sync_stages(&mut self) {
        place_stages(&mut self.inputs, self.room, self.cold);
    }

    fn recompute(&mut self) {
        self.latest = self.calculator.compute_detailed(&self.inputs);
        if let Err(e) = &self.latest {
            debug!(error = %e, "recompute failed");
        }
    }

    // ---- Results ----

    pub fn inputs(&self) -> &RecipeInputs {
        &self.inputs
    }

    /// The stashed room stage, whether or not the current method uses it.
    pub fn room_stage(&self) -> ProofStage {
        self.room
    }

    /// The stashed cold stage, whether or not the current method uses it.
    pub fn cold_stage(&self) -> ProofStage {
        self.cold
    }

    /// Outcome of the most recent recompute.
    pub fn latest(&self) -> std::result::Result<&Calculation, &CalcError> {
        self.latest.as_ref()
    }

    /// The recipe card for the current inputs, if they compute.
    pub fn card(&self) -> Option<String> {
        self.latest
            .as_ref()
            .ok()
            .map(|calc| recipe_card(&self.inputs, &calc.outputs))
    }

    /// Clamping notices for the current calculation.
    pub fn notices(&self) -> Vec<String> {
        match &self.latest {
            Ok(calc) => calc.clamped.iter().map(describe_clamp).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Name the current inputs were last saved under or loaded from.
    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn calculator(&self) -> &Calculator<'m> {
        &self.calculator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ---- Store operations ----

    /// Save the current recipe under `name`, replacing any recipe there.
    pub fn save(&mut self, name: &str) -> Result<SavedRecipe> {
        let outputs = self.current_outputs()?;
        let saved = self.store.save(name, &self.inputs, &outputs)?;
        self.current_name = Some(saved.name.clone());
        Ok(saved)
    }

    /// Save the current recipe under `name` only if the name is free.
    pub fn create(&mut self, name: &str) -> Result<SavedRecipe> {
        let outputs = self.current_outputs()?;
        let saved = self.store.create(name, &self.inputs, &outputs)?;
        self.current_name = Some(saved.name.clone());
        Ok(saved)
    }

    /// Load `name` into the session and recompute it.
    ///
    /// The stored outputs are not trusted: the recipe is recomputed against
    /// the session's yeast model. Stages the loaded method does not use keep
    /// their current values.
    pub fn load(&mut self, name: &str) -> Result<SavedRecipe> {
        let recipe = self.store.load(name)?;
        let (room, cold) = stages_of(&recipe.inputs, Some((self.room, self.cold)));
        self.inputs = recipe.inputs.clone();
        self.room = room;
        self.cold = cold;
        self.sync_stages();
        self.recompute();
        self.current_name = Some(recipe.name.clone());
        debug!(name, ok = self.latest.is_ok(), "loaded recipe into session");
        Ok(recipe)
    }

    /// Read a recipe file, store it, and make it the session's recipe.
    ///
    /// The recipe is stored under `name`, or the name recorded in the file.
    /// Outputs are recomputed as for [`load`](Self::load). With `no_clobber`
    /// an existing recipe of that name is left alone and the import fails.
    /// The session is unchanged if the recipe does not compute or cannot be
    /// stored.
    pub fn import(
        &mut self,
        source: &Path,
        name: Option<&str>,
        no_clobber: bool,
    ) -> Result<SavedRecipe> {
        let recipe = read_recipe_file(source)?;
        let name = name.unwrap_or(&recipe.name);

        let mut inputs = recipe.inputs.clone();
        let (room, cold) = stages_of(&inputs, Some((self.room, self.cold)));
        place_stages(&mut inputs, room, cold);
        let calc = self.calculator.compute_detailed(&inputs)?;

        let saved = if no_clobber {
            self.store.create(name, &inputs, &calc.outputs)?
        } else {
            self.store.save(name, &inputs, &calc.outputs)?
        };
        debug!(source = %source.display(), name = %saved.name, "imported recipe");

        self.inputs = inputs;
        self.room = room;
        self.cold = cold;
        self.latest = Ok(calc);
        self.current_name = Some(saved.name.clone());
        Ok(saved)
    }

    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self.store.list()?)
    }

    /// Delete a stored recipe. Returns `Ok(true)` if it existed.
    ///
    /// The session's inputs are untouched; they simply stop being saved.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        let existed = self.store.delete(name)?;
        if self.current_name.as_deref() == Some(name) {
            self.current_name = None;
        }
        Ok(existed)
    }

    pub fn export(&self, name: &str, destination: &Path, format: ExportFormat) -> Result<()> {
        Ok(self.store.export(name, destination, format)?)
    }

    fn current_outputs(&self) -> Result<RecipeOutputs> {
        match &self.latest {
            Ok(calc) => Ok(calc.outputs),
            Err(e) => Err(SessionError::Calc(e.clone())),
        }
    }
}

/// Write the stages the method uses into `inputs`.
fn place_stages(inputs: &mut RecipeInputs, room: ProofStage, cold: ProofStage) {
    let method = inputs.fermentation_method;
    let primary = match method {
        FermentationMethod::Fridge => cold,
        FermentationMethod::Room | FermentationMethod::Both => room,
    };
    inputs.temperature_celsius = primary.temperature_celsius;
    inputs.duration_hours = primary.duration_hours;
    inputs.cold_proof = (method == FermentationMethod::Both).then_some(cold);
}

/// Room and cold stages described by `inputs`, falling back to `previous`
/// (or the default recipe) for any stage the method does not use.
fn stages_of(
    inputs: &RecipeInputs,
    previous: Option<(ProofStage, ProofStage)>,
) -> (ProofStage, ProofStage) {
    let (fallback_room, fallback_cold) = previous.unwrap_or_else(default_stages);
    let room = inputs.room_stage().unwrap_or(fallback_room);
    let cold = inputs
        .cold_stage()
        .or(inputs.cold_proof)
        .unwrap_or(fallback_cold);
    (room, cold)
}

fn default_stages() -> (ProofStage, ProofStage) {
    let defaults = RecipeInputs::default();
    (
        defaults.primary_stage(),
        defaults.cold_proof.unwrap_or(ProofStage::new(4.0, 48.0)),
    )
}
