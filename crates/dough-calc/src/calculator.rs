use tracing::debug;

use dough_types::{FermentationMethod, ProofStage, RecipeInputs, RecipeOutputs};
use dough_yeast::{Clamp, YeastModel};

use crate::error::{CalcError, Result};

/// Everything one calculation produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    pub outputs: RecipeOutputs,
    /// Yeast dose as a baker's percentage, for the recipe's yeast form.
    pub yeast_percent: f64,
    /// The single stage the yeast model was queried with. For a two-stage
    /// proof this is the blend of both stages.
    pub effective: ProofStage,
    /// Table boundaries the yeast query was clamped to.
    pub clamped: Vec<Clamp>,
}

/// Recipe calculator bound to a yeast model.
#[derive(Clone, Copy, Debug)]
pub struct Calculator<'m> {
    model: &'m YeastModel,
}

impl Default for Calculator<'static> {
    fn default() -> Self {
        Self::new(YeastModel::builtin())
    }
}

impl<'m> Calculator<'m> {
    pub fn new(model: &'m YeastModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'m YeastModel {
        self.model
    }

    /// Ingredient weights for `inputs`.
    pub fn compute(&self, inputs: &RecipeInputs) -> Result<RecipeOutputs> {
        self.compute_detailed(inputs).map(|c| c.outputs)
    }

    /// Ingredient weights plus the yeast dose and any clamping applied.
    pub fn compute_detailed(&self, inputs: &RecipeInputs) -> Result<Calculation> {
        validate(inputs)?;

        let flour = inputs.dough_weight_grams / inputs.total_ratio();
        let of_flour = |percent: f64| flour * percent / 100.0;

        let (method, effective) = effective_stage(inputs)?;
        let lookup = self.model.percent_for(
            method,
            effective.temperature_celsius,
            effective.duration_hours,
            inputs.yeast_type,
        )?;

        let outputs = RecipeOutputs {
            flour_grams: flour,
            water_grams: of_flour(inputs.hydration_percent),
            salt_grams: of_flour(inputs.salt_percent),
            oil_grams: of_flour(inputs.oil_percent),
            yeast_grams: of_flour(lookup.percent),
        };

        debug!(
            dough = inputs.dough_weight_grams,
            flour = outputs.flour_grams,
            yeast_percent = lookup.percent,
            "computed recipe"
        );

        Ok(Calculation {
            outputs,
            yeast_percent: lookup.percent,
            effective,
            clamped: lookup.clamped,
        })
    }
}

/// [`Calculator::compute`] against the built-in yeast table.
pub fn compute(inputs: &RecipeInputs) -> Result<RecipeOutputs> {
    Calculator::default().compute(inputs)
}

/// [`Calculator::compute_detailed`] against the built-in yeast table.
pub fn compute_detailed(inputs: &RecipeInputs) -> Result<Calculation> {
    Calculator::default().compute_detailed(inputs)
}

fn validate(inputs: &RecipeInputs) -> Result<()> {
    let weight = inputs.dough_weight_grams;
    if !weight.is_finite() || weight <= 0.0 {
        return Err(CalcError::InvalidInput {
            field: "dough weight",
            reason: format!("{weight} g (must be greater than zero)"),
        });
    }

    for (field, value) in [
        ("hydration", inputs.hydration_percent),
        ("salt", inputs.salt_percent),
        ("oil", inputs.oil_percent),
    ] {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(CalcError::InvalidInput {
                field,
                reason: format!("{value}% (must be between 0 and 100)"),
            });
        }
    }

    if inputs.fermentation_method == FermentationMethod::Both && inputs.cold_proof.is_none() {
        return Err(CalcError::InvalidInput {
            field: "cold proof",
            reason: "a room-then-cold proof needs a cold stage".into(),
        });
    }

    Ok(())
}

/// The stage to query the yeast model with, and the rows to query.
///
/// A two-stage proof is blended into one: the hours add up and the
/// temperature is the hour-weighted mean of both stages.
fn effective_stage(inputs: &RecipeInputs) -> Result<(FermentationMethod, ProofStage)> {
    let primary = inputs.primary_stage();
    check_stage(&primary)?;

    let cold = match (inputs.fermentation_method, inputs.cold_proof) {
        (FermentationMethod::Both, Some(cold)) => cold,
        (method, _) => return Ok((method, primary)),
    };
    check_stage(&cold)?;

    let hours = primary.duration_hours + cold.duration_hours;
    let temperature = (primary.temperature_celsius * primary.duration_hours
        + cold.temperature_celsius * cold.duration_hours)
        / hours;
    Ok((FermentationMethod::Both, ProofStage::new(temperature, hours)))
}

fn check_stage(stage: &ProofStage) -> Result<()> {
    for (parameter, value) in [
        ("temperature", stage.temperature_celsius),
        ("duration", stage.duration_hours),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::OutOfRange { parameter, value });
        }
    }
    Ok(())
}
