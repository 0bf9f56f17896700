//! The plain-text recipe card shown to the user and used for text export.

use dough_types::{RecipeInputs, RecipeOutputs};

/// Render a recipe as a short, human-readable card.
///
/// Bulk ingredients are rounded to whole grams. Yeast keeps up to three
/// decimals since doses are often below a gram.
pub fn recipe_card(inputs: &RecipeInputs, outputs: &RecipeOutputs) -> String {
    let mut lines = vec![
        format!("Flour: {}g", outputs.flour_grams.round()),
        format!("Water: {}g", outputs.water_grams.round()),
        format!("Salt: {}g", outputs.salt_grams.round()),
        format!("Oil: {}g", outputs.oil_grams.round()),
        format!(
            "Yeast: {}g of {}",
            format_yeast(outputs.yeast_grams),
            inputs.yeast_type.label()
        ),
    ];
    if let Some(room) = inputs.room_stage() {
        lines.push(format!("Room Proof: {room}"));
    }
    if let Some(cold) = inputs.cold_stage() {
        lines.push(format!("Cold Proof: {cold}"));
    }
    lines.push(format!("Total: {}g of dough", inputs.dough_weight_grams.round()));
    lines.join("\n")
}

fn format_yeast(grams: f64) -> String {
    let fixed = format!("{grams:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        format!("{trimmed}.0")
    }
}
