//! User-facing wording for yeast table clamps.

use dough_yeast::Clamp;

/// Describe a clamp the way the session shows it next to the recipe.
pub fn describe_clamp(clamp: &Clamp) -> String {
    match clamp {
        Clamp::Temperature { requested, used } => format!(
            "{requested:.1}°C is outside the yeast table; dosed for {used:.1}°C"
        ),
        Clamp::Duration { requested, used } => format!(
            "{requested:.1} hours is outside the yeast table; dosed for {used:.1} hours"
        ),
    }
}
