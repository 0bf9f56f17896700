//! Single-field edits applied to a session.

use std::fmt;
use std::str::FromStr;

use dough_calc::CalcError;
use dough_types::{FermentationMethod, YeastType};

use crate::error::{Result, SessionError};

/// An editable recipe field, as named on the session command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    DoughWeight,
    Balls,
    FlourWeight,
    Hydration,
    Salt,
    Oil,
    Yeast,
    Method,
    RoomTemperature,
    RoomHours,
    ColdTemperature,
    ColdHours,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::DoughWeight,
        Field::Balls,
        Field::FlourWeight,
        Field::Hydration,
        Field::Salt,
        Field::Oil,
        Field::Yeast,
        Field::Method,
        Field::RoomTemperature,
        Field::RoomHours,
        Field::ColdTemperature,
        Field::ColdHours,
    ];

    pub const NAMES: [&'static str; 12] = [
        "dough",
        "balls",
        "flour",
        "hydration",
        "salt",
        "oil",
        "yeast",
        "method",
        "room-temp",
        "room-hours",
        "cold-temp",
        "cold-hours",
    ];

    pub fn as_str(&self) -> &'static str {
        Self::NAMES[*self as usize]
    }

    /// Example value shown in help output.
    pub fn example(&self) -> &'static str {
        match self {
            Field::DoughWeight => "1000",
            Field::Balls => "4x250",
            Field::FlourWeight => "600",
            Field::Hydration => "65",
            Field::Salt => "2.5",
            Field::Oil => "0",
            Field::Yeast => "instant",
            Field::Method => "both",
            Field::RoomTemperature => "21",
            Field::RoomHours => "2",
            Field::ColdTemperature => "4",
            Field::ColdHours => "48",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Field {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self> {
        let field = match s.trim().to_ascii_lowercase().as_str() {
            "dough" | "dough-weight" | "weight" => Field::DoughWeight,
            "balls" => Field::Balls,
            "flour" | "flour-weight" => Field::FlourWeight,
            "hydration" | "water" => Field::Hydration,
            "salt" => Field::Salt,
            "oil" => Field::Oil,
            "yeast" | "yeast-type" => Field::Yeast,
            "method" | "proof" => Field::Method,
            "room-temp" | "room-temperature" | "temperature" => Field::RoomTemperature,
            "room-hours" | "hours" => Field::RoomHours,
            "cold-temp" | "cold-temperature" | "fridge-temp" => Field::ColdTemperature,
            "cold-hours" | "fridge-hours" => Field::ColdHours,
            _ => return Err(SessionError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

/// One change to the recipe being edited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edit {
    DoughWeight(f64),
    /// Size the dough as `count` balls of `ball_weight_grams` each.
    Balls { count: u32, ball_weight_grams: f64 },
    /// Size the dough so it contains this much flour.
    FlourWeight(f64),
    Hydration(f64),
    Salt(f64),
    Oil(f64),
    Yeast(YeastType),
    Method(FermentationMethod),
    RoomTemperature(f64),
    RoomHours(f64),
    ColdTemperature(f64),
    ColdHours(f64),
}

impl Edit {
    /// Parse the value typed for `field`.
    ///
    /// Balls take `COUNTxGRAMS`, e.g. `4x250`. Values that do not parse fail
    /// with [`CalcError::InvalidInput`] naming the field.
    pub fn parse(field: Field, value: &str) -> Result<Self> {
        let value = value.trim();
        let edit = match field {
            Field::DoughWeight => Edit::DoughWeight(number("dough weight", value)?),
            Field::Balls => {
                let (count, weight) = value
                    .split_once(['x', 'X', '*'])
                    .ok_or_else(|| invalid("balls", format!("'{value}' (expected COUNTxGRAMS)")))?;
                let count = count
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| invalid("number of balls", format!("'{}'", count.trim())))?;
                Edit::Balls {
                    count,
                    ball_weight_grams: number("ball weight", weight)?,
                }
            }
            Field::FlourWeight => Edit::FlourWeight(number("flour weight", value)?),
            Field::Hydration => Edit::Hydration(number("hydration", value)?),
            Field::Salt => Edit::Salt(number("salt", value)?),
            Field::Oil => Edit::Oil(number("oil", value)?),
            Field::Yeast => Edit::Yeast(value.parse().map_err(CalcError::from)?),
            Field::Method => Edit::Method(value.parse().map_err(CalcError::from)?),
            Field::RoomTemperature => Edit::RoomTemperature(number("room temperature", value)?),
            Field::RoomHours => Edit::RoomHours(number("room hours", value)?),
            Field::ColdTemperature => Edit::ColdTemperature(number("cold temperature", value)?),
            Field::ColdHours => Edit::ColdHours(number("cold hours", value)?),
        };
        Ok(edit)
    }
}

fn number(field: &'static str, value: &str) -> Result<f64> {
    let value = value.trim();
    value
        .parse::<f64>()
        .map_err(|_| invalid(field, format!("'{value}' is not a number")))
}

fn invalid(field: &'static str, reason: String) -> SessionError {
    CalcError::InvalidInput { field, reason }.into()
}
