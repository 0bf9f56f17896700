use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// How the dough is proofed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FermentationMethod {
    /// A single proof at room temperature.
    Room,
    /// A single cold proof in the refrigerator.
    Fridge,
    /// A room proof followed by a cold proof.
    Both,
}

impl FermentationMethod {
    pub const ALL: [FermentationMethod; 3] = [Self::Room, Self::Fridge, Self::Both];

    /// Canonical lowercase name, as written to recipe files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Fridge => "fridge",
            Self::Both => "both",
        }
    }

    /// Human-facing label used by the session and recipe card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Room => "Room proof only",
            Self::Fridge => "Cold proof only",
            Self::Both => "Room then cold proof",
        }
    }

    /// Returns `true` if this method includes a refrigerated stage.
    pub fn has_cold_stage(&self) -> bool {
        matches!(self, Self::Fridge | Self::Both)
    }
}

impl fmt::Display for FermentationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FermentationMethod {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "room" | "room-proof" => Ok(Self::Room),
            "fridge" | "cold" | "cold-proof" => Ok(Self::Fridge),
            "both" | "dual" => Ok(Self::Both),
            _ => Err(TypeError::UnknownVariant {
                kind: "fermentation method",
                value: s.to_string(),
                expected: "room, fridge, both",
            }),
        }
    }
}

/// Commercial yeast form. Doses differ by a fixed factor between forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YeastType {
    Fresh,
    ActiveDry,
    Instant,
}

impl YeastType {
    pub const ALL: [YeastType; 3] = [Self::Fresh, Self::ActiveDry, Self::Instant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::ActiveDry => "active-dry",
            Self::Instant => "instant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh yeast",
            Self::ActiveDry => "active dry yeast",
            Self::Instant => "instant dry yeast",
        }
    }
}

impl fmt::Display for YeastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YeastType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "fresh" | "cy" | "cake" => Ok(Self::Fresh),
            "active-dry" | "activedry" | "ady" => Ok(Self::ActiveDry),
            "instant" | "idy" | "instant-dry" => Ok(Self::Instant),
            _ => Err(TypeError::UnknownVariant {
                kind: "yeast type",
                value: s.to_string(),
                expected: "fresh, active-dry, instant",
            }),
        }
    }
}

/// One fermentation stage: how long the dough rests and at what temperature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofStage {
    pub temperature_celsius: f64,
    pub duration_hours: f64,
}

impl ProofStage {
    pub fn new(temperature_celsius: f64, duration_hours: f64) -> Self {
        Self {
            temperature_celsius,
            duration_hours,
        }
    }
}

impl fmt::Display for ProofStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hours at {:.1}°C",
            self.duration_hours.round(),
            self.temperature_celsius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_aliases() {
        assert_eq!("room".parse::<FermentationMethod>().unwrap(), FermentationMethod::Room);
        assert_eq!("Cold".parse::<FermentationMethod>().unwrap(), FermentationMethod::Fridge);
        assert_eq!(" both ".parse::<FermentationMethod>().unwrap(), FermentationMethod::Both);
    }

    #[test]
    fn method_rejects_unknown() {
        let err = "oven".parse::<FermentationMethod>().unwrap_err();
        assert!(matches!(err, TypeError::UnknownVariant { kind: "fermentation method", .. }));
    }

    #[test]
    fn yeast_parses_aliases() {
        assert_eq!("IDY".parse::<YeastType>().unwrap(), YeastType::Instant);
        assert_eq!("active dry".parse::<YeastType>().unwrap(), YeastType::ActiveDry);
        assert_eq!("active_dry".parse::<YeastType>().unwrap(), YeastType::ActiveDry);
        assert_eq!("fresh".parse::<YeastType>().unwrap(), YeastType::Fresh);
        assert!("sourdough".parse::<YeastType>().is_err());
    }

    #[test]
    fn display_matches_serde_names() {
        for yeast in YeastType::ALL {
            let json = serde_json::to_string(&yeast).unwrap();
            assert_eq!(json, format!("\"{yeast}\""));
        }
        for method in FermentationMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{method}\""));
        }
    }

    #[test]
    fn cold_stage_membership() {
        assert!(!FermentationMethod::Room.has_cold_stage());
        assert!(FermentationMethod::Fridge.has_cold_stage());
        assert!(FermentationMethod::Both.has_cold_stage());
    }

    #[test]
    fn stage_display() {
        let stage = ProofStage::new(4.0, 48.0);
        assert_eq!(stage.to_string(), "48 hours at 4.0°C");
    }
}
