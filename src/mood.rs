//! The mood universe used by the transition models.
//!
//! Exactly four moods exist, each bound to a stable integer code that must
//! match the code assignment used when the classifiers were trained. The
//! mapping is fixed process-wide; changing it silently invalidates every
//! model artifact.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of mood classes every classifier predicts over.
pub const MOOD_COUNT: usize = 4;

/// One of the four emotional states a listener can be in.
///
/// The discriminants are the model class codes: a classifier's output
/// vector is indexed by these values. They mirror the order the training
/// data was encoded with and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    AngryFrustrated = 0,
    HappyExcited = 1,
    RelaxChill = 2,
    TiredSad = 3,
}

impl Mood {
    /// All moods in code order.
    pub fn all() -> [Mood; MOOD_COUNT] {
        [
            Mood::AngryFrustrated,
            Mood::HappyExcited,
            Mood::RelaxChill,
            Mood::TiredSad,
        ]
    }

    /// The integer class code used for model I/O.
    pub fn code(&self) -> usize {
        *self as usize
    }

    /// Looks up a mood by its class code.
    pub fn from_code(code: usize) -> Option<Mood> {
        match code {
            0 => Some(Mood::AngryFrustrated),
            1 => Some(Mood::HappyExcited),
            2 => Some(Mood::RelaxChill),
            3 => Some(Mood::TiredSad),
            _ => None,
        }
    }

    /// Human-readable label, identical to the labels in the training data.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::AngryFrustrated => "Angry/Frustrated",
            Mood::HappyExcited => "Happy/Excited",
            Mood::RelaxChill => "Relax/Chill",
            Mood::TiredSad => "Tired/Sad",
        }
    }

    /// File name of the model artifact trained for this starting mood.
    ///
    /// Follows the original artifact naming convention: the label with `/`
    /// replaced by `-`, e.g. `model_Tired-Sad.json`.
    pub fn model_file_name(&self) -> String {
        format!("model_{}.json", self.label().replace('/', "-"))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Mood {
    type Err = String;

    /// Parses a mood from its full label or a forgiving shorthand.
    ///
    /// Accepts the canonical labels (`Happy/Excited`, ...) case-insensitively
    /// as well as single-word aliases (`happy`, `excited`, `angry`,
    /// `frustrated`, `relax`, `chill`, `tired`, `sad`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "angry/frustrated" | "angry" | "frustrated" => Ok(Mood::AngryFrustrated),
            "happy/excited" | "happy" | "excited" => Ok(Mood::HappyExcited),
            "relax/chill" | "relax" | "chill" => Ok(Mood::RelaxChill),
            "tired/sad" | "tired" | "sad" => Ok(Mood::TiredSad),
            other => Err(format!(
                "Unknown mood '{}'. Available moods: {}",
                other,
                Mood::all()
                    .iter()
                    .map(|m| m.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}
