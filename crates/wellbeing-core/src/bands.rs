//! Banding tables shared by every view.
//!
//! Maps the readiness score onto a traffic-light [`Tier`] and each 1-10
//! metric rating onto a human description. The add form shows the long
//! description, the edit form and listings the short one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::Rating;

/// Coarse banding of the readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Green,
    Yellow,
    Red,
}

impl Tier {
    /// 80..=100 green, 50..80 yellow, anything lower red.
    pub fn for_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Tier::Green,
            50..=79 => Tier::Yellow,
            _ => Tier::Red,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Green => "Einsatzbereit",
            Tier::Yellow => "Moderat",
            Tier::Red => "Erholung nötig",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Green => "green",
            Tier::Yellow => "yellow",
            Tier::Red => "red",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four rated metrics of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    SleepQuality,
    MuscleSoreness,
    Mood,
    TrainingLoad,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::SleepQuality,
        Metric::MuscleSoreness,
        Metric::Mood,
        Metric::TrainingLoad,
    ];

    /// Form label.
    pub fn title(self) -> &'static str {
        match self {
            Metric::SleepQuality => "Schlaf",
            Metric::MuscleSoreness => "Muskelkater",
            Metric::Mood => "Stimmung",
            Metric::TrainingLoad => "Belastung",
        }
    }

    /// Long description shown while entering a value.
    pub fn describe(self, rating: Rating) -> &'static str {
        let v = rating.get();
        match self {
            Metric::SleepQuality => match v {
                0..=2 => "Katastrophal (Kaum geschlafen)",
                3..=4 => "Schlecht (Oft wach)",
                5..=6 => "Geht so (Durchschnitt)",
                7..=8 => "Gut (Erholt)",
                _ => "Perfekt (Tief & Fest)",
            },
            Metric::MuscleSoreness => match v {
                0..=2 => "Keiner",
                3..=4 => "Leicht",
                5..=6 => "Mittel",
                7..=8 => "Stark (Schmerzhaft)",
                _ => "Extrem (kaum Bewegung möglich)",
            },
            Metric::Mood => match v {
                0..=3 => "Gestresst / Demotiviert",
                4..=6 => "Neutral",
                _ => "Motiviert / Energisch",
            },
            Metric::TrainingLoad => match v {
                0..=2 => "Ruhetag",
                3..=5 => "Leichtes Training",
                6..=8 => "Hartes Training",
                _ => "Maximal (Wettkampf/Limit)",
            },
        }
    }

    /// Short label for compact views.
    pub fn short(self, rating: Rating) -> &'static str {
        let v = rating.get();
        match self {
            Metric::SleepQuality => match v {
                0..=2 => "Katastrophal",
                3..=4 => "Schlecht",
                5..=6 => "Geht so",
                7..=8 => "Gut",
                _ => "Perfekt",
            },
            Metric::MuscleSoreness => match v {
                0..=2 => "Keiner",
                3..=4 => "Leicht",
                5..=6 => "Mittel",
                7..=8 => "Stark",
                _ => "Extrem",
            },
            Metric::Mood => match v {
                0..=3 => "Gestresst",
                4..=6 => "Neutral",
                _ => "Motiviert",
            },
            Metric::TrainingLoad => match v {
                0..=2 => "Ruhetag",
                3..=5 => "Leicht",
                6..=8 => "Hart",
                _ => "Limit",
            },
        }
    }
}
