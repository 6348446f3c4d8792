//! Natural-language rendering of an analysis.
//!
//! Purely presentational: every number and label comes from the earlier
//! stages. The source system's audience is bilingual, so the narrative can
//! be rendered in English or Spanish.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::health::Health;
use super::phase::Phase;

/// Narrative language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Es => write!(f, "es"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            _ => Err(format!("Unknown locale: {} (expected en or es)", s)),
        }
    }
}

/// Compose the explanation narrative.
#[allow(clippy::too_many_arguments)]
pub fn render(
    locale: Locale,
    phase: Phase,
    confidence: u8,
    reasons: &[String],
    overall_progress: u8,
    phase_progress: u8,
    health: Health,
    in_progress_tasks: usize,
) -> String {
    let phase_name = phase.display_name(locale);
    let health_name = health.display_name(locale);
    let reasons = reasons.join("; ");

    let mut text = match locale {
        Locale::En => format!(
            "The project is in the {phase_name} phase ({confidence}% confidence): {reasons}. \
             Overall progress is {overall_progress}% ({phase_progress}% within the current \
             phase) and the project is {health_name}."
        ),
        Locale::Es => format!(
            "El proyecto está en la fase de {phase_name} ({confidence}% de confianza): \
             {reasons}. El avance global es del {overall_progress}% ({phase_progress}% dentro \
             de la fase actual) y el proyecto está {health_name}."
        ),
    };

    if in_progress_tasks > 0 {
        let tail = match locale {
            Locale::En => format!(" {in_progress_tasks} task(s) are currently in progress."),
            Locale::Es => format!(" Hay {in_progress_tasks} tarea(s) en curso."),
        };
        text.push_str(&tail);
    }

    text
}
