//! Holistic wellness plan feature.

use serde::{Deserialize, Serialize};

use crate::assembler::{Feature, Retention};
use crate::config::GenAIConfig;
use crate::extract::{extract, FieldSpec};
use crate::types::{GenerativeRequest, GroundingReference, WellnessPlan};

pub const DEFAULT_SUMMARY: &str = "Your personalized wellness synthesis is ready.";
pub const DEFAULT_HABITS: &[&str] = &["Maintain hydration", "Regular movement", "Consistent sleep"];
pub const DEFAULT_MINDFULNESS: &str = "5-minute mindfulness breathing.";
pub const DEFAULT_NUTRITION: &str = "Focus on whole, unprocessed foods.";

const SUMMARY: &str = "SUMMARY";
const HABITS: &str = "HABITS";
const MINDFULNESS: &str = "MINDFULNESS";
const NUTRITION: &str = "NUTRITION";

/// What the user wants to improve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WellnessGoal {
    MentalClarity,
    BetterSleep,
    WeightManagement,
    EnergyBoost,
    MuscleGrowth,
    StressRelief,
}

impl WellnessGoal {
    pub const ALL: [WellnessGoal; 6] = [
        WellnessGoal::MentalClarity,
        WellnessGoal::BetterSleep,
        WellnessGoal::WeightManagement,
        WellnessGoal::EnergyBoost,
        WellnessGoal::MuscleGrowth,
        WellnessGoal::StressRelief,
    ];

    /// Wire id, same as the serde form.
    pub fn id(&self) -> &'static str {
        match self {
            WellnessGoal::MentalClarity => "mental-clarity",
            WellnessGoal::BetterSleep => "better-sleep",
            WellnessGoal::WeightManagement => "weight-management",
            WellnessGoal::EnergyBoost => "energy-boost",
            WellnessGoal::MuscleGrowth => "muscle-growth",
            WellnessGoal::StressRelief => "stress-relief",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WellnessGoal::MentalClarity => "Mental Clarity",
            WellnessGoal::BetterSleep => "Better Sleep",
            WellnessGoal::WeightManagement => "Weight Balance",
            WellnessGoal::EnergyBoost => "High Energy",
            WellnessGoal::MuscleGrowth => "Strength",
            WellnessGoal::StressRelief => "Stress Relief",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Gentle,
    #[default]
    Moderate,
    Intense,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Gentle, Intensity::Moderate, Intensity::Intense];
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intensity::Gentle => write!(f, "gentle"),
            Intensity::Moderate => write!(f, "moderate"),
            Intensity::Intense => write!(f, "intense"),
        }
    }
}

/// Wellness plan request from the UI.
#[derive(Debug, Clone, Deserialize)]
pub struct WellnessInput {
    pub goal: WellnessGoal,
    #[serde(default)]
    pub intensity: Intensity,
}

/// Wellness plan generation. Clears the previous plan when a new one starts.
pub struct WellnessFeature {
    model: String,
    temperature: f64,
    top_p: f64,
    specs: Vec<FieldSpec>,
}

impl WellnessFeature {
    pub fn new(config: &GenAIConfig) -> Self {
        Self {
            model: config.wellness_model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            specs: vec![
                FieldSpec::text(SUMMARY, DEFAULT_SUMMARY),
                FieldSpec::list(HABITS, DEFAULT_HABITS),
                FieldSpec::text(MINDFULNESS, DEFAULT_MINDFULNESS),
                FieldSpec::text(NUTRITION, DEFAULT_NUTRITION),
            ],
        }
    }
}

pub fn build_prompt(input: &WellnessInput) -> String {
    format!(
        "Act as a holistic wellness coach. Create a personalized wellness plan for a user \
         with the goal: \"{goal}\" and preferred intensity: \"{intensity}\".\n\n\
         You must format the response exactly like this:\n\
         {SUMMARY}: [2-sentence encouraging overview]\n\
         {HABITS}: [3 specific daily habits, comma separated]\n\
         {MINDFULNESS}: [One specific meditation or breathing exercise]\n\
         {NUTRITION}: [One key dietary focus or pillar]",
        goal = input.goal.label(),
        intensity = input.intensity,
    )
}

impl Feature for WellnessFeature {
    type Input = WellnessInput;
    type Output = WellnessPlan;

    fn name(&self) -> &'static str {
        "wellness"
    }

    fn retention(&self) -> Retention {
        Retention::ClearOnStart
    }

    fn failure_notice(&self) -> &'static str {
        "Wellness sync interrupted. Please check your connection and try again."
    }

    fn request(&self, input: &WellnessInput) -> GenerativeRequest {
        GenerativeRequest {
            prompt: build_prompt(input),
            model: self.model.clone(),
            temperature: self.temperature,
            top_p: self.top_p,
            tools: Vec::new(),
        }
    }

    fn assemble(&self, text: &str, _references: &[GroundingReference]) -> WellnessPlan {
        let fields = extract(text, &self.specs);
        let text_or = |label: &str, default: &str| {
            fields.text(label).unwrap_or(default).to_string()
        };
        WellnessPlan {
            summary: text_or(SUMMARY, DEFAULT_SUMMARY),
            habits: fields
                .list(HABITS)
                .map(<[String]>::to_vec)
                .unwrap_or_else(|| DEFAULT_HABITS.iter().map(|s| s.to_string()).collect()),
            mindfulness: text_or(MINDFULNESS, DEFAULT_MINDFULNESS),
            nutrition: text_or(NUTRITION, DEFAULT_NUTRITION),
        }
    }
}
