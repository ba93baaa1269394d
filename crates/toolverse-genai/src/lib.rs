//! Generative response pipeline.
//!
//! One request goes out through a [`GenerativeGateway`], the free-text
//! answer is scraped into typed fields with per-field defaults, and for
//! headlines the extracted titles are paired with the service's grounding
//! references. Failures never escape as panics; they end in a displayable
//! assembler state.

pub mod assembler;
pub mod config;
pub mod extract;
pub mod gateway;
pub mod grounding;
pub mod headlines;
pub mod types;
pub mod wellness;

pub use assembler::{Assembler, AssemblyState, Feature, Retention};
pub use config::GenAIConfig;
pub use gateway::{GeminiGateway, GenerativeGateway};
pub use headlines::{HeadlineFeature, HeadlineInput};
pub use types::*;
pub use wellness::{Intensity, WellnessFeature, WellnessGoal, WellnessInput};
