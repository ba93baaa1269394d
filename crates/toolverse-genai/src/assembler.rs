//! Per-feature orchestration: gateway → extractor (→ correlator).
//!
//! State machine `Idle → Generating → Ready | Errored`. One generation per
//! feature at a time; a second trigger while generating is refused. Nothing
//! is retried automatically.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use toolverse_core::{Error, Result};
use tracing::{debug, error, info};

use crate::gateway::GenerativeGateway;
use crate::types::{GenerativeOutcome, GenerativeRequest, GroundingReference};

/// What happens to the last good result when a new generation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Retention {
    /// Keep showing it through generation and failure.
    KeepPrevious,
    /// Drop it as soon as generation starts.
    ClearOnStart,
}

/// A generative feature: prompt construction and result assembly.
pub trait Feature: Send + Sync {
    type Input: Send + Sync;
    type Output: Send + Sync;

    fn name(&self) -> &'static str;

    fn retention(&self) -> Retention;

    /// Generic notice shown when the service call fails.
    fn failure_notice(&self) -> &'static str;

    fn request(&self, input: &Self::Input) -> GenerativeRequest;

    /// Build the result from response text. Must be total: empty text and
    /// missing references yield the feature's defaults.
    fn assemble(&self, text: &str, references: &[GroundingReference]) -> Self::Output;
}

/// Observable assembler state.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AssemblyState<T> {
    Idle,
    Generating {
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<Arc<T>>,
    },
    Ready {
        result: Arc<T>,
    },
    Errored {
        notice: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<Arc<T>>,
    },
}

impl<T> Clone for AssemblyState<T> {
    fn clone(&self) -> Self {
        match self {
            AssemblyState::Idle => AssemblyState::Idle,
            AssemblyState::Generating { previous } => AssemblyState::Generating {
                previous: previous.clone(),
            },
            AssemblyState::Ready { result } => AssemblyState::Ready {
                result: result.clone(),
            },
            AssemblyState::Errored { notice, previous } => AssemblyState::Errored {
                notice: notice.clone(),
                previous: previous.clone(),
            },
        }
    }
}

impl<T> AssemblyState<T> {
    /// Result currently visible, fresh or retained.
    pub fn result(&self) -> Option<&Arc<T>> {
        match self {
            AssemblyState::Idle => None,
            AssemblyState::Generating { previous } | AssemblyState::Errored { previous, .. } => {
                previous.as_ref()
            }
            AssemblyState::Ready { result } => Some(result),
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, AssemblyState::Generating { .. })
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, AssemblyState::Errored { .. })
    }
}

/// Drives one [`Feature`] against a gateway.
pub struct Assembler<F: Feature> {
    feature: F,
    gateway: Arc<dyn GenerativeGateway>,
    state: Arc<Mutex<AssemblyState<F::Output>>>,
}

impl<F: Feature> Assembler<F> {
    pub fn new(feature: F, gateway: Arc<dyn GenerativeGateway>) -> Self {
        Self {
            feature,
            gateway,
            state: Arc::new(Mutex::new(AssemblyState::Idle)),
        }
    }

    pub fn feature(&self) -> &F {
        &self.feature
    }

    pub fn state(&self) -> AssemblyState<F::Output> {
        self.state.lock().clone()
    }

    /// Run one generation. On service failure the state becomes `Errored`
    /// and the cause is returned.
    pub async fn generate(&self, input: &F::Input) -> Result<Arc<F::Output>> {
        let request = self.feature.request(input);
        let guard = self.begin()?;

        let outcome = self.gateway.invoke(&request).await;
        debug!("{} outcome: {}", self.feature.name(), outcome.kind());

        let (next, result) = match outcome {
            GenerativeOutcome::Success { text, references } => {
                let built = Arc::new(self.feature.assemble(&text, &references));
                (AssemblyState::Ready { result: built.clone() }, Ok(built))
            }
            GenerativeOutcome::Empty => {
                info!("{} returned no text; using defaults", self.feature.name());
                let built = Arc::new(self.feature.assemble("", &[]));
                (AssemblyState::Ready { result: built.clone() }, Ok(built))
            }
            GenerativeOutcome::Failure(cause) => {
                error!("{} generation failed: {}", self.feature.name(), cause);
                (
                    AssemblyState::Errored {
                        notice: self.feature.failure_notice().to_string(),
                        previous: guard.previous.clone(),
                    },
                    Err(cause),
                )
            }
        };

        guard.complete(next);
        result
    }

    fn begin(&self) -> Result<GenerationGuard<F::Output>> {
        let mut state = self.state.lock();
        if state.is_generating() {
            return Err(Error::Busy(format!(
                "{} generation already in progress",
                self.feature.name()
            )));
        }

        let previous = match self.feature.retention() {
            Retention::KeepPrevious => state.result().cloned(),
            Retention::ClearOnStart => None,
        };
        let prior = std::mem::replace(
            &mut *state,
            AssemblyState::Generating {
                previous: previous.clone(),
            },
        );
        Ok(GenerationGuard {
            state: self.state.clone(),
            previous,
            prior: Some(prior),
        })
    }
}

/// Puts back the exact pre-generation state if a generation is abandoned
/// mid-flight (e.g., the caller's future is dropped).
struct GenerationGuard<T> {
    state: Arc<Mutex<AssemblyState<T>>>,
    previous: Option<Arc<T>>,
    prior: Option<AssemblyState<T>>,
}

impl<T> GenerationGuard<T> {
    fn complete(mut self, next: AssemblyState<T>) {
        self.prior = None;
        *self.state.lock() = next;
    }
}

impl<T> Drop for GenerationGuard<T> {
    fn drop(&mut self) {
        if let Some(prior) = self.prior.take() {
            debug!("Generation abandoned; restoring previous state");
            *self.state.lock() = prior;
        }
    }
}
