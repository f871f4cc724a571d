//! Inference pipeline: clean → vectorize → predict → score.
//! Request handling lives in `handlers`; feedback is attached there.

pub mod confidence;
pub mod handlers;

use std::collections::HashMap;

use crate::model::sparse::FeatureVector;
use crate::model::{ModelArtifacts, ModelError};
use crate::models::role::RoleCategory;
use crate::screening::confidence::HeuristicConfidence;
use crate::text::clean_resume;

/// Immutable, process-wide inference state built once at startup.
#[derive(Debug)]
pub struct InferenceContext {
    model: ModelArtifacts,
    confidence: HeuristicConfidence,
    profiles: HashMap<RoleCategory, FeatureVector>,
}

/// Outcome of screening one résumé, before feedback is attached.
#[derive(Debug, Clone)]
pub struct Screening {
    pub role: RoleCategory,
    pub match_percentage: f64,
    pub cleaned_text: String,
}

impl InferenceContext {
    /// Vectorizes every role keyword profile through the loaded vocabulary.
    pub fn new(model: ModelArtifacts, confidence: HeuristicConfidence) -> Self {
        let profiles = RoleCategory::ALL
            .into_iter()
            .map(|role| (role, model.vectorize(&clean_resume(role.keyword_profile()))))
            .collect();
        Self {
            model,
            confidence,
            profiles,
        }
    }

    pub fn model(&self) -> &ModelArtifacts {
        &self.model
    }

    /// Match percentage of a feature vector against a role's keyword profile.
    pub fn match_score(&self, features: &FeatureVector, role: RoleCategory) -> f64 {
        let similarity = self
            .profiles
            .get(&role)
            .map(|profile| features.cosine_similarity(profile))
            .unwrap_or(0.0);
        self.confidence.match_percentage(similarity)
    }

    /// Runs the full classification pipeline over raw extracted text.
    pub fn screen(&self, raw_text: &str) -> Result<Screening, ModelError> {
        let cleaned_text = clean_resume(raw_text);
        let prediction = self.model.predict(&cleaned_text)?;
        let match_percentage = self.match_score(&prediction.features, prediction.role);
        Ok(Screening {
            role: prediction.role,
            match_percentage,
            cleaned_text,
        })
    }
}
