//! Classifier pipeline: TF-IDF vectorizer, one-vs-rest k-NN classifier and
//! label encoder, trained together and persisted as one matched artifact set.

pub mod corpus;
pub mod encoder;
pub mod knn;
pub mod sparse;
pub mod vectorizer;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::model::corpus::LabeledExample;
use crate::model::encoder::LabelEncoder;
use crate::model::knn::{OneVsRestClassifier, DEFAULT_NEIGHBORS};
use crate::model::sparse::FeatureVector;
use crate::model::vectorizer::TfidfVectorizer;
use crate::models::role::RoleCategory;
use crate::text::clean_resume;

pub const VECTORIZER_FILE: &str = "tfidf.json";
pub const CLASSIFIER_FILE: &str = "clf.json";
pub const ENCODER_FILE: &str = "encoder.json";
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("training corpus is empty")]
    EmptyCorpus,

    #[error("training corpus produced an empty vocabulary")]
    EmptyVocabulary,

    #[error("training label '{0}' is not a known role category")]
    UnknownLabel(String),
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact file {} not found", .0.display())]
    Missing(PathBuf),

    #[error("failed to access artifact file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact file {} is not valid: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact file {} has format version {found}, expected {expected}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("artifact file {} is internally inconsistent", .0.display())]
    Inconsistent(PathBuf),

    #[error("artifacts come from different training runs")]
    MixedSet,

    #[error("classifier expects {classifier} features but vocabulary has {vocabulary}")]
    FeatureMismatch { vocabulary: usize, classifier: usize },

    #[error("classifier has {classifier} classes but encoder has {encoder}")]
    ClassMismatch { encoder: usize, classifier: usize },

    #[error("encoder label '{0}' is not a known role category")]
    UnknownLabel(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("classifier produced no prediction")]
    NoPrediction,

    #[error("classifier predicted class {0}, which the encoder does not know")]
    UnknownClass(usize),

    #[error("encoder label '{0}' is not a known role category")]
    UnknownLabel(String),
}

/// On-disk wrapper tying each artifact to its training run.
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactEnvelope<T> {
    format_version: u32,
    artifact_set: Uuid,
    trained_at: DateTime<Utc>,
    payload: T,
}

/// Result of classifying one cleaned résumé.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub role: RoleCategory,
    pub features: FeatureVector,
}

/// The three trained artifacts, always held and persisted as a matched set.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    artifact_set: Uuid,
    trained_at: DateTime<Utc>,
    vectorizer: TfidfVectorizer,
    classifier: OneVsRestClassifier,
    encoder: LabelEncoder,
}

impl ModelArtifacts {
    /// Fits vectorizer, encoder and classifier over the cleaned examples.
    pub fn train(examples: &[LabeledExample]) -> Result<Self, TrainError> {
        if examples.is_empty() {
            return Err(TrainError::EmptyCorpus);
        }
        if let Some(bad) = examples
            .iter()
            .find(|e| e.category.parse::<RoleCategory>().is_err())
        {
            return Err(TrainError::UnknownLabel(bad.category.clone()));
        }

        let cleaned: Vec<String> = examples.iter().map(|e| clean_resume(&e.resume)).collect();
        let vectorizer = TfidfVectorizer::fit(&cleaned).ok_or(TrainError::EmptyVocabulary)?;

        let labels: Vec<&str> = examples.iter().map(|e| e.category.as_str()).collect();
        let encoder = LabelEncoder::fit(&labels);
        let targets: Vec<usize> = labels
            .iter()
            .filter_map(|label| encoder.encode(label))
            .collect();

        let points: Vec<FeatureVector> = cleaned.iter().map(|t| vectorizer.transform(t)).collect();
        let classifier = OneVsRestClassifier::fit(
            DEFAULT_NEIGHBORS,
            &points,
            &targets,
            encoder.len(),
            vectorizer.vocabulary_len(),
        );

        Ok(Self {
            artifact_set: Uuid::new_v4(),
            trained_at: Utc::now(),
            vectorizer,
            classifier,
            encoder,
        })
    }

    /// Loads and cross-checks the three artifacts in `dir`.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let vectorizer: ArtifactEnvelope<TfidfVectorizer> = read_artifact(&dir.join(VECTORIZER_FILE))?;
        let classifier: ArtifactEnvelope<OneVsRestClassifier> =
            read_artifact(&dir.join(CLASSIFIER_FILE))?;
        let encoder: ArtifactEnvelope<LabelEncoder> = read_artifact(&dir.join(ENCODER_FILE))?;

        if vectorizer.artifact_set != classifier.artifact_set
            || vectorizer.artifact_set != encoder.artifact_set
        {
            return Err(ArtifactError::MixedSet);
        }
        if !vectorizer.payload.is_consistent() {
            return Err(ArtifactError::Inconsistent(dir.join(VECTORIZER_FILE)));
        }
        if !classifier.payload.is_consistent() {
            return Err(ArtifactError::Inconsistent(dir.join(CLASSIFIER_FILE)));
        }
        if !encoder.payload.is_consistent() {
            return Err(ArtifactError::Inconsistent(dir.join(ENCODER_FILE)));
        }
        if classifier.payload.n_features() != vectorizer.payload.vocabulary_len() {
            return Err(ArtifactError::FeatureMismatch {
                vocabulary: vectorizer.payload.vocabulary_len(),
                classifier: classifier.payload.n_features(),
            });
        }
        if classifier.payload.n_classes() != encoder.payload.len() {
            return Err(ArtifactError::ClassMismatch {
                encoder: encoder.payload.len(),
                classifier: classifier.payload.n_classes(),
            });
        }
        if let Some(label) = encoder
            .payload
            .classes()
            .iter()
            .find(|c| c.parse::<RoleCategory>().is_err())
        {
            return Err(ArtifactError::UnknownLabel(label.clone()));
        }

        info!(
            artifact_set = %vectorizer.artifact_set,
            trained_at = %vectorizer.trained_at,
            vocabulary = vectorizer.payload.vocabulary_len(),
            classes = encoder.payload.len(),
            "Model artifacts loaded from {}",
            dir.display()
        );

        Ok(Self {
            artifact_set: vectorizer.artifact_set,
            trained_at: vectorizer.trained_at,
            vectorizer: vectorizer.payload,
            classifier: classifier.payload,
            encoder: encoder.payload,
        })
    }

    /// Writes all three artifacts into `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<(), ArtifactError> {
        std::fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        self.write_artifact(&dir.join(VECTORIZER_FILE), &self.vectorizer)?;
        self.write_artifact(&dir.join(CLASSIFIER_FILE), &self.classifier)?;
        self.write_artifact(&dir.join(ENCODER_FILE), &self.encoder)?;
        Ok(())
    }

    pub fn vectorize(&self, cleaned_text: &str) -> FeatureVector {
        self.vectorizer.transform(cleaned_text)
    }

    /// Classifies an already-cleaned résumé.
    pub fn predict(&self, cleaned_text: &str) -> Result<Prediction, ModelError> {
        let features = self.vectorize(cleaned_text);
        let class = self
            .classifier
            .predict(&features)
            .ok_or(ModelError::NoPrediction)?;
        let label = self
            .encoder
            .decode(class)
            .ok_or(ModelError::UnknownClass(class))?;
        let role = label
            .parse::<RoleCategory>()
            .map_err(|_| ModelError::UnknownLabel(label.to_string()))?;
        Ok(Prediction { role, features })
    }

    pub fn artifact_set(&self) -> Uuid {
        self.artifact_set
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }

    fn write_artifact<T: Serialize>(&self, path: &Path, payload: &T) -> Result<(), ArtifactError> {
        let envelope = ArtifactEnvelope {
            format_version: FORMAT_VERSION,
            artifact_set: self.artifact_set,
            trained_at: self.trained_at,
            payload,
        };
        let json = serde_json::to_vec(&envelope).map_err(|source| ArtifactError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<ArtifactEnvelope<T>, ArtifactError> {
    let raw = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::Missing(path.to_path_buf())
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let envelope: ArtifactEnvelope<T> =
        serde_json::from_slice(&raw).map_err(|source| ArtifactError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
    if envelope.format_version != FORMAT_VERSION {
        return Err(ArtifactError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: envelope.format_version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::corpus::builtin_corpus;

    fn trained() -> ModelArtifacts {
        ModelArtifacts::train(&builtin_corpus()).unwrap()
    }

    #[test]
    fn test_train_fits_matched_dimensions() {
        let model = trained();
        assert_eq!(model.classifier.n_features(), model.vocabulary_len());
        assert_eq!(model.classifier.n_classes(), 7);
        assert_eq!(model.encoder.decode(0), Some("Data Science"));
    }

    #[test]
    fn test_python_backend_resume_predicts_python_developer() {
        let model = trained();
        let text = clean_resume("Experienced in Python, Django, REST API, and backend scripting");
        let prediction = model.predict(&text).unwrap();
        assert_eq!(prediction.role, RoleCategory::PythonDeveloper);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let model = trained();
        let text = clean_resume("Recruitment, payroll and employee relations specialist");
        let first = model.predict(&text).unwrap();
        let second = model.predict(&text).unwrap();
        assert_eq!(first.role, second.role);
        assert_eq!(first.features, second.features);
    }

    #[test]
    fn test_train_rejects_empty_and_unknown_labels() {
        assert!(matches!(
            ModelArtifacts::train(&[]),
            Err(TrainError::EmptyCorpus)
        ));
        let bad = vec![LabeledExample {
            category: "Chef".to_string(),
            resume: "Pastry and sauces".to_string(),
        }];
        assert!(matches!(
            ModelArtifacts::train(&bad),
            Err(TrainError::UnknownLabel(label)) if label == "Chef"
        ));
    }

    #[test]
    fn test_save_then_load_predicts_identically() {
        let dir = tempfile::tempdir().unwrap();
        let model = trained();
        model.save(dir.path()).unwrap();

        let loaded = ModelArtifacts::load(dir.path()).unwrap();
        assert_eq!(loaded.artifact_set(), model.artifact_set());
        let text = clean_resume("CAD and SolidWorks for automotive manufacturing");
        assert_eq!(
            loaded.predict(&text).unwrap().role,
            model.predict(&text).unwrap().role
        );
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing(path) if path.ends_with(VECTORIZER_FILE)));
    }

    #[test]
    fn test_load_rejects_mixed_training_runs() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        trained().save(first.path()).unwrap();
        trained().save(second.path()).unwrap();
        std::fs::copy(
            second.path().join(ENCODER_FILE),
            first.path().join(ENCODER_FILE),
        )
        .unwrap();

        let err = ModelArtifacts::load(first.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::MixedSet));
    }

    #[test]
    fn test_load_rejects_feature_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let model = trained();
        let shrunk = {
            let examples: Vec<LabeledExample> = builtin_corpus().into_iter().take(3).collect();
            ModelArtifacts {
                artifact_set: model.artifact_set,
                ..ModelArtifacts::train(&examples).unwrap()
            }
        };
        model.save(dir.path()).unwrap();
        shrunk
            .write_artifact(&dir.path().join(CLASSIFIER_FILE), &shrunk.classifier)
            .unwrap();

        let err = ModelArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::FeatureMismatch { .. }));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        trained().save(dir.path()).unwrap();
        std::fs::write(dir.path().join(CLASSIFIER_FILE), b"{}").unwrap();
        let err = ModelArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));
    }

    fn saved_with(file: &str, edit: impl FnOnce(&mut serde_json::Value)) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        trained().save(dir.path()).unwrap();
        let path = dir.path().join(file);
        let mut value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        edit(&mut value);
        std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();
        dir
    }

    fn encoder_classes(value: &mut serde_json::Value) -> &mut Vec<serde_json::Value> {
        value["payload"]["classes"].as_array_mut().unwrap()
    }

    #[test]
    fn test_load_rejects_class_count_mismatch() {
        let dir = saved_with(ENCODER_FILE, |value| {
            encoder_classes(value).push("Zed".into());
        });
        let err = ModelArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::ClassMismatch { encoder: 8, classifier: 7 }
        ));
    }

    #[test]
    fn test_load_rejects_unknown_encoder_label() {
        let dir = saved_with(ENCODER_FILE, |value| {
            for class in encoder_classes(value).iter_mut() {
                if *class == "HR" {
                    *class = "Help Desk".into();
                }
            }
        });
        let err = ModelArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::UnknownLabel(label) if label == "Help Desk"));
    }

    #[test]
    fn test_load_rejects_future_format_version() {
        let dir = saved_with(VECTORIZER_FILE, |value| {
            value["format_version"] = 99.into();
        });
        let err = ModelArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::UnsupportedVersion { path, found: 99, expected: FORMAT_VERSION }
                if path.ends_with(VECTORIZER_FILE)
        ));
    }

    #[test]
    fn test_load_rejects_unsorted_encoder() {
        let dir = saved_with(ENCODER_FILE, |value| {
            encoder_classes(value).swap(0, 1);
        });
        let err = ModelArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Inconsistent(path) if path.ends_with(ENCODER_FILE)));
    }
}
