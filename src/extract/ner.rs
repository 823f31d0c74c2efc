//! Named-entity recognition boundary.
//!
//! The recognizer is an external model dependency: text in, ordered
//! entity spans with category tags out. The production implementation
//! (feature `ner`) wraps the rust-bert token-classification pipeline;
//! tests substitute stub recognizers through the trait.

use thiserror::Error;

use super::entities::{Entity, EntityCategory};

/// Errors from the named-entity model.
#[derive(Debug, Error)]
pub enum NerError {
    #[error("failed to load NER model: {0}")]
    ModelLoad(String),

    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// A named-entity recognizer.
///
/// Implementations are long-lived, process-wide resources; a handle that
/// is not `Sync` must serialize access internally.
pub trait EntityRecognizer: Send + Sync {
    /// Recognize ordered entity spans in the text.
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, NerError>;
}

/// Map a model label such as "I-PER" or "B-LOC" to a category. Labels
/// with no claim-form relevance (e.g. MISC) map to `None`.
pub fn category_for_label(label: &str) -> Option<EntityCategory> {
    let tag = label.rsplit('-').next().unwrap_or(label);
    match tag {
        "PER" | "PERSON" => Some(EntityCategory::Person),
        "LOC" | "GPE" => Some(EntityCategory::Location),
        "DATE" => Some(EntityCategory::Date),
        "ORG" => Some(EntityCategory::Organization),
        _ => None,
    }
}

#[cfg(feature = "ner")]
mod bert {
    //! rust-bert backed recognizer.
    //!
    //! The model handle is process-wide and initialized once. Predictions
    //! are serialized through a mutex because the tch-backed model is not
    //! `Sync`; output is stable for a fixed model version only.

    use std::sync::{Mutex, OnceLock};

    use rust_bert::pipelines::ner::NERModel;

    use super::{category_for_label, Entity, EntityRecognizer, NerError};

    static NER_MODEL: OnceLock<Mutex<NERModel>> = OnceLock::new();

    /// Token-classification NER over the default pretrained model.
    /// Model weights are downloaded on first use.
    pub struct BertRecognizer;

    impl BertRecognizer {
        pub fn new() -> Self {
            Self
        }

        fn get_or_init_model() -> Result<&'static Mutex<NERModel>, NerError> {
            if let Some(model) = NER_MODEL.get() {
                return Ok(model);
            }

            let model =
                NERModel::new(Default::default()).map_err(|e| NerError::ModelLoad(e.to_string()))?;

            // If another thread beat us to initialization, that's fine.
            let _ = NER_MODEL.set(Mutex::new(model));

            NER_MODEL
                .get()
                .ok_or_else(|| NerError::ModelLoad("failed to cache NER model".to_string()))
        }
    }

    impl Default for BertRecognizer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl EntityRecognizer for BertRecognizer {
        fn recognize(&self, text: &str) -> Result<Vec<Entity>, NerError> {
            let model = Self::get_or_init_model()?;
            let model = model
                .lock()
                .map_err(|e| NerError::Prediction(e.to_string()))?;

            let mut predictions = model.predict(&[text]);
            let spans = predictions.pop().unwrap_or_default();

            Ok(spans
                .into_iter()
                .filter_map(|span| {
                    category_for_label(&span.label).map(|category| Entity {
                        text: span.word,
                        category,
                    })
                })
                .collect())
        }
    }
}

#[cfg(feature = "ner")]
pub use bert::BertRecognizer;
