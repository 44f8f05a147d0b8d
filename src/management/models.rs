use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::{
    config,
    model::{LinearMoodModel, ModelError},
    mood::Mood,
};

/// Resolves the artifact path for the model trained on `current_mood`.
pub fn model_path(current_mood: Mood) -> PathBuf {
    let mut path = config::model_dir();
    path.push(current_mood.model_file_name());
    path
}

/// Loads and caches the per-starting-mood model artifacts.
///
/// The binding between a starting mood and its artifact is static and
/// resolved at load time; requesting a mood with no artifact on disk is a
/// configuration error and fails fast. A loaded model is shared read-only
/// for the rest of the process, so repeated requests for the same starting
/// mood hit the in-memory cache.
pub struct ModelManager {
    loaded: HashMap<Mood, Arc<LinearMoodModel>>,
}

impl ModelManager {
    pub fn new() -> Self {
        Self {
            loaded: HashMap::new(),
        }
    }

    pub async fn load(&mut self, current_mood: Mood) -> Result<Arc<LinearMoodModel>, ModelError> {
        if let Some(model) = self.loaded.get(&current_mood) {
            return Ok(Arc::clone(model));
        }

        let path = model_path(current_mood);
        if !path.exists() {
            return Err(ModelError::NotFound(current_mood.label().to_string()));
        }

        let content = async_fs::read_to_string(&path).await?;
        let model = Arc::new(LinearMoodModel::from_json(&content)?);
        self.loaded.insert(current_mood, Arc::clone(&model));
        Ok(model)
    }

    /// Whether a trained artifact exists for the given starting mood.
    pub fn is_available(current_mood: Mood) -> bool {
        model_path(current_mood).exists()
    }
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new()
    }
}
