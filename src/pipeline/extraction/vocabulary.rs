use std::collections::HashMap;

use crate::model::ModelError;

/// Ordered canonical symptom names, fixed at training time.
///
/// Position `i` is feature `i` of the classifier input. The name → index map
/// and the space-separated matching form of every name are built once here.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    names: Vec<String>,
    match_forms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new(names: Vec<String>) -> Result<Self, ModelError> {
        if names.is_empty() {
            return Err(ModelError::EmptyVocabulary);
        }

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ModelError::DuplicateFeature(name.clone()));
            }
        }

        let match_forms = names.iter().map(|n| normalize_symptom_name(n)).collect();

        Ok(Self {
            names,
            match_forms,
            index,
        })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(canonical name, matching form)` pairs in feature order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .zip(&self.match_forms)
            .map(|(n, m)| (n.as_str(), m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `chest_pain` → `chest pain`. Lower-cased so it can be compared against
/// lower-cased user text.
pub fn normalize_symptom_name(name: &str) -> String {
    name.replace('_', " ").trim().to_lowercase()
}
