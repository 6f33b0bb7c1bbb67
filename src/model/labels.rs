use std::collections::HashMap;

use super::ModelError;

/// Bidirectional mapping between class codes and disease names.
///
/// The class list order is the order the trainer's label encoder assigned
/// codes in; code `i` decodes to `classes()[i]`.
#[derive(Debug, Clone)]
pub struct LabelDecoder {
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ModelError> {
        if classes.is_empty() {
            return Err(ModelError::EmptyLabels);
        }

        let mut codes = HashMap::with_capacity(classes.len());
        for (code, name) in classes.iter().enumerate() {
            if codes.insert(name.clone(), code).is_some() {
                return Err(ModelError::DuplicateLabel(name.clone()));
            }
        }

        Ok(Self { classes, codes })
    }

    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    pub fn encode(&self, name: &str) -> Option<usize> {
        self.codes.get(name).copied()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
