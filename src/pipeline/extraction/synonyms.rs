//! Colloquial phrase → canonical symptom table.
//!
//! Phrases are lowercase and matched by substring containment against the
//! whole lower-cased input, so "tired" fires inside "so tired lately".

/// Built-in phrase table. Curly and straight apostrophe spellings are both
/// listed because phone keyboards produce the curly form.
const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("abdominal pain", "abdominal_pain"),
    ("belly pain", "abdominal_pain"),
    ("pain in stomach", "abdominal_pain"),
    ("stomach ache", "abdominal_pain"),
    ("bloating", "abdominal_pain"),
    ("vomiting", "vomiting"),
    ("throwing up", "vomiting"),
    ("nauseous", "nausea"),
    ("feeling sick", "nausea"),
    ("tired", "fatigue"),
    ("weak", "fatigue"),
    ("super weak", "fatigue"),
    ("dizzy", "dizziness"),
    ("spinning", "dizziness"),
    ("lightheaded", "dizziness"),
    ("head is spinning", "dizziness"),
    ("sore throat", "sore_throat"),
    ("itchy", "itching"),
    ("skin itchy", "itching"),
    ("rashes", "skin_rash"),
    ("rash", "skin_rash"),
    ("skin rash", "skin_rash"),
    ("red spots", "skin_rash"),
    ("discoloration", "dischromic_patches"),
    ("discolored skin", "dischromic_patches"),
    ("chest hurts", "chest_pain"),
    ("chest pain", "chest_pain"),
    ("tight chest", "chest_pain"),
    ("shortness of breath", "breathlessness"),
    ("trouble breathing", "breathlessness"),
    ("difficulty breathing", "breathlessness"),
    ("can’t breathe", "breathlessness"),
    ("can't breathe", "breathlessness"),
    ("burning while urinating", "burning_micturition"),
    ("pain while peeing", "burning_micturition"),
    ("frequent urination", "polyuria"),
    ("peeing often", "polyuria"),
    ("urine smells bad", "foul_smell_of_urine"),
    ("body hot", "fever"),
    ("feverish", "fever"),
    ("high temperature", "fever"),
    ("hot body", "fever"),
    ("feeling hot", "fever"),
    ("dry cough", "cough"),
    ("wet cough", "cough"),
    ("can’t stop coughing", "cough"),
    ("can't stop coughing", "cough"),
    ("lost smell", "loss_of_smell"),
    ("lost taste", "loss_of_taste"),
    ("sensitive to light", "photophobia"),
    ("sensitive to sound", "phonophobia"),
    ("neck pain", "pain_in_neck"),
    ("back pain", "pain_in_lower_back"),
    ("sweaty", "sweating"),
    ("lots of sweat", "sweating"),
    ("cold", "chills"),
    ("shivering", "chills"),
    ("runny nose", "runny_nose"),
    ("stuffy nose", "congestion"),
    ("can’t sleep", "lack_of_sleep"),
    ("can't sleep", "lack_of_sleep"),
    ("head hurts", "headache"),
    ("head pain", "headache"),
    ("sick feeling", "malaise"),
    ("can’t eat", "loss_of_appetite"),
    ("can't eat", "loss_of_appetite"),
    ("no appetite", "loss_of_appetite"),
    ("low appetite", "loss_of_appetite"),
    ("dark urine", "dark_urine"),
    ("yellow eyes", "yellowing_of_eyes"),
    ("yellow skin", "yellowish_skin"),
];

#[derive(Debug, Clone)]
pub struct SynonymTable {
    entries: Vec<(String, String)>,
}

impl SynonymTable {
    /// Build from arbitrary pairs. Phrases are lower-cased so lookups against
    /// lower-cased text stay case-insensitive; empty phrases are dropped since
    /// they would match every input.
    pub fn new<I, P, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<String>,
        S: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(p, s)| (p.into().trim().to_lowercase(), s.into()))
            .filter(|(p, _)| !p.is_empty())
            .collect();
        Self { entries }
    }

    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Canonical symptoms whose phrase occurs in `lowered_text`.
    pub fn matches<'a>(&'a self, lowered_text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(phrase, _)| lowered_text.contains(phrase.as_str()))
            .map(|(_, symptom)| symptom.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new(DEFAULT_SYNONYMS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_are_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for (phrase, _) in DEFAULT_SYNONYMS {
            assert_eq!(*phrase, phrase.to_lowercase(), "phrase not lowercase: {phrase}");
            assert!(seen.insert(*phrase), "duplicate phrase: {phrase}");
        }
    }

    #[test]
    fn substring_match_ignores_surroundings() {
        let table = SynonymTable::default();
        let hits: Vec<_> = table.matches("so tired, and i keep throwing up!").collect();
        assert!(hits.contains(&"fatigue"));
        assert!(hits.contains(&"vomiting"));
    }

    #[test]
    fn several_phrases_can_share_a_symptom() {
        let table = SynonymTable::default();
        let hits: Vec<_> = table.matches("belly pain and a stomach ache").collect();
        assert_eq!(hits.iter().filter(|s| **s == "abdominal_pain").count(), 2);
    }

    #[test]
    fn custom_table_lowercases_phrases() {
        let table = SynonymTable::new([("Pins And Needles", "tingling"), ("  ", "ignored")]);
        assert_eq!(table.len(), 1);
        let hits: Vec<_> = table.matches("pins and needles in my feet").collect();
        assert_eq!(hits, vec!["tingling"]);
    }

    #[test]
    fn no_match_yields_nothing() {
        let table = SynonymTable::default();
        assert_eq!(table.matches("purple elephant").count(), 0);
    }
}
