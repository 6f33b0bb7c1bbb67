//! Short, generic next-step advice per predicted disease.

pub const DEFAULT_ADVICE: &str = "Please consult a healthcare provider.";

const ADVICE: &[(&str, &str)] = &[
    ("Typhoid", "Take antibiotics as prescribed and stay hydrated."),
    ("Common Cold", "Rest, drink fluids, and use OTC medications if needed."),
    ("Malaria", "Use antimalarial medication and avoid mosquito bites."),
    ("Fungal infection", "Use antifungal creams and maintain hygiene."),
    ("Heart attack", "Seek emergency medical attention immediately."),
    ("Dengue", "Rest, take paracetamol, and avoid aspirin. Drink fluids."),
    ("Jaundice", "Avoid alcohol, take prescribed meds, and rest your liver."),
    ("Hyperthyroidism", "Take antithyroid medication and monitor hormone levels."),
    ("Chronic cholestasis", "Follow low-fat diet, vitamin supplements, and medication."),
    ("Urinary tract infection", "Use antibiotics and drink plenty of water."),
];

/// Advice for `disease`, falling back to `DEFAULT_ADVICE`. Exact match on
/// the decoder's label spelling.
pub fn advice_for(disease: &str) -> &'static str {
    ADVICE
        .iter()
        .find(|(name, _)| *name == disease)
        .map(|(_, advice)| *advice)
        .unwrap_or(DEFAULT_ADVICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_disease_has_specific_advice() {
        assert_eq!(advice_for("Malaria"), "Use antimalarial medication and avoid mosquito bites.");
    }

    #[test]
    fn unknown_disease_gets_default() {
        assert_eq!(advice_for("Psoriasis"), DEFAULT_ADVICE);
        assert_eq!(advice_for(""), DEFAULT_ADVICE);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(advice_for("malaria"), DEFAULT_ADVICE);
    }

    #[test]
    fn every_demo_label_has_advice() {
        let labels: Vec<String> = serde_json::from_str(include_str!("../resources/model/labels.json")).unwrap();
        for label in labels {
            assert_ne!(advice_for(&label), DEFAULT_ADVICE, "no advice for {label}");
        }
    }
}
