//! Single-page PDF report for one prediction, via `printpdf`.

use std::io::BufWriter;

use printpdf::*;
use thiserror::Error;

/// How many probabilities the report lists.
pub const REPORT_TOP_N: usize = 5;

/// Wrapped lines of user input kept on the page.
const MAX_INPUT_LINES: usize = 12;

const WRAP_CHARS: usize = 85;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF font error: {0}")]
    Font(String),
    #[error("PDF save error: {0}")]
    Save(String),
}

pub struct ReportInput<'a> {
    pub user_input: &'a str,
    pub predicted_disease: &'a str,
    pub advice: &'a str,
    /// Label → percentage (0-100) for every label.
    pub percentages: &'a [(String, f64)],
}

/// Render the report. Returns PDF bytes.
pub fn render_report(input: &ReportInput<'_>) -> Result<Vec<u8>, ReportError> {
    let title = "Symptom Analysis Report";
    let (doc, page1, layer1) = PdfDocument::new(title, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Font(e.to_string()))?;

    let mut y = Mm(280.0);

    layer.use_text(title, 16.0, Mm(65.0), y, &bold);
    y -= Mm(14.0);

    let user_input = to_ascii(input.user_input);
    let mut input_lines = wrap_text(&format!("User Symptoms: {user_input}"), WRAP_CHARS);
    if input_lines.len() > MAX_INPUT_LINES {
        input_lines.truncate(MAX_INPUT_LINES);
        if let Some(last) = input_lines.last_mut() {
            last.push_str(" ...");
        }
    }
    for line in input_lines {
        layer.use_text(line, 11.0, Mm(20.0), y, &font);
        y -= Mm(5.5);
    }
    y -= Mm(3.0);

    for line in wrap_text(
        &format!("Predicted Disease: {}", to_ascii(input.predicted_disease)),
        WRAP_CHARS,
    ) {
        layer.use_text(line, 11.0, Mm(20.0), y, &font);
        y -= Mm(5.5);
    }
    y -= Mm(3.0);

    for line in wrap_text(&format!("Medical Advice: {}", to_ascii(input.advice)), WRAP_CHARS) {
        layer.use_text(line, 11.0, Mm(20.0), y, &font);
        y -= Mm(5.5);
    }
    y -= Mm(8.0);

    layer.use_text("Prediction Probabilities:", 12.0, Mm(20.0), y, &bold);
    y -= Mm(7.0);

    for (label, pct) in top_percentages(input.percentages, REPORT_TOP_N) {
        let text = format!("{}: {:.2}%", to_ascii(&label), pct);
        layer.use_text(text, 11.0, Mm(25.0), y, &font);
        y -= Mm(6.0);
    }

    y -= Mm(8.0);
    layer.use_text(
        "This report is generated by a keyword classifier and is not a diagnosis.",
        8.0,
        Mm(20.0),
        y,
        &font,
    );

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Save(e.to_string()))?;
    buf.into_inner()
        .map_err(|e| ReportError::Save(e.to_string()))
}

/// Highest `n` percentages, descending; equal values keep input order.
pub fn top_percentages(percentages: &[(String, f64)], n: usize) -> Vec<(String, f64)> {
    let mut sorted = percentages.to_vec();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
    sorted.truncate(n);
    sorted
}

/// Drop everything outside ASCII. The built-in PDF fonts have no glyphs for
/// emoji or typographic quotes.
pub fn to_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percentages() -> Vec<(String, f64)> {
        vec![
            ("Common Cold".into(), 5.5),
            ("Dengue".into(), 40.25),
            ("Malaria".into(), 30.0),
            ("Typhoid".into(), 10.0),
            ("Jaundice".into(), 10.0),
            ("Acne".into(), 4.25),
        ]
    }

    #[test]
    fn renders_pdf_bytes() {
        let pcts = percentages();
        let bytes = render_report(&ReportInput {
            user_input: "High fever 🤒 and “joint pain”",
            predicted_disease: "Dengue",
            advice: "Rest, take paracetamol, and avoid aspirin. Drink fluids.",
            percentages: &pcts,
        })
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_input_still_renders() {
        let long = "my head hurts and ".repeat(200);
        let bytes = render_report(&ReportInput {
            user_input: &long,
            predicted_disease: "Migraine",
            advice: crate::advice::DEFAULT_ADVICE,
            percentages: &[],
        })
        .unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn top_percentages_sorted_and_stable() {
        let top = top_percentages(&percentages(), 5);
        let labels: Vec<_> = top.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Dengue", "Malaria", "Typhoid", "Jaundice", "Common Cold"]);
    }

    #[test]
    fn to_ascii_strips_non_ascii() {
        assert_eq!(to_ascii("can’t sleep 😴 at all"), "cant sleep  at all");
        assert_eq!(to_ascii("plain"), "plain");
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("one two three four five six", 10);
        assert!(lines.iter().all(|l| l.len() <= 10));
        assert_eq!(lines.join(" "), "one two three four five six");
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
