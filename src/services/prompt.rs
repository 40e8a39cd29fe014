use crate::domain::ExtractedText;

/// Maximum number of document characters embedded in a prompt.
pub const MAX_PROMPT_CHARS: usize = 4000;

const INSTRUCTIONS: &str = "Please analyze the following legal document and provide:

1. SUMMARY: A brief overview of the document's purpose and main content
2. DOCUMENT TYPE: What type of legal document this appears to be
3. KEY POINTS: The most important terms, clauses, or provisions
4. RISKS & CONCERNS: Any potential legal risks or concerning clauses
5. RECOMMENDATIONS: Suggestions for review or action

Document text:
";

const CLOSING: &str = "

Please structure your response clearly with these sections.";

/// Build the analysis prompt for a document.
///
/// Only the first [`MAX_PROMPT_CHARS`] characters of the document are
/// included; the text is otherwise embedded as-is.
pub fn build_prompt(text: &ExtractedText) -> String {
    let excerpt = truncate_chars(text.as_str(), MAX_PROMPT_CHARS);

    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + excerpt.len() + CLOSING.len());
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str(excerpt);
    prompt.push_str(CLOSING);
    prompt
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKERS: [&str; 5] = [
        "SUMMARY",
        "DOCUMENT TYPE",
        "KEY POINTS",
        "RISKS & CONCERNS",
        "RECOMMENDATIONS",
    ];

    fn embedded_text(prompt: &str) -> &str {
        prompt
            .strip_prefix(INSTRUCTIONS)
            .and_then(|rest| rest.strip_suffix(CLOSING))
            .expect("prompt keeps its template frame")
    }

    #[test]
    fn template_markers_are_always_present() {
        for input in ["", "short lease", &"x".repeat(10_000)] {
            let prompt = build_prompt(&ExtractedText::new(input));
            for marker in MARKERS {
                assert!(prompt.contains(marker), "missing {marker}");
            }
        }
    }

    #[test]
    fn short_documents_are_embedded_whole() {
        let prompt = build_prompt(&ExtractedText::new("This lease is made between A and B."));
        assert_eq!(embedded_text(&prompt), "This lease is made between A and B.");
    }

    #[test]
    fn long_documents_are_cut_at_the_character_budget() {
        let text = "é".repeat(MAX_PROMPT_CHARS + 250);
        let prompt = build_prompt(&ExtractedText::new(text));

        let embedded = embedded_text(&prompt);
        assert_eq!(embedded.chars().count(), MAX_PROMPT_CHARS);
    }

    #[test]
    fn prompt_is_deterministic() {
        let text = ExtractedText::new("Employment agreement");
        assert_eq!(build_prompt(&text), build_prompt(&text));
    }
}
