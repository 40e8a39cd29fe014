use crate::domain::ExtractedText;

pub const CONTRACT: &str = "Contract/Agreement";
pub const WILL: &str = "Will/Testament";
pub const LEASE: &str = "Lease Agreement";
pub const NDA: &str = "Non-Disclosure Agreement";
pub const EMPLOYMENT: &str = "Employment Document";
pub const GENERIC: &str = "Legal Document";

/// Guess the kind of legal document from its full text.
///
/// Plain case-insensitive substring checks; the first rule that matches wins.
pub fn classify(text: &ExtractedText) -> &'static str {
    let text = text.as_str().to_lowercase();

    if text.contains("contract") || text.contains("agreement") {
        CONTRACT
    } else if text.contains("will") && text.contains("testament") {
        WILL
    } else if text.contains("lease") {
        LEASE
    } else if text.contains("nda") || text.contains("non-disclosure") {
        NDA
    } else if text.contains("employment") {
        EMPLOYMENT
    } else {
        GENERIC
    }
}
