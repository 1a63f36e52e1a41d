//! Keyword check for questions that need a location to answer.

const LOCATION_KEYWORDS: [&str; 6] = ["nearby", "close to", "around", "location", "near", "place"];

/// Returns true when the text mentions one of the location keywords.
///
/// Plain substring match on the lowercased text, so "placement" counts.
pub fn is_location_seeking(text: &str) -> bool {
    let lowered = text.to_lowercase();
    LOCATION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
