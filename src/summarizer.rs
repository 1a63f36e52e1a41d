//! The language-model seam and the prompts the bot sends through it.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Place;

/// Turns a prompt into a short natural-language reply.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the completion provider fails or returns no usable choice.
    async fn summarize(&self, prompt: &str) -> Result<String>;
}

/// Prompt asking the model to recommend from a list of places.
pub fn place_enrichment_prompt(places: &[Place]) -> String {
    let names = places
        .iter()
        .map(|place| place.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Here are some nearby places: {names}. Please suggest the best ones to visit.")
}
