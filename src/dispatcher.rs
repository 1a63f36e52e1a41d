//! Per-chat conversation flow: decides what each inbound message means and
//! which collaborators to call for the reply.
//!
//! A chat is either idle or waiting for a location to answer a pending
//! query. Location-seeking questions park the query; the next location runs
//! the place lookup and has the language model recommend from the results.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error, info, warn};
use tokio::sync::Mutex as AsyncMutex;

use crate::error::Result;
use crate::intent::is_location_seeking;
use crate::places::{PlacesLookup, PlacesOutcome};
use crate::state::{ConversationState, ConversationStore};
use crate::summarizer::{Summarizer, place_enrichment_prompt};
use crate::telegram::MessageSender;
use crate::types::{ChatId, Command, Coordinates, FallbackMode, InboundMessage};

pub const GREETING: &str = "Hi! Ask me about places nearby, like \"coffee nearby\", \
     and I'll ask for your location. You can also ask me anything else.";

pub const LOCATION_ACK: &str =
    "Thank you for sharing your location! Tell me what you're looking for nearby.";

pub const LOCATION_REQUEST: &str =
    "Please share your location (or send it as \"lat,lon\") so I can find nearby places.";

pub const HINT: &str = "I can help you find places nearby. Tell me what you're looking for, \
     like \"pizza nearby\", and then share your location.";

fn not_found_reply(query: &str) -> String {
    format!("I couldn't find any nearby {query}. Please try again later.")
}

/// Behavior switches for the different deployments of the bot.
#[derive(Debug, Clone, Default)]
pub struct DispatcherOptions {
    /// Query used when a location arrives with nothing pending.
    pub default_query: Option<String>,
    pub fallback: FallbackMode,
}

pub struct Dispatcher {
    store: Arc<dyn ConversationStore>,
    places: Arc<dyn PlacesLookup>,
    summarizer: Arc<dyn Summarizer>,
    options: DispatcherOptions,
    chat_locks: Mutex<HashMap<ChatId, Arc<AsyncMutex<()>>>>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        places: Arc<dyn PlacesLookup>,
        summarizer: Arc<dyn Summarizer>,
        options: DispatcherOptions,
    ) -> Self {
        Self {
            store,
            places,
            summarizer,
            options,
            chat_locks: Mutex::new(HashMap::new()),
        }
    }

    fn chat_lock(&self, chat_id: ChatId) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .chat_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(chat_id).or_default())
    }

    /// Run one turn for a chat and return the reply text.
    ///
    /// Turns for the same chat run one at a time; different chats proceed
    /// independently.
    ///
    /// # Errors
    ///
    /// Returns an error if the language model call fails. The chat state has
    /// already been updated by then.
    pub async fn dispatch(&self, chat_id: ChatId, message: InboundMessage) -> Result<String> {
        let lock = self.chat_lock(chat_id);
        let _turn = lock.lock().await;

        match message {
            InboundMessage::Command(Command::Start) => {
                debug!("Chat {chat_id}: /start");
                self.store.reset(chat_id).await;
                Ok(GREETING.to_string())
            }
            InboundMessage::Location(coordinates) => {
                self.handle_location(chat_id, coordinates).await
            }
            InboundMessage::Text(text) => self.handle_text(chat_id, text).await,
        }
    }

    async fn handle_location(&self, chat_id: ChatId, coordinates: Coordinates) -> Result<String> {
        let state = self.store.get(chat_id).await;

        let query = match state.pending_query() {
            Some(query) => query.to_string(),
            None => match &self.options.default_query {
                Some(query) => query.clone(),
                None => {
                    debug!("Chat {chat_id}: location received with no pending query");
                    return Ok(LOCATION_ACK.to_string());
                }
            },
        };

        info!(
            "Chat {chat_id}: looking up '{query}' around {},{}",
            coordinates.latitude, coordinates.longitude
        );
        self.store.reset(chat_id).await;
        self.enrich(coordinates, &query).await
    }

    async fn handle_text(&self, chat_id: ChatId, text: String) -> Result<String> {
        if is_location_seeking(&text) {
            let query = text.trim();
            debug!("Chat {chat_id}: waiting for location to answer '{query}'");
            self.store
                .set(chat_id, ConversationState::awaiting(query))
                .await;
            return Ok(LOCATION_REQUEST.to_string());
        }

        match self.options.fallback {
            FallbackMode::Answer => {
                debug!("Chat {chat_id}: answering general question");
                self.summarizer.summarize(&text).await
            }
            FallbackMode::Hint => Ok(HINT.to_string()),
        }
    }

    /// Place lookup followed by a model recommendation.
    async fn enrich(&self, coordinates: Coordinates, query: &str) -> Result<String> {
        let places = match self.places.search(coordinates, query).await {
            PlacesOutcome::Found(places) => places,
            PlacesOutcome::Empty => return Ok(not_found_reply(query)),
            PlacesOutcome::Failed(reason) => {
                warn!("Places lookup for '{query}' failed: {reason}");
                return Ok(not_found_reply(query));
            }
        };

        debug!("Summarizing {} places for '{query}'", places.len());
        self.summarizer
            .summarize(&place_enrichment_prompt(&places))
            .await
    }

    /// Run a turn and deliver the reply. Failures are logged, never returned.
    pub async fn handle(
        &self,
        sender: &dyn MessageSender,
        chat_id: ChatId,
        message: InboundMessage,
    ) {
        match self.dispatch(chat_id, message).await {
            Ok(reply) => {
                if let Err(e) = sender.send_text(chat_id, &reply).await {
                    warn!("Failed to send reply to chat {chat_id}: {e}");
                }
            }
            Err(e) => error!("Error handling message in chat {chat_id}: {e}"),
        }
    }
}
