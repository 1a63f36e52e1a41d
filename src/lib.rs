pub mod bot;
pub mod config;
pub mod coordinates;
pub mod dispatcher;
pub mod error;
pub mod intent;
pub mod openai;
pub mod places;
pub mod server;
pub mod state;
pub mod summarizer;
pub mod telegram;
pub mod types;

pub use bot::run;
