//! Application layer: configuration, logging, store wiring and the
//! services built on top of the stores.

pub mod autosave;
pub mod config;
pub mod context;
pub mod logging;
pub mod stylist_chat;
pub mod visual_search;

pub use autosave::{AutosaveHandle, spawn_autosave};
pub use config::{AppConfig, LogFormat, LoggingConfig, StorageConfig};
pub use context::AppContext;
pub use logging::init_tracing;
pub use stylist_chat::{ChatExchange, ReplyCategory, StylistChat};
pub use visual_search::{SearchResult, VisualSearch};
