//! Plex session client for the ReelSwipe movie picker.
//!
//! The UI layer constructs one [`PlexClient`] with its collaborators and
//! drives the whole session through it:
//!
//! ```no_run
//! use std::sync::Arc;
//! use reelswipe::{AppConfig, FileStore, HttpTransport, PlexClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load(std::path::Path::new("config.json"))?;
//! let store = FileStore::default_location().expect("no data directory");
//! let client = PlexClient::new(
//!   config.identity(),
//!   Arc::new(HttpTransport::new()),
//!   Arc::new(store),
//! );
//!
//! if !client.is_signed_in() {
//!   client.sign_in("username", "password").await?;
//! }
//! let servers = client.list_servers().await?;
//! client.select_server(&servers[0]);
//! let libraries = client.list_libraries().await?;
//! let movies = client.list_movies(&libraries[0]).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod plex;

pub use config::{AppConfig, ConfigError};
pub use plex::{
  ClientIdentity, Connection, FileStore, Headers, HttpTransport, Library, MediaItem, PlexClient,
  PlexClientError, ServerDescriptor, Session, SessionStore, StoreError, Transport, TransportError,
};
