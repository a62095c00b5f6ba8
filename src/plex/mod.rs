//! Plex session client module.
//!
//! Handles authentication against plex.tv, server discovery, library and
//! movie listing, image retrieval and session persistence.

mod client;
mod error;
mod store;
mod transport;
mod types;

pub use client::PlexClient;
pub use error::PlexClientError;
pub use store::{FileStore, SessionStore, StoreError};
pub use transport::{Headers, HttpTransport, Transport, TransportError};
pub use types::*;
