//! Plex client error types.

use thiserror::Error;

/// Errors returned by [`PlexClient`](super::PlexClient) operations.
///
/// Every variant carries a message suitable for a transient UI notification.
/// Underlying transport and storage failures are logged, not embedded here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlexClientError {
  #[error("User is not currently signed in to Plex.")]
  NotSignedIn,

  #[error("No server has been selected to browse.")]
  NoServerSelected,

  #[error("Failed to sign-in to Plex.")]
  SignInFailed,

  #[error("Unable to find any servers associated with the user.")]
  NoServersFound,

  #[error("Unable to find any movie libraries within the server.")]
  NoLibrariesFound,

  #[error("Unable to find any movies within the library.")]
  NoMediaFound,

  #[error("Unable to fetch the requested image.")]
  NoImageFound,

  #[error("Request to Plex has failed.")]
  RequestFailed,
}
