//! Plex session client for authentication, discovery and library browsing.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use super::error::PlexClientError;
use super::store::SessionStore;
use super::transport::{Headers, Transport};
use super::types::*;

/// plex.tv service endpoints.
const PLEX_TV_URL: &str = "https://plex.tv";
const SIGN_IN_PATH: &str = "/users/sign_in.json";
const RESOURCES_PATH: &str = "/api/v2/resources?includeHttps=1";

/// Numeric item type for movies in library section queries.
const MOVIE_ITEM_TYPE: u8 = 1;

/// Store key holding the persisted session.
const SESSION_STORE_KEY: &str = "User";

/// Plex session client.
///
/// Owns the signed-in session and the selected server endpoint, and issues
/// every remote request through the injected [`Transport`]. Construct one
/// instance and hand it (behind an `Arc`) to whichever component issues
/// calls.
pub struct PlexClient {
  identity: ClientIdentity,
  transport: Arc<dyn Transport>,
  store: Arc<dyn SessionStore>,
  state: Arc<RwLock<ClientState>>,
  /// Serializes overlapping sign-in calls so the session field has one
  /// writer at a time.
  sign_in_serial: Mutex<()>,
}

/// Internal session state.
struct ClientState {
  session: Option<Session>,
  active_server: Option<String>,
}

impl PlexClient {
  /// Create a new client and restore any previously persisted session.
  ///
  /// Restoration is best-effort: an absent key or a malformed payload is
  /// logged and leaves the client signed out.
  pub fn new(
    identity: ClientIdentity,
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
  ) -> Self {
    let session = Self::restore_session(store.as_ref());

    Self {
      identity,
      transport,
      store,
      state: Arc::new(RwLock::new(ClientState {
        session,
        active_server: None,
      })),
      sign_in_serial: Mutex::new(()),
    }
  }

  /// Get the signed-in session, if any.
  pub fn session(&self) -> Option<Session> {
    self.state.read().session.clone()
  }

  /// Whether a user is currently signed in.
  pub fn is_signed_in(&self) -> bool {
    self.state.read().session.is_some()
  }

  /// Get the selected server endpoint, if any.
  pub fn active_server(&self) -> Option<String> {
    self.state.read().active_server.clone()
  }

  /// Build the `X-Plex-*` headers for a request.
  fn identity_headers(&self, token: Option<&str>) -> Headers {
    let mut headers = vec![
      ("Accept".to_string(), "application/json".to_string()),
      (
        "X-Plex-Client-Identifier".to_string(),
        self.identity.client_id.clone(),
      ),
      ("X-Plex-Product".to_string(), self.identity.product.clone()),
      ("X-Plex-Version".to_string(), self.identity.version.clone()),
    ];
    if let Some(token) = token {
      headers.push(("X-Plex-Token".to_string(), token.to_string()));
    }
    headers
  }

  /// Get the auth token or error if not signed in.
  fn auth_token(&self) -> Result<String, PlexClientError> {
    self
      .state
      .read()
      .session
      .as_ref()
      .map(|s| s.auth_token.clone())
      .ok_or(PlexClientError::NotSignedIn)
  }

  /// Get the active server endpoint or error if none is selected.
  fn server_url(&self) -> Result<String, PlexClientError> {
    self
      .state
      .read()
      .active_server
      .clone()
      .ok_or(PlexClientError::NoServerSelected)
  }

  /// Sign in to plex.tv with the given credentials.
  ///
  /// On success the session is stored in memory and persisted (best-effort)
  /// before the call returns. Overlapping sign-in calls are queued.
  pub async fn sign_in(&self, username: &str, password: &str) -> Result<(), PlexClientError> {
    let _serial = self.sign_in_serial.lock().await;

    let url = format!("{PLEX_TV_URL}{SIGN_IN_PATH}");
    let headers = self.identity_headers(None);
    let form = [
      ("user[login]".to_string(), username.to_string()),
      ("user[password]".to_string(), password.to_string()),
    ];

    let body = match self.transport.post_form(&url, &headers, &form).await {
      Ok(body) => body,
      Err(e) => {
        log::warn!("Sign-in request failed: {e}");
        return Err(PlexClientError::SignInFailed);
      }
    };

    let response: SignInResponse = match serde_json::from_slice(&body) {
      Ok(response) => response,
      Err(e) => {
        log::warn!("Failed to decode sign-in response: {e}");
        return Err(PlexClientError::SignInFailed);
      }
    };

    let session = response.user;
    self.state.write().session = Some(session.clone());
    self.persist_session(&session);
    Ok(())
  }

  /// Sign out and forget the persisted session.
  ///
  /// The selected server endpoint is left in place; subsequent remote calls
  /// fail with [`PlexClientError::NotSignedIn`] regardless.
  pub fn sign_out(&self) {
    self.state.write().session = None;
    if let Err(e) = self.store.remove(SESSION_STORE_KEY) {
      log::warn!("Failed to remove saved session: {e}");
    }
  }

  /// List the servers available to the signed-in user.
  ///
  /// Resources without the `server` capability are filtered out; an empty
  /// filtered set is [`PlexClientError::NoServersFound`].
  pub async fn list_servers(&self) -> Result<Vec<ServerDescriptor>, PlexClientError> {
    let token = self.auth_token()?;

    let url = format!("{PLEX_TV_URL}{RESOURCES_PATH}");
    let headers = self.identity_headers(Some(&token));
    let resources: Vec<ServerDescriptor> = match self.transport.get(&url, &headers).await {
      Ok(body) => match serde_json::from_slice(&body) {
        Ok(resources) => resources,
        Err(e) => {
          log::warn!("Failed to decode resources response: {e}");
          return Err(PlexClientError::RequestFailed);
        }
      },
      Err(e) => {
        log::warn!("Fetching servers failed: {e}");
        return Err(PlexClientError::RequestFailed);
      }
    };

    let servers: Vec<ServerDescriptor> = resources.into_iter().filter(|r| r.is_server()).collect();
    if servers.is_empty() {
      return Err(PlexClientError::NoServersFound);
    }
    Ok(servers)
  }

  /// Select a server for subsequent library, movie and image requests.
  ///
  /// Uses the server's first connection endpoint. Returns `false` without
  /// touching the previous selection when the descriptor has no connections.
  pub fn select_server(&self, server: &ServerDescriptor) -> bool {
    let Some(connection) = server.connections.first() else {
      log::warn!("Server {} has no connection endpoint to select.", server.name);
      return false;
    };
    self.state.write().active_server = Some(connection.uri.clone());
    true
  }

  /// List the movie libraries on the selected server.
  pub async fn list_libraries(&self) -> Result<Vec<Library>, PlexClientError> {
    let token = self.auth_token()?;
    let server_url = self.server_url()?;

    let url = format!("{server_url}/library/sections");
    let headers = self.identity_headers(Some(&token));
    let container: LibraryContainer = match self.transport.get(&url, &headers).await {
      Ok(body) => match serde_json::from_slice(&body) {
        Ok(container) => container,
        Err(e) => {
          log::warn!("Failed to decode libraries response: {e}");
          return Err(PlexClientError::RequestFailed);
        }
      },
      Err(e) => {
        log::warn!("Fetching libraries failed: {e}");
        return Err(PlexClientError::RequestFailed);
      }
    };

    let libraries: Vec<Library> = container
      .media_container
      .directory
      .into_iter()
      .filter(|l| l.is_movie())
      .collect();
    if libraries.is_empty() {
      return Err(PlexClientError::NoLibrariesFound);
    }
    Ok(libraries)
  }

  /// List the movies in a library, in server order.
  pub async fn list_movies(&self, library: &Library) -> Result<Vec<MediaItem>, PlexClientError> {
    let token = self.auth_token()?;
    let server_url = self.server_url()?;

    let url = format!(
      "{server_url}/library/sections/{}/all?type={MOVIE_ITEM_TYPE}",
      library.key
    );
    let headers = self.identity_headers(Some(&token));
    let container: ItemContainer = match self.transport.get(&url, &headers).await {
      Ok(body) => match serde_json::from_slice(&body) {
        Ok(container) => container,
        Err(e) => {
          log::warn!("Failed to decode movies response: {e}");
          return Err(PlexClientError::NoMediaFound);
        }
      },
      Err(e) => {
        log::warn!("Fetching movies failed: {e}");
        return Err(PlexClientError::NoMediaFound);
      }
    };

    Ok(container.media_container.metadata)
  }

  /// Fetch raw image bytes for a server-relative path, e.g. a movie thumb.
  pub async fn fetch_image(&self, path: &str) -> Result<Vec<u8>, PlexClientError> {
    let token = self.auth_token()?;
    let server_url = self.server_url()?;

    let url = format!("{server_url}{path}");
    let headers = self.identity_headers(Some(&token));
    match self.transport.get(&url, &headers).await {
      Ok(bytes) => Ok(bytes),
      Err(e) => {
        log::warn!("Fetching image failed: {e}");
        Err(PlexClientError::NoImageFound)
      }
    }
  }

  /// Persist the session under the store key, best-effort.
  fn persist_session(&self, session: &Session) {
    let bytes = match serde_json::to_vec(session) {
      Ok(bytes) => bytes,
      Err(e) => {
        log::warn!("Failed to serialize session: {e}");
        return;
      }
    };
    if let Err(e) = self.store.set(SESSION_STORE_KEY, &bytes) {
      log::warn!("Failed to save session: {e}");
    }
  }

  /// Load a previously persisted session, best-effort.
  fn restore_session(store: &dyn SessionStore) -> Option<Session> {
    let bytes = match store.get(SESSION_STORE_KEY) {
      Ok(Some(bytes)) => bytes,
      Ok(None) => return None,
      Err(e) => {
        log::warn!("Failed to read saved session: {e}");
        return None;
      }
    };
    match serde_json::from_slice(&bytes) {
      Ok(session) => Some(session),
      Err(e) => {
        log::warn!("Ignoring malformed saved session: {e}");
        None
      }
    }
  }
}
