//! Plex API types.
//!
//! These types mirror the plex.tv and Plex Media Server JSON responses.

use serde::{Deserialize, Serialize};

/// Capability a resource must provide to be selectable as a server.
pub const SERVER_CAPABILITY: &str = "server";

/// Library type tag for movie libraries.
pub const MOVIE_LIBRARY_TYPE: &str = "movie";

/// Client identification sent with every request as `X-Plex-*` headers.
///
/// Built once at startup from [`AppConfig`](crate::AppConfig) and immutable
/// for the lifetime of the client.
#[derive(Debug, Clone)]
pub struct ClientIdentity {
  /// Stable identifier registered with plex.tv (`X-Plex-Client-Identifier`).
  pub client_id: String,
  /// Product name (`X-Plex-Product`).
  pub product: String,
  /// Product version (`X-Plex-Version`).
  pub version: String,
}

/// Signed-in user session returned by plex.tv authentication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
  #[serde(default)]
  pub id: Option<i64>,
  pub username: String,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub thumb: Option<String>,
  #[serde(rename = "authToken")]
  pub auth_token: String,
}

/// Envelope around the user payload in the sign-in response.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
  pub user: Session,
}

/// A remote resource (server, player, ...) associated with the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerDescriptor {
  pub name: String,
  #[serde(default)]
  pub product: Option<String>,
  /// Comma-separated capability list, e.g. `"server"` or `"client,player"`.
  pub provides: String,
  #[serde(rename = "clientIdentifier")]
  pub client_identifier: String,
  #[serde(rename = "accessToken", default)]
  pub access_token: Option<String>,
  #[serde(default)]
  pub connections: Vec<Connection>,
}

impl ServerDescriptor {
  /// Whether this resource provides the `server` capability.
  pub fn is_server(&self) -> bool {
    self.provides.split(',').any(|c| c.trim() == SERVER_CAPABILITY)
  }
}

/// A single connection endpoint of a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
  pub uri: String,
  #[serde(default)]
  pub local: bool,
}

/// Envelope around `/library/sections` responses.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryContainer {
  #[serde(rename = "MediaContainer")]
  pub media_container: LibraryDirectory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryDirectory {
  #[serde(rename = "Directory", default)]
  pub directory: Vec<Library>,
}

/// A media library (section) on a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Library {
  pub key: String,
  pub title: String,
  #[serde(rename = "type")]
  pub library_type: String,
}

impl Library {
  /// Whether this library holds movies.
  pub fn is_movie(&self) -> bool {
    self.library_type == MOVIE_LIBRARY_TYPE
  }
}

/// Envelope around `/library/sections/{key}/all` responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemContainer {
  #[serde(rename = "MediaContainer")]
  pub media_container: ItemList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemList {
  #[serde(rename = "Metadata", default)]
  pub metadata: Vec<MediaItem>,
}

/// A single movie entry within a library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
  #[serde(rename = "ratingKey")]
  pub rating_key: String,
  pub key: String,
  pub title: String,
  #[serde(default)]
  pub year: Option<u16>,
  #[serde(default)]
  pub summary: Option<String>,
  /// Server-relative thumbnail path, fed back into `fetch_image`.
  #[serde(default)]
  pub thumb: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn resource(provides: &str) -> ServerDescriptor {
    ServerDescriptor {
      name: "test".to_string(),
      product: None,
      provides: provides.to_string(),
      client_identifier: "abc".to_string(),
      access_token: None,
      connections: Vec::new(),
    }
  }

  #[test]
  fn server_capability_is_matched_within_list() {
    assert!(resource("server").is_server());
    assert!(resource("client,server,player").is_server());
    assert!(resource("client, server").is_server());
    assert!(!resource("client,player").is_server());
    assert!(!resource("").is_server());
  }

  #[test]
  fn movie_library_type_is_matched_exactly() {
    let mut library = Library {
      key: "1".to_string(),
      title: "Movies".to_string(),
      library_type: "movie".to_string(),
    };
    assert!(library.is_movie());
    library.library_type = "show".to_string();
    assert!(!library.is_movie());
  }

  #[test]
  fn sign_in_response_decodes_plex_payload() {
    let body = serde_json::json!({
      "user": {
        "id": 42,
        "username": "alex",
        "email": "alex@example.com",
        "thumb": "https://plex.tv/users/avatar.png",
        "authToken": "tok-123",
        "subscription": { "active": true }
      }
    });
    let response: SignInResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.user.username, "alex");
    assert_eq!(response.user.auth_token, "tok-123");
    assert_eq!(response.user.id, Some(42));
  }

  #[test]
  fn item_container_tolerates_missing_metadata() {
    let body = serde_json::json!({ "MediaContainer": { "size": 0 } });
    let container: ItemContainer = serde_json::from_value(body).unwrap();
    assert!(container.media_container.metadata.is_empty());
  }
}
