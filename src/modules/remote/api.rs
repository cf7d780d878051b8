//! Endpoint paths of the media server and decoding of its answers.

use crate::core::error::{RemoteError, RemoteResult};
use crate::core::models::{Direction, PlaylistItem, ServerId, StreamMode};
use crate::core::traits::HttpResponse;
use serde::Deserialize;
use urlencoding::encode;

/// One call the controller can make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Playlist,
    Add { path: String },
    Delete { id: ServerId },
    /// Place `moved` immediately before `before`, or at the end when `None`.
    Move { moved: ServerId, before: Option<ServerId> },
    Neighbor { direction: Direction, id: ServerId },
}

impl ApiRequest {
    pub fn path(&self) -> String {
        match self {
            ApiRequest::Playlist => "/playlist".to_string(),
            ApiRequest::Add { path } => format!("/add/{}", encode(path)),
            ApiRequest::Delete { id } => format!("/delete/{}", encode(id.as_str())),
            ApiRequest::Move { moved, before } => format!(
                "/move/{}/{}",
                encode(moved.as_str()),
                before
                    .as_ref()
                    .map(|b| encode(b.as_str()).into_owned())
                    .unwrap_or_default()
            ),
            ApiRequest::Neighbor { direction, id } => {
                format!("/{}/{}", direction.segment(), encode(id.as_str()))
            }
        }
    }
}

pub fn stream_path(id: &ServerId, mode: StreamMode) -> String {
    format!("/{}/{}", encode(id.as_str()), mode.file_name())
}

pub fn thumbnail_path(link: &str) -> String {
    format!("/thumbnail/{}", encode(link))
}

#[derive(Deserialize)]
struct PlaylistEnvelope {
    playlist: Vec<PlaylistItem>,
}

/// Turn a non-200 answer into an error.
pub fn expect_success(
    outcome: Result<HttpResponse, RemoteError>,
) -> RemoteResult<HttpResponse> {
    let response = outcome?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status {
            code: response.status,
            text: response.status_text,
        })
    }
}

pub fn decode_playlist(body: &str) -> RemoteResult<Vec<PlaylistItem>> {
    let envelope: PlaylistEnvelope = serde_json::from_str(body)?;
    Ok(envelope.playlist)
}

pub fn decode_item(body: &str) -> RemoteResult<PlaylistItem> {
    Ok(serde_json::from_str(body)?)
}

/// A neighbour lookup answers with an item, or with an empty body / `null`
/// when there is none.
pub fn decode_neighbor(body: &str) -> RemoteResult<Option<PlaylistItem>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str::<Option<PlaylistItem>>(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_server_routes() {
        assert_eq!(ApiRequest::Playlist.path(), "/playlist");
        assert_eq!(
            ApiRequest::Add { path: "/films/a b&c.mkv".into() }.path(),
            "/add/%2Ffilms%2Fa%20b%26c.mkv"
        );
        assert_eq!(ApiRequest::Delete { id: ServerId::new("7") }.path(), "/delete/7");
        assert_eq!(
            ApiRequest::Move { moved: ServerId::new("A"), before: Some(ServerId::new("D")) }.path(),
            "/move/A/D"
        );
        assert_eq!(
            ApiRequest::Move { moved: ServerId::new("A"), before: None }.path(),
            "/move/A/"
        );
        assert_eq!(
            ApiRequest::Neighbor { direction: Direction::Prev, id: ServerId::new("9") }.path(),
            "/prev/9"
        );
    }

    #[test]
    fn stream_and_thumbnail_paths() {
        let id = ServerId::new("12");
        assert_eq!(stream_path(&id, StreamMode::Progressive), "/12/stream.m3u8");
        assert_eq!(stream_path(&id, StreamMode::RandomAccess), "/12/seekable.m3u8");
        assert_eq!(thumbnail_path("x/y"), "/thumbnail/x%2Fy");
    }

    #[test]
    fn non_200_answers_become_status_errors() {
        let err = expect_success(Ok(HttpResponse::status(404, "Not Found"))).unwrap_err();
        assert_eq!(err, RemoteError::Status { code: 404, text: "Not Found".into() });
    }

    #[test]
    fn neighbor_lookup_accepts_empty_and_null() {
        assert_eq!(decode_neighbor("").unwrap(), None);
        assert_eq!(decode_neighbor("null").unwrap(), None);
        let item = decode_neighbor(r#"{"serverid": "3", "path": "/a.mp3"}"#).unwrap();
        assert_eq!(item.unwrap().server_id, Some(ServerId::new("3")));
    }

    #[test]
    fn malformed_playlist_is_reported() {
        assert!(matches!(decode_playlist("<html>"), Err(RemoteError::Malformed(_))));
        assert!(matches!(decode_playlist(r#"{"items": []}"#), Err(RemoteError::Malformed(_))));
        assert_eq!(decode_playlist(r#"{"playlist": []}"#).unwrap().len(), 0);
    }
}
