use crate::core::error::RemoteResult;
use crate::core::models::{Direction, PlaylistItem, ServerId};
use crate::core::traits::Transport;
use crate::modules::remote::api::{self, ApiRequest};
use std::sync::Arc;

/// Blocking wrapper over the server API for one-shot commands.
pub struct RemoteClient {
    transport: Arc<dyn Transport>,
}

impl RemoteClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    fn call(&self, request: ApiRequest) -> RemoteResult<String> {
        let response = api::expect_success(self.transport.get(&request.path()))?;
        Ok(response.body)
    }

    pub fn playlist(&self) -> RemoteResult<Vec<PlaylistItem>> {
        api::decode_playlist(&self.call(ApiRequest::Playlist)?)
    }

    pub fn add(&self, path: &str) -> RemoteResult<PlaylistItem> {
        api::decode_item(&self.call(ApiRequest::Add {
            path: path.to_string(),
        })?)
    }

    pub fn delete(&self, id: ServerId) -> RemoteResult<()> {
        self.call(ApiRequest::Delete { id }).map(|_| ())
    }

    pub fn move_before(&self, moved: ServerId, before: Option<ServerId>) -> RemoteResult<()> {
        self.call(ApiRequest::Move { moved, before }).map(|_| ())
    }

    pub fn neighbor(&self, direction: Direction, id: ServerId) -> RemoteResult<Option<PlaylistItem>> {
        api::decode_neighbor(&self.call(ApiRequest::Neighbor { direction, id })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RemoteError;
    use crate::core::traits::HttpResponse;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedTransport {
        seen: Mutex<Vec<String>>,
    }

    impl Transport for ScriptedTransport {
        fn get(&self, path: &str) -> Result<HttpResponse, RemoteError> {
            self.seen.lock().unwrap().push(path.to_string());
            match path {
                "/playlist" => Ok(HttpResponse::ok(
                    r#"{"playlist": [{"serverid": "1", "path": "/a.mkv"}]}"#,
                )),
                "/next/1" => Ok(HttpResponse::ok("")),
                "/add/%2Fbad.txt" => Ok(HttpResponse::status(415, "Unsupported Media Type")),
                _ => Ok(HttpResponse::ok("")),
            }
        }
    }

    #[test]
    fn playlist_and_empty_neighbor() {
        let transport = Arc::new(ScriptedTransport::default());
        let client = RemoteClient::new(transport.clone());

        assert_eq!(client.playlist().unwrap().len(), 1);
        assert_eq!(client.neighbor(Direction::Next, ServerId::new("1")).unwrap(), None);
        client.move_before(ServerId::new("1"), None).unwrap();

        assert_eq!(
            *transport.seen.lock().unwrap(),
            vec!["/playlist", "/next/1", "/move/1/"]
        );
    }

    #[test]
    fn rejected_add_surfaces_status() {
        let client = RemoteClient::new(Arc::new(ScriptedTransport::default()));
        let err = client.add("/bad.txt").unwrap_err();
        assert!(matches!(err, RemoteError::Status { code: 415, .. }));
    }
}
