use crate::core::events::{AppEvent, EventSender, NetworkEvent, Ticket};
use crate::core::traits::{RequestDispatcher, Transport};
use crate::modules::remote::api::ApiRequest;
use std::sync::Arc;
use std::thread;

/// Runs each request on its own worker thread and posts the completion back
/// onto the application's event channel.
pub struct ThreadDispatcher {
    transport: Arc<dyn Transport>,
    event_tx: EventSender,
}

impl ThreadDispatcher {
    pub fn new(transport: Arc<dyn Transport>, event_tx: EventSender) -> Self {
        Self {
            transport,
            event_tx,
        }
    }
}

impl RequestDispatcher for ThreadDispatcher {
    fn dispatch(&mut self, ticket: Ticket, request: &ApiRequest) {
        let transport = Arc::clone(&self.transport);
        let event_tx = self.event_tx.clone();
        let path = request.path();

        thread::spawn(move || {
            let outcome = transport.get(&path);
            if let Err(err) = &outcome {
                tracing::warn!(ticket, %path, error = %err, "request failed");
            }
            // The receiver is gone once the application shut down.
            let _ = event_tx.send(AppEvent::Network(NetworkEvent::Completed { ticket, outcome }));
        });
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RemoteError;
    use crate::core::traits::HttpResponse;
    use crossbeam_channel::bounded;
    use std::time::Duration;

    struct FixedTransport;

    impl Transport for FixedTransport {
        fn get(&self, path: &str) -> Result<HttpResponse, RemoteError> {
            if path == "/playlist" {
                Ok(HttpResponse::ok(r#"{"playlist": []}"#))
            } else {
                Err(RemoteError::Transport("connection refused".into()))
            }
        }
    }

    #[test]
    fn completions_arrive_on_the_event_channel() {
        let (tx, rx) = bounded(10);
        let mut dispatcher = ThreadDispatcher::new(Arc::new(FixedTransport), tx);

        dispatcher.dispatch(1, &ApiRequest::Playlist);
        dispatcher.dispatch(2, &ApiRequest::Playlist);

        let mut tickets = Vec::new();
        for _ in 0..2 {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                AppEvent::Network(NetworkEvent::Completed { ticket, outcome }) => {
                    assert!(outcome.unwrap().is_success());
                    tickets.push(ticket);
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        tickets.sort();
        assert_eq!(tickets, vec![1, 2], "identical requests are not deduplicated");
    }

    #[test]
    fn transport_failures_are_delivered_too() {
        let (tx, rx) = bounded(10);
        let mut dispatcher = ThreadDispatcher::new(Arc::new(FixedTransport), tx);
        dispatcher.dispatch(9, &ApiRequest::Delete { id: crate::core::models::ServerId::new("1") });

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::Network(NetworkEvent::Completed { ticket, outcome }) => {
                assert_eq!(ticket, 9);
                assert!(outcome.is_err());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
