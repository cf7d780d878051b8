pub mod api;
pub mod client;
pub mod dispatcher;
pub mod ureq_transport;
