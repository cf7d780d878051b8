pub mod dispatch;
pub mod drag;
pub mod overlay;
pub mod playback;
pub mod remote;
pub mod storage;
pub mod sync;
pub mod ui;
pub mod view;
