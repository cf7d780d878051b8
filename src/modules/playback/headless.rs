use crate::core::models::MediaKind;
use crate::core::traits::MediaElement;

/// Media element without any output device.
///
/// Records what the controller asked it to do. Position only moves through
/// seeks.
#[derive(Debug, Clone)]
pub struct HeadlessMediaElement {
    kind: MediaKind,
    source: Option<String>,
    poster: Option<String>,
    is_paused: bool,
    visible: bool,

    // Seconds into the current source
    position: f64,

    /// Number of loads since creation
    loads: usize,
}

impl HeadlessMediaElement {
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            source: None,
            poster: None,
            is_paused: true,
            visible: false,
            position: 0.0,
            loads: 0,
        }
    }

    pub fn loads(&self) -> usize {
        self.loads
    }

    pub fn poster(&self) -> Option<&str> {
        self.poster.as_deref()
    }
}

impl MediaElement for HeadlessMediaElement {
    fn set_source(&mut self, source: Option<&str>) {
        self.source = source.map(str::to_string);
        self.position = 0.0;
        self.is_paused = true;
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn load(&mut self) {
        tracing::trace!(kind = ?self.kind, source = ?self.source, "load");
        self.loads += 1;
        self.position = 0.0;
    }

    fn play(&mut self) {
        if self.source.is_some() {
            self.is_paused = false;
        }
    }

    fn pause(&mut self) {
        self.is_paused = true;
    }

    fn is_paused(&self) -> bool {
        self.is_paused
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds.max(0.0);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_poster(&mut self, poster: Option<&str>) {
        self.poster = poster.map(str::to_string);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_requires_a_source() {
        let mut el = HeadlessMediaElement::new(MediaKind::Audio);
        el.play();
        assert!(el.is_paused());

        el.set_source(Some("/1/stream.m3u8"));
        el.load();
        el.play();
        assert!(!el.is_paused());
        assert_eq!(el.loads(), 1);
    }

    #[test]
    fn new_source_resets_position() {
        let mut el = HeadlessMediaElement::new(MediaKind::Video);
        el.set_source(Some("/1/stream.m3u8"));
        el.set_current_time(-3.0);
        assert_eq!(el.current_time(), 0.0);

        el.play();
        el.set_current_time(15.0);
        assert_eq!(el.current_time(), 15.0);

        el.set_source(None);
        assert_eq!(el.current_time(), 0.0);
        assert_eq!(el.source(), None);
    }
}
