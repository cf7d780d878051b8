use std::fmt;

/// User actions a tappable element can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    OpenInfo,
    CloseInfo,
    OpenMovie,
    CloseMovie,
    AddMovie,
    /// Add, then start playing the added item.
    PlayMovie,
    DeleteMovie,
    PrevMovie,
    NextMovie,
    SeekableMovie,
    /// Marker on drag handles; the drag itself runs from touch-move.
    StartDrag,
}

/// Identifier table, one entry per action.
pub const REGISTRY: &[(&str, Action)] = &[
    ("open-info", Action::OpenInfo),
    ("close-info", Action::CloseInfo),
    ("open-movie", Action::OpenMovie),
    ("close-movie", Action::CloseMovie),
    ("add-movie", Action::AddMovie),
    ("play-movie", Action::PlayMovie),
    ("delete-movie", Action::DeleteMovie),
    ("prev-movie", Action::PrevMovie),
    ("next-movie", Action::NextMovie),
    ("seekable-movie", Action::SeekableMovie),
    ("start-drag", Action::StartDrag),
];

impl Action {
    pub fn identifier(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(_, action)| *action == self)
            .map(|(id, _)| *id)
            .unwrap_or("")
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_its_own_identifier() {
        for (id, action) in REGISTRY {
            assert_eq!(action.identifier(), *id);
        }
        let mut ids: Vec<_> = REGISTRY.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn display_uses_the_identifier() {
        assert_eq!(Action::PlayMovie.to_string(), "play-movie");
        assert_eq!(Action::StartDrag.to_string(), "start-drag");
    }
}
