//! Pending level changes.
//!
//! Systems that want a different level (the goal power-up, the player's
//! death) do not reload the map themselves; they record the wish in
//! [`NextLevel`] and the level flow system applies it at the start of the
//! next frame, before anything else moves.

use bevy_ecs::prelude::Resource;

/// A level change that can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelRequest {
    /// Re-read the current map from its file.
    Reload,
    /// Advance to the next map, wrapping to the first.
    Next,
    /// Load a specific map number.
    Jump(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextLevels {
    #[default]
    Unchanged,
    Pending(LevelRequest),
}

/// Intent to change the level.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct NextLevel {
    next: NextLevels,
}

impl NextLevel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &NextLevels {
        &self.next
    }

    /// Mark a change as pending. A later request replaces an earlier one.
    pub fn set(&mut self, request: LevelRequest) {
        self.next = NextLevels::Pending(request);
    }

    /// Take the pending request, leaving [`NextLevels::Unchanged`].
    pub fn take(&mut self) -> Option<LevelRequest> {
        match std::mem::take(&mut self.next) {
            NextLevels::Pending(request) => Some(request),
            NextLevels::Unchanged => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_request() {
        let mut next = NextLevel::new();
        assert_eq!(next.take(), None);
        next.set(LevelRequest::Reload);
        next.set(LevelRequest::Next);
        assert_eq!(next.get(), &NextLevels::Pending(LevelRequest::Next));
        assert_eq!(next.take(), Some(LevelRequest::Next));
        assert_eq!(next.get(), &NextLevels::Unchanged);
    }
}
