//! Interactor state changes that drive grab pose matching.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractorState {
    #[default]
    Normal,
    Hover,
    Select,
    Disabled,
}

/// Transition reported by an interactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractorStateEvent {
    pub previous_state: InteractorState,
    pub new_state: InteractorState,
}

impl InteractorStateEvent {
    #[must_use]
    pub fn new(previous_state: InteractorState, new_state: InteractorState) -> Self {
        Self {
            previous_state,
            new_state,
        }
    }

    /// Hover to select, the usual grab start.
    #[must_use]
    pub fn select() -> Self {
        Self::new(InteractorState::Hover, InteractorState::Select)
    }

    /// Select to hover, the usual grab release.
    #[must_use]
    pub fn unselect() -> Self {
        Self::new(InteractorState::Select, InteractorState::Hover)
    }

    /// Grab poses are only looked up when an interactor enters selection.
    #[inline]
    #[must_use]
    pub fn triggers_pose_match(&self) -> bool {
        self.new_state == InteractorState::Select
    }
}
