//! Application state management
//!
//! Defines the metadata edit-mode state machine. The state holds only
//! transient draft data; the vault collection itself lives in the store
//! and is mutated by the controller when an edit is sealed.

/// Main application state - either browsing vaults or editing metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Normal operation: transactions and vault switching
    Browsing,
    /// The active vault's name and subtitle are being edited
    Editing(MetadataDraft),
}

impl Default for AppState {
    fn default() -> Self {
        Self::Browsing
    }
}

/// Transient draft of a vault's editable metadata
///
/// Drafts start prefilled with the current values. Blank fields keep the
/// prior value when the edit is sealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDraft {
    pub name: String,
    pub subtitle: String,
}

/// Possible state transition events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// Edit mode was requested; carries the current metadata to prefill
    BeginEdit { name: String, subtitle: String },
    /// The draft name was replaced
    DraftName(String),
    /// The draft subtitle was replaced
    DraftSubtitle(String),
    /// The edit was confirmed; the controller persists the draft
    SealEdit,
    /// The edit was abandoned
    DiscardEdit,
    /// Another vault was selected; any open edit is dropped
    VaultSwitched,
}

/// State machine for edit-mode transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes a state event and returns the new state
    ///
    /// Invalid transitions (draft events while browsing, a second
    /// BeginEdit while already editing) leave the state unchanged.
    pub fn process_event(current_state: AppState, event: StateEvent) -> AppState {
        match (current_state, event) {
            (AppState::Browsing, StateEvent::BeginEdit { name, subtitle }) => {
                AppState::Editing(MetadataDraft { name, subtitle })
            }

            (AppState::Editing(mut draft), StateEvent::DraftName(name)) => {
                draft.name = name;
                AppState::Editing(draft)
            }

            (AppState::Editing(mut draft), StateEvent::DraftSubtitle(subtitle)) => {
                draft.subtitle = subtitle;
                AppState::Editing(draft)
            }

            (AppState::Editing(_), StateEvent::SealEdit)
            | (AppState::Editing(_), StateEvent::DiscardEdit) => AppState::Browsing,

            // Switching vaults always lands in browsing, dropping any draft
            (_, StateEvent::VaultSwitched) => AppState::Browsing,

            // Invalid transitions - ignore event
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn begin() -> StateEvent {
        StateEvent::BeginEdit {
            name: "The Royal Vault".to_string(),
            subtitle: "Managed by the Royal Treasury".to_string(),
        }
    }

    #[test]
    fn default_state_is_browsing() {
        assert!(matches!(AppState::default(), AppState::Browsing));
    }

    #[test]
    fn begin_edit_prefills_draft() {
        let state = StateMachine::process_event(AppState::Browsing, begin());

        if let AppState::Editing(draft) = state {
            assert_eq!(draft.name, "The Royal Vault");
            assert_eq!(draft.subtitle, "Managed by the Royal Treasury");
        } else {
            panic!("Expected editing state");
        }
    }

    #[test]
    fn draft_events_update_fields() {
        let state = StateMachine::process_event(AppState::Browsing, begin());
        let state =
            StateMachine::process_event(state, StateEvent::DraftName("Iron Fortress".into()));
        let state =
            StateMachine::process_event(state, StateEvent::DraftSubtitle("Reforged".into()));

        if let AppState::Editing(draft) = state {
            assert_eq!(draft.name, "Iron Fortress");
            assert_eq!(draft.subtitle, "Reforged");
        } else {
            panic!("Expected editing state");
        }
    }

    #[test]
    fn seal_and_discard_return_to_browsing() {
        let editing = StateMachine::process_event(AppState::Browsing, begin());
        assert!(matches!(
            StateMachine::process_event(editing.clone(), StateEvent::SealEdit),
            AppState::Browsing
        ));
        assert!(matches!(
            StateMachine::process_event(editing, StateEvent::DiscardEdit),
            AppState::Browsing
        ));
    }

    #[test]
    fn draft_events_are_ignored_while_browsing() {
        let state = StateMachine::process_event(
            AppState::Browsing,
            StateEvent::DraftName("nobody".into()),
        );
        assert!(matches!(state, AppState::Browsing));
    }

    #[test]
    fn vault_switch_drops_open_edit() {
        let editing = StateMachine::process_event(AppState::Browsing, begin());
        let state = StateMachine::process_event(editing, StateEvent::VaultSwitched);
        assert!(matches!(state, AppState::Browsing));
    }

    #[test]
    fn begin_edit_while_editing_keeps_existing_draft() {
        let editing = StateMachine::process_event(AppState::Browsing, begin());
        let state = StateMachine::process_event(
            editing,
            StateEvent::BeginEdit {
                name: "Other".into(),
                subtitle: "Other".into(),
            },
        );

        if let AppState::Editing(draft) = state {
            assert_eq!(draft.name, "The Royal Vault");
        } else {
            panic!("Expected editing state");
        }
    }
}
