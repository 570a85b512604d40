//! Application controller and coordination layer
//!
//! The controller orchestrates between the vault store, the edit-mode
//! state machine, and the commentary/audio collaborators. Store mutation
//! is always synchronous; only the commentary fetch runs on a worker
//! thread, reporting back through a channel the controller polls.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use crate::app::state::{AppState, StateEvent, StateMachine};
use crate::app::store::VaultStore;
use crate::domain::vault::{TransactionKind, Vault};
use crate::services::audio::AudioService;
use crate::services::commentary::CommentaryClient;

/// Treasurer line shown before any interaction
pub const WELCOME_MESSAGE: &str = "Which ledger shall we inspect today?";
/// Treasurer line shown after a sealed metadata edit
pub const HERALDS_MESSAGE: &str = "The heralds have been notified of the name change.";

/// Main application controller
///
/// Owns the store and the active selection. Commentary results are
/// tagged with a sequence number; when fetches overlap, the last
/// dispatched one wins and stale results are dropped on receipt.
pub struct AppController {
    store: VaultStore,
    active_vault_id: String,
    state: AppState,
    commentary: CommentaryClient,
    audio: AudioService,
    treasurer_msg: String,
    comment_tx: Sender<(u64, String)>,
    comment_rx: Receiver<(u64, String)>,
    /// Sequence of the most recently dispatched fetch
    dispatched: u64,
    /// Sequence of the most recently displayed result
    resolved: u64,
}

impl AppController {
    /// Creates a controller with the seeded store and live collaborators
    pub fn new() -> Self {
        Self::with_parts(VaultStore::new(), CommentaryClient::from_env(), AudioService::new())
    }

    /// Creates a controller from explicit parts
    ///
    /// The store must contain at least one vault; the first one becomes
    /// the active selection.
    pub fn with_parts(store: VaultStore, commentary: CommentaryClient, audio: AudioService) -> Self {
        let active_vault_id = store.vaults()[0].id.clone();
        let (comment_tx, comment_rx) = channel();

        Self {
            store,
            active_vault_id,
            state: AppState::default(),
            commentary,
            audio,
            treasurer_msg: WELCOME_MESSAGE.to_string(),
            comment_tx,
            comment_rx,
            dispatched: 0,
            resolved: 0,
        }
    }

    /// All vaults, in seeded order
    pub fn vaults(&self) -> &[Vault] {
        self.store.vaults()
    }

    /// The currently selected vault
    pub fn active_vault(&self) -> &Vault {
        self.store
            .get(&self.active_vault_id)
            .unwrap_or_else(|| &self.store.vaults()[0])
    }

    /// Current edit-mode state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Latest treasurer line
    pub fn treasurer_message(&self) -> &str {
        &self.treasurer_msg
    }

    /// True while a dispatched commentary fetch is still outstanding
    pub fn is_processing(&self) -> bool {
        self.dispatched > self.resolved
    }

    /// Selects a vault by id, dropping any open metadata edit
    ///
    /// # Returns
    /// true if the id named a known vault
    pub fn select_vault(&mut self, id: &str) -> bool {
        let Some(vault) = self.store.get(id) else {
            return false;
        };

        self.treasurer_msg = format!("Inspecting {}...", vault.name);
        self.active_vault_id = id.to_string();
        self.state = StateMachine::process_event(self.state.clone(), StateEvent::VaultSwitched);
        true
    }

    /// Commits a transaction against the active vault
    ///
    /// Mutates the balance synchronously, plays the clink, and dispatches
    /// the commentary fetch. Invalid amounts are silently ignored.
    ///
    /// # Returns
    /// true if the transaction was applied
    pub fn commit(&mut self, kind: TransactionKind, amount: f64, description: &str) -> bool {
        let id = self.active_vault_id.clone();
        let Some(vault) = self.store.apply_transaction(&id, amount, kind, description) else {
            return false;
        };

        let balance = vault.balance;
        let name = vault.name.clone();

        self.audio.play_clink(kind);
        self.dispatch_commentary(balance, kind.signed(amount), name);
        true
    }

    /// Begins editing the active vault's metadata
    pub fn begin_edit(&mut self) {
        let vault = self.active_vault();
        let event = StateEvent::BeginEdit {
            name: vault.name.clone(),
            subtitle: vault.subtitle.clone(),
        };
        self.state = StateMachine::process_event(self.state.clone(), event);
    }

    /// Replaces the draft name (ignored while browsing)
    pub fn draft_name(&mut self, name: &str) {
        self.state = StateMachine::process_event(
            self.state.clone(),
            StateEvent::DraftName(name.to_string()),
        );
    }

    /// Replaces the draft subtitle (ignored while browsing)
    pub fn draft_subtitle(&mut self, subtitle: &str) {
        self.state = StateMachine::process_event(
            self.state.clone(),
            StateEvent::DraftSubtitle(subtitle.to_string()),
        );
    }

    /// Seals the open edit, persisting non-blank draft fields
    pub fn seal_edit(&mut self) {
        if let AppState::Editing(draft) = self.state.clone() {
            let id = self.active_vault_id.clone();
            self.store.rename(&id, &draft.name, &draft.subtitle);
            self.treasurer_msg = HERALDS_MESSAGE.to_string();
        }
        self.state = StateMachine::process_event(self.state.clone(), StateEvent::SealEdit);
    }

    /// Discards the open edit without touching the store
    pub fn discard_edit(&mut self) {
        self.state = StateMachine::process_event(self.state.clone(), StateEvent::DiscardEdit);
    }

    /// Drains commentary results, keeping only the latest dispatched one
    ///
    /// Stale results (a fetch that was overtaken by a newer transaction)
    /// are dropped: last write wins.
    pub fn poll_commentary(&mut self) {
        while let Ok((seq, comment)) = self.comment_rx.try_recv() {
            if seq == self.dispatched {
                self.resolved = seq;
                self.treasurer_msg = comment;
            }
        }
    }

    fn dispatch_commentary(&mut self, balance: f64, delta: f64, vault_name: String) {
        self.dispatched += 1;
        let seq = self.dispatched;

        // Without a credential the fallback is deterministic and local;
        // skip the worker thread entirely.
        if !self.commentary.has_credential() {
            self.treasurer_msg = self.commentary.comment_on(balance, delta, &vault_name);
            self.resolved = seq;
            return;
        }

        let client = self.commentary.clone();
        let tx = self.comment_tx.clone();
        thread::spawn(move || {
            let comment = client.comment_on(balance, delta, &vault_name);
            // The controller may be gone on shutdown; nothing to do then.
            let _ = tx.send((seq, comment));
        });
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}
