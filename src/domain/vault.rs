//! Vault ledger types and transaction rules
//!
//! A vault is a named, independently balanced ledger with a bounded
//! transaction history. Balances are plain signed numbers with no floor;
//! a vault that spends more than it holds simply goes negative.

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::domain::core::Rgb;

/// Maximum number of transactions retained per vault
///
/// Older entries are dropped silently once the cap is reached.
pub const HISTORY_CAP: usize = 15;

/// Direction of a balance adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Gain,
    Expense,
}

impl TransactionKind {
    /// Description used when the user leaves the field blank
    pub fn default_description(self) -> &'static str {
        match self {
            TransactionKind::Gain => "Tribute",
            TransactionKind::Expense => "Maintenance",
        }
    }

    /// Applies the kind's sign to a positive amount
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            TransactionKind::Gain => amount,
            TransactionKind::Expense => -amount,
        }
    }
}

/// A single committed balance adjustment
///
/// Transactions are immutable once created; they only disappear when
/// pushed past [`HISTORY_CAP`] by newer entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub kind: TransactionKind,
    pub description: String,
    pub timestamp: DateTime<Local>,
}

impl Transaction {
    /// Creates a transaction, substituting the kind's default description
    /// when the given one is blank
    pub fn new(amount: f64, kind: TransactionKind, description: &str) -> Self {
        let description = if description.trim().is_empty() {
            kind.default_description().to_string()
        } else {
            description.to_string()
        };

        Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            description,
            timestamp: Local::now(),
        }
    }
}

/// Banner icon tag for a vault's theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerIcon {
    Royal,
    Bank,
    Grove,
    Dragon,
    Shadow,
}

impl BannerIcon {
    /// Terminal glyph standing in for the original banner artwork
    pub fn glyph(self) -> char {
        match self {
            BannerIcon::Royal => '♛',
            BannerIcon::Bank => '⚖',
            BannerIcon::Grove => '♣',
            BannerIcon::Dragon => '♦',
            BannerIcon::Shadow => '♠',
        }
    }
}

/// Static cosmetic bundle attached to a vault
///
/// Themes are fixed per vault and only ever swapped as a whole unit by
/// changing the vault selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultTheme {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
    pub coin_palette: Vec<Rgb>,
    pub banner_icon: BannerIcon,
}

/// A named, independently balanced ledger
#[derive(Debug, Clone, PartialEq)]
pub struct Vault {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub balance: f64,
    transactions: Vec<Transaction>,
    pub theme: VaultTheme,
}

impl Vault {
    /// Creates a vault with an empty transaction history
    pub fn new(id: &str, name: &str, subtitle: &str, balance: f64, theme: VaultTheme) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            subtitle: subtitle.to_string(),
            balance,
            transactions: Vec::new(),
            theme,
        }
    }

    /// Transaction history, most recent first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Applies a transaction to this vault
    ///
    /// The balance moves by `amount` in the direction of `kind` and the
    /// transaction is prepended to the history, dropping the oldest entry
    /// past [`HISTORY_CAP`]. Amounts that are not positive finite numbers
    /// are ignored without mutating anything.
    ///
    /// # Returns
    /// true if the transaction was applied
    pub fn apply(&mut self, amount: f64, kind: TransactionKind, description: &str) -> bool {
        if !amount.is_finite() || amount <= 0.0 {
            return false;
        }

        self.balance += kind.signed(amount);
        self.transactions
            .insert(0, Transaction::new(amount, kind, description));
        self.transactions.truncate(HISTORY_CAP);
        true
    }

    /// Updates name and subtitle, keeping the prior value for blank fields
    pub fn rename(&mut self, name: &str, subtitle: &str) {
        if !name.trim().is_empty() {
            self.name = name.to_string();
        }
        if !subtitle.trim().is_empty() {
            self.subtitle = subtitle.to_string();
        }
    }
}
