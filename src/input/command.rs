//! Terminal command parsing
//!
//! Turns raw input lines into typed [`Command`] values. Parsing is
//! stateless; whether a command applies in the current mode (e.g. draft
//! edits while browsing) is decided by the controller, which ignores
//! events that do not fit its state.

use std::path::PathBuf;

use thiserror::Error;

/// A parsed user command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Empty input: re-poll commentary and reprint the treasurer line
    Refresh,
    ListVaults,
    SelectVault(String),
    Deposit { amount: f64, description: String },
    Withdraw { amount: f64, description: String },
    History,
    BeginEdit,
    DraftName(String),
    DraftSubtitle(String),
    Seal,
    Discard,
    Show,
    Export(PathBuf),
    Help,
    Quit,
}

/// Command parsing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// The amount was missing, non-numeric, or not a positive finite number
    #[error("'{0}' is not a positive amount")]
    InvalidAmount(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown command '{0}'")]
    Unknown(String),
}

/// Parses one input line into a command
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Refresh);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "vaults" | "ls" => Ok(Command::ListVaults),
        "vault" | "v" => {
            if rest.is_empty() {
                Err(CommandError::MissingArgument("vault"))
            } else {
                Ok(Command::SelectVault(rest.to_string()))
            }
        }
        "deposit" | "d" => {
            let (amount, description) = parse_amount(rest)?;
            Ok(Command::Deposit {
                amount,
                description,
            })
        }
        "withdraw" | "w" => {
            let (amount, description) = parse_amount(rest)?;
            Ok(Command::Withdraw {
                amount,
                description,
            })
        }
        "history" | "h" => Ok(Command::History),
        "edit" => Ok(Command::BeginEdit),
        "name" => Ok(Command::DraftName(rest.to_string())),
        "subtitle" => Ok(Command::DraftSubtitle(rest.to_string())),
        "seal" => Ok(Command::Seal),
        "discard" => Ok(Command::Discard),
        "show" => Ok(Command::Show),
        "export" => {
            if rest.is_empty() {
                Err(CommandError::MissingArgument("export"))
            } else {
                Ok(Command::Export(PathBuf::from(rest)))
            }
        }
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Splits `<amount> [description...]`, validating the amount
fn parse_amount(rest: &str) -> Result<(f64, String), CommandError> {
    let (raw, description) = match rest.split_once(char::is_whitespace) {
        Some((raw, description)) => (raw, description.trim()),
        None => (rest, ""),
    };

    if raw.is_empty() {
        return Err(CommandError::MissingArgument("amount"));
    }

    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => {
            Ok((amount, description.to_string()))
        }
        _ => Err(CommandError::InvalidAmount(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_is_a_refresh() {
        assert_eq!(parse(""), Ok(Command::Refresh));
        assert_eq!(parse("   "), Ok(Command::Refresh));
    }

    #[test]
    fn deposit_with_description() {
        assert_eq!(
            parse("deposit 50 spoils of war"),
            Ok(Command::Deposit {
                amount: 50.0,
                description: "spoils of war".to_string(),
            })
        );
    }

    #[test]
    fn withdraw_without_description() {
        assert_eq!(
            parse("w 12.5"),
            Ok(Command::Withdraw {
                amount: 12.5,
                description: String::new(),
            })
        );
    }

    #[test]
    fn amounts_must_be_positive_finite_numbers() {
        for line in ["deposit 0", "deposit -5", "deposit gold", "deposit NaN", "deposit inf"] {
            assert!(
                matches!(parse(line), Err(CommandError::InvalidAmount(_))),
                "{line:?} should be rejected"
            );
        }
        assert_eq!(
            parse("deposit"),
            Err(CommandError::MissingArgument("amount"))
        );
    }

    #[test]
    fn vault_selection_requires_an_id() {
        assert_eq!(parse("vault royal"), Ok(Command::SelectVault("royal".into())));
        assert_eq!(parse("v iron"), Ok(Command::SelectVault("iron".into())));
        assert_eq!(parse("vault"), Err(CommandError::MissingArgument("vault")));
    }

    #[test]
    fn edit_flow_commands() {
        assert_eq!(parse("edit"), Ok(Command::BeginEdit));
        assert_eq!(
            parse("name The Gilded Keep"),
            Ok(Command::DraftName("The Gilded Keep".into()))
        );
        // A bare `name` blanks the draft, which keeps the prior value on seal.
        assert_eq!(parse("name"), Ok(Command::DraftName(String::new())));
        assert_eq!(parse("subtitle Of Ash"), Ok(Command::DraftSubtitle("Of Ash".into())));
        assert_eq!(parse("seal"), Ok(Command::Seal));
        assert_eq!(parse("discard"), Ok(Command::Discard));
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse("VAULTS"), Ok(Command::ListVaults));
        assert_eq!(parse("Quit"), Ok(Command::Quit));
    }

    #[test]
    fn export_takes_a_path() {
        assert_eq!(
            parse("export pile.png"),
            Ok(Command::Export(PathBuf::from("pile.png")))
        );
        assert_eq!(parse("export"), Err(CommandError::MissingArgument("export")));
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(parse("plunder"), Err(CommandError::Unknown("plunder".into())));
    }
}
