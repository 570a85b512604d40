//! Terminal presentation surface
//!
//! Renders the vault views as ANSI truecolor text and drives the
//! interactive command loop. The coin-pile pixmap from the renderer is
//! downsampled into half-block characters so the pile scales visibly
//! with the balance right in the terminal.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tiny_skia::Pixmap;

use crate::app::controller::AppController;
use crate::app::state::AppState;
use crate::domain::core::Rgb;
use crate::domain::pile;
use crate::domain::vault::{TransactionKind, Vault};
use crate::input::command::{Command, CommandError, parse};
use crate::ui::renderer::PileRenderer;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const ITALIC: &str = "\x1b[3m";

const PARCHMENT: Rgb = Rgb::from_u32(0xf4e4bc);
const GAIN_COLOR: Rgb = Rgb::from_u32(0xffd700);
const EXPENSE_COLOR: Rgb = Rgb::from_u32(0xff4d4d);

/// Character cells across the downsampled pile canvas
const PILE_COLUMNS: u32 = 80;

const HELP: &str = "\
Commands:
  vaults              list the vaults and their balances
  vault <id>          switch to a vault
  deposit <amt> [d]   record a gain (description optional)
  withdraw <amt> [d]  record an expense
  history             show the recent filings
  edit                start editing the vault name/subtitle
  name <text>         set the draft name (while editing)
  subtitle <text>     set the draft subtitle (while editing)
  seal                keep the edited metadata
  discard             abandon the edit
  show                redraw the vault view
  export <path>       save the coin pile as a PNG
  quit                leave the treasury";

/// Runs the interactive loop until quit or end of input
pub fn run(mut controller: AppController) -> io::Result<()> {
    let renderer = PileRenderer::new();
    let stdin = io::stdin();
    let mut out = io::stdout();

    print!("{}", render_full(&controller, &renderer));

    loop {
        controller.poll_commentary();

        let prompt = match controller.state() {
            AppState::Editing(_) => "edit> ".to_string(),
            AppState::Browsing => format!("{}> ", controller.active_vault().id),
        };
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => dispatch(&mut controller, &renderer, command),
            // A malformed amount mutates nothing and surfaces no error.
            Err(CommandError::InvalidAmount(_)) => {}
            Err(err) => println!("{err} (try 'help')"),
        }
    }

    Ok(())
}

fn dispatch(controller: &mut AppController, renderer: &PileRenderer, command: Command) {
    match command {
        Command::Refresh => {
            println!("{}", render_treasurer(controller));
        }
        Command::ListVaults => {
            println!("{}", render_vault_list(controller));
        }
        Command::SelectVault(id) => {
            if controller.select_vault(&id) {
                print!("{}", render_full(controller, renderer));
            } else {
                println!("No vault answers to '{id}'.");
            }
        }
        Command::Deposit {
            amount,
            description,
        } => {
            if controller.commit(TransactionKind::Gain, amount, &description) {
                print!("{}", render_full(controller, renderer));
            }
        }
        Command::Withdraw {
            amount,
            description,
        } => {
            if controller.commit(TransactionKind::Expense, amount, &description) {
                print!("{}", render_full(controller, renderer));
            }
        }
        Command::History => {
            println!("{}", render_history(controller.active_vault()));
        }
        Command::BeginEdit => {
            controller.begin_edit();
            println!("{}", render_header(controller));
        }
        Command::DraftName(name) => {
            if matches!(controller.state(), AppState::Browsing) {
                println!("Nothing is being edited. Start with 'edit'.");
            } else {
                controller.draft_name(&name);
                println!("{}", render_header(controller));
            }
        }
        Command::DraftSubtitle(subtitle) => {
            if matches!(controller.state(), AppState::Browsing) {
                println!("Nothing is being edited. Start with 'edit'.");
            } else {
                controller.draft_subtitle(&subtitle);
                println!("{}", render_header(controller));
            }
        }
        Command::Seal => {
            controller.seal_edit();
            print!("{}", render_full(controller, renderer));
        }
        Command::Discard => {
            controller.discard_edit();
            println!("The quill is set down; nothing changes.");
        }
        Command::Show => {
            print!("{}", render_full(controller, renderer));
        }
        Command::Export(path) => {
            export_pile(controller, renderer, &path);
        }
        Command::Help => {
            println!("{HELP}");
        }
        // Quit is handled by the loop.
        Command::Quit => {}
    }
}

fn export_pile(controller: &AppController, renderer: &PileRenderer, path: &Path) {
    let vault = controller.active_vault();
    let coins = pile::generate(vault.balance, &vault.theme.coin_palette);

    let saved = renderer
        .render(&coins, &vault.theme)
        .map_err(|err| err.to_string())
        .and_then(|pixmap| pixmap.save_png(path).map_err(|err| err.to_string()));

    match saved {
        Ok(()) => println!("The pile is committed to canvas at {}.", path.display()),
        Err(err) => eprintln!("Export failed: {err}"),
    }
}

/// Full vault view: tabs, header, balance, treasurer, pile, history
pub fn render_full(controller: &AppController, renderer: &PileRenderer) -> String {
    let vault = controller.active_vault();

    let mut out = String::new();
    out.push('\n');
    out.push_str(&render_tabs(controller));
    out.push_str(&render_header(controller));
    out.push('\n');
    out.push_str(&render_balance(vault));
    out.push('\n');
    out.push_str(&render_treasurer(controller));
    out.push('\n');
    out.push_str(&render_pile(vault, renderer));
    out.push_str(&render_history(vault));
    out.push('\n');
    out.push_str(&format!(
        "{DIM}{ITALIC}\"Every coin accounted for. Every debt paid in blood or gold. \
         The {} never forgets.\"{RESET}\n",
        vault.name
    ));
    out
}

fn render_tabs(controller: &AppController) -> String {
    let active_id = &controller.active_vault().id;
    let tabs: Vec<String> = controller
        .vaults()
        .iter()
        .map(|vault| {
            let label = format!("{} {}", vault.theme.banner_icon.glyph(), vault.name);
            if &vault.id == active_id {
                format!("{BOLD}{}▸ {label}{RESET}", fg(vault.theme.primary))
            } else {
                format!("{DIM}  {label}{RESET}")
            }
        })
        .collect();

    format!("{}\n\n", tabs.join("   "))
}

fn render_header(controller: &AppController) -> String {
    let vault = controller.active_vault();

    match controller.state() {
        AppState::Editing(draft) => format!(
            "{}✎ {}{RESET}\n{}{ITALIC}{}{RESET}\n{DIM}(name <text> | subtitle <text> | seal | discard){RESET}\n",
            fg(vault.theme.primary),
            draft.name,
            fg(PARCHMENT),
            draft.subtitle,
        ),
        AppState::Browsing => format!(
            "{BOLD}{}{}{RESET}\n{}{ITALIC}{}{RESET}\n",
            fg(vault.theme.primary),
            vault.name.to_uppercase(),
            fg(PARCHMENT),
            vault.subtitle,
        ),
    }
}

fn render_balance(vault: &Vault) -> String {
    format!(
        "{DIM}VAULT CONTENTS{RESET}\n{BOLD}{}{}{RESET} {}PIECES OF TREASURE{RESET}\n",
        fg(vault.theme.accent),
        format_pieces(vault.balance),
        fg(vault.theme.primary),
    )
}

fn render_treasurer(controller: &AppController) -> String {
    let line = if controller.is_processing() {
        "Dipping the quill...".to_string()
    } else {
        format!("\"{}\"", controller.treasurer_message())
    };

    format!("{}The Royal Ledger{RESET}  {ITALIC}{line}{RESET}\n", fg(PARCHMENT))
}

fn render_pile(vault: &Vault, renderer: &PileRenderer) -> String {
    let coins = pile::generate(vault.balance, &vault.theme.coin_palette);

    let mut out = match renderer.render(&coins, &vault.theme) {
        Ok(pixmap) => pixmap_to_ansi(&pixmap, PILE_COLUMNS),
        Err(err) => format!("(the vault cannot be pictured: {err})\n"),
    };

    if vault.balance <= 0.0 {
        out.push_str(&format!(
            "{DIM}{ITALIC}The stone floor is cold and empty...{RESET}\n"
        ));
    }

    out
}

fn render_history(vault: &Vault) -> String {
    let mut out = format!("{}Recent Filings{RESET}\n", fg(PARCHMENT));

    if vault.transactions().is_empty() {
        out.push_str(&format!("{DIM}{ITALIC}This scroll is blank.{RESET}\n"));
        return out;
    }

    for tx in vault.transactions() {
        let (sign, color) = match tx.kind {
            TransactionKind::Gain => ('+', GAIN_COLOR),
            TransactionKind::Expense => ('-', EXPENSE_COLOR),
        };
        out.push_str(&format!(
            "  {DIM}{}{RESET}  {:<28}  {}{sign}{}{RESET}\n",
            tx.timestamp.format("%H:%M:%S"),
            truncate(&tx.description, 28),
            fg(color),
            format_pieces(tx.amount),
        ));
    }

    out
}

fn render_vault_list(controller: &AppController) -> String {
    controller
        .vaults()
        .iter()
        .map(|vault| {
            format!(
                "  {} {}{:<16}{RESET} {:<28} {} pieces",
                vault.theme.banner_icon.glyph(),
                fg(vault.theme.primary),
                vault.id,
                vault.name,
                format_pieces(vault.balance),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a balance with thousands separators, keeping cents only when
/// the value is not whole
pub fn format_pieces(value: f64) -> String {
    let negative = value < 0.0;
    let magnitude = (value.abs() * 100.0).round() / 100.0;
    let whole = magnitude.trunc() as u64;
    let cents = (magnitude.fract() * 100.0).round() as u64 % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if cents > 0 {
        grouped.push_str(&format!(".{cents:02}"));
    }
    if negative && (whole > 0 || cents > 0) {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Downsamples a pixmap into ANSI half-block rows
///
/// Each character cell covers a square block of pixels; the upper half
/// becomes the foreground of a `▀` and the lower half its background.
pub fn pixmap_to_ansi(pixmap: &Pixmap, columns: u32) -> String {
    let columns = columns.clamp(1, pixmap.width());
    let cell = (pixmap.width() / columns).max(1);
    let rows = pixmap.height() / (cell * 2);

    let mut out = String::new();
    for row in 0..rows {
        for col in 0..columns {
            let x = col * cell;
            let y = row * cell * 2;
            let top = average_block(pixmap, x, y, cell);
            let bottom = average_block(pixmap, x, y + cell, cell);
            out.push_str(&fg(top));
            out.push_str(&bg_code(bottom));
            out.push('▀');
        }
        out.push_str(RESET);
        out.push('\n');
    }

    out
}

fn average_block(pixmap: &Pixmap, x0: u32, y0: u32, extent: u32) -> Rgb {
    let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);

    for y in y0..(y0 + extent).min(pixmap.height()) {
        for x in x0..(x0 + extent).min(pixmap.width()) {
            if let Some(px) = pixmap.pixel(x, y) {
                let px = px.demultiply();
                r += px.red() as u32;
                g += px.green() as u32;
                b += px.blue() as u32;
                n += 1;
            }
        }
    }

    if n == 0 {
        return Rgb::new(0, 0, 0);
    }
    Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn fg(color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

fn bg_code(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::store::VaultStore;
    use crate::services::audio::AudioService;
    use crate::services::commentary::CommentaryClient;

    fn offline_controller() -> AppController {
        AppController::with_parts(
            VaultStore::new(),
            CommentaryClient::with_key(None),
            AudioService::muted(),
        )
    }

    #[test]
    fn pieces_are_grouped_by_thousands() {
        assert_eq!(format_pieces(0.0), "0");
        assert_eq!(format_pieces(950.0), "950");
        assert_eq!(format_pieces(1_000.0), "1,000");
        assert_eq!(format_pieces(1_234_567.0), "1,234,567");
        assert_eq!(format_pieces(-2_500.0), "-2,500");
    }

    #[test]
    fn fractional_pieces_keep_two_decimals() {
        assert_eq!(format_pieces(1_500.5), "1,500.50");
        assert_eq!(format_pieces(0.125), "0.13");
        assert_eq!(format_pieces(-0.5), "-0.50");
    }

    #[test]
    fn ansi_canvas_has_expected_shape() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(10, 20, 30, 255));

        let art = pixmap_to_ansi(&pixmap, 5);
        let lines: Vec<&str> = art.lines().collect();

        // 5 columns of 2px cells -> 2 text rows covering 4px each.
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line.matches('▀').count(), 5);
            assert!(line.contains("\x1b[38;2;10;20;30m"));
            assert!(line.contains("\x1b[48;2;10;20;30m"));
        }
    }

    #[test]
    fn full_view_shows_balance_and_name() {
        let controller = offline_controller();
        let view = render_full(&controller, &PileRenderer::new());

        assert!(view.contains("THE ROYAL VAULT"));
        assert!(view.contains("100"));
        assert!(view.contains("Which ledger shall we inspect today?"));
        assert!(view.contains("This scroll is blank."));
    }

    #[test]
    fn empty_vault_shows_the_cold_floor() {
        let mut controller = offline_controller();
        assert!(controller.select_vault("shadow"));

        let view = render_full(&controller, &PileRenderer::new());
        assert!(view.contains("The stone floor is cold and empty..."));
    }

    #[test]
    fn history_lists_transactions_most_recent_first() {
        let mut controller = offline_controller();
        controller.commit(TransactionKind::Gain, 50.0, "spoils");
        controller.commit(TransactionKind::Expense, 20.0, "repairs");

        let history = render_history(controller.active_vault());
        let spoils = history.find("spoils").expect("gain listed");
        let repairs = history.find("repairs").expect("expense listed");
        assert!(repairs < spoils, "newest entry should come first");
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let text = "a".repeat(60);
        let shown = truncate(&text, 28);
        assert_eq!(shown.chars().count(), 28);
        assert!(shown.ends_with('…'));
    }
}
