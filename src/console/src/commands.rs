//! Built-in shell commands.

use crate::context::ConsoleContext;
use crate::layout::Layout;
use crate::menu;
use crate::palette;
use core::fmt::Write;
use oneof_hal::{ByteSource, CellDisplay};

/// Kernel version, shown by `ver` and the boot banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shell command types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List the commands.
    Help,
    /// Show the version.
    Version,
    /// Show system information.
    Info,
    /// Page through the user manual.
    Manual,
    /// Clear the screen.
    Clear,
    /// Print the logo.
    Boot1of,
    /// Open the interactive layout menu.
    LayoutMenu,
    /// Switch straight to a layout.
    SetLayout(Layout),
    /// `layout` was given a name that is not a layout.
    UnknownLayout,
    /// Anything else.
    Unknown,
}

/// A row of the command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    /// Exact text that selects the command.
    pub name: &'static str,
    /// One-line description for `help`; empty for aliases.
    pub summary: &'static str,
    /// What the name dispatches to.
    pub command: Command,
}

/// The fixed command table.
pub const COMMANDS: [CommandInfo; 8] = [
    CommandInfo { name: "boot1of", summary: "Display ASCII art logo", command: Command::Boot1of },
    CommandInfo { name: "layout", summary: "Open layout selection menu", command: Command::LayoutMenu },
    CommandInfo { name: "ver", summary: "Show system version", command: Command::Version },
    CommandInfo { name: "version", summary: "", command: Command::Version },
    CommandInfo { name: "clear", summary: "Clear the screen", command: Command::Clear },
    CommandInfo { name: "help", summary: "Show this help", command: Command::Help },
    CommandInfo { name: "info", summary: "Show system information", command: Command::Info },
    CommandInfo { name: "manual", summary: "Display user manual", command: Command::Manual },
];

const LAYOUT_PREFIX: &[u8] = b"layout ";

impl Command {
    /// Parses a complete input line. Matching is exact and case-sensitive.
    ///
    /// Returns `None` for an empty line.
    pub fn parse(line: &[u8]) -> Option<Command> {
        if line.is_empty() {
            return None;
        }
        if let Some(entry) = COMMANDS.iter().find(|entry| entry.name.as_bytes() == line) {
            return Some(entry.command);
        }
        if let Some(arg) = line.strip_prefix(LAYOUT_PREFIX) {
            let arg = arg.trim_ascii();
            if arg.is_empty() {
                return Some(Command::LayoutMenu);
            }
            return Some(Layout::from_name(arg).map_or(Command::UnknownLayout, Command::SetLayout));
        }
        Some(Command::Unknown)
    }

    /// Runs the command against the console.
    pub fn execute<D, K, M>(self, ctx: &mut ConsoleContext<D, K, M>)
    where
        D: CellDisplay,
        K: ByteSource,
        M: ByteSource,
    {
        log::debug!("executing {:?}", self);
        match self {
            Command::Help => cmd_help(ctx),
            Command::Version => cmd_version(ctx),
            Command::Info => cmd_info(ctx),
            Command::Manual => cmd_manual(ctx),
            Command::Clear => ctx.screen_mut().clear(),
            Command::Boot1of => cmd_boot1of(ctx),
            Command::LayoutMenu => menu::run(ctx),
            Command::SetLayout(layout) => {
                ctx.set_layout(layout);
                ctx.print("Keyboard layout: ", palette::TEXT);
                ctx.print(layout.title(), palette::ACCENT);
                ctx.print("\n", palette::TEXT);
            }
            Command::UnknownLayout => {
                ctx.print("Unknown layout. Available:", palette::ERROR);
                for layout in Layout::ALL {
                    ctx.print(" ", palette::ERROR);
                    ctx.print(layout.name(), palette::ERROR);
                }
                ctx.print("\n", palette::ERROR);
            }
            Command::Unknown => {
                ctx.print("Unknown command. Type 'help' for list.\n", palette::ERROR);
            }
        }
    }
}

fn cmd_help<D, K, M>(ctx: &mut ConsoleContext<D, K, M>)
where
    D: CellDisplay,
    K: ByteSource,
    M: ByteSource,
{
    ctx.print("\n=== BUILT-IN COMMANDS ===\n", palette::HEADING);
    for entry in COMMANDS.iter().filter(|entry| !entry.summary.is_empty()) {
        // Width-padded formatting into the screen cannot fail.
        let _ = writeln!(
            ctx.screen_mut().pen(palette::TEXT),
            "{:<13} - {}",
            entry.name,
            entry.summary
        );
    }
    ctx.print("layout <name> - Switch layout (us de fr it es)\n", palette::TEXT);
    ctx.print("=========================\n\n", palette::HEADING);
}

fn cmd_version<D, K, M>(ctx: &mut ConsoleContext<D, K, M>)
where
    D: CellDisplay,
    K: ByteSource,
    M: ByteSource,
{
    let _ = writeln!(ctx.screen_mut().pen(palette::HEADING), "\n1of90OS v{}", VERSION);
    ctx.print("64-bit x86 Bootable Kernel\n", palette::TEXT);
    ctx.print("Built with Rust (no_std, freestanding)\n", palette::TEXT);
    ctx.print("Features: PS/2 Keyboard, 5 Layouts, VGA Text Mode\n\n", palette::TEXT);
}

fn cmd_info<D, K, M>(ctx: &mut ConsoleContext<D, K, M>)
where
    D: CellDisplay,
    K: ByteSource,
    M: ByteSource,
{
    ctx.print("\n=== SYSTEM INFORMATION ===\n", palette::HEADING);
    ctx.print("Platform:     64-bit x86 (x86_64)\n", palette::TEXT);
    ctx.print("Boot Method:  BIOS bootloader\n", palette::TEXT);
    ctx.print("Display:      VGA Text Mode (80x25)\n", palette::TEXT);
    ctx.print("Keyboard:     PS/2 Polling\n", palette::TEXT);
    ctx.print("Layouts:      5 (US, DE, FR, IT, ES)\n", palette::TEXT);
    ctx.print("Memory:       Static buffers, no heap\n", palette::TEXT);
    let layout = ctx.layout();
    let _ = writeln!(ctx.screen_mut().pen(palette::TEXT), "Layout:       {}", layout.title());
    ctx.print("==========================\n\n", palette::HEADING);
}

type Section = (&'static str, &'static [&'static str]);

const MANUAL_INTRO: &[Section] = &[
    (
        "1. INTRODUCTION",
        &[
            "   1of90OS is a minimal bootable x86 kernel written in",
            "   Rust. It demonstrates core OS concepts:",
            "   - Bootloader integration",
            "   - VGA text-mode display",
            "   - PS/2 keyboard input polling",
            "   - International keyboard layout support",
        ],
    ),
    (
        "2. KEYBOARD LAYOUTS",
        &[
            "   5 layouts are supported:",
            "   - US QWERTY (default)",
            "   - DE QWERTZ (German with ä, ö, ü, ß)",
            "   - FR AZERTY (French with accents)",
            "   - IT QWERTY (Italian with accents)",
            "   - ES QWERTY (Spanish with ñ, á, é)",
        ],
    ),
    (
        "3. USING THE LAYOUT SELECTOR",
        &[
            "   Type 'layout' and press ENTER to open the",
            "   interactive menu. Use UP/DOWN arrow keys to",
            "   select a layout, then press ENTER to confirm.",
            "   'layout de' switches without the menu.",
        ],
    ),
];

const MANUAL_REFERENCE: &[Section] = &[
    (
        "4. COMMANDS",
        &[
            "   - 'help'     : Display all commands",
            "   - 'ver'      : Show version info",
            "   - 'info'     : System information",
            "   - 'clear'    : Clear screen",
            "   - 'manual'   : This manual",
            "   - 'boot1of'  : Display logo",
        ],
    ),
    (
        "5. KEYBOARD SHORTCUTS",
        &[
            "   - Backspace  : Delete last character",
            "   - SHIFT      : Uppercase letters",
            "   - ENTER      : Execute command",
        ],
    ),
];

fn cmd_manual<D, K, M>(ctx: &mut ConsoleContext<D, K, M>)
where
    D: CellDisplay,
    K: ByteSource,
    M: ByteSource,
{
    // Each page fits on one screen so nothing scrolls away unread.
    manual_page(ctx, MANUAL_INTRO, "Press any key for more...");
    manual_page(ctx, MANUAL_REFERENCE, "Press any key to return to prompt...");
    ctx.screen_mut().clear();
}

fn manual_page<D, K, M>(ctx: &mut ConsoleContext<D, K, M>, sections: &[Section], footer: &str)
where
    D: CellDisplay,
    K: ByteSource,
    M: ByteSource,
{
    ctx.screen_mut().clear();
    ctx.print("=== 1of90OS USER MANUAL ===\n", palette::HEADING);
    for (title, lines) in sections {
        ctx.print("\n", palette::TEXT);
        ctx.print(title, palette::HEADING);
        ctx.print("\n", palette::TEXT);
        for line in lines.iter() {
            ctx.print(line, palette::TEXT);
            ctx.print("\n", palette::TEXT);
        }
    }
    ctx.print("\n", palette::TEXT);
    ctx.print(footer, palette::ACCENT);
    ctx.wait_key();
}

fn cmd_boot1of<D, K, M>(ctx: &mut ConsoleContext<D, K, M>)
where
    D: CellDisplay,
    K: ByteSource,
    M: ByteSource,
{
    ctx.print("\n", palette::TEXT);
    ctx.print("+------------------------------+\n", palette::HEADING);
    ctx.print("|                              |\n", palette::HEADING);
    ctx.print("|        HELLO WORLD!          |\n", palette::HEADING);
    ctx.print("|                              |\n", palette::HEADING);
    ctx.print("+------------------------------+\n\n", palette::HEADING);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, screen_text, serial_context, typed};

    #[test]
    fn names_match_exactly() {
        assert_eq!(Command::parse(b"help"), Some(Command::Help));
        assert_eq!(Command::parse(b"ver"), Some(Command::Version));
        assert_eq!(Command::parse(b"version"), Some(Command::Version));
        assert_eq!(Command::parse(b"boot1of"), Some(Command::Boot1of));
        assert_eq!(Command::parse(b"layout"), Some(Command::LayoutMenu));
        assert_eq!(Command::parse(b"HELP"), Some(Command::Unknown));
        assert_eq!(Command::parse(b"help "), Some(Command::Unknown));
        assert_eq!(Command::parse(b" help"), Some(Command::Unknown));
    }

    #[test]
    fn empty_line_is_no_command() {
        assert_eq!(Command::parse(b""), None);
    }

    #[test]
    fn layout_argument() {
        assert_eq!(Command::parse(b"layout fr"), Some(Command::SetLayout(Layout::Fr)));
        assert_eq!(Command::parse(b"layout  es "), Some(Command::SetLayout(Layout::Es)));
        assert_eq!(Command::parse(b"layout xx"), Some(Command::UnknownLayout));
        assert_eq!(Command::parse(b"layout "), Some(Command::LayoutMenu));
        assert_eq!(Command::parse(b"layoutde"), Some(Command::Unknown));
    }

    #[test]
    fn help_lists_every_command() {
        let mut ctx = context(&[]);
        Command::Help.execute(&mut ctx);
        let text = screen_text(ctx.screen());
        for entry in COMMANDS.iter().filter(|e| !e.summary.is_empty()) {
            assert!(text.contains(entry.name), "missing {}", entry.name);
        }
        assert!(text.contains("help          - Show this help"));
    }

    #[test]
    fn version_prints_package_version() {
        let mut ctx = context(&[]);
        Command::Version.execute(&mut ctx);
        assert!(screen_text(ctx.screen()).contains("1of90OS v1.0.0"));
    }

    #[test]
    fn set_layout_switches_translation() {
        let mut ctx = context(&[]);
        Command::SetLayout(Layout::It).execute(&mut ctx);
        assert_eq!(ctx.layout(), Layout::It);
        assert!(screen_text(ctx.screen()).contains("Keyboard layout: IT QWERTY"));
    }

    #[test]
    fn unknown_layout_lists_names() {
        let mut ctx = context(&[]);
        Command::UnknownLayout.execute(&mut ctx);
        assert!(screen_text(ctx.screen()).contains("Unknown layout. Available: us de fr it es"));
        assert_eq!(ctx.layout(), Layout::Us);
    }

    #[test]
    fn manual_waits_for_a_key_then_clears() {
        let mut ctx = context(&typed("qq"));
        Command::Manual.execute(&mut ctx);
        // Two presses end the two pages; the last release stays queued.
        assert_eq!(ctx.input_mut().keyboard_mut().remaining(), 1);
        assert_eq!(ctx.screen().scroll_count(), 0);
        assert_eq!(ctx.screen().cursor(), (0, 0));
        assert!(screen_text(ctx.screen()).trim().is_empty());
        // The manual was drawn before the wait.
        let drawn: Vec<u8> = ctx.screen().display().mirrored.clone();
        let drawn = String::from_utf8_lossy(&drawn);
        assert!(drawn.contains("USER MANUAL"));
        assert!(drawn.contains("Press any key for more"));
        assert!(drawn.contains("5. KEYBOARD SHORTCUTS"));
        assert_eq!(ctx.screen().display().clears, 3);
    }

    #[test]
    fn manual_pages_wait_for_separate_serial_keys() {
        let mut ctx = serial_context(b"\r\nq");
        Command::Manual.execute(&mut ctx);
        // CRLF ends the first page only; `q` ends the second.
        assert_eq!(ctx.input_mut().mirror_mut().map(|m| m.remaining()), Some(0));
        assert_eq!(ctx.screen().display().clears, 3);
    }

    #[test]
    fn clear_homes_cursor() {
        let mut ctx = context(&[]);
        Command::Boot1of.execute(&mut ctx);
        assert!(screen_text(ctx.screen()).contains("HELLO WORLD!"));
        Command::Clear.execute(&mut ctx);
        assert_eq!(ctx.screen().cursor(), (0, 0));
    }
}
