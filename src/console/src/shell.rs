//! Line-editing command shell.

use crate::commands::Command;
use crate::context::{idle, ConsoleContext};
use crate::display::BACKSPACE;
use crate::keyboard::Key;
use crate::palette;
use oneof_hal::{ByteSource, CellDisplay};

/// Capacity of the line buffer, including the reserved terminator slot.
pub const LINE_CAPACITY: usize = 64;

/// Longest line the user can type.
pub const MAX_LINE: usize = LINE_CAPACITY - 1;

/// Fixed-size buffer holding the line being typed.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    bytes: [u8; LINE_CAPACITY],
    len: usize,
}

impl LineBuffer {
    /// An empty line.
    pub const fn new() -> Self {
        Self {
            bytes: [0; LINE_CAPACITY],
            len: 0,
        }
    }

    /// Appends `byte`; returns `false` when the line is full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len >= MAX_LINE {
            return false;
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        true
    }

    /// Removes the last byte, if any.
    pub fn pop(&mut self) -> Option<u8> {
        self.len = self.len.checked_sub(1)?;
        Some(self.bytes[self.len])
    }

    /// Empties the line.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// The bytes typed so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of bytes typed.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// The interactive shell: prompt, line editing and dispatch.
#[derive(Debug, Default)]
pub struct Shell {
    line: LineBuffer,
}

impl Shell {
    /// A shell with an empty line. Nothing is drawn until [`Shell::prompt`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The line typed so far.
    pub fn line(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Draws `1of90OS[<layout>]> ` at column 0 of the cursor row.
    pub fn prompt<D, K, M>(&self, ctx: &mut ConsoleContext<D, K, M>)
    where
        D: CellDisplay,
        K: ByteSource,
        M: ByteSource,
    {
        let (row, _) = ctx.screen().cursor();
        ctx.screen_mut().goto_cell(row, 0);
        let name = ctx.layout().name();
        ctx.print("1of90OS[", palette::TEXT);
        ctx.print(name, palette::ACCENT);
        ctx.print("]> ", palette::TEXT);
    }

    /// Applies one key press to the line.
    ///
    /// On Enter the line is parsed and executed, then a fresh prompt is
    /// drawn. Returns the command that ran, if any.
    pub fn handle_key<D, K, M>(&mut self, ctx: &mut ConsoleContext<D, K, M>, key: Key) -> Option<Command>
    where
        D: CellDisplay,
        K: ByteSource,
        M: ByteSource,
    {
        match key {
            Key::Backspace => {
                if self.line.pop().is_some() {
                    ctx.screen_mut().write_char(BACKSPACE, palette::TEXT);
                }
                None
            }
            Key::Char(byte) => {
                if self.line.push(byte) {
                    ctx.screen_mut().write_char(byte, palette::TEXT);
                } else {
                    log::trace!("line full, dropped {:#04x}", byte);
                }
                None
            }
            Key::Enter => {
                ctx.screen_mut().write_char(b'\n', palette::TEXT);
                let command = Command::parse(self.line.as_bytes());
                self.line.clear();
                if let Some(command) = command {
                    command.execute(ctx);
                }
                self.prompt(ctx);
                command
            }
            Key::Up | Key::Down | Key::Left | Key::Right => None,
        }
    }

    /// Prompts, then reads and runs commands forever.
    pub fn run<D, K, M>(&mut self, ctx: &mut ConsoleContext<D, K, M>) -> !
    where
        D: CellDisplay,
        K: ByteSource,
        M: ByteSource,
    {
        self.prompt(ctx);
        loop {
            match ctx.poll_key() {
                Some(key) => {
                    self.handle_key(ctx, key);
                }
                None => idle(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::WIDTH;
    use crate::layout::Layout;
    use crate::testing::{context, row_text, screen_text, serial_context, typed, TestConsole};

    fn type_line(shell: &mut Shell, ctx: &mut TestConsole, text: &str) -> Option<Command> {
        for byte in text.bytes() {
            shell.handle_key(ctx, Key::Char(byte));
        }
        shell.handle_key(ctx, Key::Enter)
    }

    #[test]
    fn line_buffer_caps_at_max_line() {
        let mut line = LineBuffer::new();
        for _ in 0..MAX_LINE {
            assert!(line.push(b'a'));
        }
        assert!(!line.push(b'b'));
        assert_eq!(line.len(), MAX_LINE);
        assert_eq!(line.pop(), Some(b'a'));
        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.pop(), None);
    }

    #[test]
    fn prompt_shows_layout_name() {
        let mut ctx = context(&[]);
        let shell = Shell::new();
        ctx.set_layout(Layout::Fr);
        shell.prompt(&mut ctx);
        assert_eq!(row_text(ctx.screen(), 0).trim_end(), "1of90OS[fr]>");
        assert_eq!(ctx.screen().cursor(), (0, 13));
        let name = ctx.screen().cell(0, 8).map(|c| c.color);
        assert_eq!(name, Some(palette::ACCENT));
    }

    #[test]
    fn help_runs_once_and_resets_line() {
        let mut ctx = context(&[]);
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);

        assert_eq!(type_line(&mut shell, &mut ctx, "help"), Some(Command::Help));
        assert!(shell.line().is_empty());

        let text = screen_text(ctx.screen());
        assert_eq!(text.matches("=== BUILT-IN COMMANDS ===").count(), 1);
        let (row, col) = ctx.screen().cursor();
        assert_eq!(col, 13);
        assert_eq!(row_text(ctx.screen(), row).trim_end(), "1of90OS[us]>");
    }

    /// Feeds every queued input byte through `poll_key` into the shell.
    fn drain(shell: &mut Shell, ctx: &mut TestConsole) -> Vec<Command> {
        let mut commands = Vec::new();
        loop {
            let pending = ctx.input_mut().keyboard_mut().remaining() > 0
                || ctx.input_mut().mirror_mut().map_or(0, |m| m.remaining()) > 0;
            if !pending {
                return commands;
            }
            if let Some(key) = ctx.poll_key() {
                commands.extend(shell.handle_key(ctx, key));
            }
        }
    }

    #[test]
    fn typed_help_scancodes_dispatch_once() {
        let mut keys = typed("help");
        keys.extend_from_slice(&[0x1C, 0x9C]);
        let mut ctx = context(&keys);
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);

        assert_eq!(drain(&mut shell, &mut ctx), vec![Command::Help]);
        assert!(shell.line().is_empty());
        let text = screen_text(ctx.screen());
        assert!(text.contains("1of90OS[us]> help"));
        assert_eq!(text.matches("=== BUILT-IN COMMANDS ===").count(), 1);
    }

    #[test]
    fn serial_crlf_runs_one_command_and_one_prompt() {
        let mut ctx = serial_context(b"ver\r\n");
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);

        assert_eq!(drain(&mut shell, &mut ctx), vec![Command::Version]);
        assert_eq!(screen_text(ctx.screen()).matches("1of90OS[us]>").count(), 2);
    }

    #[test]
    fn unknown_command_reports_once() {
        let mut ctx = context(&[]);
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);

        assert_eq!(type_line(&mut shell, &mut ctx, "foo"), Some(Command::Unknown));
        let text = screen_text(ctx.screen());
        assert_eq!(text.matches("Unknown command. Type 'help' for list.").count(), 1);
        assert!(text.contains("1of90OS[us]> foo"));
    }

    #[test]
    fn empty_line_just_reprompts() {
        let mut ctx = context(&[]);
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);

        assert_eq!(shell.handle_key(&mut ctx, Key::Enter), None);
        assert_eq!(row_text(ctx.screen(), 0).trim_end(), "1of90OS[us]>");
        assert_eq!(row_text(ctx.screen(), 1).trim_end(), "1of90OS[us]>");
        assert_eq!(ctx.screen().cursor(), (1, 13));
        assert!(!screen_text(ctx.screen()).contains("Unknown"));
    }

    #[test]
    fn overflow_is_dropped_without_echo() {
        let mut ctx = context(&[]);
        let mut shell = Shell::new();
        for _ in 0..70 {
            shell.handle_key(&mut ctx, Key::Char(b'x'));
        }
        assert_eq!(shell.line().len(), MAX_LINE);
        assert_eq!(ctx.screen().cursor(), (0, MAX_LINE));
        assert!(MAX_LINE < WIDTH);
    }

    #[test]
    fn backspace_edits_line_and_screen() {
        let mut ctx = context(&[]);
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);
        for key in [Key::Char(b'v'), Key::Char(b'e'), Key::Char(b'x'), Key::Backspace, Key::Char(b'r')] {
            shell.handle_key(&mut ctx, key);
        }
        assert_eq!(shell.line(), b"ver");
        assert_eq!(row_text(ctx.screen(), 0).trim_end(), "1of90OS[us]> ver");

        // Backspace on an empty line must not eat the prompt.
        let mut ctx = context(&[]);
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);
        shell.handle_key(&mut ctx, Key::Backspace);
        assert_eq!(ctx.screen().cursor(), (0, 13));
    }

    #[test]
    fn arrows_are_ignored_at_the_prompt() {
        let mut ctx = context(&[]);
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);
        for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
            assert_eq!(shell.handle_key(&mut ctx, key), None);
        }
        assert!(shell.line().is_empty());
        assert_eq!(ctx.screen().cursor(), (0, 13));
    }

    #[test]
    fn layout_command_changes_prompt() {
        let mut ctx = context(&[]);
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);
        type_line(&mut shell, &mut ctx, "layout de");
        assert_eq!(ctx.layout(), Layout::De);
        let (row, _) = ctx.screen().cursor();
        assert_eq!(row_text(ctx.screen(), row).trim_end(), "1of90OS[de]>");
    }

    #[test]
    fn clear_leaves_prompt_on_top_row() {
        let mut ctx = context(&[]);
        let mut shell = Shell::new();
        shell.prompt(&mut ctx);
        type_line(&mut shell, &mut ctx, "info");
        type_line(&mut shell, &mut ctx, "clear");
        assert_eq!(ctx.screen().cursor(), (0, 13));
        assert_eq!(screen_text(ctx.screen()).trim_end(), "1of90OS[us]>");
    }
}
