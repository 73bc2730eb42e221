//! Interactive keyboard layout selector.
//!
//! A modal sub-loop: while it runs, it owns the input stream. Up and Down
//! move the highlight, Enter commits it; every other key is ignored.

use crate::context::{idle, ConsoleContext};
use crate::keyboard::Key;
use crate::layout::Layout;
use crate::palette;
use oneof_hal::{ByteSource, CellDisplay};

/// What a key press did to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The selection may have changed; redraw.
    Redraw,
    /// The user confirmed the highlighted layout.
    Confirm(Layout),
    /// The key means nothing here.
    Ignored,
}

/// Selection state of the layout menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMenu {
    selected: usize,
}

impl LayoutMenu {
    /// Opens the menu with `current` highlighted.
    pub fn new(current: Layout) -> Self {
        Self {
            selected: current.index(),
        }
    }

    /// Index of the highlighted entry.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Applies one key press.
    pub fn handle_key(&mut self, key: Key) -> MenuEvent {
        match key {
            Key::Up => {
                self.selected = self.selected.saturating_sub(1);
                MenuEvent::Redraw
            }
            Key::Down => {
                self.selected = (self.selected + 1).min(Layout::ALL.len() - 1);
                MenuEvent::Redraw
            }
            Key::Enter => MenuEvent::Confirm(Layout::ALL[self.selected]),
            _ => MenuEvent::Ignored,
        }
    }

    /// Draws the full menu from a cleared screen.
    pub fn render<D, K, M>(&self, ctx: &mut ConsoleContext<D, K, M>)
    where
        D: CellDisplay,
        K: ByteSource,
        M: ByteSource,
    {
        ctx.screen_mut().clear();
        ctx.print("=======================================\n", palette::HEADING);
        ctx.print("        SELECT KEYBOARD LAYOUT\n", palette::HEADING);
        ctx.print("=======================================\n", palette::HEADING);
        ctx.print("\n", palette::TEXT);

        for (index, layout) in Layout::ALL.iter().enumerate() {
            if index == self.selected {
                ctx.print(">>> ", palette::SELECTED);
                ctx.print(layout.title(), palette::SELECTED);
            } else {
                ctx.print("    ", palette::TEXT);
                ctx.print(layout.title(), palette::TEXT);
            }
            ctx.print("\n", palette::TEXT);
        }

        ctx.print("\n", palette::TEXT);
        ctx.print("Use UP/DOWN arrows to select, ENTER to confirm\n", palette::ACCENT);
    }
}

/// Runs the menu until Enter, then activates the choice and clears the screen.
pub fn run<D, K, M>(ctx: &mut ConsoleContext<D, K, M>)
where
    D: CellDisplay,
    K: ByteSource,
    M: ByteSource,
{
    let mut menu = LayoutMenu::new(ctx.layout());
    menu.render(ctx);

    let chosen = loop {
        let Some(key) = ctx.poll_key() else {
            idle();
            continue;
        };
        match menu.handle_key(key) {
            MenuEvent::Redraw => menu.render(ctx),
            MenuEvent::Confirm(layout) => break layout,
            MenuEvent::Ignored => {}
        }
    };

    ctx.set_layout(chosen);
    ctx.screen_mut().clear();
}
