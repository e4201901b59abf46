use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use lookup_core::{Lookup, LookupError, RawRecord, RecordSearch, SelectionChange};

use crate::event::AppEvent;
use crate::tasks;
use crate::theme::NordTheme;

/// Clickable regions recorded during the last render pass. Mouse handling
/// reads these; rendering rewrites them every frame.
#[derive(Debug, Default)]
pub struct HitAreas {
    pub input: Option<Rect>,
    /// Clear glyph shown inside the input when a selection renders inline.
    pub inline_clear: Option<Rect>,
    /// Inner area of the dropdown; each entry occupies two rows.
    pub dropdown: Option<Rect>,
    /// First entry index currently visible in the dropdown.
    pub dropdown_offset: usize,
    /// One region per pill, with the record id its clear glyph removes.
    pub pills: Vec<(Rect, String)>,
}

/// State for the whole TUI.
pub struct App {
    pub lookup: Lookup,
    pub source: Arc<dyn RecordSearch>,
    pub theme: NordTheme,

    /// Text currently typed into the search input.
    pub input: String,
    /// Highlighted dropdown entry.
    pub cursor: usize,
    pub status_message: String,
    pub should_quit: bool,
    pub areas: HitAreas,

    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
    changes: UnboundedReceiver<SelectionChange>,
}

impl App {
    pub fn new(mut lookup: Lookup, source: Arc<dyn RecordSearch>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let changes = lookup.subscribe();
        Self {
            lookup,
            source,
            theme: NordTheme::default(),
            input: String::new(),
            cursor: 0,
            status_message: String::new(),
            should_quit: false,
            areas: HitAreas::default(),
            tx,
            rx,
            changes,
        }
    }

    // ─── Input handling ────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('u') => {
                    self.input.clear();
                    self.dispatch_query();
                }
                KeyCode::Char('d') => {
                    self.lookup.clear_selection();
                    self.input.clear();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.lookup.session().is_visible() {
                    self.lookup.dismiss();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Enter => self.pick_under_cursor(),
            KeyCode::Up => self.move_cursor_up(),
            KeyCode::Down => self.move_cursor_down(),
            KeyCode::Backspace => {
                if self.input.is_empty() {
                    self.remove_last_selection();
                } else {
                    self.input.pop();
                    self.dispatch_query();
                }
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.dispatch_query();
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let at = Position::new(mouse.column, mouse.row);

        if let Some(area) = self.areas.inline_clear {
            if area.contains(at) {
                self.lookup.clear_selection();
                self.input.clear();
                return;
            }
        }

        if let Some((_, id)) = self
            .areas
            .pills
            .iter()
            .find(|(area, _)| area.contains(at))
            .cloned()
        {
            self.lookup.remove(&id);
            return;
        }

        if let Some(area) = self.areas.dropdown {
            if area.contains(at) {
                let index = self.areas.dropdown_offset + ((at.y - area.y) / 2) as usize;
                if index < self.lookup.session().results().len() {
                    self.cursor = index;
                    self.pick_under_cursor();
                }
                return;
            }
        }

        if let Some(area) = self.areas.input {
            if area.contains(at) {
                return;
            }
        }

        // Anywhere else counts as an outside click.
        self.lookup.dismiss();
    }

    // ─── Background work ───────────────────────────────────

    /// Apply everything the background produced since the last frame.
    pub fn drain_background(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            if let AppEvent::SearchLoaded { generation, outcome } = event {
                self.apply_search(generation, outcome);
            }
        }
        while let Ok(change) = self.changes.try_recv() {
            self.status_message = if change.record_id.is_empty() {
                "Selection cleared".to_string()
            } else {
                format!("Selected: {}", change.record_id)
            };
        }
    }

    pub fn apply_search(
        &mut self,
        generation: u64,
        outcome: Result<Vec<RawRecord>, LookupError>,
    ) {
        self.lookup.apply_results(generation, outcome);
        if self.cursor >= self.lookup.session().results().len() {
            self.cursor = 0;
        }
    }

    // ─── Actions ───────────────────────────────────────────

    fn dispatch_query(&mut self) {
        self.cursor = 0;
        if let Some(request) = self.lookup.input(self.input.clone()) {
            tasks::spawn_search(self.tx.clone(), self.source.clone(), request);
        }
    }

    fn pick_under_cursor(&mut self) {
        if !self.lookup.session().is_visible() {
            return;
        }
        if let Some(picked) = self.lookup.pick(self.cursor) {
            self.status_message = format!("Selected {}", picked.name);
        }
        self.input.clear();
        self.cursor = 0;
    }

    fn remove_last_selection(&mut self) {
        if let Some(last) = self.lookup.selection().last() {
            let id = last.id.clone();
            self.lookup.remove(&id);
        }
    }

    fn move_cursor_down(&mut self) {
        let len = self.lookup.session().results().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    fn move_cursor_up(&mut self) {
        let len = self.lookup.session().results().len();
        if len > 0 {
            if self.cursor == 0 {
                self.cursor = len - 1;
            } else {
                self.cursor -= 1;
            }
        }
    }
}
