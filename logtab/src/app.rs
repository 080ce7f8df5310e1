/// UI-side state: one view per tracked file, selection, dirty markers,
/// and key handling.
use std::path::PathBuf;

use logtab_core::Notification;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::watch::WatchHandle;

/// Accumulated display state for one tracked file.
pub struct FileView {
    pub name: String,
    /// Complete lines received so far.
    pub lines: Vec<String>,
    /// Trailing bytes with no newline yet; prepended to the next fragment.
    partial: String,
    pub dirty: bool,
    pub scroll: usize,
    /// If true, keep the view pinned to the bottom.
    pub auto_scroll: bool,
}

impl FileView {
    fn new(name: String) -> Self {
        Self {
            name,
            lines: Vec::new(),
            partial: String::new(),
            dirty: false,
            scroll: 0,
            auto_scroll: true,
        }
    }

    /// Fold a raw fragment into complete lines, holding back any
    /// unterminated tail for the next update.
    fn append(&mut self, fragment: &str) {
        self.partial.push_str(fragment);
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            self.lines
                .push(line.trim_end_matches(['\n', '\r']).to_string());
        }
    }
}

pub struct App {
    pub dir: PathBuf,
    pub views: Vec<FileView>,
    pub selected: usize,
    pub menu_open: bool,
    pub menu_state: ListState,
    /// Height of the log pane viewport (updated by ui::render).
    pub viewport_height: u16,
    watch: WatchHandle,
}

impl App {
    pub fn new(dir: PathBuf, watch: WatchHandle) -> Self {
        Self {
            dir,
            views: Vec::new(),
            selected: 0,
            menu_open: false,
            menu_state: ListState::default(),
            viewport_height: 20,
            watch,
        }
    }

    /// Drain everything the monitor produced since the last frame.
    pub fn drain_notifications(&mut self) {
        while let Ok(note) = self.watch.notifications.try_recv() {
            self.apply(note);
        }
    }

    fn apply(&mut self, note: Notification) {
        match note {
            Notification::Appeared(name) => self.on_appeared(name),
            Notification::Disappeared(name) => self.on_disappeared(&name),
            Notification::Updated { name, fragment } => self.on_updated(&name, &fragment),
        }
    }

    fn on_appeared(&mut self, name: String) {
        // Tabs stay in filename order regardless of arrival order.
        let pos = match self.views.binary_search_by(|v| v.name.cmp(&name)) {
            Ok(_) => return, // already present; shouldn't happen
            Err(pos) => pos,
        };
        self.views.insert(pos, FileView::new(name));
        if self.views.len() == 1 {
            // First file gets focus, like the first tab of a notebook.
            self.focus(0);
        } else if pos <= self.selected {
            self.selected += 1;
        }
    }

    fn on_disappeared(&mut self, name: &str) {
        let Ok(pos) = self.views.binary_search_by(|v| v.name.as_str().cmp(name)) else {
            return;
        };
        let was_focused = pos == self.selected;
        self.views.remove(pos);

        if self.views.is_empty() {
            self.selected = 0;
            self.report_focus(None);
            return;
        }
        if pos < self.selected {
            self.selected -= 1;
        } else if was_focused {
            // The adjacent tab inherits focus.
            self.focus(self.selected.min(self.views.len() - 1));
        }
        self.selected = self.selected.min(self.views.len() - 1);
    }

    fn on_updated(&mut self, name: &str, fragment: &str) {
        let Ok(pos) = self.views.binary_search_by(|v| v.name.as_str().cmp(name)) else {
            return;
        };
        let focused = pos == self.selected;
        let view = &mut self.views[pos];
        view.append(fragment);
        if !focused {
            view.dirty = true;
        }
    }

    pub fn selected_view(&self) -> Option<&FileView> {
        self.views.get(self.selected)
    }

    /// Switch focus to the view at `index`, clear its dirty marker, and
    /// report the change to the monitor thread.
    fn focus(&mut self, index: usize) {
        if index >= self.views.len() {
            return;
        }
        self.selected = index;
        self.views[index].dirty = false;
        let name = self.views[index].name.clone();
        self.report_focus(Some(name));
    }

    fn report_focus(&mut self, name: Option<String>) {
        if let Ok(mut active) = self.watch.active.lock() {
            *active = name.clone();
        }
        if let Some(name) = name {
            let _ = self.watch.focus_tx.send(name);
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Dispatch a key event. Returns `true` if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if self.menu_open {
            self.handle_menu_key(key);
            return false;
        }
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.focus_next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.focus_prev(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(1),
            KeyCode::PageDown => self.scroll_down(self.viewport_height as usize),
            KeyCode::PageUp => self.scroll_up(self.viewport_height as usize),
            KeyCode::Char('g') | KeyCode::Home => {
                if let Some(view) = self.views.get_mut(self.selected) {
                    view.auto_scroll = false;
                    view.scroll = 0;
                }
            }
            KeyCode::Char('G') | KeyCode::End => {
                if let Some(view) = self.views.get_mut(self.selected) {
                    view.auto_scroll = true;
                }
            }
            KeyCode::Char('f') | KeyCode::Char('m') => self.open_menu(),
            _ => {}
        }
        false
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => self.menu_open = false,
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.views.len();
                if len == 0 {
                    return;
                }
                let next = self
                    .menu_state
                    .selected()
                    .map(|i| (i + 1).min(len - 1))
                    .unwrap_or(0);
                self.menu_state.select(Some(next));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.views.is_empty() {
                    return;
                }
                let prev = self
                    .menu_state
                    .selected()
                    .map(|i| i.saturating_sub(1))
                    .unwrap_or(0);
                self.menu_state.select(Some(prev));
            }
            KeyCode::Enter => {
                if let Some(i) = self.menu_state.selected() {
                    self.focus(i);
                }
                self.menu_open = false;
            }
            _ => {}
        }
    }

    fn open_menu(&mut self) {
        if self.views.is_empty() {
            return;
        }
        self.menu_open = true;
        self.menu_state.select(Some(self.selected));
    }

    fn focus_next(&mut self) {
        if self.views.is_empty() {
            return;
        }
        self.focus((self.selected + 1) % self.views.len());
    }

    fn focus_prev(&mut self) {
        if self.views.is_empty() {
            return;
        }
        let prev = if self.selected == 0 {
            self.views.len() - 1
        } else {
            self.selected - 1
        };
        self.focus(prev);
    }

    fn scroll_down(&mut self, by: usize) {
        if let Some(view) = self.views.get_mut(self.selected) {
            view.auto_scroll = false;
            let max = view.lines.len().saturating_sub(1);
            view.scroll = view.scroll.saturating_add(by).min(max);
        }
    }

    fn scroll_up(&mut self, by: usize) {
        if let Some(view) = self.views.get_mut(self.selected) {
            view.auto_scroll = false;
            view.scroll = view.scroll.saturating_sub(by);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watch;
    use logtab_core::Notification;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let handle = watch::spawn(dir.path().to_path_buf());
        (App::new(dir.path().to_path_buf(), handle), dir)
    }

    fn update(name: &str, fragment: &str) -> Notification {
        Notification::Updated {
            name: name.to_string(),
            fragment: fragment.to_string(),
        }
    }

    #[test]
    fn views_stay_sorted_and_first_gets_focus() {
        let (mut app, _dir) = test_app();
        app.apply(Notification::Appeared("m.log".to_string()));
        app.apply(Notification::Appeared("a.log".to_string()));
        app.apply(Notification::Appeared("z.log".to_string()));

        let names: Vec<&str> = app.views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a.log", "m.log", "z.log"]);
        // m.log arrived first and keeps focus despite a.log slotting in
        // before it.
        assert_eq!(app.selected_view().unwrap().name, "m.log");
    }

    #[test]
    fn update_marks_unfocused_views_dirty() {
        let (mut app, _dir) = test_app();
        app.apply(Notification::Appeared("a.log".to_string()));
        app.apply(Notification::Appeared("b.log".to_string()));
        assert_eq!(app.selected_view().unwrap().name, "a.log");

        app.apply(update("a.log", "focused\n"));
        app.apply(update("b.log", "background\n"));
        assert!(!app.views[0].dirty);
        assert!(app.views[1].dirty);

        // Switching to b.log clears its marker.
        app.focus(1);
        assert!(!app.views[1].dirty);
    }

    #[test]
    fn partial_lines_are_held_back() {
        let (mut app, _dir) = test_app();
        app.apply(Notification::Appeared("a.log".to_string()));
        app.apply(update("a.log", "complete\npar"));
        assert_eq!(app.views[0].lines, vec!["complete".to_string()]);
        app.apply(update("a.log", "tial\n"));
        assert_eq!(
            app.views[0].lines,
            vec!["complete".to_string(), "partial".to_string()]
        );
    }

    #[test]
    fn focused_view_disappearing_moves_focus_to_neighbor() {
        let (mut app, _dir) = test_app();
        app.apply(Notification::Appeared("a.log".to_string()));
        app.apply(Notification::Appeared("b.log".to_string()));
        app.apply(Notification::Appeared("c.log".to_string()));
        app.focus(1);

        app.apply(Notification::Disappeared("b.log".to_string()));
        assert_eq!(app.selected_view().unwrap().name, "c.log");

        app.apply(Notification::Disappeared("c.log".to_string()));
        assert_eq!(app.selected_view().unwrap().name, "a.log");

        app.apply(Notification::Disappeared("a.log".to_string()));
        assert!(app.views.is_empty());
        assert!(app.selected_view().is_none());
    }
}
