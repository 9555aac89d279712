use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::board_io::{self, discover_board, load_board};
use crate::map::{MapSurface, TerminalMap};
use crate::model::Board;
use crate::view::{self, MarkerSync, SidebarRow};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction state. `Navigate` is the idle state; the pin-id
/// carrying variants are the open modals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Entry form over a freshly created, still-unconfirmed pin
    Draft { pin_id: String },
    /// Entry form pre-filled from a confirmed pin
    Edit { pin_id: String },
    /// Read-only details popup
    Info { pin_id: String },
    /// y/n gate in front of a destructive action
    Confirm,
    Search,
}

/// Which entry-form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
}

/// State of the entry form popup
#[derive(Debug, Clone)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub field: FormField,
    /// Byte offset of the cursor within the focused field
    pub cursor: usize,
    /// Validation message shown under the fields
    pub error: Option<String>,
}

impl FormState {
    pub fn empty() -> Self {
        FormState {
            title: String::new(),
            description: String::new(),
            field: FormField::Title,
            cursor: 0,
            error: None,
        }
    }

    pub fn prefilled(title: &str, description: &str) -> Self {
        FormState {
            cursor: title.len(),
            title: title.to_string(),
            description: description.to_string(),
            field: FormField::Title,
            error: None,
        }
    }

    pub fn focused_text(&self) -> &str {
        match self.field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
        }
    }

    pub fn focused_text_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }
}

/// Destructive action awaiting a y/n answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeletePin { pin_id: String },
    ClearAll,
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub action: ConfirmAction,
    pub prompt: String,
    /// Mode to restore when the user declines
    pub return_to: Mode,
}

/// Main application state
pub struct App {
    pub board: Board,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// The rendered map widget (implements the map surface boundary)
    pub map: TerminalMap,
    /// Pin → marker reconciler
    pub markers: MarkerSync,
    /// Sidebar render model, rebuilt on every store mutation
    pub rows: Vec<SidebarRow>,
    /// Selected pin id (marker/sidebar selection)
    pub selected: Option<String>,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    /// Search mode: query being typed
    pub search_input: String,
    /// Applied sidebar filter term
    pub filter: Option<String>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub sidebar_scroll: usize,
    /// Inner size of the map grid from the last render (cols, rows)
    pub map_grid: (u16, u16),
}

impl App {
    pub fn new(mut board: Board) -> Self {
        let theme = Theme::from_config(&board.config.ui);
        let map = TerminalMap::new(&board.config.map);
        let status_message = board
            .storage_warning
            .take()
            .map(|w| format!("warning: {} (starting empty)", w));

        let mut app = App {
            board,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            map,
            markers: MarkerSync::new(),
            rows: Vec::new(),
            selected: None,
            form: None,
            confirm: None,
            search_input: String::new(),
            filter: None,
            status_message,
            show_help: false,
            sidebar_scroll: 0,
            map_grid: (80, 24),
        };
        app.sync_presentation();
        app
    }

    // -----------------------------------------------------------------------
    // Presentation sync
    // -----------------------------------------------------------------------

    /// Re-derive markers and sidebar rows from the store. Called after every
    /// mutation; the reconciler keeps unchanged markers untouched.
    pub fn sync_presentation(&mut self) {
        let pins = self.board.store.all();
        self.markers.reconcile(&mut self.map, &pins);
        self.rows = view::build_rows(&self.board.store.list());
        if let Some(id) = &self.selected {
            if self.board.store.get(id).is_none() {
                self.selected = None;
            }
        }
    }

    /// The filter term the sidebar should apply right now: the live query
    /// while typing a search, the applied filter otherwise.
    pub fn effective_filter(&self) -> Option<&str> {
        if self.mode == Mode::Search {
            if self.search_input.is_empty() {
                None
            } else {
                Some(self.search_input.as_str())
            }
        } else {
            self.filter.as_deref()
        }
    }

    /// Sidebar rows after the presentation-only search filter.
    pub fn visible_rows(&self) -> Vec<&SidebarRow> {
        let term = self.effective_filter().unwrap_or("");
        self.rows
            .iter()
            .filter(|row| view::row_matches(row, term))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Interaction controller transitions
    // -----------------------------------------------------------------------

    /// "Map click" at the crosshair: open the info popup when a marker sits
    /// under it, otherwise drop a draft pin there and open the entry form.
    pub fn map_click(&mut self) {
        let (w, h) = self.map_grid;
        if let Some(handle) = self.map.marker_at_cell(w / 2, h / 2, w, h) {
            if let Some(pin_id) = self.markers.pin_for(handle).map(str::to_string) {
                self.open_info(pin_id);
                return;
            }
        }
        self.open_draft_at_center();
    }

    /// Drop a draft pin at the viewport center and open the entry form.
    /// The draft gets a marker immediately but is not persisted.
    pub fn open_draft_at_center(&mut self) {
        let lat = self.map.viewport.center_lat;
        let lng = self.map.viewport.center_lng;
        let pin_id = self.board.store.create(lat, lng);
        self.sync_presentation();
        self.selected = Some(pin_id.clone());
        self.form = Some(FormState::empty());
        self.mode = Mode::Draft { pin_id };
    }

    pub fn open_info(&mut self, pin_id: String) {
        if self.board.store.get(&pin_id).is_none() {
            return;
        }
        self.selected = Some(pin_id.clone());
        self.mode = Mode::Info { pin_id };
    }

    /// Info → Edit: entry form pre-filled with existing text, geometry kept.
    pub fn open_edit(&mut self, pin_id: String) {
        let Some(pin) = self.board.store.get(&pin_id) else {
            return;
        };
        self.form = Some(FormState::prefilled(&pin.title, &pin.description));
        self.mode = Mode::Edit { pin_id };
    }

    /// Submit the entry form. On validation failure the form stays open with
    /// the message; on success the pin is confirmed, persisted, and the
    /// presentation refreshed.
    pub fn submit_form(&mut self) {
        let pin_id = match &self.mode {
            Mode::Draft { pin_id } | Mode::Edit { pin_id } => pin_id.clone(),
            _ => return,
        };
        let Some(form) = &self.form else { return };
        let title = form.title.trim().to_string();
        let description = form.description.trim().to_string();

        match self.board.store.confirm(&pin_id, &title, &description) {
            Ok(()) => {
                self.mode = Mode::Navigate;
                self.form = None;
                self.persist_confirmed();
                self.sync_presentation();
                self.selected = Some(pin_id);
            }
            Err(e) if e.is_validation() => {
                if let Some(form) = &mut self.form {
                    form.error = Some(e.to_string());
                }
            }
            Err(e) => {
                // Stale modal over a vanished pin
                self.mode = Mode::Navigate;
                self.form = None;
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Escape / outside-click cleanup. A draft that was never confirmed is
    /// discarded along with its marker.
    pub fn cancel_modal(&mut self) {
        if let Mode::Draft { pin_id } = &self.mode {
            let pin_id = pin_id.clone();
            self.board.store.discard_draft(&pin_id);
            self.sync_presentation();
        }
        self.mode = Mode::Navigate;
        self.form = None;
        self.confirm = None;
    }

    /// Gate a pin deletion behind a y/n prompt. Works from any state; the
    /// declined prompt returns to the state it interrupted.
    pub fn request_delete(&mut self, pin_id: String) {
        let Some(pin) = self.board.store.get(&pin_id) else {
            return;
        };
        let label = if pin.is_draft() {
            "unconfirmed pin".to_string()
        } else {
            format!("\"{}\"", pin.title)
        };
        self.confirm = Some(ConfirmState {
            action: ConfirmAction::DeletePin { pin_id },
            prompt: format!("Delete {}?", label),
            return_to: self.mode.clone(),
        });
        self.mode = Mode::Confirm;
    }

    pub fn request_clear(&mut self) {
        let count = self.board.store.count();
        if count == 0 {
            self.status_message = Some("no pins to clear".to_string());
            return;
        }
        self.confirm = Some(ConfirmState {
            action: ConfirmAction::ClearAll,
            prompt: format!("Delete all {} pins?", count),
            return_to: self.mode.clone(),
        });
        self.mode = Mode::Confirm;
    }

    /// User answered `y`: perform the gated action and return to idle.
    pub fn apply_confirm(&mut self) {
        let Some(state) = self.confirm.take() else {
            self.mode = Mode::Navigate;
            return;
        };
        self.mode = Mode::Navigate;
        self.form = None;

        match state.action {
            ConfirmAction::DeletePin { pin_id } => match self.board.store.delete(&pin_id) {
                Ok(pin) => {
                    self.persist_confirmed();
                    self.sync_presentation();
                    if pin.is_draft() {
                        self.status_message = Some("deleted unconfirmed pin".to_string());
                    } else {
                        self.status_message = Some(format!("deleted \"{}\"", pin.title));
                    }
                }
                Err(e) => {
                    // Absent id: recover by no-op, tell the user
                    self.status_message = Some(e.to_string());
                }
            },
            ConfirmAction::ClearAll => {
                let count = self.board.store.count();
                self.board.store.clear();
                self.persist_confirmed();
                self.sync_presentation();
                self.status_message = Some(format!("cleared {} pins", count));
            }
        }
    }

    /// User answered `n`: drop the prompt, restore the interrupted state.
    pub fn decline_confirm(&mut self) {
        if let Some(state) = self.confirm.take() {
            self.mode = state.return_to;
        } else {
            self.mode = Mode::Navigate;
        }
    }

    /// The pin a delete shortcut should target right now: the pin of any
    /// open modal, else the selection, else the marker under the crosshair.
    pub fn delete_target(&self) -> Option<String> {
        match &self.mode {
            Mode::Draft { pin_id } | Mode::Edit { pin_id } | Mode::Info { pin_id } => {
                return Some(pin_id.clone());
            }
            _ => {}
        }
        if let Some(id) = &self.selected {
            return Some(id.clone());
        }
        let (w, h) = self.map_grid;
        let handle = self.map.marker_at_cell(w / 2, h / 2, w, h)?;
        self.markers.pin_for(handle).map(str::to_string)
    }

    /// Move the marker selection through the visible (filtered) rows,
    /// panning the map to the newly selected pin.
    pub fn cycle_selection(&mut self, step: i32) {
        let ids: Vec<String> = self
            .visible_rows()
            .iter()
            .map(|r| r.pin_id.clone())
            .collect();
        if ids.is_empty() {
            return;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|id| ids.iter().position(|x| x == id));
        let next = match current {
            None => {
                if step >= 0 {
                    0
                } else {
                    ids.len() - 1
                }
            }
            Some(i) => (i as i64 + i64::from(step)).rem_euclid(ids.len() as i64) as usize,
        };
        let pin_id = ids[next].clone();
        if let Some(pin) = self.board.store.get(&pin_id) {
            let zoom = self.map.viewport.zoom;
            self.map.pan_to(pin.lat, pin.lng, zoom);
        }
        self.selected = Some(pin_id);
    }

    /// Jump the viewport back to the configured home center.
    pub fn go_home(&mut self) {
        let map = &self.board.config.map;
        self.map.pan_to(map.center_lat, map.center_lng, map.zoom);
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Persist confirmed pins. Fires synchronously after confirm / delete /
    /// clear. A failed write leaves in-memory state authoritative and warns.
    pub fn persist_confirmed(&mut self) {
        if let Err(e) = board_io::save_pins(&self.board) {
            self.status_message = Some(format!("warning: pins not saved: {}", e));
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal setup + event loop
// ---------------------------------------------------------------------------

/// Run the TUI application
pub fn run(board_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match board_dir {
        Some(dir) => std::fs::canonicalize(dir)?,
        None => std::env::current_dir()?,
    };
    let root = discover_board(&start)?;
    let board = load_board(&root)?;

    let mut app = App::new(board);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Build a live board in a temp directory so persistence works.
    fn test_app() -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        let board_dir = tmp.path().join("pinboard");
        fs::create_dir_all(&board_dir).unwrap();
        fs::write(
            board_dir.join("board.toml"),
            "[board]\nname = \"test\"\n\n[map]\ncenter_lat = 35.0\ncenter_lng = 139.0\nzoom = 8\n",
        )
        .unwrap();
        let board = load_board(tmp.path()).unwrap();
        (tmp, App::new(board))
    }

    fn confirmed_app_with_pin(title: &str) -> (TempDir, App, String) {
        let (tmp, mut app) = test_app();
        app.map_click();
        let Mode::Draft { pin_id } = app.mode.clone() else {
            panic!("expected draft mode");
        };
        let form = app.form.as_mut().unwrap();
        form.title = title.to_string();
        app.submit_form();
        (tmp, app, pin_id)
    }

    // --- Draft lifecycle ---

    #[test]
    fn test_map_click_on_empty_cell_opens_draft() {
        let (_tmp, mut app) = test_app();
        app.map_click();

        assert!(matches!(app.mode, Mode::Draft { .. }));
        assert!(app.form.is_some());
        // Draft occupies a marker but is not confirmed
        assert_eq!(app.map.markers().count(), 1);
        assert_eq!(app.board.store.count(), 0);
        assert!(app.rows.is_empty());
        // Drafts are never persisted
        assert!(!app.board.pins_path().exists());
    }

    #[test]
    fn test_cancel_draft_discards_pin_and_marker() {
        let (_tmp, mut app) = test_app();
        app.map_click();
        app.cancel_modal();

        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.board.store.all().is_empty());
        assert_eq!(app.map.markers().count(), 0);
    }

    #[test]
    fn test_submit_valid_draft_confirms_and_persists() {
        let (_tmp, mut app, pin_id) = confirmed_app_with_pin("Cafe");

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.board.store.count(), 1);
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].title, "Cafe");
        assert!(app.board.pins_path().exists());
        assert_eq!(app.selected.as_deref(), Some(pin_id.as_str()));
    }

    #[test]
    fn test_submit_empty_title_stays_in_form_with_error() {
        let (_tmp, mut app) = test_app();
        app.map_click();
        app.submit_form();

        assert!(matches!(app.mode, Mode::Draft { .. }));
        assert!(app.form.as_ref().unwrap().error.is_some());
        assert_eq!(app.board.store.count(), 0);
    }

    #[test]
    fn test_submit_overlong_title_reports_validation_error() {
        let (_tmp, mut app) = test_app();
        app.map_click();
        app.form.as_mut().unwrap().title = "x".repeat(51);
        app.submit_form();

        assert!(matches!(app.mode, Mode::Draft { .. }));
        let error = app.form.as_ref().unwrap().error.clone().unwrap();
        assert!(error.contains("50"));
        assert_eq!(app.board.store.count(), 0);
    }

    // --- Info / edit ---

    #[test]
    fn test_map_click_on_marker_opens_info() {
        let (_tmp, mut app, pin_id) = confirmed_app_with_pin("Cafe");
        // The confirmed pin sits at the viewport center
        app.map_click();
        assert_eq!(app.mode, Mode::Info { pin_id });
    }

    #[test]
    fn test_edit_prefills_form_and_keeps_marker() {
        let (_tmp, mut app, pin_id) = confirmed_app_with_pin("Cafe");
        let handle_before = app.markers.handle_for(&pin_id).unwrap();

        app.open_edit(pin_id.clone());
        assert!(matches!(app.mode, Mode::Edit { .. }));
        assert_eq!(app.form.as_ref().unwrap().title, "Cafe");

        app.form.as_mut().unwrap().title = "Cafe Luna".to_string();
        app.submit_form();

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.board.store.get(&pin_id).unwrap().title, "Cafe Luna");
        // Same marker handle: edited pins are refreshed, not re-placed
        assert_eq!(app.markers.handle_for(&pin_id), Some(handle_before));
        assert_eq!(app.map.marker(handle_before).unwrap().popup, "Cafe Luna");
    }

    // --- Delete / clear confirmation ---

    #[test]
    fn test_delete_flow_with_confirmation() {
        let (_tmp, mut app, pin_id) = confirmed_app_with_pin("Cafe");

        app.request_delete(pin_id.clone());
        assert_eq!(app.mode, Mode::Confirm);
        assert!(app.confirm.as_ref().unwrap().prompt.contains("Cafe"));

        app.apply_confirm();
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.board.store.count(), 0);
        assert_eq!(app.map.markers().count(), 0);
        assert_eq!(app.status_message.as_deref(), Some("deleted \"Cafe\""));
    }

    #[test]
    fn test_declined_delete_returns_to_interrupted_state() {
        let (_tmp, mut app, pin_id) = confirmed_app_with_pin("Cafe");
        app.open_info(pin_id.clone());

        app.request_delete(pin_id.clone());
        app.decline_confirm();

        assert_eq!(app.mode, Mode::Info { pin_id });
        assert_eq!(app.board.store.count(), 1);
    }

    #[test]
    fn test_delete_target_prefers_open_modal() {
        let (_tmp, mut app, pin_id) = confirmed_app_with_pin("Cafe");
        app.open_info(pin_id.clone());
        assert_eq!(app.delete_target(), Some(pin_id));
    }

    #[test]
    fn test_clear_all_removes_pins_and_markers() {
        let (_tmp, mut app) = test_app();
        for i in 0..3 {
            app.map_click();
            // Move the crosshair so the next click lands on an empty cell
            app.form.as_mut().unwrap().title = format!("Pin {}", i);
            app.submit_form();
            app.map.viewport.pan_cells(4, 0);
        }
        assert_eq!(app.board.store.count(), 3);

        app.request_clear();
        assert_eq!(app.mode, Mode::Confirm);
        app.apply_confirm();

        assert_eq!(app.board.store.count(), 0);
        assert_eq!(app.map.markers().count(), 0);
        assert!(app.rows.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("cleared 3 pins"));
    }

    #[test]
    fn test_clear_with_no_pins_skips_confirmation() {
        let (_tmp, mut app) = test_app();
        app.request_clear();
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.confirm.is_none());
    }

    // --- Search is presentation-only ---

    #[test]
    fn test_filter_hides_rows_without_touching_store() {
        let (_tmp, mut app, _id) = confirmed_app_with_pin("Cafe");
        app.map.viewport.pan_cells(4, 0);
        app.map_click();
        app.form.as_mut().unwrap().title = "Dock".to_string();
        app.submit_form();

        app.filter = Some("cafe".to_string());
        let visible = app.visible_rows();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Cafe");
        // The store still holds both pins
        assert_eq!(app.board.store.count(), 2);

        app.filter = None;
        assert_eq!(app.visible_rows().len(), 2);
    }

    #[test]
    fn test_live_search_input_filters_while_typing() {
        let (_tmp, mut app, _id) = confirmed_app_with_pin("Cafe");
        app.mode = Mode::Search;
        app.search_input = "xyz".to_string();
        assert!(app.visible_rows().is_empty());
    }

    // --- Persistence failure is non-fatal ---

    #[test]
    fn test_failed_persist_warns_and_keeps_memory_state() {
        let (tmp, mut app) = test_app();
        app.map_click();
        app.form.as_mut().unwrap().title = "Cafe".to_string();
        fs::remove_dir_all(tmp.path().join("pinboard")).unwrap();
        app.submit_form();

        assert_eq!(app.board.store.count(), 1);
        let status = app.status_message.clone().unwrap();
        assert!(status.contains("not saved"));
    }

    // --- Selection cycling ---

    #[test]
    fn test_cycle_selection_pans_to_pin() {
        let (_tmp, mut app, _id) = confirmed_app_with_pin("Cafe");
        app.map.viewport.pan_cells(10, 0);
        app.selected = None;

        app.cycle_selection(1);
        let selected = app.selected.clone().unwrap();
        let pin = app.board.store.get(&selected).unwrap();
        assert!((app.map.viewport.center_lat - pin.lat).abs() < 1e-9);
        assert!((app.map.viewport.center_lng - pin.lng).abs() < 1e-9);
    }
}
