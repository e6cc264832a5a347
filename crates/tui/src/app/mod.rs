use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::{DraftField, LedgerStore, Notice, NoticeKind, Notifier, RowEditor, SelectionTracker};

use crate::{
    client::Source,
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct ToastState {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    shown_at: Instant,
}

/// Notifier of the terminal host: keeps the latest notice on screen for a
/// few seconds.
#[derive(Debug, Default)]
pub struct Toasts {
    current: Option<ToastState>,
}

impl Toasts {
    pub fn current(&self) -> Option<&ToastState> {
        self.current.as_ref()
    }

    fn expire(&mut self, now: Instant) {
        if let Some(toast) = &self.current
            && now.duration_since(toast.shown_at) >= TOAST_TTL
        {
            self.current = None;
        }
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => tracing::info!("{}: {}", notice.title, notice.message),
            NoticeKind::Error => tracing::warn!("{}: {}", notice.title, notice.message),
        }
        self.current = Some(ToastState {
            kind: notice.kind,
            title: notice.title,
            message: notice.message,
            shown_at: Instant::now(),
        });
    }
}

#[derive(Debug)]
pub struct AppState {
    pub store: LedgerStore,
    pub selection: SelectionTracker,
    pub editor: RowEditor,
    pub focus: DraftField,
    /// Index of the highlighted table row.
    pub cursor: usize,
    pub toasts: Toasts,
    pub currency_symbol: String,
    pub source_label: String,
    pub loading: bool,
}

impl AppState {
    pub fn new(currency_symbol: impl Into<String>, source_label: impl Into<String>) -> Self {
        Self {
            store: LedgerStore::new(),
            selection: SelectionTracker::new(),
            editor: RowEditor::new(),
            focus: DraftField::Creditor,
            cursor: 0,
            toasts: Toasts::default(),
            currency_symbol: currency_symbol.into(),
            source_label: source_label.into(),
            loading: true,
        }
    }

    /// Applies one key action. Returns `true` when the user asked to quit.
    pub fn handle_action(&mut self, action: AppAction) -> bool {
        if action == AppAction::Quit {
            return true;
        }
        if self.editor.is_open() {
            self.handle_form_action(action);
            false
        } else {
            self.handle_list_action(action)
        }
    }

    fn handle_list_action(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::Input('q') => return true,
            AppAction::Up | AppAction::Input('k') => self.select_prev(),
            AppAction::Down | AppAction::Input('j') => self.select_next(),
            AppAction::Submit | AppAction::Input(' ') => self.toggle_current(),
            AppAction::Input('A') => {
                let rows = self.store.rows();
                self.selection.toggle_all(&rows);
            }
            AppAction::Input('a') => {
                self.focus = DraftField::Creditor;
                self.editor.open();
            }
            AppAction::Input('d') => self.remove_selected(),
            AppAction::Cancel => self.selection.clear(),
            _ => {}
        }
        false
    }

    fn handle_form_action(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.editor.close(),
            AppAction::NextField | AppAction::Down => self.focus = self.focus.next(),
            AppAction::PrevField | AppAction::Up => self.focus = self.focus.prev(),
            AppAction::Backspace => {
                let mut text = self.editor.field_text(self.focus).to_string();
                text.pop();
                self.editor.set(self.focus, &text);
            }
            AppAction::Input(ch) => {
                let mut text = self.editor.field_text(self.focus).to_string();
                text.push(ch);
                self.editor.set(self.focus, &text);
            }
            AppAction::Submit => {
                if self
                    .store
                    .append(&mut self.editor, &mut self.toasts)
                    .is_ok()
                {
                    self.cursor = self.store.total_row_count().saturating_sub(1);
                }
            }
            AppAction::Quit | AppAction::None => {}
        }
    }

    fn toggle_current(&mut self) {
        let rows = self.store.rows();
        if let Some(row) = rows.get(self.cursor) {
            self.selection.toggle(row.id, &rows);
        }
    }

    fn remove_selected(&mut self) {
        self.store.remove(&mut self.selection, &mut self.toasts);
        self.cursor = self
            .cursor
            .min(self.store.total_row_count().saturating_sub(1));
    }

    fn select_next(&mut self) {
        let len = self.store.total_row_count();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

pub struct App {
    source: Source,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, source: Source) -> Self {
        let state = AppState::new(config.currency_symbol.as_str(), source.describe());
        Self {
            source,
            state,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.session(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn session(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        self.draw(terminal)?;
        if let Err(err) = self
            .state
            .store
            .load_from(&self.source, &mut self.state.toasts)
            .await
        {
            tracing::warn!("continuing with an empty ledger: {err}");
        }
        self.state.loading = false;
        self.event_loop(terminal)
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.state.toasts.expire(Instant::now());
            self.draw(terminal)?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut ui::Terminal) -> Result<()> {
        terminal
            .draw(|frame| ui::render(frame, &self.state))
            .map_err(|err| AppError::Terminal(err.to_string()))?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.should_quit = self.state.handle_action(ui::keymap::map_key(key));
    }
}

#[cfg(test)]
mod tests {
    use engine::RowId;
    use rust_decimal_macros::dec;

    use super::*;

    const PAYLOAD: &str = r#"[
        {"id": 1, "creditorName": "CBNA", "firstName": "Suman", "lastName": "Tester79",
         "minPaymentPercentage": 10, "balance": 100},
        {"id": 2, "creditorName": "AMEX", "firstName": "Suman", "lastName": "Tester79",
         "minPaymentPercentage": 20, "balance": 200}
    ]"#;

    fn state() -> AppState {
        let mut state = AppState::new("$", "test");
        state.store.load(PAYLOAD).unwrap();
        state.loading = false;
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            state.handle_action(AppAction::Input(ch));
        }
    }

    #[test]
    fn space_toggles_the_row_under_the_cursor() {
        let mut state = state();

        state.handle_action(AppAction::Input(' '));
        state.handle_action(AppAction::Down);
        state.handle_action(AppAction::Input(' '));

        assert_eq!(state.selection.ids(), &[RowId::new(1), RowId::new(2)]);
        assert_eq!(state.selection.summary().rounded_total(), dec!(300.00));
    }

    #[test]
    fn add_form_commits_a_new_row() {
        let mut state = state();

        state.handle_action(AppAction::Input('a'));
        assert!(state.editor.is_open());
        type_text(&mut state, "DCNB");
        state.handle_action(AppAction::NextField);
        type_text(&mut state, "Suman");
        state.handle_action(AppAction::NextField);
        type_text(&mut state, "Tester79");
        state.handle_action(AppAction::NextField);
        type_text(&mut state, "5");
        state.handle_action(AppAction::NextField);
        type_text(&mut state, "50");
        state.handle_action(AppAction::Submit);

        assert!(!state.editor.is_open());
        assert_eq!(state.store.total_row_count(), 3);
        assert_eq!(state.cursor, 2);
        let row = state.store.row(RowId::new(3)).unwrap();
        assert_eq!(row.creditor_name, "DCNB");
        assert_eq!(row.min_payment_percentage, dec!(0.05));
        let toast = state.toasts.current().unwrap();
        assert_eq!(toast.kind, NoticeKind::Success);
        assert_eq!(toast.message, "Debt added successfully");
    }

    #[test]
    fn letters_in_the_form_are_text_not_shortcuts() {
        let mut state = state();
        state.handle_action(AppAction::Input('a'));

        let quit = state.handle_action(AppAction::Input('q'));
        type_text(&mut state, "d");
        state.handle_action(AppAction::Backspace);

        assert!(!quit);
        assert_eq!(state.editor.field_text(DraftField::Creditor), "q");
        assert_eq!(state.store.total_row_count(), 2);
    }

    #[test]
    fn cancel_keeps_the_draft_for_next_time() {
        let mut state = state();
        state.handle_action(AppAction::Input('a'));
        type_text(&mut state, "CBNA");
        state.handle_action(AppAction::Cancel);
        assert!(!state.editor.is_open());

        state.handle_action(AppAction::Input('a'));

        assert_eq!(state.editor.field_text(DraftField::Creditor), "CBNA");
    }

    #[test]
    fn invalid_draft_keeps_the_form_open() {
        let mut state = state();
        state.handle_action(AppAction::Input('a'));
        state.focus = DraftField::Balance;
        type_text(&mut state, "oops");

        state.handle_action(AppAction::Submit);

        assert!(state.editor.is_open());
        assert_eq!(state.store.total_row_count(), 2);
        assert_eq!(state.toasts.current().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn remove_clears_selection_and_clamps_cursor() {
        let mut state = state();
        state.handle_action(AppAction::Down);
        state.handle_action(AppAction::Input(' '));

        state.handle_action(AppAction::Input('d'));

        assert_eq!(state.store.total_row_count(), 1);
        assert_eq!(state.store.removed_count(), 1);
        assert!(state.selection.is_empty());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn remove_without_selection_shows_nothing() {
        let mut state = state();

        state.handle_action(AppAction::Input('d'));

        assert_eq!(state.store.total_row_count(), 2);
        assert!(state.toasts.current().is_none());
    }

    #[test]
    fn q_quits_from_the_list() {
        let mut state = state();
        assert!(state.handle_action(AppAction::Input('q')));
        assert!(state.handle_action(AppAction::Quit));
    }

    #[test]
    fn toasts_expire() {
        let mut toasts = Toasts::default();
        toasts.notify(Notice::success("Success", "Debt added successfully"));

        toasts.expire(Instant::now());
        assert!(toasts.current().is_some());

        toasts.expire(Instant::now() + TOAST_TTL);
        assert!(toasts.current().is_none());
    }
}
