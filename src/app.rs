use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::features::form::{FormState, Rejection, TranslationRequest};
use crate::features::history::{
    FileStore, HistoryRecord, HistoryStore, KeyValueStore, MemoryStore, NewRecord,
};
use crate::shared::{Config, I18n, ModernTheme, ThemeMode};
use crate::translation::{TranslateError, TranslationClient};
use crate::ui;

/// How long a status message stays up once no translation is running
const STATUS_MAX_AGE: Duration = Duration::from_secs(3);

const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Which part of the form receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Source,
    FromLang,
    ToLang,
    History,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Source => Focus::FromLang,
            Focus::FromLang => Focus::ToLang,
            Focus::ToLang => Focus::History,
            Focus::History => Focus::Source,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Source => Focus::History,
            Focus::FromLang => Focus::Source,
            Focus::ToLang => Focus::FromLang,
            Focus::History => Focus::ToLang,
        }
    }
}

/// Status message for user feedback
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub timestamp: Instant,
    pub message_type: StatusType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Warning,
    Error,
}

/// Spinner animation shown while a request is in flight
#[derive(Debug)]
pub struct Spinner {
    frame: usize,
    last_update: Instant,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frame: 0,
            last_update: Instant::now(),
        }
    }

    /// Advance every 100ms; returns true when the frame changed
    pub fn tick(&mut self) -> bool {
        if self.last_update.elapsed().as_millis() > 100 {
            self.frame = (self.frame + 1) % SPINNER_CHARS.len();
            self.last_update = Instant::now();
            return true;
        }
        false
    }

    pub fn current(&self) -> char {
        SPINNER_CHARS[self.frame]
    }
}

/// A finished request on its way back to the control loop
#[derive(Debug)]
pub struct TranslationOutcome {
    pub request: TranslationRequest,
    pub result: Result<String, TranslateError>,
}

pub fn theme_for(mode: ThemeMode) -> ModernTheme {
    match mode {
        ThemeMode::Dark => ModernTheme::dark(),
        ThemeMode::Light => ModernTheme::light(),
        ThemeMode::Ocean => ModernTheme::ocean(),
    }
}

/// Main application state
pub struct App {
    /// Flag to indicate if the app should quit
    pub should_quit: bool,
    /// Application configuration
    pub config: Config,
    /// Application theme
    pub theme: ModernTheme,
    /// UI text
    pub i18n: I18n,
    /// Source/target text, language pair and translate phase
    pub form: FormState,
    /// Persisted recent translations
    pub history: HistoryStore,
    /// Remote translation endpoint
    client: TranslationClient,
    clipboard: Box<dyn ClipboardSink>,
    /// Focused form part
    pub focus: Focus,
    /// Highlighted history entry, newest first
    pub selected_history: usize,
    /// Current status message
    pub status_message: Option<StatusMessage>,
    pub spinner: Spinner,
    /// Flag to indicate if UI needs redraw
    needs_redraw: bool,
    /// Only a config that came from disk is written back
    persist_config: bool,
    outcome_tx: mpsc::UnboundedSender<TranslationOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<TranslationOutcome>,
}

impl App {
    /// Create a new App instance from the on-disk config and history
    pub async fn new() -> Result<Self> {
        let config = Config::load()?;

        let storage: Box<dyn KeyValueStore> = match FileStore::in_data_dir() {
            Ok(store) => {
                info!("History stored in {}", store.dir().display());
                Box::new(store)
            }
            Err(e) => {
                warn!("History will not persist this session: {e}");
                Box::new(MemoryStore::new())
            }
        };
        let history = HistoryStore::open(storage);

        let client = TranslationClient::new(config.endpoint(), config.request_timeout())?;
        info!(endpoint = client.api_url(), "Translation client ready");

        let mut app = Self::with_parts(config, history, client, Box::new(SystemClipboard::new()));
        app.persist_config = true;
        Ok(app)
    }

    /// Assemble an App from already-built parts
    pub fn with_parts(
        config: Config,
        history: HistoryStore,
        client: TranslationClient,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let form = FormState::new(
            config.default_source_lang.clone(),
            config.default_target_lang.clone(),
            config.max_chars,
        );
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            should_quit: false,
            theme: theme_for(config.theme_mode),
            config,
            i18n: I18n::new(),
            form,
            history,
            client,
            clipboard,
            focus: Focus::Source,
            selected_history: 0,
            status_message: None,
            spinner: Spinner::new(),
            needs_redraw: true,
            persist_config: false,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        if !IsTty::is_tty(&io::stdout()) {
            eprintln!("This application requires a TTY terminal to run.");
            return Ok(());
        }

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore the terminal even if the loop failed
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result?;
        self.cleanup()
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        while !self.should_quit {
            self.drain_outcomes();

            if self.form.phase().is_busy() {
                if self.spinner.tick() {
                    self.needs_redraw = true;
                }
            } else {
                self.update_status_message(STATUS_MAX_AGE);
            }

            // Only redraw if something changed
            if self.needs_redraw {
                terminal.draw(|f| ui::draw(f, self))?;
                self.needs_redraw = false;
            }

            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key)?;
                        self.needs_redraw = true;
                    }
                    Event::Paste(text) => {
                        self.handle_paste(&text);
                        self.needs_redraw = true;
                    }
                    Event::Resize(_, _) => self.needs_redraw = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        // Help overlay swallows everything but its close keys
        if self.config.show_help {
            if matches!(key.code, KeyCode::F(1) | KeyCode::Esc) {
                self.toggle_help();
            }
            return Ok(());
        }

        if ctrl {
            match key.code {
                KeyCode::Char('s') => self.swap_languages(),
                KeyCode::Char('y') => self.copy_translation(),
                KeyCode::Char('l') => self.clear_history(),
                KeyCode::Char('u') => self.form.clear_source(),
                KeyCode::Char('t') => self.toggle_theme(),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.toggle_help(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                Focus::History => self.reuse_selected(),
                _ => self.dispatch_translation(),
            },
            KeyCode::Backspace => {
                self.focus = Focus::Source;
                self.form.pop_char();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.focus = Focus::Source;
                self.form.push_char(c);
            }
            KeyCode::Left | KeyCode::Up => self.step_focused(-1),
            KeyCode::Right | KeyCode::Down => self.step_focused(1),
            _ => {}
        }
        Ok(())
    }

    /// Bracketed paste goes into the source, clamped like typing
    pub fn handle_paste(&mut self, text: &str) {
        if self.config.show_help {
            return;
        }
        self.focus = Focus::Source;
        self.form.insert_str(&text.replace("\r\n", "\n"));
    }

    /// Arrow keys on the focused selector or history list
    fn step_focused(&mut self, step: isize) {
        match self.focus {
            Focus::FromLang => self.form.cycle_source_lang(step),
            Focus::ToLang => self.form.cycle_target_lang(step),
            Focus::History => self.move_history_selection(step),
            Focus::Source => {}
        }
    }

    fn move_history_selection(&mut self, step: isize) {
        let len = self.history.log().len();
        if len == 0 {
            self.selected_history = 0;
            return;
        }
        self.selected_history = if step < 0 {
            self.selected_history.saturating_sub(1)
        } else {
            (self.selected_history + 1).min(len - 1)
        };
    }

    /// Validate the form and start a request on a background task
    pub fn dispatch_translation(&mut self) {
        let request = match self.form.prepare_request() {
            Ok(request) => request,
            // Translate control is disabled: nothing to report
            Err(Rejection::Busy) | Err(Rejection::EmptySource) => return,
            Err(Rejection::SameLanguage) => {
                self.show_status(self.i18n.t("status.same_language"), StatusType::Error);
                return;
            }
            Err(Rejection::AutoTarget) => {
                self.show_status(self.i18n.t("status.auto_target"), StatusType::Error);
                return;
            }
        };

        if let Err(e) = self.form.phase_mut().begin() {
            debug!("Translate ignored: {e}");
            return;
        }
        self.show_status(self.i18n.t("status.translating"), StatusType::Info);
        info!(
            source = %request.source_lang,
            target = %request.target_lang,
            chars = request.text.chars().count(),
            "Translation requested"
        );

        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = client
                .translate(&request.text, &request.source_lang, &request.target_lang)
                .await;
            let _ = tx.send(TranslationOutcome { request, result });
        });
    }

    /// Apply every outcome the request tasks have delivered
    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    /// Fold a finished request back into the form, history and status line
    pub fn apply_outcome(&mut self, outcome: TranslationOutcome) {
        let TranslationOutcome { request, result } = outcome;
        let succeeded = result.is_ok();

        if let Err(e) = self.form.phase_mut().finish(succeeded) {
            warn!("Dropping unexpected translation outcome: {e}");
            return;
        }
        self.needs_redraw = true;

        match result {
            Ok(translation) => {
                info!(chars = translation.chars().count(), "Translation received");
                self.form.set_target_text(translation.clone());

                let entry = NewRecord {
                    source_text: request.text,
                    translated_text: translation,
                    source_lang: request.source_lang,
                    target_lang: request.target_lang,
                };
                self.selected_history = 0;
                match self.history.record(entry).map(|_| ()) {
                    Ok(()) => self.show_status(self.i18n.t("status.done"), StatusType::Success),
                    Err(e) => {
                        warn!("Could not save history: {e}");
                        self.show_status(
                            self.i18n.t("status.history_not_saved"),
                            StatusType::Warning,
                        );
                    }
                }
            }
            Err(e) => {
                match &e {
                    TranslateError::Transport(_) | TranslateError::HttpStatus(_) => {
                        warn!("Translation request failed: {e}")
                    }
                    _ => error!("Translation response unusable: {e}"),
                }
                self.show_status(self.i18n.t("status.failed"), StatusType::Error);
            }
        }
    }

    /// Copy the translation to the clipboard
    pub fn copy_translation(&mut self) {
        let text = self.form.target_text().trim().to_string();
        if text.is_empty() {
            return;
        }

        match self.clipboard.write_text(&text) {
            Ok(()) => self.show_status(self.i18n.t("status.copied"), StatusType::Success),
            Err(e) => {
                warn!("Copy failed: {e}");
                self.show_status(self.i18n.t("status.clipboard_blocked"), StatusType::Error);
            }
        }
    }

    pub fn swap_languages(&mut self) {
        if self.form.swap() {
            self.show_status(self.i18n.t("status.swapped"), StatusType::Info);
        }
    }

    /// Load the highlighted history record into the form
    pub fn reuse_selected(&mut self) {
        let Some(record) = self.selected_record().cloned() else {
            return;
        };
        self.form.apply_record(&record);
        self.show_status(self.i18n.t("status.reused"), StatusType::Success);
    }

    pub fn selected_record(&self) -> Option<&HistoryRecord> {
        self.history.log().get(self.selected_history)
    }

    pub fn clear_history(&mut self) {
        self.selected_history = 0;
        match self.history.clear().map(|_| ()) {
            Ok(()) => self.show_status(self.i18n.t("status.history_cleared"), StatusType::Success),
            Err(e) => {
                warn!("Could not remove saved history: {e}");
                self.show_status(
                    self.i18n.t("status.history_not_cleared"),
                    StatusType::Warning,
                );
            }
        }
    }

    /// Cycle theme mode
    fn toggle_theme(&mut self) {
        self.config.cycle_theme();
        self.theme = theme_for(self.config.theme_mode);
        self.save_config();

        let text = format!("{} {}", self.i18n.t("status.theme"), self.config.theme_display());
        self.show_status(&text, StatusType::Success);
    }

    /// Toggle help overlay
    fn toggle_help(&mut self) {
        self.config.toggle_help();
        self.save_config();
    }

    fn save_config(&self) {
        if !self.persist_config {
            return;
        }
        if let Err(e) = self.config.save() {
            warn!("Could not save config: {e}");
        }
    }

    /// Show a status message to the user
    pub fn show_status(&mut self, text: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: text.to_string(),
            timestamp: Instant::now(),
            message_type: status_type,
        });
        self.needs_redraw = true;
    }

    /// Clear status message if it's older than the specified duration
    pub fn update_status_message(&mut self, max_age: Duration) {
        if let Some(ref msg) = self.status_message {
            if msg.timestamp.elapsed() > max_age {
                self.status_message = None;
                self.needs_redraw = true;
            }
        }
    }

    /// Wait for the in-flight request and apply it
    #[cfg(test)]
    pub async fn wait_for_translation(&mut self) {
        if let Some(outcome) = self.outcome_rx.recv().await {
            self.apply_outcome(outcome);
        }
    }

    /// Clean up resources before exiting
    fn cleanup(&mut self) -> Result<()> {
        if self.persist_config {
            self.config.save()?;
        }
        info!("Exiting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::RecordingClipboard;
    use crate::features::form::state::TranslatePhase;
    use crate::features::history::storage::testing::ReadOnlyStore;
    use crate::translation::catalog::AUTO_DETECT;
    use mockito::{Matcher, Mock, Server};

    fn config(source: &str, target: &str) -> Config {
        Config {
            default_source_lang: source.to_string(),
            default_target_lang: target.to_string(),
            ..Config::default()
        }
    }

    fn app_with(server_url: &str, config: Config, clipboard: RecordingClipboard) -> App {
        let client =
            TranslationClient::new(format!("{server_url}/get"), Duration::from_secs(5)).unwrap();
        let history = HistoryStore::open(Box::new(MemoryStore::new()));
        App::with_parts(config, history, client, Box::new(clipboard))
    }

    /// App whose endpoint is never reached
    fn offline_app(config: Config, clipboard: RecordingClipboard) -> App {
        app_with("http://127.0.0.1:9", config, clipboard)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    async fn mock_translation(server: &mut Server, q: &str, langpair: &str, body: &str) -> Mock {
        server
            .mock("GET", "/get")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), q.into()),
                Matcher::UrlEncoded("langpair".into(), langpair.into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    fn status_text(app: &App) -> Option<(&str, StatusType)> {
        app.status_message
            .as_ref()
            .map(|m| (m.text.as_str(), m.message_type.clone()))
    }

    #[tokio::test]
    async fn test_translate_success_updates_target_and_history() {
        let mut server = Server::new_async().await;
        let mock = mock_translation(
            &mut server,
            "Hello",
            "en|es",
            r#"{"responseData":{"translatedText":"Hola"}}"#,
        )
        .await;

        let mut app = app_with(&server.url(), config("en", "es"), RecordingClipboard::default());
        type_text(&mut app, "Hello");
        app.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.form.phase(), TranslatePhase::Translating);
        assert_eq!(
            status_text(&app),
            Some(("Translating...", StatusType::Info))
        );
        assert!(!app.form.can_translate());

        app.wait_for_translation().await;

        mock.assert_async().await;
        assert_eq!(app.form.target_text(), "Hola");
        assert_eq!(app.form.phase(), TranslatePhase::Done);
        assert_eq!(status_text(&app), Some(("Done", StatusType::Success)));

        let records = app.history.log().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_text, "Hello");
        assert_eq!(records[0].translated_text, "Hola");
        assert_eq!(records[0].source_lang, "en");
        assert_eq!(records[0].target_lang, "es");
    }

    #[tokio::test]
    async fn test_trimmed_text_is_sent_and_recorded() {
        let mut server = Server::new_async().await;
        let mock = mock_translation(
            &mut server,
            "Good morning",
            "auto|fr",
            r#"{"responseData":{"translatedText":"Bonjour"}}"#,
        )
        .await;

        let mut app = app_with(
            &server.url(),
            config(AUTO_DETECT, "fr"),
            RecordingClipboard::default(),
        );
        app.handle_paste("  Good morning \r\n");
        app.dispatch_translation();
        app.wait_for_translation().await;

        mock.assert_async().await;
        assert_eq!(app.history.log().get(0).unwrap().source_text, "Good morning");
    }

    #[tokio::test]
    async fn test_same_language_never_calls_endpoint() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/get")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut app = app_with(&server.url(), config("en", "en"), RecordingClipboard::default());
        type_text(&mut app, "Hello");
        app.handle_key_event(key(KeyCode::Enter)).unwrap();

        mock.assert_async().await;
        assert_eq!(app.form.phase(), TranslatePhase::Idle);
        assert_eq!(
            status_text(&app),
            Some(("Pick different languages", StatusType::Error))
        );
        assert!(app.history.log().is_empty());
    }

    #[tokio::test]
    async fn test_empty_source_is_silent_noop() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/get")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut app = app_with(&server.url(), config("en", "es"), RecordingClipboard::default());
        type_text(&mut app, "   ");
        app.handle_key_event(key(KeyCode::Enter)).unwrap();

        mock.assert_async().await;
        assert_eq!(app.form.phase(), TranslatePhase::Idle);
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_missing_translation_leaves_target_unchanged() {
        let mut server = Server::new_async().await;
        let _mock = mock_translation(
            &mut server,
            "Hello",
            "en|es",
            r#"{"responseData":{},"responseStatus":200}"#,
        )
        .await;

        let mut app = app_with(&server.url(), config("en", "es"), RecordingClipboard::default());
        app.form.set_target_text("previous");
        type_text(&mut app, "Hello");
        app.dispatch_translation();
        app.wait_for_translation().await;

        assert_eq!(app.form.target_text(), "previous");
        assert_eq!(app.form.phase(), TranslatePhase::Failed);
        assert_eq!(
            status_text(&app),
            Some(("Translation failed", StatusType::Error))
        );
        assert!(app.history.log().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_reports_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/get")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let mut app = app_with(&server.url(), config("en", "de"), RecordingClipboard::default());
        type_text(&mut app, "Hello");
        app.dispatch_translation();
        app.wait_for_translation().await;

        assert_eq!(app.form.phase(), TranslatePhase::Failed);
        assert_eq!(app.form.target_text(), "");
        // A fresh attempt is allowed after a failure
        assert!(app.form.can_translate());
    }

    #[tokio::test]
    async fn test_unsaved_history_still_shows_translation() {
        let mut server = Server::new_async().await;
        let _mock = mock_translation(
            &mut server,
            "Hello",
            "en|es",
            r#"{"responseData":{"translatedText":"Hola"}}"#,
        )
        .await;

        let client =
            TranslationClient::new(format!("{}/get", server.url()), Duration::from_secs(5))
                .unwrap();
        let mut app = App::with_parts(
            config("en", "es"),
            HistoryStore::open(Box::new(ReadOnlyStore)),
            client,
            Box::new(RecordingClipboard::default()),
        );
        type_text(&mut app, "Hello");
        app.dispatch_translation();
        app.wait_for_translation().await;

        assert_eq!(app.form.target_text(), "Hola");
        assert_eq!(app.form.phase(), TranslatePhase::Done);
        assert_eq!(
            status_text(&app),
            Some(("Done, but history could not be saved", StatusType::Warning))
        );
        // Kept for this session even though the write failed
        assert_eq!(app.history.log().len(), 1);
    }

    #[tokio::test]
    async fn test_second_dispatch_ignored_while_in_flight() {
        let mut server = Server::new_async().await;
        let mock = mock_translation(
            &mut server,
            "Hello",
            "en|es",
            r#"{"responseData":{"translatedText":"Hola"}}"#,
        )
        .await;

        let mut app = app_with(&server.url(), config("en", "es"), RecordingClipboard::default());
        type_text(&mut app, "Hello");
        app.dispatch_translation();
        app.dispatch_translation();
        app.wait_for_translation().await;

        mock.assert_async().await;
        assert_eq!(app.history.log().len(), 1);
    }

    #[test]
    fn test_typing_past_limit_is_clamped() {
        let mut app = offline_app(config("en", "es"), RecordingClipboard::default());
        type_text(&mut app, &"a".repeat(600));

        assert_eq!(app.form.char_count(), 500);
        assert_eq!(app.form.char_count_label(), "500 / 500");
    }

    #[test]
    fn test_swap_exchanges_languages_and_text() {
        let mut app = offline_app(config("en", "es"), RecordingClipboard::default());
        type_text(&mut app, "Hello");
        app.form.set_target_text("Hola");

        app.handle_key_event(ctrl('s')).unwrap();

        assert_eq!(app.form.source_lang(), "es");
        assert_eq!(app.form.target_lang(), "en");
        assert_eq!(app.form.source_text(), "Hola");
        assert_eq!(app.form.target_text(), "");
        assert_eq!(
            status_text(&app),
            Some(("Languages swapped", StatusType::Info))
        );
    }

    #[test]
    fn test_copy_writes_translation() {
        let clipboard = RecordingClipboard::default();
        let mut app = offline_app(config("en", "es"), clipboard.clone());

        // Nothing to copy yet
        app.handle_key_event(ctrl('y')).unwrap();
        assert!(clipboard.written().is_empty());
        assert!(app.status_message.is_none());

        app.form.set_target_text(" \n ");
        app.handle_key_event(ctrl('y')).unwrap();
        assert!(clipboard.written().is_empty());

        app.form.set_target_text("  Hola \n");
        app.handle_key_event(ctrl('y')).unwrap();
        assert_eq!(clipboard.written(), vec!["Hola".to_string()]);
        assert_eq!(
            status_text(&app),
            Some(("Copied to clipboard", StatusType::Success))
        );
    }

    #[test]
    fn test_copy_refused_reports_blocked() {
        let mut app = offline_app(config("en", "es"), RecordingClipboard::refusing());
        app.form.set_target_text("Hola");
        app.copy_translation();

        assert_eq!(
            status_text(&app),
            Some(("Clipboard blocked", StatusType::Error))
        );
    }

    #[test]
    fn test_reuse_and_clear_history() {
        let mut app = offline_app(config(AUTO_DETECT, "es"), RecordingClipboard::default());
        for (source, translated) in [("one", "uno"), ("two", "dos")] {
            app.history
                .record(NewRecord {
                    source_text: source.to_string(),
                    translated_text: translated.to_string(),
                    source_lang: "en".to_string(),
                    target_lang: "es".to_string(),
                })
                .unwrap();
        }

        app.handle_key_event(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))
            .unwrap();
        assert_eq!(app.focus, Focus::History);
        app.handle_key_event(key(KeyCode::Down)).unwrap();
        app.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_history, 1);

        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.form.source_text(), "one");
        assert_eq!(app.form.target_text(), "uno");
        assert_eq!(app.form.source_lang(), "en");
        assert_eq!(
            status_text(&app),
            Some(("Reused from history", StatusType::Success))
        );

        app.handle_key_event(ctrl('l')).unwrap();
        assert!(app.history.log().is_empty());
        assert!(app.selected_record().is_none());
        assert_eq!(
            status_text(&app),
            Some(("History cleared", StatusType::Success))
        );
    }

    #[test]
    fn test_selectors_follow_focus() {
        let mut app = offline_app(config(AUTO_DETECT, "es"), RecordingClipboard::default());

        app.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::FromLang);
        app.handle_key_event(key(KeyCode::Right)).unwrap();
        assert_eq!(app.form.source_lang(), "en");

        app.handle_key_event(key(KeyCode::Tab)).unwrap();
        app.handle_key_event(key(KeyCode::Left)).unwrap();
        assert_eq!(app.form.target_lang(), "en");

        // Typing returns focus to the source pane
        app.handle_key_event(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.focus, Focus::Source);
        assert_eq!(app.form.source_text(), "x");
    }

    #[test]
    fn test_help_overlay_and_quit() {
        let mut app = offline_app(config("en", "es"), RecordingClipboard::default());

        app.handle_key_event(key(KeyCode::F(1))).unwrap();
        assert!(app.config.show_help);

        // Overlay swallows typing and Esc only closes it
        app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.form.source_text(), "");
        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(!app.config.show_help);
        assert!(!app.should_quit);

        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_theme_cycles_without_touching_disk() {
        let mut app = offline_app(config("en", "es"), RecordingClipboard::default());
        app.handle_key_event(ctrl('t')).unwrap();

        assert_eq!(app.config.theme_mode, ThemeMode::Light);
        assert_eq!(app.theme.text_primary, ModernTheme::light().text_primary);
        assert_eq!(status_text(&app), Some(("Theme: Light", StatusType::Success)));
    }

    #[test]
    fn test_status_expires() {
        let mut app = offline_app(config("en", "es"), RecordingClipboard::default());
        app.show_status("Done", StatusType::Success);

        app.update_status_message(Duration::from_secs(60));
        assert!(app.status_message.is_some());
        std::thread::sleep(Duration::from_millis(2));
        app.update_status_message(Duration::ZERO);
        assert!(app.status_message.is_none());
    }
}
