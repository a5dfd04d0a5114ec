use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::api::{StoriesClient, TransportError};
use crate::config::AppConfig;
use crate::internal::form::StoryForm;
use crate::internal::models::{DraftField, StoryRecord};
use crate::internal::navigation::{Navigation, Page};
use crate::internal::splash::Splash;
use crate::internal::stories::{RequestTag, StoriesList};
use crate::internal::ui::keybindings::{KeyBindingContext, KeyBindingMap};
use crate::utils::theme::TuiTheme;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Input modes for the UI.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    /// Keys go to the focused form field.
    Editing,
}

/// Actions/messages sent through the app action channel.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    SelectPage(Page),
    NavigateUp,
    NavigateDown,
    RefreshStories,
    StoriesLoaded(RequestTag, Result<Vec<StoryRecord>, TransportError>),
    SubmitStory,
    StorySubmitted(Result<StoryRecord, TransportError>),
    StartEditing,
    StopEditing,
    FocusNextField,
    FocusPrevField,
}

impl Action {
    /// Resolve an action name used in the `keybindings` config section.
    ///
    /// Pages are written as `SelectPage:policies`; unknown page names fall
    /// back to the stories page like any other page selection.
    pub fn from_config_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(page) = name.strip_prefix("SelectPage:") {
            return Some(Action::SelectPage(Page::from_name(page)));
        }

        match name {
            "Quit" => Some(Action::Quit),
            "NextPage" => Some(Action::NextPage),
            "PrevPage" => Some(Action::PrevPage),
            "NavigateUp" => Some(Action::NavigateUp),
            "NavigateDown" => Some(Action::NavigateDown),
            "RefreshStories" => Some(Action::RefreshStories),
            "SubmitStory" => Some(Action::SubmitStory),
            "StartEditing" => Some(Action::StartEditing),
            "StopEditing" => Some(Action::StopEditing),
            "FocusNextField" => Some(Action::FocusNextField),
            "FocusPrevField" => Some(Action::FocusPrevField),
            _ => None,
        }
    }
}

/// Application shell: splash, navigation and the stories page.
pub struct App {
    pub running: bool,
    pub app_version: String,
    pub config: AppConfig,
    pub theme: TuiTheme,
    pub client: Arc<StoriesClient>,
    pub navigation: Navigation,
    pub splash: Splash,
    pub form: StoryForm,
    pub stories: StoriesList,
    pub input_mode: InputMode,
    pub keybindings: KeyBindingMap,
    pub spinner_state: usize,
    pub last_spinner_update: Option<tokio::time::Instant>,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(AppConfig::load())
    }

    #[tracing::instrument(skip(config))]
    pub fn with_config(config: AppConfig) -> Self {
        let start = Instant::now();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let client = Arc::new(StoriesClient::new(config.network.base_url.clone()));

        tracing::info!("Stories backend: {}", client.base_url());

        let mut keybindings =
            crate::internal::ui::keybindings_default::create_default_keybindings();
        if let Some(custom_bindings) = &config.keybindings {
            keybindings.merge_config(custom_bindings);
        }

        let theme = TuiTheme::from_config(&config.theme);
        let splash = Splash::new(Duration::from_millis(config.ui.splash_duration_ms));

        tracing::info!(elapsed = ?start.elapsed(), "App initialized");

        Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            theme,
            client,
            navigation: Navigation::new(),
            splash,
            form: StoryForm::new(),
            stories: StoriesList::new(),
            input_mode: InputMode::Normal,
            keybindings,
            spinner_state: 0,
            last_spinner_update: None,
            action_tx,
            action_rx,
        }
    }

    pub fn splash_visible(&self) -> bool {
        !self.splash.is_finished(Instant::now())
    }

    pub fn get_spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_state % SPINNER_FRAMES.len()]
    }

    /// Short description of the in-flight work, if any.
    pub fn loading_description(&self) -> Option<String> {
        match (self.stories.is_loading(), self.form.is_submitting()) {
            (_, true) => Some("Submitting...".to_string()),
            (true, false) => Some("Loading stories...".to_string()),
            (false, false) => None,
        }
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        let mut event_interval = tokio::time::interval(Duration::from_millis(16));

        loop {
            // Update spinner animation every 100ms
            let now = tokio::time::Instant::now();
            match self.last_spinner_update {
                Some(last_update) => {
                    if now.duration_since(last_update).as_millis() >= 100 {
                        self.spinner_state = self.spinner_state.wrapping_add(1);
                        self.last_spinner_update = Some(now);
                    }
                }
                None => {
                    self.last_spinner_update = Some(now);
                }
            }

            // Pages mount once the splash is gone
            self.ensure_page_mounted();

            tui.draw(|f| crate::internal::ui::view::draw(self, f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    if event::poll(Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                            && key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                            }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    /// Issue the first stories load when the stories page becomes visible.
    pub fn ensure_page_mounted(&mut self) {
        if self.splash_visible() || self.navigation.current() != Page::Stories {
            return;
        }
        if let Some(tag) = self.stories.mount() {
            self.spawn_list(tag);
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.splash_visible() {
            self.splash.skip();
            self.ensure_page_mounted();
            return;
        }

        let context = match (self.input_mode, self.navigation.current()) {
            (InputMode::Editing, _) => KeyBindingContext::Form,
            (InputMode::Normal, Page::Stories) => KeyBindingContext::List,
            (InputMode::Normal, _) => KeyBindingContext::Global,
        };

        if let Some(action) = self.keybindings.get_action(&key, context) {
            let _ = self.action_tx.send(action);
            return;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_form_input(key);
        }
    }

    fn handle_form_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.form.push_char(c);
            }
            KeyCode::Backspace => self.form.pop_char(),
            KeyCode::Enter => match self.form.focused() {
                Some(DraftField::Content) => self.form.push_char('\n'),
                Some(DraftField::Location) => {
                    let _ = self.action_tx.send(Action::SubmitStory);
                }
                _ => self.form.focus_next(),
            },
            _ => {}
        }
    }

    #[tracing::instrument(skip(self, action))]
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NextPage => {
                self.navigation.next();
                self.on_page_changed();
            }
            Action::PrevPage => {
                self.navigation.prev();
                self.on_page_changed();
            }
            Action::SelectPage(page) => {
                self.navigation.select(page);
                self.on_page_changed();
            }
            Action::NavigateUp => self.stories.select_prev(),
            Action::NavigateDown => self.stories.select_next(),
            Action::RefreshStories => self.refresh_stories(),
            Action::StoriesLoaded(tag, result) => {
                self.stories.finish_load(tag, result);
            }
            Action::SubmitStory => {
                if let Some(draft) = self.form.begin_submit() {
                    let client = self.client.clone();
                    let tx = self.action_tx.clone();
                    tokio::spawn(async move {
                        let result = client.create(&draft).await;
                        let _ = tx.send(Action::StorySubmitted(result));
                    });
                }
            }
            Action::StorySubmitted(result) => {
                if self.form.finish_submit(result) {
                    self.refresh_stories();
                }
            }
            Action::StartEditing => {
                if self.navigation.current() == Page::Stories {
                    self.input_mode = InputMode::Editing;
                    if self.form.focused().is_none() {
                        self.form.focus(DraftField::Title);
                    }
                }
            }
            Action::StopEditing => {
                self.input_mode = InputMode::Normal;
                self.form.blur();
            }
            Action::FocusNextField => self.form.focus_next(),
            Action::FocusPrevField => self.form.focus_prev(),
        }
    }

    /// Leaving the stories page unmounts it: the draft is thrown away and the
    /// list is fetched again on the next visit.
    fn on_page_changed(&mut self) {
        tracing::debug!(page = %self.navigation.current(), "page selected");
        if self.navigation.current() != Page::Stories {
            self.input_mode = InputMode::Normal;
            if self.stories.is_mounted() {
                self.form.reset();
                self.stories.unmount();
            }
        }
        self.ensure_page_mounted();
    }

    fn refresh_stories(&mut self) {
        let tag = self.stories.refresh();
        self.spawn_list(tag);
    }

    fn spawn_list(&self, tag: RequestTag) {
        let client = self.client.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = client.list().await;
            let _ = tx.send(Action::StoriesLoaded(tag, result));
        });
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
