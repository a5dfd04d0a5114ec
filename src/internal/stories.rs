use crate::api::TransportError;
use crate::internal::models::StoryRecord;

pub const LOAD_FAILURE_MESSAGE: &str =
    "Could not fetch stories. Please ensure the backend is running.";
pub const EMPTY_LIST_MESSAGE: &str = "No success stories have been shared yet. Be the first!";

/// Identifies one `list()` invocation. Tags grow monotonically per list view.
pub type RequestTag = u64;

/// What the stories panel currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
    #[default]
    Loading,
    Loaded(Vec<StoryRecord>),
    Failed(String),
}

/// Fetched-list state for the stories page.
#[derive(Debug, Clone, Default)]
pub struct StoriesList {
    state: ListState,
    latest_tag: RequestTag,
    mounted: bool,
    /// Last loaded records, kept on screen while a reload is in flight.
    previous: Vec<StoryRecord>,
    /// Cursor into the loaded records.
    pub cursor: ratatui::widgets::ListState,
}

impl StoriesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Records to show: the loaded ones, or the previous ones while reloading.
    pub fn stories(&self) -> &[StoryRecord] {
        match &self.state {
            ListState::Loaded(stories) => stories,
            ListState::Loading => &self.previous,
            ListState::Failed(_) => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mount the page. Returns a tag when a load must be issued.
    pub fn mount(&mut self) -> Option<RequestTag> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(self.begin_load())
    }

    /// Drop everything shown. The tag counter survives so responses still in
    /// flight from the old mount are discarded.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        tracing::debug!(latest = self.latest_tag, "stories page unmounted");
        self.mounted = false;
        self.state = ListState::Loading;
        self.previous.clear();
        self.cursor.select(None);
    }

    /// Enter `Loading` and issue a new request tag.
    pub fn begin_load(&mut self) -> RequestTag {
        self.latest_tag += 1;
        if let ListState::Loaded(stories) = std::mem::take(&mut self.state) {
            self.previous = stories;
        }
        self.state = ListState::Loading;
        tracing::debug!(tag = self.latest_tag, "stories load started");
        self.latest_tag
    }

    /// Re-enter `Loading`; used after a story was created.
    pub fn refresh(&mut self) -> RequestTag {
        self.begin_load()
    }

    /// Fold a `list()` outcome in. Responses for anything but the newest tag
    /// are discarded. Returns whether the result was applied.
    pub fn finish_load(
        &mut self,
        tag: RequestTag,
        result: Result<Vec<StoryRecord>, TransportError>,
    ) -> bool {
        if tag != self.latest_tag {
            tracing::debug!(tag, latest = self.latest_tag, "dropping stale stories response");
            return false;
        }

        match result {
            Ok(stories) => {
                tracing::info!(count = stories.len(), "stories loaded");
                let select = match stories.is_empty() {
                    true => None,
                    false => Some(0),
                };
                self.previous.clear();
                self.state = ListState::Loaded(stories);
                self.cursor.select(select);
            }
            Err(e) => {
                tracing::error!(error = %e, "loading stories failed");
                self.previous.clear();
                self.state = ListState::Failed(LOAD_FAILURE_MESSAGE.to_string());
                self.cursor.select(None);
            }
        }
        true
    }

    pub fn select_next(&mut self) {
        let len = self.stories().len();
        if len == 0 {
            return;
        }
        let next = match self.cursor.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.cursor.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.stories().is_empty() {
            return;
        }
        let prev = self.cursor.selected().map_or(0, |i| i.saturating_sub(1));
        self.cursor.select(Some(prev));
    }
}
