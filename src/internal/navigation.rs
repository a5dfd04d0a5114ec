use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The three top-level pages of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Page {
    #[default]
    Stories,
    Policies,
    Volunteers,
}

impl Page {
    /// Parse a page name. Anything unknown falls back to `Stories`.
    pub fn from_name(name: &str) -> Self {
        name.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(name, "unknown page, falling back to stories");
            Page::Stories
        })
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Stories => "Success Stories",
            Page::Policies => "Policy Simplifier",
            Page::Volunteers => "Volunteer Hub",
        }
    }
}

/// Which page is active. Starts on `Stories`, changes only via `select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation {
    current: Page,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn select(&mut self, page: Page) {
        self.current = page;
    }

    pub fn select_name(&mut self, name: &str) {
        self.select(Page::from_name(name));
    }

    pub fn next(&mut self) {
        let pages: Vec<Page> = Page::iter().collect();
        let idx = pages.iter().position(|p| *p == self.current).unwrap_or(0);
        self.current = pages[(idx + 1) % pages.len()];
    }

    pub fn prev(&mut self) {
        let pages: Vec<Page> = Page::iter().collect();
        let idx = pages.iter().position(|p| *p == self.current).unwrap_or(0);
        self.current = pages[(idx + pages.len() - 1) % pages.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stories() {
        assert_eq!(Navigation::new().current(), Page::Stories);
    }

    #[test]
    fn test_unknown_name_falls_back_to_stories() {
        let mut nav = Navigation::new();
        nav.select_name("policies");
        assert_eq!(nav.current(), Page::Policies);

        nav.select_name("unknown");
        assert_eq!(nav.current(), Page::Stories);
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut nav = Navigation::new();
        nav.select(Page::Volunteers);
        nav.select(Page::Volunteers);
        assert_eq!(nav.current(), Page::Volunteers);
    }

    #[test]
    fn test_names_round_trip() {
        for page in Page::iter() {
            assert_eq!(Page::from_name(&page.to_string()), page);
        }
        assert_eq!(Page::from_name("Volunteers"), Page::Volunteers);
    }

    #[test]
    fn test_cycling_wraps() {
        let mut nav = Navigation::new();
        nav.prev();
        assert_eq!(nav.current(), Page::Volunteers);
        nav.next();
        nav.next();
        assert_eq!(nav.current(), Page::Policies);
    }

    #[test]
    fn test_page_order() {
        insta::assert_debug_snapshot!(Page::iter().collect::<Vec<_>>(), @r"
        [
            Stories,
            Policies,
            Volunteers,
        ]
        ");
    }
}
