use proptest::prelude::*;
use saral_tui::config::AppConfig;
use saral_tui::internal::form::{FormState, StoryForm};
use saral_tui::internal::models::{DraftField, StoryRecord};
use saral_tui::internal::ui::view::story_card_lines;
use saral_tui::utils::datetime::format_story_date;
use saral_tui::utils::theme::TuiTheme;
use strum::IntoEnumIterator;

proptest! {
    #[test]
    fn test_story_card_no_panic(content in "\\PC*", width in 0u16..200) {
        let story = StoryRecord {
            title: "t".to_string(),
            content,
            author: "a".to_string(),
            ..Default::default()
        };
        let lines = story_card_lines(&story, width, &TuiTheme::default());
        // title, meta and trailing spacer at minimum
        prop_assert!(lines.len() >= 3);
    }

    #[test]
    fn test_edit_order_does_not_matter(
        title in "[a-z]{0,8}",
        content in "[a-z]{0,8}",
        author in "[a-z]{0,8}",
        location in "[a-z]{0,8}",
        reverse in any::<bool>(),
    ) {
        let values = [
            (DraftField::Title, title.clone()),
            (DraftField::Content, content.clone()),
            (DraftField::Author, author.clone()),
            (DraftField::Location, location.clone()),
        ];
        let mut form = StoryForm::new();
        let ordered: Vec<_> = match reverse {
            true => values.iter().rev().collect(),
            false => values.iter().collect(),
        };
        for (field, value) in ordered {
            form.set_field(*field, value.clone());
        }

        prop_assert_eq!(&form.draft().title, &title);
        prop_assert_eq!(&form.draft().content, &content);
        prop_assert_eq!(&form.draft().author, &author);
        prop_assert_eq!(&form.draft().location, &location);
    }

    #[test]
    fn test_empty_required_field_blocks_submit(
        blank in 0usize..3,
        location in "[a-z ]{0,8}",
    ) {
        let mut form = StoryForm::new();
        for field in [DraftField::Title, DraftField::Content, DraftField::Author] {
            form.set_field(field, "filled");
        }
        form.set_field(DraftField::Location, location);
        let field = DraftField::iter()
            .filter(|f| f.is_required())
            .nth(blank)
            .unwrap();
        form.set_field(field, "");

        prop_assert!(form.begin_submit().is_none());
        prop_assert_eq!(form.state(), &FormState::Idle);
    }

    #[test]
    fn test_format_story_date_no_panic(s in "\\PC*") {
        let _ = format_story_date(&s);
    }

    #[test]
    fn test_config_parsing_resilience(s in "\\PC*") {
        // Fuzz the config loader with random strings
        let _ = ron::from_str::<AppConfig>(&s);
    }
}
