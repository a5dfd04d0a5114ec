use crate::internal::navigation::Page;
use crate::internal::ui::app::Action;
use crate::internal::ui::keybindings::{KeyBindingContext, KeyBindingMap};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Create default keybindings for the application
pub fn create_default_keybindings() -> KeyBindingMap {
    let mut map = KeyBindingMap::new();

    add_global_bindings(&mut map);
    add_list_bindings(&mut map);
    add_form_bindings(&mut map);

    map
}

fn add_global_bindings(map: &mut KeyBindingMap) {
    let ctx = KeyBindingContext::Global;

    map.add_binding(ctx, key('q'), Action::Quit);
    map.add_binding(ctx, with_ctrl('c'), Action::Quit);

    // Sidebar
    map.add_binding(ctx, key_code(KeyCode::Tab), Action::NextPage);
    map.add_binding(ctx, key_code(KeyCode::BackTab), Action::PrevPage);
    map.add_binding(
        ctx,
        KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
        Action::PrevPage,
    );
    map.add_binding(ctx, key('1'), Action::SelectPage(Page::Stories));
    map.add_binding(ctx, key('2'), Action::SelectPage(Page::Policies));
    map.add_binding(ctx, key('3'), Action::SelectPage(Page::Volunteers));
}

fn add_list_bindings(map: &mut KeyBindingMap) {
    let ctx = KeyBindingContext::List;

    map.add_binding(ctx, key('j'), Action::NavigateDown);
    map.add_binding(ctx, key('k'), Action::NavigateUp);
    map.add_binding(ctx, key_code(KeyCode::Down), Action::NavigateDown);
    map.add_binding(ctx, key_code(KeyCode::Up), Action::NavigateUp);

    map.add_binding(ctx, key('r'), Action::RefreshStories);
    map.add_binding(ctx, key('n'), Action::StartEditing);
    map.add_binding(ctx, key('i'), Action::StartEditing);
    map.add_binding(ctx, key_code(KeyCode::Enter), Action::StartEditing);
    map.add_binding(ctx, key('s'), Action::SubmitStory);
}

fn add_form_bindings(map: &mut KeyBindingMap) {
    let ctx = KeyBindingContext::Form;

    // No fallback to global here, so quit needs its own binding
    map.add_binding(ctx, with_ctrl('c'), Action::Quit);
    map.add_binding(ctx, key_code(KeyCode::Esc), Action::StopEditing);
    map.add_binding(ctx, key_code(KeyCode::Tab), Action::FocusNextField);
    map.add_binding(ctx, key_code(KeyCode::Down), Action::FocusNextField);
    map.add_binding(ctx, key_code(KeyCode::BackTab), Action::FocusPrevField);
    map.add_binding(
        ctx,
        KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
        Action::FocusPrevField,
    );
    map.add_binding(ctx, key_code(KeyCode::Up), Action::FocusPrevField);
    map.add_binding(ctx, with_ctrl('s'), Action::SubmitStory);
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty())
}

fn with_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}
