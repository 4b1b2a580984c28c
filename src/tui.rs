use crate::view::ui;
use crate::wizard::{Action, Flow, KeyContext, Wizard};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use tracing::debug;

pub fn run_tui(wizard: &mut Wizard) -> Result<()> {
    // Initialize TUI.
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, wizard);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    terminal.show_cursor()?;

    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, wizard: &mut Wizard) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, wizard))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(action) = action_from_key(wizard.context(), key) else {
                    continue;
                };
                debug!(?action, step = ?wizard.step(), "key");
                if wizard.handle(action) == Flow::Exit {
                    break;
                }
            }
            // Anything else, resize included, just redraws.
            _ => {}
        }
    }

    Ok(())
}

/// Decodes a key press for the screen currently shown.
pub fn action_from_key(context: KeyContext, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match context {
        KeyContext::Finish => Some(Action::Submit),
        KeyContext::Menu => match key.code {
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Enter => Some(Action::Submit),
            _ => None,
        },
        KeyContext::Confirm => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Char('s') if ctrl => Some(Action::Save),
            KeyCode::Esc => Some(Action::Back),
            _ => None,
        },
        KeyContext::Manage => match key.code {
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Char('n') if !ctrl && !alt => Some(Action::NewEntry),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Delete => Some(Action::DeleteItem),
            KeyCode::Tab => Some(Action::Continue),
            KeyCode::PageDown => Some(Action::Skip),
            KeyCode::Char('s') if ctrl => Some(Action::Save),
            KeyCode::Esc => Some(Action::Back),
            _ => None,
        },
        KeyContext::List => match key.code {
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Char('n') if ctrl => Some(Action::AddItem),
            KeyCode::Delete => Some(Action::DeleteItem),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::BackTab => Some(Action::PrevField),
            KeyCode::PageDown => Some(Action::Skip),
            KeyCode::Char('s') if ctrl => Some(Action::Save),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) if !ctrl && !alt => Some(Action::Input(c)),
            _ => None,
        },
        KeyContext::Form => match key.code {
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::BackTab => Some(Action::PrevField),
            KeyCode::Enter if alt => Some(Action::Newline),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Char('j') if ctrl => Some(Action::Newline),
            KeyCode::Char('s') if ctrl => Some(Action::Save),
            KeyCode::PageDown => Some(Action::Skip),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) if !ctrl && !alt => Some(Action::Input(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        for context in [
            KeyContext::Menu,
            KeyContext::Form,
            KeyContext::List,
            KeyContext::Manage,
            KeyContext::Confirm,
            KeyContext::Finish,
        ] {
            assert_eq!(
                action_from_key(
                    context,
                    key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL)
                ),
                Some(Action::Quit),
                "{context:?}"
            );
        }
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = key_event(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(action_from_key(KeyContext::Form, key), None);
    }

    #[test]
    fn form_keys_edit_navigate_and_commit() {
        assert_eq!(
            action_from_key(KeyContext::Form, key_event(KeyCode::Char('n'))),
            Some(Action::Input('n'))
        );
        assert_eq!(
            action_from_key(KeyContext::Form, key_event(KeyCode::Tab)),
            Some(Action::NextField)
        );
        assert_eq!(
            action_from_key(KeyContext::Form, key_event(KeyCode::BackTab)),
            Some(Action::PrevField)
        );
        assert_eq!(
            action_from_key(KeyContext::Form, key_event(KeyCode::Enter)),
            Some(Action::Submit)
        );
        assert_eq!(
            action_from_key(
                KeyContext::Form,
                key_event_with_modifiers(KeyCode::Enter, KeyModifiers::ALT)
            ),
            Some(Action::Newline)
        );
        assert_eq!(
            action_from_key(
                KeyContext::Form,
                key_event_with_modifiers(KeyCode::Char('j'), KeyModifiers::CONTROL)
            ),
            Some(Action::Newline)
        );
        assert_eq!(
            action_from_key(
                KeyContext::Form,
                key_event_with_modifiers(KeyCode::Char('s'), KeyModifiers::CONTROL)
            ),
            Some(Action::Save)
        );
        assert_eq!(
            action_from_key(KeyContext::Form, key_event(KeyCode::PageDown)),
            Some(Action::Skip)
        );
        assert_eq!(
            action_from_key(KeyContext::Form, key_event(KeyCode::Esc)),
            Some(Action::Back)
        );
        assert_eq!(
            action_from_key(
                KeyContext::Form,
                key_event_with_modifiers(KeyCode::Char('A'), KeyModifiers::SHIFT)
            ),
            Some(Action::Input('A'))
        );
    }

    #[test]
    fn list_keys_add_and_delete_items() {
        assert_eq!(
            action_from_key(
                KeyContext::List,
                key_event_with_modifiers(KeyCode::Char('n'), KeyModifiers::CONTROL)
            ),
            Some(Action::AddItem)
        );
        assert_eq!(
            action_from_key(KeyContext::List, key_event(KeyCode::Delete)),
            Some(Action::DeleteItem)
        );
        assert_eq!(
            action_from_key(KeyContext::List, key_event(KeyCode::Char('n'))),
            Some(Action::Input('n'))
        );
    }

    #[test]
    fn management_keys_map_to_collection_actions() {
        assert_eq!(
            action_from_key(KeyContext::Manage, key_event(KeyCode::Char('n'))),
            Some(Action::NewEntry)
        );
        assert_eq!(
            action_from_key(KeyContext::Manage, key_event(KeyCode::Tab)),
            Some(Action::Continue)
        );
        assert_eq!(
            action_from_key(KeyContext::Manage, key_event(KeyCode::Char('x'))),
            None
        );
    }

    #[test]
    fn finish_accepts_any_key() {
        assert_eq!(
            action_from_key(KeyContext::Finish, key_event(KeyCode::Char('x'))),
            Some(Action::Submit)
        );
        assert_eq!(
            action_from_key(KeyContext::Menu, key_event(KeyCode::Char('x'))),
            None
        );
    }
}
