use blockfall_engine::Action;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// What a key press asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub(crate) enum Command {
    Game(Action),
    Quit,
}

/// Maps a terminal event to a command.
///
/// Only key presses count; repeats and releases reported by terminals with the
/// keyboard enhancement protocol are dropped.
pub(crate) fn translate(event: &Event) -> Option<Command> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Left => Action::Left.into(),
        KeyCode::Right => Action::Right.into(),
        KeyCode::Down => Action::SoftDrop.into(),
        KeyCode::Up => Action::Rotate.into(),
        KeyCode::Char(' ') => Action::HardDrop.into(),
        KeyCode::Char('p' | 'P') => Action::TogglePause.into(),
        KeyCode::Char('r' | 'R') => Action::Reset.into(),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyEventState};

    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_key_map() {
        let cases = [
            (KeyCode::Left, Command::Game(Action::Left)),
            (KeyCode::Right, Command::Game(Action::Right)),
            (KeyCode::Down, Command::Game(Action::SoftDrop)),
            (KeyCode::Up, Command::Game(Action::Rotate)),
            (KeyCode::Char(' '), Command::Game(Action::HardDrop)),
            (KeyCode::Char('p'), Command::Game(Action::TogglePause)),
            (KeyCode::Char('P'), Command::Game(Action::TogglePause)),
            (KeyCode::Char('r'), Command::Game(Action::Reset)),
            (KeyCode::Char('q'), Command::Quit),
            (KeyCode::Esc, Command::Quit),
        ];
        for (code, expected) in cases {
            assert_eq!(translate(&press(code)), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(translate(&press(KeyCode::Char('z'))), None);
        assert_eq!(translate(&press(KeyCode::Enter)), None);
        assert_eq!(translate(&Event::Resize(80, 24)), None);
        assert_eq!(translate(&Event::FocusLost), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&event), Some(Command::Quit));
        assert_eq!(translate(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_release_and_repeat_ignored() {
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let event = Event::Key(KeyEvent::new_with_kind_and_state(
                KeyCode::Left,
                KeyModifiers::NONE,
                kind,
                KeyEventState::NONE,
            ));
            assert_eq!(translate(&event), None, "{kind:?}");
        }
    }
}
