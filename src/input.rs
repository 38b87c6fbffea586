use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SelectUp,
    SelectDown,
    StepUp,       // → / l / +: increase the selected stepper
    StepDown,     // ← / h / -: decrease the selected stepper
    Generate,     // g: write files with the current count/size
    DeleteOne,    // d: delete a single entry
    DeleteAll,    // D: ask, then delete every entry
    Confirm,      // y / Enter in the delete-all prompt
    Back,         // Esc / n: dismiss prompt or popup
    Refresh,      // r: re-read disk figures now
    CycleTheme,
    ShowHelp,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Navigation — arrow keys and vim hjkl
        (KeyCode::Up,   _) | (KeyCode::Char('k'), _) => Action::SelectUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::SelectDown,

        (KeyCode::Right, _) | (KeyCode::Char('l'), _)
        | (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => Action::StepUp,
        (KeyCode::Left,  _) | (KeyCode::Char('h'), _)
        | (KeyCode::Char('-'), _) => Action::StepDown,

        (KeyCode::Char('g'), _) => Action::Generate,
        (KeyCode::Char('d'), _) => Action::DeleteOne,
        (KeyCode::Char('D'), _) => Action::DeleteAll,

        (KeyCode::Char('y'), _) | (KeyCode::Char('Y'), _)
        | (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Esc, _) | (KeyCode::Char('n'), _) => Action::Back,

        (KeyCode::Char('r'), _) => Action::Refresh,
        (KeyCode::Char('t'), _) => Action::CycleTheme,
        (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => Action::ShowHelp,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
        assert_eq!(handle_key(key(KeyCode::Char('c'))), Action::None);
    }

    #[test]
    fn delete_one_and_all_are_distinct() {
        assert_eq!(handle_key(key(KeyCode::Char('d'))), Action::DeleteOne);
        assert_eq!(handle_key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)), Action::DeleteAll);
    }

    #[test]
    fn steppers_accept_arrows_and_signs() {
        assert_eq!(handle_key(key(KeyCode::Right)), Action::StepUp);
        assert_eq!(handle_key(key(KeyCode::Char('+'))), Action::StepUp);
        assert_eq!(handle_key(key(KeyCode::Left)), Action::StepDown);
        assert_eq!(handle_key(key(KeyCode::Char('-'))), Action::StepDown);
    }
}
