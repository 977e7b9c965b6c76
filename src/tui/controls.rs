//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Right => app.step_outdoor(1.0),
        KeyCode::Left => app.step_outdoor(-1.0),
        KeyCode::Up => app.step_units(1),
        KeyCode::Down => app.step_units(-1),
        KeyCode::PageUp => app.page_units(1),
        KeyCode::PageDown => app.page_units(-1),
        KeyCode::Char('r') => app.reset(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::model::{LinearModel, RegressionModel, StandardScaler};
    use crate::predict::PredictionService;

    fn make_app() -> App {
        let model = RegressionModel::Linear(LinearModel::new(vec![10.0, -67.5, 0.0], 3000.0));
        let service = PredictionService::new(StandardScaler::identity(3), model);
        App::new(service, DashboardConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrows_adjust_inputs() {
        let mut app = make_app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.outdoor, 35.5);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.outdoor, 34.5);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.units, 1100);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.units, 11_100);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.units, 11_000);
    }

    #[test]
    fn quit_keys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.quit);

        let mut app = make_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.quit);

        let mut app = make_app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.quit);
    }

    #[test]
    fn plain_c_does_not_quit() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('c'));
        assert!(!app.quit);
    }
}
