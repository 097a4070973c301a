use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen, HOME_ENTRIES};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.kitchen_report`(...) for today
    LoadKitchenReport,
    /// Run `service.label_sheet`(...) for today
    LoadLabelSheet,
    /// Run `service.routes`()
    LoadRoutes,
    /// Run `service.route_sheet`(...) for the currently selected route
    LoadRouteSheetForCurrentRoute,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Enter, Esc, Left, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::Home => match key.code {
            Up | Char('k') => {
                if app.home_index > 0 {
                    app.home_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.home_index + 1 < HOME_ENTRIES.len() {
                    app.home_index += 1;
                }
            }
            Enter | Char(' ') => {
                action = match app.home_index {
                    0 => {
                        app.screen = Screen::KitchenCount;
                        Action::LoadKitchenReport
                    }
                    1 => {
                        app.screen = Screen::Labels;
                        Action::LoadLabelSheet
                    }
                    _ => {
                        app.screen = Screen::RouteSelect;
                        Action::LoadRoutes
                    }
                };
            }
            _ => {}
        },

        Screen::KitchenCount | Screen::Labels => match key.code {
            Left | Esc | Char('b') => {
                app.screen = Screen::Home;
            }
            _ => {}
        },

        Screen::RouteSelect => match key.code {
            Up | Char('k') => {
                if app.route_index > 0 {
                    app.route_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.route_index + 1 < app.routes.len() {
                    app.route_index += 1;
                }
            }
            Enter | Char(' ') => {
                action = Action::LoadRouteSheetForCurrentRoute;
            }
            Left | Esc | Char('b') => {
                app.screen = Screen::Home;
            }
            _ => {}
        },

        Screen::RouteSheet => match key.code {
            Left | Esc | Char('b') => {
                app.screen = Screen::RouteSelect;
                app.sheet = None;
            }
            _ => {}
        },
    }
    action
}
