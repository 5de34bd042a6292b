use fleetdesk::app::action::Action;
use fleetdesk::app::command::Command;
use fleetdesk::app::palette::RemoteResults;
use fleetdesk::app::reducer;
use fleetdesk::app::state::{AppMode, AppState};
use fleetdesk::app::ui;
use fleetdesk::domain::models::{CustomerSummary, Role};
use ratatui::{backend::TestBackend, Terminal};

fn sweep(app_state: &mut AppState) {
    for width in 0..100 {
        for height in 0..50 {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            let _ = terminal.draw(|f| {
                ui::draw(f, app_state);
            });
        }
    }
}

/// Types `query` and settles it immediately, returning the search command.
fn type_query(app_state: &mut AppState, query: &str) -> Option<Command> {
    let mut generation = None;
    for c in query.chars() {
        if let Some(Command::Debounce(ticket)) =
            reducer::update(app_state, Action::PaletteInsert(c))
        {
            generation = Some(ticket.generation);
        }
    }
    reducer::update(app_state, Action::PaletteQuerySettled(generation?))
}

fn main() {
    let mut app_state = AppState::default();
    app_state.session.set_role(Role::Admin);

    // Normal and help
    for mode in [AppMode::Normal, AppMode::Help] {
        app_state.mode = mode;
        sweep(&mut app_state);
    }
    app_state.mode = AppMode::Normal;

    // Palette with the full static index
    reducer::update(&mut app_state, Action::OpenPalette);
    sweep(&mut app_state);

    // Palette with a query and no results
    type_query(&mut app_state, "zzzz");
    sweep(&mut app_state);

    // Palette with a long remote result list
    reducer::update(&mut app_state, Action::PaletteClearQuery);
    if let Some(Command::SearchDirectory(request)) = type_query(&mut app_state, "customer") {
        let results = RemoteResults {
            customers: (0..40)
                .map(|i| CustomerSummary {
                    id: format!("c-{i}"),
                    name: format!("Customer with a rather long display name number {i}"),
                    email: Some(format!("customer{i}@example.test")),
                    phone: None,
                })
                .collect(),
            devices: Vec::new(),
        };
        reducer::update(
            &mut app_state,
            Action::PaletteRemoteLoaded(request.cycle, Box::new(results)),
        );
        for _ in 0..30 {
            reducer::update(&mut app_state, Action::PaletteNext);
        }
    }
    sweep(&mut app_state);

    // Also test with an error message
    reducer::update(&mut app_state, Action::ClosePalette);
    app_state.last_error = Some(
        "Test error message that might be long and cause issues if not handled correctly by the layout engine.".to_string(),
    );
    sweep(&mut app_state);

    println!("Layout verification completed successfully!");
}
