use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};

use nouki_alert::api::{ApiClient, ApiOutcome};
use nouki_alert::config::{self, Config};
use nouki_alert::directory::TantoshaDirectory;
use nouki_alert::models::STATUS_OPTIONS;
use nouki_alert::ui::{
    anken_list::{handle_input as handle_anken_list_input, render_anken_list, AnkenListAction, AnkenListState},
    anken_wizard::{handle_input as handle_anken_wizard_input, render_anken_wizard, AnkenWizardAction, AnkenWizardState},
    components::select_input::{Leading, SelectInputState},
    dashboard::{handle_input as handle_dashboard_input, render_dashboard, DashboardAction, DashboardState},
    tantosha_list::{handle_input as handle_tantosha_list_input, render_tantosha_list, TantoshaListAction, TantoshaListState},
    tantosha_wizard::{handle_input as handle_tantosha_wizard_input, render_tantosha_wizard, TantoshaWizardAction, TantoshaWizardState},
    toast::{self, render_toast, Toast, ToastReceiver, ToastState},
    Page,
};

// Represents the current screen in the app
enum AppScreen {
    Dashboard,
    AnkenList,
    AnkenWizard,
    TantoshaList,
    TantoshaWizard,
}

// Main application state
struct AppState {
    config: Config,
    api: ApiClient,
    directory: TantoshaDirectory,
    toasts: ToastState,
    toast_rx: ToastReceiver,
    screen: AppScreen,
    dashboard_state: Option<DashboardState>,
    anken_list_state: Option<AnkenListState>,
    anken_wizard_state: Option<AnkenWizardState>,
    tantosha_list_state: Option<TantoshaListState>,
    tantosha_wizard_state: Option<TantoshaWizardState>,
}

impl AppState {
    fn new(config: Config, api: ApiClient, toast_rx: ToastReceiver) -> Self {
        Self {
            config,
            api,
            directory: TantoshaDirectory::new(),
            toasts: ToastState::new(),
            toast_rx,
            screen: AppScreen::Dashboard,
            dashboard_state: None,
            anken_list_state: None,
            anken_wizard_state: None,
            tantosha_list_state: None,
            tantosha_wizard_state: None,
        }
    }

    /// Move toasts queued by the API client onto the screen.
    fn drain_toasts(&mut self) {
        while let Ok(toast) = self.toast_rx.try_recv() {
            self.toasts.show(toast);
        }
    }
}

/// The terminal owns stdout, so logs go to a file when one is configured
/// and nowhere otherwise.
fn init_logging(config: &Config) -> Result<()> {
    if let Some(path) = &config.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::init()?;
    init_logging(&config)?;

    let (toast_tx, toast_rx) = toast::channel();
    let api = ApiClient::new(config.api_url(), toast_tx)?;

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(config, api, toast_rx);

    // Assignee snapshot first so the selectors have options, then the
    // dashboard.
    load_tantosha_snapshot(&mut app_state).await;
    load_dashboard_screen(&mut app_state).await;

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        println!("Error: {}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        app_state.drain_toasts();
        app_state.toasts.tick();

        // Render current screen
        terminal.draw(|f| {
            match app_state.screen {
                AppScreen::Dashboard => {
                    if let Some(state) = &mut app_state.dashboard_state {
                        render_dashboard(f, state);
                    }
                }
                AppScreen::AnkenList => {
                    if let Some(state) = &mut app_state.anken_list_state {
                        render_anken_list(f, state);
                    }
                }
                AppScreen::AnkenWizard => {
                    if let Some(state) = &mut app_state.anken_wizard_state {
                        render_anken_wizard(f, state);
                    }
                }
                AppScreen::TantoshaList => {
                    if let Some(state) = &mut app_state.tantosha_list_state {
                        render_tantosha_list(f, state);
                    }
                }
                AppScreen::TantoshaWizard => {
                    if let Some(state) = &mut app_state.tantosha_wizard_state {
                        render_tantosha_wizard(f, state);
                    }
                }
            }

            // Toast status line over the bottom row
            let size = f.size();
            if size.height > 0 {
                let toast_area = Rect::new(0, size.height - 1, size.width, 1);
                render_toast(f, &app_state.toasts, toast_area);
            }
        })?;

        // Handle input for current screen
        let should_quit = match app_state.screen {
            AppScreen::Dashboard => handle_dashboard_screen(app_state).await?,
            AppScreen::AnkenList => handle_anken_list_screen(app_state).await?,
            AppScreen::AnkenWizard => handle_anken_wizard_screen(app_state).await?,
            AppScreen::TantoshaList => handle_tantosha_list_screen(app_state).await?,
            AppScreen::TantoshaWizard => handle_tantosha_wizard_screen(app_state).await?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

async fn goto_page(app_state: &mut AppState, page: Page) {
    debug!(?page, "navigate");
    match page {
        Page::Dashboard => load_dashboard_screen(app_state).await,
        Page::AnkenList => load_anken_list_screen(app_state).await,
        Page::TantoshaList => load_tantosha_list_screen(app_state).await,
    }
}

/// Refresh the shared assignee snapshot. A failed fetch keeps the
/// previous snapshot.
async fn load_tantosha_snapshot(app_state: &mut AppState) {
    if let ApiOutcome::Success(list) = app_state.api.get_tantosha_list().await {
        app_state.directory.replace(list);
    }
}

async fn load_dashboard_screen(app_state: &mut AppState) {
    match app_state.api.get_dashboard().await {
        ApiOutcome::Success(data) => {
            app_state.dashboard_state = Some(DashboardState::new(data));
        }
        ApiOutcome::Failure(_) => {
            // Keep showing the previous numbers; only the very first load
            // falls back to an empty dashboard.
            if app_state.dashboard_state.is_none() {
                app_state.dashboard_state = Some(DashboardState::empty());
            }
        }
    }
    app_state.screen = AppScreen::Dashboard;
}

/// Refresh the dashboard data without changing the active screen. Used
/// after a project write so the stats catch up in the background.
async fn refresh_dashboard_data(app_state: &mut AppState) {
    if let ApiOutcome::Success(data) = app_state.api.get_dashboard().await {
        app_state.dashboard_state = Some(DashboardState::new(data));
    }
}

async fn load_anken_list_screen(app_state: &mut AppState) {
    // Filter selections survive reloads; the assignee options follow the
    // snapshot, restoring the previous choice when it still exists.
    let (status_filter, mut tantosha_filter) = match app_state.anken_list_state.take() {
        Some(state) => state.into_filters(),
        None => (
            SelectInputState::new(Leading::All, STATUS_OPTIONS.iter().map(|s| s.to_string())),
            SelectInputState::new(Leading::All, app_state.directory.names()),
        ),
    };
    tantosha_filter.rebuild(app_state.directory.names());

    let status = (!status_filter.is_unset()).then(|| status_filter.value().to_string());
    let tantosha = (!tantosha_filter.is_unset()).then(|| tantosha_filter.value().to_string());

    let rows = app_state
        .api
        .get_anken_list(status.as_deref(), tantosha.as_deref())
        .await
        .success()
        .unwrap_or_default();

    app_state.anken_list_state = Some(AnkenListState::new(rows, status_filter, tantosha_filter));
    app_state.screen = AppScreen::AnkenList;
}

async fn load_tantosha_list_screen(app_state: &mut AppState) {
    let rows = match app_state.api.get_tantosha_list().await {
        ApiOutcome::Success(list) => {
            app_state.directory.replace(list.clone());
            list
        }
        ApiOutcome::Failure(_) => Vec::new(),
    };

    app_state.tantosha_list_state = Some(TantoshaListState::new(rows));
    app_state.screen = AppScreen::TantoshaList;
}

async fn handle_dashboard_screen(app_state: &mut AppState) -> Result<bool> {
    let action = match &mut app_state.dashboard_state {
        Some(state) => handle_dashboard_input(state)?,
        None => None,
    };

    match action {
        Some(DashboardAction::Exit) => return Ok(true),
        Some(DashboardAction::Reload) => load_dashboard_screen(app_state).await,
        Some(DashboardAction::Goto(page)) => goto_page(app_state, page).await,
        None => {}
    }

    Ok(false)
}

async fn handle_anken_list_screen(app_state: &mut AppState) -> Result<bool> {
    let action = match &mut app_state.anken_list_state {
        Some(state) => handle_anken_list_input(state)?,
        None => None,
    };

    match action {
        Some(AnkenListAction::Exit) => return Ok(true),
        Some(AnkenListAction::Reload) => load_anken_list_screen(app_state).await,
        Some(AnkenListAction::Goto(page)) => goto_page(app_state, page).await,
        Some(AnkenListAction::NewAnken) => {
            app_state.anken_wizard_state = Some(AnkenWizardState::new(&app_state.directory));
            app_state.screen = AppScreen::AnkenWizard;
        }
        Some(AnkenListAction::EditAnken(id)) => {
            // Projects do have a single-record fetch; use it so the form
            // reflects the server's copy, not the table row.
            if let ApiOutcome::Success(anken) = app_state.api.get_anken(&id).await {
                app_state.anken_wizard_state =
                    Some(AnkenWizardState::from_existing(anken, &app_state.directory));
                app_state.screen = AppScreen::AnkenWizard;
            }
        }
        None => {}
    }

    Ok(false)
}

async fn handle_anken_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let action = match &mut app_state.anken_wizard_state {
        Some(state) => handle_anken_wizard_input(state)?,
        None => None,
    };

    match action {
        Some(AnkenWizardAction::Cancel) => {
            app_state.anken_wizard_state = None;
            load_anken_list_screen(app_state).await;
        }
        Some(AnkenWizardAction::Save(payload)) => {
            let editing = payload.is_edit();
            let _ = if editing {
                app_state.api.update_anken(&payload).await
            } else {
                app_state.api.add_anken(&payload).await
            };

            // The write is answer-less, so success is announced either
            // way; a dispatch failure has already queued its error toast
            // and the success toast replaces it.
            app_state.drain_toasts();
            app_state.toasts.show(Toast::success(if editing {
                "Project updated"
            } else {
                "Project registered"
            }));
            app_state.anken_wizard_state = None;

            // Give the remote end time to apply the write, then re-read
            // both the list and the dashboard stats.
            tokio::time::sleep(app_state.config.refresh_delay()).await;
            refresh_dashboard_data(app_state).await;
            load_anken_list_screen(app_state).await;
        }
        None => {}
    }

    Ok(false)
}

async fn handle_tantosha_list_screen(app_state: &mut AppState) -> Result<bool> {
    let action = match &mut app_state.tantosha_list_state {
        Some(state) => handle_tantosha_list_input(state)?,
        None => None,
    };

    match action {
        Some(TantoshaListAction::Exit) => return Ok(true),
        Some(TantoshaListAction::Reload) => load_tantosha_list_screen(app_state).await,
        Some(TantoshaListAction::Goto(page)) => goto_page(app_state, page).await,
        Some(TantoshaListAction::NewTantosha) => {
            app_state.tantosha_wizard_state = Some(TantoshaWizardState::new());
            app_state.screen = AppScreen::TantoshaWizard;
        }
        Some(TantoshaListAction::EditTantosha(id)) => {
            // No single-record fetch exists for assignees; the cached
            // snapshot is the source for the edit form.
            if let Some(tantosha) = app_state.directory.find(&id) {
                app_state.tantosha_wizard_state = Some(TantoshaWizardState::from_existing(tantosha));
                app_state.screen = AppScreen::TantoshaWizard;
            }
        }
        None => {}
    }

    Ok(false)
}

async fn handle_tantosha_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    let action = match &mut app_state.tantosha_wizard_state {
        Some(state) => handle_tantosha_wizard_input(state)?,
        None => None,
    };

    match action {
        Some(TantoshaWizardAction::Cancel) => {
            app_state.tantosha_wizard_state = None;
            load_tantosha_list_screen(app_state).await;
        }
        Some(TantoshaWizardAction::Save(payload)) => {
            let editing = payload.is_edit();
            let _ = if editing {
                app_state.api.update_tantosha(&payload).await
            } else {
                app_state.api.add_tantosha(&payload).await
            };

            app_state.drain_toasts();
            app_state.toasts.show(Toast::success(if editing {
                "Assignee updated"
            } else {
                "Assignee registered"
            }));
            app_state.tantosha_wizard_state = None;

            // Delayed re-read refreshes the table and the shared snapshot
            // in one fetch.
            tokio::time::sleep(app_state.config.refresh_delay()).await;
            load_tantosha_list_screen(app_state).await;
        }
        None => {}
    }

    Ok(false)
}
