use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{error, info};

use crate::model::{Config, Registry, Task, UiConfig};
use crate::ops::sort::{SortOrder, sorted};
use crate::rpc::{Command, Connector, RpcResult, Session, TcpConnector};

use super::dialog::Dialog;
use super::input;
use super::layout::ColumnWidths;
use super::render;
use super::theme::Theme;
use super::viewport::Viewport;

/// Title and status bar
const CHROME_ROWS: u16 = 2;

/// Everything the renderer and key handlers work on. The RPC session is
/// kept outside so that input handling stays free of I/O.
pub struct App {
    /// `host:port` shown in the title bar
    pub endpoint: String,
    pub registry: Registry,
    /// Registry tasks in display order
    pub tasks: Vec<Task>,
    pub sort: SortOrder,
    pub viewport: Viewport,
    pub widths: ColumnWidths,
    pub theme: Theme,
    pub dialog: Option<Dialog>,
    pub should_quit: bool,
    pub width: u16,
    pub height: u16,
}

impl App {
    pub fn new(endpoint: String, registry: Registry, theme: Theme, width: u16, height: u16) -> Self {
        let mut app = App {
            endpoint,
            registry,
            tasks: Vec::new(),
            sort: SortOrder::default(),
            viewport: Viewport::new(0, height.saturating_sub(CHROME_ROWS) as usize),
            widths: ColumnWidths::default(),
            theme,
            dialog: None,
            should_quit: false,
            width,
            height,
        };
        app.refresh_view();
        app
    }

    /// Re-sort the registry snapshot and recompute column widths for
    /// whatever is now on screen.
    pub fn refresh_view(&mut self) {
        self.tasks = sorted(self.registry.tasks(), self.sort);
        self.viewport.sync_len(self.tasks.len());
        let visible = &self.tasks[self.viewport.visible_range()];
        self.widths
            .recompute(visible, self.registry.stats(), self.width as usize);
    }

    /// Terminal size changed: position and column widths start over.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.viewport
            .resize(height.saturating_sub(CHROME_ROWS) as usize);
        self.widths.reset();
        self.refresh_view();
    }

    pub fn focused_task(&self) -> Option<&Task> {
        self.viewport.focus().and_then(|i| self.tasks.get(i))
    }

    /// Send a command, then for task-level commands wait (bounded) until
    /// the list reflects it.
    pub fn perform<K: Connector>(
        &mut self,
        session: &mut Session<K>,
        command: Command,
        ui: &UiConfig,
    ) -> RpcResult<()> {
        session.send_command(command)?;
        if command.changes_task_list() {
            session.wait_for_list_refresh(
                &mut self.registry,
                ui.convergence_timeout(),
                ui.convergence_interval(),
            )?;
        }
        self.refresh_view();
        Ok(())
    }
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let connector = TcpConnector::new(config.daemon.host.clone(), config.daemon.port);
    let mut session = Session::new(connector, config.daemon.rpc_path.clone());
    let mut registry = Registry::new();

    // Fetch initial state before touching the terminal
    info!(endpoint = %session.endpoint(), "connecting");
    session.prime(
        &mut registry,
        config.ui.startup_timeout(),
        config.ui.convergence_interval(),
    )?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let size = terminal.size()?;
    let mut app = App::new(
        session.endpoint(),
        registry,
        Theme::from_config(&config.ui),
        size.width,
        size.height,
    );

    let result = run_event_loop(&mut terminal, &mut app, &mut session, &config.ui);

    let restored = restore_terminal(&mut terminal);
    first_failure(result, restored)
}

/// The loop's own error is the one worth printing; a teardown failure is
/// only reported when the loop ended cleanly.
fn first_failure(
    result: Result<(), Box<dyn std::error::Error>>,
    restored: io::Result<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    result?;
    restored?;
    Ok(())
}

fn restore_terminal<B: Backend + io::Write>(terminal: &mut Terminal<B>) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw.and(screen).and(cursor)
}

fn run_event_loop<B: Backend, K: Connector>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    session: &mut Session<K>,
    ui: &UiConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // The input timeout is the tick: with no key pressed we still poll
        if event::poll(ui.input_timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = input::handle_key(app, key) {
                        app.perform(session, command, ui)
                            .inspect_err(|e| error!(error = %e, "command failed"))?;
                    }
                }
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if app.should_quit {
            info!("quit");
            break;
        }

        session
            .update(&mut app.registry, ui.refresh())
            .inspect_err(|e| error!(error = %e, "session ended"))?;
        app.refresh_view();
    }
    Ok(())
}
