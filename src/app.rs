use std::{io, time::Duration};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    config::Config,
    constants::TIME_SETTINGS,
    domain::Schedule,
    fetch::{self, FetchError},
    parse,
};

mod event_handlers;
mod render_views;
mod ui_helpers;

pub const LOAD_FAILED: &str = "Gagal memuat data. Silakan coba lagi nanti.";

struct App {
    config: Config,
    client: reqwest::blocking::Client,
    schedule: Schedule,
    error: Option<String>,
    /// A requested load and its preserve-week flag. Doubles as the busy
    /// indicator: while set, further triggers are ignored.
    pending_load: Option<bool>,
    render_needed: bool,
}

impl App {
    fn new(config: Config) -> Result<Self, FetchError> {
        let client = fetch::build_client(config.fetch_timeout_secs)?;
        Ok(Self {
            config,
            client,
            schedule: Schedule::default(),
            error: None,
            pending_load: None,
            render_needed: true,
        })
    }

    fn loading(&self) -> bool {
        self.pending_load.is_some()
    }

    fn request_load(&mut self, preserve_week: bool) {
        if self.pending_load.is_none() {
            self.pending_load = Some(preserve_week);
            self.render_needed = true;
        }
    }

    /// Blocking fetch + ingest. On failure the previous working set and
    /// window stay untouched and a single user-facing message is shown.
    fn load(&mut self, preserve_week: bool) {
        match fetch::fetch_csv(&self.client, &self.config) {
            Ok(text) => {
                self.schedule
                    .replace(parse::records_from_csv(&text), preserve_week);
                self.error = None;
            }
            Err(e) => {
                eprintln!("Warning: Load failed: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.render_needed = true;
    }

    fn change_week(&mut self, delta_weeks: i64) {
        if self.schedule.records.is_empty() {
            return;
        }
        self.schedule.advance_week(delta_weeks);
        self.render_needed = true;
    }

    fn open_form(&self) {
        let mut command = if cfg!(windows) {
            let mut command = std::process::Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        } else if cfg!(target_os = "macos") {
            std::process::Command::new("open")
        } else {
            std::process::Command::new("xdg-open")
        };
        if let Err(e) = command.arg(&self.config.form_url).spawn() {
            eprintln!("Warning: Could not open form: {}", e);
        }
    }
}

pub fn run_ui() -> Result<(), io::Error> {
    let mut app = match App::new(Config::load()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.request_load(false);

    loop {
        if app.render_needed {
            terminal.draw(|f| app.draw_frame(f))?;
            app.render_needed = false;
        }

        if let Some(preserve_week) = app.pending_load.take() {
            app.load(preserve_week);
            // keys pressed while the fetch was blocking would re-trigger it
            while event::poll(Duration::from_millis(0))? {
                let _ = event::read()?;
            }
            continue;
        }

        if event::poll(Duration::from_millis(TIME_SETTINGS.poll_ms))?
            && let Event::Key(key) = event::read()?
            && app.handle_key(key)
        {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
