use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use catalog_core::{base_path_of, html, update, AppState, Messages, Msg, ResultsDisplay};
use catalog_engine::EngineHandle;
use catalog_logging::{catalog_debug, catalog_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{parse_line, Command, InputError};
use super::ui;

pub enum AppEvent {
    Core(Msg),
    ShowHtml,
    Help,
    InputError(InputError),
    Quit,
}

/// Interactive browse session over the catalog listing.
///
/// `location` is the address the page was opened at; its path replaces the
/// configured base path so links and history entries round-trip.
pub fn run_browse(config: &AppConfig, location: Option<String>) -> Result<()> {
    let mut controller = config.controller_config();
    let location = location.unwrap_or_else(|| controller.base_path.clone());
    let base_path = base_path_of(&location);
    if !base_path.is_empty() {
        controller.base_path = base_path.to_string();
    }
    let messages = controller.messages.clone();

    let engine = EngineHandle::new(config.client_settings()).context("starting catalog engine")?;
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(engine, event_tx.clone());
    spawn_stdin_reader(event_tx.clone());

    let mut session = Session {
        state: AppState::new(controller),
        runner,
        messages: messages.clone(),
    };
    catalog_info!("Browse session started at {}", location);

    let mut out = io::stdout();
    writeln!(out, "{}", ui::constants::BANNER)?;
    session.dispatch(Msg::PageOpened { location }, &mut out)?;

    for event in event_rx {
        match event {
            AppEvent::Core(msg) => session.dispatch(msg, &mut out)?,
            AppEvent::ShowHtml => {
                let view = session.state.view();
                writeln!(out, "{}", html::render_results_html(&view.display, &messages))?;
                if let ResultsDisplay::Table { controls, .. } = &view.display {
                    writeln!(out, "{}", html::render_pagination_html(controls, &messages))?;
                }
                prompt(&mut out)?;
            }
            AppEvent::Help => {
                writeln!(out, "{}", ui::constants::HELP)?;
                prompt(&mut out)?;
            }
            AppEvent::InputError(err) => {
                writeln!(out, "! {err}")?;
                prompt(&mut out)?;
            }
            AppEvent::Quit => break,
        }
    }

    catalog_info!("Browse session ended");
    Ok(())
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    messages: Messages,
}

impl Session {
    fn dispatch(&mut self, msg: Msg, out: &mut impl Write) -> io::Result<()> {
        catalog_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let maybe_view = state.consume_dirty().then(|| state.view());
        self.state = state;
        self.runner.run(effects);

        if let Some(view) = maybe_view {
            for line in ui::render::render(&view, &self.messages) {
                writeln!(out, "{line}")?;
            }
            prompt(out)?;
        }
        Ok(())
    }
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Each stdin line becomes one event; end of input quits.
fn spawn_stdin_reader(events: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match parse_line(&line) {
                Ok(Command::Core(msg)) => AppEvent::Core(msg),
                Ok(Command::ShowHtml) => AppEvent::ShowHtml,
                Ok(Command::Help) => AppEvent::Help,
                Ok(Command::Quit) => AppEvent::Quit,
                Err(err) => AppEvent::InputError(err),
            };
            let quit = matches!(event, AppEvent::Quit);
            if events.send(event).is_err() || quit {
                return;
            }
        }
        let _ = events.send(AppEvent::Quit);
    });
}
