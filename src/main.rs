//! nemo: ASCII aquarium (default binary).
//!
//! The main thread only polls terminal events and forwards them as control
//! requests. Rendering runs on the scheduler's own thread; transitions run on
//! the control thread.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use nemo::cli::Cli;
use nemo::core::{AssetCatalog, PaletteConfig};
use nemo::engine::{ControlHandle, ControlLoop, Scheduler};
use nemo::input::{map_event, should_quit};
use nemo::logging;
use nemo::term::TerminalScreen;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.renderer_config();
    config.validate()?;
    if let Some(path) = cli.log_target() {
        logging::init_file(&path)?;
    }
    info!("starting with {:?}", config);

    // The screen restores the terminal when dropped, including on early errors.
    let screen = TerminalScreen::open()?;
    let scheduler = Scheduler::new(screen, AssetCatalog::builtin(), PaletteConfig::default(), config)?;
    run(scheduler)
}

fn run(mut scheduler: Scheduler<TerminalScreen>) -> Result<()> {
    scheduler.start()?;
    let (handle, control) = ControlLoop::spawn(scheduler)?;

    let polled = poll_events(&handle, &control);

    // Closing the channel makes the control loop destroy the scheduler.
    drop(handle);
    let mut screen = control.join()?.into_screen()?;
    screen.close()?;
    info!("bye");
    polled
}

fn poll_events(handle: &ControlHandle, control: &ControlLoop<TerminalScreen>) -> Result<()> {
    loop {
        if control.is_finished() {
            return Ok(());
        }
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let ev = event::read()?;
        if let Event::Key(key) = ev {
            if key.kind == KeyEventKind::Press && should_quit(key) {
                return Ok(());
            }
        }
        if let Some(request) = map_event(&ev) {
            handle.request(request);
        }
    }
}
