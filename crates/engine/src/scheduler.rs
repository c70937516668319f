//! Scheduler: the Stopped/Running state machine around the render loop.
//!
//! While Running, a dedicated `nemo-render` thread waits on a periodic tick
//! channel and paints one frame per tick. Stopping signals that thread and
//! joins it, so `stop` never returns while a tick is still in flight.
//!
//! The "stopped" acknowledgment is a capacity-1 channel that holds a token
//! exactly while the scheduler is stopped:
//!
//! - `start` takes the token; no token means already running, so nothing happens
//! - `stop` puts the token back after the render thread has exited; a token
//!   already present means already stopped, and it is simply re-delivered
//! - `restart` stops, waits for the token and consumes it, reseeds, and
//!   launches again
//!
//! All shared state (screen, geometry, swarm, running flag) lives behind one
//! mutex, taken once per tick by the render thread and once per transition by
//! the caller.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Instant, SystemTime};

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use log::{debug, error, info};

use crate::compositor::Compositor;
use crate::config::RendererConfig;
use crate::core::{AssetCatalog, PaletteConfig, Screen, SpawnRng};
use crate::state::RenderState;

struct Worker {
    exit_tx: Sender<()>,
    handle: JoinHandle<Result<()>>,
}

pub struct Scheduler<S: Screen + Send + 'static> {
    state: Arc<Mutex<RenderState<S>>>,
    config: RendererConfig,
    compositor: Compositor,
    worker: Option<Worker>,
    stopped_tx: Sender<()>,
    stopped_rx: Receiver<()>,
}

fn lock<S>(state: &Mutex<RenderState<S>>) -> Result<MutexGuard<'_, RenderState<S>>> {
    state
        .lock()
        .map_err(|_| anyhow!("renderer state lock poisoned"))
}

impl<S: Screen + Send + 'static> Scheduler<S> {
    /// Build a stopped scheduler.
    ///
    /// Fails on invalid configuration or a catalog without fish or bubbles.
    pub fn new(
        screen: S,
        catalog: AssetCatalog,
        palette: PaletteConfig,
        config: RendererConfig,
    ) -> Result<Self> {
        config.validate()?;
        let rng = SpawnRng::new(config.seed);
        let state = RenderState::new(screen, catalog, palette, rng)?;
        let (stopped_tx, stopped_rx) = bounded(1);
        stopped_tx
            .try_send(())
            .map_err(|_| anyhow!("stopped acknowledgment channel unavailable"))?;
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            compositor: Compositor::new(&config),
            config,
            worker: None,
            stopped_tx,
            stopped_rx,
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Stopped -> Running. No-op while running.
    pub fn start(&mut self) -> Result<()> {
        if self.stopped_rx.try_recv().is_err() {
            debug!("start ignored: renderer already running");
            return Ok(());
        }
        self.launch_or_settle()
    }

    /// Running -> Stopped. No-op while stopped.
    ///
    /// Returns once the render thread has exited. An error the render loop
    /// died with is reported here.
    pub fn stop(&mut self) -> Result<()> {
        if self.stopped_rx.try_recv().is_ok() {
            debug!("stop ignored: renderer already stopped");
            let _ = self.stopped_tx.try_send(());
            return Ok(());
        }
        let result = self.halt();
        let _ = self.stopped_tx.try_send(());
        info!("renderer stopped");
        result
    }

    /// Start when stopped, stop when running.
    pub fn toggle(&mut self) -> Result<()> {
        if self.stopped_rx.try_recv().is_ok() {
            self.launch_or_settle()
        } else {
            self.stop()
        }
    }

    /// Stop, reseed at the current screen size, start.
    pub fn restart(&mut self) -> Result<()> {
        self.restart_with(None)
    }

    /// Restart at `width` x `height` unless that is already the current size.
    ///
    /// Returns whether a restart happened.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<bool> {
        if self.dimensions()? == (width, height) {
            debug!("resize ignored: already {}x{}", width, height);
            return Ok(false);
        }
        self.restart_with(Some((width, height)))?;
        Ok(true)
    }

    /// Stop and drop every layer. The next start seeds from scratch.
    pub fn destroy(&mut self) -> Result<()> {
        let result = self.stop();
        lock(&self.state)?.swarm.clear();
        info!("renderer destroyed");
        result
    }

    pub fn is_running(&self) -> Result<bool> {
        Ok(lock(&self.state)?.running)
    }

    pub fn dimensions(&self) -> Result<(u16, u16)> {
        Ok(lock(&self.state)?.dimensions())
    }

    /// Stopped acknowledgments waiting in the channel (0 or 1).
    pub fn pending_acks(&self) -> usize {
        self.stopped_rx.len()
    }

    /// Run `f` against the shared state under the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&RenderState<S>) -> R) -> Result<R> {
        let state = lock(&self.state)?;
        Ok(f(&state))
    }

    /// Halt the render thread and hand the screen back for teardown.
    pub fn into_screen(mut self) -> Result<S> {
        let halted = self.halt_worker();
        let state = Arc::clone(&self.state);
        drop(self);
        halted?;
        let state = Arc::try_unwrap(state)
            .map_err(|_| anyhow!("renderer state still shared"))?
            .into_inner()
            .map_err(|_| anyhow!("renderer state lock poisoned"))?;
        Ok(state.screen)
    }

    fn restart_with(&mut self, size: Option<(u16, u16)>) -> Result<()> {
        if self.stopped_rx.try_recv().is_err() {
            self.stop()?;
            self.stopped_rx
                .recv()
                .map_err(|_| anyhow!("stopped acknowledgment channel closed"))?;
        }

        let reseeded = lock(&self.state).and_then(|mut state| {
            if let Some((width, height)) = size {
                state.screen.resize(width, height);
            }
            state.seed(self.config.swarm_size, self.config.glyph_colors)
        });
        if let Err(err) = reseeded {
            self.settle_stopped();
            return Err(err);
        }

        self.launch_or_settle()?;
        let (width, height) = self.dimensions()?;
        info!("renderer restarted at {}x{}", width, height);
        Ok(())
    }

    /// Launch with the token already taken; put it back on failure.
    fn launch_or_settle(&mut self) -> Result<()> {
        let launched = self.launch();
        if launched.is_err() {
            self.settle_stopped();
        }
        launched
    }

    fn launch(&mut self) -> Result<()> {
        {
            let mut state = lock(&self.state)?;
            state.screen.clear();
            if !state.swarm.is_seeded() {
                state.seed(self.config.swarm_size, self.config.glyph_colors)?;
            }
            state.running = true;
        }

        let (exit_tx, exit_rx) = bounded(1);
        let ticker = tick(self.config.tick_delay);
        let state = Arc::clone(&self.state);
        let compositor = self.compositor.clone();
        let handle = thread::Builder::new()
            .name("nemo-render".to_string())
            .spawn(move || render_loop(state, compositor, ticker, exit_rx))?;
        self.worker = Some(Worker { exit_tx, handle });
        info!("renderer started");
        Ok(())
    }

    fn settle_stopped(&mut self) {
        if let Ok(mut state) = lock(&self.state) {
            state.running = false;
        }
        let _ = self.stopped_tx.try_send(());
    }

    /// Join the render thread, clear the running flag, draw the final stats.
    fn halt(&mut self) -> Result<()> {
        let joined = self.halt_worker();
        let mut state = lock(&self.state)?;
        state.running = false;
        if self.config.debug {
            self.compositor.draw_stats(&mut state, SystemTime::now());
            state.screen.show()?;
        }
        joined
    }

    fn halt_worker(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        // The loop may already be gone after a failed tick.
        let _ = worker.exit_tx.send(());
        worker
            .handle
            .join()
            .map_err(|_| anyhow!("render loop panicked"))?
    }
}

impl<S: Screen + Send + 'static> Drop for Scheduler<S> {
    fn drop(&mut self) {
        if let Err(err) = self.halt_worker() {
            error!("render loop ended with error: {err:#}");
        }
    }
}

fn render_loop<S: Screen>(
    state: Arc<Mutex<RenderState<S>>>,
    compositor: Compositor,
    ticker: Receiver<Instant>,
    exit_rx: Receiver<()>,
) -> Result<()> {
    loop {
        select! {
            recv(exit_rx) -> _ => return Ok(()),
            recv(ticker) -> _ => {
                let mut state = lock(&state)?;
                if let Err(err) = compositor.frame(&mut state, SystemTime::now()) {
                    error!("render tick failed: {err:#}");
                    state.running = false;
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FrameBuffer;
    use std::time::Duration;

    fn scheduler(size: usize) -> Scheduler<FrameBuffer> {
        Scheduler::new(
            FrameBuffer::new(80, 24),
            AssetCatalog::builtin(),
            PaletteConfig::default(),
            RendererConfig {
                swarm_size: size,
                tick_delay: Duration::from_millis(2),
                seed: Some(1),
                ..RendererConfig::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_is_stopped_with_token() {
        let s = scheduler(3);
        assert!(!s.is_running().unwrap());
        assert_eq!(s.pending_acks(), 1);
        assert!(!s.inspect(|st| st.swarm().is_seeded()).unwrap());
    }

    #[test]
    fn test_start_twice_launches_once() {
        let mut s = scheduler(3);
        s.start().unwrap();
        assert!(s.is_running().unwrap());
        assert_eq!(s.pending_acks(), 0);
        let generation = s.inspect(|st| st.generation()).unwrap();

        s.start().unwrap();
        assert!(s.is_running().unwrap());
        assert_eq!(s.inspect(|st| st.generation()).unwrap(), generation);
        s.stop().unwrap();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Scheduler::new(
            FrameBuffer::new(10, 10),
            AssetCatalog::builtin(),
            PaletteConfig::default(),
            RendererConfig {
                swarm_size: 0,
                ..RendererConfig::default()
            },
        )
        .err()
        .expect("zero swarm size");
        assert!(err.to_string().contains("swarm size"));
    }

    #[test]
    fn test_into_screen_after_running() {
        let mut s = scheduler(2);
        s.start().unwrap();
        thread::sleep(Duration::from_millis(20));
        let screen = s.into_screen().unwrap();
        assert!(screen.shown() > 0);
    }
}
