//! Control loop: serializes state transitions off the event-polling path.
//!
//! The event path only ever calls [`ControlHandle::request`], a non-blocking
//! send on a capacity-1 channel. When a request is already pending, the new
//! one is dropped, which swallows bursts of key presses instead of queueing
//! them. Resizes are never lost: the latest requested size is parked in a
//! shared slot and the `Resize` message only wakes the loop, which always
//! applies the most recent size. A background `nemo-control` thread owns the
//! [`Scheduler`] and applies requests one at a time, so the blocking parts of
//! a transition (joining the render thread, awaiting the stopped token) never
//! run on the event path.
//!
//! Dropping the handle shuts the loop down: the scheduler is destroyed and
//! returned through [`ControlLoop::join`] for terminal teardown.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, error, warn};

use crate::core::Screen;
use crate::scheduler::Scheduler;
use crate::types::Control;

/// Sending side used by the event-polling path.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    tx: Sender<Control>,
    pending_size: PendingSize,
}

/// Latest resize not yet applied by the control loop.
type PendingSize = Arc<Mutex<Option<(u16, u16)>>>;

impl ControlHandle {
    /// Queue `control` unless a request is already pending.
    ///
    /// A resize is always recorded, even when its wake-up message is dropped,
    /// so it always counts as accepted while the loop is alive.
    ///
    /// Returns whether the request was accepted.
    pub fn request(&self, control: Control) -> bool {
        let resize = if let Control::Resize { width, height } = control {
            match self.pending_size.lock() {
                Ok(mut slot) => *slot = Some((width, height)),
                Err(_) => {
                    warn!("dropped resize request: pending size lock poisoned");
                    return false;
                }
            }
            true
        } else {
            false
        };
        match self.tx.try_send(control) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) if resize => true,
            Err(TrySendError::Full(c)) => {
                debug!("dropped {} request: control loop busy", c.as_str());
                false
            }
            Err(TrySendError::Disconnected(c)) => {
                warn!("dropped {} request: control loop gone", c.as_str());
                false
            }
        }
    }
}

/// The running control thread.
pub struct ControlLoop<S: Screen + Send + 'static> {
    handle: JoinHandle<Result<Scheduler<S>>>,
}

impl<S: Screen + Send + 'static> ControlLoop<S> {
    /// Move `scheduler` onto a control thread.
    pub fn spawn(scheduler: Scheduler<S>) -> Result<(ControlHandle, Self)> {
        let (tx, rx) = bounded(1);
        let pending_size = PendingSize::default();
        let slot = Arc::clone(&pending_size);
        let handle = thread::Builder::new()
            .name("nemo-control".to_string())
            .spawn(move || run(scheduler, rx, slot))?;
        Ok((ControlHandle { tx, pending_size }, Self { handle }))
    }

    /// Whether the loop has exited (all handles dropped, or a transition failed).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the loop to exit and take the destroyed scheduler back.
    pub fn join(self) -> Result<Scheduler<S>> {
        self.handle
            .join()
            .map_err(|_| anyhow!("control loop panicked"))?
    }
}

fn run<S: Screen + Send + 'static>(
    mut scheduler: Scheduler<S>,
    rx: Receiver<Control>,
    pending_size: PendingSize,
) -> Result<Scheduler<S>> {
    for control in rx.iter() {
        debug!("control request: {:?}", control);
        let applied = match control {
            Control::Toggle => scheduler.toggle(),
            Control::Restart => scheduler.restart(),
            // The payload may be stale; the slot holds the latest size.
            Control::Resize { .. } => Ok(()),
        }
        .and_then(|()| apply_pending_size(&mut scheduler, &pending_size));
        if let Err(err) = applied {
            error!("{} failed: {err:#}", control.as_str());
            let _ = scheduler.destroy();
            return Err(err);
        }
    }
    let applied = apply_pending_size(&mut scheduler, &pending_size);
    let destroyed = scheduler.destroy();
    applied.and(destroyed)?;
    Ok(scheduler)
}

/// Resize to the most recently requested size, if one is waiting.
fn apply_pending_size<S: Screen + Send + 'static>(
    scheduler: &mut Scheduler<S>,
    pending_size: &Mutex<Option<(u16, u16)>>,
) -> Result<()> {
    let size = pending_size
        .lock()
        .map_err(|_| anyhow!("pending size lock poisoned"))?
        .take();
    if let Some((width, height)) = size {
        scheduler.resize(width, height)?;
    }
    Ok(())
}
