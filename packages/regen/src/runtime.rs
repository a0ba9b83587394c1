//! Real-time driver on top of tokio.
//!
//! The simulator itself only understands virtual milliseconds. This driver
//! maps them onto a tokio [`Instant`] so deadlines become `sleep_until`
//! calls, and interleaves image-load notifications from an mpsc channel.

use crate::{Clock, RegenError, RegenerationSimulator};
use std::time::Duration;
use styletrend_dom::{Document, NodeId};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

pub struct RegenDriver {
    start: Instant,
}

impl RegenDriver {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the driver was created
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn instant_at(&self, millis: u64) -> Instant {
        self.start + Duration::from_millis(millis)
    }

    pub fn click(
        &self,
        sim: &mut RegenerationSimulator,
        doc: &mut Document,
        group: usize,
    ) -> Result<bool, RegenError> {
        sim.click(doc, group, self.now_ms())
    }

    /// Fire timers as they come due until none are left.
    ///
    /// Image ids received on `loads` are reported as load completions. A
    /// closed channel only disables that branch.
    pub async fn run_until_idle(
        &self,
        sim: &mut RegenerationSimulator,
        doc: &mut Document,
        clock: &dyn Clock,
        loads: &mut mpsc::Receiver<NodeId>,
    ) -> Result<(), RegenError> {
        loop {
            sim.advance(doc, self.now_ms(), clock)?;

            let Some(deadline) = sim.next_deadline() else {
                break;
            };

            tokio::select! {
                _ = sleep_until(self.instant_at(deadline)) => {}
                Some(image) = loads.recv() => {
                    if !sim.image_loaded(doc, image, self.now_ms()) {
                        tracing::debug!(image = %image, "ignoring image load");
                    }
                }
            }
        }

        tracing::debug!(elapsed_ms = self.now_ms(), "regeneration idle");
        Ok(())
    }
}

impl Default for RegenDriver {
    fn default() -> Self {
        Self::new()
    }
}
