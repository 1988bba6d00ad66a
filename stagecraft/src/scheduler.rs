// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Periodic frame callbacks for zoom animation.
//!
//! A stage hands its animation step to a [`FrameScheduler`] as a tick
//! closure. The tick returns `false` once the animation is over; a
//! [`FrameTask`] handle stops it early. Cancelling never interrupts a tick
//! that is already running: the stop takes effect before the next one.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};

/// One animation frame. Returns `true` to be called again.
pub type FrameTick = Box<dyn FnMut() -> bool + Send + 'static>;

/// Handle to a scheduled tick.
#[derive(Clone, Debug, Default)]
pub struct FrameTask {
    cancelled: Arc<AtomicBool>,
}

impl FrameTask {
    /// Creates a live handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops future ticks.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`FrameTask::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Runs tick closures at a fixed interval.
pub trait FrameScheduler: Send + Sync {
    /// Schedules `tick` every `interval` until it returns `false` or the
    /// returned task is cancelled.
    fn schedule(&self, interval: Duration, tick: FrameTick) -> io::Result<FrameTask>;
}

/// Runs a tick, isolating a panic to that tick.
///
/// A panicking tick is reported and treated as finished.
fn run_tick(tick: &mut FrameTick) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| tick())) {
        Ok(again) => again,
        Err(_) => {
            log::error!("zoom animation frame panicked; the animation was stopped");
            false
        }
    }
}

/// Runs every scheduled tick on one shared background timer thread.
///
/// The thread is started by the first [`FrameScheduler::schedule`] call and
/// stops when the last clone of the scheduler is dropped. A new tick runs
/// right away, then once per interval.
#[derive(Clone)]
pub struct ThreadScheduler {
    owner: Arc<TimerOwner>,
}

impl ThreadScheduler {
    /// Creates a scheduler; no thread runs until something is scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owner: Arc::new(TimerOwner(Arc::new(Timer::default()))),
        }
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ThreadScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.owner.0.queue.lock();
        f.debug_struct("ThreadScheduler")
            .field("scheduled", &queue.timed.len())
            .field("running", &queue.running)
            .finish()
    }
}

impl FrameScheduler for ThreadScheduler {
    fn schedule(&self, interval: Duration, tick: FrameTick) -> io::Result<FrameTask> {
        let timer = &self.owner.0;
        let mut queue = timer.queue.lock();
        if !queue.running {
            let worker = Arc::clone(timer);
            thread::Builder::new()
                .name("stagecraft-zoom".into())
                .spawn(move || worker.run())?;
            queue.running = true;
            log::debug!("zoom timer thread started");
        }
        let task = FrameTask::new();
        queue.timed.push(Timed {
            task: task.clone(),
            tick,
            interval,
            due: Instant::now(),
        });
        drop(queue);
        timer.wake.notify_one();
        Ok(task)
    }
}

struct Timed {
    task: FrameTask,
    tick: FrameTick,
    interval: Duration,
    due: Instant,
}

#[derive(Default)]
struct TimerQueue {
    timed: Vec<Timed>,
    running: bool,
    shutdown: bool,
}

#[derive(Default)]
struct Timer {
    queue: Mutex<TimerQueue>,
    wake: Condvar,
}

impl Timer {
    fn run(&self) {
        let mut queue = self.queue.lock();
        while !queue.shutdown {
            queue.timed.retain(|timed| !timed.task.is_cancelled());
            let Some(next) = queue.timed.iter().map(|timed| timed.due).min() else {
                self.wake.wait(&mut queue);
                continue;
            };
            let now = Instant::now();
            if next > now {
                self.wake.wait_until(&mut queue, next);
                continue;
            }
            let (due, later) = std::mem::take(&mut queue.timed)
                .into_iter()
                .partition::<Vec<_>, _>(|timed| timed.due <= now);
            queue.timed = later;
            // Ticks lock stage state and may schedule again, so they run
            // with the queue unlocked.
            let survivors = MutexGuard::unlocked(&mut queue, || Self::run_due(due, now));
            queue.timed.extend(survivors);
        }
        log::debug!("zoom timer thread stopped");
    }

    fn run_due(due: Vec<Timed>, now: Instant) -> Vec<Timed> {
        let mut survivors = Vec::with_capacity(due.len());
        for mut timed in due {
            if timed.task.is_cancelled() {
                continue;
            }
            if run_tick(&mut timed.tick) && !timed.task.is_cancelled() {
                // Fixed rate; a late frame does not cause a burst of catch-up
                // frames.
                timed.due = (timed.due + timed.interval).max(now);
                survivors.push(timed);
            }
        }
        survivors
    }
}

/// Stops the timer thread once the last scheduler handle is gone.
struct TimerOwner(Arc<Timer>);

impl Drop for TimerOwner {
    fn drop(&mut self) {
        let dropped = {
            let mut queue = self.0.queue.lock();
            queue.shutdown = true;
            std::mem::take(&mut queue.timed)
        };
        self.0.wake.notify_all();
        drop(dropped);
    }
}

struct Pending {
    task: FrameTask,
    tick: FrameTick,
}

/// A scheduler whose frames are driven by the host.
///
/// Every call to [`ManualScheduler::run_frame`] runs each live tick once.
/// Useful when the host already has a frame clock, and for deterministic
/// tests.
#[derive(Default)]
pub struct ManualScheduler {
    pending: Mutex<Vec<Pending>>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending.lock().len())
            .finish()
    }
}

impl ManualScheduler {
    /// Creates a scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of ticks waiting for a frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Runs every live tick once and returns how many remain scheduled.
    pub fn run_frame(&self) -> usize {
        // Ticks run unlocked so they may lock stage state, which in turn may
        // schedule new ticks.
        let batch = std::mem::take(&mut *self.pending.lock());
        let mut survivors = Vec::with_capacity(batch.len());
        for mut pending in batch {
            if pending.task.is_cancelled() {
                continue;
            }
            if run_tick(&mut pending.tick) && !pending.task.is_cancelled() {
                survivors.push(pending);
            }
        }
        let mut queue = self.pending.lock();
        survivors.append(&mut queue);
        *queue = survivors;
        queue.len()
    }

    /// Runs frames until nothing is scheduled or `limit` frames have run.
    /// Returns the number of frames run.
    pub fn run_until_idle(&self, limit: usize) -> usize {
        let mut frames = 0;
        while frames < limit && self.pending() > 0 {
            self.run_frame();
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&self, _interval: Duration, tick: FrameTick) -> io::Result<FrameTask> {
        let task = FrameTask::new();
        self.pending.lock().push(Pending {
            task: task.clone(),
            tick,
        });
        Ok(task)
    }
}
