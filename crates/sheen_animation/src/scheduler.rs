//! Frame scheduler
//!
//! The host drives everything by calling [`FrameScheduler::frame`] once per
//! animation frame with its own timestamp (milliseconds, like
//! `requestAnimationFrame`). Two kinds of work hang off it:
//!
//! - **Tick callbacks** run every frame, in registration order.
//! - **Timers** (intervals and timeouts) run on their own fixed cadence,
//!   independent of the frame rate. A slow frame fires an interval once per
//!   elapsed period, each with its own due time, up to
//!   [`MAX_CATCH_UP_PERIODS`] per frame. Periods beyond that are skipped.
//!
//! Timers are due relative to the scheduler's clock. Hosts whose clock does
//! not start at zero call [`FrameScheduler::set_now`] before registering any.
//!
//! Everything runs on the calling thread. Nothing here blocks.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TickCallbackId;
    pub struct TimerId;
}

/// Per-frame callback: `(now_ms, dt_ms)`
pub type TickCallback = Box<dyn FnMut(f64, f64)>;

/// Timer callback, receives the timestamp the timer was due at
pub type TimerCallback = Box<dyn FnMut(f64) -> TimerControl>;

/// Returned by timer callbacks to keep or clear an interval
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerControl {
    Continue,
    Stop,
}

/// Shortest interval period accepted, in milliseconds
const MIN_PERIOD_MS: f64 = 1.0;

/// Most times one interval fires within a single frame
pub const MAX_CATCH_UP_PERIODS: u32 = 32;

struct Timer {
    next_due_ms: f64,
    /// `None` for one-shot timeouts
    period_ms: Option<f64>,
    fired_this_frame: u32,
    callback: TimerCallback,
}

/// Schedules frame callbacks and fixed-cadence timers
pub struct FrameScheduler {
    callbacks: SlotMap<TickCallbackId, TickCallback>,
    order: Vec<TickCallbackId>,
    timers: SlotMap<TimerId, Timer>,
    last_frame_ms: Option<f64>,
    now_ms: f64,
    frame_count: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            callbacks: SlotMap::with_key(),
            order: Vec::new(),
            timers: SlotMap::with_key(),
            last_frame_ms: None,
            now_ms: 0.0,
            frame_count: 0,
        }
    }

    /// Timestamp of the most recent frame, or of the last [`set_now`]
    ///
    /// [`set_now`]: FrameScheduler::set_now
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Move the clock to the host's `now_ms` without running anything. The
    /// next frame's delta is measured from here.
    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        self.last_frame_ms = Some(now_ms);
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Register a callback that runs every frame
    pub fn add_tick_callback<F>(&mut self, callback: F) -> TickCallbackId
    where
        F: FnMut(f64, f64) + 'static,
    {
        let id = self.callbacks.insert(Box::new(callback));
        self.order.push(id);
        id
    }

    pub fn remove_tick_callback(&mut self, id: TickCallbackId) -> bool {
        self.order.retain(|other| *other != id);
        self.callbacks.remove(id).is_some()
    }

    /// Run `callback` every `period_ms`, starting one period from now
    pub fn set_interval<F>(&mut self, period_ms: f64, callback: F) -> TimerId
    where
        F: FnMut(f64) -> TimerControl + 'static,
    {
        let period_ms = period_ms.max(MIN_PERIOD_MS);
        self.timers.insert(Timer {
            next_due_ms: self.now_ms + period_ms,
            period_ms: Some(period_ms),
            fired_this_frame: 0,
            callback: Box::new(callback),
        })
    }

    /// Run `callback` once, `delay_ms` from now
    pub fn set_timeout<F>(&mut self, delay_ms: f64, callback: F) -> TimerId
    where
        F: FnOnce(f64) + 'static,
    {
        let mut callback = Some(callback);
        self.timers.insert(Timer {
            next_due_ms: self.now_ms + delay_ms.max(0.0),
            period_ms: None,
            fired_this_frame: 0,
            callback: Box::new(move |due| {
                if let Some(callback) = callback.take() {
                    callback(due);
                }
                TimerControl::Stop
            }),
        })
    }

    /// Cancel a timer. Returns `false` if it already fired or was cleared.
    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn has_timer(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether anything is still registered
    pub fn has_pending_work(&self) -> bool {
        !self.timers.is_empty() || !self.callbacks.is_empty()
    }

    /// Advance to `now_ms`: fire due timers, then run frame callbacks
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self
            .last_frame_ms
            .map(|last| (now_ms - last).max(0.0))
            .unwrap_or(0.0);
        self.last_frame_ms = Some(now_ms);
        self.now_ms = now_ms;
        self.frame_count += 1;

        self.run_due_timers(now_ms);

        let order = self.order.clone();
        for id in order {
            if let Some(callback) = self.callbacks.get_mut(id) {
                callback(now_ms, dt);
            }
        }
    }

    fn run_due_timers(&mut self, now_ms: f64) {
        for timer in self.timers.values_mut() {
            timer.fired_this_frame = 0;
        }

        loop {
            let next = self
                .timers
                .iter()
                .filter(|(_, timer)| timer.next_due_ms <= now_ms)
                .min_by(|a, b| a.1.next_due_ms.total_cmp(&b.1.next_due_ms))
                .map(|(id, _)| id);

            let Some(id) = next else {
                break;
            };

            let timer = &mut self.timers[id];
            let due = timer.next_due_ms;
            let control = (timer.callback)(due);
            timer.fired_this_frame += 1;

            match (control, timer.period_ms) {
                (TimerControl::Continue, Some(period)) => {
                    timer.next_due_ms = due + period;
                    let behind = timer.next_due_ms <= now_ms;
                    if behind && timer.fired_this_frame >= MAX_CATCH_UP_PERIODS {
                        let skipped = ((now_ms - timer.next_due_ms) / period).floor() + 1.0;
                        timer.next_due_ms += skipped * period;
                        tracing::debug!(skipped, "interval fell behind, skipping missed periods");
                    }
                }
                _ => {
                    self.timers.remove(id);
                    tracing::trace!(due, "timer finished");
                }
            }
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_tick_callbacks_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = FrameScheduler::new();

        let l = log.clone();
        scheduler.add_tick_callback(move |_, _| l.borrow_mut().push("scroll"));
        let l = log.clone();
        scheduler.add_tick_callback(move |_, _| l.borrow_mut().push("reveal"));

        scheduler.frame(16.0);
        assert_eq!(*log.borrow(), vec!["scroll", "reveal"]);
    }

    #[test]
    fn test_tick_receives_delta() {
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = FrameScheduler::new();

        let d = deltas.clone();
        scheduler.add_tick_callback(move |_, dt| d.borrow_mut().push(dt));

        scheduler.frame(100.0);
        scheduler.frame(116.0);
        scheduler.frame(150.0);
        assert_eq!(*deltas.borrow(), vec![0.0, 16.0, 34.0]);
    }

    #[test]
    fn test_interval_catches_up_on_slow_frames() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = FrameScheduler::new();

        let f = fired.clone();
        scheduler.set_interval(15.0, move |due| {
            f.borrow_mut().push(due);
            TimerControl::Continue
        });

        scheduler.frame(50.0);
        assert_eq!(*fired.borrow(), vec![15.0, 30.0, 45.0]);
    }

    #[test]
    fn test_interval_stops_itself() {
        let count = Rc::new(Cell::new(0));
        let mut scheduler = FrameScheduler::new();

        let c = count.clone();
        let id = scheduler.set_interval(10.0, move |_| {
            c.set(c.get() + 1);
            if c.get() == 3 {
                TimerControl::Stop
            } else {
                TimerControl::Continue
            }
        });

        scheduler.frame(1000.0);
        assert_eq!(count.get(), 3);
        assert!(!scheduler.has_timer(id));
    }

    #[test]
    fn test_timeout_fires_once_and_can_be_cleared() {
        let count = Rc::new(Cell::new(0));
        let mut scheduler = FrameScheduler::new();

        let c = count.clone();
        scheduler.set_timeout(800.0, move |_| c.set(c.get() + 1));
        let c = count.clone();
        let cleared = scheduler.set_timeout(800.0, move |_| c.set(c.get() + 100));
        assert!(scheduler.clear_timer(cleared));

        scheduler.frame(799.0);
        assert_eq!(count.get(), 0);
        scheduler.frame(800.0);
        scheduler.frame(1600.0);
        assert_eq!(count.get(), 1);
        assert!(!scheduler.has_pending_work());
    }

    #[test]
    fn test_timers_are_due_relative_to_host_clock() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = FrameScheduler::new();
        scheduler.set_now(50_000.0);

        let f = fired.clone();
        scheduler.set_interval(15.0, move |due| {
            f.borrow_mut().push(due);
            TimerControl::Continue
        });

        scheduler.frame(50_016.0);
        assert_eq!(*fired.borrow(), vec![50_015.0]);
    }

    #[test]
    fn test_catch_up_is_bounded_per_frame() {
        let count = Rc::new(Cell::new(0u32));
        let mut scheduler = FrameScheduler::new();

        let c = count.clone();
        scheduler.set_interval(10.0, move |_| {
            c.set(c.get() + 1);
            TimerControl::Continue
        });

        // a ten second stall
        scheduler.frame(10_000.0);
        assert_eq!(count.get(), MAX_CATCH_UP_PERIODS);

        // missed periods are dropped, not replayed later
        scheduler.frame(10_011.0);
        assert_eq!(count.get(), MAX_CATCH_UP_PERIODS + 1);
    }

    #[test]
    fn test_removed_callback_never_runs() {
        let count = Rc::new(Cell::new(0));
        let mut scheduler = FrameScheduler::new();

        let c = count.clone();
        let id = scheduler.add_tick_callback(move |_, _| c.set(c.get() + 1));
        scheduler.frame(0.0);
        assert!(scheduler.remove_tick_callback(id));
        assert!(!scheduler.remove_tick_callback(id));
        scheduler.frame(16.0);

        assert_eq!(count.get(), 1);
    }
}
