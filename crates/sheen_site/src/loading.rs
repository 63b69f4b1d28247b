//! Loading screen sequence
//!
//! A percentage counter ticks up on a fixed interval, independent of the
//! frame rate. After a short hold the overlay wipes up and away; when the
//! wipe finishes the screen tears itself down, clearing any timer that is
//! still registered so nothing keeps updating an unmounted counter.

use crate::config::LoadingConfig;
use serde::Serialize;
use sheen_animation::{FrameScheduler, RevealPreset, TimerControl, TimerId};
use sheen_motion::ElementHandle;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingPhase {
    /// Not started
    Idle,
    Counting,
    /// Overlay wiping away
    Exiting,
    Dismissed,
}

pub struct LoadingScreen {
    config: LoadingConfig,
    preset: RevealPreset,
    progress: Rc<Cell<u32>>,
    /// Due time of the dismiss timeout, once it fired
    exit_started: Rc<Cell<Option<f64>>>,
    interval: Option<TimerId>,
    dismiss: Option<TimerId>,
    overlay: ElementHandle,
    phase: LoadingPhase,
}

impl LoadingScreen {
    pub fn new(config: LoadingConfig) -> Self {
        let preset = RevealPreset::loading_exit().with_duration(config.exit_duration_ms as f32);
        Self {
            config,
            preset,
            progress: Rc::new(Cell::new(0)),
            exit_started: Rc::new(Cell::new(None)),
            interval: None,
            dismiss: None,
            overlay: ElementHandle::new("loading.overlay"),
            phase: LoadingPhase::Idle,
        }
    }

    /// Register the counter interval and dismiss timeout
    pub fn start(&mut self, scheduler: &mut FrameScheduler) {
        if self.phase != LoadingPhase::Idle {
            return;
        }
        if !self.config.enabled {
            self.phase = LoadingPhase::Dismissed;
            return;
        }

        let steps = self.config.steps;
        let progress = Rc::clone(&self.progress);
        self.interval = Some(scheduler.set_interval(self.config.step_interval_ms, move |_| {
            let next = (progress.get() + 1).min(steps);
            progress.set(next);
            if next >= steps {
                TimerControl::Stop
            } else {
                TimerControl::Continue
            }
        }));

        let exit_started = Rc::clone(&self.exit_started);
        self.dismiss = Some(scheduler.set_timeout(self.config.dismiss_after_ms, move |due| {
            exit_started.set(Some(due));
        }));

        self.overlay.apply(&self.preset.initial);
        self.phase = LoadingPhase::Counting;
        tracing::debug!(
            steps,
            interval_ms = self.config.step_interval_ms,
            "loading screen started"
        );
    }

    /// Per-frame bookkeeping after the scheduler ran its timers
    pub fn update(&mut self, now_ms: f64, scheduler: &mut FrameScheduler) -> LoadingPhase {
        if let Some(id) = self.interval {
            if !scheduler.has_timer(id) {
                self.interval = None;
                tracing::debug!(progress = self.progress.get(), "loading counter finished");
            }
        }

        if self.phase == LoadingPhase::Counting && self.exit_started.get().is_some() {
            self.dismiss = None;
            self.phase = LoadingPhase::Exiting;
        }

        if self.phase == LoadingPhase::Exiting {
            let started = self.exit_started.get().unwrap_or(now_ms);
            let duration = self.config.exit_duration_ms;
            let t = if duration <= 0.0 {
                1.0
            } else {
                ((now_ms - started) / duration).clamp(0.0, 1.0) as f32
            };

            let eased = if t >= 1.0 { 1.0 } else { self.preset.easing.apply(t) };
            self.overlay
                .apply(&self.preset.initial.lerp(&self.preset.target, eased));

            if t >= 1.0 {
                self.teardown(scheduler);
            }
        }

        self.phase
    }

    /// Clear timers and drop the overlay. Safe to call at any point.
    pub fn teardown(&mut self, scheduler: &mut FrameScheduler) {
        let mut cleared = 0;
        for id in [self.interval.take(), self.dismiss.take()].into_iter().flatten() {
            if scheduler.clear_timer(id) {
                cleared += 1;
            }
        }
        if self.phase != LoadingPhase::Dismissed {
            self.phase = LoadingPhase::Dismissed;
            tracing::debug!(cleared, progress = self.progress.get(), "loading screen dismissed");
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Counter value, 0 to `steps`
    pub fn progress(&self) -> u32 {
        self.progress.get()
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.phase, LoadingPhase::Counting | LoadingPhase::Exiting)
    }

    /// Overlay offset in percent of the viewport (0 → -100)
    pub fn overlay_offset(&self) -> f32 {
        self.overlay.properties().resolved_translate().1
    }

    pub fn has_timers(&self) -> bool {
        self.interval.is_some() || self.dismiss.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(screen: &mut LoadingScreen, scheduler: &mut FrameScheduler, until_ms: f64) {
        let mut now = scheduler.now_ms();
        while now <= until_ms {
            scheduler.frame(now);
            screen.update(now, scheduler);
            now += 1000.0 / 60.0;
        }
    }

    #[test]
    fn test_counter_reaches_exactly_steps_and_stops() {
        let mut scheduler = FrameScheduler::new();
        let mut screen = LoadingScreen::new(LoadingConfig {
            dismiss_after_ms: 10_000.0,
            ..Default::default()
        });
        screen.start(&mut scheduler);

        run(&mut screen, &mut scheduler, 1600.0);
        assert_eq!(screen.progress(), 100);
        assert_eq!(scheduler.timer_count(), 1, "only the dismiss timeout remains");

        run(&mut screen, &mut scheduler, 3000.0);
        assert_eq!(screen.progress(), 100);
    }

    #[test]
    fn test_default_sequence() {
        let mut scheduler = FrameScheduler::new();
        let mut screen = LoadingScreen::new(LoadingConfig::default());
        screen.start(&mut scheduler);
        assert!(screen.is_visible());

        run(&mut screen, &mut scheduler, 900.0);
        assert_eq!(screen.phase(), LoadingPhase::Exiting);
        assert!(screen.overlay_offset() <= 0.0);

        run(&mut screen, &mut scheduler, 2100.0);
        assert_eq!(screen.phase(), LoadingPhase::Dismissed);
        assert_eq!(screen.overlay_offset(), -100.0);
        assert_eq!(screen.progress(), 100);
        assert_eq!(scheduler.timer_count(), 0);
    }

    #[test]
    fn test_teardown_clears_pending_timers() {
        let mut scheduler = FrameScheduler::new();
        let mut screen = LoadingScreen::new(LoadingConfig::default());
        screen.start(&mut scheduler);

        run(&mut screen, &mut scheduler, 100.0);
        let before = screen.progress();
        assert!(before > 0 && before < 100);

        screen.teardown(&mut scheduler);
        screen.teardown(&mut scheduler);
        assert_eq!(scheduler.timer_count(), 0);
        assert!(!screen.has_timers());

        scheduler.frame(5000.0);
        assert_eq!(screen.progress(), before);
    }

    #[test]
    fn test_disabled_screen_is_dismissed() {
        let mut scheduler = FrameScheduler::new();
        let mut screen = LoadingScreen::new(LoadingConfig {
            enabled: false,
            ..Default::default()
        });
        screen.start(&mut scheduler);
        assert_eq!(screen.phase(), LoadingPhase::Dismissed);
        assert_eq!(scheduler.timer_count(), 0);
    }
}
