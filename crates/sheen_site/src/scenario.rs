//! Headless scenarios
//!
//! A scenario is a JSON list of input steps and assertions replayed against
//! a [`SiteContext`] on a simulated 60fps clock:
//!
//! ```json
//! {
//!   "path": "/",
//!   "steps": [
//!     { "type": "wait", "ms": 2000 },
//!     { "type": "wheel", "delta_y": 900 },
//!     { "type": "wait", "ms": 1300 },
//!     { "type": "assert_revealed", "key": "services.cards" }
//!   ]
//! }
//! ```

use crate::config::SiteConfig;
use crate::context::{SiteContext, SiteSnapshot};
use crate::error::{Result, SiteError};
use crate::loading::LoadingPhase;
use crate::routes::Route;
use crate::theme::{ThemeMode, ThemeStore};
use serde::{Deserialize, Serialize};
use sheen_core::events::{event_types, WINDOW_TARGET};
use sheen_core::{Event, EventData};
use sheen_motion::RevealPhase;
use std::path::Path;

pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub name: Option<String>,
    /// Initial path
    #[serde(default = "default_path")]
    pub path: String,
    /// Viewport override applied before start
    #[serde(default)]
    pub viewport: Option<ViewportSize>,
    pub steps: Vec<ScenarioStep>,
}

fn default_path() -> String {
    "/".to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Run frames covering `ms`
    Wait { ms: f64 },
    Tick {
        #[serde(default = "default_frames")]
        frames: u32,
    },
    Wheel { delta_y: f32 },
    Touch { delta_y: f32 },
    ScrollTo {
        position: f32,
        #[serde(default)]
        immediate: bool,
    },
    Navigate { path: String },
    /// Viewport coordinates
    PointerMove { x: f32, y: f32 },
    PointerLeave,
    /// Viewport coordinates
    Click { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
    ToggleTheme,
    AssertRevealed { key: String },
    AssertPending { key: String },
    AssertRoute { route: Route },
    AssertNavbarScrolled { expected: bool },
    AssertLoadingProgress { expected: u32 },
    AssertLoadingDismissed,
    AssertTheme { theme: ThemeMode },
    /// Project id shown in the detail modal, `null` for none
    AssertOpenProject { id: Option<u32> },
}

fn default_frames() -> u32 {
    1
}

impl HeadlessScenario {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Outcome of a completed scenario
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub name: Option<String>,
    pub steps: usize,
    pub frames: u64,
    pub elapsed_ms: f64,
    pub snapshot: SiteSnapshot,
}

/// Replays scenarios on a fixed-step clock
#[derive(Clone, Copy, Debug)]
pub struct ScenarioRunner {
    frame_ms: f64,
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self {
            frame_ms: DEFAULT_FRAME_MS,
        }
    }

    pub fn with_frame_ms(frame_ms: f64) -> Self {
        Self {
            frame_ms: frame_ms.max(1.0),
        }
    }

    /// Build a context from `config` and run `scenario` on it
    pub fn execute(
        &self,
        config: SiteConfig,
        store: Box<dyn ThemeStore>,
        scenario: &HeadlessScenario,
    ) -> Result<ScenarioReport> {
        let mut ctx = SiteContext::new(config, store);
        let report = self.run(&mut ctx, scenario);
        ctx.shutdown();
        report
    }

    /// Run `scenario` on `ctx`, starting it first if needed. Stops at the
    /// first failed assertion.
    pub fn run(&self, ctx: &mut SiteContext, scenario: &HeadlessScenario) -> Result<ScenarioReport> {
        if !ctx.is_running() {
            if let Some(size) = scenario.viewport {
                ctx.resize(size.width, size.height);
            }
            ctx.start(&scenario.path, 0.0)?;
        }

        let started_ms = ctx.now_ms();
        let mut now = started_ms;
        let mut frames = 0u64;

        for (index, step) in scenario.steps.iter().enumerate() {
            let step_no = index + 1;
            tracing::debug!(step = step_no, ?step, "scenario step");

            match step {
                ScenarioStep::Wait { ms } => {
                    let count = (ms / self.frame_ms).ceil().max(0.0) as u64;
                    self.advance(ctx, &mut now, count, &mut frames)?;
                }
                ScenarioStep::Tick { frames: count } => {
                    self.advance(ctx, &mut now, u64::from(*count), &mut frames)?;
                }
                ScenarioStep::Wheel { delta_y } => {
                    let data = EventData::Wheel {
                        delta_x: 0.0,
                        delta_y: *delta_y,
                    };
                    ctx.handle_event(Event::new(event_types::WHEEL, WINDOW_TARGET, data, now))?;
                }
                ScenarioStep::Touch { delta_y } => {
                    let data = EventData::Touch { delta_y: *delta_y };
                    ctx.handle_event(Event::new(
                        event_types::TOUCH_MOVE,
                        WINDOW_TARGET,
                        data,
                        now,
                    ))?;
                }
                ScenarioStep::ScrollTo {
                    position,
                    immediate,
                } => ctx.scroll_to(*position, *immediate)?,
                ScenarioStep::Navigate { path } => ctx.navigate(path, now)?,
                ScenarioStep::PointerMove { x, y } => {
                    let data = EventData::Pointer { x: *x, y: *y };
                    ctx.handle_event(Event::new(
                        event_types::POINTER_MOVE,
                        WINDOW_TARGET,
                        data,
                        now,
                    ))?;
                }
                ScenarioStep::PointerLeave => {
                    ctx.handle_event(Event::new(
                        event_types::POINTER_LEAVE,
                        WINDOW_TARGET,
                        EventData::None,
                        now,
                    ))?;
                }
                ScenarioStep::Click { x, y } => {
                    let data = EventData::Pointer { x: *x, y: *y };
                    ctx.handle_event(Event::new(event_types::CLICK, WINDOW_TARGET, data, now))?;
                }
                ScenarioStep::Resize { width, height } => ctx.resize(*width, *height),
                ScenarioStep::ToggleTheme => {
                    ctx.toggle_theme();
                }
                assertion => check(ctx, step_no, assertion)?,
            }
        }

        Ok(ScenarioReport {
            name: scenario.name.clone(),
            steps: scenario.steps.len(),
            frames,
            elapsed_ms: now - started_ms,
            snapshot: ctx.snapshot(),
        })
    }

    fn advance(
        &self,
        ctx: &mut SiteContext,
        now: &mut f64,
        count: u64,
        frames: &mut u64,
    ) -> Result<()> {
        for _ in 0..count {
            *now += self.frame_ms;
            ctx.frame(*now)?;
            *frames += 1;
        }
        Ok(())
    }
}

fn check(ctx: &SiteContext, step: usize, assertion: &ScenarioStep) -> Result<()> {
    let failed = |message: String| Err(SiteError::AssertionFailed { step, message });

    match assertion {
        ScenarioStep::AssertRevealed { key } => match ctx.reveal_phase(key) {
            RevealPhase::Running | RevealPhase::Completed => Ok(()),
            phase => failed(format!("`{key}` expected revealed, was {phase:?}")),
        },
        ScenarioStep::AssertPending { key } => match ctx.reveal_phase(key) {
            RevealPhase::Pending => Ok(()),
            phase => failed(format!("`{key}` expected pending, was {phase:?}")),
        },
        ScenarioStep::AssertRoute { route } => match ctx.route() {
            Some(current) if current == *route => Ok(()),
            current => failed(format!("expected route {route}, was {current:?}")),
        },
        ScenarioStep::AssertNavbarScrolled { expected } => {
            let actual = ctx.navbar_scrolled();
            if actual == *expected {
                Ok(())
            } else {
                failed(format!("navbar scrolled = {actual}, expected {expected}"))
            }
        }
        ScenarioStep::AssertLoadingProgress { expected } => {
            let actual = ctx.loading().progress();
            if actual == *expected {
                Ok(())
            } else {
                failed(format!("loading progress = {actual}, expected {expected}"))
            }
        }
        ScenarioStep::AssertLoadingDismissed => match ctx.loading().phase() {
            LoadingPhase::Dismissed => Ok(()),
            phase => failed(format!("loading screen still {phase:?}")),
        },
        ScenarioStep::AssertTheme { theme } => {
            if ctx.theme() == *theme {
                Ok(())
            } else {
                failed(format!("theme = {}, expected {theme}", ctx.theme()))
            }
        }
        ScenarioStep::AssertOpenProject { id } => {
            let actual = ctx.snapshot().open_project;
            if actual == *id {
                Ok(())
            } else {
                failed(format!("open project = {actual:?}, expected {id:?}"))
            }
        }
        other => {
            tracing::warn!(?other, "scenario: not an assertion");
            Ok(())
        }
    }
}
