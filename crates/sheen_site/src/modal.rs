//! Project detail modal
//!
//! Clicking a portfolio card opens an overlay for that project: the
//! backdrop fades in while the panel rises and scales into place. Clicking
//! the backdrop or the close button plays the same animation backwards.
//! Navigation dismisses the modal without animating.
//!
//! The overlay is fixed to the viewport, so all rectangles here are in
//! viewport coordinates.

use crate::content::{Project, PROJECTS};
use sheen_animation::{PropertySet, RevealPreset};
use sheen_core::{Point, Rect, Size};
use sheen_motion::{AnimationGroup, ElementHandle, RevealAnimator, RevealPhase, Trigger};

pub const BACKDROP_KEY: &str = "modal.backdrop";
pub const PANEL_KEY: &str = "modal.panel";

const PANEL_MAX_WIDTH: f32 = 1152.0;
const PANEL_MAX_HEIGHT: f32 = 720.0;
const CLOSE_BUTTON_SIZE: f32 = 56.0;
const CLOSE_BUTTON_INSET: f32 = 32.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    /// Showing the project at this index of [`PROJECTS`]
    Open(usize),
    /// Exit animation running
    Closing(usize),
}

/// What a click on the open modal landed on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalHit {
    Backdrop,
    CloseButton,
    Panel,
}

/// Panel placement for a viewport
pub fn panel_rect(viewport: Size) -> Rect {
    let padding = if viewport.width >= 640.0 { 32.0 } else { 16.0 };
    let width = (viewport.width - 2.0 * padding).clamp(0.0, PANEL_MAX_WIDTH);
    let height = (viewport.height * 0.95)
        .min(viewport.height - 2.0 * padding)
        .clamp(0.0, PANEL_MAX_HEIGHT);
    Rect::new(
        (viewport.width - width) / 2.0,
        (viewport.height - height) / 2.0,
        width,
        height,
    )
}

pub fn close_button_rect(panel: Rect) -> Rect {
    Rect::new(
        panel.right() - CLOSE_BUTTON_INSET - CLOSE_BUTTON_SIZE,
        panel.y() + CLOSE_BUTTON_INSET,
        CLOSE_BUTTON_SIZE,
        CLOSE_BUTTON_SIZE,
    )
}

pub fn hit_test(viewport: Size, point: Point) -> ModalHit {
    let panel = panel_rect(viewport);
    if close_button_rect(panel).contains(point) {
        ModalHit::CloseButton
    } else if panel.contains(point) {
        ModalHit::Panel
    } else {
        ModalHit::Backdrop
    }
}

pub struct ProjectModal {
    state: ModalState,
    backdrop: ElementHandle,
    panel: ElementHandle,
}

impl ProjectModal {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            backdrop: ElementHandle::new(BACKDROP_KEY),
            panel: ElementHandle::new(PANEL_KEY),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// Project shown, including while the exit animation runs
    pub fn project(&self) -> Option<&'static Project> {
        match self.state {
            ModalState::Open(index) | ModalState::Closing(index) => PROJECTS.get(index),
            ModalState::Closed => None,
        }
    }

    pub fn backdrop(&self) -> &ElementHandle {
        &self.backdrop
    }

    pub fn panel(&self) -> &ElementHandle {
        &self.panel
    }

    /// Show project `index`. Replaces whatever the modal was showing.
    /// Returns false for an index past the project list.
    pub fn open(&mut self, index: usize, animator: &mut RevealAnimator, now_ms: f64) -> bool {
        let Some(project) = PROJECTS.get(index) else {
            return false;
        };

        self.play(
            animator,
            &RevealPreset::modal_backdrop(),
            &RevealPreset::modal_panel(),
            now_ms,
        );
        self.state = ModalState::Open(index);
        tracing::debug!(project = project.id, title = project.title, "project modal opened");
        true
    }

    /// Start the exit animation. No-op unless open.
    pub fn close(&mut self, animator: &mut RevealAnimator, now_ms: f64) -> bool {
        let ModalState::Open(index) = self.state else {
            return false;
        };

        self.play(
            animator,
            &RevealPreset::modal_backdrop().reversed(),
            &RevealPreset::modal_panel().reversed(),
            now_ms,
        );
        self.state = ModalState::Closing(index);
        tracing::debug!(index, "project modal closing");
        true
    }

    /// Settle a finished exit animation. Call after the animator ticked.
    pub fn update(&mut self, animator: &RevealAnimator) {
        if let ModalState::Closing(_) = self.state {
            if !matches!(animator.phase_of(PANEL_KEY), RevealPhase::Running) {
                self.state = ModalState::Closed;
            }
        }
    }

    /// Close at once, dropping any modal animation
    pub fn dismiss(&mut self, animator: &mut RevealAnimator) {
        animator.cancel_key(BACKDROP_KEY);
        animator.cancel_key(PANEL_KEY);

        if self.state != ModalState::Closed {
            self.backdrop.apply(&PropertySet::opacity(0.0));
            self.panel.apply(&RevealPreset::modal_panel().initial);
            self.state = ModalState::Closed;
            tracing::debug!("project modal dismissed");
        }
    }

    fn play(
        &self,
        animator: &mut RevealAnimator,
        backdrop: &RevealPreset,
        panel: &RevealPreset,
        now_ms: f64,
    ) {
        animator.animate(
            BACKDROP_KEY,
            AnimationGroup::from_preset([self.backdrop.downgrade()], backdrop)
                .with_trigger(Trigger::Immediate),
            now_ms,
        );
        animator.animate(
            PANEL_KEY,
            AnimationGroup::from_preset([self.panel.downgrade()], panel)
                .with_trigger(Trigger::Immediate),
            now_ms,
        );
    }
}

impl Default for ProjectModal {
    fn default() -> Self {
        Self::new()
    }
}
