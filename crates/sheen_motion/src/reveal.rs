//! Staggered reveal groups
//!
//! A group moves a list of elements from an initial to a final
//! [`PropertySet`]. Element `i` starts `stagger.delay_for_index(i)` after
//! the group's trigger fires and takes the group's fixed duration, so
//! completion time for each element does not depend on group size.
//!
//! # Phases
//!
//! ```text
//! Idle ──animate──▶ Pending ──trigger──▶ Running ──last element──▶ Completed
//! ```
//!
//! `Immediate` groups skip `Pending`. Groups triggered by mount or viewport
//! entry are one-shot per key: animating the same key again while the group
//! is registered returns the existing id untouched. Cancelling a group (on
//! unmount) forgets its key and unregisters its viewport target, so the
//! group can never start afterwards.

use crate::element::ElementRef;
use crate::stagger::StaggerConfig;
use rustc_hash::FxHashMap;
use sheen_animation::{Easing, PropertySet, RevealPreset};
use sheen_scroll::{ObservedTarget, TargetId, ViewportObserver};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

new_key_type! {
    /// Handle to a registered reveal group
    pub struct GroupId;
}

/// What starts a group
pub enum Trigger {
    /// Start at `animate` time
    Immediate,
    /// Start on the next [`RevealAnimator::on_mount`]
    OnMount,
    /// Start once the target first becomes visible enough
    OnViewportEntry(ObservedTarget),
}

impl Trigger {
    fn is_one_shot(&self) -> bool {
        !matches!(self, Trigger::Immediate)
    }
}

/// Observable phase of a group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    /// Unknown or cancelled
    Idle,
    Pending,
    Running,
    Completed,
}

/// A reveal request
pub struct AnimationGroup {
    pub elements: Vec<ElementRef>,
    pub initial: PropertySet,
    pub final_state: PropertySet,
    pub stagger: StaggerConfig,
    pub duration_ms: f64,
    pub easing: Easing,
    pub trigger: Trigger,
    /// Skip opacity/scale clamping so overshooting curves show through
    pub allow_overshoot: bool,
}

impl AnimationGroup {
    pub fn new(
        elements: impl IntoIterator<Item = ElementRef>,
        initial: PropertySet,
        final_state: PropertySet,
    ) -> Self {
        Self {
            elements: elements.into_iter().collect(),
            initial,
            final_state,
            stagger: StaggerConfig::none(),
            duration_ms: 800.0,
            easing: Easing::EaseOutCubic,
            trigger: Trigger::Immediate,
            allow_overshoot: false,
        }
    }

    pub fn from_preset(elements: impl IntoIterator<Item = ElementRef>, preset: &RevealPreset) -> Self {
        Self::new(elements, preset.initial, preset.target)
            .with_duration(preset.duration_ms as f64)
            .with_stagger(preset.stagger_ms)
            .with_easing(preset.easing)
    }

    pub fn with_stagger(mut self, stagger: impl Into<StaggerConfig>) -> Self {
        self.stagger = stagger.into();
        self
    }

    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn allow_overshoot(mut self) -> Self {
        self.allow_overshoot = true;
        self
    }

    /// Time from trigger until the last element settles
    pub fn total_duration_ms(&self) -> f64 {
        self.stagger.total_delay(self.elements.len()) as f64 + self.duration_ms
    }
}

enum GroupState {
    Pending,
    Running { started_at_ms: f64 },
    Completed,
}

struct ActiveGroup {
    key: String,
    elements: Vec<ElementRef>,
    initial: PropertySet,
    final_state: PropertySet,
    stagger: StaggerConfig,
    duration_ms: f64,
    easing: Easing,
    allow_overshoot: bool,
    one_shot: bool,
    waits_for_mount: bool,
    /// Set by the observer callback
    entered: Option<Rc<Cell<bool>>>,
    target: Option<TargetId>,
    state: GroupState,
}

impl ActiveGroup {
    fn phase(&self) -> RevealPhase {
        match self.state {
            GroupState::Pending => RevealPhase::Pending,
            GroupState::Running { .. } => RevealPhase::Running,
            GroupState::Completed => RevealPhase::Completed,
        }
    }

    fn finish(&self, properties: PropertySet) -> PropertySet {
        if self.allow_overshoot {
            properties
        } else {
            properties.clamped()
        }
    }

    /// Write every element's properties at `elapsed_ms` after the trigger.
    /// Returns true once all elements have settled.
    fn advance(&self, elapsed_ms: f64) -> bool {
        let mut settled = true;

        for (index, element) in self.elements.iter().enumerate() {
            let local = elapsed_ms - self.stagger.delay_for_index(index) as f64;
            if local < 0.0 {
                settled = false;
                continue;
            }

            let t = if self.duration_ms <= 0.0 {
                1.0
            } else {
                (local / self.duration_ms).min(1.0) as f32
            };
            let properties = if t >= 1.0 {
                self.final_state
            } else {
                self.initial.lerp(&self.final_state, self.easing.apply(t))
            };

            // Dropped elements are skipped; their slot still times out normally
            element.apply(&self.finish(properties));

            if t < 1.0 {
                settled = false;
            }
        }

        settled
    }
}

/// Drives reveal groups once per frame
pub struct RevealAnimator {
    observer: Weak<RefCell<ViewportObserver>>,
    groups: SlotMap<GroupId, ActiveGroup>,
    keys: FxHashMap<String, GroupId>,
}

impl RevealAnimator {
    /// Viewport-entry triggers register with `observer`
    pub fn new(observer: Weak<RefCell<ViewportObserver>>) -> Self {
        Self {
            observer,
            groups: SlotMap::with_key(),
            keys: FxHashMap::default(),
        }
    }

    /// Register a group under `key`.
    ///
    /// The initial state is written to every element immediately so nothing
    /// flashes in its final state before the trigger fires. Must not be
    /// called from inside an observer callback.
    pub fn animate(&mut self, key: impl Into<String>, group: AnimationGroup, now_ms: f64) -> GroupId {
        let key = key.into();

        if let Some(&existing) = self.keys.get(&key) {
            if self.groups.get(existing).is_some_and(|g| g.one_shot) {
                tracing::trace!(key = %key, "reveal: one-shot group already registered");
                return existing;
            }
            self.cancel(existing);
        }

        let one_shot = group.trigger.is_one_shot();
        let AnimationGroup {
            elements,
            initial,
            final_state,
            stagger,
            duration_ms,
            easing,
            trigger,
            allow_overshoot,
        } = group;

        let mut active = ActiveGroup {
            key: key.clone(),
            elements,
            initial,
            final_state,
            stagger,
            duration_ms,
            easing,
            allow_overshoot,
            one_shot,
            waits_for_mount: false,
            entered: None,
            target: None,
            state: GroupState::Pending,
        };

        let start = active.finish(initial);
        for element in &active.elements {
            element.apply(&start);
        }

        match trigger {
            Trigger::Immediate => {
                active.state = GroupState::Running {
                    started_at_ms: now_ms,
                };
            }
            Trigger::OnMount => active.waits_for_mount = true,
            Trigger::OnViewportEntry(target) => {
                let entered = Rc::new(Cell::new(false));
                let flag = Rc::clone(&entered);
                let target = target.on_enter(move |_| flag.set(true));

                match self.observer.upgrade() {
                    Some(observer) => {
                        active.target = Some(observer.borrow_mut().register(target));
                    }
                    None => {
                        tracing::warn!(key = %key, "reveal: no viewport observer, group will stay pending");
                    }
                }
                active.entered = Some(entered);
            }
        }

        tracing::debug!(
            key = %key,
            elements = active.elements.len(),
            phase = ?active.phase(),
            "reveal: group registered"
        );

        let id = self.groups.insert(active);
        self.keys.insert(key, id);
        id
    }

    /// The owning view finished its first render. Starts every group
    /// waiting on mount.
    pub fn on_mount(&mut self, now_ms: f64) -> usize {
        let mut started = 0;
        for group in self.groups.values_mut() {
            if group.waits_for_mount && matches!(group.state, GroupState::Pending) {
                group.waits_for_mount = false;
                group.state = GroupState::Running {
                    started_at_ms: now_ms,
                };
                started += 1;
            }
        }
        if started > 0 {
            tracing::debug!(started, "reveal: mount triggered groups");
        }
        started
    }

    /// Start groups whose target has entered, then advance running groups.
    /// Returns the groups that completed during this call.
    pub fn tick(&mut self, now_ms: f64) -> SmallVec<[GroupId; 4]> {
        let mut completed = SmallVec::new();

        for (id, group) in self.groups.iter_mut() {
            if matches!(group.state, GroupState::Pending)
                && group.entered.as_ref().is_some_and(|flag| flag.get())
            {
                // The observer stops tracking a target once it fires
                group.target = None;
                group.state = GroupState::Running {
                    started_at_ms: now_ms,
                };
                tracing::debug!(key = %group.key, "reveal: viewport entry triggered group");
            }

            if let GroupState::Running { started_at_ms } = group.state {
                if group.advance(now_ms - started_at_ms) {
                    group.state = GroupState::Completed;
                    tracing::debug!(key = %group.key, "reveal: group completed");
                    completed.push(id);
                }
            }
        }

        completed
    }

    /// Drop a group, unregistering its pending viewport target. Elements
    /// keep whatever properties they last received.
    pub fn cancel(&mut self, id: GroupId) -> bool {
        let Some(group) = self.groups.remove(id) else {
            return false;
        };

        if self.keys.get(&group.key) == Some(&id) {
            self.keys.remove(&group.key);
        }

        if let Some(target) = group.target {
            if let Some(observer) = self.observer.upgrade() {
                observer.borrow_mut().unregister(target);
            }
        }

        tracing::debug!(key = %group.key, "reveal: group cancelled");
        true
    }

    pub fn cancel_key(&mut self, key: &str) -> bool {
        match self.keys.get(key).copied() {
            Some(id) => self.cancel(id),
            None => false,
        }
    }

    /// Cancel every group
    pub fn clear(&mut self) {
        let ids: Vec<GroupId> = self.groups.keys().collect();
        for id in ids {
            self.cancel(id);
        }
    }

    pub fn phase(&self, id: GroupId) -> RevealPhase {
        self.groups
            .get(id)
            .map(ActiveGroup::phase)
            .unwrap_or(RevealPhase::Idle)
    }

    pub fn phase_of(&self, key: &str) -> RevealPhase {
        self.group_id(key)
            .map(|id| self.phase(id))
            .unwrap_or(RevealPhase::Idle)
    }

    /// Every registered group's key and phase
    pub fn groups(&self) -> impl Iterator<Item = (&str, RevealPhase)> + '_ {
        self.groups
            .values()
            .map(|group| (group.key.as_str(), group.phase()))
    }

    pub fn group_id(&self, key: &str) -> Option<GroupId> {
        self.keys.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Any group still pending or running
    pub fn is_active(&self) -> bool {
        self.groups
            .values()
            .any(|g| !matches!(g.state, GroupState::Completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementHandle;
    use sheen_core::Rect;

    fn elements(n: usize) -> Vec<ElementHandle> {
        (0..n).map(|i| ElementHandle::new(format!("el-{i}"))).collect()
    }

    fn refs(handles: &[ElementHandle]) -> Vec<ElementRef> {
        handles.iter().map(ElementHandle::downgrade).collect()
    }

    fn fade(handles: &[ElementHandle]) -> AnimationGroup {
        AnimationGroup::new(
            refs(handles),
            PropertySet::opacity(0.0),
            PropertySet::opacity(1.0),
        )
        .with_duration(100.0)
        .with_easing(Easing::Linear)
    }

    fn detached() -> RevealAnimator {
        RevealAnimator::new(Weak::new())
    }

    #[test]
    fn test_initial_state_applied_on_animate() {
        let els = elements(2);
        let mut animator = detached();
        animator.animate("g", fade(&els).with_trigger(Trigger::OnMount), 0.0);

        assert!(els.iter().all(|e| e.properties().opacity == Some(0.0)));
    }

    #[test]
    fn test_stagger_offsets_element_start() {
        let els = elements(3);
        let mut animator = detached();
        let id = animator.animate("g", fade(&els).with_stagger(50.0), 1000.0);

        animator.tick(1050.0);
        let opacities: Vec<f32> = els.iter().map(|e| e.properties().resolved_opacity()).collect();
        assert_eq!(opacities, vec![0.5, 0.0, 0.0]);

        animator.tick(1150.0);
        let opacities: Vec<f32> = els.iter().map(|e| e.properties().resolved_opacity()).collect();
        assert_eq!(opacities, vec![1.0, 1.0, 0.5]);
        assert_eq!(animator.phase(id), RevealPhase::Running);

        let done = animator.tick(1200.0);
        assert_eq!(done.as_slice(), &[id]);
        assert_eq!(animator.phase(id), RevealPhase::Completed);
    }

    #[test]
    fn test_on_mount_waits_for_mount() {
        let els = elements(1);
        let mut animator = detached();
        let id = animator.animate("hero", fade(&els).with_trigger(Trigger::OnMount), 0.0);

        animator.tick(500.0);
        assert_eq!(animator.phase(id), RevealPhase::Pending);

        assert_eq!(animator.on_mount(500.0), 1);
        animator.tick(550.0);
        assert_eq!(els[0].properties().opacity, Some(0.5));
    }

    #[test]
    fn test_one_shot_key_is_noop_when_repeated() {
        let els = elements(1);
        let mut animator = detached();
        let id = animator.animate("hero", fade(&els).with_trigger(Trigger::OnMount), 0.0);
        animator.on_mount(0.0);
        animator.tick(100.0);
        assert_eq!(animator.phase(id), RevealPhase::Completed);

        let again = animator.animate("hero", fade(&els).with_trigger(Trigger::OnMount), 200.0);
        assert_eq!(again, id);
        assert_eq!(els[0].properties().opacity, Some(1.0));
        assert_eq!(animator.len(), 1);
    }

    #[test]
    fn test_immediate_reinvocation_replaces_group() {
        let els = elements(1);
        let mut animator = detached();
        let first = animator.animate("pulse", fade(&els), 0.0);
        animator.tick(100.0);

        let second = animator.animate("pulse", fade(&els), 200.0);
        assert_ne!(first, second);
        assert_eq!(animator.phase(first), RevealPhase::Idle);
        assert_eq!(els[0].properties().opacity, Some(0.0));

        animator.tick(250.0);
        assert_eq!(els[0].properties().opacity, Some(0.5));
    }

    #[test]
    fn test_clamps_unless_overshoot_allowed() {
        let els = elements(2);
        let mut animator = detached();
        let back = |handles: &[ElementHandle]| {
            AnimationGroup::new(
                refs(handles),
                PropertySet::opacity(0.0),
                PropertySet::opacity(1.0),
            )
            .with_duration(100.0)
            .with_easing(Easing::BackOut(3.0))
        };

        animator.animate("clamped", back(&els[..1]), 0.0);
        animator.animate("free", back(&els[1..]).allow_overshoot(), 0.0);
        animator.tick(60.0);

        assert_eq!(els[0].properties().opacity, Some(1.0));
        assert!(els[1].properties().resolved_opacity() > 1.0);
    }

    #[test]
    fn test_dropped_element_is_skipped() {
        let mut els = elements(2);
        let mut animator = detached();
        let id = animator.animate("g", fade(&els), 0.0);

        els.remove(0);
        animator.tick(50.0);
        assert_eq!(els[0].properties().opacity, Some(0.5));

        animator.tick(100.0);
        assert_eq!(animator.phase(id), RevealPhase::Completed);
    }

    #[test]
    fn test_viewport_entry_starts_on_fire() {
        let observer = Rc::new(RefCell::new(ViewportObserver::new(1000.0, 800.0)));
        let mut animator = RevealAnimator::new(Rc::downgrade(&observer));
        let els = elements(1);

        let target = ObservedTarget::new("section", || Rect::new(0.0, 1000.0, 1000.0, 200.0), 0.5);
        let id = animator.animate("section", fade(&els).with_trigger(Trigger::OnViewportEntry(target)), 0.0);
        assert_eq!(observer.borrow().len(), 1);

        animator.tick(100.0);
        assert_eq!(animator.phase(id), RevealPhase::Pending);

        observer.borrow_mut().on_scroll(400.0);
        animator.tick(200.0);
        assert_eq!(animator.phase(id), RevealPhase::Running);
        animator.tick(300.0);
        assert_eq!(animator.phase(id), RevealPhase::Completed);
        assert_eq!(els[0].properties().opacity, Some(1.0));
    }

    #[test]
    fn test_cancel_unregisters_target() {
        let observer = Rc::new(RefCell::new(ViewportObserver::new(1000.0, 800.0)));
        let mut animator = RevealAnimator::new(Rc::downgrade(&observer));
        let els = elements(1);

        let target = ObservedTarget::new("section", || Rect::new(0.0, 1000.0, 1000.0, 200.0), 0.5);
        animator.animate("section", fade(&els).with_trigger(Trigger::OnViewportEntry(target)), 0.0);

        assert!(animator.cancel_key("section"));
        assert!(observer.borrow().is_empty());
        assert_eq!(animator.phase_of("section"), RevealPhase::Idle);
    }

    #[test]
    fn test_missing_observer_stays_pending() {
        let els = elements(1);
        let mut animator = detached();
        let target = ObservedTarget::new("section", || Rect::new(0.0, 0.0, 10.0, 10.0), 0.5);
        let id = animator.animate("s", fade(&els).with_trigger(Trigger::OnViewportEntry(target)), 0.0);

        animator.tick(1000.0);
        assert_eq!(animator.phase(id), RevealPhase::Pending);
        assert!(animator.is_active());
    }
}
