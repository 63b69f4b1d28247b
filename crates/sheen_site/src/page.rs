//! Page composition
//!
//! Mounting a page stacks its sections top to bottom and registers every
//! section's reveal groups and tilt cards. Each section owns a [`Scope`];
//! every registration parks its disposer there, so unmounting a section
//! cancels its pending triggers, in-flight reveals and pointer handlers
//! synchronously.

use crate::routes::Route;
use crate::sections::{SectionKind, SectionPlan, TriggerPlan};
use rustc_hash::FxHashMap;
use sheen_core::{Point, Rect, Scope, Size};
use sheen_motion::{
    AnimationGroup, ElementHandle, RevealAnimator, TiltBoard, TiltConfig, TiltEffect, Trigger,
};
use sheen_scroll::ObservedTarget;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Space above a section's card grid (heading block)
const CARD_GRID_OFFSET: f32 = 320.0;
const CARD_GRID_PADDING: f32 = 48.0;
const CARD_GAP: f32 = 32.0;
const CARD_HEIGHT: f32 = 420.0;

/// Section rectangles for a page, stacked vertically
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    sections: Vec<(SectionKind, Rect)>,
    content_height: f32,
}

impl PageLayout {
    pub fn stack(kinds: &[SectionKind], viewport: Size) -> Self {
        let mut y = 0.0;
        let sections = kinds
            .iter()
            .map(|kind| {
                let plan = kind.plan();
                let height = plan
                    .height
                    .resolve(viewport.height)
                    .max(card_grid_height(viewport.width, plan.tilt_cards));
                let rect = Rect::new(0.0, y, viewport.width, height);
                y += height;
                (*kind, rect)
            })
            .collect();

        Self {
            sections,
            content_height: y.max(viewport.height),
        }
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn section(&self, kind: SectionKind) -> Option<Rect> {
        self.sections
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, rect)| *rect)
    }

    pub fn sections(&self) -> &[(SectionKind, Rect)] {
        &self.sections
    }
}

fn grid_columns(width: f32) -> usize {
    if width >= 1024.0 {
        3
    } else if width >= 640.0 {
        2
    } else {
        1
    }
}

/// Height a section needs to hold `cards` grid cards, 0 without cards
pub fn card_grid_height(width: f32, cards: usize) -> f32 {
    if cards == 0 {
        return 0.0;
    }
    let rows = cards.div_ceil(grid_columns(width));
    CARD_GRID_OFFSET + rows as f32 * (CARD_HEIGHT + CARD_GAP) - CARD_GAP + CARD_GRID_PADDING
}

/// Grid position of card `index` inside `section`
pub fn card_rect(section: Rect, index: usize) -> Rect {
    let columns = grid_columns(section.width());
    let inner = (section.width() - 2.0 * CARD_GRID_PADDING).max(0.0);
    let width = ((inner - CARD_GAP * (columns - 1) as f32) / columns as f32).max(0.0);

    let column = index % columns;
    let row = index / columns;
    Rect::new(
        section.x() + CARD_GRID_PADDING + column as f32 * (width + CARD_GAP),
        section.y() + CARD_GRID_OFFSET + row as f32 * (CARD_HEIGHT + CARD_GAP),
        width,
        CARD_HEIGHT,
    )
}

/// Shared runtime pieces a page registers with
pub struct PageServices<'a> {
    pub animator: &'a Rc<RefCell<RevealAnimator>>,
    pub tilts: &'a Rc<RefCell<TiltBoard>>,
    pub tilt_config: TiltConfig,
}

/// A mounted section
pub struct MountedSection {
    kind: SectionKind,
    bounds: Rc<Cell<Rect>>,
    elements: FxHashMap<String, Vec<ElementHandle>>,
    scope: Scope,
}

impl MountedSection {
    fn mount(plan: &SectionPlan, rect: Rect, services: &PageServices<'_>, now_ms: f64) -> Self {
        let kind = plan.kind;
        let bounds = Rc::new(Cell::new(rect));
        let mut scope = Scope::new(kind.id());
        let mut elements = FxHashMap::default();

        for reveal in &plan.reveals {
            let key = reveal.key(kind);
            let handles: Vec<ElementHandle> = (0..reveal.elements)
                .map(|i| ElementHandle::new(format!("{key}[{i}]")))
                .collect();

            let trigger = match reveal.trigger {
                TriggerPlan::OnMount => Trigger::OnMount,
                TriggerPlan::OnViewportEntry { threshold } => {
                    let section = Rc::clone(&bounds);
                    Trigger::OnViewportEntry(ObservedTarget::new(
                        key.clone(),
                        move || section.get(),
                        threshold,
                    ))
                }
            };

            let group = AnimationGroup::from_preset(
                handles.iter().map(ElementHandle::downgrade),
                &reveal.preset,
            )
            .with_trigger(trigger);
            let id = services.animator.borrow_mut().animate(key.clone(), group, now_ms);

            let animator = Rc::downgrade(services.animator);
            scope.defer(move || {
                if let Some(animator) = animator.upgrade() {
                    animator.borrow_mut().cancel(id);
                }
            });

            elements.insert(key, handles);
        }

        if plan.tilt_cards > 0 {
            let key = format!("{}.cards", kind.id());
            let cards = elements.get(&key).map(Vec::as_slice).unwrap_or_default();

            for (index, card) in cards.iter().take(plan.tilt_cards).enumerate() {
                let section = Rc::clone(&bounds);
                let effect = TiltEffect::new(services.tilt_config).with_element(card.downgrade());
                let id = services
                    .tilts
                    .borrow_mut()
                    .add(move || card_rect(section.get(), index), effect);

                let tilts = Rc::downgrade(services.tilts);
                scope.defer(move || {
                    if let Some(tilts) = tilts.upgrade() {
                        tilts.borrow_mut().remove(id);
                    }
                });
            }
        }

        tracing::debug!(section = kind.id(), registrations = scope.len(), "section mounted");

        Self {
            kind,
            bounds,
            elements,
            scope,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    /// Elements of one reveal group, by animator key
    pub fn elements(&self, key: &str) -> Option<&[ElementHandle]> {
        self.elements.get(key).map(Vec::as_slice)
    }

    pub fn is_mounted(&self) -> bool {
        !self.scope.is_disposed()
    }

    fn unmount(&mut self) {
        self.scope.dispose();
    }
}

/// A mounted page
pub struct Page {
    route: Route,
    layout: PageLayout,
    sections: Vec<MountedSection>,
}

impl Page {
    pub fn mount(route: Route, viewport: Size, services: &PageServices<'_>, now_ms: f64) -> Self {
        let layout = PageLayout::stack(route.sections(), viewport);
        let sections = layout
            .sections()
            .iter()
            .map(|(kind, rect)| MountedSection::mount(&kind.plan(), *rect, services, now_ms))
            .collect();

        tracing::debug!(
            route = route.name(),
            content_height = layout.content_height(),
            "page mounted"
        );

        Self {
            route,
            layout,
            sections,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn content_height(&self) -> f32 {
        self.layout.content_height()
    }

    pub fn sections(&self) -> &[MountedSection] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&MountedSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Index of the grid card of section `kind` under `point` (page
    /// coordinates)
    pub fn card_at(&self, kind: SectionKind, point: Point) -> Option<usize> {
        let bounds = self.section(kind)?.bounds();
        (0..kind.plan().tilt_cards).find(|&index| card_rect(bounds, index).contains(point))
    }

    /// Elements of a reveal group anywhere on the page
    pub fn elements(&self, key: &str) -> Option<&[ElementHandle]> {
        self.sections.iter().find_map(|s| s.elements(key))
    }

    /// Re-stack for a new viewport. Bounds providers read the updated
    /// rectangles on the next measurement.
    pub fn relayout(&mut self, viewport: Size) {
        self.layout = PageLayout::stack(self.route.sections(), viewport);
        for section in &self.sections {
            if let Some(rect) = self.layout.section(section.kind) {
                section.bounds.set(rect);
            }
        }
    }

    /// Tear down every section, bottom-most first
    pub fn unmount(&mut self) {
        for section in self.sections.iter_mut().rev() {
            section.unmount();
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheen_motion::RevealPhase;
    use sheen_scroll::ViewportObserver;

    struct Fixture {
        observer: Rc<RefCell<ViewportObserver>>,
        animator: Rc<RefCell<RevealAnimator>>,
        tilts: Rc<RefCell<TiltBoard>>,
    }

    impl Fixture {
        fn new() -> Self {
            let observer = Rc::new(RefCell::new(ViewportObserver::new(1440.0, 900.0)));
            let animator = Rc::new(RefCell::new(RevealAnimator::new(Rc::downgrade(&observer))));
            Self {
                observer,
                animator,
                tilts: Rc::new(RefCell::new(TiltBoard::new())),
            }
        }

        fn services(&self) -> PageServices<'_> {
            PageServices {
                animator: &self.animator,
                tilts: &self.tilts,
                tilt_config: TiltConfig::default(),
            }
        }
    }

    #[test]
    fn test_layout_stacks_sections() {
        let layout = PageLayout::stack(Route::Landing.sections(), Size::new(1440.0, 900.0));

        assert_eq!(layout.section(SectionKind::Hero), Some(Rect::new(0.0, 0.0, 1440.0, 900.0)));
        assert_eq!(layout.section(SectionKind::Services).unwrap().y(), 900.0);
        assert_eq!(layout.section(SectionKind::Reviews).unwrap().y(), 2300.0);
        assert_eq!(layout.content_height(), 900.0 + 1400.0 + 760.0 + 960.0 + 1100.0);
    }

    #[test]
    fn test_not_found_fills_viewport() {
        let layout = PageLayout::stack(Route::NotFound.sections(), Size::new(800.0, 600.0));
        assert_eq!(layout.content_height(), 600.0);
        assert!(layout.sections().is_empty());
    }

    #[test]
    fn test_card_grid() {
        let section = Rect::new(0.0, 1000.0, 1440.0, 1800.0);
        let first = card_rect(section, 0);
        let fourth = card_rect(section, 3);

        assert_eq!(first.x(), 48.0);
        assert_eq!(first.y(), 1320.0);
        assert_eq!(fourth.x(), 48.0);
        assert_eq!(fourth.y(), 1320.0 + 420.0 + 32.0);
        assert_eq!(card_rect(Rect::new(0.0, 0.0, 400.0, 100.0), 1).x(), 48.0);
    }

    #[test]
    fn test_single_column_grid_grows_section() {
        let wide = PageLayout::stack(Route::Portfolio.sections(), Size::new(1440.0, 900.0));
        assert_eq!(wide.section(SectionKind::Portfolio).unwrap().height(), 1800.0);

        let narrow = PageLayout::stack(Route::Portfolio.sections(), Size::new(390.0, 844.0));
        let portfolio = narrow.section(SectionKind::Portfolio).unwrap();
        let last = card_rect(portfolio, 5);
        let contact = narrow.section(SectionKind::Contact).unwrap();

        assert_eq!(portfolio.height(), card_grid_height(390.0, 6));
        assert!(last.bottom() <= portfolio.bottom());
        assert!(contact.y() >= last.bottom());
        assert_eq!(narrow.content_height(), portfolio.height() + 1100.0);
    }

    #[test]
    fn test_card_at_hits_grid_cards() {
        let fx = Fixture::new();
        let page = Page::mount(Route::Portfolio, Size::new(1440.0, 900.0), &fx.services(), 0.0);
        let bounds = page.section(SectionKind::Portfolio).unwrap().bounds();

        let second = card_rect(bounds, 1);
        assert_eq!(page.card_at(SectionKind::Portfolio, second.center()), Some(1));
        assert_eq!(page.card_at(SectionKind::Portfolio, Point::new(10.0, 10.0)), None);
        assert_eq!(page.card_at(SectionKind::Services, second.center()), None);
    }

    #[test]
    fn test_mount_registers_and_unmount_releases() {
        let fx = Fixture::new();
        let mut page = Page::mount(Route::Portfolio, Size::new(1440.0, 900.0), &fx.services(), 0.0);

        // portfolio heading + cards, contact eyebrow
        assert_eq!(fx.animator.borrow().len(), 3);
        assert_eq!(fx.observer.borrow().len(), 3);
        assert_eq!(fx.tilts.borrow().len(), 6);
        assert_eq!(page.elements("portfolio.cards").unwrap().len(), 6);
        assert_eq!(
            page.elements("portfolio.cards").unwrap()[0].properties().opacity,
            Some(0.0)
        );

        page.unmount();
        assert!(fx.animator.borrow().is_empty());
        assert!(fx.observer.borrow().is_empty());
        assert!(fx.tilts.borrow().is_empty());
        assert!(page.sections().iter().all(|s| !s.is_mounted()));
    }

    #[test]
    fn test_landing_hero_waits_for_mount() {
        let fx = Fixture::new();
        let _page = Page::mount(Route::Landing, Size::new(1440.0, 900.0), &fx.services(), 0.0);

        assert_eq!(fx.animator.borrow().phase_of("hero.title"), RevealPhase::Pending);
        assert_eq!(fx.animator.borrow_mut().on_mount(0.0), 2);
        assert_eq!(fx.animator.borrow().phase_of("hero.title"), RevealPhase::Running);
    }

    #[test]
    fn test_relayout_moves_bounds() {
        let fx = Fixture::new();
        let mut page = Page::mount(Route::Landing, Size::new(1440.0, 900.0), &fx.services(), 0.0);

        page.relayout(Size::new(390.0, 700.0));
        let services = page.section(SectionKind::Services).unwrap();
        assert_eq!(services.bounds(), Rect::new(0.0, 700.0, 390.0, 1400.0));
    }

    #[test]
    fn test_drop_unmounts() {
        let fx = Fixture::new();
        let page = Page::mount(Route::Landing, Size::new(1440.0, 900.0), &fx.services(), 0.0);
        drop(page);
        assert!(fx.animator.borrow().is_empty());
    }
}
