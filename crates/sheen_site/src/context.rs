//! Site runtime context
//!
//! [`SiteContext`] owns every long-lived piece of the running site and is
//! passed around explicitly; nothing is global. One frame runs, in order:
//!
//! 1. due timers (loading counter, dismiss timeout)
//! 2. the smooth scroll driver, whose listeners feed the viewport
//!    observer, the navbar and `SCROLL` subscribers synchronously
//! 3. the reveal animator, which starts groups whose targets entered
//! 4. tilt effects
//!
//! after which the project modal, the loading overlay and the contact form
//! status advance.
//! Teardown is explicit ([`SiteContext::shutdown`]) and also runs on drop.

use crate::config::SiteConfig;
use crate::contact::{ContactForm, FormStatus};
use crate::error::{Result, SiteError};
use crate::loading::{LoadingPhase, LoadingScreen};
use crate::modal::{self, ModalHit, ProjectModal};
use crate::navbar::Navbar;
use crate::page::{Page, PageServices};
use crate::routes::{Route, Router};
use crate::sections::SectionKind;
use crate::theme::{resolve_initial, ThemeMode, ThemeStore};
use serde::Serialize;
use sheen_animation::{FrameScheduler, TickCallbackId};
use sheen_core::events::{event_types, WINDOW_TARGET};
use sheen_core::{Event, EventData, EventDispatcher, EventType, Point, Size};
use sheen_motion::{ElementHandle, RevealAnimator, RevealPhase, TiltBoard, TiltConfig};
use sheen_scroll::{ListenerId, ScrollState, SmoothScroll, ViewportObserver};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Observable state of a running site
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteSnapshot {
    pub route: Route,
    pub scroll_position: f32,
    pub scroll_target: f32,
    pub scroll_velocity: f32,
    pub navbar_scrolled: bool,
    pub menu_open: bool,
    pub theme: ThemeMode,
    pub loading_phase: LoadingPhase,
    pub loading_progress: u32,
    /// Reveal groups that started or finished, sorted
    pub revealed: Vec<String>,
    /// Reveal groups still waiting on their trigger, sorted
    pub pending: Vec<String>,
    pub contact: FormStatus,
    /// Id of the project shown in the detail modal
    pub open_project: Option<u32>,
    pub frames: u64,
}

pub struct SiteContext {
    config: SiteConfig,
    router: Router,
    scheduler: FrameScheduler,
    driver: Rc<RefCell<SmoothScroll>>,
    observer: Rc<RefCell<ViewportObserver>>,
    animator: Rc<RefCell<RevealAnimator>>,
    tilts: Rc<RefCell<TiltBoard>>,
    navbar: Rc<RefCell<Navbar>>,
    dispatcher: Rc<RefCell<EventDispatcher>>,
    loading: LoadingScreen,
    contact: ContactForm,
    modal: ProjectModal,
    theme_store: Box<dyn ThemeStore>,
    theme: ThemeMode,
    page: Option<Page>,
    viewport: Size,
    /// Timestamp of the frame being run, read by scroll listeners
    clock: Rc<Cell<f64>>,
    tick_callbacks: Vec<TickCallbackId>,
    scroll_listeners: Vec<ListenerId>,
    running: bool,
}

impl SiteContext {
    pub fn new(config: SiteConfig, theme_store: Box<dyn ThemeStore>) -> Self {
        let viewport = Size::new(config.layout.viewport_width, config.layout.viewport_height);
        let observer = Rc::new(RefCell::new(ViewportObserver::new(
            viewport.width,
            viewport.height,
        )));
        let animator = Rc::new(RefCell::new(RevealAnimator::new(Rc::downgrade(&observer))));

        Self {
            router: Router::new(config.layout.base_path.clone()),
            scheduler: FrameScheduler::new(),
            driver: Rc::new(RefCell::new(SmoothScroll::new())),
            observer,
            animator,
            tilts: Rc::new(RefCell::new(TiltBoard::new())),
            navbar: Rc::new(RefCell::new(Navbar::new(config.layout.navbar_threshold))),
            dispatcher: Rc::new(RefCell::new(EventDispatcher::new())),
            loading: LoadingScreen::new(config.loading.clone()),
            contact: ContactForm::new(&config.contact),
            modal: ProjectModal::new(),
            theme: config.theme.default,
            theme_store,
            page: None,
            viewport,
            clock: Rc::new(Cell::new(0.0)),
            tick_callbacks: Vec::new(),
            scroll_listeners: Vec::new(),
            running: false,
            config,
        }
    }

    /// Wire the frame loop, start the loading sequence and mount the page
    /// for `path`
    pub fn start(&mut self, path: &str, now_ms: f64) -> Result<()> {
        if self.running {
            return Err(SiteError::AlreadyStarted);
        }

        self.theme = resolve_initial(self.theme_store.as_ref(), self.config.theme.default);
        self.clock.set(now_ms);
        self.scheduler.set_now(now_ms);

        let scroll_config = self.config.scroll.for_width(self.viewport.width);
        self.driver.borrow_mut().start(scroll_config)?;
        self.subscribe_scroll_listeners();
        self.register_tick_callbacks();

        self.loading.start(&mut self.scheduler);
        self.running = true;

        tracing::info!(
            theme = %self.theme,
            width = self.viewport.width,
            height = self.viewport.height,
            "site started"
        );

        self.navigate(path, now_ms)
    }

    fn subscribe_scroll_listeners(&mut self) {
        let mut driver = self.driver.borrow_mut();

        let observer = Rc::downgrade(&self.observer);
        self.scroll_listeners.push(driver.subscribe(move |state| {
            if let Some(observer) = observer.upgrade() {
                observer.borrow_mut().on_scroll(state.virtual_position);
            }
        }));

        let navbar = Rc::downgrade(&self.navbar);
        self.scroll_listeners.push(driver.subscribe(move |state| {
            if let Some(navbar) = navbar.upgrade() {
                navbar.borrow_mut().on_scroll(state.virtual_position);
            }
        }));

        let dispatcher = Rc::downgrade(&self.dispatcher);
        let clock = Rc::clone(&self.clock);
        self.scroll_listeners.push(driver.subscribe(move |state| {
            if let Some(dispatcher) = dispatcher.upgrade() {
                let mut event = Event::new(
                    event_types::SCROLL,
                    WINDOW_TARGET,
                    EventData::Scroll {
                        position: state.virtual_position,
                    },
                    clock.get(),
                );
                dispatcher.borrow().dispatch(&mut event);
            }
        }));
    }

    fn register_tick_callbacks(&mut self) {
        let driver = Rc::downgrade(&self.driver);
        self.tick_callbacks
            .push(self.scheduler.add_tick_callback(move |now_ms, _dt| {
                if let Some(driver) = driver.upgrade() {
                    driver.borrow_mut().tick(now_ms);
                }
            }));

        let animator = Rc::downgrade(&self.animator);
        self.tick_callbacks
            .push(self.scheduler.add_tick_callback(move |now_ms, _dt| {
                if let Some(animator) = animator.upgrade() {
                    animator.borrow_mut().tick(now_ms);
                }
            }));

        let tilts = Rc::downgrade(&self.tilts);
        self.tick_callbacks
            .push(self.scheduler.add_tick_callback(move |now_ms, _dt| {
                if let Some(tilts) = tilts.upgrade() {
                    tilts.borrow_mut().tick(now_ms);
                }
            }));
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn ensure_running(&self) -> Result<()> {
        if self.running {
            Ok(())
        } else {
            Err(SiteError::NotRunning)
        }
    }

    /// Run one frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Result<()> {
        self.ensure_running()?;
        self.clock.set(now_ms);

        self.scheduler.frame(now_ms);
        self.modal.update(&self.animator.borrow());
        self.loading.update(now_ms, &mut self.scheduler);
        self.contact.tick(now_ms);
        Ok(())
    }

    /// Feed a host input event. `SCROLL` and `NAVIGATE` subscribers are
    /// notified by the operations themselves; other events are forwarded to
    /// subscribers after handling. Returns whether a subscriber ran.
    pub fn handle_event(&mut self, mut event: Event) -> Result<bool> {
        self.ensure_running()?;
        let now_ms = event.timestamp;

        match (event.event_type, &event.data) {
            (event_types::WHEEL, EventData::Wheel { delta_y, .. }) => {
                self.driver.borrow_mut().on_wheel(*delta_y);
            }
            (event_types::TOUCH_MOVE, EventData::Touch { delta_y }) => {
                self.driver.borrow_mut().on_touch(*delta_y);
            }
            (event_types::POINTER_MOVE, EventData::Pointer { x, y }) => {
                self.pointer_move(Point::new(*x, *y), now_ms);
            }
            (event_types::CLICK, EventData::Pointer { x, y }) => {
                self.click(Point::new(*x, *y), now_ms);
            }
            (event_types::POINTER_LEAVE, _) => {
                self.tilts.borrow_mut().pointer_leave_all(now_ms);
            }
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                self.resize(*width, *height);
            }
            (event_types::NAVIGATE, EventData::Navigate { path }) => {
                let path = path.clone();
                self.navigate(&path, now_ms)?;
                return Ok(false);
            }
            (event_type, data) => {
                tracing::trace!(event_type, ?data, "site: unhandled event");
            }
        }

        Ok(self.dispatcher.borrow().dispatch(&mut event))
    }

    /// Pointer position in viewport coordinates
    fn pointer_move(&mut self, viewport_point: Point, now_ms: f64) {
        let scroll_y = self.driver.borrow().state().virtual_position;
        let page_point = Point::new(viewport_point.x, viewport_point.y + scroll_y);
        self.tilts.borrow_mut().pointer_move(page_point, now_ms);
    }

    /// Clicks on the open modal close it from the backdrop or the close
    /// button. Otherwise a click on a portfolio card opens its project.
    fn click(&mut self, viewport_point: Point, now_ms: f64) {
        if self.modal.is_open() {
            match modal::hit_test(self.viewport, viewport_point) {
                ModalHit::Backdrop | ModalHit::CloseButton => {
                    self.close_project(now_ms);
                }
                ModalHit::Panel => {}
            }
            return;
        }

        let scroll_y = self.driver.borrow().state().virtual_position;
        let page_point = Point::new(viewport_point.x, viewport_point.y + scroll_y);
        let card = self
            .page
            .as_ref()
            .and_then(|page| page.card_at(SectionKind::Portfolio, page_point));
        if let Some(index) = card {
            if let Err(err) = self.open_project(index, now_ms) {
                tracing::debug!("site: click on card {} ignored: {}", index, err);
            }
        }
    }

    /// Show project `index` of the portfolio in the detail modal
    pub fn open_project(&mut self, index: usize, now_ms: f64) -> Result<()> {
        self.ensure_running()?;
        let has_portfolio = self
            .page
            .as_ref()
            .is_some_and(|page| page.section(SectionKind::Portfolio).is_some());
        if !has_portfolio
            || !self
                .modal
                .open(index, &mut self.animator.borrow_mut(), now_ms)
        {
            return Err(SiteError::ProjectUnavailable(index));
        }
        Ok(())
    }

    /// Play the modal exit. Returns false if no project was open.
    pub fn close_project(&mut self, now_ms: f64) -> bool {
        self.modal.close(&mut self.animator.borrow_mut(), now_ms)
    }

    pub fn modal(&self) -> &ProjectModal {
        &self.modal
    }

    /// Replace the current page. Scrolls to the top, or to the section
    /// named by a `#anchor`, without animation.
    pub fn navigate(&mut self, path: &str, now_ms: f64) -> Result<()> {
        self.ensure_running()?;
        let location = self.router.resolve(path);

        self.modal.dismiss(&mut self.animator.borrow_mut());
        if let Some(mut page) = self.page.take() {
            page.unmount();
        }
        self.navbar.borrow_mut().close_menu();

        let services = PageServices {
            animator: &self.animator,
            tilts: &self.tilts,
            tilt_config: TiltConfig::default(),
        };
        let page = Page::mount(location.route, self.viewport, &services, now_ms);

        let scroll_to = location
            .anchor
            .as_deref()
            .and_then(SectionKind::from_anchor)
            .and_then(|kind| page.layout().section(kind))
            .map(|rect| rect.y())
            .unwrap_or(0.0);

        {
            let mut driver = self.driver.borrow_mut();
            driver.set_dimensions(self.viewport.height, page.content_height());
            driver.scroll_to(scroll_to, true);
        }
        self.page = Some(page);

        self.observer.borrow_mut().refresh();
        self.animator.borrow_mut().on_mount(now_ms);

        tracing::info!(path, route = %location.route, "navigated");

        let mut event = Event::new(
            event_types::NAVIGATE,
            WINDOW_TARGET,
            EventData::Navigate {
                path: path.to_string(),
            },
            now_ms,
        );
        self.dispatcher.borrow().dispatch(&mut event);
        Ok(())
    }

    /// Programmatic scroll, eased unless `immediate`
    pub fn scroll_to(&mut self, position: f32, immediate: bool) -> Result<()> {
        self.ensure_running()?;
        self.driver.borrow_mut().scroll_to(position, immediate);
        Ok(())
    }

    /// New viewport size: re-stack the page and re-measure targets
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);

        if let Some(page) = self.page.as_mut() {
            page.relayout(self.viewport);
            self.driver
                .borrow_mut()
                .set_dimensions(height, page.content_height());
        }
        self.observer.borrow_mut().set_viewport_size(width, height);
        tracing::debug!(width, height, "site resized");
    }

    /// Flip the theme and persist it. A failed write is logged and the
    /// toggle still applies.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggle();
        if let Err(err) = self.theme_store.save(self.theme) {
            tracing::warn!("failed to persist theme {}: {}", self.theme, err);
        }
        self.theme
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.navbar.borrow_mut().toggle_menu()
    }

    /// Listen for events of `event_type` on the window. Handlers must not
    /// call back into the context.
    pub fn subscribe<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        self.dispatcher
            .borrow_mut()
            .register(WINDOW_TARGET, event_type, handler);
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn route(&self) -> Option<Route> {
        self.page.as_ref().map(Page::route)
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Elements of a reveal group on the current page
    pub fn elements(&self, key: &str) -> Option<&[ElementHandle]> {
        self.page.as_ref().and_then(|page| page.elements(key))
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.driver.borrow().state()
    }

    pub fn reveal_phase(&self, key: &str) -> RevealPhase {
        self.animator.borrow().phase_of(key)
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn loading(&self) -> &LoadingScreen {
        &self.loading
    }

    pub fn navbar_scrolled(&self) -> bool {
        self.navbar.borrow().is_scrolled()
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    /// Hosts that keep running frames while a submission is in flight use
    /// [`ContactForm::begin_submit`] here, await the relay outside the
    /// context and report back with [`ContactForm::finish`].
    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Timestamp of the most recent frame or start
    pub fn now_ms(&self) -> f64 {
        self.clock.get()
    }

    pub fn snapshot(&self) -> SiteSnapshot {
        let scroll = self.scroll_state();
        let navbar = self.navbar.borrow();

        let mut revealed = Vec::new();
        let mut pending = Vec::new();
        for (key, phase) in self.animator.borrow().groups() {
            match phase {
                RevealPhase::Running | RevealPhase::Completed => revealed.push(key.to_string()),
                RevealPhase::Pending => pending.push(key.to_string()),
                RevealPhase::Idle => {}
            }
        }
        revealed.sort();
        pending.sort();

        SiteSnapshot {
            route: self.route().unwrap_or(Route::NotFound),
            scroll_position: scroll.virtual_position,
            scroll_target: scroll.target_position,
            scroll_velocity: scroll.velocity,
            navbar_scrolled: navbar.is_scrolled(),
            menu_open: navbar.is_menu_open(),
            theme: self.theme,
            loading_phase: self.loading.phase(),
            loading_progress: self.loading.progress(),
            revealed,
            pending,
            contact: self.contact.status(),
            open_project: self
                .modal
                .project()
                .filter(|_| self.modal.is_open())
                .map(|project| project.id),
            frames: self.scheduler.frame_count(),
        }
    }

    /// Unmount the page, stop scrolling and clear every timer and frame
    /// callback. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;

        self.modal.dismiss(&mut self.animator.borrow_mut());
        if let Some(mut page) = self.page.take() {
            page.unmount();
        }
        self.loading.teardown(&mut self.scheduler);
        for id in self.tick_callbacks.drain(..) {
            self.scheduler.remove_tick_callback(id);
        }

        self.scroll_listeners.clear();
        self.driver.borrow_mut().stop();
        self.animator.borrow_mut().clear();
        self.tilts.borrow_mut().clear();

        tracing::info!("site shut down");
    }
}

impl Drop for SiteContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactFields;
    use crate::content::PROJECTS;
    use crate::modal::{ModalState, PANEL_KEY};
    use crate::theme::MemoryThemeStore;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn context() -> SiteContext {
        let mut config = SiteConfig::default();
        config.loading.enabled = false;
        SiteContext::new(config, Box::new(MemoryThemeStore::new()))
    }

    fn run(ctx: &mut SiteContext, from_ms: f64, frames: usize) -> f64 {
        let mut now = from_ms;
        for _ in 0..frames {
            now += FRAME_MS;
            ctx.frame(now).unwrap();
        }
        now
    }

    fn wheel(delta_y: f32, now: f64) -> Event {
        Event::new(
            event_types::WHEEL,
            WINDOW_TARGET,
            EventData::Wheel {
                delta_x: 0.0,
                delta_y,
            },
            now,
        )
    }

    fn click(x: f32, y: f32, now: f64) -> Event {
        Event::new(event_types::CLICK, WINDOW_TARGET, EventData::Pointer { x, y }, now)
    }

    #[test]
    fn test_requires_start() {
        let mut ctx = context();
        assert!(matches!(ctx.frame(0.0), Err(SiteError::NotRunning)));
        assert!(matches!(
            ctx.handle_event(wheel(100.0, 0.0)),
            Err(SiteError::NotRunning)
        ));

        ctx.start("/", 0.0).unwrap();
        assert!(matches!(ctx.start("/", 0.0), Err(SiteError::AlreadyStarted)));
    }

    #[test]
    fn test_start_mounts_and_runs_hero() {
        let mut ctx = context();
        ctx.start("/", 0.0).unwrap();

        assert_eq!(ctx.route(), Some(Route::Landing));
        assert_eq!(ctx.reveal_phase("hero.title"), RevealPhase::Running);
        assert_eq!(ctx.reveal_phase("services.cards"), RevealPhase::Pending);
        assert_eq!(ctx.scheduler().callback_count(), 3);
    }

    #[test]
    fn test_wheel_scroll_updates_navbar_and_reveals() {
        let mut ctx = context();
        ctx.start("/", 0.0).unwrap();

        ctx.handle_event(wheel(600.0, 0.0)).unwrap();
        run(&mut ctx, 0.0, 90);

        assert_eq!(ctx.scroll_state().virtual_position, 600.0);
        assert!(ctx.navbar_scrolled());
        assert!(ctx.snapshot().revealed.contains(&"services.heading".to_string()));
    }

    #[test]
    fn test_scroll_subscribers_see_each_frame() {
        let mut ctx = context();
        let seen = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&seen);
        ctx.subscribe(event_types::SCROLL, move |_| counter.set(counter.get() + 1));

        ctx.start("/", 0.0).unwrap();
        let before = seen.get();
        ctx.handle_event(wheel(200.0, 0.0)).unwrap();
        run(&mut ctx, 0.0, 10);
        assert_eq!(seen.get(), before + 10);
    }

    #[test]
    fn test_navigate_unmounts_previous_page() {
        let mut ctx = context();
        ctx.start("/", 0.0).unwrap();
        ctx.handle_event(wheel(800.0, 0.0)).unwrap();
        run(&mut ctx, 0.0, 20);

        assert!(ctx.navbar_scrolled());

        ctx.navigate("/portfolio", 400.0).unwrap();
        assert_eq!(ctx.route(), Some(Route::Portfolio));
        assert_eq!(ctx.scroll_state().virtual_position, 0.0);
        assert!(!ctx.navbar_scrolled());
        assert_eq!(ctx.reveal_phase("services.cards"), RevealPhase::Idle);

        // entered on mount, started by the next animator tick
        assert_eq!(ctx.reveal_phase("portfolio.heading"), RevealPhase::Pending);
        run(&mut ctx, 400.0, 1);
        assert_eq!(ctx.reveal_phase("portfolio.heading"), RevealPhase::Running);
    }

    #[test]
    fn test_anchor_jumps_to_section() {
        let mut ctx = context();
        ctx.start("/#about", 0.0).unwrap();

        let about = ctx
            .page()
            .and_then(|page| page.layout().section(SectionKind::About))
            .unwrap();
        assert_eq!(ctx.scroll_state().virtual_position, about.y());

        run(&mut ctx, 0.0, 1);
        assert_eq!(ctx.reveal_phase("about.stats"), RevealPhase::Running);
        assert_eq!(ctx.reveal_phase("services.cards"), RevealPhase::Pending);
    }

    #[test]
    fn test_theme_toggle_persists_or_warns() {
        let mut ctx = SiteContext::new(
            SiteConfig::default(),
            Box::new(MemoryThemeStore::with_value(ThemeMode::Light)),
        );
        ctx.start("/", 0.0).unwrap();
        assert_eq!(ctx.theme(), ThemeMode::Light);
        assert_eq!(ctx.toggle_theme(), ThemeMode::Dark);

        let mut broken = SiteContext::new(
            SiteConfig::default(),
            Box::new(MemoryThemeStore::unavailable()),
        );
        broken.start("/", 0.0).unwrap();
        assert_eq!(broken.theme(), ThemeMode::Dark);
        assert_eq!(broken.toggle_theme(), ThemeMode::Light);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut ctx = SiteContext::new(SiteConfig::default(), Box::new(MemoryThemeStore::new()));
        ctx.start("/portfolio", 0.0).unwrap();
        assert!(ctx.scheduler().timer_count() > 0);

        ctx.shutdown();
        ctx.shutdown();
        assert!(!ctx.is_running());
        assert!(!ctx.scheduler().has_pending_work());
        assert_eq!(ctx.route(), None);
    }

    #[test]
    fn test_loading_runs_from_host_clock() {
        let mut ctx = SiteContext::new(SiteConfig::default(), Box::new(MemoryThemeStore::new()));
        ctx.start("/", 50_000.0).unwrap();

        ctx.frame(50_016.0).unwrap();
        assert_eq!(ctx.loading().phase(), LoadingPhase::Counting);
        assert_eq!(ctx.loading().progress(), 1);

        run(&mut ctx, 50_016.0, 132);
        assert_eq!(ctx.loading().phase(), LoadingPhase::Dismissed);
        assert_eq!(ctx.loading().progress(), 100);
        assert_eq!(ctx.scheduler().timer_count(), 0);
    }

    #[test]
    fn test_click_on_card_opens_project() {
        let mut ctx = context();
        ctx.start("/portfolio", 0.0).unwrap();

        ctx.handle_event(click(100.0, 400.0, 0.0)).unwrap();
        assert_eq!(ctx.modal().state(), ModalState::Open(0));
        assert_eq!(ctx.snapshot().open_project, Some(PROJECTS[0].id));

        // inside the panel
        ctx.handle_event(click(720.0, 450.0, 100.0)).unwrap();
        assert!(ctx.modal().is_open());

        ctx.handle_event(click(20.0, 20.0, 500.0)).unwrap();
        assert_eq!(ctx.modal().state(), ModalState::Closing(0));
        assert_eq!(ctx.snapshot().open_project, None);

        run(&mut ctx, 500.0, 30);
        assert_eq!(ctx.modal().state(), ModalState::Closed);
    }

    #[test]
    fn test_navigation_dismisses_project() {
        let mut ctx = context();
        ctx.start("/portfolio", 0.0).unwrap();
        ctx.open_project(3, 0.0).unwrap();
        assert_eq!(ctx.reveal_phase(PANEL_KEY), RevealPhase::Running);

        ctx.navigate("/", 100.0).unwrap();
        assert_eq!(ctx.modal().state(), ModalState::Closed);
        assert_eq!(ctx.reveal_phase(PANEL_KEY), RevealPhase::Idle);
        assert!(matches!(
            ctx.open_project(0, 200.0),
            Err(SiteError::ProjectUnavailable(0))
        ));

        ctx.navigate("/portfolio", 300.0).unwrap();
        assert!(matches!(
            ctx.open_project(PROJECTS.len(), 300.0),
            Err(SiteError::ProjectUnavailable(_))
        ));
    }

    #[test]
    fn test_contact_result_times_from_answer() {
        let mut ctx = context();
        ctx.start("/", 0.0).unwrap();
        ctx.contact_mut()
            .set_fields(ContactFields::new("Ada", "ada@example.com", "Hello"));
        let submission = ctx.contact_mut().begin_submit().unwrap();
        assert_eq!(submission.email, "ada@example.com");

        // frames keep running while the relay is awaited elsewhere
        let answered = run(&mut ctx, 0.0, 60);
        assert_eq!(ctx.contact().status(), FormStatus::Submitting);
        assert_eq!(ctx.now_ms(), answered);

        ctx.contact_mut().finish(Ok(()), answered);
        ctx.frame(answered + 4_999.0).unwrap();
        assert_eq!(ctx.contact().status(), FormStatus::Success);
        ctx.frame(answered + 5_000.0).unwrap();
        assert_eq!(ctx.contact().status(), FormStatus::Idle);
    }
}
