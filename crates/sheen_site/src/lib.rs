//! Sheen Site
//!
//! The runtime of a single-page marketing site built on the Sheen motion
//! crates: a landing page and a portfolio page whose sections reveal as
//! they scroll into view, a loading sequence, a navbar that reacts to the
//! scroll position, a persisted dark/light theme, a project detail modal
//! and a contact form.
//!
//! Everything hangs off an explicitly constructed [`SiteContext`]:
//!
//! ```ignore
//! let mut site = SiteContext::new(SiteConfig::default(), Box::new(MemoryThemeStore::new()));
//! site.start("/", 0.0)?;
//! site.frame(16.7)?;
//! ```
//!
//! [`HeadlessScenario`] replays scripted input against a context without a
//! window, which is how the CLI and the integration tests drive it.

pub mod config;
pub mod contact;
pub mod content;
pub mod context;
pub mod error;
pub mod loading;
pub mod modal;
pub mod navbar;
pub mod page;
pub mod routes;
pub mod scenario;
pub mod sections;
pub mod theme;

pub use config::{ContactConfig, LayoutConfig, LoadingConfig, ScrollSettings, SiteConfig, ThemeConfig};
pub use contact::{
    ContactFields, ContactForm, ContactSubmission, FormRelay, FormStatus, HttpFormRelay,
};
pub use context::{SiteContext, SiteSnapshot};
pub use error::{FormError, RelayError, Result, SiteError, ThemeStoreError};
pub use loading::{LoadingPhase, LoadingScreen};
pub use modal::{ModalHit, ModalState, ProjectModal};
pub use navbar::Navbar;
pub use page::{Page, PageLayout};
pub use routes::{Location, Route, Router};
pub use scenario::{HeadlessScenario, ScenarioReport, ScenarioRunner, ScenarioStep};
pub use sections::{SectionKind, SectionPlan};
pub use theme::{FileThemeStore, MemoryThemeStore, ThemeMode, ThemeStore};
