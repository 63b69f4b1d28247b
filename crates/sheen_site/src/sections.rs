//! Section plans
//!
//! Each section declares how tall it lays out, which reveal groups it
//! registers when mounted, and how many of its cards tilt under the
//! pointer. Viewport thresholds are the fraction of the section that must
//! be visible before its groups start.

use crate::content::{ABOUT_STATS, PROJECTS, SERVICES, TESTIMONIALS};
use serde::{Deserialize, Serialize};
use sheen_animation::RevealPreset;
use std::fmt;

/// A page section
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Hero,
    Services,
    Reviews,
    About,
    Portfolio,
    Contact,
}

impl SectionKind {
    /// DOM-style id, also the anchor name
    pub fn id(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Services => "services",
            SectionKind::Reviews => "reviews",
            SectionKind::About => "about",
            SectionKind::Portfolio => "portfolio",
            SectionKind::Contact => "contact",
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Self> {
        [
            SectionKind::Hero,
            SectionKind::Services,
            SectionKind::Reviews,
            SectionKind::About,
            SectionKind::Portfolio,
            SectionKind::Contact,
        ]
        .into_iter()
        .find(|kind| kind.id() == anchor)
    }

    pub fn plan(&self) -> SectionPlan {
        match self {
            SectionKind::Hero => SectionPlan {
                kind: *self,
                height: SectionHeight::Viewport,
                reveals: vec![
                    RevealPlan::on_mount("eyebrow", 1, RevealPreset::eyebrow()),
                    RevealPlan::on_mount("title", 3, RevealPreset::hero_title()),
                ],
                tilt_cards: 0,
            },
            SectionKind::Services => SectionPlan {
                kind: *self,
                height: SectionHeight::Fixed(1400.0),
                reveals: vec![
                    RevealPlan::on_entry("heading", 1, RevealPreset::section_heading(), 0.1),
                    RevealPlan::on_entry("cards", SERVICES.len(), RevealPreset::service_cards(), 0.1),
                ],
                tilt_cards: 0,
            },
            SectionKind::Reviews => SectionPlan {
                kind: *self,
                height: SectionHeight::Fixed(760.0),
                reveals: vec![RevealPlan::on_entry(
                    "cards",
                    TESTIMONIALS.len(),
                    RevealPreset::review_cards(),
                    0.15,
                )],
                tilt_cards: 0,
            },
            SectionKind::About => SectionPlan {
                kind: *self,
                height: SectionHeight::Fixed(960.0),
                reveals: vec![
                    RevealPlan::on_entry("heading", 1, RevealPreset::section_heading(), 0.1),
                    RevealPlan::on_entry("stats", ABOUT_STATS.len(), RevealPreset::about_stats(), 0.05),
                ],
                tilt_cards: 0,
            },
            SectionKind::Portfolio => SectionPlan {
                kind: *self,
                height: SectionHeight::Fixed(1800.0),
                reveals: vec![
                    RevealPlan::on_entry("heading", 1, RevealPreset::section_heading(), 0.1),
                    RevealPlan::on_entry("cards", PROJECTS.len(), RevealPreset::portfolio_cards(), 0.15),
                ],
                tilt_cards: PROJECTS.len(),
            },
            SectionKind::Contact => SectionPlan {
                kind: *self,
                height: SectionHeight::Fixed(1100.0),
                reveals: vec![RevealPlan::on_entry(
                    "eyebrow",
                    1,
                    RevealPreset::slide_in_left(10.0),
                    0.2,
                )],
                tilt_cards: 0,
            },
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How tall a section lays out
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SectionHeight {
    /// At least one full viewport
    Viewport,
    Fixed(f32),
}

impl SectionHeight {
    pub fn resolve(&self, viewport_height: f32) -> f32 {
        match self {
            SectionHeight::Viewport => viewport_height,
            SectionHeight::Fixed(height) => *height,
        }
    }
}

/// When a planned group starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerPlan {
    OnMount,
    /// Fraction of the section that must be visible
    OnViewportEntry { threshold: f32 },
}

/// One reveal group a section registers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPlan {
    pub name: &'static str,
    pub elements: usize,
    pub preset: RevealPreset,
    pub trigger: TriggerPlan,
}

impl RevealPlan {
    pub fn on_mount(name: &'static str, elements: usize, preset: RevealPreset) -> Self {
        Self {
            name,
            elements,
            preset,
            trigger: TriggerPlan::OnMount,
        }
    }

    pub fn on_entry(name: &'static str, elements: usize, preset: RevealPreset, threshold: f32) -> Self {
        Self {
            name,
            elements,
            preset,
            trigger: TriggerPlan::OnViewportEntry { threshold },
        }
    }

    /// Animator key, e.g. `services.cards`
    pub fn key(&self, section: SectionKind) -> String {
        format!("{}.{}", section.id(), self.name)
    }
}

/// Everything a section registers when mounted
#[derive(Clone, Debug, PartialEq)]
pub struct SectionPlan {
    pub kind: SectionKind,
    pub height: SectionHeight,
    pub reveals: Vec<RevealPlan>,
    /// Cards (from the `cards` group) that tilt under the pointer
    pub tilt_cards: usize,
}
