use anyhow::{Context, Result};
use sheen_core::events::{event_types, WINDOW_TARGET};
use sheen_core::{Event, EventData};
use sheen_site::{HeadlessScenario, ScenarioRunner, SiteConfig, SiteContext};
use std::path::Path;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Run `frames` frames on `route`, spreading the wheel deltas evenly
pub fn run(config: SiteConfig, route: &str, frames: u32, wheel: &[f32]) -> Result<()> {
    let store = super::theme_store(&config);
    let mut site = SiteContext::new(config, Box::new(store));
    site.start(route, 0.0)
        .with_context(|| format!("Failed to start site at {route}"))?;

    let spacing = (frames / (wheel.len() as u32 + 1)).max(1);
    let mut pending = wheel.iter();
    let mut now = 0.0;

    for frame in 1..=frames {
        if frame % spacing == 0 {
            if let Some(&delta_y) = pending.next() {
                let data = EventData::Wheel {
                    delta_x: 0.0,
                    delta_y,
                };
                site.handle_event(Event::new(event_types::WHEEL, WINDOW_TARGET, data, now))?;
            }
        }
        now += FRAME_MS;
        site.frame(now)?;
    }

    let snapshot = site.snapshot();
    site.shutdown();

    tracing::info!(
        frames,
        position = snapshot.scroll_position,
        revealed = snapshot.revealed.len(),
        "simulation finished"
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

pub fn scenario(config: SiteConfig, path: &Path) -> Result<()> {
    let scenario = HeadlessScenario::from_path(path)
        .with_context(|| format!("Failed to load scenario {}", path.display()))?;

    let store = super::theme_store(&config);
    let report = ScenarioRunner::new()
        .execute(config, Box::new(store), &scenario)
        .with_context(|| format!("Scenario {} failed", path.display()))?;

    tracing::info!(steps = report.steps, frames = report.frames, "scenario passed");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
