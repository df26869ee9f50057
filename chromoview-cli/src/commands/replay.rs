//! Replay command - drive a viewer session from a JSON event script
//!
//! Time is virtual: only `tick` events advance the clock, so the relayout
//! nudge settles exactly when the script says so.

use anyhow::{Context, Result};
use chromoview_core::{
    AnnotationIndex, Camera, ChromosomeItem, GeneSource, NudgeStart, QueryOutcome, TransformBridge,
    ViewerSession, ViewerState, ViewportController,
};
use chromoview_render::{hit_test, ChromosomeLayout, PlacedChromosome, ScreenMeasure};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::load_chromosomes;
use crate::config::Config;
use crate::error::{require_file, CliError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    Click { x: f64, y: f64 },
    Hover { x: f64, y: f64 },
    Leave,
    Dismiss,
    Pan { dx: f64, dy: f64 },
    Zoom { delta: f64 },
    Tick { ms: u64 },
}

impl Event {
    fn validate(&self) -> Result<(), String> {
        let finite = match *self {
            Event::Click { x, y } | Event::Hover { x, y } => x.is_finite() && y.is_finite(),
            Event::Pan { dx, dy } => dx.is_finite() && dy.is_finite(),
            Event::Zoom { delta } => delta.is_finite(),
            Event::Leave | Event::Dismiss | Event::Tick { .. } => true,
        };
        if finite {
            Ok(())
        } else {
            Err("coordinates must be finite".to_string())
        }
    }
}

pub fn parse_events(json: &str, file: &str) -> Result<Vec<Event>, CliError> {
    let events: Vec<Event> =
        serde_json::from_str(json).map_err(|e| CliError::parse(file, e.to_string()))?;
    for (index, event) in events.iter().enumerate() {
        event
            .validate()
            .map_err(|message| CliError::invalid_event(index, message))?;
    }
    Ok(events)
}

/// A mounted viewer with a live camera, fed one event at a time.
pub struct Replay<'g, G: GeneSource + ?Sized> {
    session: ViewerSession,
    camera: Camera,
    bridge: TransformBridge,
    placed: Vec<PlacedChromosome>,
    genes: &'g G,
    start: Instant,
    elapsed: Duration,
    hovered: Option<String>,
}

impl<'g, G: GeneSource + ?Sized> Replay<'g, G> {
    pub fn new(config: &Config, chromosomes: Vec<ChromosomeItem>, genes: &'g G) -> Self {
        let state = ViewerState {
            transform: config.initial_transform(),
            ..ViewerState::default()
        };
        let mut session = ViewerSession::new(state).with_overlay_style(config.overlay_style());

        let mut placed = ChromosomeLayout::new(config.glyph_geometry(), config.render.spacing)
            .place(&chromosomes);
        for chromosome in placed.iter_mut() {
            chromosome.fit();
        }
        session.load_chromosomes(Ok(chromosomes));

        let mut camera = Camera::new(config.viewport.container_width, config.viewport.container_height);
        let mut bridge = TransformBridge::new(config.viewport_bounds());
        bridge.on_create(&mut camera, &session.state().transform);

        let start = Instant::now();
        if bridge.begin_nudge(&mut camera, start) == NudgeStart::Scheduled {
            session.dispatch(bridge.on_updated(&camera));
        }

        Self {
            session,
            camera,
            bridge,
            placed,
            genes,
            start,
            elapsed: Duration::ZERO,
            hovered: None,
        }
    }

    pub fn session(&self) -> &ViewerSession {
        &self.session
    }

    #[cfg(test)]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Apply one event and describe what happened.
    pub fn apply(&mut self, event: &Event) -> Result<String> {
        let description = match *event {
            Event::Click { x, y } => self.click(x, y)?,
            Event::Hover { x, y } => self.hover(x, y)?,
            Event::Leave => {
                self.leave()?;
                "leave".to_string()
            }
            Event::Dismiss => {
                self.session.dismiss();
                "dismiss".to_string()
            }
            Event::Pan { dx, dy } => {
                self.camera.move_by(dx, dy, 0.0);
                self.report_transform("pan")
            }
            Event::Zoom { delta } => {
                self.camera.move_by(0.0, 0.0, delta);
                self.report_transform("zoom")
            }
            Event::Tick { ms } => {
                self.elapsed += Duration::from_millis(ms);
                if self.bridge.poll_nudge(&mut self.camera, self.start + self.elapsed) {
                    self.report_transform("nudge settled")
                } else {
                    format!("tick +{}ms", ms)
                }
            }
        };
        Ok(description)
    }

    /// Tear down and return the persisted state.
    pub fn finish(mut self) -> ViewerState {
        self.bridge.cancel_nudge();
        self.session.teardown();
        self.session.state().clone()
    }

    fn click(&mut self, x: f64, y: f64) -> Result<String> {
        let Some(target) = hit_test(&self.placed, &self.camera, x, y) else {
            self.session.dismiss();
            return Ok("click-away".to_string());
        };
        let id = target.id().to_string();
        let measure = ScreenMeasure::new(target, &self.camera);
        let outcome = self.session.click(&id, x, y, &measure, self.genes)?;

        let view = self
            .session
            .controller(&id)
            .and_then(|controller| controller.overlay_view());
        let description = match (outcome, view) {
            (None, _) | (_, None) => format!("click {} -> no range", id),
            (Some(QueryOutcome::Failed(notice)), _) => format!("click {} -> {}", id, notice.message),
            (Some(_), Some(view)) => format!(
                "click {} -> {}-{}: {} elements{}{}",
                id,
                view.start_label.unwrap_or_default(),
                view.end_label.unwrap_or_default(),
                view.rows.len(),
                if view.rows.is_empty() { "" } else { " " },
                view.rows.join(", ")
            ),
        };
        Ok(description)
    }

    fn hover(&mut self, x: f64, y: f64) -> Result<String> {
        let target = hit_test(&self.placed, &self.camera, x, y).map(|p| p.id().to_string());
        if target != self.hovered {
            self.leave()?;
            if let Some(id) = &target {
                self.session.hover(id, true)?;
            }
            self.hovered = target;
        }
        Ok(match &self.hovered {
            Some(id) => format!("hover {} (pointer)", id),
            None => "hover nothing".to_string(),
        })
    }

    fn leave(&mut self) -> Result<()> {
        if let Some(previous) = self.hovered.take() {
            self.session.hover(&previous, false)?;
        }
        Ok(())
    }

    fn report_transform(&mut self, label: &str) -> String {
        self.session.dispatch(self.bridge.on_updated(&self.camera));
        let t = self.session.state().transform;
        format!("{} -> ({:.1}, {:.1}) zoom {:.3}", label, t.dx, t.dy, t.zoom)
    }
}

pub fn execute(
    config: &Config,
    chromosomes: PathBuf,
    genes: Option<PathBuf>,
    events: PathBuf,
) -> Result<()> {
    let all = load_chromosomes(&chromosomes)?;
    let index = match &genes {
        Some(path) => {
            require_file(path)?;
            AnnotationIndex::from_gff3_file(path)?
        }
        None => AnnotationIndex::new(),
    };

    require_file(&events)?;
    let script = std::fs::read_to_string(&events)
        .with_context(|| format!("Failed to read {}", events.display()))?;
    let script = parse_events(&script, &events.display().to_string())?;
    log::info!("Replaying {} events", script.len());

    let mut replay = Replay::new(config, all, &index);
    for (i, event) in script.iter().enumerate() {
        let description = replay
            .apply(event)
            .with_context(|| format!("Event #{} failed", i))?;
        println!("[{}] {}", i, description);
    }

    for posted in replay.session().notices().active() {
        println!("notice: {}", posted.notice.message);
    }
    let state = replay.finish();
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
