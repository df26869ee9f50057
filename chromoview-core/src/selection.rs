//! Click-to-range selection overlay for one chromosome
//!
//! The controller is either `Idle` or `Open`. A click opens (or re-anchors)
//! the overlay, converts the click's y-coordinate into a base-pair range and
//! hands back a [`GeneQuery`] for the caller to resolve. Results come back
//! through [`SelectionController::complete_query`] and are dropped when they
//! belong to an older click or arrive after [`SelectionController::dispose`].

use crate::coords::{format_bp, CoordinateMapper, MeasureElement};
use crate::error::GeneSourceError;
use crate::notice::Notice;
use crate::types::{BasePair, BpRange, GeneticElement};
use serde::{Deserialize, Serialize};

/// Screen position of the click that opened the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPosition {
    pub x: f64,
    pub y: f64,
}

/// Absolute position of the overlay's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayAnchor {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Horizontal offset from the click
    pub offset_x: f64,
    /// Vertical offset from the click
    pub offset_y: f64,
    pub content_width: f64,
    pub content_height: f64,
    pub row_height: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            offset_x: 20.0,
            offset_y: -60.0,
            content_width: 200.0,
            content_height: 100.0,
            row_height: 20.0,
        }
    }
}

impl OverlayStyle {
    pub fn anchor_for(&self, anchor: AnchorPosition) -> OverlayAnchor {
        OverlayAnchor {
            left: anchor.x + self.offset_x,
            top: anchor.y + self.offset_y,
        }
    }

    /// Whether `rows` gene rows overflow the fixed content viewport.
    pub fn needs_scroll(&self, rows: usize) -> bool {
        rows as f64 * self.row_height > self.content_height
    }
}

/// Identifies the click a gene query belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryTicket(u64);

/// Gene lookup requested by a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneQuery {
    pub ticket: QueryTicket,
    pub chromosome_id: String,
    pub range: BpRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneList {
    /// The click mapped to no range, so nothing was asked for
    NotRequested,
    Pending(QueryTicket),
    Loaded(Vec<GeneticElement>),
    Failed,
}

impl GeneList {
    pub fn elements(&self) -> &[GeneticElement] {
        match self {
            GeneList::Loaded(elements) => elements,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayState {
    Idle,
    Open {
        anchor: AnchorPosition,
        selection: Option<BpRange>,
        genes: GeneList,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    Default,
    Pointer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Applied,
    /// Stale ticket, overlay closed, or controller disposed
    Discarded,
    Failed(Notice),
}

/// Everything the overlay paints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub anchor: OverlayAnchor,
    pub start_label: Option<String>,
    pub end_label: Option<String>,
    pub rows: Vec<String>,
    pub loading: bool,
    pub scrollable: bool,
}

/// Hover and selection state of a single chromosome.
#[derive(Debug)]
pub struct SelectionController {
    chromosome_id: String,
    chromosome_size: BasePair,
    style: OverlayStyle,
    state: OverlayState,
    hovered: bool,
    next_ticket: u64,
    disposed: bool,
}

impl SelectionController {
    pub fn new(chromosome_id: impl Into<String>, chromosome_size: BasePair) -> Self {
        Self {
            chromosome_id: chromosome_id.into(),
            chromosome_size,
            style: OverlayStyle::default(),
            state: OverlayState::Idle,
            hovered: false,
            next_ticket: 0,
            disposed: false,
        }
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn chromosome_id(&self) -> &str {
        &self.chromosome_id
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open { .. })
    }

    pub fn selection(&self) -> Option<BpRange> {
        match &self.state {
            OverlayState::Open { selection, .. } => *selection,
            OverlayState::Idle => None,
        }
    }

    pub fn anchor(&self) -> Option<AnchorPosition> {
        match &self.state {
            OverlayState::Open { anchor, .. } => Some(*anchor),
            OverlayState::Idle => None,
        }
    }

    /// Handle a click on the chromosome's hit region.
    ///
    /// Geometry is measured now, not reused from an earlier click.
    pub fn click<M: MeasureElement + ?Sized>(
        &mut self,
        x: f64,
        y: f64,
        measure: &M,
    ) -> Option<GeneQuery> {
        if self.disposed {
            log::debug!("{}: click after dispose ignored", self.chromosome_id);
            return None;
        }

        let anchor = AnchorPosition { x, y };
        let selection = CoordinateMapper::new(self.chromosome_size, measure).pixel_to_bp(y);
        let reopened = self.is_open();

        let (genes, query) = match selection {
            Some(range) => {
                let ticket = self.issue_ticket();
                let query = GeneQuery {
                    ticket,
                    chromosome_id: self.chromosome_id.clone(),
                    range,
                };
                (GeneList::Pending(ticket), Some(query))
            }
            None => (GeneList::NotRequested, None),
        };

        log::debug!(
            "{}: {} at ({:.1}, {:.1}) -> {}",
            self.chromosome_id,
            if reopened { "re-anchor" } else { "open" },
            x,
            y,
            selection.map(|r| r.to_string()).unwrap_or_else(|| "no range".into())
        );

        self.state = OverlayState::Open {
            anchor,
            selection,
            genes,
        };
        query
    }

    /// Apply the result of a gene query.
    pub fn complete_query(
        &mut self,
        ticket: QueryTicket,
        result: Result<Vec<GeneticElement>, GeneSourceError>,
    ) -> QueryOutcome {
        if self.disposed {
            log::debug!("{}: result for {:?} after dispose", self.chromosome_id, ticket);
            return QueryOutcome::Discarded;
        }
        let genes = match &mut self.state {
            OverlayState::Open { genes, .. } if *genes == GeneList::Pending(ticket) => genes,
            _ => {
                log::debug!("{}: stale result for {:?}", self.chromosome_id, ticket);
                return QueryOutcome::Discarded;
            }
        };

        match result {
            Ok(mut elements) => {
                elements.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
                *genes = GeneList::Loaded(elements);
                QueryOutcome::Applied
            }
            Err(e) => {
                *genes = GeneList::Failed;
                QueryOutcome::Failed(Notice::error(format!(
                    "Could not load genetic elements for {}: {}",
                    self.chromosome_id, e
                )))
            }
        }
    }

    /// Close the overlay. Hover state is left alone.
    pub fn dismiss(&mut self) {
        if self.is_open() {
            log::debug!("{}: overlay dismissed", self.chromosome_id);
        }
        self.state = OverlayState::Idle;
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn cursor(&self) -> Cursor {
        if self.hovered {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    /// Tear the controller down. Late query results are discarded from now on.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.state = OverlayState::Idle;
        self.hovered = false;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn overlay_anchor(&self) -> Option<OverlayAnchor> {
        self.anchor().map(|a| self.style.anchor_for(a))
    }

    pub fn overlay_view(&self) -> Option<OverlayView> {
        let OverlayState::Open {
            anchor,
            selection,
            genes,
        } = &self.state
        else {
            return None;
        };

        let rows: Vec<String> = genes
            .elements()
            .iter()
            .map(|e| e.display_name().to_string())
            .collect();
        Some(OverlayView {
            anchor: self.style.anchor_for(*anchor),
            start_label: selection.map(|r| format_bp(r.start)),
            end_label: selection.map(|r| format_bp(r.end)),
            scrollable: self.style.needs_scroll(rows.len()),
            loading: matches!(genes, GeneList::Pending(_)),
            rows,
        })
    }

    fn issue_ticket(&mut self) -> QueryTicket {
        let ticket = QueryTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }
}
