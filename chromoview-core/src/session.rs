//! A mounted chromosome viewer: persisted state, chromosomes and overlays
//!
//! Clicking one chromosome counts as a click-away for every other open
//! overlay, so at most one overlay is open at a time.

use crate::bands::{compose_bands, Band};
use crate::coords::MeasureElement;
use crate::error::{ChromoError, ChromoResult};
use crate::genes::GeneSource;
use crate::notice::{Notice, NoticeBoard};
use crate::selection::{OverlayStyle, QueryOutcome, SelectionController};
use crate::state::{reduce, ViewerAction, ViewerState};
use crate::types::ChromosomeItem;
use std::collections::HashMap;

pub struct ViewerSession {
    state: ViewerState,
    chromosomes: Vec<ChromosomeItem>,
    controllers: HashMap<String, SelectionController>,
    notices: NoticeBoard,
    overlay_style: OverlayStyle,
}

impl ViewerSession {
    pub fn new(state: ViewerState) -> Self {
        Self {
            state,
            chromosomes: Vec::new(),
            controllers: HashMap::new(),
            notices: NoticeBoard::new(),
            overlay_style: OverlayStyle::default(),
        }
    }

    pub fn with_overlay_style(mut self, style: OverlayStyle) -> Self {
        self.overlay_style = style;
        self
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn dispatch(&mut self, action: ViewerAction) {
        log::debug!("dispatch {:?}", action);
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Install freshly loaded metadata. On failure a notice is posted and the
    /// previous chromosomes stay in place. Returns whether the load applied.
    pub fn load_chromosomes(&mut self, result: anyhow::Result<Vec<ChromosomeItem>>) -> bool {
        match result {
            Ok(chromosomes) => {
                for controller in self.controllers.values_mut() {
                    controller.dispose();
                }
                self.controllers = chromosomes
                    .iter()
                    .map(|c| {
                        let controller = SelectionController::new(c.id.clone(), c.size)
                            .with_style(self.overlay_style);
                        (c.id.clone(), controller)
                    })
                    .collect();
                self.chromosomes = chromosomes;
                true
            }
            Err(e) => {
                self.notices
                    .post(Notice::error(format!("Could not load chromosomes: {:#}", e)));
                false
            }
        }
    }

    pub fn chromosomes(&self) -> &[ChromosomeItem] {
        &self.chromosomes
    }

    pub fn chromosome(&self, id: &str) -> ChromoResult<&ChromosomeItem> {
        self.chromosomes
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ChromoError::unknown_chromosome(id))
    }

    pub fn bands(&self, id: &str) -> ChromoResult<Vec<Band>> {
        self.chromosome(id).map(compose_bands)
    }

    pub fn controller(&self, id: &str) -> Option<&SelectionController> {
        self.controllers.get(id)
    }

    /// The chromosome whose overlay is open, if any.
    pub fn open_overlay(&self) -> Option<&SelectionController> {
        self.controllers.values().find(|c| c.is_open())
    }

    /// Click on a chromosome and resolve the resulting gene query.
    ///
    /// Returns `None` when the click mapped to no range.
    pub fn click<M, G>(
        &mut self,
        id: &str,
        x: f64,
        y: f64,
        measure: &M,
        genes: &G,
    ) -> ChromoResult<Option<QueryOutcome>>
    where
        M: MeasureElement + ?Sized,
        G: GeneSource + ?Sized,
    {
        if !self.controllers.contains_key(id) {
            return Err(ChromoError::unknown_chromosome(id));
        }
        for (other_id, controller) in self.controllers.iter_mut() {
            if other_id != id {
                controller.dismiss();
            }
        }

        let controller = self
            .controllers
            .get_mut(id)
            .ok_or_else(|| ChromoError::unknown_chromosome(id))?;
        let Some(query) = controller.click(x, y, measure) else {
            return Ok(None);
        };
        let result = genes.genes_in_range(&query.chromosome_id, query.range);
        let outcome = controller.complete_query(query.ticket, result);
        if let QueryOutcome::Failed(notice) = &outcome {
            self.notices.post(notice.clone());
        }
        Ok(Some(outcome))
    }

    pub fn dismiss(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.dismiss();
        }
    }

    pub fn hover(&mut self, id: &str, entered: bool) -> ChromoResult<()> {
        let controller = self
            .controllers
            .get_mut(id)
            .ok_or_else(|| ChromoError::unknown_chromosome(id))?;
        if entered {
            controller.pointer_enter();
        } else {
            controller.pointer_leave();
        }
        Ok(())
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Unmount: late query results are discarded from now on.
    pub fn teardown(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.dispose();
        }
    }
}
