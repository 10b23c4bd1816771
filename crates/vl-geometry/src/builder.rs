//! Incremental panel geometry builder.

use vl_core::WingId;

use crate::error::GeometryResult;
use crate::panel::{Panel, PanelGeometry, WingLayout};
use crate::validate;

/// Builder for constructing panel geometry incrementally.
///
/// Declare wings with `add_wing`, push their panels strip by strip (root to tip,
/// leading-edge row first), then call `build()` to validate and freeze the result.
#[derive(Debug)]
pub struct PanelGeometryBuilder {
    chordwise_panels: usize,
    wings: Vec<WingLayout>,
    panels: Vec<Panel>,
}

impl PanelGeometryBuilder {
    /// Create a new empty builder for strips of `chordwise_panels` rows.
    pub fn new(chordwise_panels: usize) -> Self {
        Self {
            chordwise_panels,
            wings: Vec::new(),
            panels: Vec::new(),
        }
    }

    /// Declare a wing and return its ID.
    pub fn add_wing(&mut self, tag: impl Into<String>, area: f64, strips: usize) -> WingId {
        let id = WingId::from_index(self.wings.len() as u32);
        self.wings.push(WingLayout {
            id,
            tag: tag.into(),
            area,
            strips,
        });
        id
    }

    /// Append a panel. Panels must arrive in wing → strip → row order.
    pub fn push_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    /// Number of panels pushed so far.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Validate and return an immutable `PanelGeometry`.
    pub fn build(self) -> GeometryResult<PanelGeometry> {
        validate::validate_wings(&self.wings, self.chordwise_panels)?;
        let wing_offsets =
            validate::validate_ordering(&self.wings, &self.panels, self.chordwise_panels)?;
        validate::validate_panels(&self.panels)?;

        tracing::debug!(
            wings = self.wings.len(),
            panels = self.panels.len(),
            chordwise = self.chordwise_panels,
            "panel geometry built"
        );

        Ok(PanelGeometry {
            wings: self.wings,
            panels: self.panels,
            chordwise_panels: self.chordwise_panels,
            wing_offsets,
        })
    }
}
