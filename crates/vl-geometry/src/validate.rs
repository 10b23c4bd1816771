//! Panel geometry validation logic.

use std::collections::HashSet;
use vl_core::ensure_finite;

use crate::error::{GeometryError, GeometryResult};
use crate::panel::{Panel, WingLayout};

/// Lengths below this are treated as collapsed [m].
const DEGENERATE_LENGTH: f64 = 1e-9;

/// Validate wing declarations: tags, areas, strip counts.
pub(crate) fn validate_wings(wings: &[WingLayout], chordwise_panels: usize) -> GeometryResult<()> {
    if chordwise_panels == 0 {
        return Err(GeometryError::Empty {
            what: "chordwise panels",
        });
    }
    if wings.is_empty() {
        return Err(GeometryError::Empty { what: "wings" });
    }

    let mut tags = HashSet::new();
    for wing in wings {
        if wing.tag.trim().is_empty() {
            return Err(GeometryError::EmptyWingTag);
        }
        if !tags.insert(wing.tag.as_str()) {
            return Err(GeometryError::DuplicateWingTag {
                tag: wing.tag.clone(),
            });
        }
        if !(wing.area.is_finite() && wing.area > 0.0) {
            return Err(GeometryError::InvalidWing {
                tag: wing.tag.clone(),
                what: "area",
                value: wing.area,
            });
        }
        if wing.strips == 0 {
            return Err(GeometryError::InvalidWing {
                tag: wing.tag.clone(),
                what: "strip count",
                value: 0.0,
            });
        }
    }
    Ok(())
}

/// Check panels are grouped by wing in declaration order with the declared counts.
///
/// Returns the panel offset of each wing plus a trailing total.
pub(crate) fn validate_ordering(
    wings: &[WingLayout],
    panels: &[Panel],
    chordwise_panels: usize,
) -> GeometryResult<Vec<usize>> {
    if panels.is_empty() {
        return Err(GeometryError::Empty { what: "panels" });
    }

    for (index, panel) in panels.iter().enumerate() {
        if panel.wing.index() as usize >= wings.len() {
            return Err(GeometryError::UnknownWing {
                index,
                wing: panel.wing,
            });
        }
    }

    let mut offsets = Vec::with_capacity(wings.len() + 1);
    let mut cursor = 0;
    for wing in wings {
        offsets.push(cursor);
        let expected = wing.strips * chordwise_panels;
        let actual = panels[cursor..]
            .iter()
            .take_while(|p| p.wing == wing.id)
            .count();
        if actual < expected {
            if let Some(next) = panels.get(cursor + actual) {
                return Err(GeometryError::PanelOrder {
                    index: cursor + actual,
                    expected: wing.id,
                    found: next.wing,
                });
            }
        }
        if actual != expected {
            return Err(GeometryError::PanelCount {
                tag: wing.tag.clone(),
                expected,
                actual,
            });
        }
        cursor += actual;
    }

    if let Some(stray) = panels.get(cursor) {
        // Every declared wing is complete, so this panel repeats an earlier wing.
        return Err(GeometryError::PanelOrder {
            index: cursor,
            expected: wings[wings.len() - 1].id,
            found: stray.wing,
        });
    }

    offsets.push(cursor);
    Ok(offsets)
}

/// Check each panel is finite and has a usable shape.
pub(crate) fn validate_panels(panels: &[Panel]) -> GeometryResult<()> {
    for (index, panel) in panels.iter().enumerate() {
        for (name, point) in panel.points() {
            for c in point.iter() {
                ensure_finite(*c, name)?;
            }
        }
        ensure_finite(panel.strip_chord, "strip chord")?;

        if panel.span_width() < DEGENERATE_LENGTH {
            return Err(GeometryError::DegeneratePanel {
                index,
                reason: "zero span width",
            });
        }
        if (panel.collocation.x - panel.hinge.x).abs() < DEGENERATE_LENGTH {
            return Err(GeometryError::DegeneratePanel {
                index,
                reason: "zero chord",
            });
        }
        if (panel.bh.y - panel.ah.y).abs() < DEGENERATE_LENGTH {
            return Err(GeometryError::DegeneratePanel {
                index,
                reason: "vertical panel",
            });
        }
        if panel.strip_chord <= 0.0 {
            return Err(GeometryError::DegeneratePanel {
                index,
                reason: "non-positive strip chord",
            });
        }
    }
    Ok(())
}
