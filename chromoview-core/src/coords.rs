//! Conversions between base-pair positions and screen pixels
//!
//! Every conversion measures the painted chromosome element at call time.
//! The element's on-screen box moves with parent layout, flex containers and
//! viewport zoom, and nothing signals those changes, so no scale is cached.

use crate::error::{ChromoError, ChromoResult};
use crate::types::{BasePair, BpRange};
use serde::{Deserialize, Serialize};

/// Absorbs f64 noise so that an exact integer never floors to its predecessor.
const ROUNDING_SLACK: f64 = 1e-6;

/// On-screen vertical extent of a painted chromosome element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Live bounding-box query for a painted chromosome.
///
/// Returns `None` while the element is not mounted or not laid out.
pub trait MeasureElement {
    fn measure(&self) -> Option<ElementBox>;
}

impl MeasureElement for ElementBox {
    fn measure(&self) -> Option<ElementBox> {
        Some(*self)
    }
}

impl MeasureElement for Option<ElementBox> {
    fn measure(&self) -> Option<ElementBox> {
        *self
    }
}

/// Scale derived from one measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub element: ElementBox,
    pub bp_per_pixel: f64,
}

impl Scale {
    pub fn pixels_per_bp(&self) -> f64 {
        1.0 / self.bp_per_pixel
    }
}

/// Maps between base pairs of one chromosome and screen y-coordinates.
pub struct CoordinateMapper<'a, M: MeasureElement + ?Sized> {
    size: BasePair,
    measure: &'a M,
}

impl<'a, M: MeasureElement + ?Sized> CoordinateMapper<'a, M> {
    pub fn new(size: BasePair, measure: &'a M) -> Self {
        Self { size, measure }
    }

    /// Measure the element and derive the current scale.
    pub fn scale(&self) -> ChromoResult<Scale> {
        if self.size <= 1 {
            return Err(ChromoError::DegenerateChromosome { size: self.size });
        }
        let element = self
            .measure
            .measure()
            .ok_or(ChromoError::GeometryUnavailable)?;
        if !element.top.is_finite() || !element.height.is_finite() || element.height <= 1.0 {
            return Err(ChromoError::GeometryUnavailable);
        }
        Ok(Scale {
            element,
            bp_per_pixel: self.size as f64 / (element.height - 1.0),
        })
    }

    pub fn bp_per_pixel(&self) -> Option<f64> {
        self.scale().ok().map(|s| s.bp_per_pixel)
    }

    pub fn pixels_per_bp(&self) -> Option<f64> {
        self.scale().ok().map(|s| s.pixels_per_bp())
    }

    /// Screen y-coordinate of a 1-indexed base pair.
    pub fn bp_to_pixel(&self, bp: BasePair) -> Option<f64> {
        let scale = self.scale().ok()?;
        Some(scale.element.top + (bp as f64 - 1.0) * scale.pixels_per_bp() + 1.0)
    }

    /// Base-pair range covered by the pixel row at `screen_y`.
    ///
    /// One pixel spans many base pairs on a long chromosome, so the answer is
    /// a range rather than a position. Clicks outside the element, and any
    /// degenerate geometry, give `None`.
    pub fn pixel_to_bp(&self, screen_y: f64) -> Option<BpRange> {
        let scale = self.scale().ok()?;
        let top = scale.element.top;
        if !(screen_y > top && screen_y < scale.element.bottom()) {
            return None;
        }

        let start = floor_bp((screen_y - 1.0 - top) * scale.bp_per_pixel + 1.0)
            .max(1)
            .min(self.size);
        let end = floor_bp((screen_y - top) * scale.bp_per_pixel)
            .min(self.size)
            .max(start);
        Some(BpRange { start, end })
    }
}

fn floor_bp(value: f64) -> BasePair {
    let floored = (value + ROUNDING_SLACK).floor();
    if floored <= 0.0 {
        0
    } else {
        floored as BasePair
    }
}

/// Format a base-pair position with thousands separators, e.g. `15,086,046`.
pub fn format_bp(bp: BasePair) -> String {
    let digits = bp.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHR1_SIZE: BasePair = 30_427_671;

    #[test]
    fn test_chr1_midpoint_click() {
        let element = ElementBox::new(0.0, 500.0);
        let mapper = CoordinateMapper::new(CHR1_SIZE, &element);

        let range = mapper.pixel_to_bp(250.0).unwrap();
        assert_eq!(range.start, 15_183_347);
        assert_eq!(range.end, 15_244_324);
        assert!(range.contains(CHR1_SIZE / 2));
        // CEN1 spans 15,086,046-15,087,045: the midpoint row lies just past it.
        assert!(range.start > 15_087_045);
    }

    #[test]
    fn test_outside_element_is_no_selection() {
        let element = ElementBox::new(100.0, 500.0);
        let mapper = CoordinateMapper::new(CHR1_SIZE, &element);

        for y in [-5.0, 0.0, 99.0, 100.0, 600.0, 601.5, 10_000.0] {
            assert_eq!(mapper.pixel_to_bp(y), None, "y = {}", y);
        }
        assert!(mapper.pixel_to_bp(100.5).is_some());
        assert!(mapper.pixel_to_bp(599.9).is_some());
    }

    #[test]
    fn test_round_trip_contains_bp() {
        let element = ElementBox::new(37.0, 456.0);
        let mapper = CoordinateMapper::new(CHR1_SIZE, &element);

        let samples = [
            1,
            2,
            60_000,
            15_086_046,
            15_087_045,
            15_213_835,
            CHR1_SIZE - 1,
            CHR1_SIZE,
        ];
        for bp in samples {
            let y = mapper.bp_to_pixel(bp).unwrap();
            let range = mapper.pixel_to_bp(y).unwrap();
            assert!(range.contains(bp), "bp {} -> y {} -> {}", bp, y, range);
        }
    }

    #[test]
    fn test_round_trip_when_pixels_outnumber_bases() {
        let element = ElementBox::new(0.0, 800.0);
        let mapper = CoordinateMapper::new(120, &element);

        for bp in 1..=120 {
            let y = mapper.bp_to_pixel(bp).unwrap();
            let range = mapper.pixel_to_bp(y).unwrap();
            assert!(range.start <= range.end);
            assert!(range.contains(bp), "bp {} -> {}", bp, range);
        }
    }

    #[test]
    fn test_end_is_clamped_to_size() {
        let element = ElementBox::new(0.0, 500.0);
        let mapper = CoordinateMapper::new(CHR1_SIZE, &element);

        let range = mapper.pixel_to_bp(499.99).unwrap();
        assert_eq!(range.end, CHR1_SIZE);
    }

    #[test]
    fn test_degenerate_sizes_short_circuit() {
        let element = ElementBox::new(0.0, 500.0);
        for size in [0, 1] {
            let mapper = CoordinateMapper::new(size, &element);
            assert_eq!(
                mapper.scale(),
                Err(ChromoError::DegenerateChromosome { size })
            );
            assert_eq!(mapper.pixels_per_bp(), None);
            assert_eq!(mapper.pixel_to_bp(250.0), None);
            assert_eq!(mapper.bp_to_pixel(1), None);
        }
    }

    #[test]
    fn test_unmeasurable_element() {
        let unmounted: Option<ElementBox> = None;
        let mapper = CoordinateMapper::new(CHR1_SIZE, &unmounted);
        assert_eq!(mapper.scale(), Err(ChromoError::GeometryUnavailable));

        let collapsed = ElementBox::new(0.0, 0.0);
        let mapper = CoordinateMapper::new(CHR1_SIZE, &collapsed);
        assert_eq!(mapper.pixel_to_bp(0.5), None);
    }

    #[test]
    fn test_measurement_is_not_cached() {
        use std::cell::Cell;

        struct Resizing(Cell<f64>);
        impl MeasureElement for Resizing {
            fn measure(&self) -> Option<ElementBox> {
                Some(ElementBox::new(0.0, self.0.get()))
            }
        }

        let element = Resizing(Cell::new(500.0));
        let mapper = CoordinateMapper::new(CHR1_SIZE, &element);
        let before = mapper.pixel_to_bp(250.0).unwrap();
        element.0.set(1000.0);
        let after = mapper.pixel_to_bp(250.0).unwrap();
        assert!(after.end < before.end);
    }

    #[test]
    fn test_format_bp() {
        assert_eq!(format_bp(0), "0");
        assert_eq!(format_bp(999), "999");
        assert_eq!(format_bp(1000), "1,000");
        assert_eq!(format_bp(15_086_046), "15,086,046");
        assert_eq!(format_bp(154_478), "154,478");
    }
}
