//! Piecewise-linear lookups over a volume-ascending sample table
//!
//! Both lookups expect `samples` sorted by ascending volume and a
//! non-increasing dose curve. Neither property is checked; the first
//! bracketing interval wins.

use crate::types::DvhSample;

/// Dose received by `volume`, or `None` outside the sampled range
pub(crate) fn dose_at_volume(samples: &[DvhSample], volume: f64) -> Option<f64> {
    if let Some(exact) = samples.iter().find(|s| s.volume == volume) {
        return Some(exact.dose);
    }
    if samples.len() < 2 {
        return None;
    }
    samples.windows(2).find_map(|pair| {
        let (r0, r1) = (pair[0], pair[1]);
        if r0.volume <= volume && volume <= r1.volume {
            interpolate_linear(volume, r0.volume, r1.volume, r0.dose, r1.dose)
        } else {
            None
        }
    })
}

/// Volume receiving `dose`, or `None` outside the sampled range
///
/// The bracket test runs in descending-dose order since ascending volume
/// implies descending dose.
pub(crate) fn volume_at_dose(samples: &[DvhSample], dose: f64) -> Option<f64> {
    if let Some(exact) = samples.iter().find(|s| s.dose == dose) {
        return Some(exact.volume);
    }
    if samples.len() < 2 {
        return None;
    }
    samples.windows(2).find_map(|pair| {
        let (r0, r1) = (pair[0], pair[1]);
        if r1.dose <= dose && dose <= r0.dose {
            interpolate_linear(dose, r0.dose, r1.dose, r0.volume, r1.volume)
        } else {
            None
        }
    })
}

/// `y0 + (y1 - y0) / (x1 - x0) * (x - x0)`
///
/// Returns `None` for a zero-width interval.
fn interpolate_linear(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> Option<f64> {
    let dx = x1 - x0;
    if dx == 0.0 {
        return None;
    }
    Some(y0 + (y1 - y0) / dx * (x - x0))
}
