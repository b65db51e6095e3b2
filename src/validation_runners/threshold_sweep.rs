//! Re-runs validation across a grid of confidence thresholds.

use anyhow::Result;
use crate::common::ValidatorConfig;
use crate::data::SweepPoint;
use crate::error::ValidationError;
use crate::validation_runners::{FrameSource, Validator};

/// Lazy sweep over confidence thresholds. Each point is a full, independent validation run
/// at that threshold, so [`iter`](Self::iter) can be restarted and always yields the same points.
pub struct ThresholdSweep<'a, S: FrameSource + ?Sized> {
    source: &'a S,
    config: ValidatorConfig,
    thresholds: Vec<f32>,
}

impl<'a, S: FrameSource + ?Sized> ThresholdSweep<'a, S> {
    pub fn new(source: &'a S, config: ValidatorConfig, thresholds: &[f32]) -> Self {
        Self {
            source,
            config,
            thresholds: thresholds.to_vec(),
        }
    }

    /// Sweep over `start..=stop` in increments of `step`, see [`linspace`].
    pub fn with_linspace(source: &'a S, config: ValidatorConfig, start: f32, stop: f32, step: f32) -> Result<Self> {
        Ok(Self::new(source, config, &linspace(start, stop, step)?))
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    pub fn iter(&self) -> SweepIter<'_, S> {
        SweepIter {
            source: self.source,
            config: &self.config,
            thresholds: self.thresholds.iter(),
        }
    }

    /// Runs every point, stopping at the first failing run.
    pub fn collect_points(&self) -> Result<Vec<SweepPoint>> {
        self.iter().collect()
    }
}

/// Yields one [`SweepPoint`] per threshold, in grid order.
pub struct SweepIter<'s, S: FrameSource + ?Sized> {
    source: &'s S,
    config: &'s ValidatorConfig,
    thresholds: std::slice::Iter<'s, f32>,
}

impl<'s, S: FrameSource + ?Sized> Iterator for SweepIter<'s, S> {
    type Item = Result<SweepPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        let threshold = *self.thresholds.next()?;
        Some(run_point(self.source, self.config, threshold))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.thresholds.size_hint()
    }
}

fn run_point<S: FrameSource + ?Sized>(source: &S, config: &ValidatorConfig, threshold: f32) -> Result<SweepPoint> {
    let mut validator = Validator::new(config.clone().with_confidence_threshold(threshold))?;
    let state = validator.validate(source)?;
    let point = SweepPoint::from_state(threshold, state);
    log::debug!("conf >= {:.3}: P={:.4} R={:.4} F1={:.4}", threshold, point.precision, point.recall, point.f1);
    Ok(point)
}

/// Evenly spaced thresholds from `start` to `stop` inclusive.
///
/// Points are computed as `start + i * step` rather than by repeated addition, so the last
/// point does not drift past `stop`.
pub fn linspace(start: f32, stop: f32, step: f32) -> Result<Vec<f32>> {
    if !(step > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Err(ValidationError::InvalidConfig(format!(
            "sweep step must be positive and bounds finite, got start={} stop={} step={}",
            start, stop, step
        )).into());
    }
    if start > stop {
        return Err(ValidationError::InvalidConfig(format!(
            "sweep start {} is greater than stop {}", start, stop
        )).into());
    }

    let count = ((stop - start) / step + 1e-4).floor() as usize + 1;
    Ok((0..count).map(|i| start + i as f32 * step).collect())
}

/// Point with the highest F1. Ties keep the lowest threshold.
pub fn best_by_f1(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points.iter().fold(None, |best: Option<&SweepPoint>, p| match best {
        Some(b) if b.f1 >= p.f1 => Some(b),
        _ => Some(p),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let grid = linspace(0.1, 0.9, 0.1).unwrap();
        assert_eq!(grid.len(), 9);
        assert!((grid[0] - 0.1).abs() < 1e-6);
        assert!((grid[8] - 0.9).abs() < 1e-5);
    }

    #[test]
    fn linspace_single_point() {
        assert_eq!(linspace(0.5, 0.5, 0.1).unwrap(), vec![0.5]);
    }

    #[test]
    fn linspace_rejects_bad_grid() {
        assert!(linspace(0.1, 0.9, 0.0).is_err());
        assert!(linspace(0.9, 0.1, 0.1).is_err());
        assert!(linspace(0.1, f32::NAN, 0.1).is_err());
    }

    #[test]
    fn best_by_f1_prefers_first_on_tie() {
        let points = [
            SweepPoint { threshold: 0.1, f1: 0.5, ..Default::default() },
            SweepPoint { threshold: 0.2, f1: 0.8, ..Default::default() },
            SweepPoint { threshold: 0.3, f1: 0.8, ..Default::default() },
        ];
        assert_eq!(best_by_f1(&points).unwrap().threshold, 0.2);
        assert!(best_by_f1(&[]).is_none());
    }
}
