use std::time::Instant;
use anyhow::Result;
use rayon::prelude::*;
use crate::common::ValidatorConfig;
use crate::data::{TimeCalc, ValidationState};
use crate::error::ValidationError;
use crate::validation_runners::{FrameMatcher, FrameSource};

/// Partial result of one sequence.
struct SequenceOutcome {
    state: ValidationState,
    elapsed: std::time::Duration,
}

/// Runs the frame matcher over a whole dataset and owns the resulting state.
///
/// Every call to [`validate`](Self::validate) starts from a zeroed state, so repeated runs
/// (for instance at different confidence thresholds) never leak into each other.
#[derive(Debug, Default)]
pub struct Validator {
    config: ValidatorConfig,
    state: ValidationState,
    pub timings: TimeCalc,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: ValidationState::default(),
            timings: TimeCalc::default(),
        })
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    pub fn into_state(self) -> ValidationState {
        self.state
    }

    pub fn set_confidence_threshold(&mut self, threshold: Option<f32>) -> Result<()> {
        let previous = self.config.confidence_threshold;
        self.config.confidence_threshold = threshold;
        if let Err(e) = self.config.validate() {
            self.config.confidence_threshold = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Scores every sequence of `source` and returns the accumulated state.
    ///
    /// Sequences without ground truth are logged and skipped. A malformed input file aborts
    /// the run with its error.
    pub fn validate<S: FrameSource + ?Sized>(&mut self, source: &S) -> Result<&ValidationState> {
        self.state.reset();
        self.timings.clear();

        let sequences = source.sequences()?;
        log::info!("Validating {} sequence(s) | IoU >= {} | confidence >= {}",
            sequences.len(),
            self.config.iou_threshold,
            self.config.confidence_threshold.map_or("none".to_string(), |c| c.to_string()));

        let started = Instant::now();

        let outcomes: Vec<Result<SequenceOutcome>> = if self.config.parallel {
            sequences
                .par_iter()
                .map(|sequence| validate_sequence(&self.config, source, sequence))
                .collect()
        } else {
            // Stops at the first error, the same as the parallel branch reports it.
            let mut outcomes = Vec::with_capacity(sequences.len());
            for sequence in &sequences {
                let outcome = validate_sequence(&self.config, source, sequence);
                let failed = outcome.is_err();
                outcomes.push(outcome);
                if failed {
                    break;
                }
            }
            outcomes
        };

        // Merged in sequence order, so the parallel result equals the sequential one.
        for outcome in outcomes {
            let outcome = outcome?;
            if outcome.state.sequences > 0 {
                self.timings.push(outcome.elapsed, outcome.state.frames);
            }
            self.state.merge(outcome.state);
        }

        log::info!("Validated {} frame(s) in {:.2?} (avg {:.2?}/frame) | tp={} fp={} fn={} ignored={}",
            self.state.frames, started.elapsed(), self.timings.avg_frame(),
            self.state.tp, self.state.fp, self.state.fn_count, self.state.ignored);

        Ok(&self.state)
    }
}

fn validate_sequence<S: FrameSource + ?Sized>(
    config: &ValidatorConfig,
    source: &S,
    sequence: &str,
) -> Result<SequenceOutcome> {
    let started = Instant::now();
    let mut state = ValidationState::default();

    let frames = match source.frames(sequence)? {
        Some(frames) => frames,
        None => {
            let missing = ValidationError::MissingGroundTruth { sequence: sequence.to_string() };
            log::warn!("{}, skipping", missing);
            state.skipped_sequences.push(sequence.to_string());
            return Ok(SequenceOutcome { state, elapsed: started.elapsed() });
        }
    };

    let matcher = FrameMatcher::new(config);
    for frame in &frames {
        let ground_truth = source.load_ground_truth(sequence, frame)?;
        let predictions = source.load_predictions(sequence, frame)?;
        state.fold(matcher.match_frame(&ground_truth, &predictions));
    }
    state.sequences = 1;

    log::debug!("Sequence {}: {} frame(s) | tp={} fp={} fn={}",
        sequence, frames.len(), state.tp, state.fp, state.fn_count);

    Ok(SequenceOutcome { state, elapsed: started.elapsed() })
}

/// Convenience wrapper: builds a [`Validator`], runs it once and hands back the state.
pub fn validate<S: FrameSource + ?Sized>(source: &S, config: &ValidatorConfig) -> Result<ValidationState> {
    let mut validator = Validator::new(config.clone())?;
    validator.validate(source)?;
    Ok(validator.into_state())
}
