//! Coin clink synthesis and playback
//!
//! Two short tones are synthesized into a sample buffer and played
//! fire-and-forget on the default output device: a primary sine whose
//! pitch rises briefly, and a quieter triangle "clink" starting 50 ms
//! later. Gains clink higher than expenses. A missing or failing audio
//! device is swallowed; the app keeps working silently.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle};

use crate::domain::vault::TransactionKind;

/// Output sample rate in Hz
pub const SAMPLE_RATE: u32 = 44_100;

const PRIMARY_SECS: f32 = 0.3;
const PRIMARY_GAIN: f32 = 0.1;
/// Portion of the primary tone spent ramping the pitch up to 1.5x
const RAMP_SECS: f32 = 0.1;
const RAMP_FACTOR: f32 = 1.5;

const CLINK_DELAY_SECS: f32 = 0.05;
const CLINK_SECS: f32 = 0.2;
const CLINK_GAIN: f32 = 0.05;
const CLINK_PITCH_FACTOR: f32 = 1.2;

/// Gains both decay exponentially toward this floor
const GAIN_FLOOR: f32 = 0.01;

impl TransactionKind {
    /// Base pitch of the clink: higher for gains, lower for expenses
    fn base_frequency(self) -> f32 {
        match self {
            TransactionKind::Gain => 880.0,
            TransactionKind::Expense => 440.0,
        }
    }
}

/// Synthesizes the two-tone clink for a transaction kind
///
/// Pure function of the kind; the result is a mono buffer at
/// [`SAMPLE_RATE`] covering the full 0.3 s envelope.
pub fn synthesize_clink(kind: TransactionKind) -> Vec<f32> {
    let base = kind.base_frequency();
    let total_samples = (PRIMARY_SECS * SAMPLE_RATE as f32) as usize;
    let dt = 1.0 / SAMPLE_RATE as f32;

    let mut samples = Vec::with_capacity(total_samples);
    let mut primary_phase = 0.0f32;

    for i in 0..total_samples {
        let t = i as f32 * dt;

        // Primary tone: sine with an exponential pitch ramp that holds
        // after RAMP_SECS, gain decaying over the full duration.
        let ramp = (t / RAMP_SECS).min(1.0);
        let frequency = base * RAMP_FACTOR.powf(ramp);
        primary_phase += std::f32::consts::TAU * frequency * dt;
        let primary_gain = PRIMARY_GAIN * (GAIN_FLOOR / PRIMARY_GAIN).powf(t / PRIMARY_SECS);
        let mut sample = primary_phase.sin() * primary_gain;

        // Secondary clink: delayed triangle at a slightly higher pitch.
        let clink_t = t - CLINK_DELAY_SECS;
        if (0.0..CLINK_SECS).contains(&clink_t) {
            let cycle = (base * CLINK_PITCH_FACTOR * clink_t).fract();
            let triangle = 4.0 * (cycle - 0.5).abs() - 1.0;
            let clink_gain = CLINK_GAIN * (GAIN_FLOOR / CLINK_GAIN).powf(clink_t / CLINK_SECS);
            sample += triangle * clink_gain;
        }

        samples.push(sample);
    }

    samples
}

/// Fire-and-forget clink playback on the default output device
///
/// The output stream is opened lazily on first use and kept for the
/// process lifetime so queued playback is not cut off.
pub struct AudioService {
    enabled: bool,
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl AudioService {
    /// Creates a service that will open the default device on first play
    pub fn new() -> Self {
        Self {
            enabled: true,
            output: None,
        }
    }

    /// Creates a service that never touches an audio device (for tests)
    pub fn muted() -> Self {
        Self {
            enabled: false,
            output: None,
        }
    }

    fn ensure_output(&mut self) {
        if self.output.is_none() {
            // No device is a valid state; stay silent.
            if let Ok(pair) = OutputStream::try_default() {
                self.output = Some(pair);
            }
        }
    }

    /// Plays the clink for a committed transaction
    ///
    /// No completion signal is consumed; playback failures are swallowed.
    pub fn play_clink(&mut self, kind: TransactionKind) {
        if !self.enabled {
            return;
        }

        self.ensure_output();
        let Some((_stream, handle)) = &self.output else {
            return;
        };

        let buffer = SamplesBuffer::new(1, SAMPLE_RATE, synthesize_clink(kind));
        let _ = handle.play_raw(buffer);
    }
}

impl Default for AudioService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_covers_the_full_envelope() {
        let samples = synthesize_clink(TransactionKind::Gain);
        assert_eq!(samples.len(), (0.3 * SAMPLE_RATE as f32) as usize);
    }

    #[test]
    fn samples_stay_within_the_mixed_gain_bound() {
        for kind in [TransactionKind::Gain, TransactionKind::Expense] {
            for (i, sample) in synthesize_clink(kind).iter().enumerate() {
                assert!(
                    sample.abs() <= PRIMARY_GAIN + CLINK_GAIN,
                    "sample {i} out of range: {sample}"
                );
            }
        }
    }

    #[test]
    fn clink_is_audible() {
        let energy: f32 = synthesize_clink(TransactionKind::Gain)
            .iter()
            .map(|s| s * s)
            .sum();
        assert!(energy > 0.0);
    }

    #[test]
    fn gain_and_expense_differ_in_pitch() {
        let gain = synthesize_clink(TransactionKind::Gain);
        let expense = synthesize_clink(TransactionKind::Expense);

        // Twice the base frequency means roughly twice the zero crossings.
        let crossings = |samples: &[f32]| {
            samples
                .windows(2)
                .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
                .count()
        };

        assert!(crossings(&gain) > crossings(&expense) * 3 / 2);
    }

    #[test]
    fn muted_service_never_opens_a_device() {
        let mut audio = AudioService::muted();
        audio.play_clink(TransactionKind::Gain);
        assert!(audio.output.is_none());
    }
}
