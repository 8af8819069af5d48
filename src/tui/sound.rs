// ── Sounds ──────────────────────────────────────────────────────────────────

use fundsp::hacker::*;
use log::warn;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

const SAMPLE_RATE: u32 = 44_100;

pub struct Sound {
    // Dropping the stream stops all playback.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Sound {
    /// Open the default output device. Audio is optional, so failure just
    /// disables it.
    pub fn open() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                warn!("sound disabled: {e}");
                None
            }
        }
    }

    pub fn play_death(&self) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, death_samples()));
                sink.detach(); // Play in background
            }
            Err(e) => warn!("could not play sound: {e}"),
        }
    }
}

/// Half a second of sawtooth sweeping 400Hz → 80Hz while fading out.
fn death_samples() -> Vec<f32> {
    let freq = lfo(|t: f64| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t: f64| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
    let mut sound = (freq >> saw()) * gain;
    sound.set_sample_rate(SAMPLE_RATE as f64);

    (0..SAMPLE_RATE / 2).map(|_| sound.get_mono()).collect()
}
