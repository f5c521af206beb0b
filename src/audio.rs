//! Sound cues.  Each game event maps to a short synthesized tone; producing
//! the waveform is left to whatever `ToneSink` the driver plugs in.

use std::io::Write;

use crate::entities::GameEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    pub waveform: Waveform,
}

impl Tone {
    const fn new(frequency_hz: f32, duration_ms: u32, waveform: Waveform) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            waveform,
        }
    }
}

/// The tone played for an event, if any.
pub fn tone_for(event: &GameEvent) -> Option<Tone> {
    match event {
        GameEvent::Shot => Some(Tone::new(880.0, 100, Waveform::Square)),
        GameEvent::EnemyKilled => Some(Tone::new(220.0, 200, Waveform::Sawtooth)),
        GameEvent::PlayerHit => Some(Tone::new(110.0, 400, Waveform::Triangle)),
        GameEvent::PowerUpCollected(_) => Some(Tone::new(660.0, 300, Waveform::Sine)),
        GameEvent::LevelUp(_) => Some(Tone::new(1040.0, 500, Waveform::Sine)),
        GameEvent::GameOver => None,
    }
}

pub trait ToneSink {
    fn play(&mut self, tone: Tone);
}

/// Play the tones for every event raised by the last tick.
pub fn play_events(sink: &mut dyn ToneSink, events: &[GameEvent]) {
    for tone in events.iter().filter_map(tone_for) {
        sink.play(tone);
    }
}

/// Discards every tone.
pub struct Silent;

impl ToneSink for Silent {
    fn play(&mut self, _tone: Tone) {}
}

/// Records tones in the log instead of synthesizing them.
pub struct LogSink;

impl ToneSink for LogSink {
    fn play(&mut self, tone: Tone) {
        tracing::debug!(
            frequency_hz = tone.frequency_hz,
            duration_ms = tone.duration_ms,
            waveform = ?tone.waveform,
            "tone"
        );
    }
}

/// Rings the terminal bell for each tone.
pub struct BellSink<W: Write> {
    out: W,
}

impl<W: Write> BellSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ToneSink for BellSink<W> {
    fn play(&mut self, _tone: Tone) {
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}
