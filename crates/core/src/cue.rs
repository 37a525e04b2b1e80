use serde::Serialize;

/// Short audio cues played on UI actions and mission events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    /// A message was sent.
    Pop,
    /// An item or phrase shortcut was picked.
    Click,
    /// A mission was completed, or the game started.
    Success,
    /// Every mission is done.
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ramp {
    Linear,
    Exponential,
}

/// Gain envelope from `Tone::gain` down to `to`, ending with the tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fade {
    pub to: f32,
    pub ramp: Ramp,
}

/// A frequency the oscillator jumps or ramps to at `at_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyStep {
    pub at_ms: u32,
    pub hz: f32,
    /// Linear ramp from the previous step instead of a jump.
    pub ramp: bool,
}

/// Oscillator recipe for one cue, so any audio backend renders the same sound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tone {
    pub waveform: Waveform,
    pub steps: Vec<FrequencyStep>,
    pub gain: f32,
    /// `None` keeps the gain flat.
    pub fade: Option<Fade>,
    pub duration_ms: u32,
}

fn jump(at_ms: u32, hz: f32) -> FrequencyStep {
    FrequencyStep {
        at_ms,
        hz,
        ramp: false,
    }
}

impl SoundCue {
    pub fn tone(self) -> Tone {
        match self {
            SoundCue::Pop => Tone {
                waveform: Waveform::Sine,
                steps: vec![jump(0, 800.0)],
                gain: 0.1,
                fade: None,
                duration_ms: 100,
            },
            SoundCue::Click => Tone {
                waveform: Waveform::Sine,
                steps: vec![jump(0, 400.0)],
                gain: 0.05,
                fade: None,
                duration_ms: 50,
            },
            SoundCue::Success => Tone {
                waveform: Waveform::Triangle,
                steps: vec![
                    jump(0, 400.0),
                    FrequencyStep {
                        at_ms: 100,
                        hz: 800.0,
                        ramp: true,
                    },
                ],
                gain: 0.1,
                fade: Some(Fade {
                    to: 0.01,
                    ramp: Ramp::Exponential,
                }),
                duration_ms: 500,
            },
            // C5, E5, G5, C6
            SoundCue::Win => Tone {
                waveform: Waveform::Square,
                steps: vec![
                    jump(0, 523.25),
                    jump(200, 659.25),
                    jump(400, 783.99),
                    jump(600, 1046.50),
                ],
                gain: 0.1,
                fade: Some(Fade {
                    to: 0.0,
                    ramp: Ramp::Linear,
                }),
                duration_ms: 1500,
            },
        }
    }
}
