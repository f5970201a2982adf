use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
    Pause,
}

impl BreathPhase {
    /// One 4-7-8 cycle followed by a short pause.
    pub const CYCLE: [BreathPhase; 4] = [
        BreathPhase::Inhale,
        BreathPhase::Hold,
        BreathPhase::Exhale,
        BreathPhase::Pause,
    ];

    pub fn seconds(self) -> u64 {
        match self {
            BreathPhase::Inhale => 4,
            BreathPhase::Hold => 7,
            BreathPhase::Exhale => 8,
            BreathPhase::Pause => 1,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in through your nose",
            BreathPhase::Hold => "Hold your breath",
            BreathPhase::Exhale => "Breathe out slowly through your mouth",
            BreathPhase::Pause => "Rest",
        }
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BreathPhase::Inhale => "Inhale",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Exhale",
            BreathPhase::Pause => "Pause",
        };
        f.write_str(name)
    }
}

pub const MAX_SESSION_MINUTES: u64 = 60;

/// Session length in seconds, or `None` outside 1..=`MAX_SESSION_MINUTES`.
pub fn session_seconds(minutes: u64) -> Option<u64> {
    if minutes == 0 || minutes > MAX_SESSION_MINUTES {
        return None;
    }
    minutes.checked_mul(60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathStep {
    pub phase: BreathPhase,
    pub seconds: u64,
    /// Seconds left in the session when this step starts.
    pub remaining: u64,
}

/// Repeats the breathing cycle until `total_seconds` is used up. The last
/// step is cut short if it would overrun the session.
pub fn schedule(total_seconds: u64) -> Vec<BreathStep> {
    let mut steps = Vec::new();
    let mut remaining = total_seconds;

    for phase in BreathPhase::CYCLE.iter().cycle() {
        if remaining == 0 {
            break;
        }
        let seconds = phase.seconds().min(remaining);
        steps.push(BreathStep {
            phase: *phase,
            seconds,
            remaining,
        });
        remaining -= seconds;
    }

    steps
}
