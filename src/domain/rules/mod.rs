// Domain rules - Bitrate planning and search policy

use crate::domain::errors::*;
use crate::domain::model::*;

#[cfg(test)]
mod tests;

/// Default multiplier applied to both bitrates after an oversized attempt
pub const DEFAULT_DECAY: f64 = 0.9;

/// Computes the starting point of the bitrate search
pub struct BitratePlanner;

impl BitratePlanner {
    /// Split the budget over `duration_seconds`, reserving `audio_kbps` for audio
    pub fn initial_bitrates(
        budget: SizeBudget,
        duration_seconds: f64,
        audio_kbps: f64,
    ) -> Result<Bitrates, DomainError> {
        if !(duration_seconds.is_finite() && duration_seconds > 0.0) {
            return Err(DomainError::ProbeFail(format!(
                "Cannot plan bitrates for duration {}",
                duration_seconds
            )));
        }
        if !(audio_kbps.is_finite() && audio_kbps > 0.0) {
            return Err(DomainError::BadArgs(format!(
                "Audio bitrate must be positive, got {}",
                audio_kbps
            )));
        }

        let total_kbps = budget.bits() / (duration_seconds * 1000.0);
        Ok(Bitrates::new(total_kbps - audio_kbps, audio_kbps))
    }
}

/// Geometric bitrate sequence, stopping once either channel drops to its floor
#[derive(Debug, Clone)]
pub struct BitrateSchedule {
    next: Option<Bitrates>,
    floor: BitrateFloor,
    decay: f64,
}

impl BitrateSchedule {
    pub fn new(initial: Bitrates, floor: BitrateFloor, decay: f64) -> Result<Self, DomainError> {
        if !(decay > 0.0 && decay < 1.0) {
            return Err(DomainError::BadArgs(format!(
                "Decay factor must be in (0, 1), got {}",
                decay
            )));
        }
        Ok(Self {
            next: Some(initial),
            floor,
            decay,
        })
    }
}

impl Iterator for BitrateSchedule {
    type Item = Bitrates;

    fn next(&mut self) -> Option<Bitrates> {
        let current = self.next.take()?;
        if !self.floor.allows(&current) {
            return None;
        }
        self.next = Some(current.decayed(self.decay));
        Some(current)
    }
}
