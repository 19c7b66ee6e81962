//! Phase identities and the active-phase map.

use core::fmt;

/// Fluid phase identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Water.
    Aqua,
    /// Oil.
    Liquid,
    /// Gas.
    Vapour,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Aqua, Phase::Liquid, Phase::Vapour];

    /// Canonical slot of the phase (water, oil, gas).
    pub fn index(self) -> usize {
        match self {
            Phase::Aqua => 0,
            Phase::Liquid => 1,
            Phase::Vapour => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Aqua => "water",
            Phase::Liquid => "oil",
            Phase::Vapour => "gas",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which phases are active and where each active phase is stored.
///
/// Active phases are packed in canonical order (water, oil, gas), so a
/// two-phase oil-gas run stores oil at position 0 and gas at position 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseUsage {
    used: [bool; 3],
    pos: [usize; 3],
    num_phases: usize,
}

impl PhaseUsage {
    pub fn new(water: bool, oil: bool, gas: bool) -> Self {
        let used = [water, oil, gas];
        let mut pos = [usize::MAX; 3];
        let mut num_phases = 0;
        for (slot, &active) in used.iter().enumerate() {
            if active {
                pos[slot] = num_phases;
                num_phases += 1;
            }
        }
        Self {
            used,
            pos,
            num_phases,
        }
    }

    pub fn three_phase() -> Self {
        Self::new(true, true, true)
    }

    pub fn water_oil() -> Self {
        Self::new(true, true, false)
    }

    pub fn oil_gas() -> Self {
        Self::new(false, true, true)
    }

    pub fn is_active(&self, phase: Phase) -> bool {
        self.used[phase.index()]
    }

    /// Compact storage position of an active phase.
    pub fn position(&self, phase: Phase) -> Option<usize> {
        self.is_active(phase).then(|| self.pos[phase.index()])
    }

    pub fn num_phases(&self) -> usize {
        self.num_phases
    }

    /// Active phases in storage order.
    pub fn active_phases(&self) -> impl Iterator<Item = Phase> + '_ {
        Phase::ALL.into_iter().filter(|&p| self.is_active(p))
    }

    /// Phase stored at a compact position.
    pub fn phase_at(&self, pos: usize) -> Option<Phase> {
        self.active_phases().nth(pos)
    }
}
