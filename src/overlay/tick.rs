//! Per-tick rendering
//!
//! Runs right after the host's client tick. Every attack is expanded and sent
//! to the particle sink in the same call: no buffering, no cooldown, no rate
//! limit. Particle budgeting is the sink's business.

use crate::attack::AttackDescriptor;
use crate::geometry::{Dust, generate};
use crate::host::{ArenaIdentity, ParticleSink, SolidityOracle};

use super::state::Overlay;

/// What a tick rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Attacks expanded this tick
    pub attacks: usize,
    /// Particles sent to the sink
    pub particles: usize,
}

/// Expand one attack and emit every point with its phase color
pub fn render_attack<O, S>(attack: &AttackDescriptor, oracle: &O, sink: &mut S) -> usize
where
    O: SolidityOracle + ?Sized,
    S: ParticleSink + ?Sized,
{
    let dust = Dust::for_phase(attack.phase);
    let mut emitted = 0;
    for pos in generate(&attack.parameters, oracle) {
        sink.emit(pos, dust);
        emitted += 1;
    }
    emitted
}

impl Overlay {
    /// Advance one client tick
    ///
    /// Updates the arena flag from `arena` and, while in the arena, renders
    /// every active attack in order. Does nothing while disabled or while no
    /// world is loaded.
    pub fn tick<A, O, S>(&mut self, arena: &A, oracle: &O, sink: &mut S) -> TickReport
    where
        A: ArenaIdentity + ?Sized,
        O: SolidityOracle + ?Sized,
        S: ParticleSink + ?Sized,
    {
        if !self.enabled {
            return TickReport::default();
        }
        let Some(tag) = arena.current_world_tag() else {
            return TickReport::default();
        };

        self.update_arena(Some(tag));
        if !self.in_arena {
            return TickReport::default();
        }

        let attacks = match self.attacks.as_deref() {
            Some(attacks) if !attacks.is_empty() => attacks,
            _ => return TickReport::default(),
        };

        let mut report = TickReport {
            attacks: attacks.len(),
            particles: 0,
        };
        for attack in attacks {
            report.particles += render_attack(attack, oracle, sink);
        }

        if self.settings.log_particle_counts() {
            log::info!(
                "Rendered {} attacks as {} particles",
                report.attacks,
                report.particles
            );
        }

        report
    }
}
