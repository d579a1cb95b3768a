//! Host game engine collaborators
//!
//! The overlay never touches engine types directly. The host implements these
//! traits for its world, particle system and networking layer:
//! - `SolidityOracle`: is this voxel solid?
//! - `ParticleSink`: spawn one dust particle
//! - `ArenaIdentity`: which world is the player in?
//! - `PayloadChannel`: register/unregister the attack payload receiver

use glam::{DVec3, IVec3};
use thiserror::Error;

use crate::geometry::Dust;

/// Answers whether a voxel blocks particles. Must not fail.
pub trait SolidityOracle {
    fn is_solid(&self, voxel: IVec3) -> bool;
}

impl<F> SolidityOracle for F
where
    F: Fn(IVec3) -> bool,
{
    #[inline]
    fn is_solid(&self, voxel: IVec3) -> bool {
        self(voxel)
    }
}

/// Errors a raw world query may report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Voxel lies in a chunk the client has not received
    #[error("chunk containing {0} is not loaded")]
    ChunkNotLoaded(IVec3),

    /// Any other engine-side failure
    #[error("block query failed at {pos}: {reason}")]
    QueryFailed { pos: IVec3, reason: String },
}

/// Raw world query that can fail; wrap in [`FailSafe`] to use as an oracle
pub trait FallibleOracle {
    fn try_is_solid(&self, voxel: IVec3) -> Result<bool, OracleError>;
}

/// Adapts a fallible world query into a [`SolidityOracle`]
///
/// Query failures count as solid: a hazard drawn short is better than one
/// drawn through terrain the player cannot see past.
#[derive(Debug, Clone)]
pub struct FailSafe<Q>(pub Q);

impl<Q: FallibleOracle> SolidityOracle for FailSafe<Q> {
    fn is_solid(&self, voxel: IVec3) -> bool {
        match self.0.try_is_solid(voxel) {
            Ok(solid) => solid,
            Err(e) => {
                log::trace!("Treating voxel as solid: {}", e);
                true
            }
        }
    }
}

/// Spawns one particle; fire-and-forget
pub trait ParticleSink {
    fn emit(&mut self, pos: DVec3, dust: Dust);
}

impl<F> ParticleSink for F
where
    F: FnMut(DVec3, Dust),
{
    #[inline]
    fn emit(&mut self, pos: DVec3, dust: Dust) {
        self(pos, dust)
    }
}

/// Identifies the world the player is currently in
pub trait ArenaIdentity {
    /// Registry name of the current world, `None` when no world is loaded
    fn current_world_tag(&self) -> Option<&str>;
}

impl ArenaIdentity for Option<&str> {
    fn current_world_tag(&self) -> Option<&str> {
        *self
    }
}

impl ArenaIdentity for Option<String> {
    fn current_world_tag(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// Errors from registering the payload receiver with the host
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The payload type was never registered with the host's codec registry
    #[error("payload type '{0}' is not registered")]
    UnknownPayload(String),

    /// Another receiver already owns the channel
    #[error("channel '{0}' already has a receiver")]
    AlreadyBound(String),

    /// Host refused for its own reasons
    #[error("host rejected registration: {0}")]
    Rejected(String),
}

/// Host networking hook for the attack payload channel
///
/// Subscribing only tells the host to route payloads for `channel_id` to the
/// overlay; the host then delivers each payload by calling
/// [`Overlay::receive_payload`](crate::overlay::Overlay::receive_payload).
pub trait PayloadChannel {
    fn subscribe(&mut self, channel_id: &str) -> Result<(), ChannelError>;
    fn unsubscribe(&mut self, channel_id: &str);
}

/// Renderer-side particle budget
///
/// Scales particle intensity and drops anything past `max_per_tick` until
/// [`BudgetedSink::next_tick`] resets the counter. The overlay itself never
/// rate-limits; hosts that want a cap put one of these in front of their sink.
pub struct BudgetedSink<S> {
    inner: S,
    scale: f32,
    max_per_tick: Option<usize>,
    emitted: usize,
    dropped: usize,
}

impl<S: ParticleSink> BudgetedSink<S> {
    pub fn new(inner: S, scale: f32, max_per_tick: Option<usize>) -> Self {
        Self {
            inner,
            scale,
            max_per_tick,
            emitted: 0,
            dropped: 0,
        }
    }

    /// Build from client settings (budget applies only when enabled)
    pub fn from_settings(inner: S, settings: &crate::settings::ClientSettings) -> Self {
        Self::new(
            inner,
            settings.particle_scale,
            settings.effective_particle_cap(),
        )
    }

    /// Start a new tick's budget; returns particles dropped in the last one
    pub fn next_tick(&mut self) -> usize {
        let dropped = self.dropped;
        if dropped > 0 {
            log::debug!("Particle budget dropped {} particles", dropped);
        }
        self.emitted = 0;
        self.dropped = 0;
        dropped
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ParticleSink> ParticleSink for BudgetedSink<S> {
    fn emit(&mut self, pos: DVec3, dust: Dust) {
        if self.max_per_tick.is_some_and(|max| self.emitted >= max) {
            self.dropped += 1;
            return;
        }
        self.emitted += 1;
        self.inner.emit(pos, dust.scaled(self.scale));
    }
}
