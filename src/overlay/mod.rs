//! Attack overlay orchestration
//!
//! `Overlay` owns the latest attack list and renders it every tick while the
//! player is in the arena. It is driven entirely by the host:
//! - `enable` / `disable` on client start and stop
//! - `receive_payload` for every attack payload the server sends
//! - `tick` once per client tick
//!
//! All calls happen on the host's client thread, one at a time.

pub mod network;
pub mod state;
pub mod tick;

pub use network::NetworkHandler;
pub use state::Overlay;
pub use tick::{TickReport, render_attack};
