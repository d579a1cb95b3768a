//! Attack data received from the server
//!
//! Payloads are `#`-separated records of the form
//! `KIND|p1,p2,...|COLOR|TICKS`. Decoding is best-effort: a malformed record
//! is dropped without affecting its neighbours.

pub mod decode;
pub mod error;
pub mod types;

pub use decode::{decode, decode_record};
pub use error::DecodeError;
pub use types::{
    AttackDescriptor, AttackKind, AttackParameters, AttackPhase, CircleParams, LaserParams,
    SpinParams, SquareRingParams, WallAxis, WallParams,
};
