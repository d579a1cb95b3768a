//! MusicDodge payload inspector
//!
//! Reads one attack payload per line from stdin, runs a client tick for each
//! against a flat arena (solid below the floor) and logs what was rendered.
//! An optional argument names a JSON settings file; otherwise settings come
//! from the `MUSICDODGE_*` environment variables.

use std::io::{self, BufRead};

use glam::{DVec3, IVec3};

use music_dodge::consts::{CHANNEL_ID, FIELD_Y};
use music_dodge::geometry::Dust;
use music_dodge::host::{BudgetedSink, ChannelError, PayloadChannel};
use music_dodge::{ClientSettings, Overlay};

/// World tag the inspector pretends to be in
const WORLD_TAG: Option<&str> = Some("mce:musicdodge");

/// Stand-in for the host's payload registry
struct StdinChannel;

impl PayloadChannel for StdinChannel {
    fn subscribe(&mut self, channel_id: &str) -> Result<(), ChannelError> {
        if channel_id != CHANNEL_ID {
            return Err(ChannelError::UnknownPayload(channel_id.to_string()));
        }
        Ok(())
    }

    fn unsubscribe(&mut self, _channel_id: &str) {}
}

fn flat_arena(voxel: IVec3) -> bool {
    voxel.y < FIELD_Y
}

fn load_settings() -> ClientSettings {
    let Some(path) = std::env::args().nth(1) else {
        return ClientSettings::from_env();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match ClientSettings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{} - using environment settings", e);
                ClientSettings::from_env()
            }
        },
        Err(e) => {
            log::warn!("Cannot read {}: {} - using environment settings", path, e);
            ClientSettings::from_env()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("MusicDodge inspector starting...");

    let settings = load_settings();
    let mut channel = StdinChannel;
    let mut overlay = Overlay::new(settings.clone());
    if overlay.enable(&mut channel).is_err() {
        return;
    }

    let mut bounds: Option<(DVec3, DVec3)> = None;
    let mut sink = BudgetedSink::from_settings(
        |pos: DVec3, _: Dust| {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(pos), hi.max(pos)),
                None => (pos, pos),
            });
        },
        &settings,
    );

    for (line_no, line) in io::stdin().lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let accepted = overlay.receive_payload(&line).unwrap_or(0);
        let report = overlay.tick(&WORLD_TAG, &flat_arena, &mut sink);
        let dropped = sink.next_tick();
        log::info!(
            "Tick {}: {} attacks decoded, {} particles ({} over budget)",
            line_no + 1,
            accepted,
            report.particles,
            dropped
        );
    }

    overlay.disable(&mut channel);
    drop(sink);
    if let Some((lo, hi)) = bounds {
        log::info!("Particle bounds: {} .. {}", lo, hi);
    }
}
