//! Overlay state and lifecycle
//!
//! Attack lists are replaced wholesale on every payload and dropped as soon as
//! the player leaves the arena.

use crate::attack::AttackDescriptor;
use crate::consts::{ARENA_MARKER, MAX_PATTERN_SAMPLES};
use crate::geometry::{pattern_samples, within_budget};
use crate::host::{ChannelError, PayloadChannel};
use crate::settings::ClientSettings;

use super::network::NetworkHandler;

/// Client-side attack overlay
#[derive(Debug, Clone)]
pub struct Overlay {
    pub(super) settings: ClientSettings,
    pub(super) network: NetworkHandler,
    /// Between `enable` and `disable`
    pub(super) enabled: bool,
    /// Player is in the minigame world
    pub(super) in_arena: bool,
    /// Latest decoded attacks. Not expired by `ticks_remaining`; only a new
    /// payload or leaving the arena removes them.
    pub(super) attacks: Option<Vec<AttackDescriptor>>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(ClientSettings::default())
    }
}

impl Overlay {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            network: NetworkHandler::new(settings.log_network_data),
            settings,
            enabled: false,
            in_arena: false,
            attacks: None,
        }
    }

    /// Start receiving attacks
    ///
    /// On registration failure the error is logged and returned, and the
    /// overlay stays disabled. The rest of the client is unaffected.
    pub fn enable<C>(&mut self, channel: &mut C) -> Result<(), ChannelError>
    where
        C: PayloadChannel + ?Sized,
    {
        if self.enabled {
            return Ok(());
        }
        if let Err(e) = self.network.register(channel) {
            log::error!("Failed to register MusicDodge payload receiver: {}", e);
            return Err(e);
        }
        self.enabled = true;
        log::info!("MusicDodge overlay enabled");
        Ok(())
    }

    /// Stop receiving attacks and drop everything cached
    pub fn disable<C>(&mut self, channel: &mut C)
    where
        C: PayloadChannel + ?Sized,
    {
        if !self.enabled {
            return;
        }
        self.network.unregister(channel);
        self.attacks = None;
        self.in_arena = false;
        self.enabled = false;
        log::info!("MusicDodge overlay disabled");
    }

    /// Handle one payload from the server
    ///
    /// Returns the number of attacks now active, or `None` if the payload was
    /// ignored because the overlay is disabled.
    pub fn receive_payload(&mut self, payload: &str) -> Option<usize> {
        if !self.enabled {
            return None;
        }
        let attacks = self.network.handle_payload(payload)?;
        let count = attacks.len();
        self.replace_attacks(attacks);
        Some(count)
    }

    /// Replace the active attack list (no merging with the previous one)
    pub fn replace_attacks(&mut self, attacks: Vec<AttackDescriptor>) {
        if !self.enabled {
            return;
        }
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Received {} attacks", attacks.len());
            for attack in &attacks {
                log::debug!(
                    "  {} {:?} ({} beats left)",
                    attack.identity_key(),
                    attack.phase,
                    attack.beats_remaining()
                );
            }
        }
        for attack in attacks.iter().filter(|a| !within_budget(&a.parameters)) {
            log::warn!(
                "Not rendering {}: {} samples exceeds the limit of {}",
                attack.identity_key(),
                pattern_samples(&attack.parameters),
                MAX_PATTERN_SAMPLES
            );
        }
        self.attacks = Some(attacks);
    }

    pub fn clear_attacks(&mut self) {
        self.attacks = None;
    }

    /// Attacks currently rendered each tick (read-only)
    pub fn current_attacks(&self) -> Option<&[AttackDescriptor]> {
        self.attacks.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_in_arena(&self) -> bool {
        self.in_arena
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn network(&self) -> &NetworkHandler {
        &self.network
    }

    /// Override the arena flag; leaving clears attacks as usual
    pub fn set_in_arena(&mut self, in_arena: bool) {
        if in_arena == self.in_arena {
            return;
        }
        self.in_arena = in_arena;
        if in_arena {
            log::info!("Entered MusicDodge arena");
        } else {
            self.attacks = None;
            log::info!("Left MusicDodge arena, attacks cleared");
        }
    }

    /// Recompute the arena flag from the current world tag
    ///
    /// `None` (no world loaded, e.g. mid-teleport) leaves the flag and the
    /// cached attacks untouched.
    pub fn update_arena(&mut self, world_tag: Option<&str>) {
        let Some(tag) = world_tag else {
            return;
        };
        self.set_in_arena(tag.contains(ARENA_MARKER));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::decode;

    struct AcceptAll;

    impl PayloadChannel for AcceptAll {
        fn subscribe(&mut self, _: &str) -> Result<(), ChannelError> {
            Ok(())
        }
        fn unsubscribe(&mut self, _: &str) {}
    }

    struct RefuseAll;

    impl PayloadChannel for RefuseAll {
        fn subscribe(&mut self, channel_id: &str) -> Result<(), ChannelError> {
            Err(ChannelError::AlreadyBound(channel_id.to_string()))
        }
        fn unsubscribe(&mut self, _: &str) {}
    }

    fn enabled() -> Overlay {
        let mut overlay = Overlay::default();
        overlay.enable(&mut AcceptAll).unwrap();
        overlay
    }

    #[test]
    fn test_enable_disable() {
        let mut overlay = Overlay::default();
        assert!(!overlay.is_enabled());
        overlay.enable(&mut AcceptAll).unwrap();
        assert!(overlay.is_enabled());
        assert!(overlay.network().is_registered());

        overlay.set_in_arena(true);
        overlay.receive_payload("CIRCLE|0,64,0,1|RED|20");
        overlay.disable(&mut AcceptAll);
        assert!(!overlay.is_enabled());
        assert!(!overlay.is_in_arena());
        assert!(overlay.current_attacks().is_none());
    }

    #[test]
    fn test_registration_failure_stays_disabled() {
        let mut overlay = Overlay::default();
        assert!(overlay.enable(&mut RefuseAll).is_err());
        assert!(!overlay.is_enabled());
        assert_eq!(overlay.receive_payload("CIRCLE|0,64,0,1|RED|20"), None);
        assert!(overlay.current_attacks().is_none());
    }

    #[test]
    fn test_payload_replaces_wholesale() {
        let mut overlay = enabled();
        assert_eq!(
            overlay.receive_payload("CIRCLE|0,64,0,1|RED|20#WALL|x,2|GRAY|10"),
            Some(2)
        );
        assert_eq!(overlay.receive_payload("LASER|0,64,0,1,64,0|RED|5"), Some(1));
        let attacks = overlay.current_attacks().unwrap();
        assert_eq!(attacks, decode("LASER|0,64,0,1,64,0|RED|5").as_slice());

        // An all-malformed payload still replaces (with nothing)
        assert_eq!(overlay.receive_payload("garbage"), Some(0));
        assert_eq!(overlay.current_attacks(), Some(&[][..]));
    }

    #[test]
    fn test_replace_ignored_when_disabled() {
        let mut overlay = Overlay::default();
        overlay.replace_attacks(decode("CIRCLE|0,64,0,1|RED|20"));
        assert!(overlay.current_attacks().is_none());
    }

    #[test]
    fn test_arena_exit_clears() {
        let mut overlay = enabled();
        overlay.update_arena(Some("mce:musicdodge"));
        assert!(overlay.is_in_arena());
        overlay.receive_payload("CIRCLE|0,64,0,1|RED|20");

        // Staying in the arena keeps attacks
        overlay.update_arena(Some("mce:musicdodge_round2"));
        assert!(overlay.current_attacks().is_some());

        overlay.update_arena(Some("minecraft:overworld"));
        assert!(!overlay.is_in_arena());
        assert!(overlay.current_attacks().is_none());
    }

    #[test]
    fn test_no_world_keeps_arena_state() {
        let mut overlay = enabled();
        overlay.set_in_arena(true);
        overlay.receive_payload("CIRCLE|0,64,0,1|RED|20");
        overlay.update_arena(None);
        assert!(overlay.is_in_arena());
        assert_eq!(overlay.current_attacks().map(<[_]>::len), Some(1));

        let mut outside = enabled();
        outside.update_arena(None);
        assert!(!outside.is_in_arena());
    }

    #[test]
    fn test_attacks_received_outside_arena_are_kept() {
        let mut overlay = enabled();
        overlay.receive_payload("CIRCLE|0,64,0,1|RED|20");
        overlay.update_arena(Some("minecraft:overworld"));
        // No transition happened, so nothing was cleared
        assert_eq!(overlay.current_attacks().map(<[_]>::len), Some(1));
    }
}
