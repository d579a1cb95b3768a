//! Attack payload receiver
//!
//! Tracks whether the payload channel is registered with the host and turns
//! raw payloads into descriptor lists.

use crate::attack::{AttackDescriptor, decode};
use crate::consts::CHANNEL_ID;
use crate::host::{ChannelError, PayloadChannel};

#[derive(Debug, Clone, Default)]
pub struct NetworkHandler {
    registered: bool,
    /// Log every raw payload at info level
    log_payloads: bool,
}

impl NetworkHandler {
    pub fn new(log_payloads: bool) -> Self {
        Self {
            registered: false,
            log_payloads,
        }
    }

    /// Subscribe to the attack channel (no-op if already registered)
    pub fn register<C>(&mut self, channel: &mut C) -> Result<(), ChannelError>
    where
        C: PayloadChannel + ?Sized,
    {
        if self.registered {
            return Ok(());
        }
        channel.subscribe(CHANNEL_ID)?;
        self.registered = true;
        log::info!("Registered payload receiver on {}", CHANNEL_ID);
        Ok(())
    }

    /// Unsubscribe from the attack channel (no-op if not registered)
    pub fn unregister<C>(&mut self, channel: &mut C)
    where
        C: PayloadChannel + ?Sized,
    {
        if !self.registered {
            return;
        }
        channel.unsubscribe(CHANNEL_ID);
        self.registered = false;
        log::info!("Unregistered payload receiver on {}", CHANNEL_ID);
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Decode a payload delivered by the host
    ///
    /// Returns `None` when not registered: the host should not be delivering,
    /// and anything it does deliver is ignored.
    pub fn handle_payload(&self, payload: &str) -> Option<Vec<AttackDescriptor>> {
        if !self.registered {
            log::debug!("Ignoring payload received while unregistered");
            return None;
        }
        if self.log_payloads {
            log::info!("Attack payload: {}", payload);
        }
        Some(decode(payload))
    }
}
