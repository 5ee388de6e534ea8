//! Timed status effects
//!
//! Effects store an absolute expiry timestamp (ms). An effect is active
//! while its expiry is `Some`; the tracker clears it on the first tick
//! where `now >= expiry`. Clearing sets the slot to `None`, so expiry is
//! reported once and re-checking afterwards is a no-op.

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::GameState;

/// Per-player effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Shield,
    Magnet,
    Confusion,
}

/// Per-player effect expiries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTimers {
    pub shield_until: Option<u64>,
    pub magnet_until: Option<u64>,
    pub confused_until: Option<u64>,
}

impl EffectTimers {
    fn slot(&mut self, kind: EffectKind) -> &mut Option<u64> {
        match kind {
            EffectKind::Shield => &mut self.shield_until,
            EffectKind::Magnet => &mut self.magnet_until,
            EffectKind::Confusion => &mut self.confused_until,
        }
    }

    /// Start (or refresh) an effect lasting `duration_ms` from `now`
    pub fn activate(&mut self, kind: EffectKind, now: u64, duration_ms: u64) {
        *self.slot(kind) = Some(now.saturating_add(duration_ms));
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::Shield => self.shield_until.is_some(),
            EffectKind::Magnet => self.magnet_until.is_some(),
            EffectKind::Confusion => self.confused_until.is_some(),
        }
    }

    pub fn shielded(&self) -> bool {
        self.is_active(EffectKind::Shield)
    }

    pub fn magnetic(&self) -> bool {
        self.is_active(EffectKind::Magnet)
    }

    pub fn confused(&self) -> bool {
        self.is_active(EffectKind::Confusion)
    }

    /// Clear every effect whose expiry has passed; returns what ended
    pub fn expire(&mut self, now: u64) -> Vec<EffectKind> {
        let mut ended = Vec::new();
        for kind in [EffectKind::Shield, EffectKind::Magnet, EffectKind::Confusion] {
            let slot = self.slot(kind);
            if slot.is_some_and(|until| now >= until) {
                *slot = None;
                ended.push(kind);
            }
        }
        ended
    }
}

/// Effects that apply to the whole playfield
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalEffects {
    pub freeze_until: Option<u64>,
}

impl GlobalEffects {
    pub fn freeze(&mut self, now: u64, duration_ms: u64) {
        self.freeze_until = Some(now.saturating_add(duration_ms));
    }

    pub fn frozen(&self) -> bool {
        self.freeze_until.is_some()
    }

    /// Whether the freeze still applies at `now`, even before `expire` runs
    pub fn frozen_at(&self, now: u64) -> bool {
        self.freeze_until.is_some_and(|until| now < until)
    }

    /// Returns true if the freeze ended on this call
    pub fn expire(&mut self, now: u64) -> bool {
        if self.freeze_until.is_some_and(|until| now >= until) {
            self.freeze_until = None;
            true
        } else {
            false
        }
    }
}

/// Expire stale effects for every player and the playfield
pub fn expire_effects(state: &mut GameState, now: u64) {
    if state.global.expire(now) {
        log::debug!("Freeze ended at {now}ms");
        state.events.push(GameEvent::FreezeEnded);
    }

    for player in &mut state.players {
        for effect in player.effects.expire(now) {
            log::debug!("P{} {:?} ended at {now}ms", player.id, effect);
            state.events.push(GameEvent::EffectEnded {
                player: player.id,
                effect,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_expires_once() {
        let mut timers = EffectTimers::default();
        timers.activate(EffectKind::Confusion, 1000, 3000);
        assert!(timers.confused());

        assert!(timers.expire(3999).is_empty());
        assert!(timers.confused());

        assert_eq!(timers.expire(4000), vec![EffectKind::Confusion]);
        assert!(!timers.confused());

        // Already cleared - nothing more to report
        assert!(timers.expire(4001).is_empty());
        assert!(timers.expire(10_000).is_empty());
    }

    #[test]
    fn test_reactivation_extends() {
        let mut timers = EffectTimers::default();
        timers.activate(EffectKind::Shield, 0, 4000);
        timers.activate(EffectKind::Shield, 3000, 4000);
        assert!(timers.expire(4000).is_empty());
        assert_eq!(timers.expire(7000), vec![EffectKind::Shield]);
    }

    #[test]
    fn test_independent_slots() {
        let mut timers = EffectTimers::default();
        timers.activate(EffectKind::Shield, 0, 4000);
        timers.activate(EffectKind::Magnet, 0, 5000);
        assert_eq!(timers.expire(4500), vec![EffectKind::Shield]);
        assert!(timers.magnetic());
        assert!(timers.is_active(EffectKind::Magnet));
        assert!(!timers.is_active(EffectKind::Shield));
    }

    #[test]
    fn test_freeze_expiry() {
        let mut global = GlobalEffects::default();
        global.freeze(100, 5000);
        assert!(global.frozen());
        assert!(!global.expire(5099));
        assert!(global.expire(5100));
        assert!(!global.expire(5101));
        assert!(!global.frozen());
    }
}
