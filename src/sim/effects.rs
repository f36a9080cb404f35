//! Power-up effect engine
//!
//! Each kind is either inactive or active with an absolute expiry time
//! (session seconds). Picking up an active kind overwrites its expiry and
//! re-runs its activation, so activations stack where the effect is additive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::{PowerUpKind, RunStats};
use crate::tuning::Tuning;
use crate::round_tenths;

/// Per-kind behavior: how it looks, how long it lasts, what it does
#[derive(Debug)]
pub struct EffectRule {
    pub kind: PowerUpKind,
    /// HUD label
    pub label: &'static str,
    /// Render color (0xRRGGBB)
    pub color: u32,
    pub duration: fn(&Tuning) -> f64,
    pub activate: fn(&mut RunStats, &Tuning),
    pub revert: fn(&mut RunStats, &Tuning),
}

/// Dispatch table, indexed by `PowerUpKind as usize`
static EFFECT_RULES: [EffectRule; 3] = [
    EffectRule {
        kind: PowerUpKind::Speed,
        label: "SPEED",
        color: 0x00ff00,
        duration: speed_duration,
        activate: speed_activate,
        revert: speed_revert,
    },
    EffectRule {
        kind: PowerUpKind::Shield,
        label: "SHIELD",
        color: 0x33aaff,
        duration: shield_duration,
        activate: shield_activate,
        revert: shield_revert,
    },
    EffectRule {
        kind: PowerUpKind::Score,
        label: "SCORE",
        color: 0xffd24d,
        duration: score_duration,
        activate: score_activate,
        revert: no_revert,
    },
];

fn speed_duration(t: &Tuning) -> f64 {
    t.speed_duration
}

fn shield_duration(t: &Tuning) -> f64 {
    t.shield_duration
}

fn score_duration(t: &Tuning) -> f64 {
    t.score_duration
}

fn speed_activate(stats: &mut RunStats, t: &Tuning) {
    stats.forward_speed += t.speed_boost;
}

/// Floored at base speed so stacked expiries can't undercut it
fn speed_revert(stats: &mut RunStats, t: &Tuning) {
    stats.forward_speed = (stats.forward_speed - t.speed_boost).max(t.base_speed);
}

fn shield_activate(stats: &mut RunStats, _t: &Tuning) {
    stats.shielded = true;
}

fn shield_revert(stats: &mut RunStats, _t: &Tuning) {
    stats.shielded = false;
}

fn score_activate(stats: &mut RunStats, t: &Tuning) {
    stats.score += t.score_bonus;
}

/// Score bonus is immediate; its timer only drives the HUD
fn no_revert(_stats: &mut RunStats, _t: &Tuning) {}

impl PowerUpKind {
    pub fn rule(self) -> &'static EffectRule {
        &EFFECT_RULES[self as usize]
    }

    pub fn color(self) -> u32 {
        self.rule().color
    }
}

/// A running effect as shown on the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectTimer {
    pub kind: PowerUpKind,
    pub label: &'static str,
    /// Seconds left, rounded to one decimal, never negative
    pub remaining_secs: f64,
}

/// Currently active effects, keyed by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    expires_at: BTreeMap<PowerUpKind, f64>,
}

impl ActiveEffects {
    /// Start or refresh `kind` and apply its activation
    pub fn activate(&mut self, kind: PowerUpKind, now: f64, stats: &mut RunStats, tuning: &Tuning) {
        let rule = kind.rule();
        let expiry = now + (rule.duration)(tuning);
        self.expires_at.insert(kind, expiry);
        (rule.activate)(stats, tuning);
        log::debug!("Activated {} until t={:.2}", kind.as_str(), expiry);
    }

    /// Activate by name. Unknown names are ignored. Returns whether
    /// anything was activated.
    pub fn activate_named(
        &mut self,
        name: &str,
        now: f64,
        stats: &mut RunStats,
        tuning: &Tuning,
    ) -> bool {
        match PowerUpKind::from_name(name) {
            Some(kind) => {
                self.activate(kind, now, stats, tuning);
                true
            }
            None => {
                log::warn!("Ignoring unknown power-up kind {:?}", name);
                false
            }
        }
    }

    /// Deactivate every effect whose expiry is at or before `now` and apply
    /// its reversal. Returns the expired kinds in table order.
    pub fn expire(&mut self, now: f64, stats: &mut RunStats, tuning: &Tuning) -> Vec<PowerUpKind> {
        let expired: Vec<PowerUpKind> = self
            .expires_at
            .iter()
            .filter(|&(_, &at)| at <= now)
            .map(|(&kind, _)| kind)
            .collect();

        for &kind in &expired {
            self.expires_at.remove(&kind);
            (kind.rule().revert)(stats, tuning);
            log::debug!("Expired {}", kind.as_str());
        }
        expired
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.expires_at.contains_key(&kind)
    }

    pub fn expires_at(&self, kind: PowerUpKind) -> Option<f64> {
        self.expires_at.get(&kind).copied()
    }

    /// Remaining time per active kind, for display
    pub fn timers(&self, now: f64) -> Vec<EffectTimer> {
        self.expires_at
            .iter()
            .map(|(&kind, &at)| EffectTimer {
                kind,
                label: kind.rule().label,
                remaining_secs: round_tenths(at - now).max(0.0),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.expires_at.clear();
    }

    pub fn len(&self) -> usize {
        self.expires_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expires_at.is_empty()
    }
}
