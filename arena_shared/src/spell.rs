//! Spell records and the per-ability cast state machine.
//!
//! States run Ready → Casting → OnCooldown → Ready, driven by tick counters
//! decremented synchronously inside the world step (never wall-clock
//! timers). A cast request while not Ready is a silent no-op.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::math::Coordinate;
use crate::shape::Shape;

/// Action slot a cast request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpellAction {
    BasicAttack,
    Spell1,
    Spell2,
}

/// Where the AOE is anchored at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Targeting {
    /// Anchored on the caster's position at resolution.
    OnCharacter,
    /// Anchored on the target coordinate captured at invocation.
    OnGround,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastState {
    Ready,
    Casting,
    OnCooldown,
}

/// Anchor and facing captured when a cast begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub anchor: Coordinate,
    pub rotation: f32,
}

/// Converts author-time seconds into tick counts at the world tick rate.
/// Always at least one tick so a zero-length phase cannot wedge the machine.
pub fn seconds_to_ticks(seconds: f32, tick_hz: u32) -> u32 {
    ((seconds * tick_hz as f32) as u32).max(1)
}

#[derive(Debug, Clone)]
pub struct Spell {
    pub name: String,
    pub description: String,
    pub cast_ticks: u32,
    pub cooldown_ticks: u32,
    pub magnitude: f32,
    pub shape: Shape,
    pub effect: Effect,
    pub targeting: Targeting,
    pub action: SpellAction,
    pub remaining_cast: u32,
    pub remaining_cooldown: u32,
    /// Present while Casting; taken at resolution.
    pub invocation: Option<Invocation>,
}

impl Spell {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        description: &str,
        cast_secs: f32,
        cooldown_secs: f32,
        magnitude: f32,
        shape: Shape,
        effect: Effect,
        targeting: Targeting,
        action: SpellAction,
        tick_hz: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            cast_ticks: seconds_to_ticks(cast_secs, tick_hz),
            cooldown_ticks: seconds_to_ticks(cooldown_secs, tick_hz),
            magnitude,
            shape,
            effect,
            targeting,
            action,
            remaining_cast: 0,
            remaining_cooldown: 0,
            invocation: None,
        }
    }

    pub fn state(&self) -> CastState {
        if self.remaining_cast > 0 {
            CastState::Casting
        } else if self.remaining_cooldown > 0 {
            CastState::OnCooldown
        } else {
            CastState::Ready
        }
    }

    /// Starts a cast. Returns false with state unchanged unless Ready.
    pub fn try_begin_cast(&mut self, invocation: Invocation) -> bool {
        if self.state() != CastState::Ready {
            return false;
        }
        self.remaining_cast = self.cast_ticks;
        self.invocation = Some(invocation);
        true
    }

    /// Advances the state machine by one tick. Returns the captured
    /// invocation when the cast completes and is due for AOE resolution,
    /// at which point the cooldown is armed.
    pub fn tick(&mut self) -> Option<Invocation> {
        if self.remaining_cast > 0 {
            self.remaining_cast -= 1;
            if self.remaining_cast == 0 {
                self.remaining_cooldown = self.cooldown_ticks;
                return self.invocation.take();
            }
        } else if self.remaining_cooldown > 0 {
            self.remaining_cooldown -= 1;
        }
        None
    }
}

/// Dash destination and per-tick travel speed captured at invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Travel {
    pub destination: Coordinate,
    pub speed_per_tick: f32,
}

/// A profession's special ability. Shares the Ready/Casting/OnCooldown
/// machine with [`Spell`] but has no AOE shape; instead it may carry a
/// travel phase that overrides seek movement while Casting.
#[derive(Debug, Clone)]
pub struct Special {
    pub name: String,
    pub description: String,
    pub travel_ticks: u32,
    pub cooldown_ticks: u32,
    pub effect: Effect,
    pub targeting: Targeting,
    pub distance: f32,
    pub remaining_cast: u32,
    pub remaining_cooldown: u32,
    pub invocation: Option<Invocation>,
    /// Present while travelling; cleared at resolution.
    pub travel: Option<Travel>,
}

impl Special {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        description: &str,
        cooldown_secs: f32,
        distance: f32,
        travel_secs: f32,
        effect: Effect,
        targeting: Targeting,
        tick_hz: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            travel_ticks: seconds_to_ticks(travel_secs, tick_hz),
            cooldown_ticks: seconds_to_ticks(cooldown_secs, tick_hz),
            effect,
            targeting,
            distance,
            remaining_cast: 0,
            remaining_cooldown: 0,
            invocation: None,
            travel: None,
        }
    }

    pub fn state(&self) -> CastState {
        if self.remaining_cast > 0 {
            CastState::Casting
        } else if self.remaining_cooldown > 0 {
            CastState::OnCooldown
        } else {
            CastState::Ready
        }
    }

    /// Starts the special. Returns false with state unchanged unless Ready.
    pub fn try_begin_cast(&mut self, invocation: Invocation, travel: Option<Travel>) -> bool {
        if self.state() != CastState::Ready {
            return false;
        }
        self.remaining_cast = self.travel_ticks;
        self.invocation = Some(invocation);
        self.travel = travel;
        true
    }

    /// Advances the state machine by one tick; see [`Spell::tick`].
    pub fn tick(&mut self) -> Option<Invocation> {
        if self.remaining_cast > 0 {
            self.remaining_cast -= 1;
            if self.remaining_cast == 0 {
                self.remaining_cooldown = self.cooldown_ticks;
                self.travel = None;
                return self.invocation.take();
            }
        } else if self.remaining_cooldown > 0 {
            self.remaining_cooldown -= 1;
        }
        None
    }
}
