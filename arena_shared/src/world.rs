//! The world aggregate and the fixed-order tick step.
//!
//! A single owned `World` is the source of truth for all players, bullets,
//! and boosts; it is passed explicitly into every subsystem call, never held
//! in process-wide state.
//!
//! Determinism notes:
//! - Keep simulation in a fixed timestep; timers are tick counters.
//! - Avoid wall-clock-dependent branching in gameplay code.
//! - Use stable ordering when iterating collections.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::boost::{Boost, BoostId, BoostKind, BOOST_LIFETIME_SECS};
use crate::bullet::{Bullet, BULLET_DAMAGE};
use crate::collision;
use crate::config::ArenaConfig;
use crate::effect::{self, Effect};
use crate::math::{Coordinate, Dimension, Vec2};
use crate::movement;
use crate::net::{BoostView, BulletView, PlayerView, Update};
use crate::player::{Player, PlayerId};
use crate::profession::Profession;
use crate::shape::Shape;
use crate::spell::{seconds_to_ticks, Invocation, SpellAction, Targeting, Travel};

/// Minimum distance from every player when placing spawns and boosts.
/// Deliberately distinct from the pickup box, which is the boost's own size.
pub const SPAWN_CLEARANCE: f32 = 100.0;

const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// A cast that completed this tick and is due for effect application.
struct Resolution {
    caster: PlayerId,
    shape: Option<Shape>,
    effect: Effect,
    magnitude: f32,
    targeting: Targeting,
    invocation: Invocation,
}

pub struct World {
    pub dimension: Dimension,
    pub tick_hz: u32,
    tick: u64,
    pub players: Vec<Player>,
    pub bullets: Vec<Bullet>,
    pub boosts: Vec<Boost>,
    next_player_id: u32,
    next_boost_id: u32,
    rng: StdRng,
}

impl World {
    pub fn new(cfg: &ArenaConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            dimension: cfg.dimension(),
            tick_hz: cfg.tick_hz,
            tick: 0,
            players: Vec::new(),
            bullets: Vec::new(),
            boosts: Vec::new(),
            next_player_id: 1,
            next_boost_id: 1,
            rng,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    // ─── Session lifecycle ───

    /// Creates a player at a clear spawn and returns its id. Empty names
    /// become "Unknown"; color is server-assigned.
    pub fn join(&mut self, name: &str, viewport: Dimension) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        let name = match name.trim() {
            "" => "Unknown".to_string(),
            trimmed => trimmed.to_string(),
        };
        let color = random_color(&mut self.rng);
        let spawn = self.place_clear_of_players();
        let player = Player::new(id, name, color, Profession::Warrior, spawn, viewport, self.tick_hz);
        info!(player = ?id, name = %player.name, total = self.players.len() + 1, "player joined");
        self.players.push(player);
        id
    }

    /// Removes the player. Bullets keep the orphaned owner id; lookups
    /// against it resolve to absent.
    pub fn leave(&mut self, id: PlayerId) {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.players.len() < before {
            info!(player = ?id, total = self.players.len(), "player left");
        } else {
            debug!(player = ?id, "leave for unknown player dropped");
        }
    }

    // ─── Inbound commands ───

    /// Applies one command from a player's session. Malformed commands and
    /// unknown player ids are dropped; they never abort the tick for other
    /// entities.
    pub fn apply(&mut self, id: PlayerId, command: crate::net::Command) {
        use crate::net::Command;
        if !command.is_well_formed() {
            debug!(player = ?id, ?command, "dropping malformed command");
            return;
        }
        if self.player(id).is_none() {
            debug!(player = ?id, "dropping command for unknown player");
            return;
        }
        match command {
            Command::Moving { target } => {
                let dim = self.dimension;
                if let Some(p) = self.player_mut(id) {
                    p.target = target.clamped(dim);
                    p.rotation = p.facing_toward(p.target);
                }
            }
            Command::Shoot { target } => {
                if let Some(p) = self.player(id) {
                    let bullet = Bullet::new(id, p.coordinate, target);
                    self.bullets.push(bullet);
                }
            }
            Command::Spell { action, target } => self.request_spell(id, action, target),
            Command::Special { target } => self.request_special(id, target),
        }
    }

    fn request_spell(&mut self, id: PlayerId, action: SpellAction, target: Option<Coordinate>) {
        let dim = self.dimension;
        let Some(p) = self.player_mut(id) else { return };
        let aim = target.unwrap_or(p.target);
        let invocation = Invocation {
            anchor: aim.clamped(dim),
            rotation: p.facing_toward(aim),
        };
        if let Some(spell) = p.spell_mut(action) {
            let name = spell.name.clone();
            let raises_block = spell.effect == Effect::Block;
            if spell.try_begin_cast(invocation) {
                if raises_block {
                    p.blocking = true;
                }
                debug!(player = ?id, spell = %name, "cast started");
            }
        }
    }

    fn request_special(&mut self, id: PlayerId, target: Option<Coordinate>) {
        let dim = self.dimension;
        let Some(p) = self.player_mut(id) else { return };
        let aim = target.unwrap_or(p.target);
        let rotation = p.facing_toward(aim);
        let invocation = Invocation {
            anchor: aim.clamped(dim),
            rotation,
        };
        let travel = (p.special.distance > 0.0).then(|| {
            let destination = p
                .coordinate
                .translated(Vec2::from_angle(rotation).scaled(p.special.distance))
                .clamped(dim);
            Travel {
                destination,
                speed_per_tick: p.special.distance / p.special.travel_ticks.max(1) as f32,
            }
        });
        if p.special.try_begin_cast(invocation, travel) {
            // Block immunity raises immediately and holds for the travel.
            if p.special.effect == Effect::Block {
                p.blocking = true;
            }
            debug!(player = ?id, special = %p.special.name, "special started");
        }
    }

    /// Places one boost at a clear position. Spawn cadence is external
    /// policy; the world never owns the respawn timer.
    pub fn spawn_boost(&mut self) {
        let id = BoostId(self.next_boost_id);
        self.next_boost_id += 1;
        let coordinate = self.place_clear_of_players();
        let kind = BoostKind::random(&mut self.rng);
        let color = random_color(&mut self.rng);
        let lifetime = seconds_to_ticks(BOOST_LIFETIME_SECS, self.tick_hz);
        info!(boost = ?id, ?kind, "boost spawned");
        self.boosts
            .push(Boost::new(id, coordinate, kind, color, lifetime));
    }

    /// Random position at least [`SPAWN_CLEARANCE`] away from every player.
    /// Falls back to the world center when the world is too crowded.
    fn place_clear_of_players(&mut self) -> Coordinate {
        let dim = self.dimension;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let candidate = Coordinate::new(
                self.rng.gen_range(0.0..=dim.width),
                self.rng.gen_range(0.0..=dim.height),
            );
            if self
                .players
                .iter()
                .all(|p| p.coordinate.distance_to(candidate) >= SPAWN_CLEARANCE)
            {
                return candidate;
            }
        }
        Coordinate::new(dim.width / 2.0, dim.height / 2.0)
    }

    // ─── The tick step ───

    /// One fixed simulation step. Phases run strictly in order and never
    /// interleave; the returned snapshot is what the transport broadcasts.
    pub fn step(&mut self) -> Update {
        // 1. Drop bullets that died last tick.
        self.bullets.retain(|b| b.alive);
        // 2. Advance bullets toward their fixed destinations.
        for bullet in &mut self.bullets {
            bullet.advance();
        }
        // 3. Advance players: dash travel overrides seek.
        for player in &mut self.players {
            if let Some(travel) = player.special.travel {
                player.coordinate =
                    movement::advance(player.coordinate, travel.destination, travel.speed_per_tick);
            } else {
                player.coordinate =
                    movement::advance(player.coordinate, player.target, player.speed);
            }
        }
        // 4. Bullet-vs-player collisions, damage, kills.
        self.collide_bullets();
        // 5. Boost expiry and pickups.
        self.settle_boosts();
        // 6. Spell/special timers; resolve casts reaching zero.
        self.advance_casts();
        // 7. Invariant repair, then snapshot.
        self.repair_invariants();
        self.tick += 1;
        self.snapshot()
    }

    fn collide_bullets(&mut self) {
        let hits: Vec<(usize, PlayerId)> = self
            .bullets
            .iter()
            .enumerate()
            .filter(|(_, b)| b.alive)
            .filter_map(|(i, b)| collision::bullet_hit(b, &self.players).map(|victim| (i, victim)))
            .collect();

        for (i, victim) in hits {
            let owner = self.bullets[i].owner;
            self.bullets[i].alive = false;
            let Some(p) = self.player_mut(victim) else { continue };
            let fatal = p.take_damage(BULLET_DAMAGE);
            debug!(player = ?victim, hp = p.hp, "bullet hit");
            if fatal {
                let spawn = self.place_clear_of_players();
                if let Some(p) = self.player_mut(victim) {
                    p.hp = p.max_hp;
                    p.coordinate = spawn;
                    p.target = spawn;
                }
                // Kill credit only while the owner is still connected.
                if let Some(killer) = self.player_mut(owner) {
                    killer.score += 1;
                }
                info!(victim = ?victim, killer = ?owner, "player killed");
            }
        }
    }

    fn settle_boosts(&mut self) {
        for boost in &mut self.boosts {
            boost.remaining_ticks = boost.remaining_ticks.saturating_sub(1);
        }
        self.boosts.retain(|b| {
            if b.remaining_ticks == 0 {
                debug!(boost = ?b.id, "boost expired");
                false
            } else {
                true
            }
        });

        // Players scan in order; a removed boost cannot be claimed twice.
        for pi in 0..self.players.len() {
            let Some(bi) = self
                .boosts
                .iter()
                .position(|b| collision::player_over_boost(&self.players[pi], b))
            else {
                continue;
            };
            let boost = self.boosts.remove(bi);
            let player = &mut self.players[pi];
            player.apply_boost(boost.kind);
            info!(player = ?player.id, boost = ?boost.id, kind = ?boost.kind, "boost picked up");
        }
    }

    fn advance_casts(&mut self) {
        let mut resolutions = Vec::new();
        for player in &mut self.players {
            for spell in &mut player.spells {
                if let Some(invocation) = spell.tick() {
                    resolutions.push(Resolution {
                        caster: player.id,
                        shape: Some(spell.shape),
                        effect: spell.effect,
                        magnitude: spell.magnitude,
                        targeting: spell.targeting,
                        invocation,
                    });
                }
            }
            if let Some(invocation) = player.special.tick() {
                resolutions.push(Resolution {
                    caster: player.id,
                    shape: None,
                    effect: player.special.effect,
                    magnitude: 0.0,
                    targeting: player.special.targeting,
                    invocation,
                });
            }
        }

        // Every resolution's target set is collected against the same
        // pre-application state before any effect mutates it.
        let resolved: Vec<(Resolution, Vec<PlayerId>)> = resolutions
            .into_iter()
            .map(|r| {
                let targets = match r.shape {
                    Some(shape) => {
                        let anchor = match r.targeting {
                            Targeting::OnGround => r.invocation.anchor,
                            Targeting::OnCharacter => self
                                .player(r.caster)
                                .map(|p| p.coordinate)
                                .unwrap_or(r.invocation.anchor),
                        };
                        collision::aoe_targets(
                            r.caster,
                            shape,
                            anchor,
                            r.invocation.rotation,
                            &self.players,
                        )
                    }
                    None => Vec::new(),
                };
                (r, targets)
            })
            .collect();

        for (resolution, targets) in resolved {
            self.apply_resolution(&resolution, &targets);
        }
    }

    fn apply_resolution(&mut self, r: &Resolution, targets: &[PlayerId]) {
        match r.effect {
            Effect::PushBack => {
                let caster_pos = self
                    .player(r.caster)
                    .map(|p| p.coordinate)
                    .unwrap_or(r.invocation.anchor);
                let dim = self.dimension;
                for &target in targets {
                    if let Some(t) = self.player_mut(target) {
                        let displacement = effect::push_back_displacement(
                            caster_pos,
                            t.coordinate,
                            r.invocation.rotation,
                            r.magnitude,
                        );
                        t.coordinate = t.coordinate.translated(displacement).clamped(dim);
                        debug!(player = ?target, "pushed back");
                    }
                }
            }
            Effect::Heal => {
                let target_hp: Vec<f32> = targets
                    .iter()
                    .filter_map(|&t| self.player(t).map(|p| p.hp))
                    .collect();
                let amount = effect::heal_amount(&target_hp);
                if let Some(caster) = self.player_mut(r.caster) {
                    caster.heal(amount);
                    debug!(player = ?r.caster, amount, "healed");
                }
            }
            Effect::Block => {
                // Immunity ends with the travel; nothing was queued.
                if let Some(caster) = self.player_mut(r.caster) {
                    caster.blocking = false;
                }
            }
        }
    }

    /// Fatal-only conditions are logged and repaired in place; the process
    /// never aborts over a broken invariant.
    fn repair_invariants(&mut self) {
        let dim = self.dimension;
        for player in &mut self.players {
            if !(0.0..=player.max_hp).contains(&player.hp) {
                warn!(player = ?player.id, hp = player.hp, "hp out of range, clamping");
                player.hp = player.hp.clamp(0.0, player.max_hp);
            }
            let clamped = player.coordinate.clamped(dim);
            if clamped != player.coordinate {
                warn!(player = ?player.id, "coordinate out of bounds, clamping");
                player.coordinate = clamped;
            }
        }
        for i in 1..self.players.len() {
            if self.players[..i].iter().any(|q| q.id == self.players[i].id) {
                let fresh = PlayerId(self.next_player_id);
                self.next_player_id += 1;
                warn!(player = ?self.players[i].id, reassigned = ?fresh, "duplicate player id, reassigning");
                self.players[i].id = fresh;
            }
        }
    }

    /// Immutable snapshot of the current state for broadcast.
    pub fn snapshot(&self) -> Update {
        Update {
            tick: self.tick,
            players: self.players.iter().map(PlayerView::of).collect(),
            bullets: self.bullets.iter().map(BulletView::of).collect(),
            boosts: self.boosts.iter().map(BoostView::of).collect(),
        }
    }
}

fn random_color<R: Rng>(rng: &mut R) -> String {
    format!("#{:06x}", rng.gen_range(0..0x100_0000))
}
