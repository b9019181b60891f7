//! World-level simulation properties exercised through the public API.

use arena_shared::boost::{Boost, BoostId, BoostKind};
use arena_shared::bullet::Bullet;
use arena_shared::config::ArenaConfig;
use arena_shared::effect::Effect;
use arena_shared::math::{Coordinate, Dimension};
use arena_shared::net::Command;
use arena_shared::player::PlayerId;
use arena_shared::shape::Shape;
use arena_shared::spell::{CastState, Spell, SpellAction, Targeting};
use arena_shared::world::World;

const TICK_HZ: u32 = 30;

fn seeded_world() -> World {
    World::new(&ArenaConfig {
        tick_hz: TICK_HZ,
        seed: Some(42),
        ..Default::default()
    })
}

fn join_at(world: &mut World, name: &str, at: Coordinate) -> PlayerId {
    let id = world.join(name, Dimension::new(800.0, 600.0));
    let player = world.player_mut(id).unwrap();
    player.coordinate = at;
    player.target = at;
    id
}

#[test]
fn bullet_stays_alive_ten_ticks_then_is_filtered() {
    let mut world = seeded_world();
    // Park the only player far from the flight path.
    let owner = join_at(&mut world, "gunner", Coordinate::new(1500.0, 1500.0));

    world
        .bullets
        .push(Bullet::new(owner, Coordinate::ZERO, Coordinate::new(100.0, 0.0)));

    // (0,0) -> (100,0) at speed 10: alive through nine steps, dead on the
    // tenth, removed by the filter pass of the eleventh.
    for tick in 1..=9 {
        world.step();
        assert!(world.bullets[0].alive, "alive at tick {tick}");
    }
    world.step();
    assert_eq!(world.bullets.len(), 1);
    assert!(!world.bullets[0].alive);
    assert_eq!(world.bullets[0].current, Coordinate::new(100.0, 0.0));
    world.step();
    assert!(world.bullets.is_empty());
}

#[test]
fn bullet_never_damages_its_owner() {
    let mut world = seeded_world();
    let at = Coordinate::new(500.0, 500.0);
    let owner = join_at(&mut world, "gunner", at);

    // A bullet sitting inside the owner's own box.
    world
        .bullets
        .push(Bullet::new(owner, at, Coordinate::new(1500.0, 500.0)));
    world.step();
    let player = world.player(owner).unwrap();
    assert_eq!(player.hp, player.max_hp);
}

#[test]
fn bullet_hit_damages_consumes_and_eventually_kills() {
    let mut world = seeded_world();
    let shooter = join_at(&mut world, "shooter", Coordinate::new(100.0, 500.0));
    let victim = join_at(&mut world, "victim", Coordinate::new(200.0, 500.0));

    let max_hp = world.player(victim).unwrap().max_hp;
    // 10 damage per hit: 14 hits to take 140 hp.
    let needed = (max_hp / 10.0).ceil() as u32;
    for _ in 0..needed {
        world.apply(
            shooter,
            Command::Shoot {
                target: Coordinate::new(200.0, 500.0),
            },
        );
        // 100 units at speed 10: the bullet arrives inside the victim's box
        // within ten steps.
        for _ in 0..10 {
            world.step();
        }
        // Re-park the victim in case a kill respawned it elsewhere.
        let p = world.player_mut(victim).unwrap();
        p.coordinate = Coordinate::new(200.0, 500.0);
        p.target = p.coordinate;
    }

    let shooter_score = world.player(shooter).unwrap().score;
    assert_eq!(shooter_score, 1, "kill credit goes to the owner");
    let revived = world.player(victim).unwrap();
    assert_eq!(revived.hp, revived.max_hp, "victim respawns at full hp");
}

#[test]
fn casting_is_rejected_while_casting_or_cooling_down() {
    let mut world = seeded_world();
    let caster = join_at(&mut world, "caster", Coordinate::new(500.0, 500.0));

    world.apply(
        caster,
        Command::Spell {
            action: SpellAction::Spell1,
            target: None,
        },
    );
    let spell = world.player(caster).unwrap().spell(SpellAction::Spell1).unwrap();
    assert_eq!(spell.state(), CastState::Casting);
    let remaining = spell.remaining_cast;

    // A second request mid-cast changes nothing.
    world.apply(
        caster,
        Command::Spell {
            action: SpellAction::Spell1,
            target: None,
        },
    );
    let spell = world.player(caster).unwrap().spell(SpellAction::Spell1).unwrap();
    assert_eq!(spell.remaining_cast, remaining);

    // Run the cast out; the spell lands on cooldown and still rejects.
    for _ in 0..remaining {
        world.step();
    }
    let spell = world.player(caster).unwrap().spell(SpellAction::Spell1).unwrap();
    assert_eq!(spell.state(), CastState::OnCooldown);
    world.apply(
        caster,
        Command::Spell {
            action: SpellAction::Spell1,
            target: None,
        },
    );
    let spell = world.player(caster).unwrap().spell(SpellAction::Spell1).unwrap();
    assert_eq!(spell.state(), CastState::OnCooldown);

    // After the cooldown runs out the request succeeds again.
    for _ in 0..spell.remaining_cooldown {
        world.step();
    }
    world.apply(
        caster,
        Command::Spell {
            action: SpellAction::Spell1,
            target: None,
        },
    );
    let spell = world.player(caster).unwrap().spell(SpellAction::Spell1).unwrap();
    assert_eq!(spell.state(), CastState::Casting);
}

#[test]
fn boost_pickup_applies_once_and_never_compounds() {
    let mut world = seeded_world();
    let at = Coordinate::new(500.0, 500.0);
    let id = join_at(&mut world, "runner", at);
    let base = world.player(id).unwrap().speed;

    world
        .boosts
        .push(Boost::new(BoostId(1), at, BoostKind::Speed, "#123456".into(), 100));
    world.step();
    assert!(world.boosts.is_empty(), "picked-up boost leaves the world");
    assert_eq!(world.player(id).unwrap().speed, base + 1.0);

    // Second pickup while the first is held: old delta reversed first.
    world
        .boosts
        .push(Boost::new(BoostId(2), at, BoostKind::Speed, "#123456".into(), 100));
    world.step();
    assert_eq!(world.player(id).unwrap().speed, base + 1.0);
}

#[test]
fn expired_boost_despawns_without_pickup() {
    let mut world = seeded_world();
    join_at(&mut world, "far", Coordinate::new(1500.0, 1500.0));
    world.boosts.push(Boost::new(
        BoostId(1),
        Coordinate::new(100.0, 100.0),
        BoostKind::Speed,
        "#123456".into(),
        3,
    ));
    world.step();
    world.step();
    assert_eq!(world.boosts.len(), 1);
    world.step();
    assert!(world.boosts.is_empty());
}

#[test]
fn circle_heal_is_order_independent() {
    // Same scenario twice with the player list reversed: the resulting hp
    // multiset must be identical.
    fn run(reversed: bool) -> Vec<u32> {
        let mut world = seeded_world();
        let caster = join_at(&mut world, "caster", Coordinate::new(1000.0, 1000.0));
        let others = [
            (Coordinate::new(1030.0, 1000.0), 100.0),
            (Coordinate::new(1000.0, 1040.0), 80.0),
            (Coordinate::new(960.0, 1000.0), 60.0),
        ];
        for (i, (at, hp)) in others.iter().enumerate() {
            let id = join_at(&mut world, &format!("t{i}"), *at);
            world.player_mut(id).unwrap().hp = *hp;
        }
        world.player_mut(caster).unwrap().hp = 50.0;

        // Swap in a circle heal so every neighbour is in range.
        let heal = Spell::new(
            "Test mend",
            "heal test",
            0.1,
            1.0,
            0.0,
            Shape::Circle { radius: 100.0 },
            Effect::Heal,
            Targeting::OnCharacter,
            SpellAction::Spell1,
            TICK_HZ,
        );
        let slot = world
            .player_mut(caster)
            .unwrap()
            .spells
            .iter()
            .position(|s| s.action == SpellAction::Spell1)
            .unwrap();
        world.player_mut(caster).unwrap().spells[slot] = heal;

        if reversed {
            world.players.reverse();
        }

        world.apply(
            caster,
            Command::Spell {
                action: SpellAction::Spell1,
                target: None,
            },
        );
        let cast_ticks = world
            .player(caster)
            .unwrap()
            .spell(SpellAction::Spell1)
            .unwrap()
            .remaining_cast;
        for _ in 0..cast_ticks {
            world.step();
        }

        let mut hp: Vec<u32> = world.players.iter().map(|p| (p.hp * 100.0) as u32).collect();
        hp.sort_unstable();
        hp
    }

    assert_eq!(run(false), run(true));
    // 1% of (100 + 80 + 60) = 2.4 onto the caster's 50.
    assert!(run(false).contains(&5240));
}

#[test]
fn push_back_displaces_targets_and_clamps_to_bounds() {
    let mut world = seeded_world();
    let caster = join_at(&mut world, "caster", Coordinate::new(30.0, 500.0));
    // In front of the caster but near the world edge behind it.
    let target = join_at(&mut world, "target", Coordinate::new(5.0, 500.0));

    // "Sword swing": circle r=50, pushback magnitude 40.
    world.apply(
        caster,
        Command::Spell {
            action: SpellAction::Spell1,
            target: None,
        },
    );
    let cast_ticks = world
        .player(caster)
        .unwrap()
        .spell(SpellAction::Spell1)
        .unwrap()
        .remaining_cast;
    for _ in 0..cast_ticks {
        world.step();
    }

    // Pushed 40 along caster->target (-x), clamped at the world edge.
    let pushed = world.player(target).unwrap().coordinate;
    assert_eq!(pushed, Coordinate::new(0.0, 500.0));
}

#[test]
fn dash_travels_blocks_and_then_cools_down() {
    let mut world = seeded_world();
    let at = Coordinate::new(500.0, 500.0);
    let dasher = join_at(&mut world, "dasher", at);
    // Face +x.
    world.apply(
        dasher,
        Command::Moving {
            target: Coordinate::new(600.0, 500.0),
        },
    );
    world.player_mut(dasher).unwrap().target = at; // stay put, keep facing

    world.apply(dasher, Command::Special { target: None });
    let p = world.player(dasher).unwrap();
    assert!(p.blocking, "block raises at invocation");
    let travel_ticks = p.special.remaining_cast;

    // Bullets fired at a blocking player are discarded.
    let shooter = join_at(&mut world, "shooter", Coordinate::new(1500.0, 1500.0));
    world
        .bullets
        .push(Bullet::new(shooter, at, Coordinate::new(1600.0, 1500.0)));

    for _ in 0..travel_ticks {
        world.step();
    }

    let p = world.player(dasher).unwrap();
    assert!(!p.blocking, "immunity ends with the travel");
    assert_eq!(p.hp, p.max_hp);
    assert_eq!(p.special.state(), CastState::OnCooldown);
    // Dash distance 200 along +x from the start position.
    assert!(p.coordinate.distance_to(Coordinate::new(700.0, 500.0)) < 0.1);
}

#[test]
fn snapshot_carries_players_bullets_and_boosts() {
    let mut world = seeded_world();
    let id = join_at(&mut world, "viewer", Coordinate::new(500.0, 500.0));
    world.apply(
        id,
        Command::Shoot {
            target: Coordinate::new(900.0, 900.0),
        },
    );
    world.spawn_boost();

    let update = world.step();
    assert_eq!(update.tick, 1);
    assert_eq!(update.players.len(), 1);
    let view = &update.players[0];
    assert_eq!(view.id, id);
    assert_eq!(view.spells.len(), 3);
    assert_eq!(update.bullets.len(), 1);
    assert!(update.bullets[0].alive);
    assert_eq!(update.boosts.len(), 1);
}
