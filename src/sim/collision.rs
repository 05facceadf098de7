//! Player contact resolution
//!
//! One reverse pass over the entity list. Each overlapping entity resolves
//! exactly one branch: pickup, mine, jelly, or a size contest between fish.
//! Removal happens in place, which is safe because only already-visited
//! indices shift.

use rand::Rng;

use super::effects::Effects;
use super::entity::{Entity, EntityKind, PickupKind};
use super::session::{Session, points_for_eat};
use crate::audio::Sound;
use crate::consts::colors;
use crate::knockback;
use crate::tuning::Tuning;

/// Floating text lifetime for status messages
const STATUS_TEXT_TICKS: u32 = 60;
/// Floating text lifetime for score popups
const SCORE_TEXT_TICKS: u32 = 30;

/// Combo count above which score popups turn green
const COMBO_TEXT_THRESHOLD: u32 = 3;

/// What one collision pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Fish eaten this tick
    pub eaten: u32,
    /// Pickups collected this tick
    pub pickups: u32,
    /// Player was eaten with no shield left
    pub died: bool,
}

/// Outcome of one entity interaction
#[derive(Debug, Clone, Copy, Default)]
struct Contact {
    remove: bool,
    died: bool,
}

impl Contact {
    const KEEP: Contact = Contact {
        remove: false,
        died: false,
    };
    const REMOVE: Contact = Contact {
        remove: true,
        died: false,
    };
    const FATAL: Contact = Contact {
        remove: false,
        died: true,
    };
}

/// Resolve every entity overlapping the player
///
/// Stops at the first fatal contact: once the player is eaten, entities not
/// yet visited keep their state and award nothing. The pass never keeps
/// scoring or collecting pickups for a dead player.
pub fn resolve_collisions<R: Rng>(
    player: &mut Entity,
    enemies: &mut Vec<Entity>,
    session: &mut Session,
    now: u64,
    tuning: &Tuning,
    rng: &mut R,
    fx: &mut Effects,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let overlap = tuning.hazards.overlap_factor;

    let mut i = enemies.len();
    while i > 0 {
        i -= 1;
        if !player.overlaps(&enemies[i], overlap) {
            continue;
        }

        let kind = enemies[i].kind;
        let contact = match kind {
            EntityKind::Pickup(pickup) => {
                report.pickups += 1;
                collect_pickup(player, session, pickup, tuning, fx)
            }
            EntityKind::Mine => detonate_mine(player, &enemies[i], tuning, rng, fx),
            EntityKind::Jelly => sting(player, &enemies[i], tuning, fx),
            EntityKind::Normal | EntityKind::Gold | EntityKind::Electric => {
                if player.radius > enemies[i].radius {
                    report.eaten += 1;
                    eat(player, &enemies[i], session, now, tuning, rng, fx)
                } else {
                    bitten(player, &enemies[i], tuning, fx)
                }
            }
        };

        log::debug!("Contact with {:?} #{}: {:?}", kind, enemies[i].id, contact);
        if contact.remove {
            enemies.remove(i);
        }
        if contact.died {
            report.died = true;
            break;
        }
    }

    report
}

fn collect_pickup(
    player: &mut Entity,
    session: &mut Session,
    pickup: PickupKind,
    tuning: &Tuning,
    fx: &mut Effects,
) -> Contact {
    let pt = &tuning.pickups;
    let (sound, text) = match pickup {
        PickupKind::Shield => {
            player.has_shield = true;
            (Sound::Shield, "SHIELD UP!")
        }
        PickupKind::Speed => {
            player.speed_boost_ticks = pt.speed_boost_ticks;
            (Sound::PowerUp, "SPEED UP!")
        }
        PickupKind::Freeze => {
            session.freeze_ticks = pt.freeze_ticks;
            (Sound::Freeze, "FREEZE!")
        }
        PickupKind::Growth => {
            player.radius += pt.growth_amount;
            (Sound::PowerUp, "GROWTH!")
        }
    };
    fx.sound(sound);
    fx.text(player.pos, text, STATUS_TEXT_TICKS, pickup.color());
    Contact::REMOVE
}

fn detonate_mine<R: Rng>(
    player: &mut Entity,
    mine: &Entity,
    tuning: &Tuning,
    rng: &mut R,
    fx: &mut Effects,
) -> Contact {
    let hz = &tuning.hazards;
    if player.has_shield {
        player.has_shield = false;
        player.stun_ticks = hz.mine_shielded_stun_ticks;
        fx.text(player.pos, "BLOCKED!", STATUS_TEXT_TICKS, colors::SHIELD);
    } else {
        player.shrink(hz.mine_shrink, tuning.player.min_radius);
        player.stun_ticks = hz.mine_stun_ticks;
        fx.text(player.pos, "BOOM!", STATUS_TEXT_TICKS, colors::DANGER);
    }
    player.vel = knockback(mine.pos, player.pos, hz.mine_knockback);
    fx.sound(Sound::Explode);
    fx.burst(
        rng,
        mine.pos,
        hz.mine_particles,
        hz.mine_particle_spread,
        hz.mine_particle_life,
        colors::EXPLOSION,
        hz.mine_particle_size,
    );
    Contact::REMOVE
}

/// Jelly stings go straight through shields
fn sting(player: &mut Entity, jelly: &Entity, tuning: &Tuning, fx: &mut Effects) -> Contact {
    let hz = &tuning.hazards;
    player.vel = knockback(jelly.pos, player.pos, hz.jelly_knockback);
    player.stun_ticks = hz.jelly_stun_ticks;
    fx.sound(Sound::Zap);
    fx.text(player.pos, "OUCH!", STATUS_TEXT_TICKS, colors::JELLY);
    Contact::KEEP
}

#[allow(clippy::too_many_arguments)]
fn eat<R: Rng>(
    player: &mut Entity,
    prey: &Entity,
    session: &mut Session,
    now: u64,
    tuning: &Tuning,
    rng: &mut R,
    fx: &mut Effects,
) -> Contact {
    let scoring = &tuning.scoring;
    let gold = prey.kind == EntityKind::Gold;
    let electric = prey.kind == EntityKind::Electric;

    fx.sound(Sound::Eat);
    if electric {
        player.stun_ticks = tuning.hazards.electric_stun_ticks;
        fx.sound(Sound::Zap);
        fx.text(player.pos, "STUNNED!", STATUS_TEXT_TICKS, colors::ELECTRIC);
        fx.burst(rng, player.pos, 10, 8.0, 1.0, colors::ELECTRIC, 3.0);
    }

    let combo = session.register_eat(now, scoring, fx);
    let points = points_for_eat(prey.radius, combo, session.frenzy_active, gold, scoring);
    session.award(points, fx);

    let mut growth = (prey.radius * scoring.growth_factor).max(scoring.min_growth);
    if gold {
        growth *= scoring.gold_growth_mult;
    }
    player.radius += growth;

    let gain = if gold {
        scoring.frenzy_gain_gold
    } else {
        scoring.frenzy_gain
    };
    session.add_frenzy(gain, scoring, fx);

    if !electric {
        let (text, color) = if gold {
            (format!("+{points} GOLD"), colors::GOLD)
        } else if combo > COMBO_TEXT_THRESHOLD {
            (format!("+{points}"), colors::COMBO_TEXT)
        } else {
            (format!("+{points}"), colors::WHITE)
        };
        fx.text(prey.pos, text, SCORE_TEXT_TICKS, color);
    }
    let crumbs = &tuning.fx;
    fx.burst(
        rng,
        prey.pos,
        crumbs.eat_particles,
        crumbs.eat_particle_spread,
        1.0,
        prey.color,
        crumbs.eat_particle_size,
    );

    Contact::REMOVE
}

/// A bigger fish reached the player
fn bitten(player: &mut Entity, predator: &Entity, tuning: &Tuning, fx: &mut Effects) -> Contact {
    // Stun grants a grace window
    if player.is_stunned() {
        return Contact::KEEP;
    }
    let hz = &tuning.hazards;
    if player.has_shield {
        player.has_shield = false;
        player.vel = knockback(predator.pos, player.pos, hz.shield_break_knockback);
        player.stun_ticks = hz.shield_break_stun_ticks;
        fx.sound(Sound::Explode);
        fx.text(player.pos, "SHIELD BROKEN!", STATUS_TEXT_TICKS, colors::SHIELD);
        return Contact::KEEP;
    }
    fx.sound(Sound::Die);
    Contact::FATAL
}
