//! Level table
//!
//! Twenty levels in five zones of four. The table is fixed at compile time and
//! indexed by level number; nothing else ever indexes past `LEVELS.len() - 1`.

use serde::Serialize;

/// One level's configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelConfig {
    pub name: &'static str,
    /// Player radius that clears the level
    pub goal_radius: f32,
    /// Background visual key
    pub background: &'static str,
    /// Gradient colors (0xRRGGBB)
    pub bg_top: u32,
    pub bg_bottom: u32,
    pub enemy_speed_mult: f32,
    /// Per-tick spawn probability
    pub spawn_rate: f32,
    /// Share of spawns that are hazards
    pub hazard_prob: f32,
}

#[allow(clippy::too_many_arguments)]
const fn level(
    name: &'static str,
    goal_radius: f32,
    bg_top: u32,
    bg_bottom: u32,
    enemy_speed_mult: f32,
    spawn_rate: f32,
    background: &'static str,
    hazard_prob: f32,
) -> LevelConfig {
    LevelConfig {
        name,
        goal_radius,
        background,
        bg_top,
        bg_bottom,
        enemy_speed_mult,
        spawn_rate,
        hazard_prob,
    }
}

pub const LEVELS: [LevelConfig; 20] = [
    // Zone 1: Reef
    level("1-1: Shallow Reef", 40.0, 0x4ECDC4, 0x556270, 1.0, 0.03, "background1", 0.0),
    level("1-2: Feeding Time", 55.0, 0x4ECDC4, 0x556270, 1.1, 0.04, "background1", 0.01),
    level("1-3: Gold Rush", 70.0, 0x4ECDC4, 0x556270, 1.2, 0.05, "background1", 0.02),
    level("1-4: Reef Shark", 90.0, 0x3B9A92, 0x44505B, 1.3, 0.05, "background1", 0.03),
    // Zone 2: Twilight
    level("2-1: The Drop-off", 110.0, 0x006994, 0x003366, 1.3, 0.04, "background2", 0.05),
    level("2-2: Sting City", 130.0, 0x006994, 0x003366, 1.4, 0.05, "background2", 0.08),
    level("2-3: Shock Wave", 150.0, 0x006994, 0x003366, 1.5, 0.05, "background2", 0.10),
    level("2-4: Deep Dive", 175.0, 0x005073, 0x002244, 1.6, 0.06, "background2", 0.12),
    // Zone 3: Abyss
    level("3-1: Into Darkness", 200.0, 0x0F2027, 0x203A43, 1.6, 0.05, "background3", 0.15),
    level("3-2: Minefield", 230.0, 0x0F2027, 0x203A43, 1.7, 0.06, "background3", 0.20),
    level("3-3: Bioluminescence", 260.0, 0x0F2027, 0x203A43, 1.8, 0.07, "background3", 0.15),
    level("3-4: The Void", 300.0, 0x051014, 0x102025, 1.9, 0.07, "background3", 0.20),
    // Zone 4: Shipwreck
    level("4-1: Sunken Hope", 340.0, 0x1A2A1A, 0x0D1A0D, 1.8, 0.06, "background4", 0.10),
    level("4-2: Treasure Trove", 380.0, 0x1A2A1A, 0x0D1A0D, 1.9, 0.08, "background4", 0.15),
    level("4-3: Skeleton Crew", 420.0, 0x1A2A1A, 0x0D1A0D, 2.0, 0.08, "background4", 0.18),
    level("4-4: Ghost Ship", 460.0, 0x0F1A0F, 0x050A05, 2.1, 0.09, "background4", 0.20),
    // Zone 5: Trench
    level("5-1: Pressure Point", 500.0, 0x000000, 0x0A0A2A, 2.2, 0.07, "background5", 0.20),
    level("5-2: Leviathan", 550.0, 0x000000, 0x0A0A2A, 2.3, 0.08, "background5", 0.25),
    level("5-3: Midnight Zone", 600.0, 0x000000, 0x0A0A2A, 2.4, 0.09, "background5", 0.30),
    level("5-4: KING OF SEAS", 700.0, 0x000000, 0x050515, 2.5, 0.10, "background5", 0.35),
];

/// Levels per zone
pub const LEVELS_PER_ZONE: usize = 4;

/// Index of the final level
pub const LAST_LEVEL: usize = LEVELS.len() - 1;

impl LevelConfig {
    /// Config for `index`, clamped to the table
    pub fn get(index: usize) -> &'static LevelConfig {
        &LEVELS[index.min(LAST_LEVEL)]
    }
}

/// Zero-based zone for a level index
pub fn zone_of(index: usize) -> usize {
    index / LEVELS_PER_ZONE
}

/// Radius the player starts `index` with: the previous goal, or the fresh-start radius
pub fn start_radius(index: usize, fresh_start: f32) -> f32 {
    if index == 0 {
        fresh_start
    } else {
        LevelConfig::get(index - 1).goal_radius
    }
}

/// Normalized progress from the level's start radius to its goal
pub fn growth_progress(index: usize, radius: f32, fresh_start: f32) -> f32 {
    let from = start_radius(index, fresh_start);
    let to = LevelConfig::get(index).goal_radius;
    if to <= from {
        return 1.0;
    }
    ((radius - from) / (to - from)).clamp(0.0, 1.0)
}
