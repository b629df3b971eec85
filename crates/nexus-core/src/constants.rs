//! Simulation constants and tuning parameters.
//!
//! Values that a session may want to override also live in
//! [`GameConfig`](crate::config::GameConfig); the constants here are its defaults.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Arena ---

/// Player movement is confined to |x| < PLAYER_BOUND_X.
pub const PLAYER_BOUND_X: f32 = 7.0;

/// Player movement is confined to |y| < PLAYER_BOUND_Y.
pub const PLAYER_BOUND_Y: f32 = 4.5;

/// Where the player stands when a session starts (off screen, left).
pub const PLAYER_START_X: f32 = -10.0;

/// Where the opening walk brings the player.
pub const PLAYER_INTRO_STOP_X: f32 = -5.5;

/// Fleeing enemies are released once |x| reaches this.
pub const FLEE_BOUND_X: f32 = 10.0;

/// Vertical release bound, for enemies fleeing straight up or down.
pub const FLEE_BOUND_Y: f32 = 10.0;

/// Half-extent of the square hit box shared by nexus, enemies and solid structures.
pub const HIT_BOX_HALF_EXTENT: f32 = 0.5;

/// Spawn sampling window: |x| in [SPAWN_X_MIN, SPAWN_X_MAX).
pub const SPAWN_X_MIN: f32 = 7.0;
pub const SPAWN_X_MAX: f32 = 10.0;

/// Spawn sampling window: |y| in [SPAWN_Y_MIN, SPAWN_Y_MAX).
pub const SPAWN_Y_MIN: f32 = 5.5;
pub const SPAWN_Y_MAX: f32 = 7.0;

/// Maximum spawn samples before the last one is accepted regardless of line of sight.
pub const SPAWN_PROBE_ATTEMPTS: u32 = 64;

/// Length of the line-of-sight probe cast from a spawn point toward the nexus.
pub const SPAWN_PROBE_LENGTH: f32 = 20.0;

/// Step between line-of-sight samples.
pub const LOS_SAMPLE_INTERVAL: f32 = 0.05;

/// Scripted tutorial enemy: spawn and stop points on the x axis.
pub const TUTORIAL_ENEMY_START_X: f32 = 9.0;
pub const TUTORIAL_ENEMY_STOP_X: f32 = 5.5;

/// Dog wander area half-extents.
pub const DOG_WANDER_X: f32 = 7.0;
pub const DOG_WANDER_Y: f32 = 5.0;

// --- Engagement ranges ---

/// Enemies stop and strike once this close to the nexus.
pub const ENEMY_CONTACT_RANGE: f32 = 1.5;

/// Enemy markers appear when the player is this close.
pub const PLAYER_ENEMY_RANGE: f32 = 1.25;

/// The nexus marker appears when the player is this close.
pub const PLAYER_NEXUS_RANGE: f32 = 2.25;

pub const TOWER_RANGE: f32 = 3.0;
pub const TOWER_CYCLE_SECS: f32 = 3.0;
pub const ARROW_SPEED: f32 = 8.0;
pub const ARROW_DAMAGE: f32 = 20.0;

pub const DOG_RANGE: f32 = 1.0;
pub const DOG_CYCLE_SECS: f32 = 2.0;
pub const DOG_SPEED: f32 = 2.0;
pub const DOG_LUNGE_SPEED: f32 = 7.0;
pub const DOG_DAMAGE: f32 = 30.0;

pub const SHED_RANGE: f32 = 3.0;
pub const SHED_SPEED_BOOST: f32 = 2.0;

/// Fleeing enemies run at this multiple of their speed.
pub const FLEE_SPEED_FACTOR: f32 = 3.0;

/// Immobility after a non-lethal hit.
pub const HIT_STUN_SECS: f32 = 1.0;

/// Extra lockout on top of the player's 2x attack speed before control returns.
pub const PLAYER_RELEASE_PADDING_SECS: f32 = 0.1;

// --- Timings ---

pub const LEVEL_COMPLETE_DELAY_SECS: f32 = 1.5;

/// Negative head start of the spawn accumulator at the beginning of a wave.
pub const WAVE_START_GRACE_SECS: f32 = 2.0;

pub const WAVE_BANNER_SECS: f32 = 3.0;
pub const DIALOGUE_PAGE_LOCK_SECS: f32 = 1.0;
pub const END_SCREEN_ARM_SECS: f32 = 1.0;
pub const INTRO_DELAY_SECS: f32 = 6.0;
pub const INTRO_SLIDE_SECS: f32 = 0.5;
pub const INTRO_EXIT_SECS: f32 = 0.25;
pub const INTRO_WALK_PADDING_SECS: f32 = 0.5;
pub const ENEMY_ARRIVAL_PADDING_SECS: f32 = 1.0;
pub const MARKER_RESOLVE_DELAY_SECS: f32 = 0.5;

// --- Levels ---

pub const TUTORIAL_LEVEL: u32 = 1;
pub const FINAL_LEVEL: u32 = 7;

/// Loot is offered after levels 1..=LOOT_LEVELS.
pub const LOOT_LEVELS: u32 = 6;

/// Wave table: (level, capacity, duration seconds).
pub const WAVE_TABLE: [(u32, u32, f32); 6] = [
    (2, 3, 10.0),
    (3, 5, 15.0),
    (4, 6, 18.0),
    (5, 7, 20.0),
    (6, 8, 21.0),
    (7, 10, 25.0),
];

/// Dialogue page ranges (inclusive) for the two tutorial dialogues.
pub const INITIAL_DIALOGUE_PAGES: (u32, u32) = (1, 3);
pub const SECOND_DIALOGUE_PAGES: (u32, u32) = (4, 5);

// --- Unit stats ---

pub const PLAYER_SPEED: f32 = 3.0;
pub const PLAYER_DAMAGE: f32 = 50.0;
/// The player's `health` stat doubles as the nexus heal amount.
pub const PLAYER_HEAL: f32 = 25.0;
pub const PLAYER_ATTACK_SPEED: f32 = 0.25;

pub const ENEMY_SPEED: f32 = 1.0;
pub const ENEMY_DAMAGE: f32 = 5.0;
pub const ENEMY_ATTACK_SPEED: f32 = 1.0;
pub const ENEMY_HEALTH: f32 = 100.0;

pub const NEXUS_HEALTH: f32 = 100.0;

// --- Loot ---

pub const LOOT_MAX_HEALTH_FRACTION: f32 = 0.5;
pub const LOOT_PLAYER_DAMAGE: f32 = 20.0;
pub const LOOT_ENEMY_SPEED: f32 = 1.5;
pub const LOOT_ENEMY_DAMAGE: f32 = 1.5;
