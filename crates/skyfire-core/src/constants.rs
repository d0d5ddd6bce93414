//! Simulation constants and tuning parameters.

/// Frame rate the runner paces itself at (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per frame at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Playfield ---

/// Default playfield width in pixels.
pub const SCREEN_WIDTH: f32 = 400.0;

/// Default playfield height in pixels.
pub const SCREEN_HEIGHT: f32 = 400.0;

/// Player craft start, X.
pub const PLAYER_START_X: f32 = 100.0;

/// Player craft start, Y.
pub const PLAYER_START_Y: f32 = 100.0;

// --- Projectiles ---

/// Width of the projectile box culled against the playfield.
pub const PROJECTILE_WIDTH: f32 = 1.0;

/// Height of the projectile box culled against the playfield.
pub const PROJECTILE_HEIGHT: f32 = 10.0;

/// Reclaim disabled projectiles at least this often (ticks).
pub const RECLAIM_INTERVAL_TICKS: u64 = 30;

/// Reclaim early once this many disabled projectiles have piled up.
pub const RECLAIM_THRESHOLD: usize = 64;

// --- Fire patterns ---

/// Horizontal muzzle offset for the alternate and dual patterns.
pub const NARROW_MUZZLE_OFFSET: f32 = 10.0;

/// Horizontal muzzle offset for the quad pattern.
pub const WIDE_MUZZLE_OFFSET: f32 = 15.0;

/// Slack allowed when comparing elapsed time against a weapon cooldown.
/// Simulated time is a running sum of frame steps, so a cooldown of a whole
/// number of frames can come out a few ulps short.
pub const COOLDOWN_EPSILON: f64 = 1e-9;

/// Damage assumed when a profile does not name one.
pub const DEFAULT_PROJECTILE_DAMAGE: f32 = 1.0;

/// Straight up the screen (screen Y grows downward).
pub const DEFAULT_PROJECTILE_DIRECTION: [f32; 2] = [0.0, -1.0];

// --- Configuration ---

/// Minimum simulated time between two checks of the configuration source.
pub const CONFIG_POLL_INTERVAL: f64 = 0.5;

/// Profile name given to the weapon synthesized from a flat document.
pub const LEGACY_PROFILE_NAME: &str = "legacy";
