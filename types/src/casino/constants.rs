/// Balance granted to a user the first time the ledger is opened
pub const STARTING_BALANCE: u64 = 1_000;

/// Balance restored by the rescue (admin reset) action
pub const RESCUE_BALANCE: u64 = 100;

/// Daily bonus credit
pub const DAILY_BONUS_AMOUNT: u64 = 100;

/// Cooldown between bonus claims in milliseconds (one hour)
pub const DAILY_BONUS_COOLDOWN_MS: u64 = 60 * 60 * 1000;

/// Maximum user identity length in the persisted snapshot
pub const MAX_USER_ID_LENGTH: usize = 64;

/// Snapshot encoding version
pub const LEDGER_SNAPSHOT_VERSION: u8 = 1;

/// Basis points per 1.0x multiplier
pub const BASIS_POINTS: u64 = 10_000;

/// Roulette pockets (single zero)
pub const ROULETTE_POCKETS: usize = 37;

/// Highest roulette number
pub const ROULETTE_MAX_NUMBER: u8 = 36;

/// Mines grid size (5x5)
pub const MINES_GRID_SIZE: u8 = 25;

/// Mine counts offered by the presentation layer
pub const MINES_OPTIONS: [u8; 5] = [1, 3, 5, 10, 20];

/// Default number of dungeon levels
pub const DUNGEON_LEVELS: u8 = 10;

/// Door counts offered per dungeon level
pub const DUNGEON_DIFFICULTIES: [u8; 3] = [2, 3, 4];

/// Crash multiplier growth per second
pub const CRASH_GROWTH_RATE: f64 = 0.06;

/// Crash house edge numerator: crash point = max(1.00, 0.99 / (1 - r))
pub const CRASH_EDGE_FACTOR: f64 = 0.99;

/// Betting window before each crash round, in milliseconds
pub const CRASH_COOLDOWN_MS: u64 = 5_000;

/// Pause after a crash before betting reopens, in milliseconds
pub const CRASH_PAUSE_MS: u64 = 3_000;

/// Mines house edge per reveal
pub const MINES_HOUSE_EDGE: f64 = 0.04;

/// Dungeon house edge per level
pub const DUNGEON_HOUSE_EDGE: f64 = 0.03;

/// Combo ceiling shared by the farming games
pub const FARMING_MAX_COMBO: f64 = 5.0;

/// Combo increase per successful tap or chop
pub const FARMING_COMBO_STEP: f64 = 0.2;
