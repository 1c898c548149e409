//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, score protocol).
//!
//! # Board Dimensions
//!
//! The pentomino playfield is wider and taller than a classic Tetris well:
//!
//! - **Width**: 16 columns (indexed 0-15)
//! - **Height**: 22 rows (indexed 0-21)
//! - **Spawn position**: (`BOARD_WIDTH / 2 - 1`, 0) = (7, 0)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the host loop (~60 FPS) |
//! | `BASE_DROP_MS` | 500 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 20 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 200 | Fastest gravity |
//!
//! # Scoring
//!
//! - A clear of `n` rows at level `L` scores `n * LINE_POINTS * L`.
//! - Level is `score / POINTS_PER_LEVEL + 1`.
//!
//! # Examples
//!
//! ```
//! use pentris_types::{Block, PieceKind, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let kind = PieceKind::X;
//! assert_eq!(kind.type_id(), 10);
//! assert_eq!(PieceKind::from_type_id(10), Some(PieceKind::X));
//!
//! let block = Block::new(kind, '#');
//! assert_eq!(block.glyph, '#');
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (16, 22));
//! ```

/// Board width in columns
pub const BOARD_WIDTH: u8 = 16;

/// Board height in rows
pub const BOARD_HEIGHT: u8 = 22;

/// Host loop frame interval
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 500;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 20;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_MIN_MS: u32 = 200;

/// Points per cleared row, multiplied by the level
pub const LINE_POINTS: u32 = 10;

/// Score needed per level step
pub const POINTS_PER_LEVEL: u32 = 50;

/// Default score at which the coupon reward unlocks
pub const DEFAULT_REWARD_THRESHOLD: u32 = 500;

/// Default coupon code handed out by the reward emitter
pub const DEFAULT_COUPON_CODE: &str = "KUPMAX30OFF";

/// Maximum number of characters of a leaderboard name
pub const MAX_NAME_CHARS: usize = 10;

/// Largest bounding box of any catalog shape
pub const MAX_SHAPE_SIZE: usize = 5;

/// The 12 catalog piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    F,
    I,
    L,
    P,
    N,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

impl PieceKind {
    /// Every shape in catalog order
    pub const ALL: [PieceKind; 12] = [
        PieceKind::F,
        PieceKind::I,
        PieceKind::L,
        PieceKind::P,
        PieceKind::N,
        PieceKind::T,
        PieceKind::U,
        PieceKind::V,
        PieceKind::W,
        PieceKind::X,
        PieceKind::Y,
        PieceKind::Z,
    ];

    /// Cell type id written into the board (1..=12, 0 is empty)
    pub fn type_id(&self) -> u8 {
        match self {
            PieceKind::F => 1,
            PieceKind::I => 2,
            PieceKind::L => 3,
            PieceKind::P => 4,
            PieceKind::N => 5,
            PieceKind::T => 6,
            PieceKind::U => 7,
            PieceKind::V => 8,
            PieceKind::W => 9,
            PieceKind::X => 10,
            PieceKind::Y => 11,
            PieceKind::Z => 12,
        }
    }

    pub fn from_type_id(id: u8) -> Option<Self> {
        match id {
            1..=12 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let c = chars.next()?.to_ascii_uppercase();
        if chars.next().is_some() {
            return None;
        }
        Self::ALL.iter().copied().find(|k| k.letter() == c)
    }

    /// Catalog identifier
    pub fn letter(&self) -> char {
        match self {
            PieceKind::F => 'F',
            PieceKind::I => 'I',
            PieceKind::L => 'L',
            PieceKind::P => 'P',
            PieceKind::N => 'N',
            PieceKind::T => 'T',
            PieceKind::U => 'U',
            PieceKind::V => 'V',
            PieceKind::W => 'W',
            PieceKind::X => 'X',
            PieceKind::Y => 'Y',
            PieceKind::Z => 'Z',
        }
    }

    /// Display color as (r, g, b)
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::F => (255, 107, 107),
            PieceKind::I => (78, 205, 196),
            PieceKind::L => (69, 183, 209),
            PieceKind::P => (150, 206, 180),
            PieceKind::N => (255, 234, 167),
            PieceKind::T => (221, 160, 221),
            PieceKind::U => (152, 216, 200),
            PieceKind::V => (247, 220, 111),
            PieceKind::W => (187, 143, 206),
            PieceKind::X => (133, 193, 226),
            PieceKind::Y => (248, 181, 139),
            PieceKind::Z => (130, 224, 170),
        }
    }
}

/// A locked or falling block: the shape that produced it plus its cosmetic glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub kind: PieceKind,
    pub glyph: char,
}

impl Block {
    pub fn new(kind: PieceKind, glyph: char) -> Self {
        Self { kind, glyph }
    }
}

/// Cell on the board (None = empty, Some = filled block)
pub type Cell = Option<Block>;

/// Type id of a cell (0 = empty)
pub fn cell_type(cell: Cell) -> u8 {
    cell.map_or(0, |b| b.kind.type_id())
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    TogglePause,
    /// Starts the first session or restarts after game over.
    Restart,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" | "togglepause" => Some(GameAction::TogglePause),
            "restart" | "start" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
        }
    }
}

/// On-screen touch controls: a directional pad plus two action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchButton {
    Left,
    Right,
    Down,
    Rotate,
    HardDrop,
}

impl TouchButton {
    pub const ALL: [TouchButton; 5] = [
        TouchButton::Left,
        TouchButton::Down,
        TouchButton::Right,
        TouchButton::Rotate,
        TouchButton::HardDrop,
    ];

    pub fn action(&self) -> GameAction {
        match self {
            TouchButton::Left => GameAction::MoveLeft,
            TouchButton::Right => GameAction::MoveRight,
            TouchButton::Down => GameAction::SoftDrop,
            TouchButton::Rotate => GameAction::Rotate,
            TouchButton::HardDrop => GameAction::HardDrop,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TouchButton::Left => "◀",
            TouchButton::Right => "▶",
            TouchButton::Down => "▼",
            TouchButton::Rotate => "↻",
            TouchButton::HardDrop => "⤓",
        }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "notStarted",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ids_cover_one_to_twelve() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.type_id() as usize, i + 1);
            assert_eq!(PieceKind::from_type_id(kind.type_id()), Some(*kind));
        }
        assert_eq!(PieceKind::from_type_id(0), None);
        assert_eq!(PieceKind::from_type_id(13), None);
    }

    #[test]
    fn piece_kind_parses_letters() {
        assert_eq!(PieceKind::from_str("f"), Some(PieceKind::F));
        assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
        assert_eq!(PieceKind::from_str("O"), None);
        assert_eq!(PieceKind::from_str("FF"), None);
        assert_eq!(PieceKind::from_str(""), None);
    }

    #[test]
    fn cell_type_of_empty_is_zero() {
        assert_eq!(cell_type(None), 0);
        assert_eq!(cell_type(Some(Block::new(PieceKind::W, '*'))), 9);
    }

    #[test]
    fn touch_buttons_map_to_actions() {
        assert_eq!(TouchButton::Left.action(), GameAction::MoveLeft);
        assert_eq!(TouchButton::Right.action(), GameAction::MoveRight);
        assert_eq!(TouchButton::Down.action(), GameAction::SoftDrop);
        assert_eq!(TouchButton::Rotate.action(), GameAction::Rotate);
        assert_eq!(TouchButton::HardDrop.action(), GameAction::HardDrop);
    }

    #[test]
    fn action_string_roundtrip() {
        for a in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::Rotate,
            GameAction::TogglePause,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(a.as_str()), Some(a));
        }
    }
}
