/// Level definitions — plain-text spawn records.
///
/// A level is a list of `<kind> <x> <y> [<width> <height>]` lines plus an
/// optional `bounds <width> <height>` directive. `#` starts a comment.
/// When a record omits its size, the kind's default hitbox applies (the
/// stand-in for the visual asset size). Parsing is fail-fast: a level that
/// names an unrecognized kind, or does not contain exactly one player,
/// never produces a session.

use std::fmt;

use crate::entities::{Bounds, EntityKind, Point};

/// World rectangle used when a level has no `bounds` directive.
pub const DEFAULT_BOUNDS: Bounds = Bounds {
    left: 0,
    right: 640,
    top: 0,
    bottom: 480,
};

/// The built-in level: five coins, two monsters, a floor, side columns and
/// three platforms. Loaded when no level file is given on the command line.
pub const DEFAULT_LEVEL: &str = "
bounds 640 480

# screen edges and floor
wall 0 0 20 480
wall 620 0 20 480
wall 20 440 600 40

# platforms
wall 100 360 150 20
wall 350 300 150 20
wall 180 200 120 20

player 50 390

monster 200 410
monster 360 240

coin 160 340
coin 400 280
coin 220 180
coin 90 380
coin 500 380

door 560 380
flame 300 410
rope 285 220
";

/// One spawn record: where an entity starts and, optionally, how big it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub kind: EntityKind,
    pub position: Point,
    /// Explicit hitbox override; `None` means the kind's default size.
    pub size: Option<Point>,
}

/// A parsed level: the world rectangle plus the spawn list, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub bounds: Bounds,
    pub spawns: Vec<Spawn>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelError {
    UnknownKind { line: usize, word: String },
    Malformed { line: usize },
    BadSize { line: usize },
    NoPlayer,
    MultiplePlayers,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::UnknownKind { line, word } => {
                write!(f, "line {line}: unrecognized entity kind `{word}`")
            }
            LevelError::Malformed { line } => {
                write!(f, "line {line}: expected `<kind> <x> <y> [<width> <height>]`")
            }
            LevelError::BadSize { line } => {
                write!(f, "line {line}: width and height must be positive")
            }
            LevelError::NoPlayer => write!(f, "level has no player spawn"),
            LevelError::MultiplePlayers => write!(f, "level has more than one player spawn"),
        }
    }
}

impl std::error::Error for LevelError {}

/// Hitbox for a kind whose spawn record carries no explicit size.
pub fn default_size(kind: EntityKind) -> Point {
    match kind {
        EntityKind::Player => Point::new(30, 50),
        EntityKind::Monster => Point::new(40, 30),
        EntityKind::Coin => Point::new(20, 20),
        EntityKind::Wall => Point::new(40, 40),
        EntityKind::Door => Point::new(40, 60),
        EntityKind::Flame => Point::new(20, 30),
        EntityKind::Rope => Point::new(10, 60),
    }
}

fn parse_kind(word: &str) -> Option<EntityKind> {
    match word.to_ascii_lowercase().as_str() {
        "player" => Some(EntityKind::Player),
        "monster" => Some(EntityKind::Monster),
        "coin" => Some(EntityKind::Coin),
        "wall" => Some(EntityKind::Wall),
        "door" => Some(EntityKind::Door),
        "flame" => Some(EntityKind::Flame),
        "rope" => Some(EntityKind::Rope),
        _ => None,
    }
}

fn parse_numbers(fields: &[&str], line: usize) -> Result<Vec<i32>, LevelError> {
    fields
        .iter()
        .map(|s| s.parse().map_err(|_| LevelError::Malformed { line }))
        .collect()
}

/// Parse a level from its text form.
pub fn parse_level(text: &str) -> Result<Level, LevelError> {
    let mut bounds = DEFAULT_BOUNDS;
    let mut spawns = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let record = raw.split('#').next().unwrap_or("").trim();
        if record.is_empty() {
            continue;
        }
        let fields: Vec<&str> = record.split_whitespace().collect();

        if fields[0].eq_ignore_ascii_case("bounds") {
            let nums = parse_numbers(&fields[1..], line)?;
            match nums[..] {
                [width, height] if width > 0 && height > 0 => {
                    bounds = Bounds {
                        left: 0,
                        right: width,
                        top: 0,
                        bottom: height,
                    };
                }
                [_, _] => return Err(LevelError::BadSize { line }),
                _ => return Err(LevelError::Malformed { line }),
            }
            continue;
        }

        let kind = parse_kind(fields[0]).ok_or_else(|| LevelError::UnknownKind {
            line,
            word: fields[0].to_string(),
        })?;
        let nums = parse_numbers(&fields[1..], line)?;
        let (position, size) = match nums[..] {
            [x, y] => (Point::new(x, y), None),
            [x, y, width, height] if width > 0 && height > 0 => {
                (Point::new(x, y), Some(Point::new(width, height)))
            }
            [_, _, _, _] => return Err(LevelError::BadSize { line }),
            _ => return Err(LevelError::Malformed { line }),
        };
        spawns.push(Spawn {
            kind,
            position,
            size,
        });
    }

    let players = spawns
        .iter()
        .filter(|s| s.kind == EntityKind::Player)
        .count();
    match players {
        0 => Err(LevelError::NoPlayer),
        1 => Ok(Level { bounds, spawns }),
        _ => Err(LevelError::MultiplePlayers),
    }
}
