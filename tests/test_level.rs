use platform_game::entities::{Bounds, EntityKind, Point};
use platform_game::level::*;

// ── Built-in level ────────────────────────────────────────────────────────────

#[test]
fn default_level_parses() {
    let level = parse_level(DEFAULT_LEVEL).unwrap();

    assert_eq!(
        level.bounds,
        Bounds {
            left: 0,
            right: 640,
            top: 0,
            bottom: 480
        }
    );

    let count = |kind| {
        level
            .spawns
            .iter()
            .filter(|s| s.kind == kind)
            .count()
    };
    assert_eq!(count(EntityKind::Player), 1);
    assert_eq!(count(EntityKind::Coin), 5);
    assert_eq!(count(EntityKind::Monster), 2);
    assert!(count(EntityKind::Wall) >= 3);
    assert_eq!(count(EntityKind::Door), 1);
    assert_eq!(count(EntityKind::Flame), 1);
    assert_eq!(count(EntityKind::Rope), 1);
}

// ── Record parsing ────────────────────────────────────────────────────────────

#[test]
fn records_with_explicit_size() {
    let level = parse_level("player 50 390\nwall 0 440 640 40").unwrap();
    let w = level
        .spawns
        .iter()
        .find(|s| s.kind == EntityKind::Wall)
        .unwrap();
    assert_eq!(w.position, Point::new(0, 440));
    assert_eq!(w.size, Some(Point::new(640, 40)));
}

#[test]
fn records_without_size_use_kind_defaults() {
    let level = parse_level("player 50 390\ncoin 100 100").unwrap();
    let c = level
        .spawns
        .iter()
        .find(|s| s.kind == EntityKind::Coin)
        .unwrap();
    assert_eq!(c.size, None);
    assert_eq!(default_size(EntityKind::Coin), Point::new(20, 20));
}

#[test]
fn kind_names_are_case_insensitive() {
    let level = parse_level("PLAYER 50 390\nCoin 100 100").unwrap();
    assert_eq!(level.spawns[0].kind, EntityKind::Player);
    assert_eq!(level.spawns[1].kind, EntityKind::Coin);
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let text = "
# a comment
player 50 390   # trailing comment

coin 100 100
";
    let level = parse_level(text).unwrap();
    assert_eq!(level.spawns.len(), 2);
}

#[test]
fn bounds_directive_sets_the_world_rectangle() {
    let level = parse_level("bounds 320 240\nplayer 50 100").unwrap();
    assert_eq!(
        level.bounds,
        Bounds {
            left: 0,
            right: 320,
            top: 0,
            bottom: 240
        }
    );
}

#[test]
fn missing_bounds_directive_uses_the_default() {
    let level = parse_level("player 50 390").unwrap();
    assert_eq!(level.bounds, DEFAULT_BOUNDS);
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn unknown_kind_is_an_error() {
    let err = parse_level("player 50 390\ndragon 10 10").unwrap_err();
    assert_eq!(
        err,
        LevelError::UnknownKind {
            line: 2,
            word: "dragon".to_string()
        }
    );
}

#[test]
fn wrong_field_count_is_an_error() {
    let err = parse_level("player 50").unwrap_err();
    assert_eq!(err, LevelError::Malformed { line: 1 });

    let err = parse_level("player 50 390 30").unwrap_err();
    assert_eq!(err, LevelError::Malformed { line: 1 });
}

#[test]
fn non_numeric_coordinates_are_an_error() {
    let err = parse_level("player fifty 390").unwrap_err();
    assert_eq!(err, LevelError::Malformed { line: 1 });
}

#[test]
fn non_positive_sizes_are_an_error() {
    let err = parse_level("wall 0 0 0 40\nplayer 50 390").unwrap_err();
    assert_eq!(err, LevelError::BadSize { line: 1 });

    let err = parse_level("bounds 640 -480\nplayer 50 390").unwrap_err();
    assert_eq!(err, LevelError::BadSize { line: 1 });
}

#[test]
fn a_level_needs_exactly_one_player() {
    assert_eq!(parse_level("coin 100 100").unwrap_err(), LevelError::NoPlayer);
    assert_eq!(
        parse_level("player 50 390\nplayer 60 390").unwrap_err(),
        LevelError::MultiplePlayers
    );
}

#[test]
fn errors_name_the_offending_line() {
    let err = parse_level("player 50 390\n\nwall zero 0 40 40").unwrap_err();
    assert_eq!(format!("{err}"), "line 3: expected `<kind> <x> <y> [<width> <height>]`");
}
