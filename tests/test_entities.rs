use platform_game::entities::*;

#[test]
fn entity_enums_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(EntityKind::Player, EntityKind::Player);
    assert_ne!(EntityKind::Player, EntityKind::Monster);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Won, GameStatus::Lost);

    // Clone must produce an equal value
    let kind = EntityKind::Coin;
    assert_eq!(kind.clone(), EntityKind::Coin);
}

#[test]
fn collision_state_defaults_to_all_clear() {
    let c = CollisionState::default();
    assert!(!c.left && !c.right && !c.top && !c.bottom);
}

#[test]
fn input_defaults_to_no_keys_held() {
    let i = Input::default();
    assert!(!i.left && !i.right && !i.up && !i.down);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        entities: vec![Entity {
            id: EntityId(0),
            kind: EntityKind::Player,
            position: Point::new(50, 390),
            velocity: Point::new(0, 0),
            hitbox: Point::new(30, 50),
            collision: CollisionState::default(),
        }],
        player_id: EntityId(0),
        bounds: Bounds {
            left: 0,
            right: 640,
            top: 0,
            bottom: 480,
        },
        health: 2,
        coins_collected: 0,
        coins_total: 5,
        status: GameStatus::Playing,
        frame: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.entities[0].position = Point::new(99, 99);
    cloned.coins_collected = 5;
    cloned.status = GameStatus::Won;

    assert_eq!(original.entities[0].position, Point::new(50, 390));
    assert_eq!(original.coins_collected, 0);
    assert_eq!(original.status, GameStatus::Playing);
}
