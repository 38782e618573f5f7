/// All game entity types — pure data, no logic.

/// An immutable 2D integer point. Doubles as a position, a velocity and a
/// hitbox size (width/height).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// The playable rectangle. No entity box may sit outside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

/// Which sides of an entity's box are currently blocked/touching something.
/// Overwritten wholesale at the start of every frame; detection only ever
/// sets flags to true within a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionState {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Monster,
    Coin,
    Wall,
    Door,
    Flame,
    Rope,
}

/// Stable per-session handle for an entity, assigned at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// A movable, collidable game object. `position` is the top-left corner of
/// the axis-aligned bounding box; `hitbox` is its width/height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Point,
    pub velocity: Point,
    pub hitbox: Point,
    pub collision: CollisionState,
}

/// The set of directional keys held this frame. Quit/restart requests are
/// handled by the outer loop, not the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// The entire session state. Cloneable so pure update functions can return
/// a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub entities: Vec<Entity>,
    /// Handle to the player entity, independent of storage order.
    pub player_id: EntityId,
    pub bounds: Bounds,
    pub health: u32,
    pub coins_collected: u32,
    /// Coins placed in the level; collecting them all wins the session.
    pub coins_total: u32,
    pub status: GameStatus,
    pub frame: u64,
}
