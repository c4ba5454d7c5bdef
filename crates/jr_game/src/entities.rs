//! Level entities. Every variant is a rectangle plus whatever state that
//! variant needs; only enemies move on their own.

use jr_core::Rect;
use jr_render::{DrawLayer, SpriteKey};

use crate::level::{BackgroundPlacement, LevelLayout, Placement, TILE_SIZE};

pub const ITEM_SIZE: i32 = 24;
pub const DOOR_HEIGHT: i32 = 64;
const ENEMY_SPEED: i32 = 5;
const PATROL_BACK: i32 = 40;
const PATROL_AHEAD: i32 = 110;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub image: u8,
    pub rect: Rect,
}

impl Background {
    /// The background picture spans the whole level from its anchor tile.
    pub fn new(placement: &BackgroundPlacement, level_width: i32, level_height: i32) -> Self {
        Self {
            image: placement.image,
            rect: Rect::new(placement.at.x, placement.at.y, level_width, level_height),
        }
    }
}

/// Solid tile the player cannot pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub rect: Rect,
}

/// Kill zone placed under pits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallBlock {
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpPad {
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coin {
    pub rect: Rect,
    pub order: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heart {
    pub rect: Rect,
    pub order: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitDoor {
    pub rect: Rect,
    pub order: u32,
}

impl Platform {
    pub fn at(p: &Placement) -> Self {
        Self {
            rect: Rect::new(p.x, p.y, TILE_SIZE, TILE_SIZE),
        }
    }
}

impl FallBlock {
    pub fn at(p: &Placement) -> Self {
        Self {
            rect: Rect::new(p.x, p.y, TILE_SIZE, TILE_SIZE),
        }
    }
}

impl JumpPad {
    pub fn at(p: &Placement) -> Self {
        Self {
            rect: Rect::new(p.x, p.y, TILE_SIZE, TILE_SIZE),
        }
    }
}

impl Coin {
    pub fn at(p: &Placement) -> Self {
        Self {
            rect: Rect::new(p.x, p.y, ITEM_SIZE, ITEM_SIZE),
            order: p.order,
        }
    }
}

impl Heart {
    pub fn at(p: &Placement) -> Self {
        Self {
            rect: Rect::new(p.x, p.y, ITEM_SIZE, ITEM_SIZE),
            order: p.order,
        }
    }
}

impl ExitDoor {
    pub fn at(p: &Placement) -> Self {
        Self {
            rect: Rect::new(p.x, p.y, TILE_SIZE, DOOR_HEIGHT),
            order: p.order,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Right,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub rect: Rect,
    pub vx: i32,
    /// Patrol anchor: the x the enemy was placed at.
    pub home_x: i32,
    pub facing: Facing,
}

impl Enemy {
    pub fn at(p: &Placement, size: (i32, i32)) -> Self {
        Self {
            rect: Rect::new(p.x, p.y, size.0, size.1),
            vx: ENEMY_SPEED,
            home_x: p.x,
            facing: Facing::Right,
        }
    }

    /// Walk back and forth between `home_x - 40` and `home_x + 110`.
    pub fn patrol(&mut self) {
        self.rect.set_center_x(self.rect.center_x() + self.vx);
        if self.rect.left() < self.home_x - PATROL_BACK {
            self.vx = -self.vx;
            self.facing = Facing::Right;
        }
        if self.rect.right() > self.home_x + PATROL_AHEAD {
            self.vx = -self.vx;
            self.facing = Facing::Left;
        }
    }

    pub fn sprite_state(&self) -> &'static str {
        match self.facing {
            Facing::Right => "walkr",
            Facing::Left => "walkl",
        }
    }
}

/// Every mutable and static entity of one level instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntitySet {
    pub background: Option<Background>,
    pub platforms: Vec<Platform>,
    pub fall_blocks: Vec<FallBlock>,
    pub coins: Vec<Coin>,
    pub hearts: Vec<Heart>,
    pub jump_pads: Vec<JumpPad>,
    pub exit_doors: Vec<ExitDoor>,
    pub enemies: Vec<Enemy>,
}

impl EntitySet {
    pub fn from_layout(layout: &LevelLayout, enemy_size: (i32, i32)) -> Self {
        Self {
            background: layout
                .background
                .as_ref()
                .map(|b| Background::new(b, layout.width, layout.height)),
            platforms: layout.platforms.iter().map(Platform::at).collect(),
            fall_blocks: layout.fall_blocks.iter().map(FallBlock::at).collect(),
            coins: layout.coins.iter().map(Coin::at).collect(),
            hearts: layout.hearts.iter().map(Heart::at).collect(),
            jump_pads: layout.jump_pads.iter().map(JumpPad::at).collect(),
            exit_doors: layout.exit_doors.iter().map(ExitDoor::at).collect(),
            enemies: layout
                .enemies
                .iter()
                .map(|p| Enemy::at(p, enemy_size))
                .collect(),
        }
    }

    /// Everything that gets drawn, background first, then items in scan
    /// order, then enemies. Platforms, pads and fall blocks are part of the
    /// background art and are not drawn.
    pub fn drawables(&self) -> Vec<Drawable<'_>> {
        let mut items: Vec<Drawable<'_>> = self
            .coins
            .iter()
            .map(Drawable::Coin)
            .chain(self.hearts.iter().map(Drawable::Heart))
            .chain(self.exit_doors.iter().map(Drawable::ExitDoor))
            .collect();
        items.sort_by_key(|d| d.order());

        self.background
            .iter()
            .map(Drawable::Background)
            .chain(items)
            .chain(self.enemies.iter().map(Drawable::Enemy))
            .collect()
    }
}

/// Borrowed view of any drawable entity, used to pick its sprite and layer.
#[derive(Debug, Clone, Copy)]
pub enum Drawable<'a> {
    Background(&'a Background),
    Coin(&'a Coin),
    Heart(&'a Heart),
    ExitDoor(&'a ExitDoor),
    Enemy(&'a Enemy),
}

impl Drawable<'_> {
    pub fn rect(&self) -> &Rect {
        match self {
            Drawable::Background(b) => &b.rect,
            Drawable::Coin(c) => &c.rect,
            Drawable::Heart(h) => &h.rect,
            Drawable::ExitDoor(d) => &d.rect,
            Drawable::Enemy(e) => &e.rect,
        }
    }

    pub fn sprite(&self) -> SpriteKey {
        match self {
            Drawable::Background(b) => SpriteKey::Background(b.image),
            Drawable::Coin(_) => SpriteKey::Coin,
            Drawable::Heart(_) => SpriteKey::Heart,
            Drawable::ExitDoor(_) => SpriteKey::ExitDoor,
            Drawable::Enemy(e) => SpriteKey::Enemy {
                state: e.sprite_state(),
            },
        }
    }

    pub fn layer(&self) -> DrawLayer {
        match self {
            Drawable::Background(_) => DrawLayer::Background,
            Drawable::Coin(_) | Drawable::Heart(_) | Drawable::ExitDoor(_) => DrawLayer::Items,
            Drawable::Enemy(_) => DrawLayer::Actors,
        }
    }

    /// Scan-order index for items; other variants sort by layer alone.
    pub fn order(&self) -> u32 {
        match self {
            Drawable::Coin(c) => c.order,
            Drawable::Heart(h) => h.order,
            Drawable::ExitDoor(d) => d.order,
            Drawable::Background(_) | Drawable::Enemy(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: i32, y: i32) -> Placement {
        Placement { x, y, order: 0 }
    }

    #[test]
    fn enemy_turns_at_patrol_bounds() {
        let mut enemy = Enemy::at(&placement(200, 100), (27, 34));
        let mut turned_left = false;
        for _ in 0..40 {
            enemy.patrol();
            assert!(enemy.rect.right() <= 200 + PATROL_AHEAD + ENEMY_SPEED);
            if enemy.facing == Facing::Left {
                turned_left = true;
                break;
            }
        }
        assert!(turned_left, "enemy should reverse at the far bound");
        assert!(enemy.vx < 0);

        let mut turned_right = false;
        for _ in 0..60 {
            enemy.patrol();
            assert!(enemy.rect.left() >= 200 - PATROL_BACK - ENEMY_SPEED);
            if enemy.facing == Facing::Right {
                turned_right = true;
                break;
            }
        }
        assert!(turned_right, "enemy should reverse at the near bound");
        assert!(enemy.vx > 0);
    }

    #[test]
    fn item_sizes_follow_variant() {
        let p = placement(36, 36);
        assert_eq!(Coin::at(&p).rect, Rect::new(36, 36, 24, 24));
        assert_eq!(ExitDoor::at(&p).rect.h, 64);
        assert_eq!(Platform::at(&p).rect.w, 32);
    }

    #[test]
    fn drawable_dispatch_picks_layer_and_sprite() {
        let enemy = Enemy::at(&placement(0, 0), (27, 34));
        let coin = Coin::at(&Placement { x: 0, y: 0, order: 7 });
        assert_eq!(Drawable::Enemy(&enemy).layer(), DrawLayer::Actors);
        assert_eq!(
            Drawable::Enemy(&enemy).sprite(),
            SpriteKey::Enemy { state: "walkr" }
        );
        assert_eq!(Drawable::Coin(&coin).layer(), DrawLayer::Items);
        assert_eq!(Drawable::Coin(&coin).order(), 7);
    }

    #[test]
    fn drawables_follow_scan_order_with_enemies_last() {
        let layout = crate::level::parse_level_grid("P1  \nE C \nH X ");
        let set = EntitySet::from_layout(&layout, (27, 34));
        let sprites: Vec<SpriteKey> = set.drawables().iter().map(|d| d.sprite()).collect();
        assert_eq!(
            sprites,
            vec![
                SpriteKey::Background(1),
                SpriteKey::Coin,
                SpriteKey::Heart,
                SpriteKey::ExitDoor,
                SpriteKey::Enemy { state: "walkr" },
            ]
        );
    }
}
