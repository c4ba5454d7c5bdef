//! Player controller: input → pose state machine → velocity → collisions.
//!
//! Each frame runs in a fixed order:
//!
//!   1. Pose rules (jump, mid-air facing, landing, walking, pad bounce,
//!      ledge fall), then gravity while airborne
//!   2. Trigger checks: fall zones, coins, hearts, exit door
//!   3. Move X, resolve platforms on X, resolve enemies on X
//!   4. Move Y, resolve platforms on Y (sets `on_ground`), resolve jump pads,
//!      resolve enemies on Y
//!
//! The pose rules are order-dependent and later rules may overwrite earlier
//! ones within the same frame.

use jr_core::{Action, InputState, Rect};

use crate::collision::{
    resolve_enemies, resolve_jump_pads, resolve_platforms, take_touching, touches_any,
    EnemyContact,
};
use crate::cue::Cue;
use crate::entities::EntitySet;
use crate::mask::Masks;

const JUMP_IMPULSE: f32 = 11.0;
const WALK_SPEED: f32 = 8.0;
const GRAVITY: f32 = 0.7;
const MAX_FALL_SPEED: f32 = 100.0;
/// Downward speed at which a standing pose switches to a falling one.
const LEDGE_FALL_SPEED: f32 = 3.0;
const PAD_LAUNCH_SPEED: f32 = -20.0;
const STOMP_REBOUND: f32 = -11.0;

/// Animation pose. The `l` suffix marks left-facing; `stand` and `walk`
/// face right with no suffix while the jump poses carry `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Stand,
    StandL,
    Walk,
    WalkL,
    JumpR,
    JumpL,
}

impl PlayerState {
    pub fn name(self) -> &'static str {
        match self {
            PlayerState::Stand => "stand",
            PlayerState::StandL => "standl",
            PlayerState::Walk => "walk",
            PlayerState::WalkL => "walkl",
            PlayerState::JumpR => "jumpr",
            PlayerState::JumpL => "jumpl",
        }
    }

    pub fn faces_left(self) -> bool {
        matches!(
            self,
            PlayerState::StandL | PlayerState::WalkL | PlayerState::JumpL
        )
    }

    /// Jump pose with the same facing.
    pub fn airborne(self) -> Self {
        if self.faces_left() {
            PlayerState::JumpL
        } else {
            PlayerState::JumpR
        }
    }
}

/// Held movement controls for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub up: bool,
    pub left: bool,
    pub right: bool,
}

impl PlayerInput {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            up: input.is_held(Action::Up),
            left: input.is_held(Action::Left),
            right: input.is_held(Action::Right),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
    pub state: PlayerState,
    /// Set by a jump pad, consumed by the next frame's pose rules.
    pub bounce: bool,
    pub fall_death: bool,
    pub enemy_death: bool,
    pub level_complete: bool,
    pub enemies_killed: u32,
    pub collected: u32,
    /// Hearts picked up and not yet credited to the session.
    pub extra_lives: u32,
}

impl Player {
    pub fn new(center: (i32, i32), size: (i32, i32)) -> Self {
        Self {
            rect: Rect::from_center(center.0, center.1, size.0, size.1),
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
            state: PlayerState::Stand,
            bounce: false,
            fall_death: false,
            enemy_death: false,
            level_complete: false,
            enemies_killed: 0,
            collected: 0,
            extra_lives: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.fall_death || self.enemy_death
    }

    pub fn update(
        &mut self,
        input: PlayerInput,
        world: &mut EntitySet,
        masks: &Masks,
        cues: &mut Vec<Cue>,
    ) {
        self.apply_controls(input);
        self.check_triggers(world, cues);

        self.rect.x += self.vx as i32;
        resolve_platforms(&mut self.rect, self.vx, 0.0, &world.platforms);
        let contact = resolve_enemies(
            &self.rect,
            &masks.player,
            self.vx,
            0.0,
            &mut world.enemies,
            &masks.enemy,
        );
        self.apply_enemy_contact(contact, cues);

        self.rect.y += self.vy as i32;
        self.on_ground = false;
        if resolve_platforms(&mut self.rect, 0.0, self.vy, &world.platforms) {
            self.on_ground = true;
            self.vy = 0.0;
        }
        if resolve_jump_pads(&mut self.rect, self.vy, &world.jump_pads) {
            self.vy = PAD_LAUNCH_SPEED;
            self.bounce = true;
            cues.push(Cue::Bounce);
        }
        let contact = resolve_enemies(
            &self.rect,
            &masks.player,
            0.0,
            self.vy,
            &mut world.enemies,
            &masks.enemy,
        );
        self.apply_enemy_contact(contact, cues);
    }

    /// Pose state machine plus the velocity changes tied to it.
    pub fn apply_controls(&mut self, input: PlayerInput) {
        let PlayerInput { up, left, right } = input;

        if up && self.on_ground {
            self.vy -= JUMP_IMPULSE;
            self.state = match self.state {
                PlayerState::Stand | PlayerState::Walk => PlayerState::JumpR,
                PlayerState::StandL | PlayerState::WalkL => PlayerState::JumpL,
                other => other,
            };
            self.on_ground = false;
        }

        if left && self.state == PlayerState::JumpR {
            self.state = PlayerState::JumpL;
        }
        if right && self.state == PlayerState::JumpL {
            self.state = PlayerState::JumpR;
        }
        if up && right {
            self.state = PlayerState::JumpR;
        }

        if self.on_ground && self.state == PlayerState::JumpL {
            self.state = PlayerState::StandL;
        }
        if self.on_ground && self.state == PlayerState::JumpR {
            self.state = PlayerState::Stand;
        }

        if left {
            if self.on_ground {
                self.state = PlayerState::WalkL;
            }
            self.vx = -WALK_SPEED;
        }
        if right {
            if self.on_ground {
                self.state = PlayerState::Walk;
            }
            self.vx = WALK_SPEED;
        }
        if !(left || right) {
            self.state = match self.state {
                PlayerState::Walk => PlayerState::Stand,
                PlayerState::WalkL => PlayerState::StandL,
                other => other,
            };
        }

        // Every pose is either right- or left-facing, so a pending bounce is
        // always consumed here.
        if self.bounce {
            self.state = self.state.airborne();
            self.bounce = false;
        }

        if !self.on_ground {
            if self.vy >= LEDGE_FALL_SPEED {
                self.state = match self.state {
                    PlayerState::StandL => PlayerState::JumpL,
                    PlayerState::Stand => PlayerState::JumpR,
                    other => other,
                };
            }
            self.vy = (self.vy + GRAVITY).min(MAX_FALL_SPEED);
        }

        if !(left || right) {
            self.vx = 0.0;
        }
    }

    fn check_triggers(&mut self, world: &mut EntitySet, cues: &mut Vec<Cue>) {
        if touches_any(&self.rect, world.fall_blocks.iter().map(|f| &f.rect)) {
            cues.push(Cue::FallDeath);
            self.fall_death = true;
        }

        let coins = take_touching(&self.rect, &mut world.coins, |c| &c.rect);
        if coins > 0 {
            cues.push(Cue::Collect);
            self.collected += coins;
        }

        let hearts = take_touching(&self.rect, &mut world.hearts, |h| &h.rect);
        if hearts > 0 {
            cues.push(Cue::Collect);
            self.extra_lives += hearts;
        }

        if touches_any(&self.rect, world.exit_doors.iter().map(|d| &d.rect)) {
            self.level_complete = true;
        }
    }

    fn apply_enemy_contact(&mut self, contact: EnemyContact, cues: &mut Vec<Cue>) {
        if contact.kills > 0 {
            cues.push(Cue::EnemyDeath);
            self.vy = STOMP_REBOUND;
            self.enemies_killed += contact.kills;
        }
        if contact.fatal {
            self.enemy_death = true;
        }
    }
}
