//! One playable attempt at a level, and the counters that outlive it.
//!
//! A `Level` is always built fresh from the catalog and the current
//! `SessionState`; nothing from a previous attempt is patched back in.

use jr_render::{Camera, DrawItem, DrawLayer, DrawList, SpriteKey};

use crate::config::GameConfig;
use crate::cue::Cue;
use crate::entities::EntitySet;
use crate::level::{LevelCatalog, LevelError};
use crate::mask::Masks;
use crate::player::{Player, PlayerInput};

const POINTS_PER_KILL: u32 = 50;
const POINTS_PER_ITEM: u32 = 10;
const BONUS_PER_SECOND: u32 = 3;

/// Counters that persist across level rebuilds within one playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub lives: i32,
    pub level_number: u32,
    /// Score banked from completed levels.
    pub level_score: u32,
}

impl SessionState {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            lives: starting_lives,
            level_number: 1,
            level_score: 0,
        }
    }

    /// Full restart: back to level 1 with fresh lives and no banked score.
    pub fn reset(&mut self, starting_lives: i32) {
        *self = Self::new(starting_lives);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub number: u32,
    pub entities: EntitySet,
    pub player: Player,
    pub camera: Camera,
    pub timer_ticks: u32,
    tick_rate: u32,
    /// Running total shown to the player, including banked score.
    pub score: u32,
}

impl Level {
    pub fn build(
        session: &SessionState,
        catalog: &LevelCatalog,
        config: &GameConfig,
        masks: &Masks,
    ) -> Result<Self, LevelError> {
        let entry = catalog.entry(session.level_number)?;
        let layout = &entry.layout;
        let entities = EntitySet::from_layout(layout, masks.enemy_size());
        let player = Player::new(entry.spawn, masks.player_size());
        let mut camera = Camera::new(
            layout.width,
            layout.height,
            config.screen_width,
            config.screen_height,
        );
        camera.update(&player.rect);

        log::debug!(
            "Built level {} ({} enemies, {} coins, {} hearts)",
            session.level_number,
            entities.enemies.len(),
            entities.coins.len(),
            entities.hearts.len()
        );

        Ok(Self {
            number: session.level_number,
            entities,
            player,
            camera,
            timer_ticks: config.timer_ticks(),
            tick_rate: config.tick_rate,
            score: session.level_score,
        })
    }

    /// Advance one playing frame: player, then enemies, then score and camera.
    pub fn step(
        &mut self,
        input: PlayerInput,
        masks: &Masks,
        session: &SessionState,
        cues: &mut Vec<Cue>,
    ) {
        self.player.update(input, &mut self.entities, masks, cues);
        for enemy in &mut self.entities.enemies {
            enemy.patrol();
        }
        self.score = self.player.enemies_killed * POINTS_PER_KILL
            + self.player.collected * POINTS_PER_ITEM
            + session.level_score;
        self.camera.update(&self.player.rect);
    }

    /// Count the timer down one tick. Returns true on the tick it runs out.
    pub fn tick_timer(&mut self) -> bool {
        if self.timer_ticks == 0 {
            return false;
        }
        self.timer_ticks -= 1;
        self.timer_ticks == 0
    }

    pub fn whole_seconds_left(&self) -> u32 {
        self.timer_ticks / self.tick_rate
    }

    pub fn time_bonus(&self) -> u32 {
        BONUS_PER_SECOND * self.whole_seconds_left()
    }

    /// Hearts collected since the last call.
    pub fn take_extra_lives(&mut self) -> u32 {
        std::mem::take(&mut self.player.extra_lives)
    }

    /// Screen-space sprites for this frame, back to front.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut list = DrawList::new(&self.camera);
        for drawable in self.entities.drawables() {
            list.push(drawable.layer(), drawable.sprite(), drawable.rect());
        }
        list.push(
            DrawLayer::Actors,
            SpriteKey::Player {
                state: self.player.state.name(),
            },
            &self.player.rect,
        );
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::CollisionMask;

    const GRID: &str = "\
PPPPPPPPPPPPPPPPPPPPPPPPPPPPPPPP
P1                             P
P        C  H        E     X   P
P                              P
P                              P
PPPPPPPPPPPPPPPPPPPPPPPPPPPPPPPP";

    fn fixtures() -> (LevelCatalog, GameConfig, Masks) {
        let mut catalog = LevelCatalog::default();
        catalog.insert(1, GRID, (100, 100)).expect("insert level");
        let config = GameConfig::default();
        let masks = Masks {
            player: CollisionMask::solid(30, 44),
            enemy: CollisionMask::solid(27, 34),
        };
        (catalog, config, masks)
    }

    #[test]
    fn rebuilding_twice_gives_identical_levels() {
        let (catalog, config, masks) = fixtures();
        let session = SessionState::new(3);
        let first = Level::build(&session, &catalog, &config, &masks).expect("build");
        let second = Level::build(&session, &catalog, &config, &masks).expect("build");
        assert_eq!(first, second);
        assert_eq!(first.entities.coins.len(), 1);
        assert_eq!(first.entities.hearts.len(), 1);
        assert_eq!(first.entities.enemies.len(), 1);
        assert_eq!(first.timer_ticks, 1500);
    }

    #[test]
    fn rebuild_discards_attempt_state() {
        let (catalog, config, masks) = fixtures();
        let session = SessionState::new(3);
        let fresh = Level::build(&session, &catalog, &config, &masks).expect("build");
        let mut played = fresh.clone();
        let mut cues = Vec::new();
        for _ in 0..20 {
            played.step(PlayerInput::default(), &masks, &session, &mut cues);
            played.tick_timer();
        }
        played.entities.coins.clear();
        assert_ne!(played, fresh);

        let rebuilt = Level::build(&session, &catalog, &config, &masks).expect("build");
        assert_eq!(rebuilt, fresh);
    }

    #[test]
    fn unknown_level_is_an_error() {
        let (catalog, config, masks) = fixtures();
        let mut session = SessionState::new(3);
        session.level_number = 4;
        let result = Level::build(&session, &catalog, &config, &masks);
        assert!(matches!(result, Err(LevelError::UnknownLevel(4))));
    }

    #[test]
    fn timer_runs_out_after_configured_ticks() {
        let (catalog, config, masks) = fixtures();
        let mut level =
            Level::build(&SessionState::new(3), &catalog, &config, &masks).expect("build");
        assert_eq!(level.whole_seconds_left(), 50);
        for _ in 0..1499 {
            assert!(!level.tick_timer());
        }
        assert!(level.tick_timer());
        assert_eq!(level.timer_ticks, 0);
        assert_eq!(level.whole_seconds_left(), 0);
        assert!(!level.tick_timer());
    }

    #[test]
    fn time_bonus_uses_whole_seconds() {
        let (catalog, config, masks) = fixtures();
        let mut level =
            Level::build(&SessionState::new(3), &catalog, &config, &masks).expect("build");
        level.timer_ticks = 30 * 12 + 29;
        assert_eq!(level.time_bonus(), 36);
    }

    #[test]
    fn score_includes_banked_points() {
        let (catalog, config, masks) = fixtures();
        let mut session = SessionState::new(3);
        session.level_score = 120;
        let mut level = Level::build(&session, &catalog, &config, &masks).expect("build");
        assert_eq!(level.score, 120);
        level.player.enemies_killed = 2;
        level.player.collected = 3;
        let mut cues = Vec::new();
        level.step(PlayerInput::default(), &masks, &session, &mut cues);
        assert_eq!(level.score, 2 * 50 + 3 * 10 + 120);
    }

    #[test]
    fn draw_list_puts_player_last() {
        let (catalog, config, masks) = fixtures();
        let level = Level::build(&SessionState::new(3), &catalog, &config, &masks).expect("build");
        let items = level.draw_list();
        assert_eq!(items.first().map(|i| i.sprite), Some(SpriteKey::Background(1)));
        assert_eq!(
            items.last().map(|i| i.sprite),
            Some(SpriteKey::Player { state: "stand" })
        );
        let expected = level.camera.apply(&level.player.rect);
        assert_eq!(items.last().map(|i| i.dest), Some(expected));
        // background, coin, heart, door, enemy, player
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn session_reset_restores_defaults() {
        let mut session = SessionState {
            lives: -1,
            level_number: 3,
            level_score: 900,
        };
        session.reset(3);
        assert_eq!(session, SessionState::new(3));
    }
}
