//! Screen/mode state machine. Owns the session counters, the current level
//! instance and the high-score store, and decides which code path runs on
//! each fixed tick.
//!
//! Timed beats (the pause after a death, before the level-complete screen and
//! before the game-over screen) are `Screen::Hold` states that count ticks down
//! instead of sleeping. Input during a hold is dropped, Quit included.

use jr_core::{Action, InputState, TimeState};
use jr_render::DrawItem;

use crate::config::GameConfig;
use crate::cue::Cue;
use crate::highscore::{HighScoreEntry, HighScoreStore, INITIALS_LEN};
use crate::level::{LevelCatalog, LevelError};
use crate::mask::Masks;
use crate::player::PlayerInput;
use crate::world::{Level, SessionState};

/// What a timed hold turns into once it runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterHold {
    LoseLife,
    LevelComplete,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hold {
    pub ticks_left: u32,
    pub then: AfterHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Instructions,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
    GameComplete,
    EnterName,
    HighScore,
    Hold(Hold),
    Quit,
}

/// Numbers the shell shows while a level is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub level: u32,
    pub lives: i32,
    pub score: u32,
    pub seconds_left: u32,
}

pub struct Game {
    config: GameConfig,
    catalog: LevelCatalog,
    masks: Masks,
    session: SessionState,
    level: Level,
    screen: Screen,
    high_scores: HighScoreStore,
    initials: Vec<char>,
    final_score: u32,
    cues: Vec<Cue>,
}

impl Game {
    pub fn new(
        config: GameConfig,
        catalog: LevelCatalog,
        masks: Masks,
        high_scores: HighScoreStore,
    ) -> Result<Self, LevelError> {
        let session = SessionState::new(config.starting_lives);
        let level = Level::build(&session, &catalog, &config, &masks)?;
        Ok(Self {
            config,
            catalog,
            masks,
            session,
            level,
            screen: Screen::MainMenu,
            high_scores,
            initials: Vec::new(),
            final_score: 0,
            cues: Vec::new(),
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[cfg(test)]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[cfg(test)]
    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn high_scores(&self) -> &HighScoreStore {
        &self.high_scores
    }

    pub fn initials(&self) -> &[char] {
        &self.initials
    }

    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    pub fn is_finished(&self) -> bool {
        self.screen == Screen::Quit
    }

    pub fn hud(&self) -> Hud {
        Hud {
            level: self.session.level_number,
            lives: self.session.lives,
            score: self.level.score,
            seconds_left: self.level.whole_seconds_left(),
        }
    }

    /// Cues raised since the last call, oldest first.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// World sprites of the current level instance.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        self.level.draw_list()
    }

    /// Run every tick the clock has banked this frame and return how many ran.
    ///
    /// Edge-triggered input is cleared after each tick, so a press is handled
    /// by exactly one tick however many the frame runs. A frame that runs no
    /// ticks keeps its presses for the next one. Stops early on Quit.
    pub fn run_frame(
        &mut self,
        input: &mut InputState,
        time: &mut TimeState,
    ) -> Result<u32, LevelError> {
        let mut steps = 0;
        while time.should_step() {
            self.tick(input)?;
            input.end_frame();
            steps += 1;
            if self.is_finished() {
                break;
            }
        }
        Ok(steps)
    }

    /// Advance one fixed tick. Only level rebuilds can fail.
    pub fn tick(&mut self, input: &InputState) -> Result<(), LevelError> {
        if let Screen::Hold(hold) = &mut self.screen {
            hold.ticks_left = hold.ticks_left.saturating_sub(1);
            if hold.ticks_left == 0 {
                let then = hold.then;
                self.finish_hold(then)?;
            }
            return Ok(());
        }

        if self.screen != Screen::Quit && input.is_just_pressed(Action::Quit) {
            self.set_screen(Screen::Quit);
            return Ok(());
        }

        match self.screen {
            Screen::MainMenu => {
                if input.is_just_pressed(Action::Confirm) {
                    self.cues.push(Cue::Collect);
                    self.set_screen(Screen::Playing);
                } else if input.is_just_pressed(Action::Instructions) {
                    self.set_screen(Screen::Instructions);
                }
            }
            Screen::Instructions => {
                if input.is_just_pressed(Action::Back) {
                    self.set_screen(Screen::MainMenu);
                }
            }
            Screen::Playing => {
                if input.is_just_pressed(Action::Pause) {
                    self.set_screen(Screen::Paused);
                } else {
                    self.step_playing(input);
                }
            }
            Screen::Paused => {
                if input.is_just_pressed(Action::Pause) {
                    self.set_screen(Screen::Playing);
                }
            }
            Screen::LevelComplete => {
                if input.is_just_pressed(Action::Confirm) {
                    self.session.level_number += 1;
                    self.rebuild_level()?;
                    self.set_screen(Screen::Playing);
                }
            }
            Screen::GameOver => {
                if input.is_just_pressed(Action::Restart) {
                    self.restart()?;
                }
            }
            Screen::GameComplete => {
                if input.is_just_pressed(Action::Restart) {
                    self.restart()?;
                } else if input.is_just_pressed(Action::Confirm) {
                    if self.high_scores.table().qualifies(self.final_score) {
                        self.initials.clear();
                        self.set_screen(Screen::EnterName);
                    } else {
                        self.set_screen(Screen::Quit);
                    }
                }
            }
            Screen::EnterName => self.step_name_entry(input),
            Screen::HighScore => {
                if input.is_just_pressed(Action::Confirm) {
                    self.session.reset(self.config.starting_lives);
                    self.rebuild_level()?;
                    self.set_screen(Screen::MainMenu);
                }
            }
            Screen::Hold(_) | Screen::Quit => {}
        }
        Ok(())
    }

    fn step_playing(&mut self, input: &InputState) {
        let controls = PlayerInput::from_input(input);
        self.level
            .step(controls, &self.masks, &self.session, &mut self.cues);

        let extra = self.level.take_extra_lives();
        if extra > 0 {
            self.session.lives += extra as i32;
            log::info!("Extra life, {} remaining", self.session.lives);
        }

        let player = &self.level.player;
        if player.is_dead() {
            log::info!(
                "Player died on level {} ({})",
                self.level.number,
                if player.fall_death { "fell" } else { "enemy" }
            );
            self.hold(AfterHold::LoseLife);
            return;
        }

        if player.level_complete {
            self.level.score += self.level.time_bonus();
            self.session.level_score = self.level.score;
            log::info!(
                "Level {} complete, score {}",
                self.level.number,
                self.level.score
            );
            if self.level.number >= self.catalog.final_level() {
                self.final_score = self.level.score;
                self.set_screen(Screen::GameComplete);
            } else {
                self.hold(AfterHold::LevelComplete);
            }
            return;
        }

        if self.level.tick_timer() {
            log::info!("Time up on level {}", self.level.number);
            self.hold(AfterHold::LoseLife);
        }
    }

    fn step_name_entry(&mut self, input: &InputState) {
        if input.is_just_pressed(Action::Delete) {
            self.initials.pop();
        }
        for letter in input.just_pressed_letters() {
            if self.initials.len() < INITIALS_LEN {
                self.initials.push(letter.to_ascii_uppercase());
            }
        }
        if input.is_just_pressed(Action::Confirm) && self.initials.len() == INITIALS_LEN {
            let entry = HighScoreEntry::new(self.final_score, &self.initials);
            if let Err(e) = self.high_scores.submit(entry) {
                log::warn!("High score not saved: {e}");
            }
            self.set_screen(Screen::HighScore);
        }
    }

    fn finish_hold(&mut self, then: AfterHold) -> Result<(), LevelError> {
        match then {
            AfterHold::LoseLife => {
                self.session.lives -= 1;
                if self.session.lives < 0 {
                    log::info!("Out of lives");
                    self.hold(AfterHold::GameOver);
                } else {
                    self.rebuild_level()?;
                    self.set_screen(Screen::Playing);
                }
            }
            AfterHold::LevelComplete => self.set_screen(Screen::LevelComplete),
            AfterHold::GameOver => self.set_screen(Screen::GameOver),
        }
        Ok(())
    }

    fn restart(&mut self) -> Result<(), LevelError> {
        self.session.reset(self.config.starting_lives);
        self.initials.clear();
        self.final_score = 0;
        self.rebuild_level()?;
        self.set_screen(Screen::Playing);
        Ok(())
    }

    fn rebuild_level(&mut self) -> Result<(), LevelError> {
        self.level = Level::build(&self.session, &self.catalog, &self.config, &self.masks)?;
        Ok(())
    }

    fn hold(&mut self, then: AfterHold) {
        self.set_screen(Screen::Hold(Hold {
            ticks_left: self.config.tick_rate,
            then,
        }));
    }

    fn set_screen(&mut self, next: Screen) {
        log::info!("Screen {:?} -> {:?}", self.screen, next);
        self.screen = next;
    }
}
