use crate::player::PlayerInput;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<PlayerInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(PlayerInput {
                    up: frame.up,
                    left: frame.left,
                    right: frame.right,
                });
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(replay)
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;
    use crate::highscore::HighScoreStore;
    use crate::level::LevelCatalog;
    use crate::mask::{CollisionMask, Masks};
    use crate::player::Player;
    use jr_core::{Action, InputState};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "jr_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn masks() -> Masks {
        Masks {
            player: CollisionMask::solid(30, 44),
            enemy: CollisionMask::solid(27, 34),
        }
    }

    fn shipped_catalog() -> LevelCatalog {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/levels/levels.json");
        LevelCatalog::load(&manifest).expect("shipped levels load")
    }

    const SCRIPT: &str = r#"{
      "frames": [
        { "repeat": 20 },
        { "right": true, "repeat": 40 },
        { "right": true, "up": true, "repeat": 3 },
        { "right": true, "repeat": 30 },
        { "left": true, "up": true, "repeat": 2 },
        { "left": true, "repeat": 25 },
        { "repeat": 30 }
      ]
    }"#;

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{ "frames": [ { "right": true, "repeat": 3 }, { "up": true } ] }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[0].right);
        assert!(expanded[3].up && !expanded[3].right);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        assert!(load_replay_from_path(&path).is_err());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn controller_replay_is_deterministic() {
        let path = temp_file_path("controller");
        fs::write(&path, SCRIPT).expect("write replay file");
        let inputs = load_replay_from_path(&path)
            .expect("replay should load")
            .expanded_inputs();

        let catalog = shipped_catalog();
        let entry = catalog.entry(1).expect("level 1");
        let masks = masks();

        let run = || {
            let mut world = crate::entities::EntitySet::from_layout(&entry.layout, (27, 34));
            let mut player = Player::new(entry.spawn, (30, 44));
            let mut cues = Vec::new();
            let mut states = Vec::with_capacity(inputs.len());
            for input in &inputs {
                player.update(*input, &mut world, &masks, &mut cues);
                for enemy in &mut world.enemies {
                    enemy.patrol();
                }
                states.push((player.state, player.rect));
            }
            (states, player, world, cues)
        };

        let (states_a, player_a, world_a, cues_a) = run();
        let (states_b, player_b, world_b, cues_b) = run();
        assert_eq!(states_a, states_b);
        assert_eq!(player_a, player_b);
        assert_eq!(world_a, world_b);
        assert_eq!(cues_a, cues_b);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn whole_game_replay_is_deterministic() {
        let path = temp_file_path("game");
        fs::write(&path, SCRIPT).expect("write replay file");
        let inputs = load_replay_from_path(&path)
            .expect("replay should load")
            .expanded_inputs();
        let scores = temp_file_path("game_scores");

        let run = || {
            let mut game = Game::new(
                GameConfig::default(),
                shipped_catalog(),
                masks(),
                HighScoreStore::load(&scores),
            )
            .expect("new game");
            let mut input = InputState::new();
            input.action_down(Action::Confirm);
            game.tick(&input).expect("tick");
            input.end_frame();
            input.action_up(Action::Confirm);

            let mut trace = Vec::with_capacity(inputs.len());
            for frame in &inputs {
                for (held, action) in [
                    (frame.up, Action::Up),
                    (frame.left, Action::Left),
                    (frame.right, Action::Right),
                ] {
                    if held {
                        input.action_down(action);
                    } else {
                        input.action_up(action);
                    }
                }
                game.tick(&input).expect("tick");
                input.end_frame();
                trace.push((game.screen(), game.hud(), game.level().player.rect));
            }
            (trace, game.drain_cues())
        };

        let (trace_a, cues_a) = run();
        let (trace_b, cues_b) = run();
        assert_eq!(trace_a, trace_b);
        assert_eq!(cues_a, cues_b);

        let _ = fs::remove_file(path);
    }
}
