/// One-shot audio cues raised by the simulation. The shell decides how (or
/// whether) to play them; nothing waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Bounce,
    Collect,
    EnemyDeath,
    FallDeath,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Bounce => "boing",
            Cue::Collect => "ding",
            Cue::EnemyDeath => "enemydeath",
            Cue::FallDeath => "falling",
        }
    }
}
