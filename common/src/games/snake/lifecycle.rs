use super::types::GameStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleCommand {
    Start,
    Stop,
    Resume,
    Restart,
}

pub fn transition(status: GameStatus, command: LifecycleCommand) -> Option<GameStatus> {
    match (status, command) {
        (GameStatus::Init, LifecycleCommand::Start) => Some(GameStatus::Playing),
        (GameStatus::Playing, LifecycleCommand::Stop) => Some(GameStatus::Suspended),
        (GameStatus::Suspended, LifecycleCommand::Resume) => Some(GameStatus::Playing),
        (GameStatus::Suspended | GameStatus::GameOver, LifecycleCommand::Restart) => {
            Some(GameStatus::Init)
        }
        _ => None,
    }
}
