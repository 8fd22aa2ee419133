use std::future::Future;

use crate::games::snake::SnakeSnapshot;

pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: SnakeSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, snapshot: SnakeSnapshot) -> impl Future<Output = ()> + Send;
}
