use crate::state::network::LoadingState;
use courtside_api::Game;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadGames { seq: u64, date: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// Full replacement of the held listing.
    GamesLoaded { seq: u64, games: Vec<Game> },
    Error { seq: u64, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
