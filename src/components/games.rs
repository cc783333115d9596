use crate::state::filters::{FilterSet, compute_visible};
use chrono::{DateTime, Utc};
use courtside_api::Game;

pub const NO_GAMES_MESSAGE: &str = "no games found";
pub const LOADING_MESSAGE: &str = "Loading games...";

/// A populated card template for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCard {
    pub game_id: String,
    pub link: String,
    pub away: String,
    pub away_logo: String,
    pub home: String,
    pub home_logo: String,
    /// "Round - Game N"; either half may be missing.
    pub round_text: String,
    pub game_type: String,
    pub series: Option<String>,
    pub badges: Vec<&'static str>,
    pub tipoff: Option<DateTime<Utc>>,
}

impl GameCard {
    pub fn from_game(game: &Game, filters: &FilterSet) -> Self {
        Self {
            game_id: game.game_id.clone(),
            link: game.replay_url(),
            away: game.away.clone(),
            away_logo: game.away_logo.clone(),
            home: game.home.clone(),
            home_logo: game.home_logo.clone(),
            round_text: round_text(&game.round, &game.game_num),
            game_type: game.game_type.clone(),
            series: game
                .series_pre
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned),
            badges: filters.visible_badges(game).iter().map(|b| b.label()).collect(),
            tipoff: game.tipoff_utc,
        }
    }
}

/// What the games container shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GamesDisplay {
    #[default]
    Loading,
    Populated(Vec<GameCard>),
    Empty,
    Error(String),
}

impl GamesDisplay {
    pub fn cards(&self) -> &[GameCard] {
        match self {
            GamesDisplay::Populated(cards) => cards,
            _ => &[],
        }
    }

    /// Populated and Empty are re-rendered in place when filters change.
    pub fn is_rendered(&self) -> bool {
        matches!(self, GamesDisplay::Populated(_) | GamesDisplay::Empty)
    }
}

/// Rebuild the games container from scratch.
pub fn render(games: &[Game], filters: &FilterSet) -> GamesDisplay {
    let to_show = compute_visible(games, filters);
    if to_show.is_empty() {
        return GamesDisplay::Empty;
    }
    GamesDisplay::Populated(
        to_show
            .into_iter()
            .map(|g| GameCard::from_game(g, filters))
            .collect(),
    )
}

fn round_text(round: &str, game_num: &str) -> String {
    match (round.trim(), game_num.trim()) {
        ("", "") => String::new(),
        (r, "") => r.to_owned(),
        ("", n) => n.to_owned(),
        (r, n) => format!("{r} - {n}"),
    }
}
