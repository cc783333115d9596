pub mod client;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Base for replay URLs built from a game id when no replay link was scraped.
pub const FALLBACK_REPLAY_BASE: &str = "https://www.espn.com/nba/game/_/gameId";

// ---------------------------------------------------------------------------
// Wire envelope — `GET /api/games?date=YYYY-MM-DD`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamesResponse {
    /// Date the backend resolved the request to. Echoed back, not required.
    #[serde(default)]
    pub date: Option<String>,
    pub games: Vec<Game>,
}

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(deserialize_with = "string_or_number")]
    pub game_id: String,
    #[serde(default, rename = "tipoffUTC", deserialize_with = "lenient_timestamp")]
    pub tipoff_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub away: String,
    #[serde(default)]
    pub home: String,
    #[serde(default)]
    pub away_logo: String,
    #[serde(default)]
    pub home_logo: String,
    #[serde(default)]
    pub round: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub game_num: String,
    #[serde(default)]
    pub game_type: String,
    #[serde(default)]
    pub series_pre: Option<String>,
    #[serde(default)]
    pub replay_link: Option<String>,
    /// Raw badge tags. Kept as strings so unknown tags survive parsing.
    #[serde(default)]
    pub badges: Vec<String>,
}

impl Game {
    /// The scraped replay link, or one built from the game id.
    pub fn replay_url(&self) -> String {
        match self.replay_link.as_deref().map(str::trim) {
            Some(link) if !link.is_empty() => link.to_owned(),
            _ => format!("{FALLBACK_REPLAY_BASE}/{}", self.game_id),
        }
    }

    pub fn has_badge(&self, tag: &str) -> bool {
        self.badges.iter().any(|b| b == tag)
    }
}

/// Fixed badge vocabulary. Ordered the way the filter row displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Badge {
    Pts30,
    Pts40,
    Pts50,
    TripleDouble,
    Close4,
    CloseGame,
    Overtime,
}

impl Badge {
    pub const ALL: [Badge; 7] = [
        Badge::Pts30,
        Badge::Pts40,
        Badge::Pts50,
        Badge::TripleDouble,
        Badge::Close4,
        Badge::CloseGame,
        Badge::Overtime,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Badge::Pts30 => "pts30",
            Badge::Pts40 => "pts40",
            Badge::Pts50 => "pts50",
            Badge::TripleDouble => "tripleDouble",
            Badge::Close4 => "close4",
            Badge::CloseGame => "closeGame",
            Badge::Overtime => "overtime",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Badge::Pts30 => "30+ Pts",
            Badge::Pts40 => "40+ Pts",
            Badge::Pts50 => "50+ Pts",
            Badge::TripleDouble => "Triple-Double",
            Badge::Close4 => "Close 4th",
            Badge::CloseGame => "Close Game",
            Badge::Overtime => "OT",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.tag() == tag)
    }
}

/// Label for a raw badge tag; `None` for tags outside the vocabulary.
pub fn badge_label(tag: &str) -> Option<&'static str> {
    Badge::from_tag(tag).map(|b| b.label())
}

/// ESPN stamps tip-off without seconds (`2025-05-20T00:30Z`). Anything
/// unparseable is dropped rather than failing the whole listing.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    Ok(NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc()))
}

/// The backend emits ESPN ids as strings, older snapshots as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_parses_camel_case_wire_format() {
        let raw = r#"{
            "gameId": "401767823",
            "tipoffUTC": "2025-05-20T00:30Z",
            "home": "OKC", "away": "MIN",
            "homeLogo": "https://a.espncdn.com/okc.png",
            "awayLogo": "https://a.espncdn.com/min.png",
            "round": "West Finals", "gameNum": "Game 1",
            "gameType": "Playoffs",
            "seriesPre": "Series tied 0-0",
            "badges": ["pts30", "closeGame"],
            "replayLink": null
        }"#;
        let game: Game = serde_json::from_str(raw).unwrap();
        assert_eq!(game.game_id, "401767823");
        assert_eq!(game.home, "OKC");
        assert_eq!(game.game_num, "Game 1");
        assert_eq!(game.series_pre.as_deref(), Some("Series tied 0-0"));
        assert_eq!(game.badges, vec!["pts30", "closeGame"]);
        assert!(game.replay_link.is_none());
    }

    #[test]
    fn numeric_ids_become_strings() {
        let game: Game = serde_json::from_str(r#"{"gameId": 12345, "gameNum": 3}"#).unwrap();
        assert_eq!(game.game_id, "12345");
        assert_eq!(game.game_num, "3");
        assert!(game.badges.is_empty());
    }

    #[test]
    fn tipoff_accepts_espn_minute_precision() {
        use chrono::{TimeZone, Timelike};
        let game: Game =
            serde_json::from_str(r#"{"gameId": "1", "tipoffUTC": "2025-05-20T00:30Z"}"#).unwrap();
        assert_eq!(game.tipoff_utc, Some(Utc.with_ymd_and_hms(2025, 5, 20, 0, 30, 0).unwrap()));

        let full: Game =
            serde_json::from_str(r#"{"gameId": "1", "tipoffUTC": "2025-05-20T00:30:15+00:00"}"#)
                .unwrap();
        assert_eq!(full.tipoff_utc.map(|t| t.second()), Some(15));
    }

    #[test]
    fn missing_or_garbled_tipoff_is_none() {
        let game: Game = serde_json::from_str(r#"{"gameId": "1"}"#).unwrap();
        assert!(game.tipoff_utc.is_none());
        let garbled: Game = serde_json::from_str(r#"{"gameId": "1", "tipoffUTC": "soon"}"#).unwrap();
        assert!(garbled.tipoff_utc.is_none());
    }

    #[test]
    fn replay_url_prefers_scraped_link() {
        let game = Game {
            game_id: "12345".into(),
            replay_link: Some("https://watchreplay.net/mavericks-vs-spurs".into()),
            ..Default::default()
        };
        assert_eq!(game.replay_url(), "https://watchreplay.net/mavericks-vs-spurs");
    }

    #[test]
    fn replay_url_falls_back_to_game_id() {
        let game = Game { game_id: "12345".into(), ..Default::default() };
        assert_eq!(game.replay_url(), "https://www.espn.com/nba/game/_/gameId/12345");

        let blank = Game {
            game_id: "12345".into(),
            replay_link: Some("  ".into()),
            ..Default::default()
        };
        assert!(blank.replay_url().ends_with("/12345"));
    }

    #[test]
    fn badge_vocabulary_round_trips_through_tags() {
        for badge in Badge::ALL {
            assert_eq!(Badge::from_tag(badge.tag()), Some(badge));
        }
        assert_eq!(badge_label("pts30"), Some("30+ Pts"));
        assert_eq!(badge_label("overtime"), Some("OT"));
        assert_eq!(badge_label("dunkContest"), None);
    }

    #[test]
    fn envelope_requires_games_field() {
        assert!(serde_json::from_str::<GamesResponse>(r#"{"date": "2025-05-19"}"#).is_err());
        let ok: GamesResponse = serde_json::from_str(r#"{"games": []}"#).unwrap();
        assert!(ok.games.is_empty());
        assert!(ok.date.is_none());
    }
}
