use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use courtside_api::Badge;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if guard.state.date.edit_buffer().is_some() {
        match key_event.code {
            KeyCode::Enter => guard.state.date.commit_edit(),
            KeyCode::Esc => guard.state.date.cancel_edit(),
            KeyCode::Backspace => guard.state.date.edit_pop(),
            Char(c) if c.is_ascii_digit() || c == '-' => guard.state.date.edit_push(c),
            _ => {}
        }
        return;
    }

    let request = match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        (_, Char('?'), _) => {
            guard.update_tab(MenuItem::Help);
            None
        }
        (MenuItem::Help, KeyCode::Esc, _) => {
            guard.exit_help();
            None
        }

        // Date controls
        (MenuItem::Games, Char('h') | KeyCode::Left, _) => Some(guard.on_date_step(-1)),
        (MenuItem::Games, Char('l') | KeyCode::Right, _) => Some(guard.on_date_step(1)),
        (MenuItem::Games, Char('r') | KeyCode::Enter, _) => Some(guard.on_load()),
        (MenuItem::Games, Char('e'), _) => {
            guard.state.date.begin_edit();
            None
        }

        // Filters
        (MenuItem::Games, Char(c @ '1'..='7'), _) => {
            if let Some(badge) = filter_for_key(c) {
                guard.on_filter_change(badge);
            }
            None
        }
        (MenuItem::Games, Char('0'), _) => {
            guard.on_filters_cleared();
            None
        }

        // Card selection
        (MenuItem::Games, Char('j') | KeyCode::Down, _) => {
            guard.state.select_next_card();
            None
        }
        (MenuItem::Games, Char('k') | KeyCode::Up, _) => {
            guard.state.select_prev_card();
            None
        }

        // Global
        (_, Char('f'), _) => {
            guard.toggle_full_screen();
            None
        }
        (_, Char('"'), _) => {
            guard.toggle_show_logs();
            None
        }

        _ => None,
    };

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}

/// Keys 1-7 map onto the badge vocabulary in display order.
pub fn filter_for_key(c: char) -> Option<Badge> {
    let index = c.to_digit(10)?.checked_sub(1)? as usize;
    Badge::ALL.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::games::GamesDisplay;
    use crate::state::app_settings::AppSettings;
    use crate::state::app_state::DateController;
    use chrono::NaiveDate;
    use courtside_api::Game;

    fn setup() -> (Arc<Mutex<App>>, mpsc::Sender<NetworkRequest>, mpsc::Receiver<NetworkRequest>) {
        let start = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let app = App::new(AppSettings::default(), DateController::new(start));
        let (tx, rx) = mpsc::channel(8);
        (Arc::new(Mutex::new(app)), tx, rx)
    }

    async fn press(code: KeyCode, app: &Arc<Mutex<App>>, tx: &mpsc::Sender<NetworkRequest>) {
        handle_key_bindings(KeyEvent::new(code, KeyModifiers::NONE), app, tx).await;
    }

    fn game(id: &str, badges: &[&str]) -> Game {
        Game {
            game_id: id.into(),
            badges: badges.iter().map(|b| b.to_string()).collect(),
            ..Default::default()
        }
    }

    fn single_load(rx: &mut mpsc::Receiver<NetworkRequest>) -> (u64, String) {
        let NetworkRequest::LoadGames { seq, date } = rx.try_recv().expect("one request");
        assert!(rx.try_recv().is_err(), "more than one request sent");
        (seq, date)
    }

    #[tokio::test]
    async fn edit_enter_commits_without_fetching() {
        let (app, tx, mut rx) = setup();
        press(Char('e'), &app, &tx).await;
        for _ in 0.."2025-05-01".len() {
            press(KeyCode::Backspace, &app, &tx).await;
        }
        for c in "2024-12-25".chars() {
            press(Char(c), &app, &tx).await;
        }
        // Letters are ignored while editing, so 'r' must not reload.
        press(Char('r'), &app, &tx).await;
        press(KeyCode::Enter, &app, &tx).await;

        assert!(rx.try_recv().is_err());
        let guard = app.lock().await;
        assert_eq!(guard.state.date.value(), "2024-12-25");
        assert!(guard.state.date.edit_buffer().is_none());
    }

    #[tokio::test]
    async fn edit_escape_keeps_previous_date() {
        let (app, tx, mut rx) = setup();
        press(Char('e'), &app, &tx).await;
        press(KeyCode::Backspace, &app, &tx).await;
        press(KeyCode::Esc, &app, &tx).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(app.lock().await.state.date.value(), "2025-05-01");
    }

    #[tokio::test]
    async fn date_keys_send_exactly_one_load_each() {
        let (app, tx, mut rx) = setup();

        press(Char('h'), &app, &tx).await;
        let (first, date) = single_load(&mut rx);
        assert_eq!(date, "2025-04-30");

        press(Char('l'), &app, &tx).await;
        let (second, date) = single_load(&mut rx);
        assert_eq!(date, "2025-05-01");

        press(Char('r'), &app, &tx).await;
        let (third, date) = single_load(&mut rx);
        assert_eq!(date, "2025-05-01");

        assert!(first < second && second < third);
        assert_eq!(app.lock().await.state.display, GamesDisplay::Loading);
    }

    #[tokio::test]
    async fn arrow_keys_and_enter_match_letter_bindings() {
        let (app, tx, mut rx) = setup();
        press(KeyCode::Right, &app, &tx).await;
        assert_eq!(single_load(&mut rx).1, "2025-05-02");
        press(KeyCode::Left, &app, &tx).await;
        assert_eq!(single_load(&mut rx).1, "2025-05-01");
        press(KeyCode::Enter, &app, &tx).await;
        assert_eq!(single_load(&mut rx).1, "2025-05-01");
    }

    #[tokio::test]
    async fn filter_keys_rerender_without_fetching() {
        let (app, tx, mut rx) = setup();
        {
            let mut guard = app.lock().await;
            let NetworkRequest::LoadGames { seq, .. } = guard.on_load();
            guard.on_games_loaded(seq, vec![game("1", &["pts30"]), game("2", &["overtime"])]);
            assert_eq!(guard.state.display.cards().len(), 2);
        }

        press(Char('1'), &app, &tx).await;
        assert!(rx.try_recv().is_err());
        {
            let guard = app.lock().await;
            assert!(guard.state.filters.is_checked(Badge::Pts30));
            let ids: Vec<&str> =
                guard.state.display.cards().iter().map(|c| c.game_id.as_str()).collect();
            assert_eq!(ids, vec!["1"]);
        }

        press(Char('0'), &app, &tx).await;
        assert!(rx.try_recv().is_err());
        let guard = app.lock().await;
        assert!(guard.state.filters.is_empty());
        assert_eq!(guard.state.display.cards().len(), 2);
    }

    #[tokio::test]
    async fn every_filter_key_leaves_the_channel_empty() {
        let (app, tx, mut rx) = setup();
        for c in '1'..='7' {
            press(Char(c), &app, &tx).await;
        }
        press(Char('0'), &app, &tx).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn help_tab_swallows_date_keys() {
        let (app, tx, mut rx) = setup();
        press(Char('?'), &app, &tx).await;
        press(Char('h'), &app, &tx).await;
        assert!(rx.try_recv().is_err());

        press(KeyCode::Esc, &app, &tx).await;
        assert_eq!(app.lock().await.state.active_tab, MenuItem::Games);
    }

    #[test]
    fn digit_keys_cover_the_vocabulary() {
        assert_eq!(filter_for_key('1'), Some(Badge::Pts30));
        assert_eq!(filter_for_key('4'), Some(Badge::TripleDouble));
        assert_eq!(filter_for_key('7'), Some(Badge::Overtime));
        assert_eq!(filter_for_key('0'), None);
        assert_eq!(filter_for_key('8'), None);
        assert_eq!(filter_for_key('x'), None);
    }
}
