use crate::components::games::{self, GamesDisplay};
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, DateController};
use crate::state::messages::NetworkRequest;
use courtside_api::{Badge, Game};
use log::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Games,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, date: DateController) -> Self {
        let app = Self { state: AppState::new(date), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Actions — each returns the fetch to issue, if any
    // -----------------------------------------------------------------------

    /// Step the date by `days` and reload.
    pub fn on_date_step(&mut self, days: i64) -> NetworkRequest {
        self.state.date.step(days);
        self.on_load()
    }

    /// Start a load for whatever the date field currently holds.
    pub fn on_load(&mut self) -> NetworkRequest {
        let seq = self.state.loads.next();
        self.state.display = GamesDisplay::Loading;
        self.state.selected_card = 0;
        NetworkRequest::LoadGames { seq, date: self.state.date.value().to_owned() }
    }

    pub fn on_filter_change(&mut self, badge: Badge) {
        self.state.filters.toggle(badge);
        self.rerender_if_shown();
    }

    pub fn on_filters_cleared(&mut self) {
        self.state.filters.clear();
        self.rerender_if_shown();
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_games_loaded(&mut self, seq: u64, games: Vec<Game>) {
        if !self.state.loads.is_current(seq) {
            debug!("dropping stale load #{seq}");
            return;
        }
        self.set_games(games);
        self.render();
    }

    /// The held listing is left as it was; only the display changes.
    pub fn on_error(&mut self, seq: u64, message: String) {
        if !self.state.loads.is_current(seq) {
            debug!("dropping stale error from load #{seq}: {message}");
            return;
        }
        self.state.display = GamesDisplay::Error(message);
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    pub fn games(&self) -> &[Game] {
        self.state.games()
    }

    pub fn set_games(&mut self, games: Vec<Game>) {
        self.state.set_games(games);
    }

    pub fn render(&mut self) {
        self.state.display = games::render(self.state.games(), &self.state.filters);
        self.state.clamp_selection();
    }

    /// While loading or showing an error the filter only updates the checkboxes.
    fn rerender_if_shown(&mut self) {
        if self.state.display.is_rendered() {
            self.render();
        }
    }

    // -----------------------------------------------------------------------
    // Tab and pane management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn selected_card_link(&self) -> Option<&str> {
        self.state
            .display
            .cards()
            .get(self.state.selected_card)
            .map(|c| c.link.as_str())
    }
}
