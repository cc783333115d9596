use crate::app::MenuItem;
use crate::components::games::GamesDisplay;
use crate::state::filters::FilterSet;
use chrono::{Days, Local, NaiveDate};
use courtside_api::Game;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Date controller
// ---------------------------------------------------------------------------

/// The date field. Holds raw text: whatever the user typed is what gets sent.
#[derive(Debug, Clone)]
pub struct DateController {
    value: String,
    /// Stepping from an unparseable value starts here.
    anchor: NaiveDate,
    /// In-progress edit; `None` when not editing.
    edit_buffer: Option<String>,
}

impl DateController {
    pub fn new(initial: NaiveDate) -> Self {
        Self {
            value: initial.format(DATE_FORMAT).to_string(),
            anchor: initial,
            edit_buffer: None,
        }
    }

    /// Starts on yesterday, local time.
    pub fn yesterday() -> Self {
        let today = Local::now().date_naive();
        Self::new(today.pred_opt().unwrap_or(today))
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Move by whole calendar days. Returns the new value.
    pub fn step(&mut self, days: i64) -> &str {
        self.value = step_date(&self.value, days, self.anchor);
        &self.value
    }

    /// Store a manual edit as-is. Does not trigger a load.
    pub fn set_from_user_input(&mut self, text: impl Into<String>) {
        self.value = text.into();
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit_buffer.as_deref()
    }

    pub fn begin_edit(&mut self) {
        self.edit_buffer = Some(self.value.clone());
    }

    pub fn edit_push(&mut self, c: char) {
        if let Some(buffer) = &mut self.edit_buffer {
            buffer.push(c);
        }
    }

    pub fn edit_pop(&mut self) {
        if let Some(buffer) = &mut self.edit_buffer {
            buffer.pop();
        }
    }

    pub fn commit_edit(&mut self) {
        if let Some(text) = self.edit_buffer.take() {
            self.set_from_user_input(text);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
    }
}

fn step_date(value: &str, days: i64, anchor: NaiveDate) -> String {
    let base = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).unwrap_or(anchor);
    let stepped = if days >= 0 {
        base.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        base.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    stepped.unwrap_or(base).format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Load sequencing
// ---------------------------------------------------------------------------

/// Hands out load sequence numbers. Only the newest one may land.
#[derive(Debug, Default)]
pub struct LoadSequence {
    latest: u64,
}

impl LoadSequence {
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

// ---------------------------------------------------------------------------
// Top-level state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub date: DateController,
    pub filters: FilterSet,
    pub display: GamesDisplay,
    pub loads: LoadSequence,
    /// Index into the rendered cards.
    pub selected_card: usize,
    pub show_logs: bool,
    games: Vec<Game>,
}

impl AppState {
    pub fn new(date: DateController) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            date,
            filters: FilterSet::default(),
            display: GamesDisplay::default(),
            loads: LoadSequence::default(),
            selected_card: 0,
            show_logs: false,
            games: Vec::new(),
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Replace the held listing wholesale.
    pub fn set_games(&mut self, games: Vec<Game>) {
        self.games = games;
    }

    pub fn select_next_card(&mut self) {
        let max = self.display.cards().len().saturating_sub(1);
        self.selected_card = (self.selected_card + 1).min(max);
    }

    pub fn select_prev_card(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        let max = self.display.cards().len().saturating_sub(1);
        self.selected_card = self.selected_card.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn step_back_from_first_of_month() {
        let mut dc = DateController::new(date(2025, 3, 1));
        assert_eq!(dc.step(-1), "2025-02-28");
        let mut leap = DateController::new(date(2024, 3, 1));
        assert_eq!(leap.step(-1), "2024-02-29");
    }

    #[test]
    fn step_across_year_boundary() {
        let mut dc = DateController::new(date(2024, 12, 31));
        assert_eq!(dc.step(1), "2025-01-01");
        assert_eq!(dc.step(-1), "2024-12-31");
    }

    #[test]
    fn manual_entry_is_kept_verbatim() {
        let mut dc = DateController::new(date(2025, 5, 19));
        dc.set_from_user_input("not-a-date");
        assert_eq!(dc.value(), "not-a-date");
        dc.set_from_user_input("");
        assert_eq!(dc.value(), "");
    }

    #[test]
    fn step_from_garbage_starts_at_anchor() {
        let mut dc = DateController::new(date(2025, 5, 19));
        dc.set_from_user_input("garbage");
        assert_eq!(dc.step(1), "2025-05-20");
    }

    #[test]
    fn edit_buffer_commits_and_cancels() {
        let mut dc = DateController::new(date(2025, 5, 19));
        dc.begin_edit();
        dc.edit_pop();
        dc.edit_push('8');
        assert_eq!(dc.edit_buffer(), Some("2025-05-18"));
        assert_eq!(dc.value(), "2025-05-19");
        dc.commit_edit();
        assert_eq!(dc.value(), "2025-05-18");
        assert!(dc.edit_buffer().is_none());

        dc.begin_edit();
        dc.edit_push('x');
        dc.cancel_edit();
        assert_eq!(dc.value(), "2025-05-18");
    }

    #[test]
    fn only_latest_sequence_is_current() {
        let mut seq = LoadSequence::default();
        let first = seq.next();
        let second = seq.next();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
