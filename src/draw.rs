use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::card::{CARD_HEIGHT, CardView};
use crate::components::games::{GamesDisplay, LOADING_MESSAGE, NO_GAMES_MESSAGE};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use courtside_api::Badge;

static TABS: &[&str; 2] = &["Games", "Help"];
const MIN_CARD_WIDTH: u16 = 44;

const HELP_TEXT: &str = "\
h / ←      previous day (reloads)
l / →      next day (reloads)
r / Enter  load the date in the field
e          edit date; Enter keeps it, Esc cancels
1-7        toggle a badge filter
0          clear all filters
j / k      move between cards
f          full screen
\"          log pane
?          help (Esc to leave)
q          quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_date_bar(f, layout.controls[0], app);
            draw_filter_bar(f, layout.controls[1], app);
        }

        match app.state.active_tab {
            MenuItem::Games => draw_games(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Games => 0,
        MenuItem::Help => 1,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_date_bar(f: &mut Frame, area: Rect, app: &App) {
    let date = &app.state.date;
    let (text, color) = match date.edit_buffer() {
        Some(buffer) => (format!("{buffer}_"), Color::Yellow),
        None => (date.value().to_owned(), Color::White),
    };
    let line = Line::from(vec![
        Span::styled("◀ h ", Style::default().fg(Color::DarkGray)),
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(" l ▶  r=load", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(
        Paragraph::new(line).block(default_border(Color::White).title(" Date ")),
        area,
    );
}

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::with_capacity(Badge::ALL.len() * 2);
    for (idx, badge) in Badge::ALL.iter().enumerate() {
        let checked = app.state.filters.is_checked(*badge);
        let style = if checked {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mark = if checked { 'x' } else { ' ' };
        spans.push(Span::styled(format!("{}[{mark}] {}", idx + 1, badge.label()), style));
        spans.push(Span::raw("  "));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(default_border(Color::White).title(" Filters ")),
        area,
    );
}

fn draw_games(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Games ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cards = match &app.state.display {
        GamesDisplay::Loading => return draw_message(f, inner, LOADING_MESSAGE, Color::DarkGray),
        GamesDisplay::Empty => return draw_message(f, inner, NO_GAMES_MESSAGE, Color::DarkGray),
        GamesDisplay::Error(message) => return draw_message(f, inner, message, Color::Red),
        GamesDisplay::Populated(cards) => cards,
    };

    for (idx, slot) in card_slots(inner, cards.len(), app.state.selected_card) {
        f.render_widget(
            CardView { card: &cards[idx], selected: idx == app.state.selected_card },
            slot,
        );
    }
}

/// Lay cards out in a grid, scrolled by whole rows so the selection stays visible.
fn card_slots(area: Rect, count: usize, selected: usize) -> Vec<(usize, Rect)> {
    if count == 0 || area.width == 0 || area.height < CARD_HEIGHT {
        return Vec::new();
    }
    let cols = (area.width / MIN_CARD_WIDTH).max(1) as usize;
    let rows = (area.height / CARD_HEIGHT) as usize;
    let col_width = area.width / cols as u16;

    let selected_row = selected.min(count - 1) / cols;
    let first_row = selected_row.saturating_sub(rows - 1);
    let first = first_row * cols;

    (first..count)
        .take(rows * cols)
        .map(|idx| {
            let offset = idx - first;
            let (row, col) = (offset / cols, offset % cols);
            let rect = Rect::new(
                area.x + col as u16 * col_width,
                area.y + row as u16 * CARD_HEIGHT,
                col_width,
                CARD_HEIGHT,
            );
            (idx, rect)
        })
        .collect()
}

fn draw_message(f: &mut Frame, area: Rect, msg: &str, color: Color) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::White);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::Gray)), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
