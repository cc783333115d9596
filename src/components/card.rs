use crate::components::games::GameCard;
use chrono::Local;
use tui::buffer::Buffer;
use tui::layout::{Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap};

/// Rows a card needs including its border. Five detail rows at most, the
/// rest goes to the link.
pub const CARD_HEIGHT: u16 = 9;

pub struct CardView<'a> {
    pub card: &'a GameCard,
    pub selected: bool,
}

impl Widget for CardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let card = self.card;
        let border_color = if self.selected { Color::Yellow } else { Color::DarkGray };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} @ {} ", card.away, card.home));
        if let Some(tipoff) = card.tipoff {
            block = block.title_bottom(format!(
                " {} ",
                tipoff.with_timezone(&Local).format("%a %H:%M")
            ));
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let details = detail_lines(card);
        let [details_area, link_area] = Layout::vertical([
            Constraint::Length(details.len() as u16),
            Constraint::Fill(1),
        ])
        .areas(inner);

        // Detail rows are clipped, never wrapped, so long logo URLs can't push
        // the badges or link out of the card.
        Paragraph::new(details).render(details_area, buf);
        Paragraph::new(link_line(card))
            .wrap(Wrap { trim: true })
            .render(link_area, buf);
    }
}

fn detail_lines(card: &GameCard) -> Vec<Line<'_>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(card.away.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", card.away_logo), dim),
        ]),
        Line::from(vec![
            Span::styled(card.home.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", card.home_logo), dim),
        ]),
        Line::from(vec![
            Span::raw(card.round_text.as_str()),
            Span::styled(format!("  {}", card.game_type), Style::default().fg(Color::Cyan)),
        ]),
    ];

    if let Some(series) = card.series.as_deref() {
        lines.push(Line::from(Span::styled(series, Style::default().fg(Color::Gray))));
    }

    if !card.badges.is_empty() {
        let mut spans = Vec::with_capacity(card.badges.len() * 2);
        for label in &card.badges {
            spans.push(Span::styled(
                format!("[{label}]"),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines
}

fn link_line(card: &GameCard) -> Line<'_> {
    Line::from(Span::styled(
        card.link.as_str(),
        Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
    ))
}
