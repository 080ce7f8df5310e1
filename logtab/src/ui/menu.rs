use crate::app::App;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem},
    Frame,
};

/// Centered popup listing every tracked file; Enter jumps to its tab.
pub fn render_menu(f: &mut Frame, app: &mut App) {
    let area = popup_area(f.area(), 40, app.views.len() as u16 + 2);

    let items: Vec<ListItem> = app
        .views
        .iter()
        .map(|v| {
            let marker = if v.dirty { "*" } else { " " };
            ListItem::new(Line::from(format!("{marker} {}", v.name)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Files ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::REVERSED),
        )
        .highlight_symbol("▶ ");

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut app.menu_state);
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    area
}
