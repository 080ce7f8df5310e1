use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn render_main(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // 4-part layout: header bar | tab bar | log body | footer bar
    let chunks = Layout::vertical([
        Constraint::Length(1), // header bar
        Constraint::Length(1), // tab bar
        Constraint::Min(3),    // log body
        Constraint::Length(1), // footer bar
    ])
    .split(area);

    // ── Header bar ────────────────────────────────────────────────────────────
    let clock = chrono::Local::now().format("%H:%M:%S");
    let header_text = format!(
        " logtab — {} file(s) in {}  {}",
        app.views.len(),
        app.dir.display(),
        clock,
    );
    let header = Paragraph::new(Line::from(Span::styled(
        header_text,
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(Color::DarkGray));
    f.render_widget(header, chunks[0]);

    // ── Tab bar ───────────────────────────────────────────────────────────────
    let titles: Vec<Line> = app.views.iter().map(|v| Line::from(tab_title(v.dirty, &v.name))).collect();
    if !titles.is_empty() {
        let tabs = Tabs::new(titles)
            .select(app.selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .divider("│");
        f.render_widget(tabs, chunks[1]);
    }

    // ── Log body ──────────────────────────────────────────────────────────────
    let body = chunks[2];
    app.viewport_height = body.height.saturating_sub(2);

    let block = Block::default().borders(Borders::ALL);
    if let Some(view) = app.selected_view() {
        let inner = block.inner(body);
        let visible = inner.height as usize;
        let total = view.lines.len();
        let max_start = total.saturating_sub(visible);
        let start = if view.auto_scroll {
            max_start
        } else {
            view.scroll.min(max_start)
        };
        let end = (start + visible).min(total);

        let lines: Vec<Line> = view.lines[start..end]
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();

        let title = format!(" {} ", view.name);
        let para = Paragraph::new(lines).block(block.title(title));
        f.render_widget(para, body);

        // Scroll position indicator, top-right of the body.
        if total > visible && body.width > 12 {
            let indicator = format!("[{}/{}]", start + 1, max_start + 1);
            let x = body.right().saturating_sub(indicator.len() as u16 + 2);
            let rect = ratatui::layout::Rect {
                x,
                y: body.top(),
                width: indicator.len() as u16,
                height: 1,
            };
            let para = Paragraph::new(indicator).style(Style::default().fg(Color::DarkGray));
            f.render_widget(para, rect);
        }
    } else {
        let empty = Paragraph::new("\nNo .log files here yet.\n\nFiles appear as soon as they are created.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, body);
    }

    // ── Footer bar ────────────────────────────────────────────────────────────
    let follow = app
        .selected_view()
        .map(|v| v.auto_scroll)
        .unwrap_or(false);
    let footer_text = if follow {
        " [Tab/←→] switch  [f] files  [j/k] scroll  [g] top  [q] quit  following"
    } else {
        " [Tab/←→] switch  [f] files  [j/k] scroll  [G] follow  [q] quit"
    };
    let footer = Paragraph::new(Line::from(footer_text))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    f.render_widget(footer, chunks[3]);
}

/// Tab label with the unread marker, mirroring the classic asterisk on a
/// window title.
fn tab_title(dirty: bool, name: &str) -> String {
    if dirty {
        format!("*{name}")
    } else {
        name.to_string()
    }
}
