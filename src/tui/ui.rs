use super::app::App;
use crate::api::{self, Profile};
use crate::fetch::ClientKind;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header (single line, no border)
            Constraint::Length(1), // Error line
            Constraint::Min(10),   // Result panes
            Constraint::Length(1), // Footer (single line, no border)
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_error(frame, app, chunks[1]);
    render_panes(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let filter = app.session().filter();

    let status = if app.session().is_busy() {
        Span::styled(
            " FETCHING ",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        )
    } else {
        Span::styled(" IDLE ", Style::default().bg(Color::Green).fg(Color::Black))
    };

    let country_label = match api::country_name(&filter.country) {
        Some(name) => format!("{} ({})", filter.country, name),
        None => filter.country.clone(),
    };

    let header = Line::from(vec![
        Span::styled(
            "duofetch",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        status,
        Span::raw(format!(
            " gender: {} │ country: {}",
            filter.gender.label(),
            country_label
        )),
    ]);

    frame.render_widget(Paragraph::new(header), area);
}

fn render_error(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.session().error() {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_panes(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_result_pane(frame, app, ClientKind::Reqwest, chunks[0]);
    render_result_pane(frame, app, ClientKind::Ureq, chunks[1]);
}

fn render_result_pane(frame: &mut Frame, app: &App, kind: ClientKind, area: Rect) {
    let border_color = if app.focus() == kind {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let title = match app.session().outcome(kind) {
        Some(outcome) => format!(" {} ({}) ", kind.label(), outcome.elapsed_label()),
        None => format!(" {} ", kind.label()),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let Some(outcome) = app.session().outcome(kind) else {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No results...",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let visible = (area.height.saturating_sub(2) as usize).max(1);
    let scroll = app
        .scroll(kind)
        .min(outcome.profiles.len().saturating_sub(visible));

    let lines: Vec<Line> = outcome
        .profiles
        .iter()
        .skip(scroll)
        .take(visible)
        .map(profile_line)
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One display row per profile, in response order.
fn profile_line(profile: &Profile) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!(" {:<24}", profile.name.full())),
        Span::styled(
            format!("{:<28}", profile.email),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(
            "{:>3}  {}, {}",
            profile.dob.age, profile.location.city, profile.location.country
        )),
    ])
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    // Trigger hints dim out while a cycle is in flight.
    let trigger_style = if app.session().is_busy() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let spans = vec![
        Span::styled(" q ", Style::default().bg(Color::DarkGray)),
        Span::raw(" quit "),
        Span::styled(" r ", Style::default().bg(Color::DarkGray)),
        Span::styled(" reqwest ", trigger_style),
        Span::styled(" u ", Style::default().bg(Color::DarkGray)),
        Span::styled(" ureq ", trigger_style),
        Span::styled(" b ", Style::default().bg(Color::DarkGray)),
        Span::styled(" both ", trigger_style),
        Span::styled(" g ", Style::default().bg(Color::DarkGray)),
        Span::raw(" gender "),
        Span::styled(" c/C ", Style::default().bg(Color::DarkGray)),
        Span::raw(" country "),
        Span::styled(" Tab ", Style::default().bg(Color::DarkGray)),
        Span::raw(" focus "),
        Span::styled(" j/k ", Style::default().bg(Color::DarkGray)),
        Span::raw(" scroll "),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
