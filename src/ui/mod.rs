use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;

use crate::app::{App, InputMode, QrOverlay, StatusLevel};
use crate::domain::account::{AddressSegments, Role};

/// Raw units per Nano
const RAW_PER_NANO: u128 = 1_000_000_000_000_000_000_000_000_000_000;

const HIGHLIGHT: Color = Color::Rgb(24, 144, 255);
const RECEIVE: Color = Color::LightGreen;

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    draw_details(f, areas.details, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if let Some(qr) = app.qr.as_ref() {
        draw_qr_popup(f, areas.size, qr);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let header = &app.header;
    let mut lines = Vec::new();

    if let Some(title) = header.title() {
        let color = match header.role() {
            Role::PrincipalRepresentative => Color::LightCyan,
            _ => Color::Cyan,
        };
        lines.push(Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(alias) = header.alias() {
        lines.push(Line::from(Span::styled(
            alias.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
    }

    let mut address_line = vec![Span::styled("◈ ", Style::default().fg(Color::DarkGray))];
    address_line.extend(address_spans(header.segments()));
    lines.push(Line::from(address_line));

    let copy_style = if header.is_copied() {
        Style::default().fg(RECEIVE)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let copy_icon = if header.is_copied() { "✓" } else { "c" };
    lines.push(Line::from(vec![
        Span::styled(format!("[{copy_icon}] {}", header.copy_label()), copy_style),
        Span::raw("  "),
        Span::styled("[v] QR code", Style::default().fg(Color::DarkGray)),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Account "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Dim prefix and middle, highlight the two distinguishing runs.
pub fn address_spans(segments: &AddressSegments) -> Vec<Span<'static>> {
    let dim = Style::default().fg(Color::Gray);
    let bright = Style::default().fg(HIGHLIGHT);
    vec![
        Span::styled(segments.prefix.clone(), dim),
        Span::styled(segments.first_unique.clone(), bright),
        Span::styled(segments.middle.clone(), dim),
        Span::styled(segments.last_unique.clone(), bright),
    ]
}

fn draw_details(f: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::DarkGray);
    let classification = app.header.classification();

    let representatives = if app.is_loading() {
        "loading…".to_string()
    } else {
        format!("{} online", app.sources.representatives.records.len())
    };
    let min_weight = app
        .sources
        .min_weight()
        .map(format_nano)
        .unwrap_or_else(|| "--".to_string());
    let weight = classification
        .representative
        .as_ref()
        .map(|rep| format_nano(rep.weight))
        .unwrap_or_else(|| "--".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled("Voting weight     ", label),
            Span::raw(weight),
        ]),
        Line::from(vec![
            Span::styled("Principal minimum ", label),
            Span::raw(min_weight),
        ]),
        Line::from(vec![
            Span::styled("Representatives   ", label),
            Span::raw(representatives),
        ]),
        Line::from(vec![
            Span::styled("Known accounts    ", label),
            Span::raw(app.sources.known_accounts.len().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Node              ", label),
            Span::raw(app.endpoint.clone()),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let role = match app.header.role() {
        Role::Plain => "account",
        Role::Representative => "representative",
        Role::PrincipalRepresentative => "principal",
    };
    let data = if app.is_loading() { "loading" } else { "ready" };
    let line = Line::from(vec![
        Span::styled("Role ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{role}  ")),
        Span::styled("Data ", Style::default().fg(Color::DarkGray)),
        Span::raw(data),
    ]);

    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("account", "Open account: account <address>"),
        ("refresh", "Reload representatives and registry"),
        ("qr", "Show QR code"),
        ("copy", "Copy address"),
        ("alias", "Set local alias: alias <name>"),
        ("unalias", "Remove local alias"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input);
            let hint_text = hint.unwrap_or("account | refresh | qr | copy | alias | quit");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.as_str()),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                    StatusLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text, Style::default().fg(color)),
                ])
            } else {
                Line::from(Span::styled(
                    "c copy  v qr  r refresh  : command  q quit",
                    Style::default().fg(Color::DarkGray),
                ))
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn draw_qr_popup(f: &mut Frame, area: Rect, qr: &QrOverlay) {
    let height = qr.code.lines().count() as u16 + 3;
    let width = qr
        .code
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(qr.address.chars().count()) as u16
        + 2;
    let popup_area = fixed_centered_rect(width, height, area);
    f.render_widget(Clear, popup_area);

    let mut text = Text::raw(qr.code.clone());
    text.lines.push(Line::from(Span::styled(
        qr.address.clone(),
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" QR code (Esc to close) "),
        )
        .alignment(Alignment::Center);
    f.render_widget(paragraph, popup_area);
}

fn fixed_centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

/// Raw amount as Nano with two decimals, truncated
pub fn format_nano(raw: u128) -> String {
    let whole = raw / RAW_PER_NANO;
    let cents = (raw % RAW_PER_NANO) / (RAW_PER_NANO / 100);
    format!("{}.{:02} Ӿ", group_thousands(whole), cents)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
