use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Rotary encoder and keys",
        &[
            ("  j/↓     ", "Next line"),
            ("  k/↑     ", "Previous line"),
            ("  Enter   ", "Activate selected line"),
            ("  Esc     ", "Cancel menu"),
            ("  PgUp    ", "Toolbar: previous page"),
            ("  PgDn    ", "Toolbar: next page"),
            ("  S-PgDn  ", "Toolbar: long press"),
        ],
    ),
    (
        "Touch panel",
        &[
            ("  Click   ", "Tap (outside a line dismisses)"),
            ("  Drag    ", "Slide to scroll"),
        ],
    ),
    (
        "Demo",
        &[
            ("  m       ", "Open the menu"),
            ("  ?       ", "Toggle this help"),
            ("  q       ", "Quit"),
        ],
    ),
];

/// Render the help overlay.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard and Mouse",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (section, keys) in BINDINGS {
        help_text.push(Line::from(vec![Span::styled(
            *section,
            Style::default().add_modifier(Modifier::BOLD),
        )]));
        for (key, action) in *keys {
            help_text.push(Line::from(vec![
                Span::styled(*key, Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    help_text.push(Line::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, popup_area);
}

/// Create a centered rectangle with the given percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
