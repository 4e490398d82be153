use crate::game::{Board, Token, TurnController};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Cyan,
    Color::Green,
    Color::Magenta,
    Color::Blue,
];

/// Display color for a token, by its place in turn order
pub fn token_color(board: &Board, token: Token) -> Color {
    board
        .tokens()
        .iter()
        .position(|&t| t == token)
        .map(|i| PALETTE[i % PALETTE.len()])
        .unwrap_or(Color::White)
}

pub fn render(
    frame: &mut Frame,
    game: &TurnController,
    selected_column: usize,
    message: &Option<String>,
) {
    let board = game.board();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                     // Header
            Constraint::Min(board_rows(board.height())), // Board
            Constraint::Length(3),                     // Message
            Constraint::Length(3),                     // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    render_board(frame, board, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, board.width(), chunks[3]);
}

/// Board rows plus four lines of labels and frame
fn board_rows(height: usize) -> u16 {
    u16::try_from(height).unwrap_or(u16::MAX).saturating_add(4)
}

/// Digit keys reach at most columns 0-9
fn controls_text(width: usize) -> String {
    let drop = if width > 10 {
        "Enter: Drop  |  0-9: Drop (first 10 columns)".to_string()
    } else {
        format!("Enter or 0-{}: Drop", width.saturating_sub(1))
    };
    format!("←/→: Move  |  {drop}  |  R: Play again  |  Q: Quit")
}

fn render_header(frame: &mut Frame, game: &TurnController, area: ratatui::layout::Rect) {
    let board = game.board();
    let (status, color) = match game.active_player() {
        Some(player) => (
            format!("{} {}'s turn", player.token(), player.name()),
            token_color(board, player.token()),
        ),
        None => ("Game Over".to_string(), Color::White),
    };

    let title = format!(
        "Connect {}  ({}x{})",
        board.win_size(),
        board.width(),
        board.height()
    );
    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Board,
    selected_column: usize,
    area: ratatui::layout::Rect,
) {
    let width = board.width();
    let winning: Vec<(usize, usize)> = board
        .winning_line()
        .map(|line| line.cells().collect())
        .unwrap_or_default();
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..width {
        let label = format!("{:^3}", col);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(width * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    // Top row first; row 0 is the bottom of the board
    for row in (0..board.height()).rev() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..width {
            let span = match board.get(col, row) {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(token) => {
                    let mut style = Style::default().fg(token_color(board, token));
                    if winning.contains(&(col, row)) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Span::styled(format!(" {token} "), style)
                }
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..width {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, width: usize, area: ratatui::layout::Rect) {
    let line = Line::from(controls_text(width));

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
