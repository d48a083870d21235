use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::canvas::Canvas;
use super::surface::{Rgb, Surface};
use crate::game::Difficulty;
use crate::rating::RatingEntry;

/// Score, player and difficulty shown above the grid
#[derive(Debug, Clone, Copy)]
pub struct Hud<'a> {
    pub score: u32,
    pub player_name: &'a str,
    pub difficulty: &'a str,
}

/// Contents of the start dialog
#[derive(Debug, Clone, Copy)]
pub struct DialogView<'a> {
    pub name: &'a str,
    pub difficulties: &'a [Difficulty],
    pub selected: usize,
}

/// Which control hints to show in the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls {
    Dialog,
    Idle,
    Running,
    RoundOver,
}

/// Everything needed to draw one frame
pub struct View<'a> {
    pub hud: Hud<'a>,
    pub canvas: &'a Canvas,
    pub cell_size: u32,
    pub leaderboard: &'a [RatingEntry],
    pub controls: Controls,
    pub dialog: Option<DialogView<'a>>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &View) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_hud(&view.hud), chunks[0]);

        let cells = u16::try_from(cell_rows(view.canvas, view.cell_size)).unwrap_or(u16::MAX);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(cells.saturating_mul(2).saturating_add(2)),
                Constraint::Min(24),
            ])
            .split(chunks[1]);

        frame.render_widget(self.render_grid(view.canvas, view.cell_size), body[0]);
        frame.render_widget(self.render_leaderboard(view.leaderboard, &view.hud), body[1]);

        if !view.canvas.texts().is_empty() {
            let overlay = self.render_overlay(view.canvas);
            let area = centered_rect(body[0], 24, view.canvas.texts().len() as u16 + 2);
            frame.render_widget(Clear, area);
            frame.render_widget(overlay, area);
        }

        if let Some(dialog) = view.dialog {
            let area = centered_rect(frame.area(), 40, dialog.difficulties.len() as u16 + 6);
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_dialog(&dialog), area);
        }

        frame.render_widget(self.render_controls(view.controls), chunks[2]);
    }

    fn render_hud(&self, hud: &Hud) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(hud.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Player: ", label),
            Span::styled(hud.player_name.to_string(), value),
            Span::raw("    "),
            Span::styled("Difficulty: ", label),
            Span::styled(hud.difficulty.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_grid(&self, canvas: &Canvas, cell_size: u32) -> Paragraph<'_> {
        Paragraph::new(canvas_lines(canvas, cell_size)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_leaderboard(&self, entries: &[RatingEntry], hud: &Hud) -> Paragraph<'_> {
        let lines: Vec<Line> = if entries.is_empty() {
            vec![Line::from(Span::styled(
                "No results yet",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            entries
                .iter()
                .enumerate()
                .map(|(rank, entry)| {
                    Line::from(vec![
                        Span::styled(format!("{:>2}. ", rank + 1), Style::default().fg(Color::Gray)),
                        Span::raw(format!("{}: ", entry.name)),
                        Span::styled(
                            entry.score.to_string(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ])
                })
                .collect()
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Rating: {} ", hud.difficulty)),
        )
    }

    fn render_overlay(&self, canvas: &Canvas) -> Paragraph<'_> {
        let mut runs: Vec<_> = canvas.texts().iter().collect();
        runs.sort_by_key(|run| run.y);

        let lines: Vec<Line> = runs
            .into_iter()
            .map(|run| {
                Line::from(Span::styled(
                    run.text.clone(),
                    Style::default()
                        .fg(to_color(run.color))
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_dialog(&self, dialog: &DialogView) -> Paragraph<'_> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Name: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}_", dialog.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        for (i, difficulty) in dialog.difficulties.iter().enumerate() {
            let text = format!("{} ({} ms)", difficulty.label, difficulty.tick_ms);
            let line = if i == dialog.selected {
                Line::from(Span::styled(
                    format!("> {text}"),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::raw(format!("  {text}")))
            };
            lines.push(line);
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" New game "),
        )
    }

    fn render_controls(&self, controls: Controls) -> Paragraph<'_> {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
        let spans = match controls {
            Controls::Dialog => vec![
                Span::raw("Type a name | "),
                key("←→"),
                Span::raw(" difficulty | "),
                key("Enter"),
                Span::raw(" start | "),
                key("Esc"),
                Span::raw(" close"),
            ],
            Controls::Idle => vec![key("N"), Span::raw(" new game | "), key("Q"), Span::raw(" quit")],
            Controls::Running => vec![
                key("↑↓←→"),
                Span::raw(" or "),
                key("WASD"),
                Span::raw(" to move | "),
                key("E"),
                Span::raw(" end game | "),
                key("Q"),
                Span::raw(" quit"),
            ],
            Controls::RoundOver => vec![
                key("R"),
                Span::raw(" start over | "),
                key("Q"),
                Span::raw(" quit"),
            ],
        };

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn cell_rows(canvas: &Canvas, cell_size: u32) -> u32 {
    canvas.height() / cell_size.max(1)
}

/// Sample the canvas once per cell, two terminal columns per cell.
///
/// A cell whose top-left pixel matches its center is drawn as a full block,
/// otherwise (circles) as a dot.
pub fn canvas_lines(canvas: &Canvas, cell_size: u32) -> Vec<Line<'static>> {
    let size = cell_size.max(1) as i32;
    let center = (size - 1) / 2;
    let rows = cell_rows(canvas, cell_size) as i32;
    let cols = (canvas.width() / cell_size.max(1)) as i32;

    (0..rows)
        .map(|row| {
            let spans: Vec<Span> = (0..cols)
                .map(|col| {
                    let (x, y) = (col * size, row * size);
                    match canvas.pixel(x + center, y + center) {
                        None => Span::raw("  "),
                        Some(color) => {
                            let glyph = if canvas.pixel(x, y) == Some(color) {
                                "██"
                            } else {
                                "● "
                            };
                            Span::styled(glyph, Style::default().fg(to_color(color)))
                        }
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::palette;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_canvas_lines_sample_cells() {
        let mut canvas = Canvas::new(30, 20);
        canvas.fill_rect(0, 0, 9, 9, palette::SNAKE);
        canvas.fill_circle(15, 5, 4, palette::FOOD);

        let lines = canvas_lines(&canvas, 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 3);
        assert_eq!(lines[0].spans[0].content, "██");
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Rgb(0x2e, 0x8b, 0x57)));
        assert_eq!(lines[0].spans[1].content, "● ");
        assert_eq!(lines[0].spans[2].content, "  ");
        assert_eq!(lines[1].spans[0].content, "  ");
    }

    #[test]
    fn test_render_tall_canvas_does_not_overflow_layout() {
        let canvas = Canvas::new(2, 66_000);
        let view = View {
            hud: Hud {
                score: 0,
                player_name: "Ann",
                difficulty: "Easy",
            },
            canvas: &canvas,
            cell_size: 2,
            leaderboard: &[],
            controls: Controls::Idle,
            dialog: None,
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &view))
            .unwrap();
    }

    #[test]
    fn test_centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_rect(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered_rect(area, 40, 20), area);
    }
}
