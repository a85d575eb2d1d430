use crate::tui::theme::*;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use wordbank_core::VocabEntry;

pub enum RightPane<'a> {
    Idle,
    Card {
        entry: &'a VocabEntry,
        face_up: bool,
        position: (usize, usize),
        progress: f32,
    },
    Empty(&'a str),
}

pub fn draw_ui(f: &mut Frame, area: Rect, categories: &[String], sel: usize, right: RightPane) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);
    draw_categories(f, chunks[0], categories, sel);
    draw_right(f, chunks[1], right);

    let foot = Paragraph::new(Line::from(vec![
        Span::raw(" ↑/k ↓/j select  "),
        Span::raw(" Enter start  "),
        Span::raw(" space flip  "),
        Span::raw(" n/→ p/← move  "),
        Span::raw(" l learned  "),
        Span::raw(" Esc back  "),
        Span::raw(" q quit "),
    ]))
    .style(footer_style())
    .block(Block::default().borders(Borders::TOP));
    let fh = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };
    f.render_widget(foot, fh);
}

fn draw_categories(f: &mut Frame, area: Rect, categories: &[String], sel: usize) {
    let items: Vec<_> = categories
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let s = if i == sel {
                Line::from(name.clone()).style(selected_style())
            } else {
                Line::from(name.clone())
            };
            ListItem::new(s)
        })
        .collect();

    let title = Paragraph::new(Line::from(vec![Span::raw("Categories").style(title_style())]));
    let th = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    f.render_widget(title, th);

    let list_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    f.render_widget(list, list_area);
}

fn draw_right(f: &mut Frame, area: Rect, pane: RightPane) {
    match pane {
        RightPane::Idle => {
            let p = Paragraph::new("Press Enter to study the selected category.")
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Study").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Empty(msg) => {
            let p = Paragraph::new(msg)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Study").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Card { entry, face_up, position, progress } => {
            let title = Block::default()
                .title(format!("Study [{}/{}]", position.0, position.1))
                .borders(Borders::ALL);
            let inner = Rect {
                x: area.x + 1,
                y: area.y + 1,
                width: area.width.saturating_sub(2),
                height: area.height.saturating_sub(2),
            };
            f.render_widget(title, area);

            let word = Paragraph::new(Line::from(vec![
                Span::raw("word: ").style(title_style()),
                Span::raw(&entry.word),
            ]))
            .wrap(Wrap { trim: true });
            f.render_widget(word, inner);

            if face_up {
                let ans_y = inner.y + 2;
                let ans_area = Rect {
                    x: inner.x,
                    y: ans_y,
                    width: inner.width,
                    height: inner.height.saturating_sub(2),
                };
                let text = vec![
                    Line::from(vec![
                        Span::raw("meaning: ").style(title_style()),
                        Span::raw(&entry.meaning),
                    ]),
                    Line::from(vec![
                        Span::raw("topic: ").style(hint_style()),
                        Span::raw(&entry.topic),
                    ]),
                ];
                let a = Paragraph::new(text).wrap(Wrap { trim: true });
                f.render_widget(a, ans_area);
            }

            let prog = Paragraph::new(Line::from(vec![Span::raw(format!(
                "learned {progress:.0}%"
            ))
            .style(learned_style())]));
            let ph = Rect {
                x: inner.x,
                y: inner.y + inner.height.saturating_sub(1),
                width: inner.width,
                height: 1,
            };
            f.render_widget(prog, ph);
        }
    }
}
