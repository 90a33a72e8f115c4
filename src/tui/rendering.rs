use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::layout::{ChatLayout, centered_box};
use super::timestamps::format_summary_date;
use crate::models::{ConversationSummary, Message, Role};

const MUTED: Color = Color::DarkGray;

/// Everything the chat screen needs to draw one frame. The app assembles this
/// from controller/fetcher state; rendering never mutates anything.
pub struct ChatView<'a> {
    pub summaries: &'a [ConversationSummary],
    pub selected_idx: usize,
    pub sidebar_focused: bool,
    pub sidebar_loading: bool,
    pub sidebar_error: Option<&'a str>,
    pub has_more: bool,
    pub current_id: Option<&'a str>,
    pub topic: Option<&'a str>,
    pub stance: Option<&'a str>,
    pub messages: &'a [Message],
    pub input: &'a str,
    pub error: Option<&'a str>,
    pub thinking: bool,
}

/// Render the chat screen
pub fn render_chat(frame: &mut Frame, view: &ChatView) {
    let layout = ChatLayout::new(frame.area());

    render_sidebar(frame, layout.sidebar_area, view);
    render_header(frame, layout.header_area, view);
    render_messages(frame, layout.messages_area, view);
    render_input(frame, layout.input_area, view);
    render_status_bar(frame, layout.status_area, view);
}

fn render_sidebar(frame: &mut Frame, area: Rect, view: &ChatView) {
    let border_style = if view.sidebar_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(MUTED)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style).title(" History ");

    if let Some(error) = view.sidebar_error {
        let paragraph = Paragraph::new(format!("{error}\n\nCtrl+R to retry"))
            .style(Style::default().fg(Color::Red))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    if view.summaries.is_empty() {
        let text = if view.sidebar_loading {
            "Loading..."
        } else {
            "No conversations yet\nStart a new chat to begin"
        };
        let paragraph =
            Paragraph::new(text).style(Style::default().fg(MUTED)).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = view
        .summaries
        .iter()
        .enumerate()
        .map(|(idx, summary)| {
            let is_current = view.current_id == Some(summary.id.as_str());
            let marker = if is_current { "*" } else { " " };
            let title: String = summary.title.chars().take(28).collect();
            let content = format!(
                "{} {} | {} ({} msgs)",
                marker,
                format_summary_date(&summary.updated_at),
                title,
                summary.message_count,
            );

            let style = if view.sidebar_focused && idx == view.selected_idx {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(MUTED)
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn render_header(frame: &mut Frame, area: Rect, view: &ChatView) {
    let mut spans = vec![Span::styled("Debate Chatbot", Style::default().add_modifier(Modifier::BOLD))];
    if let Some(topic) = view.topic {
        spans.push(Span::styled("  Topic: ", Style::default().fg(MUTED)));
        spans.push(Span::raw(topic));
    }
    if let Some(stance) = view.stance {
        let stance_color = if stance == "PRO" { Color::Green } else { Color::Yellow };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(stance, Style::default().fg(stance_color).add_modifier(Modifier::BOLD)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_messages(frame: &mut Frame, area: Rect, view: &ChatView) {
    let block =
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)).title(" Debate ");
    let inner_height = area.height.saturating_sub(2);

    if view.messages.is_empty() && !view.thinking {
        let paragraph = Paragraph::new("Start a debate! Send your first message to begin.")
            .style(Style::default().fg(MUTED))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for message in view.messages {
        let (name, color) = match message.role {
            Role::User => ("You", Color::Cyan),
            Role::Bot => ("Debate Bot", Color::Green),
        };
        lines.push(Line::from(Span::styled(
            name,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        for text_line in message.text.lines() {
            lines.push(Line::from(text_line.to_string()));
        }
        lines.push(Line::from(""));
    }
    if view.thinking {
        lines.push(Line::from(Span::styled("Bot is thinking...", Style::default().fg(MUTED))));
    }

    // Keep the tail visible: scroll so the newest lines fit the pane
    let scroll = (lines.len() as u16).saturating_sub(inner_height);
    let paragraph =
        Paragraph::new(Text::from(lines)).block(block).wrap(Wrap { trim: false }).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, area: Rect, view: &ChatView) {
    let border_style = if view.sidebar_focused {
        Style::default().fg(MUTED)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let paragraph = Paragraph::new(view.input).block(
        Block::default().borders(Borders::ALL).border_style(border_style).title(" Your argument "),
    );
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, view: &ChatView) {
    let (text, style) = if let Some(error) = view.error {
        (error.to_string(), Style::default().fg(Color::Red))
    } else if view.thinking {
        ("Sending...".to_string(), Style::default().fg(MUTED))
    } else {
        let mut hints = String::from("Enter send | Tab sidebar | Ctrl+N new | Ctrl+R refresh");
        if view.has_more {
            hints.push_str(" | Ctrl+L more");
        }
        hints.push_str(" | Ctrl+C quit");
        (hints, Style::default().fg(MUTED))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Render the login screen
pub fn render_login(frame: &mut Frame, input: &str, error: Option<&str>, pending: bool) {
    let area = centered_box(frame.area(), 60, 9);
    frame.render_widget(Clear, area);

    let masked: String = "*".repeat(input.chars().count());
    let status = if pending {
        Line::from(Span::styled("Authenticating...", Style::default().fg(MUTED)))
    } else if let Some(error) = error {
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red)))
    } else {
        Line::from(Span::styled("Enter to login | Esc to quit", Style::default().fg(MUTED)))
    };

    let lines = vec![
        Line::from("Enter your API key to access the Debate Chatbot"),
        Line::from(""),
        Line::from(vec![Span::styled("API key: ", Style::default().fg(MUTED)), Span::raw(masked)]),
        Line::from(""),
        status,
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" API Key Authentication "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
