use std::io::{self, Stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::warn;

use fintel_agent::{
    AgentConfig, AnalysisContext, ChatRecord, InsightCards, Sender, history, local_reply, remote,
    templates,
};

const REVEAL_TICK: Duration = Duration::from_millis(30);

/// Non-blocking timed reveal of an assistant reply: a fixed chunk of
/// characters is shown per tick, ~40 steps for the whole text. Input is
/// disabled while one is in flight; a reveal cannot be aborted (known
/// gap inherited from the event model this implements).
struct Reveal {
    full: String,
    shown: usize,
    chunk: usize,
    last_tick: Instant,
}

impl Reveal {
    fn new(full: String) -> Self {
        let chunk = (full.chars().count() / 40).max(5);
        Self {
            full,
            shown: 0,
            chunk,
            last_tick: Instant::now(),
        }
    }

    /// Advance if a tick has elapsed; true when fully revealed.
    fn tick(&mut self) -> bool {
        if self.last_tick.elapsed() >= REVEAL_TICK {
            self.shown = (self.shown + self.chunk).min(self.full.chars().count());
            self.last_tick = Instant::now();
        }
        self.shown >= self.full.chars().count()
    }

    fn visible(&self) -> String {
        self.full.chars().take(self.shown).collect()
    }
}

pub fn run_chat(config: &AgentConfig, ctx: &AnalysisContext, history_path: &Path) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chat_loop(&mut terminal, config, ctx, history_path);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn chat_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &AgentConfig,
    ctx: &AnalysisContext,
    history_path: &Path,
) -> Result<()> {
    let mut transcript = history::load_history(history_path);
    if transcript.is_empty() {
        transcript.push(ChatRecord::bot(templates::GREETING));
    }

    let mut input = String::new();
    let mut reveal: Option<Reveal> = None;
    let mut show_help = true;

    loop {
        let reveal_done = reveal.as_mut().is_some_and(Reveal::tick);
        if reveal_done {
            if let Some(done) = reveal.take() {
                transcript.push(ChatRecord::bot(done.full));
                // one completed exchange; persist synchronously
                if let Err(e) = history::save_history(history_path, &transcript) {
                    warn!("failed to save transcript: {e:#}");
                }
            }
        }

        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(5),
                    Constraint::Length(3),
                ])
                .split(size);

            let splash = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "fintel",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "type /help for commands, Esc to quit",
                    Style::default().fg(Color::Gray),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(splash, chunks[0]);

            let mut lines: Vec<Line> = Vec::new();
            if show_help {
                lines.push(Line::from(Span::styled(
                    "Commands: /help /insights /regenerate /clear | Enter sends, Esc quits",
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::raw(""));
            }

            for record in &transcript {
                let (tag, color) = match record.sender {
                    Sender::User => ("you", Color::Cyan),
                    Sender::Bot => ("fintel", Color::Magenta),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{tag}: "), Style::default().fg(color)),
                    Span::raw(record.text.clone()),
                ]));
                lines.push(Line::raw(""));
            }

            if let Some(r) = &reveal {
                lines.push(Line::from(vec![
                    Span::styled("fintel: ", Style::default().fg(Color::Magenta)),
                    Span::raw(r.visible()),
                ]));
            }

            let history_widget = Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL).title("conversation"))
                .wrap(Wrap { trim: false });
            f.render_widget(history_widget, chunks[1]);

            let input_title = if reveal.is_some() { "thinking…" } else { "message" };
            let input_widget = Paragraph::new(input.as_str())
                .block(Block::default().borders(Borders::ALL).title(input_title))
                .style(Style::default().fg(Color::White));
            f.render_widget(input_widget, chunks[2]);
        })?;

        if event::poll(Duration::from_millis(30))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Esc {
                    break;
                }
                // controls disabled while a reveal is in flight
                if reveal.is_some() {
                    continue;
                }
                match key.code {
                    KeyCode::Enter => {
                        let trimmed = input.trim().to_string();
                        input.clear();
                        if trimmed.is_empty() {
                            continue;
                        }
                        if let Some(cmd) = trimmed.strip_prefix('/') {
                            match handle_command(cmd, config, ctx, &mut transcript, &mut show_help)
                            {
                                CommandOutcome::Reveal(text) => reveal = Some(Reveal::new(text)),
                                CommandOutcome::Cleared => {
                                    if let Err(e) = history::save_history(history_path, &transcript)
                                    {
                                        warn!("failed to save transcript: {e:#}");
                                    }
                                }
                                CommandOutcome::Nothing => {}
                            }
                        } else {
                            transcript.push(ChatRecord::user(trimmed.clone()));
                            reveal = Some(Reveal::new(answer(config, &trimmed, ctx)));
                        }
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => {
                        input.push(c);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

enum CommandOutcome {
    Reveal(String),
    Cleared,
    Nothing,
}

fn handle_command(
    cmd: &str,
    config: &AgentConfig,
    ctx: &AnalysisContext,
    transcript: &mut Vec<ChatRecord>,
    show_help: &mut bool,
) -> CommandOutcome {
    match cmd.trim() {
        "help" => {
            *show_help = !*show_help;
            CommandOutcome::Reveal(
                "Commands:\n\
                 - /help       toggle this hint\n\
                 - /insights   spending trend, top category, budget health, recommendation\n\
                 - /regenerate answer the last question again\n\
                 - /clear      reset the conversation"
                    .to_string(),
            )
        }
        "insights" => {
            let cards = InsightCards::build(ctx);
            CommandOutcome::Reveal(format!(
                "Trend: {}\nTop category: {}\nBudget health: {}\nRecommendation: {}",
                cards.spending_trend,
                cards.top_category,
                cards.budget_health,
                cards.recommendation
            ))
        }
        "regenerate" => {
            let last_user = transcript
                .iter()
                .rev()
                .find(|r| r.sender == Sender::User)
                .map(|r| r.text.clone());
            match last_user {
                Some(question) => CommandOutcome::Reveal(answer(config, &question, ctx)),
                None => CommandOutcome::Nothing,
            }
        }
        "clear" => {
            transcript.clear();
            transcript.push(ChatRecord::bot(templates::GREETING));
            CommandOutcome::Cleared
        }
        _ => CommandOutcome::Reveal("Unknown command. Try /help".to_string()),
    }
}

/// Remote when configured; the fallback to the local template is decided
/// here, not inside the transport.
fn answer(config: &AgentConfig, question: &str, ctx: &AnalysisContext) -> String {
    if config.remote_enabled() {
        match remote::complete_blocking(config, question, ctx) {
            Ok(reply) => return reply,
            Err(e) => warn!("remote completion failed, using local analysis: {e:#}"),
        }
    }
    local_reply(question, ctx)
}
