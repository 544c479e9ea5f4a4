//! ratatui/crossterm front end: draws the transcript and input box, turns key
//! presses into [`app::Event`]s and runs lookups when asked to.

use anyhow::Context;
use citycast_core::WeatherLookup;
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Position},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{self, Command, Entry, Event, State};

const PROMPT: &str = "┃ ";
const PLACEHOLDER: &str = "Enter a city name...";
const PAGE: u16 = 5;

/// Run the chat until the user quits. Returns the text left in the input box.
pub async fn run(lookup: &WeatherLookup) -> anyhow::Result<String> {
    let mut terminal = ratatui::try_init().context("Failed to initialise terminal")?;
    let result = event_loop(&mut terminal, lookup).await;
    ratatui::restore();
    result
}

async fn event_loop(terminal: &mut DefaultTerminal, lookup: &WeatherLookup) -> anyhow::Result<String> {
    let mut state = State::default();

    loop {
        let mut max_scroll = 0;
        terminal.draw(|frame| max_scroll = draw(frame, &state))?;
        state = app::update(state, Event::Viewport(max_scroll)).0;

        let Some(event) = next_event()? else {
            continue;
        };

        let (next, command) = app::update(state, event);
        state = next;

        match command {
            Command::None => {}
            Command::Lookup(city) => {
                // Show the pending line while the lookup blocks the loop.
                terminal.draw(|frame| {
                    draw(frame, &state);
                })?;
                let text = lookup.report(&city).await;
                state = app::update(state, Event::LookupFinished(text)).0;
            }
            Command::Quit(last_input) => {
                log::info!("quitting");
                return Ok(last_input);
            }
        }
    }
}

fn next_event() -> anyhow::Result<Option<Event>> {
    match event::read().context("Failed to read terminal event")? {
        event::Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

fn map_key(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Event::Quit),
        KeyCode::Esc => Some(Event::Quit),
        KeyCode::Enter => Some(Event::Submit),
        KeyCode::Backspace => Some(Event::Backspace),
        KeyCode::Up => Some(Event::ScrollUp(1)),
        KeyCode::Down => Some(Event::ScrollDown(1)),
        KeyCode::PageUp => Some(Event::ScrollUp(PAGE)),
        KeyCode::PageDown => Some(Event::ScrollDown(PAGE)),
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            None
        }
        KeyCode::Char(c) => Some(Event::Input(c)),
        _ => None,
    }
}

fn transcript_lines(state: &State) -> Vec<Line<'_>> {
    let you = Style::default().fg(Color::Magenta);
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    for entry in &state.transcript {
        match entry {
            Entry::Banner(text) => {
                lines.push(Line::styled(text.as_str(), Style::default().add_modifier(Modifier::BOLD)));
            }
            Entry::Query(city) => {
                lines.push(Line::default());
                lines.push(Line::from(vec![Span::styled("You: ", you), Span::raw(city.as_str())]));
            }
            Entry::Report(text) => lines.extend(text.lines().map(Line::raw)),
        }
    }

    if let Some(city) = &state.pending {
        lines.push(Line::styled(format!("Looking up weather for {city}..."), dim));
    }

    lines
}

/// Draw one frame and return how far the transcript can scroll up.
fn draw(frame: &mut Frame, state: &State) -> u16 {
    let [transcript_area, input_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(frame.area());

    let lines = transcript_lines(state);
    let visible = transcript_area.height.saturating_sub(2);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(visible);
    let offset = max_scroll.saturating_sub(state.scroll);

    let transcript = Paragraph::new(lines)
        .block(Block::bordered().title(" citycast "))
        .scroll((offset, 0));
    frame.render_widget(transcript, transcript_area);

    let input = if state.input.is_empty() {
        Line::from(vec![
            Span::raw(PROMPT),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![Span::raw(PROMPT), Span::raw(state.input.as_str())])
    };
    frame.render_widget(Paragraph::new(input).block(Block::bordered()), input_area);

    let typed = u16::try_from(state.input.chars().count()).unwrap_or(u16::MAX);
    let cursor_x = (input_area.x + 1 + 2).saturating_add(typed);
    frame.set_cursor_position(Position::new(
        cursor_x.min(input_area.right().saturating_sub(2)),
        input_area.y + 1,
    ));

    max_scroll
}
