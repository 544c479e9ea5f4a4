//! Chat state and its transition function.
//!
//! `update` never performs I/O. When a submit needs the network it returns
//! [`Command::Lookup`]; the UI loop runs the lookup and feeds the result back
//! as [`Event::LookupFinished`].

pub const WELCOME: &str = "Welcome to the weather forecast!";

/// Longest city name the input box accepts.
pub const INPUT_CHAR_LIMIT: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Banner(String),
    Query(String),
    Report(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub transcript: Vec<Entry>,
    pub input: String,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll: u16,
    /// Largest useful `scroll`, as measured by the last draw.
    pub max_scroll: u16,
    /// City of the lookup in flight, if any.
    pub pending: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transcript: vec![Entry::Banner(WELCOME.to_string())],
            input: String::new(),
            scroll: 0,
            max_scroll: 0,
            pending: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(char),
    Backspace,
    Submit,
    ScrollUp(u16),
    ScrollDown(u16),
    /// The transcript viewport was drawn; carries the new `max_scroll`.
    Viewport(u16),
    LookupFinished(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Lookup(String),
    /// Exit, handing back whatever was left in the input box.
    Quit(String),
}

pub fn update(mut state: State, event: Event) -> (State, Command) {
    match event {
        Event::Input(c) => {
            if !c.is_control() && state.input.chars().count() < INPUT_CHAR_LIMIT {
                state.input.push(c);
            }
            (state, Command::None)
        }
        Event::Backspace => {
            state.input.pop();
            (state, Command::None)
        }
        Event::Submit => {
            let city = state.input.trim().to_string();
            if city.is_empty() || state.pending.is_some() {
                return (state, Command::None);
            }

            state.transcript.push(Entry::Query(city.clone()));
            state.input.clear();
            state.scroll = 0;
            state.pending = Some(city.clone());
            (state, Command::Lookup(city))
        }
        Event::ScrollUp(lines) => {
            state.scroll = state.scroll.saturating_add(lines).min(state.max_scroll);
            (state, Command::None)
        }
        Event::ScrollDown(lines) => {
            state.scroll = state.scroll.saturating_sub(lines);
            (state, Command::None)
        }
        Event::Viewport(max_scroll) => {
            state.max_scroll = max_scroll;
            state.scroll = state.scroll.min(max_scroll);
            (state, Command::None)
        }
        Event::LookupFinished(text) => {
            state.transcript.push(Entry::Report(text));
            state.pending = None;
            state.scroll = 0;
            (state, Command::None)
        }
        Event::Quit => {
            let last = state.input.clone();
            (state, Command::Quit(last))
        }
    }
}
