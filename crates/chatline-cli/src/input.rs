//! Line commands read from the terminal.

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Message(String),
    Clear,
    Connect,
    Quit,
    Help,
    Empty,
}

pub const HELP: &str = "commands: /clear new conversation, /connect reconnect, /quit exit";

impl Input {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "" => Input::Empty,
            "/clear" => Input::Clear,
            "/connect" => Input::Connect,
            "/quit" | "/exit" => Input::Quit,
            "/help" => Input::Help,
            _ => Input::Message(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}
