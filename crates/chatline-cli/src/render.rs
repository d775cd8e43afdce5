//! Incremental terminal rendering of conversation snapshots.

use chatline_client::{ChatView, ConnectionState, Message, Sender};

/// Remembers what has been printed so each snapshot only emits the change.
#[derive(Debug, Default)]
pub struct Renderer {
    shown: Vec<Message>,
    connection: ConnectionState,
    /// A message line was started and not yet terminated.
    line_open: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to write for the transition from the last snapshot to `view`.
    pub fn render(&mut self, view: &ChatView) -> String {
        let mut out = String::new();

        if view.connection != self.connection {
            self.finish_line(&mut out);
            out.push_str(&status_line(view));
            self.connection = view.connection;
        }

        if !self.continues(view) {
            self.finish_line(&mut out);
            if !self.shown.is_empty() {
                out.push_str("--- new conversation ---\n");
            }
            self.shown.clear();
        }

        if let Some(last) = self.shown.last() {
            let current = &view.messages[self.shown.len() - 1];
            out.push_str(&current.text[last.text.len()..]);
        }

        for message in &view.messages[self.shown.len()..] {
            self.finish_line(&mut out);
            out.push_str(prefix(message.sender));
            out.push_str(&message.text);
            match message.sender {
                Sender::User => out.push('\n'),
                Sender::Assistant => self.line_open = true,
            }
        }

        if !view.is_streaming {
            self.finish_line(&mut out);
        }

        self.shown = view.messages.clone();
        out
    }

    /// Whether `view` extends what is already on screen.
    fn continues(&self, view: &ChatView) -> bool {
        if self.shown.len() > view.messages.len() {
            return false;
        }
        let last = self.shown.len().saturating_sub(1);
        self.shown
            .iter()
            .zip(&view.messages)
            .enumerate()
            .all(|(i, (shown, current))| {
                if i == last {
                    shown.sender == current.sender && current.text.starts_with(&shown.text)
                } else {
                    shown == current
                }
            })
    }

    fn finish_line(&mut self, out: &mut String) {
        if self.line_open {
            out.push('\n');
            self.line_open = false;
        }
    }
}

fn prefix(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you> ",
        Sender::Assistant => "assistant> ",
    }
}

fn status_line(view: &ChatView) -> String {
    match (&view.session_id, view.connection) {
        (Some(sid), ConnectionState::Connecting | ConnectionState::Open) => {
            format!("[{} | session {}]\n", view.connection, sid)
        }
        _ => format!("[{}]\n", view.connection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(messages: Vec<Message>, streaming: bool) -> ChatView {
        ChatView {
            messages,
            is_streaming: streaming,
            connection: ConnectionState::Idle,
            ..ChatView::default()
        }
    }

    #[test]
    fn streamed_chunks_print_as_suffixes() {
        let mut r = Renderer::new();
        assert_eq!(r.render(&view(vec![Message::user("Hi")], true)), "you> Hi\n");
        assert_eq!(
            r.render(&view(vec![Message::user("Hi"), Message::assistant("Hel")], true)),
            "assistant> Hel"
        );
        assert_eq!(
            r.render(&view(vec![Message::user("Hi"), Message::assistant("Hello")], true)),
            "lo"
        );
        assert_eq!(
            r.render(&view(vec![Message::user("Hi"), Message::assistant("Hello")], false)),
            "\n"
        );
    }

    #[test]
    fn unchanged_view_prints_nothing() {
        let mut r = Renderer::new();
        let v = view(vec![Message::user("a")], false);
        r.render(&v);
        assert_eq!(r.render(&v), "");
    }

    #[test]
    fn replaced_history_is_reprinted() {
        let mut r = Renderer::new();
        r.render(&view(vec![Message::user("old")], false));

        let out = r.render(&view(
            vec![Message::user("a"), Message::assistant("b")],
            false,
        ));
        assert_eq!(out, "--- new conversation ---\nyou> a\nassistant> b\n");
    }

    #[test]
    fn cleared_transcript_prints_separator_once() {
        let mut r = Renderer::new();
        r.render(&view(vec![Message::user("old")], false));
        assert_eq!(r.render(&view(vec![], false)), "--- new conversation ---\n");
        assert_eq!(r.render(&view(vec![], false)), "");
    }

    #[test]
    fn status_change_terminates_open_line() {
        let mut r = Renderer::new();
        r.render(&view(vec![Message::assistant("par")], true));

        let mut closed = view(vec![Message::assistant("par")], false);
        closed.connection = ConnectionState::Closed;
        assert_eq!(r.render(&closed), "\n[closed]\n");
    }
}
