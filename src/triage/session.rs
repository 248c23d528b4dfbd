//! The interactive loop: show a message, read a command, apply it, move on.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use log::{info, warn};

use crate::domain::email::{EmailMessage, TriageAction};
use crate::mail::mailbox::Mailbox;
use crate::triage::TriageError;
use crate::triage::actions::perform_action;
use crate::triage::display::render_message;
use crate::triage::prompt::{Command, LEGEND, PROMPT, USAGE, parse_command};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Displaying(usize),
    AwaitingInput(usize),
    Executing(usize, Command),
    Advancing(usize),
    Terminated,
}

/// What happened during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub total: usize,
    /// Messages an action was attempted on, successful or not.
    pub processed: usize,
    pub failed: usize,
    pub quit: bool,
    pub applied: HashMap<TriageAction, usize>,
}

impl SessionSummary {
    pub fn count(&self, action: TriageAction) -> usize {
        self.applied.get(&action).copied().unwrap_or(0)
    }
}

/// One pass over a fetched batch. Not resumable.
pub struct Session {
    messages: Vec<EmailMessage>,
    index: usize,
    terminated: bool,
}

impl Session {
    pub fn new(messages: Vec<EmailMessage>) -> Self {
        Self {
            messages,
            index: 0,
            terminated: false,
        }
    }

    /// Drive the session until quit or until every message has been handled.
    ///
    /// Action failures are shown and the session moves on. Read failures,
    /// including end of input, end the session with an error.
    pub fn run<R, W>(
        &mut self,
        mailbox: &dyn Mailbox,
        mut input: R,
        mut out: W,
    ) -> Result<SessionSummary, TriageError>
    where
        R: BufRead,
        W: Write,
    {
        let total = self.messages.len();
        let mut summary = SessionSummary {
            total,
            ..SessionSummary::default()
        };

        if self.terminated {
            return Ok(summary);
        }
        if total == 0 {
            writeln!(out, "No unread messages!")?;
            self.terminated = true;
            return Ok(summary);
        }

        writeln!(out, "\nFound {total} unread messages")?;
        writeln!(out, "{LEGEND}")?;
        writeln!(out, "{}", "-".repeat(60))?;

        let mut state = State::Displaying(self.index);
        let mut line = Vec::new();
        loop {
            state = match state {
                State::Displaying(i) => {
                    self.index = i;
                    render_message(&mut out, i + 1, total, &self.messages[i])?;
                    State::AwaitingInput(i)
                }
                State::AwaitingInput(i) => {
                    write!(out, "{PROMPT}")?;
                    out.flush()?;
                    line.clear();
                    if input.read_until(b'\n', &mut line)? == 0 {
                        return Err(TriageError::InputClosed);
                    }
                    // undecodable bytes become an unrecognized command
                    match parse_command(&String::from_utf8_lossy(&line)) {
                        Some(cmd) => State::Executing(i, cmd),
                        None => {
                            writeln!(out, "{USAGE}")?;
                            State::AwaitingInput(i)
                        }
                    }
                }
                State::Executing(_, Command::Quit) => {
                    summary.quit = true;
                    writeln!(out, "Goodbye!")?;
                    State::Terminated
                }
                State::Executing(i, Command::Act(action)) => {
                    let msg = &self.messages[i];
                    summary.processed += 1;
                    match perform_action(mailbox, &msg.id, action) {
                        Ok(()) => {
                            *summary.applied.entry(action).or_default() += 1;
                            writeln!(out, "✅ {}", action.description())?;
                        }
                        Err(e) => {
                            summary.failed += 1;
                            warn!("{action} failed for {}: {e}", msg.id);
                            writeln!(out, "❌ Error performing action: {e}")?;
                        }
                    }
                    State::Advancing(i + 1)
                }
                State::Advancing(next) if next >= total => {
                    writeln!(out, "\nAll {total} messages triaged.")?;
                    State::Terminated
                }
                State::Advancing(next) => State::Displaying(next),
                State::Terminated => break,
            };
        }

        self.terminated = true;
        info!(
            "session finished: {} of {} processed, {} failed, quit={}",
            summary.processed, summary.total, summary.failed, summary.quit
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::domain::email::{MessageId, RawMessage};
    use crate::mail::mailbox::MailboxError;

    struct Untouchable;

    impl Mailbox for Untouchable {
        fn list_unread(&self, _: &str, _: u32) -> Result<Vec<MessageId>, MailboxError> {
            unreachable!()
        }
        fn get_message(&self, _: &str) -> Result<RawMessage, MailboxError> {
            unreachable!()
        }
        fn modify(&self, _: &str, _: &[&str], _: &[&str]) -> Result<(), MailboxError> {
            panic!("unexpected modify")
        }
        fn trash(&self, _: &str) -> Result<(), MailboxError> {
            panic!("unexpected trash")
        }
    }

    fn message(id: &str) -> EmailMessage {
        EmailMessage {
            id: id.into(),
            from: format!("{id}@example.com"),
            subject: format!("subject {id}"),
            snippet: String::new(),
        }
    }

    #[test]
    fn empty_batch_ends_without_reading_input() {
        let mut session = Session::new(vec![]);
        let mut out = Vec::new();
        let summary = session
            .run(&Untouchable, Cursor::new(""), &mut out)
            .unwrap();
        assert_eq!(summary.total, 0);
        assert!(session.terminated);
        assert_eq!(String::from_utf8(out).unwrap(), "No unread messages!\n");
    }

    #[test]
    fn eof_is_a_fatal_input_error() {
        let mut session = Session::new(vec![message("a")]);
        let err = session
            .run(&Untouchable, Cursor::new("x\n"), Vec::new())
            .unwrap_err();
        assert!(matches!(err, TriageError::InputClosed));
    }

    #[test]
    fn quit_leaves_current_message_untouched() {
        let mut session = Session::new(vec![message("a"), message("b")]);
        let mut out = Vec::new();
        let summary = session
            .run(&Untouchable, Cursor::new("Q\n"), &mut out)
            .unwrap();
        assert!(summary.quit);
        assert_eq!(summary.processed, 0);
        assert_eq!(session.index, 0);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("[1/2] From: a@example.com"));
        assert!(!out.contains("[2/2]"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn invalid_utf8_input_reprompts() {
        let mut session = Session::new(vec![message("a")]);
        let mut out = Vec::new();
        let summary = session
            .run(&Untouchable, Cursor::new(b"\xff\np\n".to_vec()), &mut out)
            .unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.count(TriageAction::Pass), 1);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches(USAGE).count(), 1);
        assert!(out.contains("✅ Passed"));
    }

    #[test]
    fn finished_session_does_not_run_again() {
        let mut session = Session::new(vec![message("a")]);
        session
            .run(&Untouchable, Cursor::new("p\n"), Vec::new())
            .unwrap();
        let again = session
            .run(&Untouchable, Cursor::new(""), Vec::new())
            .unwrap();
        assert_eq!(again.processed, 0);
    }
}
