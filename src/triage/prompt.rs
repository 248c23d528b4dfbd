use crate::domain::email::TriageAction;

pub const PROMPT: &str = "Action [r/t/s/p/q]: ";
pub const USAGE: &str = "Invalid option. Use: (r)ead, (t)rash, (s)pam, (p)ass, (q)uit";
pub const LEGEND: &str = "Commands: (r)ead, (t)rash, (s)pam, (p)ass, (q)uit";

/// One operator decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act(TriageAction),
    Quit,
}

/// Parse a line of operator input. `None` for anything unrecognized.
pub fn parse_command(line: &str) -> Option<Command> {
    let cmd = match line.trim().to_lowercase().as_str() {
        "r" | "read" => Command::Act(TriageAction::MarkRead),
        "t" | "trash" => Command::Act(TriageAction::Trash),
        "s" | "spam" => Command::Act(TriageAction::Spam),
        "p" | "pass" => Command::Act(TriageAction::Pass),
        "q" | "quit" => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}
