use log::debug;

use crate::domain::email::TriageAction;
use crate::mail::mailbox::Mailbox;
use crate::triage::TriageError;

const UNREAD_LABEL: &str = "UNREAD";
const SPAM_LABEL: &str = "SPAM";

/// Apply `action` to one message. Every action except `Pass` makes exactly
/// one remote call.
pub fn perform_action(
    mailbox: &dyn Mailbox,
    id: &str,
    action: TriageAction,
) -> Result<(), TriageError> {
    debug!("applying {action} to {id}");
    match action {
        TriageAction::Pass => {}
        TriageAction::MarkRead => mailbox.modify(id, &[], &[UNREAD_LABEL])?,
        TriageAction::Trash => mailbox.trash(id)?,
        TriageAction::Spam => mailbox.modify(id, &[SPAM_LABEL], &[])?,
    }
    Ok(())
}

/// Like [`perform_action`], for callers holding the numeric action code.
/// Unknown codes fail with [`TriageError::InvalidAction`] and touch nothing.
pub fn perform_action_code(mailbox: &dyn Mailbox, id: &str, code: u8) -> Result<(), TriageError> {
    let action = TriageAction::try_from(code)?;
    perform_action(mailbox, id, action)
}
