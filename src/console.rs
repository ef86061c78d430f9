//! Line commands understood by the `rsvp-admin` prompt.

use crate::book::{RsvpBook, SubmitOutcome};
use crate::error::Result;
use crate::record::{AttendeeRecord, RecordId, Submission};
use crate::store::RecordStore;

pub const HELP: &str = "\
Commands:
  q: Quit
  help: Show this message
  list: List every RSVP
  count: Show RSVP, guest and attendee totals
  show <id>: Show one RSVP
  add <name> [| guest, guest, ...]: Submit an RSVP
  edit <id> <name> [| guest, guest, ...]: Replace name and guests of an RSVP
  delete <id>: Remove an RSVP
  search <query>: Search names (at least the configured minimum of characters)
  dupes: Print the likely-duplicate review as JSON";

/// A parsed console command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    List,
    Count,
    Show(RecordId),
    Add(Submission),
    Edit(RecordId, Submission),
    Delete(RecordId),
    Search(String),
    Dupes,
}

impl Command {
    /// Parse one input line
    ///
    /// Returns a short status message on failure, shown in the prompt.
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" => Err("empty command".to_string()),
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "list" => Ok(Command::List),
            "count" => Ok(Command::Count),
            "dupes" => Ok(Command::Dupes),
            "show" => require_id(rest).map(Command::Show),
            "delete" => require_id(rest).map(Command::Delete),
            "search" => Ok(Command::Search(rest.to_string())),
            "add" => Ok(Command::Add(parse_submission(rest))),
            "edit" => {
                let (id, rest) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: edit <id> <name> [| guests]".to_string())?;
                Ok(Command::Edit(RecordId::from(id), parse_submission(rest)))
            }
            other => Err(format!("unknown command {:?}", other)),
        }
    }
}

fn require_id(rest: &str) -> std::result::Result<RecordId, String> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err("expected exactly one id".to_string());
    }
    Ok(RecordId::from(rest))
}

/// `name | guest, guest` into a submission; validation happens in the book
fn parse_submission(input: &str) -> Submission {
    match input.split_once('|') {
        Some((name, guests)) => Submission::new(
            name.trim(),
            guests.split(',').map(|guest| guest.trim().to_string()).collect(),
        ),
        None => Submission::new(input.trim(), Vec::new()),
    }
}

fn describe(record: &AttendeeRecord) -> String {
    let guests = if record.guests.is_empty() {
        "-".to_string()
    } else {
        record.guests.join(", ")
    };
    format!(
        "{}  {}  ({} guest(s): {})  updated {}",
        record.id,
        record.name,
        record.guests.len(),
        guests,
        record.updated_at.format("%Y-%m-%d %H:%M")
    )
}

/// Run a command against the book, returning the text to print
///
/// `Quit` and `Help` are handled by the caller's loop.
pub fn execute<S: RecordStore>(book: &mut RsvpBook<S>, command: Command) -> Result<String> {
    let output = match command {
        Command::Quit => String::new(),
        Command::Help => HELP.to_string(),
        Command::List => book
            .list()
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{:>3}. {}", i + 1, describe(record)))
            .collect::<Vec<_>>()
            .join("\n"),
        Command::Count => {
            let count = book.headcount();
            format!(
                "{} RSVP(s), {} guest(s), {} attendee(s)",
                count.rsvps, count.guests, count.attendees
            )
        }
        Command::Show(id) => describe(book.get(&id)?),
        Command::Add(submission) => match book.submit(submission)? {
            SubmitOutcome::Created(record) => format!("created {}", describe(&record)),
            SubmitOutcome::Existing(record) => {
                format!("name already registered, edit it instead: {}", describe(&record))
            }
        },
        Command::Edit(id, submission) => format!("updated {}", describe(&book.update(&id, submission)?)),
        Command::Delete(id) => format!("deleted {}", describe(&book.delete(&id)?)),
        Command::Search(query) => book
            .search(&query)
            .iter()
            .map(|hit| format!("{}  {}  ({} guest(s))", hit.id, hit.name, hit.guest_count))
            .collect::<Vec<_>>()
            .join("\n"),
        Command::Dupes => serde_json::to_string_pretty(&book.review())?,
    };

    Ok(output)
}
