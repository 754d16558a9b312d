//! The interactive comparison session.
//!
//! Each input line is parsed into a [`SessionCommand`]; selection commands
//! become [`SelectionEvent`]s and go through [`dispatch_settled`], the rest
//! only read the session.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use nutri_core::{
    InstanceChange, Resolution, SelectionEvent, SessionState, canonical_food, canonical_group,
    dispatch_settled,
};
use nutri_model::{FoodTable, ModelError, SectionId, Slot};
use nutri_report::{RenderOptions, build_report, render_text};
use thiserror::Error;

const HELP: &str = "\
commands:
  group <left|right> <group>   toggle a group filter on one side
  clear <left|right>           clear the group filters of one side
  pick <left|right> <food>     pick a food on one side
  unpick <left|right>          clear the pick of one side
  swap                         exchange the two picks
  section <id>                 toggle a report section
  sections clear               disable every report section
  show                         draw the current comparison
  help                         show this list
  quit                         leave the session";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Event(SelectionEvent),
    Swap,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (type help for a list)")]
    UnknownCommand(String),
    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("{command}: unexpected argument '{argument}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn no_arguments(command: &'static str, rest: &str) -> Result<(), ParseError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(ParseError::UnexpectedArgument {
            command,
            argument: rest.to_string(),
        })
    }
}

fn slot_argument<'a>(command: &'static str, rest: &'a str) -> Result<(Slot, &'a str), ParseError> {
    let (slot, rest) = split_word(rest);
    if slot.is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            argument: "side",
        });
    }
    Ok((slot.parse()?, rest))
}

fn slot_only(command: &'static str, rest: &str) -> Result<Slot, ParseError> {
    let (slot, rest) = slot_argument(command, rest)?;
    no_arguments(command, rest)?;
    Ok(slot)
}

fn slot_and_name(
    command: &'static str,
    rest: &str,
    argument: &'static str,
) -> Result<(Slot, String), ParseError> {
    let (slot, name) = slot_argument(command, rest)?;
    if name.is_empty() {
        return Err(ParseError::MissingArgument { command, argument });
    }
    Ok((slot, name.to_string()))
}

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = split_word(line);
    let command = match word.to_ascii_lowercase().as_str() {
        "group" => {
            let (slot, group) = slot_and_name("group", rest, "group name")?;
            SessionCommand::Event(SelectionEvent::ToggleGroup { slot, group })
        }
        "clear" => SessionCommand::Event(SelectionEvent::ClearGroups(slot_only("clear", rest)?)),
        "pick" => {
            let (slot, food) = slot_and_name("pick", rest, "food name")?;
            SessionCommand::Event(SelectionEvent::PickFood {
                slot,
                food: Some(food),
            })
        }
        "unpick" => SessionCommand::Event(SelectionEvent::PickFood {
            slot: slot_only("unpick", rest)?,
            food: None,
        }),
        "swap" => {
            no_arguments("swap", rest)?;
            SessionCommand::Swap
        }
        "section" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "section",
                    argument: "section id",
                });
            }
            SessionCommand::Event(SelectionEvent::ToggleSection(rest.parse::<SectionId>()?))
        }
        "sections" => match rest.to_ascii_lowercase().as_str() {
            "clear" => SessionCommand::Event(SelectionEvent::ClearSections),
            "" => {
                return Err(ParseError::MissingArgument {
                    command: "sections",
                    argument: "'clear'",
                });
            }
            _ => {
                return Err(ParseError::UnexpectedArgument {
                    command: "sections",
                    argument: rest.to_string(),
                });
            }
        },
        "show" => {
            no_arguments("show", rest)?;
            SessionCommand::Show
        }
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        _ => return Err(ParseError::UnknownCommand(word.to_string())),
    };
    Ok(Some(command))
}

/// A running session over one table.
pub struct Session<'a> {
    table: &'a FoodTable,
    options: &'a RenderOptions,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(table: &'a FoodTable, options: &'a RenderOptions, state: SessionState) -> Self {
        Self {
            table,
            options,
            state,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs one command and writes what it produced.
    pub fn execute<W: Write>(
        &mut self,
        command: SessionCommand,
        out: &mut W,
    ) -> io::Result<ControlFlow<()>> {
        match command {
            SessionCommand::Event(event) => self.apply(event, out)?,
            SessionCommand::Swap => {
                let (left, right) = self.state.picks();
                let event = SelectionEvent::SetPicks {
                    left: non_empty(right),
                    right: non_empty(left),
                };
                self.apply(event, out)?;
            }
            SessionCommand::Show => self.show(out)?,
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Matches typed names to the table's spelling. Unknown names are passed
    /// through so the render reports them.
    fn canonicalize(&self, event: SelectionEvent) -> SelectionEvent {
        match event {
            SelectionEvent::ToggleGroup { slot, group } => SelectionEvent::ToggleGroup {
                slot,
                group: canonical_group(self.table, &group).unwrap_or(group),
            },
            SelectionEvent::PickFood {
                slot,
                food: Some(food),
            } => SelectionEvent::PickFood {
                slot,
                food: Some(
                    canonical_food(self.table, &food)
                        .map(str::to_string)
                        .unwrap_or(food),
                ),
            },
            other => other,
        }
    }

    fn apply<W: Write>(&mut self, event: SelectionEvent, out: &mut W) -> io::Result<()> {
        let event = self.canonicalize(event);
        let filtered = match &event {
            SelectionEvent::ToggleGroup { slot, .. } | SelectionEvent::ClearGroups(slot) => {
                Some(*slot)
            }
            _ => None,
        };
        let toggled = match &event {
            SelectionEvent::ToggleSection(section) => Some(*section),
            _ => None,
        };
        let frame = dispatch_settled(&mut self.state, self.table, event);

        for notice in &frame.notices {
            writeln!(out, "notice: {notice}")?;
        }
        if let Some(slot) = filtered {
            let groups = self.state.slot(slot).selected_groups();
            let filter = if groups.is_empty() {
                "all groups".to_string()
            } else {
                groups.iter().cloned().collect::<Vec<_>>().join(", ")
            };
            writeln!(
                out,
                "{slot} ({filter}): {}",
                frame.available[slot].join(", ")
            )?;
        }
        if let Some(section) = toggled {
            let switch = if self.state.is_section_enabled(section) {
                "on"
            } else {
                "off"
            };
            writeln!(out, "section {} {switch}", section.as_str())?;
        }
        match &frame.resolution {
            Ok(Resolution::Comparison(change)) => {
                if let Some(instance) = self.state.instance() {
                    writeln!(
                        out,
                        "comparing {} and {} ({})",
                        instance.food1(),
                        instance.food2(),
                        change_label(*change)
                    )?;
                }
            }
            Ok(Resolution::NoSelection(reason)) if reason.is_warning() => {
                writeln!(out, "warning: {reason}")?;
            }
            Ok(Resolution::NoSelection(reason)) => writeln!(out, "{reason}")?,
            Err(error) => writeln!(out, "error: {error}")?,
        }
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for slot in Slot::ALL {
            let selection = self.state.slot(slot);
            let groups = selection.selected_groups();
            writeln!(
                out,
                "{slot}: groups [{}], pick {}",
                groups.iter().cloned().collect::<Vec<_>>().join(", "),
                selection.picked_food().unwrap_or("-")
            )?;
        }
        let sections = self.state.ordered_sections();
        let ids: Vec<&str> = sections.iter().map(|id| id.as_str()).collect();
        writeln!(out, "sections: [{}]", ids.join(", "))?;
        match self.state.instance() {
            Some(instance) => {
                let report = build_report(instance, &sections, self.options);
                writeln!(out)?;
                writeln!(out, "{}", render_text(&report, self.options))?;
            }
            None => writeln!(out, "no comparison")?,
        }
        Ok(())
    }
}

fn non_empty(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_string())
}

fn change_label(change: InstanceChange) -> &'static str {
    match change {
        InstanceChange::Created => "new comparison",
        InstanceChange::ReplacedLeft => "left side replaced",
        InstanceChange::ReplacedRight => "right side replaced",
        InstanceChange::Rebuilt => "rebuilt",
        InstanceChange::Unchanged => "unchanged",
    }
}

/// Reads commands from `input` until it ends or `quit` is read.
///
/// Parse errors are reported on `out` and the session continues.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    input: R,
    out: &mut W,
    prompt: bool,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                writeln!(out, "error: {error}")?;
                continue;
            }
        };
        if session.execute(command, out)?.is_break() {
            break;
        }
    }
    Ok(())
}
