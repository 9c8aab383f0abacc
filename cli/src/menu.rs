//! The interactive main menu.

use std::io::{self, Write};

use stockroom_core::Prompter;
use thiserror::Error;

use crate::dispatch::{Action, Dispatcher, Outcome};
use crate::presenter::ConsolePresenter;

const MAIN_MENU: &str = "\nPlease Select an option number below:\n\
                         1 - Enter Book\n\
                         2 - Update Book\n\
                         3 - Delete Book\n\
                         4 - Search Book\n\
                         5 - View All Books\n\
                         0 - Exit";

/// Entries of the main menu, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Exit = 0,
    Create = 1,
    Update = 2,
    Delete = 3,
    Search = 4,
    ReadAll = 5,
}

impl MenuOption {
    /// The dispatcher action behind this option; `None` for exit.
    pub fn action(self) -> Option<Action> {
        match self {
            MenuOption::Exit => None,
            MenuOption::Create => Some(Action::CreateEntity),
            MenuOption::Update => Some(Action::UpdateEntity),
            MenuOption::Delete => Some(Action::DeleteEntity),
            MenuOption::Search => Some(Action::SearchEntity),
            MenuOption::ReadAll => Some(Action::ReadAll),
        }
    }

    fn title(self) -> &'static str {
        match self {
            MenuOption::Exit => "Application Closed",
            MenuOption::Create => "Create New Book",
            MenuOption::Update => "Book Update Menu",
            MenuOption::Delete => "Book Deletion Menu",
            MenuOption::Search => "Book Search Menu",
            MenuOption::ReadAll => "All Books",
        }
    }
}

/// Rejected main menu input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("Please enter a valid, non-decimal number")]
    NotANumber,
    #[error("Please enter an option number between 0 and 5")]
    OutOfRange(i64),
}

/// Parses one line of main menu input.
///
/// ```
/// use stockroom_cli::{MenuError, MenuOption, parse_menu_option};
///
/// assert_eq!(parse_menu_option(" 5 "), Ok(MenuOption::ReadAll));
/// assert_eq!(parse_menu_option("2.0"), Err(MenuError::NotANumber));
/// assert_eq!(parse_menu_option("6"), Err(MenuError::OutOfRange(6)));
/// ```
pub fn parse_menu_option(input: &str) -> Result<MenuOption, MenuError> {
    let number: i64 = input.trim().parse().map_err(|_| MenuError::NotANumber)?;
    match number {
        0 => Ok(MenuOption::Exit),
        1 => Ok(MenuOption::Create),
        2 => Ok(MenuOption::Update),
        3 => Ok(MenuOption::Delete),
        4 => Ok(MenuOption::Search),
        5 => Ok(MenuOption::ReadAll),
        other => Err(MenuError::OutOfRange(other)),
    }
}

/// Runs the main menu until the user exits or input closes.
///
/// The default table is prepared before the menu is first shown. Failed
/// actions are reported and the menu is shown again.
///
/// # Errors
///
/// Only failures writing to the presenter are returned.
pub fn run_menu<P, W>(
    dispatcher: &Dispatcher,
    prompter: &mut P,
    presenter: &mut ConsolePresenter<W>,
) -> io::Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    if let Outcome::Halted(halt) = dispatcher.run(Action::CreateDefaultTable, prompter) {
        tracing::warn!(table = dispatcher.table(), %halt, "default table is not available");
    }

    presenter.title("Book Stock Manager")?;

    loop {
        presenter.subtitle("Main Menu")?;
        presenter.line(MAIN_MENU)?;

        let Some(answer) = prompter.ask("\nSelected Option") else {
            tracing::debug!("input closed at main menu");
            return Ok(());
        };

        let option = match parse_menu_option(&answer) {
            Ok(option) => option,
            Err(err) => {
                presenter.line(&format!("\n{err}"))?;
                continue;
            }
        };

        presenter.title(option.title())?;
        let Some(action) = option.action() else {
            return Ok(());
        };

        let outcome = dispatcher.run(action, prompter);
        match option {
            MenuOption::Create => report_write(
                presenter,
                &outcome,
                "New Book Added Successfully",
                "New Book was not created",
            )?,
            MenuOption::Update => report_write(
                presenter,
                &outcome,
                "Book Update was Successful",
                "Book could not be updated",
            )?,
            MenuOption::Delete => report_write(
                presenter,
                &outcome,
                "Book has been deleted",
                "Book could not be deleted",
            )?,
            MenuOption::Search => report_rows(presenter, &outcome, Some("Search Results"))?,
            MenuOption::ReadAll => report_rows(presenter, &outcome, None)?,
            MenuOption::Exit => {}
        }
    }
}

fn report_write<W: Write>(
    presenter: &mut ConsolePresenter<W>,
    outcome: &Outcome,
    success: &str,
    failure: &str,
) -> io::Result<()> {
    if outcome.is_confirmed() {
        return presenter.subtitle(success);
    }
    presenter.subtitle(failure)?;
    if let Outcome::Halted(halt) = outcome {
        presenter.line(&format!("Reason: {halt}"))?;
    }
    Ok(())
}

fn report_rows<W: Write>(
    presenter: &mut ConsolePresenter<W>,
    outcome: &Outcome,
    heading: Option<&str>,
) -> io::Result<()> {
    match outcome {
        Outcome::Rows(rows) if rows.is_empty() => presenter.line("No Books in Stock"),
        Outcome::Rows(rows) => {
            if let Some(heading) = heading {
                presenter.subtitle(heading)?;
            }
            presenter.table(&rows.to_table())
        }
        Outcome::Halted(halt) => presenter.line(&format!("Books could not be read: {halt}")),
        Outcome::TableReady | Outcome::Confirmed(_) => Ok(()),
    }
}
