//! Interactive browsing session.
//!
//! Reads one command per line from stdin, applies it to a [`DirectoryApp`] and
//! redraws the screen. Type `help` for the command list.

use std::io::Write;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader};

use super::{parse_parking_kind, split_assignment, CliResult};
use crate::api::ApiClient;
use crate::app::DirectoryApp;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::ParkingKind;
use crate::state::Sort;
use crate::view::{render_detail, render_list, CardTarget};

const HELP: &str = "\
Commands:
  search TEXT         search by name (empty clears)
  filter KEY=VALUE    set a filter (empty value clears)
  parking KIND        toggle a parking filter
  clear               reset all filters
  next | prev         change page
  page N              jump to page N
  sort FIELD [DIR]    sort by stars, review_count or name; `sort none` resets
  view N              open restaurant N
  edit N              edit restaurant N
  delete N            delete restaurant N (asks for confirmation)
  yes | no            answer the delete confirmation
  add                 new restaurant form
  set KEY=VALUE       set a form field
  toggle KIND         toggle a parking option in the form
  save                submit the form
  close               close the open form or detail view
  categories          list known categories
  dismiss             hide the error message
  help                show this text
  quit                leave";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Redraw,
    Search(String),
    Filter { key: String, value: String },
    Parking(ParkingKind),
    Clear,
    Next,
    Prev,
    Page(u32),
    SortBy(Option<Sort>),
    View(usize),
    Edit(usize),
    Delete(usize),
    Yes,
    No,
    Add,
    Set { key: String, value: String },
    Toggle(ParkingKind),
    Save,
    Close,
    Categories,
    Dismiss,
    Help,
    Quit,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Result<Self, AppError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        let command = match word {
            "" => Self::Redraw,
            "search" | "s" => Self::Search(rest.to_string()),
            "filter" | "f" => {
                let (key, value) = split_assignment(rest)?;
                Self::Filter {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "parking" => Self::Parking(parse_parking_kind(rest)?),
            "clear" => Self::Clear,
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "page" => Self::Page(parse_number(rest, "page")?),
            "sort" => match rest {
                "" | "none" => Self::SortBy(None),
                _ => {
                    let mut parts = rest.split_whitespace();
                    let field = parts.next().unwrap_or_default();
                    Self::SortBy(Some(Sort::parse(field, parts.next())?))
                }
            },
            "view" | "v" => Self::View(parse_number(rest, "view")?),
            "edit" | "e" => Self::Edit(parse_number(rest, "edit")?),
            "delete" | "d" => Self::Delete(parse_number(rest, "delete")?),
            "yes" | "y" => Self::Yes,
            "no" => Self::No,
            "add" => Self::Add,
            "set" => {
                let (key, value) = split_assignment(rest)?;
                Self::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "toggle" => Self::Toggle(parse_parking_kind(rest)?),
            "save" => Self::Save,
            "close" | "c" => Self::Close,
            "categories" => Self::Categories,
            "dismiss" => Self::Dismiss,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown command {:?}, type `help` for the list",
                    other
                )))
            }
        };
        Ok(command)
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, command: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("`{}` expects a number, got {:?}", command, raw)))
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue,
    Print(String),
    Quit,
}

/// Apply one command to the app.
pub async fn apply(app: &mut DirectoryApp, command: BrowseCommand) -> Flow {
    match command {
        BrowseCommand::Redraw => {}
        BrowseCommand::Search(text) => app.search(&text).await,
        BrowseCommand::Filter { key, value } => app.apply_filter_input(&key, &value).await,
        BrowseCommand::Parking(kind) => app.toggle_parking(kind).await,
        BrowseCommand::Clear => app.clear_filters().await,
        BrowseCommand::Next => app.next_page().await,
        BrowseCommand::Prev => app.prev_page().await,
        BrowseCommand::Page(page) => app.set_page(page).await,
        BrowseCommand::SortBy(sort) => app.set_sort(sort).await,
        BrowseCommand::View(n) => app.click_card(n, CardTarget::Body),
        BrowseCommand::Edit(n) => app.click_card(n, CardTarget::EditIcon),
        BrowseCommand::Delete(n) => app.click_card(n, CardTarget::DeleteIcon),
        BrowseCommand::Yes => {
            if app.delete_target().is_none() {
                app.report(no_dialog("delete confirmation"));
            } else {
                app.confirm_delete().await;
            }
        }
        BrowseCommand::No => app.cancel_delete(),
        BrowseCommand::Add => app.open_create(),
        BrowseCommand::Set { key, value } => match app.form_mut() {
            Some(editor) => {
                if let Err(e) = editor.set_field(&key, &value) {
                    editor.error = Some(e.user_message());
                }
            }
            None => app.report(no_dialog("form")),
        },
        BrowseCommand::Toggle(kind) => match app.form_mut() {
            Some(editor) => editor.toggle_parking(kind),
            None => app.report(no_dialog("form")),
        },
        BrowseCommand::Save => {
            if app.form().is_none() {
                app.report(no_dialog("form"));
            } else {
                app.submit_form().await;
            }
        }
        BrowseCommand::Close => {
            if app.form().is_some() {
                app.cancel_form();
            } else if app.delete_target().is_some() {
                app.cancel_delete();
            } else {
                app.close_view();
            }
        }
        BrowseCommand::Categories => {
            app.load_categories().await;
            return Flow::Print(app.categories().join("\n"));
        }
        BrowseCommand::Dismiss => app.dismiss_error(),
        BrowseCommand::Help => return Flow::Print(HELP.to_string()),
        BrowseCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn no_dialog(what: &str) -> AppError {
    AppError::NotFound(format!("No {} is open", what))
}

/// Full text of the screen: header, error line, list and any open overlay.
pub fn render_screen(app: &DirectoryApp) -> String {
    let mut out = vec!["== Restaurant Directory ==".to_string()];

    let sort = app
        .params()
        .sort
        .map(|s| format!("{} {}", s.field.as_str(), s.order.as_str()))
        .unwrap_or_else(|| "default".to_string());
    out.push(format!(
        "Search: {:?}  Filters ({})  Sort: {}",
        app.search_input(),
        app.active_filter_count(),
        sort
    ));

    if let Some(options) = app.filter_options() {
        let kinds = options
            .parking_kinds()
            .iter()
            .map(|kind| {
                let mark = match app.filters().parking.as_ref().and_then(|p| p.get(*kind)) {
                    Some(true) => "x",
                    _ => " ",
                };
                format!("[{}] {}", mark, kind.label())
            })
            .collect::<Vec<_>>();
        if !kinds.is_empty() {
            out.push(format!("Parking: {}", kinds.join(" ")));
        }
    }

    if let Some(message) = app.error_message() {
        out.push(format!("! {}", message));
    }
    out.push(String::new());

    if app.is_loading() {
        out.push("Loading...".to_string());
    } else {
        out.push(render_list(app.restaurants(), app.page(), app.total_pages()));
    }

    if let Some(editor) = app.form() {
        out.push(String::new());
        out.push(editor.render());
    } else if let Some(target) = app.delete_target() {
        out.push(String::new());
        out.push(format!(
            "Delete {}? This action cannot be undone. (yes/no)",
            target.name
        ));
    } else if let Some(restaurant) = app.detail() {
        out.push(String::new());
        out.push(render_detail(restaurant));
    }

    out.join("\n")
}

/// Run the session until `quit` or end of input.
pub async fn run(api: ApiClient, config: &Config) -> CliResult {
    let mut app = DirectoryApp::new(api, config);
    app.load_filter_options().await;
    app.refresh().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        app.tick(Instant::now());
        println!("{}", render_screen(&app));
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let flow = match BrowseCommand::parse(&line) {
            Ok(command) => apply(&mut app, command).await,
            Err(e) => {
                app.report(e);
                Flow::Continue
            }
        };
        match flow {
            Flow::Continue => {}
            Flow::Print(text) => println!("{}\n", text),
            Flow::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SortField, SortOrder};

    #[test]
    fn test_parse_commands() {
        assert_eq!(BrowseCommand::parse("").unwrap(), BrowseCommand::Redraw);
        assert_eq!(
            BrowseCommand::parse("search  taco place ").unwrap(),
            BrowseCommand::Search("taco place".into())
        );
        assert_eq!(
            BrowseCommand::parse("filter city=Las Vegas").unwrap(),
            BrowseCommand::Filter {
                key: "city".into(),
                value: "Las Vegas".into()
            }
        );
        assert_eq!(
            BrowseCommand::parse("parking Valet").unwrap(),
            BrowseCommand::Parking(ParkingKind::Valet)
        );
        assert_eq!(BrowseCommand::parse("page 4").unwrap(), BrowseCommand::Page(4));
        assert_eq!(
            BrowseCommand::parse("sort review_count asc").unwrap(),
            BrowseCommand::SortBy(Some(Sort::new(SortField::ReviewCount, SortOrder::Asc)))
        );
        assert_eq!(BrowseCommand::parse("sort none").unwrap(), BrowseCommand::SortBy(None));
        assert_eq!(BrowseCommand::parse("d 2").unwrap(), BrowseCommand::Delete(2));
        assert_eq!(BrowseCommand::parse("q").unwrap(), BrowseCommand::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(BrowseCommand::parse("page two").is_err());
        assert!(BrowseCommand::parse("view").is_err());
        assert!(BrowseCommand::parse("parking helipad").is_err());
        assert!(BrowseCommand::parse("sort rating").is_err());
        assert!(BrowseCommand::parse("dance").is_err());
    }

    #[tokio::test]
    async fn test_form_commands_without_network() {
        let config = Config::default();
        let mut app = DirectoryApp::new(ApiClient::new(&config).unwrap(), &config);

        assert_eq!(apply(&mut app, BrowseCommand::Save).await, Flow::Continue);
        assert_eq!(app.error_message(), Some("No form is open"));

        apply(&mut app, BrowseCommand::Add).await;
        apply(
            &mut app,
            BrowseCommand::Set {
                key: "state".into(),
                value: "Oregon".into(),
            },
        )
        .await;
        apply(&mut app, BrowseCommand::Toggle(ParkingKind::Lot)).await;

        let editor = app.form().unwrap();
        assert!(editor.error.as_deref().unwrap().contains("State"));
        assert!(editor.form.parking.lot);

        let screen = render_screen(&app);
        assert!(screen.contains("No restaurants found."));
        assert!(screen.contains("Add New Restaurant"));
        assert!(screen.contains("[x] Lot"));

        apply(&mut app, BrowseCommand::Close).await;
        assert!(app.form().is_none());
        assert!(matches!(
            apply(&mut app, BrowseCommand::Help).await,
            Flow::Print(text) if text.contains("search TEXT")
        ));
    }
}
