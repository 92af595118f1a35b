//! Line-driven directory session against the headless map surface.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use asistencia_core::{AppConfig, Catalog, Coordinate};
use asistencia_map::{DirectorySession, EngineConfig, HeadlessSurface, SurfaceEvent};

const HELP: &str = "\
commands:
  search <text>       filter by free text (empty clears)
  category <name>     filter by category
  province <name>     filter by province
  city <text>         filter by city substring
  clear               clear every filter and the selection
  select <n>          select entry n of the list
  click <lat,lng>     click the map background (sets a manual location)
  locate <lat,lng>    deliver a device location fix
  panel               open or close the side panel
  list                print the current list
  help                show this help
  quit                leave";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ExploreCommand {
    Search(String),
    Category(String),
    Province(String),
    City(String),
    Clear,
    Select(usize),
    Click(Coordinate),
    Locate(Coordinate),
    Panel,
    List,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub(crate) fn parse_command(line: &str) -> Result<Option<ExploreCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_lowercase().as_str() {
        "search" => ExploreCommand::Search(rest.to_string()),
        "category" => ExploreCommand::Category(rest.to_string()),
        "province" => ExploreCommand::Province(rest.to_string()),
        "city" => ExploreCommand::City(rest.to_string()),
        "clear" => ExploreCommand::Clear,
        "select" => {
            let n: usize = rest
                .parse()
                .map_err(|_| format!("expected an entry number, got '{rest}'"))?;
            if n == 0 {
                return Err("entries are numbered from 1".to_string());
            }
            ExploreCommand::Select(n)
        }
        "click" => ExploreCommand::Click(rest.parse()?),
        "locate" => ExploreCommand::Locate(rest.parse()?),
        "panel" => ExploreCommand::Panel,
        "list" | "ls" => ExploreCommand::List,
        "help" | "?" => ExploreCommand::Help,
        "quit" | "exit" => ExploreCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

fn print_status(session: &DirectorySession<HeadlessSurface>) {
    let location = session.location();
    let at = location
        .current()
        .map_or_else(|| "unknown".to_string(), |c| c.to_string());
    let selected = session
        .selection()
        .and_then(|id| session.visible().iter().find(|p| p.id() == id))
        .map_or("none", |p| p.provider.name.as_str());
    let markers = session
        .engine()
        .surface()
        .map_or(0, HeadlessSurface::live_count);
    println!(
        "{} providers | location {at} ({}) | selected: {selected} | markers on map: {markers}",
        session.visible().len(),
        location.source(),
    );
}

/// Applies one command. Returns `false` when the session should end.
fn apply(session: &mut DirectorySession<HeadlessSurface>, command: ExploreCommand) -> bool {
    match command {
        ExploreCommand::Search(text) => session.set_search_text(&text),
        ExploreCommand::Category(name) => session.set_category(&name),
        ExploreCommand::Province(name) => session.set_province(&name),
        ExploreCommand::City(text) => session.set_city(&text),
        ExploreCommand::Clear => session.clear_filters(),
        ExploreCommand::Select(n) => {
            let Some(id) = session.visible().get(n - 1).map(|p| p.id().clone()) else {
                println!("there is no entry {n}");
                return true;
            };
            if let Err(e) = session.select(&id) {
                println!("{e}");
            }
        }
        ExploreCommand::Click(at) => {
            if let Err(e) = session.handle_event(SurfaceEvent::BackgroundClicked(at)) {
                println!("{e}");
            }
        }
        ExploreCommand::Locate(at) => session.apply_geolocation(at),
        ExploreCommand::Panel => {
            let open = session.toggle_panel(Instant::now());
            println!("panel {}", if open { "opened" } else { "closed" });
            return true;
        }
        ExploreCommand::List => {
            crate::list::print_table(session.visible());
            return true;
        }
        ExploreCommand::Help => {
            println!("{HELP}");
            return true;
        }
        ExploreCommand::Quit => return false,
    }
    print_status(session);
    true
}

/// Runs the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be flushed.
pub(crate) fn run_explore(
    catalog: Catalog,
    config: &AppConfig,
    near: Option<Coordinate>,
) -> anyhow::Result<()> {
    let engine = EngineConfig {
        initial_center: config.fallback_location,
        ..EngineConfig::default()
    };
    let settle = engine.settle_delay;
    let mut session = DirectorySession::new(
        catalog,
        config.manual_override,
        config.search_scope,
        engine,
    );
    session.attach_surface(HeadlessSurface::new())?;
    session.apply_default_location(config.fallback_location);
    if let Some(at) = near {
        session.apply_geolocation(at);
    }

    println!("{HELP}");
    print_status(&session);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let keep_going = match parse_command(&line) {
            Ok(Some(command)) => apply(&mut session, command),
            Ok(None) => true,
            Err(e) => {
                println!("{e}");
                true
            }
        };
        if !keep_going {
            break;
        }

        // The prompt is synchronous, so let a pending geometry refresh settle here.
        if session.engine().refresh_pending() {
            std::thread::sleep(settle + Duration::from_millis(1));
            session.tick(Instant::now());
        }
    }

    session.teardown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_commands_with_spaces() {
        assert_eq!(
            parse_command("category Auxilio Vial").unwrap(),
            Some(ExploreCommand::Category("Auxilio Vial".to_string()))
        );
        assert_eq!(
            parse_command("search").unwrap(),
            Some(ExploreCommand::Search(String::new()))
        );
    }

    #[test]
    fn parses_coordinates() {
        assert_eq!(
            parse_command("click -1.0,-79.0").unwrap(),
            Some(ExploreCommand::Click(Coordinate {
                lat: -1.0,
                lng: -79.0
            }))
        );
        assert!(parse_command("locate 95,0").is_err());
    }

    #[test]
    fn select_is_one_based() {
        assert_eq!(
            parse_command("select 2").unwrap(),
            Some(ExploreCommand::Select(2))
        );
        assert!(parse_command("select 0").is_err());
        assert!(parse_command("select primero").is_err());
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert!(parse_command("fly").is_err());
        assert_eq!(parse_command("QUIT").unwrap(), Some(ExploreCommand::Quit));
    }
}
