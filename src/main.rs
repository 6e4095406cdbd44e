//! Headless preview of the site: runs a page session against the reference
//! layout, driven by commands read from stdin.

use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use tokio::io::{
    AsyncBufReadExt,
    BufReader,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use vaktija_site::PageSession;
use vaktija_site::config::ConfigManager;
use vaktija_site::dom::layout::site_layout;
use vaktija_site::dom::{
    Dom,
    LANG_ATTR,
    MemoryDom,
    NAV_TOGGLE_ID,
    NodeId,
    PAGE_ATTR,
};
use vaktija_site::platform::{
    FileStore,
    LocalClock,
    MemoryWindow,
    ResourceFetcher,
};
use vaktija_site::session::UiEvent;

#[derive(Error, Debug)]
enum CommandError {
    #[error("Unknown command '{0}' (expected page, lang, menu, tab or back)")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("Nothing on the page matches '{0}'")]
    NoTarget(String),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();

    let site_root = std::env::args().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);

    let config = match ConfigManager::load(&site_root) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    let store = match FileStore::open(config.state_path()) {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("Failed to open preference store: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let settings = config.settings().clone();
    let dom = site_layout(&settings);
    let (events, receiver) = mpsc::channel(16);
    let _reader = tokio::spawn(read_commands(dom.clone(), events));

    tracing::info!(site_root = %site_root.display(), "Starting preview session");
    let mut session = PageSession::new(
        settings,
        dom,
        MemoryWindow::new(config.location().clone()),
        ResourceFetcher::new(),
        store,
        LocalClock,
    );
    session.run(receiver).await;

    ExitCode::SUCCESS
}

/// Forwards stdin commands as UI events until EOF.
///
/// `layout` is a copy of the page taken before the session starts; node
/// handles stay valid because the session never adds or removes elements.
async fn read_commands(layout: MemoryDom, events: mpsc::Sender<UiEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                tracing::error!("Failed to read command: {}", error);
                break;
            }
        };

        match parse_command(&layout, &line) {
            Ok(Some(event)) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(error) => tracing::warn!("{}", error),
        }
    }
}

fn parse_command(layout: &MemoryDom, line: &str) -> Result<Option<UiEvent>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    let target = match command {
        "page" => {
            let page = argument.ok_or(CommandError::MissingArgument("page"))?;
            find_by_attr(layout, PAGE_ATTR, page)
        }
        "lang" => {
            let code = argument.ok_or(CommandError::MissingArgument("lang"))?;
            find_by_attr(layout, LANG_ATTR, code)
        }
        "tab" => {
            let id = argument.ok_or(CommandError::MissingArgument("tab"))?;
            layout.element_by_id(id).ok_or_else(|| CommandError::NoTarget(id.to_string()))
        }
        "menu" => layout
            .element_by_id(NAV_TOGGLE_ID)
            .ok_or_else(|| CommandError::NoTarget(NAV_TOGGLE_ID.to_string())),
        "back" => return Ok(Some(UiEvent::Back)),
        other => return Err(CommandError::Unknown(other.to_string())),
    }?;

    Ok(Some(UiEvent::Click(target)))
}

fn find_by_attr(layout: &MemoryDom, name: &str, value: &str) -> Result<NodeId, CommandError> {
    layout
        .query_attr(name)
        .into_iter()
        .find(|(_, candidate)| candidate == value)
        .map(|(node, _)| node)
        .ok_or_else(|| CommandError::NoTarget(value.to_string()))
}
