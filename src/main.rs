use anyhow::{bail, Context};
use busline::{init_logging, EventBus, EventBusConfig, Listener, BUILD_DATE, VERSION};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const USAGE: &str = "Usage: busline [--config <file.toml|file.json>] [--version]";

fn main() -> anyhow::Result<()> {
    let config_path = match parse_args(std::env::args().skip(1))? {
        Command::Run(config_path) => config_path,
        Command::Exit => return Ok(()),
    };

    init_logging()?;

    let config = match config_path {
        Some(path) => EventBusConfig::load_from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EventBusConfig::default(),
    };

    // Composition root: one bus, handed to every component by clone
    let bus: EventBus = EventBus::with_config(config);
    let delivered = Arc::new(AtomicUsize::new(0));

    let audit_count = delivered.clone();
    let audit = Listener::new(move |payload: Option<&Value>| {
        audit_count.fetch_add(1, Ordering::Relaxed);
        tracing::info!(?payload, "audit");
    });
    bus.on("*", &audit);

    let sessions = Listener::new(|payload: Option<&Value>| {
        let user = payload
            .and_then(|p| p.get("user"))
            .and_then(Value::as_str)
            .unwrap_or("anonymous");
        tracing::info!(user, "session change");
    });
    bus.on("session:*", &sessions);

    bus.once(
        "app:ready",
        &Listener::new(|_: Option<&Value>| tracing::info!("first ready signal")),
    );

    bus.emit("app:ready", None);
    bus.emit("app:ready", None);
    bus.emit("session:login", Some(&json!({ "user": "ada" })));
    bus.emit("session:logout", Some(&json!({ "user": "ada" })));

    bus.off("session:*", &sessions);
    bus.emit("session:login", Some(&json!({ "user": "grace" })));

    println!(
        "delivered {} events to the audit listener; keys: {:?}",
        delivered.load(Ordering::Relaxed),
        bus.keys()
    );
    Ok(())
}

/// What the command line asked for
#[derive(Debug, PartialEq)]
enum Command {
    /// Run the demo, optionally with a config file
    Run(Option<PathBuf>),
    /// Help or version was printed; nothing else to do
    Exit,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Command> {
    let mut args = args.into_iter();
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => bail!("--config needs a path\n{}", USAGE),
            },
            "--version" | "-V" => {
                println!("busline {} (built {})", VERSION, BUILD_DATE);
                return Ok(Command::Exit);
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(Command::Exit);
            }
            other => bail!("unexpected argument '{}'\n{}", other, USAGE),
        }
    }

    Ok(Command::Run(config))
}
