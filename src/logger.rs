use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Log target for the one-line-per-request audit trail.
pub const AUDIT_TARGET: &str = "querylite::audit";

const ENCODER_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

/// Initializes the logging system from `log4rs.yaml` in the working directory.
/// Prefer `configure_logging` for programmatic control.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    init_path(Path::new("log4rs.yaml"))
}

/// Initializes the logging system from a specific config file path.
pub fn init_path(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())?;
    Ok(())
}

/// error|warn|info|debug|trace (case-insensitive); anything else is `Info`.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Configure rolling file logging for the process: `app.log` for everything and
/// `audit.log` for the audit target.
/// - dir: base directory for logs; if None, current directory.
/// - level: error|warn|info|debug|trace
/// - retention: number of rolled files to keep (default 7)
///
/// # Errors
/// Returns an error if the directory cannot be created or a logger is already installed.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    use log4rs::append::rolling_file::RollingFileAppender;
    use log4rs::append::rolling_file::policy::compound::{
        CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
    };
    use log4rs::config::{Appender, Config, Logger, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let base = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    std::fs::create_dir_all(&base)?;
    let keep = retention.unwrap_or(7);
    let lvl = parse_level(level.unwrap_or("info"));

    let rolling = |stem: &str| -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
        let roller = FixedWindowRoller::builder()
            .build(&format!("{}", base.join(format!("{stem}.{{}}.log")).display()), keep)?;
        let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
        Ok(RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(ENCODER_PATTERN)))
            .build(base.join(format!("{stem}.log")), Box::new(policy))?)
    };

    let config = Config::builder()
        .appender(Appender::builder().build("app", Box::new(rolling("app")?)))
        .appender(Appender::builder().build("audit", Box::new(rolling("audit")?)))
        .logger(Logger::builder().appender("audit").additive(false).build(AUDIT_TARGET, lvl))
        .build(Root::builder().appender("app").build(lvl))?;
    log4rs::init_config(config)?;
    Ok(())
}

/// Configure logging from environment variables if present:
/// - QUERYLITE_LOG_DIR
/// - QUERYLITE_LOG_LEVEL
/// - QUERYLITE_LOG_RETENTION
///
/// # Errors
/// Same as [`configure_logging`].
pub fn configure_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::var("QUERYLITE_LOG_DIR").ok().map(PathBuf::from);
    let level = std::env::var("QUERYLITE_LOG_LEVEL").ok();
    let retention =
        std::env::var("QUERYLITE_LOG_RETENTION").ok().and_then(|s| s.parse::<u32>().ok());
    configure_logging(dir.as_deref(), level.as_deref(), retention)
}
