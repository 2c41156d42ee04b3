use clap::{Parser, Subcommand};
use log::{error, info};
use speech_tray::config::{self, Config};
use speech_tray::error::{Result, SpeechError};
use speech_tray::instance::{self, InstanceGuard};
use speech_tray::notifications::Notifier;
use speech_tray::player::SpeechPlayer;
use speech_tray::router::AppContext;
use speech_tray::window::{self, RfdSavePrompt};
use speech_tray::{i18n, logging};

#[derive(Parser)]
#[command(name = "speech-tray")]
#[command(about = "Read the clipboard or the selected text aloud from the system tray")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the tray application (the default)
    Run,

    /// Stop the running instance
    Stop,

    /// Show whether an instance is running
    Status,

    /// Inspect or change persisted settings
    Config {
        /// Set the reading language (must be one of the configured languages)
        #[arg(long)]
        lang: Option<String>,

        /// Set the voice speed (must be one of the configured speeds)
        #[arg(long)]
        speed: Option<f32>,

        /// Prefer the indicator over the legacy status icon
        #[arg(long)]
        indicator: Option<bool>,

        /// Show current configuration
        #[arg(long, short)]
        show: bool,
    },
}

fn main() -> Result<()> {
    // Initialize configuration to get log file path
    let config = Config::new()?;
    logging::init_logging(&config.paths().log_file)?;

    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Run) => run_app(config),
        Some(Commands::Stop) => stop_instance(&config),
        Some(Commands::Status) => show_status(&config),
        Some(Commands::Config {
            lang,
            speed,
            indicator,
            show,
        }) => configure(&config, lang, speed, indicator, show),
    }
}

fn run_app(config: Config) -> Result<()> {
    let conf = config.app_config()?;
    let _guard = InstanceGuard::acquire(&conf.app_name, &conf.pid)?;

    let settings = config.settings()?;
    let notifier = Notifier::new(&conf, settings.show_notifications);
    let strings = i18n::current();

    let player = match SpeechPlayer::new(&conf, config.paths().speech_file.clone()) {
        Ok(player) => player,
        Err(e) => {
            error!("Failed to start speech player: {e}");
            notifier.show(strings.error_title, &e.to_string()).ok();
            return Err(e);
        }
    };

    let log_file = config.paths().log_file.clone();
    let ctx = AppContext::new(
        conf,
        config,
        player,
        notifier,
        strings,
        Box::new(RfdSavePrompt),
    );

    window::run(ctx, log_file)?;
    info!("Exiting");
    Ok(())
}

fn stop_instance(config: &Config) -> Result<()> {
    let pid_file = &config.paths().pid_file;

    let Some(pid) = instance::running_instance(pid_file) else {
        println!("{} is not running", config::APP_NAME);
        return Ok(());
    };

    instance::terminate(pid)?;
    std::fs::remove_file(pid_file).ok();
    println!("{} stopped", config::APP_NAME);
    Ok(())
}

fn show_status(config: &Config) -> Result<()> {
    match instance::running_instance(&config.paths().pid_file) {
        Some(pid) => println!("{} is running (PID: {pid})", config::APP_NAME),
        None => println!("{} is not running", config::APP_NAME),
    }
    Ok(())
}

fn configure(
    config: &Config,
    lang: Option<String>,
    speed: Option<f32>,
    indicator: Option<bool>,
    show: bool,
) -> Result<()> {
    if lang.is_some() || speed.is_some() || indicator.is_some() {
        let mut settings = config.settings()?;

        if let Some(lang) = lang {
            if !settings.list_langs.contains(&lang) {
                return Err(SpeechError::InvalidConfiguration(format!(
                    "Unknown language '{lang}', expected one of: {}",
                    settings.list_langs.join(", ")
                )));
            }
            settings.lang = lang;
        }

        if let Some(speed) = speed {
            if !settings
                .list_voice_speed
                .iter()
                .any(|s| config::app::speed_label(*s) == config::app::speed_label(speed))
            {
                return Err(SpeechError::InvalidConfiguration(format!(
                    "Unknown voice speed {speed}"
                )));
            }
            settings.voice_speed = speed;
        }

        if let Some(indicator) = indicator {
            settings.has_app_indicator = indicator;
        }

        settings.validate()?;
        config.update_settings(|s| *s = settings)?;
        println!("Configuration updated. Restart {} to apply.", config::APP_NAME);
    }

    if show {
        let settings = config.settings()?;
        println!("Configuration:");
        println!("  Language: {}", settings.lang);
        println!("  Languages: {}", settings.list_langs.join(", "));
        println!(
            "  Voice speed: {}",
            config::app::speed_label(settings.voice_speed)
        );
        println!(
            "  Voice speeds: {}",
            settings
                .list_voice_speed
                .iter()
                .map(|s| config::app::speed_label(*s))
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("  Indicator: {}", settings.has_app_indicator);
        println!("  Notifications: {}", settings.show_notifications);
        println!("  Settings file: {}", config.paths().settings_file.display());
        println!("  Log file: {}", config.paths().log_file.display());
    }

    Ok(())
}
