use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;

use wordhtml_core::models::preset::Preset;
use wordhtml_desktop::commands;
use wordhtml_desktop::config::{self, AppConfig};
use wordhtml_desktop::dialogs::NativePicker;
use wordhtml_desktop::report::ConversionReport;
use wordhtml_desktop::session::Session;
use wordhtml_desktop::state::DesktopState;
use wordhtml_export::docx::DocxConverter;
use wordhtml_export::stylesheet::compile_stylesheet;

#[derive(Debug, Parser)]
#[command(name = "wordhtml", version, about = "Convert Word documents to styled HTML")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert the given documents.
    Convert {
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,
        /// Output directory. Defaults to the saved one, then the desktop.
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
        #[command(flatten)]
        style: StyleArgs,
        /// Remember the options and output directory for next time.
        #[arg(long)]
        save: bool,
    },
    /// Choose documents and an output folder with native dialogs, then convert.
    Pick {
        #[command(flatten)]
        style: StyleArgs,
        #[arg(long)]
        save: bool,
    },
    /// Print the stylesheet the current options compile to.
    Css {
        #[command(flatten)]
        style: StyleArgs,
    },
    /// List the built-in presets.
    Presets,
    /// Show or reset saved settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Reset,
}

#[derive(Debug, Args)]
struct StyleArgs {
    /// Start from this preset instead of the saved options.
    #[arg(long)]
    preset: Option<Preset>,
    /// Override one option, e.g. `--set font_size=14`. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    assignments: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            files,
            output,
            style,
            save,
        } => {
            let mut session = session_with(&style)?;
            session.add_files(files)?;
            if let Some(dir) = output {
                session.set_output_dir(dir);
            }
            ensure_output_dir(&mut session)?;
            run_conversion(DesktopState::new(session), save).await
        }
        Command::Pick { style, save } => {
            let mut session = session_with(&style)?;
            ensure_output_dir(&mut session)?;
            let picker = NativePicker {
                start_dir: dirs::document_dir(),
            };
            let state = DesktopState::new(session);

            let files = commands::select_files(&state, &picker)
                .await
                .map_err(|e| eyre::eyre!(e))?;
            if files.is_empty() {
                println!("No files selected");
                return Ok(());
            }
            commands::select_output_directory(&state, &picker)
                .await
                .map_err(|e| eyre::eyre!(e))?;
            run_conversion(state, save).await
        }
        Command::Css { style } => {
            let session = session_with(&style)?;
            print!("{}", compile_stylesheet(session.options())?);
            Ok(())
        }
        Command::Presets => {
            for preset in Preset::ALL {
                println!("{:<14} {}", preset.name(), preset.description());
            }
            Ok(())
        }
        Command::Config { action } => match action {
            ConfigAction::Show => {
                if !config::has_config() {
                    println!("No saved settings");
                    return Ok(());
                }
                let saved = config::load_config()?;
                println!("{}", config::config_path()?.display());
                println!("{}", serde_json::to_string_pretty(&saved)?);
                Ok(())
            }
            ConfigAction::Reset => config::delete_config(),
        },
    }
}

/// Saved settings (when readable) with the command-line overrides applied.
fn session_with(style: &StyleArgs) -> Result<Session> {
    let mut session = if config::has_config() {
        match config::load_config() {
            Ok(saved) => saved.to_session(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable saved settings");
                Session::default()
            }
        }
    } else {
        Session::default()
    };

    if let Some(preset) = style.preset {
        session.apply_preset(preset);
    }
    for assignment in &style.assignments {
        session.assign_option(assignment)?;
    }
    Ok(session)
}

fn ensure_output_dir(session: &mut Session) -> Result<()> {
    if session.output_dir().is_some() {
        return Ok(());
    }
    let dir = dirs::desktop_dir()
        .or_else(|| std::env::current_dir().ok())
        .ok_or_else(|| eyre::eyre!("no output directory available; pass --output"))?;
    session.set_output_dir(dir);
    Ok(())
}

async fn run_conversion(state: DesktopState, save: bool) -> Result<()> {
    let report: ConversionReport = commands::start_conversion(&state, &DocxConverter)
        .await
        .map_err(|e| eyre::eyre!(e))?;
    print!("{}", report.render());

    if save {
        let session = state.session.lock().await;
        config::save_config(&AppConfig::from_session(&session))?;
    }

    if report.summary.failed > 0 {
        return Err(eyre::eyre!(
            "{} of {} files failed",
            report.summary.failed,
            report.summary.total()
        ));
    }
    Ok(())
}
