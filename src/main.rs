use clap::{Parser, Subcommand};
use snapfx::config::{self, AppConfig};
use snapfx::imaging::{Quality, RustRenderer};
use snapfx::output;
use snapfx::session::{EffectOutcome, Session};
use snapfx::share::{DirectoryShare, ShareTarget};
use snapfx::shell::{Command as ShellCommand, Event, ShareOptions, Shell};
use snapfx::source::{DesktopSource, ImageSource, PendingImage};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Shared flags for commands that produce photos.
#[derive(clap::Args, Clone)]
struct ShareArgs {
    /// Directory shared photos are written to
    #[arg(long, default_value = "shared")]
    out: PathBuf,
}

#[derive(Parser)]
#[command(name = "snapfx")]
#[command(about = "Apply photo effects and share the result")]
#[command(long_about = "\
Apply photo effects and share the result

Take a photo with the camera or import one, press 'effect' to cycle
through the built-in filters, and share what you like.

Filters, in the order 'effect' applies them:

  mono, chrome, fade, instant, noir, process, tonal, transfer, sepia-tone

Each effect starts from the original photo; filters never stack.
Shared photos are scaled to 1024px wide (configurable).

Run 'snapfx gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the filters in application order
    Filters,
    /// Import a photo, apply effects, and share the last one
    Apply {
        /// Photo to import
        input: PathBuf,
        /// How many times to press "effect"
        #[arg(long, default_value_t = 1)]
        times: usize,
        #[command(flatten)]
        share: ShareArgs,
    },
    /// Take a photo, apply effects, and share the last one
    Capture {
        /// How many times to press "effect"
        #[arg(long, default_value_t = 1)]
        times: usize,
        #[command(flatten)]
        share: ShareArgs,
    },
    /// Interactive session reading commands from stdin
    Shell {
        #[command(flatten)]
        share: ShareArgs,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG controls verbosity, e.g. RUST_LOG=snapfx=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("snapfx=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Filters => output::print_filters(),
        Command::GenConfig => print!("{}", config::stock_config_toml()),
        Command::Apply {
            input,
            times,
            share,
        } => {
            let config = config::resolve_config(cli.config.as_deref())?;
            init_thread_pool(&config.processing);
            let source = DesktopSource::new(config.camera.command.clone());
            println!("==> Importing {}", input.display());
            run_batch(source.pick_from_library(&input), times, &share.out, &config)?;
        }
        Command::Capture { times, share } => {
            let config = config::resolve_config(cli.config.as_deref())?;
            init_thread_pool(&config.processing);
            let source = DesktopSource::new(config.camera.command.clone());
            if !source.is_camera_available() {
                return Err("no camera available (see [camera] command in config)".into());
            }
            println!("==> Capturing");
            run_batch(source.capture_from_camera(), times, &share.out, &config)?;
        }
        Command::Shell { share } => {
            let config = config::resolve_config(cli.config.as_deref())?;
            init_thread_pool(&config.processing);
            run_shell(&share.out, &config);
        }
    }

    Ok(())
}

/// Non-interactive session: wait for the photo, press "effect" `times`
/// times, share what is shown.
fn run_batch(
    pending: PendingImage,
    times: usize,
    out: &Path,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();
    session.source_resolved(pending.wait())?;

    let renderer = RustRenderer::new();
    for _ in 0..times {
        match session.apply_effect(&renderer) {
            EffectOutcome::Applied(filter) => println!("Applied {}", filter),
            EffectOutcome::Failed(e) => println!("Effect failed: {}", e),
            EffectOutcome::NoSource => break,
        }
    }

    let Some(item) = session.share_item(&config.share.title, config.share.width)? else {
        return Err("nothing to share".into());
    };
    let path = share_target(out, config).share(&item)?;
    println!("Shared → {}", path.display());
    Ok(())
}

/// Interactive session: one thread reads stdin, the main thread owns the
/// shell and handles events in order.
fn run_shell(out: &Path, config: &AppConfig) {
    let (tx, rx) = mpsc::channel();

    let input_tx = tx.clone();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match ShellCommand::parse(&line) {
                Ok(Some(command)) => {
                    if input_tx.send(Event::Command(command)).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(message) => eprintln!("{}", message),
            }
        }
        // End of input ends the session.
        let _ = input_tx.send(Event::Command(ShellCommand::Quit));
    });

    let mut shell = Shell::new(
        DesktopSource::new(config.camera.command.clone()),
        RustRenderer::new(),
        share_target(out, config),
        ShareOptions {
            title: config.share.title.clone(),
            width: config.share.width,
        },
        tx,
    );
    println!("snapfx shell: type 'help' for commands");
    shell.run(&rx, |report| {
        for line in output::format_report(report) {
            println!("{}", line);
        }
    });
}

fn share_target(out: &Path, config: &AppConfig) -> DirectoryShare {
    DirectoryShare::new(out, config.share.format, Quality::new(config.share.quality))
        .open_after_share(config.share.open)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
