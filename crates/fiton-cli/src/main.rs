use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use fiton_cli::OutputFormat;
use fiton_cli::commands::{self, run::RunArgs};

#[derive(Parser)]
#[command(name = "fiton-e2e")]
#[command(author, version)]
#[command(
    about = "End-to-end browser checks for the FITON measurement form and avatar generator",
    long_about = "fiton-e2e drives Chrome through the FITON web app: it fills the measurement form, \
                  triggers avatar generation and asserts on what the page renders. \
                  Without a subcommand it runs every built-in scenario.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run end-to-end scenarios against the app (default)
    Run(RunArgs),

    /// List the built-in scenarios
    List {
        /// Show each scenario's steps
        #[arg(long)]
        steps: bool,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  \
        bash, zsh, fish, powershell, elvish\n\n\
        INSTALLATION:\n  \
        bash:  fiton-e2e completion --shell bash >> ~/.bashrc\n  \
        zsh:   fiton-e2e completion --shell zsh >> ~/.zshrc\n  \
        fish:  fiton-e2e completion --shell fish > ~/.config/fish/completions/fiton-e2e.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match cli.command {
        None => commands::run::execute(cli.run, cli.format),
        Some(Commands::Run(args)) => commands::run::execute(args, cli.format),
        Some(Commands::List { steps }) => commands::list::execute(steps, cli.format),
        Some(Commands::Completion { shell }) => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("fiton_e2e=debug,fiton_cli=debug,fiton_core=debug,fiton_browser=debug")
    } else {
        EnvFilter::new("fiton_e2e=info,fiton_cli=info,fiton_browser=info")
    };

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
