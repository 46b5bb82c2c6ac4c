use clap::{Parser, Subcommand};

/// Command-line interface definition for clampkeeper
#[derive(Parser)]
#[command(
    name = "clampkeeper",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record keeping for a vehicle-clamping business: clamps, appeals and invoicing over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Run the web application
    Serve {
        #[arg(long = "bind", help = "Address to bind (overrides bind_address)")]
        bind: Option<String>,

        #[arg(long = "port", short = 'p', help = "Port to listen on (overrides port)")]
        port: Option<u16>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Add configuration keys missing from the file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// List clamp records in the terminal
    List {
        #[arg(long = "paid", help = "Only records with payment status Paid")]
        paid: bool,

        #[arg(
            long = "status",
            conflicts_with = "paid",
            help = "Filter by payment status (Processing, Paid, \"Not Paid\")"
        )]
        status: Option<String>,
    },
}
