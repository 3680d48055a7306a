mod cli;

use clap::{Parser, Subcommand};

use cli::alias::AliasArgs;
use cli::load::LoadArgs;
use cli::resolve::ResolveArgs;
use cli::GlobalArgs;

#[derive(Parser)]
#[command(name = "npm-use")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Install an npm package on demand and load its exports")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Install if needed, import, and print the exports as JSON
    Load(LoadArgs),
    /// Install if needed and print the resolved entry point
    Resolve(ResolveArgs),
    /// Print the parsed identifier and its install alias
    Alias(AliasArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli::init_tracing(cli.global.verbose);

    match cli.command {
        Command::Load(args) => cli::load::cmd_load(&cli.global, args).await,
        Command::Resolve(args) => cli::resolve::cmd_resolve(&cli.global, args).await,
        Command::Alias(args) => cli::alias::cmd_alias(args),
    }
}
