use clap::Args;

use super::{fail, importer, GlobalArgs};

#[derive(Args)]
pub struct LoadArgs {
    /// Package identifier, e.g. lodash@4.17.21 or @scope/pkg@1.0.0/sub/path
    pub identifier: String,
    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

pub async fn cmd_load(global: &GlobalArgs, args: LoadArgs) {
    let importer = importer(global);
    let module = match importer.use_package(&args.identifier).await {
        Ok(module) => module,
        Err(e) => fail(&e),
    };

    let rendered = if args.compact {
        serde_json::to_string(&module)
    } else {
        serde_json::to_string_pretty(&module)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: cannot print exports: {}", e);
            std::process::exit(1);
        }
    }
}
