use std::process;

use clap::Args;

use super::{fail, importer, GlobalArgs};

#[derive(Args)]
pub struct ResolveArgs {
    /// Package identifier, e.g. lodash@4.17.21 or @scope/pkg@1.0.0/sub/path
    pub identifier: String,
    /// Only look at what is installed; never run the installer
    #[arg(long)]
    pub no_install: bool,
}

pub async fn cmd_resolve(global: &GlobalArgs, args: ResolveArgs) {
    let importer = importer(global);

    if args.no_install {
        match importer.locate(&args.identifier).await {
            Ok(Some(entry)) => println!("{}", entry.display()),
            Ok(None) => {
                eprintln!("'{}' is not installed", args.identifier);
                process::exit(1);
            }
            Err(e) => fail(&e),
        }
        return;
    }

    match importer.resolve(&args.identifier).await {
        Ok(resolved) => {
            if resolved.installed {
                eprintln!("Installed {} as {}", resolved.spec.package(), resolved.alias);
            }
            println!("{}", resolved.entry.display());
        }
        Err(e) => fail(&e),
    }
}
