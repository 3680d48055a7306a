use clap::Args;

use npm_use::{PackageSpec, UseError};

use super::fail;

#[derive(Args)]
pub struct AliasArgs {
    /// Package identifier, e.g. lodash@4.17.21 or @scope/pkg@1.0.0/sub/path
    pub identifier: String,
}

pub fn cmd_alias(args: AliasArgs) {
    let spec = match PackageSpec::parse(&args.identifier) {
        Ok(spec) => spec,
        Err(e) => fail(&UseError::Parse(e)),
    };

    println!("name:     {}", spec.name);
    println!("version:  {}", spec.version);
    if !spec.sub_path.is_empty() {
        println!("sub-path: {}", spec.sub_path);
    }
    println!("alias:    {}", spec.alias());
}
