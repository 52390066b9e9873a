//! Clean subcommand

use super::CleanArgs;
use convenient_less::{clean_outputs, discover, OutputNaming};

pub fn execute(args: CleanArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let root = args.input.input_dir.canonicalize()?;
    let items = discover(&root);

    let naming = OutputNaming {
        output_dir: args.input.out_dir.clone(),
        keep_relative_dir: args.input.keep_relative_dir,
        extension: args.input.extension.clone(),
    };

    Ok(clean_outputs(&items, &naming))
}
