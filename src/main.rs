mod args;
mod bot;

use clap::Parser;
use log::{debug, warn};

use crate::args::Args;
use crate::bot::access::Invocation;
use crate::bot::{run_bot, BotRequest};

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else {
        env_logger::init();
    }
    debug!("args: {:?}", args);

    let request = BotRequest {
        config_path: args.config.clone(),
        invocation: Invocation {
            command: args.command.clone(),
            args: args.names.clone(),
            user_id: args.user_id,
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            chat_id: args.chat_id,
            chat_title: args.chat_title.clone(),
        },
        seed: args.seed,
        reference_path: args.reference.clone(),
    };

    match run_bot(&request) {
        Ok(Some(reply)) => println!("{}", reply),
        Ok(None) => {
            warn!("No reply for command {:?}", args.command);
        }
        Err(e) => {
            eprintln!("An error occured: {}", e);
            if let Some(source) = std::error::Error::source(&e) {
                eprintln!("caused by: {}", source);
            }
            std::process::exit(1);
        }
    }
}
