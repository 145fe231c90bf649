use clap::Parser;

/// Runs one command of the pintxo bot against a local export of the voting spreadsheet
/// and prints the reply.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON configuration of the bot: spreadsheet location, layout, locale,
    /// weighting and the lists of allowed chats and administrators.
    #[clap(short, long, value_parser, default_value = "pintxobot.json")]
    pub config: String,

    /// The command to run: start, help, people, choices, roll or dump. A leading '/' is accepted.
    #[clap(value_parser)]
    pub command: String,

    /// (list of names, optional) The people present. When empty, everybody in the spreadsheet
    /// takes part.
    #[clap(value_parser)]
    pub names: Vec<String>,

    /// The id of the user sending the command.
    #[clap(long, value_parser, default_value_t = 0, allow_hyphen_values = true)]
    pub user_id: i64,

    #[clap(long, value_parser, default_value = "")]
    pub first_name: String,

    #[clap(long, value_parser, default_value = "")]
    pub last_name: String,

    /// The id of the chat the command comes from. Group chats have negative ids.
    #[clap(long, value_parser, default_value_t = 0, allow_hyphen_values = true)]
    pub chat_id: i64,

    #[clap(long, value_parser, default_value = "")]
    pub chat_title: String,

    /// (integer, optional) Seed for the random draw, to make a roll reproducible.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// (file path) A reference file containing the expected reply. If provided, the reply is
    /// compared with it and the differences are printed.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
