// The commands understood by the bot and the text of their replies.

use rand::Rng;

use crate::bot::access::{guarded, Capability, Invocation};
use crate::bot::*;

pub const START_REPLY: &str = "I'm a bot, please talk to me!";
pub const HELP_REPLY: &str = "Available commands: /start /help /people /choices [names] /roll [names]";
pub const UNKNOWN_REPLY: &str =
    "Sorry, I didn't understand that command. Type /help for a description of available commands.";
pub const NO_VOTE_REPLY: &str = "Sorry, I couldn't find any vote";
const DRUMS: &str = "\u{1f941} \u{1f941} \u{1f941}";

/// Routes a command to its handler, behind the access checks.
///
/// The spreadsheet is only loaded by the commands that need it. `None`
/// means that the bot stays silent.
pub fn dispatch<R: Rng + ?Sized>(
    config: &BotConfig,
    inv: &Invocation,
    load_sheet: &dyn Fn() -> BotResult<SheetData>,
    rng: &mut R,
) -> BotResult<Option<String>> {
    let command = inv.command.trim_start_matches('/');
    debug!("dispatch: command {:?} args {:?}", command, inv.args);
    match command {
        "start" => guarded(config, inv, Capability::Private, |_| {
            Ok(START_REPLY.to_string())
        }),
        "help" => guarded(config, inv, Capability::Private, |_| {
            Ok(HELP_REPLY.to_string())
        }),
        "people" => guarded(config, inv, Capability::Private, |_| {
            Ok(people_reply(&load_sheet()?))
        }),
        "choices" => guarded(config, inv, Capability::Private, |inv| {
            choices_reply(config, &load_sheet()?, &inv.args)
        }),
        "roll" => guarded(config, inv, Capability::Private, |inv| {
            roll_reply(config, &load_sheet()?, &inv.args, rng)
        }),
        "dump" => guarded(config, inv, Capability::Admin, |_| {
            Ok(dump_reply(&load_sheet()?))
        }),
        _ => guarded(config, inv, Capability::Private, |_| {
            Ok(UNKNOWN_REPLY.to_string())
        }),
    }
}

pub fn people_reply(sheet: &SheetData) -> String {
    format!("People: {}", sheet.participant_names().join(", "))
}

pub fn choices_reply(config: &BotConfig, sheet: &SheetData, names: &[String]) -> BotResult<String> {
    let options = config.table_options()?;
    let choices = match compute_choices(sheet, names, &options.policy) {
        Ok(c) => c,
        Err(e) => return no_vote(e),
    };
    Ok(format!(
        "Choice options for {}\n\n<pre>{}</pre>",
        choices.participants.join(", "),
        render_table(&choices, &options)
    ))
}

pub fn roll_reply<R: Rng + ?Sized>(
    config: &BotConfig,
    sheet: &SheetData,
    names: &[String],
    rng: &mut R,
) -> BotResult<String> {
    let policy = config.weight_policy()?;
    let choices = match compute_choices(sheet, names, &policy) {
        Ok(c) => c,
        Err(e) => return no_vote(e),
    };
    let place = match draw(&choices, rng) {
        Ok(p) => p,
        Err(e) => return no_vote(e),
    };
    info!("roll_reply: drew {:?} for {:?}", place, choices.participants);

    let mut text = String::new();
    if !names.is_empty() {
        text.push_str(&format!(
            "Computing roll for {}:\n",
            choices.participants.join(", ")
        ));
        text.push_str(&format!("({})\n", choices.summary()));
    }
    text.push_str(DRUMS);
    text.push('\n');
    text.push_str(place);
    Ok(text)
}

/// The parsed content of the sheet, for checking the layout settings.
pub fn dump_reply(sheet: &SheetData) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "Places: {}",
        sheet
            .places
            .iter()
            .map(|p| format!("{} ({})", p.name, p.time))
            .collect::<Vec<String>>()
            .join(", ")
    ));
    for p in sheet.participants.iter() {
        let votes: Vec<String> = p.votes.iter().map(|v| format!("{:.2}", v)).collect();
        lines.push(format!("{}: {}", p.name, votes.join(" ")));
    }
    lines.join("\n")
}

// Nobody selected and nothing worth drawing get the same answer. Layout
// errors are not expected here: the sheet was parsed already.
fn no_vote(e: ChoiceError) -> BotResult<String> {
    match e {
        ChoiceError::NoParticipants | ChoiceError::NoValidChoices => {
            info!("no vote: {}", e);
            Ok(NO_VOTE_REPLY.to_string())
        }
        ChoiceError::Parse(_) => Err(e).context(SheetSnafu {}),
    }
}
