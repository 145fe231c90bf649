// Access checks wrapped around the command handlers.

use crate::bot::*;

/// Who sent a command, from where, and with which arguments.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub chat_id: i64,
    pub chat_title: String,
}

/// What the sender of a command must be allowed to do.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Capability {
    /// The command comes from a whitelisted chat.
    Private,
    /// The command comes from one of the bot administrators, in any chat.
    Admin,
}

pub fn is_allowed(config: &BotConfig, inv: &Invocation, capability: Capability) -> bool {
    match capability {
        Capability::Private => config.chat_whitelist.contains(&inv.chat_id),
        Capability::Admin => config.bot_admins.contains(&inv.user_id),
    }
}

/// Runs `handler` if the sender has `capability`.
///
/// A denied command is logged and gets no reply at all.
pub fn guarded<F>(
    config: &BotConfig,
    inv: &Invocation,
    capability: Capability,
    handler: F,
) -> BotResult<Option<String>>
where
    F: FnOnce(&Invocation) -> BotResult<String>,
{
    if !is_allowed(config, inv, capability) {
        warn!("{} DENIED", request_line(inv, capability));
        return Ok(None);
    }
    info!("{}", request_line(inv, capability));
    let reply = handler(inv)?;
    info!("Successful reply to {}", inv.user_id);
    Ok(Some(reply))
}

// GET /cmd (admin) from channel 'title'(id): first last (uid)
fn request_line(inv: &Invocation, capability: Capability) -> String {
    let admin_tag = if capability == Capability::Admin {
        " (admin)"
    } else {
        ""
    };
    format!(
        "GET /{}{} from channel '{}'({}): {} {} ({})",
        inv.command.trim_start_matches('/'),
        admin_tag,
        inv.chat_title,
        inv.chat_id,
        inv.first_name,
        inv.last_name,
        inv.user_id
    )
}
