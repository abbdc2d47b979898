use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show help")]
    H,
    #[command(description = "Show help")]
    Help,
    #[command(description = "More info")]
    Info,
    #[command(description = "Query: '/q <word>'")]
    Q(String),
    #[command(description = "Translate: '/t <source lang> <target lang> <text>'")]
    T(String),
    #[command(description = "Get character usage for the current period")]
    U,
    #[command(description = "Show the id of this chat")]
    Id,
}
