//! Help text for the prompt commands

/// A category of commands for display in the help listing
pub struct CommandCategory {
    pub name: &'static str,
    pub commands: Vec<CommandHelp>,
}

/// A single command for display
pub struct CommandHelp {
    pub usage: &'static str,
    pub description: &'static str,
}

/// Returns categorized commands for the help listing
pub fn commands_help() -> Vec<CommandCategory> {
    vec![
        CommandCategory {
            name: "Search",
            commands: vec![
                CommandHelp {
                    usage: "search <text>  or  /<text>",
                    description: "Search the archive",
                },
                CommandHelp {
                    usage: "open <n>  or  <n>",
                    description: "Show row n of the visible panel with its attachments",
                },
                CommandHelp {
                    usage: "save <n>",
                    description: "Download attachment n and open it",
                },
            ],
        },
        CommandCategory {
            name: "Panels",
            commands: vec![
                CommandHelp {
                    usage: "recent",
                    description: "Back to recent emails",
                },
                CommandHelp {
                    usage: "results",
                    description: "Show search results again",
                },
                CommandHelp {
                    usage: "check",
                    description: "Fetch new mail and reload recent emails",
                },
            ],
        },
        CommandCategory {
            name: "General",
            commands: vec![
                CommandHelp {
                    usage: "help  or  ?",
                    description: "Show this help",
                },
                CommandHelp {
                    usage: "quit",
                    description: "Exit",
                },
            ],
        },
    ]
}

/// Render the help listing as plain text
pub fn render_help() -> String {
    let mut out = String::new();
    for category in commands_help() {
        out.push_str(category.name);
        out.push('\n');
        for command in &category.commands {
            out.push_str(&format!("  {:<28} {}\n", command.usage, command.description));
        }
    }
    out
}
