//! Interactive terminal front end for the chat console.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use exportdesk_console::{
    render_entry, render_header, render_transcript, ChatConsole, ChatEntry, ConsoleError,
    ConsoleState, HttpTransport, ReplyTransport, SUGGESTED_PROMPTS,
};
use exportdesk_core::types::{Profile, Role};

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Quit,
    Prompts,
    Profile,
    /// Zero-based index into the suggested prompts.
    Suggestion(usize),
    Say(String),
    Empty,
}

impl ChatCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => ChatCommand::Empty,
            "/quit" | "/exit" => ChatCommand::Quit,
            "/prompts" => ChatCommand::Prompts,
            "/profile" => ChatCommand::Profile,
            _ => match line.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
                Some(n) if n >= 1 => ChatCommand::Suggestion(n - 1),
                _ => ChatCommand::Say(line.to_string()),
            },
        }
    }
}

fn print_entry(entry: &ChatEntry) {
    println!(
        "{}\n",
        render_entry(entry.role, &entry.content, Some(&entry.timestamp), entry.pending)
    );
}

fn print_prompts() {
    println!("Suggested prompts:");
    for (i, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
        println!("  /{}  {}", i + 1, prompt);
    }
    println!();
}

/// Echo the outgoing turn and the typing placeholder while the reply is awaited.
fn print_outgoing(text: &str) {
    println!("{}\n", render_entry(Role::User, text.trim(), None, false));
    println!("{}\n", render_entry(Role::Agent, "", None, true));
}

/// Send what `command` asks for and print the settled reply.
///
/// Returns `Ok(None)` for commands that send nothing.
async fn send_command<T: ReplyTransport>(
    console: &mut ChatConsole<T>,
    command: ChatCommand,
) -> Result<Option<ConsoleState>, ConsoleError> {
    let state = match command {
        ChatCommand::Suggestion(index) => {
            if let Some(prompt) = SUGGESTED_PROMPTS.get(index) {
                print_outgoing(prompt);
            }
            console.send_suggestion(index).await?
        }
        ChatCommand::Say(text) => {
            console.set_input(text.as_str());
            print_outgoing(&text);
            console.submit().await?
        }
        _ => return Ok(None),
    };
    if let Some(reply) = console.entries().last() {
        print_entry(reply);
    }
    Ok(Some(state))
}

/// Read lines from stdin until `/quit` or end of input.
pub async fn run(endpoint: String, profile: Profile, history_limit: usize) -> std::io::Result<()> {
    let transport = HttpTransport::new(endpoint);
    tracing::info!(endpoint = %transport.endpoint(), "Chat console started");

    let mut console = ChatConsole::new(transport, profile).with_history_limit(history_limit);

    println!("{}\n", render_header(console.profile()));
    println!("{}\n", render_transcript(console.entries()));
    print_prompts();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ChatCommand::parse(&line) {
            ChatCommand::Quit => break,
            ChatCommand::Empty => continue,
            ChatCommand::Prompts => print_prompts(),
            ChatCommand::Profile => println!("{}\n", render_header(console.profile())),
            command => match send_command(&mut console, command).await {
                Ok(state) => tracing::debug!(state = ?state, "Turn finished"),
                Err(e) => eprintln!("{}\n", e),
            },
        }
    }

    tracing::info!(entries = console.entries().len(), "Chat console closed");
    Ok(())
}
