//! Interactive terminal chat client
//!
//! Run with: cargo run --example chat_client [HUB_ADDR]
//!
//! Connects to a running hub (see the hub_server example), registers a
//! username and then reads messages from stdin. A background task polls the
//! hub every 500 ms and prints whatever arrived. Lines starting with `/` are
//! commands; everything else is sent as a chat message.

use std::io::Write as _;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use chathub_rs::hub::{format_duration, validate, HubConfig, Message, MessageKind};
use chathub_rs::{ClientConfig, HubClient};

const CYAN: &str = "\x1b[96m";
const GREEN: &str = "\x1b[92m";
const BLUE: &str = "\x1b[94m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

const HELP: &str = "
Commands:
  /help     Show this help
  /users    List users online
  /history  Show recent messages
  /stats    Show hub statistics
  /clear    Clear the screen
  /quit     Leave the chat

Anything else is sent as a message.
";

fn prompt(name: &str) {
    print!("{}{}{}> ", BOLD, name, RESET);
    let _ = std::io::stdout().flush();
}

/// Print one message with the color scheme of the terminal UI
fn render(msg: &Message, own_name: &str) {
    let time = msg.created_at.with_timezone(&Local).format("%H:%M:%S");
    match msg.kind {
        MessageKind::System => println!("\r{}[{}] {}{}", CYAN, time, msg.content, RESET),
        MessageKind::Error => println!("\r{}[{}] {}{}", RED, time, msg.content, RESET),
        MessageKind::Normal if msg.sender == own_name => {
            println!("\r{}[{}] You: {}{}", GREEN, time, msg.content, RESET)
        }
        MessageKind::Normal => println!(
            "\r{}[{}] {}: {}{}",
            BLUE, time, msg.sender, msg.content, RESET
        ),
    }
}

/// Background task: poll for new messages and print them
async fn poll_loop(
    client: Arc<Mutex<HubClient>>,
    name: String,
    interval: Duration,
    running: Arc<AtomicBool>,
) {
    let mut errors = 0u32;

    while running.load(Ordering::Relaxed) {
        tokio::time::sleep(interval).await;

        let polled = client.lock().await.poll_new(&name).await;
        match polled {
            Ok(messages) => {
                errors = 0;
                if !messages.is_empty() {
                    for msg in &messages {
                        render(msg, &name);
                    }
                    prompt(&name);
                }
            }
            Err(e) => {
                errors += 1;
                if errors >= 5 {
                    println!("\r{}Connection lost: {}{}", RED, e, RESET);
                    running.store(false, Ordering::Relaxed);
                    break;
                }
            }
        }
    }
}

/// Prompt for a username until the hub accepts one (3 attempts)
///
/// Names are pre-validated locally so obviously bad input never leaves the
/// terminal.
async fn register(
    client: &Arc<Mutex<HubClient>>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Option<String> {
    let rules = HubConfig::default();

    println!("{}Pick a username (3-20 characters: letters, digits, _){}", CYAN, RESET);

    let mut attempts = 0;
    while attempts < 3 {
        print!("{}Name:{} ", BOLD, RESET);
        let _ = std::io::stdout().flush();

        let name = match lines.next_line().await {
            Ok(Some(line)) => line.trim().to_string(),
            _ => return None,
        };
        if name.is_empty() {
            continue;
        }

        if let Err(rejection) = validate::check_username(&name, &rules) {
            println!("{}{}{}", RED, rejection, RESET);
            attempts += 1;
            continue;
        }

        match client.lock().await.register(&name).await {
            Ok((true, greeting)) => {
                println!("{}{}{}", GREEN, greeting, RESET);
                return Some(name);
            }
            Ok((false, reason)) => {
                println!("{}{}{}", RED, reason, RESET);
                attempts += 1;
            }
            Err(e) => {
                println!("{}Registration failed: {}{}", RED, e, RESET);
                return None;
            }
        }
    }

    println!("{}Too many attempts{}", RED, RESET);
    None
}

/// Handle a `/command` line; returns false when the client should quit
async fn handle_command(client: &Arc<Mutex<HubClient>>, own_name: &str, line: &str) -> bool {
    match line.to_lowercase().as_str() {
        "/help" => println!("{}", HELP),
        "/users" => match client.lock().await.online().await {
            Ok(names) => {
                println!("\n{}Online ({}):{}", BOLD, names.len(), RESET);
                for name in &names {
                    if name == own_name {
                        println!("{}  -> {}{}", GREEN, name, RESET);
                    } else {
                        println!("{}     {}{}", BLUE, name, RESET);
                    }
                }
                println!();
            }
            Err(e) => println!("{}Error: {}{}", RED, e, RESET),
        },
        "/history" => match client.lock().await.history(20).await {
            Ok(messages) => {
                println!("\n{}History:{}", BOLD, RESET);
                if messages.is_empty() {
                    println!("{}  (empty){}", YELLOW, RESET);
                }
                for msg in &messages {
                    render(msg, own_name);
                }
                println!();
            }
            Err(e) => println!("{}Error: {}{}", RED, e, RESET),
        },
        "/stats" => match client.lock().await.stats().await {
            Ok(stats) => {
                println!("\n{}Hub statistics:{}", BOLD, RESET);
                println!("  online:        {}", stats.online_count);
                println!("  messages:      {}", stats.total_messages);
                println!("  registrations: {}", stats.total_registrations);
                println!("  peak users:    {}", stats.peak_users);
                println!("  uptime:        {}", format_duration(stats.uptime_secs));
                println!();
            }
            Err(e) => println!("{}Error: {}{}", RED, e, RESET),
        },
        "/clear" => {
            print!("\x1b[2J\x1b[1;1H");
            let _ = std::io::stdout().flush();
        }
        "/quit" | "/exit" => {
            println!("{}Leaving...{}", CYAN, RESET);
            return false;
        }
        _ => {
            println!("{}Unknown command{}", RED, RESET);
            println!("{}Try /help{}", YELLOW, RESET);
        }
    }
    true
}

async fn send_line(client: &Arc<Mutex<HubClient>>, own_name: &str, content: &str) {
    if let Err(rejection) = validate::check_content(content, &HubConfig::default()) {
        println!("{}{}{}", RED, rejection, RESET);
        return;
    }

    match client.lock().await.send(own_name, content).await {
        Ok((true, _)) => {}
        Ok((false, reason)) => println!("{}{}{}", RED, reason, RESET),
        Err(e) => println!("{}Send failed: {}{}", RED, e, RESET),
    }
}

fn parse_hub_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 7878;

    let normalized = arg.replace("localhost", "127.0.0.1");
    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }
    Err(format!("Invalid hub address: '{}'", arg))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let addr = match args.get(1) {
        Some(arg) => match parse_hub_addr(arg) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!("Usage: chat_client [HUB_ADDR]");
                std::process::exit(1);
            }
        },
        None => "127.0.0.1:7878".parse().unwrap(),
    };

    println!("{}{}Chat client{}", BOLD, CYAN, RESET);
    println!("Connecting to {}...", addr);

    let config = ClientConfig::new(addr);
    let poll_interval = config.poll_interval;
    let client = match HubClient::connect(config).await {
        Ok(client) => {
            println!("{}Connected{}\n", GREEN, RESET);
            Arc::new(Mutex::new(client))
        }
        Err(e) => {
            println!("{}{}{}", RED, e, RESET);
            println!("Is the hub running? Try: cargo run --example hub_server");
            std::process::exit(1);
        }
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let Some(name) = register(&client, &mut lines).await else {
        return Ok(());
    };

    println!("{}Type /help for commands{}\n", CYAN, RESET);

    let running = Arc::new(AtomicBool::new(true));
    let poller = tokio::spawn(poll_loop(
        Arc::clone(&client),
        name.clone(),
        poll_interval,
        Arc::clone(&running),
    ));

    prompt(&name);
    loop {
        if !running.load(Ordering::Relaxed) {
            break;
        }

        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                println!("\n{}Interrupted{}", YELLOW, RESET);
                break;
            }
        };

        let line = match line {
            Ok(Some(line)) => line.trim().to_string(),
            // Stdin closed
            _ => break,
        };

        if line.is_empty() {
            prompt(&name);
            continue;
        }

        if line.starts_with('/') {
            if !handle_command(&client, &name, &line).await {
                break;
            }
        } else {
            send_line(&client, &name, &line).await;
        }

        prompt(&name);
    }

    running.store(false, Ordering::Relaxed);
    poller.abort();

    let _ = client.lock().await.disconnect(&name).await;
    println!("{}Disconnected{}", CYAN, RESET);

    Ok(())
}
