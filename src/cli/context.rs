use std::io::{self, Write};

use chrono::{Local, NaiveDate};

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::CommunityError;
use crate::model::{Id, Role};
use crate::views::Notice;

pub struct CliContext {
    pub client: ApiClient,
    pub config: Config,
}

impl CliContext {
    pub fn new(client: ApiClient, config: Config) -> Self {
        Self { client, config }
    }

    pub fn role(&self) -> Option<Role> {
        self.client.session().role()
    }

    pub fn is_logged_in(&self) -> bool {
        self.client.session().is_authenticated()
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Prompt showing the current value; Enter keeps it.
    pub fn prompt_with_default(&self, label: &str, current: &str) -> Option<String> {
        let input = self.prompt(&format!("{} [{}]: ", label, current))?;
        Some(if input.is_empty() { current.to_string() } else { input })
    }

    /// Optional field; Enter keeps the current value, '-' clears it.
    pub fn prompt_optional(&self, label: &str, current: Option<&str>) -> Option<Option<String>> {
        let shown = current.unwrap_or("");
        let input = self.prompt(&format!("{} [{}] ('-' to clear): ", label, shown))?;
        Some(match input.as_str() {
            "" => current.map(str::to_string),
            "-" => None,
            _ => Some(input),
        })
    }

    pub fn confirm(&self, prompt: &str) -> bool {
        matches!(
            self.prompt(&format!("{} (y/n): ", prompt)).as_deref(),
            Some("y") | Some("Y") | Some("yes")
        )
    }

    /// Parses an id argument, printing usage on failure.
    pub fn parse_id<T>(&self, args: &str, usage: &str) -> Option<Id<T>> {
        let first = args.split_whitespace().next().unwrap_or("");
        match Id::parse(first) {
            Ok(id) => Some(id),
            Err(_) => {
                println!("Usage: {}", usage);
                None
            }
        }
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Print an error.
    pub fn print_error(&self, e: &CommunityError) {
        self.print_notice(&Notice::Error(e.to_string()));
    }

    pub fn print_notice(&self, notice: &Notice) {
        if notice.is_error() {
            eprintln!("{}", notice);
        } else {
            println!("{}", notice);
        }
    }
}
