use std::io::{self, BufRead, Write};

use howzatt_core::game::input::InputProvider;
use howzatt_core::model::slot::BatterEnd;

/// Prompts on stdout and reads answers line by line from stdin. A blank line
/// or end of input declines the request, which the engine treats as a
/// cancellation.
pub struct StdinInput;

impl StdinInput {
    fn ask(&self, prompt: &str) -> Option<String> {
        print!("{prompt}: ");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).ok()?;
        if read == 0 {
            return None;
        }
        let line = line.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }
}

impl InputProvider for StdinInput {
    fn request_name(&mut self, prompt: &str) -> Option<String> {
        self.ask(prompt)
    }

    fn request_runs(&mut self, prompt: &str, min: u8, max: u8) -> Option<u8> {
        loop {
            let reply = self.ask(prompt)?;
            match reply.parse::<u8>() {
                Ok(runs) if (min..=max).contains(&runs) => return Some(runs),
                _ => self.notify(&format!("enter a number between {min} and {max}")),
            }
        }
    }

    fn request_out_batter(&mut self, prompt: &str) -> Option<BatterEnd> {
        loop {
            let reply = self.ask(prompt)?.to_ascii_lowercase();
            match reply.as_str() {
                "s" | "striker" => return Some(BatterEnd::Striker),
                "n" | "non-striker" | "nonstriker" => return Some(BatterEnd::NonStriker),
                _ => self.notify("enter `s` for the striker or `n` for the non-striker"),
            }
        }
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}
