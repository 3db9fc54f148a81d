//! Commands accepted by the terminal form.

use crate::presenter::TRIGGER_CAPTION;

pub const USAGE: &str = "Lệnh: set <chỉ số|số thứ tự> <giá trị> | predict | show | reset | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { address: String, value: i64 },
    Predict,
    Show,
    Reset,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. The error is a short message for the user.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line.eq_ignore_ascii_case(TRIGGER_CAPTION) {
            return Ok(Command::Predict);
        }

        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err(USAGE.to_string());
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "set" | "s" => {
                let (Some(address), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                    return Err("Cú pháp: set <chỉ số|số thứ tự> <giá trị>".to_string());
                };
                let value = value
                    .parse::<i64>()
                    .map_err(|_| format!("'{}' không phải là số nguyên", value))?;
                return Ok(Command::Set { address: address.to_string(), value });
            }
            "predict" | "p" => Command::Predict,
            "show" => Command::Show,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(USAGE.to_string()),
        };

        if parts.next().is_some() {
            return Err(USAGE.to_string());
        }
        Ok(command)
    }
}
