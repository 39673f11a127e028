//! Command parser
//!
//! Parses raw client lines into [`Command`] values.

use super::commands::Command;

/// Parses a raw command line received from a client.
///
/// Known verbs with missing or malformed arguments parse as `Unknown`.
/// A bare `PAGE` resolves the empty path, i.e. the root folder.
pub fn parse_command(raw: &str) -> Command {
    let line = raw.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let rest = parts.next().unwrap_or("");
    let arg = rest.trim();

    match cmd.as_str() {
        "QUIT" | "Q" => Command::Quit,
        "USER" if !arg.is_empty() && !arg.contains(char::is_whitespace) => {
            Command::User(arg.to_string())
        }
        "ANON" => Command::Anon,
        "WHOAMI" => Command::WhoAmI,
        "HOST" if !arg.is_empty() => {
            parse_host(arg).unwrap_or_else(|| Command::Unknown(trimmed.trim_end().to_string()))
        }
        "CLEAR" => Command::Clear,
        "PAGE" => Command::Page(arg.to_string()),
        _ => Command::Unknown(trimmed.trim_end().to_string()),
    }
}

fn parse_host(arg: &str) -> Option<Command> {
    let mut words = arg.split_whitespace();
    let host = words.next()?.to_string();
    let secure = match words.next().map(|w| w.to_ascii_lowercase()) {
        None => false,
        Some(word) if word == "secure" => true,
        Some(word) if word == "insecure" => false,
        Some(_) => return None,
    };
    if words.next().is_some() {
        return None;
    }
    Some(Command::Host { host, secure })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("QUIT"), Command::Quit);
        assert_eq!(parse_command("Q"), Command::Quit);
        assert_eq!(parse_command("ANON"), Command::Anon);
        assert_eq!(parse_command("whoami"), Command::WhoAmI);
        assert_eq!(parse_command("CLEAR"), Command::Clear);
    }

    #[test]
    fn test_parse_commands_with_args() {
        assert_eq!(parse_command("USER bob"), Command::User("bob".to_string()));
        assert_eq!(
            parse_command("PAGE demo/home"),
            Command::Page("demo/home".to_string())
        );
        assert_eq!(
            parse_command("PAGE fall/math/\r\n"),
            Command::Page("fall/math/".to_string())
        );
        assert_eq!(
            parse_command("HOST localhost:8443 secure"),
            Command::Host {
                host: "localhost:8443".to_string(),
                secure: true
            }
        );
        assert_eq!(
            parse_command("HOST localhost:8090"),
            Command::Host {
                host: "localhost:8090".to_string(),
                secure: false
            }
        );
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(parse_command("  QUIT  "), Command::Quit);
        assert_eq!(parse_command("USER  john  "), Command::User("john".to_string()));
        assert_eq!(parse_command("PAGE"), Command::Page(String::new()));
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(parse_command("INVALID"), Command::Unknown("INVALID".to_string()));
        assert_eq!(parse_command("USER"), Command::Unknown("USER".to_string()));
        assert_eq!(
            parse_command("USER two words"),
            Command::Unknown("USER two words".to_string())
        );
        assert_eq!(
            parse_command("HOST h maybe"),
            Command::Unknown("HOST h maybe".to_string())
        );
        assert_eq!(parse_command(""), Command::Unknown("".to_string()));
    }
}
