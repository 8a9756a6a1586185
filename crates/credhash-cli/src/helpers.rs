//! Secret input helpers.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::Password;
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use crate::cli::SecretArgs;
use crate::constants::{MIN_SECRET_LENGTH, SECRET_ENV};
use crate::errors::CliError;

/// Whether prompts may be shown for this invocation.
fn is_interactive(args: &SecretArgs) -> bool {
    io::stdin().is_terminal() && !args.no_input
}

/// Read a secret from stdin (`--stdin`), `CREDHASH_SECRET`, or a hidden
/// prompt, in that order.
///
/// `confirm` asks for the secret twice when prompting.
pub fn read_secret(args: &SecretArgs, prompt: &str, confirm: bool) -> anyhow::Result<SecretString> {
    if args.stdin {
        return read_secret_line(io::stdin().lock());
    }

    if let Ok(value) = std::env::var(SECRET_ENV) {
        if !value.is_empty() {
            return Ok(SecretString::from(value));
        }
    }

    if !is_interactive(args) {
        return Err(CliError::invalid_input(format!(
            "No secret provided and no TTY available. Set {} or pass --stdin.",
            SECRET_ENV
        ))
        .into());
    }

    let mut password = Password::new().with_prompt(prompt);
    if confirm {
        password = password.with_confirmation("Confirm secret", "Secrets do not match");
    }
    let value = password
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))?;
    Ok(SecretString::from(value))
}

/// Read the first line of `reader`, without its line ending.
pub fn read_secret_line(mut reader: impl BufRead) -> anyhow::Result<SecretString> {
    let mut line = Zeroizing::new(String::new());
    reader
        .read_line(&mut line)
        .map_err(|e| anyhow::anyhow!("Failed to read secret from stdin: {}", e))?;
    let trimmed = line.trim_end_matches(['\r', '\n']);
    Ok(SecretString::from(trimmed.to_string()))
}

/// Validate a new secret meets minimum requirements.
pub fn validate_new_secret(secret: &SecretString) -> anyhow::Result<()> {
    let value = secret.expose_secret();
    if value.trim().is_empty() {
        return Err(CliError::invalid_input("Secret cannot be empty").into());
    }
    let length = value.chars().count();
    if length < MIN_SECRET_LENGTH {
        return Err(CliError::invalid_input(format!(
            "Secret must be at least {} characters (got {})",
            MIN_SECRET_LENGTH, length
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_secret_line_strips_newline() {
        let secret = read_secret_line(&b"hunter22\r\nsecond line\n"[..]).unwrap();
        assert_eq!(secret.expose_secret(), "hunter22");
    }

    #[test]
    fn test_read_secret_line_keeps_inner_spaces() {
        let secret = read_secret_line(&b" spaced secret \n"[..]).unwrap();
        assert_eq!(secret.expose_secret(), " spaced secret ");
    }

    #[test]
    fn test_read_secret_line_empty_input() {
        let secret = read_secret_line(&b""[..]).unwrap();
        assert_eq!(secret.expose_secret(), "");
    }

    #[test]
    fn test_validate_new_secret() {
        assert!(validate_new_secret(&SecretString::from("12345678".to_string())).is_ok());
        assert!(validate_new_secret(&SecretString::from("short".to_string())).is_err());
        assert!(validate_new_secret(&SecretString::from("   ".to_string())).is_err());
        assert!(validate_new_secret(&SecretString::from(String::new())).is_err());
    }
}
