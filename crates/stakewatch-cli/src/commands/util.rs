//! Shared CLI utilities.

use std::io::{self, BufRead, Write};

use stakewatch_core::validate_address;

const PROMPT: &str = "Please enter a Solana wallet address: ";
const INVALID_LENGTH: &str = "Invalid address length. Please try again.";

/// Prompts until a 43- or 44-byte address is entered.
///
/// Surrounding whitespace is trimmed. EOF on `input` is an error rather than
/// an endless re-prompt.
pub fn prompt_address<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        let bytes_read = input.read_line(&mut line)?;

        // Check for EOF
        if bytes_read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "unexpected EOF while waiting for an address",
            ));
        }

        let address = line.trim();
        if validate_address(address).is_ok() {
            return Ok(address.to_string());
        }
        writeln!(output, "{INVALID_LENGTH}")?;
    }
}

/// Runs [`prompt_address`] on tokio's blocking pool so the terminal read
/// never stalls a runtime worker.
pub async fn prompt_address_blocking<R, W>(mut input: R, mut output: W) -> io::Result<String>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    tokio::task::spawn_blocking(move || prompt_address(&mut input, &mut output))
        .await
        .map_err(io::Error::other)?
}
