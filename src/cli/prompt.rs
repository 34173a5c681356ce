use std::io::{self, BufRead, IsTerminal, Write};

/// Print `label` without a trailing newline and flush so the cursor
/// waits on the same line as the prompt.
fn show(label: &str) -> io::Result<()> {
    print!("{label}");
    io::stdout().flush()
}

/// Prompt for one line of input. `Ok(None)` means stdin is exhausted.
pub fn line(label: &str) -> io::Result<Option<String>> {
    show(label)?;
    read_line()
}

/// Read one line from stdin without printing a prompt first.
pub fn read_line() -> io::Result<Option<String>> {
    let mut buf = String::new();
    let bytes = io::stdin().lock().read_line(&mut buf)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(strip_line_ending(&buf).to_string()))
}

/// Prompt for a password. On an interactive terminal the input is not
/// echoed; when stdin is piped (tests, scripts) it falls back to a
/// plain line read.
pub fn password(label: &str) -> io::Result<Option<String>> {
    if io::stdin().is_terminal() {
        show(label)?;
        let entered = rpassword::read_password()?;
        Ok(Some(entered))
    } else {
        line(label)
    }
}

/// Drop the trailing `\n` or `\r\n` but keep any other whitespace the
/// operator typed.
fn strip_line_ending(raw: &str) -> &str {
    raw.trim_end_matches(['\r', '\n'])
}
