use crate::{Error, Result};
use rustyline::{
    config::Configurer, highlight::Highlighter, history::MemHistory,
    ColorMode, Editor,
};
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow::{self, Borrowed, Owned};
use zeroize::Zeroizing;

const DEFAULT_PROMPT: &str = ">> ";

#[derive(Completer, Helper, Hinter, Validator)]
struct MaskingHighlighter {
    masking: bool,
}

impl Highlighter for MaskingHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        use unicode_width::UnicodeWidthStr;
        if self.masking {
            Owned("*".repeat(line.width()))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        self.masking
    }
}

/// Read a secret from a masked prompt.
pub fn read_secret(prompt: Option<&str>) -> Result<Zeroizing<String>> {
    let h = MaskingHighlighter { masking: true };
    let mut rl = Editor::new()?;
    rl.set_helper(Some(h));
    rl.set_color_mode(ColorMode::Forced);
    rl.set_auto_add_history(false);

    let secret = Zeroizing::new(rl.readline(prompt.unwrap_or("Secret: "))?);
    let trimmed = Zeroizing::new(secret.trim_end_matches('\n').to_owned());
    if trimmed.is_empty() {
        return Err(Error::EmptySecret);
    }
    Ok(trimmed)
}

pub(crate) fn basic_editor() -> Result<Editor<(), MemHistory>> {
    Ok(Editor::<(), MemHistory>::with_history(
        Default::default(),
        MemHistory::new(),
    )?)
}

/// Read a flag value (y/n).
pub fn read_flag(prompt: Option<&str>) -> Result<bool> {
    let mut rl = basic_editor()?;
    let line = rl.readline(prompt.unwrap_or(DEFAULT_PROMPT))?;
    let line = line.trim();
    Ok(line == "y" || line == "yes")
}
