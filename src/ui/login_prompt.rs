use std::borrow::Cow;
use std::env;
use std::fmt;
use std::io::{self, IsTerminal};

use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::history::DefaultHistory;
use rustyline::{ColorMode, Completer, Editor, Helper, Hinter, Validator};

use crate::error::{AppError, AppResult, AuthError};

const LEGAJO_PROMPT: &str = "Legajo: ";
const PASSWORD_PROMPT: &str = "Password: ";

/// Terminals the line editor cannot drive. It falls back to plain reads there
/// and the password would echo.
const UNSUPPORTED_TERMS: &[&str] = &["dumb", "cons25", "emacs"];

/// One press of the submit key: the legajo line and the masked password line.
#[derive(Clone, PartialEq, Eq)]
pub struct Submission {
    pub legajo: String,
    pub secret: String,
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("legajo", &self.legajo)
            .field("secret", &"***")
            .finish()
    }
}

/// Echoes every typed character as `*` while `masking` is set.
#[derive(Completer, Helper, Hinter, Validator)]
struct MaskingHelper {
    masking: bool,
}

impl Highlighter for MaskingHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Cow::Owned("*".repeat(line.chars().count()))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        self.masking
    }
}

/// Blocks on the terminal until both fields are entered. Returns `None` when
/// the user closes the form with Ctrl-D or Ctrl-C.
pub fn read_submission() -> AppResult<Option<Submission>> {
    let term = env::var("TERM").ok();
    if !can_mask(term.as_deref(), io::stdin().is_terminal()) {
        return Err(AppError::Terminal(format!(
            "cannot mask password input on TERM={}",
            term.unwrap_or_default()
        )));
    }

    let config = rustyline::Config::builder()
        .auto_add_history(false)
        .color_mode(ColorMode::Forced)
        .build();
    let mut editor: Editor<MaskingHelper, DefaultHistory> =
        Editor::with_config(config).map_err(terminal_error)?;

    editor.set_helper(Some(MaskingHelper { masking: false }));
    let Some(legajo) = read_field(&mut editor, LEGAJO_PROMPT)? else {
        return Ok(None);
    };

    editor.set_helper(Some(MaskingHelper { masking: true }));
    let Some(secret) = read_field(&mut editor, PASSWORD_PROMPT)? else {
        return Ok(None);
    };

    Ok(Some(Submission { legajo, secret }))
}

fn read_field(
    editor: &mut Editor<MaskingHelper, DefaultHistory>,
    prompt: &str,
) -> AppResult<Option<String>> {
    match editor.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
        Err(e) => Err(terminal_error(e)),
    }
}

/// Piped input never echoes; a real terminal must be one the editor supports.
fn can_mask(term: Option<&str>, stdin_is_tty: bool) -> bool {
    if !stdin_is_tty {
        return true;
    }
    !term.is_some_and(|t| UNSUPPORTED_TERMS.iter().any(|u| t.eq_ignore_ascii_case(u)))
}

fn terminal_error(e: ReadlineError) -> AppError {
    AppError::Terminal(e.to_string())
}

pub fn dialog(title: &str, message: &str) -> String {
    let width = title.chars().count().max(message.chars().count()) + 2;
    let rule = "-".repeat(width);
    format!("+{rule}+\n| {title:<w$} |\n+{rule}+\n| {message:<w$} |\n+{rule}+", w = width - 2)
}

pub fn show_failure(err: &AuthError) {
    eprintln!("{}", dialog(err.title(), &err.to_string()));
}

pub fn show_success(legajo: &str, role_user: &str) {
    println!("Legajo {} accepted, working as '{}'.", legajo, role_user);
    println!("Press Ctrl-C to sign out.");
}
