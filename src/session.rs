//! Session state and local guess validation.
//!
//! The session is a plain owned struct held in a signal by the game
//! component. The server stays authoritative for scoring; this only tracks
//! what the UI needs between responses.

use thiserror::Error;

use crate::model::{GuessRecord, GuessResponse};

/// Guesses are always four characters.
pub const WORD_LEN: usize = 4;

/// Attempt budget assumed until the server hands out the real one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 15;

/// Local validation failures, surfaced as transient toasts. Submission is
/// blocked before any network call when one of these fires.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuessError {
    #[error("请输入词语")]
    Empty,
    #[error("请输入四个字的词语")]
    WrongLength,
    #[error("请只输入中文字符")]
    NotChinese,
}

/// The CJK range the upstream accepts (U+4E00..=U+9FA5).
pub fn is_cjk(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&ch)
}

/// Checks a trimmed guess locally, in the same order as the upstream UI:
/// empty, then length, then charset.
pub fn validate_guess(word: &str) -> Result<(), GuessError> {
    if word.is_empty() {
        return Err(GuessError::Empty);
    }
    if word.chars().count() != WORD_LEN {
        return Err(GuessError::WrongLength);
    }
    if !word.chars().all(is_cjk) {
        return Err(GuessError::NotChinese);
    }
    Ok(())
}

/// One playthrough, bounded by a server-issued id and attempt budget.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub game_id: Option<String>,
    pub attempts: u32,
    pub max_attempts: u32,
    pub game_over: bool,
    pub won: bool,
    pub history: Vec<GuessRecord>,
}

impl Session {
    /// Fresh session from a `new_game` response. Counters and history always
    /// start from zero, whatever the previous session looked like.
    pub fn begin(game_id: String, max_attempts: u32) -> Session {
        Session {
            game_id: Some(game_id),
            attempts: 0,
            max_attempts,
            game_over: false,
            won: false,
            history: Vec::new(),
        }
    }

    /// The UI stops submitting once a terminal flag is set.
    pub fn accepts_guesses(&self) -> bool {
        self.game_id.is_some() && !self.game_over
    }

    /// Folds a successful guess response into the session. The server's
    /// attempt count wins, but never moves backwards.
    pub fn record_guess(&mut self, word: &str, resp: &GuessResponse) {
        let attempt = resp.attempts.unwrap_or(self.attempts + 1);
        self.attempts = self.attempts.max(attempt);
        if let Some(max) = resp.max_attempts {
            self.max_attempts = max;
        }
        if let Some(result) = &resp.result {
            self.history.push(GuessRecord {
                word: word.to_string(),
                result: result.clone(),
                attempt,
            });
        }
        if resp.game_over {
            self.game_over = true;
            self.won = resp.won;
        }
    }

    /// `第 N 次 / 共 M 次`, where N is the upcoming attempt.
    pub fn attempt_label(&self) -> String {
        format!("第 {} 次 / 共 {} 次", self.attempts + 1, self.max_attempts)
    }
}

/// Live input limiting. The two upstream variants disagree; both behaviors
/// are kept selectable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Leave typing unrestricted (IME composition stays usable) and validate
    /// only on submit.
    #[default]
    SubmitOnly,
    /// Truncate the field to four characters as the user types.
    Trim,
}

/// Presentation options resolved once per page from the URL query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameOptions {
    pub palette: crate::feedback::Palette,
    pub input: InputMode,
}

impl GameOptions {
    /// `?theme=blue|green&input=trim` — anything else keeps the defaults.
    pub fn from_query(theme: Option<&str>, input: Option<&str>) -> GameOptions {
        GameOptions {
            palette: theme
                .and_then(crate::feedback::Palette::from_name)
                .unwrap_or_default(),
            input: match input {
                Some("trim") => InputMode::Trim,
                _ => InputMode::SubmitOnly,
            },
        }
    }
}
