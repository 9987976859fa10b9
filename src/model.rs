use serde::{Deserialize, Serialize};

/// Body for the endpoints that take a guessed or previewed word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPayload {
    pub word: String,
}

/// Response of `POST /api/new_game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameResponse {
    pub success: bool,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One colored sub-field holding a single value (the character glyph).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharField {
    #[serde(rename = "char")]
    pub ch: String,
    pub color: String,
}

/// One colored sub-field holding a string plus a color per letter.
/// `colors` may be shorter than `text`; missing entries mean absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    pub text: String,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// Feedback for one of the four character positions of a guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharFeedback {
    pub chinese: CharField,
    pub pinyin: TextField,
    pub tone: TextField,
}

/// Answer detail revealed on loss, one entry per character position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetChar {
    pub chinese: String,
    pub pinyin: String,
    pub tone: String,
}

/// Response of `POST /api/guess`. On `success: false` only `message` is
/// populated; `target_word`/`target_details` appear only on a lost game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Option<Vec<CharFeedback>>,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub remaining: Option<u32>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub won: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub target_word: Option<String>,
    #[serde(default)]
    pub target_details: Option<Vec<TargetChar>>,
}

/// Pinyin/tone of one character, as returned by the preview lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinyinChar {
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub tone: String,
}

/// Response of `POST /api/get_pinyin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinyinResponse {
    pub success: bool,
    #[serde(default)]
    pub characters: Vec<PinyinChar>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One past guess with the feedback it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub word: String,
    pub result: Vec<CharFeedback>,
    pub attempt: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_response_roundtrip() {
        let json = r#"{"success": true, "game_id": "f3b0", "max_attempts": 15}"#;
        let resp: NewGameResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.game_id.as_deref(), Some("f3b0"));
        assert_eq!(resp.max_attempts, Some(15));
        assert_eq!(resp.message, None);
    }

    #[test]
    fn failure_response_carries_only_message() {
        let json = r#"{"success": false, "message": "游戏会话无效，请开始新游戏"}"#;
        let resp: GuessResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("游戏会话无效，请开始新游戏"));
        assert!(resp.result.is_none());
        assert!(!resp.game_over);
    }

    #[test]
    fn guess_response_feedback_shape() {
        // One position of a real /api/guess payload.
        let json = r#"{
            "success": true,
            "result": [{
                "chinese": {"char": "春", "color": "blue"},
                "pinyin": {"text": "chun", "colors": ["blue", "yellow", "gray", "gray"]},
                "tone": {"text": "1", "colors": ["blue"]}
            }],
            "attempts": 3,
            "max_attempts": 15,
            "remaining": 12,
            "game_over": false
        }"#;
        let resp: GuessResponse = serde_json::from_str(json).unwrap();
        let fb = &resp.result.unwrap()[0];
        assert_eq!(fb.chinese.ch, "春");
        assert_eq!(fb.chinese.color, "blue");
        assert_eq!(fb.pinyin.text, "chun");
        assert_eq!(fb.pinyin.colors.len(), 4);
        assert_eq!(fb.tone.colors, vec!["blue"]);
        assert_eq!(resp.attempts, Some(3));
        assert!(!resp.won);
    }

    #[test]
    fn lost_game_reveals_target() {
        let json = r#"{
            "success": true,
            "result": [],
            "attempts": 15,
            "game_over": true,
            "won": false,
            "message": "😞 游戏结束！正确答案是: 春夏秋冬",
            "target_word": "春夏秋冬",
            "target_details": [
                {"chinese": "春", "pinyin": "chun", "tone": "1"},
                {"chinese": "夏", "pinyin": "xia", "tone": "4"},
                {"chinese": "秋", "pinyin": "qiu", "tone": "1"},
                {"chinese": "冬", "pinyin": "dong", "tone": "1"}
            ]
        }"#;
        let resp: GuessResponse = serde_json::from_str(json).unwrap();
        assert!(resp.game_over);
        assert!(!resp.won);
        let details = resp.target_details.unwrap();
        assert_eq!(details.len(), 4);
        assert_eq!(details[1].chinese, "夏");
        assert_eq!(details[1].tone, "4");
    }

    #[test]
    fn pinyin_response_tolerates_missing_fields() {
        let json = r#"{"success": true, "characters": [{"pinyin": "ni"}, {"tone": "3"}]}"#;
        let resp: PinyinResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.characters[0].pinyin, "ni");
        assert_eq!(resp.characters[0].tone, "");
        assert_eq!(resp.characters[1].pinyin, "");
    }

    #[test]
    fn word_payload_serializes_as_json_body() {
        let body = serde_json::to_string(&WordPayload { word: "东南西北".into() }).unwrap();
        assert_eq!(body, r#"{"word":"东南西北"}"#);
    }
}
