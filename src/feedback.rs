//! Pure mapping from server feedback to a renderable visual model.
//!
//! Nothing in here touches the DOM, so the whole module runs under plain
//! `cargo test`. The views in `app.rs` only turn these values into markup.

use crate::model::{CharFeedback, PinyinChar, TargetChar};

/// Visual category of one tile or letter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Correct, // right value, right position
    Present, // right value, wrong position
    Absent,  // not in the answer
}

impl Tile {
    pub fn class(self) -> &'static str {
        match self {
            Tile::Correct => "correct",
            Tile::Present => "present",
            Tile::Absent => "absent",
        }
    }
}

/// Exact-match color variant. The two upstream deployments differ only in
/// this hex; both are kept selectable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Blue,
    Green,
}

impl Palette {
    pub fn from_name(name: &str) -> Option<Palette> {
        match name {
            "blue" => Some(Palette::Blue),
            "green" => Some(Palette::Green),
            _ => None,
        }
    }

    pub fn theme_class(self) -> &'static str {
        match self {
            Palette::Blue => "theme-blue",
            Palette::Green => "theme-green",
        }
    }

    pub fn hex(self, tile: Tile) -> &'static str {
        match tile {
            Tile::Correct => match self {
                Palette::Blue => "#6a92e0",
                Palette::Green => "#6aaa64",
            },
            Tile::Present => "#c9b458",
            Tile::Absent => "#787c7e",
        }
    }
}

/// Maps a wire color tag to a tile. Both upstream exact-match spellings are
/// accepted; any unknown tag (`gray`, `white`, missing) means absent.
pub fn tile_for(tag: &str) -> Tile {
    match tag {
        "blue" | "green" => Tile::Correct,
        "yellow" => Tile::Present,
        _ => Tile::Absent,
    }
}

/// How a multi-letter field is colored. A uniformly colored field stays one
/// node; only genuinely mixed feedback pays for per-letter markup.
#[derive(Clone, Debug, PartialEq)]
pub enum TextColoring {
    Uniform(Tile),
    Mixed(Vec<(char, Tile)>),
}

/// Colors `text` according to the per-letter `colors` array. Returns `None`
/// when the server sent no colors, leaving the field unstyled. Letters
/// beyond the end of `colors` count as absent.
pub fn color_text(text: &str, colors: &[String]) -> Option<TextColoring> {
    if colors.is_empty() {
        return None;
    }
    let tiles: Vec<Tile> = colors.iter().map(|c| tile_for(c)).collect();
    let first = tiles[0];
    if tiles.iter().all(|t| *t == first) {
        return Some(TextColoring::Uniform(first));
    }
    let mixed = text
        .chars()
        .enumerate()
        .map(|(i, ch)| (ch, tiles.get(i).copied().unwrap_or(Tile::Absent)))
        .collect();
    Some(TextColoring::Mixed(mixed))
}

/// Tone feedback carries a single color for the whole digit.
pub fn tone_tile(colors: &[String]) -> Option<Tile> {
    colors.first().map(|c| tile_for(c))
}

/// `"1"` → `"1声"`; the neutral tone comes over the wire as `""` and stays
/// blank.
pub fn tone_label(tone: &str) -> String {
    if tone.is_empty() {
        String::new()
    } else {
        format!("{tone}声")
    }
}

/// Everything one character block needs to render.
#[derive(Clone, Debug, PartialEq)]
pub struct CharTile {
    pub glyph: String,
    pub block: Tile,
    pub pinyin_text: String,
    pub pinyin: Option<TextColoring>,
    pub tone_text: String,
    pub tone: Option<Tile>,
}

/// Builds the visual row for one guess from the server's feedback array.
pub fn row_from_feedback(result: &[CharFeedback]) -> Vec<CharTile> {
    result
        .iter()
        .map(|fb| CharTile {
            glyph: fb.chinese.ch.clone(),
            block: tile_for(&fb.chinese.color),
            pinyin_text: fb.pinyin.text.clone(),
            pinyin: color_text(&fb.pinyin.text, &fb.pinyin.colors),
            tone_text: tone_label(&fb.tone.text),
            tone: tone_tile(&fb.tone.colors),
        })
        .collect()
}

/// Builds the answer-reveal row shown on loss: every sub-field exact-match,
/// regardless of the player's own guesses.
pub fn row_from_answer(details: &[TargetChar]) -> Vec<CharTile> {
    details
        .iter()
        .map(|info| CharTile {
            glyph: info.chinese.clone(),
            block: Tile::Correct,
            pinyin_text: info.pinyin.clone(),
            pinyin: Some(TextColoring::Uniform(Tile::Correct)),
            tone_text: tone_label(&info.tone),
            tone: Some(Tile::Correct),
        })
        .collect()
}

/// State of the pinyin preview lookup for the word being typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PreviewLookup {
    #[default]
    Idle,
    Fetching,
    Ready(Vec<PinyinChar>),
    Failed,
}

/// One cell of the current-guess preview, with display strings resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewCell {
    pub glyph: String,
    pub pinyin: String,
    pub tone: String,
    pub filled: bool,
}

/// Mirrors the typed `input` into four preview cells. Filled cells show
/// `...` until the word is complete, `获取中...` while the lookup is in
/// flight, the resolved pinyin/tone afterwards, and `?` if the lookup
/// failed or came back short.
pub fn preview_row(input: &str, lookup: &PreviewLookup) -> Vec<PreviewCell> {
    let chars: Vec<char> = input.chars().collect();
    (0..crate::session::WORD_LEN)
        .map(|i| match chars.get(i) {
            None => PreviewCell {
                glyph: "?".into(),
                pinyin: "?".into(),
                tone: "?".into(),
                filled: false,
            },
            Some(ch) => {
                let (pinyin, tone) = match lookup {
                    PreviewLookup::Idle => ("...".into(), "...".into()),
                    PreviewLookup::Fetching => ("获取中...".into(), "获取中...".into()),
                    PreviewLookup::Failed => ("?".into(), "?".into()),
                    PreviewLookup::Ready(chars_info) => match chars_info.get(i) {
                        Some(pc) => {
                            let py = if pc.pinyin.is_empty() {
                                "?".into()
                            } else {
                                pc.pinyin.clone()
                            };
                            let tn = if pc.tone.is_empty() {
                                "?".into()
                            } else {
                                tone_label(&pc.tone)
                            };
                            (py, tn)
                        }
                        None => ("?".into(), "?".into()),
                    },
                };
                PreviewCell {
                    glyph: ch.to_string(),
                    pinyin,
                    tone,
                    filled: true,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CharField, TextField};

    fn strings(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn both_exact_spellings_map_to_correct() {
        assert_eq!(tile_for("blue"), Tile::Correct);
        assert_eq!(tile_for("green"), Tile::Correct);
        assert_eq!(tile_for("yellow"), Tile::Present);
        // CLI-era and web-era absent tags, plus garbage.
        assert_eq!(tile_for("white"), Tile::Absent);
        assert_eq!(tile_for("gray"), Tile::Absent);
        assert_eq!(tile_for(""), Tile::Absent);
    }

    #[test]
    fn palette_hexes() {
        assert_eq!(Palette::Green.hex(Tile::Correct), "#6aaa64");
        assert_eq!(Palette::Blue.hex(Tile::Correct), "#6a92e0");
        // Present/absent are shared between the two variants.
        for p in [Palette::Blue, Palette::Green] {
            assert_eq!(p.hex(Tile::Present), "#c9b458");
            assert_eq!(p.hex(Tile::Absent), "#787c7e");
        }
    }

    #[test]
    fn uniform_pinyin_colors_collapse_to_one_node() {
        let got = color_text("chun", &strings(&["blue", "blue", "blue", "blue"]));
        assert_eq!(got, Some(TextColoring::Uniform(Tile::Correct)));
    }

    #[test]
    fn mixed_pinyin_colors_split_per_letter() {
        let got = color_text("huo", &strings(&["blue", "yellow", "gray"])).unwrap();
        let TextColoring::Mixed(letters) = got else {
            panic!("expected per-letter coloring");
        };
        assert_eq!(
            letters,
            vec![
                ('h', Tile::Correct),
                ('u', Tile::Present),
                ('o', Tile::Absent),
            ]
        );
        // The letters concatenate back to the original text, in order.
        let text: String = letters.iter().map(|(ch, _)| ch).collect();
        assert_eq!(text, "huo");
    }

    #[test]
    fn letters_past_the_colors_array_are_absent() {
        let got = color_text("zhang", &strings(&["blue", "yellow"])).unwrap();
        let TextColoring::Mixed(letters) = got else {
            panic!("expected per-letter coloring");
        };
        assert_eq!(letters.len(), 5);
        assert!(letters[2..].iter().all(|(_, t)| *t == Tile::Absent));
    }

    #[test]
    fn no_colors_means_no_styling() {
        assert_eq!(color_text("chun", &[]), None);
        assert_eq!(tone_tile(&[]), None);
    }

    fn feedback(ch: &str, color: &str) -> CharFeedback {
        CharFeedback {
            chinese: CharField {
                ch: ch.into(),
                color: color.into(),
            },
            pinyin: TextField {
                text: "ma".into(),
                colors: strings(&[color, color]),
            },
            tone: TextField {
                text: "3".into(),
                colors: strings(&[color]),
            },
        }
    }

    #[test]
    fn all_exact_feedback_renders_four_correct_blocks() {
        let result = vec![
            feedback("春", "blue"),
            feedback("夏", "blue"),
            feedback("秋", "blue"),
            feedback("冬", "blue"),
        ];
        let row = row_from_feedback(&result);
        assert_eq!(row.len(), 4);
        assert!(row.iter().all(|t| t.block == Tile::Correct));
        assert!(row.iter().all(|t| t.tone == Some(Tile::Correct)));
        assert_eq!(row[0].tone_text, "3声");
    }

    #[test]
    fn answer_reveal_marks_everything_exact() {
        let details = vec![
            TargetChar {
                chinese: "风".into(),
                pinyin: "feng".into(),
                tone: "1".into(),
            },
            TargetChar {
                chinese: "花".into(),
                pinyin: "hua".into(),
                tone: "".into(),
            },
        ];
        let row = row_from_answer(&details);
        assert!(row.iter().all(|t| t.block == Tile::Correct));
        assert_eq!(row[0].pinyin, Some(TextColoring::Uniform(Tile::Correct)));
        // Neutral tone renders blank, not "声".
        assert_eq!(row[1].tone_text, "");
    }

    #[test]
    fn preview_mirrors_typed_characters() {
        let row = preview_row("春夏", &PreviewLookup::Idle);
        assert_eq!(row[0].glyph, "春");
        assert!(row[0].filled);
        assert_eq!(row[0].pinyin, "...");
        assert_eq!(row[2].glyph, "?");
        assert!(!row[2].filled);
    }

    #[test]
    fn preview_shows_fetching_then_resolved() {
        let row = preview_row("春夏秋冬", &PreviewLookup::Fetching);
        assert!(row.iter().all(|c| c.pinyin == "获取中..."));

        let ready = PreviewLookup::Ready(vec![
            PinyinChar {
                pinyin: "chun".into(),
                tone: "1".into(),
            },
            PinyinChar {
                pinyin: "xia".into(),
                tone: "4".into(),
            },
        ]);
        let row = preview_row("春夏秋冬", &ready);
        assert_eq!(row[0].pinyin, "chun");
        assert_eq!(row[0].tone, "1声");
        // Lookup came back short: remaining cells fall back to "?".
        assert_eq!(row[2].pinyin, "?");
    }

    #[test]
    fn preview_failure_falls_back_to_placeholders() {
        let row = preview_row("春夏秋冬", &PreviewLookup::Failed);
        assert!(row.iter().all(|c| c.pinyin == "?" && c.tone == "?"));
        assert!(row.iter().all(|c| c.filled));
    }
}
