//! Script-to-scene parser.
//!
//! Input format: scene blocks separated by lines whose trimmed content is
//! exactly `---`. Inside a block, the first line starting (after trimming,
//! case-insensitively) with `Script Segment:` carries the voice-over text,
//! optionally wrapped in double quotes. Every other line is a note.
//! Trimming treats a byte-order mark (U+FEFF) as whitespace.
//!
//! ```text
//! Script Segment: "Welcome home."
//! Camera pans left.
//! ---
//! The hero arrives.
//! ```

use tracing::{debug, warn};

use crate::error::{ScriptError, ScriptResult};
use crate::storyboard::ids;
use crate::storyboard::model::{Scene, Storyboard, DEFAULT_TITLE};

/// Line content (after trimming) that separates scene blocks.
pub const BLOCK_DELIMITER: &str = "---";

/// Label prefix marking the voice-over line, matched case-insensitively.
pub const VO_LABEL: &str = "script segment:";

/// Separator placed between retained note lines.
const NOTES_SEPARATOR: &str = "\n\n";

/// Pure text → storyboard parser. Performs no I/O.
#[derive(Debug, Clone)]
pub struct SceneParser {
    title: String,
}

impl Default for SceneParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneParser {
    /// Creates a parser producing storyboards titled "Created via script".
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Builder: Set the title given to parsed storyboards.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Parses input from a dynamic surface where the text may be absent.
    pub fn parse_optional(&self, text: Option<&str>) -> ScriptResult<Storyboard> {
        match text {
            Some(text) => self.parse(text),
            None => Err(ScriptError::InvalidInput),
        }
    }

    /// Splits `text` into scene blocks and builds a fresh storyboard.
    ///
    /// Fails with `InvalidInput` on the empty string and `NoScenesFound` when
    /// no non-blank block remains. A block without a voice-over label is not
    /// an error: its whole content becomes notes and a warning is logged.
    pub fn parse(&self, text: &str) -> ScriptResult<Storyboard> {
        if text.is_empty() {
            return Err(ScriptError::InvalidInput);
        }

        let blocks = split_blocks(text);
        if blocks.is_empty() {
            return Err(ScriptError::NoScenesFound);
        }

        let id = ids::next_storyboard_id();
        let scenes: Vec<Scene> = blocks
            .iter()
            .enumerate()
            .map(|(index, block)| {
                let number = index as u32 + 1;
                let fields = extract_fields(block);
                if !fields.labeled {
                    warn!(
                        scene = number,
                        "\"Script Segment:\" line not found; entire block added to notes"
                    );
                }
                Scene::new(ids::scene_id(&id, number), number)
                    .with_vo_script(fields.vo_script)
                    .with_notes(fields.notes)
            })
            .collect();

        debug!(storyboard = %id, scenes = scenes.len(), "parsed script");

        Ok(Storyboard {
            id,
            title: self.title.clone(),
            scenes,
            last_edited: ids::now_iso8601(),
            ..Default::default()
        })
    }
}

/// Parses `text` with the default parser.
pub fn parse_script(text: &str) -> ScriptResult<Storyboard> {
    SceneParser::new().parse(text)
}

/// Trims Unicode whitespace and byte-order marks from both ends.
pub(crate) fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Splits on delimiter lines, trims each block, drops blank blocks.
fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if trim_text(line) == BLOCK_DELIMITER {
            push_block(&mut blocks, &current);
            current.clear();
        } else {
            current.push(line);
        }
    }
    push_block(&mut blocks, &current);

    blocks
}

fn push_block(blocks: &mut Vec<String>, lines: &[&str]) {
    let block = lines.join("\n");
    let block = trim_text(&block);
    if !block.is_empty() {
        blocks.push(block.to_string());
    }
}

/// Fields pulled out of one block.
#[derive(Debug, PartialEq)]
struct SceneFields {
    vo_script: String,
    notes: String,
    labeled: bool,
}

fn extract_fields(block: &str) -> SceneFields {
    let lines: Vec<&str> = block.lines().collect();
    let label_index = lines.iter().position(|line| is_label_line(line));

    let vo_script = label_index
        .map(|i| extract_vo_script(lines[i]))
        .unwrap_or_default();

    let notes = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != label_index)
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join(NOTES_SEPARATOR);
    let notes = trim_text(&notes).to_string();

    SceneFields {
        vo_script,
        notes,
        labeled: label_index.is_some(),
    }
}

fn is_label_line(line: &str) -> bool {
    trim_text(line)
        .get(..VO_LABEL.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(VO_LABEL))
}

/// Text after the first colon, trimmed, with one pair of wrapping quotes removed.
fn extract_vo_script(line: &str) -> String {
    let raw = line.split_once(':').map(|(_, rest)| rest).unwrap_or_default();
    strip_quotes(trim_text(raw)).to_string()
}

fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

// =============================================================================
// TESTS
// =============================================================================
