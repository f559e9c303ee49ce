//! LRC parsing and active-line selection.

use serde::{Deserialize, Serialize};

/// One lyric line with its playback time offset.
///
/// Sequences are ordered ascending by offset and immutable once produced
/// for a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Offset from track start, milliseconds.
    pub time_offset_ms: u64,
    /// Line text.
    pub text: String,
}

/// Parse an LRC document (`[mm:ss.xx]text` per line) into an ascending
/// sequence of lines. Untagged or empty lines are skipped.
pub fn parse_synced(lrc: &str) -> Vec<LyricLine> {
    let mut lines: Vec<LyricLine> = lrc.lines().filter_map(parse_line).collect();
    lines.sort_by_key(|line| line.time_offset_ms);
    lines
}

/// Wrap plain (untimed) text as a sequence where every line sits at offset
/// zero: no synchronization possible, lines render as a static block.
pub fn parse_plain(text: &str) -> Vec<LyricLine> {
    text.lines()
        .map(|line| LyricLine {
            time_offset_ms: 0,
            text: line.to_string(),
        })
        .collect()
}

fn parse_line(line: &str) -> Option<LyricLine> {
    let rest = line.strip_prefix('[')?;
    let (tag, text) = rest.split_once(']')?;
    let (minutes, seconds_fraction) = tag.split_once(':')?;
    let (seconds, fraction) = seconds_fraction.split_once('.')?;

    if minutes.len() != 2 || seconds.len() != 2 || !(2..=3).contains(&fraction.len()) {
        return None;
    }

    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    let mut millis = fraction.to_string();
    while millis.len() < 3 {
        millis.push('0');
    }
    let millis: u64 = millis.parse().ok()?;

    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(LyricLine {
        time_offset_ms: minutes * 60_000 + seconds * 1_000 + millis,
        text: text.to_string(),
    })
}

/// Index of the last line whose offset is at or before `elapsed_ms`, or
/// `None` before the first line's time.
pub fn current_line(lines: &[LyricLine], elapsed_ms: i64) -> Option<usize> {
    if elapsed_ms < 0 {
        return None;
    }
    let mut active = None;
    for (index, line) in lines.iter().enumerate() {
        if line.time_offset_ms as i64 <= elapsed_ms {
            active = Some(index);
        } else {
            break;
        }
    }
    active
}
