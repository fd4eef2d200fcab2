use super::numerals;

/// Label used when a chapter string yields nothing to track.
pub const PLACEHOLDER_LABEL: &str = "שיעור א";

/// Prefix for a numbered chapter sub-unit.
pub const CHAPTER_PREFIX: &str = "פרק";

const HIDDEN_LABEL_LIMIT: usize = 25;
const HIDDEN_LABEL_KEEP: usize = 22;
const SEGMENT_LABEL_LIMIT: usize = 30;
const SEGMENT_LABEL_KEEP: usize = 27;

/// The trackable sub-units of one schedule day.
///
/// Labels and count come out of the same pass over the chapter string, so the
/// checkbox list and the persisted progress array can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubunitPlan {
    labels: Vec<String>,
}

impl SubunitPlan {
    /// Number of sub-units, always at least 1.
    pub fn count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Decompose a day's chapter string into sub-unit labels.
///
/// `"א-ג"` becomes three numbered chapters, `"י/א-ב"` becomes an opaque `"י"`
/// followed by two numbered chapters, and a hidden-label day is one task.
pub fn plan_subunits(chapters: &str, hide_label: bool) -> SubunitPlan {
    if hide_label {
        return SubunitPlan {
            labels: vec![truncate_label(chapters, HIDDEN_LABEL_LIMIT, HIDDEN_LABEL_KEEP)],
        };
    }

    let mut labels = Vec::new();
    for segment in chapters.split('/').map(str::trim) {
        match decode_range(segment) {
            Some((start, end)) => {
                for chapter in start..=end {
                    labels.push(format!("{} {}", CHAPTER_PREFIX, numerals::encode(chapter)));
                }
            }
            None => labels.push(truncate_label(segment, SEGMENT_LABEL_LIMIT, SEGMENT_LABEL_KEEP)),
        }
    }

    if labels.is_empty() {
        labels.push(PLACEHOLDER_LABEL.to_string());
    }

    SubunitPlan { labels }
}

/// `<letters>-<letters>` with both sides decodable as numerals.
fn decode_range(segment: &str) -> Option<(i64, i64)> {
    let (start, end) = segment.split_once('-')?;
    if !is_hebrew_word(start) || !is_hebrew_word(end) {
        return None;
    }
    let start = numerals::decode(start);
    let end = numerals::decode(end);
    if start == -1 || end == -1 {
        return None;
    }
    Some((i64::from(start), i64::from(end)))
}

fn is_hebrew_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| ('א'..='ת').contains(&c))
}

fn truncate_label(text: &str, limit: usize, keep: usize) -> String {
    if text.chars().count() > limit {
        let mut out: String = text.chars().take(keep).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}
