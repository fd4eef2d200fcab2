use crate::error::ShiurError;

/// Daily reading granularity. Each mode has its own schedule and its own
/// persisted progress store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudyMode {
    ThreeChapters,
    OneChapter,
}

impl StudyMode {
    /// Parse the persisted mode tag like "3-chapters"
    pub fn from_tag(tag: &str) -> Result<Self, ShiurError> {
        match tag.trim() {
            "3-chapters" | "3" => Ok(Self::ThreeChapters),
            "1-chapter" | "1" => Ok(Self::OneChapter),
            other => Err(ShiurError::UnknownStudyMode(other.to_string())),
        }
    }

    /// Tag used in storage keys and backups
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::ThreeChapters => "3-chapters",
            Self::OneChapter => "1-chapter",
        }
    }

    /// Learning cycle number the bundled schedule belongs to
    pub fn cycle(&self) -> u32 {
        match self {
            Self::ThreeChapters => 46,
            Self::OneChapter => 16,
        }
    }

    /// Cycle label as printed on the study calendar
    pub fn cycle_label(&self) -> &'static str {
        match self {
            Self::ThreeChapters => "מחזור מ\"ו",
            Self::OneChapter => "מחזור ט\"ז",
        }
    }

    /// Display name for the mode switcher
    pub fn name(&self) -> &'static str {
        match self {
            Self::ThreeChapters => "שלשה פרקים ליום",
            Self::OneChapter => "פרק אחד ליום",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::ThreeChapters => Self::OneChapter,
            Self::OneChapter => Self::ThreeChapters,
        }
    }

    pub fn all() -> &'static [StudyMode] {
        &[StudyMode::ThreeChapters, StudyMode::OneChapter]
    }
}

impl Default for StudyMode {
    fn default() -> Self {
        Self::ThreeChapters
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Searching,
    AccountModal,
    CreatingAccount,
    ImportingBackup,
}
