use protocol::ChapterEntry;

use crate::{engine::RawChapter, timefmt::format_time};

pub fn chapter_label(chapter: &RawChapter) -> String {
    format!(
        "[{}] - {}",
        format_time(chapter.time),
        chapter.title.as_deref().unwrap_or("")
    )
}

/// Entries are numbered by their position in `chapters`.
pub fn build_chapters(chapters: &[RawChapter]) -> Vec<ChapterEntry> {
    chapters
        .iter()
        .zip(0..)
        .map(|(chapter, index)| ChapterEntry::new(index, chapter_label(chapter)))
        .collect()
}
