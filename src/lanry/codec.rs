//! # Chapter File Names
//!
//! Chapters are stored one per file and the directory itself is the index, so the
//! file name has to carry everything needed to rebuild a [`ChapterInfo`]:
//!
//! ```text
//! Chapter_001_The Beginning.txt
//!         ^^^ ^^^^^^^^^^^^^
//!         id  sanitized title
//! ```
//!
//! - The id is zero-padded to three digits. Ids of 1000 and above simply widen the field.
//! - Every character that is illegal in a file name (the Windows set, which is the
//!   strictest we have to support) is replaced by `_`.
//! - Decoding maps every `_` in the title part back to a space.
//!
//! The mapping is lossy on purpose: `"Part: One"`, `"Part/ One"` and `"Part_ One"` all
//! land on the same file, and an underscore typed by the author comes back as a space.
//! What *is* stable is the canonical title, `decode(encode(title))`: applying it twice
//! gives the same result as applying it once.

use crate::model::ChapterInfo;
use once_cell::sync::Lazy;
use regex::Regex;

pub const FILE_PREFIX: &str = "Chapter_";
pub const FILE_EXT: &str = ".txt";

const REPLACEMENT: char = '_';

static CHAPTER_FILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Chapter_(\d{3,})_(.*)\.txt$").expect("chapter file pattern is valid")
});

/// True for characters that cannot appear in a file name on Windows.
pub fn is_illegal_filename_char(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || (c as u32) < 0x20
}

/// Replace every illegal file-name character with `_`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if is_illegal_filename_char(c) {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// File name for a chapter: `Chapter_<NNN>_<sanitized title>.txt`.
pub fn encode_file_name(id: u32, title: &str) -> String {
    format!("{}{:03}_{}{}", FILE_PREFIX, id, sanitize_title(title), FILE_EXT)
}

/// Recover chapter identity from a file name. Returns `None` for anything that is
/// not a chapter file, including ids that overflow `u32`.
pub fn decode_file_name(file_name: &str) -> Option<ChapterInfo> {
    let caps = CHAPTER_FILE_RE.captures(file_name)?;
    let id: u32 = caps.get(1)?.as_str().parse().ok()?;
    if id == 0 {
        return None;
    }
    let title = caps.get(2)?.as_str().replace(REPLACEMENT, " ");
    Some(ChapterInfo { id, title })
}

/// The title as it would come back from disk after a save.
pub fn canonical_title(title: &str) -> String {
    sanitize_title(title).replace(REPLACEMENT, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_zero_padded_id() {
        assert_eq!(encode_file_name(1, "Intro"), "Chapter_001_Intro.txt");
        assert_eq!(encode_file_name(42, "Answer"), "Chapter_042_Answer.txt");
    }

    #[test]
    fn wide_ids_widen_the_field() {
        assert_eq!(encode_file_name(1234, "Late"), "Chapter_1234_Late.txt");
        let info = decode_file_name("Chapter_1234_Late.txt").unwrap();
        assert_eq!(info.id, 1234);
        assert_eq!(info.title, "Late");
    }

    #[test]
    fn spaces_are_kept_when_encoding() {
        assert_eq!(
            encode_file_name(1, "The Beginning"),
            "Chapter_001_The Beginning.txt"
        );
    }

    #[test]
    fn illegal_characters_become_underscores() {
        assert_eq!(
            encode_file_name(1, "Chapter: The/End"),
            "Chapter_001_Chapter_ The_End.txt"
        );
        assert_eq!(sanitize_title("a<b>c\"d\\e|f?g*h"), "a_b_c_d_e_f_g_h");
        assert_eq!(sanitize_title("tab\there"), "tab_here");
    }

    #[test]
    fn decodes_underscores_as_spaces() {
        let info = decode_file_name("Chapter_002_Middle_Part.txt").unwrap();
        assert_eq!(info, ChapterInfo::new(2, "Middle Part"));
    }

    #[test]
    fn decodes_empty_title() {
        let name = encode_file_name(9, "");
        assert_eq!(name, "Chapter_009_.txt");
        assert_eq!(decode_file_name(&name), Some(ChapterInfo::new(9, "")));
    }

    #[test]
    fn ignores_non_chapter_files() {
        assert!(decode_file_name("notes.txt").is_none());
        assert!(decode_file_name("Chapter_01_Short.txt").is_none());
        assert!(decode_file_name("Chapter_001_Intro.md").is_none());
        assert!(decode_file_name("chapter_001_Intro.txt").is_none());
        assert!(decode_file_name(".chapter-1234.tmp").is_none());
        assert!(decode_file_name("Chapter_99999999999_Overflow.txt").is_none());
    }

    #[test]
    fn titles_starting_with_digits_decode() {
        let info = decode_file_name("Chapter_005_300 Spartans.txt").unwrap();
        assert_eq!(info, ChapterInfo::new(5, "300 Spartans"));
    }

    #[test]
    fn canonical_title_is_idempotent() {
        for title in ["Chapter: The/End", "snake_case_title", "plain", "", "a?b*c"] {
            let once = canonical_title(title);
            assert_eq!(canonical_title(&once), once, "title {:?}", title);
        }
    }

    #[test]
    fn decode_of_encode_gives_canonical_title() {
        let title = "Part_1: Arrival";
        let info = decode_file_name(&encode_file_name(3, title)).unwrap();
        assert_eq!(info.title, canonical_title(title));
        assert_eq!(info.title, "Part 1  Arrival");
    }

    #[test]
    fn distinct_titles_can_collide() {
        assert_eq!(
            encode_file_name(1, "Part: One"),
            encode_file_name(1, "Part/ One")
        );
    }

    #[test]
    fn chapter_zero_is_not_a_chapter_file() {
        assert_eq!(decode_file_name("Chapter_000_Prologue.txt"), None);
    }
}
