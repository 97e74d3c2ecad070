//! Small string helpers shared by extraction and rules: whole-word matching,
//! preceding-word lookup and char-safe windows.

/// Word characters for boundary checks (`\w`, Unicode-aware).
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte offsets of `needle` in `hay` where both ends sit on a word boundary.
pub(crate) fn word_matches<'a>(hay: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    hay.match_indices(needle).filter_map(move |(i, m)| {
        let before = hay[..i].chars().next_back();
        let after = hay[i + m.len()..].chars().next();
        let bounded = before.map_or(true, |c| !is_word_char(c)) && after.map_or(true, |c| !is_word_char(c));
        bounded.then_some(i)
    })
}

pub(crate) fn contains_word(hay: &str, needle: &str) -> bool {
    word_matches(hay, needle).next().is_some()
}

/// The word directly before byte offset `idx`, separated from it by whitespace only.
pub(crate) fn preceding_word(hay: &str, idx: usize) -> Option<&str> {
    let head = &hay[..idx];
    let trimmed = head.trim_end();
    if trimmed.len() == head.len() {
        return None;
    }
    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map(|(i, _)| i)?;
    Some(&trimmed[start..])
}

/// Slice of `hay` spanning `radius` chars before `start` and after `end`.
pub(crate) fn char_window(hay: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = hay[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(i, _)| i);
    let to = hay[end..]
        .char_indices()
        .nth(radius)
        .map_or(hay.len(), |(i, _)| end + i);
    &hay[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_only() {
        let hay = "i love lovely gloves, love!";
        assert_eq!(word_matches(hay, "love").count(), 2);
        assert!(contains_word("so-so at best", "so-so"));
        assert!(!contains_word("badge", "bad"));
    }

    #[test]
    fn preceding_word_needs_whitespace() {
        let hay = "really good, very-good";
        let idx = hay.find("good").unwrap();
        assert_eq!(preceding_word(hay, idx), Some("really"));
        let idx = hay.rfind("good").unwrap();
        assert_eq!(preceding_word(hay, idx), None);
        assert_eq!(preceding_word("good", 0), None);
    }

    #[test]
    fn window_is_char_safe() {
        let hay = "ééé service ééé";
        let s = hay.find("service").unwrap();
        let w = char_window(hay, s, s + "service".len(), 2);
        assert_eq!(w, "é service é");
        assert_eq!(char_window("abc", 1, 2, 10), "abc");
    }
}
