/// Split text into line-aligned chunks of at most `max_chars` characters.
///
/// Length counts the joining newlines. A line that alone exceeds the budget
/// becomes its own chunk. Joining the result with `'\n'` gives back `text`.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut current_has_lines = false;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        if current_has_lines && current_len + 1 + line_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
            current_has_lines = false;
        }

        if current_has_lines {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
        current_has_lines = true;
    }

    if current_has_lines {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "WEBVTT\nKind: captions\nLanguage: en\n\n00:00:00.000 --> 00:00:02.000\nhello there\n\n00:00:02.000 --> 00:00:05.500\nwelcome back to the channel\n";

    #[test]
    fn test_empty_input() {
        assert!(split_into_chunks("", 10).is_empty());
    }

    #[test]
    fn test_fits_in_one_chunk() {
        assert_eq!(split_into_chunks("a\nb\nc", 100), vec!["a\nb\nc"]);
    }

    #[test]
    fn test_reconstructs_original() {
        for max in [1, 5, 12, 30, 64, 1000] {
            let chunks = split_into_chunks(SAMPLE, max);
            assert_eq!(chunks.join("\n"), SAMPLE, "max = {}", max);
        }
    }

    #[test]
    fn test_chunks_respect_budget() {
        let max = 30;
        let longest_line = SAMPLE.split('\n').map(|l| l.chars().count()).max().unwrap();
        assert!(longest_line <= max);

        for chunk in split_into_chunks(SAMPLE, max) {
            assert!(chunk.chars().count() <= max, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn test_oversized_line_stands_alone() {
        let text = "short\nthis line is far longer than the budget\nend";
        let chunks = split_into_chunks(text, 10);
        assert_eq!(
            chunks,
            vec!["short", "this line is far longer than the budget", "end"]
        );
        assert_eq!(chunks.join("\n"), text);
    }

    #[test]
    fn test_oversized_first_line_has_no_empty_chunk() {
        let chunks = split_into_chunks("abcdefghijkl\nxy", 5);
        assert_eq!(chunks, vec!["abcdefghijkl", "xy"]);
    }

    #[test]
    fn test_overflow_line_starts_next_chunk() {
        let chunks = split_into_chunks("aaaa\nbbbb\ncccc", 9);
        assert_eq!(chunks, vec!["aaaa\nbbbb", "cccc"]);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let text = "\n\nfirst\n\n";
        let chunks = split_into_chunks(text, 3);
        assert_eq!(chunks.join("\n"), text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 5));
    }

    #[test]
    fn test_budget_counts_characters_not_bytes() {
        let chunks = split_into_chunks("你好世界\n再见", 7);
        assert_eq!(chunks, vec!["你好世界\n再见"]);
    }
}
