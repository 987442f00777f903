//! Large five-row glyphs for the countdown clock.

/// Height of every glyph, in rows.
pub const GLYPH_HEIGHT: usize = 5;

/// Width of every glyph, in columns (a one-column gap follows each glyph).
pub const GLYPH_WIDTH: usize = 5;

fn glyph(c: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    let rows = match c {
        '0' => [" ███ ", "█   █", "█   █", "█   █", " ███ "],
        '1' => ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "],
        '2' => [" ███ ", "█   █", "   █ ", "  █  ", "█████"],
        '3' => [" ███ ", "█   █", "  ██ ", "█   █", " ███ "],
        '4' => ["█   █", "█   █", "█████", "    █", "    █"],
        '5' => ["█████", "█    ", "████ ", "    █", "████ "],
        '6' => [" ███ ", "█    ", "████ ", "█   █", " ███ "],
        '7' => ["█████", "    █", "   █ ", "  █  ", " █   "],
        '8' => [" ███ ", "█   █", " ███ ", "█   █", " ███ "],
        '9' => [" ███ ", "█   █", " ████", "    █", " ███ "],
        ':' => ["     ", "  █  ", "     ", "  █  ", "     "],
        ' ' => ["     ", "     ", "     ", "     ", "     "],
        _ => return None,
    };
    Some(rows)
}

/// Renders `text` as glyph rows; characters without a glyph are skipped.
pub fn render_text(text: &str) -> Vec<String> {
    let mut rows = vec![String::new(); GLYPH_HEIGHT];
    for rows_of_char in text.chars().filter_map(glyph) {
        for (row, part) in rows.iter_mut().zip(rows_of_char) {
            row.push_str(part);
            row.push(' ');
        }
    }
    rows
}

/// Renders `minutes:seconds` as `MM:SS` glyph rows.
pub fn ascii_time(minutes: u64, seconds: u64) -> Vec<String> {
    render_text(&format!("{minutes:02}:{seconds:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_has_five_equal_rows() {
        let rows = ascii_time(1, 5);
        assert_eq!(rows.len(), GLYPH_HEIGHT);
        for row in &rows {
            assert_eq!(row.chars().count(), 5 * (GLYPH_WIDTH + 1));
        }
    }

    #[test]
    fn test_zero_zero_rows() {
        let rows = ascii_time(0, 0);
        assert_eq!(rows[0], " ███   ███         ███   ███  ");
        assert_eq!(rows[1], "█   █ █   █   █   █   █ █   █ ");
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        assert_eq!(render_text("1x"), render_text("1"));
        assert!(render_text("").iter().all(String::is_empty));
    }
}
