/// String utility functions

/// Display label for a spell level: "Cantrip" for 0, "Level N" otherwise
pub fn level_label(level: u8) -> String {
    if level == 0 {
        "Cantrip".to_string()
    } else {
        format!("Level {}", level)
    }
}

/// Shorten text to at most `width` characters, ending with "..." when cut
pub fn truncate_with_ellipsis(text: &str, width: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return ".".repeat(width);
    }

    let mut result: String = text.chars().take(width - 3).collect();
    result.truncate(result.trim_end().len());
    result.push_str("...");
    result
}

const MAX_BAR_CELLS: u32 = 20;

/// Text gauge of ring usage, e.g. `[###--] 3/5`. Large capacities are
/// drawn scaled down to `MAX_BAR_CELLS`.
pub fn capacity_bar(total: u32, capacity: u32) -> String {
    let cells = capacity.min(MAX_BAR_CELLS);
    let filled = if capacity == 0 {
        0
    } else {
        (u64::from(total.min(capacity)) * u64::from(cells) / u64::from(capacity)) as usize
    };
    let empty = cells as usize - filled;
    format!("[{}{}] {}/{}", "#".repeat(filled), "-".repeat(empty), total, capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_label() {
        assert_eq!(level_label(0), "Cantrip");
        assert_eq!(level_label(3), "Level 3");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Short", 10), "Short");
        assert_eq!(
            truncate_with_ellipsis("A bright streak flashes from your finger", 20),
            "A bright streak f..."
        );
        assert_eq!(truncate_with_ellipsis("Ümläut spell", 4), "Ü...");
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "..");
    }

    #[test]
    fn test_capacity_bar() {
        assert_eq!(capacity_bar(3, 5), "[###--] 3/5");
        assert_eq!(capacity_bar(0, 5), "[-----] 0/5");
        assert_eq!(capacity_bar(5, 5), "[#####] 5/5");
        assert_eq!(capacity_bar(7, 5), "[#####] 7/5");
        assert_eq!(capacity_bar(0, 0), "[] 0/0");
        assert_eq!(
            capacity_bar(2_000_000_000, 4_000_000_000),
            "[##########----------] 2000000000/4000000000"
        );
    }
}
