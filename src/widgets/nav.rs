/// Detection offset applied to both the scroll position and section tops.
pub const DETECT_OFFSET: i64 = 100;

/// Gap left above a section when jumping to it.
pub const JUMP_OFFSET: i64 = 80;

/// Vertical extent of a page section, in whatever unit the page scrolls by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionBounds {
    pub id: String,
    pub top: i64,
    pub height: i64,
}

impl SectionBounds {
    pub fn new(id: &str, top: i64, height: i64) -> Self {
        Self {
            id: id.to_string(),
            top,
            height,
        }
    }
}

/// Section whose detection band contains the scroll position; last match wins.
pub fn active_section(scroll_pos: i64, sections: &[SectionBounds]) -> Option<&str> {
    active_section_with(scroll_pos, DETECT_OFFSET, sections)
}

/// `active_section` with a caller-chosen offset, for pages not measured in pixels.
pub fn active_section_with(scroll_pos: i64, offset: i64, sections: &[SectionBounds]) -> Option<&str> {
    let probe = scroll_pos + offset;
    sections
        .iter()
        .rev()
        .find(|s| {
            let top = s.top - offset;
            probe >= top && probe < top + s.height
        })
        .map(|s| s.id.as_str())
}

/// Scroll position that brings `section` into view.
pub fn scroll_target(section: &SectionBounds) -> i64 {
    scroll_target_with(section, JUMP_OFFSET)
}

pub fn scroll_target_with(section: &SectionBounds, gap: i64) -> i64 {
    (section.top - gap).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("overview", 0, 600),
            SectionBounds::new("portfolio", 600, 1200),
            SectionBounds::new("disclosures", 1800, 400),
        ]
    }

    /// Scenario: scroll positions at the top, mid-portfolio and bottom of the page
    /// Expected: the section whose shifted band contains scroll+100
    #[test]
    fn test_active_section_bands() {
        let sections = page();
        assert_eq!(active_section(0, &sections), Some("overview"));
        assert_eq!(active_section(399, &sections), Some("overview"));
        assert_eq!(active_section(400, &sections), Some("portfolio"));
        assert_eq!(active_section(1700, &sections), Some("disclosures"));
    }

    /// Scenario: scrolled past the end of the last section
    /// Expected: no active section
    #[test]
    fn test_active_section_none() {
        assert_eq!(active_section(5000, &page()), None);
        assert_eq!(active_section(0, &[]), None);
    }

    /// Scenario: overlapping sections both contain the probe
    /// Expected: the later one in document order wins
    #[test]
    fn test_active_section_last_match_wins() {
        let sections = vec![
            SectionBounds::new("outer", 0, 1000),
            SectionBounds::new("inner", 300, 100),
        ];
        assert_eq!(active_section(150, &sections), Some("inner"));
    }

    /// Scenario: line-based page with a 2-line detection offset
    /// Expected: bands shift by the given offset instead of 100
    #[test]
    fn test_active_section_custom_offset() {
        let sections = vec![
            SectionBounds::new("overview", 0, 6),
            SectionBounds::new("portfolio", 6, 20),
        ];
        assert_eq!(active_section_with(1, 2, &sections), Some("overview"));
        assert_eq!(active_section_with(2, 2, &sections), Some("portfolio"));
        assert_eq!(scroll_target_with(&sections[1], 1), 5);
    }

    /// Scenario: jump targets near and far from the top
    /// Expected: top - 80, never negative
    #[test]
    fn test_scroll_target() {
        let sections = page();
        assert_eq!(scroll_target(&sections[0]), 0);
        assert_eq!(scroll_target(&sections[1]), 520);
    }
}
