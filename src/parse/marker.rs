use std::sync::LazyLock;

use regex::Regex;

/// `N年目の目標:` — the breakdown service encodes a yearly goal as a monthly
/// task whose title starts with this marker. Both ASCII and full-width
/// colons appear in generated titles.
static YEAR_GOAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)年目の目標\s*[:：]").expect("year-marker regex"));

/// Leading plan prefix like `1年目・3ヶ月目:` that generated titles carry;
/// stripped when the user edits a title in place.
static PLAN_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+.*?[:：]\s*").expect("plan-prefix regex"));

/// Detect the year-goal marker in a title, returning the year number.
///
/// The marker is a string convention owned by the AI breakdown service; it
/// must survive round-trips through the API unchanged, so callers sniff it
/// rather than rewrite it.
pub fn year_goal_marker(title: &str) -> Option<u32> {
    let captures = YEAR_GOAL.captures(title)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Strip a leading generated plan prefix from a title for in-place editing.
/// Titles without a prefix pass through untouched.
pub fn strip_plan_prefix(title: &str) -> &str {
    match PLAN_PREFIX.find(title) {
        Some(m) => &title[m.end()..],
        None => title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_marker_detected() {
        assert_eq!(year_goal_marker("1年目の目標: 英語で働く（12ヶ月計画）"), Some(1));
        assert_eq!(year_goal_marker("3年目の目標：独立する"), Some(3));
    }

    #[test]
    fn test_year_marker_absent() {
        assert_eq!(year_goal_marker("単語帳を1冊終える"), None);
        assert_eq!(year_goal_marker(""), None);
    }

    #[test]
    fn test_strip_plan_prefix() {
        assert_eq!(strip_plan_prefix("1年目・3ヶ月目: 基礎を固める"), "基礎を固める");
        assert_eq!(strip_plan_prefix("2週目：復習する"), "復習する");
        assert_eq!(strip_plan_prefix("プレフィックスなし"), "プレフィックスなし");
    }

    #[test]
    fn test_strip_plan_prefix_with_space_before_colon() {
        assert_eq!(strip_plan_prefix("1年目 前半: 基礎固め"), "基礎固め");
        // Lazy match stops at the first colon.
        assert_eq!(strip_plan_prefix("2週目: 教材: 文法書"), "教材: 文法書");
    }
}
