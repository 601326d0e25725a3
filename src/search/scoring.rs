//! Weighted substring scoring and match classification.
//!
//! Every function here expects an already normalized (lowercase) query. Lengths are measured in characters, not bytes.

use crate::catalog::ToolRecord;
use crate::search::types::MatchType;

const NAME_EXACT: u32 = 1000;
const NAME_PREFIX: u32 = 500;
const NAME_CONTAINS: u32 = 200;
/// Names shorter than this earn a bonus on substring hits
const SHORT_NAME_LENGTH: usize = 50;

const DESCRIPTION_PREFIX: u32 = 100;
const DESCRIPTION_CONTAINS: u32 = 50;

const KEYWORD_EXACT: u32 = 300;
const KEYWORD_PREFIX: u32 = 150;
const KEYWORD_CONTAINS: u32 = 75;

const CATEGORY_CONTAINS: u32 = 25;

/// (threshold, bonus) pairs, highest first; only the first exceeded tier applies
const POPULARITY_TIERS: [(u64, u32); 3] = [(100_000, 20), (50_000, 10), (20_000, 5)];

const SHORT_QUERY_LENGTH: usize = 3;
const LONG_NAME_LENGTH: usize = 25;
const SHORT_QUERY_PENALTY: f64 = 0.8;

const EASY_DIFFICULTY: u8 = 2;
const EASY_BONUS: u32 = 5;

/// Relevance score of `tool` for `query`.
///
/// Fields are scored independently, but the tiers within one field are
/// exclusive: a name, the description or a single keyword only earns its
/// strongest tier. Every keyword is scored on its own. Popularity, the
/// short-query penalty and the difficulty bonus only apply once a text signal
/// fired; without one the score is zero.
pub fn score_tool(tool: &ToolRecord, query: &str) -> u32 {
    let name = tool.name.to_lowercase();
    let description = tool.description.to_lowercase();
    let name_length = name.chars().count();

    let mut score: u32 = 0;
    let mut has_match = false;

    if name == query {
        score += NAME_EXACT;
        has_match = true;
    } else if name.starts_with(query) {
        score += NAME_PREFIX;
        has_match = true;
    } else if name.contains(query) {
        score += NAME_CONTAINS + SHORT_NAME_LENGTH.saturating_sub(name_length) as u32;
        has_match = true;
    }

    if description.starts_with(query) {
        score += DESCRIPTION_PREFIX;
        has_match = true;
    } else if description.contains(query) {
        score += DESCRIPTION_CONTAINS;
        has_match = true;
    }

    for keyword in &tool.keywords {
        let keyword = keyword.to_lowercase();
        if keyword == query {
            score += KEYWORD_EXACT;
            has_match = true;
        } else if keyword.starts_with(query) {
            score += KEYWORD_PREFIX;
            has_match = true;
        } else if keyword.contains(query) {
            score += KEYWORD_CONTAINS;
            has_match = true;
        }
    }

    if tool.category.to_lowercase().contains(query) {
        score += CATEGORY_CONTAINS;
        has_match = true;
    }

    if !has_match {
        return 0;
    }

    score += popularity_bonus(tool.search_volume);

    let mut adjusted = f64::from(score);
    if query.chars().count() < SHORT_QUERY_LENGTH && name_length > LONG_NAME_LENGTH {
        adjusted *= SHORT_QUERY_PENALTY;
    }

    if tool.difficulty.is_some_and(|d| d <= EASY_DIFFICULTY) {
        adjusted += f64::from(EASY_BONUS);
    }

    adjusted.round() as u32
}

fn popularity_bonus(search_volume: Option<u64>) -> u32 {
    let Some(volume) = search_volume else {
        return 0;
    };

    POPULARITY_TIERS
        .iter()
        .find(|(threshold, _)| volume > *threshold)
        .map_or(0, |(_, bonus)| *bonus)
}

/// Classify a match, independently of its score.
///
/// Priority: exact name, name prefix, name substring, keyword substring,
/// description substring, then `Contains` as the fallback.
pub fn match_type(tool: &ToolRecord, query: &str) -> MatchType {
    let name = tool.name.to_lowercase();

    if name == query {
        MatchType::Exact
    } else if name.starts_with(query) {
        MatchType::Prefix
    } else if name.contains(query) {
        MatchType::Contains
    } else if tool
        .keywords
        .iter()
        .any(|k| k.to_lowercase().contains(query))
    {
        MatchType::Keyword
    } else if tool.description.to_lowercase().contains(query) {
        MatchType::Description
    } else {
        MatchType::Contains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str) -> ToolRecord {
        ToolRecord::new("t", name, "", "misc")
    }

    #[test]
    fn test_exact_name() {
        assert_eq!(score_tool(&tool("BMI Calculator"), "bmi calculator"), 1000);
        assert_eq!(match_type(&tool("BMI Calculator"), "bmi calculator"), MatchType::Exact);
    }

    #[test]
    fn test_name_prefix_excludes_substring_bonus() {
        assert_eq!(score_tool(&tool("Currency Converter"), "currency"), 500);
        assert_eq!(match_type(&tool("Currency Converter"), "currency"), MatchType::Prefix);
    }

    #[test]
    fn test_name_substring_short_name_bonus() {
        // "gear ratio tool": 15 chars -> 200 + (50 - 15)
        assert_eq!(score_tool(&tool("Gear Ratio Tool"), "ratio"), 235);
        assert_eq!(match_type(&tool("Gear Ratio Tool"), "ratio"), MatchType::Contains);
    }

    #[test]
    fn test_long_name_gets_no_shortness_bonus() {
        let name = "A".repeat(60) + " converter";
        assert_eq!(score_tool(&tool(&name), "converter"), 200);
    }

    #[test]
    fn test_description_tiers() {
        let starts = ToolRecord::new("t", "Widget", "Convert units quickly", "misc");
        let contains = ToolRecord::new("t", "Widget", "Quickly convert units", "misc");

        assert_eq!(score_tool(&starts, "convert"), 100);
        assert_eq!(score_tool(&contains, "convert"), 50);
        assert_eq!(match_type(&contains, "convert"), MatchType::Description);
    }

    #[test]
    fn test_keywords_accumulate() {
        let record = tool("Widget").with_keywords(["mpg", "mpg calculator", "fuel mpg"]);
        // exact 300 + prefix 150 + contains 75
        assert_eq!(score_tool(&record, "mpg"), 525);
        assert_eq!(match_type(&record, "mpg"), MatchType::Keyword);
    }

    #[test]
    fn test_keyword_prefix_excludes_substring_bonus() {
        let record = tool("Widget").with_keywords(["mortgage rates"]);
        assert_eq!(score_tool(&record, "mortgage"), 150);
    }

    #[test]
    fn test_category_match() {
        let record = ToolRecord::new("t", "Widget", "", "automotive");
        assert_eq!(score_tool(&record, "auto"), 25);
    }

    #[test]
    fn test_no_match_scores_zero_despite_bonuses() {
        let record = tool("BMI Calculator")
            .with_keywords(["health"])
            .with_search_volume(500_000)
            .with_difficulty(1);
        assert_eq!(score_tool(&record, "currency"), 0);
    }

    #[test]
    fn test_popularity_tiers() {
        assert_eq!(popularity_bonus(None), 0);
        assert_eq!(popularity_bonus(Some(150_000)), 20);
        assert_eq!(popularity_bonus(Some(100_000)), 10);
        assert_eq!(popularity_bonus(Some(50_000)), 5);
        assert_eq!(popularity_bonus(Some(20_000)), 0);
    }

    #[test]
    fn test_popularity_applied_on_match() {
        let record = tool("Currency Converter").with_search_volume(150_000);
        assert_eq!(score_tool(&record, "currency"), 520);
    }

    #[test]
    fn test_short_query_penalty_on_long_name() {
        // 29 chars, contains "mp": (200 + 21) * 0.8 = 176.8 -> 177
        let record = tool("Fuel Economy MPG Estimator XL");
        assert_eq!(score_tool(&record, "mp"), 177);
    }

    #[test]
    fn test_short_query_no_penalty_on_short_name() {
        assert_eq!(score_tool(&tool("MPG Tool"), "mp"), 500);
    }

    #[test]
    fn test_easy_difficulty_bonus() {
        assert_eq!(score_tool(&tool("Tip Calculator").with_difficulty(2), "tip"), 505);
        assert_eq!(score_tool(&tool("Tip Calculator").with_difficulty(3), "tip"), 500);
    }

    #[test]
    fn test_case_insensitive_fields() {
        let record = ToolRecord::new("t", "Widget", "", "misc").with_keywords(["FOREX"]);
        assert_eq!(score_tool(&record, "forex"), 300);
    }

    #[test]
    fn test_match_type_fallback_for_category_only() {
        let record = ToolRecord::new("t", "Widget", "", "automotive");
        assert_eq!(match_type(&record, "auto"), MatchType::Contains);
    }
}
