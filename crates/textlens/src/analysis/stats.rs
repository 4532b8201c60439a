//! Word-frequency statistics over segmented text

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Segmenter;

/// Candidate words must start with a CJK ideograph
static CJK_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\u{4e00}-\u{9fa5}]+").unwrap());

/// Suffixes that mark technique/item terms in wuxia and xianxia fiction
static ITEM_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[术诀经法阵掌剑丹器符体功篇卷]$").unwrap());

/// A keyword with its TF-IDF weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub word: String,
    pub weight: f64,
}

/// A name (or term) with its occurrence count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: u64,
}

/// Frequency statistics for one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStats {
    /// Top TF-IDF keywords
    pub keywords: Vec<KeywordEntry>,
    /// Most frequent short CJK words (person-name candidates)
    pub persons: Vec<NameCount>,
    /// Most frequent technique/item terms
    pub items_skills: Vec<NameCount>,
    /// Text length in characters
    pub chars: usize,
    /// Number of candidate words seen by the counters
    pub words_est: usize,
}

/// Compute frequency statistics for a text.
///
/// Candidate words are segmented words of 2-3 characters starting with a CJK
/// ideograph; `persons` counts all of them, `items_skills` only those ending
/// in a technique/item suffix. Both tables are sorted by count descending
/// with ties in first-seen order.
pub fn compute_stats(segmenter: &Segmenter, text: &str, top_k: usize) -> TextStats {
    let keywords = segmenter
        .keywords(text, top_k)
        .into_iter()
        .map(|(word, weight)| KeywordEntry { word, weight })
        .collect();

    let words: Vec<&str> = segmenter
        .cut(text)
        .into_iter()
        .filter(|w| {
            let len = w.chars().count();
            len > 1 && len <= 3 && CJK_WORD.is_match(w)
        })
        .collect();

    let persons = top_counts(words.iter().copied(), top_k);
    let items_skills = top_counts(
        words.iter().copied().filter(|w| ITEM_SUFFIX.is_match(w)),
        top_k,
    );

    TextStats {
        keywords,
        persons,
        items_skills,
        chars: text.chars().count(),
        words_est: words.len(),
    }
}

/// Tally words and keep the top-k by count, ties in first-seen order
fn top_counts<'a, I>(words: I, top_k: usize) -> Vec<NameCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<NameCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for word in words {
        match index.get(word) {
            Some(&at) => order[at].count += 1,
            None => {
                index.insert(word, order.len());
                order.push(NameCount {
                    name: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order within equal counts
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(top_k);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_counts_sorts_by_frequency_with_stable_ties() {
        let counts = top_counts(vec!["甲乙", "丙丁", "甲乙", "戊己", "丙丁", "甲乙"], 10);
        assert_eq!(counts[0].name, "甲乙");
        assert_eq!(counts[0].count, 3);
        assert_eq!(counts[1].name, "丙丁");
        assert_eq!(counts[2].name, "戊己");
    }

    #[test]
    fn top_counts_truncates_to_k() {
        let counts = top_counts(vec!["一一", "二二", "三三", "四四"], 2);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn stats_count_persons_and_items() {
        let segmenter = Segmenter::new();
        // 师父 repeats three times and is a dictionary word
        let text = "师父带着弟子修炼剑法。师父笑了。弟子拜谢师父。";
        let stats = compute_stats(&segmenter, text, 50);

        let master = stats.persons.iter().find(|p| p.name == "师父").unwrap();
        assert_eq!(master.count, 3);
        assert_eq!(stats.persons[0].name, "师父");
        assert!(stats.items_skills.iter().all(|i| {
            let last = i.name.chars().last().unwrap();
            "术诀经法阵掌剑丹器符体功篇卷".contains(last)
        }));
        assert_eq!(stats.chars, text.chars().count());
        assert!(stats.words_est > 0);
    }

    #[test]
    fn non_cjk_words_are_not_candidates() {
        let segmenter = Segmenter::new();
        let stats = compute_stats(&segmenter, "hello world hello rust", 50);
        assert!(stats.persons.is_empty());
        assert!(stats.items_skills.is_empty());
        assert_eq!(stats.words_est, 0);
        assert_eq!(stats.chars, 22);
    }

    #[test]
    fn single_characters_are_filtered_out() {
        let segmenter = Segmenter::new();
        // 的 segments as a single character and must not be counted
        let stats = compute_stats(&segmenter, "的 的 的", 50);
        assert!(stats.persons.iter().all(|p| p.name.chars().count() > 1));
    }
}
