//! Dictionary-based word segmentation

use jieba_rs::{Jieba, KeywordExtract, TfIdf};

/// Word segmenter with TF-IDF keyword extraction.
///
/// Loading the dictionary is expensive; create one instance and share it.
pub struct Segmenter {
    jieba: Jieba,
    extractor: TfIdf,
}

impl Segmenter {
    /// Create a segmenter with the default dictionary
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            extractor: TfIdf::default(),
        }
    }

    /// Segment text into words
    pub fn cut<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, true)
    }

    /// Extract the top-k keywords with TF-IDF weights
    pub fn keywords(&self, text: &str, top_k: usize) -> Vec<(String, f64)> {
        self.extractor
            .extract_keywords(&self.jieba, text, top_k, Vec::new())
            .into_iter()
            .map(|k| (k.keyword, k.weight))
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_splits_cjk_text_into_words() {
        let segmenter = Segmenter::new();
        let words = segmenter.cut("我们中出了一个叛徒");
        assert!(words.len() > 1);
        assert_eq!(words.concat(), "我们中出了一个叛徒");
    }

    #[test]
    fn keywords_are_capped_and_weighted() {
        let segmenter = Segmenter::new();
        let keywords = segmenter.keywords("北京欢迎你，北京是中国的首都。", 5);
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= 5);
        assert!(keywords.iter().all(|(_, weight)| *weight > 0.0));
    }
}
