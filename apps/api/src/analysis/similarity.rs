//! Lexical similarity between two documents.
//!
//! TF-IDF over exactly the two input documents: lowercase tokens of two or more
//! word characters, English stop words removed, raw term counts, smoothed idf
//! `ln((1 + n) / (1 + df)) + 1` and L2-normalised vectors. The cosine of the two
//! vectors is reported as a percentage rounded to two decimals.

use std::collections::HashMap;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot",
    "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else", "elsewhere",
    "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything", "everywhere",
    "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five", "for", "former",
    "formerly", "forty", "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie",
    "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my",
    "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no", "nobody",
    "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
    "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
    "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those", "though",
    "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top", "toward",
    "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us", "very",
    "via", "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
    "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which",
    "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Number of documents in the corpus. Always the résumé and the job description.
const CORPUS_SIZE: f64 = 2.0;

/// Splits on non-word characters, keeps tokens of two or more characters and drops stop words.
///
/// Word characters are `char::is_alphanumeric` plus `_`. Combining marks such as
/// U+0301 are separators, as with a `\w` regex, so decomposed "cafe\u{301}" yields
/// "cafe". Marks carrying the Unicode `Other_Alphabetic` property (many Indic
/// vowel signs) count as alphabetic here and stay inside the token.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

fn term_counts(tokens: &[String]) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Weights each term by its smoothed idf and scales the vector to unit length.
/// Returns `None` for an empty vector.
fn weighted_unit_vector<'a>(
    counts: &HashMap<&'a str, f64>,
    doc_freq: &HashMap<&str, f64>,
) -> Option<HashMap<&'a str, f64>> {
    let weighted: HashMap<&str, f64> = counts
        .iter()
        .map(|(term, tf)| {
            let df = doc_freq.get(term).copied().unwrap_or(1.0);
            let idf = ((1.0 + CORPUS_SIZE) / (1.0 + df)).ln() + 1.0;
            (*term, tf * idf)
        })
        .collect();

    let norm = weighted.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        return None;
    }
    Some(weighted.into_iter().map(|(t, w)| (t, w / norm)).collect())
}

/// Cosine similarity of the two texts as a percentage in `[0, 100]`, two decimals.
///
/// Empty input, stop-word-only input and texts with no shared vocabulary all score 0.
pub fn similarity(text_a: &str, text_b: &str) -> f64 {
    let tokens_a = tokenize(text_a);
    let tokens_b = tokenize(text_b);
    let counts_a = term_counts(&tokens_a);
    let counts_b = term_counts(&tokens_b);

    let mut doc_freq: HashMap<&str, f64> = HashMap::new();
    for term in counts_a.keys().chain(counts_b.keys()) {
        *doc_freq.entry(*term).or_insert(0.0) += 1.0;
    }

    let (Some(vec_a), Some(vec_b)) = (
        weighted_unit_vector(&counts_a, &doc_freq),
        weighted_unit_vector(&counts_b, &doc_freq),
    ) else {
        return 0.0;
    };

    // fold from +0.0: an empty f64 `sum` is -0.0, which would leak into JSON.
    let cosine = vec_a
        .iter()
        .filter_map(|(term, wa)| vec_b.get(term).map(|wb| wa * wb))
        .fold(0.0, |acc, x| acc + x);

    round2((cosine * 100.0).clamp(0.0, 100.0))
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_score_100() {
        let text = "Senior Rust engineer building distributed storage services";
        assert_eq!(similarity(text, text), 100.0);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        assert_eq!(similarity("python docker kubernetes", "accounting payroll ledger"), 0.0);
    }

    #[test]
    fn test_zero_scores_are_positive_zero() {
        assert!(similarity("python docker", "accounting payroll ledger").is_sign_positive());
        assert!(similarity("", "").is_sign_positive());
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(similarity("", "python developer"), 0.0);
        assert_eq!(similarity("python developer", ""), 0.0);
        assert_eq!(similarity("", ""), 0.0);
    }

    #[test]
    fn test_stop_words_only_scores_zero() {
        assert_eq!(similarity("the and of", "the and of"), 0.0);
    }

    #[test]
    fn test_single_character_tokens_ignored() {
        assert_eq!(similarity("a b c", "a b c"), 0.0);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(similarity("Python, Docker!", "python docker"), 100.0);
    }

    #[test]
    fn test_partial_overlap() {
        // Shared term "python" has idf 1, unique terms ln(1.5) + 1 each.
        let unique = (1.5f64).ln() + 1.0;
        let expected = 1.0 / (1.0 + unique * unique);
        let score = similarity("python docker", "python aws");
        assert!((score - round2(expected * 100.0)).abs() < 1e-9);
        assert!(score > 0.0 && score < 100.0);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = "Built REST APIs in Python with FastAPI and PostgreSQL";
        let b = "Looking for a Python developer with PostgreSQL experience";
        assert_eq!(similarity(a, b), similarity(b, a));
    }

    #[test]
    fn test_tokenize_splits_on_combining_accent() {
        assert_eq!(tokenize("Cafe\u{301} re\u{301}sume\u{301}"), vec!["cafe", "sume"]);
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        assert_eq!(tokenize("I must use C and Rust_lang"), vec!["use", "rust_lang"]);
    }
}
