//! Reduce functions of the two sample jobs, word count and inverted index.

use crate::error::ReduceError;

/// Sums the counts emitted for a word. Fails on a value that is not a decimal integer and on
/// a sum that does not fit in a u64.
pub fn word_count_reduce(word: &str, counts: &[String]) -> Result<String, ReduceError> {
    let mut sum: u64 = 0;
    for c in counts {
        let n: u64 = c
            .trim()
            .parse()
            .map_err(|e| format!("count {:?} is not a number: {}", c, e))?;
        sum = sum
            .checked_add(n)
            .ok_or_else(|| format!("count overflow for {:?}", word))?;
    }
    Ok(sum.to_string())
}

/// Lists the documents a word occurs in as `"<n> <doc1>,<doc2>,..."`. Every document appears
/// once, in the order it was first seen.
pub fn inverted_index_reduce(_word: &str, documents: &[String]) -> String {
    let mut distinct: Vec<&str> = Vec::with_capacity(documents.len());
    for d in documents {
        if !distinct.contains(&d.as_str()) {
            distinct.push(d);
        }
    }
    format!("{} {}", distinct.len(), distinct.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count_reduce("w", &strings(&["1", "1", "1"])).unwrap(), "3");
        assert_eq!(word_count_reduce("w", &strings(&["2", "40"])).unwrap(), "42");
        assert!(word_count_reduce("w", &strings(&["1", "x"])).is_err());
    }

    #[test]
    fn test_word_count_overflow() {
        let max = u64::MAX.to_string();
        assert_eq!(word_count_reduce("w", &[max.clone()]).unwrap(), max);

        let err = word_count_reduce("w", &[max, String::from("1")]).unwrap_err();
        assert_eq!(err.to_string(), "count overflow for \"w\"");
    }

    #[test]
    fn test_inverted_index() {
        let docs = strings(&["b.txt", "a.txt", "b.txt", "c.txt", "a.txt"]);
        assert_eq!(inverted_index_reduce("w", &docs), "3 b.txt,a.txt,c.txt");
        assert_eq!(inverted_index_reduce("w", &strings(&["only"])), "1 only");
    }
}
