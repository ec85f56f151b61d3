//! Ordering of the keys of a reduce task.

use std::cmp::Ordering;

/// Function type to be used as custom compare function
pub type Comparer<T> = fn(a: &T, b: &T) -> Ordering;

/// Compares keys by their UTF-8 bytes. This is the order of reduce calls and of the output;
/// it does not depend on locale or process and so is the same on every retry.
#[inline]
pub fn byte_compare(a: &String, b: &String) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Sorts (key, values) groups in place by key with `cmp`. Keys are distinct, so stability does
/// not matter.
pub fn sort_groups<V>(groups: &mut [(String, V)], cmp: Comparer<String>) {
    groups.sort_unstable_by(|a, b| cmp(&a.0, &b.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_byte_compare() {
        let cnv = String::from;
        assert_eq!(byte_compare(&cnv(""), &cnv("0abc")), Ordering::Less);
        assert_eq!(byte_compare(&cnv("0abc"), &cnv("123")), Ordering::Less);
        assert_eq!(byte_compare(&cnv("abc"), &cnv("abc")), Ordering::Equal);
        // Upper case sorts before lower case.
        assert_eq!(byte_compare(&cnv("Zebra"), &cnv("apple")), Ordering::Less);
        assert_eq!(byte_compare(&cnv("ab"), &cnv("abc")), Ordering::Less);
        assert_eq!(byte_compare(&cnv("\u{e9}"), &cnv("z")), Ordering::Greater);
    }

    #[test]
    fn test_sort_groups() {
        let mut groups: Vec<(String, usize)> = ["pear", "Apple", "apple", "", "apples", "10", "9"]
            .iter()
            .enumerate()
            .map(|(i, s)| (s.to_string(), i))
            .collect();
        sort_groups(&mut groups, byte_compare);

        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["", "10", "9", "Apple", "apple", "apples", "pear"]);
        // Values move with their keys.
        assert_eq!(groups[0].1, 3);
        assert_eq!(groups[6].1, 0);
    }
}
