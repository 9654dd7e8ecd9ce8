//! Spreadsheet-style column names for auto-labelled parts.

/// Returns the bijective base-26 name for a zero-based index.
///
/// `0 → "A"`, `25 → "Z"`, `26 → "AA"`, `701 → "ZZ"`, `702 → "AAA"`.
pub fn column_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(1), "B");
        assert_eq!(column_name(25), "Z");
    }

    #[test]
    fn test_two_letters() {
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(51), "AZ");
        assert_eq!(column_name(52), "BA");
        assert_eq!(column_name(701), "ZZ");
    }

    #[test]
    fn test_three_letters() {
        assert_eq!(column_name(702), "AAA");
        assert_eq!(column_name(703), "AAB");
    }
}
