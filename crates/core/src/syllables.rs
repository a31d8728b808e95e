//! Heuristic syllable splitting used when importing words.

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

fn is_vowel(ch: char) -> bool {
    VOWELS.contains(&ch)
}

/// Splits `word` into syllables.
///
/// Hyphenated input is split on `-` and keeps its case. Otherwise the word is
/// lowercased and a syllable closes after a vowel that is followed by a
/// consonant (or ends the word), once it holds at least two characters;
/// leftover consonants join the last syllable. A word with no split point
/// comes back whole. Blank input yields no syllables.
#[must_use]
pub fn split_syllables(word: &str) -> Vec<String> {
    let word = word.trim();
    if word.is_empty() {
        return Vec::new();
    }

    if word.contains('-') {
        return word
            .split('-')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_owned)
            .collect();
    }

    let lower = word.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();
    let mut syllables: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        current.push(ch);
        let closes_vowel_run = chars.get(i + 1).is_none_or(|&next| !is_vowel(next));
        if is_vowel(ch) && closes_vowel_run && current.chars().count() >= 2 {
            syllables.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        match syllables.last_mut() {
            Some(last) => last.push_str(&current),
            None => syllables.push(current),
        }
    }

    syllables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_hyphens() {
        assert_eq!(split_syllables("well-be-ing"), vec!["well", "be", "ing"]);
        assert_eq!(split_syllables("re--do-"), vec!["re", "do"]);
    }

    #[test]
    fn splits_after_vowels() {
        assert_eq!(split_syllables("banana"), vec!["ba", "na", "na"]);
        assert_eq!(split_syllables("computer"), vec!["co", "mpu", "ter"]);
    }

    #[test]
    fn vowel_split_lowercases_the_word() {
        assert_eq!(split_syllables("Banana"), vec!["ba", "na", "na"]);
        assert_eq!(split_syllables("TOMATO"), vec!["to", "ma", "to"]);
    }

    #[test]
    fn hyphen_split_keeps_case() {
        assert_eq!(split_syllables("Well-Be-ing"), vec!["Well", "Be", "ing"]);
    }

    #[test]
    fn leftover_consonants_join_last_syllable() {
        assert_eq!(split_syllables("rhythm"), vec!["rhythm"]);
    }

    #[test]
    fn unsplittable_word_comes_back_whole() {
        assert_eq!(split_syllables("a"), vec!["a"]);
        assert_eq!(split_syllables("queue"), vec!["queue"]);
        assert_eq!(split_syllables("brr"), vec!["brr"]);
    }

    #[test]
    fn blank_word_has_no_syllables() {
        assert!(split_syllables("   ").is_empty());
    }
}
