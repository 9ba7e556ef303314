//! Fuzzy comparison of free-text guesses.
//!
//! Guessing games compare what a player typed against a secret target.
//! Players misspell, type only a surname, or add filler words, so the
//! comparison is deliberately forgiving. False positives are acceptable
//! in a party game; a frustrated guesser is not.

/// Shortest string that may match by containment.
const MIN_CONTAINMENT_LEN: usize = 3;

/// Edit distance tolerated between longer strings.
const MAX_TYPOS: usize = 2;

/// Returns `true` if `guess` should count as naming `target`.
///
/// Both sides are [normalized](normalize) first, then any of these
/// accepts:
///
/// - the normalized strings are equal;
/// - the guess equals one whitespace-delimited word of the target
///   ("Obama" for "Barack Obama");
/// - one contains the other and the shorter is at least 3 letters;
/// - both are longer than 3 letters and at most 2 edits apart.
///
/// An empty guess never matches.
///
/// ```rust
/// use partyline_games::matcher::fuzzy_match;
///
/// assert!(fuzzy_match("Obama", "Barack Obama"));
/// assert!(fuzzy_match("oboma", "obama"));
/// assert!(!fuzzy_match("xyz", "Barack Obama"));
/// ```
pub fn fuzzy_match(guess: &str, target: &str) -> bool {
    let guess = normalize(guess);
    let whole = normalize(target);
    if guess.is_empty() || whole.is_empty() {
        return false;
    }

    if guess == whole {
        return true;
    }

    if target
        .split_whitespace()
        .map(normalize)
        .any(|token| !token.is_empty() && token == guess)
    {
        return true;
    }

    let (shorter, longer) = if guess.chars().count() <= whole.chars().count() {
        (&guess, &whole)
    } else {
        (&whole, &guess)
    };
    if shorter.chars().count() >= MIN_CONTAINMENT_LEN && longer.contains(shorter.as_str()) {
        return true;
    }

    guess.chars().count() > 3
        && whole.chars().count() > 3
        && levenshtein(&guess, &whole) <= MAX_TYPOS
}

/// Lowercases and keeps letters only: `"Star Wars!"` becomes
/// `"starwars"`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Classic edit distance (insertions, deletions, substitutions), over
/// chars rather than bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the DP table.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
