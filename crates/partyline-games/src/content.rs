//! Round content: topics, word lists, templates, and video ids.
//!
//! Plain data, picked at random by [`GameKind::create`](crate::GameKind::create).

/// Word-filling templates. Every `{slot}` is one blank; a slot name may
/// repeat and each occurrence is a separate blank.
pub(crate) const MAD_LIB_TEMPLATES: &[&str] = &[
    "Once upon a time, a {adjective} {noun} decided to {verb} all the way to {place}. \
     On the road it met a {adjective} {animal} who shouted '{exclamation}!'",
    "At the {place} I ordered a {adjective} {food}. The {occupation} behind the counter \
     charged me {number} {plural_noun}, so I {verb_past_tense} straight out the door.",
    "My {family_member} swears that if you {verb} before breakfast, a {adjective} {animal} \
     will steal your {noun}. What {adjective} advice!",
    "Breaking news: a {adjective} {noun} was seen {verb_ing} across {place} this morning. \
     Witnesses called it '{adjective}'. The local {occupation} declined to comment.",
    "Dear {person_name}, your {adjective} {noun} has been {verb_past_tense}. Please bring \
     {number} {plural_noun} to the {place} at once. Yours, the {adjective} {occupation}",
];

/// Things to act out in charades.
pub(crate) const CHARADES_TOPICS: &[&str] = &[
    "Titanic",
    "Star Wars",
    "treadmill",
    "sailing",
    "flying a kite",
    "brushing teeth",
    "Superman",
    "making pizza",
    "riding a bicycle",
    "swimming",
    "building a snowman",
];

/// People to imitate.
pub(crate) const PEOPLE_TO_IMITATE: &[&str] = &[
    "George Washington",
    "Clint Eastwood",
    "Captain Kirk",
    "Barack Obama",
    "Morgan Freeman",
    "Donald Duck",
    "Elvis Presley",
];

/// Word pool for the connect-two-words game.
pub(crate) const CONNECTION_WORDS: &[&str] = &[
    "banana",
    "spaceship",
    "umbrella",
    "dinosaur",
    "piano",
    "volcano",
    "penguin",
    "telescope",
    "sandcastle",
    "lightning",
];

/// Objects for the race to find something.
pub(crate) const ITEMS_TO_FIND: &[&str] = &[
    "banana",
    "working gadget older than you",
    "blade of grass",
    "pen",
    "musical instrument",
    "ice cube",
    "compact disc",
];

pub(crate) const SUPERLATIVES: &[&str] = &[
    "oldest",
    "biggest",
    "fanciest",
    "most bizarre",
    "smallest",
    "newest",
    "weirdest",
    "pinkest",
];

pub(crate) const THINGS: &[&str] = &[
    "thing",
    "food",
    "kitchen utensil",
    "costume",
    "coin",
    "book",
    "hat",
];

/// YouTube ids of videos that are hard to watch with a straight face.
pub(crate) const VIDEO_IDS: &[&str] = &[
    "XCPj4JPbKtA",
    "nFAK8Vj62WM",
    "0H25ve3qts4",
    "Q9zvgcOrTtw",
    "Veg63B8ofnQ",
    "tjiouAv0-Gk",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_slots() {
        for template in MAD_LIB_TEMPLATES {
            assert!(template.contains('{'), "template without blanks: {template}");
            assert_eq!(
                template.matches('{').count(),
                template.matches('}').count(),
                "unbalanced braces: {template}"
            );
        }
    }

    #[test]
    fn test_pools_have_two_distinct_connection_words() {
        assert!(CONNECTION_WORDS.len() >= 2);
    }
}
