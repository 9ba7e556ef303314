//! The registry of mini-game kinds.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::content;
use crate::{Acting, Consensus, Countdown, MadLib, MiniGame, ScoringPolicy, VideoWatch};

/// Knobs that shape newly created rounds.
#[derive(Debug, Clone)]
pub struct GameSettings {
    /// Length of the countdown for timed kinds, in seconds.
    pub countdown_secs: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self { countdown_secs: 30 }
    }
}

/// Discriminator for every mini-game the server knows.
///
/// The lowercase variant name is the id used on the wire (`game_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    MadLibs,
    Charades,
    ClaudesGame,
    FirstToFind,
    Imitations,
    BlankestBlank,
    YouLaughYouLose,
}

/// Returned when parsing an id that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game kind: {0}")]
pub struct UnknownKind(pub String);

impl GameKind {
    /// Every registered kind, in rotation order.
    pub const ALL: [GameKind; 7] = [
        Self::MadLibs,
        Self::Charades,
        Self::ClaudesGame,
        Self::FirstToFind,
        Self::Imitations,
        Self::BlankestBlank,
        Self::YouLaughYouLose,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::MadLibs => "madlibs",
            Self::Charades => "charades",
            Self::ClaudesGame => "claudesgame",
            Self::FirstToFind => "firsttofind",
            Self::Imitations => "imitations",
            Self::BlankestBlank => "blankestblank",
            Self::YouLaughYouLose => "youlaughyoulose",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MadLibs => "Mad Libs",
            Self::Charades => "Charades",
            Self::ClaudesGame => "Claude's Game",
            Self::FirstToFind => "First to Find",
            Self::Imitations => "Imitations",
            Self::BlankestBlank => "Find the Blankest Blank",
            Self::YouLaughYouLose => "You Laugh You Lose",
        }
    }

    /// Players needed for the kind to be playable. Acting kinds need an
    /// actor plus at least one guesser.
    pub fn min_players(&self) -> usize {
        match self {
            Self::MadLibs => 0,
            Self::Charades | Self::Imitations => 2,
            Self::ClaudesGame
            | Self::FirstToFind
            | Self::BlankestBlank
            | Self::YouLaughYouLose => 1,
        }
    }

    /// Whether finishing the round leads to a vote instead of straight
    /// to the results.
    pub fn needs_vote(&self) -> bool {
        matches!(
            self,
            Self::ClaudesGame
                | Self::FirstToFind
                | Self::BlankestBlank
                | Self::YouLaughYouLose
        )
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        match self {
            Self::Charades | Self::Imitations => ScoringPolicy::FirstCorrectGuess,
            Self::ClaudesGame => ScoringPolicy::VoteOnly,
            Self::MadLibs
            | Self::FirstToFind
            | Self::BlankestBlank
            | Self::YouLaughYouLose => ScoringPolicy::PerSubmission,
        }
    }

    /// Creates a fresh round of this kind with randomly picked content.
    pub fn create(
        &self,
        settings: &GameSettings,
        rng: &mut StdRng,
    ) -> Box<dyn MiniGame> {
        match self {
            Self::MadLibs => Box::new(MadLib::new(pick(content::MAD_LIB_TEMPLATES, rng))),
            Self::Charades => Box::new(Acting::new(*self, pick(content::CHARADES_TOPICS, rng))),
            Self::Imitations => Box::new(Acting::new(*self, pick(content::PEOPLE_TO_IMITATE, rng))),
            Self::ClaudesGame => {
                let mut words = content::CONNECTION_WORDS.choose_multiple(rng, 2);
                let first = words.next().copied().unwrap_or("banana");
                let second = words.next().copied().unwrap_or("volcano");
                Box::new(Consensus::new(first, second))
            }
            Self::FirstToFind => Box::new(Countdown::first_to_find(
                pick(content::ITEMS_TO_FIND, rng),
                settings.countdown_secs,
            )),
            Self::BlankestBlank => Box::new(Countdown::blankest_blank(
                pick(content::SUPERLATIVES, rng),
                pick(content::THINGS, rng),
                settings.countdown_secs,
            )),
            Self::YouLaughYouLose => Box::new(VideoWatch::new(pick(content::VIDEO_IDS, rng))),
        }
    }

    /// Picks the next kind for a roster of `players`.
    ///
    /// Only kinds in `allowed` whose minimum is met are eligible. When
    /// none is, falls back to an allowed kind without a minimum, and
    /// finally to Mad Libs.
    pub fn choose(players: usize, allowed: &[GameKind], rng: &mut StdRng) -> GameKind {
        let eligible: Vec<GameKind> = allowed
            .iter()
            .copied()
            .filter(|kind| kind.min_players() <= players)
            .collect();
        if let Some(kind) = eligible.choose(rng) {
            return *kind;
        }

        allowed
            .iter()
            .copied()
            .find(|kind| kind.min_players() == 0)
            .unwrap_or(Self::MadLibs)
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GameKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

fn pick(items: &[&'static str], rng: &mut StdRng) -> &'static str {
    items[rng.random_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for kind in GameKind::ALL {
            assert_eq!(kind.id().parse::<GameKind>(), Ok(kind));
        }
        assert!("tetris".parse::<GameKind>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_id() {
        let json = serde_json::to_string(&GameKind::YouLaughYouLose).unwrap();
        assert_eq!(json, "\"youlaughyoulose\"");
        let kind: GameKind = serde_json::from_str("\"claudesgame\"").unwrap();
        assert_eq!(kind, GameKind::ClaudesGame);
    }

    #[test]
    fn test_vote_kinds() {
        let voting: Vec<_> = GameKind::ALL.iter().filter(|k| k.needs_vote()).collect();
        assert_eq!(
            voting,
            vec![
                &GameKind::ClaudesGame,
                &GameKind::FirstToFind,
                &GameKind::BlankestBlank,
                &GameKind::YouLaughYouLose,
            ]
        );
    }

    #[test]
    fn test_choose_respects_min_players() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let kind = GameKind::choose(1, &GameKind::ALL, &mut rng);
            assert!(kind.min_players() <= 1, "{kind} needs more than one player");
        }
    }

    #[test]
    fn test_choose_eventually_offers_acting_kinds_to_groups() {
        let mut rng = StdRng::seed_from_u64(11);
        let picked: Vec<_> = (0..300)
            .map(|_| GameKind::choose(4, &GameKind::ALL, &mut rng))
            .collect();
        assert!(picked.contains(&GameKind::Charades));
        assert!(picked.contains(&GameKind::Imitations));
    }

    #[test]
    fn test_choose_empty_roster_falls_back_to_madlibs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(GameKind::choose(0, &GameKind::ALL, &mut rng), GameKind::MadLibs);
        // Nothing allowed is playable and nothing is minimum-free.
        assert_eq!(
            GameKind::choose(1, &[GameKind::Charades], &mut rng),
            GameKind::MadLibs
        );
    }

    #[test]
    fn test_choose_honours_allowed_list() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(
                GameKind::choose(3, &[GameKind::FirstToFind], &mut rng),
                GameKind::FirstToFind
            );
        }
    }

    #[test]
    fn test_create_matches_kind() {
        let mut rng = StdRng::seed_from_u64(5);
        let settings = GameSettings::default();
        for kind in GameKind::ALL {
            let game = kind.create(&settings, &mut rng);
            assert_eq!(game.kind(), kind);
            assert!(!game.is_complete(), "{kind} starts complete");
        }
    }

    #[test]
    fn test_timed_kinds_use_configured_countdown() {
        let mut rng = StdRng::seed_from_u64(5);
        let settings = GameSettings { countdown_secs: 5 };
        let game = GameKind::BlankestBlank.create(&settings, &mut rng);
        assert!(game.has_timer());
        assert_eq!(game.time_remaining(), 5);
    }
}
