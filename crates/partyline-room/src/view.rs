//! Snapshot composition.
//!
//! A broadcast is built in two steps: [`compose`] renders the room once
//! into a shared [`StateView`], then [`render_for`] derives what one
//! recipient sees. Both are pure so the texts are testable without a
//! running room.

use std::collections::BTreeMap;

use partyline_games::{GameKind, MiniGame};
use partyline_protocol::{Phase, PlayerEntry, PlayerId, StateView};

/// Everything the shared view is rendered from.
pub(crate) struct RoundView<'a> {
    pub phase: Phase,
    pub kind: Option<GameKind>,
    /// The round waiting for everyone to ready up.
    pub upcoming: Option<&'a dyn MiniGame>,
    /// The round being played, voted on, or shown as finished.
    pub game: Option<&'a dyn MiniGame>,
    pub players: Vec<PlayerEntry>,
    pub votes: &'a BTreeMap<PlayerId, PlayerId>,
    pub winners: &'a [String],
}

/// Renders the view every player shares.
pub(crate) fn compose(round: RoundView<'_>) -> StateView {
    let count = round.players.len();
    let (title, instructions, round_text) = match round.phase {
        Phase::Lobby => lobby_texts(count),
        Phase::Instructions => {
            let (title, instructions) = match round.upcoming {
                Some(game) => (game.headline(), game.instructions()),
                None => ("Get Ready!".to_string(), "Prepare for the next game".to_string()),
            };
            let round_text = if count == 1 {
                "Click 'Next' when ready to play"
            } else {
                "Everyone click 'Next' when ready"
            };
            (title, instructions, round_text.to_string())
        }
        Phase::Playing => match round.game {
            Some(game) => {
                let instructions = if game.needs_input() {
                    "Enter your answer:"
                } else {
                    ""
                };
                (game.prompt(), instructions.to_string(), String::new())
            }
            None => ("Playing...".to_string(), "Loading...".to_string(), String::new()),
        },
        Phase::Voting => (
            "Time to Vote!".to_string(),
            round.game.map(|g| g.result()).unwrap_or_default(),
            "Vote for the winner!".to_string(),
        ),
        Phase::Finished => match round.game {
            Some(game) => (
                "Game Complete!".to_string(),
                format!("{} finished!", game.name()),
                winner_line(round.winners, &game.result()),
            ),
            None => (
                "Game Complete!".to_string(),
                "Click Next for another game".to_string(),
                String::new(),
            ),
        },
    };

    let mut view = StateView {
        game_title: title,
        game_instructions: instructions,
        round_instructions: round_text,
        players: round.players,
        game_state: round.phase,
        game_type: round.kind.map(|k| k.id().to_string()).unwrap_or_default(),
        needs_input: round.phase == Phase::Playing
            && round.game.is_some_and(|g| g.needs_input()),
        ..StateView::default()
    };

    if let Some(game) = round.game {
        if round.phase == Phase::Playing && game.has_timer() {
            view.has_timer = Some(true);
            view.time_remaining = Some(game.time_remaining());
        }
        if round.phase == Phase::Finished {
            view.story = Some(game.result());
        }
        game.decorate(round.phase, &mut view);
    }

    if round.phase == Phase::Voting {
        view.voted_players = Some(round.votes.keys().cloned().collect());
        view.total_votes = Some(round.votes.len());
        view.expected_votes = Some(count);
    }

    if round.phase == Phase::Finished && !round.winners.is_empty() {
        view.winners = Some(round.winners.to_vec());
    }

    view
}

/// Derives `player`'s copy of the shared view. Only a round in play
/// shows different things to different players.
pub(crate) fn render_for(
    shared: &StateView,
    game: Option<&dyn MiniGame>,
    player: &PlayerId,
) -> StateView {
    if shared.game_state != Phase::Playing {
        return shared.clone();
    }
    match game.and_then(|g| g.personalize(player)) {
        Some(overrides) => overrides.apply(shared),
        None => shared.clone(),
    }
}

fn lobby_texts(count: usize) -> (String, String, String) {
    let (title, instructions, round_text) = match count {
        0 => (
            "Waiting for players to join",
            "Wait for players to join",
            "Share this URL with friends to play together!",
        ),
        1 => (
            "Ready to play!",
            "Click 'Next' to start a game",
            "Most games work solo! Or share the URL to play with friends.",
        ),
        _ => (
            "Waiting for more players",
            "Wait for more players or click 'Next' to start",
            "Ready to play?",
        ),
    };
    (title.to_string(), instructions.to_string(), round_text.to_string())
}

fn winner_line(winners: &[String], result: &str) -> String {
    match winners {
        [] => result.to_string(),
        [winner] => format!("{winner} wins! {result}"),
        tied => format!("Tie! {} win! {result}", tied.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use partyline_games::{Acting, Countdown, MadLib};

    use super::*;

    fn entry(id: &str) -> PlayerEntry {
        PlayerEntry {
            id: PlayerId::from(id),
            name: id.to_uppercase(),
            score: 0,
            ready: false,
        }
    }

    fn round<'a>(
        phase: Phase,
        game: Option<&'a dyn MiniGame>,
        players: &[&str],
        votes: &'a BTreeMap<PlayerId, PlayerId>,
        winners: &'a [String],
    ) -> RoundView<'a> {
        RoundView {
            phase,
            kind: game.map(|g| g.kind()),
            upcoming: None,
            game,
            players: players.iter().map(|id| entry(id)).collect(),
            votes,
            winners,
        }
    }

    #[test]
    fn test_lobby_texts_by_roster_size() {
        let votes = BTreeMap::new();
        let empty = compose(round(Phase::Lobby, None, &[], &votes, &[]));
        assert_eq!(empty.game_title, "Waiting for players to join");
        assert_eq!(empty.game_type, "");

        let solo = compose(round(Phase::Lobby, None, &["a"], &votes, &[]));
        assert_eq!(solo.game_title, "Ready to play!");
        assert_eq!(solo.game_instructions, "Click 'Next' to start a game");

        let group = compose(round(Phase::Lobby, None, &["a", "b"], &votes, &[]));
        assert_eq!(group.game_title, "Waiting for more players");
        assert_eq!(group.round_instructions, "Ready to play?");
    }

    #[test]
    fn test_instructions_show_upcoming_headline() {
        let votes = BTreeMap::new();
        let upcoming = Countdown::blankest_blank("shiniest", "coin", 30);
        let view = compose(RoundView {
            upcoming: Some(&upcoming),
            kind: Some(GameKind::BlankestBlank),
            ..round(Phase::Instructions, None, &["a", "b"], &votes, &[])
        });

        assert_eq!(view.game_title, "Find the shiniest coin!");
        assert_eq!(view.round_instructions, "Everyone click 'Next' when ready");
        assert_eq!(view.game_type, "blankestblank");
        assert!(!view.needs_input);
    }

    #[test]
    fn test_playing_view_carries_timer() {
        let votes = BTreeMap::new();
        let game = Countdown::first_to_find("pen", 12);
        let view = compose(round(Phase::Playing, Some(&game), &["a"], &votes, &[]));

        assert_eq!(view.game_title, "First to show a pen wins!");
        assert_eq!(view.has_timer, Some(true));
        assert_eq!(view.time_remaining, Some(12));
        assert_eq!(view.game_instructions, "");
    }

    #[test]
    fn test_voting_view_reports_progress() {
        let mut votes = BTreeMap::new();
        votes.insert(PlayerId::from("a"), PlayerId::from("b"));
        let game = Countdown::first_to_find("pen", 0);
        let view = compose(round(Phase::Voting, Some(&game), &["a", "b"], &votes, &[]));

        assert_eq!(view.game_title, "Time to Vote!");
        assert_eq!(view.round_instructions, "Vote for the winner!");
        assert_eq!(view.voted_players, Some(vec![PlayerId::from("a")]));
        assert_eq!(view.total_votes, Some(1));
        assert_eq!(view.expected_votes, Some(2));
        assert_eq!(view.has_timer, None);
    }

    #[test]
    fn test_finished_view_names_winners() {
        let votes = BTreeMap::new();
        let game = MadLib::new("{a}");

        let single = ["Ann".to_string()];
        let view = compose(round(Phase::Finished, Some(&game), &["a"], &votes, &single));
        assert_eq!(view.game_instructions, "Mad Libs finished!");
        assert_eq!(view.round_instructions, "Ann wins! {a}");
        assert_eq!(view.story.as_deref(), Some("{a}"));

        let tie = ["Ann".to_string(), "Bo".to_string()];
        let view = compose(round(Phase::Finished, Some(&game), &["a"], &votes, &tie));
        assert_eq!(view.round_instructions, "Tie! Ann, Bo win! {a}");
        assert_eq!(view.winners, Some(tie.to_vec()));

        let view = compose(round(Phase::Finished, Some(&game), &["a"], &votes, &[]));
        assert_eq!(view.round_instructions, "{a}");
        assert_eq!(view.winners, None);
    }

    #[test]
    fn test_render_for_personalizes_only_while_playing() {
        let votes = BTreeMap::new();
        let mut game = Acting::new(GameKind::Charades, "sailing");
        game.set_actor(PlayerId::from("a"));

        let shared = compose(round(Phase::Playing, Some(&game), &["a", "b"], &votes, &[]));
        let actor = render_for(&shared, Some(&game), &PlayerId::from("a"));
        let guesser = render_for(&shared, Some(&game), &PlayerId::from("b"));
        assert_eq!(actor.game_title, "Act out: sailing!");
        assert!(!actor.needs_input);
        assert_eq!(guesser.game_title, "Guess what's being acted out!");
        assert!(guesser.needs_input);

        let finished = compose(round(Phase::Finished, Some(&game), &["a", "b"], &votes, &[]));
        let actor = render_for(&finished, Some(&game), &PlayerId::from("a"));
        assert_eq!(actor, finished);
    }
}
