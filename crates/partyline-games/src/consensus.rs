//! Connect two random words; the room votes for the best connection.

use partyline_protocol::PlayerId;
use rand::rngs::StdRng;

use crate::logic::{MiniGame, SubmitOutcome, TIMER_COMPLETE, VIDEO_COMPLETE};
use crate::GameKind;

#[derive(Debug, Clone)]
pub struct Consensus {
    first: String,
    second: String,
    /// One answer per player, in arrival order.
    submissions: Vec<(PlayerId, String)>,
    expected: usize,
}

impl Consensus {
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
            submissions: Vec::new(),
            expected: 1,
        }
    }

    /// Answers still missing before the round completes.
    pub fn outstanding(&self) -> usize {
        self.expected.saturating_sub(self.submissions.len())
    }

    fn has_submitted(&self, player: &PlayerId) -> bool {
        self.submissions.iter().any(|(id, _)| id == player)
    }
}

impl MiniGame for Consensus {
    fn kind(&self) -> GameKind {
        GameKind::ClaudesGame
    }

    fn instructions(&self) -> String {
        "Connect two words creatively!".to_string()
    }

    fn needs_input(&self) -> bool {
        true
    }

    fn prompt(&self) -> String {
        format!("How are {} and {} connected?", self.first, self.second)
    }

    fn setup(&mut self, roster: &[PlayerId], _rng: &mut StdRng) {
        self.expected = roster.len();
    }

    fn submit_answer(&mut self, player: &PlayerId, answer: &str) -> SubmitOutcome {
        let answer = answer.trim();
        if answer.is_empty()
            || answer == TIMER_COMPLETE
            || answer == VIDEO_COMPLETE
            || self.has_submitted(player)
        {
            return SubmitOutcome::rejected(self.is_complete());
        }

        self.submissions.push((player.clone(), answer.to_string()));
        SubmitOutcome::accepted(self.is_complete())
    }

    fn is_complete(&self) -> bool {
        self.expected > 0 && self.submissions.len() >= self.expected
    }

    fn result(&self) -> String {
        let mut result = format!(
            "Pick the best connection between {} and {}:\n",
            self.first, self.second
        );
        for (_, answer) in &self.submissions {
            result.push_str("- ");
            result.push_str(answer);
            result.push('\n');
        }
        result
    }

    /// A player who leaves before answering is no longer waited for.
    fn player_left(&mut self, player: &PlayerId) -> bool {
        if self.has_submitted(player) || self.expected <= 1 {
            return false;
        }
        self.expected -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::ScoringPolicy;

    fn p(id: &str) -> PlayerId {
        PlayerId::from(id)
    }

    fn started(players: &[&str]) -> Consensus {
        let roster: Vec<PlayerId> = players.iter().map(|id| p(id)).collect();
        let mut game = Consensus::new("piano", "penguin");
        game.setup(&roster, &mut StdRng::seed_from_u64(0));
        game
    }

    #[test]
    fn test_completes_when_everyone_answered() {
        let mut game = started(&["alice", "bob"]);
        assert_eq!(
            game.submit_answer(&p("alice"), "both wear tuxedos"),
            SubmitOutcome::accepted(false)
        );
        assert_eq!(
            game.submit_answer(&p("bob"), "black and white"),
            SubmitOutcome::accepted(true)
        );
    }

    #[test]
    fn test_only_first_answer_per_player_counts() {
        let mut game = started(&["alice", "bob"]);
        game.submit_answer(&p("alice"), "keys");
        let again = game.submit_answer(&p("alice"), "something else");

        assert!(!again.accepted);
        assert!(!game.is_complete());
        assert_eq!(game.outstanding(), 1);
        assert!(!game.result().contains("something else"));
    }

    #[test]
    fn test_result_lists_answers() {
        let mut game = started(&["alice", "bob"]);
        game.submit_answer(&p("alice"), "keys");
        game.submit_answer(&p("bob"), "tuxedo");
        assert_eq!(
            game.result(),
            "Pick the best connection between piano and penguin:\n- keys\n- tuxedo\n"
        );
    }

    #[test]
    fn test_departure_before_answering_lowers_target() {
        let mut game = started(&["alice", "bob", "carol"]);
        game.submit_answer(&p("alice"), "keys");
        game.submit_answer(&p("bob"), "tuxedo");

        assert!(!game.player_left(&p("alice")));
        assert!(game.player_left(&p("carol")));
        assert!(game.is_complete());
    }

    #[test]
    fn test_scores_only_at_vote() {
        let game = started(&["alice"]);
        assert_eq!(game.scoring_policy(), ScoringPolicy::VoteOnly);
        assert!(game.kind().needs_vote());
        assert_eq!(game.prompt(), "How are piano and penguin connected?");
    }
}
