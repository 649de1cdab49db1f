//! The per-turn read, decide, emit loop.

use std::io::{BufRead, Write};

use cauldron_engine::DecisionSource;
use tracing::{Level, debug, enabled, info, trace, warn};

use crate::error::RunnerError;
use crate::flavor::Flavor;
use crate::protocol::{TurnReader, write_command};

/// Play turns until the input ends. Returns the number of turns played.
///
/// Each turn is parsed, handed to `source`, and answered with exactly one
/// flushed command line on `out`.
///
/// # Errors
///
/// Returns [`RunnerError`] on malformed input, an engine failure, or a
/// failed write. All of them end the game.
pub fn play<S, R, W>(
    source: &mut S,
    reader: &mut TurnReader<R>,
    out: &mut W,
    mut flavor: Option<&mut Flavor>,
) -> Result<u64, RunnerError>
where
    S: DecisionSource,
    R: BufRead,
    W: Write,
{
    let mut turn: u64 = 0;
    loop {
        let next = turn.saturating_add(1);
        let snapshot = match reader.next_turn() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                info!(turns = turn, "input closed, shutting down");
                return Ok(turn);
            }
            Err(source) => return Err(RunnerError::Protocol { turn: next, source }),
        };
        turn = next;

        if enabled!(Level::TRACE) {
            match serde_json::to_string(&snapshot) {
                Ok(json) => trace!(turn, snapshot = %json, "turn input"),
                Err(e) => warn!(turn, error = %e, "failed to serialize snapshot"),
            }
        }
        debug!(
            turn,
            inventory = %snapshot.me.inventory,
            rupees = snapshot.me.rupees,
            orders = snapshot.orders.len(),
            spells = snapshot.me.spells.len(),
            tome = snapshot.tome.len(),
            "turn parsed"
        );

        let decision = source
            .decide(&snapshot)
            .map_err(|source| RunnerError::Engine { turn, source })?;
        info!(
            turn,
            action = %decision.action,
            reason = decision.reason.as_str(),
            target = ?decision.target.map(cauldron_types::ActionId::into_inner),
            "turn decided"
        );

        let message = flavor.as_deref_mut().and_then(|f| f.phrase(decision.action));
        write_command(out, decision.action, message)?;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;

    use cauldron_engine::{Brewer, Decision, DecisionReason, EngineConfig, EngineError, SearchConfig};
    use cauldron_types::{Action, ActionId, TurnSnapshot};

    use super::*;
    use crate::error::ProtocolError;

    /// Replays a fixed list of actions, one per turn.
    struct Scripted {
        actions: VecDeque<Action>,
        seen: Vec<usize>,
    }

    impl Scripted {
        fn new(actions: &[Action]) -> Self {
            Self {
                actions: actions.iter().copied().collect(),
                seen: Vec::new(),
            }
        }
    }

    impl DecisionSource for Scripted {
        fn decide(&mut self, snapshot: &TurnSnapshot) -> Result<Decision, EngineError> {
            self.seen.push(snapshot.orders.len());
            let action = self.actions.pop_front().unwrap_or(Action::Wait);
            Ok(Decision {
                action,
                reason: DecisionReason::PathStep,
                target: None,
            })
        }
    }

    const TURN: &str = "\
2
44 BREW -2 -2 0 0 9 0 0 0 0
78 CAST 2 0 0 0 0 -1 -1 1 0
0 0 0 0 0
0 0 0 0 0
";

    fn run(source: &mut impl DecisionSource, input: &str) -> (Result<u64, RunnerError>, String) {
        let mut reader = TurnReader::new(input.as_bytes());
        let mut out = Vec::new();
        let result = play(source, &mut reader, &mut out, None);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn one_command_per_turn() {
        let mut source = Scripted::new(&[Action::cast(ActionId(78)), Action::Rest]);
        let (result, out) = run(&mut source, &format!("{TURN}{TURN}"));
        assert_eq!(result.unwrap(), 2);
        assert_eq!(out, "CAST 78\nREST\n");
        assert_eq!(source.seen, vec![1, 1]);
    }

    #[test]
    fn empty_input_plays_nothing() {
        let mut source = Scripted::new(&[]);
        let (result, out) = run(&mut source, "");
        assert_eq!(result.unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn malformed_turn_stops_the_game() {
        let mut source = Scripted::new(&[Action::Rest]);
        let (result, out) = run(&mut source, &format!("{TURN}1\n78 NOPE 0 0 0 0 0 0 0 0 0\n"));
        assert!(matches!(
            result,
            Err(RunnerError::Protocol {
                turn: 2,
                source: ProtocolError::UnknownRecord(_)
            })
        ));
        assert_eq!(out, "REST\n");
    }

    #[test]
    fn engine_plays_a_turn() {
        let mut brewer = Brewer::new(EngineConfig {
            search: SearchConfig {
                deadline_ms: 0,
                ..SearchConfig::default()
            },
            ..EngineConfig::default()
        });
        let (result, out) = run(&mut brewer, TURN);
        assert_eq!(result.unwrap(), 1);
        assert_eq!(out, "CAST 78\n");
    }

    #[test]
    fn flavor_follows_the_command() {
        let mut source = Scripted::new(&[Action::Rest]);
        let mut reader = TurnReader::new(TURN.as_bytes());
        let mut out = Vec::new();
        let mut flavor = Flavor::new(Some(3));
        play(&mut source, &mut reader, &mut out, Some(&mut flavor)).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("REST "));
        assert!(line.ends_with('\n'));
    }
}
