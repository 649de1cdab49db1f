//! Turn input parsing and command output.
//!
//! Each turn arrives as:
//!
//! ```text
//! <record count>
//! <id> <type> <d0> <d1> <d2> <d3> <price> <tome index> <tax count> <castable> <repeatable>
//! ... one line per record ...
//! <inv0> <inv1> <inv2> <inv3> <rupees>     (us)
//! <inv0> <inv1> <inv2> <inv3> <rupees>     (opponent)
//! ```
//!
//! and is answered by exactly one command line.

use std::io::{BufRead, Write};
use std::str::FromStr;

use cauldron_types::{
    Action, ActionId, AgentState, Ingredients, Order, RecordKind, Spell, TomeSpell, TurnSnapshot,
};

use crate::error::ProtocolError;

const RECORD_FIELDS: usize = 11;
const AGENT_FIELDS: usize = 5;

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Reads one [`TurnSnapshot`] at a time from a line-oriented source.
#[derive(Debug)]
pub struct TurnReader<R> {
    input: R,
    line: String,
}

impl<R: BufRead> TurnReader<R> {
    /// Wrap an input source.
    pub const fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }

    /// Read the next turn.
    ///
    /// Returns `Ok(None)` when the input ends cleanly before a turn starts.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the input ends mid-turn or any line is
    /// malformed.
    pub fn next_turn(&mut self) -> Result<Option<TurnSnapshot>, ProtocolError> {
        let Some(header) = self.read_line()? else {
            return Ok(None);
        };
        let count: usize = parse_field("record count", header.trim())?;

        let mut snapshot = TurnSnapshot::default();
        for _ in 0..count {
            let line = self.expect_line("action record")?;
            parse_record(&line, &mut snapshot)?;
        }

        let me = self.expect_line("own inventory")?;
        snapshot.me = parse_agent(&me, std::mem::take(&mut snapshot.me))?;
        let opponent = self.expect_line("opponent inventory")?;
        snapshot.opponent = parse_agent(&opponent, std::mem::take(&mut snapshot.opponent))?;

        Ok(Some(snapshot))
    }

    fn read_line(&mut self) -> Result<Option<String>, ProtocolError> {
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim_end().to_owned()))
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        self.read_line()?
            .ok_or(ProtocolError::UnexpectedEof { expected })
    }
}

// ---------------------------------------------------------------------------
// Line parsers
// ---------------------------------------------------------------------------

fn parse_field<T>(field: &'static str, value: &str) -> Result<T, ProtocolError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    value.parse().map_err(|source| ProtocolError::InvalidNumber {
        field,
        value: value.to_owned(),
        source,
    })
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, ProtocolError> {
    parse_field::<i32>(field, value).map(|flag| flag != 0)
}

fn non_negative(field: &'static str, value: i32) -> Result<u32, ProtocolError> {
    u32::try_from(value).map_err(|_| ProtocolError::Negative { field, value })
}

fn parse_delta(tiers: [&str; 4]) -> Result<Ingredients, ProtocolError> {
    let [d0, d1, d2, d3] = tiers;
    Ok(Ingredients::new([
        parse_field("delta", d0)?,
        parse_field("delta", d1)?,
        parse_field("delta", d2)?,
        parse_field("delta", d3)?,
    ]))
}

/// Parse one action record into the snapshot.
fn parse_record(line: &str, snapshot: &mut TurnSnapshot) -> Result<(), ProtocolError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[id, kind, d0, d1, d2, d3, price, tome_index, tax_count, castable, repeatable] =
        fields.as_slice()
    else {
        return Err(ProtocolError::FieldCount {
            what: "action record",
            expected: RECORD_FIELDS,
            found: fields.len(),
            line: line.to_owned(),
        });
    };

    let id = ActionId(parse_field("id", id)?);
    let kind = RecordKind::from_token(kind).ok_or_else(|| ProtocolError::UnknownRecord(kind.to_owned()))?;
    // Every column is validated, including the ones this record kind ignores.
    let delta = parse_delta([d0, d1, d2, d3])?;
    let price: i32 = parse_field("price", price)?;
    let tome_index: i32 = parse_field("tome index", tome_index)?;
    let tax_count: i32 = parse_field("tax count", tax_count)?;
    let castable = parse_flag("castable", castable)?;
    let repeatable = parse_flag("repeatable", repeatable)?;

    match kind {
        RecordKind::Brew => {
            // Orders arrive as negative deltas; the requirement is their magnitude.
            // The tome index and tax count columns carry the urgency bonus and its count.
            let requirement = delta.negative_part().add(&delta.positive_part());
            let order = Order::new(id, requirement, price)?.with_urgency(tome_index, tax_count);
            snapshot.orders.push(order);
        }
        RecordKind::Cast | RecordKind::OpponentCast => {
            let spell = Spell::new(id, delta, castable, repeatable);
            let owner = if kind == RecordKind::Cast {
                &mut snapshot.me
            } else {
                &mut snapshot.opponent
            };
            owner.insert_spell(spell);
        }
        RecordKind::Learn => snapshot.tome.push(TomeSpell {
            id,
            tome_index: non_negative("tome index", tome_index)?,
            delta,
            tax_count: non_negative("tax count", tax_count)?,
            repeatable,
        }),
    }
    Ok(())
}

/// Parse an inventory line into `agent`, keeping its spell book.
fn parse_agent(line: &str, mut agent: AgentState) -> Result<AgentState, ProtocolError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[i0, i1, i2, i3, rupees] = fields.as_slice() else {
        return Err(ProtocolError::FieldCount {
            what: "inventory",
            expected: AGENT_FIELDS,
            found: fields.len(),
            line: line.to_owned(),
        });
    };
    agent.inventory = Ingredients::new([
        parse_field("inventory", i0)?,
        parse_field("inventory", i1)?,
        parse_field("inventory", i2)?,
        parse_field("inventory", i3)?,
    ]);
    agent.rupees = parse_field("rupees", rupees)?;
    Ok(agent)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Write one command line, with an optional trailing message, and flush.
///
/// # Errors
///
/// Returns the underlying I/O error if writing or flushing fails.
pub fn write_command<W: Write>(
    out: &mut W,
    action: Action,
    message: Option<&str>,
) -> std::io::Result<()> {
    match message {
        Some(message) => writeln!(out, "{action} {message}")?,
        None => writeln!(out, "{action}")?,
    }
    out.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TURN: &str = "\
6
44 BREW 0 -2 0 -2 12 3 4 0 0
78 CAST 2 0 0 0 0 -1 -1 1 0
79 CAST -1 1 0 0 0 -1 -1 0 0
82 OPPONENT_CAST 2 0 0 0 0 -1 -1 1 0
8 LEARN 3 -2 1 0 0 0 1 0 1
12 LEARN 2 1 0 0 0 1 0 0 0
3 0 0 0 10
2 1 0 0 7
";

    fn read(input: &str) -> Result<Option<TurnSnapshot>, ProtocolError> {
        TurnReader::new(input.as_bytes()).next_turn()
    }

    #[test]
    fn parses_a_full_turn() {
        let snapshot = read(TURN).unwrap().unwrap();

        assert_eq!(snapshot.orders.len(), 1);
        let order = snapshot.orders.first().unwrap();
        assert_eq!(order.id, ActionId(44));
        assert_eq!(*order.requirement(), Ingredients::new([0, 2, 0, 2]));
        assert_eq!(order.price, 12);
        assert_eq!(order.urgency_bonus, 3);
        assert_eq!(order.bonus_remaining, 4);

        assert_eq!(snapshot.me.spells.len(), 2);
        assert!(snapshot.me.spells.get(&ActionId(78)).is_some_and(|s| s.castable));
        assert!(snapshot.me.spells.get(&ActionId(79)).is_some_and(|s| !s.castable));
        assert!(snapshot.opponent.spells.contains_key(&ActionId(82)));

        let tome = snapshot.tome.first().unwrap();
        assert_eq!(tome.id, ActionId(8));
        assert_eq!(tome.tome_index, 0);
        assert_eq!(tome.tax_count, 1);
        assert!(tome.repeatable);
        assert_eq!(snapshot.tome.len(), 2);

        assert_eq!(snapshot.me.inventory, Ingredients::new([3, 0, 0, 0]));
        assert_eq!(snapshot.me.rupees, 10);
        assert_eq!(snapshot.opponent.inventory, Ingredients::new([2, 1, 0, 0]));
        assert_eq!(snapshot.opponent.rupees, 7);
    }

    #[test]
    fn consecutive_turns_are_independent() {
        let input = format!("{TURN}{TURN}");
        let mut reader = TurnReader::new(input.as_bytes());
        let first = reader.next_turn().unwrap().unwrap();
        let second = reader.next_turn().unwrap().unwrap();
        assert_eq!(first, second);
        assert!(reader.next_turn().unwrap().is_none());
    }

    #[test]
    fn clean_end_of_input_is_not_an_error() {
        assert!(read("").unwrap().is_none());
    }

    #[test]
    fn truncated_turn_is_fatal() {
        let err = read("1\n78 CAST 2 0 0 0 0 -1 -1 1 0\n3 0 0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedEof {
                expected: "opponent inventory"
            }
        ));
    }

    #[test]
    fn unknown_record_type_is_fatal() {
        let err = read("1\n78 SELL 2 0 0 0 0 -1 -1 1 0\n0 0 0 0 0\n0 0 0 0 0\n").unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownRecord(token) if token == "SELL"));
    }

    #[test]
    fn wrong_field_count_is_fatal() {
        let err = read("1\n78 CAST 2 0 0 0\n0 0 0 0 0\n0 0 0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::FieldCount {
                expected: RECORD_FIELDS,
                found: 6,
                ..
            }
        ));
    }

    #[test]
    fn bad_number_is_fatal() {
        let err = read("x\n").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidNumber {
                field: "record count",
                ..
            }
        ));
    }

    #[test]
    fn unused_columns_must_still_be_numbers() {
        let err = read("1\n78 CAST 2 0 0 0 abc -1 -1 1 0\n0 0 0 0 0\n0 0 0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidNumber { field: "price", ref value, .. } if value == "abc"
        ));

        let err = read("1\n8 LEARN 3 -2 1 0 0 0 1 x 1\n0 0 0 0 0\n0 0 0 0 0\n").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidNumber { field: "castable", .. }));
    }

    #[test]
    fn negative_tome_index_is_fatal() {
        let err = read("1\n8 LEARN 3 -2 1 0 0 -1 1 0 1\n0 0 0 0 0\n0 0 0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Negative {
                field: "tome index",
                value: -1
            }
        ));
    }

    #[test]
    fn commands_are_written_one_per_line() {
        let mut out = Vec::new();
        write_command(&mut out, Action::Brew(ActionId(44)), Some("Bubble bubble")).unwrap();
        write_command(&mut out, Action::cast(ActionId(78)), None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "BREW 44 Bubble bubble\nCAST 78\n");
    }
}
