//! Terminal Scorer (spec.md §4.5's terminal branch): player-1 outcome at
//! fold and showdown terminals, including split pots. Ported directly from
//! the terminal branch of `Player::Play` in `mc_node.cpp`; the sign
//! conventions below look asymmetric (a showdown win by seat 0 is scored as
//! `-contributions[1]`, not `+pot`) because that is what the original
//! computes and spec.md §4.5 restates verbatim — this is not re-derived
//! from first principles.

use crate::error::{
    Error,
    Result,
};

fn require_two_players(num_players: usize) -> Result<()> {
    if num_players != 2 {
        return Err(Error::Unsupported(format!(
            "showdown/fold scoring is only implemented for 2 players, got {}",
            num_players
        )));
    }
    Ok(())
}

/// `num_remaining == 1`: the single survivor takes the pot.
pub fn fold_outcome(num_players: usize, contributions: &[i32], folded: &[bool]) -> Result<f64> {
    require_two_players(num_players)?;
    if folded[1] {
        Ok(-(contributions[1] as f64))
    } else {
        Ok(contributions[0] as f64)
    }
}

/// Showdown among all non-folded seats, with a two-player contribution
/// invariant check and split-pot handling.
pub fn showdown_outcome(
    num_players: usize,
    contributions: &[i32],
    folded: &[bool],
    hvs: &[i32],
    last_bet_to: i32,
) -> Result<f64> {
    require_two_players(num_players)?;
    if contributions[0] != contributions[1] || contributions[0] != last_bet_to {
        return Err(Error::InvariantViolation(format!(
            "showdown contribution mismatch: contributions[0]={} contributions[1]={} last_bet_to={}",
            contributions[0], contributions[1], last_bet_to
        )));
    }

    let mut best_hv = 0;
    let mut pot = 0i64;
    for p in 0..num_players {
        pot += contributions[p] as i64;
        if !folded[p] && hvs[p] > best_hv {
            best_hv = hvs[p];
        }
    }

    let mut num_winners = 0i64;
    let mut winner_contrib = 0i64;
    let mut seat1_wins = false;
    for p in 0..num_players {
        if !folded[p] && hvs[p] == best_hv {
            num_winners += 1;
            winner_contrib += contributions[p] as i64;
            if p == 1 {
                seat1_wins = true;
            }
        }
    }

    if seat1_wins {
        Ok((pot - winner_contrib) as f64 / num_winners as f64)
    } else {
        Ok(-(contributions[1] as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_by_seat_one_costs_its_own_contribution() {
        let outcome = fold_outcome(2, &[100, 50], &[false, true]).unwrap();
        assert_eq!(outcome, -50.0);
    }

    #[test]
    fn fold_by_seat_zero_reports_seat_zeros_contribution() {
        let outcome = fold_outcome(2, &[50, 100], &[true, false]).unwrap();
        assert_eq!(outcome, 50.0);
    }

    #[test]
    fn tie_splits_evenly() {
        let outcome = showdown_outcome(2, &[100, 100], &[false, false], &[5, 5], 100).unwrap();
        assert_eq!(outcome, 0.0);
    }

    #[test]
    fn seat_one_winning_outright_returns_zero_minus_its_contribution() {
        let outcome = showdown_outcome(2, &[100, 100], &[false, false], &[3, 9], 100).unwrap();
        assert_eq!(outcome, -100.0);
    }

    #[test]
    fn seat_one_winning_splits_pot_minus_its_share_among_winners() {
        let outcome = showdown_outcome(2, &[100, 100], &[false, false], &[9, 9], 100).unwrap();
        assert_eq!(outcome, 0.0);
    }

    #[test]
    fn mismatched_contributions_is_an_invariant_violation() {
        let result = showdown_outcome(2, &[100, 90], &[false, false], &[1, 1], 100);
        assert!(matches!(result, Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn three_players_is_unsupported() {
        let result = fold_outcome(3, &[10, 10, 10], &[false, false, true]);
        assert!(matches!(result, Err(Error::Unsupported(_))));
    }
}
