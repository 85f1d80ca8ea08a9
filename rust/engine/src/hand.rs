use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{all_standard_cards, rank_label, Card, DeckCard};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Result of ranking a hand.
///
/// Ordering and equality look at `category` and `tiebreak` only; two hands
/// built from different cards that rank identically compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    /// Descending rank values that break ties inside the category:
    /// quads `[quad, kicker]`, full house `[trips, pair]`, flush and high card
    /// all five ranks, straights `[high]`, trips `[trips, k, k]`,
    /// two pair `[high, low, kicker]`, pair `[pair, k, k, k]`.
    pub tiebreak: Vec<u8>,
    /// The five concrete cards that make the hand. Joker substitutes show up
    /// here as the card they stood in for.
    pub best_five: [Card; 5],
}

impl HandStrength {
    pub fn label(&self) -> String {
        let tb = &self.tiebreak;
        let first = tb.first().copied().unwrap_or(0);
        let joined = || {
            tb.iter()
                .map(|&v| rank_label(v))
                .collect::<Vec<_>>()
                .join("-")
        };
        match self.category {
            Category::StraightFlush if first == 14 => "Royal Flush".to_string(),
            Category::StraightFlush | Category::Straight => {
                format!("{}, {} high", self.category.name(), rank_label(first))
            }
            Category::FourOfAKind | Category::ThreeOfAKind | Category::OnePair => {
                format!("{}, {}s", self.category.name(), rank_label(first))
            }
            Category::FullHouse => format!(
                "Full House, {}s over {}s",
                rank_label(first),
                rank_label(tb.get(1).copied().unwrap_or(0))
            ),
            Category::TwoPair => format!(
                "Two Pair, {}s and {}s",
                rank_label(first),
                rank_label(tb.get(1).copied().unwrap_or(0))
            ),
            Category::Flush | Category::HighCard => {
                format!("{}, {}", self.category.name(), joined())
            }
        }
    }
}

impl PartialEq for HandStrength {
    fn eq(&self, other: &Self) -> bool {
        compare_hands(self, other) == Ordering::Equal
    }
}

impl Eq for HandStrength {}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tiebreak.cmp(&b.tiebreak),
        ord => ord,
    }
}

/// Ranks exactly five concrete cards.
pub fn score_five(cards: &[Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15];
    let mut rank_mask: u16 = 0;
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
    }
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = straight_high_from_mask(rank_mask);

    let mut descending: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    descending.sort_unstable_by(|a, b| b.cmp(a));

    // (count, rank), larger groups first, then higher rank
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));
    let group_ranks = || groups.iter().map(|&(_, r)| r).collect::<Vec<u8>>();

    let (category, tiebreak) = match (is_flush, straight_high, groups[0].0, groups.get(1)) {
        (true, Some(high), _, _) => (Category::StraightFlush, vec![high]),
        (_, _, n, _) if n >= 4 => (Category::FourOfAKind, group_ranks()),
        (_, _, 3, Some(&(2, _))) => (Category::FullHouse, group_ranks()),
        (true, None, _, _) => (Category::Flush, descending),
        (false, Some(high), _, _) => (Category::Straight, vec![high]),
        (_, _, 3, _) => (Category::ThreeOfAKind, group_ranks()),
        (_, _, 2, Some(&(2, _))) => (Category::TwoPair, group_ranks()),
        (_, _, 2, _) => (Category::OnePair, group_ranks()),
        _ => (Category::HighCard, descending),
    };

    HandStrength {
        category,
        tiebreak,
        best_five: *cards,
    }
}

/// Best five-card hand out of seven concrete cards (all 21 combinations).
pub fn evaluate_seven(cards: &[Card; 7]) -> HandStrength {
    let mut best: Option<HandStrength> = None;
    // choosing 5 of 7 == leaving out a pair (skip_a, skip_b)
    for skip_a in 0..7 {
        for skip_b in (skip_a + 1)..7 {
            let mut five = [cards[0]; 5];
            let mut k = 0;
            for (i, &c) in cards.iter().enumerate() {
                if i != skip_a && i != skip_b {
                    five[k] = c;
                    k += 1;
                }
            }
            let scored = score_five(&five);
            if best.as_ref().map_or(true, |b| scored > *b) {
                best = Some(scored);
            }
        }
    }
    match best {
        Some(b) => b,
        None => unreachable!("seven cards always yield 21 combinations"),
    }
}

/// Ranks a seat's hand: two private cards plus the five board cards.
///
/// Each private Joker is tried as every concrete card not already among the
/// seven (both Jokers together over every pair of distinct substitutes) and
/// the strongest result wins, so a Joker only ever makes a hand the deck
/// could have dealt.
pub fn evaluate(private: &[DeckCard; 2], board: &[Card; 5]) -> HandStrength {
    let mut seven = [board[0]; 7];
    seven[2..].copy_from_slice(board);

    match (private[0].as_standard(), private[1].as_standard()) {
        (Some(a), Some(b)) => {
            seven[0] = a;
            seven[1] = b;
            evaluate_seven(&seven)
        }
        (Some(fixed), None) | (None, Some(fixed)) => {
            seven[0] = fixed;
            let subs = substitutes(&seven[..1], board);
            best_over(subs.into_iter().map(|sub| {
                seven[1] = sub;
                evaluate_seven(&seven)
            }))
        }
        (None, None) => {
            let subs = substitutes(&[], board);
            let mut results = Vec::with_capacity(subs.len() * (subs.len() - 1) / 2);
            // substitution order between the two Jokers does not matter
            for (i, &first) in subs.iter().enumerate() {
                for &second in &subs[i + 1..] {
                    seven[0] = first;
                    seven[1] = second;
                    results.push(evaluate_seven(&seven));
                }
            }
            best_over(results.into_iter())
        }
    }
}

/// Concrete cards a Joker may become: everything not already held or shown.
fn substitutes(fixed: &[Card], board: &[Card; 5]) -> Vec<Card> {
    all_standard_cards()
        .into_iter()
        .filter(|c| !fixed.contains(c) && !board.contains(c))
        .collect()
}

pub fn count_jokers(private: &[DeckCard; 2]) -> usize {
    private.iter().filter(|c| c.is_joker()).count()
}

fn best_over(results: impl Iterator<Item = HandStrength>) -> HandStrength {
    match results.max() {
        Some(best) => best,
        None => unreachable!("the substitute set is never empty"),
    }
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Treat Ace as 14 and optionally as 1
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u16).rev() {
        let window = (1u16 << (high - 4))
            | (1 << (high - 3))
            | (1 << (high - 2))
            | (1 << (high - 1))
            | (1 << high);
        if (m & window) == window {
            return Some(high as u8);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(text: &str) -> [Card; 5] {
        let v: Vec<Card> = parse_cards(text).unwrap();
        v.try_into().unwrap()
    }

    #[test]
    fn score_five_tiebreak_vectors() {
        let quads = score_five(&five("9s 9h 9d 9c 3h"));
        assert_eq!(quads.category, Category::FourOfAKind);
        assert_eq!(quads.tiebreak, vec![9, 3]);

        let trips = score_five(&five("4s 4h 4d Kc 2h"));
        assert_eq!(trips.tiebreak, vec![4, 13, 2]);

        let two_pair = score_five(&five("Js Jh 3d 3c Ah"));
        assert_eq!(two_pair.category, Category::TwoPair);
        assert_eq!(two_pair.tiebreak, vec![11, 3, 14]);

        let pair = score_five(&five("Qs Qh 8d 5c 2h"));
        assert_eq!(pair.tiebreak, vec![12, 8, 5, 2]);

        let high = score_five(&five("Ks 9h 7d 4c 2h"));
        assert_eq!(high.category, Category::HighCard);
        assert_eq!(high.tiebreak, vec![13, 9, 7, 4, 2]);
    }

    #[test]
    fn mask_detects_wheel_but_not_wraparound() {
        let wheel = (1 << 14) | (1 << 2) | (1 << 3) | (1 << 4) | (1 << 5);
        assert_eq!(straight_high_from_mask(wheel), Some(5));
        let wrap = (1 << 13) | (1 << 14) | (1 << 2) | (1 << 3) | (1 << 4);
        assert_eq!(straight_high_from_mask(wrap), None);
    }

    #[test]
    fn labels_read_naturally() {
        assert_eq!(score_five(&five("Ts Js Qs Ks As")).label(), "Royal Flush");
        assert_eq!(
            score_five(&five("7s 7h 7d 2c 2s")).label(),
            "Full House, 7s over 2s"
        );
        assert_eq!(
            score_five(&five("As 2h 3d 4c 5s")).label(),
            "Straight, 5 high"
        );
        assert_eq!(
            score_five(&five("Ks 9s 7s 4s 2s")).label(),
            "Flush, K-9-7-4-2"
        );
    }

    #[test]
    fn equality_ignores_which_cards_made_the_hand() {
        let a = score_five(&five("Ks 9h 7d 4c 2h"));
        let b = score_five(&five("Kd 9c 7s 4h 2d"));
        assert_eq!(a, b);
        assert_ne!(a.best_five, b.best_five);
    }
}
