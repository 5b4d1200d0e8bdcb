//! "Would You Rather" prompts and their made-up vote splits.

use rand::Rng;

/// Two mutually exclusive options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoicePair {
    pub first: &'static str,
    pub second: &'static str,
}

impl ChoicePair {
    const fn new(first: &'static str, second: &'static str) -> Self {
        Self { first, second }
    }

    #[must_use]
    pub const fn option(&self, choice: Choice) -> &'static str {
        match choice {
            Choice::First => self.first,
            Choice::Second => self.second,
        }
    }
}

pub const CATALOG: [ChoicePair; 18] = [
    ChoicePair::new("Fight 100 duck-sized horses", "Fight 1 horse-sized duck"),
    ChoicePair::new("Always be 10 minutes late", "Always be 20 minutes early"),
    ChoicePair::new("Have no internet for a month", "Have no snacks for a year"),
    ChoicePair::new("Only eat pizza forever", "Never eat pizza again"),
    ChoicePair::new("Always have to sing instead of talk 🎤", "Dance instead of walk? 💃"),
    ChoicePair::new("Have spaghetti for hair 🍝", "Marshmallows for fingers? 🍡"),
    ChoicePair::new("Always sneeze glitter ✨", "Always fart confetti? 🎊"),
    ChoicePair::new("Be able to speak to animals 🦜", "Read minds? 🧠"),
    ChoicePair::new("Have a rewind button ⏪", "A pause button ⏸ for your life?"),
    ChoicePair::new("Never use a phone again 📵", "Never watch TV/movies again? 📺"),
    ChoicePair::new("Live without music 🎵", "Live without books? 📖"),
    ChoicePair::new("Have no elbows 🚫💪", "No knees? 🚫🦵"),
    ChoicePair::new("Be rich but bored 💰😐", "Poor but always entertained? 😆"),
    ChoicePair::new(
        "Have unlimited ice cream 🍦 but no cake 🎂",
        "Unlimited cake but no ice cream?",
    ),
    ChoicePair::new("Drink only water forever 💧", "Only soda forever? 🥤"),
    ChoicePair::new(
        "Fly but only 2 feet off the ground ✈️",
        "Be invisible but only for 10 seconds?",
    ),
    ChoicePair::new("Be super strong 💪 but slow 🐢", "Super fast ⚡ but weak?"),
    ChoicePair::new(
        "Teleport anywhere 🌍 but only once per week",
        "Run at 100mph but never stop running?",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    First,
    Second,
}

impl Choice {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }
}

/// Percentages shown for the first and second option; always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteSplit {
    pub first_pct: u8,
    pub second_pct: u8,
}

impl VoteSplit {
    /// Build the split for `choice` from a draw in `0..100`.
    ///
    /// The chosen option always gets `drawn`; the other gets the remainder.
    #[must_use]
    pub fn from_draw(drawn: u8, choice: Choice) -> Self {
        let drawn = drawn.min(99);
        let rest = 100 - drawn;
        match choice {
            Choice::First => Self {
                first_pct: drawn,
                second_pct: rest,
            },
            Choice::Second => Self {
                first_pct: rest,
                second_pct: drawn,
            },
        }
    }

    #[must_use]
    pub const fn pct_for(&self, choice: Choice) -> u8 {
        match choice {
            Choice::First => self.first_pct,
            Choice::Second => self.second_pct,
        }
    }

    #[must_use]
    pub fn total(&self) -> u16 {
        u16::from(self.first_pct) + u16::from(self.second_pct)
    }
}

/// Current prompt and split of the choice widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceGame {
    question: Option<usize>,
    split: Option<VoteSplit>,
}

impl ChoiceGame {
    /// A game already showing its first question.
    #[must_use]
    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Self::default();
        game.generate_question(rng);
        game
    }

    /// Clear the split and draw a new prompt uniformly from the catalog.
    pub fn generate_question<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.split = None;
        self.question = Some(rng.gen_range(0..CATALOG.len()));
    }

    /// Record a pick and draw the split. Returns `None` when no question is up.
    pub fn handle_choice<R: Rng + ?Sized>(
        &mut self,
        choice: Choice,
        rng: &mut R,
    ) -> Option<VoteSplit> {
        self.question?;
        let drawn: u8 = rng.gen_range(0..100);
        let split = VoteSplit::from_draw(drawn, choice);
        self.split = Some(split);
        Some(split)
    }

    #[must_use]
    pub fn question(&self) -> Option<&'static ChoicePair> {
        self.question.and_then(|idx| CATALOG.get(idx))
    }

    #[must_use]
    pub const fn question_index(&self) -> Option<usize> {
        self.question
    }

    #[must_use]
    pub const fn split(&self) -> Option<VoteSplit> {
        self.split
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn catalog_has_eighteen_distinct_pairs() {
        assert_eq!(CATALOG.len(), 18);
        for (i, a) in CATALOG.iter().enumerate() {
            assert_ne!(a.first, a.second);
            for b in &CATALOG[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn split_keeps_drawn_value_on_chosen_side() {
        let first = VoteSplit::from_draw(37, Choice::First);
        assert_eq!((first.first_pct, first.second_pct), (37, 63));
        let second = VoteSplit::from_draw(37, Choice::Second);
        assert_eq!((second.first_pct, second.second_pct), (63, 37));
        assert_eq!(second.pct_for(Choice::Second), 37);
    }

    #[test]
    fn zero_draw_gives_other_option_everything() {
        let split = VoteSplit::from_draw(0, Choice::Second);
        assert_eq!((split.first_pct, split.second_pct), (100, 0));
        assert_eq!(split.total(), 100);
    }

    #[test]
    fn choice_without_question_is_ignored() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut game = ChoiceGame::default();
        assert_eq!(game.handle_choice(Choice::First, &mut rng), None);
        assert_eq!(game.split(), None);
    }

    #[test]
    fn choice_index_round_trip() {
        assert_eq!(Choice::from_index(Choice::Second.index()), Some(Choice::Second));
        assert_eq!(Choice::from_index(2), None);
    }
}
