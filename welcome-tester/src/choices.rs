use anyhow::{Result, bail};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use welcome_core::{CATALOG, Choice, ChoiceGame};

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceRunSummary {
    pub seed: u64,
    pub rounds: usize,
    /// How often each catalog prompt came up.
    pub prompt_hits: Vec<usize>,
    pub min_pct: u8,
    pub max_pct: u8,
}

impl ChoiceRunSummary {
    #[must_use]
    pub fn prompts_seen(&self) -> usize {
        self.prompt_hits.iter().filter(|hits| **hits > 0).count()
    }
}

/// Play `rounds` questions with a seeded RNG and check every split.
///
/// Odd rounds pick the second option so both branches are exercised.
///
/// # Errors
///
/// Fails on the first split that does not add up or does not give the
/// chosen option the drawn share.
pub fn run_choices(seed: u64, rounds: usize) -> Result<ChoiceRunSummary> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut game = ChoiceGame::start(&mut rng);
    let mut summary = ChoiceRunSummary {
        seed,
        rounds,
        prompt_hits: vec![0; CATALOG.len()],
        min_pct: u8::MAX,
        max_pct: 0,
    };

    for round in 0..rounds {
        let Some(index) = game.question_index() else {
            bail!("round {round}: no question on screen");
        };
        summary.prompt_hits[index] += 1;

        let choice = if round % 2 == 0 {
            Choice::First
        } else {
            Choice::Second
        };
        let Some(split) = game.handle_choice(choice, &mut rng) else {
            bail!("round {round}: choice was ignored");
        };
        if split.total() != 100 {
            bail!(
                "round {round}: split {}/{} does not sum to 100",
                split.first_pct,
                split.second_pct
            );
        }
        let chosen = split.pct_for(choice);
        if chosen > 99 {
            bail!("round {round}: chosen share {chosen} outside 0..=99");
        }
        summary.min_pct = summary.min_pct.min(chosen);
        summary.max_pct = summary.max_pct.max(chosen);
        log::debug!("round {round}: prompt {index} {choice:?} -> {chosen}%");

        game.generate_question(&mut rng);
        if game.split().is_some() {
            bail!("round {round}: new question kept the previous split");
        }
    }

    if rounds == 0 {
        summary.min_pct = 0;
    }
    Ok(summary)
}
