use std::collections::BTreeMap;

use crate::i18n::{fmt_pct, t, tr};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use welcome_core::{Choice, ChoiceGame, VoteSplit};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone, Default)]
pub struct Props {
    /// Fixed RNG seed; the page seeds from browser entropy when absent.
    #[prop_or_default]
    pub seed: Option<u64>,
}

fn split_line(key: &str, pct: u8) -> String {
    let pct = fmt_pct(pct);
    let mut vars = BTreeMap::new();
    vars.insert("pct", pct.as_str());
    tr(key, Some(&vars))
}

fn render_split(split: VoteSplit) -> Html {
    html! {
        <div id="vote-split" class="mt-4 text-gray-300" aria-live="polite">
            <p>{ split_line("game.first_option_pct", split.first_pct) }</p>
            <p>{ split_line("game.second_option_pct", split.second_pct) }</p>
        </div>
    }
}

/// "Would You Rather" widget with client-side made-up vote splits.
#[function_component(ChoiceGamePanel)]
pub fn choice_game_panel(p: &Props) -> Html {
    let seed = p.seed;
    let rng = use_mut_ref(move || SmallRng::seed_from_u64(seed.unwrap_or_else(crate::dom::entropy)));
    let game = {
        let rng = rng.clone();
        use_state(move || ChoiceGame::start(&mut *rng.borrow_mut()))
    };

    let on_choice = {
        let game = game.clone();
        let rng = rng.clone();
        Callback::from(move |choice: Choice| {
            let mut next = (*game).clone();
            next.handle_choice(choice, &mut *rng.borrow_mut());
            game.set(next);
        })
    };

    let on_new_question = {
        let game = game.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*game).clone();
            next.generate_question(&mut *rng.borrow_mut());
            game.set(next);
        })
    };

    let options = game.question().map(|pair| {
        let option_button = |choice: Choice| {
            let on_choice = on_choice.clone();
            let onclick = Callback::from(move |_: MouseEvent| on_choice.emit(choice));
            html! {
                <button
                    type="button"
                    class="choice-option block w-full bg-gray-700 hover:bg-gray-600 text-white py-2 px-4 rounded mt-2"
                    data-choice={choice.index().to_string()}
                    {onclick}
                >
                    { pair.option(choice) }
                </button>
            }
        };
        html! {
            <div>
                { option_button(Choice::First) }
                { option_button(Choice::Second) }
            </div>
        }
    });

    html! {
        <section id="choice-game" class="mt-8 bg-gray-800 p-6 rounded-lg shadow-lg max-w-md text-center border border-gray-700">
            <h2 class="text-xl font-bold text-blue-400 mb-4">{ t("game.title") }</h2>
            { options.unwrap_or_default() }
            { game.split().map(render_split).unwrap_or_default() }
            <button
                id="new-question-btn"
                type="button"
                onclick={on_new_question}
                class="mt-4 bg-blue-500 hover:bg-blue-600 text-white py-2 px-4 rounded"
            >
                { t("game.new_question") }
            </button>
        </section>
    }
}
