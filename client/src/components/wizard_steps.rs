//! Step indicator for the case wizard.

use leptos::prelude::*;

use crate::state::wizard::{WizardState, WizardStep};

/// Clickable list of wizard steps; forward jumps go through the entry checks.
#[component]
pub fn WizardSteps() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();

    let go = move |step: WizardStep| {
        wizard.update(|w| {
            if let Err(blocked) = w.go_to(step) {
                w.error = Some(WizardState::blocked_message(&blocked));
            }
        });
    };

    view! {
        <ol class="wizard-steps">
            {WizardStep::ALL
                .into_iter()
                .map(|step| {
                    let current = move || wizard.with(|w| w.step) == step;
                    let done = move || wizard.with(|w| w.step.index()) > step.index();
                    view! {
                        <li
                            class="wizard-steps__item"
                            class:wizard-steps__item--current=current
                            class:wizard-steps__item--done=done
                        >
                            <button class="wizard-steps__button" on:click=move |_| go(step)>
                                <span class="wizard-steps__number">{step.index() + 1}</span>
                                <span class="wizard-steps__label">{step.label()}</span>
                            </button>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}
