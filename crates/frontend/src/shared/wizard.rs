//! Two-step dialog flow shared by the create dialogs.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Details,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 2] = [WizardStep::Details, WizardStep::Review];

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Details => "Details",
            WizardStep::Review => "Review",
        }
    }

    pub fn number(&self) -> usize {
        match self {
            WizardStep::Details => 1,
            WizardStep::Review => 2,
        }
    }

    /// Step after a successful validation; Review is terminal
    pub fn next(self) -> Self {
        WizardStep::Review
    }

    pub fn back(self) -> Self {
        WizardStep::Details
    }

    /// Whether the indicator marks this step as completed while `current` is shown
    pub fn is_done(self, current: WizardStep) -> bool {
        current.number() > self.number()
    }
}

/// Step indicator shown above the dialog body
#[component]
pub fn WizardSteps(#[prop(into)] current: Signal<WizardStep>) -> impl IntoView {
    view! {
        <ol class="wizard-steps">
            {WizardStep::ALL
                .into_iter()
                .map(|step| {
                    view! {
                        <li
                            class="wizard-steps__item"
                            class:wizard-steps__item--active=move || current.get() == step
                            class:wizard-steps__item--done=move || step.is_done(current.get())
                        >
                            <span class="wizard-steps__number">{step.number()}</span>
                            <span class="wizard-steps__title">{step.title()}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_details_and_moves_both_ways() {
        let step = WizardStep::default();
        assert_eq!(step, WizardStep::Details);
        assert_eq!(step.next(), WizardStep::Review);
        assert_eq!(step.next().next(), WizardStep::Review);
        assert_eq!(step.next().back(), WizardStep::Details);
    }

    #[test]
    fn only_earlier_steps_are_done() {
        assert!(WizardStep::Details.is_done(WizardStep::Review));
        assert!(!WizardStep::Review.is_done(WizardStep::Review));
        assert!(!WizardStep::Details.is_done(WizardStep::Details));
    }
}
