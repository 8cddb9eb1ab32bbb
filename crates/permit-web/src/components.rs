//! UI Components

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use permit_checkout::{CURRENCIES, ModalState, prefetch_exchange_rates};

use crate::browser::{BrowserNavigator, checkout_flow};

/// Work-permit payment modal
///
/// Shows the fee in the selected currency and hands off to the hosted
/// payment page on submit.
#[component]
pub fn WorkPermitModal() -> impl IntoView {
    let (modal, set_modal) = signal(ModalState::default());

    let flow = StoredValue::new_local(Rc::new(checkout_flow()));
    let cancel = flow.with_value(|f| f.cancellation_token());
    on_cleanup(move || cancel.cancel());

    // Rates are not used for the fee; fetched once for diagnostics only.
    spawn_local(async {
        prefetch_exchange_rates(&reqwest::Client::new()).await;
    });

    let submit = move |_| {
        let current = modal.get_untracked();
        if !current.can_submit() {
            return;
        }
        let flow = flow.get_value();
        spawn_local(async move {
            flow.submit_payment(&current.currency, &BrowserNavigator, move |state| {
                set_modal.update(|m| m.apply(state));
            })
            .await;
        });
    };

    view! {
        <div class="work-permit">
            <header class="modal-header">
                <div class="icon-badge">"🛡"</div>
                <h2>"Process Work Permit"</h2>
                <p class="subtitle">"Your gateway to working in Canada"</p>
            </header>

            <section class="fee-panel">
                <CurrencySelector modal=modal set_modal=set_modal />
                <div class="fee">
                    <h3>"Processing Fee"</h3>
                    <div class="fee-row">
                        <p class="amount">{move || modal.get().fee_label()}</p>
                        <span class="note">"Fully refundable"</span>
                    </div>
                </div>
            </section>

            <section class="benefits">
                <BenefitCard icon="📄" title="Work Permit" detail="Valid for up to 3 years" />
                <BenefitCard icon="🛡" title="Permanent Residency" detail="Certificate of PR included" />
                <BenefitCard icon="✈" title="Travel Support" detail="Sponsored visa & accommodation" />
                <BenefitCard icon="👥" title="Direct Interview" detail="With company employers" />
            </section>

            <section class="steps">
                <h3>"How it works:"</h3>
                <ProcessStep number=1 text="Select your preferred currency" />
                <ProcessStep number=2 text="Process payment using secure gateway" />
                <ProcessStep number=3 text="Receive confirmation and next steps via email" />
            </section>

            <button
                class="btn btn-primary"
                on:click=submit
                disabled=move || !modal.get().can_submit()
            >
                {move || if modal.get().can_submit() { "Process Application →" } else { "Processing..." }}
            </button>

            {move || {
                modal
                    .get()
                    .submission
                    .error()
                    .map(str::to_string)
                    .map(|msg| view! { <div class="error"><p>{msg}</p></div> })
            }}
        </div>
    }
}

/// Currency dropdown over the static currency list
#[component]
fn CurrencySelector(modal: ReadSignal<ModalState>, set_modal: WriteSignal<ModalState>) -> impl IntoView {
    view! {
        <div class="currency-selector">
            <label>"Select your preferred currency:"</label>
            <select
                prop:value=move || modal.get().currency.to_string()
                on:change=move |ev| set_modal.update(|m| m.select_currency(event_target_value(&ev)))
            >
                {CURRENCIES
                    .iter()
                    .map(|c| view! { <option value=c.code>{c.label()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn BenefitCard(icon: &'static str, title: &'static str, detail: &'static str) -> impl IntoView {
    view! {
        <div class="benefit">
            <span class="benefit-icon">{icon}</span>
            <div>
                <h3>{title}</h3>
                <p>{detail}</p>
            </div>
        </div>
    }
}

#[component]
fn ProcessStep(number: u8, text: &'static str) -> impl IntoView {
    view! {
        <div class="step">
            <span class="step-number">{number}</span>
            <p>{text}</p>
        </div>
    }
}
