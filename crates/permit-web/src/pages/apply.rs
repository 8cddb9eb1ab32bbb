//! Application Page

use leptos::prelude::*;

use crate::components::WorkPermitModal;

#[component]
pub fn ApplyPage() -> impl IntoView {
    view! {
        <div class="apply">
            <div class="modal">
                <WorkPermitModal />
            </div>
        </div>
    }
}
