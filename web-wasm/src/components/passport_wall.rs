//! パスポートウォールコンポーネント

use leptos::html::Div;
use leptos::prelude::*;
use passport_common::format::format_co2_detail;
use passport_common::render::WALL_CODE_SIZE;
use passport_common::{
    format_material, format_summary, format_timestamp, qr_payload, PassportRecord, WallEntryState,
    EMPTY_WALL_MESSAGE,
};

use crate::qr_code::render_qr_code;

#[component]
pub fn PassportWall<FD>(
    records: ReadSignal<Vec<PassportRecord>>,
    on_delete: FD,
) -> impl IntoView
where
    FD: Fn(String) + 'static + Clone + Send + Sync,
{
    view! {
        <section class="wall">
            <h2>"Passport wall"</h2>
            {move || {
                records.with(Vec::is_empty).then(|| {
                    view! { <p id="wallEmpty" class="wall-empty">{EMPTY_WALL_MESSAGE}</p> }
                })
            }}
            <div id="wallGrid" class="wall-grid">
                <For
                    each=move || records.get()
                    key=|record| record.id.clone()
                    children=move |record| {
                        let on_delete = on_delete.clone();
                        view! { <WallCard record=record on_delete=on_delete /> }
                    }
                />
            </div>
        </section>
    }
}

#[component]
fn WallCard<FD>(record: PassportRecord, on_delete: FD) -> impl IntoView
where
    FD: Fn(String) + 'static + Clone + Send + Sync,
{
    let (state, set_state) = signal(WallEntryState::default());
    let qr_ref = NodeRef::<Div>::new();

    let meta = record.category_meta();
    let summary = format_summary(&record);
    let saved = format_timestamp(&record.created_at, &chrono::Local);

    // 初回展開時だけQRコードを描画する
    let on_toggle = {
        let payload = qr_payload(&record);
        move |_| {
            let mut entry = state.get_untracked();
            let outcome = entry.toggle();
            set_state.set(entry);
            if outcome.render_code {
                if let Some(target) = qr_ref.get() {
                    render_qr_code(&target, &payload, WALL_CODE_SIZE);
                }
            }
        }
    };

    let on_delete_click = {
        let id = record.id.clone();
        move |_| on_delete(id.clone())
    };

    let fun_fact = record.has_fun_fact().then(|| {
        let fact = record.fun_fact.clone();
        view! { <div><strong>"Fun fact:"</strong>" "{fact}</div> }
    });

    view! {
        <article class="wall-card" data-id=record.id.clone()>
            <div class="wall-card-header">
                <span class="badge">{meta.label}</span>
                <div class="wall-actions">
                    <button type="button" class="ghost" on:click=on_toggle>
                        {move || state.get().toggle_label()}
                    </button>
                    <button type="button" class="ghost" on:click=on_delete_click>
                        "Delete"
                    </button>
                </div>
            </div>
            <h3 class="wall-title">{record.product_name.clone()}</h3>
            <p class="wall-summary">{summary}</p>
            <p class="wall-summary">"Saved " {saved}</p>
            <div class="wall-details" class:active=move || state.get().expanded>
                <div><strong>"Material:"</strong>" "{format_material(&record.material)}</div>
                <div><strong>"Origin:"</strong>" "{record.origin.clone()}</div>
                <div><strong>"CO2:"</strong>" "{format_co2_detail(record.co2)}</div>
                <div><strong>"Recyclability:"</strong>" "{format!("{}%", record.recyclability)}</div>
                {fun_fact}
                <div class="wall-qr" node_ref=qr_ref></div>
            </div>
        </article>
    }
}
