//! プレビューカードコンポーネント

use leptos::html::Div;
use leptos::prelude::*;
use passport_common::render::PREVIEW_CODE_SIZE;
use passport_common::{format_co2_metric, format_material, meter_percent, qr_payload, PassportDraft};

use crate::qr_code::render_qr_code;

/// 候補の1項目を表示用文字列にする（未生成なら空文字）
fn draft_text(
    preview: ReadSignal<Option<PassportDraft>>,
    f: fn(&PassportDraft) -> String,
) -> impl Fn() -> String + Copy + Send + Sync + 'static {
    move || preview.with(|p| p.as_ref().map(f).unwrap_or_default())
}

#[component]
pub fn PreviewCard(
    preview: ReadSignal<Option<PassportDraft>>,
    status: ReadSignal<String>,
) -> impl IntoView {
    let qr_ref = NodeRef::<Div>::new();

    // プレビューが変わるたびにQRコードを描き直す
    Effect::new(move |_| {
        let draft = preview.get();
        if let (Some(draft), Some(target)) = (draft, qr_ref.get()) {
            render_qr_code(&target, &qr_payload(&draft), PREVIEW_CODE_SIZE);
        }
    });

    view! {
        <section id="preview" class="preview-panel">
            <p id="previewStatus" class="preview-status">{move || status.get()}</p>

            <Show
                when=move || preview.with(Option::is_some)
                fallback=|| view! { <p class="text-muted">"Fill in the form and generate a preview."</p> }
            >
                <article class="passport-card">
                    <div>
                        <h3>{draft_text(preview, |d| d.product_name.clone())}</h3>
                        <span class="category-pill">
                            <span class="pill-icon">{draft_text(preview, |d| d.category_meta().icon.to_string())}</span>
                            " "
                            {draft_text(preview, |d| d.category_meta().label.to_string())}
                        </span>
                        <div class="passport-meta">
                            <div><strong>"Material:"</strong>" "{draft_text(preview, |d| format_material(&d.material))}</div>
                            <div><strong>"Origin:"</strong>" "{draft_text(preview, |d| d.origin.clone())}</div>
                            <div class="metric">
                                <div class="metric-label">
                                    <span>"CO2 footprint"</span>
                                    <span>{draft_text(preview, |d| format_co2_metric(d.co2))}</span>
                                </div>
                                <div class="meter-bar">
                                    <span style=draft_text(preview, |d| format!("width:{}%;", meter_percent(d.co2)))></span>
                                </div>
                            </div>
                            <div class="metric">
                                <div class="metric-label">
                                    <span>"Recyclability"</span>
                                    <span>{draft_text(preview, |d| format!("{}%", d.recyclability))}</span>
                                </div>
                                <div class="meter-bar">
                                    <span style=draft_text(preview, |d| format!("width:{}%;", meter_percent(d.recyclability)))></span>
                                </div>
                            </div>
                        </div>
                        {move || {
                            preview.with(|p| {
                                p.as_ref().filter(|d| d.has_fun_fact()).map(|d| {
                                    let fact = d.fun_fact.clone();
                                    view! {
                                        <p class="fun-fact"><strong>"Fun fact:"</strong>" "{fact}</p>
                                    }
                                })
                            })
                        }}
                    </div>
                    <div class="qr-box" node_ref=qr_ref></div>
                </article>
            </Show>
        </section>
    }
}
