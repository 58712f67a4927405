//! パスポート入力フォームコンポーネント

use leptos::prelude::*;
use passport_common::{format_material, Category, FormInput, ORIGINS};

/// 1項目だけ書き換えてフォーム全体を通知するハンドラ
fn field_handler<FC>(
    form: ReadSignal<FormInput>,
    on_change: FC,
    apply: fn(&mut FormInput, String),
) -> impl Fn(web_sys::Event) + 'static
where
    FC: Fn(FormInput) + 'static,
{
    move |ev: web_sys::Event| {
        let mut input = form.get_untracked();
        apply(&mut input, event_target_value(&ev));
        on_change(input);
    }
}

/// 素材セレクトの候補
const MATERIAL_OPTIONS: [&str; 7] = ["steel", "aluminium", "plastic", "textile", "lithium", "metal", "mixed"];

#[component]
pub fn PassportForm<FC, FG, FR, FS>(
    form: ReadSignal<FormInput>,
    save_enabled: ReadSignal<bool>,
    on_change: FC,
    on_generate: FG,
    on_randomize: FR,
    on_save: FS,
) -> impl IntoView
where
    FC: Fn(FormInput) + 'static + Clone + Send + Sync,
    FG: Fn(()) + 'static + Clone + Send + Sync,
    FR: Fn(()) + 'static + Clone + Send + Sync,
    FS: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <form id="passport-form" class="passport-form" on:submit=|ev| ev.prevent_default()>
            <div class="form-group">
                <label for="productName">"Product name"</label>
                <input
                    type="text"
                    id="productName"
                    placeholder="e.g. Genk Battery Pack"
                    prop:value=move || form.get().product_name
                    on:input=field_handler(form, on_change.clone(), |f, v| f.product_name = v)
                />
            </div>

            <div class="form-group">
                <label for="category">"Category"</label>
                <select id="category" on:change=field_handler(form, on_change.clone(), |f, v| f.category = v)>
                    <option value="" selected=move || form.get().category.is_empty()>"Select a category"</option>
                    {Category::ALL
                        .into_iter()
                        .map(|category| {
                            let tag = category.tag();
                            view! {
                                <option value=tag selected=move || form.get().category == tag>
                                    {category.meta().label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="material">"Material"</label>
                <select id="material" on:change=field_handler(form, on_change.clone(), |f, v| f.material = v)>
                    <option value="" selected=move || form.get().material.is_empty()>"Select a material"</option>
                    {MATERIAL_OPTIONS
                        .into_iter()
                        .map(|material| {
                            view! {
                                <option value=material selected=move || form.get().material == material>
                                    {format_material(material)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="origin">"Origin"</label>
                <select id="origin" on:change=field_handler(form, on_change.clone(), |f, v| f.origin = v)>
                    <option value="" selected=move || form.get().origin.is_empty()>"Select an origin"</option>
                    {ORIGINS
                        .into_iter()
                        .map(|origin| {
                            view! {
                                <option value=origin selected=move || form.get().origin == origin>
                                    {origin}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="co2">
                    "CO2 footprint score "
                    <span id="co2Value">{move || form.get().co2}</span>
                </label>
                <input
                    type="range"
                    id="co2"
                    min="0"
                    max="100"
                    prop:value=move || form.get().co2
                    on:input=field_handler(form, on_change.clone(), |f, v| f.co2 = v)
                />
            </div>

            <div class="form-group">
                <label for="recyclability">
                    "Recyclability "
                    <span id="recyclabilityValue">{move || format!("{}%", form.get().recyclability)}</span>
                </label>
                <input
                    type="range"
                    id="recyclability"
                    min="0"
                    max="100"
                    prop:value=move || form.get().recyclability
                    on:input=field_handler(form, on_change.clone(), |f, v| f.recyclability = v)
                />
            </div>

            <div class="form-group">
                <label for="funFact">"Fun fact (optional)"</label>
                <textarea
                    id="funFact"
                    rows="3"
                    prop:value=move || form.get().fun_fact
                    on:input=field_handler(form, on_change.clone(), |f, v| f.fun_fact = v)
                ></textarea>
            </div>

            <div class="form-actions">
                <button
                    type="button"
                    id="generatePreview"
                    class="btn btn-primary"
                    on:click={
                        let on_generate = on_generate.clone();
                        move |_| on_generate(())
                    }
                >
                    "Generate preview"
                </button>
                <button
                    type="button"
                    id="randomize"
                    class="btn btn-secondary"
                    on:click={
                        let on_randomize = on_randomize.clone();
                        move |_| on_randomize(())
                    }
                >
                    "Randomize"
                </button>
                <button
                    type="button"
                    id="savePassport"
                    class="btn btn-tertiary"
                    disabled=move || !save_enabled.get()
                    on:click={
                        let on_save = on_save.clone();
                        move |_| on_save(())
                    }
                >
                    "Save passport"
                </button>
            </div>
        </form>
    }
}
