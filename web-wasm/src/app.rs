//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use passport_common::{
    random_form, read_form_data, DeleteOutcome, FormInput, PassportDraft, PassportStore,
    PersistStatus, ORIGINS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::browser_storage::BrowserStorage;
use crate::components::{
    header::Header,
    passport_form::PassportForm,
    passport_wall::PassportWall,
    preview_card::PreviewCard,
};

pub const STATUS_MISSING_FIELDS: &str = "Please fill in the required fields to generate a preview.";
pub const STATUS_PREVIEW_READY: &str = "Preview ready. Tweak the form and it will stay in sync.";
pub const STATUS_NO_PREVIEW: &str = "Generate a preview before saving.";
pub const STATUS_SAVED: &str = "Saved! Scroll down to see it on the wall.";

/// フォームの初期値（レンジは中央）
fn initial_form() -> FormInput {
    FormInput {
        co2: "50".to_string(),
        recyclability: "50".to_string(),
        ..Default::default()
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // パスポートストア（起動時にlocalStorageから読み込む）
    let store = StoredValue::new_local(PassportStore::load(BrowserStorage::open()));
    let (records, set_records) = signal(store.with_value(|s| s.records().to_vec()));

    // フォーム・プレビュー状態
    let (form, set_form) = signal(initial_form());
    let (preview, set_preview) = signal(None::<PassportDraft>);
    let (preview_live, set_preview_live) = signal(false);
    let (save_enabled, set_save_enabled) = signal(false);
    let (status, set_status) = signal(String::new());

    let refresh_records = move || set_records.set(store.with_value(|s| s.records().to_vec()));

    // フォームから候補を作り直す。silentなら失敗時にメッセージを出さない
    let build_preview = move |silent: bool| -> bool {
        match read_form_data(&form.get_untracked()) {
            Some(draft) => {
                set_preview.set(Some(draft));
                set_save_enabled.set(true);
                true
            }
            None => {
                if !silent {
                    set_status.set(STATUS_MISSING_FIELDS.to_string());
                }
                false
            }
        }
    };

    let on_form_change = move |input: FormInput| {
        set_form.set(input);
        if preview_live.get_untracked() {
            build_preview(true);
        }
    };

    let on_generate = move |_: ()| {
        if build_preview(false) {
            set_preview_live.set(true);
            set_status.set(STATUS_PREVIEW_READY.to_string());
        }
    };

    let on_randomize = move |_: ()| {
        let mut rng = SmallRng::seed_from_u64(js_sys::Math::random().to_bits());
        set_form.set(random_form(&mut rng, &ORIGINS));
        if preview_live.get_untracked() {
            build_preview(true);
        }
    };

    let on_save = move |_: ()| {
        let Some(draft) = preview.get_untracked() else {
            set_status.set(STATUS_NO_PREVIEW.to_string());
            return;
        };

        let mut persisted = PersistStatus::Persisted;
        store.update_value(|s| persisted = s.save(draft).status);
        refresh_records();

        match persisted {
            PersistStatus::Persisted => set_status.set(STATUS_SAVED.to_string()),
            PersistStatus::NotPersisted(reason) => {
                gloo::console::error!("Unable to save passports", reason.clone());
                set_status.set(format!(
                    "Saved to the wall, but this browser could not keep it: {}",
                    reason
                ));
            }
        }
        set_save_enabled.set(false);
        set_preview_live.set(false);
    };

    let on_delete = move |id: String| {
        if !gloo::dialogs::confirm("Remove this passport from the wall?") {
            return;
        }

        let mut outcome = None;
        store.update_value(|s| outcome = Some(s.delete(&id)));
        refresh_records();

        if let Some(DeleteOutcome {
            status: PersistStatus::NotPersisted(reason),
            ..
        }) = outcome
        {
            gloo::console::error!("Unable to save passports", reason.clone());
            set_status.set(format!(
                "Removed from the wall, but this browser could not keep the change: {}",
                reason
            ));
        }
    };

    view! {
        <div class="container">
            <Header />

            <main class="studio">
                <PassportForm
                    form=form
                    save_enabled=save_enabled
                    on_change=on_form_change
                    on_generate=on_generate
                    on_randomize=on_randomize
                    on_save=on_save
                />

                <PreviewCard preview=preview status=status />
            </main>

            <PassportWall records=records on_delete=on_delete />
        </div>
    }
}
