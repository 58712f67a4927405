//! 端末向けテキスト表示
//!
//! プレビューカード・ウォール一覧・詳細パネルを文字列にする。

use chrono::TimeZone;
use passport_common::format::{format_co2_detail, format_co2_metric, meter_percent};
use passport_common::{
    format_material, format_summary, format_timestamp, qr_payload, PassportDraft, PassportRecord,
    PersistStatus, EMPTY_WALL_MESSAGE,
};
use std::fmt::{self, Write as _};

const METER_WIDTH: usize = 20;

/// 0-100の値をバーにする（例: "[########------------]"）
pub fn meter(value: i64) -> String {
    let filled = (usize::from(meter_percent(value)) * METER_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(METER_WIDTH - filled))
}

pub fn preview_text(draft: &PassportDraft) -> String {
    let meta = draft.category_meta();
    let mut out = String::new();
    let _ = writeln!(out, "{}", draft.product_name);
    let _ = writeln!(out, "[{}] {}", meta.icon, meta.label);
    let _ = writeln!(out, "  Material:      {}", format_material(&draft.material));
    let _ = writeln!(out, "  Origin:        {}", draft.origin);
    let _ = writeln!(
        out,
        "  CO2 footprint: {} {}",
        meter(draft.co2),
        format_co2_metric(draft.co2)
    );
    let _ = writeln!(
        out,
        "  Recyclability: {} {}%",
        meter(draft.recyclability),
        draft.recyclability
    );
    if draft.has_fun_fact() {
        let _ = writeln!(out, "  Fun fact: {}", draft.fun_fact);
    }
    let _ = writeln!(out, "  QR: {}", qr_payload(draft));
    out
}

/// ウォール一覧（新しい順）
pub fn wall_text<Tz>(records: &[PassportRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if records.is_empty() {
        return format!("{}\n", EMPTY_WALL_MESSAGE);
    }

    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{}  [{}] {}",
            record.id,
            record.category_meta().label,
            record.product_name
        );
        let _ = writeln!(out, "    {}", format_summary(record));
        let _ = writeln!(out, "    Saved {}", format_timestamp(&record.created_at, tz));
    }
    out
}

/// 詳細パネル
pub fn details_text(record: &PassportRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", record.product_name, record.id);
    let _ = writeln!(out, "  Material:      {}", format_material(&record.material));
    let _ = writeln!(out, "  Origin:        {}", record.origin);
    let _ = writeln!(out, "  CO2:           {}", format_co2_detail(record.co2));
    let _ = writeln!(out, "  Recyclability: {}%", record.recyclability);
    if record.has_fun_fact() {
        let _ = writeln!(out, "  Fun fact:      {}", record.fun_fact);
    }
    let _ = writeln!(out, "  QR: {}", qr_payload(record));
    out
}

/// 保存結果のメッセージ
pub fn save_message(id: &str, status: &PersistStatus) -> String {
    match status {
        PersistStatus::Persisted => {
            format!("Saved! Run `passport-wall list` to see it on the wall. (id: {})", id)
        }
        PersistStatus::NotPersisted(reason) => {
            format!("⚠ Unable to save passports: {} (id: {})", reason, id)
        }
    }
}

/// 削除結果のメッセージ
pub fn delete_message(id: &str, status: &PersistStatus) -> String {
    match status {
        PersistStatus::Persisted => format!("✔ Removed passport {} from the wall.", id),
        PersistStatus::NotPersisted(reason) => {
            format!("⚠ Removed passport {}, but unable to save passports: {}", id, reason)
        }
    }
}
