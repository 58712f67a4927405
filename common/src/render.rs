//! HTMLレンダリング
//!
//! プレビューカードとウォールをマークアップ文字列として組み立てる。
//! ユーザー入力の文字列はすべて `escape_html` を通す。
//! QRコードは `data-qr-payload` を持つ空のdivとして出力し、描画は外部に任せる。

use std::fmt;
use std::fmt::Write as _;

use chrono::TimeZone;

use crate::escape::escape_html;
use crate::format::{
    format_co2_detail, format_co2_metric, format_material, format_summary, format_timestamp,
    meter_percent, qr_payload,
};
use crate::types::{PassportDraft, PassportRecord};
use crate::wall::{WallEntryState, WallState};

/// プレビューのQRサイズ(px)
pub const PREVIEW_CODE_SIZE: u32 = 106;
/// ウォール詳細のQRサイズ(px)
pub const WALL_CODE_SIZE: u32 = 88;

pub const EMPTY_WALL_MESSAGE: &str =
    "No passports yet. Generate one above and save it to start your wall.";

/// QRコードの描画先
fn code_slot(class: &str, payload: &str, size: u32) -> String {
    format!(
        r#"<div class="{}" data-qr-size="{}" data-qr-payload="{}"></div>"#,
        class,
        size,
        escape_html(payload)
    )
}

fn meter(value: i64) -> String {
    format!(
        r#"<div class="meter-bar"><span style="width:{}%;"></span></div>"#,
        meter_percent(value)
    )
}

/// 未保存候補のプレビューカード
pub fn render_preview(draft: &PassportDraft) -> String {
    let meta = draft.category_meta();
    let mut html = String::new();

    html.push_str(r#"<article class="passport-card"><div>"#);
    let _ = write!(html, "<h3>{}</h3>", escape_html(&draft.product_name));
    let _ = write!(
        html,
        r#"<span class="category-pill"><span class="pill-icon">{}</span> {}</span>"#,
        meta.icon, meta.label
    );

    html.push_str(r#"<div class="passport-meta">"#);
    let _ = write!(
        html,
        "<div><strong>Material:</strong> {}</div>",
        escape_html(&format_material(&draft.material))
    );
    let _ = write!(
        html,
        "<div><strong>Origin:</strong> {}</div>",
        escape_html(&draft.origin)
    );
    let _ = write!(
        html,
        r#"<div class="metric"><div class="metric-label"><span>CO2 footprint</span><span>{}</span></div>{}</div>"#,
        format_co2_metric(draft.co2),
        meter(draft.co2)
    );
    let _ = write!(
        html,
        r#"<div class="metric"><div class="metric-label"><span>Recyclability</span><span>{}%</span></div>{}</div>"#,
        draft.recyclability,
        meter(draft.recyclability)
    );
    html.push_str("</div>");

    if draft.has_fun_fact() {
        let _ = write!(
            html,
            r#"<p class="fun-fact"><strong>Fun fact:</strong> {}</p>"#,
            escape_html(&draft.fun_fact)
        );
    }
    html.push_str("</div>");
    html.push_str(&code_slot("qr-box", &qr_payload(draft), PREVIEW_CODE_SIZE));
    html.push_str("</article>");
    html
}

/// ウォールカード1枚（サマリー + 詳細パネル）
///
/// QRコードの描画先は `state.code_rendered` が立っているときだけペイロードを持つ。
pub fn render_wall_entry<Tz>(record: &PassportRecord, state: WallEntryState, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let meta = record.category_meta();
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<article class="wall-card" data-id="{}">"#,
        escape_html(&record.id)
    );
    let _ = write!(
        html,
        r#"<div class="wall-card-header"><span class="badge">{}</span><div class="wall-actions"><button type="button" class="ghost" data-action="toggle">{}</button><button type="button" class="ghost" data-action="delete">Delete</button></div></div>"#,
        meta.label,
        state.toggle_label()
    );
    let _ = write!(
        html,
        r#"<h3 class="wall-title">{}</h3>"#,
        escape_html(&record.product_name)
    );
    let _ = write!(
        html,
        r#"<p class="wall-summary">{}</p>"#,
        escape_html(&format_summary(record))
    );
    let _ = write!(
        html,
        r#"<p class="wall-summary">Saved {}</p>"#,
        format_timestamp(&record.created_at, tz)
    );

    let class = if state.expanded {
        "wall-details active"
    } else {
        "wall-details"
    };
    let _ = write!(html, r#"<div class="{}">"#, class);
    let _ = write!(
        html,
        "<div><strong>Material:</strong> {}</div>",
        escape_html(&format_material(&record.material))
    );
    let _ = write!(
        html,
        "<div><strong>Origin:</strong> {}</div>",
        escape_html(&record.origin)
    );
    let _ = write!(
        html,
        "<div><strong>CO2:</strong> {}</div>",
        format_co2_detail(record.co2)
    );
    let _ = write!(
        html,
        "<div><strong>Recyclability:</strong> {}%</div>",
        record.recyclability
    );
    if record.has_fun_fact() {
        let _ = write!(
            html,
            "<div><strong>Fun fact:</strong> {}</div>",
            escape_html(&record.fun_fact)
        );
    }
    if state.code_rendered {
        html.push_str(&code_slot("wall-qr", &qr_payload(record), WALL_CODE_SIZE));
    } else {
        html.push_str(r#"<div class="wall-qr"></div>"#);
    }
    html.push_str("</div></article>");
    html
}

/// ウォール全体。空なら空状態メッセージ
pub fn render_wall<Tz>(records: &[PassportRecord], wall: &WallState, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if records.is_empty() {
        return format!(r#"<p class="wall-empty">{}</p>"#, EMPTY_WALL_MESSAGE);
    }

    let mut html = String::from(r#"<div class="wall-grid">"#);
    for record in records {
        html.push_str(&render_wall_entry(record, wall.entry(&record.id), tz));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn genk() -> PassportDraft {
        PassportDraft {
            product_name: "Genk Battery Pack".to_string(),
            category: "battery".to_string(),
            material: "lithium".to_string(),
            origin: "Genk, Belgium".to_string(),
            co2: 40,
            recyclability: 72,
            fun_fact: String::new(),
        }
    }

    fn record(id: &str, draft: PassportDraft) -> PassportRecord {
        PassportRecord {
            draft,
            id: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 16, 9, 5, 0).unwrap(),
        }
    }

    #[test]
    fn test_preview_genk_scenario() {
        let html = render_preview(&genk());
        assert!(html.contains("<h3>Genk Battery Pack</h3>"));
        assert!(html.contains(r#"<span class="pill-icon">B</span> Battery"#));
        assert!(html.contains("<strong>Material:</strong> Lithium-based"));
        assert!(html.contains("<strong>Origin:</strong> Genk, Belgium"));
        assert!(html.contains("<span>40 kg | Medium</span>"));
        assert!(html.contains("width:40%;"));
        assert!(html.contains("<span>72%</span>"));
        assert!(html.contains("width:72%;"));
        assert!(!html.contains("fun-fact"));
        assert!(html.contains(r#"data-qr-size="106""#));
    }

    #[test]
    fn test_preview_fun_fact_block() {
        let draft = PassportDraft {
            fun_fact: "Designed for disassembly.".to_string(),
            ..genk()
        };
        let html = render_preview(&draft);
        assert!(html.contains(r#"<p class="fun-fact"><strong>Fun fact:</strong> Designed for disassembly.</p>"#));
    }

    #[test]
    fn test_preview_unknown_category_uses_other() {
        let draft = PassportDraft {
            category: "vehicle".to_string(),
            ..genk()
        };
        let html = render_preview(&draft);
        assert!(html.contains(r#"<span class="pill-icon">?</span> Other"#));
    }

    #[test]
    fn test_preview_escapes_untrusted_text() {
        let draft = PassportDraft {
            product_name: "<img src=x onerror=alert(1)>".to_string(),
            origin: "\"Ghent\" & <Bruges>".to_string(),
            fun_fact: "<script>steal()</script>".to_string(),
            material: "<b>wood</b>".to_string(),
            ..genk()
        };
        let html = render_preview(&draft);
        assert!(!html.contains("<img"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<Bruges>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("&quot;Ghent&quot; &amp; &lt;Bruges&gt;"));
    }

    #[test]
    fn test_qr_payload_attribute_is_escaped() {
        let html = render_preview(&genk());
        assert!(html.contains("data-qr-payload=\"{&quot;productName&quot;:&quot;Genk Battery Pack&quot;"));
    }

    #[test]
    fn test_wall_entry_collapsed() {
        let html = render_wall_entry(&record("1", genk()), WallEntryState::default(), &Utc);
        assert!(html.contains(r#"data-id="1""#));
        assert!(html.contains(r#"<span class="badge">Battery</span>"#));
        assert!(html.contains("View details"));
        assert!(html.contains(
            "Lithium-based | 40 kg CO2e | 72% recyclable | Made in Genk, Belgium"
        ));
        assert!(html.contains("Saved Fri 09:05"));
        assert!(html.contains(r#"<div class="wall-details">"#));
        assert!(html.contains("<strong>CO2:</strong> 40 kg (Medium)"));
        assert!(html.contains(r#"<div class="wall-qr"></div>"#));
    }

    #[test]
    fn test_wall_entry_expanded_has_code() {
        let mut state = WallEntryState::default();
        state.toggle();
        let html = render_wall_entry(&record("1", genk()), state, &Utc);
        assert!(html.contains(r#"<div class="wall-details active">"#));
        assert!(html.contains("Hide details"));
        assert!(html.contains(r#"data-qr-size="88""#));
        assert!(html.contains("&quot;id&quot;:&quot;1&quot;"));
    }

    #[test]
    fn test_wall_summary_escapes_origin() {
        let draft = PassportDraft {
            origin: "<i>Mars</i>".to_string(),
            ..genk()
        };
        let html = render_wall_entry(&record("1", draft), WallEntryState::default(), &Utc);
        assert!(!html.contains("<i>"));
        assert!(html.contains("Made in &lt;i&gt;Mars&lt;/i&gt;"));
    }

    #[test]
    fn test_empty_wall_shows_message() {
        let html = render_wall(&[], &WallState::new(), &Utc);
        assert!(html.contains(EMPTY_WALL_MESSAGE));
        assert!(!html.contains("wall-card"));
    }

    #[test]
    fn test_wall_keeps_sequence_order() {
        let a = record("1", PassportDraft { product_name: "A".into(), ..genk() });
        let b = record("2", PassportDraft { product_name: "B".into(), ..genk() });
        let html = render_wall(&[b, a], &WallState::new(), &Utc);
        let pos_b = html.find(r#"data-id="2""#).unwrap();
        let pos_a = html.find(r#"data-id="1""#).unwrap();
        assert!(pos_b < pos_a);
        assert_eq!(html.matches("<article class=\"wall-card\"").count(), 2);
    }
}
