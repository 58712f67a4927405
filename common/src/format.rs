//! 表示用フォーマット
//!
//! 素材名・CO2帯・サマリー行・保存日時・QRペイロードの整形。

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::types::PassportDraft;

/// CO2スコアの帯
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Co2Band {
    Low,
    Medium,
    High,
}

impl Co2Band {
    /// 33以下: Low, 34-66: Medium, 67以上: High
    pub fn from_score(score: i64) -> Self {
        if score < 34 {
            Co2Band::Low
        } else if score < 67 {
            Co2Band::Medium
        } else {
            Co2Band::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Co2Band::Low => "Low",
            Co2Band::Medium => "Medium",
            Co2Band::High => "High",
        }
    }
}

impl fmt::Display for Co2Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn format_co2_level(score: i64) -> &'static str {
    Co2Band::from_score(score).label()
}

/// メーターバーの幅(%)。保存値は範囲外もありうるので0-100に収める
pub fn meter_percent(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

/// 素材名の表示形
pub fn format_material(value: &str) -> String {
    match value {
        "lithium" => "Lithium-based".to_string(),
        "metal" => "Metal Component".to_string(),
        _ => {
            let mut chars = value.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// ウォールカードのサマリー行（エスケープ前）
pub fn format_summary(draft: &PassportDraft) -> String {
    [
        format_material(&draft.material),
        format!("{} kg CO2e", draft.co2),
        format!("{}% recyclable", draft.recyclability),
        format!("Made in {}", draft.origin),
    ]
    .join(" | ")
}

/// プレビューのCO2表示（例: "40 kg | Medium"）
pub fn format_co2_metric(score: i64) -> String {
    format!("{} kg | {}", score, format_co2_level(score))
}

/// 詳細パネルのCO2表示（例: "40 kg (Medium)"）
pub fn format_co2_detail(score: i64) -> String {
    format!("{} kg ({})", score, format_co2_level(score))
}

/// 保存日時（曜日 + 時:分）
pub fn format_timestamp<Tz>(created_at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    created_at.with_timezone(tz).format("%a %H:%M").to_string()
}

/// QRコードに埋め込むペイロード（コンパクトJSON）
pub fn qr_payload<T: Serialize>(value: &T) -> String {
    // 文字列キーの構造体なのでシリアライズは失敗しない
    serde_json::to_string(value).unwrap_or_default()
}
