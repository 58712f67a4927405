//! パスポートの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - PassportDraft: フォームから組み立てた未保存の候補
//! - PassportRecord: 保存済みパスポート（id + 作成日時付き）
//! - Category: カテゴリタグ（未知のタグは表示時にOtherへ）

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Battery,
    Textile,
    Furniture,
    Electronics,
    Metal,
    Toy,
    Other,
}

/// カテゴリの表示情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMeta {
    pub label: &'static str,
    pub icon: &'static str,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Battery,
        Category::Textile,
        Category::Furniture,
        Category::Electronics,
        Category::Metal,
        Category::Toy,
        Category::Other,
    ];

    /// 保存されたタグから解決する。未知のタグはOther
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "battery" => Category::Battery,
            "textile" => Category::Textile,
            "furniture" => Category::Furniture,
            "electronics" => Category::Electronics,
            "metal" => Category::Metal,
            "toy" => Category::Toy,
            _ => Category::Other,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Category::Battery => "battery",
            Category::Textile => "textile",
            Category::Furniture => "furniture",
            Category::Electronics => "electronics",
            Category::Metal => "metal",
            Category::Toy => "toy",
            Category::Other => "other",
        }
    }

    pub fn meta(&self) -> CategoryMeta {
        let (label, icon) = match self {
            Category::Battery => ("Battery", "B"),
            Category::Textile => ("Textile", "T"),
            Category::Furniture => ("Furniture", "F"),
            Category::Electronics => ("Electronics", "E"),
            Category::Metal => ("Metal Component", "M"),
            Category::Toy => ("Toy", "Y"),
            Category::Other => ("Other", "?"),
        };
        CategoryMeta { label, icon }
    }
}

/// 未保存のパスポート候補（フォーム入力から毎回作り直される）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportDraft {
    pub product_name: String,

    /// 生のカテゴリタグ（未知の値もそのまま保存する）
    pub category: String,

    pub material: String,

    pub origin: String,

    /// CO2スコア（フォームからは0-100、保存済みデータは範囲外もありうる）
    #[serde(deserialize_with = "deserialize_score")]
    pub co2: i64,

    /// リサイクル率 (%)
    #[serde(deserialize_with = "deserialize_score")]
    pub recyclability: i64,

    #[serde(default)]
    pub fun_fact: String,
}

impl PassportDraft {
    pub fn category_meta(&self) -> CategoryMeta {
        Category::from_tag(&self.category).meta()
    }

    pub fn has_fun_fact(&self) -> bool {
        !self.fun_fact.is_empty()
    }
}

/// 保存済みのスコアを読む。範囲外・小数・数値文字列も受け入れ、nullや数値にならない文字列は0
fn deserialize_score<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => Ok(n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0)),
        serde_json::Value::String(s) => Ok(s
            .trim()
            .parse::<f64>()
            .map(|f| if f.is_nan() { 0 } else { f.round() as i64 })
            .unwrap_or(0)),
        serde_json::Value::Null => Ok(0),
        other => Err(de::Error::custom(format!("invalid score: {}", other))),
    }
}

/// 保存済みパスポート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportRecord {
    #[serde(flatten)]
    pub draft: PassportDraft,

    pub id: String,

    pub created_at: DateTime<Utc>,
}

impl std::ops::Deref for PassportRecord {
    type Target = PassportDraft;

    fn deref(&self) -> &Self::Target {
        &self.draft
    }
}
