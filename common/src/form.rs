//! フォーム読み取り
//!
//! 入力欄の生の値からパスポート候補を組み立てる。副作用なし。

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::PassportDraft;

/// フォームの入力欄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormField {
    ProductName,
    Category,
    Material,
    Origin,
    Co2,
    Recyclability,
    FunFact,
}

impl FormField {
    /// 必須項目（フォーム順）
    pub const REQUIRED: [FormField; 4] = [
        FormField::ProductName,
        FormField::Category,
        FormField::Material,
        FormField::Origin,
    ];

    /// 入力欄のid
    pub fn id(&self) -> &'static str {
        match self {
            FormField::ProductName => "productName",
            FormField::Category => "category",
            FormField::Material => "material",
            FormField::Origin => "origin",
            FormField::Co2 => "co2",
            FormField::Recyclability => "recyclability",
            FormField::FunFact => "funFact",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// 入力検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<FormField>),
}

fn join_fields(fields: &[FormField]) -> String {
    fields.iter().map(FormField::id).collect::<Vec<_>>().join(", ")
}

/// フォームの現在値（すべて生の文字列）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub product_name: String,
    pub category: String,
    pub material: String,
    pub origin: String,
    /// レンジ入力の値（例: "40"）
    pub co2: String,
    pub recyclability: String,
    pub fun_fact: String,
}

impl FormInput {
    /// 候補を組み立てる。必須項目が空なら欠けている項目をすべて返す
    pub fn validate(&self) -> std::result::Result<PassportDraft, ValidationError> {
        let product_name = self.product_name.trim();
        let category = self.category.trim();
        let material = self.material.trim();
        let origin = self.origin.trim();

        let missing: Vec<FormField> = FormField::REQUIRED
            .into_iter()
            .zip([product_name, category, material, origin])
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        Ok(PassportDraft {
            product_name: product_name.to_string(),
            category: category.to_string(),
            material: material.to_string(),
            origin: origin.to_string(),
            co2: parse_score(&self.co2),
            recyclability: parse_score(&self.recyclability),
            fun_fact: self.fun_fact.trim().to_string(),
        })
    }
}

/// 必須項目がそろっていれば候補を返す
pub fn read_form_data(input: &FormInput) -> Option<PassportDraft> {
    input.validate().ok()
}

/// レンジ入力値を0-100に丸める。数値でなければ0
fn parse_score(raw: &str) -> i64 {
    let value: f64 = raw.trim().parse().unwrap_or(0.0);
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as i64
}
