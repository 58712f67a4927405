//! デモ用のサンプルデータ
//!
//! フォームをもっともらしい値でランダムに埋める。

use rand::seq::SliceRandom;
use rand::Rng;

use crate::form::FormInput;

pub const SAMPLE_NAMES: [&str; 7] = [
    "Genk Battery Pack",
    "Looped Textile Sheet",
    "Flexi Furniture Frame",
    "LumiWear Jacket",
    "Metro E-Scooter Motor",
    "ReForma Toy Block",
    "SMAFACC Demo Cell",
];

pub const SAMPLE_FUN_FACTS: [&str; 5] = [
    "Packed in a modular housing so components can be swapped in minutes.",
    "Made with 72% recycled feedstock from local suppliers.",
    "Designed for disassembly with only four standard fasteners.",
    "Includes a digital care manual embedded in the NFC tag.",
    "Ships with a prepaid return label to enable circular logistics.",
];

pub const SAMPLE_CATEGORIES: [&str; 7] = [
    "battery",
    "textile",
    "furniture",
    "electronics",
    "metal",
    "toy",
    "other",
];

pub const SAMPLE_MATERIALS: [&str; 6] = ["steel", "aluminium", "plastic", "textile", "lithium", "mixed"];

/// 産地セレクトの選択肢
pub const ORIGINS: [&str; 8] = [
    "Genk, Belgium",
    "Antwerp, Belgium",
    "Ghent, Belgium",
    "Eindhoven, Netherlands",
    "Aachen, Germany",
    "Lyon, France",
    "Porto, Portugal",
    "Gdansk, Poland",
];

/// 配列から1つ選ぶ（空なら空文字）
fn pick<'a, R: Rng + ?Sized>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

/// ランダムなフォーム値。`origins` が空なら組み込みの産地リストから選ぶ
pub fn random_form<R: Rng + ?Sized>(rng: &mut R, origins: &[&str]) -> FormInput {
    let origins = if origins.is_empty() { &ORIGINS[..] } else { origins };

    let product_name = pick(rng, &SAMPLE_NAMES).to_string();
    let category = pick(rng, &SAMPLE_CATEGORIES).to_string();
    let material = pick(rng, &SAMPLE_MATERIALS).to_string();
    let origin = pick(rng, origins).to_string();
    let co2: u8 = rng.gen_range(0..=100);
    let recyclability: u8 = rng.gen_range(0..=100);
    let fun_fact = if rng.gen_bool(0.7) {
        pick(rng, &SAMPLE_FUN_FACTS).to_string()
    } else {
        String::new()
    };

    FormInput {
        product_name,
        category,
        material,
        origin,
        co2: co2.to_string(),
        recyclability: recyclability.to_string(),
        fun_fact,
    }
}
