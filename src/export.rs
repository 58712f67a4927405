//! ウォールの静的HTML出力

use crate::error::Result;
use chrono::TimeZone;
use passport_common::{render_wall, PassportRecord, WallState};
use std::fmt;
use std::path::Path;

const STYLE: &str = "body{font-family:system-ui,sans-serif;background:#f8fafc;color:#0f172a;margin:2rem}\
.wall-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:1rem}\
.wall-card{background:#fff;border-radius:12px;padding:1rem;box-shadow:0 1px 3px rgba(15,23,42,.15)}\
.wall-card-header{display:flex;justify-content:space-between;align-items:center}\
.badge{background:#dcfce7;border-radius:999px;padding:.2rem .6rem;font-size:.8rem}\
.wall-actions{display:none}\
.wall-summary{color:#475569;font-size:.9rem}\
.wall-details{display:none;border-top:1px solid #e2e8f0;margin-top:.5rem;padding-top:.5rem}\
.wall-details.active{display:block}\
.wall-empty{color:#64748b}";

/// ウォールのHTML文書を組み立てる
pub fn wall_document<Tz>(records: &[PassportRecord], expanded: bool, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut wall = WallState::new();
    if expanded {
        for record in records {
            wall.toggle(&record.id);
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Product Passport Wall</title>\n<style>{}</style>\n</head>\n<body>\n<h1>Product Passport Wall</h1>\n{}\n</body>\n</html>\n",
        STYLE,
        render_wall(records, &wall, tz)
    )
}

/// ウォールをHTMLファイルに書き出す
pub fn export_wall_html(records: &[PassportRecord], output: &Path, expanded: bool) -> Result<()> {
    let html = wall_document(records, expanded, &chrono::Local);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, html)?;
    Ok(())
}
