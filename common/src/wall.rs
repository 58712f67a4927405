//! ウォールカードの開閉状態
//!
//! 詳細パネルの開閉（collapsed ⇄ expanded）と、QRコード生成済みフラグ
//! （一度立ったら戻らない）は独立した状態として持つ。

use std::collections::HashMap;

/// カード1枚分の状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallEntryState {
    pub expanded: bool,
    pub code_rendered: bool,
}

/// トグル操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub expanded: bool,
    /// 今QRコードを描画すべきか（初回展開時のみtrue）
    pub render_code: bool,
}

impl WallEntryState {
    pub fn toggle(&mut self) -> ToggleOutcome {
        self.expanded = !self.expanded;
        let render_code = self.expanded && !self.code_rendered;
        if render_code {
            self.code_rendered = true;
        }
        ToggleOutcome {
            expanded: self.expanded,
            render_code,
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.expanded {
            "Hide details"
        } else {
            "View details"
        }
    }
}

/// ウォール全体の状態（パスポートid → カード状態）
#[derive(Debug, Clone, Default)]
pub struct WallState {
    entries: HashMap<String, WallEntryState>,
}

impl WallState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未登録のidは折りたたみ状態
    pub fn entry(&self, id: &str) -> WallEntryState {
        self.entries.get(id).copied().unwrap_or_default()
    }

    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        self.entries.entry(id.to_string()).or_default().toggle()
    }
}
