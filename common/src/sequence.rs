//! パネルごとの要求順序管理
//!
//! 要求ごとに単調増加のチケットを発行し、最新のチケットに対する応答だけを採用する。
//! 新しい要求を始めるかパネルをクリアすると、それ以前の応答は捨てられる。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 要求に付ける番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// チケット発行器（クローンは同じカウンタを共有）
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい要求のチケットを発行（以前のチケットは古くなる）
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// 発行済みチケットをすべて無効にする
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// 最新なら `value` を返し、古ければ捨てる
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_latest(ticket) {
            Some(value)
        } else {
            log::debug!(
                "RequestSequencer::accept: Action=Discarded stale response, ticket={}, latest={}",
                ticket.0,
                self.latest.load(Ordering::SeqCst)
            );
            None
        }
    }
}

/// 近傍検索と詳細取得の順序管理（スカイマップパネル用）
///
/// 検索の開始時と結果の反映時の両方で詳細要求を無効にする。
/// 検索中に古い一覧から選んだ天体の詳細が、検索結果でクリアしたパネルを上書きしない。
#[derive(Debug, Clone, Default)]
pub struct SearchSequencer {
    search: RequestSequencer,
    details: RequestSequencer,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_search(&self) -> Ticket {
        self.details.invalidate();
        self.search.issue()
    }

    /// 最新の検索結果なら採用し、保留中の詳細要求を捨てる
    pub fn finish_search<T>(&self, ticket: Ticket, outcome: T) -> Option<T> {
        let outcome = self.search.accept(ticket, outcome)?;
        self.details.invalidate();
        Some(outcome)
    }

    pub fn begin_details(&self) -> Ticket {
        self.details.issue()
    }

    pub fn finish_details<T>(&self, ticket: Ticket, outcome: T) -> Option<T> {
        self.details.accept(ticket, outcome)
    }
}

/// パネルの表示状態
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// 成功/失敗を状態に変換（失敗時は表示用メッセージ）
    pub fn from_result<E>(result: Result<T, E>, on_error: impl FnOnce(E) -> String) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => LoadState::Failed(on_error(e)),
        }
    }
}
