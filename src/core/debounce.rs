use tokio::time::{Duration, Instant};

/// 預設安靜間隔
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// 可取消、可重設的去抖動計時器。
///
/// 每次 `push` 都會丟棄前一個尚未觸發的值並重新起算；`poll` 只在
/// 截止時間到達後交出最後一個值。
#[derive(Debug)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.interval, value));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((deadline, value)) if deadline <= now => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// 丟棄尚未觸發的值，之後不會再交出
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
