use crate::core::debounce::Debouncer;
use crate::domain::model::{FieldRule, FieldSnapshot, FieldState};
use tokio::time::{Duration, Instant};

/// 單一欄位：保存目前文字與規則，去抖動後推導有效性與內容
#[derive(Debug)]
pub struct FieldValidator {
    rule: FieldRule,
    state: FieldState,
    debouncer: Debouncer<Option<String>>,
}

impl FieldValidator {
    pub fn new(rule: FieldRule, debounce: Duration) -> Self {
        Self {
            rule,
            state: FieldState::default(),
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn name(&self) -> &str {
        &self.rule.name
    }

    /// 最近一次去抖動後的狀態
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn validity(&self, text: Option<&str>) -> bool {
        self.rule.matches(text)
    }

    pub fn on_text_changed(&mut self, text: Option<&str>, now: Instant) {
        self.debouncer.push(text.map(str::to_string), now);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn poll(&mut self, now: Instant) -> Option<FieldSnapshot> {
        let text = self.debouncer.poll(now)?;
        let is_valid = self.validity(text.as_deref());
        self.state = FieldState { text, is_valid };

        let snapshot = self.snapshot();
        tracing::debug!(
            field = %self.rule.name,
            status = ?snapshot.status,
            "debounced field input"
        );
        Some(snapshot)
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            name: self.rule.name.clone(),
            status: self.state.status(),
            is_valid: self.state.is_valid,
            text: self.state.text.clone(),
        }
    }

    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}
