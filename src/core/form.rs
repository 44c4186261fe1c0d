use crate::config::toml_config::FormConfig;
use crate::core::aggregator::FormAggregator;
use crate::core::field::FieldValidator;
use crate::domain::model::{FieldState, FieldStatus, FormState};
use crate::domain::ports::FormObserver;
use crate::utils::error::{FormError, Result};
use crate::utils::validation::Validate;
use std::collections::HashMap;
use tokio::time::Instant;

/// 一次 `poll` 產生的變化
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldStatusChanged { field: String, status: FieldStatus },
    FormStateChanged(FormState),
}

impl FormEvent {
    pub fn dispatch<O: FormObserver + ?Sized>(&self, observer: &mut O) {
        match self {
            FormEvent::FieldStatusChanged { field, status } => observer.on_field_status(field, *status),
            FormEvent::FormStateChanged(state) => observer.on_form_state_changed(state),
        }
    }
}

/// 表單引擎 (不含 IO)：由呼叫端提供時間並驅動計時器
#[derive(Debug)]
pub struct RegistrationForm {
    name: String,
    validators: Vec<FieldValidator>,
    index: HashMap<String, usize>,
    aggregator: FormAggregator,
    torn_down: bool,
}

impl RegistrationForm {
    pub fn new(config: &FormConfig) -> Result<Self> {
        Self::new_at(config, Instant::now())
    }

    /// 建立表單；設定有任何錯誤都直接失敗，不會留下半成品
    pub fn new_at(config: &FormConfig, now: Instant) -> Result<Self> {
        config.validate()?;

        let debounce = config.debounce_interval();
        let validators: Vec<FieldValidator> = config
            .compile_rules()?
            .into_iter()
            .map(|rule| FieldValidator::new(rule, debounce))
            .collect();

        let index = validators
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name().to_string(), i))
            .collect();

        let mut form = Self {
            name: config.form.name.clone(),
            aggregator: FormAggregator::new(validators.len()),
            validators,
            index,
            torn_down: false,
        };

        if config.emit_initial() {
            for validator in &mut form.validators {
                validator.on_text_changed(Some(""), now);
            }
        }

        tracing::debug!(
            form = %form.name,
            fields = form.validators.len(),
            debounce_ms = debounce.as_millis() as u64,
            "form constructed"
        );
        Ok(form)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.validators.iter().map(FieldValidator::name)
    }

    pub fn field_state(&self, field: &str) -> Option<&FieldState> {
        self.index.get(field).map(|&i| self.validators[i].state())
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn on_text_changed<'t>(
        &mut self,
        field: &str,
        text: impl Into<Option<&'t str>>,
        now: Instant,
    ) -> Result<()> {
        let &i = self
            .index
            .get(field)
            .ok_or_else(|| FormError::UnknownFieldError {
                field: field.to_string(),
            })?;

        if self.torn_down {
            tracing::trace!(field, "input ignored after teardown");
            return Ok(());
        }

        self.validators[i].on_text_changed(text.into(), now);
        Ok(())
    }

    /// 最早到期的去抖動計時器
    pub fn next_deadline(&self) -> Option<Instant> {
        self.validators.iter().filter_map(FieldValidator::deadline).min()
    }

    /// 依截止時間順序觸發所有已到期的計時器
    pub fn poll(&mut self, now: Instant) -> Vec<FormEvent> {
        let mut events = Vec::new();

        while let Some(i) = self.next_due(now) {
            let Some(snapshot) = self.validators[i].poll(now) else {
                break;
            };

            events.push(FormEvent::FieldStatusChanged {
                field: snapshot.name.clone(),
                status: snapshot.status,
            });

            if let Some(state) = self.aggregator.update(i, snapshot) {
                tracing::debug!(
                    form = %self.name,
                    is_valid = state.is_valid,
                    fields = ?state.fields,
                    "form state recomputed"
                );
                events.push(FormEvent::FormStateChanged(state));
            }
        }

        events
    }

    fn next_due(&self, now: Instant) -> Option<usize> {
        self.validators
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.deadline().map(|d| (d, i)))
            .filter(|(deadline, _)| *deadline <= now)
            .min()
            .map(|(_, i)| i)
    }

    /// 依目前保留的欄位值重新計算；尚未所有欄位都有輸出時為 None
    pub fn current_state(&self) -> Option<FormState> {
        self.aggregator.current()
    }

    pub fn teardown(&mut self) {
        for validator in &mut self.validators {
            validator.cancel();
        }
        self.torn_down = true;
        tracing::debug!(form = %self.name, "form torn down");
    }
}
