use crate::core::form::RegistrationForm;
use crate::domain::ports::FormObserver;
use crate::utils::error::{FormError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug)]
enum Command {
    TextChanged { field: String, text: Option<String> },
    Shutdown,
}

/// 以單一 task 驅動表單：輸入、計時器到期與回呼都在同一個 task 中依序處理
pub struct FormSession;

impl FormSession {
    pub fn spawn<O>(form: RegistrationForm, observer: O) -> FormHandle
    where
        O: FormObserver + 'static,
    {
        let fields: HashSet<String> = form.field_names().map(str::to_string).collect();
        let (tx, rx) = mpsc::unbounded_channel();

        tracing::info!("🚀 Form session '{}' started with {} fields", form.name(), fields.len());
        let task = tokio::spawn(run(form, observer, rx));

        FormHandle {
            tx,
            fields: Arc::new(fields),
            task,
        }
    }
}

async fn run<O: FormObserver>(
    mut form: RegistrationForm,
    mut observer: O,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    loop {
        let deadline = form.next_deadline();

        tokio::select! {
            // 關閉指令優先於已到期的計時器
            biased;

            command = rx.recv() => match command {
                Some(Command::TextChanged { field, text }) => {
                    if let Err(e) = form.on_text_changed(&field, text.as_deref(), Instant::now()) {
                        tracing::warn!("⚠️ Ignoring input: {}", e);
                    }
                }
                Some(Command::Shutdown) | None => break,
            },

            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                for event in form.poll(Instant::now()) {
                    event.dispatch(&mut observer);
                }
            }
        }
    }

    form.teardown();
    tracing::info!("🛑 Form session '{}' stopped", form.name());
}

/// 宿主端持有的句柄；所有句柄被丟棄時 session 也會結束
pub struct FormHandle {
    tx: mpsc::UnboundedSender<Command>,
    fields: Arc<HashSet<String>>,
    task: JoinHandle<()>,
}

impl FormHandle {
    /// 對應 `onTextChanged(fieldName, newText)`
    pub fn text_changed<'t>(&self, field: &str, text: impl Into<Option<&'t str>>) -> Result<()> {
        if !self.fields.contains(field) {
            return Err(FormError::UnknownFieldError {
                field: field.to_string(),
            });
        }

        self.tx
            .send(Command::TextChanged {
                field: field.to_string(),
                text: text.into().map(str::to_string),
            })
            .map_err(|_| FormError::SessionClosedError)
    }

    /// 取消所有待觸發的計時器並等 task 結束；回傳後不會再有任何回呼
    pub async fn shutdown(self) -> Result<()> {
        // task 已經結束時送出會失敗，直接等待即可
        let _ = self.tx.send(Command::Shutdown);
        self.task.await.map_err(|e| {
            tracing::error!("❌ Form session task failed: {}", e);
            FormError::SessionClosedError
        })
    }
}
