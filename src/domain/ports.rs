use crate::domain::model::{FieldStatus, FormState};

/// 宿主 UI (或送出處理器) 接收表單變化的介面
pub trait FormObserver: Send {
    fn on_form_state_changed(&mut self, state: &FormState);

    /// 每次欄位去抖動後呼叫，可用來更新欄位外框顏色
    fn on_field_status(&mut self, _field: &str, _status: FieldStatus) {}
}

impl<F> FormObserver for F
where
    F: FnMut(&FormState) + Send,
{
    fn on_form_state_changed(&mut self, state: &FormState) {
        self(state)
    }
}
