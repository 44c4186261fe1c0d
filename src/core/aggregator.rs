use crate::domain::model::{FieldSnapshot, FormState};

/// 固定且有順序的欄位集合上的 combine-latest。
///
/// 每個欄位一格，保存最近一次的輸出。所有欄位都輸出過之前不產生任何結果；
/// 之後每次更新都從保存的輸出重新計算整個 `FormState`。
#[derive(Debug)]
pub struct FormAggregator {
    latest: Vec<Option<FieldSnapshot>>,
}

impl FormAggregator {
    pub fn new(field_count: usize) -> Self {
        Self {
            latest: vec![None; field_count],
        }
    }

    /// 每個欄位至少輸出過一次之前都是 Incomplete
    pub fn is_complete(&self) -> bool {
        self.latest.iter().all(Option::is_some)
    }

    pub fn update(&mut self, index: usize, snapshot: FieldSnapshot) -> Option<FormState> {
        let slot = self.latest.get_mut(index)?;
        *slot = Some(snapshot);
        self.current()
    }

    pub fn current(&self) -> Option<FormState> {
        let mut state = FormState {
            is_valid: true,
            fields: Default::default(),
        };

        for snapshot in &self.latest {
            let snapshot = snapshot.as_ref()?;
            state.is_valid &= snapshot.is_valid;
            // 鍵重複時以後面的欄位為準
            state.fields.extend(snapshot.content());
        }

        Some(state)
    }
}
