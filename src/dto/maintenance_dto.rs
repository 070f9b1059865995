use serde::Deserialize;

/// `?limit=` del histórico de salud
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}
